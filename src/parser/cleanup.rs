//! Last-resort cleanup when no table can be recovered.

use super::ParseOptions;

/// Expand newline markers, drop title separators, trim.
///
/// The result is plain text, not CSV.
pub fn clean_raw_text(text: &str, options: &ParseOptions) -> String {
    let mut result = options.expand_newlines(text).into_owned();
    if let Some(separator) = options.title_separator() {
        result = result.replace(&separator, "");
    }
    result.trim().to_string()
}
