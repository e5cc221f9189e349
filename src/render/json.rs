//! JSON rendering for extraction results.

use crate::error::Result;

use super::Extraction;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an extraction to JSON.
pub fn to_json(extraction: &Extraction, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(extraction)?,
        JsonFormat::Compact => serde_json::to_string(extraction)?,
    };
    Ok(json)
}
