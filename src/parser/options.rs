//! Parsing options and configuration.

use std::borrow::Cow;

/// Literal token the chart model emits in place of a line break.
pub const DEFAULT_NEWLINE_MARKER: &str = "<0x0A>";

/// Prefix the chart model puts on the chart title line.
pub const DEFAULT_TITLE_MARKER: &str = "TITLE";

/// Abbreviated month followed by a two-digit year, e.g. `Mar '24`.
pub const DEFAULT_GRID_LABEL_PATTERN: &str =
    r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec)\s*['’][0-9]{2}\b";

/// Options for parsing chart text.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Token standing in for a line break
    pub newline_marker: String,

    /// Prefix of title lines, which are never data
    pub title_marker: String,

    /// Regex whose presence routes the text to the grid parser
    pub grid_label_pattern: String,

    /// Apply NFKC normalization before parsing
    pub normalize_unicode: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the newline marker token.
    pub fn with_newline_marker(mut self, marker: impl Into<String>) -> Self {
        self.newline_marker = marker.into();
        self
    }

    /// Set the title marker prefix.
    pub fn with_title_marker(mut self, marker: impl Into<String>) -> Self {
        self.title_marker = marker.into();
        self
    }

    /// Set the grid label pattern.
    pub fn with_grid_label_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.grid_label_pattern = pattern.into();
        self
    }

    /// Enable or disable Unicode normalization.
    pub fn with_unicode_normalization(mut self, normalize: bool) -> Self {
        self.normalize_unicode = normalize;
        self
    }

    /// Check if a line is a title line.
    pub(crate) fn is_title_line(&self, line: &str) -> bool {
        !self.title_marker.is_empty() && line.starts_with(&self.title_marker)
    }

    /// Replace every newline marker with a real line break.
    pub(crate) fn expand_newlines<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.newline_marker.is_empty() || !text.contains(&self.newline_marker) {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.replace(&self.newline_marker, "\n"))
        }
    }

    /// Split on the newline marker token only (real line breaks are kept).
    pub(crate) fn split_on_marker<'a>(&'a self, text: &'a str) -> Vec<&'a str> {
        if self.newline_marker.is_empty() {
            vec![text]
        } else {
            text.split(self.newline_marker.as_str()).collect()
        }
    }

    /// The sequence the raw cleanup strips: title marker followed by ` |`.
    pub(crate) fn title_separator(&self) -> Option<String> {
        if self.title_marker.is_empty() {
            None
        } else {
            Some(format!("{} |", self.title_marker))
        }
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            newline_marker: DEFAULT_NEWLINE_MARKER.to_string(),
            title_marker: DEFAULT_TITLE_MARKER.to_string(),
            grid_label_pattern: DEFAULT_GRID_LABEL_PATTERN.to_string(),
            normalize_unicode: false,
        }
    }
}
