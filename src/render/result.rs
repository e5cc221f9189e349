//! Extraction result with the tier that produced it.

use crate::model::Table;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which parser produced an extraction.
///
/// Structured tiers run in [`Tier::STRUCTURED`] order; the first one that
/// recovers a row wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Input was empty; no parser ran
    Empty,
    /// Month/value grid
    TableGrid,
    /// Clock-time series
    TimeSeries,
    /// Pipe-delimited pairs
    GenericDelimiter,
    /// Tab-separated lines
    TabDelimited,
    /// Cleaned text, no table structure
    RawCleanup,
}

impl Tier {
    /// Structured tiers, in priority order.
    pub const STRUCTURED: [Tier; 4] = [
        Tier::TableGrid,
        Tier::TimeSeries,
        Tier::GenericDelimiter,
        Tier::TabDelimited,
    ];

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Empty => "empty",
            Tier::TableGrid => "table_grid",
            Tier::TimeSeries => "time_series",
            Tier::GenericDelimiter => "generic_delimiter",
            Tier::TabDelimited => "tab_delimited",
            Tier::RawCleanup => "raw_cleanup",
        }
    }

    /// Check if this tier produces CSV.
    pub fn is_structured(&self) -> bool {
        Self::STRUCTURED.contains(self)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of extracting a table from chart text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// CSV document, or cleaned text for [`Tier::RawCleanup`]
    pub content: String,

    /// Parser that produced `content`
    pub tier: Tier,

    /// Recovered rows (empty unless the tier is structured)
    pub table: Table,
}

impl Extraction {
    /// Result for empty input.
    pub fn empty() -> Self {
        Self {
            content: String::new(),
            tier: Tier::Empty,
            table: Table::new(),
        }
    }

    /// Result of a structured tier.
    pub fn structured(tier: Tier, table: Table) -> Self {
        Self {
            content: super::to_csv(&table),
            tier,
            table,
        }
    }

    /// Result of the raw cleanup.
    pub fn raw(content: String) -> Self {
        Self {
            content,
            tier: Tier::RawCleanup,
            table: Table::new(),
        }
    }

    /// Check if `content` is CSV built from recovered rows.
    pub fn is_tabular(&self) -> bool {
        self.tier.is_structured()
    }

    /// Number of recovered rows.
    pub fn row_count(&self) -> usize {
        self.table.row_count()
    }

    /// Take the content.
    pub fn into_content(self) -> String {
        self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_result() {
        let mut table = Table::new();
        table.add_pair("X", "5");
        let result = Extraction::structured(Tier::GenericDelimiter, table);

        assert_eq!(result.content, "X,5\n");
        assert!(result.is_tabular());
        assert_eq!(result.row_count(), 1);
    }

    #[test]
    fn test_raw_and_empty_are_not_tabular() {
        assert!(!Extraction::empty().is_tabular());
        assert!(!Extraction::raw("text".to_string()).is_tabular());
        assert_eq!(Extraction::empty().content, "");
    }

    #[test]
    fn test_tier_names() {
        assert_eq!(Tier::TableGrid.to_string(), "table_grid");
        assert_eq!(
            serde_json::to_string(&Tier::RawCleanup).unwrap(),
            "\"raw_cleanup\""
        );
    }
}
