//! Chart text parsing.
//!
//! [`ChartParser`] runs a fixed chain of parsers over the raw text returned by
//! the OCR service and keeps the first one that recovers any rows:
//!
//! 1. month/value grid ([`GridParser`])
//! 2. clock-time series ([`TimeSeriesParser`])
//! 3. pipe-delimited pairs ([`parse_pipe_pairs`])
//! 4. tab-separated lines ([`parse_tab_rows`])
//! 5. raw cleanup ([`clean_raw_text`]), which always succeeds
//!
//! Every step is a pure function of the input; the parser holds only
//! compiled patterns and can be shared across threads.

mod cleanup;
mod delimited;
mod grid;
mod options;
mod time_series;

pub use cleanup::clean_raw_text;
pub use delimited::{parse_pipe_pairs, parse_tab_rows};
pub use grid::GridParser;
pub use options::{
    ParseOptions, DEFAULT_GRID_LABEL_PATTERN, DEFAULT_NEWLINE_MARKER, DEFAULT_TITLE_MARKER,
};
pub use time_series::TimeSeriesParser;

use once_cell::sync::Lazy;
use rayon::prelude::*;
use unicode_normalization::UnicodeNormalization;

use crate::error::Result;
use crate::model::Table;
use crate::render::{Extraction, Tier};

static DEFAULT_PARSER: Lazy<ChartParser> = Lazy::new(|| {
    ChartParser::new(ParseOptions::default()).expect("default grid label pattern is valid")
});

/// Turns raw chart text into CSV.
#[derive(Debug, Clone)]
pub struct ChartParser {
    options: ParseOptions,
    grid: GridParser,
    time_series: TimeSeriesParser,
}

impl ChartParser {
    /// Create a parser with the given options.
    ///
    /// Fails only if `options.grid_label_pattern` is not a valid regex.
    pub fn new(options: ParseOptions) -> Result<Self> {
        let grid = GridParser::new(&options.grid_label_pattern)?;
        Ok(Self {
            options,
            grid,
            time_series: TimeSeriesParser::new(),
        })
    }

    /// Process-wide parser with default options, compiled on first use.
    pub(crate) fn shared() -> &'static ChartParser {
        &DEFAULT_PARSER
    }

    /// Get the parse options.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Extract a table from raw text, tagged with the tier that produced it.
    pub fn extract(&self, raw_text: &str) -> Extraction {
        if raw_text.is_empty() {
            return Extraction::empty();
        }

        let text = if self.options.normalize_unicode {
            raw_text.nfkc().collect::<String>()
        } else {
            raw_text.to_string()
        };

        for tier in Tier::STRUCTURED {
            if let Some(table) = self.run_tier(tier, &text) {
                log::debug!("ChartParser: {} produced {} rows", tier, table.row_count());
                return Extraction::structured(tier, table);
            }
        }

        log::debug!("ChartParser: no structure found, returning cleaned text");
        Extraction::raw(clean_raw_text(&text, &self.options))
    }

    /// Convert raw text to CSV. Absent input gives an empty string.
    pub fn convert(&self, raw_text: Option<&str>) -> String {
        raw_text
            .map(|text| self.extract(text).into_content())
            .unwrap_or_default()
    }

    /// Extract several independent inputs in parallel, keeping input order.
    pub fn extract_batch<S: AsRef<str> + Sync>(&self, inputs: &[S]) -> Vec<Extraction> {
        inputs
            .par_iter()
            .map(|text| self.extract(text.as_ref()))
            .collect()
    }

    /// Run one structured tier; `None` when it recovers no rows.
    fn run_tier(&self, tier: Tier, text: &str) -> Option<Table> {
        let table = match tier {
            Tier::TableGrid => {
                if !self.grid.detect(text) {
                    return None;
                }
                self.grid.parse(text, &self.options)
            }
            Tier::TimeSeries => self.time_series.parse(text),
            Tier::GenericDelimiter => parse_pipe_pairs(text, &self.options),
            Tier::TabDelimited => parse_tab_rows(text, &self.options),
            Tier::Empty | Tier::RawCleanup => return None,
        };
        (!table.is_empty()).then_some(table)
    }
}

impl Default for ChartParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}
