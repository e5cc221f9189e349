//! Month/value grid detection.
//!
//! Charts with a category axis of months come back from the model as a grid:
//! one line per month, a `|` between columns, and one numeric column per
//! series. Each numeric cell becomes its own `(label, value)` row, so a line
//! with three series expands into three rows.

use regex::Regex;

use crate::error::Result;
use crate::model::Table;

use super::ParseOptions;

/// Leading decimal numeral, read the way a lenient float parser reads it.
const LEADING_NUMBER_PATTERN: &str =
    r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?";

/// Parser for pipe-delimited grids keyed by a recognisable row label.
#[derive(Debug, Clone)]
pub struct GridParser {
    label_regex: Regex,
    number_regex: Regex,
}

impl GridParser {
    /// Create a grid parser triggered by `label_pattern`.
    pub fn new(label_pattern: &str) -> Result<Self> {
        Ok(Self {
            label_regex: Regex::new(label_pattern)?,
            number_regex: Regex::new(LEADING_NUMBER_PATTERN)
                .expect("leading number pattern is valid"),
        })
    }

    /// Check if the text contains a known row label.
    ///
    /// This is a sniff, not a grammar: a hit routes the text here even if the
    /// grid turns out to be empty.
    pub fn detect(&self, text: &str) -> bool {
        self.label_regex.is_match(text)
    }

    /// Expand every grid line into one row per numeric column.
    pub fn parse(&self, text: &str, options: &ParseOptions) -> Table {
        let text = options.expand_newlines(text);
        let mut table = Table::new();

        for line in text.split('\n') {
            let line = line.trim();
            if line.is_empty() || options.is_title_line(line) {
                continue;
            }

            let cells: Vec<&str> = line.split('|').map(str::trim).collect();
            if cells.len() < 2 {
                continue;
            }

            let label = cells[0];
            for value in &cells[1..] {
                if self.is_number(value) {
                    table.add_pair(label, *value);
                }
            }
        }

        log::debug!("GridParser: {} rows", table.row_count());
        table
    }

    /// Check if a cell starts with a finite decimal number (`12`, `-3.5`, `40%`).
    fn is_number(&self, cell: &str) -> bool {
        self.number_regex
            .find(cell)
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .is_some_and(f64::is_finite)
    }
}
