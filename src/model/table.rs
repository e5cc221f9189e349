//! Table types.

use serde::{Deserialize, Serialize};

/// A flat table recovered from chart text.
///
/// Rows keep source order. Labels are not deduplicated: two rows for the
/// same month or time stay two rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table
    pub rows: Vec<Row>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Add a `(label, value)` row.
    pub fn add_pair(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push(Row::pair(label, value));
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<Row> for Table {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

/// A table row: a label followed by one or more values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Cells in the row
    pub cells: Vec<String>,
}

impl Row {
    /// Create a new row with cells.
    pub fn new(cells: Vec<String>) -> Self {
        Self { cells }
    }

    /// Create a two-cell row.
    pub fn pair(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            cells: vec![label.into(), value.into()],
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(Into::into).collect())
    }

    /// The first cell, if any.
    pub fn label(&self) -> Option<&str> {
        self.cells.first().map(String::as_str)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
