//! CSV rendering for recovered tables.

use std::borrow::Cow;

use crate::model::{Row, Table};

/// Escape a single cell for CSV.
///
/// Cells containing a comma or a double quote are quoted, with inner quotes
/// doubled. Anything else is returned as is.
pub fn escape_cell(cell: &str) -> Cow<'_, str> {
    if cell.contains(',') || cell.contains('"') {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Render one row without its line terminator.
pub fn row_to_csv(row: &Row) -> String {
    row.cells
        .iter()
        .map(|cell| escape_cell(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a table as CSV, every row terminated by `\n`.
///
/// No header row is added.
pub fn to_csv(table: &Table) -> String {
    let mut output = String::new();
    for row in &table.rows {
        output.push_str(&row_to_csv(row));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain() {
        assert_eq!(escape_cell("Mar '24"), "Mar '24");
        assert_eq!(escape_cell(""), "");
        assert!(matches!(escape_cell("10.5"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_comma() {
        assert_eq!(escape_cell("1,200"), "\"1,200\"");
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell("\""), "\"\"\"\"");
    }

    #[test]
    fn test_to_csv() {
        let mut table = Table::new();
        table.add_pair("Revenue, total", "1.5");
        table.add_row(Row::from_strings(["single"]));

        assert_eq!(to_csv(&table), "\"Revenue, total\",1.5\nsingle\n");
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(to_csv(&Table::new()), "");
    }
}
