//! Delimiter-based fallbacks for text the pattern parsers did not claim.

use crate::model::{Row, Table};

use super::ParseOptions;

/// Recover `(label, value)` rows from pipe-delimited parts.
///
/// Parts are separated by the newline marker only. A part with more than two
/// segments keeps the first two and drops the rest; unlike the grid parser it
/// does not fan out.
pub fn parse_pipe_pairs(text: &str, options: &ParseOptions) -> Table {
    let mut table = Table::new();

    for part in options.split_on_marker(text) {
        let part = part.trim();
        if part.is_empty() || options.is_title_line(part) || !part.contains('|') {
            continue;
        }

        let segments: Vec<&str> = part.split('|').map(str::trim).collect();
        match segments.as_slice() {
            [label, value] => table.add_pair(*label, *value),
            [label, value, ..] if !label.is_empty() && !value.is_empty() => {
                table.add_pair(*label, *value)
            }
            _ => {}
        }
    }

    log::debug!("parse_pipe_pairs: {} rows", table.row_count());
    table
}

/// Split each real line on tab characters.
///
/// Rows keep however many cells the line has, one included. Text without a
/// single tab is left for the raw cleanup.
pub fn parse_tab_rows(text: &str, options: &ParseOptions) -> Table {
    if !text.contains('\t') {
        return Table::new();
    }

    let table: Table = text
        .lines()
        .filter(|line| !line.trim().is_empty() && !options.is_title_line(line))
        .map(|line| Row::from_strings(line.split('\t')))
        .collect();

    log::debug!("parse_tab_rows: {} rows", table.row_count());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipe_pairs_skip_title() {
        let table = parse_pipe_pairs("TITLE | ignored<0x0A>X | 5", &ParseOptions::default());
        assert_eq!(table.rows, vec![Row::pair("X", "5")]);
    }

    #[test]
    fn test_pipe_pairs_keep_first_two_segments() {
        let table = parse_pipe_pairs("Q1 | 5 | 7 | 9<0x0A>Q2 | 6", &ParseOptions::default());
        assert_eq!(table.rows, vec![Row::pair("Q1", "5"), Row::pair("Q2", "6")]);
    }

    #[test]
    fn test_pipe_pairs_empty_segments() {
        // Two segments are taken as they are; wider parts need both cells
        let table = parse_pipe_pairs("X |<0x0A> | 5 | 6<0x0A>Y | 1", &ParseOptions::default());
        assert_eq!(table.rows, vec![Row::pair("X", ""), Row::pair("Y", "1")]);
    }

    #[test]
    fn test_pipe_pairs_ignore_parts_without_pipe() {
        let table = parse_pipe_pairs("header<0x0A><0x0A>A | 1", &ParseOptions::default());
        assert_eq!(table.rows, vec![Row::pair("A", "1")]);
    }

    #[test]
    fn test_tab_rows() {
        let table = parse_tab_rows("A\t1\nB\t2", &ParseOptions::default());
        assert_eq!(table.rows, vec![Row::pair("A", "1"), Row::pair("B", "2")]);
    }

    #[test]
    fn test_tab_rows_allow_single_cells() {
        let table = parse_tab_rows("Year\tValue\nnotes\n\n2020\t3\r\n", &ParseOptions::default());
        assert_eq!(
            table.rows,
            vec![
                Row::pair("Year", "Value"),
                Row::from_strings(["notes"]),
                Row::pair("2020", "3"),
            ]
        );
    }

    #[test]
    fn test_tab_rows_skip_title() {
        let table = parse_tab_rows("TITLE\tRain\nJan\t30", &ParseOptions::default());
        assert_eq!(table.rows, vec![Row::pair("Jan", "30")]);
    }

    #[test]
    fn test_tab_rows_need_a_tab() {
        assert!(parse_tab_rows("just some text", &ParseOptions::default()).is_empty());
    }
}
