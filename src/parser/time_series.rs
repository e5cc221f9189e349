//! Clock-time series detection (`9:30 am | 1.25`).

use regex::Regex;

use crate::model::{Row, Table};

// Digits are ASCII only. A time may follow a letter (`at9:30 am`) but not
// a third digit.

/// Clock time, pipe, decimal value.
const PAIR_PATTERN: &str =
    r"(?i)(?:^|[^0-9])([0-9]{1,2}:[0-9]{2}\s*(?:am|pm))\s*\|\s*([0-9]+\.[0-9]+)";

/// Clock time on its own.
const TIME_PATTERN: &str = r"(?i)(?:^|[^0-9])([0-9]{1,2}:[0-9]{2}\s*(?:am|pm))";

/// Pipe followed by a decimal value.
const VALUE_PATTERN: &str = r"\|\s*([0-9]+\.[0-9]+)";

/// Parser for `time | value` pairs, independent of line structure.
#[derive(Debug, Clone)]
pub struct TimeSeriesParser {
    pair_regex: Regex,
    time_regex: Regex,
    value_regex: Regex,
}

impl TimeSeriesParser {
    /// Create a new time-series parser.
    pub fn new() -> Self {
        Self {
            pair_regex: Regex::new(PAIR_PATTERN).expect("pair pattern is valid"),
            time_regex: Regex::new(TIME_PATTERN).expect("time pattern is valid"),
            value_regex: Regex::new(VALUE_PATTERN).expect("value pattern is valid"),
        }
    }

    /// Collect `(time, value)` rows in order of appearance.
    ///
    /// Adjacent pairs are preferred. When none are found, times and values
    /// are collected separately and zipped by position if the counts agree.
    pub fn parse(&self, text: &str) -> Table {
        let table = self.parse_pairs(text);
        if !table.is_empty() {
            log::debug!("TimeSeriesParser: {} adjacent pairs", table.row_count());
            return table;
        }
        self.parse_zipped(text)
    }

    fn parse_pairs(&self, text: &str) -> Table {
        let mut table = Table::new();
        for caps in self.pair_regex.captures_iter(text) {
            table.add_pair(caps[1].trim(), caps[2].trim());
        }
        table
    }

    /// Pair the n-th time with the n-th value.
    ///
    /// Nothing checks that they belong together; equal counts are the only
    /// evidence.
    fn parse_zipped(&self, text: &str) -> Table {
        let times: Vec<&str> = self
            .time_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .collect();
        let values: Vec<&str> = self
            .value_regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .collect();

        if times.is_empty() || times.len() != values.len() {
            if !times.is_empty() || !values.is_empty() {
                log::debug!(
                    "TimeSeriesParser: {} times vs {} values, not zipping",
                    times.len(),
                    values.len()
                );
            }
            return Table::new();
        }

        log::debug!("TimeSeriesParser: zipping {} times by position", times.len());
        times
            .into_iter()
            .zip(values)
            .map(|(time, value)| Row::pair(time, value))
            .collect()
    }
}

impl Default for TimeSeriesParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_pairs() {
        let table = TimeSeriesParser::new().parse("9:30 am | 1.25<0x0A>10:15 pm | 2.50");
        assert_eq!(
            table.rows,
            vec![Row::pair("9:30 am", "1.25"), Row::pair("10:15 pm", "2.50")]
        );
    }

    #[test]
    fn test_case_insensitive_meridiem() {
        let table = TimeSeriesParser::new().parse("TITLE | Price<0x0A>9:30AM|1.5<0x0A>12:00 Pm | 3.0");
        assert_eq!(
            table.rows,
            vec![Row::pair("9:30AM", "1.5"), Row::pair("12:00 Pm", "3.0")]
        );
    }

    #[test]
    fn test_requires_decimal_value() {
        let table = TimeSeriesParser::new().parse("9:30 am | 12");
        assert!(table.is_empty());
    }

    #[test]
    fn test_zips_equal_counts() {
        // Times and values are separated by an extra column, so no adjacent pair matches
        let text = "9:30 am | x | 1.25<0x0A>10:00 am | y | 1.50";
        let table = TimeSeriesParser::new().parse(text);
        assert_eq!(
            table.rows,
            vec![Row::pair("9:30 am", "1.25"), Row::pair("10:00 am", "1.50")]
        );
    }

    #[test]
    fn test_unequal_counts_yield_nothing() {
        let text = "9:30 am | x | 1.25<0x0A>10:00 am | y<0x0A>z | 2.0 | 3.5";
        assert!(TimeSeriesParser::new().parse(text).is_empty());
    }

    #[test]
    fn test_time_glued_to_text() {
        let table = TimeSeriesParser::new().parse("at9:30 am | 1.25<0x0A>x10:15 pm | 2.50");
        assert_eq!(
            table.rows,
            vec![Row::pair("9:30 am", "1.25"), Row::pair("10:15 pm", "2.50")]
        );
    }

    #[test]
    fn test_rejects_three_digit_hour() {
        assert!(TimeSeriesParser::new().parse("123:45 pm | 1.25").is_empty());
    }

    #[test]
    fn test_ascii_digits_only() {
        // Arabic-Indic digits
        assert!(TimeSeriesParser::new().parse("٩:٣٠ am | ١.٢٥").is_empty());
    }

    #[test]
    fn test_no_times() {
        assert!(TimeSeriesParser::new().parse("X | 1.5").is_empty());
    }
}
