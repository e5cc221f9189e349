//! # plot2csv
//!
//! Turn the text an OCR/vision model produces for a chart image into CSV.
//!
//! Chart models answer with loosely structured text: rows separated by a
//! literal `<0x0A>` token or real line breaks, columns separated by `|` or
//! tabs, a `TITLE | ...` line on top. This library recovers a flat
//! `(label, value)` table from that text and renders it as CSV.
//!
//! ## Quick Start
//!
//! ```
//! let csv = plot2csv::convert_to_csv(Some("9:30 am | 1.25<0x0A>10:15 pm | 2.50"));
//! assert_eq!(csv, "9:30 am,1.25\n10:15 pm,2.50\n");
//! ```
//!
//! ## Features
//!
//! - **Layered parsing**: month grids, clock-time series, pipe pairs, tab
//!   lines, then a plain-text cleanup; the first parser that finds rows wins
//! - **Tagged results**: every [`Extraction`] records which parser produced it
//! - **Never fails**: any input yields a string
//! - **Service client** (feature `client`): submit images to the OCR service

#[cfg(feature = "client")]
pub mod client;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
#[cfg(feature = "client")]
pub use client::{ClientOptions, OcrClient};
pub use detect::{detect_image_format, to_data_url, ImageFormat, ImageSource};
pub use error::{Error, Result};
pub use model::{ExtractRequest, ExtractResponse, HealthStatus, Row, Table};
pub use parser::{ChartParser, ParseOptions};
pub use render::{escape_cell, to_csv, to_json, Extraction, JsonFormat, Tier};

use std::fs;
use std::io::Read;
use std::path::Path;

/// Convert raw chart text to CSV with the default parser.
///
/// Absent or empty input gives an empty string. When no table can be
/// recovered the cleaned text is returned instead of CSV; use [`extract`] to
/// tell the two apart.
///
/// # Example
///
/// ```
/// use plot2csv::convert_to_csv;
///
/// assert_eq!(convert_to_csv(Some("TITLE | ignored<0x0A>X | 5")), "X,5\n");
/// assert_eq!(convert_to_csv(None), "");
/// ```
pub fn convert_to_csv(raw_text: Option<&str>) -> String {
    ChartParser::shared().convert(raw_text)
}

/// Extract a table from raw chart text with the default parser.
///
/// # Example
///
/// ```
/// use plot2csv::{extract, Tier};
///
/// let result = extract("Mar '24 | 10 | 20\nApr '24 | 15");
/// assert_eq!(result.tier, Tier::TableGrid);
/// assert_eq!(result.row_count(), 3);
/// ```
pub fn extract(raw_text: &str) -> Extraction {
    ChartParser::shared().extract(raw_text)
}

/// Extract a table from a file holding raw chart text.
///
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
///
/// # Example
///
/// ```no_run
/// use plot2csv::extract_file;
///
/// let result = extract_file("chart_output.txt").unwrap();
/// std::fs::write("chart_data.csv", result.content).unwrap();
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<Extraction> {
    let data = fs::read(path)?;
    Ok(extract_bytes(&data))
}

/// Extract a table from raw chart text bytes.
pub fn extract_bytes(data: &[u8]) -> Extraction {
    extract(&String::from_utf8_lossy(data))
}

/// Extract a table from a reader.
///
/// # Example
///
/// ```no_run
/// use plot2csv::extract_reader;
///
/// let result = extract_reader(std::io::stdin()).unwrap();
/// print!("{}", result.content);
/// ```
pub fn extract_reader<R: Read>(mut reader: R) -> Result<Extraction> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(extract_bytes(&data))
}
