//! Rendering of recovered tables to CSV and JSON.

mod csv;
mod json;
mod result;

pub use csv::{escape_cell, row_to_csv, to_csv};
pub use json::{to_json, JsonFormat};
pub use result::{Extraction, Tier};
