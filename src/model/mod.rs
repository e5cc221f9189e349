//! Data types shared by the parser, the renderers and the service client.

mod response;
mod table;

pub use response::{ExtractRequest, ExtractResponse, HealthStatus};
pub use table::{Row, Table};
