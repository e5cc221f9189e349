//! Wire types for the OCR service.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Message used when the service reports failure without saying why.
const DEFAULT_SERVICE_ERROR: &str = "Failed to extract data: API returned error";

/// Body of `POST /extract-data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractRequest {
    /// Data URL, `http(s)` URL, or server-local `images/` path
    pub image_url: String,
}

impl ExtractRequest {
    /// Create a request for the given image reference.
    pub fn new(image_url: impl Into<String>) -> Self {
        Self {
            image_url: image_url.into(),
        }
    }
}

/// Body returned by `POST /extract-data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    /// Whether the model produced output
    pub success: bool,

    /// Raw model output, the input to the chart parser
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    /// Failure description when `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Rows the service split out itself (tab-separated model output)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_data: Option<serde_json::Value>,
}

impl ExtractResponse {
    /// Decode a response body.
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Take the raw text out of a successful response.
    ///
    /// A successful response with no `rawText` yields an empty string, which
    /// the parser turns into an empty CSV.
    pub fn into_raw_text(self) -> Result<String> {
        if self.success {
            Ok(self.raw_text.unwrap_or_default())
        } else {
            Err(Error::Service(
                self.error
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| DEFAULT_SERVICE_ERROR.to_string()),
            ))
        }
    }
}

/// Body returned by `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// `"healthy"` when the service is up
    pub status: String,

    /// Human-readable detail
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    /// Check if the service reported itself healthy.
    pub fn is_healthy(&self) -> bool {
        self.status.eq_ignore_ascii_case("healthy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_camel_case() {
        let body = serde_json::to_string(&ExtractRequest::new("images/chart.png")).unwrap();
        assert_eq!(body, r#"{"imageUrl":"images/chart.png"}"#);
    }

    #[test]
    fn test_success_response() {
        let response = ExtractResponse::from_json(
            r#"{"success": true, "rawText": "TITLE | Sales<0x0A>Mar '24 | 10", "tableData": []}"#,
        )
        .unwrap();
        assert!(response.table_data.is_some());
        assert_eq!(
            response.into_raw_text().unwrap(),
            "TITLE | Sales<0x0A>Mar '24 | 10"
        );
    }

    #[test]
    fn test_success_without_raw_text() {
        let response = ExtractResponse::from_json(r#"{"success": true}"#).unwrap();
        assert_eq!(response.into_raw_text().unwrap(), "");
    }

    #[test]
    fn test_failure_response() {
        let response =
            ExtractResponse::from_json(r#"{"success": false, "error": "Local image not found"}"#)
                .unwrap();
        let err = response.into_raw_text().unwrap_err();
        assert!(matches!(err, Error::Service(ref msg) if msg == "Local image not found"));
    }

    #[test]
    fn test_failure_without_message() {
        let response = ExtractResponse::from_json(r#"{"success": false}"#).unwrap();
        let err = response.into_raw_text().unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_SERVICE_ERROR);
    }

    #[test]
    fn test_malformed_body() {
        let result = ExtractResponse::from_json("<html>502 Bad Gateway</html>");
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_health_status() {
        let status: HealthStatus =
            serde_json::from_str(r#"{"status": "healthy", "message": "API is running"}"#).unwrap();
        assert!(status.is_healthy());
        assert_eq!(status.message, "API is running");
    }
}
