//! HTTP client for the chart OCR service.
//!
//! The service exposes two routes:
//!
//! - `POST /extract-data` with `{"imageUrl": ...}`, answering
//!   `{"success": bool, "rawText"?: string, "error"?: string}`
//! - `GET /health`, answering `{"status": ..., "message": ...}`
//!
//! Only the raw text is used; the CSV is always built locally by
//! [`ChartParser`].

use std::time::Duration;

use crate::error::{Error, Result};
use crate::model::{ExtractRequest, ExtractResponse, HealthStatus};
use crate::parser::ChartParser;
use crate::render::Extraction;

/// Default service address.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";

/// Model inference on CPU routinely takes tens of seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Options for the OCR service client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL of the service
    pub endpoint: String,

    /// Whole-request timeout
    pub timeout: Duration,
}

impl ClientOptions {
    /// Create new client options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the service base URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join the base URL and a route, tolerating a trailing slash.
    pub fn url(&self, route: &str) -> String {
        format!(
            "{}/{}",
            self.endpoint.trim_end_matches('/'),
            route.trim_start_matches('/')
        )
    }
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Client for the OCR service.
#[derive(Debug, Clone)]
pub struct OcrClient {
    options: ClientOptions,
    http: reqwest::Client,
    parser: ChartParser,
}

impl OcrClient {
    /// Create a client with the default chart parser.
    pub fn new(options: ClientOptions) -> Result<Self> {
        Self::with_parser(options, ChartParser::default())
    }

    /// Create a client that parses responses with `parser`.
    pub fn with_parser(options: ClientOptions, parser: ChartParser) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(options.timeout)
            .build()?;
        Ok(Self {
            options,
            http,
            parser,
        })
    }

    /// Get the client options.
    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Send an image reference and return the model's raw text.
    pub async fn extract_raw_text(&self, image_url: &str) -> Result<String> {
        let url = self.options.url("extract-data");
        log::debug!("POST {} ({} bytes of imageUrl)", url, image_url.len());

        let response = self
            .http
            .post(&url)
            .json(&ExtractRequest::new(image_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("OCR service answered HTTP {}", status.as_u16());
            return Err(Error::Http(status.as_u16()));
        }

        let body = response.text().await?;
        let raw_text = ExtractResponse::from_json(&body)?
            .into_raw_text()
            .map_err(|e| {
                log::warn!("OCR service reported failure: {}", e);
                e
            })?;
        log::debug!("OCR service returned {} chars", raw_text.len());
        Ok(raw_text)
    }

    /// Send an image reference and parse the answer into CSV.
    pub async fn extract_csv(&self, image_url: &str) -> Result<Extraction> {
        let raw_text = self.extract_raw_text(image_url).await?;
        Ok(self.parser.extract(&raw_text))
    }

    /// Query the service health route.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = self.options.url("health");
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(status.as_u16()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_options_builder() {
        let options = ClientOptions::new()
            .with_endpoint("http://ocr.internal:8080/")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(options.endpoint, "http://ocr.internal:8080/");
        assert_eq!(options.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_url_join() {
        let options = ClientOptions::default();
        assert_eq!(options.url("extract-data"), "http://127.0.0.1:5000/extract-data");

        let options = ClientOptions::new().with_endpoint("http://host/api/");
        assert_eq!(options.url("/health"), "http://host/api/health");
    }

    #[test]
    fn test_client_new() {
        let client = OcrClient::new(ClientOptions::default()).unwrap();
        assert_eq!(client.options().endpoint, DEFAULT_ENDPOINT);
    }
}
