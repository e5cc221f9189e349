//! Image reference classification and format detection.
//!
//! The OCR service takes a single `imageUrl` string. It may be a `data:` URL
//! carrying the image inline (screenshots), a remote `http(s)` URL (images
//! on a page), or a path the service resolves on its own disk.

use crate::error::{Error, Result};
use base64::Engine as _;
use std::fmt;
use std::fs;
use std::path::Path;

/// Prefix of paths the service reads from its own disk.
const SERVER_LOCAL_PREFIX: &str = "images/";

/// Kind of image reference sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// `data:<mime>;base64,...`
    DataUrl,
    /// `http://` or `https://`
    Remote,
    /// Path under the service's `images/` directory
    ServerLocal,
    /// Anything else
    Unknown,
}

impl ImageSource {
    /// Classify an image reference.
    pub fn classify(image_url: &str) -> Self {
        let lower = image_url.trim_start().to_ascii_lowercase();
        if lower.starts_with("data:") {
            ImageSource::DataUrl
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Remote
        } else if image_url.starts_with(SERVER_LOCAL_PREFIX) {
            ImageSource::ServerLocal
        } else {
            ImageSource::Unknown
        }
    }

    /// Check if the service can resolve this reference without help.
    pub fn is_resolvable(&self) -> bool {
        !matches!(self, ImageSource::Unknown)
    }
}

/// Image formats the service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
    Bmp,
}

impl ImageFormat {
    /// MIME type for data URLs.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
            ImageFormat::Bmp => "image/bmp",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Gif => "GIF",
            ImageFormat::WebP => "WebP",
            ImageFormat::Bmp => "BMP",
        };
        f.write_str(name)
    }
}

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";
const JPEG_MAGIC: &[u8] = b"\xff\xd8\xff";
const GIF87_MAGIC: &[u8] = b"GIF87a";
const GIF89_MAGIC: &[u8] = b"GIF89a";
const BMP_MAGIC: &[u8] = b"BM";
const RIFF_MAGIC: &[u8] = b"RIFF";
const WEBP_MAGIC: &[u8] = b"WEBP";

/// Detect the image format from leading bytes.
///
/// # Returns
/// * `Ok(ImageFormat)` for PNG, JPEG, GIF, WebP or BMP data
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_image_format(data: &[u8]) -> Result<ImageFormat> {
    if data.starts_with(PNG_MAGIC) {
        Ok(ImageFormat::Png)
    } else if data.starts_with(JPEG_MAGIC) {
        Ok(ImageFormat::Jpeg)
    } else if data.starts_with(GIF87_MAGIC) || data.starts_with(GIF89_MAGIC) {
        Ok(ImageFormat::Gif)
    } else if data.len() >= 12 && data.starts_with(RIFF_MAGIC) && &data[8..12] == WEBP_MAGIC {
        Ok(ImageFormat::WebP)
    } else if data.len() >= 14 && data.starts_with(BMP_MAGIC) {
        Ok(ImageFormat::Bmp)
    } else {
        Err(Error::UnknownFormat)
    }
}

/// Encode image bytes as a `data:` URL.
///
/// # Example
/// ```
/// let png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";
/// let url = plot2csv::detect::to_data_url(png).unwrap();
/// assert!(url.starts_with("data:image/png;base64,"));
/// ```
pub fn to_data_url(data: &[u8]) -> Result<String> {
    let format = detect_image_format(data)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(data);
    Ok(format!("data:{};base64,{}", format.mime_type(), payload))
}

/// Read an image file and encode it as a `data:` URL.
pub fn file_to_data_url<P: AsRef<Path>>(path: P) -> Result<String> {
    let data = fs::read(path)?;
    to_data_url(&data)
}
