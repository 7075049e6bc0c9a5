//! Base64 data URL parsing and construction.
//!
//! The browser hands images to the engine the way `FileReader.readAsDataURL`
//! produces them: `data:<media-type>;base64,<payload>`. The engine hands
//! cropped photos back in the same shape so they drop straight into an
//! `<img src>`. Only base64 payloads are supported; URL-encoded data URLs
//! are rejected.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use thiserror::Error;

/// Error types for data URL handling.
#[derive(Debug, Error)]
pub enum DataUrlError {
    /// The string does not start with the `data:` scheme.
    #[error("Not a data URL")]
    NotADataUrl,

    /// The data URL is not base64-encoded.
    #[error("Unsupported data URL encoding (expected base64)")]
    UnsupportedEncoding,

    /// The base64 payload could not be decoded.
    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),
}

/// Parse a base64 data URL into its media type and decoded bytes.
///
/// # Arguments
///
/// * `url` - A string of the form `data:image/png;base64,iVBOR...`
///
/// # Returns
///
/// The media type (e.g. `"image/png"`, possibly empty) and the decoded
/// payload bytes.
///
/// # Errors
///
/// Returns `DataUrlError::NotADataUrl` if the scheme is missing,
/// `DataUrlError::UnsupportedEncoding` if the payload is not marked
/// base64, and `DataUrlError::InvalidBase64` if decoding fails.
pub fn parse(url: &str) -> Result<(String, Vec<u8>), DataUrlError> {
    let rest = url.strip_prefix("data:").ok_or(DataUrlError::NotADataUrl)?;

    let (head, payload) = rest.split_once(',').ok_or(DataUrlError::NotADataUrl)?;

    let media_type = head
        .strip_suffix(";base64")
        .ok_or(DataUrlError::UnsupportedEncoding)?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| DataUrlError::InvalidBase64(e.to_string()))?;

    Ok((media_type.to_string(), bytes))
}

/// Build a base64 data URL from raw bytes.
///
/// # Arguments
///
/// * `media_type` - MIME type of the payload (e.g. `"image/png"`)
/// * `bytes` - The raw payload to encode
pub fn encode(media_type: &str, bytes: &[u8]) -> String {
    let base64 = STANDARD.encode(bytes);
    format!("data:{};base64,{}", media_type, base64)
}

/// Quick structural check for a data URL.
///
/// Only looks at the scheme and the header/payload separator; it does not
/// decode the payload. Use this to route an image reference before paying
/// for a full [`parse`].
pub fn is_data_url(s: &str) -> bool {
    s.strip_prefix("data:").is_some_and(|rest| rest.contains(','))
}
