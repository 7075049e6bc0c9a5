//! PNG encoding for export.
//!
//! Cropped photos leave the engine as PNG so no compression artifacts are
//! introduced on top of whatever the source format already had. Encoding is
//! lossless; the bytes decode back to exactly the pixels passed in.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::decode::{data_url, BYTES_PER_PIXEL};

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
///
/// PNG-encoded bytes on success, or an error if encoding fails.
///
/// # Example
///
/// ```
/// use cardforge_core::encode::encode_png;
///
/// let pixels = vec![128u8; 100 * 100 * 4]; // Gray image
/// let png = encode_png(&pixels, 100, 100).unwrap();
///
/// // Verify PNG signature
/// assert_eq!(&png[0..4], &[0x89, 0x50, 0x4E, 0x47]);
/// ```
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    // Validate dimensions
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    // Validate pixel data length
    let expected_len = (width as usize) * (height as usize) * BYTES_PER_PIXEL;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    // Create output buffer
    let mut buffer = Cursor::new(Vec::new());

    let encoder = PngEncoder::new(&mut buffer);

    // Encode the image
    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode RGBA pixel data straight to a `data:image/png;base64,...` URL.
///
/// This is the reference shape the card composer consumes (`<img src>`).
///
/// # Errors
///
/// Same conditions as `encode_png`.
pub fn png_data_url(pixels: &[u8], width: u32, height: u32) -> Result<String, EncodeError> {
    let png = encode_png(pixels, width, height)?;
    Ok(data_url::encode("image/png", &png))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
