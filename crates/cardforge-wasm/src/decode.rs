//! Image decoding WASM bindings.
//!
//! This module exposes the cardforge-core image decoding functions to
//! JavaScript, covering photo uploads, stored data URL references, and
//! cheap validation of both.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode an uploaded image file from bytes
//! - [`decode_data_url`] - Decode an image from a base64 data URL
//! - [`is_data_url`] - Check whether a string is shaped like a data URL
//! - [`probe_dimensions`] - Read an image's natural size without decoding pixels
//! - [`validate_image_reference`] - Check a stored data URL still decodes
//! - [`image_to_data_url`] - PNG-encode an image into a data URL
//!
//! # Example
//!
//! ```typescript
//! import { decode_image, decode_data_url, is_data_url } from '@cardforge/wasm';
//!
//! if (is_data_url(reference)) {
//!   const image = decode_data_url(reference);
//!   console.log(`Photo: ${image.width}x${image.height}`);
//! } else {
//!   const bytes = new Uint8Array(await file.arrayBuffer());
//!   const image = decode_image(bytes);
//! }
//! ```

use crate::types::JsSourceImage;
use cardforge_core::decode;
use cardforge_core::encode;
use wasm_bindgen::prelude::*;

/// Decode an uploaded image from bytes.
///
/// Accepts any of the supported upload formats (PNG, JPEG, GIF, WebP) and
/// automatically applies EXIF orientation correction, so the decoded raster
/// matches what the browser renders.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Returns
///
/// A `JsSourceImage` containing the decoded RGBA pixel data, or an error if
/// decoding fails.
///
/// # Errors
///
/// Returns an error if:
/// - The bytes are not in any recognized image format
/// - The image data is corrupted or truncated
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height} photo`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsSourceImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode an image from a base64 data URL.
///
/// This is the path for references the app already stores - trainer photos,
/// badge images, and custom backgrounds all live as `FileReader`-style
/// `data:<type>;base64,...` strings.
///
/// # Arguments
///
/// * `url` - A `data:` URL with a base64 payload
///
/// # Errors
///
/// Returns an error if the string is not a base64 data URL, or if the
/// payload does not decode as an image.
///
/// # Example
///
/// ```typescript
/// const image = decode_data_url(trainer.photo);
/// ```
#[wasm_bindgen]
pub fn decode_data_url(url: &str) -> Result<JsSourceImage, JsValue> {
    decode::decode_data_url(url)
        .map(JsSourceImage::from_source)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check whether a string is shaped like a data URL.
///
/// This performs a quick structural check (scheme plus header/payload
/// separator) without decoding anything. Use it to route a stored reference
/// before choosing between [`decode_data_url`] and a network fetch.
///
/// # Example
///
/// ```typescript
/// if (is_data_url(trainer.photo)) {
///   const image = decode_data_url(trainer.photo);
/// }
/// ```
#[wasm_bindgen]
pub fn is_data_url(s: &str) -> bool {
    decode::data_url::is_data_url(s)
}

/// Read an image's natural dimensions without decoding the pixel data.
///
/// EXIF orientation is taken into account, so the result matches the size
/// the browser will render the image at.
///
/// # Arguments
///
/// * `bytes` - The raw image file bytes as a `Uint8Array`
///
/// # Returns
///
/// A two-element `Uint32Array` of `[width, height]`, or an error if the
/// bytes are not a readable image.
///
/// # Example
///
/// ```typescript
/// const [width, height] = probe_dimensions(bytes);
/// ```
#[wasm_bindgen]
pub fn probe_dimensions(bytes: &[u8]) -> Result<Vec<u32>, JsValue> {
    decode::probe_dimensions(bytes)
        .map(|(width, height)| vec![width, height])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Check that a stored image reference still decodes.
///
/// Parses the data URL and probes the payload's dimensions without a full
/// pixel decode. Useful when restoring a card whose photo or badges came
/// from persisted state.
///
/// # Returns
///
/// A two-element `Uint32Array` of `[width, height]` on success.
///
/// # Errors
///
/// Returns an error if the reference is not a base64 data URL or its
/// payload is not a readable image.
#[wasm_bindgen]
pub fn validate_image_reference(url: &str) -> Result<Vec<u32>, JsValue> {
    decode::validate_image_reference(url)
        .map(|(width, height)| vec![width, height])
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// PNG-encode an image into a `data:image/png;base64,...` URL.
///
/// The encoding is lossless, so this is safe for round-tripping a photo
/// through storage and back into [`decode_data_url`].
///
/// # Errors
///
/// Returns an error if the pixel buffer does not match the dimensions.
///
/// # Example
///
/// ```typescript
/// const url = image_to_data_url(image);
/// imgElement.src = url;
/// ```
#[wasm_bindgen]
pub fn image_to_data_url(image: &JsSourceImage) -> Result<String, JsValue> {
    encode::png_data_url(&image.pixels(), image.width(), image.height())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
