//! Crop rendering WASM bindings.
//!
//! This module exposes the source-resolution crop renderer to JavaScript.
//! The crop region arrives in displayed pixels together with the displayed
//! size; the output is cut from the image at its intrinsic resolution and
//! returned as a lossless PNG.
//!
//! # Functions
//!
//! - [`crop_to_png`] - Render a crop and return the PNG bytes
//! - [`crop_to_data_url`] - Render a crop and return a `data:` URL
//!
//! # Example
//!
//! ```typescript
//! import { decode_data_url, crop_to_data_url } from '@cardforge/wasm';
//!
//! const image = decode_data_url(reference);
//! const url = crop_to_data_url(
//!   image,
//!   crop.x, crop.y, crop.width, crop.height,
//!   imgElement.width, imgElement.height,
//! );
//! trainer.photo = url;
//! ```

use crate::types::JsSourceImage;
use cardforge_core::crop::render_crop;
use cardforge_core::geometry::{CropRegion, DisplaySize};
use wasm_bindgen::prelude::*;

/// Render a crop and return the PNG bytes.
///
/// The region is given in displayed pixels; the output raster is cut from
/// the source at its natural resolution, so a 100x100 on-screen box over a
/// 4x-downscaled photo produces a 400x400 PNG.
///
/// # Arguments
///
/// * `image` - Decoded source photo at natural resolution
/// * `x` - Left edge of the crop box in displayed pixels
/// * `y` - Top edge of the crop box in displayed pixels
/// * `width` - Crop box width in displayed pixels
/// * `height` - Crop box height in displayed pixels
/// * `display_width` - Displayed width of the photo
/// * `display_height` - Displayed height of the photo
///
/// # Returns
///
/// The PNG-encoded crop as a `Uint8Array`.
///
/// # Errors
///
/// Returns an error if the region covers no whole source pixel, or if the
/// output raster cannot be allocated or encoded.
#[wasm_bindgen]
pub fn crop_to_png(
    image: &JsSourceImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    display_width: f64,
    display_height: f64,
) -> Result<Vec<u8>, JsValue> {
    let source = image.to_source();
    let region = CropRegion::from_pixels(x, y, width, height);
    let display = DisplaySize::new(display_width, display_height);

    render_crop(&source, &region, display)
        .map(|photo| photo.png)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Render a crop and return it as a `data:image/png;base64,...` URL.
///
/// Same semantics as [`crop_to_png`]; the result drops straight into an
/// `<img src>` or the trainer's photo field.
///
/// # Errors
///
/// Returns an error if the region covers no whole source pixel, or if the
/// output raster cannot be allocated or encoded.
///
/// # Example
///
/// ```typescript
/// const url = crop_to_data_url(image, 100, 50, 100, 100, 500, 250);
/// ```
#[wasm_bindgen]
pub fn crop_to_data_url(
    image: &JsSourceImage,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    display_width: f64,
    display_height: f64,
) -> Result<String, JsValue> {
    let source = image.to_source();
    let region = CropRegion::from_pixels(x, y, width, height);
    let display = DisplaySize::new(display_width, display_height);

    render_crop(&source, &region, display)
        .map(|photo| photo.to_data_url())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
