//! Crop geometry WASM bindings.
//!
//! This module exposes the core crop-region math to JavaScript so the crop
//! overlay can delegate its drag, resize, and clamping logic instead of
//! re-implementing it. Regions cross the boundary as plain objects
//! (`{ x, y, width, height, unit }`) converted with serde.
//!
//! # Functions
//!
//! - [`default_crop_region`] - The centered square a fresh session starts with
//! - [`clamp_crop_region`] - Restore the square and in-bounds invariants
//! - [`move_crop_region`] - Drag the box to a new position
//! - [`resize_crop_region`] - Resize the box from a corner handle
//! - [`region_to_source`] - Map a displayed region into natural coordinates
//!
//! # Example
//!
//! ```typescript
//! import { default_crop_region, resize_crop_region } from '@cardforge/wasm';
//!
//! let region = default_crop_region(img.width, img.height);
//! region = resize_crop_region(region, 180, 'bottom-right', img.width, img.height);
//! ```

use cardforge_core::geometry::{map_to_source, Anchor, CropRegion, DisplaySize};
use wasm_bindgen::prelude::*;

/// Parse a corner handle name into an anchor.
///
/// Accepts the kebab-case names the overlay uses for its handles.
pub(crate) fn parse_anchor(anchor: &str) -> Option<Anchor> {
    match anchor {
        "top-left" => Some(Anchor::TopLeft),
        "top-right" => Some(Anchor::TopRight),
        "bottom-left" => Some(Anchor::BottomLeft),
        "bottom-right" => Some(Anchor::BottomRight),
        _ => None,
    }
}

fn region_from_js(region: JsValue) -> Result<CropRegion, JsValue> {
    serde_wasm_bindgen::from_value(region).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn region_to_js(region: &CropRegion) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(region).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// The default crop region for a photo displayed at the given size.
///
/// A centered square covering 90% of the limiting displayed dimension,
/// expressed in percent units.
///
/// # Arguments
///
/// * `display_width` - Displayed width of the photo in CSS pixels
/// * `display_height` - Displayed height of the photo in CSS pixels
///
/// # Example
///
/// ```typescript
/// const region = default_crop_region(500, 250);
/// // { x: 27.5, y: 5, width: 45, height: 90, unit: 'percent' }
/// ```
#[wasm_bindgen]
pub fn default_crop_region(display_width: f64, display_height: f64) -> Result<JsValue, JsValue> {
    let display = DisplaySize::new(display_width, display_height);
    region_to_js(&CropRegion::centered_square(display))
}

/// Restore the square and in-bounds invariants on an arbitrary region.
///
/// The result is always a square in pixel units that lies fully inside the
/// displayed bounds. Feed any rectangle from the overlay through this
/// before trusting it.
#[wasm_bindgen]
pub fn clamp_crop_region(
    region: JsValue,
    display_width: f64,
    display_height: f64,
) -> Result<JsValue, JsValue> {
    let display = DisplaySize::new(display_width, display_height);
    let region = region_from_js(region)?;
    region_to_js(&region.clamped_square(display))
}

/// Move the crop box so its top-left corner sits at `(x, y)`.
///
/// The position is clamped so the box never crosses a displayed edge; the
/// side length is unchanged.
#[wasm_bindgen]
pub fn move_crop_region(
    region: JsValue,
    x: f64,
    y: f64,
    display_width: f64,
    display_height: f64,
) -> Result<JsValue, JsValue> {
    let display = DisplaySize::new(display_width, display_height);
    let region = region_from_js(region)?;
    region_to_js(&region.moved_to(x, y, display))
}

/// Resize the crop box to `size` pixels on a side from a corner handle.
///
/// The opposite corner stays fixed. The new side is clamped to the space
/// available between that corner and the displayed edges.
///
/// # Arguments
///
/// * `region` - Current crop region
/// * `size` - Requested side length in displayed pixels
/// * `anchor` - Dragged handle: `top-left`, `top-right`, `bottom-left` or
///   `bottom-right`
/// * `display_width` - Displayed width of the photo
/// * `display_height` - Displayed height of the photo
///
/// # Errors
///
/// Returns an error if `anchor` is not one of the four handle names.
#[wasm_bindgen]
pub fn resize_crop_region(
    region: JsValue,
    size: f64,
    anchor: &str,
    display_width: f64,
    display_height: f64,
) -> Result<JsValue, JsValue> {
    let anchor = parse_anchor(anchor)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown resize anchor: {}", anchor)))?;
    let display = DisplaySize::new(display_width, display_height);
    let region = region_from_js(region)?;
    region_to_js(&region.resized(size, anchor, display))
}

/// Map a displayed-coordinate region onto the source image.
///
/// Returns the natural-coordinate rectangle together with the floored
/// output dimensions (`target_width`/`target_height`) a crop of this region
/// will produce.
///
/// # Arguments
///
/// * `region` - Crop region in displayed coordinates (either unit)
/// * `display_width` - Displayed width of the photo
/// * `display_height` - Displayed height of the photo
/// * `natural_width` - Intrinsic width of the photo in pixels
/// * `natural_height` - Intrinsic height of the photo in pixels
///
/// # Example
///
/// ```typescript
/// const source = region_to_source(region, 500, 250, 2000, 1000);
/// // { x: 400, y: 200, width: 400, height: 400,
/// //   target_width: 400, target_height: 400 }
/// ```
#[wasm_bindgen]
pub fn region_to_source(
    region: JsValue,
    display_width: f64,
    display_height: f64,
    natural_width: u32,
    natural_height: u32,
) -> Result<JsValue, JsValue> {
    let display = DisplaySize::new(display_width, display_height);
    let region = region_from_js(region)?;

    let source = map_to_source(&region, display, natural_width, natural_height);
    serde_wasm_bindgen::to_value(&source).map_err(|e| JsValue::from_str(&e.to_string()))
}
