//! Cardforge WASM - WebAssembly bindings for Cardforge
//!
//! This crate provides WASM bindings to expose the cardforge-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `card` - Trainer card data model (slots, badges, derived card text)
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Image decoding bindings (uploads, data URLs, validation)
//! - `geometry` - Crop-region math for the overlay (move, resize, clamp)
//! - `crop` - Source-resolution crop rendering to PNG
//! - `session` - The crop dialog state machine
//!
//! # Usage
//!
//! ```typescript
//! import init, { CropDialog, Trainer } from '@cardforge/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const dialog = new CropDialog();
//! const token = dialog.open();
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! dialog.image_decoded(token, bytes, img.width, img.height);
//! ```

use wasm_bindgen::prelude::*;

mod card;
mod crop;
mod decode;
mod geometry;
mod session;
mod types;

// Re-export public types
pub use card::Trainer;
pub use crop::{crop_to_data_url, crop_to_png};
pub use decode::{
    decode_data_url, decode_image, image_to_data_url, is_data_url, probe_dimensions,
    validate_image_reference,
};
pub use geometry::{
    clamp_crop_region, default_crop_region, move_crop_region, region_to_source,
    resize_crop_region,
};
pub use session::CropDialog;
pub use types::JsSourceImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Simple function to verify WASM is working
#[wasm_bindgen]
pub fn greet(name: &str) -> String {
    format!("Hello, {}! Cardforge WASM is ready.", name)
}
