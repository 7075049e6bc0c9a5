//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Cardforge types, handling the conversion between Rust and JavaScript
//! data representations.

use cardforge_core::decode::SourceImage;
use wasm_bindgen::prelude::*;

/// A decoded photo wrapper for JavaScript.
///
/// This type wraps the core `SourceImage` type and provides a
/// JavaScript-friendly interface for accessing image dimensions and pixel
/// data. The pixel layout matches browser `ImageData`: RGBA, 4 bytes per
/// pixel, row-major order.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy
/// is made to JavaScript memory as a `Uint8Array`. For performance-critical
/// code, keep the image in WASM memory and only extract pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory, but
/// this is optional as wasm-bindgen's finalizer will handle cleanup
/// automatically.
#[wasm_bindgen]
pub struct JsSourceImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsSourceImage {
    /// Create a new JsSourceImage from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsSourceImage {
        JsSourceImage {
            width,
            height,
            pixels,
        }
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 4 for RGBA)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data, so the result can be
    /// handed to `ImageData` without aliasing WASM memory.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically. Call this to immediately release a large photo.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsSourceImage {
    /// Create a JsSourceImage from a core SourceImage.
    ///
    /// This is an internal constructor used by the decode and crop bindings.
    pub(crate) fn from_source(img: SourceImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Convert back to a core SourceImage.
    ///
    /// This is used when passing an image to core functions like the crop
    /// renderer. Note: This clones the pixel data.
    pub(crate) fn to_source(&self) -> SourceImage {
        SourceImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}
