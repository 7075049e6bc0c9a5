//! Image decoding pipeline for Cardforge.
//!
//! This module provides functionality for:
//! - Decoding uploaded photos (PNG, JPEG, GIF, WebP) into RGBA rasters
//! - EXIF orientation correction, so crops match what the screen shows
//! - Parsing and building base64 data URLs (the browser's interchange shape)
//! - Validating stored image references without a full decode
//!
//! # Architecture
//!
//! The decoding pipeline is designed to be used from the browser via WASM
//! bindings. All operations are synchronous and single-threaded within WASM;
//! the UI layer decides when to run them (typically right after a file is
//! picked) and feeds the result into the crop session.
//!
//! # Examples
//!
//! ```ignore
//! use cardforge_core::decode::{decode_data_url, SourceImage};
//!
//! let image = decode_data_url(&file_reader_result).unwrap();
//! println!("Decoded {}x{} photo", image.width, image.height);
//! ```

pub mod data_url;
mod raster;
mod types;

pub use data_url::DataUrlError;
pub use raster::{
    decode_data_url, decode_image, probe_dimensions, validate_image_reference,
};
pub use types::{DecodeError, Orientation, SourceImage, BYTES_PER_PIXEL};
