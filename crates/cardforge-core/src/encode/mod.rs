//! Image encoding pipeline for Cardforge.
//!
//! This module provides functionality for:
//! - Encoding RGBA rasters to lossless PNG
//! - Wrapping encoded bytes in `data:image/png;base64,...` URLs
//!
//! # Architecture
//!
//! The encoding pipeline is designed to be used from the browser via WASM
//! bindings. All operations are synchronous and single-threaded within WASM.
//!
//! # Examples
//!
//! ```ignore
//! use cardforge_core::encode::png_data_url;
//!
//! let pixels = vec![128u8; 100 * 100 * 4]; // Gray image
//! let url = png_data_url(&pixels, 100, 100).unwrap();
//! // url is ready to assign to an <img src>
//! ```

mod png;

pub use png::{encode_png, png_data_url, EncodeError};
