//! Cardforge Core - Trainer card crop and export engine
//!
//! This crate provides the core functionality for Cardforge, including image
//! decoding, crop geometry, the crop session state machine, lossless PNG
//! export, and the trainer card data model.

pub mod card;
pub mod crop;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod session;

pub use crop::{render_crop, render_source_region, CropError, CroppedPhoto};
pub use geometry::{map_to_source, Anchor, CropRegion, CropUnit, DisplaySize, SourceRegion};
pub use session::{CropDialog, SessionState, SessionToken};
