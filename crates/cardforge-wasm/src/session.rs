//! Crop session WASM bindings.
//!
//! This module exposes the crop dialog state machine to JavaScript. The
//! host drives it with plain calls: `open()` hands back a token, the decode
//! completion comes in through [`CropDialog::image_decoded`] or
//! [`CropDialog::data_url_decoded`] with that token, and the crop box then
//! responds to move/resize until `save()` or `cancel()`.
//!
//! Decoding happens inside the completion call, so the host never holds
//! pixel data - it forwards the picked file's bytes (or the stored data
//! URL) and the displayed size, and reads the resulting state back.
//!
//! # Example
//!
//! ```typescript
//! import { CropDialog } from '@cardforge/wasm';
//!
//! const dialog = new CropDialog();
//! const token = dialog.open();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! dialog.image_decoded(token, bytes, img.width, img.height);
//!
//! if (dialog.state() === 'cropping') {
//!   dialog.set_region(crop.x, crop.y, crop.width, crop.height);
//!   const url = dialog.save();
//!   if (url) trainer.photo = url;
//! }
//! ```

use crate::geometry::parse_anchor;
use cardforge_core::decode;
use cardforge_core::geometry::{CropRegion, DisplaySize};
use cardforge_core::session::{SessionState, SessionToken};
use wasm_bindgen::prelude::*;

/// Crop dialog host for JavaScript.
///
/// Wraps the core session state machine; one instance per dialog, reused
/// across opens.
#[wasm_bindgen]
pub struct CropDialog {
    inner: cardforge_core::session::CropDialog,
}

#[wasm_bindgen]
impl CropDialog {
    /// Create a dialog with no session open.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: cardforge_core::session::CropDialog::new(),
        }
    }

    /// Start a new session and return its token.
    ///
    /// Any previous session is abandoned; a decode still in flight for it
    /// becomes stale and will be ignored on delivery.
    pub fn open(&mut self) -> u32 {
        self.inner.open().0
    }

    /// Current lifecycle state as a string.
    ///
    /// One of `idle`, `image-loading`, `cropping`, `decode-failed`,
    /// `saving`, `cancelled`.
    pub fn state(&self) -> String {
        match self.inner.state() {
            SessionState::Idle => "idle",
            SessionState::ImageLoading => "image-loading",
            SessionState::Cropping => "cropping",
            SessionState::DecodeFailed => "decode-failed",
            SessionState::Saving => "saving",
            SessionState::Cancelled => "cancelled",
        }
        .to_string()
    }

    /// Token of the current session, if one has been opened.
    pub fn token(&self) -> Option<u32> {
        self.inner.token().map(|t| t.0)
    }

    /// Deliver a picked file's bytes for the session identified by `token`.
    ///
    /// The bytes are decoded here (PNG, JPEG, GIF, WebP, with EXIF
    /// orientation applied); success enters `cropping` with the default
    /// centered square, failure enters `decode-failed`. Completions for a
    /// stale token, or for a session that already moved on (for example
    /// cancelled while loading), change nothing.
    ///
    /// # Arguments
    ///
    /// * `token` - Token returned by the matching `open()`
    /// * `bytes` - The raw image file bytes as a `Uint8Array`
    /// * `display_width` - Width the photo is rendered at in the dialog
    /// * `display_height` - Height the photo is rendered at in the dialog
    ///
    /// # Returns
    ///
    /// `true` if the completion was applied, `false` if it was stale.
    pub fn image_decoded(
        &mut self,
        token: u32,
        bytes: &[u8],
        display_width: f64,
        display_height: f64,
    ) -> bool {
        self.inner.image_decoded(
            SessionToken(token),
            decode::decode_image(bytes),
            DisplaySize::new(display_width, display_height),
        )
    }

    /// Deliver a stored data URL for the session identified by `token`.
    ///
    /// Same semantics as [`CropDialog::image_decoded`], but the image comes
    /// from a `data:<type>;base64,...` reference instead of raw bytes.
    pub fn data_url_decoded(
        &mut self,
        token: u32,
        url: &str,
        display_width: f64,
        display_height: f64,
    ) -> bool {
        self.inner.image_decoded(
            SessionToken(token),
            decode::decode_data_url(url),
            DisplaySize::new(display_width, display_height),
        )
    }

    /// The decode error message, when in `decode-failed`.
    pub fn decode_error(&self) -> Option<String> {
        self.inner.decode_error().map(String::from)
    }

    /// The current crop region as `{ x, y, width, height, unit }` in pixel
    /// units, or `undefined` outside `cropping`.
    pub fn region(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.region())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Natural width of the loaded photo, when in `cropping`.
    pub fn natural_width(&self) -> Option<u32> {
        self.inner.natural_size().map(|(width, _)| width)
    }

    /// Natural height of the loaded photo, when in `cropping`.
    pub fn natural_height(&self) -> Option<u32> {
        self.inner.natural_size().map(|(_, height)| height)
    }

    /// Replace the crop region with a box from the overlay, in displayed
    /// pixels.
    ///
    /// The region is re-locked square and re-clamped before it is stored.
    /// Ignored outside `cropping`.
    pub fn set_region(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.inner
            .set_region(CropRegion::from_pixels(x, y, width, height));
    }

    /// Drag the crop box so its top-left corner sits at `(x, y)`.
    /// Ignored outside `cropping`.
    pub fn move_region(&mut self, x: f64, y: f64) {
        self.inner.move_region(x, y);
    }

    /// Resize the crop box to `size` pixels on a side from a corner handle
    /// (`top-left`, `top-right`, `bottom-left`, `bottom-right`).
    /// Ignored outside `cropping`.
    ///
    /// # Errors
    ///
    /// Returns an error if `anchor` is not one of the four handle names.
    pub fn resize_region(&mut self, size: f64, anchor: &str) -> Result<(), JsValue> {
        let anchor = parse_anchor(anchor)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown resize anchor: {}", anchor)))?;
        self.inner.resize_region(size, anchor);
        Ok(())
    }

    /// Render the crop and finish the session.
    ///
    /// Returns the cropped photo as a `data:image/png;base64,...` URL and
    /// enters `saving`. Outside `cropping`, and for regions that floor to
    /// zero source pixels, returns `undefined` without changing state.
    ///
    /// # Errors
    ///
    /// Returns an error if the output raster cannot be allocated or
    /// encoded; the session stays in `cropping` so the user can retry.
    pub fn save(&mut self) -> Result<Option<String>, JsValue> {
        self.inner
            .save()
            .map(|photo| photo.map(|p| p.to_data_url()))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Dismiss the session, discarding the image and region.
    ///
    /// Allowed while loading, cropping, or showing a decode failure; a
    /// decode completion arriving afterwards is ignored even though its
    /// token still matches.
    pub fn cancel(&mut self) {
        self.inner.cancel();
    }
}

impl Default for CropDialog {
    fn default() -> Self {
        Self::new()
    }
}
