//! Crop session lifecycle.
//!
//! One dialog, one session at a time: pick a file, wait for the decode,
//! drag the square crop box, then save or cancel. The dialog host owns the
//! session and hands out a token per open; decode completions carry the
//! token back, and completions for anything but the current, still-loading
//! session are dropped on the floor. That token check is the whole
//! cancellation story - single-threaded, no locks, no flags to unwind.
//!
//! # States
//!
//! ```text
//! Idle -> ImageLoading -> Cropping -> Saving
//!              |              |
//!              |              +-> Cancelled
//!              +-> DecodeFailed / Cancelled
//! ```
//!
//! `Saving`, `Cancelled` and `DecodeFailed` are terminal for the session;
//! the next `open()` starts a fresh one and retires the old token.

use serde::{Deserialize, Serialize};

use crate::crop::{render_source_region, CropError, CroppedPhoto};
use crate::decode::{DecodeError, SourceImage};
use crate::geometry::{map_to_source, Anchor, CropRegion, DisplaySize};

/// Identifies one crop session across async boundaries.
///
/// Monotonically increasing per dialog; a completion tagged with an old
/// token is stale and gets ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(pub u32);

/// Observable lifecycle state of the crop dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    /// No session open.
    Idle,
    /// File picked, decode in flight.
    ImageLoading,
    /// Photo on screen, crop box interactive.
    Cropping,
    /// The picked file did not decode; the dialog shows the error.
    DecodeFailed,
    /// Crop rendered and handed off.
    Saving,
    /// Dismissed without output.
    Cancelled,
}

/// Live data while the crop box is interactive.
struct CroppingState {
    image: SourceImage,
    display: DisplaySize,
    region: CropRegion,
}

enum Phase {
    Loading,
    Cropping(Box<CroppingState>),
    DecodeFailed(String),
    Saving,
    Cancelled,
}

struct CropSession {
    token: SessionToken,
    phase: Phase,
}

/// Host for the photo crop dialog.
///
/// Owns at most one session and the token counter. All methods are
/// synchronous; the only suspended operation in the flow (the decode)
/// reports back through [`CropDialog::image_decoded`] with its token.
pub struct CropDialog {
    next_token: u32,
    session: Option<CropSession>,
}

impl CropDialog {
    pub fn new() -> Self {
        Self {
            next_token: 1,
            session: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::Idle,
            Some(session) => match &session.phase {
                Phase::Loading => SessionState::ImageLoading,
                Phase::Cropping(_) => SessionState::Cropping,
                Phase::DecodeFailed(_) => SessionState::DecodeFailed,
                Phase::Saving => SessionState::Saving,
                Phase::Cancelled => SessionState::Cancelled,
            },
        }
    }

    /// Token of the current session, if one has been opened.
    pub fn token(&self) -> Option<SessionToken> {
        self.session.as_ref().map(|s| s.token)
    }

    /// Start a new session and return its token.
    ///
    /// Any previous session is abandoned outright; its token becomes stale,
    /// so a decode still in flight for it can no longer touch the dialog.
    pub fn open(&mut self) -> SessionToken {
        let token = SessionToken(self.next_token);
        self.next_token += 1;

        self.session = Some(CropSession {
            token,
            phase: Phase::Loading,
        });
        token
    }

    /// Deliver a decode completion for the session identified by `token`.
    ///
    /// On the current, still-loading session: a successful decode enters
    /// `Cropping` with the default centered square region, and a failed one
    /// enters `DecodeFailed`. Completions for a stale token, or for a
    /// session that has moved on (cancelled while loading), change nothing.
    ///
    /// # Arguments
    ///
    /// * `token` - Token the decode was started under
    /// * `result` - The decoded photo, or the decode error
    /// * `display` - Size the photo is rendered at in the dialog
    ///
    /// # Returns
    ///
    /// `true` if the completion was applied, `false` if it was stale.
    pub fn image_decoded(
        &mut self,
        token: SessionToken,
        result: Result<SourceImage, DecodeError>,
        display: DisplaySize,
    ) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.token != token || !matches!(session.phase, Phase::Loading) {
            return false;
        }

        session.phase = match result {
            Ok(image) => {
                debug_assert!(
                    display.width > 0.0 && display.height > 0.0,
                    "displayed dimensions must be positive"
                );
                let region = CropRegion::centered_square(display);
                Phase::Cropping(Box::new(CroppingState {
                    image,
                    display,
                    region,
                }))
            }
            Err(e) => Phase::DecodeFailed(e.to_string()),
        };
        true
    }

    /// The decode error message, when in `DecodeFailed`.
    pub fn decode_error(&self) -> Option<&str> {
        match &self.session {
            Some(CropSession {
                phase: Phase::DecodeFailed(message),
                ..
            }) => Some(message),
            _ => None,
        }
    }

    /// The current crop region (pixel units), when in `Cropping`.
    pub fn region(&self) -> Option<CropRegion> {
        self.cropping().map(|s| s.region.to_pixels(s.display))
    }

    /// The displayed size the session was opened with, when in `Cropping`.
    pub fn display(&self) -> Option<DisplaySize> {
        self.cropping().map(|s| s.display)
    }

    /// Natural dimensions of the loaded photo, when in `Cropping`.
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        self.cropping().map(|s| (s.image.width, s.image.height))
    }

    /// Replace the crop region with one coming from the UI overlay.
    ///
    /// The region is re-locked square and re-clamped before it is stored,
    /// so the session invariants hold no matter what the caller sends.
    /// Ignored outside `Cropping`.
    pub fn set_region(&mut self, region: CropRegion) {
        if let Some(state) = self.cropping_mut() {
            state.region = region.clamped_square(state.display);
        }
    }

    /// Drag the crop box so its top-left corner sits at `(x, y)`.
    /// Ignored outside `Cropping`.
    pub fn move_region(&mut self, x: f64, y: f64) {
        if let Some(state) = self.cropping_mut() {
            state.region = state.region.moved_to(x, y, state.display);
        }
    }

    /// Resize the crop box to `size` pixels on a side from `anchor`.
    /// Ignored outside `Cropping`.
    pub fn resize_region(&mut self, size: f64, anchor: Anchor) {
        if let Some(state) = self.cropping_mut() {
            state.region = state.region.resized(size, anchor, state.display);
        }
    }

    /// Render the crop and finish the session.
    ///
    /// Outside `Cropping`, and for regions that floor to zero source
    /// pixels, this is a no-op returning `Ok(None)`: no transition, no
    /// output, no error. On success the session enters `Saving` and the
    /// rendered photo is returned for handoff. On a render failure the
    /// session stays in `Cropping` so the user can retry or cancel.
    pub fn save(&mut self) -> Result<Option<CroppedPhoto>, CropError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(None);
        };
        let Phase::Cropping(state) = &session.phase else {
            return Ok(None);
        };

        let source = map_to_source(
            &state.region,
            state.display,
            state.image.width,
            state.image.height,
        );
        if source.is_degenerate() {
            return Ok(None);
        }

        let photo = render_source_region(&state.image, &source)?;
        session.phase = Phase::Saving;
        Ok(Some(photo))
    }

    /// Dismiss the session, discarding the image and region.
    ///
    /// Allowed while loading, cropping, or showing a decode failure; a
    /// decode completion arriving afterwards is ignored even though its
    /// token still matches. No-op in terminal or idle states.
    pub fn cancel(&mut self) {
        if let Some(session) = self.session.as_mut() {
            if matches!(
                session.phase,
                Phase::Loading | Phase::Cropping(_) | Phase::DecodeFailed(_)
            ) {
                session.phase = Phase::Cancelled;
            }
        }
    }

    fn cropping(&self) -> Option<&CroppingState> {
        match &self.session {
            Some(CropSession {
                phase: Phase::Cropping(state),
                ..
            }) => Some(state),
            _ => None,
        }
    }

    fn cropping_mut(&mut self) -> Option<&mut CroppingState> {
        match &mut self.session {
            Some(CropSession {
                phase: Phase::Cropping(state),
                ..
            }) => Some(state),
            _ => None,
        }
    }
}

impl Default for CropDialog {
    fn default() -> Self {
        Self::new()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
