//! Crop-region geometry in displayed and natural coordinates.
//!
//! The browser renders a photo scaled down to fit the crop dialog, but the
//! exported photo must be cut from the image at its intrinsic resolution.
//! This module holds the pure math for that: crop regions in displayed
//! coordinates, the mapping into natural (source-resolution) coordinates,
//! and the interactive move/resize operations for the crop box overlay.
//!
//! # Coordinate Systems
//!
//! - Displayed coordinates: pixels as rendered on screen, origin top-left.
//! - Natural coordinates: pixels at the image's intrinsic resolution.
//! - Percent units: x/width relative to the displayed width, y/height
//!   relative to the displayed height, in the range 0-100.
//!
//! Every operation that produces a region keeps two invariants: the region
//! is square (equal sides in displayed pixels) and lies fully inside the
//! displayed bounds. Callers can feed any rectangle into
//! [`CropRegion::clamped_square`] to restore both.

use serde::{Deserialize, Serialize};

/// Smallest allowed crop box side, in displayed pixels.
pub const MIN_CROP_EDGE: f64 = 1.0;

/// Fraction of the limiting displayed dimension used for the default region.
pub const DEFAULT_REGION_FRACTION: f64 = 0.9;

/// Size of the image as rendered on screen, in CSS pixels.
///
/// Fixed for the lifetime of one crop session; both components must be
/// positive for any mapping to be meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The shorter of the two displayed dimensions.
    pub fn limiting_edge(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Unit of a crop region's coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropUnit {
    /// Percentages of the displayed dimensions (0-100).
    Percent,
    /// Displayed pixels.
    #[default]
    Pixel,
}

/// Corner a resize gesture is dragging.
///
/// The opposite corner stays fixed while the square grows or shrinks
/// toward the dragged one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// User-selected crop rectangle in displayed coordinates.
///
/// `x`/`y` locate the top-left corner. The constructors and the
/// move/resize operations only produce square, in-bounds regions; a region
/// deserialized from the UI goes through [`CropRegion::clamped_square`]
/// before it is trusted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub unit: CropUnit,
}

impl CropRegion {
    /// Create a region in displayed pixels.
    pub fn from_pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
            unit: CropUnit::Pixel,
        }
    }

    /// The default region when a crop session opens: a centered square
    /// covering 90% of the limiting displayed dimension.
    ///
    /// Expressed in percent units, so the box keeps its relative placement
    /// if the dialog is re-laid-out before the first interaction.
    pub fn centered_square(display: DisplaySize) -> Self {
        let side = DEFAULT_REGION_FRACTION * display.limiting_edge();
        let x = (display.width - side) / 2.0;
        let y = (display.height - side) / 2.0;

        Self {
            x: x / display.width * 100.0,
            y: y / display.height * 100.0,
            width: side / display.width * 100.0,
            height: side / display.height * 100.0,
            unit: CropUnit::Percent,
        }
    }

    /// Convert to displayed-pixel units. No-op if already in pixels.
    pub fn to_pixels(&self, display: DisplaySize) -> Self {
        match self.unit {
            CropUnit::Pixel => *self,
            CropUnit::Percent => Self {
                x: self.x / 100.0 * display.width,
                y: self.y / 100.0 * display.height,
                width: self.width / 100.0 * display.width,
                height: self.height / 100.0 * display.height,
                unit: CropUnit::Pixel,
            },
        }
    }

    /// Convert to percent units. No-op if already in percent.
    pub fn to_percent(&self, display: DisplaySize) -> Self {
        match self.unit {
            CropUnit::Percent => *self,
            CropUnit::Pixel => Self {
                x: self.x / display.width * 100.0,
                y: self.y / display.height * 100.0,
                width: self.width / display.width * 100.0,
                height: self.height / display.height * 100.0,
                unit: CropUnit::Percent,
            },
        }
    }

    /// Restore the square and in-bounds invariants on an arbitrary region.
    ///
    /// The side becomes the smaller of the rectangle's sides, clamped to
    /// `MIN_CROP_EDGE..=limiting_edge`, and the box is shifted back inside
    /// the displayed bounds. Result is in pixel units.
    pub fn clamped_square(&self, display: DisplaySize) -> Self {
        let px = self.to_pixels(display);

        let max_side = display.limiting_edge().max(MIN_CROP_EDGE);
        let side = px.width.min(px.height).clamp(MIN_CROP_EDGE, max_side);

        let x = px.x.clamp(0.0, (display.width - side).max(0.0));
        let y = px.y.clamp(0.0, (display.height - side).max(0.0));

        Self::from_pixels(x, y, side, side)
    }

    /// Move the box so its top-left corner sits at `(x, y)`, clamped so the
    /// box never crosses a displayed edge. The side is unchanged.
    pub fn moved_to(&self, x: f64, y: f64, display: DisplaySize) -> Self {
        let px = self.to_pixels(display);
        let side = px.width;

        Self::from_pixels(
            x.clamp(0.0, (display.width - side).max(0.0)),
            y.clamp(0.0, (display.height - side).max(0.0)),
            side,
            side,
        )
    }

    /// Resize the box to `size` pixels on a side, dragging `anchor` while
    /// the opposite corner stays fixed.
    ///
    /// The new side is clamped to `MIN_CROP_EDGE` and to the space between
    /// the fixed corner and the displayed edges, so the result is always
    /// square and in bounds.
    pub fn resized(&self, size: f64, anchor: Anchor, display: DisplaySize) -> Self {
        let px = self.to_pixels(display);
        let right = px.x + px.width;
        let bottom = px.y + px.height;

        // Room available on each axis, measured from the fixed corner.
        let (room_x, room_y) = match anchor {
            Anchor::TopLeft => (right, bottom),
            Anchor::TopRight => (display.width - px.x, bottom),
            Anchor::BottomLeft => (right, display.height - px.y),
            Anchor::BottomRight => (display.width - px.x, display.height - px.y),
        };

        let max_side = room_x.min(room_y).max(MIN_CROP_EDGE);
        let side = size.clamp(MIN_CROP_EDGE, max_side);

        let (x, y) = match anchor {
            Anchor::TopLeft => (right - side, bottom - side),
            Anchor::TopRight => (px.x, bottom - side),
            Anchor::BottomLeft => (right - side, px.y),
            Anchor::BottomRight => (px.x, px.y),
        };

        Self::from_pixels(x, y, side, side)
    }
}

/// Crop rectangle mapped into natural coordinates, with the output raster
/// size it implies.
///
/// The fractional fields locate the exact sub-rectangle of the source;
/// `target_width`/`target_height` are the floored integer dimensions of the
/// raster to produce. Floor, never round: the output must not request more
/// source pixels than the region covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub target_width: u32,
    pub target_height: u32,
}

impl SourceRegion {
    /// True when the region floors to a zero-pixel output on either axis.
    pub fn is_degenerate(&self) -> bool {
        self.target_width == 0 || self.target_height == 0
    }
}

/// Map a displayed-coordinate region onto the source image.
///
/// Each displayed component is multiplied by the matching scale factor
/// (`natural / displayed`, per axis). Callers guarantee a loaded image with
/// non-zero displayed dimensions; zero displayed dimensions are a caller
/// bug, not an error path.
///
/// # Arguments
///
/// * `region` - Crop region in displayed coordinates (either unit)
/// * `display` - Displayed size of the image
/// * `natural_width` - Intrinsic width of the source in pixels
/// * `natural_height` - Intrinsic height of the source in pixels
///
/// # Returns
///
/// The natural-coordinate rectangle plus the floored output dimensions.
pub fn map_to_source(
    region: &CropRegion,
    display: DisplaySize,
    natural_width: u32,
    natural_height: u32,
) -> SourceRegion {
    debug_assert!(
        display.width > 0.0 && display.height > 0.0,
        "displayed dimensions must be positive"
    );

    let px = region.to_pixels(display);
    let scale_x = natural_width as f64 / display.width;
    let scale_y = natural_height as f64 / display.height;

    let width = px.width * scale_x;
    let height = px.height * scale_y;

    SourceRegion {
        x: px.x * scale_x,
        y: px.y * scale_y,
        width,
        height,
        target_width: width.floor() as u32,
        target_height: height.floor() as u32,
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
