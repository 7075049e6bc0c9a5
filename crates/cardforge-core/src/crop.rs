//! Source-resolution crop rendering.
//!
//! The crop box the user drags lives in displayed coordinates, but the
//! exported photo is cut from the image at its intrinsic resolution. This
//! module renders that cut: map the region into natural space, copy the
//! covered sub-rectangle out of the source, resample only when the floored
//! target size differs from the copied rectangle, and PNG-encode the result.
//!
//! The output is a standalone raster. It never borrows from the source, so
//! the session can drop the decoded photo as soon as the crop is rendered,
//! and it is never larger than the natural-space size of the region
//! (display scaling never inflates it).

use image::imageops;
use thiserror::Error;

use crate::decode::{data_url, SourceImage, BYTES_PER_PIXEL};
use crate::encode;
use crate::geometry::{map_to_source, CropRegion, DisplaySize, SourceRegion};

/// Errors that can occur while rendering a crop.
#[derive(Debug, Error)]
pub enum CropError {
    /// The output raster or its encoded form could not be created.
    #[error("Rasterization target could not be created")]
    RenderTargetUnavailable,

    /// The region covers no whole source pixel on at least one axis.
    #[error("Crop region is empty at source resolution")]
    DegenerateRegion,
}

/// A rendered crop: PNG bytes plus the raster dimensions they decode to.
///
/// Self-contained; holding one does not keep the source image alive.
#[derive(Debug, Clone)]
pub struct CroppedPhoto {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Lossless PNG encoding of the output raster.
    pub png: Vec<u8>,
}

impl CroppedPhoto {
    /// The photo as a `data:image/png;base64,...` reference, ready for an
    /// `<img src>` or the trainer's photo field.
    pub fn to_data_url(&self) -> String {
        data_url::encode("image/png", &self.png)
    }
}

/// Render the crop a displayed-coordinate region selects.
///
/// The region is mapped through the display-to-natural scale factors first;
/// the output dimensions are the floored natural-space size of the region,
/// never the on-screen size of the crop box.
///
/// # Arguments
///
/// * `image` - Decoded source photo at natural resolution
/// * `region` - Crop region in displayed coordinates (either unit)
/// * `display` - Displayed size of the photo in the dialog
///
/// # Errors
///
/// Returns `CropError::DegenerateRegion` when the region floors to zero
/// pixels on either axis, and `CropError::RenderTargetUnavailable` when
/// the output raster cannot be allocated or encoded.
pub fn render_crop(
    image: &SourceImage,
    region: &CropRegion,
    display: DisplaySize,
) -> Result<CroppedPhoto, CropError> {
    let source = map_to_source(region, display, image.width, image.height);
    render_source_region(image, &source)
}

/// Render a crop already expressed in natural coordinates.
///
/// The integer rectangle covering `source` is copied out of the image
/// (clamped to its bounds) and resampled to the target dimensions when the
/// covered rectangle is larger, using Lanczos3 for quality. Regions that
/// land on whole pixels skip resampling entirely and come out
/// pixel-identical to the source.
pub fn render_source_region(
    image: &SourceImage,
    source: &SourceRegion,
) -> Result<CroppedPhoto, CropError> {
    if image.is_empty() || source.is_degenerate() {
        return Err(CropError::DegenerateRegion);
    }

    // Integer rectangle covering the (possibly fractional) source rect,
    // clamped to the image bounds.
    let left = (source.x.max(0.0).floor() as u32).min(image.width - 1);
    let top = (source.y.max(0.0).floor() as u32).min(image.height - 1);
    let right = ((source.x + source.width).ceil().max(0.0) as u32).clamp(left + 1, image.width);
    let bottom = ((source.y + source.height).ceil().max(0.0) as u32).clamp(top + 1, image.height);

    let rect_w = right - left;
    let rect_h = bottom - top;

    let byte_len = (rect_w as usize)
        .checked_mul(rect_h as usize)
        .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
        .ok_or(CropError::RenderTargetUnavailable)?;

    // The extraction buffer is the allocation that scales with photo size,
    // so it is the one that gets the fallible path.
    let mut rect_pixels: Vec<u8> = Vec::new();
    rect_pixels
        .try_reserve_exact(byte_len)
        .map_err(|_| CropError::RenderTargetUnavailable)?;
    rect_pixels.resize(byte_len, 0);

    // Copy the covered rows out of the source
    let src_stride = image.width as usize * BYTES_PER_PIXEL;
    let dst_stride = rect_w as usize * BYTES_PER_PIXEL;
    for row in 0..rect_h as usize {
        let src_start = (top as usize + row) * src_stride + left as usize * BYTES_PER_PIXEL;
        let dst_start = row * dst_stride;
        rect_pixels[dst_start..dst_start + dst_stride]
            .copy_from_slice(&image.pixels[src_start..src_start + dst_stride]);
    }

    // A fractional origin or scale leaves the covered rectangle larger than
    // the floored target; one filtered resize closes the gap.
    let needs_resample = rect_w != source.target_width || rect_h != source.target_height;
    let (out_w, out_h, out_pixels) = if needs_resample {
        let rect_img = image::RgbaImage::from_raw(rect_w, rect_h, rect_pixels)
            .ok_or(CropError::RenderTargetUnavailable)?;
        let resized = imageops::resize(
            &rect_img,
            source.target_width,
            source.target_height,
            imageops::FilterType::Lanczos3,
        );
        (source.target_width, source.target_height, resized.into_raw())
    } else {
        (rect_w, rect_h, rect_pixels)
    };

    let png = encode::encode_png(&out_pixels, out_w, out_h)
        .map_err(|_| CropError::RenderTargetUnavailable)?;

    Ok(CroppedPhoto {
        width: out_w,
        height: out_h,
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    /// Pixel value at a given position, unique enough to catch misplaced
    /// rows or columns.
    fn pixel_at(x: u32, y: u32) -> [u8; 4] {
        [
            (x % 256) as u8,
            (y % 256) as u8,
            ((x / 256 + (y / 256) * 8) * 31 % 256) as u8,
            255,
        ]
    }

    fn test_image(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width as usize) * (height as usize) * 4);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&pixel_at(x, y));
            }
        }
        SourceImage::new(width, height, pixels)
    }

    fn decoded_pixel(photo: &CroppedPhoto, x: u32, y: u32) -> [u8; 4] {
        let decoded = decode_image(&photo.png).unwrap();
        let idx = ((y * decoded.width + x) * 4) as usize;
        decoded.pixels[idx..idx + 4].try_into().unwrap()
    }

    #[test]
    fn test_render_crop_uses_natural_resolution() {
        // 2000x1000 photo shown at 500x250: every displayed pixel covers
        // four natural pixels on each axis.
        let image = test_image(2000, 1000);
        let display = DisplaySize::new(500.0, 250.0);
        let region = CropRegion::from_pixels(100.0, 50.0, 100.0, 100.0);

        let photo = render_crop(&image, &region, display).unwrap();

        // 400x400 from natural rect (400, 200, 400, 400) - not 100x100
        assert_eq!(photo.width, 400);
        assert_eq!(photo.height, 400);
        assert_eq!(decoded_pixel(&photo, 0, 0), pixel_at(400, 200));
        assert_eq!(decoded_pixel(&photo, 399, 399), pixel_at(799, 599));
    }

    #[test]
    fn test_render_crop_identity_scale_is_exact() {
        // Displayed at natural size: integer regions come out pixel-exact.
        let image = test_image(100, 80);
        let display = DisplaySize::new(100.0, 80.0);
        let region = CropRegion::from_pixels(10.0, 20.0, 40.0, 40.0);

        let photo = render_crop(&image, &region, display).unwrap();
        let decoded = decode_image(&photo.png).unwrap();

        assert_eq!((photo.width, photo.height), (40, 40));
        for y in 0..40 {
            for x in 0..40 {
                let idx = ((y * 40 + x) * 4) as usize;
                let got: [u8; 4] = decoded.pixels[idx..idx + 4].try_into().unwrap();
                assert_eq!(got, pixel_at(x + 10, y + 20), "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_render_crop_full_frame_round_trips() {
        let image = test_image(64, 48);
        let display = DisplaySize::new(64.0, 48.0);
        let region = CropRegion::from_pixels(0.0, 0.0, 64.0, 48.0);

        let photo = render_crop(&image, &region, display).unwrap();
        let decoded = decode_image(&photo.png).unwrap();

        assert_eq!((photo.width, photo.height), (64, 48));
        assert_eq!(decoded.pixels, image.pixels);
    }

    #[test]
    fn test_render_crop_floors_fractional_target() {
        // Scale 1.5x: a 33-pixel displayed box covers 49.5 natural pixels.
        let image = test_image(600, 600);
        let display = DisplaySize::new(400.0, 400.0);
        let region = CropRegion::from_pixels(0.0, 0.0, 33.0, 33.0);

        let photo = render_crop(&image, &region, display).unwrap();

        assert_eq!(photo.width, 49);
        assert_eq!(photo.height, 49);
    }

    #[test]
    fn test_render_crop_degenerate_region() {
        let image = test_image(50, 50);
        let display = DisplaySize::new(50.0, 50.0);
        let region = CropRegion::from_pixels(10.0, 10.0, 0.5, 0.5);

        let result = render_crop(&image, &region, display);
        assert!(matches!(result, Err(CropError::DegenerateRegion)));
    }

    #[test]
    fn test_render_crop_empty_image() {
        let image = SourceImage::new(0, 0, vec![]);
        let display = DisplaySize::new(100.0, 100.0);
        let region = CropRegion::from_pixels(0.0, 0.0, 50.0, 50.0);

        let result = render_crop(&image, &region, display);
        assert!(matches!(result, Err(CropError::DegenerateRegion)));
    }

    #[test]
    fn test_render_source_region_direct() {
        let image = test_image(30, 30);
        let source = SourceRegion {
            x: 5.0,
            y: 5.0,
            width: 10.0,
            height: 10.0,
            target_width: 10,
            target_height: 10,
        };

        let photo = render_source_region(&image, &source).unwrap();

        assert_eq!((photo.width, photo.height), (10, 10));
        assert_eq!(decoded_pixel(&photo, 0, 0), pixel_at(5, 5));
    }

    #[test]
    fn test_render_source_region_clamps_out_of_bounds() {
        let image = test_image(20, 20);
        let source = SourceRegion {
            x: 15.0,
            y: 15.0,
            width: 10.0,
            height: 10.0,
            target_width: 5,
            target_height: 5,
        };

        // Only 5x5 of source remains past (15, 15); output is still 5x5.
        let photo = render_source_region(&image, &source).unwrap();
        assert_eq!((photo.width, photo.height), (5, 5));
        assert_eq!(decoded_pixel(&photo, 0, 0), pixel_at(15, 15));
    }

    #[test]
    fn test_cropped_photo_data_url() {
        let image = test_image(10, 10);
        let display = DisplaySize::new(10.0, 10.0);
        let region = CropRegion::from_pixels(0.0, 0.0, 4.0, 4.0);

        let photo = render_crop(&image, &region, display).unwrap();
        let url = photo.to_data_url();

        assert!(url.starts_with("data:image/png;base64,"));

        let round_trip = crate::decode::decode_data_url(&url).unwrap();
        assert_eq!(round_trip.width, 4);
        assert_eq!(round_trip.height, 4);
    }

    #[test]
    fn test_render_crop_output_is_standalone() {
        let image = test_image(40, 40);
        let display = DisplaySize::new(40.0, 40.0);
        let region = CropRegion::from_pixels(8.0, 8.0, 16.0, 16.0);

        let photo = render_crop(&image, &region, display).unwrap();
        drop(image);

        // Still decodable after the source is gone
        let decoded = decode_image(&photo.png).unwrap();
        assert_eq!((decoded.width, decoded.height), (16, 16));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
