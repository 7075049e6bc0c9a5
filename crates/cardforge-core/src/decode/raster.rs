//! Image decoding with EXIF orientation handling.
//!
//! Accepts the formats the upload control accepts: PNG, JPEG, GIF and WebP
//! (animated GIFs contribute their first frame). The decoded raster is
//! oriented the way the browser shows the photo, so crop coordinates taken
//! from the screen line up with the pixels cut here.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;

use super::data_url;
use super::{DecodeError, Orientation, SourceImage};

/// Decode an image from raw file bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw image file bytes in any accepted format
///
/// # Returns
///
/// A `SourceImage` with RGBA pixel data and correct orientation applied.
///
/// # Errors
///
/// Returns `DecodeError::UnsupportedFormat` if the bytes are not in a
/// recognized format, and `DecodeError::Corrupted` if decoding fails.
pub fn decode_image(bytes: &[u8]) -> Result<SourceImage, DecodeError> {
    // Extract EXIF orientation before decoding
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    // Apply orientation transformation, then convert to RGBA8
    let oriented_img = apply_orientation(img, orientation);
    Ok(SourceImage::from_rgba_image(oriented_img.into_rgba8()))
}

/// Decode an image from a base64 data URL.
///
/// This is the shape `FileReader.readAsDataURL` hands over, so the UI can
/// pass its stored photo references straight through.
///
/// # Errors
///
/// Returns `DecodeError::InvalidReference` if the string is not a usable
/// data URL, plus any error `decode_image` can produce.
pub fn decode_data_url(url: &str) -> Result<SourceImage, DecodeError> {
    let (_, bytes) =
        data_url::parse(url).map_err(|e| DecodeError::InvalidReference(e.to_string()))?;
    decode_image(&bytes)
}

/// Read an image's natural dimensions without decoding the pixel data.
///
/// EXIF orientation is taken into account, so the result matches what
/// `decode_image` would produce.
///
/// # Errors
///
/// Same conditions as `decode_image`.
pub fn probe_dimensions(bytes: &[u8]) -> Result<(u32, u32), DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnsupportedFormat);
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| DecodeError::Corrupted(e.to_string()))?;

    if orientation.swaps_dimensions() {
        Ok((height, width))
    } else {
        Ok((width, height))
    }
}

/// Confirm a stored image reference is decodable and report its dimensions.
///
/// The card composer renders photo and background references directly into
/// the DOM; this check is what guarantees them renderable before handoff.
///
/// # Arguments
///
/// * `url` - A data URL as stored on the trainer (photo or background)
///
/// # Returns
///
/// The natural `(width, height)` of the referenced image.
pub fn validate_image_reference(url: &str) -> Result<(u32, u32), DecodeError> {
    let (_, bytes) =
        data_url::parse(url).map_err(|e| DecodeError::InvalidReference(e.to_string()))?;
    probe_dimensions(&bytes)
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimal valid JPEG bytes (1x1 pixel)
    const MINIMAL_JPEG: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0x08, 0x06, 0x06, 0x07, 0x06,
        0x05, 0x08, 0x07, 0x07, 0x07, 0x09, 0x09, 0x08, 0x0A, 0x0C, 0x14, 0x0D, 0x0C, 0x0B, 0x0B,
        0x0C, 0x19, 0x12, 0x13, 0x0F, 0x14, 0x1D, 0x1A, 0x1F, 0x1E, 0x1D, 0x1A, 0x1C, 0x1C, 0x20,
        0x24, 0x2E, 0x27, 0x20, 0x22, 0x2C, 0x23, 0x1C, 0x1C, 0x28, 0x37, 0x29, 0x2C, 0x30, 0x31,
        0x34, 0x34, 0x34, 0x1F, 0x27, 0x39, 0x3D, 0x38, 0x32, 0x3C, 0x2E, 0x33, 0x34, 0x32, 0xFF,
        0xC0, 0x00, 0x0B, 0x08, 0x00, 0x01, 0x00, 0x01, 0x01, 0x01, 0x11, 0x00, 0xFF, 0xC4, 0x00,
        0x1F, 0x00, 0x00, 0x01, 0x05, 0x01, 0x01, 0x01, 0x01, 0x01, 0x01, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,
        0xFF, 0xC4, 0x00, 0xB5, 0x10, 0x00, 0x02, 0x01, 0x03, 0x03, 0x02, 0x04, 0x03, 0x05, 0x05,
        0x04, 0x04, 0x00, 0x00, 0x01, 0x7D, 0x01, 0x02, 0x03, 0x00, 0x04, 0x11, 0x05, 0x12, 0x21,
        0x31, 0x41, 0x06, 0x13, 0x51, 0x61, 0x07, 0x22, 0x71, 0x14, 0x32, 0x81, 0x91, 0xA1, 0x08,
        0x23, 0x42, 0xB1, 0xC1, 0x15, 0x52, 0xD1, 0xF0, 0x24, 0x33, 0x62, 0x72, 0x82, 0x09, 0x0A,
        0x16, 0x17, 0x18, 0x19, 0x1A, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x34, 0x35, 0x36, 0x37,
        0x38, 0x39, 0x3A, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x53, 0x54, 0x55, 0x56,
        0x57, 0x58, 0x59, 0x5A, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x73, 0x74, 0x75,
        0x76, 0x77, 0x78, 0x79, 0x7A, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x8A, 0x92, 0x93,
        0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x9A, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9,
        0xAA, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0xBA, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6,
        0xC7, 0xC8, 0xC9, 0xCA, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xDA, 0xE1, 0xE2,
        0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xEA, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7,
        0xF8, 0xF9, 0xFA, 0xFF, 0xDA, 0x00, 0x08, 0x01, 0x01, 0x00, 0x00, 0x3F, 0x00, 0xFB, 0xD5,
        0xDB, 0x20, 0xA8, 0xF1, 0x7E, 0xFF, 0xD9,
    ];

    // Minimal valid PNG: 1x1 opaque red pixel
    const MINIMAL_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
        0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
        0xCF, 0xC0, 0xF0, 0x1F, 0x00, 0x05, 0x00, 0x01, 0xFF, 0x89, 0x99, 0x3D, 0x1D, 0x00, 0x00,
        0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    // Minimal valid PNG: 2x1, red pixel then green pixel
    const WIDE_PNG: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x02, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0xF4,
        0x22, 0x7F, 0x8A, 0x00, 0x00, 0x00, 0x0E, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0xF8,
        0xCF, 0xC0, 0xF0, 0x1F, 0x04, 0x01, 0x10, 0xF8, 0x03, 0xFD, 0x4E, 0x95, 0xC1, 0x6F, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    // Minimal valid GIF: 1x1 red pixel
    const MINIMAL_GIF: &[u8] = &[
        0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0xFF, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02,
        0x02, 0x44, 0x01, 0x00, 0x3B,
    ];

    // APP1 EXIF segment carrying Orientation = 6 (rotate 90 CW)
    const EXIF_APP1_ROT90: &[u8] = &[
        0xFF, 0xE1, 0x00, 0x22, 0x45, 0x78, 0x69, 0x66, 0x00, 0x00, 0x49, 0x49, 0x2A, 0x00, 0x08,
        0x00, 0x00, 0x00, 0x01, 0x00, 0x12, 0x01, 0x03, 0x00, 0x01, 0x00, 0x00, 0x00, 0x06, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];

    /// MINIMAL_JPEG with an EXIF orientation segment spliced in after SOI.
    fn jpeg_with_rot90_exif() -> Vec<u8> {
        let mut bytes = Vec::with_capacity(MINIMAL_JPEG.len() + EXIF_APP1_ROT90.len());
        bytes.extend_from_slice(&MINIMAL_JPEG[..2]);
        bytes.extend_from_slice(EXIF_APP1_ROT90);
        bytes.extend_from_slice(&MINIMAL_JPEG[2..]);
        bytes
    }

    #[test]
    fn test_decode_valid_png() {
        let img = decode_image(MINIMAL_PNG).unwrap();

        assert_eq!(img.width, 1);
        assert_eq!(img.height, 1);
        assert_eq!(img.pixels, vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_preserves_pixel_order() {
        let img = decode_image(WIDE_PNG).unwrap();

        assert_eq!(img.width, 2);
        assert_eq!(img.height, 1);
        assert_eq!(&img.pixels[0..4], &[255, 0, 0, 255]); // Red
        assert_eq!(&img.pixels[4..8], &[0, 255, 0, 255]); // Green
    }

    #[test]
    fn test_decode_valid_jpeg() {
        let img = decode_image(MINIMAL_JPEG).unwrap();

        assert_eq!(img.width, 1);
        assert_eq!(img.height, 1);
        assert_eq!(img.pixels.len(), 4); // 1x1 RGBA = 4 bytes
        assert_eq!(img.pixels[3], 255); // JPEG has no alpha, decodes opaque
    }

    #[test]
    fn test_decode_valid_gif() {
        let img = decode_image(MINIMAL_GIF).unwrap();

        assert_eq!(img.width, 1);
        assert_eq!(img.height, 1);
        assert_eq!(img.pixels, vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_unrecognized_bytes() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        let result = decode_image(&[]);
        assert!(matches!(result, Err(DecodeError::UnsupportedFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        // PNG signature intact, stream cut short
        let result = decode_image(&MINIMAL_PNG[0..20]);
        assert!(matches!(result, Err(DecodeError::Corrupted(_))));
    }

    #[test]
    fn test_decode_data_url_round_trip() {
        let url = data_url::encode("image/png", MINIMAL_PNG);
        let img = decode_data_url(&url).unwrap();

        assert_eq!(img.width, 1);
        assert_eq!(img.pixels, vec![255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_data_url_rejects_plain_url() {
        let result = decode_data_url("https://example.com/photo.png");
        assert!(matches!(result, Err(DecodeError::InvalidReference(_))));
    }

    #[test]
    fn test_probe_dimensions() {
        assert_eq!(probe_dimensions(WIDE_PNG).unwrap(), (2, 1));
        assert_eq!(probe_dimensions(MINIMAL_GIF).unwrap(), (1, 1));
    }

    #[test]
    fn test_probe_dimensions_invalid() {
        assert!(probe_dimensions(&[0xDE, 0xAD]).is_err());
    }

    #[test]
    fn test_validate_image_reference() {
        let url = data_url::encode("image/png", WIDE_PNG);
        assert_eq!(validate_image_reference(&url).unwrap(), (2, 1));
    }

    #[test]
    fn test_validate_image_reference_bad_payload() {
        let url = data_url::encode("image/png", &[0x00, 0x01]);
        assert!(validate_image_reference(&url).is_err());

        assert!(matches!(
            validate_image_reference("not a url"),
            Err(DecodeError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        assert_eq!(extract_orientation(MINIMAL_JPEG), Orientation::Normal);
        assert_eq!(extract_orientation(MINIMAL_PNG), Orientation::Normal);
    }

    #[test]
    fn test_orientation_extraction_exif_tag() {
        let bytes = jpeg_with_rot90_exif();
        assert_eq!(extract_orientation(&bytes), Orientation::Rotate90CW);
    }

    #[test]
    fn test_decode_with_exif_still_decodes() {
        // 1x1 stays 1x1 under rotation, but the path must not error
        let img = decode_image(&jpeg_with_rot90_exif()).unwrap();
        assert_eq!((img.width, img.height), (1, 1));
    }

    #[test]
    fn test_orientation_extraction_invalid_data() {
        assert_eq!(extract_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_normal() {
        let pixels = vec![
            255, 0, 0, 255, // Red
            0, 255, 0, 255, // Green
            0, 0, 255, 255, // Blue
            255, 255, 0, 255, // Yellow
        ];
        let rgba_img = image::RgbaImage::from_raw(2, 2, pixels).unwrap();
        let img = DynamicImage::ImageRgba8(rgba_img);

        let result = apply_orientation(img, Orientation::Normal).into_rgba8();

        assert_eq!(result.dimensions(), (2, 2));
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn test_apply_orientation_rotate90_swaps_dimensions() {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        let rgba_img = image::RgbaImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgba8(rgba_img);

        let result = apply_orientation(img, Orientation::Rotate90CW).into_rgba8();

        assert_eq!(result.dimensions(), (1, 2));
    }

    #[test]
    fn test_apply_orientation_rotate180() {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        let rgba_img = image::RgbaImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgba8(rgba_img);

        let result = apply_orientation(img, Orientation::Rotate180).into_rgba8();

        assert_eq!(result.dimensions(), (2, 1));
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]); // Green
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]); // Red
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let pixels = vec![
            255, 0, 0, 255, // Red (left)
            0, 255, 0, 255, // Green (right)
        ];
        let rgba_img = image::RgbaImage::from_raw(2, 1, pixels).unwrap();
        let img = DynamicImage::ImageRgba8(rgba_img);

        let result = apply_orientation(img, Orientation::FlipHorizontal).into_rgba8();

        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0, 255]); // Green
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0, 255]); // Red
    }
}
