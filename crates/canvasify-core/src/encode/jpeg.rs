//! JPEG encoding for archive entries.
//!
//! Uses the `image` crate's baseline JPEG encoder. Quality defaults to 75,
//! the conventional default of most imaging toolkits.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::types::validate_rgb;
use super::{EncodeError, OutputFormat};

/// Default JPEG quality for normalized images.
pub const DEFAULT_JPEG_QUALITY: u8 = 75;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality, clamped to 1-100
///
/// # Errors
///
/// Returns `EncodeError` if the buffer does not match the dimensions or the
/// encoder fails.
pub fn encode_jpeg(
    pixels: &[u8],
    width: u32,
    height: u32,
    quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Jpeg,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
