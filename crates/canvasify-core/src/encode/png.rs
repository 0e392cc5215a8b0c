//! PNG encoding for archive entries.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::types::validate_rgb;
use super::{EncodeError, OutputFormat};

/// Encode RGB pixel data to PNG bytes.
///
/// The output is always 8-bit RGB with no alpha channel.
///
/// # Errors
///
/// Returns `EncodeError` if the buffer does not match the dimensions or the
/// encoder fails.
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(pixels, width, height)?;

    let mut buffer = Cursor::new(Vec::new());

    PngEncoder::new(&mut buffer)
        .write_image(pixels, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: OutputFormat::Png,
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}
