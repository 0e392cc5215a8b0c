//! Raster decoding for uploaded images.
//!
//! The format is sniffed from the content rather than trusted from the
//! filename, so a `.jpg` that is really a PNG still decodes.

use std::io::Cursor;

use image::{ImageError, ImageReader};

use super::{DecodeError, DecodedImage};

/// Decode an image from bytes into the RGBA working representation.
///
/// # Arguments
///
/// * `bytes` - Raw file bytes in any enabled raster format
///
/// # Returns
///
/// A `DecodedImage` with RGBA pixel data.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for empty input,
/// `DecodeError::UnrecognizedFormat` if no decoder claims the bytes,
/// `DecodeError::CorruptedFile` for truncated or damaged data, and
/// `DecodeError::EmptyImage` if the decoded raster has a zero dimension.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::InvalidFormat);
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::IoError(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::UnrecognizedFormat);
    }

    let img = reader.decode().map_err(map_image_error)?;

    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(DecodeError::EmptyImage { width, height });
    }

    Ok(DecodedImage::from_rgba_image(rgba))
}

fn map_image_error(err: ImageError) -> DecodeError {
    match err {
        ImageError::Unsupported(e) => {
            tracing::debug!(error = %e, "decoder does not support this image");
            DecodeError::UnrecognizedFormat
        }
        ImageError::IoError(e) => DecodeError::IoError(e.to_string()),
        other => DecodeError::CorruptedFile(other.to_string()),
    }
}
