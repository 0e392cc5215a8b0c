//! Image resizing functions for canvas normalization.
//!
//! Provides resize operations using the `image` crate's algorithms.
//! All functions return new `DecodedImage` instances without modifying the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// # Arguments
///
/// * `image` - The source image to resize
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - Interpolation filter to use
///
/// # Returns
///
/// A new `DecodedImage` with the specified dimensions.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if a target dimension is zero, or
/// `DecodeError::CorruptedFile` if the source buffer does not match its
/// dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba_image = image
        .to_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbaImage".to_string()))?;

    let resized = image::imageops::resize(&rgba_image, width, height, filter);

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Shrink an image to fit within a `max_edge x max_edge` box while preserving
/// aspect ratio.
///
/// The longest edge becomes `max_edge`. Images that already fit are returned
/// unchanged; this never enlarges.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if `max_edge` is zero.
pub fn resize_to_fit(
    image: &DecodedImage,
    max_edge: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if max_edge == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let (src_width, src_height) = (image.width, image.height);

    // If already fits, just clone
    if src_width <= max_edge && src_height <= max_edge {
        return Ok(image.clone());
    }

    let (new_width, new_height) = calculate_fit_dimensions(src_width, src_height, max_edge);

    resize(image, new_width, new_height, filter)
}

/// Calculate dimensions to fit within max_edge while preserving aspect ratio.
pub fn calculate_fit_dimensions(width: u32, height: u32, max_edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }

    let ratio = width as f64 / height as f64;

    if width >= height {
        // Landscape or square: constrain by width
        let new_width = max_edge;
        let new_height = (max_edge as f64 / ratio).round() as u32;
        (new_width, new_height.max(1))
    } else {
        // Portrait: constrain by height
        let new_height = max_edge;
        let new_width = (max_edge as f64 * ratio).round() as u32;
        (new_width.max(1), new_height)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
