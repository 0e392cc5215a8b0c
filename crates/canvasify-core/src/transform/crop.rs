//! Image cropping operations.
//!
//! Crops are expressed in pixel coordinates. Regions that run past the image
//! edge are clamped, so the output may be smaller than requested but is never
//! smaller than 1x1 for a non-empty source.
//!
//! # Example
//!
//! ```ignore
//! // Take the centered 1000x1000 window of a 2000x1000 image
//! let square = center_crop(&image, 1000);
//! ```

use crate::decode::DecodedImage;

const CHANNELS: usize = DecodedImage::CHANNELS;

/// Copy a rectangular region out of an image.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `left` - Left edge of the region in pixels
/// * `top` - Top edge of the region in pixels
/// * `width` - Region width in pixels
/// * `height` - Region height in pixels
///
/// # Behavior
///
/// - Origins past the image edge are clamped to the last row/column
/// - Extents past the image edge are clamped to the image bounds
/// - Minimum output dimension is 1x1 pixels
/// - A region covering the whole image returns a copy of the original
/// - An empty source is returned as-is
pub fn crop_region(
    image: &DecodedImage,
    left: u32,
    top: u32,
    width: u32,
    height: u32,
) -> DecodedImage {
    // Fast path: full crop (or nothing to crop) returns a clone
    if image.is_empty() || (left == 0 && top == 0 && width >= image.width && height >= image.height)
    {
        return image.clone();
    }

    let px_left = left.min(image.width.saturating_sub(1));
    let px_top = top.min(image.height.saturating_sub(1));
    let px_right = px_left.saturating_add(width).min(image.width);
    let px_bottom = px_top.saturating_add(height).min(image.height);

    let out_width = px_right.saturating_sub(px_left).max(1);
    let out_height = px_bottom.saturating_sub(px_top).max(1);

    let src_stride = image.width as usize * CHANNELS;
    let row_len = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_len * out_height as usize);

    // Copy pixel data row by row for efficiency
    for y in 0..out_height as usize {
        let src_row_start = (px_top as usize + y) * src_stride + px_left as usize * CHANNELS;
        output.extend_from_slice(&image.pixels[src_row_start..src_row_start + row_len]);
    }

    DecodedImage {
        width: out_width,
        height: out_height,
        pixels: output,
    }
}

/// Crop the centered `size x size` window of an image.
///
/// Offsets are `floor((width - size) / 2)` and `floor((height - size) / 2)`,
/// so any odd leftover pixel is dropped from the right/bottom edge. Sources
/// smaller than `size` on an axis are clamped on that axis.
pub fn center_crop(image: &DecodedImage, size: u32) -> DecodedImage {
    let left = image.width.saturating_sub(size) / 2;
    let top = image.height.saturating_sub(size) / 2;
    crop_region(image, left, top, size, size)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
