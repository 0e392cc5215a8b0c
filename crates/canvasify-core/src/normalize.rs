//! Canvas normalization: map any decoded image onto a fixed square canvas.
//!
//! Two strategies are supported:
//!
//! - [`FillMode::Fill`] scales the source until it covers the square, then
//!   center-crops the excess. No padding, edges may be lost. The crop window
//!   is taken in source coordinates first, so no intermediate buffer is
//!   larger than the source or the canvas, whatever the aspect ratio.
//! - [`FillMode::Fit`] shrinks the source into 92% of the square and pastes it
//!   centered on an opaque white canvas. Nothing is lost, borders are added.
//!
//! Both strategies finish by flattening to 3-channel RGB.

use image::{DynamicImage, Rgba, RgbaImage};
use thiserror::Error;

use crate::decode::{resize, resize_to_fit, DecodeError, DecodedImage, FilterType};
use crate::transform::center_crop;

/// Default edge length of the square output canvas.
pub const DEFAULT_CANVAS_SIZE: u32 = 1000;

/// Share of the canvas edge the source may occupy in `Fit` mode.
pub const FIT_MARGIN_RATIO: f64 = 0.92;

/// Background color painted behind the source in `Fit` mode.
pub const CANVAS_BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Resampling filter used for every normalization resize.
const NORMALIZE_FILTER: FilterType = FilterType::Lanczos3;

/// Errors that can occur while normalizing an image.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// The requested canvas edge is zero.
    #[error("Canvas size must be non-zero")]
    InvalidCanvasSize,

    /// The source image has no pixels.
    #[error("Source image has zero dimensions ({width}x{height})")]
    EmptySource { width: u32, height: u32 },

    /// The source pixel buffer does not match its dimensions.
    #[error("Source pixel buffer does not match {width}x{height} RGBA")]
    InvalidPixelBuffer { width: u32, height: u32 },

    /// Resizing failed.
    #[error("Resize failed: {0}")]
    Resize(#[from] DecodeError),
}

/// Strategy for placing a source image on the square canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillMode {
    /// Cover the canvas and crop the overflow.
    #[default]
    Fill,
    /// Fit inside the canvas and pad with white.
    Fit,
}

impl FillMode {
    /// Parse the `fill_mode` form value.
    ///
    /// Only the exact string `"Fill"` selects [`FillMode::Fill`]; every other
    /// value, including different casing, selects [`FillMode::Fit`].
    pub fn from_form_value(value: &str) -> Self {
        if value == "Fill" {
            FillMode::Fill
        } else {
            FillMode::Fit
        }
    }

    /// Name used in logs and form values.
    pub fn as_str(self) -> &'static str {
        match self {
            FillMode::Fill => "Fill",
            FillMode::Fit => "Fit",
        }
    }
}

impl std::fmt::Display for FillMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized, opaque RGB image.
#[derive(Debug, Clone)]
pub struct NormalizedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl NormalizedImage {
    /// Create a NormalizedImage from an image::RgbImage.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Read the RGB value at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * 3;
        [self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2]]
    }
}

/// Normalize an image onto a `size x size` canvas.
///
/// # Arguments
///
/// * `image` - Decoded RGBA source (both dimensions > 0)
/// * `mode` - Placement strategy
/// * `size` - Canvas edge length in pixels
///
/// # Returns
///
/// An opaque RGB image of exactly `size x size` pixels.
///
/// # Errors
///
/// Returns `NormalizeError` for a zero canvas, an empty source, or a source
/// whose buffer is inconsistent with its dimensions.
pub fn normalize(
    image: &DecodedImage,
    mode: FillMode,
    size: u32,
) -> Result<NormalizedImage, NormalizeError> {
    if size == 0 {
        return Err(NormalizeError::InvalidCanvasSize);
    }
    if image.width == 0 || image.height == 0 {
        return Err(NormalizeError::EmptySource {
            width: image.width,
            height: image.height,
        });
    }
    if image.pixels.len() != image.pixel_count() as usize * DecodedImage::CHANNELS {
        return Err(NormalizeError::InvalidPixelBuffer {
            width: image.width,
            height: image.height,
        });
    }

    let canvas = match mode {
        FillMode::Fill => fill_canvas(image, size)?,
        FillMode::Fit => fit_canvas(image, size)?,
    };

    Ok(flatten(canvas))
}

/// Scaling by `max(size / w, size / h)` puts the short edge exactly on the
/// canvas, so the cover window in source pixels is the centered
/// `min(w, h)` square. Crop that, then resample straight to `size x size`.
fn fill_canvas(image: &DecodedImage, size: u32) -> Result<RgbaImage, NormalizeError> {
    let window = center_crop(image, image.width.min(image.height));
    let scaled = resize(&window, size, size, NORMALIZE_FILTER)?;
    scaled
        .to_rgba_image()
        .ok_or(NormalizeError::InvalidPixelBuffer {
            width: scaled.width,
            height: scaled.height,
        })
}

fn fit_canvas(image: &DecodedImage, size: u32) -> Result<RgbaImage, NormalizeError> {
    let max_edge = fit_box_edge(size);
    let shrunk = resize_to_fit(image, max_edge, NORMALIZE_FILTER)?;
    let shrunk_rgba = shrunk
        .to_rgba_image()
        .ok_or(NormalizeError::InvalidPixelBuffer {
            width: shrunk.width,
            height: shrunk.height,
        })?;

    let mut canvas = RgbaImage::from_pixel(size, size, CANVAS_BACKGROUND);
    let x = (size - shrunk.width) / 2;
    let y = (size - shrunk.height) / 2;
    // Alpha-blends, so transparent source pixels leave the background showing
    image::imageops::overlay(&mut canvas, &shrunk_rgba, x as i64, y as i64);

    Ok(canvas)
}

/// Edge of the box the source must fit in for `Fit` mode.
pub fn fit_box_edge(size: u32) -> u32 {
    ((size as f64 * FIT_MARGIN_RATIO) as u32).max(1)
}

/// Drop the alpha channel.
fn flatten(canvas: RgbaImage) -> NormalizedImage {
    NormalizedImage::from_rgb_image(DynamicImage::ImageRgba8(canvas).into_rgb8())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
