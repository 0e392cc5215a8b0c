//! Image encoding pipeline for Canvasify.
//!
//! This module provides functionality for:
//! - Encoding normalized images to JPEG with configurable quality
//! - Encoding normalized images to lossless PNG
//! - Choosing the output container from an upload's file extension
//!
//! # Examples
//!
//! ```ignore
//! use canvasify_core::encode::{encode, OutputFormat};
//!
//! let bytes = encode(&normalized, OutputFormat::from_extension("jpg"), 75).unwrap();
//! println!("Encoded {} bytes", bytes.len());
//! ```

mod jpeg;
mod png;
mod types;

pub use jpeg::{encode_jpeg, DEFAULT_JPEG_QUALITY};
pub use png::encode_png;
pub use types::{EncodeError, OutputFormat};

use crate::normalize::NormalizedImage;

/// Encode a normalized image in the given container format.
///
/// `jpeg_quality` is ignored for PNG.
pub fn encode(
    image: &NormalizedImage,
    format: OutputFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, jpeg_quality),
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
    }
}
