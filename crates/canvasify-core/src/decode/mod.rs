//! Image decoding pipeline for Canvasify.
//!
//! This module provides functionality for:
//! - Decoding uploaded raster images (format sniffed from content)
//! - Resizing to exact dimensions or to fit a box
//!
//! All operations are synchronous and allocate new buffers; inputs are
//! never modified in place.
//!
//! # Examples
//!
//! ```ignore
//! use canvasify_core::decode::{decode_image, resize_to_fit, FilterType};
//!
//! let bytes = std::fs::read("photo.png").unwrap();
//! let image = decode_image(&bytes).unwrap();
//! let small = resize_to_fit(&image, 920, FilterType::Lanczos3).unwrap();
//! println!("Decoded {}x{} image", small.width, small.height);
//! ```

mod raster;
mod resize;
mod types;

pub use raster::decode_image;
pub use image::imageops::FilterType;
pub use resize::{calculate_fit_dimensions, resize, resize_to_fit};
pub use types::{DecodeError, DecodedImage};
