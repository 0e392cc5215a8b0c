//! Geometric transforms applied during canvas normalization.
//!
//! This module provides:
//! - Pixel-coordinate region cropping
//! - Centered square cropping used by `Fill` mode

mod crop;

pub use crop::{center_crop, crop_region};
