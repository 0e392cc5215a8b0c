//! Canvasify Core - square-canvas image normalization
//!
//! This crate provides the image side of Canvasify: decoding uploads,
//! normalizing them onto a fixed square canvas (`Fill` or `Fit`), encoding
//! the result, and packaging a whole batch into a ZIP archive.
//!
//! Everything here is synchronous and free of I/O beyond in-memory buffers.

pub mod decode;
pub mod encode;
pub mod normalize;
pub mod package;
pub mod transform;

pub use decode::{decode_image, DecodeError, DecodedImage, FilterType};
pub use encode::{encode, EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY};
pub use normalize::{normalize, FillMode, NormalizeError, NormalizedImage, DEFAULT_CANVAS_SIZE};
pub use package::{
    process_batch, process_batch_until, BatchReport, ItemOutcome, PackageError, PackageOptions,
    SkipReason, UploadItem,
};
