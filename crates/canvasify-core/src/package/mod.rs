//! Batch packaging: normalize every upload and zip the results.
//!
//! Processing is best-effort. An upload that cannot be decoded, normalized
//! or encoded is recorded as [`ItemOutcome::Skipped`] and the batch carries
//! on. Only a failure of the archive itself, or the caller abandoning the
//! batch, ends it early.
//!
//! # Example
//!
//! ```ignore
//! use canvasify_core::package::{process_batch, PackageOptions, UploadItem};
//! use canvasify_core::FillMode;
//!
//! let items = vec![UploadItem::new("cat.png", std::fs::read("cat.png")?)];
//! let report = process_batch(items, FillMode::Fit, &PackageOptions::default())?;
//! std::fs::write("formatted_images.zip", &report.archive)?;
//! ```

mod archive;
mod naming;

pub use archive::{ArchiveWriter, PackageError};
pub use naming::{split_filename, EntryNamer, DEFAULT_EXTENSION, ENTRY_SUFFIX};

use thiserror::Error;

use crate::decode::{decode_image, DecodeError};
use crate::encode::{encode, EncodeError, OutputFormat, DEFAULT_JPEG_QUALITY};
use crate::normalize::{normalize, FillMode, NormalizeError, DEFAULT_CANVAS_SIZE};

/// One uploaded file.
#[derive(Debug, Clone)]
pub struct UploadItem {
    /// Client-supplied filename; empty means "no file selected".
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl UploadItem {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }
}

/// Tunables for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackageOptions {
    /// Edge length of the square output canvas.
    pub canvas_size: u32,
    /// Quality for JPEG entries (1-100).
    pub jpeg_quality: u8,
}

impl Default for PackageOptions {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Why an upload produced no archive entry.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error("empty filename")]
    EmptyFilename,

    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("normalize failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("encode failed: {0}")]
    Encode(#[from] EncodeError),
}

/// What happened to one upload, by submission index.
#[derive(Debug)]
pub enum ItemOutcome {
    Packaged {
        index: usize,
        entry_name: String,
        format: OutputFormat,
    },
    Skipped {
        index: usize,
        filename: String,
        reason: SkipReason,
    },
}

impl ItemOutcome {
    pub fn is_packaged(&self) -> bool {
        matches!(self, ItemOutcome::Packaged { .. })
    }
}

/// Result of a batch: the archive plus a per-item account.
#[derive(Debug)]
pub struct BatchReport {
    /// ZIP archive bytes (valid even when empty).
    pub archive: Vec<u8>,
    /// One outcome per submitted item, in submission order.
    pub outcomes: Vec<ItemOutcome>,
}

impl BatchReport {
    pub fn packaged_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_packaged()).count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.packaged_count()
    }

    /// Archive entry names in the order they were written.
    pub fn entry_names(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                ItemOutcome::Packaged { entry_name, .. } => Some(entry_name.as_str()),
                ItemOutcome::Skipped { .. } => None,
            })
            .collect()
    }
}

/// An encoded image waiting for its archive name.
struct EncodedUpload {
    stem: String,
    ext: String,
    format: OutputFormat,
    bytes: Vec<u8>,
}

/// Normalize every upload and package the successes into one ZIP.
///
/// Items are processed in order. Skipped items leave no trace in the archive.
///
/// # Errors
///
/// Returns `PackageError` only if the archive cannot be written.
pub fn process_batch(
    items: Vec<UploadItem>,
    mode: FillMode,
    options: &PackageOptions,
) -> Result<BatchReport, PackageError> {
    process_batch_until(items, mode, options, || false)
}

/// [`process_batch`] that polls `is_cancelled` before each item and abandons
/// the batch as soon as it returns `true`.
///
/// # Errors
///
/// Returns `PackageError::Cancelled` when abandoned, otherwise fails only if
/// the archive cannot be written.
pub fn process_batch_until(
    items: Vec<UploadItem>,
    mode: FillMode,
    options: &PackageOptions,
    is_cancelled: impl Fn() -> bool,
) -> Result<BatchReport, PackageError> {
    let total = items.len();
    let mut writer = ArchiveWriter::new();
    let mut namer = EntryNamer::new();
    let mut outcomes = Vec::with_capacity(total);

    for (index, item) in items.into_iter().enumerate() {
        if is_cancelled() {
            tracing::info!(completed = index, total, "Batch abandoned");
            return Err(PackageError::Cancelled { completed: index });
        }

        match encode_upload(&item, mode, options) {
            Ok(encoded) => {
                let entry_name = namer.claim(&encoded.stem, &encoded.ext);
                writer.add_entry(&entry_name, &encoded.bytes)?;
                tracing::debug!(
                    index,
                    filename = %item.filename,
                    entry = %entry_name,
                    format = %encoded.format,
                    bytes = encoded.bytes.len(),
                    "Packaged upload"
                );
                outcomes.push(ItemOutcome::Packaged {
                    index,
                    entry_name,
                    format: encoded.format,
                });
            }
            Err(reason) => {
                tracing::warn!(index, filename = %item.filename, %reason, "Skipping upload");
                outcomes.push(ItemOutcome::Skipped {
                    index,
                    filename: item.filename,
                    reason,
                });
            }
        }
    }

    let report = BatchReport {
        archive: writer.finish()?,
        outcomes,
    };

    tracing::info!(
        %mode,
        canvas_size = options.canvas_size,
        packaged = report.packaged_count(),
        skipped = report.skipped_count(),
        archive_bytes = report.archive.len(),
        "Batch packaged"
    );

    Ok(report)
}

fn encode_upload(
    item: &UploadItem,
    mode: FillMode,
    options: &PackageOptions,
) -> Result<EncodedUpload, SkipReason> {
    if item.filename.is_empty() {
        return Err(SkipReason::EmptyFilename);
    }

    let decoded = decode_image(&item.bytes)?;
    let normalized = normalize(&decoded, mode, options.canvas_size)?;

    let (stem, ext) = split_filename(&item.filename);
    let format = OutputFormat::from_extension(&ext);
    let bytes = encode(&normalized, format, options.jpeg_quality)?;

    Ok(EncodedUpload {
        stem: stem.to_owned(),
        ext,
        format,
        bytes,
    })
}
