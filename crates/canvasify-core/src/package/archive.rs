//! In-memory ZIP archive writing.

use std::io::{Cursor, Write};

use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Errors that end a whole batch.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The ZIP writer rejected an entry or could not finalize.
    #[error("Archive write failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Writing entry bytes failed.
    #[error("Archive I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The caller abandoned the batch; nothing is returned.
    #[error("Batch abandoned after {completed} items")]
    Cancelled { completed: usize },
}

/// Accumulates entries into a ZIP held in memory.
///
/// Entries are stored uncompressed: JPEG and PNG payloads are already
/// compressed.
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
        }
    }

    /// Append one entry.
    pub fn add_entry(&mut self, name: &str, bytes: &[u8]) -> Result<(), PackageError> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(bytes)?;
        Ok(())
    }

    /// Write the central directory and return the archive bytes.
    pub fn finish(self) -> Result<Vec<u8>, PackageError> {
        Ok(self.zip.finish()?.into_inner())
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
