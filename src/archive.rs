//! In-memory ZIP assembly
//!
//! Entries are appended in call order and never rewritten. The position prefix
//! produced by [`entry_filename`](crate::utils::entry_filename) keeps names
//! unique, so no deduplication happens here.

use crate::config::{ArchiveCompression, ArchiveConfig};
use crate::error::Result;
use std::io::{Cursor, Write};
use tracing::debug;
use zip::CompressionMethod;
use zip::write::FileOptions;

/// Append-only ZIP writer backed by a `Vec<u8>`
pub struct ArchiveBuilder {
    writer: zip::ZipWriter<Cursor<Vec<u8>>>,
    options: FileOptions,
    entries: usize,
}

impl ArchiveBuilder {
    /// Start an empty archive
    pub fn new(config: &ArchiveConfig) -> Self {
        let method = match config.compression {
            ArchiveCompression::Stored => CompressionMethod::Stored,
            ArchiveCompression::Deflated => CompressionMethod::Deflated,
        };

        Self {
            writer: zip::ZipWriter::new(Cursor::new(Vec::new())),
            options: FileOptions::default().compression_method(method),
            entries: 0,
        }
    }

    /// Append one entry
    pub fn add(&mut self, filename: &str, bytes: &[u8]) -> Result<()> {
        self.writer.start_file(filename, self.options)?;
        self.writer.write_all(bytes)?;
        self.entries += 1;

        debug!(filename, bytes = bytes.len(), "added archive entry");
        Ok(())
    }

    /// Number of entries written so far
    pub fn len(&self) -> usize {
        self.entries
    }

    /// Whether no entry has been written
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Write the central directory and return the complete archive
    pub fn finish(mut self) -> Result<Vec<u8>> {
        let cursor = self.writer.finish()?;
        Ok(cursor.into_inner())
    }
}
