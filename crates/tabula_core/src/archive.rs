use std::collections::HashSet;
use std::io::{Cursor, Write};

use tracing::debug;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::ExportError;

/// An in-memory zip archive being assembled entry by entry.
///
/// Nothing touches disk until the owner calls [`ArchiveWriter::finish`] and
/// persists the returned bytes; dropping the writer discards the archive.
pub struct ArchiveWriter {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    names: HashSet<String>,
    order: Vec<String>,
}

impl ArchiveWriter {
    pub fn new() -> Self {
        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options: SimpleFileOptions::default().compression_method(CompressionMethod::Deflated),
            names: HashSet::new(),
            order: Vec::new(),
        }
    }

    /// Append one entry. Entry names are unique within an archive.
    pub fn append(&mut self, name: &str, bytes: &[u8]) -> Result<(), ExportError> {
        if self.names.contains(name) {
            return Err(ExportError::Archive(format!("duplicate entry name: {name}")));
        }

        self.zip.start_file(name, self.options)?;
        self.zip
            .write_all(bytes)
            .map_err(|e| ExportError::Archive(format!("failed to write entry {name}: {e}")))?;

        debug!(entry = name, bytes = bytes.len(), "Appended archive entry");
        self.names.insert(name.to_string());
        self.order.push(name.to_string());
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Entry names in append order.
    pub fn entry_names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Write the central directory and hand back the finished archive.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        let cursor = self.zip.finish()?;
        Ok(cursor.into_inner())
    }
}

impl Default for ArchiveWriter {
    fn default() -> Self {
        Self::new()
    }
}
