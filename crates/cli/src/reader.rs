// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Size-gated file reading.
//!
//! Files over 10MB are rejected before any bytes are read. Files that are
//! not valid UTF-8 yield no text and are left out of the scan.

use std::path::Path;

use crate::error::{Error, Result};

/// Size at which reads are logged (1MB).
pub const LARGE_FILE_WARN: u64 = 1024 * 1024;

/// Maximum file size to read (10MB).
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Text read from a file.
#[derive(Debug)]
pub struct FileContent {
    /// Decoded content, or `None` for non-UTF-8 files.
    pub text: Option<String>,

    /// File size in bytes.
    pub size: u64,
}

/// Size-gated file reader.
#[derive(Debug, Clone, Copy)]
pub struct FileReader {
    max_size: u64,
}

impl Default for FileReader {
    fn default() -> Self {
        Self {
            max_size: MAX_FILE_SIZE,
        }
    }
}

impl FileReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reader with custom max size.
    pub fn with_max_size(max_size: u64) -> Self {
        Self { max_size }
    }

    pub fn max_size(&self) -> u64 {
        self.max_size
    }

    /// Read a file, checking size limits.
    ///
    /// Returns `Err(FileTooLarge)` for files exceeding max_size.
    pub fn read(&self, path: &Path) -> Result<FileContent> {
        let io_err = |source| Error::Io {
            path: path.to_path_buf(),
            source,
        };

        let size = std::fs::metadata(path).map_err(io_err)?.len();
        if size > self.max_size {
            return Err(Error::FileTooLarge {
                path: path.to_path_buf(),
                size,
                max_size: self.max_size,
            });
        }

        if size > LARGE_FILE_WARN {
            tracing::info!(
                path = %path.display(),
                size_mb = size as f64 / 1_000_000.0,
                "reading large file"
            );
        }

        let bytes = std::fs::read(path).map_err(io_err)?;
        let text = match String::from_utf8(bytes) {
            Ok(text) => Some(text),
            Err(_) => {
                tracing::debug!(path = %path.display(), "skipping non-UTF-8 file");
                None
            }
        };

        Ok(FileContent { text, size })
    }
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
