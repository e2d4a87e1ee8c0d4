//! Library file persistence
//!
//! Saves and loads the book list as a pretty-printed JSON array.
//! Uses atomic writes (write to temp file, then rename) so the library
//! file is never left half-written.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::{StorageError, StorageResult};
use crate::models::Book;

/// Default library file name, relative to the working directory
pub const DEFAULT_LIBRARY_FILE: &str = "library.json";

/// A library file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryFile {
    path: PathBuf,
}

impl LibraryFile {
    /// Create a handle for the library file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the library file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the library file
    ///
    /// Returns `StorageError::NotFound` if the file does not exist and
    /// `StorageError::InvalidFormat` if it cannot be parsed as a list of books.
    pub fn read(&self) -> StorageResult<Vec<Book>> {
        let bytes =
            fs::read(&self.path).map_err(|e| StorageError::from_read(e, self.path.clone()))?;

        let books: Vec<Book> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        debug!("Read {} book(s) from {:?}", books.len(), self.path);
        Ok(books)
    }

    /// Serialize and write the books to the library file
    pub fn write(&self, books: &[Book]) -> StorageResult<()> {
        let mut bytes = serde_json::to_vec_pretty(books)?;
        bytes.push(b'\n');

        atomic_write(&self.path, &bytes)?;

        debug!("Wrote {} book(s) to {:?}", books.len(), self.path);
        Ok(())
    }
}

impl Default for LibraryFile {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_FILE)
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
///
/// The temp file is removed if any step fails.
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let temp_path = temp_path_for(path);

    if let Err(e) = write_and_sync(&temp_path, data) {
        let _ = fs::remove_file(&temp_path);
        return Err(StorageError::from_io(e, path.to_path_buf()));
    }

    fs::rename(&temp_path, path).map_err(|source| {
        let _ = fs::remove_file(&temp_path);
        StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source,
        }
    })
}

fn write_and_sync(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data)?;
    file.sync_all()
}

/// Sibling temp path, e.g. `library.json` -> `library.json.tmp`
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
