//! Storage layer
//!
//! Handles persistence of the library as a JSON document on disk.
//!
//! The file holds a single array with one object per book, in library
//! order. Writes are atomic; reads either yield every book or an error.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::{LibraryFile, DEFAULT_LIBRARY_FILE};
