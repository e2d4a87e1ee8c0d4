//! Shelf Core Library
//!
//! This crate provides the core functionality for shelf, a personal book
//! library manager: an ordered store of book records with search,
//! read/unread statistics, and JSON persistence.
//!
//! # Quick Start
//!
//! ```text
//! let (mut library, _outcome) = Library::open("library.json");
//!
//! // Add a book
//! library.add_book("Dune", "Frank Herbert", 1965, "Sci-Fi", true);
//!
//! // Query books
//! let found = library.search("author", "herbert");
//!
//! library.save("library.json")?;
//! ```
//!
//! # Modules
//!
//! - `store`: The library and its operations (main entry point)
//! - `models`: Book records, search fields, and statistics
//! - `storage`: JSON file persistence and storage errors
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::{Book, SearchField, Statistics, UnknownField, MAX_YEAR, MIN_YEAR};
pub use storage::{LibraryFile, StorageError, StorageResult, DEFAULT_LIBRARY_FILE};
pub use store::{Library, LoadOutcome, RemoveOutcome, SearchOutcome};
