//! The library store
//!
//! `Library` holds the books in insertion order and provides the
//! operations the front end calls: add, remove, search, list,
//! statistics, and save/load.
//!
//! Operations never print anything. Each one returns a value describing
//! what happened, and the caller decides how to present it.
//!
//! ## Usage
//!
//! ```ignore
//! let (mut library, outcome) = Library::open("library.json");
//!
//! library.add_book("Dune", "Frank Herbert", 1965, "Sci-Fi", true);
//! let stats = library.statistics();
//!
//! library.save("library.json")?;
//! ```

use std::path::Path;

use tracing::{info, warn};

use crate::models::{Book, SearchField, Statistics};
use crate::storage::{LibraryFile, StorageError, StorageResult};

/// Result of removing a book by title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// The first book with a matching title was removed
    Removed(Book),
    /// No book has that title; the library is unchanged
    NotFound,
}

impl RemoveOutcome {
    pub fn is_removed(&self) -> bool {
        matches!(self, RemoveOutcome::Removed(_))
    }
}

/// Result of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Matching books, in library order (possibly none)
    Matches(Vec<Book>),
    /// A year search was given a value that is not an integer
    InvalidFormat { value: String },
}

impl SearchOutcome {
    /// The matched books; empty for an invalid year
    pub fn matches(&self) -> &[Book] {
        match self {
            SearchOutcome::Matches(books) => books,
            SearchOutcome::InvalidFormat { .. } => &[],
        }
    }

    pub fn is_invalid_format(&self) -> bool {
        matches!(self, SearchOutcome::InvalidFormat { .. })
    }
}

/// Result of loading a library from disk
///
/// On anything other than `Loaded`, the library is left empty.
#[derive(Debug)]
pub enum LoadOutcome {
    /// The file was read; `count` books are now in the library
    Loaded { count: usize },
    /// No file exists at the source (a fresh start)
    NotFound,
    /// The file exists but does not parse as a list of books
    Corrupt { error: StorageError },
    /// The file exists but could not be read
    Unreadable { error: StorageError },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded { .. })
    }

    /// Whether the source holds data that failed to load
    ///
    /// Saving over such a source would discard whatever it contains.
    pub fn is_damaged(&self) -> bool {
        matches!(
            self,
            LoadOutcome::Corrupt { .. } | LoadOutcome::Unreadable { .. }
        )
    }
}

/// An ordered collection of books
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    books: Vec<Book>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a library and load it from `path`
    pub fn open(path: impl AsRef<Path>) -> (Self, LoadOutcome) {
        let mut library = Self::new();
        let outcome = library.load(path);
        (library, outcome)
    }

    // ==================== Mutation ====================

    /// Append a book to the end of the library
    ///
    /// No validation is done here; callers check required fields first.
    pub fn add(&mut self, book: Book) -> &Book {
        self.books.push(book);
        &self.books[self.books.len() - 1]
    }

    /// Build a book from its fields and append it
    pub fn add_book(
        &mut self,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read_status: bool,
    ) -> &Book {
        self.add(Book::new(title, author, year, genre, read_status))
    }

    /// Remove the first book whose title matches, ignoring case
    pub fn remove(&mut self, title: &str) -> RemoveOutcome {
        match self.books.iter().position(|book| book.has_title(title)) {
            Some(pos) => RemoveOutcome::Removed(self.books.remove(pos)),
            None => RemoveOutcome::NotFound,
        }
    }

    // ==================== Queries ====================

    /// Search by a field token (`title`, `author`, `genre`, or `year`)
    ///
    /// Unrecognized field tokens match nothing.
    pub fn search(&self, field: &str, value: &str) -> SearchOutcome {
        match field.parse::<SearchField>() {
            Ok(field) => self.search_by(field, value),
            Err(_) => SearchOutcome::Matches(Vec::new()),
        }
    }

    /// Search by a known field
    ///
    /// Text fields use a case-insensitive substring match, so an empty value
    /// matches every book. Year requires an integer and matches exactly.
    pub fn search_by(&self, field: SearchField, value: &str) -> SearchOutcome {
        if field == SearchField::Year {
            // Years outside i32 match nothing
            return match value.trim().parse::<i64>() {
                Ok(year) => {
                    SearchOutcome::Matches(self.filter(|book| i64::from(book.year) == year))
                }
                Err(_) => SearchOutcome::InvalidFormat {
                    value: value.to_string(),
                },
            };
        }

        let needle = value.to_lowercase();
        SearchOutcome::Matches(self.filter(|book| {
            field
                .text_of(book)
                .is_some_and(|text| text.to_lowercase().contains(&needle))
        }))
    }

    fn filter(&self, predicate: impl Fn(&Book) -> bool) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| predicate(book))
            .cloned()
            .collect()
    }

    /// All books in library order, or `None` if the library is empty
    pub fn list(&self) -> Option<&[Book]> {
        if self.books.is_empty() {
            None
        } else {
            Some(&self.books)
        }
    }

    /// Read/unread statistics, or `None` if the library is empty
    pub fn statistics(&self) -> Option<Statistics> {
        let read_count = self.books.iter().filter(|book| book.read_status).count();
        Statistics::from_counts(self.books.len(), read_count)
    }

    /// All books in library order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    // ==================== Persistence ====================

    /// Write the whole library to `path`
    ///
    /// The write is atomic: on failure the previous file content is kept.
    pub fn save(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let file = LibraryFile::new(path.as_ref());
        file.write(&self.books)?;
        info!("Saved {} book(s) to {:?}", self.books.len(), file.path());
        Ok(())
    }

    /// Replace the library with the contents of `path`
    ///
    /// The library ends up empty unless the load succeeds.
    pub fn load(&mut self, path: impl AsRef<Path>) -> LoadOutcome {
        let file = LibraryFile::new(path.as_ref());
        self.books.clear();

        match file.read() {
            Ok(books) => {
                self.books = books;
                info!("Loaded {} book(s) from {:?}", self.books.len(), file.path());
                LoadOutcome::Loaded {
                    count: self.books.len(),
                }
            }
            Err(StorageError::NotFound { .. }) => {
                info!("No library at {:?}, starting fresh", file.path());
                LoadOutcome::NotFound
            }
            Err(error @ StorageError::InvalidFormat { .. }) => {
                warn!("Library file is corrupt: {}", error);
                LoadOutcome::Corrupt { error }
            }
            Err(error) => {
                warn!("Library file is unreadable: {}", error);
                LoadOutcome::Unreadable { error }
            }
        }
    }
}

impl FromIterator<Book> for Library {
    fn from_iter<I: IntoIterator<Item = Book>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Library {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.books.iter()
    }
}
