//! Data models for shelf
//!
//! Defines the book record, the searchable fields, and the read/unread
//! statistics computed over a library.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Earliest publication year the front end accepts
pub const MIN_YEAR: i32 = 1000;

/// Latest publication year the front end accepts
pub const MAX_YEAR: i32 = 2025;

/// A single book in the library
///
/// Every field is required when deserializing, so a stored record that is
/// missing one fails to load instead of being partially populated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Book {
    /// Title, matched case-insensitively but stored as entered
    pub title: String,
    /// Author name
    pub author: String,
    /// Publication year
    pub year: i32,
    /// Genre
    pub genre: String,
    /// Whether the book has been read
    pub read_status: bool,
}

impl Book {
    /// Create a new book record
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read_status: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read_status,
        }
    }

    /// Case-insensitive exact comparison against the title
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.to_lowercase()
    }

    /// Human label for the read status
    pub fn status_label(&self) -> &'static str {
        if self.read_status {
            "Read"
        } else {
            "Unread"
        }
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} ({}) - {} - {}",
            self.title,
            self.author,
            self.year,
            self.genre,
            self.status_label()
        )
    }
}

/// A field that books can be searched by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Author,
    Genre,
    Year,
}

impl SearchField {
    /// All searchable fields, in menu order
    pub const ALL: [SearchField; 4] = [
        SearchField::Title,
        SearchField::Author,
        SearchField::Genre,
        SearchField::Year,
    ];

    /// The token used to name this field
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Genre => "genre",
            SearchField::Year => "year",
        }
    }

    /// The text value of this field on a book (`None` for year)
    pub(crate) fn text_of<'a>(&self, book: &'a Book) -> Option<&'a str> {
        match self {
            SearchField::Title => Some(&book.title),
            SearchField::Author => Some(&book.author),
            SearchField::Genre => Some(&book.genre),
            SearchField::Year => None,
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a search field token is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown search field: '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for SearchField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SearchField::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Read/unread statistics for a non-empty library
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Statistics {
    /// Number of books
    pub total: usize,
    /// Number of books marked as read
    pub read_count: usize,
    /// Percentage read, rounded half-up to one decimal place
    pub read_percentage: f64,
}

impl Statistics {
    /// Compute statistics from counts
    ///
    /// Returns `None` when `total` is zero.
    pub fn from_counts(total: usize, read_count: usize) -> Option<Self> {
        if total == 0 {
            return None;
        }

        // Tenths of a percent, rounded half-up in integer space
        let tenths = (read_count * 1000 + total / 2) / total;

        Some(Self {
            total,
            read_count,
            read_percentage: tenths as f64 / 10.0,
        })
    }

    /// Number of books not yet read
    pub fn unread_count(&self) -> usize {
        self.total - self.read_count
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.read_percentage)
    }
}
