//! Book command handlers

use std::path::Path;

use anyhow::{bail, Context, Result};

use shelf_core::{Book, Library, RemoveOutcome, SearchOutcome, MAX_YEAR, MIN_YEAR};

use crate::output::Output;

/// Validate form input and build a book from it
///
/// Title, author, and genre must be non-blank and the year must fall
/// within `MIN_YEAR..=MAX_YEAR`.
pub fn validate(
    title: &str,
    author: &str,
    year: i32,
    genre: &str,
    read: bool,
) -> Result<Book> {
    let (title, author, genre) = (title.trim(), author.trim(), genre.trim());

    if title.is_empty() || author.is_empty() || genre.is_empty() {
        bail!("Please fill in all fields (title, author, genre).");
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        bail!(
            "Publication year must be between {} and {}, got {}.",
            MIN_YEAR,
            MAX_YEAR,
            year
        );
    }

    Ok(Book::new(title, author, year, genre, read))
}

/// Add a book and save the library
pub fn add(library: &mut Library, path: &Path, book: Book, output: &Output) -> Result<()> {
    library.add(book.clone());
    library.save(path).context("Failed to save library")?;

    output.success("Book added successfully!");
    output.print_book(&book);

    Ok(())
}

/// Remove a book by title and save the library
pub fn remove(library: &mut Library, path: &Path, title: String, output: &Output) -> Result<()> {
    if title.trim().is_empty() {
        bail!("Please enter a title.");
    }

    match library.remove(&title) {
        RemoveOutcome::Removed(book) => {
            library.save(path).context("Failed to save library")?;
            output.success(&format!("Removed: {}", book));
        }
        RemoveOutcome::NotFound => {
            output.warning(&format!("Book not found: {}", title));
        }
    }

    Ok(())
}

/// Search books by field
pub fn search(library: &Library, field: String, value: String, output: &Output) -> Result<()> {
    if value.is_empty() {
        bail!("Please enter a search value.");
    }

    match library.search(&field, &value) {
        SearchOutcome::Matches(books) => {
            output.print_books(&books, "No matching books found.");
        }
        SearchOutcome::InvalidFormat { value } => {
            output.warning(&format!("Invalid year format: '{}'", value));
        }
    }

    Ok(())
}

/// List all books
pub fn list(library: &Library, output: &Output) -> Result<()> {
    match library.list() {
        Some(books) => output.print_books(books, ""),
        None => output.print_books(&[], "Your library is empty."),
    }
    Ok(())
}

/// Show read/unread statistics
pub fn stats(library: &Library, output: &Output) -> Result<()> {
    match library.statistics() {
        Some(stats) => output.print_statistics(&stats),
        None => output.warning("No books in the library."),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_validate_trims_fields() {
        let book = validate("  Dune ", "Frank Herbert", 1965, " Sci-Fi", true).unwrap();
        assert_eq!(book, Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true));
    }

    #[test]
    fn test_validate_requires_fields() {
        assert!(validate("", "Frank Herbert", 1965, "Sci-Fi", true).is_err());
        assert!(validate("Dune", "   ", 1965, "Sci-Fi", true).is_err());
        assert!(validate("Dune", "Frank Herbert", 1965, "", true).is_err());
    }

    #[test]
    fn test_validate_year_range() {
        assert!(validate("Dune", "Frank Herbert", MIN_YEAR, "Sci-Fi", true).is_ok());
        assert!(validate("Dune", "Frank Herbert", MAX_YEAR, "Sci-Fi", true).is_ok());
        assert!(validate("Dune", "Frank Herbert", MIN_YEAR - 1, "Sci-Fi", true).is_err());
        assert!(validate("Dune", "Frank Herbert", MAX_YEAR + 1, "Sci-Fi", true).is_err());
    }

    #[test]
    fn test_add_saves_library() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        let mut library = Library::new();

        let book = Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true);
        add(&mut library, &path, book.clone(), &quiet()).unwrap();

        let (reloaded, _) = Library::open(&path);
        assert_eq!(reloaded.books(), &[book]);
    }

    #[test]
    fn test_remove_saves_library() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        let mut library = Library::new();
        library.add_book("Dune", "Frank Herbert", 1965, "Sci-Fi", true);
        library.add_book("Emma", "Jane Austen", 1815, "Romance", false);

        remove(&mut library, &path, "DUNE".to_string(), &quiet()).unwrap();

        let (reloaded, _) = Library::open(&path);
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.books()[0].title, "Emma");
    }

    #[test]
    fn test_remove_not_found_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        let mut library = Library::new();

        remove(&mut library, &path, "Dune".to_string(), &quiet()).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_remove_blank_title_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        let mut library = Library::new();

        assert!(remove(&mut library, &path, "  ".to_string(), &quiet()).is_err());
    }

    #[test]
    fn test_search_requires_value() {
        let library = Library::new();
        assert!(search(&library, "title".to_string(), String::new(), &quiet()).is_err());
    }

    #[test]
    fn test_search_invalid_year_is_not_an_error() {
        let library = Library::new();
        assert!(search(&library, "year".to_string(), "abc".to_string(), &quiet()).is_ok());
    }
}
