//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! Results go to stdout; warnings go to stderr.

use serde::Serialize;
use shelf_core::{Book, Statistics};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Statistics as rendered in JSON output
#[derive(Debug, Serialize)]
struct StatisticsView {
    total: usize,
    read_count: usize,
    unread_count: usize,
    read_percentage: f64,
}

impl From<&Statistics> for StatisticsView {
    fn from(stats: &Statistics) -> Self {
        Self {
            total: stats.total,
            read_count: stats.read_count,
            unread_count: stats.unread_count(),
            read_percentage: stats.read_percentage,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single book
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("Title:  {}", book.title);
                println!("Author: {}", book.author);
                println!("Year:   {}", book.year);
                println!("Genre:  {}", book.genre);
                println!("Status: {}", book.status_label());
            }
            OutputFormat::Json => print_json(book),
            OutputFormat::Quiet => println!("{}", book.title),
        }
    }

    /// Print a numbered list of books
    ///
    /// `empty_message` is shown (as a warning) when there is nothing to print.
    pub fn print_books(&self, books: &[Book], empty_message: &str) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    self.warning(empty_message);
                    return;
                }
                for line in numbered_lines(books) {
                    println!("{}", line);
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => print_json(&books),
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.title);
                }
            }
        }
    }

    /// Print library statistics
    pub fn print_statistics(&self, stats: &Statistics) {
        match self.format {
            OutputFormat::Human => {
                println!("Total books:     {}", stats.total);
                println!("Read:            {}", stats.read_count);
                println!("Unread:          {}", stats.unread_count());
                println!("Percentage read: {}", stats);
            }
            OutputFormat::Json => print_json(&StatisticsView::from(stats)),
            OutputFormat::Quiet => println!("{:.1}", stats.read_percentage),
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a warning for an expected, non-fatal condition
    pub fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Human => eprintln!("⚠ {}", message),
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({"status": "warning", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// One display line per book, numbered from 1
fn numbered_lines(books: &[Book]) -> Vec<String> {
    books
        .iter()
        .enumerate()
        .map(|(i, book)| format!("{}. {}", i + 1, book))
        .collect()
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to render JSON output: {}", e),
    }
}
