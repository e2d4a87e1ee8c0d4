//! Shelf CLI
//!
//! Command-line interface for shelf - personal book library management.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use shelf_core::{Config, Library, LoadOutcome, StorageError};

mod commands;
mod logging;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "shelf")]
#[command(about = "Shelf - Personal book library manager")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Library file to use (overrides configuration)
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Config file to use
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a book
    #[command(alias = "create")]
    Add {
        /// Book title
        title: String,
        /// Author
        #[arg(short, long)]
        author: String,
        /// Publication year
        #[arg(short, long, allow_negative_numbers = true)]
        year: i32,
        /// Genre
        #[arg(short, long)]
        genre: String,
        /// Mark the book as read
        #[arg(short, long)]
        read: bool,
    },
    /// Remove the first book with a title (case-insensitive)
    #[command(alias = "rm")]
    Remove {
        /// Book title
        title: String,
    },
    /// Search books by title, author, genre, or year
    Search {
        /// Field to search (title, author, genre, year)
        field: String,
        /// Value to look for
        value: String,
    },
    /// List all books
    #[command(alias = "ls")]
    List,
    /// Show read/unread statistics
    Stats,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

impl Commands {
    /// Whether this command changes the library
    fn is_write(&self) -> bool {
        matches!(self, Commands::Add { .. } | Commands::Remove { .. })
    }
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (library_path, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands don't need the library
    if let Commands::Config { command } = &cli.command {
        return handle_config_command(command.clone(), cli.config.as_ref(), &output);
    }

    let config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    logging::init(&config);

    let path = cli.file.clone().unwrap_or(config.library_path);

    let (mut library, outcome) = Library::open(&path);
    report_load(&outcome, &path, cli.command.is_write(), &output)?;

    match cli.command {
        Commands::Add {
            title,
            author,
            year,
            genre,
            read,
        } => {
            let book = commands::book::validate(&title, &author, year, &genre, read)?;
            commands::book::add(&mut library, &path, book, &output)
        }
        Commands::Remove { title } => commands::book::remove(&mut library, &path, title, &output),
        Commands::Search { field, value } => {
            commands::book::search(&library, field, value, &output)
        }
        Commands::List => commands::book::list(&library, &output),
        Commands::Stats => commands::book::stats(&library, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Tell the user how loading went
///
/// Write commands refuse to continue over a damaged library file, since
/// saving would replace its contents with an empty library.
fn report_load(
    outcome: &LoadOutcome,
    path: &Path,
    is_write: bool,
    output: &Output,
) -> Result<()> {
    match outcome {
        LoadOutcome::Loaded { .. } => {}
        LoadOutcome::NotFound => {
            output.warning(&format!(
                "No saved library found at {}, starting fresh.",
                path.display()
            ));
        }
        LoadOutcome::Corrupt { error } | LoadOutcome::Unreadable { error } => {
            if is_write {
                bail!("Refusing to modify library: {}", describe_error(error));
            }
            output.warning(&format!(
                "Error loading the library: {}",
                describe_error(error)
            ));
        }
    }
    Ok(())
}

/// Error message, followed by a recovery hint when the user can act on it
fn describe_error(error: &StorageError) -> String {
    match error.recovery_suggestion() {
        Some(hint) if error.is_recoverable() => format!("{}\n{}", error, hint),
        _ => error.to_string(),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "shelf", "add", "Dune", "--author", "Frank Herbert", "--year", "1965", "--genre",
            "Sci-Fi", "--read",
        ])
        .unwrap();

        match cli.command {
            Commands::Add {
                title,
                author,
                year,
                genre,
                read,
            } => {
                assert_eq!(title, "Dune");
                assert_eq!(author, "Frank Herbert");
                assert_eq!(year, 1965);
                assert_eq!(genre, "Sci-Fi");
                assert!(read);
            }
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn test_parse_global_file_after_subcommand() {
        let cli = Cli::try_parse_from(["shelf", "list", "--file", "/tmp/books.json"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("/tmp/books.json")));
        assert!(!cli.command.is_write());
    }

    #[test]
    fn test_parse_aliases() {
        let cli = Cli::try_parse_from(["shelf", "rm", "Dune"]).unwrap();
        assert!(cli.command.is_write());

        let cli = Cli::try_parse_from(["shelf", "ls"]).unwrap();
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_report_load_blocks_writes_on_corrupt() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        std::fs::write(&path, "not json").unwrap();

        let (_, outcome) = Library::open(&path);
        let output = Output::new(OutputFormat::Quiet);

        assert!(report_load(&outcome, &path, true, &output).is_err());
        assert!(report_load(&outcome, &path, false, &output).is_ok());
    }

    #[test]
    fn test_report_load_allows_fresh_start() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");

        let (_, outcome) = Library::open(&path);
        let output = Output::new(OutputFormat::Quiet);

        assert!(report_load(&outcome, &path, true, &output).is_ok());
    }

    #[test]
    fn test_describe_error_adds_hint_for_corrupt_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("library.json");
        std::fs::write(&path, "not json").unwrap();

        let (_, outcome) = Library::open(&path);
        let LoadOutcome::Corrupt { error } = outcome else {
            panic!("expected corrupt outcome");
        };

        let message = describe_error(&error);
        assert!(message.contains("Invalid library format"));
        assert!(message.contains("move it aside"));
    }

    #[test]
    fn test_describe_error_without_hint() {
        let temp_dir = tempfile::TempDir::new().unwrap();

        // A directory is unreadable as a library, with nothing the user can retry
        let (_, outcome) = Library::open(temp_dir.path());
        let LoadOutcome::Unreadable { error } = outcome else {
            panic!("expected unreadable outcome");
        };

        assert_eq!(describe_error(&error), error.to_string());
    }
}
