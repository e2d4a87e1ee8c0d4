//! Logging setup
//!
//! Only initializes if the SHELF_LOG environment variable is set.
//! Logs to `config.log_file` when configured, otherwise to stderr.

use std::fs::OpenOptions;
use std::sync::Mutex;

use shelf_core::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Build the filter directive for a log level
fn filter_directive(level: &str) -> String {
    format!("shelf_core={},shelf_cli={}", level, level)
}

/// Initialize logging for the CLI
pub fn init(config: &Config) {
    let Ok(log_level) = std::env::var("SHELF_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(filter_directive(log_level.trim()));

    match &config.log_file {
        Some(log_path) => {
            let log_file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };

            // Ignore error if already initialized
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file))
                .try_init();

            info!("Logging initialized to {:?}", log_path);
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive("debug"), "shelf_core=debug,shelf_cli=debug");
    }
}
