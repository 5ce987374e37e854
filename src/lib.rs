//! Manga Update Monitor Library
//!
//! This library checks a list of followed manga series against a scraping
//! service and tells, per series, how fresh the newest chapter is and
//! whether the preferred scan group uploaded it.
//!
//! # Modules
//!
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error types of the scraper client and the watchlist
//! - `management` - Entry store and persisted watchlist
//! - `orchestrator` - Windowed, bounded-concurrency batch runner
//! - `scraper` - Scraper client boundary and its HTTP implementation
//! - `status` - Freshness classification
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod orchestrator;
pub mod scraper;
pub mod status;
pub mod types;
pub mod utils;

/// A convenient Result type alias for the command-line glue.
///
/// Library modules return their own error types; this boxed alias is used
/// where several of them meet.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Checking {} series...", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for fatal errors in the command layer: nothing after this
/// macro runs.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
