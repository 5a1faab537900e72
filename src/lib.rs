//! Movie Collection Manager Library
//!
//! This library provides the building blocks of the `moviedb` command-line tool:
//! a small personal movie collection persisted in a flat CSV or JSON file, a set
//! of pure query and statistics functions over that collection, an optional
//! OMDb metadata lookup client and a static HTML site generator.
//!
//! # Modules
//!
//! - `app` - The application controller that runs one command end to end
//! - `cli` - Command-line interface implementations and the interactive menu
//! - `config` - Configuration management and environment variables
//! - `error` - The error taxonomy shared by every layer
//! - `omdb` - OMDb API client behind the `MovieLookup` capability
//! - `query` - Search, sort, filter and statistics over a collection snapshot
//! - `site` - Static HTML generation behind the `SiteRenderer` capability
//! - `storage` - CSV and JSON storage backends behind the `MovieStorage` trait
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use moviedb::{app::MovieApp, config::Config};
//!
//! fn main() -> moviedb::Result<()> {
//!     let app = MovieApp::from_config(Config::default())?;
//!     for movie in app.list()? {
//!         println!("{} ({})", movie.title, movie.year);
//!     }
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod omdb;
pub mod query;
pub mod site;
pub mod storage;
pub mod types;

pub use error::{MovieError, Result};

/// Prints an informational message with a blue bullet point.
///
/// Creates a formatted output line with a distinctive blue "o" indicator
/// followed by the provided message. Used for general information and
/// status updates throughout the application.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// info!("Using CSV storage: {}", path.display());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Confirms that a change to the collection or a generated file is done,
/// e.g. after adding, deleting or updating a movie.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// success!("Movie '{}' successfully added", title);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the program with exit code 1 right after printing. Only used
/// for conditions the application cannot continue from, such as a storage
/// write that still fails after every retry.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Behavior
///
/// The message goes to stderr so it still shows when stdout is piped into
/// another program. Nothing after the macro runs.
///
/// # Example
///
/// ```
/// error!("Cannot write movie file: {}", err);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable failures of a single operation: a missing title,
/// a duplicate, a failed lookup. The program keeps running afterwards.
///
/// # Arguments
///
/// The macro accepts the same arguments as `println!`, supporting format
/// strings and interpolation.
///
/// # Example
///
/// ```
/// warning!("Movie '{}' doesn't exist!", title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
