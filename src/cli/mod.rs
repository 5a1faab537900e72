//! # CLI Module
//!
//! The command-line layer of moviedb. Every function here takes the
//! [`MovieApp`] controller, runs one operation through it and prints the
//! outcome; none of them touches storage or the network directly.
//!
//! ## Command Categories
//!
//! ### Collection Management
//!
//! - [`list`] - Shows every movie with a total count
//! - [`add`] - Stores a new movie
//! - [`delete`] - Removes a movie by title
//! - [`update`] - Changes the rating of a movie
//!
//! ### Queries and Statistics
//!
//! - [`stats`] - Average, median, best and worst movies
//! - [`random`] - Picks tonight's movie
//! - [`search`] - Case-insensitive title search
//! - [`sort`] - Movies ordered by rating or year
//! - [`filter`] - Movies within rating and year bounds
//!
//! ### Outer Surfaces
//!
//! - [`site`] - Generates the static HTML page
//! - [`lookup`] - Fetches metadata from OMDb, optionally storing it
//! - [`menu`] - The interactive numbered menu
//!
//! ## Error Handling
//!
//! Functions return the [`MovieError`] of the failed operation. Callers hand
//! it to [`report`], which prints a warning and lets the program continue,
//! except for storage write failures: those terminate the process.
//!
//! ## Usage Patterns
//!
//! ```bash
//! moviedb                                    # Interactive menu
//! moviedb --storage json list                # List the JSON collection
//! moviedb add --title Alien --year 1979 --rating 8.5
//! moviedb sort --by year --ascending
//! moviedb filter --min-rating 8 --start-year 1990
//! moviedb lookup "The Matrix" --add          # Needs OMDB_API_KEY
//! moviedb site --open
//! ```

mod browse;
mod input;
mod lookup;
pub mod menu;
mod movies;
mod site;
mod stats;

use std::time::Duration;

use clap::ValueEnum;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

pub use browse::{filter, search, sort};
pub use input::Prompter;
pub use lookup::{lookup, print_details};
pub use movies::{add, delete, list, update};
pub use site::site;
pub use stats::{random, stats};

use crate::{
    app::MovieApp,
    error, info,
    error::MovieError,
    types::{Movie, MovieTableRow},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortKey {
    #[default]
    Rating,
    Year,
}

/// Prints the outcome of a failed operation.
///
/// Storage write failures end the process with exit code 1; every other
/// error is reported as a warning.
pub fn report(err: &MovieError) {
    if err.is_fatal() {
        error!("{}. The previous movie file was left unchanged.", err);
    }
    warning!("{}", capitalize(&err.to_string()));
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn print_movies(movies: &[Movie]) {
    if movies.is_empty() {
        info!("No movies found.");
        return;
    }

    let rows: Vec<MovieTableRow> = movies.iter().map(MovieTableRow::from).collect();
    println!("{}", Table::new(rows));
}

pub(crate) fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Runs the lookup behind a spinner.
pub(crate) fn with_spinner<T>(message: String, f: impl FnOnce() -> T) -> T {
    let pb = spinner(message);
    let result = f();
    pb.finish_and_clear();
    result
}

pub(crate) fn app_label(app: &MovieApp) -> String {
    format!(
        "{} storage: {}",
        app.storage().kind(),
        app.storage().path().display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_first_letter_only() {
        assert_eq!(capitalize("movie 'x' doesn't exist"), "Movie 'x' doesn't exist");
        assert_eq!(capitalize(""), "");
    }
}
