use std::path::PathBuf;

use thiserror::Error;

/// Every failure a single `moviedb` operation can end with.
///
/// All variants are recovered at the CLI boundary and reported for the one
/// operation that produced them. [`MovieError::StorageWrite`] is the only one
/// treated as fatal, see [`MovieError::is_fatal`].
#[derive(Debug, Error)]
pub enum MovieError {
    /// The movie file exists but its content cannot be turned into movies.
    #[error("cannot read {}: {reason}", path.display())]
    StorageRead { path: PathBuf, reason: String },

    /// Writing the movie file failed even after retrying.
    #[error("cannot write {}: {source}", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("movie '{0}' doesn't exist")]
    NotFound(String),

    #[error("movie '{0}' already exists")]
    DuplicateKey(String),

    #[error("the collection is empty, add some movies first")]
    EmptyCollection,

    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("lookup failed: {0}")]
    Lookup(String),

    #[error("cannot generate site: {0}")]
    Site(String),
}

impl MovieError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        MovieError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn storage_read(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        MovieError::StorageRead {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the process should stop after reporting this error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MovieError::StorageWrite { .. })
    }
}

impl From<reqwest::Error> for MovieError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            MovieError::Lookup("request timed out".to_string())
        } else {
            MovieError::Lookup(err.to_string())
        }
    }
}

/// Result type used by every fallible `moviedb` operation.
///
/// # Example
///
/// ```
/// use moviedb::{Result, types::Movie};
///
/// fn classic() -> Result<Movie> {
///     Movie::new("Metropolis", 1927, 8.3, None)
/// }
/// ```
pub type Result<T> = std::result::Result<T, MovieError>;
