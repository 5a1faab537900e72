//! CSV backend.
//!
//! One movie per row below a fixed header. Fields are quoted following
//! RFC 4180 whenever they contain the delimiter, quotes or line breaks, so
//! titles like `Crouching Tiger, Hidden Dragon` survive a round trip.

use std::{
    fs,
    path::{Path, PathBuf},
};

use ::csv::{ReaderBuilder, Trim, WriterBuilder};

use super::{MovieStorage, StorageKind, validate_loaded, write_atomically};
use crate::{
    error::{MovieError, Result},
    types::Movie,
};

/// Column names, in the order [`Movie`] serializes its fields.
pub const CSV_HEADER: [&str; 4] = ["title", "rating", "year", "posterUrl"];

pub const DEFAULT_DELIMITER: u8 = b',';

/// Movie collection stored as delimited text.
///
/// # Example
///
/// ```
/// use moviedb::storage::{CsvStorage, MovieStorage};
///
/// let store = CsvStorage::new("movies.csv").with_delimiter(b';');
/// for movie in store.list()? {
///     println!("{};{}", movie.title, movie.rating);
/// }
/// # Ok::<(), moviedb::MovieError>(())
/// ```
pub struct CsvStorage {
    path: PathBuf,
    delimiter: u8,
}

impl CsvStorage {
    /// Creates a storage on `path` using the default `,` delimiter. The file
    /// is not touched until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Separates fields with `delimiter` instead, e.g. `b';'` for files
    /// shared with spreadsheet tools using a decimal comma.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn to_bytes(&self, movies: &[Movie]) -> Result<Vec<u8>> {
        let write_err = |e: ::csv::Error| MovieError::StorageWrite {
            path: self.path.clone(),
            source: e.into(),
        };

        // The header is written by hand so an empty collection still gets one.
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(CSV_HEADER).map_err(write_err)?;
        for movie in movies {
            writer.serialize(movie).map_err(write_err)?;
        }

        writer.into_inner().map_err(|e| MovieError::StorageWrite {
            path: self.path.clone(),
            source: e.into_error(),
        })
    }
}

impl MovieStorage for CsvStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Csv
    }

    fn path(&self) -> &Path {
        &self.path
    }

    /// Parses the file, checking the header first.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::StorageRead`] for an unexpected header, a row
    /// with the wrong number of fields, a value that is not a number where
    /// one is expected, an invalid movie or a repeated title.
    fn read_all(&self) -> Result<Vec<Movie>> {
        let content =
            fs::read(&self.path).map_err(|e| MovieError::storage_read(&self.path, e))?;

        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .trim(Trim::Headers)
            .from_reader(content.as_slice());

        let headers = reader
            .headers()
            .map_err(|e| MovieError::storage_read(&self.path, e))?;
        if !headers.is_empty() && headers.iter().ne(CSV_HEADER) {
            return Err(MovieError::storage_read(
                &self.path,
                format!(
                    "unexpected header '{}', expected '{}'",
                    headers.iter().collect::<Vec<_>>().join(","),
                    CSV_HEADER.join(",")
                ),
            ));
        }

        let movies = reader
            .deserialize::<Movie>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| MovieError::storage_read(&self.path, e))?;

        validate_loaded(&self.path, movies, "row")
    }

    fn write_all(&self, movies: &[Movie]) -> Result<()> {
        let bytes = self.to_bytes(movies)?;
        write_atomically(&self.path, &bytes)
    }
}
