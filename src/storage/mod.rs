//! # Storage Module
//!
//! Flat-file persistence for the movie collection. Two interchangeable
//! backends implement [`MovieStorage`]:
//!
//! - [`CsvStorage`] - one row per movie under a `title,rating,year,posterUrl`
//!   header, RFC 4180 quoting
//! - [`JsonStorage`] - one pretty-printed array of movie objects
//!
//! ## Access Pattern
//!
//! Every operation reads the whole file. Mutations change the collection in
//! memory and write the whole file back through [`write_atomically`], which
//! replaces the target by renaming a fully written temporary file. A crash
//! mid-write therefore leaves the previous content in place.
//!
//! ## Policies
//!
//! Both backends share the mutation logic of the trait's provided methods,
//! so the following holds for either file format:
//!
//! - Titles are matched case-insensitively
//! - Adding an existing title fails with [`MovieError::DuplicateKey`]
//! - Deleting or updating a missing title fails with [`MovieError::NotFound`]
//!   and leaves the file untouched
//! - Malformed content fails with [`MovieError::StorageRead`]; nothing is
//!   skipped silently

mod csv;
mod json;

use std::{
    collections::HashMap,
    fmt,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
    thread,
    time::Duration,
};

use tempfile::NamedTempFile;

pub use self::csv::{CSV_HEADER, CsvStorage, DEFAULT_DELIMITER};
pub use self::json::JsonStorage;

use crate::{
    error::{MovieError, Result},
    types::{Movie, validate_rating},
};

/// Number of attempts for a single file replacement before giving up.
pub const WRITE_ATTEMPTS: u32 = 3;
const WRITE_RETRY_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    Csv,
    Json,
}

impl StorageKind {
    pub fn extension(self) -> &'static str {
        match self {
            StorageKind::Csv => "csv",
            StorageKind::Json => "json",
        }
    }
}

impl fmt::Display for StorageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageKind::Csv => write!(f, "CSV"),
            StorageKind::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for StorageKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(StorageKind::Csv),
            "json" => Ok(StorageKind::Json),
            other => Err(format!(
                "unknown storage type '{other}', expected 'csv' or 'json'"
            )),
        }
    }
}

/// Persistent movie collection.
///
/// Implementors only provide whole-file [`read_all`](MovieStorage::read_all)
/// and [`write_all`](MovieStorage::write_all); the collection operations are
/// built on top of them.
pub trait MovieStorage {
    fn kind(&self) -> StorageKind;

    fn path(&self) -> &Path;

    /// Parses the whole file. Only called when the file exists.
    fn read_all(&self) -> Result<Vec<Movie>>;

    /// Serializes the whole collection and atomically replaces the file.
    fn write_all(&self, movies: &[Movie]) -> Result<()>;

    /// Returns every stored movie in file order.
    ///
    /// A missing file is created in its empty state first.
    fn list(&self) -> Result<Vec<Movie>> {
        if !self.path().exists() {
            self.write_all(&[])?;
            return Ok(Vec::new());
        }
        self.read_all()
    }

    /// Appends `movie` to the end of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::DuplicateKey`] if the title is already stored,
    /// ignoring case. The file is not rewritten in that case.
    fn add(&self, movie: Movie) -> Result<()> {
        let mut movies = self.list()?;
        if movies.iter().any(|m| m.has_title(&movie.title)) {
            return Err(MovieError::DuplicateKey(movie.title));
        }
        movies.push(movie);
        self.write_all(&movies)
    }

    /// Removes the movie with the given title and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] for an unknown title; the file stays
    /// byte-identical.
    fn delete(&self, title: &str) -> Result<Movie> {
        let mut movies = self.list()?;
        let index = position(&movies, title)?;
        let removed = movies.remove(index);
        self.write_all(&movies)?;
        Ok(removed)
    }

    /// Sets a new rating on the movie with the given title and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] for a rating outside the rating
    /// scale and [`MovieError::NotFound`] for an unknown title. Neither
    /// touches the file.
    fn update(&self, title: &str, rating: f64) -> Result<Movie> {
        let rating = validate_rating(rating)?;
        let mut movies = self.list()?;
        let index = position(&movies, title)?;
        movies[index].rating = rating;
        self.write_all(&movies)?;
        Ok(movies[index].clone())
    }
}

fn position(movies: &[Movie], title: &str) -> Result<usize> {
    movies
        .iter()
        .position(|m| m.has_title(title))
        .ok_or_else(|| MovieError::NotFound(title.trim().to_string()))
}

/// Opens the backend of the given kind on `path`.
///
/// CSV files use the default `,` delimiter, see [`open_with_delimiter`].
pub fn open(kind: StorageKind, path: impl Into<PathBuf>) -> Box<dyn MovieStorage> {
    open_with_delimiter(kind, path, DEFAULT_DELIMITER)
}

/// Opens the backend of the given kind on `path`, separating CSV fields with
/// `delimiter`. JSON storage ignores the delimiter.
///
/// # Example
///
/// ```
/// use moviedb::storage::{self, StorageKind};
///
/// let store = storage::open_with_delimiter(StorageKind::Csv, "movies.csv", b';');
/// assert_eq!(store.kind(), StorageKind::Csv);
/// ```
pub fn open_with_delimiter(
    kind: StorageKind,
    path: impl Into<PathBuf>,
    delimiter: u8,
) -> Box<dyn MovieStorage> {
    match kind {
        StorageKind::Csv => Box::new(CsvStorage::new(path).with_delimiter(delimiter)),
        StorageKind::Json => Box::new(JsonStorage::new(path)),
    }
}

/// Replaces `path` with `contents` through a temporary file and a rename.
///
/// The temporary file lives next to the target so the rename never crosses
/// file systems. Each failed attempt is retried up to [`WRITE_ATTEMPTS`]
/// times; the last error is returned as [`MovieError::StorageWrite`].
pub fn write_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let mut attempt = 1;
    loop {
        match try_replace(path, contents) {
            Ok(()) => return Ok(()),
            Err(_) if attempt < WRITE_ATTEMPTS => {
                attempt += 1;
                thread::sleep(WRITE_RETRY_DELAY);
            }
            Err(source) => {
                return Err(MovieError::StorageWrite {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

fn try_replace(path: &Path, contents: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Re-checks the invariants of movies that came out of a file.
///
/// Every movie must pass [`Movie::validated`] and no two movies may share a
/// title, compared case-insensitively. `entry` names a record in error
/// messages, e.g. `row` or `entry`.
fn validate_loaded(path: &Path, movies: Vec<Movie>, entry: &str) -> Result<Vec<Movie>> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(movies.len());
    let mut valid = Vec::with_capacity(movies.len());

    for (i, movie) in movies.into_iter().enumerate() {
        let number = i + 1;
        let movie = movie
            .validated()
            .map_err(|e| MovieError::storage_read(path, format!("{entry} {number}: {e}")))?;

        let key = movie.title.trim().to_lowercase();
        if let Some(first) = seen.insert(key, number) {
            return Err(MovieError::storage_read(
                path,
                format!(
                    "{entry} {number}: duplicate title '{}', already used by {entry} {first}",
                    movie.title
                ),
            ));
        }
        valid.push(movie);
    }

    Ok(valid)
}
