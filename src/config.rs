//! Configuration management for moviedb.
//!
//! Settings come from, in order of priority:
//! 1. Command-line options
//! 2. Environment variables
//! 3. A `.env` file in the local data directory
//! 4. Application defaults
//!
//! The first three are merged by `clap` in `main`; the result is turned into
//! one [`Config`] value that is handed to the application controller. Nothing
//! below `main` reads the process environment.

use std::{path::PathBuf, time::Duration};

use crate::{
    omdb,
    storage::{self, StorageKind},
};

pub const APP_DIR: &str = "moviedb";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/moviedb/.env`
/// - macOS: `~/Library/Application Support/moviedb/.env`
/// - Windows: `%LOCALAPPDATA%/moviedb/.env`
///
/// A missing file is fine; every setting has a default or a CLI option.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Platform specific directory holding the movie file, `.env` and templates.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Parses a CSV delimiter given on the command line or in the environment.
///
/// Accepts a single ASCII character other than a quote or a line break, or
/// the word `tab`.
///
/// # Errors
///
/// Returns a message suitable for `clap` when the value is unusable.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    if value.eq_ignore_ascii_case("tab") || value == "\\t" {
        return Ok(b'\t');
    }

    match value.as_bytes() {
        [b'"' | b'\n' | b'\r'] => Err(format!(
            "'{}' cannot be used as a delimiter",
            value.escape_default()
        )),
        [byte] if byte.is_ascii() => Ok(*byte),
        _ => Err(format!("expected a single ASCII character or 'tab', got '{value}'")),
    }
}

/// Everything the application needs to run, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageKind,
    pub data_file: PathBuf,
    pub csv_delimiter: u8,
    pub api_key: Option<String>,
    pub omdb_url: String,
    pub lookup_timeout: Duration,
    pub template_dir: PathBuf,
    pub site_dir: PathBuf,
}

impl Config {
    /// Default configuration for the given backend, rooted in [`data_dir`].
    pub fn for_storage(storage: StorageKind) -> Self {
        let dir = data_dir();
        Self {
            storage,
            data_file: dir.join(format!("movies.{}", storage.extension())),
            csv_delimiter: storage::DEFAULT_DELIMITER,
            api_key: None,
            omdb_url: omdb::DEFAULT_OMDB_URL.to_string(),
            lookup_timeout: omdb::DEFAULT_TIMEOUT,
            template_dir: dir.join("templates"),
            site_dir: dir.join("site"),
        }
    }

    pub fn with_data_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.data_file = path;
        }
        self
    }

    pub fn with_csv_delimiter(mut self, delimiter: Option<u8>) -> Self {
        if let Some(delimiter) = delimiter {
            self.csv_delimiter = delimiter;
        }
        self
    }

    pub fn with_site_dir(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.site_dir = path;
        }
        self
    }

    /// Blank keys are treated as not configured.
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());
        self
    }

    pub fn with_omdb_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.omdb_url = url;
        }
        self
    }

    pub fn with_lookup_timeout(mut self, secs: Option<u64>) -> Self {
        if let Some(secs) = secs {
            self.lookup_timeout = Duration::from_secs(secs.max(1));
        }
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::for_storage(StorageKind::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_file_follows_storage_kind() {
        let csv = Config::for_storage(StorageKind::Csv);
        let json = Config::for_storage(StorageKind::Json);
        assert!(csv.data_file.ends_with("moviedb/movies.csv"));
        assert!(json.data_file.ends_with("moviedb/movies.json"));
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let config = Config::default().with_api_key(Some("   ".to_string()));
        assert_eq!(config.api_key, None);

        let config = Config::default().with_api_key(Some(" abc123 ".to_string()));
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
    }

    #[test]
    fn parse_delimiter_accepts_single_ascii_characters() {
        assert_eq!(parse_delimiter(";"), Ok(b';'));
        assert_eq!(parse_delimiter("|"), Ok(b'|'));
        assert_eq!(parse_delimiter("tab"), Ok(b'\t'));
        assert!(parse_delimiter("").is_err());
        assert!(parse_delimiter(";;").is_err());
        assert!(parse_delimiter("\"").is_err());
        assert!(parse_delimiter("é").is_err());
    }

    #[test]
    fn csv_delimiter_defaults_to_comma() {
        assert_eq!(Config::default().csv_delimiter, b',');
        let config = Config::default().with_csv_delimiter(Some(b';'));
        assert_eq!(config.csv_delimiter, b';');
    }

    #[test]
    fn overrides_replace_defaults() {
        let config = Config::default()
            .with_data_file(Some(PathBuf::from("/tmp/films.csv")))
            .with_site_dir(None)
            .with_lookup_timeout(Some(0));

        assert_eq!(config.data_file, PathBuf::from("/tmp/films.csv"));
        assert!(config.site_dir.ends_with("moviedb/site"));
        assert_eq!(config.lookup_timeout, Duration::from_secs(1));
    }
}
