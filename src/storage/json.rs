use std::{
    fs,
    path::{Path, PathBuf},
};

use super::{MovieStorage, StorageKind, validate_loaded, write_atomically};
use crate::{
    error::{MovieError, Result},
    types::Movie,
};

/// Movie collection stored as one JSON array.
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MovieStorage for JsonStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Json
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Movie>> {
        let content = fs::read_to_string(&self.path)
            .map_err(|e| MovieError::storage_read(&self.path, e))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let movies: Vec<Movie> = serde_json::from_str(&content)
            .map_err(|e| MovieError::storage_read(&self.path, e))?;

        validate_loaded(&self.path, movies, "entry")
    }

    fn write_all(&self, movies: &[Movie]) -> Result<()> {
        let mut json = serde_json::to_string_pretty(movies).map_err(|e| {
            MovieError::StorageWrite {
                path: self.path.clone(),
                source: e.into(),
            }
        })?;
        json.push('\n');
        write_atomically(&self.path, json.as_bytes())
    }
}
