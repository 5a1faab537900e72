//! The application controller.
//!
//! [`MovieApp`] runs one user command at a time: it loads the collection from
//! the configured [`MovieStorage`], hands it to the [`query`] functions or
//! mutates it through the storage, and returns plain values for the CLI to
//! format. It never caches the collection between calls.
//!
//! ## Collaborators
//!
//! - [`MovieStorage`] - the CSV or JSON file holding the collection
//! - [`MovieLookup`] - optional metadata service, only present with an API key
//! - [`SiteRenderer`] - turns the collection into a static page
//!
//! All three are trait objects, so tests can run the controller against
//! in-memory fakes.

use std::path::PathBuf;

use rand::Rng;

use crate::{
    config::Config,
    error::{MovieError, Result},
    omdb::{self, MovieLookup, OmdbClient},
    query,
    site::{SiteRenderer, TemplateSite},
    storage::{self, MovieStorage},
    types::{CollectionStats, Movie, MovieDetails, MovieFilter, SortOrder},
};

pub struct MovieApp {
    storage: Box<dyn MovieStorage>,
    lookup: Option<Box<dyn MovieLookup>>,
    site: Box<dyn SiteRenderer>,
}

impl MovieApp {
    pub fn new(
        storage: Box<dyn MovieStorage>,
        lookup: Option<Box<dyn MovieLookup>>,
        site: Box<dyn SiteRenderer>,
    ) -> Self {
        Self {
            storage,
            lookup,
            site,
        }
    }

    /// Wires the storage backend, OMDb client and site renderer described by
    /// `config`.
    ///
    /// The lookup client is only created when an API key is set. The CSV
    /// delimiter of the config only applies to the CSV backend.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Lookup`] if the HTTP client cannot be built.
    pub fn from_config(config: Config) -> Result<Self> {
        let storage =
            storage::open_with_delimiter(config.storage, config.data_file, config.csv_delimiter);

        let lookup: Option<Box<dyn MovieLookup>> = match config.api_key {
            Some(key) => Some(Box::new(OmdbClient::new(
                key,
                config.omdb_url,
                config.lookup_timeout,
            )?)),
            None => None,
        };

        let site = Box::new(TemplateSite::new(config.template_dir, config.site_dir));
        Ok(Self::new(storage, lookup, site))
    }

    pub fn storage(&self) -> &dyn MovieStorage {
        self.storage.as_ref()
    }

    /// Installs a lookup service after startup, e.g. with a key typed into
    /// the interactive menu.
    pub fn set_lookup(&mut self, lookup: Box<dyn MovieLookup>) {
        self.lookup = Some(lookup);
    }

    pub fn has_lookup(&self) -> bool {
        self.lookup.is_some()
    }

    /// Returns every stored movie in file order.
    pub fn list(&self) -> Result<Vec<Movie>> {
        self.storage.list()
    }

    /// Stores `movie` and hands it back for display.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::DuplicateKey`] if a movie with the same title
    /// (ignoring case) is already stored.
    pub fn add(&self, movie: Movie) -> Result<Movie> {
        self.storage.add(movie.clone())?;
        Ok(movie)
    }

    /// Removes the movie titled `title` and returns it.
    pub fn delete(&self, title: &str) -> Result<Movie> {
        self.storage.delete(title)
    }

    /// Sets a new rating and returns the updated movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Validation`] for a rating outside 0 to 10 and
    /// [`MovieError::NotFound`] for an unknown title. The file is left
    /// unchanged in both cases.
    pub fn update_rating(&self, title: &str, rating: f64) -> Result<Movie> {
        self.storage.update(title, rating)
    }

    /// Average, median, best and worst movies of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::EmptyCollection`] when nothing is stored.
    pub fn stats(&self) -> Result<CollectionStats> {
        query::stats(&self.list()?)
    }

    pub fn random(&self) -> Result<Movie> {
        self.random_with(&mut rand::rng())
    }

    /// Picks a movie with the given random number generator.
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Movie> {
        query::random_pick(&self.list()?, rng)
    }

    pub fn search(&self, needle: &str, case_insensitive: bool) -> Result<Vec<Movie>> {
        Ok(query::search_by_title(&self.list()?, needle, case_insensitive))
    }

    pub fn sort_by_rating(&self, order: SortOrder) -> Result<Vec<Movie>> {
        Ok(query::sort_by_rating(&self.list()?, order))
    }

    pub fn sort_by_year(&self, order: SortOrder) -> Result<Vec<Movie>> {
        Ok(query::sort_by_year(&self.list()?, order))
    }

    pub fn filter(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        Ok(query::filter(&self.list()?, filter))
    }

    /// Looks a movie up on the metadata service without storing anything.
    ///
    /// `query` is an IMDb id when it looks like one (see
    /// [`omdb::is_imdb_id`]), otherwise a title.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Lookup`] when no lookup service is configured or
    /// the request fails.
    pub fn lookup(&self, query: &str) -> Result<Option<MovieDetails>> {
        let service = self.lookup_service()?;
        let query = query.trim();
        if omdb::is_imdb_id(query) {
            service.find_by_id(query)
        } else {
            service.find_by_title(query)
        }
    }

    /// Looks a movie up and stores it, returning everything that was found.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::Lookup`] when nothing matches `query` and
    /// [`MovieError::DuplicateKey`] when the movie is already stored.
    pub fn add_from_lookup(&self, query: &str) -> Result<MovieDetails> {
        let details = self.lookup(query)?.ok_or_else(|| {
            MovieError::Lookup(format!("no movie found for '{}'", query.trim()))
        })?;
        self.storage.add(details.movie.clone())?;
        Ok(details)
    }

    /// Renders the collection and returns the path of the generated page.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::EmptyCollection`] when nothing is stored and
    /// [`MovieError::Site`] when the page cannot be written.
    pub fn generate_site(&self) -> Result<PathBuf> {
        let movies = self.list()?;
        if movies.is_empty() {
            return Err(MovieError::EmptyCollection);
        }
        self.site.render(&movies)
    }

    fn lookup_service(&self) -> Result<&dyn MovieLookup> {
        self.lookup
            .as_deref()
            .ok_or_else(|| MovieError::Lookup("no API key configured".to_string()))
    }
}
