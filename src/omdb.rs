//! # OMDb Integration Module
//!
//! Fetches movie metadata from the [OMDb API](https://www.omdbapi.com/) so a
//! movie can be added by title alone. The client sits behind the
//! [`MovieLookup`] trait; the application controller only ever sees the trait,
//! which lets tests swap in an in-memory lookup.
//!
//! ## Endpoints
//!
//! - `GET /?apikey={key}&t={title}` - best match for a title
//! - `GET /?apikey={key}&i={imdb_id}` - exact IMDb id
//!
//! ## Response Mapping
//!
//! OMDb answers HTTP 200 with `"Response": "False"` when nothing matches; that
//! becomes `Ok(None)`. Fields are strings and frequently `"N/A"`:
//!
//! - `Year` keeps its first four digits (`"2010–2013"` is 2010)
//! - `imdbRating` of `"N/A"` becomes a rating of 0.0
//! - `Poster` of `"N/A"` becomes no poster
//!
//! ## Failure Handling
//!
//! Every request has a bounded timeout. Network errors, timeouts, HTTP errors
//! and an invalid API key all surface as [`MovieError::Lookup`] and never
//! affect the stored collection.

use std::time::Duration;

use reqwest::{StatusCode, blocking::Client};
use serde::Deserialize;

use crate::{
    error::{MovieError, Result},
    types::{Movie, MovieDetails},
};

pub const DEFAULT_OMDB_URL: &str = "http://www.omdbapi.com/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// External metadata source for movies.
pub trait MovieLookup {
    /// Looks up the best match for `title`; `Ok(None)` when nothing matches.
    fn find_by_title(&self, title: &str) -> Result<Option<MovieDetails>>;

    /// Looks up a movie by its IMDb id (e.g. `tt1375666`).
    fn find_by_id(&self, imdb_id: &str) -> Result<Option<MovieDetails>>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OmdbResponse {
    response: String,
    error: Option<String>,
    title: Option<String>,
    year: Option<String>,
    #[serde(rename = "imdbRating")]
    imdb_rating: Option<String>,
    #[serde(rename = "imdbID")]
    imdb_id: Option<String>,
    poster: Option<String>,
    plot: Option<String>,
    director: Option<String>,
    actors: Option<String>,
    genre: Option<String>,
}

pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MovieError::Lookup(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn fetch(&self, query: (&str, &str)) -> Result<Option<MovieDetails>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), query])
            .send()?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(MovieError::Lookup("invalid API key".to_string()));
        }

        let body = response.error_for_status()?.json::<OmdbResponse>()?;
        into_details(body)
    }
}

impl MovieLookup for OmdbClient {
    fn find_by_title(&self, title: &str) -> Result<Option<MovieDetails>> {
        self.fetch(("t", title.trim()))
    }

    fn find_by_id(&self, imdb_id: &str) -> Result<Option<MovieDetails>> {
        self.fetch(("i", imdb_id.trim()))
    }
}

/// Whether `query` has the shape of an IMDb title id: `tt` followed by at
/// least seven digits.
///
/// # Example
///
/// ```
/// assert!(moviedb::omdb::is_imdb_id("tt1375666"));
/// assert!(!moviedb::omdb::is_imdb_id("Titanic"));
/// ```
pub fn is_imdb_id(query: &str) -> bool {
    query
        .trim()
        .strip_prefix("tt")
        .is_some_and(|rest| rest.len() >= 7 && rest.chars().all(|c| c.is_ascii_digit()))
}

fn into_details(body: OmdbResponse) -> Result<Option<MovieDetails>> {
    if !body.response.eq_ignore_ascii_case("true") {
        return match body.error.as_deref() {
            Some(msg) if msg.to_lowercase().contains("api key") => {
                Err(MovieError::Lookup(msg.to_string()))
            }
            _ => Ok(None),
        };
    }

    let title = body.title.unwrap_or_default();
    let year = body.year.as_deref().and_then(parse_year).ok_or_else(|| {
        MovieError::Lookup(format!("'{title}' has no usable release year"))
    })?;
    let rating = body
        .imdb_rating
        .as_deref()
        .and_then(|r| r.trim().parse::<f64>().ok())
        .unwrap_or(0.0);

    let movie = Movie::new(title, year, rating, body.poster)
        .map_err(|e| MovieError::Lookup(format!("unusable result: {e}")))?;

    Ok(Some(MovieDetails {
        movie,
        imdb_id: body.imdb_id,
        plot: text_or_empty(body.plot),
        director: text_or_empty(body.director),
        actors: text_or_empty(body.actors),
        genre: text_or_empty(body.genre),
    }))
}

fn parse_year(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().take(4).collect();
    if digits.len() == 4 && digits.chars().all(|c| c.is_ascii_digit()) {
        digits.parse().ok()
    } else {
        None
    }
}

fn text_or_empty(value: Option<String>) -> String {
    value.filter(|v| v != "N/A").unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(json: &str) -> OmdbResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn maps_found_movie() {
        let body = response(
            r#"{"Title":"Inception","Year":"2010","imdbRating":"8.8","imdbID":"tt1375666",
                "Poster":"https://example.com/inception.jpg","Plot":"Dreams.",
                "Director":"Christopher Nolan","Actors":"Leonardo DiCaprio","Genre":"Sci-Fi",
                "Response":"True"}"#,
        );

        let details = into_details(body).unwrap().unwrap();
        assert_eq!(details.movie.title, "Inception");
        assert_eq!(details.movie.year, 2010);
        assert_eq!(details.movie.rating, 8.8);
        assert_eq!(
            details.movie.poster_url.as_deref(),
            Some("https://example.com/inception.jpg")
        );
        assert_eq!(details.imdb_id.as_deref(), Some("tt1375666"));
        assert_eq!(details.director, "Christopher Nolan");
    }

    #[test]
    fn maps_not_available_fields() {
        let body = response(
            r#"{"Title":"Sherlock","Year":"2010–2017","imdbRating":"N/A","Poster":"N/A",
                "Plot":"N/A","Response":"True"}"#,
        );

        let details = into_details(body).unwrap().unwrap();
        assert_eq!(details.movie.year, 2010);
        assert_eq!(details.movie.rating, 0.0);
        assert_eq!(details.movie.poster_url, None);
        assert_eq!(details.plot, "");
    }

    #[test]
    fn detects_imdb_ids() {
        assert!(is_imdb_id("tt1375666"));
        assert!(is_imdb_id(" tt0113277 "));
        assert!(!is_imdb_id("tt"));
        assert!(!is_imdb_id("Titanic"));
        assert!(!is_imdb_id("tt13x5666"));
    }

    #[test]
    fn not_found_is_none() {
        let body = response(r#"{"Response":"False","Error":"Movie not found!"}"#);
        assert!(into_details(body).unwrap().is_none());
    }

    #[test]
    fn invalid_key_is_an_error() {
        let body = response(r#"{"Response":"False","Error":"Invalid API key!"}"#);
        assert!(matches!(into_details(body), Err(MovieError::Lookup(_))));
    }
}
