use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::error::{MovieError, Result};

/// The year of the oldest surviving motion picture.
pub const MIN_YEAR: i32 = 1888;
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// A single movie of the collection.
///
/// The field order is the column order of the CSV file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub rating: f64,
    pub year: i32,
    #[serde(rename = "posterUrl", alias = "poster", default)]
    pub poster_url: Option<String>,
}

impl Movie {
    /// Builds a validated movie. An empty poster URL is stored as `None`.
    pub fn new(
        title: impl Into<String>,
        year: i32,
        rating: f64,
        poster_url: Option<String>,
    ) -> Result<Self> {
        let title = title.into().trim().to_string();
        Self {
            title,
            rating,
            year,
            poster_url,
        }
        .validated()
    }

    /// Checks every field invariant and normalises the poster URL.
    pub fn validated(mut self) -> Result<Self> {
        if self.title.trim().is_empty() {
            return Err(MovieError::validation("title", "must not be empty"));
        }
        self.rating = validate_rating(self.rating)?;
        validate_year(self.year)?;

        self.poster_url = self
            .poster_url
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty() && p != "N/A");
        Ok(self)
    }

    /// Titles are compared case-insensitively everywhere in the collection.
    pub fn has_title(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.trim().to_lowercase()
    }
}

/// Checks that `rating` is a finite value within the rating scale.
///
/// Returns the rating to store, with `-0.0` folded into `0.0` so that equal
/// ratings never compare as different.
///
/// # Errors
///
/// Returns [`MovieError::Validation`] for `NaN`, infinities and values
/// outside `MIN_RATING..=MAX_RATING`.
pub fn validate_rating(rating: f64) -> Result<f64> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(MovieError::validation(
            "rating",
            format!("{rating} is not between {MIN_RATING} and {MAX_RATING}"),
        ));
    }
    Ok(rating + 0.0)
}

pub fn validate_year(year: i32) -> Result<()> {
    let max_year = max_year();
    if !(MIN_YEAR..=max_year).contains(&year) {
        return Err(MovieError::validation(
            "year",
            format!("{year} is not between {MIN_YEAR} and {max_year}"),
        ));
    }
    Ok(())
}

/// Latest accepted release year, leaving room for announced movies.
pub fn max_year() -> i32 {
    Utc::now().year() + 10
}

/// Result of an external metadata lookup.
///
/// Only `movie` is ever stored; the other fields are shown to the user
/// before they decide to add it.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub movie: Movie,
    pub imdb_id: Option<String>,
    pub plot: String,
    pub director: String,
    pub actors: String,
    pub genre: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl SortOrder {
    pub fn is_descending(self) -> bool {
        self == SortOrder::Descending
    }
}

/// Inclusive, conjunctive bounds used by [`crate::query::filter`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MovieFilter {
    pub min_rating: Option<f64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl MovieFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        self.min_rating.is_none_or(|min| movie.rating >= min)
            && self.start_year.is_none_or(|start| movie.year >= start)
            && self.end_year.is_none_or(|end| movie.year <= end)
    }

    /// Human readable form, e.g. `rating >= 8 and year >= 1990`.
    pub fn describe(&self) -> String {
        let mut criteria = Vec::new();
        if let Some(min) = self.min_rating {
            criteria.push(format!("rating >= {min}"));
        }
        if let Some(start) = self.start_year {
            criteria.push(format!("year >= {start}"));
        }
        if let Some(end) = self.end_year {
            criteria.push(format!("year <= {end}"));
        }

        if criteria.is_empty() {
            "no filters".to_string()
        } else {
            criteria.join(" and ")
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub best: Vec<Movie>,
    pub worst: Vec<Movie>,
}

#[derive(Tabled)]
pub struct MovieTableRow {
    pub title: String,
    pub year: i32,
    pub rating: String,
    pub poster: String,
}

impl From<&Movie> for MovieTableRow {
    fn from(movie: &Movie) -> Self {
        MovieTableRow {
            title: movie.title.clone(),
            year: movie.year,
            rating: format!("{:.1}", movie.rating),
            poster: movie.poster_url.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_title_and_drops_empty_poster() {
        let movie = Movie::new("  Alien ", 1979, 8.5, Some(" ".to_string())).unwrap();
        assert_eq!(movie.title, "Alien");
        assert_eq!(movie.poster_url, None);
    }

    #[test]
    fn new_rejects_out_of_range_values() {
        assert!(matches!(
            Movie::new("", 1979, 8.5, None),
            Err(MovieError::Validation { field: "title", .. })
        ));
        assert!(matches!(
            Movie::new("Alien", 1979, 10.5, None),
            Err(MovieError::Validation { field: "rating", .. })
        ));
        assert!(matches!(
            Movie::new("Alien", 1979, f64::NAN, None),
            Err(MovieError::Validation { field: "rating", .. })
        ));
        assert!(matches!(
            Movie::new("Alien", 79, 8.5, None),
            Err(MovieError::Validation { field: "year", .. })
        ));
    }

    #[test]
    fn negative_zero_rating_is_stored_as_zero() {
        let movie = Movie::new("Blank Tape", 2001, -0.0, None).unwrap();
        assert!(movie.rating.is_sign_positive());
        assert_eq!(validate_rating(-0.0).unwrap().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn title_comparison_ignores_case() {
        let movie = Movie::new("The Matrix", 1999, 8.7, None).unwrap();
        assert!(movie.has_title("the matrix"));
        assert!(movie.has_title(" THE MATRIX "));
        assert!(!movie.has_title("Matrix"));
    }

    #[test]
    fn filter_describe_lists_given_bounds() {
        assert_eq!(MovieFilter::default().describe(), "no filters");
        let filter = MovieFilter {
            min_rating: Some(8.5),
            start_year: None,
            end_year: Some(2000),
        };
        assert_eq!(filter.describe(), "rating >= 8.5 and year <= 2000");
    }
}
