//! Pure search, sort, filter and statistics functions.
//!
//! Every function takes a borrowed snapshot of the collection and returns a
//! new value; the input is never reordered or modified.
//!
//! ## Ordering
//!
//! Ratings are compared with a total order in which `-0.0` equals `0.0`.
//! Both sorts are stable, so movies with equal keys keep their collection
//! order whether sorting ascending or descending.
//!
//! ## Empty Collections
//!
//! Aggregates that need at least one rating (`average`, `median`, `stats`,
//! `random_pick`) fail with [`MovieError::EmptyCollection`]. Everything else
//! returns an empty list.

use std::cmp::Ordering;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    error::{MovieError, Result},
    types::{CollectionStats, Movie, MovieFilter, SortOrder},
};

/// Arithmetic mean of all ratings.
///
/// # Errors
///
/// Returns [`MovieError::EmptyCollection`] for an empty slice.
pub fn average(movies: &[Movie]) -> Result<f64> {
    if movies.is_empty() {
        return Err(MovieError::EmptyCollection);
    }
    let sum: f64 = movies.iter().map(|m| m.rating).sum();
    Ok(sum / movies.len() as f64)
}

/// Middle rating; with an even count the mean of the two middle ratings.
///
/// # Errors
///
/// Returns [`MovieError::EmptyCollection`] for an empty slice.
pub fn median(movies: &[Movie]) -> Result<f64> {
    if movies.is_empty() {
        return Err(MovieError::EmptyCollection);
    }

    let mut ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
    ratings.sort_by(|a, b| rating_cmp(*a, *b));

    let mid = ratings.len() / 2;
    if ratings.len() % 2 == 0 {
        Ok((ratings[mid - 1] + ratings[mid]) / 2.0)
    } else {
        Ok(ratings[mid])
    }
}

/// All movies sharing the highest rating, in collection order.
pub fn best(movies: &[Movie]) -> Vec<Movie> {
    extremes(movies, Ordering::Greater)
}

/// All movies sharing the lowest rating, in collection order.
pub fn worst(movies: &[Movie]) -> Vec<Movie> {
    extremes(movies, Ordering::Less)
}

fn extremes(movies: &[Movie], wanted: Ordering) -> Vec<Movie> {
    let Some(target) = movies
        .iter()
        .map(|m| m.rating)
        .reduce(|acc, r| if rating_cmp(r, acc) == wanted { r } else { acc })
    else {
        return Vec::new();
    };

    movies
        .iter()
        .filter(|m| rating_cmp(m.rating, target) == Ordering::Equal)
        .cloned()
        .collect()
}

/// Picks one movie uniformly at random.
///
/// # Arguments
///
/// * `movies` - The collection to pick from
/// * `rng` - Source of randomness, seeded in tests for repeatable picks
///
/// # Errors
///
/// Returns [`MovieError::EmptyCollection`] for an empty slice.
///
/// # Example
///
/// ```
/// use moviedb::{query::random_pick, types::Movie};
///
/// let movies = vec![Movie::new("Heat", 1995, 8.3, None)?];
/// let picked = random_pick(&movies, &mut rand::rng())?;
/// assert_eq!(picked.title, "Heat");
/// # Ok::<(), moviedb::MovieError>(())
/// ```
pub fn random_pick<R: Rng + ?Sized>(movies: &[Movie], rng: &mut R) -> Result<Movie> {
    movies
        .choose(rng)
        .cloned()
        .ok_or(MovieError::EmptyCollection)
}

/// Movies whose title contains `needle`, in collection order.
///
/// # Arguments
///
/// * `movies` - The collection to search
/// * `needle` - Text to look for; surrounding whitespace is ignored and an
///   empty needle matches every movie
/// * `case_insensitive` - Whether `matrix` should find `The Matrix`
pub fn search_by_title(movies: &[Movie], needle: &str, case_insensitive: bool) -> Vec<Movie> {
    let needle = needle.trim();
    if case_insensitive {
        let needle = needle.to_lowercase();
        movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    } else {
        movies
            .iter()
            .filter(|m| m.title.contains(needle))
            .cloned()
            .collect()
    }
}

/// Copy of the collection ordered by rating. Equal ratings keep their
/// collection order.
pub fn sort_by_rating(movies: &[Movie], order: SortOrder) -> Vec<Movie> {
    sorted_by(movies, order, |a, b| rating_cmp(a.rating, b.rating))
}

/// Copy of the collection ordered by release year. Equal years keep their
/// collection order.
pub fn sort_by_year(movies: &[Movie], order: SortOrder) -> Vec<Movie> {
    sorted_by(movies, order, |a, b| a.year.cmp(&b.year))
}

// Total order over ratings in which `-0.0` and `0.0` are equal.
fn rating_cmp(a: f64, b: f64) -> Ordering {
    (a + 0.0).total_cmp(&(b + 0.0))
}

// `sort_by` is stable; flipping the comparator instead of reversing the
// result keeps equal movies in their original order for both directions.
fn sorted_by<F>(movies: &[Movie], order: SortOrder, cmp: F) -> Vec<Movie>
where
    F: Fn(&Movie, &Movie) -> Ordering,
{
    let mut sorted = movies.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| cmp(a, b)),
        SortOrder::Descending => sorted.sort_by(|a, b| cmp(b, a)),
    }
    sorted
}

/// Movies matching every bound of `filter`. Bounds are inclusive and an
/// unset bound matches everything.
///
/// # Example
///
/// ```
/// use moviedb::{query::filter, types::{Movie, MovieFilter}};
///
/// let movies = vec![
///     Movie::new("Five", 2000, 5.0, None)?,
///     Movie::new("Eight", 2001, 8.0, None)?,
/// ];
/// let good = MovieFilter { min_rating: Some(8.0), ..Default::default() };
/// assert_eq!(filter(&movies, &good).len(), 1);
/// # Ok::<(), moviedb::MovieError>(())
/// ```
pub fn filter(movies: &[Movie], filter: &MovieFilter) -> Vec<Movie> {
    movies.iter().filter(|m| filter.matches(m)).cloned().collect()
}

/// Bundles count, average, median, best and worst movies.
///
/// # Errors
///
/// Returns [`MovieError::EmptyCollection`] for an empty slice.
pub fn stats(movies: &[Movie]) -> Result<CollectionStats> {
    Ok(CollectionStats {
        count: movies.len(),
        average: average(movies)?,
        median: median(movies)?,
        best: best(movies),
        worst: worst(movies),
    })
}
