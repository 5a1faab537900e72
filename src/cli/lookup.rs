use super::with_spinner;
use crate::{Result, app::MovieApp, info, success, types::MovieDetails, warning};

/// Looks a movie up on OMDb and prints it.
///
/// `query` is a title or an IMDb id such as `tt1375666`. With `add` set the
/// movie is stored as well; a query without a match is then an error instead
/// of a warning, so scripts can tell that nothing was added.
///
/// # Errors
///
/// Returns [`crate::MovieError::Lookup`] when no API key is configured or the
/// request fails, and [`crate::MovieError::DuplicateKey`] when adding a movie
/// that is already stored.
pub fn lookup(app: &MovieApp, query: &str, add: bool) -> Result<()> {
    let query = query.trim();
    let message = format!("Searching for '{query}' on OMDb...");

    if add {
        let details = with_spinner(message, || app.add_from_lookup(query))?;
        print_details(&details);
        success!(
            "Movie '{}' successfully added to your database",
            details.movie.title
        );
        return Ok(());
    }

    match with_spinner(message, || app.lookup(query))? {
        Some(details) => print_details(&details),
        None => warning!("No movie found for '{}'.", query),
    }
    Ok(())
}

pub fn print_details(details: &MovieDetails) {
    info!("Movie found:");
    for (label, value) in detail_lines(details) {
        info!("{}: {}", label, value);
    }
}

/// Label and value of every known detail, in display order.
fn detail_lines(details: &MovieDetails) -> Vec<(&'static str, String)> {
    let movie = &details.movie;
    let mut lines = vec![
        ("Title", movie.title.clone()),
        ("Year", movie.year.to_string()),
        ("Rating", movie.rating.to_string()),
    ];
    if let Some(id) = &details.imdb_id {
        lines.push(("IMDb", format!("https://www.imdb.com/title/{id}/")));
    }
    for (label, value) in [
        ("Genre", &details.genre),
        ("Director", &details.director),
        ("Actors", &details.actors),
        ("Plot", &details.plot),
    ] {
        if !value.is_empty() {
            lines.push((label, value.clone()));
        }
    }
    lines
}
