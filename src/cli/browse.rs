use super::{SortKey, print_movies};
use crate::{
    Result,
    app::MovieApp,
    info,
    types::{MovieFilter, SortOrder},
};

pub fn search(app: &MovieApp, needle: &str, case_insensitive: bool) -> Result<()> {
    let movies = app.search(needle, case_insensitive)?;
    if movies.is_empty() {
        info!("No movies found matching '{}'", needle.trim());
        return Ok(());
    }

    info!("Found {} matching movies:", movies.len());
    print_movies(&movies);
    Ok(())
}

pub fn sort(app: &MovieApp, key: SortKey, order: SortOrder) -> Result<()> {
    let (movies, order_text) = match key {
        SortKey::Rating => (
            app.sort_by_rating(order)?,
            if order.is_descending() { "descending" } else { "ascending" },
        ),
        SortKey::Year => (
            app.sort_by_year(order)?,
            if order.is_descending() { "newest first" } else { "oldest first" },
        ),
    };

    info!(
        "Movies sorted by {} ({}):",
        match key {
            SortKey::Rating => "rating",
            SortKey::Year => "year",
        },
        order_text
    );
    print_movies(&movies);
    Ok(())
}

pub fn filter(app: &MovieApp, filter: &MovieFilter) -> Result<()> {
    let movies = app.filter(filter)?;
    info!("Filtered movies ({}):", filter.describe());
    print_movies(&movies);
    Ok(())
}
