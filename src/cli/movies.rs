use super::print_movies;
use crate::{Result, app::MovieApp, info, success, types::Movie};

/// Prints every movie along with the total count.
pub fn list(app: &MovieApp) -> Result<()> {
    let movies = app.list()?;
    info!("{} movies in total", movies.len());
    print_movies(&movies);
    Ok(())
}

pub fn add(app: &MovieApp, movie: Movie) -> Result<()> {
    let movie = app.add(movie)?;
    success!("Movie '{}' successfully added", movie.title);
    Ok(())
}

pub fn delete(app: &MovieApp, title: &str) -> Result<()> {
    let movie = app.delete(title)?;
    success!("Movie '{}' successfully deleted", movie.title);
    Ok(())
}

pub fn update(app: &MovieApp, title: &str, rating: f64) -> Result<()> {
    let movie = app.update_rating(title, rating)?;
    success!(
        "Movie '{}' successfully updated, new rating {}",
        movie.title,
        movie.rating
    );
    Ok(())
}
