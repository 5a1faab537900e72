use crate::{Result, app::MovieApp, info, types::Movie};

/// Prints rating statistics of the whole collection.
///
/// Ties are listed in full: when several movies share the best or worst
/// rating, each of them is printed.
pub fn stats(app: &MovieApp) -> Result<()> {
    let stats = app.stats()?;

    info!("Movies: {}", stats.count);
    info!("Average rating: {:.2}", stats.average);
    info!("Median rating: {:.2}", stats.median);
    info!("Best movie(s): {}", describe(&stats.best));
    info!("Worst movie(s): {}", describe(&stats.worst));
    Ok(())
}

pub fn random(app: &MovieApp) -> Result<()> {
    let movie = app.random()?;
    info!(
        "Your movie for tonight: {} ({}), it's rated {}",
        movie.title, movie.year, movie.rating
    );
    Ok(())
}

fn describe(movies: &[Movie]) -> String {
    movies
        .iter()
        .map(|m| format!("{}, {}", m.title, m.rating))
        .collect::<Vec<_>>()
        .join("; ")
}
