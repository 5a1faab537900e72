//! The interactive numbered menu.
//!
//! Each entry gathers its arguments through a [`Prompter`] and then calls the
//! same command functions the subcommands use. A failed command is reported
//! and the menu comes back; only closing the input or choosing `0` ends it.

use std::io::{self, BufRead, Write};

use super::{Prompter, SortKey, app_label, print_details, report, with_spinner};
use crate::{
    Result,
    app::MovieApp,
    config::Config,
    info,
    omdb::OmdbClient,
    success,
    types::{MAX_RATING, MIN_RATING, MIN_YEAR, Movie, MovieFilter, SortOrder, max_year},
    warning,
};

const MENU: [&str; 13] = [
    "Exit",
    "List movies",
    "Add movie",
    "Delete movie",
    "Update movie",
    "Stats",
    "Random movie",
    "Search movie",
    "Movies sorted by rating",
    "Generate website",
    "Movies sorted by year",
    "Filter movies",
    "Search movie on OMDb",
];

/// Runs the menu until the user exits or the input is closed.
pub fn run<R: BufRead, W: Write>(
    app: &mut MovieApp,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    prompter.say("********** My Movies Database **********")?;
    info!("Using {}", app_label(app));
    if app.has_lookup() {
        info!("OMDb API integration enabled");
    }

    loop {
        prompter.say("")?;
        prompter.say("Menu:")?;
        for (number, label) in MENU.iter().enumerate() {
            prompter.say(format!("{number}. {label}"))?;
        }
        prompter.say("")?;

        let choice = match read_choice(prompter) {
            Ok(choice) => choice,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        };
        let Some(choice) = choice else {
            warning!("Invalid choice");
            continue;
        };
        if choice == 0 {
            break;
        }

        prompter.say("")?;
        match dispatch(choice, app, config, prompter) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => report(&e),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
        prompter.say("")?;

        match prompter.ask_line("Press enter to continue ") {
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e),
        }
    }

    prompter.say("Bye!")
}

fn read_choice<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> io::Result<Option<usize>> {
    let answer = prompter.ask_line(&format!("Enter choice (0-{}): ", MENU.len() - 1))?;
    Ok(answer.parse::<usize>().ok().filter(|c| *c < MENU.len()))
}

/// The outer result carries input failures, the inner one the command outcome.
fn dispatch<R: BufRead, W: Write>(
    choice: usize,
    app: &mut MovieApp,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Result<()>> {
    let outcome = match choice {
        1 => super::list(app),
        2 => return add_movie(app, prompter),
        3 => {
            let title = prompter.ask_text(
                "Enter movie name to delete: ",
                "Movie name must not be empty.",
            )?;
            super::delete(app, &title)
        }
        4 => {
            let title = prompter.ask_text(
                "Enter movie name to update: ",
                "Movie name must not be empty.",
            )?;
            let rating = ask_rating(prompter, "Enter new movie rating: ")?;
            super::update(app, &title, rating)
        }
        5 => super::stats(app),
        6 => super::random(app),
        7 => {
            let needle = prompter.ask_line("Enter part of movie name: ")?;
            super::search(app, &needle, true)
        }
        8 => {
            let order = ask_order(prompter, "Do you want the high rated movies first")?;
            super::sort(app, SortKey::Rating, order)
        }
        9 => super::site(app, false),
        10 => {
            let order = ask_order(prompter, "Do you want the latest movies first")?;
            super::sort(app, SortKey::Year, order)
        }
        11 => {
            let filter = MovieFilter {
                min_rating: prompter.ask_optional(
                    "Enter minimum rating",
                    "Invalid input. Please enter a valid rating.",
                )?,
                start_year: prompter.ask_optional(
                    "Enter start year",
                    "Invalid input. Please enter a valid start year.",
                )?,
                end_year: prompter.ask_optional(
                    "Enter end year",
                    "Invalid input. Please enter a valid end year.",
                )?,
            };
            super::filter(app, &filter)
        }
        12 => return search_omdb(app, config, prompter),
        _ => Ok(()),
    };
    Ok(outcome)
}

/// Looks the title up on OMDb when available and falls back to manual entry.
fn add_movie<R: BufRead, W: Write>(
    app: &MovieApp,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Result<()>> {
    let title = prompter.ask_text("Enter movie name: ", "Movie name must not be empty.")?;

    if app.has_lookup() {
        let found = with_spinner(format!("Searching for '{title}' on OMDb..."), || {
            app.lookup(&title)
        });
        match found {
            Ok(Some(details)) => {
                print_details(&details);
                if !prompter.ask_yes_no("Do you want to add this movie to your database")? {
                    return Ok(Ok(()));
                }
                return Ok(super::add(app, details.movie));
            }
            Ok(None) => warning!("No movie found with title '{}'.", title),
            Err(e) => report(&e),
        }

        if !prompter.ask_yes_no("Would you like to add the movie manually")? {
            return Ok(Ok(()));
        }
    }

    let year = prompter.ask_number(
        "Enter movie year: ",
        "Please enter a valid year",
        Some(MIN_YEAR),
        Some(max_year()),
    )?;
    let rating = ask_rating(prompter, "Enter movie rating: ")?;
    let poster: Option<String> =
        prompter.ask_optional("Enter movie poster URL", "Please enter a valid URL")?;

    Ok(Movie::new(title, year, rating, poster).and_then(|movie| super::add(app, movie)))
}

fn search_omdb<R: BufRead, W: Write>(
    app: &mut MovieApp,
    config: &Config,
    prompter: &mut Prompter<R, W>,
) -> io::Result<Result<()>> {
    if !app.has_lookup() {
        let key = prompter.ask_text(
            "Please enter your OMDb API key: ",
            "API key must not be empty.",
        )?;
        match OmdbClient::new(key, config.omdb_url.clone(), config.lookup_timeout) {
            Ok(client) => app.set_lookup(Box::new(client)),
            Err(e) => return Ok(Err(e)),
        }
        success!("OMDb API integration enabled");
    }

    let title = prompter.ask_text(
        "Enter movie title to search: ",
        "Movie title must not be empty.",
    )?;
    let found = with_spinner(format!("Searching for '{title}' on OMDb..."), || {
        app.lookup(&title)
    });

    let details = match found {
        Ok(Some(details)) => details,
        Ok(None) => {
            warning!("No movie found with title '{}'.", title);
            return Ok(Ok(()));
        }
        Err(e) => return Ok(Err(e)),
    };

    print_details(&details);
    if prompter.ask_yes_no("Do you want to add this movie to your database")? {
        return Ok(super::add(app, details.movie));
    }
    Ok(Ok(()))
}

fn ask_rating<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
) -> io::Result<f64> {
    prompter.ask_number(
        prompt,
        "Please enter a valid rating",
        Some(MIN_RATING),
        Some(MAX_RATING),
    )
}

fn ask_order<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    question: &str,
) -> io::Result<SortOrder> {
    Ok(if prompter.ask_yes_no(question)? {
        SortOrder::Descending
    } else {
        SortOrder::Ascending
    })
}
