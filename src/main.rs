use std::{io, path::PathBuf};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use moviedb::{
    app::MovieApp,
    cli::{self, Prompter, SortKey},
    config::{self, Config},
    error,
    storage::StorageKind,
    types::{Movie, MovieFilter, SortOrder},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Storage backend (csv or json)
    #[clap(long, global = true, env = "MOVIEDB_STORAGE", default_value = "csv")]
    storage: StorageKind,

    /// Movie file, defaults to movies.<csv|json> in the data directory
    #[clap(long, global = true, env = "MOVIEDB_FILE")]
    file: Option<PathBuf>,

    /// Field delimiter of CSV files: one ASCII character or "tab"
    #[clap(
        long,
        global = true,
        env = "MOVIEDB_CSV_DELIMITER",
        value_parser = config::parse_delimiter
    )]
    delimiter: Option<u8>,

    /// OMDb API key used to look movies up
    #[clap(long, global = true, env = "OMDB_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OMDb API base URL
    #[clap(long, global = true, env = "OMDB_API_URL", hide = true)]
    omdb_url: Option<String>,

    /// OMDb request timeout in seconds
    #[clap(long, global = true, env = "OMDB_TIMEOUT_SECS", hide = true)]
    timeout: Option<u64>,

    /// Output directory of the generated website
    #[clap(long, global = true, env = "MOVIEDB_SITE_DIR")]
    site_dir: Option<PathBuf>,

    #[clap(subcommand)]
    command: Option<Command>,
}

impl Cli {
    fn config(&self) -> Config {
        Config::for_storage(self.storage)
            .with_data_file(self.file.clone())
            .with_csv_delimiter(self.delimiter)
            .with_api_key(self.api_key.clone())
            .with_omdb_url(self.omdb_url.clone())
            .with_lookup_timeout(self.timeout)
            .with_site_dir(self.site_dir.clone())
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Interactive menu (default when no command is given)
    Menu,

    /// List all movies
    List,

    /// Add a movie
    Add(AddOptions),

    /// Delete a movie by title
    Delete {
        title: String,
    },

    /// Update the rating of a movie
    Update {
        title: String,
        rating: f64,
    },

    /// Rating statistics
    Stats,

    /// Pick a random movie
    Random,

    /// Search movies by part of their title
    Search(SearchOptions),

    /// Movies sorted by rating or year
    Sort(SortOptions),

    /// Movies within rating and year bounds
    Filter(FilterOptions),

    #[clap(about = "Generate a static website of the collection")]
    Site(SiteOptions),

    /// Look a movie up on OMDb by title or IMDb id
    Lookup(LookupOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AddOptions {
    #[clap(long)]
    title: String,
    #[clap(long)]
    year: i32,
    #[clap(long)]
    rating: f64,
    #[clap(long)]
    poster: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    text: String,
    /// Match upper and lower case exactly
    #[clap(long)]
    case_sensitive: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SortOptions {
    #[clap(long, value_enum, default_value_t = SortKey::Rating)]
    by: SortKey,
    /// Lowest rating / oldest movie first
    #[clap(long)]
    ascending: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct FilterOptions {
    #[clap(long)]
    min_rating: Option<f64>,
    #[clap(long)]
    start_year: Option<i32>,
    #[clap(long)]
    end_year: Option<i32>,
}

#[derive(Parser, Debug, Clone)]
pub struct SiteOptions {
    /// Open the generated page in the default browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LookupOptions {
    query: String,
    /// Store the movie when found
    #[clap(long)]
    add: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn main() {
    if let Err(e) = config::load_env() {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    let config = cli.config();

    let mut app = match MovieApp::from_config(config.clone()) {
        Ok(app) => app,
        Err(e) => error!("Cannot start moviedb. Err: {}", e),
    };

    let result = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => {
            let stdin = io::stdin();
            let mut prompter = Prompter::new(stdin.lock(), io::stdout());
            if let Err(e) = cli::menu::run(&mut app, &config, &mut prompter) {
                error!("Menu stopped unexpectedly. Err: {}", e);
            }
            Ok(())
        }
        Command::List => cli::list(&app),
        Command::Add(opt) => Movie::new(opt.title, opt.year, opt.rating, opt.poster)
            .and_then(|movie| cli::add(&app, movie)),
        Command::Delete { title } => cli::delete(&app, &title),
        Command::Update { title, rating } => cli::update(&app, &title, rating),
        Command::Stats => cli::stats(&app),
        Command::Random => cli::random(&app),
        Command::Search(opt) => cli::search(&app, &opt.text, !opt.case_sensitive),
        Command::Sort(opt) => {
            let order = if opt.ascending {
                SortOrder::Ascending
            } else {
                SortOrder::Descending
            };
            cli::sort(&app, opt.by, order)
        }
        Command::Filter(opt) => cli::filter(
            &app,
            &MovieFilter {
                min_rating: opt.min_rating,
                start_year: opt.start_year,
                end_year: opt.end_year,
            },
        ),
        Command::Site(opt) => cli::site(&app, opt.open),
        Command::Lookup(opt) => cli::lookup(&app, &opt.query, opt.add),
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        cli::report(&e);
        std::process::exit(1);
    }
}
