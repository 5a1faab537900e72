//! Static HTML page of the collection.
//!
//! The page is produced from a template containing `${TITLE}` and
//! `${MOVIE_GRID}` placeholders and a stylesheet. Both are looked up in the
//! template directory; missing files are seeded from the built-in defaults
//! before rendering so users can customise them afterwards.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    error::{MovieError, Result},
    types::Movie,
};

pub const TEMPLATE_FILE: &str = "movie_template.html";
pub const STYLE_FILE: &str = "style.css";
pub const INDEX_FILE: &str = "index.html";
pub const PAGE_TITLE: &str = "My Movie Collection";
pub const PLACEHOLDER_POSTER: &str = "https://via.placeholder.com/300x450.png?text=No+Poster";

const DEFAULT_TEMPLATE: &str = include_str!("../templates/movie_template.html");
const DEFAULT_STYLE: &str = include_str!("../templates/style.css");

/// Turns a collection into a browsable page.
pub trait SiteRenderer {
    /// Renders `movies` and returns the path of the generated entry page.
    fn render(&self, movies: &[Movie]) -> Result<PathBuf>;
}

/// Renders `index.html` and `style.css` into `output_dir`.
pub struct TemplateSite {
    template_dir: PathBuf,
    output_dir: PathBuf,
}

impl TemplateSite {
    pub fn new(template_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            template_dir: template_dir.into(),
            output_dir: output_dir.into(),
        }
    }

    fn read_or_seed(&self, name: &str, default: &str) -> Result<String> {
        let path = self.template_dir.join(name);
        if !path.is_file() {
            fs::create_dir_all(&self.template_dir).map_err(|e| site_err(&self.template_dir, e))?;
            fs::write(&path, default).map_err(|e| site_err(&path, e))?;
        }
        fs::read_to_string(&path).map_err(|e| site_err(&path, e))
    }
}

impl SiteRenderer for TemplateSite {
    fn render(&self, movies: &[Movie]) -> Result<PathBuf> {
        let template = self.read_or_seed(TEMPLATE_FILE, DEFAULT_TEMPLATE)?;
        let style = self.read_or_seed(STYLE_FILE, DEFAULT_STYLE)?;

        fs::create_dir_all(&self.output_dir).map_err(|e| site_err(&self.output_dir, e))?;

        let index = self.output_dir.join(INDEX_FILE);
        fs::write(&index, render_page(&template, movies)).map_err(|e| site_err(&index, e))?;

        let css = self.output_dir.join(STYLE_FILE);
        fs::write(&css, style).map_err(|e| site_err(&css, e))?;

        Ok(index)
    }
}

fn site_err(path: &Path, err: std::io::Error) -> MovieError {
    MovieError::Site(format!("{}: {err}", path.display()))
}

pub fn render_page(template: &str, movies: &[Movie]) -> String {
    let grid: String = movies.iter().map(movie_card).collect();
    template
        .replace("${TITLE}", PAGE_TITLE)
        .replace("${MOVIE_GRID}", &grid)
}

fn movie_card(movie: &Movie) -> String {
    let poster = movie.poster_url.as_deref().unwrap_or(PLACEHOLDER_POSTER);
    let title = escape_html(&movie.title);
    format!(
        r#"
        <div class="movie-card">
            <img src="{poster}" alt="{title} poster" class="movie-poster">
            <div class="movie-info">
                <div class="movie-title">{title}</div>
                <div class="movie-details">{year}</div>
                <div class="movie-rating">⭐ {rating:.1}/10</div>
            </div>
        </div>
"#,
        poster = escape_html(poster),
        year = movie.year,
        rating = movie.rating,
    )
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(title: &str, poster: Option<&str>) -> Movie {
        Movie::new(title, 1999, 8.7, poster.map(str::to_string)).unwrap()
    }

    #[test]
    fn escapes_markup_in_titles() {
        assert_eq!(
            escape_html(r#"Tom & Jerry <"1">"#),
            "Tom &amp; Jerry &lt;&quot;1&quot;&gt;"
        );
    }

    #[test]
    fn render_page_fills_placeholders() {
        let page = render_page(
            "<h1>${TITLE}</h1>${MOVIE_GRID}",
            &[movie("The Matrix", None), movie("Heat", Some("https://x/heat.jpg"))],
        );

        assert!(page.starts_with(&format!("<h1>{PAGE_TITLE}</h1>")));
        assert!(page.contains("The Matrix"));
        assert!(page.contains(PLACEHOLDER_POSTER));
        assert!(page.contains("https://x/heat.jpg"));
        assert!(page.contains("8.7/10"));
        assert!(!page.contains("${MOVIE_GRID}"));
    }

    #[test]
    fn render_seeds_templates_and_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let site = TemplateSite::new(dir.path().join("templates"), dir.path().join("out"));

        let index = site.render(&[movie("Alien", None)]).unwrap();

        assert_eq!(index, dir.path().join("out").join(INDEX_FILE));
        assert!(dir.path().join("templates").join(TEMPLATE_FILE).is_file());
        assert!(dir.path().join("out").join(STYLE_FILE).is_file());
        assert!(fs::read_to_string(index).unwrap().contains("Alien"));
    }

    #[test]
    fn render_reports_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "not a directory").unwrap();
        let site = TemplateSite::new(dir.path().join("templates"), blocker.join("out"));

        assert!(matches!(
            site.render(&[movie("Alien", None)]),
            Err(MovieError::Site(_))
        ));
    }
}
