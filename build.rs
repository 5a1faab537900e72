//! Build script for moviedb.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory so it sits next to the movie files the application uses.
//!
//! Destination:
//! - Linux: `~/.local/share/moviedb/.env.example`
//! - macOS: `~/Library/Application Support/moviedb/.env.example`
//! - Windows: `%LOCALAPPDATA%/moviedb/.env.example`
//!
//! A missing template only produces a cargo warning. Failing to create the
//! directory or write the file fails the build.
use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into the moviedb data directory.
///
/// # Build Process
///
/// 1. Registers `.env.example` and `templates` as rebuild triggers
/// 2. Resolves the crate root from `CARGO_MANIFEST_DIR`
/// 3. Creates `<data_local_dir>/moviedb` if needed
/// 4. Copies the template, or emits a cargo warning when it is missing
///
/// # Errors
///
/// Fails the build when `CARGO_MANIFEST_DIR` is unset or the data directory
/// or target file cannot be written.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");
    println!("cargo:rerun-if-changed=templates");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("moviedb");
    fs::create_dir_all(&out_dir)?;

    if env_example_path.is_file() {
        let contents = fs::read_to_string(&env_example_path)?;
        fs::write(out_dir.join(".env.example"), contents)?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
    }

    Ok(())
}
