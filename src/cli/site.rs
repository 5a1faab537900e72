use crate::{Result, app::MovieApp, info, success, warning};

/// Generates the static page and optionally opens it in the default browser.
pub fn site(app: &MovieApp, open: bool) -> Result<()> {
    let index = app.generate_site()?;
    success!("Website generated successfully!");
    info!("HTML file: {}", index.display());

    if open {
        if let Err(e) = webbrowser::open(&index.to_string_lossy()) {
            warning!("Cannot open browser. Err: {}", e);
        }
    } else {
        info!("Open the HTML file in your web browser to view your movie collection.");
    }
    Ok(())
}
