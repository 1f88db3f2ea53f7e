//! Binary entry point: bring up logging, load the bundled catalog, pick the
//! initial theme from the terminal, and drive the Ratatui event loop.
use anyhow::Context;
use book_connect::{detect_system_theme, init_logging, run_app, App, Catalog, ViewController};

fn main() -> anyhow::Result<()> {
    let _guard = init_logging().context("failed to initialize logging")?;

    let catalog = Catalog::builtin().context("failed to load the built-in catalog")?;
    let theme = detect_system_theme();
    tracing::info!(theme = %theme, books = catalog.books().len(), "starting");

    let mut app = App::new(ViewController::new(catalog, theme));
    run_app(&mut app)
}
