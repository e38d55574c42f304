//! Leadflow TUI — the interactive business console.
//!
//! Provides the drag-and-drop pipeline board plus list screens for leads,
//! documents, training courses, and team profiles, built with `ratatui` +
//! `crossterm`.

mod app;
mod screens;
mod widgets;

use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;

    // The event loop is synchronous; stage transitions spawn their sync
    // tasks onto this runtime's workers while the loop keeps polling input.
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    app::run()
}
