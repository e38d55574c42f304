//! Leadflow CLI — pipeline management from the terminal.
//!
//! Inspect the board, move leads between stages, and manage configuration
//! without entering the interactive console.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
