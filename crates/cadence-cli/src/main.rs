//! Cadence CLI application.
//!
//! Command-line interface for the Cadence weekly planning board.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use cadence_core::BoardBuilder;
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let board = BoardBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize board")?;

    let renderer = TerminalRenderer::new(!no_color);
    let cli = Cli::new(board, renderer);

    info!("Cadence started");

    match command {
        Some(Commands::Board) | None => cli.show_board().await,
        Some(Commands::Plan { command }) => cli.handle_plan_command(command).await,
        Some(Commands::Template { command }) => cli.handle_template_command(command).await,
        Some(Commands::Task { command }) => cli.handle_task_command(command).await,
        Some(Commands::Adhoc { command }) => cli.handle_adhoc_command(command).await,
    }
}
