mod clipboard;
mod commands;
mod config;
mod edit_controller;
mod errors;
mod export;
mod grid;
mod grid_controller;
mod growth;
mod history;
mod logging;
mod mode_controllers;
mod navigation;
mod prompt_controller;
mod recognition;
mod select_controller;
mod view;

use clap::Parser;
use config::RcLoader;
use grid_controller::GridController;
use recognition::{FileWordSource, WordSource};
use std::path::PathBuf;
use tracing::info;

/// Terminal grid editor for transcribing recognized words into a table.
#[derive(Parser)]
#[command(name = "wordgrid", version, about)]
struct Args {
    /// Text file of recognized words to feed into the grid (Ctrl+W inserts
    /// the next one)
    #[arg(short, long)]
    words: Option<PathBuf>,

    /// Initial row count, overriding the rc file
    #[arg(long)]
    rows: Option<usize>,

    /// Initial column count, overriding the rc file
    #[arg(long)]
    cols: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init();

    let mut config = RcLoader::load_config();
    if let Some(rows) = args.rows {
        config.rows = rows.max(1);
    }
    if let Some(cols) = args.cols {
        config.cols = cols.max(1);
    }
    info!(
        "Starting with a {}x{} grid, nav mode '{}'",
        config.rows,
        config.cols,
        config.nav_mode.name()
    );

    let word_source: Option<Box<dyn WordSource>> = match &args.words {
        Some(path) => Some(Box::new(FileWordSource::from_path(path)?)),
        None => None,
    };

    let mut controller = GridController::new(&config, word_source);
    controller.run()
}
