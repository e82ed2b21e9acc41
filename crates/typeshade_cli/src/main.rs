//! typeshade CLI
//!
//! Highlights, queries and transforms TypeScript syntax trees.

use std::process::ExitCode;

use clap::Parser;
use miette::Result;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}

/// Runs the selected command; `Ok(false)` means it finished with a
/// user-facing failure that was already reported.
fn run(cli: &Cli) -> Result<bool> {
    match &cli.command {
        Commands::Highlight { file, format } => commands::highlight::run_highlight(cli, file, *format),
        Commands::Query { file, selector } => commands::query::run_query(cli, file, selector),
        Commands::Functions { file } => commands::functions::run_functions(cli, file),
        Commands::Transform { file, strip_types } => {
            commands::transform::run_transform(cli, file, *strip_types)
        }
        Commands::Tree { file, json } => commands::tree::run_tree(cli, file, *json),
    }
}
