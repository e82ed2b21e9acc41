//! Transform command implementation

use std::path::Path;

use miette::Result;
use tracing::{info, warn};
use typeshade_core::transform_text;

use super::Input;
use crate::cli::Cli;

pub fn run_transform(cli: &Cli, file: &Path, strip_types: bool) -> Result<bool> {
    let input = Input::load(cli, file)?;
    let tree = input.parse(file)?;

    let result = transform_text(&input.source, &tree, &input.config.renames, strip_types);
    if result.skipped > 0 {
        warn!("Skipped {} overlapping edit(s)", result.skipped);
    }
    info!("Applied {} edit(s) to {}", result.applied, file.display());

    print!("{}", result.text);
    if !result.text.ends_with('\n') {
        println!();
    }
    Ok(true)
}
