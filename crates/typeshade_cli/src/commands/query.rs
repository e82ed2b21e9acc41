//! Query command implementation

use std::path::Path;

use miette::Result;
use typeshade_ast::print_tree;
use typeshade_core::{QueryOutcome, QueryPanel};

use super::Input;
use crate::cli::Cli;

pub fn run_query(cli: &Cli, file: &Path, selector: &str) -> Result<bool> {
    let input = Input::load(cli, file)?;
    let tree = input.parse(file)?;

    let mut panel = QueryPanel::new();
    let outcome = panel.submit(&tree, selector);
    println!("{}", outcome.summary());

    match outcome {
        QueryOutcome::Matched(ids) => {
            for &id in ids {
                print!("{}", print_tree(&tree, id));
            }
            Ok(true)
        }
        QueryOutcome::Failed { .. } => Ok(false),
    }
}
