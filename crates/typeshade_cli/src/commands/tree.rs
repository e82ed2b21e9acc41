//! Tree command implementation

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use typeshade_ast::print_tree;

use super::Input;
use crate::cli::Cli;

pub fn run_tree(cli: &Cli, file: &Path, json: bool) -> Result<bool> {
    let input = Input::load(cli, file)?;
    let tree = input.parse(file)?;

    if json {
        let output = serde_json::to_string_pretty(&tree).into_diagnostic()?;
        println!("{}", output);
    } else {
        print!("{}", print_tree(&tree, tree.root()));
    }
    Ok(true)
}
