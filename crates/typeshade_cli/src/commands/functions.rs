//! Functions command implementation

use std::path::Path;

use miette::Result;
use typeshade_ast::print_tree;
use typeshade_core::top_level_functions;

use super::Input;
use crate::cli::Cli;

pub fn run_functions(cli: &Cli, file: &Path) -> Result<bool> {
    let input = Input::load(cli, file)?;
    let tree = input.parse(file)?;

    let functions = top_level_functions(&tree);
    if functions.is_empty() {
        println!("No top-level functions");
    }
    for function in functions {
        println!("{}", function.name.as_deref().unwrap_or("<anonymous>"));
        print!("{}", print_tree(&tree, function.id));
    }
    Ok(true)
}
