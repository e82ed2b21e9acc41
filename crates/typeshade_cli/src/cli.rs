//! CLI argument definitions

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// typeshade - see what TypeScript erases
#[derive(Parser)]
#[command(name = "typeshade")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Highlight the constructs erased when compiling to JavaScript
    Highlight {
        /// Source file
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Run a selector query against the syntax tree
    Query {
        /// Source file
        file: PathBuf,

        /// Selector, e.g. `FunctionDeclaration > Block Identifier[name=foo]`
        selector: String,
    },

    /// List top-level function declarations
    Functions {
        /// Source file
        file: PathBuf,
    },

    /// Rename identifiers and print the resulting source
    Transform {
        /// Source file
        file: PathBuf,

        /// Also remove every erased construct
        #[arg(long)]
        strip_types: bool,
    },

    /// Print the syntax tree
    Tree {
        /// Source file
        file: PathBuf,

        /// Print JSON instead of the indented outline
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
