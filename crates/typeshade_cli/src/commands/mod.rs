//! Command implementations

pub mod functions;
pub mod highlight;
pub mod query;
pub mod transform;
pub mod tree;

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, Result, WrapErr, miette};
use tracing::{debug, info};
use typeshade_ast::SyntaxTree;
use typeshade_core::ShadeConfig;
use typeshade_parser::{CompilerOptions, Parser, TypeScriptParser};

use crate::cli::Cli;

/// A source file read from disk together with the settings that apply to it.
pub struct Input {
    pub config: ShadeConfig,
    pub source: String,
    pub options: CompilerOptions,
}

impl Input {
    /// Reads `file` and resolves its configuration.
    pub fn load(cli: &Cli, file: &Path) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => ShadeConfig::from_file(path).into_diagnostic()?,
            None => find_config()?,
        };
        let source = fs::read_to_string(file)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read {}", file.display()))?;
        let options = config.compiler_options(file);
        debug!(file = %file.display(), language = ?options.language, "Loaded source");

        Ok(Self {
            config,
            source,
            options,
        })
    }

    /// Parses the source, reporting failures against `file`.
    pub fn parse(&self, file: &Path) -> Result<SyntaxTree> {
        TypeScriptParser::new()
            .parse(&self.source, &self.options)
            .map_err(|e| miette!("Failed to parse {}: {}", file.display(), e))
    }
}

pub fn find_config() -> Result<ShadeConfig> {
    if let Some(path) = ShadeConfig::discover(".") {
        info!("Using config: {}", path.display());
        return ShadeConfig::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(ShadeConfig::new())
}
