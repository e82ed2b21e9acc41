//! Compiler options handed to the parse oracle.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Source language dialect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ts,
    Tsx,
    Js,
    Jsx,
}

impl Language {
    /// Maps a file extension (without the dot) to a dialect.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "ts" | "mts" | "cts" => Some(Self::Ts),
            "tsx" => Some(Self::Tsx),
            "js" | "mjs" | "cjs" => Some(Self::Js),
            "jsx" => Some(Self::Jsx),
            _ => None,
        }
    }
}

/// Options that affect how source text is parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Dialect to parse.
    pub language: Language,
}

impl CompilerOptions {
    /// Creates options for `language`.
    pub const fn new(language: Language) -> Self {
        Self { language }
    }

    /// Derives options from a file path, falling back to TypeScript.
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        let language = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
            .unwrap_or_default();
        Self { language }
    }
}
