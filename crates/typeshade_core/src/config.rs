//! typeshade configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use typeshade_parser::{CompilerOptions, Language};

use crate::CoreError;
use crate::transform::RenameMap;

/// Configuration file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &[".typeshade.jsonc", ".typeshade.json"];

/// Style tag applied to erasure ranges unless configured otherwise.
pub const DEFAULT_STYLE: &str = "highlight-error";

/// Settings shared by the typeshade pipelines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShadeConfig {
    /// Decoration style of every highlighted range.
    #[serde(default = "default_style")]
    pub style: String,

    /// Source language; when absent the file extension decides.
    #[serde(default)]
    pub language: Option<Language>,

    /// Identifier renames used by the transform pipeline.
    #[serde(default)]
    pub renames: RenameMap,
}

fn default_style() -> String {
    DEFAULT_STYLE.to_string()
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            style: default_style(),
            language: None,
            renames: RenameMap::default(),
        }
    }
}

impl ShadeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let config = Self::from_json(&content)?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parses configuration from JSON, allowing comments and trailing commas.
    pub fn from_json(json: &str) -> Result<Self, CoreError> {
        let value = jsonc_parser::parse_to_serde_value(json, &Default::default())
            .map_err(|e| CoreError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or(serde_json::Value::Object(serde_json::Map::new()));

        serde_json::from_value(value)
            .map_err(|e| CoreError::config(format!("Invalid config: {}", e)))
    }

    /// Finds a configuration file in `dir` or one of its ancestors.
    pub fn discover(dir: impl AsRef<Path>) -> Option<PathBuf> {
        dir.as_ref().ancestors().find_map(|candidate| {
            CONFIG_FILES
                .iter()
                .map(|name| candidate.join(name))
                .find(|path| path.is_file())
        })
    }

    /// Compiler options for `path`, honouring a configured language.
    pub fn compiler_options(&self, path: impl AsRef<Path>) -> CompilerOptions {
        match self.language {
            Some(language) => CompilerOptions { language },
            None => CompilerOptions::for_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = ShadeConfig::default();
        assert_eq!(config.style, "highlight-error");
        assert_eq!(config.language, None);
        assert_eq!(config.renames, RenameMap::default());
    }

    #[test]
    fn test_config_from_jsonc() {
        let json = r#"{
            // editor class
            "style": "erased",
            "language": "tsx",
            "renames": { "foo": "bar", },
        }"#;

        let config = ShadeConfig::from_json(json).unwrap();
        assert_eq!(config.style, "erased");
        assert_eq!(config.language, Some(Language::Tsx));
        assert_eq!(config.renames.get("foo"), Some("bar"));
        assert_eq!(config.renames.get("babel"), None);
    }

    #[test]
    fn test_config_empty_document() {
        let config = ShadeConfig::from_json("").unwrap();
        assert_eq!(config, ShadeConfig::default());
    }

    #[rstest]
    #[case::unknown_field(r#"{ "styles": "x" }"#, "Invalid config")]
    #[case::type_mismatch(r#"{ "style": 3 }"#, "Invalid config")]
    #[case::bad_language(r#"{ "language": "coffee" }"#, "Invalid config")]
    #[case::syntax(r#"{ "style": "#, "Invalid JSON")]
    fn test_config_errors(#[case] json: &str, #[case] expected: &str) {
        let err = ShadeConfig::from_json(json).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
        assert!(
            err.to_string().contains(expected),
            "expected '{}' in '{}'",
            expected,
            err
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".typeshade.json");
        fs::write(&path, r#"{ "style": "dim" }"#).unwrap();

        let config = ShadeConfig::from_file(&path).unwrap();
        assert_eq!(config.style, "dim");
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempdir().unwrap();

        let err = ShadeConfig::from_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, CoreError::Io(_)));
        assert!(err.to_string().starts_with("Failed to read config"));
    }

    #[test]
    fn test_discover_walks_up() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("src").join("lib");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join(".typeshade.jsonc"), "{}").unwrap();

        let found = ShadeConfig::discover(&nested).unwrap();
        assert_eq!(found, dir.path().join(".typeshade.jsonc"));
    }

    #[test]
    fn test_discover_prefers_jsonc() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(".typeshade.json"), "{}").unwrap();
        fs::write(dir.path().join(".typeshade.jsonc"), "{}").unwrap();

        let found = ShadeConfig::discover(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), ".typeshade.jsonc");
    }

    #[test]
    fn test_compiler_options_prefers_configured_language() {
        let mut config = ShadeConfig::default();
        assert_eq!(config.compiler_options("a.jsx").language, Language::Jsx);

        config.language = Some(Language::Ts);
        assert_eq!(config.compiler_options("a.jsx").language, Language::Ts);
    }
}
