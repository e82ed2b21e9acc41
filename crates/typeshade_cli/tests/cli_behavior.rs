//! Integration tests for CLI behavior
//!
//! These tests verify the external behavior of the CLI tool,
//! following behavior-driven testing principles.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

/// Helper to create a command for the typeshade CLI
fn typeshade_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_typeshade"))
}

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

mod help_command {
    use super::*;

    #[test]
    fn shows_help_with_flag() {
        typeshade_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("Usage:"));
    }

    #[test]
    fn shows_version_with_flag() {
        typeshade_cmd()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn fails_without_subcommand() {
        typeshade_cmd().assert().failure();
    }
}

mod highlight_command {
    use super::*;

    #[test]
    fn lists_erased_ranges_as_text() {
        typeshade_cmd()
            .arg("highlight")
            .arg(fixture("sample.ts"))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("1:1-"))
            .stdout(predicate::str::contains("highlight-error"))
            .stdout(predicate::str::contains("   4 | interface Plugin {"))
            .stdout(predicate::str::contains("^^^^^^^^^"));
    }

    #[test]
    fn emits_json_ranges() {
        let output = typeshade_cmd()
            .arg("highlight")
            .arg(fixture("sample.ts"))
            .args(["--format", "json"])
            .output()
            .unwrap();

        assert!(output.status.success());
        let ranges: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let ranges = ranges.as_array().unwrap();
        assert!(ranges.len() >= 3);
        assert_eq!(ranges[0]["start"]["line"], 0);
        assert_eq!(ranges[0]["start"]["column"], 0);
        assert_eq!(ranges[0]["style"], "highlight-error");
    }

    #[test]
    fn reports_nothing_for_plain_javascript() {
        typeshade_cmd()
            .arg("highlight")
            .arg(fixture("plain.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("Nothing is erased"));
    }

    #[test]
    fn uses_style_from_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = temp.child(".typeshade.jsonc");
        config
            .write_str("{\n  // editor class\n  \"style\": \"dimmed\",\n}")
            .unwrap();
        let source = temp.child("types.ts");
        source.write_str("type Id = string;\n").unwrap();

        typeshade_cmd()
            .arg("--config")
            .arg(config.path())
            .arg("highlight")
            .arg(source.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("1:1-1:").and(predicate::str::contains(" dimmed")));
    }

    #[test]
    fn fails_on_parse_error_without_output() {
        typeshade_cmd()
            .arg("highlight")
            .arg(fixture("broken.ts"))
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Failed to parse"));
    }

    #[test]
    fn fails_on_missing_file() {
        typeshade_cmd()
            .arg("highlight")
            .arg("does-not-exist.ts")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read"));
    }

    #[test]
    fn fails_on_invalid_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = temp.child("bad.json");
        config.write_str(r#"{ "colour": "red" }"#).unwrap();

        typeshade_cmd()
            .arg("--config")
            .arg(config.path())
            .arg("highlight")
            .arg(fixture("sample.ts"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid config"));
    }
}

mod query_command {
    use super::*;

    #[test]
    fn prints_match_count_and_trees() {
        typeshade_cmd()
            .arg("query")
            .arg(fixture("sample.ts"))
            .arg("FunctionDeclaration")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Got 2 result(s)"))
            .stdout(predicate::str::contains("FunctionDeclaration ["))
            .stdout(predicate::str::contains("compile"));
    }

    #[test]
    fn supports_attribute_selectors() {
        typeshade_cmd()
            .arg("query")
            .arg(fixture("sample.ts"))
            .arg("ImportDeclaration[typeOnly]")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("Got 1 result(s)"))
            .stdout(predicate::str::contains("type-only"));
    }

    #[test]
    fn reports_malformed_selector() {
        typeshade_cmd()
            .arg("query")
            .arg(fixture("sample.ts"))
            .arg("Identifier[name=babel")
            .assert()
            .failure()
            .code(1)
            .stdout(predicate::str::starts_with("Query failed"))
            .stdout(predicate::str::contains("Unbalanced bracket at offset 10"));
    }

    #[test]
    fn reports_unknown_kind() {
        typeshade_cmd()
            .arg("query")
            .arg(fixture("sample.ts"))
            .arg("Frobnicator")
            .assert()
            .failure()
            .stdout(predicate::str::contains("Unknown node kind: Frobnicator"));
    }
}

mod functions_command {
    use super::*;

    #[test]
    fn lists_top_level_functions_in_order() {
        typeshade_cmd()
            .arg("functions")
            .arg(fixture("sample.ts"))
            .assert()
            .success()
            .stdout(predicate::str::is_match("(?s)^compile\n.*\nhelper\n").unwrap());
    }

    #[test]
    fn reports_files_without_functions() {
        typeshade_cmd()
            .arg("functions")
            .arg(fixture("plain.js"))
            .assert()
            .success()
            .stdout(predicate::str::contains("No top-level functions"));
    }
}

mod transform_command {
    use super::*;

    #[test]
    fn renames_identifiers() {
        typeshade_cmd()
            .arg("transform")
            .arg(fixture("sample.ts"))
            .assert()
            .success()
            .stdout(predicate::str::contains("import { typescript } from \"./compiler\";"))
            .stdout(predicate::str::contains("typescript.transform(source, { transforms })"))
            .stdout(predicate::str::contains("babel").not());
    }

    #[test]
    fn strips_erased_constructs() {
        typeshade_cmd()
            .arg("transform")
            .arg(fixture("sample.ts"))
            .arg("--strip-types")
            .assert()
            .success()
            .stdout(predicate::str::contains("const transforms = [];"))
            .stdout(predicate::str::contains("interface").not())
            .stdout(predicate::str::contains("import type").not());
    }

    #[test]
    fn uses_renames_from_config() {
        let temp = assert_fs::TempDir::new().unwrap();
        let config = temp.child("typeshade.json");
        config
            .write_str(r#"{ "renames": { "answer": "result" } }"#)
            .unwrap();

        typeshade_cmd()
            .arg("--config")
            .arg(config.path())
            .arg("transform")
            .arg(fixture("plain.js"))
            .assert()
            .success()
            .stdout("const result = 42;\nconsole.log(result);\n");
    }
}

mod tree_command {
    use super::*;

    #[test]
    fn prints_outline() {
        typeshade_cmd()
            .arg("tree")
            .arg(fixture("plain.js"))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("SourceFile [0.."))
            .stdout(predicate::str::contains("  VariableStatement [0..18)"));
    }

    #[test]
    fn prints_json() {
        let output = typeshade_cmd()
            .arg("tree")
            .arg(fixture("plain.js"))
            .arg("--json")
            .output()
            .unwrap();

        assert!(output.status.success());
        let tree: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(tree["type"], "SourceFile");
        assert!(tree["children"].as_array().is_some_and(|c| c.len() == 2));
    }
}
