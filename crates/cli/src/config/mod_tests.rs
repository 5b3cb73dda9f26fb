// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

fn path() -> PathBuf {
    PathBuf::from("scour.toml")
}

fn parse_err(content: &str) -> String {
    parse(content, &path()).unwrap_err().to_string()
}

#[test]
fn parses_minimal_config() {
    let config = parse("version = 1\n", &path()).unwrap();
    assert_eq!(config.version, 1);
    assert!(config.rules.is_empty());
    assert!(config.project.ignore.is_empty());
}

#[test]
fn rejects_missing_version() {
    assert!(parse_err("").contains("missing required field: version"));
}

#[test]
fn rejects_unsupported_version() {
    assert!(parse_err("version = 2\n").contains("unsupported config version 2"));
}

#[test]
fn rejects_invalid_toml() {
    assert!(parse("version = \n", &path()).is_err());
}

#[test]
fn parses_project_ignore() {
    let config = parse(
        r#"
version = 1

[project]
ignore = ["target/**", "*.min.js"]
"#,
        &path(),
    )
    .unwrap();
    assert_eq!(config.project.ignore, vec!["target/**", "*.min.js"]);
}

#[test]
fn parses_rules_in_order() {
    let config = parse(
        r#"
version = 1

[[rule]]
name = "no-todo"
kind = "literal"
pattern = "TODO"
case_sensitive = true

[[rule]]
name = "no-get"
pattern = "request(${method}, ${url:url})"
message = "Use the shared HTTP client"
paths = ["src/**"]
exclude = ["src/vendor/**"]

[rule.variables.method]
values = ["GET", 2, 0.5, "/^P/", "/^d/i"]
not = true
"#,
        &path(),
    )
    .unwrap();

    let names: Vec<&str> = config.rules.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["no-todo", "no-get"]);

    let todo = config.rule("no-todo").unwrap();
    assert_eq!(todo.kind, RuleKind::Literal);
    assert!(todo.case_sensitive);
    assert_eq!(todo.message, None);

    let get = config.rule("no-get").unwrap();
    assert_eq!(get.kind, RuleKind::Token);
    assert!(!get.case_sensitive);
    assert_eq!(get.message.as_deref(), Some("Use the shared HTTP client"));
    assert_eq!(get.paths, vec!["src/**"]);
    assert_eq!(get.exclude, vec!["src/vendor/**"]);

    let method = &get.variables["method"];
    assert!(method.not);
    assert_eq!(
        method.values,
        vec![
            ValueConfig::Text("GET".into()),
            ValueConfig::Integer(2),
            ValueConfig::Float(0.5),
            ValueConfig::Regex {
                source: "^P".into(),
                case_insensitive: false
            },
            ValueConfig::Regex {
                source: "^d".into(),
                case_insensitive: true
            },
        ]
    );
}

#[test]
fn rejects_duplicate_rule_names() {
    let err = parse_err(
        r#"
version = 1

[[rule]]
name = "dup"
pattern = "a"

[[rule]]
name = "dup"
pattern = "b"
"#,
    );
    assert!(err.contains("duplicate rule name `dup`"));
}

#[test]
fn rejects_unknown_kind() {
    let err = parse_err(
        r#"
version = 1

[[rule]]
name = "x"
kind = "glob"
pattern = "a"
"#,
    );
    assert!(err.contains("invalid kind"));
}

#[test]
fn rejects_rule_without_name() {
    let err = parse_err("version = 1\n[[rule]]\npattern = \"a\"\n");
    assert!(err.contains("rule #1 is missing a name"));
}

#[test]
fn rejects_rule_without_pattern() {
    let err = parse_err("version = 1\n[[rule]]\nname = \"x\"\n");
    assert!(err.contains("rule `x` is missing a pattern"));
}

#[test]
fn rejects_rule_as_single_table() {
    let err = parse_err("version = 1\n[rule]\nname = \"x\"\n");
    assert!(err.contains("array of tables"));
}

#[test]
fn unknown_keys_are_ignored() {
    let config = parse(
        r#"
version = 1
colour = "blue"

[project]
name = "x"

[[rule]]
name = "r"
pattern = "a"
severity = "high"
"#,
        &path(),
    )
    .unwrap();
    assert_eq!(config.rules.len(), 1);
}

#[test]
fn load_reads_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("scour.toml");
    fs::write(&config_path, "version = 1\n[[rule]]\nname = \"r\"\npattern = \"x\"\n").unwrap();

    let config = load(&config_path).unwrap();
    assert_eq!(config.rules[0].name, "r");
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let result = load(&dir.path().join("scour.toml"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn config_errors_carry_path() {
    match parse("version = 9\n", Path::new("custom/scour.toml")) {
        Err(Error::Config { path, .. }) => {
            assert_eq!(path, Some(PathBuf::from("custom/scour.toml")));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}
