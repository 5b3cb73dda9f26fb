// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for config discovery and validation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

const TODO_RULE: &str = "[[rule]]\nname = \"todo\"\nkind = \"literal\"\npattern = \"TODO\"\n";

#[test]
fn missing_config_exits_with_config_error() {
    let temp = Project::empty();
    temp.file(".git/HEAD", "ref: refs/heads/main\n");
    temp.file("a.txt", "TODO\n");

    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("no scour.toml found");
}

#[test]
fn config_is_found_in_parent_directory() {
    let temp = Project::with_rules(TODO_RULE);
    temp.file("src/deep/a.rs", "// TODO\n");

    // Paths stay relative to the directory holding scour.toml
    check()
        .pwd(temp.path().join("src"))
        .fails()
        .stdout_has("src/deep/a.rs:1:4: todo");
}

#[test]
fn explicit_config_flag() {
    let temp = Project::empty();
    temp.file("conf/rules.toml", &format!("version = 1\n{}", TODO_RULE));
    temp.file("a.txt", "TODO\n");

    check()
        .pwd(temp.path())
        .args(&["-C", "conf/rules.toml"])
        .fails()
        .stdout_has("a.txt:1:1: todo");
}

#[test]
fn config_env_var() {
    let temp = Project::empty();
    temp.file("conf/rules.toml", &format!("version = 1\n{}", TODO_RULE));
    temp.file("a.txt", "TODO\n");

    check()
        .pwd(temp.path())
        .env("SCOUR_CONFIG", "conf/rules.toml")
        .fails();
}

#[test]
fn explicit_config_must_exist() {
    let temp = Project::empty();
    check()
        .pwd(temp.path())
        .args(&["-C", "missing.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

#[test]
fn unsupported_version_exits_with_config_error() {
    let temp = Project::empty();
    temp.config(&format!("version = 2\n{}", TODO_RULE));

    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 2");
}

#[test]
fn duplicate_rule_names_exit_with_config_error() {
    let temp = Project::with_rules(&format!("{}{}", TODO_RULE, TODO_RULE));
    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("duplicate rule name `todo`");
}

#[test]
fn invalid_kind_exits_with_config_error() {
    let temp = Project::with_rules("[[rule]]\nname = \"r\"\nkind = \"glob\"\npattern = \"x\"\n");
    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("invalid kind");
}

#[test]
fn invalid_variable_regex_exits_with_config_error() {
    let temp = Project::with_rules(
        r#"
[[rule]]
name = "r"
pattern = "f(${x})"

[rule.variables.x]
values = ["/(/"]
"#,
    );
    check()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("variable `x`")
        .stderr_has("invalid regex");
}

#[test]
fn unknown_keys_warn_and_continue() {
    let temp = Project::with_rules(&format!("{}colour = \"red\"\n", TODO_RULE));
    temp.file("a.txt", "fine\n");

    check()
        .pwd(temp.path())
        .passes()
        .stderr_has("unknown field `colour`");
}
