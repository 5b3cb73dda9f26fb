// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for text and JSON output.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

fn todo_project(count: usize) -> Project {
    let temp = Project::with_rules(
        "[[rule]]\nname = \"todo\"\nkind = \"literal\"\npattern = \"TODO\"\n",
    );
    for i in 0..count {
        temp.file(format!("f{}.txt", i), "TODO\n");
    }
    temp
}

#[test]
fn text_output_truncates_at_limit() {
    let temp = todo_project(3);
    check()
        .pwd(temp.path())
        .args(&["--limit", "2"])
        .fails()
        .stdout_has("f0.txt")
        .stdout_has("f1.txt")
        .stdout_lacks("f2.txt")
        .stdout_has("Stopped after 2 of 3 violations. Use --no-limit to see all.");
}

#[test]
fn no_limit_shows_everything() {
    let temp = todo_project(3);
    check()
        .pwd(temp.path())
        .args(&["--limit", "2", "--no-limit"])
        .fails()
        .stdout_has("f2.txt")
        .stdout_lacks("Stopped after");
}

#[test]
fn json_output_shape() {
    let temp = todo_project(2);
    let json = check().pwd(temp.path()).json().fails();
    let root = json.value();

    assert_eq!(root["passed"], false);
    assert_eq!(root["files_scanned"], 2);
    assert!(root["timestamp"].as_str().unwrap().ends_with('Z'));

    let v = &json.violations("todo")[0];
    assert_eq!(v["file"], "f0.txt");
    assert_eq!(v["line"], 1);
    assert_eq!(v["column"], 1);
    assert_eq!(v["rule"], "todo");
    assert_eq!(v["message"], "todo");
    assert_eq!(v["text"], "TODO");
}

#[test]
fn json_output_is_not_truncated() {
    let temp = todo_project(3);
    let json = check().pwd(temp.path()).json().args(&["--limit", "1"]).fails();
    assert_eq!(json.violations("todo").len(), 3);
}

#[test]
fn no_color_by_default_when_piped() {
    let temp = todo_project(1);
    check().pwd(temp.path()).fails().stdout_lacks("\x1b[");
}

#[test]
fn color_env_forces_color() {
    let temp = todo_project(1);
    check()
        .pwd(temp.path())
        .env("COLOR", "1")
        .fails()
        .stdout_has("\x1b[");
}

#[test]
fn no_color_env_wins_over_color_env() {
    let temp = todo_project(1);
    check()
        .pwd(temp.path())
        .env("COLOR", "1")
        .env("NO_COLOR", "1")
        .fails()
        .stdout_lacks("\x1b[");
}

#[test]
fn no_color_flag_wins_over_environment() {
    let temp = todo_project(1);
    check()
        .pwd(temp.path())
        .env("COLOR", "1")
        .args(&["--no-color"])
        .fails()
        .stdout_lacks("\x1b[");
}

#[test]
fn color_flag_forces_color() {
    let temp = todo_project(1);
    check()
        .pwd(temp.path())
        .args(&["--color"])
        .fails()
        .stdout_has("\x1b[");
}
