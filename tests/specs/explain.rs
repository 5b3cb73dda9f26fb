// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Behavioral specs for `scour explain`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

#[test]
fn shows_compiled_regex_and_variables() {
    let temp = Project::with_rules(
        r#"
[[rule]]
name = "no-zero-sleep"
pattern = "sleep(${ms:int})"

[rule.variables.ms]
values = [0]
"#,
    );

    explain(temp.path()).assert().success().stdout(
        predicates::str::contains("no-zero-sleep (token)\n")
            .and(predicates::str::contains("  pattern:  sleep(${ms:int})\n"))
            .and(predicates::str::contains("  engine:   regex\n"))
            .and(predicates::str::contains("  regex:    (?ims)"))
            .and(predicates::str::contains("  ${ms}: int, one of 0\n")),
    );
}

#[test]
fn look_around_types_use_fancy_regex() {
    let temp = Project::with_rules(
        "[[rule]]\nname = \"mail\"\npattern = \"to ${who:email}\"\n[rule.variables.who]\n",
    );

    explain(temp.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("  engine:   fancy-regex\n"));
}

#[test]
fn shows_authoring_warnings() {
    let temp = Project::with_rules(
        "[[rule]]\nname = \"loose\"\npattern = \"${x:word} = 1\"\n[rule.variables.x]\n",
    );

    explain(temp.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("  warning:  placeholder `${x:word}` at the start"));
}

#[test]
fn rule_filter_and_compile_errors() {
    let temp = Project::with_rules(
        r#"
[[rule]]
name = "ok"
kind = "literal"
pattern = "x"

[[rule]]
name = "broken"
kind = "regexp"
pattern = "("
"#,
    );

    explain(temp.path())
        .args(["--rule", "ok"])
        .assert()
        .success()
        .stdout(predicates::str::contains("broken").not());

    explain(temp.path())
        .assert()
        .code(2)
        .stdout(predicates::str::contains("broken (regexp)\n  pattern:  (\n  error:    invalid regex"));
}
