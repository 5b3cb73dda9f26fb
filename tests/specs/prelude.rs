// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the scour binary.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::marker::PhantomData;
use std::path::Path;
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the scour binary, with color and
/// logging settings cleared from the environment.
pub fn scour_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("scour"));
    for var in ["NO_COLOR", "COLOR", "SCOUR_LOG", "SCOUR_CONFIG"] {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a `scour check` builder.
pub fn check() -> CheckBuilder<Text> {
    CheckBuilder {
        dir: None,
        args: Vec::new(),
        envs: Vec::new(),
        _mode: PhantomData,
    }
}

/// Create a `scour explain` command in `dir`.
pub fn explain(dir: &Path) -> Command {
    let mut cmd = scour_cmd();
    cmd.arg("explain").current_dir(dir);
    cmd
}

/// Typestate markers for output mode
pub struct Text;
pub struct Json;

/// High-level check builder for fluent test assertions
pub struct CheckBuilder<Mode = Text> {
    dir: Option<std::path::PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    _mode: PhantomData<Mode>,
}

#[allow(dead_code)]
impl CheckBuilder<Text> {
    pub fn json(self) -> CheckBuilder<Json> {
        CheckBuilder {
            dir: self.dir,
            args: self.args,
            envs: self.envs,
            _mode: PhantomData,
        }
    }

    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    pub fn fails(self) -> RunAssert {
        run_exits(self.command(), 1)
    }

    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }
}

#[allow(dead_code)]
impl CheckBuilder<Json> {
    pub fn passes(self) -> ScanJson {
        ScanJson::new(&run_exits(self.command(), 0).output.stdout)
    }

    pub fn fails(self) -> ScanJson {
        ScanJson::new(&run_exits(self.command(), 1).output.stdout)
    }
}

#[allow(dead_code)]
impl<Mode: 'static> CheckBuilder<Mode> {
    /// Set working directory
    pub fn pwd(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    fn command(self) -> Command {
        let is_json = std::any::TypeId::of::<Mode>() == std::any::TypeId::of::<Json>();
        let mut cmd = scour_cmd();
        cmd.arg("check");
        if is_json {
            cmd.args(["-o", "json"]);
        }
        cmd.args(&self.args);
        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected
    pub fn stdout_eq(self, expected: &str) -> Self {
        assert_eq!(self.stdout(), expected);
        self
    }

    /// Assert stdout matches predicate.
    ///
    /// ```ignore
    /// .stdout_has("FAIL")  // contains
    /// .stdout_has(predicates::str::is_match(r"^\d+ rules").unwrap())
    /// ```
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = self.stdout();
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = self.stderr();
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

/// Parsed `check -o json` output
pub struct ScanJson {
    root: serde_json::Value,
}

#[allow(dead_code)]
impl ScanJson {
    fn new(stdout: &[u8]) -> Self {
        Self {
            root: serde_json::from_slice(stdout).expect("valid JSON"),
        }
    }

    pub fn value(&self) -> &serde_json::Value {
        &self.root
    }

    /// Get a rule result by name, panicking if missing
    pub fn rule(&self, name: &str) -> &serde_json::Value {
        self.root["rules"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["name"] == name)
            .unwrap_or_else(|| panic!("rule '{}' not found", name))
    }

    /// Violations of a rule (empty when omitted)
    pub fn violations(&self, name: &str) -> &[serde_json::Value] {
        self.rule(name)
            .get("violations")
            .and_then(|v| v.as_array())
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Rule names in output order
    pub fn rule_names(&self) -> Vec<&str> {
        self.root["rules"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|r| r["name"].as_str())
            .collect()
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary test project directory with helper methods.
///
/// ```ignore
/// let temp = Project::empty();
/// temp.config("[[rule]]\nname = \"todo\"\nkind = \"literal\"\npattern = \"TODO\"");
/// temp.file("src/lib.rs", "// TODO");
/// check().pwd(temp.path()).fails();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Create a project whose scour.toml holds `rules`
    pub fn with_rules(rules: &str) -> Self {
        let temp = Self::empty();
        temp.config(rules);
        temp
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write scour.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("scour.toml"), content).unwrap();
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }
}
