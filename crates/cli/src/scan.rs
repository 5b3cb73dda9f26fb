// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule scanning.
//!
//! Compiles every rule once, then reads files in parallel with rayon and
//! applies each rule whose globs accept the file. A rule whose pattern does
//! not compile is reported as skipped; the other rules still run.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Error;
use crate::pattern::CompiledMatcher;
use crate::reader::FileReader;
use crate::rule::Rule;
use crate::walker::WalkedFile;

/// An accepted match of a rule in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Path relative to the scan root.
    pub file: PathBuf,
    /// 1-based line.
    pub line: u32,
    /// 1-based column.
    pub column: u32,
    /// Rule name.
    pub rule: String,
    /// Rule message.
    pub message: String,
    /// Matched text.
    pub text: String,
}

/// Result of applying one rule.
#[derive(Debug, Clone, Serialize)]
pub struct RuleResult {
    pub name: String,

    /// True if the rule compiled and found nothing.
    pub passed: bool,

    /// True if the rule's pattern failed to compile.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub skipped: bool,

    /// Compile error for a skipped rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Authoring warnings from compiling the pattern.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,
}

impl RuleResult {
    /// Create a result from the violations found (passing when empty).
    pub fn from_violations(name: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            name: name.into(),
            passed: violations.is_empty(),
            skipped: false,
            error: None,
            warnings: Vec::new(),
            violations,
        }
    }

    /// Create a skipped result with an error.
    pub fn skipped(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            skipped: true,
            error: Some(error.into()),
            warnings: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Aggregated results from all rules.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutput {
    /// RFC 3339 timestamp.
    pub timestamp: String,

    /// True if no rule found a violation.
    pub passed: bool,

    /// Files read and scanned.
    pub files_scanned: usize,

    /// Results for each rule, in config order.
    pub rules: Vec<RuleResult>,
}

impl ScanOutput {
    pub fn new(timestamp: String, files_scanned: usize, rules: Vec<RuleResult>) -> Self {
        // Skipped rules do not fail the scan
        let passed = rules.iter().all(|r| r.passed || r.skipped);
        Self {
            timestamp,
            passed,
            files_scanned,
            rules,
        }
    }

    /// Count total violations across all rules.
    pub fn total_violations(&self) -> usize {
        self.rules.iter().map(|r| r.violations.len()).sum()
    }

    /// Rules that were skipped because their pattern failed to compile.
    pub fn skipped_rules(&self) -> impl Iterator<Item = &RuleResult> {
        self.rules.iter().filter(|r| r.skipped)
    }
}

/// Applies rules to files.
pub struct Scanner<'a> {
    rules: &'a [Rule],
    reader: FileReader,
}

impl<'a> Scanner<'a> {
    pub fn new(rules: &'a [Rule]) -> Self {
        Self {
            rules,
            reader: FileReader::new(),
        }
    }

    pub fn with_reader(mut self, reader: FileReader) -> Self {
        self.reader = reader;
        self
    }

    /// Scan `files`, reporting paths relative to `root`.
    pub fn scan(&self, root: &Path, files: &[WalkedFile], timestamp: String) -> ScanOutput {
        let compiled: Vec<Option<&CompiledMatcher>> = self
            .rules
            .iter()
            .map(|rule| match rule.pattern.compile() {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!(rule = %rule.name, error = %e, "skipping rule");
                    None
                }
            })
            .collect();

        let per_file: Vec<Option<Vec<(usize, Violation)>>> = files
            .par_iter()
            .map(|file| self.scan_file(root, &file.path, &compiled))
            .collect();
        let files_scanned = per_file.iter().filter(|v| v.is_some()).count();

        let mut by_rule: Vec<Vec<Violation>> = vec![Vec::new(); self.rules.len()];
        for (index, violation) in per_file.into_iter().flatten().flatten() {
            by_rule[index].push(violation);
        }

        let results = self
            .rules
            .iter()
            .zip(compiled)
            .zip(by_rule)
            .map(|((rule, matcher), mut violations)| match matcher {
                Some(matcher) => {
                    violations.sort_by(|a, b| {
                        a.file
                            .cmp(&b.file)
                            .then_with(|| a.line.cmp(&b.line))
                            .then_with(|| a.column.cmp(&b.column))
                    });
                    RuleResult::from_violations(&rule.name, violations)
                        .with_warnings(matcher.warnings().to_vec())
                }
                None => {
                    let error = rule
                        .pattern
                        .compile()
                        .err()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    RuleResult::skipped(&rule.name, error)
                }
            })
            .collect();

        ScanOutput::new(timestamp, files_scanned, results)
    }

    /// Violations in one file, tagged with the rule index. `None` if the
    /// file could not be read as text.
    fn scan_file(
        &self,
        root: &Path,
        path: &Path,
        compiled: &[Option<&CompiledMatcher>],
    ) -> Option<Vec<(usize, Violation)>> {
        let content = match self.reader.read(path) {
            Ok(content) => content,
            Err(Error::FileTooLarge { .. }) => {
                tracing::debug!(path = %path.display(), "skipping oversized file");
                return None;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                return None;
            }
        };
        let text = content.text?;
        let relative = relative_path(root, path);

        let _span = tracing::warn_span!("file", path = %relative.display()).entered();
        tracing::trace!("scanning file");

        let mut violations = Vec::new();
        for (index, (rule, matcher)) in self.rules.iter().zip(compiled).enumerate() {
            let Some(matcher) = matcher else {
                continue;
            };
            if !rule.applies_to(&relative) {
                continue;
            }
            for m in matcher.find_all_with_lines(&text) {
                violations.push((
                    index,
                    Violation {
                        file: relative.clone(),
                        line: m.line,
                        column: m.column,
                        rule: rule.name.clone(),
                        message: rule.message.clone(),
                        text: m.text,
                    },
                ));
            }
        }
        Some(violations)
    }
}

/// Path relative to `root`, or the path itself when outside it.
fn relative_path(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
