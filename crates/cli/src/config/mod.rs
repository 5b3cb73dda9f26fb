// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles scour.toml parsing with version validation and unknown key
//! warnings. Rule tables are validated here; their patterns are compiled
//! later, by the scanner.

mod parse;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use parse::{parse_rule, parse_string_array_or_empty, warn_unknown_key};

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    #[serde(default)]
    project: Option<toml::Value>,

    #[serde(default)]
    rule: Option<toml::Value>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Project configuration.
    pub project: ProjectConfig,

    /// Rules in file order.
    pub rules: Vec<RuleConfig>,
}

impl Config {
    /// Look up a rule by name.
    pub fn rule(&self, name: &str) -> Option<&RuleConfig> {
        self.rules.iter().find(|r| r.name == name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProjectConfig {
    /// Paths excluded from every scan (gitignore glob syntax).
    pub ignore: Vec<String>,
}

/// How a rule's `pattern` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleKind {
    Literal,
    Regexp,
    #[default]
    Token,
}

impl RuleKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "literal" => Some(RuleKind::Literal),
            "regexp" => Some(RuleKind::Regexp),
            "token" => Some(RuleKind::Token),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::Literal => "literal",
            RuleKind::Regexp => "regexp",
            RuleKind::Token => "token",
        }
    }
}

/// A `[[rule]]` table.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleConfig {
    pub name: String,
    pub kind: RuleKind,
    pub pattern: String,
    /// Message shown with each violation (defaults to the rule name).
    pub message: Option<String>,
    pub case_sensitive: bool,
    /// Let `.` match newlines (regexp rules only).
    pub multiline: bool,
    /// Include globs; empty means every file.
    pub paths: Vec<String>,
    /// Exclude globs.
    pub exclude: Vec<String>,
    /// `[rule.variables.<name>]` tables, by name.
    pub variables: BTreeMap<String, VariableConfig>,
}

/// A `[rule.variables.<name>]` table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableConfig {
    pub values: Vec<ValueConfig>,
    /// Reject the listed values instead of requiring one.
    pub not: bool,
}

/// One entry of a variable's `values` array.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueConfig {
    Text(String),
    Integer(i64),
    Float(f64),
    /// Written as `"/source/"`, or `"/source/i"` for case-insensitive.
    Regex {
        source: String,
        case_insensitive: bool,
    },
}

pub const SUPPORTED_VERSION: i64 = 1;

const KNOWN_KEYS: &[&str] = &["version", "project", "rule"];

const KNOWN_PROJECT_KEYS: &[&str] = &["ignore"];

/// Load and validate a config file, printing warnings for unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "loading config");
    parse(&content, path)
}

/// Parse and validate config content. `path` is used in messages only.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let config_err = |message: String| Error::Config {
        message,
        path: Some(path.to_path_buf()),
    };

    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_err(e.to_string()))?;
    let version = version_check
        .version
        .ok_or_else(|| config_err("missing required field: version".to_string()))?;
    if version != SUPPORTED_VERSION {
        return Err(config_err(format!(
            "unsupported config version {} (supported: {})",
            version, SUPPORTED_VERSION
        )));
    }

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_err(e.to_string()))?;

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let project = match flexible.project {
        Some(toml::Value::Table(t)) => {
            for key in t.keys() {
                if !KNOWN_PROJECT_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("project.{}", key));
                }
            }
            ProjectConfig {
                ignore: parse_string_array_or_empty(t.get("ignore")),
            }
        }
        Some(_) => return Err(config_err("`project` must be a table".to_string())),
        None => ProjectConfig::default(),
    };

    let tables = match flexible.rule {
        Some(toml::Value::Array(tables)) => tables,
        Some(_) => return Err(config_err("`rule` must be an array of tables ([[rule]])".to_string())),
        None => Vec::new(),
    };

    let mut rules = Vec::with_capacity(tables.len());
    let mut seen = BTreeSet::new();
    for (index, value) in tables.iter().enumerate() {
        let rule = parse_rule(value, index, path).map_err(config_err)?;
        if !seen.insert(rule.name.clone()) {
            return Err(config_err(format!("duplicate rule name `{}`", rule.name)));
        }
        tracing::debug!(rule = %rule.name, kind = rule.kind.as_str(), "loaded rule");
        rules.push(rule);
    }

    Ok(Config {
        version,
        project,
        rules,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
