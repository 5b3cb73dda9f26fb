// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.
//!
//! Rule helpers return plain messages; `parse` wraps them into
//! `Error::Config` with the file path.

use std::collections::BTreeMap;
use std::path::Path;

use super::{RuleConfig, RuleKind, ValueConfig, VariableConfig};

const KNOWN_RULE_KEYS: &[&str] = &[
    "name",
    "kind",
    "pattern",
    "message",
    "case_sensitive",
    "multiline",
    "paths",
    "exclude",
    "variables",
];

const KNOWN_VARIABLE_KEYS: &[&str] = &["values", "not"];

/// Parse a TOML array of strings into a Vec<String>.
pub(super) fn parse_string_array(value: Option<&toml::Value>) -> Option<Vec<String>> {
    value?.as_array().map(|arr| {
        arr.iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect()
    })
}

/// Parse a TOML array of strings, returning empty vec if not found.
pub(super) fn parse_string_array_or_empty(value: Option<&toml::Value>) -> Vec<String> {
    parse_string_array(value).unwrap_or_default()
}

/// Parse a TOML string value as Option<String>.
pub(super) fn parse_string_option(value: Option<&toml::Value>) -> Option<String> {
    value.and_then(|v| v.as_str()).map(String::from)
}

fn parse_bool_or(value: Option<&toml::Value>, default: bool) -> bool {
    value.and_then(|v| v.as_bool()).unwrap_or(default)
}

/// Parse one `[[rule]]` table.
pub(super) fn parse_rule(
    value: &toml::Value,
    index: usize,
    path: &Path,
) -> Result<RuleConfig, String> {
    let t = value
        .as_table()
        .ok_or_else(|| format!("rule #{} must be a table", index + 1))?;

    let name = parse_string_option(t.get("name"))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("rule #{} is missing a name", index + 1))?;

    for key in t.keys() {
        if !KNOWN_RULE_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("rule.{}.{}", name, key));
        }
    }

    let kind = match t.get("kind") {
        None => RuleKind::default(),
        Some(v) => v
            .as_str()
            .and_then(RuleKind::parse)
            .ok_or_else(|| {
                format!(
                    "rule `{}`: invalid kind {} (expected \"literal\", \"regexp\" or \"token\")",
                    name, v
                )
            })?,
    };

    let pattern = parse_string_option(t.get("pattern"))
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("rule `{}` is missing a pattern", name))?;

    let variables = match t.get("variables") {
        None => BTreeMap::new(),
        Some(toml::Value::Table(vars)) => {
            let mut parsed = BTreeMap::new();
            for (var, spec) in vars {
                parsed.insert(var.clone(), parse_variable(spec, &name, var, path)?);
            }
            parsed
        }
        Some(_) => return Err(format!("rule `{}`: `variables` must be a table", name)),
    };

    Ok(RuleConfig {
        kind,
        pattern,
        message: parse_string_option(t.get("message")),
        case_sensitive: parse_bool_or(t.get("case_sensitive"), false),
        multiline: parse_bool_or(t.get("multiline"), false),
        paths: parse_string_array_or_empty(t.get("paths")),
        exclude: parse_string_array_or_empty(t.get("exclude")),
        variables,
        name,
    })
}

/// Parse one `[rule.variables.<name>]` table.
fn parse_variable(
    value: &toml::Value,
    rule: &str,
    var: &str,
    path: &Path,
) -> Result<VariableConfig, String> {
    let t = value
        .as_table()
        .ok_or_else(|| format!("rule `{}`: variable `{}` must be a table", rule, var))?;

    for key in t.keys() {
        if !KNOWN_VARIABLE_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("rule.{}.variables.{}.{}", rule, var, key));
        }
    }

    let values = match t.get("values") {
        None => Vec::new(),
        Some(toml::Value::Array(items)) => items
            .iter()
            .map(|item| {
                parse_value(item).ok_or_else(|| {
                    format!(
                        "rule `{}`: variable `{}`: unsupported value {} (expected string or number)",
                        rule, var, item
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => {
            return Err(format!(
                "rule `{}`: variable `{}`: `values` must be an array",
                rule, var
            ));
        }
    };

    Ok(VariableConfig {
        values,
        not: parse_bool_or(t.get("not"), false),
    })
}

/// Parse one candidate value. Strings in slashes are regexes.
pub(super) fn parse_value(value: &toml::Value) -> Option<ValueConfig> {
    match value {
        toml::Value::Integer(n) => Some(ValueConfig::Integer(*n)),
        toml::Value::Float(f) => Some(ValueConfig::Float(*f)),
        toml::Value::String(s) => {
            Some(parse_regex_literal(s).unwrap_or_else(|| ValueConfig::Text(s.clone())))
        }
        _ => None,
    }
}

/// `/source/` or `/source/i`.
fn parse_regex_literal(s: &str) -> Option<ValueConfig> {
    let body = s.strip_prefix('/')?;
    if let Some(source) = body.strip_suffix("/i") {
        return Some(ValueConfig::Regex {
            source: source.to_string(),
            case_insensitive: true,
        });
    }
    let source = body.strip_suffix('/')?;
    Some(ValueConfig::Regex {
        source: source.to_string(),
        case_insensitive: false,
    })
}

/// Warn about unknown configuration key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "scour: warning: {}: unknown field `{}` (ignored)",
        path.display(),
        key
    );
}

#[cfg(test)]
#[path = "parse_tests.rs"]
mod tests;
