// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rules: a named pattern plus the files it applies to.

use std::collections::BTreeMap;
use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::{RuleConfig, RuleKind, ValueConfig, VariableConfig};
use crate::error::{Error, Result};
use crate::pattern::{Pattern, VarPattern, VariableSpec};

/// A rule ready for scanning. Its pattern compiles on first use.
#[derive(Debug)]
pub struct Rule {
    pub name: String,
    pub message: String,
    pub pattern: Pattern,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
}

impl Rule {
    /// Build a rule from its config table.
    ///
    /// Invalid globs and invalid variable regexes are config errors. Pattern
    /// syntax is not checked until the pattern compiles.
    pub fn from_config(config: &RuleConfig) -> Result<Self> {
        let pattern = match config.kind {
            RuleKind::Literal => Pattern::literal(&config.pattern, config.case_sensitive),
            RuleKind::Regexp => {
                Pattern::regexp(&config.pattern, config.case_sensitive, config.multiline)
            }
            RuleKind::Token => Pattern::token(
                &config.pattern,
                build_variables(&config.name, &config.variables)?,
                config.case_sensitive,
            ),
        };

        Ok(Self {
            name: config.name.clone(),
            message: config
                .message
                .clone()
                .unwrap_or_else(|| config.name.clone()),
            pattern,
            include: build_glob_set(&config.name, &config.paths)?,
            exclude: build_glob_set(&config.name, &config.exclude)?,
        })
    }

    /// Whether the rule applies to a root-relative path.
    pub fn applies_to(&self, path: &Path) -> bool {
        // Check exclusions first
        if let Some(matcher) = &self.exclude
            && matcher.is_match(path)
        {
            return false;
        }

        self.include.as_ref().is_none_or(|m| m.is_match(path))
    }
}

/// Build every rule, in config order.
pub fn build_rules(configs: &[RuleConfig]) -> Result<Vec<Rule>> {
    configs.iter().map(Rule::from_config).collect()
}

/// Keep only the named rules, in config order. An empty list keeps all.
pub fn select_rules(rules: Vec<Rule>, names: &[String]) -> Result<Vec<Rule>> {
    if names.is_empty() {
        return Ok(rules);
    }
    if let Some(unknown) = names.iter().find(|n| !rules.iter().any(|r| &r.name == *n)) {
        return Err(Error::Argument(format!("unknown rule `{}`", unknown)));
    }
    Ok(rules
        .into_iter()
        .filter(|r| names.contains(&r.name))
        .collect())
}

fn build_glob_set(rule: &str, patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| Error::Config {
            message: format!("rule `{}`: invalid glob `{}`: {}", rule, pattern, e),
            path: None,
        })?;
        builder.add(glob);
    }

    builder.build().map(Some).map_err(|e| Error::Config {
        message: format!("rule `{}`: {}", rule, e),
        path: None,
    })
}

fn build_variables(
    rule: &str,
    variables: &BTreeMap<String, VariableConfig>,
) -> Result<BTreeMap<String, VariableSpec>> {
    variables
        .iter()
        .map(|(name, config)| {
            let patterns = config
                .values
                .iter()
                .map(|value| build_value(rule, name, value))
                .collect::<Result<Vec<_>>>()?;
            Ok((name.clone(), VariableSpec::new(patterns, config.not)))
        })
        .collect()
}

fn build_value(rule: &str, variable: &str, value: &ValueConfig) -> Result<VarPattern> {
    Ok(match value {
        ValueConfig::Text(text) => VarPattern::Text(text.clone()),
        ValueConfig::Integer(n) => VarPattern::Integer(*n),
        ValueConfig::Float(f) => VarPattern::Float(*f),
        ValueConfig::Regex {
            source,
            case_insensitive,
        } => {
            let re = regex::RegexBuilder::new(source)
                .case_insensitive(*case_insensitive)
                .build()
                .map_err(|e| Error::Config {
                    message: format!(
                        "rule `{}`: variable `{}`: invalid regex `/{}/`: {}",
                        rule, variable, source, e
                    ),
                    path: None,
                })?;
            VarPattern::Regex(re)
        }
    })
}

#[cfg(test)]
#[path = "rule_tests.rs"]
mod tests;
