// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Compiled matchers.
//!
//! A matcher wraps one of three engines:
//! - case-sensitive literal: memchr::memmem
//! - regex crate, when the pattern needs no look-around
//! - fancy-regex, when it does (email placeholders, user look-around)

use std::collections::BTreeMap;

use memchr::memmem::Finder;

use super::PatternError;
use super::variable::VariableSpec;

/// Backtracking budget for the look-around engine.
const BACKTRACK_LIMIT: usize = 1_000_000;

/// The matching engine behind a compiled pattern.
#[derive(Debug)]
pub enum Engine {
    /// Single case-sensitive literal string (fastest).
    Literal(Finder<'static>),
    /// Regex without look-around.
    Regex(regex::Regex),
    /// Regex with look-around or backreferences.
    Fancy(fancy_regex::Regex),
}

impl Engine {
    /// Compile regex source, falling up to fancy-regex only when the regex
    /// crate rejects the syntax.
    pub fn compile(source: &str, pattern: &str) -> Result<Self, PatternError> {
        match regex::Regex::new(source) {
            Ok(re) => Ok(Engine::Regex(re)),
            Err(basic_err) => {
                tracing::debug!(pattern, error = %basic_err, "falling back to fancy-regex");
                fancy_regex::RegexBuilder::new(source)
                    .backtrack_limit(BACKTRACK_LIMIT)
                    .build()
                    .map(Engine::Fancy)
                    .map_err(|_| PatternError::InvalidRegex {
                        pattern: pattern.to_string(),
                        message: basic_err.to_string(),
                    })
            }
        }
    }

    /// Short engine name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Engine::Literal(_) => "literal",
            Engine::Regex(_) => "regex",
            Engine::Fancy(_) => "fancy-regex",
        }
    }
}

/// Values captured by one match, keyed by variable name in pattern order.
///
/// A variable used more than once in a pattern appears once per use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Captures {
    values: Vec<(String, String)>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a captured value for `variable`.
    pub fn push(&mut self, variable: impl Into<String>, value: impl Into<String>) {
        self.values.push((variable.into(), value.into()));
    }

    /// First value captured for `variable`.
    pub fn get(&self, variable: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name == variable)
            .map(|(_, value)| value.as_str())
    }

    /// All `(variable, value)` pairs in pattern order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A match found in content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    /// Byte offset where match starts.
    pub start: usize,
    /// Byte offset where match ends.
    pub end: usize,
    /// Variable values bound by the match.
    pub captures: Captures,
}

/// A match with resolved line and column.
#[derive(Debug, Clone)]
pub struct LineMatch {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column, in characters.
    pub column: u32,
    /// The matched text.
    pub text: String,
    /// Byte offset in file.
    pub offset: usize,
    /// Variable values bound by the match.
    pub captures: Captures,
}

/// An immutable compiled pattern: engine, typed variables and warnings.
#[derive(Debug)]
pub struct CompiledMatcher {
    engine: Engine,
    regex: String,
    variables: BTreeMap<String, VariableSpec>,
    captures: Vec<(String, String)>,
    warnings: Vec<String>,
}

impl CompiledMatcher {
    pub(crate) fn new(engine: Engine, regex: String) -> Self {
        Self {
            engine,
            regex,
            variables: BTreeMap::new(),
            captures: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub(crate) fn with_variables(
        mut self,
        variables: BTreeMap<String, VariableSpec>,
        captures: Vec<(String, String)>,
    ) -> Self {
        self.variables = variables;
        self.captures = captures;
        self
    }

    pub(crate) fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }

    /// The regex source this matcher was built from.
    pub fn regex(&self) -> &str {
        &self.regex
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Declared variables with their resolved types.
    pub fn variables(&self) -> &BTreeMap<String, VariableSpec> {
        &self.variables
    }

    /// Authoring warnings produced while compiling.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// True if the raw pattern matches anywhere in `text`.
    ///
    /// Variable constraints are not applied.
    pub fn is_match(&self, text: &str) -> bool {
        match &self.engine {
            Engine::Literal(finder) => finder.find(text.as_bytes()).is_some(),
            Engine::Regex(re) => re.is_match(text),
            Engine::Fancy(re) => re.is_match(text).unwrap_or_else(|e| {
                tracing::warn!(regex = %self.regex, error = %e, "match abandoned");
                false
            }),
        }
    }

    /// Captures of the first raw match, if any.
    pub fn captures(&self, text: &str) -> Option<Captures> {
        self.raw_matches(text, 1)
            .into_iter()
            .next()
            .map(|m| m.captures)
    }

    /// Decide whether a raw match is accepted.
    ///
    /// Every captured value must be non-empty and satisfy its variable's
    /// constraints.
    pub fn accepts(&self, captures: &Captures) -> bool {
        captures.iter().all(|(name, value)| {
            !value.is_empty() && self.variables.get(name).is_none_or(|spec| spec.test(value))
        })
    }

    /// Find all accepted matches in content.
    pub fn find_all(&self, content: &str) -> Vec<PatternMatch> {
        self.raw_matches(content, usize::MAX)
            .into_iter()
            .filter(|m| self.accepts(&m.captures))
            .collect()
    }

    /// Find all accepted matches with line numbers.
    pub fn find_all_with_lines(&self, content: &str) -> Vec<LineMatch> {
        let mut cursor = LineCursor::new(content);
        self.find_all(content)
            .into_iter()
            .map(|m| {
                let (line, column) = cursor.advance_to(m.start);
                LineMatch {
                    line,
                    column,
                    text: content[m.start..m.end].to_string(),
                    offset: m.start,
                    captures: m.captures,
                }
            })
            .collect()
    }

    fn raw_matches(&self, content: &str, limit: usize) -> Vec<PatternMatch> {
        match &self.engine {
            Engine::Literal(finder) => {
                let len = finder.needle().len();
                finder
                    .find_iter(content.as_bytes())
                    .take(limit)
                    .map(|start| PatternMatch {
                        start,
                        end: start + len,
                        captures: Captures::new(),
                    })
                    .collect()
            }
            Engine::Regex(re) => re
                .captures_iter(content)
                .take(limit)
                .filter_map(|caps| {
                    let whole = caps.get(0)?;
                    Some(PatternMatch {
                        start: whole.start(),
                        end: whole.end(),
                        captures: self.bind(|name| caps.name(name).map(|m| m.as_str())),
                    })
                })
                .collect(),
            Engine::Fancy(re) => self.fancy_matches(re, content, limit),
        }
    }

    /// Drive the look-around engine by hand so a search that exceeds the
    /// backtracking budget resumes on the next line instead of ending.
    fn fancy_matches(
        &self,
        re: &fancy_regex::Regex,
        content: &str,
        limit: usize,
    ) -> Vec<PatternMatch> {
        let mut matches = Vec::new();
        let mut pos = 0;
        let mut last_end = None;
        while pos <= content.len() && matches.len() < limit {
            let caps = match re.captures_from_pos(content, pos) {
                Ok(Some(caps)) => caps,
                Ok(None) => break,
                Err(e) => {
                    let resume = content[pos..]
                        .find('\n')
                        .map_or(content.len() + 1, |i| pos + i + 1);
                    tracing::warn!(
                        regex = %self.regex,
                        line = byte_offset_to_line(content, pos),
                        error = %e,
                        "match abandoned, resuming on next line"
                    );
                    pos = resume;
                    continue;
                }
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            if whole.start() == whole.end() {
                pos = whole.end()
                    + content[whole.end()..]
                        .chars()
                        .next()
                        .map_or(1, char::len_utf8);
                if last_end == Some(whole.end()) {
                    continue;
                }
            } else {
                pos = whole.end();
            }
            last_end = Some(whole.end());
            matches.push(PatternMatch {
                start: whole.start(),
                end: whole.end(),
                captures: self.bind(|name| caps.name(name).map(|m| m.as_str())),
            });
        }
        matches
    }

    /// Map capture groups back to variable names.
    fn bind<'t>(&self, group: impl Fn(&str) -> Option<&'t str>) -> Captures {
        let mut captures = Captures::new();
        for (capture, variable) in &self.captures {
            captures.push(variable.as_str(), group(capture).unwrap_or_default());
        }
        captures
    }
}

/// Resolves ascending byte offsets to line and column in one forward pass.
struct LineCursor<'a> {
    content: &'a str,
    offset: usize,
    line: u32,
    line_start: usize,
}

impl<'a> LineCursor<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            content,
            offset: 0,
            line: 1,
            line_start: 0,
        }
    }

    /// 1-based line and character column of `offset`.
    fn advance_to(&mut self, offset: usize) -> (u32, u32) {
        if offset < self.offset {
            *self = Self::new(self.content);
        }
        for (i, b) in self.content.as_bytes()[self.offset..offset].iter().enumerate() {
            if *b == b'\n' {
                self.line += 1;
                self.line_start = self.offset + i + 1;
            }
        }
        self.offset = offset;
        let column = self.content[self.line_start..offset].chars().count() as u32 + 1;
        (self.line, column)
    }
}

/// Convert byte offset to 1-based line number.
pub fn byte_offset_to_line(content: &str, offset: usize) -> u32 {
    // Count newlines before offset
    content[..offset].bytes().filter(|&b| b == b'\n').count() as u32 + 1
}

/// Convert byte offset to 1-based character column.
pub fn byte_offset_to_column(content: &str, offset: usize) -> u32 {
    let line_start = content[..offset].rfind('\n').map_or(0, |i| i + 1);
    content[line_start..offset].chars().count() as u32 + 1
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
