// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rule patterns.
//!
//! A [`Pattern`] is literal text, a raw regular expression, or a token
//! pattern with typed `${name:type}` placeholders. Each compiles once, on
//! first use, into a [`CompiledMatcher`]:
//! - case-sensitive literal: memchr::memmem
//! - everything else: regex crate, or fancy-regex when look-around is needed

mod balanced;
mod cast;
pub mod matcher;
mod token;
pub mod types;
pub mod variable;

use std::collections::BTreeMap;
use std::sync::OnceLock;

use memchr::memmem::Finder;

pub use matcher::{Captures, CompiledMatcher, Engine, LineMatch, PatternMatch};
pub use types::VarType;
pub use variable::{VarPattern, VariableSpec};

/// Errors from compiling a pattern.
///
/// Cached alongside successful compilations, so messages are kept as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("unsupported placeholder type `{tag}` in pattern `{pattern}`")]
    UnsupportedType { pattern: String, tag: String },

    #[error("invalid regex in pattern `{pattern}`: {message}")]
    InvalidRegex { pattern: String, message: String },
}

/// What a pattern matches, before compilation.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// Exact text; metacharacters have no meaning.
    Literal { source: String, case_sensitive: bool },
    /// A regular expression used as written.
    Regexp {
        source: String,
        case_sensitive: bool,
        multiline: bool,
    },
    /// Hybrid literal and placeholder syntax.
    Token {
        source: String,
        variables: BTreeMap<String, VariableSpec>,
        case_sensitive: bool,
    },
}

impl PatternKind {
    pub fn name(&self) -> &'static str {
        match self {
            PatternKind::Literal { .. } => "literal",
            PatternKind::Regexp { .. } => "regexp",
            PatternKind::Token { .. } => "token",
        }
    }

    fn compile(&self) -> Result<CompiledMatcher, PatternError> {
        match self {
            PatternKind::Literal {
                source,
                case_sensitive: true,
            } => {
                let finder = Finder::new(source.as_bytes()).into_owned();
                Ok(CompiledMatcher::new(
                    Engine::Literal(finder),
                    regex::escape(source),
                ))
            }
            PatternKind::Literal { source, .. } => {
                let regex = format!("(?i){}", regex::escape(source));
                Ok(CompiledMatcher::new(Engine::compile(&regex, source)?, regex))
            }
            PatternKind::Regexp {
                source,
                case_sensitive,
                multiline,
            } => {
                let mut flags = String::from("m");
                if *multiline {
                    flags.push('s');
                }
                if !case_sensitive {
                    flags.push('i');
                }
                let regex = format!("(?{}){}", flags, source);
                Ok(CompiledMatcher::new(Engine::compile(&regex, source)?, regex))
            }
            PatternKind::Token {
                source,
                variables,
                case_sensitive,
            } => {
                let assembled = token::compile_token(source, variables, *case_sensitive)?;
                let engine = Engine::compile(&assembled.regex, source)?;
                Ok(CompiledMatcher::new(engine, assembled.regex)
                    .with_variables(assembled.variables, assembled.captures)
                    .with_warnings(assembled.warnings))
            }
        }
    }
}

/// A pattern with its lazily compiled matcher.
///
/// Compilation happens at most once; later calls (from any thread) see the
/// cached matcher or the cached error.
#[derive(Debug)]
pub struct Pattern {
    kind: PatternKind,
    compiled: OnceLock<Result<CompiledMatcher, PatternError>>,
}

impl Pattern {
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            compiled: OnceLock::new(),
        }
    }

    /// Exact text, case-insensitive unless `case_sensitive`.
    pub fn literal(source: impl Into<String>, case_sensitive: bool) -> Self {
        Self::new(PatternKind::Literal {
            source: source.into(),
            case_sensitive,
        })
    }

    /// Regular expression. `^`/`$` always match at line boundaries;
    /// `multiline` also lets `.` match newlines.
    pub fn regexp(source: impl Into<String>, case_sensitive: bool, multiline: bool) -> Self {
        Self::new(PatternKind::Regexp {
            source: source.into(),
            case_sensitive,
            multiline,
        })
    }

    /// Token pattern with declared placeholder variables.
    pub fn token(
        source: impl Into<String>,
        variables: BTreeMap<String, VariableSpec>,
        case_sensitive: bool,
    ) -> Self {
        Self::new(PatternKind::Token {
            source: source.into(),
            variables,
            case_sensitive,
        })
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Source text as written in the rule.
    pub fn source(&self) -> &str {
        match &self.kind {
            PatternKind::Literal { source, .. }
            | PatternKind::Regexp { source, .. }
            | PatternKind::Token { source, .. } => source,
        }
    }

    /// Compile on first call; return the cached result afterwards.
    pub fn compile(&self) -> Result<&CompiledMatcher, PatternError> {
        self.compiled
            .get_or_init(|| {
                let result = self.kind.compile();
                match &result {
                    Ok(matcher) => tracing::debug!(
                        kind = self.kind.name(),
                        pattern = %self.source(),
                        engine = matcher.engine().name(),
                        "compiled pattern"
                    ),
                    Err(e) => tracing::debug!(pattern = %self.source(), error = %e, "pattern failed to compile"),
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Raw match anywhere in `text`, without variable constraints.
    pub fn is_match(&self, text: &str) -> Result<bool, PatternError> {
        Ok(self.compile()?.is_match(text))
    }

    /// Captures of the first raw match.
    pub fn captures(&self, text: &str) -> Result<Option<Captures>, PatternError> {
        Ok(self.compile()?.captures(text))
    }

    /// Apply variable constraints to a raw match.
    ///
    /// Always true for literal and regexp patterns. False if the pattern
    /// does not compile.
    pub fn accepts(&self, captures: &Captures) -> bool {
        self.compile().is_ok_and(|m| m.accepts(captures))
    }

    /// All accepted matches.
    pub fn find_all(&self, text: &str) -> Result<Vec<PatternMatch>, PatternError> {
        Ok(self.compile()?.find_all(text))
    }

    /// All accepted matches with line and column.
    pub fn find_all_with_lines(&self, text: &str) -> Result<Vec<LineMatch>, PatternError> {
        Ok(self.compile()?.find_all_with_lines(text))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
