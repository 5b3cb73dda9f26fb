// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Token pattern compiler.
//!
//! Scans a hybrid pattern such as `fetch(${url:url}, ${opts})` into
//! lexemes, turns each into a regex fragment and joins them with flexible
//! whitespace:
//!
//! - whitespace in the source becomes `\s+`
//! - adjacent literal tokens are joined by `\s*`
//! - nothing is inserted next to a variable capture

use std::collections::BTreeMap;
use std::ops::Range;

use super::PatternError;
use super::balanced::{generic_fragment, is_word_char};
use super::types::VarType;
use super::variable::{VariableSetBuilder, VariableSpec};

/// Punctuation characters that group into a single run.
const PUNCTUATION: &str = "!#$%&*+,-./:;=?@\\^`|~";

/// Single-character delimiter tokens.
const BRACKETS: &str = "()[]{}<>";

/// A lexeme of pattern source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Lexeme<'a> {
    /// `${name}` or `${name:tag}`.
    Placeholder {
        name: &'a str,
        tag: Option<&'a str>,
        inner: &'a str,
    },
    Bracket(&'a str),
    Whitespace,
    Word(&'a str),
    Punctuation(&'a str),
    Other(&'a str),
}

/// Token stream entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// Regex fragment matched literally in sequence.
    Literal(String),
    /// Required whitespace from the source.
    Whitespace,
    /// Suppresses whitespace insertion on this side of a capture.
    NoBreak,
}

/// Output of compiling a token pattern, before regex construction.
#[derive(Debug, Clone)]
pub(crate) struct Assembled {
    /// Full regex source including flags.
    pub regex: String,
    /// Declared variables with resolved types.
    pub variables: BTreeMap<String, VariableSpec>,
    /// Capture group name to variable name, in pattern order.
    pub captures: Vec<(String, String)>,
    /// Authoring warnings.
    pub warnings: Vec<String>,
}

/// Compile token pattern source into regex source plus typed variables.
pub(crate) fn compile_token(
    source: &str,
    variables: &BTreeMap<String, VariableSpec>,
    case_sensitive: bool,
) -> Result<Assembled, PatternError> {
    let lexemes = scan(source);
    let mut builder = VariableSetBuilder::new(variables);
    let mut tokens = Vec::with_capacity(lexemes.len());
    let mut captures = Vec::new();
    let mut warnings = Vec::new();

    for (index, (lexeme, span)) in lexemes.iter().enumerate() {
        match lexeme {
            Lexeme::Placeholder { name, tag, inner } => {
                if !builder.is_declared(name) {
                    tokens.push(Token::Literal(regex::escape("${")));
                    tokens.push(Token::Literal(regex::escape(inner)));
                    tokens.push(Token::Literal(regex::escape("}")));
                    continue;
                }

                let explicit = match tag {
                    Some(tag) => Some(VarType::from_tag(tag).ok_or_else(|| {
                        PatternError::UnsupportedType {
                            pattern: source.to_string(),
                            tag: tag.to_string(),
                        }
                    })?),
                    None => None,
                };

                let occurrence = builder.occurrence(name, explicit);
                let at_start = span.start == 0;
                let at_end = span.end == source.len();
                if occurrence.first && occurrence.var_type.is_open_ended() && (at_start || at_end)
                {
                    let edge = if at_start { "start" } else { "end" };
                    tracing::warn!(pattern = %source, variable = %name, "open-ended placeholder at pattern {}", edge);
                    warnings.push(format!(
                        "placeholder `${{{}}}` at the {} of `{}` can match arbitrary text",
                        inner, edge, source
                    ));
                }

                let mut fragment = match occurrence.var_type.fragment(&occurrence.capture) {
                    Some(fragment) => fragment,
                    None => {
                        let before = source[..span.start].chars().next_back();
                        let after = source[span.end..].chars().next();
                        generic_fragment(&occurrence.capture, before, after)
                    }
                };
                if index == 0 && occurrence.var_type.wants_leading_boundary() {
                    fragment.insert_str(0, "\\b");
                }

                tokens.push(Token::NoBreak);
                tokens.push(Token::Literal(fragment));
                tokens.push(Token::NoBreak);
                captures.push((occurrence.capture, name.to_string()));
            }
            Lexeme::Whitespace => tokens.push(Token::Whitespace),
            Lexeme::Bracket(text)
            | Lexeme::Word(text)
            | Lexeme::Punctuation(text)
            | Lexeme::Other(text) => tokens.push(Token::Literal(regex::escape(text))),
        }
    }

    let mut regex = String::from(if case_sensitive { "(?ms)" } else { "(?ims)" });
    let leading = source.chars().next().is_some_and(char::is_alphabetic);
    let trailing = source.chars().next_back().is_some_and(char::is_alphabetic);
    if leading {
        regex.push_str("\\b");
    }
    regex.push_str(&assemble(&tokens));
    if trailing {
        regex.push_str("\\b");
    }

    tracing::trace!(pattern = %source, regex = %regex, "compiled token pattern");

    Ok(Assembled {
        regex,
        variables: builder.finish(),
        captures,
        warnings,
    })
}

/// Split pattern source into lexemes with their byte spans.
pub(crate) fn scan(source: &str) -> Vec<(Lexeme<'_>, Range<usize>)> {
    let mut lexemes = Vec::new();
    let mut pos = 0;

    while let Some(c) = source[pos..].chars().next() {
        let start = pos;
        let lexeme = if let Some((lexeme, len)) = placeholder(&source[pos..]) {
            pos += len;
            lexeme
        } else if BRACKETS.contains(c) {
            pos += c.len_utf8();
            Lexeme::Bracket(&source[start..pos])
        } else if c.is_whitespace() {
            pos = run_end(source, pos, char::is_whitespace);
            Lexeme::Whitespace
        } else if is_word_char(c) {
            pos = run_end(source, pos, is_word_char);
            Lexeme::Word(&source[start..pos])
        } else if PUNCTUATION.contains(c) {
            pos = run_end(source, pos, |c| PUNCTUATION.contains(c));
            Lexeme::Punctuation(&source[start..pos])
        } else {
            pos += c.len_utf8();
            Lexeme::Other(&source[start..pos])
        };
        lexemes.push((lexeme, start..pos));
    }

    lexemes
}

/// Parse `${name}` or `${name:tag}` at the start of `rest`.
fn placeholder(rest: &str) -> Option<(Lexeme<'_>, usize)> {
    let body = rest.strip_prefix("${")?;
    let close = body.find('}')?;
    let inner = &body[..close];
    let (name, tag) = match inner.split_once(':') {
        Some((name, tag)) => (name, Some(tag)),
        None => (inner, None),
    };
    if !is_identifier(name) || !tag.is_none_or(is_identifier) {
        return None;
    }
    Some((Lexeme::Placeholder { name, tag, inner }, close + 3))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn run_end(source: &str, start: usize, pred: impl Fn(char) -> bool) -> usize {
    source[start..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(source.len(), |(i, _)| start + i)
}

/// Spacing between two fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    Optional,
    Required,
}

/// Join tokens, inserting optional whitespace between adjacent literals and
/// collapsing runs of whitespace connectors.
pub(crate) fn assemble(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut pending: Option<Spacing> = None;
    let mut previous: Option<&Token> = None;

    for token in tokens {
        let joins = matches!(
            (previous, token),
            (Some(Token::Literal(_) | Token::Whitespace), Token::Literal(_) | Token::Whitespace)
        );
        if joins {
            pending = pending.max_spacing(Spacing::Optional);
        }
        match token {
            Token::Whitespace => pending = pending.max_spacing(Spacing::Required),
            Token::Literal(fragment) => {
                flush(&mut out, pending.take());
                out.push_str(fragment);
            }
            Token::NoBreak => flush(&mut out, pending.take()),
        }
        previous = Some(token);
    }
    flush(&mut out, pending);
    out
}

fn flush(out: &mut String, spacing: Option<Spacing>) {
    match spacing {
        Some(Spacing::Optional) => out.push_str("\\s*"),
        Some(Spacing::Required) => out.push_str("\\s+"),
        None => {}
    }
}

trait MaxSpacing {
    fn max_spacing(self, other: Spacing) -> Self;
}

impl MaxSpacing for Option<Spacing> {
    fn max_spacing(self, other: Spacing) -> Self {
        match self {
            Some(Spacing::Required) => Some(Spacing::Required),
            _ => Some(other),
        }
    }
}

#[cfg(test)]
#[path = "token_tests.rs"]
mod tests;
