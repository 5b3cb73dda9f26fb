// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bodies for untyped placeholders.
//!
//! An untyped placeholder wrapped in a delimiter pair, as in `f(${args})`,
//! expands to a bounded approximation of balanced nesting. Regular
//! expressions cannot count, so nesting deeper than [`MAX_DEPTH`] levels is
//! not guaranteed to match. Other untyped placeholders stop at the next
//! non-word character of the source.

use super::types::capture_group;

/// Deepest nesting of same-kind delimiters the expansion accepts.
pub const MAX_DEPTH: usize = 5;

/// Delimiter pairs that trigger balanced expansion.
const PAIRS: &[(char, char)] = &[('(', ')'), ('{', '}'), ('[', ']'), ('<', '>')];

/// Build the capture group for an untyped placeholder.
///
/// `before` and `after` are the source characters directly adjacent to the
/// placeholder, if any.
pub fn generic_fragment(capture: &str, before: Option<char>, after: Option<char>) -> String {
    let body = match (before, after) {
        (Some(open), Some(close)) if PAIRS.contains(&(open, close)) => balanced(open, close),
        (_, Some(next)) if next.is_whitespace() => "\\S*?".to_string(),
        (_, Some(next)) if !is_word_char(next) => {
            format!("[^{}]*?", escape_class_char(next))
        }
        (_, Some(_)) => ".*?".to_string(),
        (_, None) => ".*".to_string(),
    };
    capture_group(capture, &body)
}

/// Union of every nesting depth from [`MAX_DEPTH`] down to zero.
pub fn balanced(open: char, close: char) -> String {
    let alternatives: Vec<String> = (0..=MAX_DEPTH)
        .rev()
        .map(|depth| expand(open, close, depth))
        .collect();
    format!("(?:{})", alternatives.join("|"))
}

/// Exactly `depth` levels of nested `open ... close` pairs.
fn expand(open: char, close: char, depth: usize) -> String {
    let outside = format!(
        "[^{}{}]*",
        escape_class_char(open),
        escape_class_char(close)
    );
    if depth == 0 {
        return outside;
    }
    format!(
        "{outside}{}{}{}{outside}",
        regex::escape(&open.to_string()),
        expand(open, close, depth - 1),
        regex::escape(&close.to_string()),
    )
}

/// Word characters as the scanner sees them.
pub(crate) fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || (!c.is_ascii() && c.is_alphabetic())
}

/// Escape a character for use inside a bracketed class.
fn escape_class_char(c: char) -> String {
    if matches!(c, '\\' | '[' | ']' | '^' | '-' | '&' | '~') {
        format!("\\{}", c)
    } else {
        c.to_string()
    }
}

#[cfg(test)]
#[path = "balanced_tests.rs"]
mod tests;
