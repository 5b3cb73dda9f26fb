// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder type registry.
//!
//! Each typed placeholder (`${name:type}`) expands to a named capture group
//! whose body is chosen by [`VarType`]. Untyped placeholders are `Generic`
//! and get their body from the surrounding source instead (see `balanced`).

use std::fmt;

use serde::Serialize;

/// Type of a placeholder variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarType {
    /// No declared type; body depends on neighbouring characters.
    #[default]
    Generic,
    /// Single- or double-quoted string literal.
    String,
    /// Integer or float.
    Number,
    /// Integer in decimal, hex, octal or binary notation.
    Int,
    /// Decimal float with optional exponent.
    Float,
    /// Run of non-whitespace characters.
    Word,
    /// Identifier-like token.
    Identifier,
    /// URL with a known scheme or a `www.` prefix.
    Url,
    /// Email address.
    Email,
}

/// All tags accepted in `${name:tag}`.
pub const TYPE_TAGS: &[&str] = &[
    "generic",
    "string",
    "number",
    "int",
    "float",
    "word",
    "identifier",
    "url",
    "email",
];

/// URL schemes recognized by the `url` type.
const URL_SCHEMES: &[&str] = &[
    "https", "http", "ftps", "ftp", "sftp", "ssh", "file", "git", "wss", "ws",
];

const HEX: &str = "0[xX][0-9a-fA-F](?:_?[0-9a-fA-F])*";
const BINARY: &str = "0[bB][01](?:_?[01])*";
const PREFIXED_OCTAL: &str = "0[oOdD][0-7](?:_?[0-7])*";
const BARE_OCTAL: &str = "0[0-7](?:_?[0-7])*";
const DECIMAL: &str = "(?:0|[1-9](?:_?[0-9])*)";
const FLOAT_BODY: &str = "[0-9](?:_?[0-9])*(?:\\.[0-9](?:_?[0-9])*)?(?:[eE][-+]?[0-9]+)?";
const EMAIL_LOCAL: &str = "[\\w.!#$%&'*/=?^`{|}~+-]";

impl VarType {
    /// Parse a type tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let ty = match tag {
            "generic" => VarType::Generic,
            "string" => VarType::String,
            "number" => VarType::Number,
            "int" => VarType::Int,
            "float" => VarType::Float,
            "word" => VarType::Word,
            "identifier" => VarType::Identifier,
            "url" => VarType::Url,
            "email" => VarType::Email,
            _ => return None,
        };
        Some(ty)
    }

    /// The tag used for this type in pattern source.
    pub fn tag(self) -> &'static str {
        match self {
            VarType::Generic => "generic",
            VarType::String => "string",
            VarType::Number => "number",
            VarType::Int => "int",
            VarType::Float => "float",
            VarType::Word => "word",
            VarType::Identifier => "identifier",
            VarType::Url => "url",
            VarType::Email => "email",
        }
    }

    /// Types whose body can swallow arbitrary text when placed at a pattern edge.
    pub fn is_open_ended(self) -> bool {
        matches!(self, VarType::Generic | VarType::Word)
    }

    /// Types that get a leading word boundary when they open the pattern.
    pub fn wants_leading_boundary(self) -> bool {
        matches!(self, VarType::Word | VarType::Identifier)
    }

    /// Build the capture group for a typed placeholder.
    ///
    /// Returns `None` for `Generic`, whose body is context dependent.
    pub fn fragment(self, capture: &str) -> Option<String> {
        let body = match self {
            VarType::Generic => return None,
            VarType::String => string_body(),
            VarType::Number => number_body(),
            VarType::Int => int_body(),
            VarType::Float => float_body(),
            VarType::Word => "\\S+".to_string(),
            VarType::Identifier => "[A-Za-z_]\\w*\\b".to_string(),
            VarType::Url => url_body(),
            VarType::Email => email_body(),
        };
        Some(capture_group(capture, &body))
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Wrap a body in a named capture group.
pub(crate) fn capture_group(capture: &str, body: &str) -> String {
    format!("(?P<{}>{})", capture, body)
}

fn string_body() -> String {
    "(?:\"[^\"]*\"|'[^']*')".to_string()
}

fn int_body() -> String {
    format!(
        "[-+]?(?:{}|{}|{}|{}|{})",
        HEX, BINARY, PREFIXED_OCTAL, BARE_OCTAL, DECIMAL
    )
}

fn float_body() -> String {
    format!("[-+]?{}", FLOAT_BODY)
}

fn number_body() -> String {
    // Prefixed integers first so `0x1A` is not read as the float `0`.
    format!(
        "[-+]?(?:{}|{}|{}|{}|{})",
        HEX, BINARY, PREFIXED_OCTAL, BARE_OCTAL, FLOAT_BODY
    )
}

fn url_body() -> String {
    format!(
        "\\b(?:(?:{})://|www\\.)[^\\s\u{a0}\"]+",
        URL_SCHEMES.join("|")
    )
}

fn email_body() -> String {
    format!(
        "(?<!{local}){local}\\.?{local}*@(?:[\\w-]+\\.)+[\\w-]+",
        local = EMAIL_LOCAL
    )
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
