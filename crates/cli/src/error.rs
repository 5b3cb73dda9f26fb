// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use crate::pattern::PatternError;

/// Scour error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// A rule's pattern failed to compile
    #[error("rule `{rule}`: {source}")]
    Pattern {
        rule: String,
        #[source]
        source: PatternError,
    },

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),

    /// File exceeds maximum size limit.
    #[error("file too large: {} ({} bytes, max: {} bytes)", .path.display(), .size, .max_size)]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    /// Walker error.
    #[error("walk error: {message}")]
    Walk { message: String },
}

/// Result type using scour Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// No violations
    Success = 0,
    /// One or more rules matched
    ViolationsFound = 1,
    /// Configuration, pattern or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::Pattern { .. } => {
                ExitCode::ConfigError
            }
            Error::Io { .. } | Error::Internal(_) | Error::Walk { .. } => ExitCode::InternalError,
            Error::FileTooLarge { .. } => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
