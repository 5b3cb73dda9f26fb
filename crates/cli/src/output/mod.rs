// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for scan results.

pub mod json;
pub mod text;

/// Default number of violations shown in text output.
pub const DEFAULT_LIMIT: usize = 15;

/// Output formatting options.
#[derive(Debug, Clone)]
pub struct FormatOptions {
    /// Maximum violations to show (None = unlimited).
    pub limit: Option<usize>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_LIMIT),
        }
    }
}

impl FormatOptions {
    pub fn no_limit() -> Self {
        Self { limit: None }
    }

    pub fn with_limit(limit: usize) -> Self {
        Self { limit: Some(limit) }
    }
}
