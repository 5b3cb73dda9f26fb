// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Token pattern compiler and rule scanner.

pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod output;
pub mod pattern;
pub mod reader;
pub mod rule;
pub mod scan;
pub mod walker;

pub use cli::{CheckArgs, Cli, Command, ExplainArgs, OutputFormat};
pub use config::{Config, RuleConfig, RuleKind};
pub use error::{Error, ExitCode, Result};
pub use pattern::{CompiledMatcher, Pattern, PatternError, PatternKind, VariableSpec};
pub use reader::{FileContent, FileReader};
pub use rule::Rule;
pub use scan::{RuleResult, ScanOutput, Scanner, Violation};
pub use walker::{FileWalker, WalkStats, WalkedFile, WalkerConfig};

#[cfg(test)]
pub mod test_utils;
