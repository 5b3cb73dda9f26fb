// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::{DEFAULT_LIMIT, FormatOptions};
use crate::walker::DEFAULT_MAX_DEPTH;

/// Scan source trees for token patterns
#[derive(Parser)]
#[command(name = "scour")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "SCOUR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Scan files against the configured rules
    Check(CheckArgs),
    /// Show how each rule's pattern compiles
    Explain(ExplainArgs),
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Files or directories to scan
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,

    /// Maximum violations to display
    #[arg(long, default_value_t = DEFAULT_LIMIT, value_name = "N")]
    pub limit: usize,

    /// Show all violations (no limit)
    #[arg(long)]
    pub no_limit: bool,

    /// Run only the named rule (repeatable)
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,

    /// Fail when a rule's pattern does not compile
    #[arg(long)]
    pub strict: bool,

    /// Maximum directory depth to traverse
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

impl CheckArgs {
    pub fn format_options(&self) -> FormatOptions {
        if self.no_limit {
            FormatOptions::no_limit()
        } else {
            FormatOptions::with_limit(self.limit)
        }
    }
}

#[derive(clap::Args)]
pub struct ExplainArgs {
    /// Explain only the named rule (repeatable)
    #[arg(long = "rule", value_name = "NAME")]
    pub rules: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
