// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! File walking with gitignore support.
//!
//! Uses the `ignore` crate for file discovery that respects `.gitignore`,
//! project ignore patterns, and depth limits. Walking is sequential; the
//! scan itself is parallelized over the collected files.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use ignore::overrides::OverrideBuilder;

use crate::error::{Error, Result};
use crate::reader::MAX_FILE_SIZE;

/// Default maximum directory depth.
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Directories pruned during traversal, before any I/O on their subtrees.
pub(crate) const SKIP_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// Helper to check if an ignore::Error is a symlink loop error.
fn is_loop_error(err: &ignore::Error) -> bool {
    match err {
        ignore::Error::Loop { .. } => true,
        ignore::Error::WithPath { err, .. }
        | ignore::Error::WithDepth { err, .. }
        | ignore::Error::WithLineNumber { err, .. } => is_loop_error(err),
        _ => false,
    }
}

/// Walker configuration.
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Maximum directory depth (default: 100).
    pub max_depth: Option<usize>,

    /// Project ignore patterns (gitignore glob syntax).
    pub ignore_patterns: Vec<String>,

    /// Directory ignore patterns are anchored to (default: the walk root).
    pub ignore_base: Option<PathBuf>,

    /// Whether to respect gitignore files.
    pub git_ignore: bool,

    /// Whether to skip hidden files.
    pub hidden: bool,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            ignore_patterns: Vec::new(),
            ignore_base: None,
            git_ignore: true,
            hidden: true,
        }
    }
}

/// File discovered by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Path to the file.
    pub path: PathBuf,

    /// File size in bytes.
    pub size: u64,

    /// Directory depth from root.
    pub depth: usize,
}

/// Statistics from a walk operation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WalkStats {
    /// Total files discovered.
    pub files_found: usize,

    /// Files skipped due to size limit (>10MB).
    pub files_skipped_size: usize,

    /// Symlink loops detected.
    pub symlink_loops: usize,

    /// Errors encountered.
    pub errors: usize,
}

/// File walker with gitignore support.
pub struct FileWalker {
    config: WalkerConfig,
}

impl FileWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Walk `root` (a directory or a single file) and collect its files.
    ///
    /// Files are returned in path order. Invalid ignore patterns are an
    /// error; unreadable entries are counted and logged.
    pub fn walk(&self, root: &Path) -> Result<(Vec<WalkedFile>, WalkStats)> {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(self.config.hidden)
            .git_ignore(self.config.git_ignore)
            .git_exclude(self.config.git_ignore)
            .git_global(self.config.git_ignore)
            .require_git(false)
            .follow_links(true)
            .max_depth(self.config.max_depth)
            .sort_by_file_path(|a, b| a.cmp(b));

        // Overrides whitelist by default; `!` turns a pattern into an exclusion.
        if !self.config.ignore_patterns.is_empty() {
            let base = self.config.ignore_base.as_deref().unwrap_or(root);
            let mut overrides = OverrideBuilder::new(base);
            for pattern in &self.config.ignore_patterns {
                overrides
                    .add(&format!("!{}", pattern))
                    .map_err(|e| Error::Walk {
                        message: format!("invalid ignore pattern `{}`: {}", pattern, e),
                    })?;
            }
            let overrides = overrides.build().map_err(|e| Error::Walk {
                message: e.to_string(),
            })?;
            builder.overrides(overrides);
        }

        builder.filter_entry(|entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            !is_dir
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| SKIP_DIRECTORIES.contains(&name))
        });

        let mut files = Vec::new();
        let mut stats = WalkStats::default();

        for entry in builder.build() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if is_loop_error(&err) {
                        tracing::warn!("symlink loop detected: {}", err);
                        stats.symlink_loops += 1;
                    } else {
                        tracing::warn!("walk error: {}", err);
                        stats.errors += 1;
                    }
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            if size > MAX_FILE_SIZE {
                tracing::warn!("skipping {} ({} bytes > 10MB limit)", entry.path().display(), size);
                stats.files_skipped_size += 1;
                continue;
            }

            tracing::trace!(path = %entry.path().display(), "found file");
            stats.files_found += 1;
            files.push(WalkedFile {
                depth: entry.depth(),
                path: entry.into_path(),
                size,
            });
        }

        Ok((files, stats))
    }
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
