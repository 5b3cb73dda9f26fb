// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Walks from the scan root up to the git root looking for scour.toml.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Name of the config file searched for.
pub const CONFIG_FILE: &str = "scour.toml";

/// Find scour.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        // Stop at git root
        if current.join(".git").exists() {
            return None;
        }

        current = current.parent()?;
    }
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// `-C`/`--config` (or `SCOUR_CONFIG`) wins and must exist; otherwise the
/// nearest scour.toml up to the git root, if any.
pub fn resolve_config(explicit: Option<&Path>, start_dir: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(start_dir)),
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
