// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Color detection and terminal styling.
//!
//! Resolution order:
//! 1. `--no-color` / `--color` flags
//! 2. `NO_COLOR` env var (any value) disables color
//! 3. `COLOR` env var forces color
//! 4. otherwise color only when stdout is a terminal outside CI

use std::io::IsTerminal;

use termcolor::ColorChoice;

/// Resolve the color choice from command-line flags and the environment.
pub fn resolve_color(force: bool, disable: bool) -> ColorChoice {
    if let Some(choice) = flag_choice(force, disable) {
        return choice;
    }
    if std::env::var_os("NO_COLOR").is_some() {
        return ColorChoice::Never;
    }
    if std::env::var_os("COLOR").is_some() {
        return ColorChoice::Always;
    }
    if !std::io::stdout().is_terminal() || std::env::var_os("CI").is_some() {
        return ColorChoice::Never;
    }
    ColorChoice::Auto
}

/// Explicit flags win over everything; `--no-color` wins over `--color`.
fn flag_choice(force: bool, disable: bool) -> Option<ColorChoice> {
    match (force, disable) {
        (_, true) => Some(ColorChoice::Never),
        (true, false) => Some(ColorChoice::Always),
        (false, false) => None,
    }
}

/// Color scheme for scan output.
pub mod scheme {
    use termcolor::{Color, ColorSpec};

    /// Bold rule name.
    pub fn rule_name() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        spec
    }

    /// Red "FAIL" indicator.
    pub fn fail() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Red)).set_bold(true);
        spec
    }

    /// Yellow "SKIP" indicator.
    pub fn skip() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow)).set_bold(true);
        spec
    }

    /// Cyan file path.
    pub fn path() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan));
        spec
    }

    /// Yellow line and column.
    pub fn position() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Yellow));
        spec
    }

    /// Dimmed matched source text.
    pub fn excerpt() -> ColorSpec {
        let mut spec = ColorSpec::new();
        spec.set_dimmed(true);
        spec
    }
}

#[cfg(test)]
#[path = "color_tests.rs"]
mod tests;
