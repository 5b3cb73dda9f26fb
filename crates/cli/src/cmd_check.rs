// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::path::{Path, PathBuf};
use std::time::Instant;

use scour::cli::{CheckArgs, Cli, OutputFormat};
use scour::color::resolve_color;
use scour::config::{self, Config};
use scour::discovery::{self, CONFIG_FILE};
use scour::error::{Error, ExitCode};
use scour::output::json::{self, JsonFormatter};
use scour::output::text::TextFormatter;
use scour::rule::{self, Rule};
use scour::scan::Scanner;
use scour::walker::{FileWalker, WalkedFile, WalkerConfig};

/// Loaded configuration and the directory rule globs are relative to.
pub struct Project {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
}

/// Find and load the config, starting discovery at `start`.
///
/// A discovered config roots the project at its directory; an explicit
/// `-C` config roots it at the working directory.
pub fn load_project(cli: &Cli, cwd: &Path, start: &Path) -> anyhow::Result<Project> {
    let explicit = cli.config.as_ref().map(|p| absolute(cwd, p));
    let config_path = discovery::resolve_config(explicit.as_deref(), start)?.ok_or_else(|| {
        Error::Config {
            message: format!("no {} found (use -C to specify one)", CONFIG_FILE),
            path: None,
        }
    })?;
    let config = config::load(&config_path)?;

    let root = match (&explicit, config_path.parent()) {
        (None, Some(dir)) => dir.to_path_buf(),
        _ => cwd.to_path_buf(),
    };
    tracing::debug!(root = %root.display(), config = %config_path.display(), "project loaded");

    Ok(Project {
        root,
        config_path,
        config,
    })
}

/// Build the configured rules, narrowed to `names` when given.
pub fn load_rules(project: &Project, names: &[String]) -> anyhow::Result<Vec<Rule>> {
    let rules = rule::build_rules(&project.config.rules)?;
    Ok(rule::select_rules(rules, names)?)
}

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let total_start = Instant::now();
    let cwd = std::env::current_dir()?;

    let targets: Vec<PathBuf> = if args.paths.is_empty() {
        vec![cwd.clone()]
    } else {
        args.paths.iter().map(|p| absolute(&cwd, p)).collect()
    };
    if let Some(missing) = targets.iter().find(|p| !p.exists()) {
        return Err(Error::Argument(format!("path not found: {}", missing.display())).into());
    }

    let start = match targets.first() {
        Some(path) if path.is_file() => path.parent().unwrap_or(cwd.as_path()).to_path_buf(),
        Some(path) => path.clone(),
        None => cwd.clone(),
    };
    let project = load_project(cli, &cwd, &start)?;
    let rules = load_rules(&project, &args.rules)?;

    let files = collect_files(&project, &targets, args.max_depth)?;
    tracing::debug!(files = files.len(), rules = rules.len(), "scanning");

    let output = Scanner::new(&rules).scan(&project.root, &files, json::timestamp());

    for result in &output.rules {
        for warning in &result.warnings {
            eprintln!("scour: warning: rule `{}`: {}", result.name, warning);
        }
    }

    match args.output {
        OutputFormat::Text => {
            let color = resolve_color(args.color, args.no_color);
            TextFormatter::stdout(color, args.format_options()).write(&output)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(&output)?;
        }
    }

    tracing::debug!(
        elapsed_ms = total_start.elapsed().as_millis() as u64,
        violations = output.total_violations(),
        "check finished"
    );

    // --strict: the first uncompilable rule becomes a config error
    if args.strict
        && let Some((rule, source)) = rules
            .iter()
            .find_map(|r| r.pattern.compile().err().map(|e| (r, e)))
    {
        return Err(Error::Pattern {
            rule: rule.name.clone(),
            source,
        }
        .into());
    }

    Ok(if output.passed {
        ExitCode::Success
    } else {
        ExitCode::ViolationsFound
    })
}

/// Walk every target, dropping duplicates and the config file itself.
fn collect_files(
    project: &Project,
    targets: &[PathBuf],
    max_depth: usize,
) -> anyhow::Result<Vec<WalkedFile>> {
    let walker = FileWalker::new(WalkerConfig {
        max_depth: Some(max_depth),
        ignore_patterns: project.config.project.ignore.clone(),
        ignore_base: Some(project.root.clone()),
        ..Default::default()
    });

    let config_path = canonical(&project.config_path);
    let mut files = Vec::new();
    for target in targets {
        let (walked, stats) = walker.walk(target)?;
        if stats.symlink_loops > 0 {
            tracing::warn!("{} symlink loop(s) under {}", stats.symlink_loops, target.display());
        }
        if stats.files_skipped_size > 0 {
            tracing::warn!("{} file(s) skipped (>10MB limit)", stats.files_skipped_size);
        }
        files.extend(
            walked
                .into_iter()
                .filter(|f| canonical(&f.path) != config_path),
        );
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    files.dedup_by(|a, b| a.path == b.path);
    Ok(files)
}

fn absolute(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
