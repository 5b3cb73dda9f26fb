// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Explain command: show how each rule's pattern compiles.

use std::io::Write;

use scour::cli::{Cli, ExplainArgs};
use scour::error::ExitCode;
use scour::pattern::VariableSpec;
use scour::rule::Rule;

use crate::cmd_check::{load_project, load_rules};

/// Run the explain command.
pub fn run(cli: &Cli, args: &ExplainArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let project = load_project(cli, &cwd, &cwd)?;
    let rules = load_rules(&project, &args.rules)?;

    let mut stdout = std::io::stdout().lock();
    let mut failed = false;
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            writeln!(stdout)?;
        }
        failed |= !explain_rule(&mut stdout, rule)?;
    }

    Ok(if failed {
        ExitCode::ConfigError
    } else {
        ExitCode::Success
    })
}

/// Write one rule. Returns false if its pattern does not compile.
fn explain_rule(out: &mut impl Write, rule: &Rule) -> std::io::Result<bool> {
    writeln!(out, "{} ({})", rule.name, rule.pattern.kind().name())?;
    writeln!(out, "  pattern:  {}", rule.pattern.source())?;

    let matcher = match rule.pattern.compile() {
        Ok(matcher) => matcher,
        Err(e) => {
            writeln!(out, "  error:    {}", e)?;
            return Ok(false);
        }
    };

    writeln!(out, "  engine:   {}", matcher.engine().name())?;
    writeln!(out, "  regex:    {}", matcher.regex())?;
    for (name, spec) in matcher.variables() {
        writeln!(out, "  ${{{}}}: {}", name, describe_variable(spec))?;
    }
    for warning in matcher.warnings() {
        writeln!(out, "  warning:  {}", warning)?;
    }
    Ok(true)
}

fn describe_variable(spec: &VariableSpec) -> String {
    if spec.patterns().is_empty() {
        return spec.var_type().to_string();
    }
    let values: Vec<String> = spec.patterns().iter().map(ToString::to_string).collect();
    format!(
        "{}, {} {}",
        spec.var_type(),
        if spec.negated() { "none of" } else { "one of" },
        values.join(", ")
    )
}
