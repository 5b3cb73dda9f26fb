// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <rule>: FAIL
//!   <file>:<line>:<column>: <message>
//!     <matched text>
//! <rule>: SKIP
//!   <compile error>
//! ```


use termcolor::{ColorChoice, StandardStream, WriteColor};

use super::FormatOptions;
use crate::color::scheme;
use crate::scan::{RuleResult, ScanOutput, Violation};

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    writer: W,
    options: FormatOptions,
    violations_shown: usize,
    truncated: bool,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice, options: FormatOptions) -> Self {
        Self::new(StandardStream::stdout(color_choice), options)
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            violations_shown: 0,
            truncated: false,
        }
    }

    /// Write every rule result, then the truncation notice and summary.
    pub fn write(&mut self, output: &ScanOutput) -> std::io::Result<()> {
        for result in &output.rules {
            if self.write_rule(result)? {
                break;
            }
        }
        self.write_truncation_message(output.total_violations())?;
        self.write_summary(output)
    }

    /// Write a single rule result. Returns true once the limit is reached.
    pub fn write_rule(&mut self, result: &RuleResult) -> std::io::Result<bool> {
        if result.skipped {
            self.write_status(&result.name, "SKIP")?;
            if let Some(error) = &result.error {
                writeln!(self.writer, "  {}", error)?;
            }
            return Ok(false);
        }
        if result.passed {
            return Ok(false);
        }

        self.write_status(&result.name, "FAIL")?;
        for violation in &result.violations {
            if let Some(limit) = self.options.limit
                && self.violations_shown >= limit
            {
                self.truncated = true;
                return Ok(true);
            }
            self.write_violation(violation)?;
            self.violations_shown += 1;
        }
        Ok(false)
    }

    fn write_status(&mut self, name: &str, status: &str) -> std::io::Result<()> {
        self.writer.set_color(&scheme::rule_name())?;
        write!(self.writer, "{}", name)?;
        self.writer.reset()?;

        write!(self.writer, ": ")?;
        let color = if status == "SKIP" {
            scheme::skip()
        } else {
            scheme::fail()
        };
        self.writer.set_color(&color)?;
        write!(self.writer, "{}", status)?;
        self.writer.reset()?;
        writeln!(self.writer)
    }

    fn write_violation(&mut self, v: &Violation) -> std::io::Result<()> {
        write!(self.writer, "  ")?;

        self.writer.set_color(&scheme::path())?;
        write!(self.writer, "{}", v.file.display())?;
        self.writer.reset()?;

        write!(self.writer, ":")?;
        self.writer.set_color(&scheme::position())?;
        write!(self.writer, "{}:{}", v.line, v.column)?;
        self.writer.reset()?;
        writeln!(self.writer, ": {}", v.message)?;

        // Only the first line of a multi-line match
        let excerpt = v.text.lines().next().unwrap_or_default().trim_end();
        if !excerpt.is_empty() {
            write!(self.writer, "    ")?;
            self.writer.set_color(&scheme::excerpt())?;
            write!(self.writer, "{}", excerpt)?;
            self.writer.reset()?;
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Write the summary line.
    pub fn write_summary(&mut self, output: &ScanOutput) -> std::io::Result<()> {
        let passed = output.rules.iter().filter(|r| r.passed).count();
        let skipped = output.skipped_rules().count();
        let failed = output.rules.len() - passed - skipped;

        write!(
            self.writer,
            "{} rule{} passed",
            passed,
            if passed == 1 { "" } else { "s" }
        )?;
        if failed > 0 {
            write!(self.writer, ", {} failed", failed)?;
        }
        if skipped > 0 {
            write!(self.writer, ", {} skipped", skipped)?;
        }
        writeln!(self.writer)
    }

    /// Write truncation message if applicable.
    pub fn write_truncation_message(&mut self, total: usize) -> std::io::Result<()> {
        if let Some(limit) = self.options.limit
            && self.truncated
            && total > limit
        {
            writeln!(
                self.writer,
                "Stopped after {} of {} violations. Use --no-limit to see all.",
                limit, total
            )?;
        }
        Ok(())
    }

    pub fn was_truncated(&self) -> bool {
        self.truncated
    }

    pub fn violations_shown(&self) -> usize {
        self.violations_shown
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
