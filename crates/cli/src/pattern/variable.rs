// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Placeholder variables and their post-match constraints.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use regex::Regex;

use super::cast::{cast_float, cast_int, is_int_literal};
use super::types::VarType;

/// A single accepted (or, when negated, rejected) value for a variable.
#[derive(Debug, Clone)]
pub enum VarPattern {
    /// Exact text.
    Text(String),
    /// Integer compared against the numeric cast of the capture.
    Integer(i64),
    /// Float compared against the numeric cast of the capture.
    Float(f64),
    /// Regex tested against the raw capture.
    Regex(Regex),
}

impl VarPattern {
    fn matches(&self, capture: &str, var_type: VarType) -> bool {
        match self {
            VarPattern::Text(text) => capture == text,
            VarPattern::Regex(re) => re.is_match(capture),
            VarPattern::Integer(n) => numeric_cast(capture, var_type, true) == Numeric::Int(*n),
            VarPattern::Float(f) => numeric_cast(capture, var_type, false) == Numeric::Float(*f),
        }
    }
}

impl fmt::Display for VarPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarPattern::Text(text) => write!(f, "{:?}", text),
            VarPattern::Integer(n) => write!(f, "{}", n),
            VarPattern::Float(x) => write!(f, "{:?}", x),
            VarPattern::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

/// A declared variable: its constraints and resolved type.
#[derive(Debug, Clone, Default)]
pub struct VariableSpec {
    patterns: Vec<VarPattern>,
    negated: bool,
    var_type: VarType,
}

impl VariableSpec {
    /// Create a variable constrained to (or, if `negated`, away from) `patterns`.
    pub fn new(patterns: Vec<VarPattern>, negated: bool) -> Self {
        Self {
            patterns,
            negated,
            var_type: VarType::Generic,
        }
    }

    /// A variable that accepts any non-empty capture.
    pub fn unconstrained() -> Self {
        Self::default()
    }

    pub fn patterns(&self) -> &[VarPattern] {
        &self.patterns
    }

    pub fn negated(&self) -> bool {
        self.negated
    }

    /// Type resolved while compiling the pattern (`Generic` before compilation).
    pub fn var_type(&self) -> VarType {
        self.var_type
    }

    /// Test one captured value against this variable's constraints.
    ///
    /// With no patterns every value passes. Otherwise the value passes if
    /// any pattern matches, or if none does when the variable is negated.
    pub fn test(&self, capture: &str) -> bool {
        if self.patterns.is_empty() {
            return true;
        }
        let any = self
            .patterns
            .iter()
            .any(|p| p.matches(capture, self.var_type));
        any != self.negated
    }

    fn with_type(mut self, var_type: VarType) -> Self {
        self.var_type = var_type;
        self
    }
}

/// Numeric value of a capture, compared across int/float by value.
#[derive(Debug, Clone, Copy)]
enum Numeric {
    Int(i64),
    Float(f64),
}

impl PartialEq for Numeric {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Numeric::Int(a), Numeric::Int(b)) => a == b,
            (a, b) => a.as_f64() == b.as_f64(),
        }
    }
}

impl Numeric {
    fn as_f64(self) -> f64 {
        match self {
            Numeric::Int(n) => n as f64,
            Numeric::Float(f) => f,
        }
    }
}

/// Cast a capture according to the variable type, falling back to the
/// candidate's own kind for non-numeric types.
fn numeric_cast(capture: &str, var_type: VarType, integer_candidate: bool) -> Numeric {
    match var_type {
        VarType::Int => Numeric::Int(cast_int(capture)),
        VarType::Float => Numeric::Float(cast_float(capture)),
        VarType::Number if is_int_literal(capture) => Numeric::Int(cast_int(capture)),
        VarType::Number => Numeric::Float(cast_float(capture)),
        _ if integer_candidate => Numeric::Int(cast_int(capture)),
        _ => Numeric::Float(cast_float(capture)),
    }
}

/// Collects placeholder types during a scan, then freezes the variable map.
///
/// The caller's specs are never mutated; `finish` returns typed copies.
pub(crate) struct VariableSetBuilder<'a> {
    declared: &'a BTreeMap<String, VariableSpec>,
    types: HashMap<String, VarType>,
    occurrences: HashMap<String, usize>,
}

/// How a placeholder occurrence resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Occurrence {
    /// Type used to build this occurrence's fragment.
    pub var_type: VarType,
    /// Capture group name for this occurrence.
    pub capture: String,
    /// True for the first occurrence of the name in the pattern.
    pub first: bool,
}

impl<'a> VariableSetBuilder<'a> {
    pub fn new(declared: &'a BTreeMap<String, VariableSpec>) -> Self {
        Self {
            declared,
            types: HashMap::new(),
            occurrences: HashMap::new(),
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains_key(name)
    }

    /// Record an occurrence of `name`, typed explicitly or not.
    ///
    /// The first explicitly typed occurrence fixes the variable's type;
    /// untyped occurrences reuse it. Repeated occurrences get distinct
    /// capture names (`name`, `name__2`, ...).
    pub fn occurrence(&mut self, name: &str, explicit: Option<VarType>) -> Occurrence {
        if let Some(ty) = explicit
            && ty != VarType::Generic
        {
            self.types.entry(name.to_string()).or_insert(ty);
        }
        let var_type = explicit
            .or_else(|| self.types.get(name).copied())
            .unwrap_or(VarType::Generic);

        let count = self.occurrences.entry(name.to_string()).or_insert(0);
        *count += 1;
        let capture = if *count == 1 {
            name.to_string()
        } else {
            format!("{}__{}", name, count)
        };

        Occurrence {
            var_type,
            capture,
            first: *count == 1,
        }
    }

    /// Freeze the declared variables with their resolved types.
    pub fn finish(self) -> BTreeMap<String, VariableSpec> {
        self.declared
            .iter()
            .map(|(name, spec)| {
                let ty = self.types.get(name).copied().unwrap_or(VarType::Generic);
                (name.clone(), spec.clone().with_type(ty))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "variable_tests.rs"]
mod tests;
