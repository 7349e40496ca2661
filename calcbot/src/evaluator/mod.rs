//! Expression evaluation
//!
//! Evaluates canonical expressions by:
//! 1. Rewriting `sin|cos|tan(<number> degrees)` to radians
//! 2. Tokenizing and parsing into an expression tree
//! 3. Walking the tree against the variable store

pub mod expression;

use crate::functions::degrees_to_radians;
use crate::{parse, CalcResult, FunctionTable, ResourceLimits, VariableStore};
use regex::{Captures, Regex};
use std::sync::Arc;
use tracing::debug;

/// Rewrites `sin|cos|tan(<number> degrees)` calls to take radians
#[derive(Debug, Clone)]
pub struct DegreeCalls {
    pattern: Regex,
}

impl Default for DegreeCalls {
    fn default() -> Self {
        Self::new()
    }
}

impl DegreeCalls {
    pub fn new() -> Self {
        let pattern = Regex::new(
            r"\b(sin|cos|tan)\s*\(\s*([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*degrees\s*\)",
        )
        .expect("degree call pattern is valid");
        Self { pattern }
    }

    pub fn rewrite(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                let degrees: f64 = caps[2].parse().unwrap_or(0.0);
                format!("{}({})", &caps[1], degrees_to_radians(degrees))
            })
            .into_owned()
    }
}

/// Evaluates canonical expressions against a variable store
#[derive(Debug, Clone)]
pub struct Evaluator {
    table: Arc<FunctionTable>,
    limits: ResourceLimits,
    degree_calls: DegreeCalls,
}

impl Evaluator {
    pub fn new(table: Arc<FunctionTable>, limits: ResourceLimits) -> Self {
        Self {
            table,
            limits,
            degree_calls: DegreeCalls::new(),
        }
    }

    /// Evaluate canonical expression text
    ///
    /// Never mutates the store; assignment is the router's job.
    pub fn evaluate(&self, text: &str, variables: &VariableStore) -> CalcResult<f64> {
        let text = self.degree_calls.rewrite(text);
        let expr = parse(&text, &self.table, &self.limits)?;
        debug!(expression = %expr, "parsed expression");
        expression::evaluate_expression(&expr, variables)
    }
}
