//! Lexical and semantic checks run before evaluation
//!
//! The validator is deliberately stricter than the evaluator: anything it
//! accepts parses, but some evaluable expressions (such as nested function
//! calls) are rejected.

use crate::evaluator::DegreeCalls;
use crate::{
    parse, CalcError, CalcResult, ExpressionIssue, FunctionTable, ResourceLimits, VariableStore,
};
use regex::Regex;
use std::sync::Arc;

const NUMBER_PATTERN: &str = r"[+-]?(?:\d+(?:\.\d*)?|\.\d+)";

#[derive(Debug, Clone)]
pub struct Validator {
    table: Arc<FunctionTable>,
    limits: ResourceLimits,
    identifier: Regex,
    number: Regex,
    degrees: Regex,
    call: Regex,
    degree_calls: DegreeCalls,
}

impl Validator {
    pub fn new(table: Arc<FunctionTable>, limits: ResourceLimits) -> Self {
        let call = format!(r"\b({})\s*\(([^)]*)\)", table.function_names().join("|"));
        Self {
            identifier: Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("identifier pattern is valid"),
            number: Regex::new(&format!("^{}$", NUMBER_PATTERN)).expect("number pattern is valid"),
            degrees: Regex::new(&format!(r"^{}\s*degrees$", NUMBER_PATTERN))
                .expect("degrees pattern is valid"),
            call: Regex::new(&call).expect("call pattern is valid"),
            degree_calls: DegreeCalls::new(),
            table,
            limits,
        }
    }

    /// Check that `name` can be used as a variable
    pub fn validate_identifier(&self, name: &str) -> CalcResult<()> {
        if !self.identifier.is_match(name) {
            return Err(CalcError::InvalidIdentifier {
                name: name.to_string(),
                reserved: false,
            });
        }
        if self.table.is_reserved(name) {
            return Err(CalcError::InvalidIdentifier {
                name: name.to_string(),
                reserved: true,
            });
        }
        Ok(())
    }

    /// Check an expression before it is handed to the evaluator
    ///
    /// Rules run in order: emptiness, trailing operator, character allowlist,
    /// function arguments, and finally a trial parse.
    pub fn validate_expression(&self, text: &str, variables: &VariableStore) -> CalcResult<()> {
        let trimmed = text.trim();
        let last = match trimmed.chars().last() {
            Some(c) => c,
            None => return Err(CalcError::InvalidExpression(ExpressionIssue::Empty)),
        };

        if self.table.is_operator(last) {
            return Err(CalcError::InvalidExpression(
                ExpressionIssue::IncompleteOperation,
            ));
        }

        if let Some(c) = trimmed.chars().find(|c| !is_allowed_char(*c)) {
            return Err(CalcError::InvalidExpression(
                ExpressionIssue::DisallowedCharacter(c),
            ));
        }

        for caps in self.call.captures_iter(trimmed) {
            let function = &caps[1];
            let argument = caps[2].trim();
            if !self.is_valid_argument(function, argument, variables) {
                return Err(CalcError::InvalidExpression(
                    ExpressionIssue::InvalidFunctionArgument {
                        function: function.to_string(),
                        argument: argument.to_string(),
                    },
                ));
            }
        }

        let converted = self.degree_calls.rewrite(trimmed);
        parse(&converted, &self.table, &self.limits).map(|_| ())
    }

    fn is_valid_argument(&self, function: &str, argument: &str, variables: &VariableStore) -> bool {
        if self.number.is_match(argument) || variables.contains(argument) {
            return true;
        }
        let trigonometric = self
            .table
            .function(function)
            .is_some_and(|f| f.is_trigonometric());
        trigonometric && self.degrees.is_match(argument)
    }
}

fn is_allowed_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '.' | '+' | '-' | '*' | '/' | '^' | '(' | ')' | '_')
}
