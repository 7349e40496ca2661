//! Tree-walking evaluation
//!
//! Recursively evaluates expressions to produce a value.

use crate::ast::{BinaryOperator, Expr};
use crate::{CalcError, CalcResult, VariableStore};

/// Evaluate an expression tree
///
/// Variables resolve through the store. Constants were already folded into
/// literals by the parser.
pub fn evaluate_expression(expr: &Expr, variables: &VariableStore) -> CalcResult<f64> {
    match expr {
        Expr::Literal(value) => Ok(*value),
        Expr::Variable(name) => variables.get(name),
        Expr::Negate(operand) => Ok(-evaluate_expression(operand, variables)?),
        Expr::Binary { op, left, right } => {
            let left = evaluate_expression(left, variables)?;
            let right = evaluate_expression(right, variables)?;
            binary_operation(left, *op, right)
        }
        Expr::Call { function, argument } => {
            let argument = evaluate_expression(argument, variables)?;
            let result = function.apply(argument)?;
            check_finite(function.name(), result)
        }
    }
}

/// Apply a binary operator to two values
pub fn binary_operation(left: f64, op: BinaryOperator, right: f64) -> CalcResult<f64> {
    let result = match op {
        BinaryOperator::Add => left + right,
        BinaryOperator::Subtract => left - right,
        BinaryOperator::Multiply => left * right,
        BinaryOperator::Divide => {
            if right == 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            left / right
        }
        BinaryOperator::Power => {
            if left == 0.0 && right < 0.0 {
                return Err(CalcError::DivisionByZero);
            }
            left.powf(right)
        }
    };
    check_finite(&op.to_string(), result)
}

fn check_finite(operation: &str, value: f64) -> CalcResult<f64> {
    if value.is_nan() {
        Err(CalcError::domain(operation, "result is not a real number"))
    } else if value.is_infinite() {
        Err(CalcError::NumericOverflow)
    } else {
        Ok(value)
    }
}
