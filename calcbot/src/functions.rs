//! Supported functions, constants and operators
//!
//! The table is built once and shared read-only by the validator, the
//! canonicalizer and the evaluator.

use crate::{CalcError, CalcResult};
use std::collections::HashMap;
use std::f64::consts;
use std::fmt;

/// Largest `n` whose factorial is representable as a finite `f64`
const MAX_FACTORIAL: u32 = 170;

/// Convert an angle in degrees to radians as `degrees × π / 180`
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * consts::PI / 180.0
}

/// A single-argument built-in function
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    Sqrt,
    Log,
    Log10,
    Sin,
    Cos,
    Tan,
    Factorial,
    Abs,
    Exp,
    Radians,
}

impl Function {
    pub const ALL: [Function; 10] = [
        Function::Sqrt,
        Function::Log,
        Function::Log10,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Factorial,
        Function::Abs,
        Function::Exp,
        Function::Radians,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Function::Sqrt => "sqrt",
            Function::Log => "log",
            Function::Log10 => "log10",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Factorial => "factorial",
            Function::Abs => "abs",
            Function::Exp => "exp",
            Function::Radians => "radians",
        }
    }

    pub fn is_trigonometric(&self) -> bool {
        matches!(self, Function::Sin | Function::Cos | Function::Tan)
    }

    /// Apply the function, reporting arguments outside its domain
    pub fn apply(&self, x: f64) -> CalcResult<f64> {
        match self {
            Function::Sqrt => {
                if x < 0.0 {
                    return Err(CalcError::domain(
                        self.name(),
                        "square root of a negative number",
                    ));
                }
                Ok(x.sqrt())
            }
            Function::Log | Function::Log10 => {
                if x <= 0.0 {
                    return Err(CalcError::domain(
                        self.name(),
                        "logarithm of a non-positive number",
                    ));
                }
                Ok(if *self == Function::Log {
                    x.ln()
                } else {
                    x.log10()
                })
            }
            Function::Sin => Ok(x.sin()),
            Function::Cos => Ok(x.cos()),
            Function::Tan => Ok(x.tan()),
            Function::Factorial => factorial(x),
            Function::Abs => Ok(x.abs()),
            Function::Exp => Ok(x.exp()),
            Function::Radians => Ok(degrees_to_radians(x)),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn factorial(x: f64) -> CalcResult<f64> {
    if x < 0.0 || x.fract() != 0.0 {
        return Err(CalcError::domain(
            "factorial",
            "only defined for non-negative integral values",
        ));
    }
    if x > MAX_FACTORIAL as f64 {
        return Err(CalcError::NumericOverflow);
    }
    Ok((2..=x as u32).fold(1.0, |acc, n| acc * n as f64))
}

/// Immutable lookup table of the names the grammar understands
#[derive(Debug, Clone)]
pub struct FunctionTable {
    functions: HashMap<&'static str, Function>,
    constants: HashMap<&'static str, f64>,
    operators: Vec<char>,
}

impl Default for FunctionTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl FunctionTable {
    /// The standard table: ten functions, `pi` and `e`, five binary operators
    pub fn standard() -> Self {
        let functions = Function::ALL.iter().map(|f| (f.name(), *f)).collect();
        let constants = HashMap::from([("pi", consts::PI), ("e", consts::E)]);
        Self {
            functions,
            constants,
            operators: vec!['+', '-', '*', '/', '^'],
        }
    }

    pub fn function(&self, name: &str) -> Option<Function> {
        self.functions.get(name).copied()
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        self.constants.get(name).copied()
    }

    /// Names that may not be used as variables
    pub fn is_reserved(&self, name: &str) -> bool {
        self.functions.contains_key(name) || self.constants.contains_key(name)
    }

    pub fn is_operator(&self, c: char) -> bool {
        self.operators.contains(&c)
    }

    pub fn operators(&self) -> &[char] {
        &self.operators
    }

    /// Function names, longest first so alternations prefer `log10` over `log`
    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.functions.keys().copied().collect();
        names.sort_by(|a, b| b.len().cmp(&a.len()).then(a.cmp(b)));
        names
    }
}
