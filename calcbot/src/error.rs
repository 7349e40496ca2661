use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why an expression was rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExpressionIssue {
    /// Nothing but whitespace
    Empty,
    /// The expression ends with a binary operator
    IncompleteOperation,
    /// A character outside the arithmetic alphabet
    DisallowedCharacter(char),
    /// A function argument that is neither a number nor a defined variable
    InvalidFunctionArgument { function: String, argument: String },
}

impl std::fmt::Display for ExpressionIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpressionIssue::Empty => write!(f, "Empty math expression."),
            ExpressionIssue::IncompleteOperation => write!(
                f,
                "Incomplete math expression. Please provide a complete operation."
            ),
            ExpressionIssue::DisallowedCharacter(c) => write!(
                f,
                "Invalid character '{}' in the math expression. Only numbers, math operations, and defined functions/constants are allowed.",
                c
            ),
            ExpressionIssue::InvalidFunctionArgument { function, argument } => write!(
                f,
                "Invalid argument '{}' for function '{}'. Only numbers or defined variables are allowed.",
                argument, function
            ),
        }
    }
}

/// Error types for the calcbot pipeline
///
/// Every failure of a routed line ends up as one of these variants. None of
/// them is fatal: the router turns each into a `Bot: Error - ...` reply and
/// leaves the variable store untouched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("{}", invalid_identifier_message(.name, .reserved))]
    InvalidIdentifier { name: String, reserved: bool },

    #[error("{0}")]
    InvalidExpression(ExpressionIssue),

    #[error("Undefined variable '{0}'. Please assign a value to it first.")]
    UndefinedVariable(String),

    #[error("Division by zero is not allowed.")]
    DivisionByZero,

    #[error("Invalid math expression at position {position}: {detail}")]
    SyntaxError { position: usize, detail: String },

    #[error("Error converting natural language to math expression: {0}")]
    ConversionError(String),

    #[error("Math domain error in '{function}': {detail}")]
    MathDomain { function: String, detail: String },

    #[error("Numeric result out of range.")]
    NumericOverflow,

    #[error("Could not convert '{0}' to a number.")]
    InvalidNumber(String),

    #[error("Error evaluating {domain} expression: {detail}")]
    Backend { domain: String, detail: String },

    #[error("Resource limit exceeded: {limit_name} (limit {limit_value}, actual {actual_value}). {suggestion}")]
    ResourceLimitExceeded {
        limit_name: String,
        limit_value: String,
        actual_value: String,
        suggestion: String,
    },
}

fn invalid_identifier_message(name: &str, reserved: &bool) -> String {
    if *reserved {
        format!(
            "Invalid variable name: '{}'. It is reserved for a built-in function or constant.",
            name
        )
    } else {
        format!(
            "Invalid variable name: '{}'. Variable names must be alphanumeric and start with a letter.",
            name
        )
    }
}

impl CalcError {
    /// Create a syntax error at a character position
    pub fn syntax(position: usize, detail: impl Into<String>) -> Self {
        Self::SyntaxError {
            position,
            detail: detail.into(),
        }
    }

    /// Create a domain error for a named function or operator
    pub fn domain(function: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::MathDomain {
            function: function.into(),
            detail: detail.into(),
        }
    }

    /// Stable machine-readable error code
    pub fn kind(&self) -> &'static str {
        match self {
            CalcError::InvalidIdentifier { .. } => "invalid_identifier",
            CalcError::InvalidExpression(_) => "invalid_expression",
            CalcError::UndefinedVariable(_) => "undefined_variable",
            CalcError::DivisionByZero => "division_by_zero",
            CalcError::SyntaxError { .. } => "syntax_error",
            CalcError::ConversionError(_) => "conversion_error",
            CalcError::MathDomain { .. } => "math_domain",
            CalcError::NumericOverflow => "numeric_overflow",
            CalcError::InvalidNumber(_) => "invalid_number",
            CalcError::Backend { .. } => "backend",
            CalcError::ResourceLimitExceeded { .. } => "resource_limit_exceeded",
        }
    }
}

impl Serialize for CalcError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let position = match self {
            CalcError::SyntaxError { position, .. } => Some(*position),
            _ => None,
        };
        let mut state = serializer.serialize_struct("CalcError", 3)?;
        state.serialize_field("kind", self.kind())?;
        state.serialize_field("message", &self.to_string())?;
        state.serialize_field("position", &position)?;
        state.end()
    }
}
