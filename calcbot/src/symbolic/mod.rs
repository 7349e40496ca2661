//! Calculus and linear-algebra requests
//!
//! The engine talks to a [`SymbolicBackend`] rather than to a concrete
//! implementation, so a different computer-algebra system can be plugged in.
//! [`BuiltinBackend`] covers the common cases:
//!
//! - `d/dx(x^2 + 3x)` gives `Derivative: 2*x + 3`
//! - `integrate(cos(x), x)` gives `Integral: sin(x)`
//! - `det([[1, 2], [3, 4]])` gives `Determinant: -2.0`
//! - `inv([[2, 0], [0, 2]])` gives `Inverse: [[0.5, 0.0], [0.0, 0.5]]`

pub mod calculus;
pub mod matrix;
pub mod parse;
pub mod sym;
pub mod timeout;

use crate::{format_number, ResourceLimits};
use matrix::Matrix;
use parse::{CalculusRequest, MatrixRequest};
use thiserror::Error;
use tracing::debug;

pub use timeout::{call_with_timeout, BackendCall};

/// Failures reported by a symbolic backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("could not parse input: {0}")]
    Parse(String),

    #[error("unsupported integrand '{0}'")]
    UnsupportedIntegrand(String),

    #[error("matrix is singular")]
    SingularMatrix,

    #[error("matrix rows have different lengths")]
    RaggedMatrix,

    #[error("matrix must be square, got {rows}x{columns}")]
    NotSquare { rows: usize, columns: usize },

    #[error("expression is nested more than {0} levels deep")]
    TooDeep(usize),

    #[error("timed out after {0} ms")]
    Timeout(u64),

    #[error("backend worker failed: {0}")]
    Worker(String),
}

/// A computer-algebra collaborator
///
/// Both methods return the reply text without the `Bot: ` prefix.
pub trait SymbolicBackend: Send + Sync {
    fn calculus(&self, input: &str) -> Result<String, BackendError>;
    fn linear_algebra(&self, input: &str) -> Result<String, BackendError>;
}

#[derive(Debug, Clone, Copy)]
pub struct BuiltinBackend {
    max_depth: usize,
}

impl Default for BuiltinBackend {
    fn default() -> Self {
        Self::with_limits(&ResourceLimits::default())
    }
}

impl BuiltinBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bound parsed expressions by `max_expression_depth`
    pub fn with_limits(limits: &ResourceLimits) -> Self {
        Self {
            max_depth: limits.max_expression_depth,
        }
    }
}

impl SymbolicBackend for BuiltinBackend {
    fn calculus(&self, input: &str) -> Result<String, BackendError> {
        match parse::parse_calculus(input, self.max_depth)? {
            CalculusRequest::Derivative { variable, expr } => {
                debug!(expression = %expr, variable = %variable, "differentiating");
                let result = calculus::differentiate(&expr, &variable);
                Ok(format!("Derivative: {}", result))
            }
            CalculusRequest::Integral { variable, expr } => {
                debug!(expression = %expr, variable = %variable, "integrating");
                let result = calculus::integrate(&expr, &variable)?;
                Ok(format!("Integral: {}", result))
            }
        }
    }

    fn linear_algebra(&self, input: &str) -> Result<String, BackendError> {
        match parse::parse_linear_algebra(input)? {
            MatrixRequest::Determinant(rows) => {
                let det = Matrix::from_rows(rows)?.determinant();
                Ok(format!("Determinant: {}", format_number(matrix::clean(det))))
            }
            MatrixRequest::Inverse(rows) => {
                let inverse = Matrix::from_rows(rows)?.inverse()?;
                Ok(format!("Inverse: {}", inverse))
            }
        }
    }
}
