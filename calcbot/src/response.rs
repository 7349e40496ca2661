//! Replies and their rendering
//!
//! Every routed line produces exactly one [`Reply`]. `Display` gives the
//! `Bot:`-prefixed text a person sees; `Serialize` gives the structured form
//! used by the CLI's `--json` mode and the HTTP server.

use crate::variables::Variable;
use crate::CalcError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Variables {
        variables: Vec<Variable>,
    },
    Assigned {
        name: String,
        value: f64,
        /// The value as the user typed it
        raw: String,
    },
    Evaluated {
        expression: String,
        value: f64,
        #[serde(skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
    },
    /// Text from the symbolic backend, e.g. `Derivative: 2*x + 3`
    Symbolic {
        text: String,
    },
    Error {
        error: CalcError,
    },
}

impl Reply {
    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}

impl From<CalcError> for Reply {
    fn from(error: CalcError) -> Self {
        Reply::Error { error }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Variables { variables } if variables.is_empty() => {
                write!(f, "Bot: No variables defined.")
            }
            Reply::Variables { variables } => {
                write!(f, "Bot: Defined Variables:")?;
                for variable in variables {
                    write!(f, "\n- {}: {}", variable.name, format_number(variable.value))?;
                }
                Ok(())
            }
            Reply::Assigned { name, raw, .. } => {
                write!(f, "Bot: Variable '{}' set to {}.", name, raw)
            }
            Reply::Evaluated {
                value, suggestion, ..
            } => {
                write!(f, "Bot: The result is {}.", format_number(*value))?;
                if let Some(suggestion) = suggestion {
                    write!(f, " Suggested optimization: {}", suggestion)?;
                }
                Ok(())
            }
            Reply::Symbolic { text } => write!(f, "Bot: {}", text),
            Reply::Error { error } => write!(f, "Bot: Error - {}", error),
        }
    }
}

/// Render a number the way replies show it
///
/// Integral values keep one decimal place (`10.0`); everything else uses the
/// shortest representation that round-trips.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
