//! # calcbot engine
//!
//! **A calculator you can talk to**
//!
//! calcbot accepts one line of free-form text at a time: a formal arithmetic
//! expression, an English sentence describing a calculation, a variable
//! assignment, or a calculus / linear-algebra request. Each line produces a
//! numeric result, a stored variable binding, or an error, optionally with a
//! suggested shorter form of the expression.
//!
//! ## Quick Start
//!
//! ```rust
//! use calcbot::Engine;
//!
//! let mut engine = Engine::new();
//!
//! assert_eq!(engine.respond("x = 10"), "Bot: Variable 'x' set to 10.");
//! assert_eq!(engine.respond("x + 5"), "Bot: The result is 15.0.");
//! assert_eq!(engine.respond("What is 5 plus 5?"), "Bot: The result is 10.0.");
//! assert_eq!(
//!     engine.respond("5 + 5 + 5"),
//!     "Bot: The result is 15.0. Suggested optimization: 5 * 3"
//! );
//! ```
//!
//! ## Pipeline
//!
//! Natural-language input goes through the [`Canonicalizer`] first. Both paths
//! then run the [`Validator`] and the [`Evaluator`], which tokenizes, parses
//! and walks the expression tree. No input is ever handed to a general-purpose
//! interpreter. The rewrite suggester ([`suggest`]) runs last and is advisory.

pub mod ast;
pub mod canonicalizer;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod resource_limits;
pub mod response;
pub mod rewrite;
pub mod router;
pub mod spiking;
pub mod symbolic;
pub mod validator;
pub mod variables;

pub use ast::{BinaryOperator, Expr};
pub use canonicalizer::Canonicalizer;
pub use config::{EngineConfig, TelemetryConfig};
pub use engine::Engine;
pub use error::{CalcError, ExpressionIssue};
pub use evaluator::Evaluator;
pub use functions::{Function, FunctionTable};
pub use parser::parse;
pub use resource_limits::ResourceLimits;
pub use response::{format_number, Reply};
pub use rewrite::suggest;
pub use router::{classify, Route};
pub use spiking::{SpikingNetwork, StepStatistics};
pub use symbolic::{BackendError, BuiltinBackend, SymbolicBackend};
pub use validator::Validator;
pub use variables::VariableStore;

/// Result type for calcbot operations
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests;
