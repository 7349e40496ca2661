//! Line classification
//!
//! Decides which pipeline a line of input belongs to. Checks run in a fixed
//! order and the first one that matches wins, so `x = 5 plus 5` is an
//! assignment (and fails as one) rather than a natural-language question.

use crate::canonicalizer::is_math_question;

/// Which pipeline handles a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `get_variables`
    ListVariables,
    /// `name = value`, both sides trimmed
    Assignment { name: &'a str, value: &'a str },
    /// An English sentence for the canonicalizer
    NaturalLanguage(&'a str),
    /// `d/dx(...)` or `integrate ...`
    Calculus(&'a str),
    /// `det(...)` or `inv(...)`
    LinearAlgebra(&'a str),
    /// A formal expression
    Expression(&'a str),
}

/// Classify one line of input
pub fn classify(line: &str) -> Route<'_> {
    let line = line.trim();

    if line == "get_variables" {
        return Route::ListVariables;
    }

    if let Some((name, value)) = line.split_once('=') {
        return Route::Assignment {
            name: name.trim(),
            value: value.trim(),
        };
    }

    if is_math_question(line) {
        return Route::NaturalLanguage(line);
    }

    if line.contains("d/dx") || line.contains("integrate") {
        return Route::Calculus(line);
    }

    if line.contains("det") || line.contains("inv") {
        return Route::LinearAlgebra(line);
    }

    Route::Expression(line)
}

impl Route<'_> {
    /// Short label used in logs and telemetry
    pub fn label(&self) -> &'static str {
        match self {
            Route::ListVariables => "list_variables",
            Route::Assignment { .. } => "assignment",
            Route::NaturalLanguage(_) => "natural_language",
            Route::Calculus(_) => "calculus",
            Route::LinearAlgebra(_) => "linear_algebra",
            Route::Expression(_) => "expression",
        }
    }
}
