use ariadne::{Color, Label, Report, ReportKind, Source};
use calcbot::{CalcError, ExpressionIssue};
use std::fmt;

const SOURCE_ID: &str = "<input>";

/// An expression rejected by `calcbot check`, kept with its source text
#[derive(Debug)]
pub struct ExpressionFailure {
    pub source: String,
    pub error: CalcError,
}

impl fmt::Display for ExpressionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for ExpressionFailure {}

/// Format a CalcError with fancy terminal output using Ariadne
///
/// Errors that point at a character get a labelled source snippet; the rest
/// are printed as plain text.
pub fn format_error(source: &str, error: &CalcError) -> String {
    match error {
        CalcError::SyntaxError { position, detail } => {
            render(source, *position, &format!("Syntax error: {}", detail), detail)
        }
        CalcError::InvalidExpression(ExpressionIssue::DisallowedCharacter(c)) => {
            match source.chars().position(|ch| ch == *c) {
                Some(position) => render(source, position, &error.to_string(), "not allowed here"),
                None => format!("Error: {}", error),
            }
        }
        CalcError::InvalidExpression(ExpressionIssue::IncompleteOperation) => {
            let end = source.trim_end().chars().count().saturating_sub(1);
            render(source, end, &error.to_string(), "operator has no right operand")
        }
        CalcError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
        other => format!("Error: {}", other),
    }
}

fn render(source: &str, position: usize, message: &str, label: &str) -> String {
    let length = source.chars().count();
    let start = position.min(length.saturating_sub(1));
    let end = (start + 1).min(length.max(1));

    let mut output = Vec::new();
    let report = Report::build(ReportKind::Error, SOURCE_ID, start)
        .with_message(message)
        .with_label(
            Label::new((SOURCE_ID, start..end))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish();

    match report.write((SOURCE_ID, Source::from(source)), &mut output) {
        Ok(_) => String::from_utf8_lossy(&output).to_string(),
        Err(_) => format!("Error: {}", message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_shows_source_line() {
        let error = CalcError::syntax(3, "missing closing ')'");
        let output = format_error("(1 + 2", &error);
        assert!(output.contains("Syntax error: missing closing ')'"));
        assert!(output.contains("(1 + 2"));
    }

    #[test]
    fn test_disallowed_character_is_labelled() {
        let error = CalcError::InvalidExpression(ExpressionIssue::DisallowedCharacter('$'));
        let output = format_error("5 $ 3", &error);
        assert!(output.contains("Invalid character '$'"));
        assert!(output.contains("not allowed here"));
    }

    #[test]
    fn test_plain_errors_have_no_snippet() {
        let output = format_error("y + 1", &CalcError::UndefinedVariable("y".to_string()));
        assert_eq!(
            output,
            "Error: Undefined variable 'y'. Please assign a value to it first."
        );
    }
}
