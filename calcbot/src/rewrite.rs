//! Shorter equivalent forms for repetitive expressions
//!
//! `suggest` works on canonical text and is purely advisory. It never fails:
//! text it cannot make sense of simply gets no suggestion.

use regex::Regex;
use std::sync::LazyLock;

static TRIG_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(sin|cos|tan)\(([^)]+)\)").expect("trig call pattern is valid"));
static LOG_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(log)\(([^)]+)\)").expect("log call pattern is valid"));

/// Suggest a shorter form of `expression`, if one of the rules applies
///
/// Rules are tried in order and the first match wins:
///
/// * `a + a + a` (three or more identical terms) becomes `a * 3`
/// * `a * a * a` (three or more identical factors) becomes `a ^ 3`
/// * two or more calls anywhere in the text, all `sin(x)` (likewise `cos`,
///   `tan`), become `n * sin(x)`
/// * two or more calls anywhere in the text, all `log(x)`, become `n * log(x)`
///
/// The call rules only look at the calls themselves, so `sin(90) + sin(90) + 1`
/// still gets `2 * sin(90)`.
pub fn suggest(expression: &str) -> Option<String> {
    let expression = expression.trim();
    if expression.is_empty() {
        return None;
    }

    repeated_addition(expression)
        .or_else(|| repeated_multiplication(expression))
        .or_else(|| repeated_call(expression, &TRIG_CALL))
        .or_else(|| repeated_call(expression, &LOG_CALL))
}

fn repeated_addition(expression: &str) -> Option<String> {
    let (terms, operators) = split_top_level(expression, &['+', '-']);
    if operators.iter().any(|op| *op != '+') || terms.len() < 3 {
        return None;
    }
    let term = all_identical(&terms)?;
    Some(format!("{} * {}", term, terms.len()))
}

fn repeated_multiplication(expression: &str) -> Option<String> {
    let (factors, operators) = split_top_level(expression, &['+', '-', '*', '/']);
    if operators.iter().any(|op| *op != '*') || factors.len() < 3 {
        return None;
    }
    let factor = all_identical(&factors)?;
    if is_compound(factor) {
        Some(format!("({}) ^ {}", factor, factors.len()))
    } else {
        Some(format!("{} ^ {}", factor, factors.len()))
    }
}

/// Every call matched by `pattern` is the same function with the same
/// argument, and there are at least two of them
fn repeated_call(expression: &str, pattern: &Regex) -> Option<String> {
    let calls: Vec<(&str, &str)> = pattern
        .captures_iter(expression)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str();
            let argument = caps.get(2)?.as_str().trim();
            Some((name, argument))
        })
        .collect();

    let (name, argument) = *calls.first()?;
    if calls.len() < 2 || calls.iter().any(|call| *call != (name, argument)) {
        return None;
    }
    Some(format!("{} * {}({})", calls.len(), name, argument))
}

fn all_identical<'a>(parts: &[&'a str]) -> Option<&'a str> {
    let first = *parts.first()?;
    if first.is_empty() || parts.iter().any(|part| *part != first) {
        return None;
    }
    Some(first)
}

/// A factor needs parentheses before `^` if it has its own top-level operator
///
/// A leading sign does not count: unary minus binds tighter than `^`.
fn is_compound(factor: &str) -> bool {
    let (_, operators) = split_top_level(factor, &['+', '-', '*', '/', '^']);
    !operators.is_empty()
}
/// Split at binary operators outside parentheses
///
/// Returns the trimmed operands and the operators found between them. An
/// operator counts as binary only when it follows an operand, so the `-` in
/// `5 * -2` stays part of its factor.
fn split_top_level<'a>(text: &'a str, separators: &[char]) -> (Vec<&'a str>, Vec<char>) {
    let mut parts = Vec::new();
    let mut operators = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    let mut after_operand = false;

    for (i, c) in text.char_indices() {
        match c {
            '(' => {
                depth += 1;
                after_operand = false;
            }
            ')' => {
                depth = depth.saturating_sub(1);
                after_operand = true;
            }
            c if c.is_whitespace() => {}
            c if depth == 0 && after_operand && separators.contains(&c) => {
                parts.push(text[start..i].trim());
                operators.push(c);
                start = i + c.len_utf8();
                after_operand = false;
            }
            c => after_operand = c.is_alphanumeric() || c == '.' || c == '_',
        }
    }
    parts.push(text[start..].trim());
    (parts, operators)
}
