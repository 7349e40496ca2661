//! Tokenizer for canonical expressions

use crate::ast::BinaryOperator;
use crate::{CalcError, CalcResult, Function, FunctionTable};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Identifier(String),
    Function(Function),
    Operator(BinaryOperator),
    LeftParen,
    RightParen,
}

/// A token and the character offset where it starts
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Split `text` into tokens, left to right
///
/// Names found in the function table become `Function` tokens; every other
/// name (constants included) is an `Identifier`.
pub fn tokenize(text: &str, table: &FunctionTable) -> CalcResult<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() || c == '.' {
            let start = i;
            let mut seen_point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                if chars[i] == '.' {
                    if seen_point {
                        return Err(CalcError::syntax(i, "unexpected second decimal point"));
                    }
                    seen_point = true;
                }
                i += 1;
            }
            let literal: String = chars[start..i].iter().collect();
            if literal == "." {
                return Err(CalcError::syntax(start, "expected digits around '.'"));
            }
            let value: f64 = literal
                .parse()
                .map_err(|_| CalcError::syntax(start, format!("invalid number '{}'", literal)))?;
            if !value.is_finite() {
                return Err(CalcError::syntax(start, format!("number '{}' is too large", literal)));
            }
            tokens.push(Token {
                kind: TokenKind::Number(value),
                position: start,
            });
            continue;
        }

        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let kind = match table.function(&word) {
                Some(function) => TokenKind::Function(function),
                None => TokenKind::Identifier(word),
            };
            tokens.push(Token {
                kind,
                position: start,
            });
            continue;
        }

        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            _ => match BinaryOperator::from_char(c) {
                Some(op) => TokenKind::Operator(op),
                None => {
                    return Err(CalcError::syntax(
                        i,
                        format!("unexpected character '{}'", c),
                    ))
                }
            },
        };
        tokens.push(Token { kind, position: i });
        i += 1;
    }

    Ok(tokens)
}
