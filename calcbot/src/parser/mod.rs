//! Recursive-descent parser for canonical expressions
//!
//! ```text
//! expression := term (("+" | "-") term)*
//! term       := power (("*" | "/") power)*
//! power      := unary ("^" power)?
//! unary      := "-" unary | primary
//! primary    := NUMBER | IDENT | FUNCTION "(" expression ")" | "(" expression ")"
//! ```
//!
//! Unary minus binds tighter than `^`, and `^` is right-associative.
//!
//! `max_expression_depth` bounds the height of the tree, not just the
//! parenthesis nesting: each chained `+ - * /` deepens the left-leaning tree
//! by one level and is counted like a nested group.

pub mod lexer;

use crate::ast::{BinaryOperator, Expr};
use crate::{CalcError, CalcResult, FunctionTable, ResourceLimits};
use lexer::{tokenize, Token, TokenKind};

/// Parse canonical expression text into an expression tree
pub fn parse(text: &str, table: &FunctionTable, limits: &ResourceLimits) -> CalcResult<Expr> {
    let tokens = tokenize(text, table)?;
    if tokens.is_empty() {
        return Err(CalcError::syntax(0, "empty expression"));
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        max_depth: limits.max_expression_depth,
        end: text.chars().count(),
        table,
    };
    let expr = parser.expression()?;

    if let Some(token) = parser.peek() {
        return Err(CalcError::syntax(
            token.position,
            format!("unexpected {}", describe(&token.kind)),
        ));
    }
    Ok(expr)
}

struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    max_depth: usize,
    end: usize,
    table: &'a FunctionTable,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn peek_operator(&self) -> Option<BinaryOperator> {
        match self.peek() {
            Some(Token {
                kind: TokenKind::Operator(op),
                ..
            }) => Some(*op),
            _ => None,
        }
    }

    fn push_depth(&mut self) -> CalcResult<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(CalcError::ResourceLimitExceeded {
                limit_name: "max_expression_depth".to_string(),
                limit_value: self.max_depth.to_string(),
                actual_value: self.depth.to_string(),
                suggestion: "Split the calculation into smaller steps".to_string(),
            });
        }
        Ok(())
    }

    fn expression(&mut self) -> CalcResult<Expr> {
        self.push_depth()?;
        let mut left = self.term()?;
        let mut chain = 0;
        while let Some(op @ (BinaryOperator::Add | BinaryOperator::Subtract)) = self.peek_operator()
        {
            self.pos += 1;
            self.push_depth()?;
            chain += 1;
            let right = self.term()?;
            left = Expr::binary(op, left, right);
        }
        self.depth -= chain + 1;
        Ok(left)
    }

    fn term(&mut self) -> CalcResult<Expr> {
        let mut left = self.power()?;
        let mut chain = 0;
        while let Some(op @ (BinaryOperator::Multiply | BinaryOperator::Divide)) =
            self.peek_operator()
        {
            self.pos += 1;
            self.push_depth()?;
            chain += 1;
            let right = self.power()?;
            left = Expr::binary(op, left, right);
        }
        self.depth -= chain;
        Ok(left)
    }

    fn power(&mut self) -> CalcResult<Expr> {
        let base = self.unary()?;
        if self.peek_operator() == Some(BinaryOperator::Power) {
            self.pos += 1;
            self.push_depth()?;
            let exponent = self.power()?;
            self.depth -= 1;
            return Ok(Expr::binary(BinaryOperator::Power, base, exponent));
        }
        Ok(base)
    }

    fn unary(&mut self) -> CalcResult<Expr> {
        if self.peek_operator() == Some(BinaryOperator::Subtract) {
            self.pos += 1;
            self.push_depth()?;
            let operand = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::Negate(Box::new(operand)));
        }
        self.primary()
    }

    fn primary(&mut self) -> CalcResult<Expr> {
        let token = match self.next() {
            Some(token) => token,
            None => return Err(CalcError::syntax(self.end, "unexpected end of expression")),
        };

        match token.kind {
            TokenKind::Number(value) => Ok(Expr::Literal(value)),
            TokenKind::Identifier(name) => {
                if let Some(Token {
                    kind: TokenKind::LeftParen,
                    position,
                }) = self.peek()
                {
                    return Err(CalcError::syntax(
                        *position,
                        format!("'{}' is not a function", name),
                    ));
                }
                match self.table.constant(&name) {
                    Some(value) => Ok(Expr::Literal(value)),
                    None => Ok(Expr::Variable(name)),
                }
            }
            TokenKind::Function(function) => {
                self.expect_left_paren(&format!("'{}' requires a parenthesized argument", function))?;
                let argument = self.expression()?;
                self.expect_right_paren()?;
                Ok(Expr::call(function, argument))
            }
            TokenKind::LeftParen => {
                let inner = self.expression()?;
                self.expect_right_paren()?;
                Ok(inner)
            }
            other => Err(CalcError::syntax(
                token.position,
                format!("unexpected {}", describe(&other)),
            )),
        }
    }

    fn expect_left_paren(&mut self, detail: &str) -> CalcResult<()> {
        match self.next() {
            Some(Token {
                kind: TokenKind::LeftParen,
                ..
            }) => Ok(()),
            Some(token) => Err(CalcError::syntax(token.position, detail)),
            None => Err(CalcError::syntax(self.end, detail)),
        }
    }

    fn expect_right_paren(&mut self) -> CalcResult<()> {
        match self.next() {
            Some(Token {
                kind: TokenKind::RightParen,
                ..
            }) => Ok(()),
            Some(token) => Err(CalcError::syntax(
                token.position,
                format!("expected ')' but found {}", describe(&token.kind)),
            )),
            None => Err(CalcError::syntax(self.end, "missing closing ')'")),
        }
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Number(value) => format!("number {}", value),
        TokenKind::Identifier(name) => format!("name '{}'", name),
        TokenKind::Function(function) => format!("function '{}'", function),
        TokenKind::Operator(op) => format!("operator '{}'", op),
        TokenKind::LeftParen => "'('".to_string(),
        TokenKind::RightParen => "')'".to_string(),
    }
}
