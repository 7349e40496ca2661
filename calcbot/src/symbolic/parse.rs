//! Pest-driven parsing of backend requests

use super::sym::{Func, Sym};
use super::BackendError;
use pest::iterators::{Pair, Pairs};
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "src/symbolic/symbolic.pest"]
struct SymbolicParser;

#[derive(Debug, Clone, PartialEq)]
pub enum CalculusRequest {
    Derivative { variable: String, expr: Sym },
    Integral { variable: String, expr: Sym },
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatrixRequest {
    Determinant(Vec<Vec<f64>>),
    Inverse(Vec<Vec<f64>>),
}

/// Tracks how deep the symbolic tree being built has become
///
/// Chained operators count like nested groups since each one deepens the
/// left-leaning tree by a level. Everything downstream (differentiation,
/// integration, display) recurses over the tree.
struct Nesting {
    depth: usize,
    max_depth: usize,
}

impl Nesting {
    fn new(max_depth: usize) -> Self {
        Self {
            depth: 0,
            max_depth,
        }
    }

    fn enter(&mut self) -> Result<(), BackendError> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(BackendError::TooDeep(self.max_depth));
        }
        Ok(())
    }

    fn leave(&mut self, levels: usize) {
        self.depth = self.depth.saturating_sub(levels);
    }
}

/// Reject text whose brackets, or run of signs and carets, nest past the limit
///
/// `-`, `^` and `**` all recurse in the grammar (`--x`, `x^x^x`), so a run of
/// them counts like nesting. Runs before the grammar so pest never recurses deeper
/// than the budget.
fn check_nesting(input: &str, max_depth: usize) -> Result<(), BackendError> {
    let mut brackets = 0usize;
    let mut run = 0usize;
    let mut previous = None;
    for c in input.chars() {
        match c {
            '(' | '[' => {
                brackets += 1;
                run = 0;
            }
            ')' | ']' => {
                brackets = brackets.saturating_sub(1);
                run = 0;
            }
            '+' | '/' | ',' => run = 0,
            '-' | '^' => run += 1,
            '*' if previous == Some('*') => run += 1,
            _ => {}
        }
        if brackets + run > max_depth {
            return Err(BackendError::TooDeep(max_depth));
        }
        previous = Some(c);
    }
    Ok(())
}

pub fn parse_calculus(input: &str, max_depth: usize) -> Result<CalculusRequest, BackendError> {
    check_nesting(input, max_depth)?;
    let mut nesting = Nesting::new(max_depth);
    let mut pairs = SymbolicParser::parse(Rule::calculus, input.trim()).map_err(syntax_error)?;
    let calculus = next(&mut pairs, "calculus request")?;
    let request = calculus
        .into_inner()
        .find(|pair| matches!(pair.as_rule(), Rule::derivative | Rule::integral))
        .ok_or_else(|| BackendError::Parse("empty calculus request".to_string()))?;

    match request.as_rule() {
        Rule::derivative => {
            let mut inner = request.into_inner();
            let variable = next(&mut inner, "variable")?.as_str().to_string();
            let expr = parse_expression(next(&mut inner, "expression")?, &mut nesting)?;
            Ok(CalculusRequest::Derivative { variable, expr })
        }
        _ => {
            let body = next(&mut request.into_inner(), "integrand")?;
            let mut inner = body.into_inner();
            let expr = parse_expression(next(&mut inner, "integrand")?, &mut nesting)?;
            let variable = inner
                .find(|pair| pair.as_rule() == Rule::identifier)
                .map_or_else(|| "x".to_string(), |pair| pair.as_str().to_string());
            Ok(CalculusRequest::Integral { variable, expr })
        }
    }
}

pub fn parse_linear_algebra(input: &str) -> Result<MatrixRequest, BackendError> {
    let mut pairs =
        SymbolicParser::parse(Rule::linear_algebra, input.trim()).map_err(syntax_error)?;
    let mut inner = next(&mut pairs, "linear algebra request")?.into_inner();
    let function = next(&mut inner, "matrix function")?;
    let matrix = next(&mut inner, "matrix")?;

    let rows = matrix
        .into_inner()
        .map(|row| {
            row.into_inner()
                .map(|cell| parse_number(cell.as_str()))
                .collect::<Result<Vec<f64>, BackendError>>()
        })
        .collect::<Result<Vec<Vec<f64>>, BackendError>>()?;

    match function.as_str() {
        "det" => Ok(MatrixRequest::Determinant(rows)),
        _ => Ok(MatrixRequest::Inverse(rows)),
    }
}

fn syntax_error(e: pest::error::Error<Rule>) -> BackendError {
    let column = match e.line_col {
        pest::error::LineColLocation::Pos((_, col)) => col,
        pest::error::LineColLocation::Span((_, col), _) => col,
    };
    BackendError::Parse(format!("{} at column {}", e.variant.message(), column))
}

fn next<'i>(pairs: &mut Pairs<'i, Rule>, what: &str) -> Result<Pair<'i, Rule>, BackendError> {
    pairs
        .next()
        .ok_or_else(|| BackendError::Parse(format!("missing {}", what)))
}

fn parse_number(text: &str) -> Result<f64, BackendError> {
    text.parse()
        .map_err(|_| BackendError::Parse(format!("'{}' is not a number", text)))
}

fn unexpected(pair: &Pair<Rule>) -> BackendError {
    BackendError::Parse(format!("unexpected '{}'", pair.as_str()))
}

fn parse_expression(pair: Pair<Rule>, nesting: &mut Nesting) -> Result<Sym, BackendError> {
    nesting.enter()?;
    let mut pairs = pair.into_inner();
    let mut left = parse_term(next(&mut pairs, "term")?, nesting)?;
    let mut chain = 0;

    while let Some(op) = pairs.next() {
        nesting.enter()?;
        chain += 1;
        let right = parse_term(next(&mut pairs, "term")?, nesting)?;
        left = match op.as_rule() {
            Rule::add_plus => Sym::add(left, right),
            Rule::add_minus => Sym::sub(left, right),
            _ => return Err(unexpected(&op)),
        };
    }
    nesting.leave(chain + 1);
    Ok(left)
}

fn parse_term(pair: Pair<Rule>, nesting: &mut Nesting) -> Result<Sym, BackendError> {
    let mut pairs = pair.into_inner();
    let mut left = parse_signed(next(&mut pairs, "factor")?, nesting)?;
    let mut chain = 0;

    while let Some(op) = pairs.next() {
        nesting.enter()?;
        chain += 1;
        let right = parse_signed(next(&mut pairs, "factor")?, nesting)?;
        left = match op.as_rule() {
            Rule::mul_star => Sym::mul(left, right),
            Rule::mul_slash => Sym::div(left, right),
            _ => return Err(unexpected(&op)),
        };
    }
    nesting.leave(chain);
    Ok(left)
}

fn parse_signed(pair: Pair<Rule>, nesting: &mut Nesting) -> Result<Sym, BackendError> {
    let mut pairs = pair.into_inner();
    let first = next(&mut pairs, "operand")?;
    match first.as_rule() {
        Rule::unary_minus => {
            nesting.enter()?;
            let operand = parse_signed(next(&mut pairs, "operand")?, nesting)?;
            nesting.leave(1);
            Ok(Sym::neg(operand))
        }
        Rule::power => parse_power(first, nesting),
        _ => Err(unexpected(&first)),
    }
}

fn parse_power(pair: Pair<Rule>, nesting: &mut Nesting) -> Result<Sym, BackendError> {
    let mut pairs = pair.into_inner();
    let base = next(&mut pairs, "base")?;

    // `3x^2` is 3 * x^2, so the coefficient stays outside the power
    let (coefficient, base) = match base.as_rule() {
        Rule::implicit_product => {
            let mut inner = base.into_inner();
            let coefficient = parse_number(next(&mut inner, "coefficient")?.as_str())?;
            (Some(coefficient), parse_atom(next(&mut inner, "operand")?, nesting)?)
        }
        _ => (None, parse_atom(base, nesting)?),
    };

    let value = match pairs.next() {
        Some(_caret) => {
            nesting.enter()?;
            let exponent = parse_signed(next(&mut pairs, "exponent")?, nesting)?;
            nesting.leave(1);
            Sym::pow(base, exponent)
        }
        None => base,
    };

    Ok(match coefficient {
        Some(c) => Sym::mul(Sym::Num(c), value),
        None => value,
    })
}

fn parse_atom(pair: Pair<Rule>, nesting: &mut Nesting) -> Result<Sym, BackendError> {
    let pair = if pair.as_rule() == Rule::atom {
        next(&mut pair.into_inner(), "operand")?
    } else {
        pair
    };

    match pair.as_rule() {
        Rule::number => Ok(Sym::Num(parse_number(pair.as_str())?)),
        Rule::identifier => Ok(Sym::var(pair.as_str())),
        Rule::group => parse_expression(next(&mut pair.into_inner(), "expression")?, nesting),
        Rule::call => {
            let mut inner = pair.into_inner();
            let name = next(&mut inner, "function name")?;
            let func = Func::from_name(name.as_str()).ok_or_else(|| unexpected(&name))?;
            let argument = parse_expression(next(&mut inner, "argument")?, nesting)?;
            Ok(Sym::call(func, argument))
        }
        _ => Err(unexpected(&pair)),
    }
}
