//! Symbolic expression trees
//!
//! The smart constructors (`Sym::add`, `Sym::mul`, ...) simplify as they
//! build, so derivative and integral results come out in a readable form
//! without a separate simplification pass.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Exp,
    Log,
    Sqrt,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Func::Sin),
            "cos" => Some(Func::Cos),
            "tan" => Some(Func::Tan),
            "exp" => Some(Func::Exp),
            "log" => Some(Func::Log),
            "sqrt" => Some(Func::Sqrt),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Sqrt => "sqrt",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Sym {
    Num(f64),
    Var(String),
    Neg(Box<Sym>),
    Add(Box<Sym>, Box<Sym>),
    Sub(Box<Sym>, Box<Sym>),
    Mul(Box<Sym>, Box<Sym>),
    Div(Box<Sym>, Box<Sym>),
    Pow(Box<Sym>, Box<Sym>),
    Call(Func, Box<Sym>),
}

impl Sym {
    pub fn var(name: &str) -> Sym {
        Sym::Var(name.to_string())
    }

    pub fn call(func: Func, argument: Sym) -> Sym {
        Sym::Call(func, Box::new(argument))
    }

    /// Whether the expression mentions `variable`
    pub fn depends_on(&self, variable: &str) -> bool {
        match self {
            Sym::Num(_) => false,
            Sym::Var(name) => name == variable,
            Sym::Neg(inner) | Sym::Call(_, inner) => inner.depends_on(variable),
            Sym::Add(a, b) | Sym::Sub(a, b) | Sym::Mul(a, b) | Sym::Div(a, b) | Sym::Pow(a, b) => {
                a.depends_on(variable) || b.depends_on(variable)
            }
        }
    }

    pub fn as_num(&self) -> Option<f64> {
        match self {
            Sym::Num(n) => Some(*n),
            _ => None,
        }
    }

    pub fn neg(a: Sym) -> Sym {
        match a {
            Sym::Num(n) => Sym::Num(-n),
            Sym::Neg(inner) => *inner,
            a => Sym::Neg(Box::new(a)),
        }
    }

    pub fn add(a: Sym, b: Sym) -> Sym {
        match (a, b) {
            (Sym::Num(x), Sym::Num(y)) => Sym::Num(x + y),
            (Sym::Num(z), b) if z == 0.0 => b,
            (a, Sym::Num(z)) if z == 0.0 => a,
            (a, Sym::Num(n)) if n < 0.0 => Sym::Sub(Box::new(a), Box::new(Sym::Num(-n))),
            (a, Sym::Neg(b)) => Sym::sub(a, *b),
            (a, b) => Sym::Add(Box::new(a), Box::new(b)),
        }
    }

    pub fn sub(a: Sym, b: Sym) -> Sym {
        match (a, b) {
            (Sym::Num(x), Sym::Num(y)) => Sym::Num(x - y),
            (a, Sym::Num(z)) if z == 0.0 => a,
            (Sym::Num(z), b) if z == 0.0 => Sym::neg(b),
            (a, Sym::Neg(b)) => Sym::add(a, *b),
            (a, b) if a == b => Sym::Num(0.0),
            (a, b) => Sym::Sub(Box::new(a), Box::new(b)),
        }
    }

    pub fn mul(a: Sym, b: Sym) -> Sym {
        match (a, b) {
            (Sym::Num(x), Sym::Num(y)) => Sym::Num(x * y),
            (Sym::Num(z), _) | (_, Sym::Num(z)) if z == 0.0 => Sym::Num(0.0),
            (Sym::Num(o), b) if o == 1.0 => b,
            (a, Sym::Num(o)) if o == 1.0 => a,
            (Sym::Num(m), b) if m == -1.0 => Sym::neg(b),
            (a, Sym::Num(m)) if m == -1.0 => Sym::neg(a),
            (a, Sym::Num(n)) => Sym::mul(Sym::Num(n), a),
            (Sym::Num(x), Sym::Mul(inner, rest)) if inner.as_num().is_some() => {
                let y = inner.as_num().unwrap_or(1.0);
                Sym::mul(Sym::Num(x * y), *rest)
            }
            (Sym::Neg(a), b) => Sym::neg(Sym::mul(*a, b)),
            (a, Sym::Neg(b)) => Sym::neg(Sym::mul(a, *b)),
            (a, b) => Sym::Mul(Box::new(a), Box::new(b)),
        }
    }

    pub fn div(a: Sym, b: Sym) -> Sym {
        match (a, b) {
            (Sym::Num(x), Sym::Num(y)) if y != 0.0 && (x / y).fract() == 0.0 => Sym::Num(x / y),
            (Sym::Num(z), _) if z == 0.0 => Sym::Num(0.0),
            (a, Sym::Num(o)) if o == 1.0 => a,
            (a, b) if a == b => Sym::Num(1.0),
            (a, b) => Sym::Div(Box::new(a), Box::new(b)),
        }
    }

    pub fn pow(a: Sym, b: Sym) -> Sym {
        match (a, b) {
            (Sym::Num(x), Sym::Num(y)) => Sym::Num(x.powf(y)),
            (_, Sym::Num(z)) if z == 0.0 => Sym::Num(1.0),
            (a, Sym::Num(o)) if o == 1.0 => a,
            (a, b) => Sym::Pow(Box::new(a), Box::new(b)),
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Sym::Add(..) | Sym::Sub(..) => 1,
            Sym::Mul(..) | Sym::Div(..) => 2,
            Sym::Neg(_) => 3,
            Sym::Pow(..) => 4,
            Sym::Num(n) if *n < 0.0 => 3,
            Sym::Num(_) | Sym::Var(_) | Sym::Call(..) => 5,
        }
    }
}

fn write_operand(f: &mut fmt::Formatter<'_>, operand: &Sym, parenthesize: bool) -> fmt::Result {
    if parenthesize {
        write!(f, "({})", operand)
    } else {
        write!(f, "{}", operand)
    }
}

impl fmt::Display for Sym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sym::Num(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Sym::Num(n) => write!(f, "{}", n),
            Sym::Var(name) => write!(f, "{}", name),
            Sym::Neg(inner) => {
                write!(f, "-")?;
                write_operand(f, inner, inner.precedence() < 2)
            }
            Sym::Add(a, b) => {
                write_operand(f, a, a.precedence() < 1)?;
                write!(f, " + ")?;
                write_operand(f, b, b.precedence() < 2)
            }
            Sym::Sub(a, b) => {
                write_operand(f, a, a.precedence() < 1)?;
                write!(f, " - ")?;
                write_operand(f, b, b.precedence() < 2)
            }
            Sym::Mul(a, b) => {
                write_operand(f, a, a.precedence() < 2)?;
                write!(f, "*")?;
                write_operand(f, b, b.precedence() < 2 || matches!(**b, Sym::Neg(_)))
            }
            Sym::Div(a, b) => {
                write_operand(f, a, a.precedence() < 2)?;
                write!(f, "/")?;
                write_operand(f, b, b.precedence() < 4)
            }
            Sym::Pow(a, b) => {
                write_operand(f, a, a.precedence() < 5)?;
                write!(f, "^")?;
                write_operand(f, b, b.precedence() < 4)
            }
            Sym::Call(func, argument) => write!(f, "{}({})", func.name(), argument),
        }
    }
}
