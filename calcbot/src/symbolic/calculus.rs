//! Derivatives and integrals of one-variable expressions

use super::sym::{Func, Sym};
use super::BackendError;

/// Differentiate `expr` with respect to `variable`
pub fn differentiate(expr: &Sym, variable: &str) -> Sym {
    match expr {
        Sym::Num(_) => Sym::Num(0.0),
        Sym::Var(name) if name == variable => Sym::Num(1.0),
        Sym::Var(_) => Sym::Num(0.0),
        Sym::Neg(inner) => Sym::neg(differentiate(inner, variable)),
        Sym::Add(a, b) => Sym::add(differentiate(a, variable), differentiate(b, variable)),
        Sym::Sub(a, b) => Sym::sub(differentiate(a, variable), differentiate(b, variable)),
        Sym::Mul(a, b) => {
            let (da, db) = (differentiate(a, variable), differentiate(b, variable));
            if !a.depends_on(variable) {
                Sym::mul((**a).clone(), db)
            } else if !b.depends_on(variable) {
                Sym::mul(da, (**b).clone())
            } else {
                Sym::add(
                    Sym::mul(da, (**b).clone()),
                    Sym::mul((**a).clone(), db),
                )
            }
        }
        Sym::Div(a, b) => {
            let da = differentiate(a, variable);
            if !b.depends_on(variable) {
                return Sym::div(da, (**b).clone());
            }
            let db = differentiate(b, variable);
            Sym::div(
                Sym::sub(
                    Sym::mul(da, (**b).clone()),
                    Sym::mul((**a).clone(), db),
                ),
                Sym::pow((**b).clone(), Sym::Num(2.0)),
            )
        }
        Sym::Pow(base, exponent) => differentiate_power(base, exponent, variable),
        Sym::Call(func, argument) => {
            let outer = match func {
                Func::Sin => Sym::call(Func::Cos, (**argument).clone()),
                Func::Cos => Sym::neg(Sym::call(Func::Sin, (**argument).clone())),
                Func::Tan => Sym::div(
                    Sym::Num(1.0),
                    Sym::pow(Sym::call(Func::Cos, (**argument).clone()), Sym::Num(2.0)),
                ),
                Func::Exp => Sym::call(Func::Exp, (**argument).clone()),
                Func::Log => Sym::div(Sym::Num(1.0), (**argument).clone()),
                Func::Sqrt => Sym::div(
                    Sym::Num(1.0),
                    Sym::mul(Sym::Num(2.0), Sym::call(Func::Sqrt, (**argument).clone())),
                ),
            };
            Sym::mul(outer, differentiate(argument, variable))
        }
    }
}

fn differentiate_power(base: &Sym, exponent: &Sym, variable: &str) -> Sym {
    let base_varies = base.depends_on(variable);
    let exponent_varies = exponent.depends_on(variable);
    let power = Sym::pow(base.clone(), exponent.clone());

    match (base_varies, exponent_varies) {
        (false, false) => Sym::Num(0.0),
        // n * u^(n-1) * u'
        (true, false) => Sym::mul(
            Sym::mul(
                exponent.clone(),
                Sym::pow(base.clone(), Sym::sub(exponent.clone(), Sym::Num(1.0))),
            ),
            differentiate(base, variable),
        ),
        // a^v * log(a) * v'
        (false, true) => Sym::mul(
            Sym::mul(power, Sym::call(Func::Log, base.clone())),
            differentiate(exponent, variable),
        ),
        // u^v * (v' * log(u) + v * u' / u)
        (true, true) => Sym::mul(
            power,
            Sym::add(
                Sym::mul(
                    differentiate(exponent, variable),
                    Sym::call(Func::Log, base.clone()),
                ),
                Sym::div(
                    Sym::mul(exponent.clone(), differentiate(base, variable)),
                    base.clone(),
                ),
            ),
        ),
    }
}

/// Integrate `expr` with respect to `variable`
///
/// Handles sums of constant multiples of `x^n`, `1/x`, `sin x`, `cos x`,
/// `exp x` and constants. Anything else is reported as unsupported rather
/// than guessed at.
pub fn integrate(expr: &Sym, variable: &str) -> Result<Sym, BackendError> {
    if !expr.depends_on(variable) {
        return Ok(Sym::mul(expr.clone(), Sym::var(variable)));
    }

    let unsupported = || BackendError::UnsupportedIntegrand(expr.to_string());

    match expr {
        Sym::Var(_) => Ok(power_rule(variable, 1.0)),
        Sym::Neg(inner) => Ok(Sym::neg(integrate(inner, variable)?)),
        Sym::Add(a, b) => Ok(Sym::add(integrate(a, variable)?, integrate(b, variable)?)),
        Sym::Sub(a, b) => Ok(Sym::sub(integrate(a, variable)?, integrate(b, variable)?)),
        Sym::Mul(a, b) if !a.depends_on(variable) => {
            Ok(Sym::mul((**a).clone(), integrate(b, variable)?))
        }
        Sym::Mul(a, b) if !b.depends_on(variable) => {
            Ok(Sym::mul((**b).clone(), integrate(a, variable)?))
        }
        Sym::Div(a, b) if !b.depends_on(variable) => {
            Ok(Sym::div(integrate(a, variable)?, (**b).clone()))
        }
        Sym::Div(a, b) if is_variable(b, variable) && !a.depends_on(variable) => Ok(Sym::mul(
            (**a).clone(),
            Sym::call(Func::Log, Sym::var(variable)),
        )),
        Sym::Pow(base, exponent) if is_variable(base, variable) => match exponent.as_num() {
            Some(n) => Ok(power_rule(variable, n)),
            None => Err(unsupported()),
        },
        Sym::Call(func, argument) if is_variable(argument, variable) => match func {
            Func::Sin => Ok(Sym::neg(Sym::call(Func::Cos, Sym::var(variable)))),
            Func::Cos => Ok(Sym::call(Func::Sin, Sym::var(variable))),
            Func::Exp => Ok(Sym::call(Func::Exp, Sym::var(variable))),
            _ => Err(unsupported()),
        },
        _ => Err(unsupported()),
    }
}

/// Antiderivative of `x^n`
fn power_rule(variable: &str, n: f64) -> Sym {
    if n == -1.0 {
        return Sym::call(Func::Log, Sym::var(variable));
    }
    Sym::div(
        Sym::pow(Sym::var(variable), Sym::Num(n + 1.0)),
        Sym::Num(n + 1.0),
    )
}

fn is_variable(expr: &Sym, variable: &str) -> bool {
    matches!(expr, Sym::Var(name) if name == variable)
}
