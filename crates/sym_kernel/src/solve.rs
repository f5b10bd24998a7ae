//! `solve`: linear equations in any coefficients, and univariate polynomial
//! (or rational) equations up to the quadratic formula after every rational
//! root has been divided out.

use std::cmp::Ordering;

use sym_value::{evaluation, BuiltinOp, Rational, SymResult, Value};

use crate::algebra::rational_function;
use crate::arith;
use crate::calculus::diff;
use crate::eval::Evaluator;
use crate::expr::{free_of, main_variable, substitute};
use crate::functions;
use crate::numeric;
use crate::order::{self, operands};
use crate::poly::Poly;

/// `solve(equation)` or `solve(equation, x)`. The result is a list of roots.
pub(crate) fn solve_call(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let (equation, var) = match args.as_slice() {
        [equation] => (equation, main_variable(equation)),
        [equation, Value::Identifier(var)] => (equation, var.to_string()),
        [_, var] => return Err(evaluation(format!("solve: expected a variable, got {var}"))),
        _ => return Err(evaluation(format!("solve: expected 1 or 2 argument(s), got {}", args.len()))),
    };
    let expr = match equation {
        Value::Symbolic(s) if s.op.is(BuiltinOp::Equal) => match operands(equation).as_slice() {
            [lhs, rhs] => arith::sub(lhs.clone(), rhs.clone())?,
            _ => equation.clone(),
        },
        other => other.clone(),
    };
    match solve(ev, &expr, &var)? {
        Some(mut roots) => {
            sort_roots(ev, &mut roots);
            Ok(Value::list(roots))
        }
        None => Ok(Value::symbolic_args(BuiltinOp::Solve, args)),
    }
}

/// Roots of `expr = 0`, or `None` when the equation is out of reach.
pub fn solve(ev: &mut Evaluator<'_>, expr: &Value, var: &str) -> SymResult<Option<Vec<Value>>> {
    if free_of(expr, var) {
        return Ok(Some(Vec::new()));
    }
    let slope = diff(ev, expr, var)?;
    if free_of(&slope, var) && !slope.is_zero() {
        let intercept = ev.eval(&substitute(expr, var, &Value::int(0)))?;
        return Ok(Some(vec![arith::div(arith::neg(intercept)?, slope)?]));
    }
    let Some((numer, denom)) = rational_function(expr, var) else {
        return Ok(None);
    };

    let mut roots = Vec::new();
    let mut rest = numer.clone();
    for root in numer.rational_roots() {
        let linear = Poly::from_coeffs(vec![-&root, Rational::one()]);
        while let Some(quot) = rest.exact_div(&linear) {
            rest = quot;
        }
        if !denom.eval(&root).is_zero() {
            roots.push(root.into_value());
        }
    }
    match rest.degree() {
        Some(2) => roots.extend(quadratic(ev, &rest)?),
        Some(d) if d > 2 => ev.warn(format!("solve: no exact roots found for a factor of degree {d}")),
        _ => {}
    }
    Ok(Some(roots))
}

fn quadratic(ev: &mut Evaluator<'_>, p: &Poly) -> SymResult<Vec<Value>> {
    let (a, b, c) = (p.coeff(2), p.coeff(1), p.coeff(0));
    let four = Rational::from_integer(4);
    let discriminant = &(&b * &b) - &(&(&four * &a) * &c);
    if discriminant.is_negative() && !ev.complex_mode() {
        ev.warn("solve: complex roots omitted (complex mode is off)");
        return Ok(Vec::new());
    }
    let half = Value::fraction(Value::int(1), Value::int(2))?;
    let root = arith::pow(discriminant.into_value(), half)?;
    let two_a = (&Rational::from_integer(2) * &a).into_value();
    let minus_b = (-&b).into_value();
    let mut roots = Vec::with_capacity(2);
    for branch in [arith::neg(root.clone())?, root] {
        roots.push(arith::div(arith::add2(minus_b.clone(), branch)?, two_a.clone())?);
    }
    Ok(roots)
}

/// Ascending by numeric value where there is one.
fn sort_roots(ev: &mut Evaluator<'_>, roots: &mut [Value]) {
    let mut keyed: Vec<(Option<f64>, Value)> = roots
        .iter()
        .map(|r| {
            let approx = functions::evalf(ev, vec![r.clone()]).ok();
            (approx.as_ref().and_then(numeric::to_f64), r.clone())
        })
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| match (ka, kb) {
        (Some(x), Some(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => order::compare(a, b),
    });
    for (slot, (_, root)) in roots.iter_mut().zip(keyed) {
        *slot = root;
    }
}
