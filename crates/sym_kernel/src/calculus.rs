//! `diff`, `integrate`, `subst`, `limit` and `series`.

use num_bigint::BigInt;
use sym_value::{evaluation, BuiltinOp, Operator, Rational, SymResult, Value};

use crate::algebra::{self, rational_function};
use crate::arith::{self, split_coeff};
use crate::eval::Evaluator;
use crate::expr::{free_of, main_variable, substitute, substitute_all};
use crate::integer;
use crate::numeric;
use crate::order::operands;
use crate::poly::Poly;
use crate::stack::ensure_sufficient_stack;

/// Rounds of L'Hôpital's rule tried by `limit`.
const MAX_LHOPITAL: usize = 5;

/// Default truncation order of `series`.
const DEFAULT_SERIES_ORDER: i64 = 5;

fn var_name(value: &Value, op: BuiltinOp) -> SymResult<String> {
    value
        .ident_name()
        .map(str::to_owned)
        .map_err(|_| evaluation(format!("{op}: expected a variable, got {value}")))
}

fn half() -> Value {
    Value::fraction(Value::int(1), Value::int(2)).unwrap_or(Value::int(0))
}

// ---------------------------------------------------------------- diff

/// `diff(expr)`, `diff(expr, x)` or `diff(expr, x, n)`.
pub(crate) fn diff_call(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let (expr, var, order) = match args.as_slice() {
        [expr] => (expr, main_variable(expr), 1),
        [expr, var] => (expr, var_name(var, BuiltinOp::Diff)?, 1),
        [expr, var, n] => {
            let order = n
                .to_int()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or_else(|| evaluation(format!("diff: invalid order {n}")))?;
            (expr, var_name(var, BuiltinOp::Diff)?, order)
        }
        _ => return Err(evaluation(format!("diff: expected 1 to 3 argument(s), got {}", args.len()))),
    };
    let mut result = expr.clone();
    for _ in 0..order {
        result = diff(ev, &result, &var)?;
    }
    Ok(result)
}

/// Derivative of `expr` with respect to `var`. Calls to unknown functions
/// stay as unevaluated `diff` nodes.
pub fn diff(ev: &mut Evaluator<'_>, expr: &Value, var: &str) -> SymResult<Value> {
    if let Value::Vector(v) = expr {
        let items = v
            .items()
            .iter()
            .map(|item| diff(ev, item, var))
            .collect::<SymResult<Vec<_>>>()?;
        return Ok(Value::vector(items, v.subtype()));
    }
    if free_of(expr, var) {
        return Ok(Value::int(0));
    }
    ensure_sufficient_stack(|| match expr {
        Value::Symbolic(s) => match &s.op {
            Operator::Builtin(op) => diff_builtin(ev, *op, expr, var),
            Operator::User(_) => Ok(unevaluated_diff(expr, var)),
        },
        // The only thing left that mentions `var` is `var` itself.
        _ => Ok(Value::int(1)),
    })
}

fn unevaluated_diff(expr: &Value, var: &str) -> Value {
    Value::symbolic_args(BuiltinOp::Diff, vec![expr.clone(), Value::identifier(var)])
}

fn diff_builtin(ev: &mut Evaluator<'_>, op: BuiltinOp, expr: &Value, var: &str) -> SymResult<Value> {
    let args = operands(expr);
    match op {
        BuiltinOp::Add => {
            let terms = args.iter().map(|t| diff(ev, t, var)).collect::<SymResult<Vec<_>>>()?;
            arith::add(terms)
        }
        BuiltinOp::Mul => {
            let mut terms = Vec::with_capacity(args.len());
            for (i, factor) in args.iter().enumerate() {
                let d = diff(ev, factor, var)?;
                if d.is_zero() {
                    continue;
                }
                let mut factors = args.clone();
                factors[i] = d;
                terms.push(arith::mul(factors)?);
            }
            arith::add(terms)
        }
        BuiltinOp::Pow => {
            let [base, exponent] = args.as_slice() else {
                return Ok(unevaluated_diff(expr, var));
            };
            let db = diff(ev, base, var)?;
            if free_of(exponent, var) {
                // e * b^(e-1) * b'
                let lowered = arith::pow(base.clone(), arith::sub(exponent.clone(), Value::int(1))?)?;
                return arith::mul(vec![exponent.clone(), lowered, db]);
            }
            let de = diff(ev, exponent, var)?;
            let ln_b = ev.call(BuiltinOp::Ln, vec![base.clone()])?;
            // b^e * (e' ln b + e b'/b)
            let inner = arith::add(vec![
                arith::mul2(de, ln_b)?,
                arith::mul(vec![exponent.clone(), db, arith::inv(base.clone())?])?,
            ])?;
            arith::mul2(expr.clone(), inner)
        }
        BuiltinOp::Neg => arith::neg(diff(ev, &args[0], var)?),
        BuiltinOp::Inv => {
            let du = diff(ev, &args[0], var)?;
            arith::neg(arith::mul2(du, arith::pow(args[0].clone(), Value::int(-2))?)?)
        }
        BuiltinOp::Equal => {
            let sides = args.iter().map(|a| diff(ev, a, var)).collect::<SymResult<Vec<_>>>()?;
            Ok(Value::symbolic_args(BuiltinOp::Equal, sides))
        }
        BuiltinOp::Sin
        | BuiltinOp::Cos
        | BuiltinOp::Tan
        | BuiltinOp::Asin
        | BuiltinOp::Acos
        | BuiltinOp::Atan
        | BuiltinOp::Exp
        | BuiltinOp::Ln
        | BuiltinOp::Log10
        | BuiltinOp::Sqrt
        | BuiltinOp::Abs => {
            let [u] = args.as_slice() else {
                return Ok(unevaluated_diff(expr, var));
            };
            let du = diff(ev, u, var)?;
            let outer = outer_derivative(ev, op, u)?;
            arith::mul2(outer, du)
        }
        _ => Ok(unevaluated_diff(expr, var)),
    }
}

/// `f'(u)` for the elementary `f`.
fn outer_derivative(ev: &mut Evaluator<'_>, op: BuiltinOp, u: &Value) -> SymResult<Value> {
    let u2 = || arith::pow(u.clone(), Value::int(2));
    let root_one_minus_u2 = |ev: &mut Evaluator<'_>| -> SymResult<Value> {
        let inside = arith::sub(Value::int(1), u2()?)?;
        ev.call(BuiltinOp::Sqrt, vec![inside])
    };
    match op {
        BuiltinOp::Sin => ev.call(BuiltinOp::Cos, vec![u.clone()]),
        BuiltinOp::Cos => arith::neg(ev.call(BuiltinOp::Sin, vec![u.clone()])?),
        BuiltinOp::Tan => {
            let tan = ev.call(BuiltinOp::Tan, vec![u.clone()])?;
            arith::add2(arith::pow(tan, Value::int(2))?, Value::int(1))
        }
        BuiltinOp::Asin => arith::inv(root_one_minus_u2(ev)?),
        BuiltinOp::Acos => arith::neg(arith::inv(root_one_minus_u2(ev)?)?),
        BuiltinOp::Atan => arith::inv(arith::add2(u2()?, Value::int(1))?),
        BuiltinOp::Exp => ev.call(BuiltinOp::Exp, vec![u.clone()]),
        BuiltinOp::Ln => arith::inv(u.clone()),
        BuiltinOp::Log10 => {
            let ln10 = ev.call(BuiltinOp::Ln, vec![Value::int(10)])?;
            arith::inv(arith::mul2(u.clone(), ln10)?)
        }
        BuiltinOp::Sqrt => {
            let root = ev.call(BuiltinOp::Sqrt, vec![u.clone()])?;
            arith::inv(arith::mul2(Value::int(2), root)?)
        }
        _ => ev.call(BuiltinOp::Sign, vec![u.clone()]),
    }
}

// ----------------------------------------------------------- integrate

/// `integrate(expr)`, `integrate(expr, x)` or `integrate(expr, x, a, b)`.
pub(crate) fn integrate_call(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let (expr, var, bounds) = match args.as_slice() {
        [expr] => (expr.clone(), main_variable(expr), None),
        [expr, var] => (expr.clone(), var_name(var, BuiltinOp::Integrate)?, None),
        [expr, var, lo, hi] => (
            expr.clone(),
            var_name(var, BuiltinOp::Integrate)?,
            Some((lo.clone(), hi.clone())),
        ),
        _ => {
            return Err(evaluation(format!(
                "integrate: expected 1, 2 or 4 argument(s), got {}",
                args.len()
            )))
        }
    };
    let Some(antiderivative) = integrate(ev, &expr, &var)? else {
        return Ok(Value::symbolic_args(BuiltinOp::Integrate, args));
    };
    match bounds {
        None => Ok(antiderivative),
        Some((lo, hi)) => {
            let upper = ev.eval(&substitute(&antiderivative, &var, &hi))?;
            let lower = ev.eval(&substitute(&antiderivative, &var, &lo))?;
            arith::sub(upper, lower)
        }
    }
}

/// `(a, b)` when `u` is `a*var + b` with `a` nonzero and free of `var`.
fn linear_coeffs(ev: &mut Evaluator<'_>, u: &Value, var: &str) -> SymResult<Option<(Value, Value)>> {
    let a = diff(ev, u, var)?;
    if a.is_zero() || !free_of(&a, var) {
        return Ok(None);
    }
    let b = ev.eval(&substitute(u, var, &Value::int(0)))?;
    Ok(Some((a, b)))
}

fn integrate_poly(p: &Poly, var: &str) -> SymResult<Value> {
    let mut coeffs = vec![Rational::zero()];
    for k in 0..=p.degree().unwrap_or(0) {
        let next = Rational::from_integer(BigInt::from(k + 1));
        coeffs.push(p.coeff(k).checked_div(&next).unwrap_or_else(Rational::zero));
    }
    Poly::from_coeffs(coeffs).to_value(var)
}

/// An antiderivative, or `None` when none of the rules apply.
pub fn integrate(ev: &mut Evaluator<'_>, expr: &Value, var: &str) -> SymResult<Option<Value>> {
    let x = Value::identifier(var);
    if free_of(expr, var) {
        return arith::mul2(expr.clone(), x).map(Some);
    }
    ensure_sufficient_stack(|| {
        if let Value::Vector(v) = expr {
            let mut items = Vec::with_capacity(v.len());
            for item in v.items() {
                let Some(integral) = integrate(ev, item, var)? else {
                    return Ok(None);
                };
                items.push(integral);
            }
            return Ok(Some(Value::vector(items, v.subtype())));
        }
        let Value::Symbolic(s) = expr else {
            // `var` itself
            return arith::mul2(half(), arith::pow(x, Value::int(2))?).map(Some);
        };
        let args = operands(expr);
        let rule = match s.op.as_builtin() {
            Some(BuiltinOp::Add) => {
                let mut terms = Vec::with_capacity(args.len());
                for term in &args {
                    let Some(integral) = integrate(ev, term, var)? else {
                        return Ok(None);
                    };
                    terms.push(integral);
                }
                Some(arith::add(terms)?)
            }
            Some(BuiltinOp::Mul) => {
                let (constant, dependent): (Vec<Value>, Vec<Value>) =
                    args.into_iter().partition(|f| free_of(f, var));
                if constant.is_empty() {
                    None
                } else {
                    match integrate(ev, &arith::mul(dependent)?, var)? {
                        Some(integral) => {
                            let mut factors = constant;
                            factors.push(integral);
                            Some(arith::mul(factors)?)
                        }
                        None => None,
                    }
                }
            }
            Some(BuiltinOp::Pow) => integrate_power(ev, &args, var)?,
            Some(op @ (BuiltinOp::Sin | BuiltinOp::Cos | BuiltinOp::Exp | BuiltinOp::Ln)) => {
                integrate_elementary(ev, op, &args[0], var)?
            }
            _ => None,
        };
        if rule.is_some() {
            return Ok(rule);
        }
        match Poly::from_value(expr, var) {
            Some(p) => integrate_poly(&p, var).map(Some),
            None => Ok(None),
        }
    })
}

fn integrate_power(ev: &mut Evaluator<'_>, args: &[Value], var: &str) -> SymResult<Option<Value>> {
    let [base, exponent] = args else {
        return Ok(None);
    };
    if free_of(exponent, var) {
        let Some((a, _)) = linear_coeffs(ev, base, var)? else {
            return Ok(None);
        };
        if exponent.is_minus_one() {
            // ln|u| / a
            let abs = ev.call(BuiltinOp::Abs, vec![base.clone()])?;
            let ln = ev.call(BuiltinOp::Ln, vec![abs])?;
            return arith::div(ln, a).map(Some);
        }
        let raised = arith::add2(exponent.clone(), Value::int(1))?;
        let power = arith::pow(base.clone(), raised.clone())?;
        return arith::div(power, arith::mul2(raised, a)?).map(Some);
    }
    if free_of(base, var) {
        // b^(a x + c) / (a ln b)
        let Some((a, _)) = linear_coeffs(ev, exponent, var)? else {
            return Ok(None);
        };
        let ln_b = ev.call(BuiltinOp::Ln, vec![base.clone()])?;
        let power = arith::pow(base.clone(), exponent.clone())?;
        return arith::div(power, arith::mul2(a, ln_b)?).map(Some);
    }
    Ok(None)
}

fn integrate_elementary(ev: &mut Evaluator<'_>, op: BuiltinOp, u: &Value, var: &str) -> SymResult<Option<Value>> {
    let Some((a, _)) = linear_coeffs(ev, u, var)? else {
        return Ok(None);
    };
    let primitive = match op {
        BuiltinOp::Sin => arith::neg(ev.call(BuiltinOp::Cos, vec![u.clone()])?)?,
        BuiltinOp::Cos => ev.call(BuiltinOp::Sin, vec![u.clone()])?,
        BuiltinOp::Exp => ev.call(BuiltinOp::Exp, vec![u.clone()])?,
        // u ln u - u
        _ => {
            let ln = ev.call(BuiltinOp::Ln, vec![u.clone()])?;
            arith::sub(arith::mul2(u.clone(), ln)?, u.clone())?
        }
    };
    arith::div(primitive, a).map(Some)
}

// --------------------------------------------------------------- subst

/// `subst(expr, x=a)`, `subst(expr, [x=a, y=b])` or `subst(expr, x, a)`.
pub(crate) fn subst_call(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let (expr, pairs) = match args.as_slice() {
        [expr, Value::Vector(eqs)] => (expr, eqs.items().iter().map(equation).collect::<SymResult<Vec<_>>>()?),
        [expr, eq] => (expr, vec![equation(eq)?]),
        [expr, var, value] => (expr, vec![(var_name(var, BuiltinOp::Subst)?, value.clone())]),
        _ => return Err(evaluation(format!("subst: expected 2 or 3 argument(s), got {}", args.len()))),
    };
    ev.eval(&substitute_all(expr, &pairs))
}

/// `(name, value)` from `name = value`.
fn equation(eq: &Value) -> SymResult<(String, Value)> {
    match eq {
        Value::Symbolic(s) if s.op.is(BuiltinOp::Equal) => match operands(eq).as_slice() {
            [Value::Identifier(name), value] => Ok((name.to_string(), value.clone())),
            _ => Err(evaluation(format!("expected variable=value, got {eq}"))),
        },
        _ => Err(evaluation(format!("expected variable=value, got {eq}"))),
    }
}

// --------------------------------------------------------------- limit

/// `limit(expr, x, a)` or `limit(expr, x=a)`; a trailing direction argument
/// is accepted and ignored.
pub(crate) fn limit_call(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let (expr, var, point) = match args.as_slice() {
        [expr, eq] | [expr, eq, _] if equation(eq).is_ok() => {
            let (var, point) = equation(eq)?;
            (expr.clone(), var, point)
        }
        [expr, var, point] | [expr, var, point, _] => (expr.clone(), var_name(var, BuiltinOp::Limit)?, point.clone()),
        _ => return Err(evaluation(format!("limit: expected 2 to 4 argument(s), got {}", args.len()))),
    };
    match limit(ev, &expr, &var, &point)? {
        Some(value) => Ok(value),
        None => Ok(Value::symbolic_args(BuiltinOp::Limit, args)),
    }
}

/// Sign of an infinite limit point: `infinity` is 1, `-infinity` is -1.
fn infinity_sign(point: &Value) -> Option<i64> {
    if let Value::Double(x) = point {
        return x.is_infinite().then(|| if *x > 0.0 { 1 } else { -1 });
    }
    match split_coeff(point) {
        (c, Some(Value::Identifier(name))) if matches!(&*name, "infinity" | "inf") => numeric::signum(&c),
        _ => None,
    }
}

/// A usable limit value: no error and nothing undefined.
fn finite(result: SymResult<Value>) -> Option<Value> {
    match result {
        Ok(Value::Double(x)) if !x.is_finite() => None,
        Ok(value) => Some(value),
        Err(_) => None,
    }
}

fn limit(ev: &mut Evaluator<'_>, expr: &Value, var: &str, point: &Value) -> SymResult<Option<Value>> {
    if let Some(sign) = infinity_sign(point) {
        return limit_at_infinity(expr, var, sign);
    }
    let at = |ev: &mut Evaluator<'_>, e: &Value| finite(ev.eval(&substitute(e, var, point)));
    if let Some(value) = at(ev, expr) {
        return Ok(Some(value));
    }
    let normalized = algebra::normal(expr)?;
    if let Some(value) = at(ev, &normalized) {
        return Ok(Some(value));
    }
    let (mut numer, mut denom) = algebra::numer_denom(expr)?;
    for _ in 0..MAX_LHOPITAL {
        let (Some(n0), Some(d0)) = (at(ev, &numer), at(ev, &denom)) else {
            break;
        };
        if !(n0.is_zero() && d0.is_zero()) {
            break;
        }
        numer = diff(ev, &numer, var)?;
        denom = diff(ev, &denom, var)?;
        if let Some(value) = at(ev, &arith::div(numer.clone(), denom.clone())?) {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn limit_at_infinity(expr: &Value, var: &str, sign: i64) -> SymResult<Option<Value>> {
    let Some((n, d)) = rational_function(expr, var) else {
        return Ok(None);
    };
    let (Some(dn), Some(dd)) = (n.degree(), d.degree()) else {
        return Ok(Some(Value::int(0)));
    };
    if dn < dd {
        return Ok(Some(Value::int(0)));
    }
    let ratio = n.lead().checked_div(&d.lead()).unwrap_or_else(Rational::zero);
    if dn == dd {
        return Ok(Some(ratio.into_value()));
    }
    let odd = (dn - dd) % 2 == 1;
    let positive = !ratio.is_negative() ^ (odd && sign < 0);
    Ok(Some(Value::double(if positive { f64::INFINITY } else { f64::NEG_INFINITY })))
}

// -------------------------------------------------------------- series

/// `series(expr)`, `series(expr, x)`, `series(expr, x, a)`,
/// `series(expr, x, a, n)` or `series(expr, x=a, n)`: the Taylor polynomial
/// of order `n` (default 5) around `a` (default 0).
pub(crate) fn series_call(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let order_of = |n: &Value| {
        n.to_int()
            .ok()
            .filter(|n| (0..=100).contains(n))
            .ok_or_else(|| evaluation(format!("series: invalid order {n}")))
    };
    let (expr, var, point, order) = match args.as_slice() {
        [expr] => (expr, main_variable(expr), Value::int(0), DEFAULT_SERIES_ORDER),
        [expr, eq] if equation(eq).is_ok() => {
            let (var, point) = equation(eq)?;
            (expr, var, point, DEFAULT_SERIES_ORDER)
        }
        [expr, eq, n] if equation(eq).is_ok() => {
            let (var, point) = equation(eq)?;
            (expr, var, point, order_of(n)?)
        }
        [expr, var] => (expr, var_name(var, BuiltinOp::Series)?, Value::int(0), DEFAULT_SERIES_ORDER),
        [expr, var, point] => (expr, var_name(var, BuiltinOp::Series)?, point.clone(), DEFAULT_SERIES_ORDER),
        [expr, var, point, n] => (expr, var_name(var, BuiltinOp::Series)?, point.clone(), order_of(n)?),
        _ => return Err(evaluation(format!("series: expected 1 to 4 argument(s), got {}", args.len()))),
    };
    match taylor(ev, expr, &var, &point, order)? {
        Some(value) => Ok(value),
        None => Ok(Value::symbolic_args(BuiltinOp::Series, args)),
    }
}

fn taylor(ev: &mut Evaluator<'_>, expr: &Value, var: &str, point: &Value, order: i64) -> SymResult<Option<Value>> {
    let shifted = arith::sub(Value::identifier(var), point.clone())?;
    let mut derivative = expr.clone();
    let mut terms = Vec::new();
    for k in 0..=order {
        let Some(at_point) = finite(ev.eval(&substitute(&derivative, var, point))) else {
            return Ok(None);
        };
        if !at_point.is_zero() {
            let factorial = integer::factorial(&Value::int(k)).unwrap_or(Value::int(1));
            let coefficient = arith::div(at_point, factorial)?;
            terms.push(arith::mul2(coefficient, arith::pow(shifted.clone(), Value::int(k))?)?);
        }
        if k < order {
            derivative = diff(ev, &derivative, var)?;
        }
    }
    arith::add(terms).map(Some)
}

#[cfg(test)]
mod tests;
