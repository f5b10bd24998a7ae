//! Elementary functions.
//!
//! Approximate arguments give approximate results (`f64` math for doubles,
//! fixed-point series for precise reals). Exact arguments give exact special
//! values where one exists (`sin(pi/6)` is `1/2`, `ln(1)` is `0`) and an
//! unevaluated call otherwise.

use std::f64::consts::PI;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One};
use sym_value::{evaluation, BuiltinOp, Operator, Rational, Real, SymResult, Value};

use crate::arith::{self, split_coeff};
use crate::eval::Evaluator;
use crate::hp;
use crate::numeric::{self, make_complex};
use crate::order::operands;
use crate::stack::ensure_sufficient_stack;

/// Most digits `evalf` accepts.
const MAX_DIGITS: u32 = 1000;

fn rational(n: i64, d: i64) -> Rational {
    Rational::new(BigInt::from(n), BigInt::from(d)).unwrap_or_else(Rational::zero)
}

fn pi() -> Value {
    Value::identifier("pi")
}

fn pi_times(q: Rational) -> SymResult<Value> {
    arith::mul2(q.into_value(), pi())
}

fn is_call(value: &Value, op: BuiltinOp) -> Option<Value> {
    match value {
        Value::Symbolic(s) if s.op.is(op) => Some(s.arg.clone()),
        _ => None,
    }
}

/// Apply a one-argument elementary function. Vectors map elementwise.
pub(crate) fn apply(op: BuiltinOp, x: Value) -> SymResult<Value> {
    if let Value::Vector(v) = &x {
        let items = v
            .items()
            .iter()
            .map(|item| apply(op, item.clone()))
            .collect::<SymResult<Vec<_>>>()?;
        return Ok(Value::vector(items, v.subtype()));
    }
    match op {
        BuiltinOp::Sqrt => arith::pow(x, rational(1, 2).into_value()),
        BuiltinOp::Abs => abs(x),
        BuiltinOp::Sign => Ok(match numeric::signum(&x) {
            Some(s) => Value::int(s),
            None => Value::symbolic(op, x),
        }),
        BuiltinOp::Floor | BuiltinOp::Ceil => Ok(round(op, &x).unwrap_or_else(|| Value::symbolic(op, x))),
        BuiltinOp::Re | BuiltinOp::Im | BuiltinOp::Conj => complex_part(op, x),
        _ => transcendental(op, x),
    }
}

fn transcendental(op: BuiltinOp, x: Value) -> SymResult<Value> {
    if x.is_approx() {
        if let Some(v) = approximate_call(op, &x) {
            return Ok(v);
        }
    }
    if let Some(v) = special_value(op, &x)? {
        return Ok(v);
    }
    // Odd functions pull the sign out, cos ignores it.
    if !x.is_approx() && matches!(op, BuiltinOp::Sin | BuiltinOp::Tan | BuiltinOp::Asin | BuiltinOp::Atan | BuiltinOp::Cos) {
        let (coeff, _) = split_coeff(&x);
        if coeff.is_negative_number() && !x.is_complex() && is_call(&x, BuiltinOp::Add).is_none() {
            let positive = arith::neg(x)?;
            let inner = transcendental(op, positive)?;
            return if op == BuiltinOp::Cos {
                Ok(inner)
            } else {
                arith::neg(inner)
            };
        }
    }
    match op {
        BuiltinOp::Exp => {
            if let Some(u) = is_call(&x, BuiltinOp::Ln) {
                return Ok(u);
            }
        }
        BuiltinOp::Ln => {
            if let Some(u) = is_call(&x, BuiltinOp::Exp) {
                return Ok(u);
            }
        }
        _ => {}
    }
    Ok(Value::symbolic(op, x))
}

fn approximate_call(op: BuiltinOp, x: &Value) -> Option<Value> {
    match x {
        Value::Double(v) => float_call(op, *v),
        Value::Real(r) => precise_call(op, r).or_else(|| float_call(op, r.to_f64())),
        Value::Complex(c) if op == BuiltinOp::Exp => {
            let (re, im) = (numeric::to_f64(&c.re)?, numeric::to_f64(&c.im)?);
            let scale = re.exp();
            Some(make_complex(Value::double(scale * im.cos()), Value::double(scale * im.sin())))
        }
        _ => None,
    }
}

fn float_call(op: BuiltinOp, v: f64) -> Option<Value> {
    let result = match op {
        BuiltinOp::Sin => v.sin(),
        BuiltinOp::Cos => v.cos(),
        BuiltinOp::Tan => v.tan(),
        BuiltinOp::Asin if (-1.0..=1.0).contains(&v) => v.asin(),
        BuiltinOp::Acos if (-1.0..=1.0).contains(&v) => v.acos(),
        BuiltinOp::Atan => v.atan(),
        BuiltinOp::Exp => v.exp(),
        BuiltinOp::Ln if v < 0.0 => return Some(make_complex(Value::double((-v).ln()), Value::double(PI))),
        BuiltinOp::Ln => v.ln(),
        BuiltinOp::Log10 if v >= 0.0 => v.log10(),
        _ => return None,
    };
    Some(Value::double(result))
}

fn precise_call(op: BuiltinOp, r: &Real) -> Option<Value> {
    let digits = r.digits();
    let q = r.to_rational();
    let result = match op {
        BuiltinOp::Sin => hp::sin(&q, digits),
        BuiltinOp::Cos => hp::cos(&q, digits),
        BuiltinOp::Tan => hp::tan(&q, digits)?,
        BuiltinOp::Asin => hp::asin(&q, digits)?,
        BuiltinOp::Acos => hp::acos(&q, digits)?,
        BuiltinOp::Atan => hp::atan(&q, digits),
        BuiltinOp::Exp => hp::exp(&q, digits),
        BuiltinOp::Ln => hp::ln(&q, digits)?,
        BuiltinOp::Log10 => hp::log10(&q, digits)?,
        _ => return None,
    };
    Some(Value::real(result))
}

/// `q` when `x` is `q*pi` for rational `q` (zero counts as `0*pi`).
fn pi_multiple(x: &Value) -> Option<Rational> {
    if x.is_zero() && !x.is_approx() {
        return Some(Rational::zero());
    }
    match split_coeff(x) {
        (c, Some(Value::Identifier(name))) if &*name == "pi" => Rational::from_value(&c),
        _ => None,
    }
}

/// `sin(q*pi)` for the angles with a closed form.
fn sin_pi(q: &Rational) -> SymResult<Option<Value>> {
    let two = Rational::from_integer(2);
    // Reduce into [0, 2).
    let turns = Rational::from_integer((q.checked_div(&two).unwrap_or_else(Rational::zero)).floor());
    let mut r = q - &(&two * &turns);
    let mut negate = false;
    if r >= Rational::one() {
        r = &r - &Rational::one();
        negate = true;
    }
    if r > rational(1, 2) {
        r = &Rational::one() - &r;
    }
    let half = rational(1, 2);
    let value = if r.is_zero() {
        Value::int(0)
    } else if r == rational(1, 6) {
        half.into_value()
    } else if r == rational(1, 4) {
        arith::mul2(half.into_value(), arith::pow(Value::int(2), rational(1, 2).into_value())?)?
    } else if r == rational(1, 3) {
        arith::mul2(half.into_value(), arith::pow(Value::int(3), rational(1, 2).into_value())?)?
    } else if r == half {
        Value::int(1)
    } else {
        return Ok(None);
    };
    Ok(Some(if negate { arith::neg(value)? } else { value }))
}

/// `asin(q)` for the values with a closed form, as a multiple of pi.
fn asin_exact(x: &Value) -> Option<Rational> {
    let q = Rational::from_value(x)?;
    let (abs, sign) = (q.abs(), if q.is_negative() { -1 } else { 1 });
    let angle = if abs.is_zero() {
        Rational::zero()
    } else if abs == rational(1, 2) {
        rational(1, 6)
    } else if abs.is_one() {
        rational(1, 2)
    } else {
        return None;
    };
    Some(&angle * &Rational::from_integer(sign))
}

fn special_value(op: BuiltinOp, x: &Value) -> SymResult<Option<Value>> {
    if x.is_approx() {
        return Ok(None);
    }
    match op {
        BuiltinOp::Sin => match pi_multiple(x) {
            Some(q) => sin_pi(&q),
            None => Ok(None),
        },
        BuiltinOp::Cos => match pi_multiple(x) {
            Some(q) => sin_pi(&(&q + &rational(1, 2))),
            None => Ok(None),
        },
        BuiltinOp::Tan => {
            let Some(q) = pi_multiple(x) else {
                return Ok(None);
            };
            match (sin_pi(&q)?, sin_pi(&(&q + &rational(1, 2)))?) {
                (Some(s), Some(c)) => arith::div(s, c).map(Some),
                _ => Ok(None),
            }
        }
        BuiltinOp::Asin => asin_exact(x).map(pi_times).transpose(),
        BuiltinOp::Acos => match asin_exact(x) {
            Some(q) => pi_times(&rational(1, 2) - &q).map(Some),
            None => Ok(None),
        },
        BuiltinOp::Atan => {
            let Some(q) = Rational::from_value(x) else {
                return Ok(None);
            };
            if q.is_zero() {
                return Ok(Some(Value::int(0)));
            }
            if q.abs().is_one() {
                let sign = if q.is_negative() { -1 } else { 1 };
                return pi_times(rational(sign, 4)).map(Some);
            }
            Ok(None)
        }
        BuiltinOp::Exp => Ok(x.is_zero().then(|| Value::int(1))),
        BuiltinOp::Ln => {
            if x.is_one() && !x.is_complex() {
                return Ok(Some(Value::int(0)));
            }
            if x.is_zero() {
                return Ok(Some(Value::double(f64::NEG_INFINITY)));
            }
            Ok(None)
        }
        BuiltinOp::Log10 => Ok(Rational::from_value(x).and_then(|q| exact_log10(&q)).map(Value::int)),
        _ => Ok(None),
    }
}

/// `k` when `q` is `10^k`.
fn exact_log10(q: &Rational) -> Option<i64> {
    if q.is_negative() || q.is_zero() {
        return None;
    }
    let (mut n, inverted) = if q.numer().is_one() && !q.denom().is_one() {
        (q.denom().clone(), true)
    } else if q.is_integer() {
        (q.numer().clone(), false)
    } else {
        return None;
    };
    let ten = BigInt::from(10);
    let mut k = 0i64;
    while n > BigInt::one() {
        if &n % &ten != BigInt::from(0) {
            return None;
        }
        n /= &ten;
        k += 1;
    }
    Some(if inverted { -k } else { k })
}

fn abs(x: Value) -> SymResult<Value> {
    if let Value::Complex(c) = &x {
        let norm = arith::add(vec![
            arith::pow(c.re.clone(), Value::int(2))?,
            arith::pow(c.im.clone(), Value::int(2))?,
        ])?;
        return arith::pow(norm, rational(1, 2).into_value());
    }
    if x.is_number() {
        return Ok(if x.is_negative_number() { numeric::neg(&x).unwrap_or(x) } else { x });
    }
    if is_call(&x, BuiltinOp::Abs).is_some() {
        return Ok(x);
    }
    let (coeff, _) = split_coeff(&x);
    if coeff.is_negative_number() && is_call(&x, BuiltinOp::Add).is_none() {
        return abs(arith::neg(x)?);
    }
    Ok(Value::symbolic(BuiltinOp::Abs, x))
}

fn round(op: BuiltinOp, x: &Value) -> Option<Value> {
    let q = match x {
        Value::Double(v) if v.is_finite() => {
            let rounded = if op == BuiltinOp::Floor { v.floor() } else { v.ceil() };
            return BigInt::from_f64(rounded).map(Value::bigint);
        }
        Value::Real(r) => r.to_rational(),
        other => Rational::from_value(other)?,
    };
    Some(Value::bigint(if op == BuiltinOp::Floor { q.floor() } else { q.ceil() }))
}

fn contains_complex(x: &Value) -> bool {
    match x {
        Value::Complex(_) => true,
        Value::Symbolic(s) => contains_complex(&s.arg),
        Value::Vector(v) => v.items().iter().any(contains_complex),
        _ => false,
    }
}

/// `re`, `im`, `conj`. Variables are taken to be real.
fn complex_part(op: BuiltinOp, x: Value) -> SymResult<Value> {
    if x.is_number() {
        return Ok(match op {
            BuiltinOp::Re => x.re(),
            BuiltinOp::Im => x.im(),
            _ => make_complex(x.re(), numeric::neg(&x.im()).unwrap_or_else(|| Value::int(0))),
        });
    }
    if !contains_complex(&x) {
        return Ok(if op == BuiltinOp::Im { Value::int(0) } else { x });
    }
    if let Some(terms) = is_call(&x, BuiltinOp::Add).map(|_| operands(&x)) {
        let parts = terms
            .into_iter()
            .map(|t| complex_part(op, t))
            .collect::<SymResult<Vec<_>>>()?;
        return arith::add(parts);
    }
    Ok(Value::symbolic(op, x))
}

/// `evalf(expr)` or `evalf(expr, digits)`.
pub(crate) fn evalf(ev: &mut Evaluator<'_>, args: Vec<Value>) -> SymResult<Value> {
    let (expr, digits) = match args.as_slice() {
        [expr] => (expr.clone(), ev.precision()),
        [expr, digits] => {
            let n = digits
                .to_int()
                .ok()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| (1..=MAX_DIGITS).contains(n))
                .ok_or_else(|| evaluation(format!("evalf: invalid digit count {digits}")))?;
            (expr.clone(), n)
        }
        _ => return Err(evaluation(format!("evalf: expected 1 or 2 argument(s), got {}", args.len()))),
    };
    approximate_tree(ev, &expr, digits)
}

fn approximate_tree(ev: &mut Evaluator<'_>, expr: &Value, digits: u32) -> SymResult<Value> {
    ensure_sufficient_stack(|| match expr {
        number if number.is_number() => Ok(numeric::approximate(number, digits).unwrap_or_else(|| number.clone())),
        Value::Identifier(name) if &**name == "pi" => Ok(if digits <= 15 {
            Value::double(PI)
        } else {
            Value::real(hp::pi(digits))
        }),
        Value::Vector(v) => {
            let items = v
                .items()
                .iter()
                .map(|item| approximate_tree(ev, item, digits))
                .collect::<SymResult<Vec<_>>>()?;
            Ok(Value::vector(items, v.subtype()))
        }
        Value::Symbolic(s) => {
            let args = operands(expr)
                .iter()
                .map(|a| approximate_tree(ev, a, digits))
                .collect::<SymResult<Vec<_>>>()?;
            match &s.op {
                Operator::Builtin(op) => ev.call(*op, args),
                Operator::User(_) => Ok(Value::symbolic_args(s.op.clone(), args)),
            }
        }
        other => Ok(other.clone()),
    })
}

#[cfg(test)]
mod tests;
