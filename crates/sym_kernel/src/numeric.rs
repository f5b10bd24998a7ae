//! Arithmetic over numeric values: exact rationals, doubles, precise reals
//! and complex numbers built from them.
//!
//! Mixing rules: a double absorbs anything it touches; a precise real
//! absorbs exact rationals; exact with exact stays exact. A complex result
//! whose imaginary part is exactly zero collapses to its real part.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use sym_value::{division_by_zero, Rational, Real, SymResult, Value};

use crate::hp;

/// Working view of a real number.
#[derive(Clone, Debug)]
enum Num {
    Exact(Rational),
    Float(f64),
    Precise(Real),
}

fn classify(value: &Value) -> Option<Num> {
    match value {
        Value::Double(x) => Some(Num::Float(*x)),
        Value::Real(r) => Some(Num::Precise((**r).clone())),
        other => Rational::from_value(other).map(Num::Exact),
    }
}

fn into_value(n: Num) -> Value {
    match n {
        Num::Exact(q) => q.into_value(),
        Num::Float(x) => Value::double(x),
        Num::Precise(r) => Value::real(r),
    }
}

fn as_f64(n: &Num) -> f64 {
    match n {
        Num::Exact(q) => q.to_f64(),
        Num::Float(x) => *x,
        Num::Precise(r) => r.to_f64(),
    }
}

fn as_real(n: &Num, digits: u32) -> Real {
    match n {
        Num::Exact(q) => Real::from_rational(q, digits),
        Num::Float(x) => Real::parse(&format!("{x:e}"), digits).unwrap_or_else(|| Real::zero(digits)),
        Num::Precise(r) => r.clone(),
    }
}

/// Bring two reals to a common representation.
fn unify(a: Num, b: Num) -> (Num, Num) {
    match (&a, &b) {
        (Num::Float(_), _) | (_, Num::Float(_)) => (Num::Float(as_f64(&a)), Num::Float(as_f64(&b))),
        (Num::Precise(r), _) | (_, Num::Precise(r)) => {
            let digits = r.digits();
            (Num::Precise(as_real(&a, digits)), Num::Precise(as_real(&b, digits)))
        }
        _ => (a, b),
    }
}

fn real_add(a: &Value, b: &Value) -> Option<Value> {
    let (a, b) = unify(classify(a)?, classify(b)?);
    Some(into_value(match (a, b) {
        (Num::Exact(x), Num::Exact(y)) => Num::Exact(&x + &y),
        (Num::Precise(x), Num::Precise(y)) => Num::Precise(&x + &y),
        (x, y) => Num::Float(as_f64(&x) + as_f64(&y)),
    }))
}

fn real_mul(a: &Value, b: &Value) -> Option<Value> {
    let (a, b) = unify(classify(a)?, classify(b)?);
    Some(into_value(match (a, b) {
        (Num::Exact(x), Num::Exact(y)) => Num::Exact(&x * &y),
        (Num::Precise(x), Num::Precise(y)) => Num::Precise(&x * &y),
        (x, y) => Num::Float(as_f64(&x) * as_f64(&y)),
    }))
}

fn real_neg(a: &Value) -> Option<Value> {
    Some(into_value(match classify(a)? {
        Num::Exact(q) => Num::Exact(-&q),
        Num::Float(x) => Num::Float(-x),
        Num::Precise(r) => Num::Precise(-&r),
    }))
}

fn real_inv(a: &Value) -> SymResult<Option<Value>> {
    let Some(n) = classify(a) else {
        return Ok(None);
    };
    let inverted = match n {
        Num::Exact(q) => Num::Exact(q.recip().ok_or_else(division_by_zero)?),
        Num::Float(x) => {
            if x == 0.0 {
                return Err(division_by_zero());
            }
            Num::Float(1.0 / x)
        }
        Num::Precise(r) => {
            let one = Real::from_rational(&Rational::one(), r.digits());
            Num::Precise(one.checked_div(&r).ok_or_else(division_by_zero)?)
        }
    };
    Ok(Some(into_value(inverted)))
}

/// Real and imaginary parts of any number.
fn parts(value: &Value) -> (Value, Value) {
    match value {
        Value::Complex(c) => (c.re.clone(), c.im.clone()),
        other => (other.clone(), Value::int(0)),
    }
}

/// Complex from parts, collapsing an exact-zero imaginary part.
pub(crate) fn make_complex(re: Value, im: Value) -> Value {
    if matches!(im, Value::Int(0)) {
        return re;
    }
    Value::complex(re.clone(), im).unwrap_or(re)
}

pub fn add(a: &Value, b: &Value) -> Option<Value> {
    if !a.is_complex() && !b.is_complex() {
        return real_add(a, b);
    }
    let (ar, ai) = parts(a);
    let (br, bi) = parts(b);
    Some(make_complex(real_add(&ar, &br)?, real_add(&ai, &bi)?))
}

pub fn mul(a: &Value, b: &Value) -> Option<Value> {
    if !a.is_complex() && !b.is_complex() {
        return real_mul(a, b);
    }
    let (ar, ai) = parts(a);
    let (br, bi) = parts(b);
    let re = real_add(&real_mul(&ar, &br)?, &real_neg(&real_mul(&ai, &bi)?)?)?;
    let im = real_add(&real_mul(&ar, &bi)?, &real_mul(&ai, &br)?)?;
    Some(make_complex(re, im))
}

pub fn neg(a: &Value) -> Option<Value> {
    if let Value::Complex(c) = a {
        return Some(make_complex(real_neg(&c.re)?, real_neg(&c.im)?));
    }
    real_neg(a)
}

pub fn sub(a: &Value, b: &Value) -> Option<Value> {
    add(a, &neg(b)?)
}

/// Reciprocal; `Ok(None)` when `a` is not a number.
pub fn inv(a: &Value) -> SymResult<Option<Value>> {
    let Value::Complex(c) = a else {
        return real_inv(a);
    };
    // conj(a) / |a|^2
    let (Some(re2), Some(im2)) = (real_mul(&c.re, &c.re), real_mul(&c.im, &c.im)) else {
        return Ok(None);
    };
    let Some(norm) = real_add(&re2, &im2) else {
        return Ok(None);
    };
    let Some(scale) = real_inv(&norm)? else {
        return Ok(None);
    };
    let re = real_mul(&c.re, &scale);
    let im = real_mul(&c.im, &scale).and_then(|v| real_neg(&v));
    Ok(re.zip(im).map(|(re, im)| make_complex(re, im)))
}

/// Numeric comparison of two real numbers.
pub fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    let (a, b) = unify(classify(a)?, classify(b)?);
    match (a, b) {
        (Num::Exact(x), Num::Exact(y)) => Some(x.cmp(&y)),
        (Num::Precise(x), Num::Precise(y)) => Some(x.cmp_value(&y)),
        (x, y) => as_f64(&x).partial_cmp(&as_f64(&y)),
    }
}

pub fn to_f64(value: &Value) -> Option<f64> {
    classify(value).map(|n| as_f64(&n))
}

/// Sign of a real number: -1, 0 or 1.
pub fn signum(value: &Value) -> Option<i64> {
    compare(value, &Value::int(0)).map(|o| match o {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    })
}

/// Largest exponent accepted for exact integer powers.
const MAX_EXACT_EXPONENT: i64 = 1_000_000;

/// `base^exp` when both are numbers and the result is a number.
///
/// `Ok(None)` means the power has no numeric closed form here (an irrational
/// root, say) and should stay symbolic.
pub fn pow(base: &Value, exp: &Value) -> SymResult<Option<Value>> {
    if let Value::Int(n) = exp {
        return pow_int(base, *n);
    }
    if exp.is_complex() || !base.is_number() {
        return Ok(None);
    }
    if let (Some(Num::Exact(b)), Value::Fraction(_)) = (classify(base), exp) {
        let Some(e) = Rational::from_value(exp) else {
            return Ok(None);
        };
        let Some(q) = e.denom().to_u32() else {
            return Ok(None);
        };
        let Some(p) = e.numer().to_i64() else {
            return Ok(None);
        };
        if b.is_zero() && p < 0 {
            return Err(division_by_zero());
        }
        return Ok(b.exact_root(q).and_then(|root| root.pow(p)).map(Rational::into_value));
    }
    if base.is_complex() {
        return Ok(None);
    }
    let (Some(b), Some(e)) = (classify(base), classify(exp)) else {
        return Ok(None);
    };
    let (b, e) = unify(b, e);
    match (b, e) {
        // Exact base with a huge integer exponent: leave it alone.
        (Num::Exact(_), Num::Exact(_)) => Ok(None),
        (Num::Precise(b), Num::Precise(e)) => Ok(precise_pow(&b, &e)),
        (b, e) => Ok(float_pow(as_f64(&b), as_f64(&e))),
    }
}

fn pow_int(base: &Value, n: i64) -> SymResult<Option<Value>> {
    if !base.is_number() {
        return Ok(None);
    }
    if n.unsigned_abs() > MAX_EXACT_EXPONENT.unsigned_abs() && !base.is_approx() {
        return Ok(None);
    }
    if n < 0 {
        let Some(m) = n.checked_neg() else {
            return Ok(None);
        };
        let Some(positive) = pow_int(base, m)? else {
            return Ok(None);
        };
        return inv(&positive);
    }
    match classify(base) {
        Some(Num::Exact(q)) => Ok(q.pow(n).map(Rational::into_value)),
        Some(Num::Float(x)) => Ok(Some(Value::double(match i32::try_from(n) {
            Ok(small) => x.powi(small),
            Err(_) => x.powf(n as f64),
        }))),
        _ => {
            // Square-and-multiply for precise reals and complex numbers.
            let mut result = Value::int(1);
            let mut square = base.clone();
            let mut k = n;
            while k > 0 {
                if k & 1 == 1 {
                    result = mul(&result, &square).unwrap_or(result);
                }
                k >>= 1;
                if k > 0 {
                    square = mul(&square, &square).unwrap_or(square);
                }
            }
            Ok(Some(result))
        }
    }
}

fn float_pow(b: f64, e: f64) -> Option<Value> {
    if b >= 0.0 {
        return Some(Value::double(b.powf(e)));
    }
    // Principal value of a negative base.
    let magnitude = (-b).powf(e);
    let angle = std::f64::consts::PI * e;
    Some(make_complex(
        Value::double(magnitude * angle.cos()),
        Value::double(magnitude * angle.sin()),
    ))
}

fn precise_pow(b: &Real, e: &Real) -> Option<Value> {
    let digits = b.digits().min(e.digits());
    let base = b.to_rational();
    let exponent = e.to_rational();
    if base.is_negative() {
        return float_pow(b.to_f64(), e.to_f64());
    }
    if exponent == Rational::new(BigInt::from(1), BigInt::from(2))? {
        return hp::sqrt(&base, digits).map(Value::real);
    }
    if base.is_zero() {
        return Some(Value::real(Real::zero(digits)));
    }
    let ln = hp::ln(&base, digits + 10)?;
    let product = &ln * &Real::from_rational(&exponent, digits + 10);
    Some(Value::real(hp::exp(&product.to_rational(), digits)))
}

/// Approximate a number: doubles up to 15 digits, precise reals beyond.
pub fn approximate(value: &Value, digits: u32) -> Option<Value> {
    if let Value::Complex(c) = value {
        return Some(make_complex(approximate(&c.re, digits)?, approximate(&c.im, digits)?));
    }
    let n = classify(value)?;
    Some(if digits <= 15 {
        Value::double(as_f64(&n))
    } else {
        Value::real(as_real(&n, digits).with_digits(digits))
    })
}

#[cfg(test)]
mod tests;
