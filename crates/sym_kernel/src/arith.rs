//! Canonical arithmetic on expressions.
//!
//! Every result is in canonical form:
//!
//! - sums are flat, like terms are collected, terms are sorted by
//!   [`term_order`] and the numeric constant comes last;
//! - products are flat, equal bases are merged into powers, the numeric
//!   coefficient comes first and a numeric coefficient is distributed over
//!   a lone sum (`2*(x+1)` becomes `2*x+2`);
//! - `x - y` is `x + (-1)*y` and `x / y` is `x * y^-1`.
//!
//! Sums are never expanded into products of sums; that is `expand`'s job.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive};
use sym_value::{division_by_zero, BuiltinOp, Rational, SymResult, Value, VectorSubtype};

use crate::integer::factorize;
use crate::numeric;
use crate::order::{factor_order, operands, split_power, term_order};

fn is_node(value: &Value, op: BuiltinOp) -> bool {
    matches!(value, Value::Symbolic(s) if s.op.is(op))
}

/// Split a term into numeric coefficient and non-numeric remainder.
pub fn split_coeff(term: &Value) -> (Value, Option<Value>) {
    if term.is_number() {
        return (term.clone(), None);
    }
    if is_node(term, BuiltinOp::Mul) {
        let factors = operands(term);
        if let Some((first, rest)) = factors.split_first() {
            if first.is_number() {
                let rest = match rest {
                    [single] => single.clone(),
                    _ => Value::symbolic_args(BuiltinOp::Mul, rest.to_vec()),
                };
                return (first.clone(), Some(rest));
            }
        }
    }
    (Value::int(1), Some(term.clone()))
}

/// `coeff * monomial` without re-canonicalizing the monomial.
fn with_coeff(coeff: Value, monomial: Value) -> Value {
    if matches!(coeff, Value::Int(1)) {
        return monomial;
    }
    let mut factors = vec![coeff];
    if is_node(&monomial, BuiltinOp::Mul) {
        factors.extend(operands(&monomial));
    } else {
        factors.push(monomial);
    }
    Value::symbolic_args(BuiltinOp::Mul, factors)
}

fn flatten(op: BuiltinOp, operands_in: Vec<Value>, out: &mut Vec<Value>) {
    for value in operands_in {
        if is_node(&value, op) {
            flatten(op, operands(&value), out);
        } else {
            out.push(value);
        }
    }
}

/// Elements of a vector operand usable in elementwise arithmetic.
fn vector_items(value: &Value) -> Option<(&[Value], VectorSubtype)> {
    match value {
        Value::Vector(v) if v.subtype() != VectorSubtype::Sequence => Some((v.items(), v.subtype())),
        _ => None,
    }
}

/// Canonical sum.
pub fn add(terms: Vec<Value>) -> SymResult<Value> {
    let mut flat = Vec::with_capacity(terms.len());
    flatten(BuiltinOp::Add, terms, &mut flat);

    if flat.len() > 1 && flat.iter().all(|t| vector_items(t).is_some()) {
        return add_vectors(&flat);
    }

    let mut constant = Value::int(0);
    let mut groups: Vec<(Value, Value)> = Vec::new();
    for term in flat {
        match split_coeff(&term) {
            (c, None) => constant = numeric::add(&constant, &c).unwrap_or(constant),
            (c, Some(monomial)) => match groups.iter_mut().find(|(m, _)| *m == monomial) {
                Some((_, coeff)) => *coeff = numeric::add(coeff, &c).unwrap_or_else(|| coeff.clone()),
                None => groups.push((monomial, c)),
            },
        }
    }

    let mut out: Vec<Value> = groups
        .into_iter()
        .filter(|(_, c)| !c.is_zero())
        .map(|(m, c)| with_coeff(c, m))
        .collect();
    out.sort_by(term_order);
    if !constant.is_zero() || out.is_empty() {
        out.push(constant);
    }
    Ok(if out.len() == 1 {
        out.swap_remove(0)
    } else {
        Value::symbolic_args(BuiltinOp::Add, out)
    })
}

fn add_vectors(vectors: &[Value]) -> SymResult<Value> {
    let Some((first, subtype)) = vectors.first().and_then(vector_items) else {
        return Ok(Value::int(0));
    };
    let len = first.len();
    let lengths_match = vectors
        .iter()
        .all(|v| vector_items(v).is_some_and(|(items, _)| items.len() == len));
    if !lengths_match {
        return Ok(Value::symbolic_args(BuiltinOp::Add, vectors.to_vec()));
    }
    let mut items = Vec::with_capacity(len);
    for i in 0..len {
        let column: Vec<Value> = vectors
            .iter()
            .filter_map(|v| vector_items(v).map(|(items, _)| items[i].clone()))
            .collect();
        items.push(add(column)?);
    }
    Ok(Value::vector(items, subtype))
}

/// Canonical product.
pub fn mul(factors: Vec<Value>) -> SymResult<Value> {
    let mut flat = Vec::with_capacity(factors.len());
    flatten(BuiltinOp::Mul, factors, &mut flat);

    if let Some(result) = mul_vectors(&flat)? {
        return Ok(result);
    }

    let mut coeff = Value::int(1);
    let mut groups: Vec<(Value, Vec<Value>)> = Vec::new();
    for factor in flat {
        if factor.is_number() {
            coeff = numeric::mul(&coeff, &factor).unwrap_or(coeff);
            continue;
        }
        let (base, exponent) = split_power(&factor);
        match groups.iter_mut().find(|(b, _)| *b == base) {
            Some((_, exponents)) => exponents.push(exponent),
            None => groups.push((base, vec![exponent])),
        }
    }
    if coeff.is_zero() {
        return Ok(coeff);
    }

    let mut out: Vec<Value> = Vec::with_capacity(groups.len());
    for (base, exponents) in groups {
        let merged = if exponents.len() == 1 {
            pow(base.clone(), exponents.into_iter().next().unwrap_or(Value::int(1)))?
        } else {
            pow(base, add(exponents)?)?
        };
        if merged.is_number() {
            coeff = numeric::mul(&coeff, &merged).unwrap_or(coeff);
        } else if is_node(&merged, BuiltinOp::Mul) {
            for f in operands(&merged) {
                if f.is_number() {
                    coeff = numeric::mul(&coeff, &f).unwrap_or(coeff);
                } else {
                    out.push(f);
                }
            }
        } else {
            out.push(merged);
        }
    }
    if coeff.is_zero() {
        return Ok(coeff);
    }
    out.sort_by(factor_order);

    // Distribute a numeric coefficient over a lone sum.
    if out.len() == 1 && is_node(&out[0], BuiltinOp::Add) && !matches!(coeff, Value::Int(1)) {
        let terms = operands(&out[0])
            .into_iter()
            .map(|t| mul(vec![coeff.clone(), t]))
            .collect::<SymResult<Vec<_>>>()?;
        return add(terms);
    }

    Ok(match (matches!(coeff, Value::Int(1)), out.len()) {
        (_, 0) => coeff,
        (true, 1) => out.swap_remove(0),
        (true, _) => Value::symbolic_args(BuiltinOp::Mul, out),
        (false, _) => {
            out.insert(0, coeff);
            Value::symbolic_args(BuiltinOp::Mul, out)
        }
    })
}

/// Scalar times vector is elementwise; two equal-length plain vectors give
/// their dot product. `None` when no vector is involved.
fn mul_vectors(factors: &[Value]) -> SymResult<Option<Value>> {
    let vector_positions: Vec<usize> = factors
        .iter()
        .enumerate()
        .filter(|(_, f)| vector_items(f).is_some())
        .map(|(i, _)| i)
        .collect();
    match vector_positions.as_slice() {
        [] => Ok(None),
        [at] => {
            let Some((items, subtype)) = vector_items(&factors[*at]) else {
                return Ok(None);
            };
            let scalars: Vec<Value> = factors
                .iter()
                .enumerate()
                .filter(|(i, _)| i != at)
                .map(|(_, f)| f.clone())
                .collect();
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                let mut operands = scalars.clone();
                operands.push(item.clone());
                out.push(mul(operands)?);
            }
            Ok(Some(Value::vector(out, subtype)))
        }
        [a, b] if factors.len() == 2 => {
            let (Some((xs, sa)), Some((ys, sb))) = (vector_items(&factors[*a]), vector_items(&factors[*b])) else {
                return Ok(None);
            };
            if xs.len() != ys.len() || sa == VectorSubtype::Matrix || sb == VectorSubtype::Matrix {
                return Ok(None);
            }
            let products = xs
                .iter()
                .zip(ys)
                .map(|(x, y)| mul(vec![x.clone(), y.clone()]))
                .collect::<SymResult<Vec<_>>>()?;
            Ok(Some(add(products)?))
        }
        _ => Ok(None),
    }
}

pub fn add2(a: Value, b: Value) -> SymResult<Value> {
    add(vec![a, b])
}

pub fn mul2(a: Value, b: Value) -> SymResult<Value> {
    mul(vec![a, b])
}

pub fn neg(a: Value) -> SymResult<Value> {
    mul(vec![Value::int(-1), a])
}

pub fn sub(a: Value, b: Value) -> SymResult<Value> {
    add(vec![a, neg(b)?])
}

pub fn inv(a: Value) -> SymResult<Value> {
    pow(a, Value::int(-1))
}

pub fn div(a: Value, b: Value) -> SymResult<Value> {
    mul(vec![a, inv(b)?])
}

/// Canonical power.
pub fn pow(base: Value, exponent: Value) -> SymResult<Value> {
    if matches!(exponent, Value::Int(0)) {
        return Ok(Value::int(1));
    }
    if matches!(exponent, Value::Int(1)) {
        return Ok(base);
    }
    if base.is_number() && exponent.is_number() {
        if let Some(v) = numeric::pow(&base, &exponent)? {
            return Ok(v);
        }
        if (base.is_integer() || base.is_fraction()) && exponent.is_fraction() {
            return rational_root(&base, &exponent);
        }
    }
    if matches!(base, Value::Int(1)) {
        return Ok(base);
    }
    if matches!(base, Value::Int(0)) {
        return match numeric::signum(&exponent) {
            Some(1) => Ok(Value::int(0)),
            Some(-1) => Err(division_by_zero()),
            _ => Ok(Value::symbolic_args(BuiltinOp::Pow, vec![base, exponent])),
        };
    }
    if let Value::Int(n) = exponent {
        if is_node(&base, BuiltinOp::Pow) {
            // (b^e)^n = b^(e*n) for integer n.
            let (inner, e) = split_power(&base);
            return pow(inner, mul2(e, Value::int(n))?);
        }
        if is_node(&base, BuiltinOp::Mul) {
            let powered = operands(&base)
                .into_iter()
                .map(|f| pow(f, Value::int(n)))
                .collect::<SymResult<Vec<_>>>()?;
            return mul(powered);
        }
    }
    Ok(Value::symbolic_args(BuiltinOp::Pow, vec![base, exponent]))
}

/// Exact `q^(p/r)` for rational `q`, pulling perfect powers out of the
/// radical: `8^(1/2)` is `2*2^(1/2)`, `3^(-1/2)` is `3^(1/2)/3`.
fn rational_root(base: &Value, exponent: &Value) -> SymResult<Value> {
    let raw = || Value::symbolic_args(BuiltinOp::Pow, vec![base.clone(), exponent.clone()]);
    let (Some(q), Some(e)) = (Rational::from_value(base), Rational::from_value(exponent)) else {
        return Ok(raw());
    };
    let (Some(p), Some(r)) = (e.numer().to_i64(), e.denom().to_i64()) else {
        return Ok(raw());
    };
    if !q.is_integer() {
        // (a/b)^e = a^e * b^-e
        let a = Value::bigint(q.numer().clone());
        let b = Value::bigint(q.denom().clone());
        return mul(vec![pow(a, exponent.clone())?, pow(b, (-&e).into_value())?]);
    }
    let n = q.numer().clone();
    if n.is_negative() {
        if r != 2 {
            return Ok(raw());
        }
        let i = numeric::make_complex(Value::int(0), Value::int(1));
        return mul(vec![pow(i, Value::int(p))?, pow(Value::bigint(-n), exponent.clone())?]);
    }
    let whole = p.div_floor(&r);
    let rest = p.mod_floor(&r);
    let Ok(rest_u32) = u32::try_from(rest) else {
        return Ok(raw());
    };
    let radicand = n.pow(rest_u32);
    if radicand.bits() > 60 {
        return Ok(raw());
    }
    let Ok(r_u32) = u32::try_from(r) else {
        return Ok(raw());
    };
    let mut outside = BigInt::one();
    let mut inside = BigInt::one();
    for (prime, mult) in factorize(&radicand) {
        outside *= prime.pow(mult / r_u32);
        inside *= prime.pow(mult % r_u32);
    }
    let whole_part = Rational::from_integer(n.clone())
        .pow(whole)
        .ok_or_else(division_by_zero)?;
    let coefficient = (&whole_part * &Rational::from_integer(outside)).into_value();
    if inside.is_one() {
        return Ok(coefficient);
    }
    let radical = Value::symbolic_args(
        BuiltinOp::Pow,
        vec![
            Value::bigint(inside),
            Rational::new(BigInt::one(), BigInt::from(r)).map_or(Value::int(1), Rational::into_value),
        ],
    );
    if coefficient.is_one() && coefficient.is_integer() {
        return Ok(radical);
    }
    mul(vec![coefficient, radical])
}
