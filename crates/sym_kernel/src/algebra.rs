//! `expand`, `normal`, `simplify`, `factor`, polynomial `gcd`/`lcm` and
//! `numer`/`denom`.
//!
//! Rational-function work is univariate: an expression with more than one
//! free variable is expanded instead of normalized, and comes back from
//! `factor` unchanged.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use sym_value::{BuiltinOp, Rational, SymResult, Value};

use crate::arith::{self, split_coeff};
use crate::expr::variables;
use crate::integer;
use crate::order::{self, operands, split_power};
use crate::poly::Poly;
use crate::stack::ensure_sufficient_stack;

/// Largest power of a sum that `expand` multiplies out.
const MAX_EXPAND_POWER: i64 = 64;

fn is_node(value: &Value, op: BuiltinOp) -> bool {
    matches!(value, Value::Symbolic(s) if s.op.is(op))
}

fn sum_terms(value: &Value) -> Vec<Value> {
    if is_node(value, BuiltinOp::Add) {
        operands(value)
    } else {
        vec![value.clone()]
    }
}

/// Map `f` over vector items and both sides of an equation.
fn map_structure(expr: &Value, f: fn(&Value) -> SymResult<Value>) -> Option<SymResult<Value>> {
    match expr {
        Value::Vector(v) => Some(
            v.items()
                .iter()
                .map(f)
                .collect::<SymResult<Vec<_>>>()
                .map(|items| Value::vector(items, v.subtype())),
        ),
        Value::Symbolic(s) if s.op.is(BuiltinOp::Equal) => Some(
            operands(expr)
                .iter()
                .map(f)
                .collect::<SymResult<Vec<_>>>()
                .map(|sides| Value::symbolic_args(BuiltinOp::Equal, sides)),
        ),
        _ => None,
    }
}

/// Distribute products over sums and multiply out positive integer powers
/// of sums. Function calls are left alone.
pub fn expand(expr: &Value) -> SymResult<Value> {
    if let Some(mapped) = map_structure(expr, expand) {
        return mapped;
    }
    ensure_sufficient_stack(|| {
        let Value::Symbolic(s) = expr else {
            return Ok(expr.clone());
        };
        match s.op.as_builtin() {
            Some(BuiltinOp::Add) => {
                let terms = operands(expr).iter().map(expand).collect::<SymResult<Vec<_>>>()?;
                arith::add(terms)
            }
            Some(BuiltinOp::Mul) => operands(expr)
                .iter()
                .try_fold(Value::int(1), |acc, f| distribute(acc, expand(f)?)),
            Some(BuiltinOp::Pow) => {
                let (base, exponent) = split_power(expr);
                let base = expand(&base)?;
                match exponent {
                    Value::Int(n) if (2..=MAX_EXPAND_POWER).contains(&n) && is_node(&base, BuiltinOp::Add) => {
                        (1..n).try_fold(base.clone(), |acc, _| distribute(acc, base.clone()))
                    }
                    exponent => arith::pow(base, exponent),
                }
            }
            _ => Ok(expr.clone()),
        }
    })
}

fn distribute(a: Value, b: Value) -> SymResult<Value> {
    let left = sum_terms(&a);
    let right = sum_terms(&b);
    if left.len() == 1 && right.len() == 1 {
        return arith::mul2(a, b);
    }
    let mut products = Vec::with_capacity(left.len() * right.len());
    for x in &left {
        for y in &right {
            products.push(arith::mul2(x.clone(), y.clone())?);
        }
    }
    arith::add(products)
}

/// `expr` as `numerator / denominator` polynomials in `var`, reduced.
pub(crate) fn rational_function(expr: &Value, var: &str) -> Option<(Poly, Poly)> {
    let (n, d) = rational_parts(expr, var)?;
    if d.is_zero() {
        return None;
    }
    let g = n.gcd(&d);
    if g.degree().unwrap_or(0) == 0 {
        return Some((n, d));
    }
    Some((n.exact_div(&g)?, d.exact_div(&g)?))
}

fn rational_parts(expr: &Value, var: &str) -> Option<(Poly, Poly)> {
    let one = || Poly::constant(Rational::one());
    ensure_sufficient_stack(|| match expr {
        Value::Symbolic(s) => match s.op.as_builtin()? {
            BuiltinOp::Add => operands(expr).iter().try_fold((Poly::zero(), one()), |(n, d), t| {
                let (tn, td) = rational_parts(t, var)?;
                Some((&(&n * &td) + &(&tn * &d), &d * &td))
            }),
            BuiltinOp::Mul => operands(expr).iter().try_fold((one(), one()), |(n, d), f| {
                let (fn_, fd) = rational_parts(f, var)?;
                Some((&n * &fn_, &d * &fd))
            }),
            BuiltinOp::Neg => {
                let (n, d) = rational_parts(&s.arg, var)?;
                Some((-&n, d))
            }
            BuiltinOp::Inv => {
                let (n, d) = rational_parts(&s.arg, var)?;
                (!n.is_zero()).then_some((d, n))
            }
            BuiltinOp::Pow => {
                let (base, exponent) = split_power(expr);
                let Value::Int(k) = exponent else {
                    return None;
                };
                let (n, d) = rational_parts(&base, var)?;
                let m = u32::try_from(k.unsigned_abs()).ok().filter(|m| *m <= 1000)?;
                if k >= 0 {
                    Some((n.pow(m), d.pow(m)))
                } else if n.is_zero() {
                    None
                } else {
                    Some((d.pow(m), n.pow(m)))
                }
            }
            _ => Poly::from_value(expr, var).map(|p| (p, one())),
        },
        other => Poly::from_value(other, var).map(|p| (p, one())),
    })
}

/// `n/d` with integer coefficients and a primitive denominator.
fn rational_to_value(n: &Poly, d: &Poly, var: &str) -> SymResult<Value> {
    if d.degree().unwrap_or(0) == 0 {
        let scale = d.coeff(0).recip().unwrap_or_else(Rational::one);
        return n.scale(&scale).to_value(var);
    }
    let (cn, pn) = n.primitive();
    let (cd, pd) = d.primitive();
    let ratio = cn.checked_div(&cd).unwrap_or_else(Rational::one);
    let numerator = pn.scale(&ratio).to_value(var)?;
    let denominator = pd.to_value(var)?;
    arith::div(numerator, denominator)
}

/// Put a univariate rational function over a common denominator with
/// common factors cancelled; anything else is expanded.
pub fn normal(expr: &Value) -> SymResult<Value> {
    if let Some(mapped) = map_structure(expr, normal) {
        return mapped;
    }
    if let [var] = variables(expr).as_slice() {
        if let Some((n, d)) = rational_function(expr, var) {
            return rational_to_value(&n, &d, var);
        }
    }
    expand(expr)
}

/// `normal` after expansion and `sin(u)^2 + cos(u)^2 = 1`.
pub fn simplify(expr: &Value) -> SymResult<Value> {
    if let Some(mapped) = map_structure(expr, simplify) {
        return mapped;
    }
    let expanded = expand(expr)?;
    normal(&pythagorean(&expanded)?)
}

/// `(c, u)` when `term` is `c*f(u)^2` for the given function.
fn squared_call(term: &Value, op: BuiltinOp) -> Option<(Value, Value)> {
    let (coeff, rest) = split_coeff(term);
    let (base, exponent) = split_power(&rest?);
    if !matches!(exponent, Value::Int(2)) {
        return None;
    }
    match base {
        Value::Symbolic(s) if s.op.is(op) => Some((coeff, s.arg.clone())),
        _ => None,
    }
}

fn pythagorean(expr: &Value) -> SymResult<Value> {
    if !is_node(expr, BuiltinOp::Add) {
        return Ok(expr.clone());
    }
    let mut terms = operands(expr);
    let mut merged = Vec::new();
    let mut i = 0;
    while i < terms.len() {
        let partner = squared_call(&terms[i], BuiltinOp::Sin).and_then(|(c, u)| {
            terms
                .iter()
                .position(|t| squared_call(t, BuiltinOp::Cos).is_some_and(|(c2, u2)| c2 == c && u2 == u))
                .map(|j| (j, c))
        });
        match partner {
            Some((j, coeff)) => {
                terms.remove(j.max(i));
                terms.remove(j.min(i));
                merged.push(coeff);
                i = 0;
            }
            None => i += 1,
        }
    }
    terms.extend(merged);
    arith::add(terms)
}

/// Factor a polynomial over the rationals into content and
/// `(factor, multiplicity)` pairs: one linear factor per rational root, plus
/// whatever is left.
fn factor_poly(p: &Poly, var: &str) -> SymResult<(Rational, Vec<(Value, u32)>)> {
    if p.degree().unwrap_or(0) == 0 {
        return Ok((p.coeff(0), Vec::new()));
    }
    let (mut content, mut rest) = p.primitive();
    let mut factors = Vec::new();
    for root in p.rational_roots() {
        // q*x - p for root p/q
        let linear = Poly::from_coeffs(vec![
            Rational::from_integer(-root.numer().clone()),
            Rational::from_integer(root.denom().clone()),
        ]);
        let mut multiplicity = 0;
        while let Some(quot) = rest.exact_div(&linear) {
            rest = quot;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push((linear.to_value(var)?, multiplicity));
        }
    }
    if rest.degree().unwrap_or(0) > 0 {
        let (c, prim) = rest.primitive();
        content = &content * &c;
        factors.push((prim.to_value(var)?, 1));
    } else {
        content = &content * &rest.coeff(0);
    }
    factors.sort_by(|(a, _), (b, _)| order::compare(a, b));
    Ok((content, factors))
}

fn power_of(base: Value, multiplicity: i64) -> Value {
    if multiplicity == 1 {
        base
    } else {
        Value::symbolic_args(BuiltinOp::Pow, vec![base, Value::int(multiplicity)])
    }
}

/// Factor integers into primes and univariate rational functions into
/// irreducible factors over the rationals. The product is built as is,
/// without canonical re-multiplication, so `(x-1)*(x+1)` stays factored.
pub fn factor(expr: &Value) -> SymResult<Value> {
    if expr.is_integer() {
        return integer::ifactor(expr);
    }
    if let Some(mapped) = map_structure(expr, factor) {
        return mapped;
    }
    let vars = variables(expr);
    let [var] = vars.as_slice() else {
        return Ok(expr.clone());
    };
    let Some((n, d)) = rational_function(expr, var) else {
        return Ok(expr.clone());
    };
    let (cn, numer) = factor_poly(&n, var)?;
    let (cd, denom) = factor_poly(&d, var)?;
    let coefficient = cn.checked_div(&cd).unwrap_or_else(Rational::one);

    let mut items = Vec::with_capacity(numer.len() + denom.len() + 1);
    if !coefficient.is_one() {
        items.push(coefficient.into_value());
    }
    items.extend(numer.into_iter().map(|(f, m)| power_of(f, i64::from(m))));
    items.extend(denom.into_iter().map(|(f, m)| power_of(f, -i64::from(m))));
    Ok(match items.len() {
        0 => Value::int(1),
        1 => items.swap_remove(0),
        _ => Value::symbolic_args(BuiltinOp::Mul, items),
    })
}

/// Content and primitive part of a univariate polynomial argument, or the
/// integer itself.
enum GcdOperand {
    Integer(BigInt),
    Poly(Rational, Poly),
}

fn gcd_operands(a: &Value, b: &Value) -> Option<(GcdOperand, GcdOperand, String)> {
    if a.is_integer() && b.is_integer() {
        return Some((
            GcdOperand::Integer(a.to_bigint().ok()?),
            GcdOperand::Integer(b.to_bigint().ok()?),
            String::new(),
        ));
    }
    let vars = variables(&Value::sequence(vec![a.clone(), b.clone()]));
    let [var] = vars.as_slice() else {
        return None;
    };
    let (ca, pa) = Poly::from_value(a, var)?.primitive();
    let (cb, pb) = Poly::from_value(b, var)?.primitive();
    Some((GcdOperand::Poly(ca, pa), GcdOperand::Poly(cb, pb), var.clone()))
}

/// Gcd of the integer parts of two contents (1 unless both are integers).
fn content_gcd(a: &Rational, b: &Rational) -> BigInt {
    if a.is_integer() && b.is_integer() {
        a.numer().gcd(b.numer())
    } else {
        BigInt::from(1)
    }
}

fn content_lcm(a: &Rational, b: &Rational) -> BigInt {
    if a.is_integer() && b.is_integer() {
        a.numer().lcm(b.numer())
    } else {
        BigInt::from(1)
    }
}

fn gcd2(a: &Value, b: &Value) -> SymResult<Value> {
    match gcd_operands(a, b) {
        Some((GcdOperand::Integer(x), GcdOperand::Integer(y), _)) => Ok(Value::bigint(integer::gcd(&x, &y))),
        Some((GcdOperand::Poly(ca, pa), GcdOperand::Poly(cb, pb), var)) => {
            let (_, g) = pa.gcd(&pb).primitive();
            let c = Rational::from_integer(content_gcd(&ca, &cb));
            g.scale(&c).to_value(&var)
        }
        _ => Ok(Value::symbolic_args(BuiltinOp::Gcd, vec![a.clone(), b.clone()])),
    }
}

fn lcm2(a: &Value, b: &Value) -> SymResult<Value> {
    match gcd_operands(a, b) {
        Some((GcdOperand::Integer(x), GcdOperand::Integer(y), _)) => Ok(Value::bigint(integer::lcm(&x, &y))),
        Some((GcdOperand::Poly(ca, pa), GcdOperand::Poly(cb, pb), var)) => {
            let g = pa.gcd(&pb);
            let Some(l) = (&pa * &pb).exact_div(&g) else {
                return Ok(Value::symbolic_args(BuiltinOp::Lcm, vec![a.clone(), b.clone()]));
            };
            let (_, l) = l.primitive();
            let c = Rational::from_integer(content_lcm(&ca, &cb));
            l.scale(&c).to_value(&var)
        }
        _ => Ok(Value::symbolic_args(BuiltinOp::Lcm, vec![a.clone(), b.clone()])),
    }
}

/// Flatten a single list argument into the argument list.
fn spread(args: &[Value]) -> Vec<Value> {
    match args {
        [Value::Vector(v)] => v.items().to_vec(),
        _ => args.to_vec(),
    }
}

pub fn gcd(args: &[Value]) -> SymResult<Value> {
    let args = spread(args);
    let Some((first, rest)) = args.split_first() else {
        return Ok(Value::int(0));
    };
    rest.iter().try_fold(first.clone(), |acc, x| gcd2(&acc, x))
}

pub fn lcm(args: &[Value]) -> SymResult<Value> {
    let args = spread(args);
    let Some((first, rest)) = args.split_first() else {
        return Ok(Value::int(1));
    };
    rest.iter().try_fold(first.clone(), |acc, x| lcm2(&acc, x))
}

/// Numerator and denominator after `normal`.
pub fn numer_denom(expr: &Value) -> SymResult<(Value, Value)> {
    if let (Ok(n), Ok(d)) = (expr.num(), expr.den()) {
        return Ok((n, d));
    }
    let normalized = normal(expr)?;
    let factors = if is_node(&normalized, BuiltinOp::Mul) {
        operands(&normalized)
    } else {
        vec![normalized]
    };
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in factors {
        if factor.is_fraction() {
            numer.push(factor.num()?);
            denom.push(factor.den()?);
            continue;
        }
        let (base, exponent) = split_power(&factor);
        match order::compare(&exponent, &Value::int(0)) {
            Ordering::Less if exponent.is_number() => denom.push(arith::pow(base, arith::neg(exponent)?)?),
            _ => numer.push(factor),
        }
    }
    Ok((arith::mul(numer)?, arith::mul(denom)?))
}

#[cfg(test)]
mod tests;
