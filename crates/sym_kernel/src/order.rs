//! Total order on expressions, used to sort sum terms and product factors.

use std::cmp::Ordering;

use sym_value::{BuiltinOp, Value};

use crate::numeric;

/// Coarse kind rank: numbers sort before names, names before nodes.
fn rank(value: &Value) -> u8 {
    match value {
        Value::Int(_)
        | Value::BigInt(_)
        | Value::Fraction(_)
        | Value::Double(_)
        | Value::Real(_)
        | Value::Complex(_) => 0,
        Value::Identifier(_) => 1,
        Value::Symbolic(_) => 2,
        Value::Vector(_) => 3,
        Value::Str(_) => 4,
        Value::Map(_) => 5,
        Value::Function(_) => 6,
    }
}

/// Structural comparison. Numbers compare by value (real part, then
/// imaginary part); everything else lexicographically by shape.
pub fn compare(a: &Value, b: &Value) -> Ordering {
    let by_rank = rank(a).cmp(&rank(b));
    if by_rank != Ordering::Equal {
        return by_rank;
    }
    match (a, b) {
        (Value::Identifier(x), Value::Identifier(y)) | (Value::Str(x), Value::Str(y)) => x.cmp(y),
        (Value::Symbolic(x), Value::Symbolic(y)) => x
            .op
            .name()
            .cmp(y.op.name())
            .then_with(|| compare_lists(&operands(a), &operands(b))),
        (Value::Vector(x), Value::Vector(y)) => compare_lists(x.items(), y.items()),
        (Value::Map(x), Value::Map(y)) => x.len().cmp(&y.len()),
        (Value::Function(x), Value::Function(y)) => x.name().cmp(y.name()),
        _ => numeric::compare(&a.re(), &b.re())
            .unwrap_or(Ordering::Equal)
            .then_with(|| numeric::compare(&a.im(), &b.im()).unwrap_or(Ordering::Equal))
            .then_with(|| a.tag().code().cmp(&b.tag().code())),
    }
}

fn compare_lists(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        let o = compare(x, y);
        if o != Ordering::Equal {
            return o;
        }
    }
    a.len().cmp(&b.len())
}

/// Operands of a node (sequence arguments unpacked).
pub(crate) fn operands(value: &Value) -> Vec<Value> {
    value.arguments().unwrap_or_default()
}

/// Polynomial degree of a monomial, counting every identifier as degree 1.
pub fn degree(value: &Value) -> i64 {
    match value {
        Value::Identifier(_) => 1,
        Value::Symbolic(s) => match s.op.as_builtin() {
            Some(BuiltinOp::Mul) => operands(value).iter().map(degree).sum(),
            Some(BuiltinOp::Pow) => {
                let args = operands(value);
                match args.as_slice() {
                    [base, Value::Int(n)] => degree(base).saturating_mul(*n),
                    _ => 0,
                }
            }
            _ => 0,
        },
        _ => 0,
    }
}

/// Order of terms in a canonical sum: higher degree first, numbers last.
pub fn term_order(a: &Value, b: &Value) -> Ordering {
    let a_num = a.is_number();
    let b_num = b.is_number();
    if a_num != b_num {
        return a_num.cmp(&b_num);
    }
    degree(b)
        .cmp(&degree(a))
        .then_with(|| compare_monomials(a, b))
}

/// Lexicographic on (base, descending exponent) factor lists, ignoring
/// numeric coefficients.
fn compare_monomials(a: &Value, b: &Value) -> Ordering {
    let fa = power_factors(a);
    let fb = power_factors(b);
    for ((base_a, exp_a), (base_b, exp_b)) in fa.iter().zip(&fb) {
        let o = compare(base_a, base_b).then_with(|| compare(exp_b, exp_a));
        if o != Ordering::Equal {
            return o;
        }
    }
    fb.len().cmp(&fa.len()).then_with(|| compare(a, b))
}

fn power_factors(value: &Value) -> Vec<(Value, Value)> {
    let factors = match value {
        Value::Symbolic(s) if s.op.is(BuiltinOp::Mul) => operands(value),
        other => vec![other.clone()],
    };
    factors
        .into_iter()
        .filter(|f| !f.is_number())
        .map(|f| split_power(&f))
        .collect()
}

/// `(base, exponent)` of a factor; exponent 1 for non-powers.
pub fn split_power(value: &Value) -> (Value, Value) {
    if let Value::Symbolic(s) = value {
        if s.op.is(BuiltinOp::Pow) {
            if let [base, exponent] = operands(value).as_slice() {
                return (base.clone(), exponent.clone());
            }
        }
    }
    (value.clone(), Value::int(1))
}

/// Factor order inside a canonical product: by base, then exponent.
pub fn factor_order(a: &Value, b: &Value) -> Ordering {
    let (base_a, exp_a) = split_power(a);
    let (base_b, exp_b) = split_power(b);
    compare(&base_a, &base_b).then_with(|| compare(&exp_a, &exp_b))
}

#[cfg(test)]
mod tests;
