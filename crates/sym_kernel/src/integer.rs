//! Integer routines: factorization, factorial, gcd and lcm.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use sym_value::{BuiltinOp, SymResult, Value};

/// Trial division stops at this divisor; a larger cofactor is reported as is.
const TRIAL_LIMIT: u64 = 1_000_000;

/// Largest argument accepted by `factorial`.
const FACTORIAL_LIMIT: u64 = 100_000;

/// Prime factorization of `|n|` by trial division.
///
/// Returns `(prime, multiplicity)` pairs in increasing order. If a cofactor
/// survives trial division it is appended with multiplicity 1; it is prime
/// whenever it is below `TRIAL_LIMIT^2`.
pub fn factorize(n: &BigInt) -> Vec<(BigInt, u32)> {
    let mut rest = n.abs();
    let mut factors = Vec::new();
    if rest.is_zero() {
        return factors;
    }
    let mut divisor: u64 = 2;
    while divisor <= TRIAL_LIMIT {
        let d = BigInt::from(divisor);
        if &d * &d > rest {
            break;
        }
        let mut count = 0u32;
        loop {
            let (q, r) = rest.div_rem(&d);
            if !r.is_zero() {
                break;
            }
            rest = q;
            count += 1;
        }
        if count > 0 {
            factors.push((d, count));
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if !rest.is_one() {
        factors.push((rest, 1));
    }
    factors
}

/// `ifactor(n)`: the unevaluated product `p1^e1*p2*...`, with a leading
/// `-1` for negative input. Zero, one and primes come back unchanged.
pub fn ifactor(value: &Value) -> SymResult<Value> {
    let n = value.to_bigint()?;
    let factors = factorize(&n);
    let mut terms: Vec<Value> = Vec::with_capacity(factors.len() + 1);
    if n.is_negative() {
        terms.push(Value::int(-1));
    }
    for (p, e) in factors {
        let p = Value::bigint(p);
        terms.push(if e == 1 {
            p
        } else {
            Value::symbolic_args(BuiltinOp::Pow, vec![p, Value::int(i64::from(e))])
        });
    }
    Ok(match terms.len() {
        0 => value.clone(),
        1 if !n.is_negative() => terms.swap_remove(0),
        _ => Value::symbolic_args(BuiltinOp::Mul, terms),
    })
}

/// `n!` for a non-negative machine integer; `None` otherwise.
pub fn factorial(value: &Value) -> Option<Value> {
    let n = value.to_int().ok()?.to_u64()?;
    if n > FACTORIAL_LIMIT {
        return None;
    }
    let product = (2..=n).fold(BigInt::one(), |acc, k| acc * k);
    Some(Value::bigint(product))
}

/// Gcd of two integers, non-negative.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    a.gcd(b)
}

/// Lcm of two integers, non-negative.
pub fn lcm(a: &BigInt, b: &BigInt) -> BigInt {
    a.lcm(b)
}

/// Positive divisors of `|n|`, ascending. `None` if `n` is zero or too large
/// to factor completely.
pub fn divisors(n: &BigInt) -> Option<Vec<BigInt>> {
    if n.is_zero() || n.bits() > 60 {
        return None;
    }
    let mut divisors = vec![BigInt::one()];
    for (p, e) in factorize(n) {
        let mut next = Vec::with_capacity(divisors.len() * (e as usize + 1));
        for d in &divisors {
            let mut power = d.clone();
            next.push(power.clone());
            for _ in 0..e {
                power *= &p;
                next.push(power.clone());
            }
        }
        divisors = next;
    }
    divisors.sort();
    Some(divisors)
}
