//! Dense univariate polynomials over the rationals.
//!
//! Used by `factor`, `normal`, `gcd`/`lcm` and `solve`. Conversion from an
//! expression fails (returns `None`) as soon as anything other than the
//! chosen variable, rational constants, sums, products and non-negative
//! integer powers appears.

use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use sym_value::{BuiltinOp, Rational, SymResult, Value};

use crate::arith;
use crate::integer::divisors;
use crate::order::operands;
use crate::stack::ensure_sufficient_stack;

/// Largest exponent expanded when converting `p^n`.
const MAX_POWER: i64 = 1000;

/// `coeffs[k]` is the coefficient of `x^k`; no trailing zeros, so the zero
/// polynomial has no coefficients.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Poly {
    coeffs: Vec<Rational>,
}

impl Poly {
    pub fn from_coeffs(mut coeffs: Vec<Rational>) -> Self {
        while coeffs.last().is_some_and(Rational::is_zero) {
            coeffs.pop();
        }
        Poly { coeffs }
    }

    pub fn zero() -> Self {
        Poly { coeffs: Vec::new() }
    }

    pub fn constant(c: Rational) -> Self {
        Poly::from_coeffs(vec![c])
    }

    /// The variable itself.
    pub fn var() -> Self {
        Poly::from_coeffs(vec![Rational::zero(), Rational::one()])
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    /// `None` for the zero polynomial.
    pub fn degree(&self) -> Option<usize> {
        self.coeffs.len().checked_sub(1)
    }

    pub fn coeff(&self, k: usize) -> Rational {
        self.coeffs.get(k).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn lead(&self) -> Rational {
        self.coeffs.last().cloned().unwrap_or_else(Rational::zero)
    }

    pub fn scale(&self, c: &Rational) -> Poly {
        Poly::from_coeffs(self.coeffs.iter().map(|a| a * c).collect())
    }

    pub fn pow(&self, n: u32) -> Poly {
        (0..n).fold(Poly::constant(Rational::one()), |acc, _| &acc * self)
    }

    /// Quotient and remainder; `None` when dividing by zero.
    pub fn div_rem(&self, divisor: &Poly) -> Option<(Poly, Poly)> {
        let d = divisor.degree()?;
        let lead = divisor.lead();
        let mut rem = self.coeffs.clone();
        let Some(n) = self.degree() else {
            return Some((Poly::zero(), Poly::zero()));
        };
        if n < d {
            return Some((Poly::zero(), self.clone()));
        }
        let mut quot = vec![Rational::zero(); n - d + 1];
        for k in (0..=n - d).rev() {
            let c = rem[k + d].checked_div(&lead)?;
            if c.is_zero() {
                continue;
            }
            for (i, b) in divisor.coeffs.iter().enumerate() {
                rem[k + i] = &rem[k + i] - &(&c * b);
            }
            quot[k] = c;
        }
        rem.truncate(d);
        Some((Poly::from_coeffs(quot), Poly::from_coeffs(rem)))
    }

    /// Exact quotient when `divisor` divides `self`.
    pub fn exact_div(&self, divisor: &Poly) -> Option<Poly> {
        let (quot, rem) = self.div_rem(divisor)?;
        rem.is_zero().then_some(quot)
    }

    /// Same polynomial with leading coefficient one.
    pub fn monic(&self) -> Poly {
        match self.lead().recip() {
            Some(inv) => self.scale(&inv),
            None => self.clone(),
        }
    }

    /// Monic greatest common divisor; zero only when both are zero.
    pub fn gcd(&self, other: &Poly) -> Poly {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let Some((_, r)) = a.div_rem(&b) else {
                break;
            };
            a = b;
            b = r;
        }
        a.monic()
    }

    pub fn derivative(&self) -> Poly {
        Poly::from_coeffs(
            self.coeffs
                .iter()
                .enumerate()
                .skip(1)
                .map(|(k, c)| c * &Rational::from_integer(k))
                .collect(),
        )
    }

    pub fn eval(&self, x: &Rational) -> Rational {
        self.coeffs
            .iter()
            .rev()
            .fold(Rational::zero(), |acc, c| &(&acc * x) + c)
    }

    /// Split into `content * primitive`, where `primitive` has coprime
    /// integer coefficients and a positive leading coefficient.
    pub fn primitive(&self) -> (Rational, Poly) {
        if self.is_zero() {
            return (Rational::zero(), Poly::zero());
        }
        let den_lcm = self
            .coeffs
            .iter()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        let num_gcd = self
            .coeffs
            .iter()
            .fold(BigInt::zero(), |acc, c| acc.gcd(c.numer()));
        let sign = if self.lead().is_negative() { -1 } else { 1 };
        let content = Rational::new(num_gcd * sign, den_lcm).unwrap_or_else(Rational::one);
        let primitive = match content.recip() {
            Some(inv) => self.scale(&inv),
            None => self.clone(),
        };
        (content, primitive)
    }

    /// Distinct rational roots, ascending.
    pub fn rational_roots(&self) -> Vec<Rational> {
        let (_, mut p) = self.primitive();
        let mut roots = Vec::new();
        if p.degree().unwrap_or(0) == 0 {
            return roots;
        }
        if p.coeff(0).is_zero() {
            roots.push(Rational::zero());
            while p.coeff(0).is_zero() && !p.is_zero() {
                p = Poly::from_coeffs(p.coeffs[1..].to_vec());
            }
        }
        if p.degree().unwrap_or(0) > 0 {
            let (Some(ps), Some(qs)) = (divisors(p.coeff(0).numer()), divisors(p.lead().numer())) else {
                return roots;
            };
            for num in &ps {
                for den in &qs {
                    for candidate in [num.clone(), -num.clone()] {
                        let Some(r) = Rational::new(candidate, den.clone()) else {
                            continue;
                        };
                        if !roots.contains(&r) && p.eval(&r).is_zero() {
                            roots.push(r);
                        }
                    }
                }
            }
        }
        roots.sort();
        roots
    }

    /// Convert `expr` as a polynomial in `var`.
    pub fn from_value(expr: &Value, var: &str) -> Option<Poly> {
        ensure_sufficient_stack(|| match expr {
            Value::Identifier(name) if &**name == var => Some(Poly::var()),
            Value::Symbolic(s) => match s.op.as_builtin()? {
                BuiltinOp::Add => operands(expr)
                    .iter()
                    .try_fold(Poly::zero(), |acc, t| Some(&acc + &Poly::from_value(t, var)?)),
                BuiltinOp::Mul => operands(expr)
                    .iter()
                    .try_fold(Poly::constant(Rational::one()), |acc, f| Some(&acc * &Poly::from_value(f, var)?)),
                BuiltinOp::Neg => Some(-&Poly::from_value(&s.arg, var)?),
                BuiltinOp::Pow => match operands(expr).as_slice() {
                    [base, Value::Int(n)] if (0..=MAX_POWER).contains(n) => {
                        Some(Poly::from_value(base, var)?.pow(u32::try_from(*n).ok()?))
                    }
                    _ => None,
                },
                _ => None,
            },
            other => Rational::from_value(other).map(Poly::constant),
        })
    }

    /// Canonical expression, highest degree first.
    pub fn to_value(&self, var: &str) -> SymResult<Value> {
        let x = Value::identifier(var);
        let mut terms = Vec::with_capacity(self.coeffs.len());
        for (k, c) in self.coeffs.iter().enumerate().rev() {
            if c.is_zero() {
                continue;
            }
            let power = arith::pow(x.clone(), Value::int(i64::try_from(k).unwrap_or(i64::MAX)))?;
            terms.push(arith::mul2(c.clone().into_value(), power)?);
        }
        arith::add(terms)
    }
}

impl Add for &Poly {
    type Output = Poly;

    fn add(self, rhs: &Poly) -> Poly {
        let len = self.coeffs.len().max(rhs.coeffs.len());
        Poly::from_coeffs((0..len).map(|k| &self.coeff(k) + &rhs.coeff(k)).collect())
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        self + &(-rhs)
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        Poly::from_coeffs(self.coeffs.iter().map(|c| -c).collect())
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        if self.is_zero() || rhs.is_zero() {
            return Poly::zero();
        }
        let mut out = vec![Rational::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                out[i + j] = &out[i + j] + &(a * b);
            }
        }
        Poly::from_coeffs(out)
    }
}

#[cfg(test)]
mod tests;
