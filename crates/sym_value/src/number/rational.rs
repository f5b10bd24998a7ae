//! Arbitrary-precision rationals kept in lowest terms.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::value::Value;

/// A reduced fraction `numer / denom` with `denom > 0` and
/// `gcd(numer, denom) == 1`.
///
/// This is the working representation for exact arithmetic; `into_value`
/// turns it back into an Integer, BigInteger or Fraction value.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rational {
    numer: BigInt,
    denom: BigInt,
}

impl Rational {
    /// Build and reduce `numer / denom`. `None` when `denom` is zero.
    pub fn new(numer: BigInt, denom: BigInt) -> Option<Self> {
        if denom.is_zero() {
            return None;
        }
        Some(Self::reduce(numer, denom))
    }

    fn reduce(mut numer: BigInt, mut denom: BigInt) -> Self {
        if denom.is_negative() {
            numer = -numer;
            denom = -denom;
        }
        let g = numer.gcd(&denom);
        if !g.is_zero() && !g.is_one() {
            numer /= &g;
            denom /= &g;
        }
        if numer.is_zero() {
            denom = BigInt::one();
        }
        Rational { numer, denom }
    }

    pub fn from_integer(n: impl Into<BigInt>) -> Self {
        Rational {
            numer: n.into(),
            denom: BigInt::one(),
        }
    }

    pub fn zero() -> Self {
        Self::from_integer(0)
    }

    pub fn one() -> Self {
        Self::from_integer(1)
    }

    /// Exact rational of an Integer, BigInteger or Fraction value.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Self::from_integer(*n)),
            Value::BigInt(n) => Some(Self::from_integer((**n).clone())),
            Value::Fraction(f) => {
                let numer = Self::from_value(&f.num)?;
                let denom = Self::from_value(&f.den)?;
                numer.checked_div(&denom)
            }
            _ => None,
        }
    }

    /// Integer when the denominator is one, Fraction otherwise.
    pub fn into_value(self) -> Value {
        if self.denom.is_one() {
            Value::bigint(self.numer)
        } else {
            Value::reduced_fraction(Value::bigint(self.numer), Value::bigint(self.denom))
        }
    }

    pub fn numer(&self) -> &BigInt {
        &self.numer
    }

    pub fn denom(&self) -> &BigInt {
        &self.denom
    }

    pub fn is_zero(&self) -> bool {
        self.numer.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.numer.is_one() && self.denom.is_one()
    }

    pub fn is_integer(&self) -> bool {
        self.denom.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.numer.is_negative()
    }

    pub fn abs(&self) -> Self {
        Rational {
            numer: self.numer.abs(),
            denom: self.denom.clone(),
        }
    }

    pub fn recip(&self) -> Option<Self> {
        Self::new(self.denom.clone(), self.numer.clone())
    }

    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        rhs.recip().map(|r| self * &r)
    }

    /// Integer power; `None` for zero raised to a negative exponent.
    pub fn pow(&self, exp: i64) -> Option<Self> {
        let base = if exp < 0 { self.recip()? } else { self.clone() };
        let e = u32::try_from(exp.unsigned_abs()).ok()?;
        Some(Rational {
            numer: base.numer.pow(e),
            denom: base.denom.pow(e),
        })
    }

    /// Exact integer `k`-th root when one exists (`k >= 1`).
    pub fn exact_root(&self, k: u32) -> Option<Self> {
        if k == 0 || (self.is_negative() && k % 2 == 0) {
            return None;
        }
        let root = |n: &BigInt| {
            let r = n.nth_root(k);
            (r.pow(k) == *n).then_some(r)
        };
        Some(Rational {
            numer: root(&self.numer)?,
            denom: root(&self.denom)?,
        })
    }

    /// Floor of the rational as a big integer.
    pub fn floor(&self) -> BigInt {
        self.numer.div_floor(&self.denom)
    }

    pub fn ceil(&self) -> BigInt {
        -((-&self.numer).div_floor(&self.denom))
    }

    pub fn to_i64(&self) -> Option<i64> {
        if self.is_integer() {
            self.numer.to_i64()
        } else {
            None
        }
    }

    pub fn to_f64(&self) -> f64 {
        match (self.numer.to_f64(), self.denom.to_f64()) {
            (Some(n), Some(d)) if n.is_finite() && d.is_finite() => n / d,
            _ => {
                // Scale both down to keep the quotient finite.
                let shift = self.numer.bits().max(self.denom.bits()).saturating_sub(1000);
                let n = (&self.numer >> shift).to_f64().unwrap_or(f64::NAN);
                let d = (&self.denom >> shift).to_f64().unwrap_or(f64::NAN);
                n / d
            }
        }
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: &Rational) -> Rational {
        Rational::reduce(
            &self.numer * &rhs.denom + &rhs.numer * &self.denom,
            &self.denom * &rhs.denom,
        )
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, rhs: &Rational) -> Rational {
        self + &(-rhs)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: &Rational) -> Rational {
        Rational::reduce(&self.numer * &rhs.numer, &self.denom * &rhs.denom)
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numer: -&self.numer,
            denom: self.denom.clone(),
        }
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.numer * &other.denom).cmp(&(&other.numer * &self.denom))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denom.is_one() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}
