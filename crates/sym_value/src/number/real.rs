//! Decimal floating values carrying their own precision.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::Rational;

/// `mantissa * 10^exponent`, rounded to `digits` significant digits.
///
/// The mantissa never carries trailing zeros, so two reals of equal value and
/// precision are structurally equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Real {
    mantissa: BigInt,
    exponent: i64,
    digits: u32,
}

fn pow10(n: u64) -> BigInt {
    BigInt::from(10u8).pow(u32::try_from(n).unwrap_or(u32::MAX))
}

fn decimal_len(n: &BigInt) -> u64 {
    if n.is_zero() {
        1
    } else {
        n.magnitude().to_str_radix(10).len() as u64
    }
}

impl Real {
    pub fn zero(digits: u32) -> Self {
        Real {
            mantissa: BigInt::zero(),
            exponent: 0,
            digits: digits.max(1),
        }
    }

    fn normalized(mantissa: BigInt, exponent: i64, digits: u32) -> Self {
        let digits = digits.max(1);
        let mut mantissa = mantissa;
        let mut exponent = exponent;
        let len = decimal_len(&mantissa);
        if len > u64::from(digits) {
            let excess = len - u64::from(digits);
            let divisor = pow10(excess);
            let (mut q, r) = mantissa.div_rem(&divisor);
            // Round half away from zero.
            if r.abs() * 2u8 >= divisor {
                if mantissa.is_negative() {
                    q -= 1u8;
                } else {
                    q += 1u8;
                }
            }
            mantissa = q;
            exponent += excess as i64;
        }
        if mantissa.is_zero() {
            return Self::zero(digits);
        }
        let ten = BigInt::from(10u8);
        loop {
            let (q, r) = mantissa.div_rem(&ten);
            if !r.is_zero() {
                break;
            }
            mantissa = q;
            exponent += 1;
        }
        Real {
            mantissa,
            exponent,
            digits,
        }
    }

    /// Round an exact rational to `digits` significant digits.
    pub fn from_rational(q: &Rational, digits: u32) -> Self {
        if q.is_zero() {
            return Self::zero(digits);
        }
        let magnitude = decimal_len(q.numer()) as i64 - decimal_len(q.denom()) as i64;
        // One guard digit beyond the requested precision.
        let scale = i64::from(digits) - magnitude + 1;
        let scaled = if scale >= 0 {
            q.numer() * pow10(scale.unsigned_abs()) / q.denom()
        } else {
            q.numer() / (q.denom() * pow10(scale.unsigned_abs()))
        };
        Self::normalized(scaled, -scale, digits)
    }

    /// Parse a decimal literal such as `3.14159`, `-2.5e-30` or `1e5`.
    pub fn parse(text: &str, digits: u32) -> Option<Self> {
        let (body, exp) = match text.find(['e', 'E']) {
            Some(at) => (&text[..at], text[at + 1..].parse::<i64>().ok()?),
            None => (text, 0),
        };
        let (negative, body) = match body.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, body),
        };
        let (int_part, frac_part) = body.split_once('.').unwrap_or((body, ""));
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let joined: String = int_part.chars().chain(frac_part.chars()).collect();
        if !joined.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let mut mantissa: BigInt = joined.parse().ok()?;
        if negative {
            mantissa = -mantissa;
        }
        Some(Self::normalized(mantissa, exp - frac_part.len() as i64, digits))
    }

    /// Significant digits written in a decimal literal, leading zeros excluded.
    pub fn literal_digits(text: &str) -> u32 {
        let body = text.split(['e', 'E']).next().unwrap_or(text);
        let count = body
            .chars()
            .filter(char::is_ascii_digit)
            .skip_while(|&c| c == '0')
            .count();
        u32::try_from(count.max(1)).unwrap_or(u32::MAX)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    /// Re-round to a different precision.
    pub fn with_digits(&self, digits: u32) -> Self {
        Self::normalized(self.mantissa.clone(), self.exponent, digits)
    }

    /// The exact rational this real denotes.
    pub fn to_rational(&self) -> Rational {
        if self.exponent >= 0 {
            Rational::from_integer(&self.mantissa * pow10(self.exponent.unsigned_abs()))
        } else {
            Rational::new(self.mantissa.clone(), pow10(self.exponent.unsigned_abs()))
                .unwrap_or_else(Rational::zero)
        }
    }

    pub fn to_f64(&self) -> f64 {
        format!("{}e{}", self.mantissa, self.exponent)
            .parse()
            .unwrap_or(f64::NAN)
    }

    pub fn abs(&self) -> Self {
        Real {
            mantissa: self.mantissa.abs(),
            exponent: self.exponent,
            digits: self.digits,
        }
    }

    /// `None` when dividing by zero.
    pub fn checked_div(&self, rhs: &Real) -> Option<Self> {
        let q = self.to_rational().checked_div(&rhs.to_rational())?;
        Some(Self::from_rational(&q, self.digits.min(rhs.digits)))
    }

    /// Numeric comparison, ignoring precision.
    pub fn cmp_value(&self, other: &Real) -> Ordering {
        self.to_rational().cmp(&other.to_rational())
    }

    pub fn is_one(&self) -> bool {
        self.mantissa.is_one() && self.exponent == 0
    }
}

impl Add for &Real {
    type Output = Real;

    fn add(self, rhs: &Real) -> Real {
        let digits = self.digits.min(rhs.digits);
        let exponent = self.exponent.min(rhs.exponent);
        let lhs_m = &self.mantissa * pow10((self.exponent - exponent).unsigned_abs());
        let rhs_m = &rhs.mantissa * pow10((rhs.exponent - exponent).unsigned_abs());
        Real::normalized(lhs_m + rhs_m, exponent, digits)
    }
}

impl Sub for &Real {
    type Output = Real;

    fn sub(self, rhs: &Real) -> Real {
        self + &(-rhs)
    }
}

impl Mul for &Real {
    type Output = Real;

    fn mul(self, rhs: &Real) -> Real {
        Real::normalized(
            &self.mantissa * &rhs.mantissa,
            self.exponent + rhs.exponent,
            self.digits.min(rhs.digits),
        )
    }
}

impl Neg for &Real {
    type Output = Real;

    fn neg(self) -> Real {
        Real {
            mantissa: -&self.mantissa,
            exponent: self.exponent,
            digits: self.digits,
        }
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mantissa.is_zero() {
            return f.write_str("0.0");
        }
        if self.mantissa.is_negative() {
            f.write_str("-")?;
        }
        let mut text = self.mantissa.magnitude().to_str_radix(10);
        let mut exponent = self.exponent;
        // Pad with trailing zeros so the printed form shows the full precision.
        let width = self.digits as usize;
        if text.len() < width {
            exponent -= (width - text.len()) as i64;
            text.push_str(&"0".repeat(width - text.len()));
        }
        let point = text.len() as i64 + exponent;
        if point > 0 && point <= 21 {
            let point = point as usize;
            if point >= text.len() {
                let zeros = point - text.len();
                write!(f, "{text}{}.0", "0".repeat(zeros))
            } else {
                write!(f, "{}.{}", &text[..point], &text[point..])
            }
        } else if point <= 0 && point > -6 {
            write!(f, "0.{}{text}", "0".repeat(point.unsigned_abs() as usize))
        } else {
            let (head, tail) = text.split_at(1);
            let tail = if tail.is_empty() { "0" } else { tail };
            write!(f, "{head}.{tail}e{}", point - 1)
        }
    }
}
