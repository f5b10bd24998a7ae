//! High-precision elementary functions in decimal fixed point.
//!
//! Inputs are exact rationals; outputs are `Real`s rounded to the requested
//! significant digits. Internally every quantity is an integer scaled by
//! `10^W` with `W = digits + GUARD`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use sym_value::{Rational, Real};

const GUARD: u32 = 12;

struct Fixed {
    scale: BigInt,
}

impl Fixed {
    fn new(digits: u32, extra: u32) -> Self {
        let width = digits + GUARD + extra;
        Fixed {
            scale: BigInt::from(10u8).pow(width),
        }
    }

    fn from_rational(&self, q: &Rational) -> BigInt {
        q.numer() * &self.scale / q.denom()
    }

    fn to_real(&self, n: BigInt, digits: u32) -> Real {
        let q = Rational::new(n, self.scale.clone()).unwrap_or_else(Rational::zero);
        Real::from_rational(&q, digits)
    }

    fn mul(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * b / &self.scale
    }

    fn div(&self, a: &BigInt, b: &BigInt) -> BigInt {
        a * &self.scale / b
    }

    fn one(&self) -> BigInt {
        self.scale.clone()
    }

    /// `atan(1/k)` for integer `k > 1`.
    fn atan_inv(&self, k: u32) -> BigInt {
        let k = BigInt::from(k);
        let k2 = &k * &k;
        let mut term = &self.scale / &k;
        let mut sum = term.clone();
        let mut n: u32 = 0;
        while !term.is_zero() {
            term /= &k2;
            n += 1;
            let piece = &term / BigInt::from(2 * n + 1);
            if n % 2 == 1 {
                sum -= piece;
            } else {
                sum += piece;
            }
        }
        sum
    }

    fn pi(&self) -> BigInt {
        self.atan_inv(5) * 16u8 - self.atan_inv(239) * 4u8
    }

    /// `atanh(z)` for `|z| <= 1/3`.
    fn atanh(&self, z: &BigInt) -> BigInt {
        let z2 = self.mul(z, z);
        let mut power = z.clone();
        let mut sum = z.clone();
        let mut n: u32 = 0;
        loop {
            power = self.mul(&power, &z2);
            n += 1;
            let term = &power / BigInt::from(2 * n + 1);
            if term.is_zero() {
                break;
            }
            sum += term;
        }
        sum
    }

    fn ln2(&self) -> BigInt {
        self.atanh(&(&self.scale / 3u8)) * 2u8
    }

    fn exp(&self, x: &BigInt) -> BigInt {
        // Halve until |x| < 2^-8, then square back up.
        let mut halvings = 0u32;
        let mut r = x.clone();
        let limit = &self.scale >> 8u32;
        while r.abs() > limit {
            r /= 2u8;
            halvings += 1;
        }
        let mut term = self.one();
        let mut sum = self.one();
        let mut k: u32 = 1;
        while !term.is_zero() {
            term = self.mul(&term, &r) / BigInt::from(k);
            sum += &term;
            k += 1;
        }
        for _ in 0..halvings {
            sum = self.mul(&sum, &sum);
        }
        sum
    }

    fn sin_cos(&self, x: &BigInt) -> (BigInt, BigInt) {
        let two_pi = self.pi() * 2u8;
        let turns = (x * 2u8 + &two_pi).div_floor(&(&two_pi * 2u8));
        let r = x - turns * &two_pi;
        let r2 = self.mul(&r, &r);

        let mut sin_term = r.clone();
        let mut sin = r.clone();
        let mut cos_term = self.one();
        let mut cos = self.one();
        let mut k: u32 = 1;
        while !sin_term.is_zero() || !cos_term.is_zero() {
            cos_term = -self.mul(&cos_term, &r2) / BigInt::from((2 * k - 1) * (2 * k));
            sin_term = -self.mul(&sin_term, &r2) / BigInt::from((2 * k) * (2 * k + 1));
            cos += &cos_term;
            sin += &sin_term;
            k += 1;
        }
        (sin, cos)
    }

    fn sqrt(&self, x: &BigInt) -> BigInt {
        (x * &self.scale).sqrt()
    }

    fn atan(&self, x: &BigInt) -> BigInt {
        if x.is_negative() {
            return -self.atan(&-x);
        }
        if *x > self.scale {
            let half_pi = self.pi() / 2u8;
            return half_pi - self.atan(&self.div(&self.one(), x));
        }
        // atan(x) = 2 atan(x / (1 + sqrt(1 + x^2))), applied three times.
        let mut r = x.clone();
        for _ in 0..3 {
            let root = self.sqrt(&(self.one() + self.mul(&r, &r)));
            r = self.div(&r, &(self.one() + root));
        }
        let r2 = self.mul(&r, &r);
        let mut power = r.clone();
        let mut sum = r;
        let mut n: u32 = 0;
        loop {
            power = -self.mul(&power, &r2);
            n += 1;
            let term = &power / BigInt::from(2 * n + 1);
            if term.is_zero() {
                break;
            }
            sum += term;
        }
        sum * 8u8
    }
}

pub(crate) fn pi(digits: u32) -> Real {
    let fx = Fixed::new(digits, 0);
    fx.to_real(fx.pi(), digits)
}

/// `None` for negative input.
pub(crate) fn sqrt(x: &Rational, digits: u32) -> Option<Real> {
    if x.is_negative() {
        return None;
    }
    let fx = Fixed::new(digits, 0);
    Some(fx.to_real(fx.sqrt(&fx.from_rational(x)), digits))
}

pub(crate) fn exp(x: &Rational, digits: u32) -> Real {
    // Large arguments lose relative precision through repeated squaring.
    let magnitude = x.to_f64().abs().max(1.0).log10().ceil().to_u32().unwrap_or(0);
    let fx = Fixed::new(digits, magnitude * 2 + 4);
    fx.to_real(fx.exp(&fx.from_rational(x)), digits)
}

/// `None` for non-positive input.
pub(crate) fn ln(x: &Rational, digits: u32) -> Option<Real> {
    if x.is_negative() || x.is_zero() {
        return None;
    }
    let fx = Fixed::new(digits, 0);
    // x = y * 2^k with y in [1/2, 1].
    let k = i64::try_from(x.numer().bits()).unwrap_or(i64::MAX)
        - i64::try_from(x.denom().bits()).unwrap_or(i64::MAX);
    let two_k = Rational::from_integer(2).pow(k)?;
    let y = x.checked_div(&two_k)?;
    let y = fx.from_rational(&y);
    let z = fx.div(&(&y - fx.one()), &(&y + fx.one()));
    let ln_y = fx.atanh(&z) * 2u8;
    Some(fx.to_real(ln_y + fx.ln2() * BigInt::from(k), digits))
}

pub(crate) fn sin(x: &Rational, digits: u32) -> Real {
    let fx = Fixed::new(digits, extra_for(x));
    fx.to_real(fx.sin_cos(&fx.from_rational(x)).0, digits)
}

pub(crate) fn cos(x: &Rational, digits: u32) -> Real {
    let fx = Fixed::new(digits, extra_for(x));
    fx.to_real(fx.sin_cos(&fx.from_rational(x)).1, digits)
}

/// `None` where the cosine vanishes.
pub(crate) fn tan(x: &Rational, digits: u32) -> Option<Real> {
    let fx = Fixed::new(digits, extra_for(x));
    let (s, c) = fx.sin_cos(&fx.from_rational(x));
    if c.is_zero() {
        return None;
    }
    Some(fx.to_real(fx.div(&s, &c), digits))
}

pub(crate) fn atan(x: &Rational, digits: u32) -> Real {
    let fx = Fixed::new(digits, 0);
    fx.to_real(fx.atan(&fx.from_rational(x)), digits)
}

/// `None` outside `[-1, 1]`.
pub(crate) fn asin(x: &Rational, digits: u32) -> Option<Real> {
    let one = Rational::one();
    if x.abs() > one {
        return None;
    }
    let fx = Fixed::new(digits, 0);
    let v = fx.from_rational(x);
    if x.abs() == one {
        let half_pi = fx.pi() / 2u8;
        let signed = if x.is_negative() { -half_pi } else { half_pi };
        return Some(fx.to_real(signed, digits));
    }
    let root = fx.sqrt(&(fx.one() - fx.mul(&v, &v)));
    Some(fx.to_real(fx.atan(&fx.div(&v, &root)), digits))
}

pub(crate) fn acos(x: &Rational, digits: u32) -> Option<Real> {
    let fx = Fixed::new(digits, 0);
    let asin = asin(x, digits + GUARD)?;
    let half_pi = fx.to_real(fx.pi() / 2u8, digits + GUARD);
    Some((&half_pi - &asin).with_digits(digits))
}

/// Extra working digits for trigonometric argument reduction.
fn extra_for(x: &Rational) -> u32 {
    x.to_f64().abs().max(1.0).log10().ceil().to_u32().unwrap_or(0) + 2
}

/// `ln(x) / ln(10)`.
pub(crate) fn log10(x: &Rational, digits: u32) -> Option<Real> {
    let num = ln(x, digits + 4)?;
    let den = ln(&Rational::from_integer(10), digits + 4)?;
    num.checked_div(&den).map(|r| r.with_digits(digits))
}
