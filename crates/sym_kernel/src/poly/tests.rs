#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::parser::parse;
use pretty_assertions::assert_eq;

fn q(n: i64, d: i64) -> Rational {
    Rational::new(BigInt::from(n), BigInt::from(d)).unwrap()
}

fn poly(coeffs: &[i64]) -> Poly {
    Poly::from_coeffs(coeffs.iter().map(|&c| Rational::from_integer(c)).collect())
}

fn from_text(text: &str) -> Poly {
    let expr = crate::eval::evaluate(&mut crate::state::KernelState::default(), &parse(text).unwrap()).unwrap();
    Poly::from_value(&expr, "x").unwrap()
}

#[test]
fn trailing_zeros_are_trimmed() {
    assert_eq!(poly(&[1, 2, 0, 0]).degree(), Some(1));
    assert!(poly(&[0, 0]).is_zero());
    assert_eq!(Poly::zero().degree(), None);
}

#[test]
fn conversion_from_expressions() {
    assert_eq!(from_text("x^2-1"), poly(&[-1, 0, 1]));
    assert_eq!(from_text("(x+1)^2"), poly(&[1, 2, 1]));
    assert_eq!(from_text("x/2+3"), Poly::from_coeffs(vec![q(3, 1), q(1, 2)]));
    assert!(Poly::from_value(&parse("x+y").unwrap(), "x").is_none());
    assert!(Poly::from_value(&parse("sin(x)").unwrap(), "x").is_none());
}

#[test]
fn back_to_expression() {
    assert_eq!(poly(&[-1, 0, 1]).to_value("x").unwrap().to_string(), "x^2-1");
    assert_eq!(poly(&[2, -3]).to_value("t").unwrap().to_string(), "-3*t+2");
    assert_eq!(Poly::zero().to_value("x").unwrap(), Value::int(0));
}

#[test]
fn division_with_remainder() {
    let (quot, rem) = poly(&[-1, 0, 1]).div_rem(&poly(&[-1, 1])).unwrap();
    assert_eq!(quot, poly(&[1, 1]));
    assert!(rem.is_zero());
    let (quot, rem) = poly(&[1, 0, 1]).div_rem(&poly(&[1, 1])).unwrap();
    assert_eq!(quot, poly(&[-1, 1]));
    assert_eq!(rem, poly(&[2]));
    assert!(poly(&[1]).div_rem(&Poly::zero()).is_none());
}

#[test]
fn gcd_is_monic() {
    let a = poly(&[-2, 0, 2]);
    let b = poly(&[-3, 3]);
    assert_eq!(a.gcd(&b), poly(&[-1, 1]));
    assert_eq!(poly(&[1, 1]).gcd(&poly(&[2])), poly(&[1]));
}

#[test]
fn primitive_part_has_positive_lead() {
    let (content, prim) = Poly::from_coeffs(vec![q(1, 2), q(-3, 2)]).primitive();
    assert_eq!(content, q(-1, 2));
    assert_eq!(prim, poly(&[-1, 3]));
}

#[test]
fn rational_roots_are_found() {
    assert_eq!(poly(&[-1, 0, 1]).rational_roots(), vec![q(-1, 1), q(1, 1)]);
    assert_eq!(poly(&[0, -1, 0, 1]).rational_roots(), vec![q(-1, 1), q(0, 1), q(1, 1)]);
    assert_eq!(poly(&[-1, 2]).rational_roots(), vec![q(1, 2)]);
    assert!(poly(&[1, 0, 1]).rational_roots().is_empty());
}

#[test]
fn derivative_and_evaluation() {
    let p = poly(&[1, 2, 3]);
    assert_eq!(p.derivative(), poly(&[2, 6]));
    assert_eq!(p.eval(&q(2, 1)), q(17, 1));
}
