#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn frac(n: i64, d: i64) -> Value {
    Value::fraction(Value::int(n), Value::int(d)).unwrap()
}

fn cplx(re: i64, im: i64) -> Value {
    Value::complex(Value::int(re), Value::int(im)).unwrap()
}

#[test]
fn exact_arithmetic_stays_exact() {
    assert_eq!(add(&frac(1, 2), &frac(1, 3)).unwrap(), frac(5, 6));
    assert_eq!(mul(&frac(2, 3), &Value::int(3)).unwrap(), Value::int(2));
    assert_eq!(sub(&Value::int(1), &Value::int(1)).unwrap(), Value::int(0));
}

#[test]
fn doubles_absorb_exact_values() {
    assert_eq!(add(&Value::double(0.5), &frac(1, 2)).unwrap(), Value::double(1.0));
    assert_eq!(mul(&Value::int(2), &Value::double(1.5)).unwrap(), Value::double(3.0));
}

#[test]
fn complex_arithmetic_collapses_exact_zero_imaginary() {
    assert_eq!(mul(&cplx(0, 1), &cplx(0, 1)).unwrap(), Value::int(-1));
    assert_eq!(add(&cplx(2, 3), &cplx(0, -3)).unwrap(), Value::int(2));
    assert_eq!(mul(&cplx(1, 1), &cplx(1, -1)).unwrap(), Value::int(2));
    assert_eq!(inv(&cplx(0, 1)).unwrap().unwrap(), cplx(0, -1));
}

#[test]
fn inverse_of_zero_is_an_error() {
    assert!(inv(&Value::int(0)).is_err());
    assert!(inv(&Value::double(0.0)).is_err());
    assert_eq!(inv(&Value::identifier("x")).unwrap(), None);
}

#[test]
fn integer_powers() {
    assert_eq!(pow(&Value::int(2), &Value::int(10)).unwrap().unwrap(), Value::int(1024));
    assert_eq!(pow(&Value::int(2), &Value::int(-2)).unwrap().unwrap(), frac(1, 4));
    assert_eq!(pow(&cplx(0, 1), &Value::int(3)).unwrap().unwrap(), cplx(0, -1));
    assert!(pow(&Value::int(0), &Value::int(-1)).is_err());
    let big = pow(&Value::int(2), &Value::int(100)).unwrap().unwrap();
    assert_eq!(big.bigint_string().unwrap(), "1267650600228229401496703205376");
}

#[test]
fn rational_powers_only_when_exact() {
    assert_eq!(pow(&Value::int(4), &frac(1, 2)).unwrap().unwrap(), Value::int(2));
    assert_eq!(pow(&frac(8, 27), &frac(2, 3)).unwrap().unwrap(), frac(4, 9));
    assert_eq!(pow(&Value::int(2), &frac(1, 2)).unwrap(), None);
}

#[test]
fn float_powers() {
    let v = pow(&Value::double(2.0), &Value::double(0.5)).unwrap().unwrap();
    assert!((v.to_double().unwrap() - std::f64::consts::SQRT_2).abs() < 1e-12);
    let root = pow(&Value::double(-4.0), &frac(1, 2)).unwrap().unwrap();
    assert!(root.is_complex());
}

#[test]
fn comparison_and_sign() {
    assert_eq!(compare(&frac(1, 3), &Value::double(0.3)), Some(Ordering::Greater));
    assert_eq!(signum(&Value::int(-4)), Some(-1));
    assert_eq!(signum(&Value::identifier("x")), None);
}

#[test]
fn approximation_switches_to_reals_above_fifteen_digits() {
    assert_eq!(approximate(&frac(1, 4), 15).unwrap(), Value::double(0.25));
    let precise = approximate(&frac(1, 3), 20).unwrap();
    assert_eq!(precise.to_string(), "0.33333333333333333333");
}
