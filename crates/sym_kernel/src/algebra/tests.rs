#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::eval::eval_text;
use crate::state::KernelState;
use pretty_assertions::assert_eq;

fn value(text: &str) -> Value {
    eval_text(&mut KernelState::default(), text).unwrap()
}

fn show(result: SymResult<Value>) -> String {
    result.unwrap().to_string()
}

#[test]
fn expand_multiplies_out() {
    assert_eq!(show(expand(&value("(x+1)^2"))), "x^2+2*x+1");
    assert_eq!(show(expand(&value("(x+1)*(x-1)"))), "x^2-1");
    assert_eq!(show(expand(&value("(a+b)*c"))), "a*c+b*c");
    assert_eq!(show(expand(&value("sin(x)"))), "sin(x)");
}

#[test]
fn expand_maps_over_equations_and_lists() {
    assert_eq!(show(expand(&value("[(x+1)^2, 3]"))), "[x^2+2*x+1,3]");
    assert_eq!(show(expand(&value("(x+1)^2=0"))), "x^2+2*x+1=0");
}

#[test]
fn normal_cancels_common_factors() {
    assert_eq!(show(normal(&value("(x^2-1)/(x-1)"))), "x+1");
    assert_eq!(show(normal(&value("1/x+1/(x+1)"))), "(2*x+1)/(x^2+x)");
    assert_eq!(show(normal(&value("x/2+x/2"))), "x");
}

#[test]
fn simplify_uses_the_pythagorean_identity() {
    assert_eq!(show(simplify(&value("sin(x)^2+cos(x)^2"))), "1");
    assert_eq!(show(simplify(&value("3*sin(t)^2+3*cos(t)^2+t"))), "t+3");
}

#[test]
fn factor_over_the_rationals() {
    assert_eq!(show(factor(&value("x^2-1"))), "(x-1)*(x+1)");
    assert_eq!(show(factor(&value("x^3-x"))), "x*(x-1)*(x+1)");
    assert_eq!(show(factor(&value("2*x^2-2"))), "2*(x-1)*(x+1)");
    assert_eq!(show(factor(&value("x^2+2*x+1"))), "(x+1)^2");
    assert_eq!(show(factor(&value("1-x^2"))), "-(x-1)*(x+1)");
    assert_eq!(show(factor(&value("x^2+1"))), "x^2+1");
}

#[test]
fn factor_rational_functions_and_integers() {
    assert_eq!(show(factor(&value("(x^2-1)/(x+2)"))), "(x-1)*(x+1)/(x+2)");
    assert_eq!(show(factor(&value("120"))), "2^3*3*5");
    assert_eq!(show(factor(&value("x*y-y"))), "x*y-y");
}

#[test]
fn gcd_and_lcm() {
    assert_eq!(gcd(&[value("12"), value("18")]).unwrap(), Value::int(6));
    assert_eq!(lcm(&[value("4"), value("6")]).unwrap(), Value::int(12));
    assert_eq!(show(gcd(&[value("x^2-1"), value("x-1")])), "x-1");
    assert_eq!(show(lcm(&[value("x^2-1"), value("x-1")])), "x^2-1");
    assert_eq!(gcd(&[value("[12, 18, 8]")]).unwrap(), Value::int(2));
    assert_eq!(gcd(&[]).unwrap(), Value::int(0));
}

#[test]
fn numerator_and_denominator() {
    let (n, d) = numer_denom(&value("3/4")).unwrap();
    assert_eq!((n, d), (Value::int(3), Value::int(4)));
    let (n, d) = numer_denom(&value("x/(x+1)")).unwrap();
    assert_eq!((n.to_string(), d.to_string()), ("x".to_owned(), "x+1".to_owned()));
}
