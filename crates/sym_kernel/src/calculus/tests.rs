#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::eval::eval_text;
use crate::state::KernelState;
use pretty_assertions::assert_eq;

fn run(text: &str) -> String {
    eval_text(&mut KernelState::default(), text).unwrap().to_string()
}

#[test]
fn derivatives_of_polynomials() {
    assert_eq!(run("diff(x^3)"), "3*x^2");
    assert_eq!(run("diff(x^3+2*x, x)"), "3*x^2+2");
    assert_eq!(run("diff(x^2, x, 2)"), "2");
    assert_eq!(run("diff(y*x^2, y)"), "x^2");
}

#[test]
fn derivatives_of_elementary_functions() {
    assert_eq!(run("diff(sin(x))"), "cos(x)");
    assert_eq!(run("diff(cos(x))"), "-sin(x)");
    assert_eq!(run("diff(exp(2*x))"), "2*exp(2*x)");
    assert_eq!(run("diff(ln(x))"), "1/x");
    assert_eq!(run("diff(tan(x))"), "tan(x)^2+1");
    assert_eq!(run("diff(x*sin(x))"), "x*cos(x)+sin(x)");
}

#[test]
fn unknown_functions_stay_unevaluated() {
    assert_eq!(run("diff(f(x), x)"), "diff(f(x),x)");
    assert_eq!(run("diff(f(y), x)"), "0");
}

#[test]
fn antiderivatives() {
    assert_eq!(run("integrate(x^2)"), "x^3/3");
    assert_eq!(run("integrate(1/x, x)"), "ln(abs(x))");
    assert_eq!(run("integrate(sin(x), x)"), "-cos(x)");
    assert_eq!(run("integrate(cos(2*x), x)"), "sin(2*x)/2");
    assert_eq!(run("integrate(2*x+1, x)"), "x^2+x");
    assert_eq!(run("integrate(exp(x), x)"), "exp(x)");
}

#[test]
fn definite_integrals() {
    assert_eq!(run("integrate(x^2, x, 0, 3)"), "9");
    assert_eq!(run("int(x, x, 0, 1)"), "1/2");
}

#[test]
fn unsupported_integrands_are_returned_unevaluated() {
    assert_eq!(run("integrate(x*exp(x), x)"), "integrate(x*exp(x),x)");
}

#[test]
fn substitution_forms() {
    assert_eq!(run("subst(x^2+1, x=2)"), "5");
    assert_eq!(run("subst(x+y, [x=1, y=2])"), "3");
    assert_eq!(run("subst(x^2, x, 3)"), "9");
    assert_eq!(run("subst(sin(x), x=pi/6)"), "1/2");
}

#[test]
fn limits() {
    assert_eq!(run("limit(x^2+1, x, 2)"), "5");
    assert_eq!(run("limit((x^2-1)/(x-1), x, 1)"), "2");
    assert_eq!(run("limit(sin(x)/x, x, 0)"), "1");
    assert_eq!(run("limit(1/x, x, infinity)"), "0");
    assert_eq!(run("limit((2*x^2+1)/x^2, x=infinity)"), "2");
    assert_eq!(run("limit(x^3, x, -infinity)"), "-infinity");
}

#[test]
fn taylor_series() {
    assert_eq!(run("series(exp(x), x, 0, 3)"), "x^3/6+x^2/2+x+1");
    assert_eq!(run("series(sin(x))"), "x^5/120-x^3/6+x");
    assert_eq!(run("series(1/(1-x), x, 0, 2)"), "x^2+x+1");
}
