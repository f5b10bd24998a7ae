#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::eval::eval_text;
use crate::state::KernelState;
use pretty_assertions::assert_eq;
use sym_value::Value;

fn run(text: &str) -> String {
    eval_text(&mut KernelState::default(), text).unwrap().to_string()
}

#[test]
fn trigonometric_special_angles() {
    assert_eq!(run("sin(pi/6)"), "1/2");
    assert_eq!(run("cos(pi)"), "-1");
    assert_eq!(run("sin(pi)"), "0");
    assert_eq!(run("cos(pi/3)"), "1/2");
    assert_eq!(run("tan(pi/4)"), "1");
    assert_eq!(run("sin(7*pi/6)"), "-1/2");
}

#[test]
fn inverse_functions_at_exact_points() {
    assert_eq!(run("asin(1)"), run("pi/2"));
    assert_eq!(run("acos(0)"), run("pi/2"));
    assert_eq!(run("atan(-1)"), run("-pi/4"));
}

#[test]
fn symmetry_pulls_out_signs() {
    assert_eq!(run("sin(-x)"), "-sin(x)");
    assert_eq!(run("cos(-x)"), "cos(x)");
    assert_eq!(run("abs(-2*x)"), "abs(2*x)");
}

#[test]
fn exponential_and_logarithm() {
    assert_eq!(run("exp(0)"), "1");
    assert_eq!(run("ln(1)"), "0");
    assert_eq!(run("exp(ln(y))"), "y");
    assert_eq!(run("log10(1000)"), "3");
    assert_eq!(run("ln(2)"), "ln(2)");
}

#[test]
fn approximate_arguments() {
    let mut state = KernelState::default();
    assert_eq!(eval_text(&mut state, "sin(0.0)").unwrap(), Value::double(0.0));
    assert!(matches!(eval_text(&mut state, "ln(-1.0)").unwrap(), Value::Complex(_)));
}

#[test]
fn evalf_uses_context_precision() {
    let mut state = KernelState::default();
    let pi = eval_text(&mut state, "evalf(pi)").unwrap();
    assert_eq!(pi, Value::double(std::f64::consts::PI));
    assert_eq!(eval_text(&mut state, "evalf(pi, 30)").unwrap().to_string(), "3.14159265358979323846264338328");
    assert!(eval_text(&mut state, "evalf(pi, 0)").is_err());
}

#[test]
fn rounding_and_magnitude() {
    assert_eq!(run("sqrt(8)"), "2*sqrt(2)");
    assert_eq!(run("abs(-3)"), "3");
    assert_eq!(run("floor(5/2)"), "2");
    assert_eq!(run("ceil(5/2)"), "3");
    assert_eq!(run("floor(-5/2)"), "-3");
    assert_eq!(run("sign(-7)"), "-1");
}

#[test]
fn functions_map_over_lists() {
    assert_eq!(run("abs([-1,2,-3])"), "[1,2,3]");
}

#[test]
fn parts_of_variables_assume_real() {
    assert_eq!(run("re(x)"), "x");
    assert_eq!(run("im(x)"), "0");
}
