#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::{Arc, Mutex};

use super::*;
use pretty_assertions::assert_eq;

#[test]
fn eval_returns_the_last_statement() {
    let mut ctx = EvaluationContext::new();
    assert_eq!(ctx.eval_to_string("1+1").unwrap(), "2");
    assert_eq!(ctx.eval_to_string("a:=3; a^2").unwrap(), "9");
}

#[test]
fn parse_failures_surface_as_evaluation_errors() {
    let mut ctx = EvaluationContext::new();
    let err = ctx.eval("1+*2").unwrap_err();
    assert!(matches!(err, SymError::Evaluation { .. }), "{err:?}");
    assert!(err.to_string().contains("syntax error"));
}

#[test]
fn variables_are_scoped_to_one_context() {
    let mut first = EvaluationContext::new();
    let mut second = EvaluationContext::new();
    first.set_variable("a", "5").unwrap();
    assert_eq!(first.eval_to_string("a+3").unwrap(), "8");
    assert_eq!(second.eval_to_string("a+3").unwrap(), "a+3");
    assert_eq!(first.get_variable("a"), Value::int(5));
    assert_eq!(second.get_variable("a"), Value::identifier("a"));
}

#[test]
fn set_variable_rejects_non_names() {
    let mut ctx = EvaluationContext::new();
    assert!(ctx.set_variable("1x", "2").is_err());
    assert!(ctx.set_variable("a+b", "2").is_err());
}

#[test]
fn functions_show_up_as_function_values() {
    let mut ctx = EvaluationContext::new();
    ctx.eval("f(x):=x+1").unwrap();
    assert!(ctx.get_variable("f").is_function());
    assert!(ctx.unset_variable("f"));
    assert_eq!(ctx.get_variable("f"), Value::identifier("f"));
}

#[test]
fn configuration_round_trips() {
    let mut ctx = EvaluationContext::new();
    assert_eq!(ctx.precision(), 15);
    assert!(!ctx.is_complex_mode());
    assert_eq!(ctx.timeout(), 30.0);

    ctx.set_precision(40).unwrap();
    ctx.set_complex_mode(true);
    ctx.set_timeout(0.0).unwrap();
    assert_eq!(ctx.precision(), 40);
    assert!(ctx.is_complex_mode());
    assert_eq!(ctx.timeout(), 0.0);

    assert!(ctx.set_precision(0).is_err());
    assert!(ctx.set_timeout(-1.0).is_err());
    assert!(ctx.set_timeout(f64::NAN).is_err());
}

#[test]
fn precision_changes_approximations() {
    let mut ctx = EvaluationContext::new();
    ctx.set_precision(20).unwrap();
    assert_eq!(ctx.eval_to_string("evalf(pi)").unwrap(), "3.1415926535897932385");
}

#[test]
fn warnings_reach_the_handler() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut ctx = EvaluationContext::new();
    ctx.set_warning_handler(move |message| sink.lock().unwrap().push(message.to_owned()));
    assert!(ctx.has_warning_handler());

    assert_eq!(ctx.eval_to_string("solve(x^2+1, x)").unwrap(), "[]");
    assert_eq!(seen.lock().unwrap().len(), 1);

    ctx.clear_warning_handler();
    ctx.eval("solve(x^2+4, x)").unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn complex_mode_changes_results() {
    let mut ctx = EvaluationContext::new();
    ctx.set_complex_mode(true);
    assert_eq!(ctx.eval_to_string("solve(x^2+1, x)").unwrap(), "[-i,i]");
}

#[test]
fn value_operations() {
    let mut ctx = EvaluationContext::new();
    let p = ctx.eval("x^2-1").unwrap();
    assert_eq!(ctx.factor(&p).unwrap().to_string(), "(x-1)*(x+1)");
    let q = ctx.eval("(x+1)^2").unwrap();
    assert_eq!(ctx.expand(&q).unwrap().to_string(), "x^2+2*x+1");
    let r = ctx.eval("sin(x)^2+cos(x)^2").unwrap();
    assert_eq!(ctx.simplify(&r).unwrap(), Value::int(1));
}

#[test]
fn mixed_arithmetic() {
    let mut ctx = EvaluationContext::new();
    let x = Value::identifier("x");
    assert_eq!(ctx.evaluate_binary(BinaryOp::Mul, x.clone(), 2i64).unwrap().to_string(), "2*x");
    assert_eq!(ctx.evaluate_binary(BinaryOp::Add, 1i64, 0.5).unwrap(), Value::double(1.5));
    assert_eq!(ctx.evaluate_binary(BinaryOp::Div, 6i64, 2i64).unwrap(), Value::int(3));
    assert_eq!(ctx.evaluate_unary(UnaryOp::Neg, x).unwrap().to_string(), "-x");
}

#[test]
fn dropping_a_context_keeps_its_slot() {
    let before = allocated_slots();
    let mut ctx = EvaluationContext::new();
    let id = ctx.id();
    ctx.set_variable("z", "1").unwrap();
    assert_eq!(bindings_in(id), Some(1));
    drop(ctx);
    assert!(allocated_slots() > before);
    assert_eq!(bindings_in(id), Some(0));
}
