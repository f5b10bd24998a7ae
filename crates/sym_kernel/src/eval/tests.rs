#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;

fn run(text: &str) -> String {
    eval_text(&mut KernelState::default(), text).unwrap().to_string()
}

#[test]
fn bindings_persist_across_statements() {
    let mut state = KernelState::default();
    assert_eq!(eval_text(&mut state, "a:=5").unwrap(), Value::int(5));
    assert_eq!(eval_text(&mut state, "a+3").unwrap(), Value::int(8));
    assert_eq!(eval_text(&mut state, "a:=2; a*a").unwrap(), Value::int(4));
}

#[test]
fn user_functions() {
    let mut state = KernelState::default();
    let defined = eval_text(&mut state, "f(x):=x^2").unwrap();
    assert!(matches!(defined, Value::Function(_)));
    assert_eq!(eval_text(&mut state, "f(3)").unwrap(), Value::int(9));
    assert_eq!(eval_text(&mut state, "f(y+1)").unwrap().to_string(), "(y+1)^2");
    assert!(eval_text(&mut state, "f(1, 2)").is_err());
}

#[test]
fn unbound_names_stay_symbolic() {
    assert_eq!(run("x"), "x");
    assert_eq!(run("g(2)"), "g(2)");
}

#[test]
fn exact_arithmetic() {
    assert_eq!(run("6/2"), "3");
    assert_eq!(run("1/3+1/6"), "1/2");
    assert_eq!(run("2^100"), "1267650600228229401496703205376");
}

#[test]
fn self_reference_does_not_loop() {
    let mut state = KernelState::default();
    eval_text(&mut state, "b:=b+1").unwrap();
    assert_eq!(eval_text(&mut state, "b").unwrap().to_string(), "b+1");
}

#[test]
fn runaway_recursion_is_an_error() {
    let mut state = KernelState::default();
    eval_text(&mut state, "r(n):=r(n+1)").unwrap();
    assert!(eval_text(&mut state, "r(0)").is_err());
}

#[test]
fn builtins_cannot_be_redefined() {
    assert!(eval_text(&mut KernelState::default(), "sin(x):=x").is_err());
}

#[test]
fn empty_program_is_an_empty_sequence() {
    let value = eval_text(&mut KernelState::default(), "").unwrap();
    assert_eq!(value, Value::sequence(Vec::new()));
}

#[test]
fn timeout_overrun_is_only_a_warning() {
    let mut state = KernelState::default();
    state.config_mut().timeout_secs = 1e-12;
    assert_eq!(eval_text(&mut state, "1+1").unwrap(), Value::int(2));
    assert!(!state.take_warnings().is_empty());
}
