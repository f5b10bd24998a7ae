#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::parser::parse;
use pretty_assertions::assert_eq;

#[test]
fn variables_are_sorted_and_skip_constants() {
    let expr = parse("y*sin(x)+pi*x+y").unwrap();
    assert_eq!(variables(&expr), vec!["x".to_owned(), "y".to_owned()]);
}

#[test]
fn main_variable_defaults_to_x() {
    assert_eq!(main_variable(&parse("t^2+1").unwrap()), "t");
    assert_eq!(main_variable(&parse("a+b").unwrap()), "x");
    assert_eq!(main_variable(&parse("3").unwrap()), "x");
}

#[test]
fn free_of_looks_through_calls() {
    let expr = parse("f(y)+sin(2*z)").unwrap();
    assert!(free_of(&expr, "x"));
    assert!(!free_of(&expr, "z"));
}

#[test]
fn substitute_replaces_every_occurrence() {
    let expr = parse("x^2+f(x,y)").unwrap();
    let out = substitute(&expr, "x", &Value::int(3));
    assert_eq!(out, parse("3^2+f(3,y)").unwrap());
}

#[test]
fn substitute_all_is_simultaneous() {
    let expr = parse("x-y").unwrap();
    let pairs = vec![
        ("x".to_owned(), Value::identifier("y")),
        ("y".to_owned(), Value::identifier("x")),
    ];
    assert_eq!(substitute_all(&expr, &pairs), parse("y-x").unwrap());
}
