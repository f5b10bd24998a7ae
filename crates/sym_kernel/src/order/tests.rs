#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cmp::Ordering;

use super::*;
use pretty_assertions::assert_eq;

fn x() -> Value {
    Value::identifier("x")
}

fn power(base: Value, n: i64) -> Value {
    Value::symbolic_args(BuiltinOp::Pow, vec![base, Value::int(n)])
}

#[test]
fn numbers_before_names_before_nodes() {
    assert_eq!(compare(&Value::int(5), &x()), Ordering::Less);
    assert_eq!(compare(&x(), &power(x(), 2)), Ordering::Less);
    assert_eq!(compare(&Value::identifier("a"), &Value::identifier("b")), Ordering::Less);
}

#[test]
fn numbers_compare_by_value_across_tags() {
    let half = Value::fraction(Value::int(1), Value::int(2)).unwrap();
    assert_eq!(compare(&half, &Value::int(1)), Ordering::Less);
    assert_eq!(compare(&Value::double(2.5), &Value::int(2)), Ordering::Greater);
    assert_eq!(compare(&Value::int(-1), &Value::int(1)), Ordering::Less);
}

#[test]
fn degree_counts_identifiers() {
    assert_eq!(degree(&x()), 1);
    assert_eq!(degree(&power(x(), 3)), 3);
    let xy = Value::symbolic_args(BuiltinOp::Mul, vec![Value::int(2), x(), Value::identifier("y")]);
    assert_eq!(degree(&xy), 2);
    assert_eq!(degree(&Value::int(7)), 0);
}

#[test]
fn terms_sort_high_degree_first_numbers_last() {
    let mut terms = vec![Value::int(1), x(), power(x(), 2)];
    terms.sort_by(term_order);
    assert_eq!(terms, vec![power(x(), 2), x(), Value::int(1)]);
}

#[test]
fn split_power_defaults_exponent_to_one() {
    assert_eq!(split_power(&x()), (x(), Value::int(1)));
    assert_eq!(split_power(&power(x(), 4)), (x(), Value::int(4)));
}

#[test]
fn factor_order_sorts_by_base() {
    let mut factors = vec![Value::identifier("z"), power(Value::identifier("a"), 2), x()];
    factors.sort_by(factor_order);
    assert_eq!(factors, vec![power(Value::identifier("a"), 2), x(), Value::identifier("z")]);
}
