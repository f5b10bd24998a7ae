#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use sym_value::{SymError, Tag};

fn x() -> Value {
    Value::identifier("x")
}

#[test]
fn parses_without_evaluating() {
    let v = parse("1+1").unwrap();
    assert_eq!(v.tag(), Tag::Symbolic);
    assert_eq!(v.operator_name().unwrap(), "+");
    assert_eq!(v.arguments().unwrap(), vec![Value::int(1), Value::int(1)]);
}

#[test]
fn subtraction_and_division_use_neg_and_inv() {
    let v = parse("a-b/c").unwrap();
    let terms = v.arguments().unwrap();
    assert_eq!(terms[0], Value::identifier("a"));
    let neg = &terms[1];
    assert_eq!(neg.operator_name().unwrap(), "neg");
    let quotient = neg.argument().unwrap();
    assert_eq!(quotient.operator_name().unwrap(), "*");
    assert_eq!(
        quotient.arguments().unwrap()[1].operator_name().unwrap(),
        "inv"
    );
}

#[test]
fn power_is_right_associative_and_binds_tighter_than_minus() {
    let v = parse("-2^3^2").unwrap();
    assert_eq!(v.operator_name().unwrap(), "neg");
    let pow = v.argument().unwrap();
    let args = pow.arguments().unwrap();
    assert_eq!(args[0], Value::int(2));
    assert_eq!(args[1].operator_name().unwrap(), "^");
}

#[test]
fn calls_and_function_values() {
    let v = parse("sin(x)").unwrap();
    assert_eq!(v.operator_name().unwrap(), "sin");
    assert_eq!(v.argument().unwrap(), x());
    assert!(v.operator().unwrap().as_builtin().is_some());

    let user = parse("f(x,2)").unwrap();
    assert_eq!(user.operator_name().unwrap(), "f");
    assert_eq!(user.arguments().unwrap(), vec![x(), Value::int(2)]);

    assert_eq!(parse("sin").unwrap(), Value::function(BuiltinOp::Sin));
}

#[test]
fn literals() {
    assert_eq!(parse("42").unwrap(), Value::int(42));
    assert_eq!(parse("2.5").unwrap(), Value::double(2.5));
    assert_eq!(parse("\"hello world\"").unwrap(), Value::string("hello world"));
    assert_eq!(
        parse("i").unwrap(),
        Value::complex(Value::int(0), Value::int(1)).unwrap()
    );
    assert!(parse("123456789012345678901234567890").unwrap().tag() == Tag::BigInteger);
    assert_eq!(parse("3.14159265358979323846").unwrap().tag(), Tag::Real);
}

#[test]
fn printed_doubles_parse_back_as_doubles() {
    for x in [1.0 / 3.0, 0.1 + 0.2, 1.234_567_890_123_456_8e17, 2.0_f64.sqrt()] {
        let printed = Value::double(x).to_string();
        assert_eq!(parse(&printed).unwrap(), Value::double(x), "{printed}");
    }
    // Same digit count, but not the shortest form of any double.
    assert_eq!(parse("0.3333333333333330").unwrap().tag(), Tag::Real);
}

#[test]
fn vectors() {
    let list = parse("[1,2,3]").unwrap();
    assert_eq!(list.subtype().unwrap(), VectorSubtype::List);
    assert_eq!(list.size().unwrap(), 3);

    let matrix = parse("[[1,2],[3,4]]").unwrap();
    assert_eq!(matrix.subtype().unwrap(), VectorSubtype::Matrix);

    let ragged = parse("[[1,2],[3]]").unwrap();
    assert_eq!(ragged.subtype().unwrap(), VectorSubtype::List);

    let set = parse("set[1,2]").unwrap();
    assert_eq!(set.subtype().unwrap(), VectorSubtype::Set);

    let seq = parse("(1,2)").unwrap();
    assert_eq!(seq.subtype().unwrap(), VectorSubtype::Sequence);
}

#[test]
fn assignment_and_equations() {
    let v = parse("a:=x=2").unwrap();
    assert_eq!(v.operator_name().unwrap(), ":=");
    let args = v.arguments().unwrap();
    assert_eq!(args[0], Value::identifier("a"));
    assert_eq!(args[1].operator_name().unwrap(), "=");

    let def = parse("f(x):=x^2").unwrap();
    assert_eq!(def.arguments().unwrap()[0].operator_name().unwrap(), "f");
}

#[test]
fn factorial_postfix() {
    let v = parse("5!").unwrap();
    assert_eq!(v.operator_name().unwrap(), "factorial");
    assert_eq!(v.argument().unwrap(), Value::int(5));
}

#[test]
fn statements() {
    let program = parse_program("a:=1; a+1;").unwrap();
    assert_eq!(program.len(), 2);
    assert!(parse("a:=1; a+1").is_err());
}

#[test]
fn malformed_input_reports_position() {
    assert!(matches!(parse("invalid((("), Err(SymError::Parse { .. })));
    assert!(matches!(parse("1+"), Err(SymError::Parse { position: 2, .. })));
    assert!(matches!(parse(")"), Err(SymError::Parse { position: 0, .. })));
    assert!(matches!(parse(""), Err(SymError::Parse { .. })));
}

#[test]
fn printed_forms_reparse() {
    for text in ["x^2-1", "(x-1)*(x+1)", "2+3*i", "[1,2]", "f(x,1)", "x/(x+1)", "3/7"] {
        let parsed = parse(text).unwrap();
        assert!(parse(&parsed.to_string()).is_ok(), "{text}");
    }
}
