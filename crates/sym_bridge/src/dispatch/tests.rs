#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use pretty_assertions::assert_eq;
use sym_value::SymError;

fn x() -> Value {
    Value::identifier("x")
}

#[test]
fn resolution_follows_tier_order() {
    let dispatcher = Dispatcher::standard();
    assert!(matches!(dispatcher.resolve("sin"), Some((DispatchTier::Fixed, Resolution::Fixed(_)))));
    assert_eq!(
        dispatcher.resolve("factor"),
        Some((DispatchTier::Runtime, Resolution::Handle(BuiltinOp::Factor)))
    );
    assert_eq!(dispatcher.resolve("my_function"), Some((DispatchTier::Fallback, Resolution::Text)));
}

#[test]
fn resolvers_are_sorted_by_tier() {
    let dispatcher = Dispatcher::new(vec![
        OperatorResolverKind::Fallback(StringFallbackResolver),
        OperatorResolverKind::Fixed(FixedCatalogResolver),
    ]);
    assert!(matches!(dispatcher.resolve("cos"), Some((DispatchTier::Fixed, _))));
    assert_eq!(dispatcher.resolve("expand"), Some((DispatchTier::Fallback, Resolution::Text)));
}

#[test]
fn chain_without_fallback_reports_unknown_names() {
    let dispatcher = Dispatcher::new(vec![OperatorResolverKind::Runtime(RuntimeLookupResolver)]);
    let mut ctx = EvaluationContext::new();
    let err = dispatcher.apply(&mut ctx, "nosuch", &[x()]).unwrap_err();
    assert_eq!(err, SymError::UnknownOperator { name: "nosuch".into() });
}

#[test]
fn fixed_and_runtime_tiers_agree() {
    let mut ctx = EvaluationContext::new();
    let fixed = apply_fixed(&mut ctx, "sin", &[x()]).unwrap();
    let runtime = apply_runtime(&mut ctx, "sin", &[x()]).unwrap();
    assert_eq!(fixed, runtime);
    assert!(fixed.is_symbolic());
    assert_eq!(fixed.operator_name().unwrap(), "sin");
}

#[test]
fn multi_argument_calls() {
    let mut ctx = EvaluationContext::new();
    assert_eq!(apply(&mut ctx, "pow", &[Value::int(2), Value::int(10)]).unwrap(), Value::int(1024));
    let square = ctx.eval("x^2").unwrap();
    assert_eq!(apply(&mut ctx, "diff", &[square, x()]).unwrap().to_string(), "2*x");
    assert_eq!(apply(&mut ctx, "gcd", &[Value::int(12), Value::int(18)]).unwrap(), Value::int(6));
    let poly = ctx.eval("x^2-x-2").unwrap();
    assert_eq!(apply_runtime(&mut ctx, "solve", &[poly, x()]).unwrap().to_string(), "[-1,2]");
}

#[test]
fn runtime_lookup_accepts_aliases() {
    let mut ctx = EvaluationContext::new();
    let value = apply_runtime(&mut ctx, "log", &[Value::int(1)]).unwrap();
    assert_eq!(value, Value::int(0));
    assert!(matches!(
        apply_runtime(&mut ctx, "frobnicate", &[x()]),
        Err(SymError::UnknownOperator { .. })
    ));
    assert!(matches!(apply_fixed(&mut ctx, "factor", &[x()]), Err(SymError::UnknownOperator { .. })));
}

#[test]
fn ifactor_goes_through_runtime_lookup() {
    let mut ctx = EvaluationContext::new();
    let printed = apply(&mut ctx, "ifactor", &[Value::int(120)]).unwrap().to_string();
    for factor in ["2", "3", "5"] {
        assert!(printed.contains(factor), "{printed}");
    }
}

#[test]
fn string_fallback_reaches_user_functions() {
    let mut ctx = EvaluationContext::new();
    ctx.eval("h(a, b) := a*b + 1").unwrap();
    let value = apply(&mut ctx, "h", &[Value::int(3), Value::int(4)]).unwrap();
    assert_eq!(value, Value::int(13));
    assert_eq!(apply(&mut ctx, "g", &[x()]).unwrap().to_string(), "g(x)");
}

#[test]
fn standard_chain_is_shared_across_threads() {
    fn assert_shareable<T: Send + Sync>() {}
    assert_shareable::<Dispatcher>();

    let handles: Vec<_> = (0..4_i64)
        .map(|n| {
            std::thread::spawn(move || {
                let mut ctx = EvaluationContext::new();
                apply(&mut ctx, "gcd", &[Value::int(6 * n), Value::int(4 * n)]).unwrap()
            })
        })
        .collect();
    for (n, handle) in (0..4_i64).zip(handles) {
        assert_eq!(handle.join().unwrap(), Value::int(2 * n));
    }
}

#[test]
fn string_fallback_keeps_double_arguments() {
    let mut ctx = EvaluationContext::new();
    ctx.eval("f(t) := t").unwrap();
    for x in [1.0 / 3.0, 1.234_567_890_123_456_8e17, 0.1, 1e-7] {
        let input = Value::double(x);
        assert_eq!(apply(&mut ctx, "f", &[input.clone()]).unwrap(), input);
    }
}

#[test]
fn unevaluated_infix_arity_is_checked() {
    for (name, arity) in [("+", 0), ("*", 0), ("^", 1), ("^", 3), ("-", 3), ("/", 0)] {
        let args = vec![Value::int(2); arity];
        assert!(
            matches!(
                make_symbolic_unevaluated(name, &args),
                Err(SymError::UnknownOperator { .. })
            ),
            "{name}/{arity}"
        );
    }
    let power = make_symbolic_unevaluated("^", &[x(), Value::int(2)]).unwrap();
    assert_eq!(power.to_string(), "x^2");
}

#[test]
fn unevaluated_construction() {
    let sum = make_symbolic_unevaluated("+", &[Value::int(1), Value::int(1)]).unwrap();
    assert!(sum.is_symbolic());
    assert_eq!(sum.to_string(), "1+1");

    let quotient = make_symbolic_unevaluated("/", &[x(), Value::int(2)]).unwrap();
    assert_eq!(quotient.operator_name().unwrap(), "*");

    let call = make_symbolic_unevaluated("sin", &[x()]).unwrap();
    assert_eq!(call.argument().unwrap(), x());

    assert!(matches!(
        make_symbolic_unevaluated("nosuch", &[x()]),
        Err(SymError::UnknownOperator { .. })
    ));

    let mut ctx = EvaluationContext::new();
    assert_eq!(ctx.evaluate(&sum).unwrap(), Value::int(2));
}

#[test]
fn parsing_does_not_evaluate() {
    let value = parse_value("1+1").unwrap();
    assert!(value.is_symbolic());
    assert!(matches!(parse_value("1+"), Err(SymError::Parse { .. })));
}

#[test]
fn catalog_names_are_unique_and_resolvable() {
    let mut names: Vec<_> = FIXED_CATALOG.iter().map(FixedOperator::name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), FIXED_CATALOG.len());
    for entry in FIXED_CATALOG {
        assert_eq!(BuiltinOp::from_name(entry.name()), Some(entry.op()));
    }
}
