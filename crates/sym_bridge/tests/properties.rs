//! Property tests for value construction and extraction.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use proptest::prelude::*;
use sym_bridge::{apply_fixed, apply_runtime, BigInt, EvaluationContext, SymError, Value};

fn non_complex_number() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::int),
        (-1.0e12..1.0e12f64).prop_map(Value::double),
        (any::<i64>(), 1i64..1000).prop_map(|(n, d)| Value::fraction(Value::int(n), Value::int(d)).unwrap()),
        any::<i128>().prop_map(|n| Value::bigint(BigInt::from(n))),
    ]
}

proptest! {
    #[test]
    fn machine_integers_round_trip(n in any::<i64>()) {
        prop_assert_eq!(Value::int(n).to_int().unwrap(), n);
        let is_type_mismatch = matches!(Value::double(n as f64).to_int(), Err(SymError::TypeMismatch { .. }));
        prop_assert!(is_type_mismatch);
    }

    #[test]
    fn big_integer_bytes_round_trip(n in any::<i128>()) {
        let value = Value::bigint(BigInt::from(n) * BigInt::from(u64::MAX));
        let bytes = value.bigint_bytes().unwrap();
        let sign = value.bigint_sign().unwrap();
        prop_assert_eq!(Value::from_bigint_bytes(&bytes, sign).unwrap(), value);
        prop_assert_eq!(bytes.is_empty(), sign == 0);
    }

    #[test]
    fn fractions_are_coprime(n in any::<i64>(), d in 1i64..1_000_000) {
        let value = Value::fraction(Value::int(n), Value::int(d)).unwrap();
        if value.is_fraction() {
            let num = value.num().unwrap().to_bigint().unwrap();
            let den = value.den().unwrap().to_bigint().unwrap();
            prop_assert_eq!(num_gcd(&num, &den), BigInt::from(1));
            prop_assert!(den > BigInt::from(1));
        } else {
            prop_assert!(value.is_integer());
        }
    }

    #[test]
    fn real_parts_of_non_complex_numbers(value in non_complex_number()) {
        prop_assert_eq!(value.re(), value.clone());
        prop_assert_eq!(value.im(), Value::int(0));
    }

    #[test]
    fn vector_indexing(items in prop::collection::vec(any::<i64>(), 0..20), probe in -5i64..30) {
        let vector = Value::list(items.iter().copied().map(Value::int).collect());
        prop_assert_eq!(vector.size().unwrap(), items.len());
        for (i, item) in items.iter().enumerate() {
            prop_assert_eq!(vector.at(i as i64).unwrap(), Value::int(*item));
        }
        let in_range = usize::try_from(probe).is_ok_and(|i| i < items.len());
        let out_of_range = matches!(vector.at(probe), Err(SymError::IndexOutOfRange { .. }));
        prop_assert_eq!(in_range, !out_of_range);
    }

    #[test]
    fn fixed_and_runtime_sine_agree(name in "[a-z][a-z0-9]{0,6}") {
        prop_assume!(!matches!(name.as_str(), "pi" | "i" | "inf" | "infinity"));
        let mut ctx = EvaluationContext::new();
        let x = Value::identifier(&name);
        let fixed = apply_fixed(&mut ctx, "sin", &[x.clone()]).unwrap();
        let runtime = apply_runtime(&mut ctx, "sin", &[x]).unwrap();
        prop_assert_eq!(fixed, runtime);
    }
}

fn num_gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let (mut a, mut b) = (a.clone(), b.clone());
    while b != BigInt::from(0) {
        let r = &a % &b;
        a = b;
        b = r;
    }
    if a < BigInt::from(0) { -a } else { a }
}
