#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::SymError;
use crate::operator::BuiltinOp;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn x() -> Value {
    Value::identifier("x")
}

fn frac(n: i64, d: i64) -> Value {
    Value::fraction(Value::int(n), Value::int(d)).unwrap()
}

// Construction

#[test]
fn bigint_demotes_when_it_fits() {
    assert_eq!(Value::bigint(BigInt::from(42)), Value::Int(42));
    let big = BigInt::from(i64::MAX) + 1;
    assert!(matches!(Value::bigint(big), Value::BigInt(_)));
}

#[test]
fn fraction_is_reduced() {
    let v = frac(6, 4);
    assert_eq!(v.num().unwrap(), Value::int(3));
    assert_eq!(v.den().unwrap(), Value::int(2));
}

#[test]
fn fraction_with_unit_denominator_is_integer() {
    let v = frac(6, 2);
    assert_eq!(v, Value::int(3));
    assert!(!v.is_fraction());
    assert_eq!(v.tag(), Tag::Integer);
}

#[test]
fn fraction_normalizes_sign() {
    let v = frac(3, -7);
    assert_eq!(v.num().unwrap(), Value::int(-3));
    assert_eq!(v.den().unwrap(), Value::int(7));
}

#[test]
fn fraction_rejects_zero_denominator_and_non_integers() {
    assert!(matches!(
        Value::fraction(Value::int(1), Value::int(0)),
        Err(SymError::Evaluation { .. })
    ));
    assert_eq!(
        Value::fraction(Value::double(1.0), Value::int(2)),
        Err(SymError::TypeMismatch {
            expected: "integer",
            got: "double"
        })
    );
}

#[test]
fn complex_is_not_collapsed() {
    let v = Value::complex(Value::int(2), Value::int(0)).unwrap();
    assert!(v.is_complex());
    assert_eq!(v.re(), Value::int(2));
    assert_eq!(v.im(), Value::int(0));
}

#[test]
fn complex_requires_real_parts() {
    assert!(matches!(
        Value::complex(x(), Value::int(1)),
        Err(SymError::TypeMismatch { .. })
    ));
}

#[test]
fn symbolic_args_packs_sequence() {
    let single = Value::symbolic_args(BuiltinOp::Sin, vec![x()]);
    assert_eq!(single.argument().unwrap(), x());

    let pair = Value::symbolic_args(BuiltinOp::Diff, vec![x(), x()]);
    let arg = pair.argument().unwrap();
    assert_eq!(arg.subtype().unwrap(), VectorSubtype::Sequence);
    assert_eq!(pair.arguments().unwrap(), vec![x(), x()]);
}

// Accessors

#[test]
fn to_int_only_accepts_integers() {
    assert_eq!(Value::int(-5).to_int(), Ok(-5));
    assert_eq!(
        Value::double(1.0).to_int(),
        Err(SymError::TypeMismatch {
            expected: "integer",
            got: "double"
        })
    );
    assert!(Value::symbolic(BuiltinOp::Sin, x()).to_int().is_err());
}

#[test]
fn to_double_only_accepts_doubles() {
    assert_eq!(Value::double(2.5).to_double(), Ok(2.5));
    assert!(Value::int(2).to_double().is_err());
}

#[test]
fn bigint_bytes_of_zero_are_empty() {
    let zero = Value::int(0);
    assert_eq!(zero.bigint_bytes().unwrap(), Vec::<u8>::new());
    assert_eq!(zero.bigint_sign().unwrap(), 0);
    assert_eq!(Value::from_bigint_bytes(&[], 0).unwrap(), zero);
}

#[test]
fn bigint_bytes_reject_inconsistent_sign() {
    assert!(Value::from_bigint_bytes(&[1], 0).is_err());
    assert!(Value::from_bigint_bytes(&[], 1).is_err());
    assert!(Value::from_bigint_bytes(&[1], 2).is_err());
}

#[test]
fn bigint_string() {
    let big: BigInt = "123456789012345678901234567890".parse().unwrap();
    let v = Value::bigint(-big);
    assert_eq!(v.bigint_string().unwrap(), "-123456789012345678901234567890");
    assert_eq!(v.bigint_sign().unwrap(), -1);
    assert!(v.to_int().is_err());
}

#[test]
fn num_den_are_total_over_integers() {
    assert_eq!(Value::int(9).num().unwrap(), Value::int(9));
    assert_eq!(Value::int(9).den().unwrap(), Value::int(1));
    assert!(Value::double(0.5).num().is_err());
    assert!(x().den().is_err());
}

#[test]
fn re_im_are_total() {
    let sym = Value::symbolic(BuiltinOp::Sin, x());
    assert_eq!(sym.re(), sym);
    assert_eq!(sym.im(), Value::int(0));
    assert_eq!(Value::string("s").im(), Value::int(0));
}

#[test]
fn vector_access() {
    let v = Value::list(vec![Value::int(10), Value::int(20)]);
    assert_eq!(v.size().unwrap(), 2);
    assert_eq!(v.at(1).unwrap(), Value::int(20));
    assert_eq!(
        v.at(2),
        Err(SymError::IndexOutOfRange { index: 2, size: 2 })
    );
    assert_eq!(
        v.at(-1),
        Err(SymError::IndexOutOfRange { index: -1, size: 2 })
    );
    assert!(Value::int(1).at(0).is_err());
}

#[test]
fn symbolic_accessors_reject_other_tags() {
    assert!(x().operator_name().is_err());
    assert!(Value::int(3).argument().is_err());
    let node = Value::symbolic(BuiltinOp::Sin, x());
    assert_eq!(node.operator_name().unwrap(), "sin");
}

#[test]
fn map_accessors() {
    let m = Value::map(vec![
        (Value::int(1), Value::string("a")),
        (Value::string("k"), Value::int(2)),
    ]);
    assert_eq!(m.map_len().unwrap(), 2);
    assert_eq!(m.map_keys().unwrap(), vec![Value::int(1), Value::string("k")]);
    assert_eq!(m.map_get(&Value::string("k")).unwrap(), Some(Value::int(2)));
    assert_eq!(m.map_get(&Value::int(5)).unwrap(), None);
    assert!(x().map_values().is_err());
}

#[test]
fn name_accessors() {
    assert_eq!(x().ident_name().unwrap(), "x");
    assert_eq!(Value::string("hi").string_value().unwrap(), "hi");
    assert_eq!(Value::function(BuiltinOp::Sin).function_name().unwrap(), "sin");
    assert!(Value::string("hi").ident_name().is_err());
}

// Predicates

#[test]
fn is_numeric_excludes_fraction_and_complex() {
    assert!(Value::int(1).is_numeric());
    assert!(Value::double(1.0).is_numeric());
    assert!(!frac(1, 2).is_numeric());
    assert!(!Value::complex(Value::int(0), Value::int(1)).unwrap().is_numeric());
}

#[test]
fn is_one_is_exact() {
    assert!(Value::int(1).is_one());
    assert!(Value::double(1.0).is_one());
    assert!(!Value::double(0.999_999_999_999_999).is_one());
    assert!(!Value::double(1.000_000_1).is_one());
    assert!(!Value::identifier("one").is_one());
}

#[test]
fn is_zero_covers_numeric_tags() {
    assert!(Value::int(0).is_zero());
    assert!(Value::double(-0.0).is_zero());
    assert!(Value::complex(Value::int(0), Value::int(0)).unwrap().is_zero());
    assert!(!x().is_zero());
}

#[test]
fn equality_is_structural() {
    assert_ne!(Value::int(1), Value::double(1.0));
    assert_eq!(
        Value::symbolic_args(BuiltinOp::Add, vec![x(), Value::int(1)]),
        Value::symbolic_args(BuiltinOp::Add, vec![x(), Value::int(1)])
    );
    assert_ne!(
        Value::list(vec![Value::int(1)]),
        Value::vector(vec![Value::int(1)], VectorSubtype::Set)
    );
}

// Printing

#[test]
fn prints_numbers() {
    assert_eq!(Value::int(-7).to_string(), "-7");
    assert_eq!(Value::double(2.0).to_string(), "2.0");
    assert_eq!(Value::double(0.5).to_string(), "0.5");
    assert_eq!(Value::double(1e-20).to_string(), "1e-20");
    assert_eq!(frac(3, 7).to_string(), "3/7");
}

#[test]
fn prints_complex() {
    let c = |re, im| Value::complex(Value::int(re), Value::int(im)).unwrap();
    assert_eq!(c(2, 3).to_string(), "2+3*i");
    assert_eq!(c(0, 5).to_string(), "5*i");
    assert_eq!(c(0, 1).to_string(), "i");
    assert_eq!(c(0, -1).to_string(), "-i");
    assert_eq!(c(1, -2).to_string(), "1-2*i");
}

#[test]
fn prints_vectors() {
    let items = vec![Value::int(1), Value::int(2)];
    assert_eq!(Value::list(items.clone()).to_string(), "[1,2]");
    assert_eq!(Value::sequence(items.clone()).to_string(), "1,2");
    assert_eq!(Value::vector(items, VectorSubtype::Set).to_string(), "set[1,2]");
    assert_eq!(Value::sequence(vec![]).to_string(), "NULL");
    let m = Value::matrix(vec![
        vec![Value::int(1), Value::int(2)],
        vec![Value::int(3), Value::int(4)],
    ]);
    assert_eq!(m.to_string(), "[[1,2],[3,4]]");
}

#[test]
fn prints_sums_and_products() {
    let minus_one = Value::int(-1);
    let x_minus_1 = Value::symbolic_args(BuiltinOp::Add, vec![x(), minus_one]);
    let x_plus_1 = Value::symbolic_args(BuiltinOp::Add, vec![x(), Value::int(1)]);
    assert_eq!(x_minus_1.to_string(), "x-1");
    let product = Value::symbolic_args(BuiltinOp::Mul, vec![x_minus_1, x_plus_1.clone()]);
    assert_eq!(product.to_string(), "(x-1)*(x+1)");

    let half_x = Value::symbolic_args(BuiltinOp::Mul, vec![frac(1, 2), x()]);
    assert_eq!(half_x.to_string(), "x/2");

    let neg_two_x = Value::symbolic_args(BuiltinOp::Mul, vec![Value::int(-2), x()]);
    let sum = Value::symbolic_args(BuiltinOp::Add, vec![Value::int(3), neg_two_x]);
    assert_eq!(sum.to_string(), "3-2*x");

    let quotient = Value::symbolic_args(
        BuiltinOp::Mul,
        vec![x(), Value::symbolic(BuiltinOp::Inv, x_plus_1)],
    );
    assert_eq!(quotient.to_string(), "x/(x+1)");
}

#[test]
fn prints_powers_and_calls() {
    let square = Value::symbolic_args(BuiltinOp::Pow, vec![x(), Value::int(2)]);
    assert_eq!(square.to_string(), "x^2");
    let root = Value::symbolic_args(BuiltinOp::Pow, vec![Value::int(2), frac(1, 2)]);
    assert_eq!(root.to_string(), "sqrt(2)");
    let neg_base = Value::symbolic_args(BuiltinOp::Pow, vec![Value::int(-2), x()]);
    assert_eq!(neg_base.to_string(), "(-2)^x");
    let call = Value::symbolic_args(Operator::user("f"), vec![x(), Value::int(1)]);
    assert_eq!(call.to_string(), "f(x,1)");
    let eq = Value::symbolic_args(BuiltinOp::Equal, vec![x(), Value::int(2)]);
    assert_eq!(eq.to_string(), "x=2");
}

#[test]
fn prints_strings_and_maps() {
    assert_eq!(Value::string("hello world").to_string(), "\"hello world\"");
    assert_eq!(Value::string("a\"b").to_string(), "\"a\\\"b\"");
    let m = Value::map(vec![(Value::int(1), Value::string("a"))]);
    assert_eq!(m.to_string(), "table(1=\"a\")");
}

proptest! {
    #[test]
    fn int_round_trip(n in any::<i64>()) {
        prop_assert_eq!(Value::int(n).to_int(), Ok(n));
    }

    #[test]
    fn bigint_bytes_round_trip(bytes in proptest::collection::vec(any::<u8>(), 0..40), negative in any::<bool>()) {
        let magnitude = num_bigint::BigUint::from_bytes_be(&bytes);
        let sign = if magnitude == num_bigint::BigUint::default() {
            Sign::NoSign
        } else if negative {
            Sign::Minus
        } else {
            Sign::Plus
        };
        let v = Value::bigint(BigInt::from_biguint(sign, magnitude));
        let rebuilt = Value::from_bigint_bytes(&v.bigint_bytes().unwrap(), v.bigint_sign().unwrap()).unwrap();
        prop_assert_eq!(rebuilt, v);
    }

    #[test]
    fn fraction_parts_are_coprime(n in -10_000i64..10_000, d in 1i64..10_000) {
        let v = Value::fraction(Value::int(n), Value::int(d)).unwrap();
        if v.is_fraction() {
            let num = v.num().unwrap().to_int().unwrap();
            let den = v.den().unwrap().to_int().unwrap();
            prop_assert!(den > 1);
            prop_assert_eq!(num_integer::gcd(num, den), 1);
        } else {
            prop_assert_eq!(n % d, 0);
        }
    }

    #[test]
    fn vector_at_matches_insertion_order(items in proptest::collection::vec(any::<i64>(), 0..20), probe in -5i64..25) {
        let v = Value::list(items.iter().copied().map(Value::int).collect());
        for (i, n) in items.iter().enumerate() {
            prop_assert_eq!(v.at(i as i64).unwrap(), Value::int(*n));
        }
        let in_range = usize::try_from(probe).is_ok_and(|p| p < items.len());
        prop_assert_eq!(v.at(probe).is_ok(), in_range);
    }

    #[test]
    fn re_im_of_real_numbers(n in any::<i64>()) {
        let v = Value::int(n);
        prop_assert_eq!(v.re(), v.clone());
        prop_assert_eq!(v.im(), Value::int(0));
    }
}
