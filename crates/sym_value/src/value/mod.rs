//! The tagged algebraic value.
//!
//! # Construction
//!
//! Heap-backed variants can only be built through the factory methods on
//! `Value` (the `Heap<T>` constructor is crate-private). The factories are
//! where the data-model invariants are enforced:
//!
//! - big integers that fit in an `i64` are demoted to `Int`;
//! - fractions are reduced, and a denominator of one yields an integer;
//! - complex parts must be real numbers (no automatic collapse when the
//!   imaginary part is zero).
//!
//! ```text
//! let x = Value::identifier("x");
//! let half = Value::fraction(Value::int(1), Value::int(2))?;
//! let v = Value::list(vec![Value::int(1), half]);
//! ```
//!
//! # Equality
//!
//! `==` is structural: `Int(1)`, `Double(1.0)` and `1/1` are all distinct
//! values, and `x+1` equals `x+1` only if both trees have the same shape.

mod accessors;
mod print;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{ToPrimitive, Zero};

use crate::errors::{evaluation, type_mismatch, SymResult};
use crate::heap::Heap;
use crate::number::{Rational, Real};
use crate::operator::Operator;
use crate::tag::{Tag, VectorSubtype};

/// A dynamically-typed algebraic value.
#[derive(Clone, Debug)]
pub enum Value {
    /// Machine-width integer.
    Int(i64),
    /// IEEE double.
    Double(f64),
    /// Integer outside the `i64` range.
    BigInt(Heap<BigInt>),
    /// Decimal float with its own precision.
    Real(Heap<Real>),
    Complex(Heap<ComplexValue>),
    Fraction(Heap<FractionValue>),
    Vector(VectorValue),
    /// Operator applied to an argument (a sequence vector when n-ary).
    Symbolic(Heap<SymbolicValue>),
    Identifier(Heap<str>),
    Str(Heap<str>),
    /// Ordered key/value table.
    Map(Heap<Vec<(Value, Value)>>),
    Function(Operator),
}

/// `re + im*i` with real-number parts.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexValue {
    pub re: Value,
    pub im: Value,
}

/// `num / den`, integral, coprime, `den > 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct FractionValue {
    pub num: Value,
    pub den: Value,
}

/// Node of an expression tree.
#[derive(Clone, Debug, PartialEq)]
pub struct SymbolicValue {
    pub op: Operator,
    pub arg: Value,
}

/// Elements plus the subtype they are read as.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorValue {
    items: Heap<Vec<Value>>,
    subtype: VectorSubtype,
}

impl VectorValue {
    pub fn items(&self) -> &[Value] {
        &self.items
    }

    pub fn subtype(&self) -> VectorSubtype {
        self.subtype
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Factory methods

impl Value {
    #[inline]
    pub fn int(n: i64) -> Self {
        Value::Int(n)
    }

    #[inline]
    pub fn double(x: f64) -> Self {
        Value::Double(x)
    }

    /// Integer of arbitrary size; demoted to `Int` when it fits.
    pub fn bigint(n: BigInt) -> Self {
        match n.to_i64() {
            Some(small) => Value::Int(small),
            None => Value::BigInt(Heap::new(n)),
        }
    }

    /// Rebuild an integer from big-endian magnitude bytes and a sign in
    /// `{-1, 0, 1}`. Zero is the empty byte string with sign 0.
    pub fn from_bigint_bytes(magnitude: &[u8], sign: i8) -> SymResult<Self> {
        let magnitude = BigUint::from_bytes_be(magnitude);
        let sign = match sign {
            -1 => Sign::Minus,
            1 => Sign::Plus,
            0 if magnitude.is_zero() => Sign::NoSign,
            0 => return Err(evaluation("nonzero magnitude with sign 0")),
            _ => return Err(evaluation(format!("invalid sign {sign}"))),
        };
        if magnitude.is_zero() && sign != Sign::NoSign {
            return Err(evaluation("zero magnitude with nonzero sign"));
        }
        Ok(Value::bigint(BigInt::from_biguint(sign, magnitude)))
    }

    #[inline]
    pub fn real(r: Real) -> Self {
        Value::Real(Heap::new(r))
    }

    /// Complex number from two real-number parts.
    pub fn complex(re: Value, im: Value) -> SymResult<Self> {
        for part in [&re, &im] {
            if !part.is_real_number() {
                return Err(type_mismatch("real number", part.type_name()));
            }
        }
        Ok(Value::Complex(Heap::new(ComplexValue { re, im })))
    }

    /// Reduced fraction of two integers. A unit denominator yields an
    /// integer; a zero denominator is an evaluation error.
    pub fn fraction(num: Value, den: Value) -> SymResult<Self> {
        let n = Rational::from_value(&num)
            .filter(Rational::is_integer)
            .ok_or_else(|| type_mismatch("integer", num.type_name()))?;
        let d = Rational::from_value(&den)
            .filter(Rational::is_integer)
            .ok_or_else(|| type_mismatch("integer", den.type_name()))?;
        n.checked_div(&d)
            .map(Rational::into_value)
            .ok_or_else(crate::errors::division_by_zero)
    }

    /// Already-reduced parts; only `Rational::into_value` calls this.
    pub(crate) fn reduced_fraction(num: Value, den: Value) -> Self {
        Value::Fraction(Heap::new(FractionValue { num, den }))
    }

    pub fn vector(items: Vec<Value>, subtype: VectorSubtype) -> Self {
        Value::Vector(VectorValue {
            items: Heap::new(items),
            subtype,
        })
    }

    pub fn list(items: Vec<Value>) -> Self {
        Value::vector(items, VectorSubtype::List)
    }

    /// Argument sequence; the n-ary calling convention.
    pub fn sequence(items: Vec<Value>) -> Self {
        Value::vector(items, VectorSubtype::Sequence)
    }

    /// Matrix from rows. Rows are plain lists.
    pub fn matrix(rows: Vec<Vec<Value>>) -> Self {
        Value::vector(
            rows.into_iter().map(Value::list).collect(),
            VectorSubtype::Matrix,
        )
    }

    pub fn identifier(name: &str) -> Self {
        Value::Identifier(Heap::from_str(name))
    }

    pub fn string(text: &str) -> Self {
        Value::Str(Heap::from_str(text))
    }

    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        Value::Map(Heap::new(entries))
    }

    pub fn function(op: impl Into<Operator>) -> Self {
        Value::Function(op.into())
    }

    /// Unevaluated node `op(arg)`.
    pub fn symbolic(op: impl Into<Operator>, arg: Value) -> Self {
        Value::Symbolic(Heap::new(SymbolicValue { op: op.into(), arg }))
    }

    /// Unevaluated node over an argument list: a single argument is used as
    /// is, anything else is packed into a sequence.
    pub fn symbolic_args(op: impl Into<Operator>, mut args: Vec<Value>) -> Self {
        let arg = if args.len() == 1 {
            args.swap_remove(0)
        } else {
            Value::sequence(args)
        };
        Value::symbolic(op, arg)
    }
}

// Tags

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Int(_) => Tag::Integer,
            Value::Double(_) => Tag::Double,
            Value::BigInt(_) => Tag::BigInteger,
            Value::Real(_) => Tag::Real,
            Value::Complex(_) => Tag::Complex,
            Value::Fraction(_) => Tag::Fraction,
            Value::Vector(_) => Tag::Vector,
            Value::Symbolic(_) => Tag::Symbolic,
            Value::Identifier(_) => Tag::Identifier,
            Value::Str(_) => Tag::String,
            Value::Map(_) => Tag::Map,
            Value::Function(_) => Tag::Function,
        }
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.tag().type_name()
    }

    /// Integer, big integer, fraction, double or real.
    pub fn is_real_number(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::BigInt(_) | Value::Fraction(_) | Value::Double(_) | Value::Real(_)
        )
    }

    /// Any numeric literal, complex numbers included.
    pub fn is_number(&self) -> bool {
        self.is_real_number() || matches!(self, Value::Complex(_))
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::Fraction(a), Value::Fraction(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Symbolic(a), Value::Symbolic(b)) => a == b,
            (Value::Identifier(a), Value::Identifier(b)) | (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Double(x)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::bigint(n)
    }
}

impl From<Rational> for Value {
    fn from(q: Rational) -> Self {
        q.into_value()
    }
}

#[cfg(test)]
mod tests;
