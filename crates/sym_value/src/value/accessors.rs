//! Typed accessors and predicates.
//!
//! Every accessor either returns the requested view or fails with
//! `TypeMismatch`/`IndexOutOfRange`; nothing coerces across tags. The two
//! documented exceptions are total: `re`/`im` accept any value and
//! `num`/`den` accept integers as well as fractions.

use num_bigint::{BigInt, Sign};
use num_traits::{Signed, Zero};

use super::{Value, VectorValue};
use crate::errors::{index_out_of_range, type_mismatch, SymResult};
use crate::number::Real;
use crate::operator::Operator;
use crate::tag::VectorSubtype;

// Numeric extraction

impl Value {
    /// The machine integer of an `Int`.
    pub fn to_int(&self) -> SymResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(type_mismatch("integer", other.type_name())),
        }
    }

    /// The double of a `Double`.
    pub fn to_double(&self) -> SymResult<f64> {
        match self {
            Value::Double(x) => Ok(*x),
            other => Err(type_mismatch("double", other.type_name())),
        }
    }

    /// Arbitrary-precision view of an `Int` or `BigInt`.
    pub fn to_bigint(&self) -> SymResult<BigInt> {
        match self {
            Value::Int(n) => Ok(BigInt::from(*n)),
            Value::BigInt(n) => Ok((**n).clone()),
            other => Err(type_mismatch("bigint", other.type_name())),
        }
    }

    /// Sign of an integer as -1, 0 or 1.
    pub fn bigint_sign(&self) -> SymResult<i8> {
        Ok(match self.to_bigint()?.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        })
    }

    /// Big-endian magnitude bytes; empty for zero.
    pub fn bigint_bytes(&self) -> SymResult<Vec<u8>> {
        let n = self.to_bigint()?;
        if n.is_zero() {
            return Ok(Vec::new());
        }
        Ok(n.magnitude().to_bytes_be())
    }

    /// Decimal digits of an integer.
    pub fn bigint_string(&self) -> SymResult<String> {
        self.to_bigint().map(|n| n.to_str_radix(10))
    }

    pub fn real_value(&self) -> SymResult<&Real> {
        match self {
            Value::Real(r) => Ok(r),
            other => Err(type_mismatch("real", other.type_name())),
        }
    }
}

// Complex and fraction parts (total)

impl Value {
    /// Real part; any non-complex value is its own real part.
    pub fn re(&self) -> Value {
        match self {
            Value::Complex(c) => c.re.clone(),
            other => other.clone(),
        }
    }

    /// Imaginary part; integer zero for any non-complex value.
    pub fn im(&self) -> Value {
        match self {
            Value::Complex(c) => c.im.clone(),
            _ => Value::Int(0),
        }
    }

    /// Numerator of a fraction, or the integer itself.
    pub fn num(&self) -> SymResult<Value> {
        match self {
            Value::Fraction(f) => Ok(f.num.clone()),
            Value::Int(_) | Value::BigInt(_) => Ok(self.clone()),
            other => Err(type_mismatch("fraction", other.type_name())),
        }
    }

    /// Denominator of a fraction, or 1 for an integer.
    pub fn den(&self) -> SymResult<Value> {
        match self {
            Value::Fraction(f) => Ok(f.den.clone()),
            Value::Int(_) | Value::BigInt(_) => Ok(Value::Int(1)),
            other => Err(type_mismatch("fraction", other.type_name())),
        }
    }
}

// Vectors

impl Value {
    pub fn as_vector(&self) -> SymResult<&VectorValue> {
        match self {
            Value::Vector(v) => Ok(v),
            other => Err(type_mismatch("vector", other.type_name())),
        }
    }

    pub fn subtype(&self) -> SymResult<VectorSubtype> {
        self.as_vector().map(VectorValue::subtype)
    }

    pub fn size(&self) -> SymResult<usize> {
        self.as_vector().map(VectorValue::len)
    }

    /// Element `index`, 0-based. Negative indices are out of range.
    pub fn at(&self, index: i64) -> SymResult<Value> {
        let v = self.as_vector()?;
        usize::try_from(index)
            .ok()
            .and_then(|i| v.items().get(i))
            .cloned()
            .ok_or_else(|| index_out_of_range(index, v.len()))
    }

    /// Elements of a vector as a slice.
    pub fn items(&self) -> SymResult<&[Value]> {
        self.as_vector().map(VectorValue::items)
    }

    /// True for a vector with the given subtype.
    pub fn is_vector_of(&self, subtype: VectorSubtype) -> bool {
        matches!(self, Value::Vector(v) if v.subtype() == subtype)
    }
}

// Symbolic nodes

impl Value {
    pub fn operator(&self) -> SymResult<&Operator> {
        match self {
            Value::Symbolic(s) => Ok(&s.op),
            other => Err(type_mismatch("symbolic", other.type_name())),
        }
    }

    pub fn operator_name(&self) -> SymResult<&str> {
        self.operator().map(Operator::name)
    }

    /// The node's single argument (a sequence for n-ary operators).
    pub fn argument(&self) -> SymResult<Value> {
        match self {
            Value::Symbolic(s) => Ok(s.arg.clone()),
            other => Err(type_mismatch("symbolic", other.type_name())),
        }
    }

    /// The node's arguments, unpacking a sequence argument.
    pub fn arguments(&self) -> SymResult<Vec<Value>> {
        let arg = self.argument()?;
        Ok(match &arg {
            Value::Vector(v) if v.subtype() == VectorSubtype::Sequence => v.items().to_vec(),
            _ => vec![arg],
        })
    }
}

// Names, strings, maps, functions

impl Value {
    pub fn ident_name(&self) -> SymResult<&str> {
        match self {
            Value::Identifier(name) => Ok(name),
            other => Err(type_mismatch("identifier", other.type_name())),
        }
    }

    pub fn string_value(&self) -> SymResult<&str> {
        match self {
            Value::Str(text) => Ok(text),
            other => Err(type_mismatch("string", other.type_name())),
        }
    }

    pub fn function_name(&self) -> SymResult<&str> {
        match self {
            Value::Function(op) => Ok(op.name()),
            other => Err(type_mismatch("function", other.type_name())),
        }
    }

    pub fn map_entries(&self) -> SymResult<&[(Value, Value)]> {
        match self {
            Value::Map(entries) => Ok(entries),
            other => Err(type_mismatch("map", other.type_name())),
        }
    }

    pub fn map_len(&self) -> SymResult<usize> {
        self.map_entries().map(<[_]>::len)
    }

    pub fn map_keys(&self) -> SymResult<Vec<Value>> {
        Ok(self.map_entries()?.iter().map(|(k, _)| k.clone()).collect())
    }

    pub fn map_values(&self) -> SymResult<Vec<Value>> {
        Ok(self.map_entries()?.iter().map(|(_, v)| v.clone()).collect())
    }

    /// Value stored under `key`, compared structurally.
    pub fn map_get(&self, key: &Value) -> SymResult<Option<Value>> {
        Ok(self
            .map_entries()?
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone()))
    }
}

// Predicates

impl Value {
    /// Exact zero test: integer 0, a zero double or real, or a complex with
    /// both parts zero.
    pub fn is_zero(&self) -> bool {
        match self {
            Value::Int(n) => *n == 0,
            Value::Double(x) => *x == 0.0,
            Value::Real(r) => r.is_zero(),
            Value::Complex(c) => c.re.is_zero() && c.im.is_zero(),
            _ => false,
        }
    }

    /// Exact unit test, no tolerance: `0.9999999999999999` is not one.
    #[allow(clippy::float_cmp)]
    pub fn is_one(&self) -> bool {
        match self {
            Value::Int(n) => *n == 1,
            Value::Double(x) => *x == 1.0,
            Value::Real(r) => r.is_one(),
            Value::Complex(c) => c.re.is_one() && c.im.is_zero(),
            _ => false,
        }
    }

    /// True when the value is a negative real number.
    pub fn is_negative_number(&self) -> bool {
        match self {
            Value::Int(n) => *n < 0,
            Value::BigInt(n) => n.is_negative(),
            Value::Double(x) => *x < 0.0,
            Value::Real(r) => r.is_negative(),
            Value::Fraction(f) => f.num.is_negative_number(),
            _ => false,
        }
    }

    pub fn is_minus_one(&self) -> bool {
        matches!(self, Value::Int(-1))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_) | Value::BigInt(_))
    }

    /// Integer, double, big integer or real. Fractions and complex numbers
    /// are deliberately excluded.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Double(_) | Value::BigInt(_) | Value::Real(_)
        )
    }

    /// Approximate (floating) number, or a complex with an approximate part.
    pub fn is_approx(&self) -> bool {
        match self {
            Value::Double(_) | Value::Real(_) => true,
            Value::Complex(c) => c.re.is_approx() || c.im.is_approx(),
            _ => false,
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Value::Vector(_))
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, Value::Symbolic(_))
    }

    pub fn is_identifier(&self) -> bool {
        matches!(self, Value::Identifier(_))
    }

    pub fn is_fraction(&self) -> bool {
        matches!(self, Value::Fraction(_))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Value::Complex(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }
}
