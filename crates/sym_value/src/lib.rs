//! Tagged algebraic values for the symbolic bridge.
//!
//! `Value` is the closed sum type every other crate in the workspace trades
//! in: parse results, dispatch results and accessor extractions are all
//! `Value`s. The crate also owns the error taxonomy (`SymError`), operator
//! handles (`Operator`, `BuiltinOp`), the type/subtype code tables and the
//! exact number types (`Rational`, `Real`) backing the numeric variants.
//!
//! Nothing here evaluates. Arithmetic, simplification and printing policy
//! beyond the canonical text form live in `sym_kernel`.

mod errors;
mod heap;
mod number;
mod operator;
mod tag;
mod value;

pub use errors::{
    division_by_zero, evaluation, index_out_of_range, invalid_handle, parse_error,
    type_mismatch, unknown_operator, SymError, SymResult,
};
pub use heap::Heap;
pub use number::{Rational, Real};
pub use operator::{BuiltinOp, Operator};
pub use tag::{Tag, VectorSubtype};
pub use value::{ComplexValue, FractionValue, SymbolicValue, Value, VectorValue};

// Re-exported so downstream crates construct big integers with the same type.
pub use num_bigint::{BigInt, Sign};
