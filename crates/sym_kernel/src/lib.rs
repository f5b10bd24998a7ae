//! Symbolic kernel: the engine behind every evaluation context.
//!
//! This crate turns expression text into `Value` trees and evaluates them:
//!
//! - **Parsing**: a `logos` lexer and a recursive-descent parser
//!   (`parse`, `parse_program`)
//! - **Evaluation**: bottom-up tree walking with per-context bindings and
//!   user functions (`Evaluator`, `evaluate`, `eval_text`)
//! - **Canonical arithmetic**: flattened sums and products with like terms
//!   collected (`arith`, `order`)
//! - **Algebra**: `expand`, `normal`, `simplify`, `factor`, `gcd`/`lcm`
//! - **Calculus**: `diff`, `integrate`, `limit`, `series`
//! - **Equations**: `solve` for linear and univariate polynomial equations
//!
//! # Architecture
//!
//! All mutable state for one context lives in a `KernelState`; nothing in
//! this crate is global. Builtins receive already-evaluated arguments and
//! their results are not evaluated again. Approximate numbers use `f64`
//! up to 15 significant digits and fixed-point `Real`s above that.

pub mod algebra;
pub mod arith;
mod builtins;
pub mod calculus;
pub mod eval;
pub mod expr;
mod functions;
mod hp;
pub mod integer;
mod lexer;
pub mod numeric;
pub mod operators;
pub mod order;
pub mod parser;
pub mod poly;
pub mod solve;
pub mod stack;
pub mod state;

pub use algebra::{expand, factor, normal, simplify};
pub use eval::{eval_text, evaluate, Evaluator};
pub use operators::{evaluate_binary, evaluate_unary, BinaryOp, UnaryOp};
pub use parser::{parse, parse_program};
pub use state::{Binding, ContextConfig, KernelState, DEFAULT_PRECISION, DEFAULT_TIMEOUT_SECS};

/// Version of the kernel crate.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
