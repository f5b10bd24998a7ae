//! Tier 1: operators bound to native handles ahead of time.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use sym_value::{BuiltinOp, Value};

/// A catalog entry: a public name and the builder for its node.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FixedOperator {
    name: &'static str,
    op: BuiltinOp,
}

impl FixedOperator {
    const fn new(name: &'static str, op: BuiltinOp) -> Self {
        FixedOperator { name, op }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn op(&self) -> BuiltinOp {
        self.op
    }

    /// Unevaluated node over `args`; several arguments become one sequence.
    pub fn build(&self, args: &[Value]) -> Value {
        Value::symbolic_args(self.op, args.to_vec())
    }
}

/// The fixed catalog, grouped the way callers think of it.
pub const FIXED_CATALOG: &[FixedOperator] = &[
    // Trigonometry
    FixedOperator::new("sin", BuiltinOp::Sin),
    FixedOperator::new("cos", BuiltinOp::Cos),
    FixedOperator::new("tan", BuiltinOp::Tan),
    FixedOperator::new("asin", BuiltinOp::Asin),
    FixedOperator::new("acos", BuiltinOp::Acos),
    FixedOperator::new("atan", BuiltinOp::Atan),
    // Exponential and logarithm
    FixedOperator::new("exp", BuiltinOp::Exp),
    FixedOperator::new("ln", BuiltinOp::Ln),
    FixedOperator::new("log10", BuiltinOp::Log10),
    FixedOperator::new("sqrt", BuiltinOp::Sqrt),
    // Arithmetic
    FixedOperator::new("abs", BuiltinOp::Abs),
    FixedOperator::new("sign", BuiltinOp::Sign),
    FixedOperator::new("floor", BuiltinOp::Floor),
    FixedOperator::new("ceil", BuiltinOp::Ceil),
    // Complex
    FixedOperator::new("re", BuiltinOp::Re),
    FixedOperator::new("im", BuiltinOp::Im),
    FixedOperator::new("conj", BuiltinOp::Conj),
    // Algebra
    FixedOperator::new("normal", BuiltinOp::Normal),
    FixedOperator::new("evalf", BuiltinOp::Evalf),
    // Calculus
    FixedOperator::new("diff", BuiltinOp::Diff),
    FixedOperator::new("integrate", BuiltinOp::Integrate),
    FixedOperator::new("subst", BuiltinOp::Subst),
    FixedOperator::new("solve", BuiltinOp::Solve),
    FixedOperator::new("limit", BuiltinOp::Limit),
    FixedOperator::new("series", BuiltinOp::Series),
    // Integer and polynomial arithmetic
    FixedOperator::new("gcd", BuiltinOp::Gcd),
    FixedOperator::new("lcm", BuiltinOp::Lcm),
    FixedOperator::new("pow", BuiltinOp::Pow),
];

/// Catalog entry for `name`.
pub fn fixed_operator(name: &str) -> Option<&'static FixedOperator> {
    static INDEX: OnceLock<FxHashMap<&'static str, &'static FixedOperator>> = OnceLock::new();
    INDEX
        .get_or_init(|| FIXED_CATALOG.iter().map(|entry| (entry.name, entry)).collect())
        .get(name)
        .copied()
}
