//! Operator dispatch: applying a named operator to argument values.
//!
//! # Resolution Order
//!
//! Names are resolved by an ordered chain of resolvers:
//! 1. `FixedCatalogResolver`: the fixed catalog of pre-bound handles
//! 2. `RuntimeLookupResolver`: any name the kernel's operator table knows
//! 3. `StringFallbackResolver`: everything else, by printing the arguments
//!    into `name(a,b,...)` text and evaluating it
//!
//! The first two build the operator node directly over the argument values,
//! so no argument is ever printed or parsed. The fallback is what reaches
//! user-defined functions and names the kernel does not know, at the cost of
//! a text round trip.

mod catalog;

use std::fmt;
use std::sync::OnceLock;

use sym_kernel::parse;
use sym_value::{unknown_operator, BuiltinOp, SymResult, Value};

pub use catalog::{fixed_operator, FixedOperator, FIXED_CATALOG};

use crate::context::EvaluationContext;

/// Which strategy applied an operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DispatchTier {
    Fixed,
    Runtime,
    Fallback,
}

impl fmt::Display for DispatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DispatchTier::Fixed => "tier 1 (fixed catalog)",
            DispatchTier::Runtime => "tier 2 (runtime lookup)",
            DispatchTier::Fallback => "tier 3 (string fallback)",
        })
    }
}

/// What a resolver found for a name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// A catalog entry with its prepared builder.
    Fixed(&'static FixedOperator),
    /// A handle resolved from the kernel's operator table.
    Handle(BuiltinOp),
    /// No handle; go through expression text.
    Text,
    /// Not handled by this resolver.
    NotFound,
}

/// One strategy in the resolution chain.
pub trait OperatorResolver {
    fn resolve(&self, name: &str) -> Resolution;

    fn tier(&self) -> DispatchTier;

    /// Human-readable name, for logs.
    fn name(&self) -> &'static str;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct FixedCatalogResolver;

impl OperatorResolver for FixedCatalogResolver {
    fn resolve(&self, name: &str) -> Resolution {
        fixed_operator(name).map_or(Resolution::NotFound, Resolution::Fixed)
    }

    fn tier(&self) -> DispatchTier {
        DispatchTier::Fixed
    }

    fn name(&self) -> &'static str {
        "FixedCatalogResolver"
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct RuntimeLookupResolver;

impl OperatorResolver for RuntimeLookupResolver {
    fn resolve(&self, name: &str) -> Resolution {
        BuiltinOp::from_name(name).map_or(Resolution::NotFound, Resolution::Handle)
    }

    fn tier(&self) -> DispatchTier {
        DispatchTier::Runtime
    }

    fn name(&self) -> &'static str {
        "RuntimeLookupResolver"
    }
}

#[derive(Copy, Clone, Debug, Default)]
pub struct StringFallbackResolver;

impl OperatorResolver for StringFallbackResolver {
    fn resolve(&self, _name: &str) -> Resolution {
        Resolution::Text
    }

    fn tier(&self) -> DispatchTier {
        DispatchTier::Fallback
    }

    fn name(&self) -> &'static str {
        "StringFallbackResolver"
    }
}

/// The fixed set of resolvers, as an enum rather than trait objects.
#[derive(Copy, Clone, Debug)]
pub enum OperatorResolverKind {
    Fixed(FixedCatalogResolver),
    Runtime(RuntimeLookupResolver),
    Fallback(StringFallbackResolver),
}

impl OperatorResolverKind {
    pub fn resolve(&self, name: &str) -> Resolution {
        match self {
            Self::Fixed(r) => r.resolve(name),
            Self::Runtime(r) => r.resolve(name),
            Self::Fallback(r) => r.resolve(name),
        }
    }

    pub fn tier(&self) -> DispatchTier {
        match self {
            Self::Fixed(r) => r.tier(),
            Self::Runtime(r) => r.tier(),
            Self::Fallback(r) => r.tier(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed(r) => r.name(),
            Self::Runtime(r) => r.name(),
            Self::Fallback(r) => r.name(),
        }
    }
}

/// Chains resolvers and tries them in tier order until one handles the name.
#[derive(Clone, Debug)]
pub struct Dispatcher {
    resolvers: Vec<OperatorResolverKind>,
}

impl Dispatcher {
    pub fn new(mut resolvers: Vec<OperatorResolverKind>) -> Self {
        resolvers.sort_by_key(OperatorResolverKind::tier);
        Dispatcher { resolvers }
    }

    /// All three tiers.
    pub fn standard() -> Self {
        Dispatcher::new(vec![
            OperatorResolverKind::Fixed(FixedCatalogResolver),
            OperatorResolverKind::Runtime(RuntimeLookupResolver),
            OperatorResolverKind::Fallback(StringFallbackResolver),
        ])
    }

    /// First resolution any resolver produces, with the tier it came from.
    pub fn resolve(&self, name: &str) -> Option<(DispatchTier, Resolution)> {
        self.resolvers.iter().find_map(|resolver| match resolver.resolve(name) {
            Resolution::NotFound => None,
            found => {
                tracing::debug!(name, resolver = resolver.name(), tier = %resolver.tier(), "operator resolved");
                Some((resolver.tier(), found))
            }
        })
    }

    pub fn apply(&self, ctx: &mut EvaluationContext, name: &str, args: &[Value]) -> SymResult<Value> {
        match self.resolve(name) {
            Some((_, Resolution::Fixed(entry))) => ctx.evaluate(&entry.build(args)),
            Some((_, Resolution::Handle(op))) => ctx.evaluate(&runtime_node(op, args)),
            Some((_, Resolution::Text)) => apply_text(ctx, name, args),
            Some((_, Resolution::NotFound)) | None => Err(unknown_operator(name)),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::standard()
    }
}

/// Node for a runtime-resolved handle. More than one argument is packed into
/// a single sequence, the n-ary calling convention.
fn runtime_node(op: BuiltinOp, args: &[Value]) -> Value {
    let arg = match args {
        [single] => single.clone(),
        many => Value::sequence(many.to_vec()),
    };
    Value::symbolic(op, arg)
}

/// `name(arg1,arg2,...)` from printed arguments, parsed and evaluated.
///
/// Finite doubles print in a form that parses back to the same double.
/// Infinite and NaN doubles come back as the `infinity` and `undef` symbols.
fn apply_text(ctx: &mut EvaluationContext, name: &str, args: &[Value]) -> SymResult<Value> {
    let printed: Vec<String> = args.iter().map(ToString::to_string).collect();
    let text = format!("{name}({})", printed.join(","));
    tracing::trace!(%text, "string fallback");
    ctx.eval(&text)
}

/// Apply `name` through the full resolution chain.
pub fn apply(ctx: &mut EvaluationContext, name: &str, args: &[Value]) -> SymResult<Value> {
    static STANDARD: OnceLock<Dispatcher> = OnceLock::new();
    STANDARD.get_or_init(Dispatcher::standard).apply(ctx, name, args)
}

/// Apply a fixed-catalog operator; other names are unknown here.
pub fn apply_fixed(ctx: &mut EvaluationContext, name: &str, args: &[Value]) -> SymResult<Value> {
    let entry = fixed_operator(name).ok_or_else(|| unknown_operator(name))?;
    ctx.evaluate(&entry.build(args))
}

/// Apply through runtime lookup only, skipping the catalog and the fallback.
pub fn apply_runtime(ctx: &mut EvaluationContext, name: &str, args: &[Value]) -> SymResult<Value> {
    let op = BuiltinOp::from_name(name).ok_or_else(|| unknown_operator(name))?;
    ctx.evaluate(&runtime_node(op, args))
}

/// Build `name(args)` without evaluating it.
///
/// The infix names `+ - * / ^` map to the canonical node forms: binary `-`
/// is a sum with a negated second term and `/` a product with an inverted
/// second factor. `+` and `*` need at least one argument, `^` exactly two
/// and `-` or `/` one or two. Other names must resolve to a kernel operator.
pub fn make_symbolic_unevaluated(name: &str, args: &[Value]) -> SymResult<Value> {
    let node = match (name, args) {
        ("+", [_, ..]) => Value::symbolic_args(BuiltinOp::Add, args.to_vec()),
        ("*", [_, ..]) => Value::symbolic_args(BuiltinOp::Mul, args.to_vec()),
        ("^", [_, _]) => Value::symbolic_args(BuiltinOp::Pow, args.to_vec()),
        ("-", [operand]) => Value::symbolic(BuiltinOp::Neg, operand.clone()),
        ("-", [lhs, rhs]) => Value::symbolic_args(
            BuiltinOp::Add,
            vec![lhs.clone(), Value::symbolic(BuiltinOp::Neg, rhs.clone())],
        ),
        ("/", [operand]) => Value::symbolic(BuiltinOp::Inv, operand.clone()),
        ("/", [lhs, rhs]) => Value::symbolic_args(
            BuiltinOp::Mul,
            vec![lhs.clone(), Value::symbolic(BuiltinOp::Inv, rhs.clone())],
        ),
        ("+" | "*" | "^" | "-" | "/", _) => return Err(unknown_operator(format!("{name}/{}", args.len()))),
        _ => {
            let op = BuiltinOp::from_name(name).ok_or_else(|| unknown_operator(name))?;
            runtime_node(op, args)
        }
    };
    Ok(node)
}

impl EvaluationContext {
    /// Apply `name` through the full resolution chain in this context.
    pub fn apply(&mut self, name: &str, args: &[Value]) -> SymResult<Value> {
        apply(self, name, args)
    }
}

/// Parse `text` into a value without evaluating it.
pub fn parse_value(text: &str) -> SymResult<Value> {
    parse(text)
}

#[cfg(test)]
mod tests;
