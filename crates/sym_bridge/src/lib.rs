//! Bridge between host code and the symbolic kernel.
//!
//! This crate is the surface callers use:
//!
//! - **Evaluation contexts**: isolated bindings and configuration
//!   (`EvaluationContext`)
//! - **Dispatch**: applying named operators through a fixed catalog, runtime
//!   lookup, or a text fallback (`apply`, `apply_fixed`, `apply_runtime`,
//!   `make_symbolic_unevaluated`)
//! - **Heap handles**: parking values behind opaque ids (`HeapHandleBridge`)
//! - **Listings**: builtin and documented function names (`DocCatalog`)
//! - **Library setup**: one-time initialization, availability probe,
//!   versions and logging (`is_available`, `init_tracing`)
//!
//! # Architecture
//!
//! Values are `sym_value::Value`, re-exported here. Every operation that
//! evaluates goes through an `EvaluationContext`; there is no ambient
//! current context. Context state lives in a process-wide arena whose slots
//! are never freed, so nothing can outlive the state it was produced under.

mod context;
mod dispatch;
mod handle;
mod library;
mod listing;

pub use context::{allocated_slots, bindings_in, ContextId, EvaluationContext, WarningHandler, MAX_PRECISION};
pub use dispatch::{
    apply, apply_fixed, apply_runtime, fixed_operator, make_symbolic_unevaluated, parse_value, DispatchTier,
    Dispatcher, FixedCatalogResolver, FixedOperator, OperatorResolver, OperatorResolverKind, Resolution,
    RuntimeLookupResolver, StringFallbackResolver, FIXED_CATALOG,
};
pub use handle::{HeapHandle, HeapHandleBridge};
pub use library::{bridge_version, init_tracing, is_available, is_initialized, kernel_version, library, Library};
pub use listing::{all_function_names, builtin_function_count, builtin_function_names, DocCatalog};

pub use sym_kernel::{BinaryOp, ContextConfig, UnaryOp};
pub use sym_value::{BigInt, BuiltinOp, Operator, SymError, SymResult, Tag, Value, VectorSubtype};
