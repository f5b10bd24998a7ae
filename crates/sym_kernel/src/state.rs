//! Per-context kernel state: bindings, configuration and pending warnings.

use rustc_hash::FxHashMap;
use sym_value::Value;

/// Default significant digits for approximate results.
pub const DEFAULT_PRECISION: u32 = 15;

/// Default advisory evaluation time limit, in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Evaluation settings owned by one context.
#[derive(Clone, Debug, PartialEq)]
pub struct ContextConfig {
    /// Significant digits used by `evalf` and approximate arithmetic.
    pub precision: u32,
    /// Whether `solve`, `sqrt` and friends may produce complex results.
    pub complex_mode: bool,
    /// Advisory limit in seconds; `0` disables the check. Overruns are
    /// reported as warnings, never enforced.
    pub timeout_secs: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        ContextConfig {
            precision: DEFAULT_PRECISION,
            complex_mode: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// What a name is bound to.
#[derive(Clone, Debug, PartialEq)]
pub enum Binding {
    /// An evaluated value (`a := 5`).
    Value(Value),
    /// A user function (`f(x) := x^2`); the body is stored unevaluated.
    Function { params: Vec<String>, body: Value },
}

/// Mutable state behind one evaluation context.
#[derive(Debug, Default)]
pub struct KernelState {
    bindings: FxHashMap<String, Binding>,
    config: ContextConfig,
    warnings: Vec<String>,
}

impl KernelState {
    pub fn new(config: ContextConfig) -> Self {
        KernelState {
            bindings: FxHashMap::default(),
            config,
            warnings: Vec::new(),
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ContextConfig {
        &mut self.config
    }

    pub fn bind(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_owned(), Binding::Value(value));
    }

    pub fn define_function(&mut self, name: &str, params: Vec<String>, body: Value) {
        self.bindings
            .insert(name.to_owned(), Binding::Function { params, body });
    }

    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        self.bindings.get(name)
    }

    /// Remove a binding; returns whether one existed.
    pub fn unbind(&mut self, name: &str) -> bool {
        self.bindings.remove(name).is_some()
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Drain warnings raised since the last call.
    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}
