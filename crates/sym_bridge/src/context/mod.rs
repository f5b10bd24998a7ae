//! Evaluation contexts.
//!
//! A context owns one isolated kernel environment: variable bindings, user
//! functions, numeric precision, complex mode, the advisory timeout and an
//! optional warning handler. Contexts never share state, so concurrent work
//! uses one context per thread. A context can move between threads but is
//! not `Sync` and not `Clone`.
//!
//! # Lifetime
//!
//! The kernel state lives in a process-wide arena slot that is never
//! released. Dropping a context clears its bindings; the slot stays.

mod arena;

use std::cell::Cell;
use std::marker::PhantomData;

use sym_kernel::{eval_text, evaluate, BinaryOp, Binding, ContextConfig, KernelState, UnaryOp};
use sym_value::{evaluation, BuiltinOp, Operator, SymError, SymResult, Value};

pub use arena::{allocated_slots, ContextId};
use arena::StateSlot;

use crate::library;

/// Most significant digits a context accepts.
pub const MAX_PRECISION: u32 = 1000;

/// Receives non-fatal kernel diagnostics.
pub type WarningHandler = Box<dyn FnMut(&str) + Send>;

pub struct EvaluationContext {
    id: ContextId,
    state: StateSlot,
    warning_handler: Option<WarningHandler>,
    _not_sync: PhantomData<Cell<()>>,
}

impl EvaluationContext {
    pub fn new() -> Self {
        Self::with_config(ContextConfig::default())
    }

    pub fn with_config(config: ContextConfig) -> Self {
        library::library();
        let (id, state) = arena::allocate(config);
        EvaluationContext {
            id,
            state,
            warning_handler: None,
            _not_sync: PhantomData,
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Run `f` against the kernel state, then hand any warnings it raised to
    /// the handler (or the log when no handler is set).
    pub(crate) fn with_state<R>(&mut self, f: impl FnOnce(&mut KernelState) -> SymResult<R>) -> SymResult<R> {
        let (result, warnings) = {
            let mut state = self.state.lock();
            let result = f(&mut *state);
            (result, state.take_warnings())
        };
        for message in warnings {
            match &mut self.warning_handler {
                Some(handler) => handler(&message),
                None => tracing::warn!(context = %self.id, %message, "kernel warning"),
            }
        }
        result
    }

    // Evaluation

    /// Parse and evaluate `;`-separated statements, returning the value of
    /// the last. Parse failures are reported as evaluation errors carrying
    /// the parser's diagnostic.
    pub fn eval(&mut self, text: &str) -> SymResult<Value> {
        self.with_state(|state| eval_text(state, text))
            .map_err(|error| match error {
                SymError::Parse { .. } => evaluation(error.to_string()),
                other => other,
            })
    }

    /// `eval` followed by printing.
    pub fn eval_to_string(&mut self, text: &str) -> SymResult<String> {
        self.eval(text).map(|value| value.to_string())
    }

    /// Evaluate an already-built value in this context.
    pub fn evaluate(&mut self, value: &Value) -> SymResult<Value> {
        self.with_state(|state| evaluate(state, value))
    }

    pub(crate) fn evaluate_call(&mut self, op: BuiltinOp, value: &Value) -> SymResult<Value> {
        self.evaluate(&Value::symbolic(op, value.clone()))
    }

    pub fn simplify(&mut self, value: &Value) -> SymResult<Value> {
        self.evaluate_call(BuiltinOp::Simplify, value)
    }

    pub fn expand(&mut self, value: &Value) -> SymResult<Value> {
        self.evaluate_call(BuiltinOp::Expand, value)
    }

    pub fn factor(&mut self, value: &Value) -> SymResult<Value> {
        self.evaluate_call(BuiltinOp::Factor, value)
    }

    /// `lhs op rhs`; machine numbers mix in through `Value::from`.
    pub fn evaluate_binary(&mut self, op: BinaryOp, lhs: impl Into<Value>, rhs: impl Into<Value>) -> SymResult<Value> {
        let (lhs, rhs) = (lhs.into(), rhs.into());
        self.with_state(|state| sym_kernel::evaluate_binary(state, op, lhs, rhs))
    }

    pub fn evaluate_unary(&mut self, op: UnaryOp, operand: impl Into<Value>) -> SymResult<Value> {
        let operand = operand.into();
        self.with_state(|state| sym_kernel::evaluate_unary(state, op, operand))
    }

    // Variables

    /// Evaluate `text` and bind the result to `name` in this context only.
    pub fn set_variable(&mut self, name: &str, text: &str) -> SymResult<()> {
        check_variable_name(name)?;
        let value = self.eval(text)?;
        self.state.lock().bind(name, value);
        Ok(())
    }

    /// Bind an existing value without evaluating it again.
    pub fn set_variable_value(&mut self, name: &str, value: Value) -> SymResult<()> {
        check_variable_name(name)?;
        self.state.lock().bind(name, value);
        Ok(())
    }

    /// The bound value, or the bare identifier when `name` is unbound.
    pub fn get_variable(&self, name: &str) -> Value {
        match self.state.lock().lookup(name) {
            Some(Binding::Value(value)) => value.clone(),
            Some(Binding::Function { .. }) => Value::function(Operator::user(name)),
            None => Value::identifier(name),
        }
    }

    /// Remove a binding; true when one existed.
    pub fn unset_variable(&mut self, name: &str) -> bool {
        self.state.lock().unbind(name)
    }

    // Configuration

    pub fn config(&self) -> ContextConfig {
        self.state.lock().config().clone()
    }

    pub fn precision(&self) -> u32 {
        self.state.lock().config().precision
    }

    pub fn set_precision(&mut self, digits: u32) -> SymResult<()> {
        if !(1..=MAX_PRECISION).contains(&digits) {
            return Err(evaluation(format!("precision must be between 1 and {MAX_PRECISION}, got {digits}")));
        }
        self.state.lock().config_mut().precision = digits;
        Ok(())
    }

    pub fn is_complex_mode(&self) -> bool {
        self.state.lock().config().complex_mode
    }

    pub fn set_complex_mode(&mut self, enabled: bool) {
        self.state.lock().config_mut().complex_mode = enabled;
    }

    /// Advisory time limit in seconds; `0` means none.
    pub fn timeout(&self) -> f64 {
        self.state.lock().config().timeout_secs
    }

    pub fn set_timeout(&mut self, secs: f64) -> SymResult<()> {
        if !secs.is_finite() || secs < 0.0 {
            return Err(evaluation(format!("timeout must be a non-negative number of seconds, got {secs}")));
        }
        self.state.lock().config_mut().timeout_secs = secs;
        Ok(())
    }

    pub fn set_warning_handler(&mut self, handler: impl FnMut(&str) + Send + 'static) {
        self.warning_handler = Some(Box::new(handler));
    }

    pub fn clear_warning_handler(&mut self) {
        self.warning_handler = None;
    }

    pub fn has_warning_handler(&self) -> bool {
        self.warning_handler.is_some()
    }
}

impl Default for EvaluationContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EvaluationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluationContext")
            .field("id", &self.id)
            .field("config", &self.config())
            .field("warning_handler", &self.warning_handler.is_some())
            .finish()
    }
}

impl Drop for EvaluationContext {
    fn drop(&mut self) {
        // The slot stays allocated; only its contents go.
        let mut state = self.state.lock();
        let config = state.config().clone();
        *state = KernelState::new(config);
        tracing::debug!(context = %self.id, "context released, slot retained");
    }
}

fn check_variable_name(name: &str) -> SymResult<()> {
    match sym_kernel::parse(name) {
        Ok(Value::Identifier(_)) => Ok(()),
        _ => Err(evaluation(format!("`{name}` is not a variable name"))),
    }
}

/// Bindings currently held in the slot for `id`.
pub fn bindings_in(id: ContextId) -> Option<usize> {
    arena::slot(id).map(|slot| slot.lock().binding_count())
}

#[cfg(test)]
mod tests;
