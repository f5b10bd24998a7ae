//! Tree-walking evaluator.
//!
//! Evaluation is bottom-up: arguments are evaluated first, then the node's
//! operator is applied to them. Identifiers resolve through the context's
//! bindings; an unbound identifier evaluates to itself. Results of builtin
//! operators are returned as produced and are not evaluated again, so raw
//! forms such as `factor`'s product survive.

use std::time::Instant;

use smallvec::SmallVec;
use sym_value::{evaluation, BuiltinOp, Operator, SymResult, Value, VectorSubtype};

use crate::builtins;
use crate::expr::substitute_all;
use crate::order::operands;
use crate::parser::parse_program;
use crate::stack::ensure_sufficient_stack;
use crate::state::{Binding, KernelState};

/// Nested user-function calls allowed before evaluation gives up.
const MAX_CALL_DEPTH: usize = 256;

/// Evaluates value trees against one context's state.
pub struct Evaluator<'s> {
    state: &'s mut KernelState,
    /// Identifiers currently being resolved, to cut `a := a + 1` cycles.
    resolving: SmallVec<[String; 4]>,
    call_depth: usize,
}

impl<'s> Evaluator<'s> {
    pub fn new(state: &'s mut KernelState) -> Self {
        Evaluator {
            state,
            resolving: SmallVec::new(),
            call_depth: 0,
        }
    }

    /// Significant digits for approximate results.
    pub fn precision(&self) -> u32 {
        self.state.config().precision
    }

    pub fn complex_mode(&self) -> bool {
        self.state.config().complex_mode
    }

    /// Record a non-fatal diagnostic.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(%message, "kernel warning");
        self.state.warn(message);
    }

    pub fn eval(&mut self, expr: &Value) -> SymResult<Value> {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    /// Apply a builtin to already-evaluated arguments.
    pub fn call(&mut self, op: BuiltinOp, args: Vec<Value>) -> SymResult<Value> {
        builtins::apply(self, op, args)
    }

    fn eval_inner(&mut self, expr: &Value) -> SymResult<Value> {
        match expr {
            Value::Identifier(name) => self.eval_identifier(name),
            Value::Vector(v) => {
                let mut items = Vec::with_capacity(v.len());
                for item in v.items() {
                    let value = self.eval(item)?;
                    // Sequences splice into an enclosing sequence.
                    match value {
                        Value::Vector(inner)
                            if v.subtype() == VectorSubtype::Sequence
                                && inner.subtype() == VectorSubtype::Sequence =>
                        {
                            items.extend(inner.items().iter().cloned());
                        }
                        other => items.push(other),
                    }
                }
                Ok(Value::vector(items, v.subtype()))
            }
            Value::Map(entries) => {
                let mut out = Vec::with_capacity(entries.len());
                for (k, v) in entries.iter() {
                    out.push((self.eval(k)?, self.eval(v)?));
                }
                Ok(Value::map(out))
            }
            Value::Symbolic(s) => match &s.op {
                Operator::Builtin(BuiltinOp::Store) => self.store(&operands(expr)),
                Operator::Builtin(op) => {
                    let args = self.eval_args(&s.arg)?;
                    self.call(*op, args)
                }
                Operator::User(name) => {
                    let args = self.eval_args(&s.arg)?;
                    self.call_user(name, args)
                }
            },
            other => Ok(other.clone()),
        }
    }

    fn eval_args(&mut self, arg: &Value) -> SymResult<Vec<Value>> {
        match arg {
            Value::Vector(v) if v.subtype() == VectorSubtype::Sequence => {
                v.items().iter().map(|item| self.eval(item)).collect()
            }
            single => Ok(vec![self.eval(single)?]),
        }
    }

    fn eval_identifier(&mut self, name: &str) -> SymResult<Value> {
        if self.resolving.iter().any(|n| n == name) {
            return Ok(Value::identifier(name));
        }
        match self.state.lookup(name) {
            None => Ok(Value::identifier(name)),
            Some(Binding::Function { .. }) => Ok(Value::function(Operator::user(name))),
            Some(Binding::Value(bound)) => {
                let bound = bound.clone();
                self.resolving.push(name.to_owned());
                let result = self.eval(&bound);
                self.resolving.pop();
                result
            }
        }
    }

    /// `name := value` binds; `f(x, y) := body` defines a function.
    fn store(&mut self, args: &[Value]) -> SymResult<Value> {
        let [target, rhs] = args else {
            return Err(evaluation(":= expects a target and a value"));
        };
        match target {
            Value::Identifier(name) => {
                let value = self.eval(rhs)?;
                self.state.bind(name, value.clone());
                Ok(value)
            }
            Value::Symbolic(s) => {
                let Operator::User(name) = &s.op else {
                    return Err(evaluation(format!("cannot redefine builtin `{}`", s.op)));
                };
                let params = operands(target)
                    .iter()
                    .map(|p| p.ident_name().map(str::to_owned))
                    .collect::<SymResult<Vec<_>>>()
                    .map_err(|_| evaluation("function parameters must be identifiers"))?;
                self.state.define_function(name, params, rhs.clone());
                Ok(Value::function(Operator::user(name)))
            }
            other => Err(evaluation(format!("cannot assign to `{other}`"))),
        }
    }

    fn call_user(&mut self, name: &str, args: Vec<Value>) -> SymResult<Value> {
        match self.state.lookup(name).cloned() {
            Some(Binding::Function { params, body }) => {
                if params.len() != args.len() {
                    return Err(evaluation(format!(
                        "{name} expects {} argument(s), got {}",
                        params.len(),
                        args.len()
                    )));
                }
                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(evaluation(format!("{name}: recursion too deep")));
                }
                let pairs: Vec<(String, Value)> = params.into_iter().zip(args).collect();
                let instantiated = substitute_all(&body, &pairs);
                self.call_depth += 1;
                let result = self.eval(&instantiated);
                self.call_depth -= 1;
                result
            }
            Some(Binding::Value(Value::Function(op))) => match op {
                Operator::Builtin(builtin) => self.call(builtin, args),
                Operator::User(target) if &*target != name => self.call_user(&target, args),
                Operator::User(_) => Ok(Value::symbolic_args(Operator::user(name), args)),
            },
            _ => Ok(Value::symbolic_args(Operator::user(name), args)),
        }
    }
}

/// Evaluate one tree, reporting an advisory timeout overrun as a warning.
pub fn evaluate(state: &mut KernelState, expr: &Value) -> SymResult<Value> {
    let started = Instant::now();
    let result = Evaluator::new(state).eval(expr);
    let limit = state.config().timeout_secs;
    let elapsed = started.elapsed().as_secs_f64();
    if limit > 0.0 && elapsed > limit {
        tracing::debug!(elapsed, limit, "evaluation exceeded advisory timeout");
        state.warn(format!(
            "evaluation took {elapsed:.1}s, over the {limit}s time limit"
        ));
    }
    result
}

/// Parse and evaluate `;`-separated statements, returning the last result.
pub fn eval_text(state: &mut KernelState, text: &str) -> SymResult<Value> {
    let statements = parse_program(text)?;
    tracing::trace!(statements = statements.len(), "evaluating text");
    let mut last = Value::sequence(Vec::new());
    for statement in &statements {
        last = evaluate(state, statement)?;
    }
    Ok(last)
}

#[cfg(test)]
mod tests;
