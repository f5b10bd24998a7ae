//! Arithmetic on values handed in from outside the expression language.
//!
//! The operands are combined into a node and evaluated against the context,
//! so bound identifiers resolve and warnings land in the context's queue
//! exactly as they would for the equivalent expression text.

use std::fmt;

use sym_value::{BuiltinOp, SymResult, Value};

use crate::eval::evaluate;
use crate::state::KernelState;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 5] = [BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul, BinaryOp::Div, BinaryOp::Pow];

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Pow => "^",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<BinaryOp> {
        BinaryOp::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    fn node(self, lhs: Value, rhs: Value) -> Value {
        match self {
            BinaryOp::Add => Value::symbolic_args(BuiltinOp::Add, vec![lhs, rhs]),
            BinaryOp::Sub => {
                Value::symbolic_args(BuiltinOp::Add, vec![lhs, Value::symbolic(BuiltinOp::Neg, rhs)])
            }
            BinaryOp::Mul => Value::symbolic_args(BuiltinOp::Mul, vec![lhs, rhs]),
            BinaryOp::Div => {
                Value::symbolic_args(BuiltinOp::Mul, vec![lhs, Value::symbolic(BuiltinOp::Inv, rhs)])
            }
            BinaryOp::Pow => Value::symbolic_args(BuiltinOp::Pow, vec![lhs, rhs]),
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Neg,
    Inv,
}

impl UnaryOp {
    fn builtin(self) -> BuiltinOp {
        match self {
            UnaryOp::Neg => BuiltinOp::Neg,
            UnaryOp::Inv => BuiltinOp::Inv,
        }
    }
}

pub fn evaluate_binary(state: &mut KernelState, op: BinaryOp, lhs: Value, rhs: Value) -> SymResult<Value> {
    evaluate(state, &op.node(lhs, rhs))
}

pub fn evaluate_unary(state: &mut KernelState, op: UnaryOp, operand: Value) -> SymResult<Value> {
    evaluate(state, &Value::symbolic(op.builtin(), operand))
}
