//! Operator handles.
//!
//! A `BuiltinOp` is a pre-resolved handle into the kernel's operator table:
//! building a symbolic node over it needs no name lookup. `Operator::User`
//! names a function the kernel does not know natively (a user definition or
//! a free function symbol such as `f` in `f(x)`).

use std::fmt;

use crate::heap::Heap;

macro_rules! builtin_ops {
    ($($variant:ident => $name:literal,)*) => {
        /// Operators the kernel implements natively.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum BuiltinOp {
            $($variant,)*
        }

        impl BuiltinOp {
            /// Every builtin, in declaration order.
            pub const ALL: &'static [BuiltinOp] = &[$(BuiltinOp::$variant,)*];

            /// Canonical name as it appears in expression text.
            pub const fn name(self) -> &'static str {
                match self {
                    $(BuiltinOp::$variant => $name,)*
                }
            }
        }
    };
}

builtin_ops! {
    Add => "+",
    Mul => "*",
    Neg => "neg",
    Inv => "inv",
    Pow => "^",
    Equal => "=",
    Store => ":=",
    Factorial => "factorial",
    Sin => "sin",
    Cos => "cos",
    Tan => "tan",
    Asin => "asin",
    Acos => "acos",
    Atan => "atan",
    Exp => "exp",
    Ln => "ln",
    Log10 => "log10",
    Sqrt => "sqrt",
    Abs => "abs",
    Sign => "sign",
    Floor => "floor",
    Ceil => "ceil",
    Re => "re",
    Im => "im",
    Conj => "conj",
    Normal => "normal",
    Simplify => "simplify",
    Expand => "expand",
    Factor => "factor",
    Ifactor => "ifactor",
    Evalf => "evalf",
    Eval => "eval",
    Diff => "diff",
    Integrate => "integrate",
    Subst => "subst",
    Solve => "solve",
    Limit => "limit",
    Series => "series",
    Gcd => "gcd",
    Lcm => "lcm",
    Numer => "numer",
    Denom => "denom",
    Size => "size",
    Table => "table",
}

/// Alternative spellings accepted by name resolution.
const ALIASES: &[(&str, BuiltinOp)] = &[
    ("pow", BuiltinOp::Pow),
    ("log", BuiltinOp::Ln),
    ("approx", BuiltinOp::Evalf),
    ("int", BuiltinOp::Integrate),
    ("sto", BuiltinOp::Store),
    ("-", BuiltinOp::Neg),
];

impl BuiltinOp {
    /// Resolve a name (canonical or alias) to a builtin handle.
    pub fn from_name(name: &str) -> Option<BuiltinOp> {
        BuiltinOp::ALL
            .iter()
            .copied()
            .find(|op| op.name() == name)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == name)
                    .map(|&(_, op)| op)
            })
    }

    /// Operators printed with dedicated infix/prefix/postfix syntax rather
    /// than as `name(args)`.
    pub const fn is_syntactic(self) -> bool {
        matches!(
            self,
            BuiltinOp::Add
                | BuiltinOp::Mul
                | BuiltinOp::Neg
                | BuiltinOp::Inv
                | BuiltinOp::Pow
                | BuiltinOp::Equal
                | BuiltinOp::Store
                | BuiltinOp::Factorial
        )
    }

    /// Names usable as `name(args)` in expression text, aliases included.
    pub fn callable_names() -> impl Iterator<Item = &'static str> {
        BuiltinOp::ALL
            .iter()
            .filter(|op| !op.is_syntactic() || **op == BuiltinOp::Factorial)
            .map(|op| op.name())
            .chain(
                ALIASES
                    .iter()
                    .filter(|(alias, _)| alias.chars().all(|c| c.is_ascii_alphanumeric()))
                    .map(|(alias, _)| *alias),
            )
    }
}

impl fmt::Display for BuiltinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handle naming the head of a symbolic node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Builtin(BuiltinOp),
    User(Heap<str>),
}

impl Operator {
    /// Handle for a name the kernel does not implement.
    pub fn user(name: &str) -> Self {
        Operator::User(Heap::from_str(name))
    }

    /// Builtin handle if `name` resolves, otherwise a user handle.
    pub fn named(name: &str) -> Self {
        match BuiltinOp::from_name(name) {
            Some(op) => Operator::Builtin(op),
            None => Operator::user(name),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Operator::Builtin(op) => op.name(),
            Operator::User(name) => name,
        }
    }

    pub fn as_builtin(&self) -> Option<BuiltinOp> {
        match self {
            Operator::Builtin(op) => Some(*op),
            Operator::User(_) => None,
        }
    }

    pub fn is(&self, op: BuiltinOp) -> bool {
        self.as_builtin() == Some(op)
    }
}

impl From<BuiltinOp> for Operator {
    fn from(op: BuiltinOp) -> Self {
        Operator::Builtin(op)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
