//! Builtin operator table: maps each `BuiltinOp` to its implementation.

use sym_value::{evaluation, BuiltinOp, SymError, SymResult, Value};

use crate::eval::Evaluator;
use crate::{algebra, arith, calculus, functions, integer, solve};

fn arity_error(op: BuiltinOp, expected: &str, got: usize) -> SymError {
    evaluation(format!("{op}: expected {expected} argument(s), got {got}"))
}

fn exactly<const N: usize>(op: BuiltinOp, args: Vec<Value>) -> SymResult<[Value; N]> {
    <[Value; N]>::try_from(args).map_err(|args| arity_error(op, &N.to_string(), args.len()))
}

/// Apply `op` to evaluated arguments.
pub(crate) fn apply(ev: &mut Evaluator<'_>, op: BuiltinOp, args: Vec<Value>) -> SymResult<Value> {
    match op {
        BuiltinOp::Add => arith::add(args),
        BuiltinOp::Mul => arith::mul(args),
        BuiltinOp::Neg => {
            let [x] = exactly(op, args)?;
            arith::neg(x)
        }
        BuiltinOp::Inv => {
            let [x] = exactly(op, args)?;
            arith::inv(x)
        }
        BuiltinOp::Pow => {
            let [base, exponent] = exactly(op, args)?;
            arith::pow(base, exponent)
        }
        // Equations and assignments reaching here are data, not actions.
        BuiltinOp::Equal | BuiltinOp::Store => {
            let [lhs, rhs] = exactly(op, args)?;
            Ok(Value::symbolic_args(op, vec![lhs, rhs]))
        }
        BuiltinOp::Factorial => {
            let [n] = exactly(op, args)?;
            Ok(integer::factorial(&n).unwrap_or_else(|| Value::symbolic(op, n)))
        }
        BuiltinOp::Sin
        | BuiltinOp::Cos
        | BuiltinOp::Tan
        | BuiltinOp::Asin
        | BuiltinOp::Acos
        | BuiltinOp::Atan
        | BuiltinOp::Exp
        | BuiltinOp::Ln
        | BuiltinOp::Log10
        | BuiltinOp::Sqrt
        | BuiltinOp::Abs
        | BuiltinOp::Sign
        | BuiltinOp::Floor
        | BuiltinOp::Ceil
        | BuiltinOp::Re
        | BuiltinOp::Im
        | BuiltinOp::Conj => {
            let [x] = exactly(op, args)?;
            functions::apply(op, x)
        }
        BuiltinOp::Evalf => functions::evalf(ev, args),
        BuiltinOp::Eval => {
            let [x] = exactly(op, args)?;
            ev.eval(&x)
        }
        BuiltinOp::Normal => {
            let [x] = exactly(op, args)?;
            algebra::normal(&x)
        }
        BuiltinOp::Simplify => {
            let [x] = exactly(op, args)?;
            algebra::simplify(&x)
        }
        BuiltinOp::Expand => {
            let [x] = exactly(op, args)?;
            algebra::expand(&x)
        }
        BuiltinOp::Factor => {
            let [x] = exactly(op, args)?;
            algebra::factor(&x)
        }
        BuiltinOp::Ifactor => {
            let [n] = exactly(op, args)?;
            integer::ifactor(&n).map_err(|_| evaluation(format!("ifactor: expected an integer, got {n}")))
        }
        BuiltinOp::Gcd => algebra::gcd(&args),
        BuiltinOp::Lcm => algebra::lcm(&args),
        BuiltinOp::Numer => {
            let [x] = exactly(op, args)?;
            Ok(algebra::numer_denom(&x)?.0)
        }
        BuiltinOp::Denom => {
            let [x] = exactly(op, args)?;
            Ok(algebra::numer_denom(&x)?.1)
        }
        BuiltinOp::Diff => calculus::diff_call(ev, args),
        BuiltinOp::Integrate => calculus::integrate_call(ev, args),
        BuiltinOp::Subst => calculus::subst_call(ev, args),
        BuiltinOp::Limit => calculus::limit_call(ev, args),
        BuiltinOp::Series => calculus::series_call(ev, args),
        BuiltinOp::Solve => solve::solve_call(ev, args),
        BuiltinOp::Size => {
            let [x] = exactly(op, args)?;
            Ok(size(&x))
        }
        BuiltinOp::Table => table(args),
    }
}

fn size(value: &Value) -> Value {
    let n = match value {
        Value::Vector(v) => v.len(),
        Value::Str(text) => text.chars().count(),
        Value::Map(entries) => entries.len(),
        _ => 1,
    };
    Value::int(i64::try_from(n).unwrap_or(i64::MAX))
}

/// `table(k1=v1, k2=v2, ...)`.
fn table(args: Vec<Value>) -> SymResult<Value> {
    let mut entries: Vec<(Value, Value)> = Vec::with_capacity(args.len());
    for arg in args {
        let pair = match &arg {
            Value::Symbolic(s) if s.op.is(BuiltinOp::Equal) => arg.arguments()?,
            _ => return Err(evaluation(format!("table: expected key=value, got {arg}"))),
        };
        let [key, value] = <[Value; 2]>::try_from(pair)
            .map_err(|_| evaluation("table: malformed key=value entry"))?;
        match entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => entries.push((key, value)),
        }
    }
    Ok(Value::map(entries))
}
