//! Canonical text form of values.
//!
//! Output is the kernel's infix syntax and re-parses to an equal value for
//! everything the parser accepts: `2+3*i`, `x^2-1`, `(x-1)*(x+1)`, `[1,2]`,
//! `set[1,2]`, `table(1="a")`. Sums print negative terms as subtraction and
//! products print inverse factors as division.

use std::fmt::{self, Write};

use super::{ComplexValue, SymbolicValue, Value, VectorValue};
use crate::heap::Heap;
use crate::number::Rational;
use crate::operator::BuiltinOp;
use crate::tag::VectorSubtype;

/// Binding strength of a printed form. A child whose form binds looser than
/// its context requires is parenthesized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Prec {
    Sequence,
    Assign,
    Sum,
    Product,
    Factor,
    Power,
    Postfix,
    Atom,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_value(self, &mut out)?;
        f.write_str(&out)
    }
}

fn prec(value: &Value) -> Prec {
    match value {
        Value::Int(_) | Value::BigInt(_) | Value::Double(_) | Value::Real(_) => {
            if value.is_negative_number() {
                Prec::Sum
            } else {
                Prec::Atom
            }
        }
        Value::Fraction(_) => {
            if value.is_negative_number() {
                Prec::Sum
            } else {
                Prec::Product
            }
        }
        Value::Complex(c) => complex_prec(c),
        Value::Vector(v) if v.subtype() == VectorSubtype::Sequence => Prec::Sequence,
        Value::Symbolic(s) => match s.op.as_builtin() {
            Some(BuiltinOp::Add | BuiltinOp::Neg) => Prec::Sum,
            Some(BuiltinOp::Mul) => {
                if negated(value).is_some() {
                    Prec::Sum
                } else {
                    Prec::Product
                }
            }
            Some(BuiltinOp::Inv) => Prec::Product,
            Some(BuiltinOp::Pow) => {
                if sqrt_base(s).is_some() {
                    Prec::Atom
                } else if as_denominator(value).is_some() {
                    Prec::Product
                } else {
                    Prec::Power
                }
            }
            Some(BuiltinOp::Equal | BuiltinOp::Store) => Prec::Assign,
            Some(BuiltinOp::Factorial) => Prec::Postfix,
            _ => Prec::Atom,
        },
        _ => Prec::Atom,
    }
}

fn complex_prec(c: &ComplexValue) -> Prec {
    if !c.re.is_zero() || negated(&c.im).is_some() {
        Prec::Sum
    } else if matches!(c.im, Value::Int(1)) {
        Prec::Atom
    } else {
        Prec::Product
    }
}

/// The absolute value of something that prints with a leading minus sign,
/// so sums can print it as a subtraction.
fn negated(value: &Value) -> Option<Value> {
    match value {
        Value::Int(_) | Value::BigInt(_) | Value::Fraction(_) if value.is_negative_number() => {
            Rational::from_value(value).map(|q| (-&q).into_value())
        }
        Value::Double(x) if *x < 0.0 => Some(Value::Double(-x)),
        Value::Real(r) if r.is_negative() => Some(Value::real(r.abs())),
        Value::Complex(c) if c.re.is_zero() => negated(&c.im).map(|im| {
            Value::Complex(Heap::new(ComplexValue {
                re: c.re.clone(),
                im,
            }))
        }),
        Value::Symbolic(s) => match s.op.as_builtin() {
            Some(BuiltinOp::Neg) => Some(s.arg.clone()),
            Some(BuiltinOp::Mul) => {
                let factors = args_of(s);
                let (first, rest) = factors.split_first()?;
                let abs_first = negated(first)?;
                let mut remaining: Vec<Value> = Vec::with_capacity(factors.len());
                if !abs_first.is_one() || rest.is_empty() {
                    remaining.push(abs_first);
                }
                remaining.extend(rest.iter().cloned());
                Some(if remaining.len() == 1 {
                    remaining.swap_remove(0)
                } else {
                    Value::symbolic_args(BuiltinOp::Mul, remaining)
                })
            }
            _ => None,
        },
        _ => None,
    }
}

fn args_of(s: &SymbolicValue) -> Vec<Value> {
    match &s.arg {
        Value::Vector(v) if v.subtype() == VectorSubtype::Sequence => v.items().to_vec(),
        other => vec![other.clone()],
    }
}

/// `b` when the node is `b^(1/2)`.
fn sqrt_base(s: &SymbolicValue) -> Option<Value> {
    let args = args_of(s);
    match args.as_slice() {
        [base, Value::Fraction(e)] if matches!((&e.num, &e.den), (Value::Int(1), Value::Int(2))) => {
            Some(base.clone())
        }
        _ => None,
    }
}

fn write_child(value: &Value, min: Prec, out: &mut String) -> fmt::Result {
    if prec(value) < min {
        out.push('(');
        write_value(value, out)?;
        out.push(')');
        Ok(())
    } else {
        write_value(value, out)
    }
}

fn write_joined(items: &[Value], min: Prec, sep: &str, out: &mut String) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(sep);
        }
        write_child(item, min, out)?;
    }
    Ok(())
}

fn write_value(value: &Value, out: &mut String) -> fmt::Result {
    match value {
        Value::Int(n) => write!(out, "{n}"),
        Value::BigInt(n) => write!(out, "{n}"),
        Value::Double(x) => write_double(*x, out),
        Value::Real(r) => write!(out, "{r}"),
        Value::Fraction(f) => write!(out, "{}/{}", f.num, f.den),
        Value::Complex(c) => write_complex(c, out),
        Value::Vector(v) => write_vector(v, out),
        Value::Symbolic(s) => match as_denominator(value) {
            Some(d) => {
                out.push_str("1/");
                write_child(&d, Prec::Power, out)
            }
            None => write_symbolic(s, out),
        },
        Value::Identifier(name) => {
            out.push_str(name);
            Ok(())
        }
        Value::Str(text) => write_string(text, out),
        Value::Map(entries) => {
            out.push_str("table(");
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_child(k, Prec::Sum, out)?;
                out.push('=');
                write_child(v, Prec::Sum, out)?;
            }
            out.push(')');
            Ok(())
        }
        Value::Function(op) => {
            out.push_str(op.name());
            Ok(())
        }
    }
}

fn write_double(x: f64, out: &mut String) -> fmt::Result {
    if x.is_nan() {
        out.push_str("undef");
        return Ok(());
    }
    if x.is_infinite() {
        out.push_str(if x > 0.0 { "+infinity" } else { "-infinity" });
        return Ok(());
    }
    let magnitude = x.abs();
    if magnitude != 0.0 && !(1e-4..1e15).contains(&magnitude) {
        return write!(out, "{x:e}");
    }
    let start = out.len();
    write!(out, "{x}")?;
    if !out[start..].contains('.') {
        out.push_str(".0");
    }
    Ok(())
}

fn write_string(text: &str, out: &mut String) -> fmt::Result {
    out.push('"');
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    Ok(())
}

fn write_imaginary(im: &Value, out: &mut String) -> fmt::Result {
    if im.is_one() && im.is_integer() {
        out.push('i');
        Ok(())
    } else {
        write_child(im, Prec::Product, out)?;
        out.push_str("*i");
        Ok(())
    }
}

fn write_complex(c: &ComplexValue, out: &mut String) -> fmt::Result {
    let re_zero = c.re.is_zero();
    if !re_zero {
        write_child(&c.re, Prec::Sum, out)?;
    }
    match negated(&c.im) {
        Some(abs_im) => {
            out.push('-');
            write_imaginary(&abs_im, out)
        }
        None => {
            if !re_zero {
                out.push('+');
            }
            write_imaginary(&c.im, out)
        }
    }
}

fn write_vector(v: &VectorValue, out: &mut String) -> fmt::Result {
    let (open, close) = match v.subtype() {
        VectorSubtype::Sequence => {
            if v.is_empty() {
                out.push_str("NULL");
                return Ok(());
            }
            return write_joined(v.items(), Prec::Assign, ",", out);
        }
        VectorSubtype::Set => ("set[", "]"),
        VectorSubtype::Polynomial => ("poly1[", "]"),
        _ => ("[", "]"),
    };
    out.push_str(open);
    write_joined(v.items(), Prec::Assign, ",", out)?;
    out.push_str(close);
    Ok(())
}

fn write_symbolic(s: &SymbolicValue, out: &mut String) -> fmt::Result {
    let args = args_of(s);
    match s.op.as_builtin() {
        Some(BuiltinOp::Add) => write_sum(&args, out),
        Some(BuiltinOp::Mul) => write_product(&args, out),
        Some(BuiltinOp::Neg) => {
            out.push('-');
            write_child(&s.arg, Prec::Product, out)
        }
        Some(BuiltinOp::Inv) => {
            out.push_str("1/");
            write_child(&s.arg, Prec::Power, out)
        }
        Some(BuiltinOp::Pow) if args.len() == 2 => {
            if let Some(base) = sqrt_base(s) {
                out.push_str("sqrt(");
                write_value(&base, out)?;
                out.push(')');
                return Ok(());
            }
            write_child(&args[0], Prec::Postfix, out)?;
            out.push('^');
            write_child(&args[1], Prec::Postfix, out)
        }
        Some(op @ (BuiltinOp::Equal | BuiltinOp::Store)) if args.len() == 2 => {
            write_child(&args[0], Prec::Sum, out)?;
            out.push_str(op.name());
            write_child(&args[1], Prec::Sum, out)
        }
        Some(BuiltinOp::Factorial) => {
            write_child(&s.arg, Prec::Atom, out)?;
            out.push('!');
            Ok(())
        }
        _ => {
            out.push_str(s.op.name());
            out.push('(');
            write_joined(&args, Prec::Assign, ",", out)?;
            out.push(')');
            Ok(())
        }
    }
}

fn write_sum(terms: &[Value], out: &mut String) -> fmt::Result {
    for (i, term) in terms.iter().enumerate() {
        match negated(term) {
            Some(abs_term) => {
                out.push('-');
                write_child(&abs_term, Prec::Product, out)?;
            }
            None => {
                if i > 0 {
                    out.push('+');
                }
                write_child(term, Prec::Product, out)?;
            }
        }
    }
    Ok(())
}

/// Splits a factor into the denominator side when it is `inv(d)` or a power
/// with a negative rational exponent.
fn as_denominator(factor: &Value) -> Option<Value> {
    let Value::Symbolic(s) = factor else {
        return None;
    };
    match s.op.as_builtin()? {
        BuiltinOp::Inv => Some(s.arg.clone()),
        BuiltinOp::Pow => {
            let args = args_of(s);
            let [base, exponent] = args.as_slice() else {
                return None;
            };
            if !exponent.is_negative_number() || Rational::from_value(exponent).is_none() {
                return None;
            }
            let positive = negated(exponent)?;
            Some(if positive.is_one() {
                base.clone()
            } else {
                Value::symbolic_args(BuiltinOp::Pow, vec![base.clone(), positive])
            })
        }
        _ => None,
    }
}

fn write_product(factors: &[Value], out: &mut String) -> fmt::Result {
    let mut numer: Vec<Value> = Vec::with_capacity(factors.len());
    let mut denom: Vec<Value> = Vec::new();
    let mut negative = false;

    let mut rest = factors;
    if let Some((first, tail)) = factors.split_first() {
        if first.is_real_number() {
            rest = tail;
            let abs_first = match negated(first) {
                Some(abs) => {
                    negative = true;
                    abs
                }
                None => first.clone(),
            };
            match &abs_first {
                Value::Fraction(f) => {
                    if !f.num.is_one() {
                        numer.push(f.num.clone());
                    }
                    denom.push(f.den.clone());
                }
                coefficient if coefficient.is_one() && coefficient.is_integer() => {}
                coefficient => numer.push(coefficient.clone()),
            }
        }
    }
    for factor in rest {
        match as_denominator(factor) {
            Some(d) => denom.push(d),
            None => numer.push(factor.clone()),
        }
    }

    if negative {
        out.push('-');
    }
    if numer.is_empty() {
        out.push('1');
    } else {
        write_joined(&numer, Prec::Factor, "*", out)?;
    }
    match denom.as_slice() {
        [] => Ok(()),
        [single] => {
            out.push('/');
            write_child(single, Prec::Power, out)
        }
        many => {
            out.push_str("/(");
            write_joined(many, Prec::Factor, "*", out)?;
            out.push(')');
            Ok(())
        }
    }
}
