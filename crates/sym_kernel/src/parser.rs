//! Recursive-descent parser producing unevaluated value trees.
//!
//! Precedence, loosest first: `,` sequence, `:=`, `=`, `+ -`, `* /`,
//! prefix `-`, `^` (right-associative), postfix `!`, then atoms and calls.
//! Subtraction and division are recorded as `neg`/`inv` nodes so the tree
//! only uses the canonical operator set.

use num_bigint::BigInt;
use sym_value::{parse_error, BuiltinOp, Operator, Real, SymResult, Value, VectorSubtype};

use crate::lexer::{lex, unescape, RawToken, Token};
use crate::stack::ensure_sufficient_stack;

/// Literals with more significant digits than this become `Real`, unless
/// the literal is exactly the printed form of a double.
const DOUBLE_DIGITS: u32 = 15;

/// Most significant digits the shortest printed form of a double can have.
const SHORTEST_DOUBLE_DIGITS: u32 = 17;

/// Parse a single expression (or a top-level sequence).
pub fn parse(source: &str) -> SymResult<Value> {
    let mut statements = parse_program(source)?;
    match statements.len() {
        1 => Ok(statements.swap_remove(0)),
        0 => Err(parse_error("empty expression", source.len())),
        _ => Err(parse_error("expected a single expression", source.len())),
    }
}

/// Parse `;`-separated statements.
pub fn parse_program(source: &str) -> SymResult<Vec<Value>> {
    let tokens = lex(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
    };
    let mut statements = Vec::new();
    loop {
        while parser.eat(RawToken::Semicolon) {}
        if parser.at_end() {
            break;
        }
        statements.push(parser.sequence()?);
        if !parser.at_end() && !parser.check(RawToken::Semicolon) {
            return Err(parser.unexpected());
        }
    }
    Ok(statements)
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn check(&self, kind: RawToken) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    fn check_at(&self, offset: usize, kind: RawToken) -> bool {
        self.tokens
            .get(self.pos + offset)
            .is_some_and(|t| t.kind == kind)
    }

    fn eat(&mut self, kind: RawToken) -> bool {
        if self.check(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: RawToken, what: &str) -> SymResult<Token> {
        match self.peek() {
            Some(t) if t.kind == kind => {
                self.pos += 1;
                Ok(t)
            }
            _ => Err(parse_error(format!("expected {what}"), self.offset())),
        }
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.source.len(), |t| t.start)
    }

    fn text(&self, token: Token) -> &'src str {
        &self.source[token.start..token.end]
    }

    fn unexpected(&self) -> sym_value::SymError {
        match self.peek() {
            Some(t) => parse_error(format!("unexpected `{}`", self.text(t)), t.start),
            None => parse_error("unexpected end of input", self.source.len()),
        }
    }

    fn sequence(&mut self) -> SymResult<Value> {
        let first = self.assignment()?;
        if !self.check(RawToken::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat(RawToken::Comma) {
            items.push(self.assignment()?);
        }
        Ok(Value::sequence(items))
    }

    /// Comma-separated items up to (not including) `close`.
    fn items_until(&mut self, close: RawToken) -> SymResult<Vec<Value>> {
        let mut items = Vec::new();
        if self.check(close) {
            return Ok(items);
        }
        loop {
            items.push(self.assignment()?);
            if !self.eat(RawToken::Comma) {
                break;
            }
        }
        Ok(items)
    }

    fn assignment(&mut self) -> SymResult<Value> {
        ensure_sufficient_stack(|| {
            let lhs = self.equation()?;
            if self.eat(RawToken::Assign) {
                let rhs = self.assignment()?;
                return Ok(Value::symbolic_args(BuiltinOp::Store, vec![lhs, rhs]));
            }
            Ok(lhs)
        })
    }

    fn equation(&mut self) -> SymResult<Value> {
        let lhs = self.sum()?;
        if self.eat(RawToken::Eq) {
            let rhs = self.sum()?;
            return Ok(Value::symbolic_args(BuiltinOp::Equal, vec![lhs, rhs]));
        }
        Ok(lhs)
    }

    fn sum(&mut self) -> SymResult<Value> {
        let mut terms = vec![self.product()?];
        loop {
            if self.eat(RawToken::Plus) {
                terms.push(self.product()?);
            } else if self.eat(RawToken::Minus) {
                let term = self.product()?;
                terms.push(Value::symbolic(BuiltinOp::Neg, term));
            } else {
                break;
            }
        }
        Ok(collapse(BuiltinOp::Add, terms))
    }

    fn product(&mut self) -> SymResult<Value> {
        let mut factors = vec![self.prefix()?];
        loop {
            if self.eat(RawToken::Star) {
                factors.push(self.prefix()?);
            } else if self.eat(RawToken::Slash) {
                let factor = self.prefix()?;
                factors.push(Value::symbolic(BuiltinOp::Inv, factor));
            } else {
                break;
            }
        }
        Ok(collapse(BuiltinOp::Mul, factors))
    }

    fn prefix(&mut self) -> SymResult<Value> {
        ensure_sufficient_stack(|| {
            if self.eat(RawToken::Minus) {
                let operand = self.prefix()?;
                return Ok(Value::symbolic(BuiltinOp::Neg, operand));
            }
            if self.eat(RawToken::Plus) {
                return self.prefix();
            }
            self.power()
        })
    }

    fn power(&mut self) -> SymResult<Value> {
        let base = self.postfix()?;
        if self.eat(RawToken::Caret) || self.eat(RawToken::StarStar) {
            let exponent = self.prefix()?;
            return Ok(Value::symbolic_args(BuiltinOp::Pow, vec![base, exponent]));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> SymResult<Value> {
        let mut value = self.primary()?;
        while self.eat(RawToken::Bang) {
            value = Value::symbolic(BuiltinOp::Factorial, value);
        }
        Ok(value)
    }

    fn primary(&mut self) -> SymResult<Value> {
        let Some(token) = self.peek() else {
            return Err(self.unexpected());
        };
        self.pos += 1;
        let text = self.text(token);
        match token.kind {
            RawToken::Int => Ok(match text.parse::<i64>() {
                Ok(n) => Value::int(n),
                Err(_) => Value::bigint(
                    text.parse::<BigInt>()
                        .map_err(|e| parse_error(e.to_string(), token.start))?,
                ),
            }),
            RawToken::Float => float_literal(text, token.start),
            RawToken::Str => Ok(Value::string(&unescape(&text[1..text.len() - 1]))),
            RawToken::Ident => self.identifier(text),
            RawToken::LParen => {
                if self.eat(RawToken::RParen) {
                    return Ok(Value::sequence(Vec::new()));
                }
                let inner = self.sequence()?;
                self.expect(RawToken::RParen, "`)`")?;
                Ok(inner)
            }
            RawToken::LBracket => {
                let items = self.items_until(RawToken::RBracket)?;
                self.expect(RawToken::RBracket, "`]`")?;
                Ok(bracketed(items))
            }
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }

    fn identifier(&mut self, name: &str) -> SymResult<Value> {
        if self.eat(RawToken::LParen) {
            let args = self.items_until(RawToken::RParen)?;
            self.expect(RawToken::RParen, "`)`")?;
            return Ok(Value::symbolic_args(Operator::named(name), args));
        }
        if self.check(RawToken::LBracket) {
            let subtype = match name {
                "set" => Some(VectorSubtype::Set),
                "poly1" => Some(VectorSubtype::Polynomial),
                _ => None,
            };
            if let Some(subtype) = subtype {
                self.pos += 1;
                let items = self.items_until(RawToken::RBracket)?;
                self.expect(RawToken::RBracket, "`]`")?;
                return Ok(Value::vector(items, subtype));
            }
        }
        Ok(match name {
            "i" => Value::complex(Value::int(0), Value::int(1))?,
            "NULL" => Value::sequence(Vec::new()),
            "undef" => Value::double(f64::NAN),
            _ => match BuiltinOp::from_name(name) {
                // A bare operator name that is not being called is a function value.
                Some(op) if !op.is_syntactic() && !self.check_at(0, RawToken::Assign) => {
                    Value::function(op)
                }
                _ => Value::identifier(name),
            },
        })
    }
}

fn collapse(op: BuiltinOp, mut operands: Vec<Value>) -> Value {
    if operands.len() == 1 {
        operands.swap_remove(0)
    } else {
        Value::symbolic_args(op, operands)
    }
}

fn float_literal(text: &str, position: usize) -> SymResult<Value> {
    let digits = Real::literal_digits(text);
    if digits > DOUBLE_DIGITS && !is_printed_double(text, digits) {
        return Real::parse(text, digits)
            .map(Value::real)
            .ok_or_else(|| parse_error("malformed decimal literal", position));
    }
    text.parse::<f64>()
        .map(Value::double)
        .map_err(|e| parse_error(e.to_string(), position))
}

/// Whether `text` is the shortest form a double prints as, so printed
/// doubles with 16 or 17 digits parse back to the same double.
fn is_printed_double(text: &str, digits: u32) -> bool {
    if digits > SHORTEST_DOUBLE_DIGITS {
        return false;
    }
    text.parse::<f64>()
        .is_ok_and(|x| x.is_finite() && Value::double(x).to_string() == text)
}

/// A bracketed list, or a matrix when every element is a list of the same
/// nonzero length.
fn bracketed(items: Vec<Value>) -> Value {
    let row_len = items.first().and_then(|first| match first {
        Value::Vector(v) if v.subtype() == VectorSubtype::List && !v.is_empty() => Some(v.len()),
        _ => None,
    });
    let is_matrix = row_len.is_some_and(|len| {
        items.iter().all(|item| {
            matches!(item, Value::Vector(v) if v.subtype() == VectorSubtype::List && v.len() == len)
        })
    });
    if is_matrix {
        Value::vector(items, VectorSubtype::Matrix)
    } else {
        Value::list(items)
    }
}

#[cfg(test)]
mod tests;
