//! Structural helpers over expression trees: free variables, dependency
//! tests and substitution.

use sym_value::Value;

/// Names treated as constants rather than variables.
const CONSTANTS: &[&str] = &["pi", "infinity", "inf"];

pub fn is_constant_name(name: &str) -> bool {
    CONSTANTS.contains(&name)
}

/// Free variables of `expr`, sorted and deduplicated.
pub fn variables(expr: &Value) -> Vec<String> {
    let mut names = Vec::new();
    collect_variables(expr, &mut names);
    names.sort();
    names.dedup();
    names
}

fn collect_variables(expr: &Value, out: &mut Vec<String>) {
    match expr {
        Value::Identifier(name) if !is_constant_name(name) => out.push(name.to_string()),
        Value::Symbolic(s) => collect_variables(&s.arg, out),
        Value::Vector(v) => v.items().iter().for_each(|item| collect_variables(item, out)),
        Value::Map(entries) => entries.iter().for_each(|(k, v)| {
            collect_variables(k, out);
            collect_variables(v, out);
        }),
        _ => {}
    }
}

/// The variable an operation without an explicit variable argument works
/// in: the only free variable, or `x`.
pub fn main_variable(expr: &Value) -> String {
    match variables(expr).as_slice() {
        [single] => single.clone(),
        _ => "x".to_owned(),
    }
}

/// Whether `expr` does not mention `var`.
pub fn free_of(expr: &Value, var: &str) -> bool {
    match expr {
        Value::Identifier(name) => &**name != var,
        Value::Symbolic(s) => free_of(&s.arg, var),
        Value::Vector(v) => v.items().iter().all(|item| free_of(item, var)),
        Value::Map(entries) => entries.iter().all(|(k, v)| free_of(k, var) && free_of(v, var)),
        _ => true,
    }
}

/// Replace every occurrence of identifier `var` by `replacement`. The result
/// is structural only; evaluate it to re-canonicalize.
pub fn substitute(expr: &Value, var: &str, replacement: &Value) -> Value {
    match expr {
        Value::Identifier(name) if &**name == var => replacement.clone(),
        Value::Symbolic(s) => Value::symbolic(s.op.clone(), substitute(&s.arg, var, replacement)),
        Value::Vector(v) => Value::vector(
            v.items().iter().map(|item| substitute(item, var, replacement)).collect(),
            v.subtype(),
        ),
        Value::Map(entries) => Value::map(
            entries
                .iter()
                .map(|(k, v)| (substitute(k, var, replacement), substitute(v, var, replacement)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// Replace several identifiers at once. Replacements are not rescanned, so
/// swapping `x` and `y` works.
pub fn substitute_all(expr: &Value, pairs: &[(String, Value)]) -> Value {
    match expr {
        Value::Identifier(name) => pairs
            .iter()
            .find(|(var, _)| var.as_str() == &**name)
            .map_or_else(|| expr.clone(), |(_, replacement)| replacement.clone()),
        Value::Symbolic(s) => Value::symbolic(s.op.clone(), substitute_all(&s.arg, pairs)),
        Value::Vector(v) => Value::vector(
            v.items().iter().map(|item| substitute_all(item, pairs)).collect(),
            v.subtype(),
        ),
        Value::Map(entries) => Value::map(
            entries
                .iter()
                .map(|(k, v)| (substitute_all(k, pairs), substitute_all(v, pairs)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests;
