//! Name-to-operation table over already-evaluated arguments.
//!
//! Arithmetic and comparison builtins require number operands on both
//! sides and fail otherwise; `car`/`cdr` require a pair. Comparisons
//! answer with the numbers 1/0, while `eq` and the predicates answer with
//! the canonical truth values (the symbol `t`, or nil).

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::error::EvalError;
use crate::language::{self, AtomType, Value, truth};

type BuiltinFn = fn(&[Value]) -> Result<Value, EvalError>;

static TABLE: Lazy<FxHashMap<&'static str, BuiltinFn>> = Lazy::new(|| {
    let mut table: FxHashMap<&'static str, BuiltinFn> = FxHashMap::default();

    // Arithmetic
    table.insert("add", add);
    table.insert("+", add);
    table.insert("sub", sub);
    table.insert("-", sub);
    table.insert("mul", mul);
    table.insert("*", mul);
    table.insert("div", div);
    table.insert("/", div);
    table.insert("mod", modulo);
    table.insert("%", modulo);

    // Comparison
    table.insert("lt", lt);
    table.insert("gt", gt);
    table.insert("lte", lte);
    table.insert("gte", gte);

    // Equality and logic
    table.insert("eq", eq);
    table.insert("=", eq);
    table.insert("not", not);

    // Pairs
    table.insert("cons", cons);
    table.insert("car", car);
    table.insert("cdr", cdr);

    // Type predicates
    table.insert("nil?", is_nil);
    table.insert("number?", is_number);
    table.insert("symbol?", is_symbol);
    table.insert("string?", is_string);
    table.insert("list?", is_list);
    table.insert("sexpr?", is_sexpr);
    table.insert("truthy?", is_truthy);

    table
});

/// Dispatch an evaluated call by name. An unknown name is an error in its
/// own right rather than a sentinel value.
pub fn dispatch(name: &str, args: &[Value]) -> Result<Value, EvalError> {
    match TABLE.get(name) {
        Some(builtin) => builtin(args),
        None => Err(EvalError::UnknownBuiltin(name.to_string())),
    }
}

// ============================================================================
// Arithmetic and Comparison
// ============================================================================

fn numeric(name: &str, args: &[Value], index: usize) -> Result<f64, EvalError> {
    match args.get(index) {
        Some(Value::Atom(AtomType::Number(n))) => Ok(*n),
        Some(other) => Err(EvalError::Type(format!(
            "{name}: expected number, got {other}"
        ))),
        None => Err(EvalError::Type(format!(
            "{name}: expected number, got nothing"
        ))),
    }
}

fn arithmetic(
    name: &str,
    args: &[Value],
    op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    let a = numeric(name, args, 0)?;
    let b = numeric(name, args, 1)?;
    Ok(language::number(op(a, b)))
}

fn add(args: &[Value]) -> Result<Value, EvalError> {
    arithmetic("add", args, |a, b| a + b)
}

fn sub(args: &[Value]) -> Result<Value, EvalError> {
    arithmetic("sub", args, |a, b| a - b)
}

fn mul(args: &[Value]) -> Result<Value, EvalError> {
    arithmetic("mul", args, |a, b| a * b)
}

fn div(args: &[Value]) -> Result<Value, EvalError> {
    let a = numeric("div", args, 0)?;
    let b = numeric("div", args, 1)?;
    if b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(language::number(a / b))
}

/// Integer remainder; both operands are truncated first.
fn modulo(args: &[Value]) -> Result<Value, EvalError> {
    let a = numeric("mod", args, 0)? as i64;
    let b = numeric("mod", args, 1)? as i64;
    if b == 0 {
        return Err(EvalError::ModulusByZero);
    }
    Ok(language::number((a % b) as f64))
}

fn comparison(
    name: &str,
    args: &[Value],
    op: fn(f64, f64) -> bool,
) -> Result<Value, EvalError> {
    let a = numeric(name, args, 0)?;
    let b = numeric(name, args, 1)?;
    Ok(language::number(if op(a, b) { 1.0 } else { 0.0 }))
}

fn lt(args: &[Value]) -> Result<Value, EvalError> {
    comparison("lt", args, |a, b| a < b)
}

fn gt(args: &[Value]) -> Result<Value, EvalError> {
    comparison("gt", args, |a, b| a > b)
}

fn lte(args: &[Value]) -> Result<Value, EvalError> {
    comparison("lte", args, |a, b| a <= b)
}

fn gte(args: &[Value]) -> Result<Value, EvalError> {
    comparison("gte", args, |a, b| a >= b)
}

// ============================================================================
// Equality and Logic
// ============================================================================

fn eq(args: &[Value]) -> Result<Value, EvalError> {
    match (args.first(), args.get(1)) {
        (Some(a), Some(b)) => Ok(truth(language::eq(a, b))),
        _ => Ok(Value::Nil),
    }
}

/// Numeric negation only: 0 becomes 1, anything else becomes 0.
fn not(args: &[Value]) -> Result<Value, EvalError> {
    let a = numeric("not", args, 0)?;
    Ok(language::number(if a == 0.0 { 1.0 } else { 0.0 }))
}

// ============================================================================
// Pairs
// ============================================================================

fn cons(args: &[Value]) -> Result<Value, EvalError> {
    let car = args.first().cloned().unwrap_or(Value::Nil);
    let cdr = args.get(1).cloned().unwrap_or(Value::Nil);
    Ok(language::cons(car, cdr))
}

fn car(args: &[Value]) -> Result<Value, EvalError> {
    language::car(args.first().unwrap_or(&Value::Nil))
}

fn cdr(args: &[Value]) -> Result<Value, EvalError> {
    language::cdr(args.first().unwrap_or(&Value::Nil))
}

// ============================================================================
// Type Predicates
// ============================================================================

fn predicate(args: &[Value], test: fn(&Value) -> bool) -> Result<Value, EvalError> {
    match args.first() {
        Some(value) => Ok(truth(test(value))),
        None => Ok(Value::Nil),
    }
}

fn is_nil(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, |v| matches!(v, Value::Nil))
}

fn is_number(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, |v| matches!(v, Value::Atom(AtomType::Number(_))))
}

fn is_symbol(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, |v| matches!(v, Value::Atom(AtomType::Symbol(_))))
}

fn is_string(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, |v| matches!(v, Value::Atom(AtomType::String(_))))
}

/// Lists are nil or pairs.
fn is_list(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, |v| matches!(v, Value::Nil | Value::Cons(_)))
}

/// Every value is an s-expression.
fn is_sexpr(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, |_| true)
}

/// Coerce any value to the canonical truth values: nil for nil, `t` for
/// everything else.
fn is_truthy(args: &[Value]) -> Result<Value, EvalError> {
    predicate(args, language::is_truthy)
}
