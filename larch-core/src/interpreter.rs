//! The recursive evaluator: special forms, lambda application, and builtin
//! dispatch.
//!
//! Evaluation is plain call-stack recursion with no tail-call elimination;
//! deeply recursive programs exhaust the stack. Within one `eval` call any
//! fault aborts the whole expression.

use crate::builtins;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::intern::{InternedSymbol, well_known};
use crate::language::{AtomType, Value, cons, is_truthy, symbol};

/// Evaluate one expression against an environment.
pub fn eval(expr: &Value, env: &Environment) -> Result<Value, EvalError> {
    match expr {
        // Self-evaluating forms
        Value::Nil | Value::Atom(AtomType::Number(_)) | Value::Atom(AtomType::String(_)) => {
            Ok(expr.clone())
        }

        // Symbol lookup (never fails; unbound symbols resolve to themselves)
        Value::Atom(AtomType::Symbol(name)) => Ok(env.lookup(*name)),

        // Call evaluation. The head position is evaluated first, so the
        // operator may itself be an expression.
        Value::Cons(cell) => {
            let head = eval(&cell.car, env)?;
            if let Value::Atom(AtomType::Symbol(name)) = &head {
                eval_form(*name, expr, env)
            } else if is_lambda_literal(&head) {
                // ((lambda (x) ...) arg) and friends
                apply_lambda(&head, expr, env)
            } else {
                Err(EvalError::NotCallable(head.to_string()))
            }
        }
    }
}

/// Dispatch an evaluated head symbol: special form, user-defined lambda, or
/// builtin, in that order.
fn eval_form(name: InternedSymbol, expr: &Value, env: &Environment) -> Result<Value, EvalError> {
    let text = name.resolve();
    match text.as_str() {
        "quote" => Ok(nth(expr, 1)),

        "set" => {
            let target = nth(expr, 1);
            let Value::Atom(AtomType::Symbol(sym)) = &target else {
                return Err(EvalError::Type(format!(
                    "set: expected symbol, got {target}"
                )));
            };
            let value = eval(&nth(expr, 2), env)?;
            env.bind(*sym, value.clone());
            Ok(value)
        }

        "define" => eval_define(expr, env),

        // A lambda expression self-evaluates to its own literal list. It
        // carries no environment; scoping is resolved at call time against
        // the caller's frame chain.
        "lambda" => Ok(expr.clone()),

        "and" => {
            let first = eval(&nth(expr, 1), env)?;
            if !is_truthy(&first) {
                Ok(first)
            } else {
                eval(&nth(expr, 2), env)
            }
        }

        "or" => {
            let first = eval(&nth(expr, 1), env)?;
            if is_truthy(&first) {
                Ok(first)
            } else {
                eval(&nth(expr, 2), env)
            }
        }

        "if" => {
            let test = eval(&nth(expr, 1), env)?;
            if is_truthy(&test) {
                eval(&nth(expr, 2), env)
            } else {
                eval(&nth(expr, 3), env)
            }
        }

        "cond" => eval_cond(expr, env),

        _ => {
            // Not a special form. A second lookup decides between a
            // user-defined lambda and a builtin.
            let resolved = env.lookup(name);
            if is_lambda_literal(&resolved) {
                apply_lambda(&resolved, expr, env)
            } else {
                let args = eval_args(&tail(expr), env)?;
                builtins::dispatch(&text, &args)
            }
        }
    }
}

/// `(define SYM EXPR)` binds a value and returns the symbol;
/// `(define (FNAME ARG...) BODY)` is sugar for binding the lambda literal
/// `(lambda (ARG...) BODY)` to FNAME.
fn eval_define(expr: &Value, env: &Environment) -> Result<Value, EvalError> {
    let target = nth(expr, 1);
    match &target {
        Value::Atom(AtomType::Symbol(sym)) => {
            let value = eval(&nth(expr, 2), env)?;
            env.bind(*sym, value);
            Ok(target.clone())
        }
        Value::Cons(signature) => {
            let Value::Atom(AtomType::Symbol(sym)) = &signature.car else {
                return Err(EvalError::Type(format!(
                    "define: expected function name symbol, got {}",
                    signature.car
                )));
            };
            let params = signature.cdr.clone();
            let body = nth(expr, 2);
            let lambda = cons(symbol("lambda"), cons(params, cons(body, Value::Nil)));
            env.bind(*sym, lambda);
            Ok(signature.car.clone())
        }
        other => Err(EvalError::Type(format!(
            "define: expected symbol or signature, got {other}"
        ))),
    }
}

fn eval_cond(expr: &Value, env: &Environment) -> Result<Value, EvalError> {
    let mut clauses = tail(expr);
    while let Value::Cons(cell) = clauses {
        let clause = cell.car.clone();
        let test = nth(&clause, 0);
        let result = nth(&clause, 1);

        // The literal symbol `else` short-circuits as always-true; it is
        // checked before the test position is evaluated.
        let selected = match &test {
            Value::Atom(AtomType::Symbol(sym)) if *sym == *well_known::ELSE => true,
            _ => is_truthy(&eval(&test, env)?),
        };

        if selected {
            return eval(&result, env);
        }
        clauses = cell.cdr.clone();
    }
    Ok(Value::Nil)
}

/// A lambda literal is the list `(lambda (PARAM...) BODY)`.
fn is_lambda_literal(value: &Value) -> bool {
    match value {
        Value::Cons(cell) => {
            matches!(&cell.car, Value::Atom(AtomType::Symbol(sym)) if *sym == *well_known::LAMBDA)
        }
        _ => false,
    }
}

/// Invoke a lambda literal: evaluate the call's arguments left to right in
/// the caller's environment, then bind formals positionally in a fresh
/// frame parented to the caller.
///
/// There is no arity check: excess formals stay unbound and excess actuals
/// are dropped. A non-symbol formal consumes its position without binding.
fn apply_lambda(lambda: &Value, call: &Value, env: &Environment) -> Result<Value, EvalError> {
    let actuals = eval_args(&tail(call), env)?;

    let frame = env.child();
    let mut formals = nth(lambda, 1);
    let mut index = 0;
    while let Value::Cons(cell) = formals {
        if index >= actuals.len() {
            break;
        }
        if let Value::Atom(AtomType::Symbol(sym)) = &cell.car {
            frame.bind(*sym, actuals[index].clone());
        }
        index += 1;
        formals = cell.cdr.clone();
    }

    eval(&nth(lambda, 2), &frame)
}

/// Evaluate call arguments left to right.
fn eval_args(args: &Value, env: &Environment) -> Result<Vec<Value>, EvalError> {
    let mut values = Vec::new();
    let mut current = args.clone();
    while let Value::Cons(cell) = current {
        values.push(eval(&cell.car, env)?);
        current = cell.cdr.clone();
    }
    Ok(values)
}

/// The `n`th element of a list, or nil when the chain runs out. Special
/// forms read their operand positions through this, so a missing operand
/// behaves as nil.
fn nth(expr: &Value, n: usize) -> Value {
    let mut current = expr.clone();
    for _ in 0..n {
        current = match current {
            Value::Cons(cell) => cell.cdr.clone(),
            _ => return Value::Nil,
        };
    }
    match current {
        Value::Cons(cell) => cell.car.clone(),
        _ => Value::Nil,
    }
}

fn tail(expr: &Value) -> Value {
    match expr {
        Value::Cons(cell) => cell.cdr.clone(),
        _ => Value::Nil,
    }
}
