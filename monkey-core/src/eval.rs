// monkey-core - AST-walking evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! AST-walking evaluator for Monkey programs.
//!
//! [`eval_program`] is the entry point: it reduces a parsed [`Program`] to
//! a single [`MonkeyVal`] against a caller-owned [`Env`]. The environment
//! persists across calls, which is how REPL `let` bindings survive between
//! lines.

use std::cell::Cell;

use im::{HashMap, Vector};
use monkey_parser::ast::{
    BlockStatement, Expression, InfixOp, PrefixOp, Program, Statement,
};

use crate::builtins;
use crate::env::Env;
use crate::error::{Error, Result};
use crate::value::{HashPair, MonkeyFn, MonkeyVal};

// ============================================================================
// Stack Overflow Protection
// ============================================================================

/// Maximum recursion depth for eval. Can be configured via `set_max_eval_depth`.
const DEFAULT_MAX_EVAL_DEPTH: usize = 10_000;

thread_local! {
    static EVAL_DEPTH: Cell<usize> = const { Cell::new(0) };
    static MAX_EVAL_DEPTH: Cell<usize> = const { Cell::new(DEFAULT_MAX_EVAL_DEPTH) };
}

/// Set the maximum eval recursion depth. Returns the previous value.
#[inline]
#[must_use]
pub fn set_max_eval_depth(depth: usize) -> usize {
    MAX_EVAL_DEPTH.with(|d| d.replace(depth))
}

/// Get the current maximum eval recursion depth.
#[inline]
#[must_use]
pub fn get_max_eval_depth() -> usize {
    MAX_EVAL_DEPTH.with(|d| d.get())
}

/// RAII guard to manage the eval depth counter.
struct EvalDepthGuard;

impl EvalDepthGuard {
    fn new() -> Result<Self> {
        let (current, max) = EVAL_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            (current + 1, MAX_EVAL_DEPTH.with(|m| m.get()))
        });
        if current > max {
            EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
            Err(Error::StackOverflow { max })
        } else {
            Ok(EvalDepthGuard)
        }
    }
}

impl Drop for EvalDepthGuard {
    fn drop(&mut self) {
        EVAL_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Evaluate a program in the given environment.
///
/// Statements run in order; the result is the last statement's value. A
/// `return` anywhere in the program stops evaluation and yields the
/// returned value, already unwrapped.
///
/// # Examples
///
/// ```
/// use monkey_core::{Env, eval_program};
/// use monkey_parser::Parser;
///
/// let mut parser = Parser::new("let double = fn(x) { x * 2 }; double(21)");
/// let program = parser.parse_program();
/// assert!(parser.errors().is_empty());
///
/// let env = Env::new();
/// let result = eval_program(&program, &env).unwrap();
/// assert_eq!(result.to_string(), "42");
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - An identifier cannot be resolved
/// - An operator is applied to unsupported operand types
/// - A non-function is called, or a builtin rejects its arguments
/// - Evaluation recurses past the depth limit ([`set_max_eval_depth`])
pub fn eval_program(program: &Program, env: &Env) -> Result<MonkeyVal> {
    let mut result = MonkeyVal::Null;
    for stmt in &program.statements {
        result = match eval_statement(stmt, env) {
            Ok(val) => val,
            Err(Error::Return(val)) => return Ok(val),
            Err(err) => return Err(err),
        };
    }
    Ok(result)
}

/// Evaluate a single expression in the given environment.
pub fn eval(expr: &Expression, env: &Env) -> Result<MonkeyVal> {
    // Check recursion depth to prevent a native stack overflow
    let _guard = EvalDepthGuard::new()?;

    match expr {
        Expression::IntegerLiteral(n) => Ok(MonkeyVal::Int(*n)),
        Expression::BooleanLiteral(b) => Ok(MonkeyVal::Bool(*b)),
        Expression::StringLiteral(s) => Ok(MonkeyVal::string(s)),
        Expression::Identifier(name) => eval_identifier(name, env),
        Expression::ArrayLiteral(elements) => {
            let elements: Vector<MonkeyVal> = elements
                .iter()
                .map(|e| eval(e, env))
                .collect::<Result<_>>()?;
            Ok(MonkeyVal::Array(elements))
        }
        Expression::HashLiteral(pairs) => eval_hash_literal(pairs, env),
        Expression::Prefix { op, right } => {
            let right = eval(right, env)?;
            eval_prefix_expression(*op, &right)
        }
        Expression::Infix { op, left, right } => {
            let left = eval(left, env)?;
            let right = eval(right, env)?;
            eval_infix_expression(*op, &left, &right)
        }
        Expression::If {
            condition,
            consequence,
            alternative,
        } => {
            let condition = eval(condition, env)?;
            if condition.is_truthy() {
                eval_block(consequence, env)
            } else if let Some(alternative) = alternative {
                eval_block(alternative, env)
            } else {
                Ok(MonkeyVal::Null)
            }
        }
        Expression::FunctionLiteral { parameters, body } => Ok(MonkeyVal::Fn(MonkeyFn {
            parameters: parameters.clone(),
            body: body.clone(),
            env: env.clone(),
        })),
        Expression::Call {
            function,
            arguments,
        } => {
            let function = eval(function, env)?;
            let args: Vec<MonkeyVal> = arguments
                .iter()
                .map(|a| eval(a, env))
                .collect::<Result<_>>()?;
            apply(&function, &args)
        }
        Expression::Index { left, index } => {
            let left = eval(left, env)?;
            let index = eval(index, env)?;
            eval_index_expression(&left, &index)
        }
    }
}

// ============================================================================
// Statements
// ============================================================================

fn eval_statement(stmt: &Statement, env: &Env) -> Result<MonkeyVal> {
    match stmt {
        Statement::Let { name, value } => {
            let val = eval(value, env)?;
            env.define(name.clone(), val);
            // `let` has no result value of its own
            Ok(MonkeyVal::Null)
        }
        Statement::Return(value) => {
            let val = eval(value, env)?;
            Err(Error::Return(val))
        }
        Statement::Expression(expr) => eval(expr, env),
    }
}

/// Evaluate a block. An in-flight `return` (or error) propagates without
/// being unwrapped here: only function application and the program top
/// level unwrap it.
fn eval_block(block: &BlockStatement, env: &Env) -> Result<MonkeyVal> {
    let mut result = MonkeyVal::Null;
    for stmt in &block.statements {
        result = eval_statement(stmt, env)?;
    }
    Ok(result)
}

// ============================================================================
// Expressions
// ============================================================================

/// Resolve an identifier: the lexical environment first, then the builtin
/// table. User bindings shadow builtins.
fn eval_identifier(name: &str, env: &Env) -> Result<MonkeyVal> {
    match env.lookup(name) {
        Ok(val) => Ok(val),
        Err(_) => builtins::lookup(name)
            .map(MonkeyVal::Builtin)
            .ok_or_else(|| Error::identifier_not_found(name)),
    }
}

fn eval_prefix_expression(op: PrefixOp, right: &MonkeyVal) -> Result<MonkeyVal> {
    match op {
        PrefixOp::Bang => Ok(MonkeyVal::Bool(!right.is_truthy())),
        PrefixOp::Minus => match right {
            MonkeyVal::Int(n) => Ok(MonkeyVal::Int(n.wrapping_neg())),
            other => Err(Error::unknown_prefix(op, other.type_name())),
        },
    }
}

fn eval_infix_expression(op: InfixOp, left: &MonkeyVal, right: &MonkeyVal) -> Result<MonkeyVal> {
    match (left, right) {
        (MonkeyVal::Int(l), MonkeyVal::Int(r)) => eval_integer_infix(op, *l, *r),
        (MonkeyVal::Str(l), MonkeyVal::Str(r)) => match op {
            InfixOp::Plus => {
                let mut concat = String::with_capacity(l.len() + r.len());
                concat.push_str(l);
                concat.push_str(r);
                Ok(MonkeyVal::string(concat))
            }
            _ => Err(Error::unknown_infix(left.type_name(), op, right.type_name())),
        },
        // Booleans compare by identity; sound because the two values are
        // singletons of the domain
        (MonkeyVal::Bool(l), MonkeyVal::Bool(r)) => match op {
            InfixOp::Eq => Ok(MonkeyVal::Bool(l == r)),
            InfixOp::NotEq => Ok(MonkeyVal::Bool(l != r)),
            _ => Err(Error::unknown_infix(left.type_name(), op, right.type_name())),
        },
        _ if left.type_name() != right.type_name() => {
            Err(Error::type_mismatch(left.type_name(), op, right.type_name()))
        }
        _ => Err(Error::unknown_infix(left.type_name(), op, right.type_name())),
    }
}

fn eval_integer_infix(op: InfixOp, left: i64, right: i64) -> Result<MonkeyVal> {
    let result = match op {
        InfixOp::Plus => MonkeyVal::Int(left.wrapping_add(right)),
        InfixOp::Minus => MonkeyVal::Int(left.wrapping_sub(right)),
        InfixOp::Asterisk => MonkeyVal::Int(left.wrapping_mul(right)),
        InfixOp::Slash => {
            if right == 0 {
                return Err(Error::DivisionByZero);
            }
            // Truncation toward zero; wrapping_div covers i64::MIN / -1
            MonkeyVal::Int(left.wrapping_div(right))
        }
        InfixOp::Lt => MonkeyVal::Bool(left < right),
        InfixOp::Gt => MonkeyVal::Bool(left > right),
        InfixOp::Eq => MonkeyVal::Bool(left == right),
        InfixOp::NotEq => MonkeyVal::Bool(left != right),
    };
    Ok(result)
}

fn eval_index_expression(left: &MonkeyVal, index: &MonkeyVal) -> Result<MonkeyVal> {
    match (left, index) {
        (MonkeyVal::Array(elements), MonkeyVal::Int(i)) => {
            // Out-of-range and negative indices yield null, not an error
            if *i < 0 || *i as usize >= elements.len() {
                Ok(MonkeyVal::Null)
            } else {
                Ok(elements[*i as usize].clone())
            }
        }
        (MonkeyVal::Hash(pairs), key) => {
            let hash_key = key
                .hash_key()
                .ok_or_else(|| Error::unusable_hash_key(key.type_name()))?;
            Ok(pairs
                .get(&hash_key)
                .map(|pair| pair.value.clone())
                .unwrap_or(MonkeyVal::Null))
        }
        _ => Err(Error::index_not_supported(left.type_name())),
    }
}

fn eval_hash_literal(pairs: &[(Expression, Expression)], env: &Env) -> Result<MonkeyVal> {
    let mut hash: HashMap<_, HashPair> = HashMap::new();
    for (key_expr, value_expr) in pairs {
        let key = eval(key_expr, env)?;
        let hash_key = key
            .hash_key()
            .ok_or_else(|| Error::unusable_hash_key(key.type_name()))?;
        let value = eval(value_expr, env)?;
        // Later pairs with an equal key overwrite earlier ones
        hash.insert(hash_key, HashPair { key, value });
    }
    Ok(MonkeyVal::Hash(hash))
}

// ============================================================================
// Function application
// ============================================================================

/// Apply a function or builtin to arguments.
pub fn apply(func: &MonkeyVal, args: &[MonkeyVal]) -> Result<MonkeyVal> {
    match func {
        MonkeyVal::Fn(f) => apply_fn(f, args),
        MonkeyVal::Builtin(b) => b.call(args),
        other => Err(Error::not_a_function(other.type_name())),
    }
}

/// Apply a user-defined function.
///
/// Arity is not checked: parameters are bound positionally to as many
/// arguments as were supplied. A missing parameter is simply absent from
/// the call frame (a later reference reports `identifier not found`);
/// extra arguments are ignored.
fn apply_fn(func: &MonkeyFn, args: &[MonkeyVal]) -> Result<MonkeyVal> {
    // The call frame's parent is the closure's captured environment, not
    // the caller's
    let fn_env = func.env.child();
    for (param, arg) in func.parameters.iter().zip(args.iter()) {
        fn_env.define(param.clone(), arg.clone());
    }

    match eval_block(&func.body, &fn_env) {
        Ok(val) => Ok(val),
        Err(Error::Return(val)) => Ok(val),
        Err(err) => Err(err),
    }
}
