// monkey-core - Common test utilities
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Shared test helpers for Monkey integration tests.
//!
//! # Usage
//!
//! In your test file, add:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

pub use monkey_core::{Env, MonkeyVal, eval_program};
pub use monkey_parser::Parser;

/// Create a fresh root environment.
#[must_use]
pub fn new_env() -> Env {
    Env::new()
}

/// Evaluate a Monkey program string in a fresh environment.
///
/// # Returns
///
/// Returns the evaluated value, or an error message string. Parse errors
/// surface as an `Err` prefixed with `parse errors:` so a test never
/// silently evaluates half a program.
pub fn eval_str(s: &str) -> Result<MonkeyVal, String> {
    eval_str_with_env(s, &Env::new())
}

/// Evaluate a Monkey program string in the given environment.
pub fn eval_str_with_env(s: &str, env: &Env) -> Result<MonkeyVal, String> {
    let mut parser = Parser::new(s);
    let program = parser.parse_program();
    if !parser.errors().is_empty() {
        return Err(format!("parse errors: {}", parser.errors().join("; ")));
    }
    eval_program(&program, env).map_err(|e| e.to_string())
}

/// Assert that a program evaluates to an integer.
pub fn assert_int(input: &str, expected: i64) {
    match eval_str(input) {
        Ok(MonkeyVal::Int(n)) => assert_eq!(n, expected, "input {:?}", input),
        other => panic!(
            "expected integer {} for {:?}, got {:?}",
            expected, input, other
        ),
    }
}

/// Assert that a program evaluates to a boolean.
pub fn assert_bool(input: &str, expected: bool) {
    match eval_str(input) {
        Ok(MonkeyVal::Bool(b)) => assert_eq!(b, expected, "input {:?}", input),
        other => panic!(
            "expected boolean {} for {:?}, got {:?}",
            expected, input, other
        ),
    }
}

/// Assert that a program evaluates to null.
pub fn assert_null(input: &str) {
    match eval_str(input) {
        Ok(MonkeyVal::Null) => {}
        other => panic!("expected null for {:?}, got {:?}", input, other),
    }
}

/// Assert that a program evaluates to a value with the given inspection
/// string.
pub fn assert_inspect(input: &str, expected: &str) {
    match eval_str(input) {
        Ok(val) => assert_eq!(val.to_string(), expected, "input {:?}", input),
        Err(e) => panic!("unexpected error for {:?}: {}", input, e),
    }
}

/// Assert that a program fails with exactly the given error message.
pub fn assert_error(input: &str, expected: &str) {
    match eval_str(input) {
        Err(msg) => assert_eq!(msg, expected, "input {:?}", input),
        Ok(val) => panic!(
            "expected error {:?} for {:?}, got value {:?}",
            expected, input, val
        ),
    }
}
