// monkey-core - Error message tests
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Integration tests for evaluation errors: every template the evaluator
//! can produce, and the short-circuit discipline that carries the first
//! error to the top unchanged.

mod common;

use common::{assert_error, eval_str};
use monkey_core::set_max_eval_depth;

// =============================================================================
// Operator errors
// =============================================================================

#[test]
fn test_type_mismatch() {
    assert_error("5 + true", "type mismatch: INTEGER + BOOLEAN");
    assert_error("5 + true; 5;", "type mismatch: INTEGER + BOOLEAN");
    assert_error("\"hello\" - 5", "type mismatch: STRING - INTEGER");
    assert_error("[1] == 1", "type mismatch: ARRAY == INTEGER");
}

#[test]
fn test_unknown_prefix_operator() {
    assert_error("-true", "unknown operator: -BOOLEAN");
    assert_error("-\"str\"", "unknown operator: -STRING");
}

#[test]
fn test_unknown_infix_operator() {
    assert_error("true + false;", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("5; true + false; 5", "unknown operator: BOOLEAN + BOOLEAN");
    assert_error("true < false", "unknown operator: BOOLEAN < BOOLEAN");
    assert_error(
        "if (10 > 1) { true + false; }",
        "unknown operator: BOOLEAN + BOOLEAN",
    );
    assert_error("\"Hello\" - \"World\"", "unknown operator: STRING - STRING");
    assert_error("\"a\" < \"b\"", "unknown operator: STRING < STRING");
}

#[test]
fn test_unknown_operator_in_nested_return() {
    let input = "
        if (10 > 1) {
            if (10 > 1) {
                return true + false;
            }

            return 1;
        }
    ";
    assert_error(input, "unknown operator: BOOLEAN + BOOLEAN");
}

#[test]
fn test_equality_on_composite_types() {
    // Identity comparison is defined for booleans only; same-typed
    // composites fall through to the unknown-operator rule
    assert_error("[1] == [1]", "unknown operator: ARRAY == ARRAY");
    assert_error("{} != {}", "unknown operator: HASH != HASH");
    assert_error(
        "let a = if (false) { 1 }; let b = if (false) { 2 }; a == b",
        "unknown operator: NULL == NULL",
    );
}

#[test]
fn test_division_by_zero() {
    assert_error("1 / 0", "division by zero");
    assert_error("let x = 10; x / (5 - 5)", "division by zero");
}

// =============================================================================
// Resolution and application errors
// =============================================================================

#[test]
fn test_identifier_not_found() {
    assert_error("foobar", "identifier not found: foobar");
    assert_error("let a = 5; b", "identifier not found: b");
}

#[test]
fn test_not_a_function() {
    assert_error("5(1)", "not a function: INTEGER");
    assert_error("let x = true; x()", "not a function: BOOLEAN");
    assert_error("\"str\"()", "not a function: STRING");
}

// =============================================================================
// Hash and index errors
// =============================================================================

#[test]
fn test_unusable_hash_key() {
    assert_error(
        "{\"name\": \"Monkey\"}[fn(x) { x }];",
        "unusable as hash key: FUNCTION",
    );
    assert_error("{[1, 2]: 1}", "unusable as hash key: ARRAY");
    assert_error("{{}: 1}", "unusable as hash key: HASH");
}

#[test]
fn test_index_not_supported() {
    assert_error("true[0]", "index operator not supported: BOOLEAN");
    assert_error("5[0]", "index operator not supported: INTEGER");
    assert_error("\"str\"[0]", "index operator not supported: STRING");
    // An array indexed by a non-integer reports the array's type
    assert_error("[1, 2, 3][true]", "index operator not supported: ARRAY");
}

// =============================================================================
// Short-circuit discipline
// =============================================================================

#[test]
fn test_error_aborts_array_literal() {
    assert_error("[1, 2 + true, unused]", "type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn test_error_aborts_call_arguments() {
    assert_error(
        "len([1], -true)",
        "unknown operator: -BOOLEAN",
    );
}

#[test]
fn test_error_aborts_hash_literal() {
    assert_error("{\"k\": 1 + true}", "type mismatch: INTEGER + BOOLEAN");
    assert_error("{1 + true: 1}", "type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn test_error_propagates_out_of_let() {
    assert_error("let x = 1 + true; x", "type mismatch: INTEGER + BOOLEAN");
}

#[test]
fn test_error_propagates_out_of_function_call() {
    assert_error(
        "let f = fn() { 1 + true }; f() + 5",
        "type mismatch: INTEGER + BOOLEAN",
    );
}

// =============================================================================
// Recursion depth
// =============================================================================

#[test]
fn test_runaway_recursion_is_an_error() {
    let previous = set_max_eval_depth(200);
    let result = eval_str("let f = fn(x) { f(x) }; f(0);");
    let _ = set_max_eval_depth(previous);

    let message = result.unwrap_err();
    assert!(
        message.contains("stack overflow"),
        "unexpected message: {}",
        message
    );
}
