// monkey-core - Error types for the Monkey evaluator
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Error types for Monkey evaluation.
//!
//! Evaluation errors are first-class: any sub-evaluation that fails aborts
//! its enclosing rule, and the error propagates unchanged to the top-level
//! caller. The language has no user-level error handling, so errors are
//! never wrapped or nested.
//!
//! # Examples
//!
//! ```
//! use monkey_core::Error;
//! use monkey_parser::ast::InfixOp;
//!
//! let err = Error::type_mismatch("INTEGER", InfixOp::Plus, "BOOLEAN");
//! assert_eq!(err.to_string(), "type mismatch: INTEGER + BOOLEAN");
//!
//! let err = Error::arity(2, 1);
//! assert_eq!(err.to_string(), "wrong number of arguments, got=2, want=1");
//! ```

use std::fmt;

use monkey_parser::ast::{InfixOp, PrefixOp};

use crate::value::MonkeyVal;

/// Result type for Monkey evaluation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during evaluation.
#[derive(Debug, Clone)]
pub enum Error {
    /// Binary operator on operands of different types
    TypeMismatch {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },
    /// Prefix operator not defined for the operand type
    UnknownPrefixOperator {
        op: PrefixOp,
        right: &'static str,
    },
    /// Infix operator not defined for the operand types
    UnknownInfixOperator {
        left: &'static str,
        op: InfixOp,
        right: &'static str,
    },
    /// Unresolved identifier after environment chain and builtin lookup
    IdentifierNotFound(String),
    /// Call target is not callable
    NotAFunction(&'static str),
    /// Non-hashable value used as a hash key
    UnusableHashKey(&'static str),
    /// Index access on an unsupported type
    IndexNotSupported(&'static str),
    /// Integer division with a zero divisor
    DivisionByZero,
    /// Builtin received an argument of an unsupported type
    UnsupportedArgument {
        builtin: &'static str,
        want: Option<&'static str>,
        got: &'static str,
    },
    /// Wrong number of arguments to a builtin
    ArityError { expected: AritySpec, got: usize },
    /// Evaluation recursed past the configured depth limit
    StackOverflow { max: usize },
    /// In-flight `return` (control flow, not a real error). Trapped and
    /// unwrapped at function application and at program top level, so it
    /// is never observable to user code.
    Return(MonkeyVal),
}

/// Specification for expected arity.
#[derive(Debug, Clone, Copy)]
pub enum AritySpec {
    Exact(usize),
    AtLeast(usize),
}

impl fmt::Display for AritySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AritySpec::Exact(n) => write!(f, "{}", n),
            AritySpec::AtLeast(n) => write!(f, "{}+", n),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::TypeMismatch { left, op, right } => {
                write!(f, "type mismatch: {} {} {}", left, op, right)
            }
            Error::UnknownPrefixOperator { op, right } => {
                write!(f, "unknown operator: {}{}", op, right)
            }
            Error::UnknownInfixOperator { left, op, right } => {
                write!(f, "unknown operator: {} {} {}", left, op, right)
            }
            Error::IdentifierNotFound(name) => {
                write!(f, "identifier not found: {}", name)
            }
            Error::NotAFunction(type_name) => {
                write!(f, "not a function: {}", type_name)
            }
            Error::UnusableHashKey(type_name) => {
                write!(f, "unusable as hash key: {}", type_name)
            }
            Error::IndexNotSupported(type_name) => {
                write!(f, "index operator not supported: {}", type_name)
            }
            Error::DivisionByZero => {
                write!(f, "division by zero")
            }
            Error::UnsupportedArgument { builtin, want, got } => {
                if let Some(want) = want {
                    write!(
                        f,
                        "argument to `{}` not supported, want {}, got {}",
                        builtin, want, got
                    )
                } else {
                    write!(f, "argument to `{}` not supported, got {}", builtin, got)
                }
            }
            Error::ArityError { expected, got } => {
                write!(f, "wrong number of arguments, got={}, want={}", got, expected)
            }
            Error::StackOverflow { max } => {
                write!(f, "stack overflow: maximum recursion depth ({}) exceeded", max)
            }
            // Never printed in normal operation: the evaluator traps this
            // variant before it reaches a caller. Render the carried value
            // for completeness.
            Error::Return(val) => write!(f, "{}", val),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Create a type mismatch error.
    pub fn type_mismatch(left: &'static str, op: InfixOp, right: &'static str) -> Self {
        Error::TypeMismatch { left, op, right }
    }

    /// Create an unknown-operator error for a prefix expression.
    pub fn unknown_prefix(op: PrefixOp, right: &'static str) -> Self {
        Error::UnknownPrefixOperator { op, right }
    }

    /// Create an unknown-operator error for an infix expression.
    pub fn unknown_infix(left: &'static str, op: InfixOp, right: &'static str) -> Self {
        Error::UnknownInfixOperator { left, op, right }
    }

    /// Create an identifier-not-found error.
    pub fn identifier_not_found(name: impl Into<String>) -> Self {
        Error::IdentifierNotFound(name.into())
    }

    /// Create a not-a-function error.
    pub fn not_a_function(type_name: &'static str) -> Self {
        Error::NotAFunction(type_name)
    }

    /// Create an unusable-as-hash-key error.
    pub fn unusable_hash_key(type_name: &'static str) -> Self {
        Error::UnusableHashKey(type_name)
    }

    /// Create an index-not-supported error.
    pub fn index_not_supported(type_name: &'static str) -> Self {
        Error::IndexNotSupported(type_name)
    }

    /// Create an unsupported-argument error for a builtin.
    pub fn unsupported_argument(builtin: &'static str, got: &'static str) -> Self {
        Error::UnsupportedArgument {
            builtin,
            want: None,
            got,
        }
    }

    /// Create an unsupported-argument error naming the wanted type.
    pub fn unsupported_argument_want(
        builtin: &'static str,
        want: &'static str,
        got: &'static str,
    ) -> Self {
        Error::UnsupportedArgument {
            builtin,
            want: Some(want),
            got,
        }
    }

    /// Create an arity error for exact arity.
    pub fn arity(got: usize, want: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::Exact(want),
            got,
        }
    }

    /// Create an arity error for a variadic lower bound.
    pub fn arity_at_least(got: usize, want: usize) -> Self {
        Error::ArityError {
            expected: AritySpec::AtLeast(want),
            got,
        }
    }
}
