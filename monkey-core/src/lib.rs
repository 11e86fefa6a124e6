// monkey-core - Runtime and evaluator for the Monkey programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! # monkey-core
//!
//! Runtime and evaluator for the Monkey programming language.
//! Provides an AST-walking interpreter over the AST produced by
//! `monkey-parser`.
//!
//! # Quick Start
//!
//! ```
//! use monkey_core::{Env, eval_program};
//! use monkey_parser::Parser;
//!
//! let mut parser = Parser::new("let add = fn(a, b) { a + b }; add(2, 3)");
//! let program = parser.parse_program();
//! assert!(parser.errors().is_empty());
//!
//! // The environment is caller-owned and persists across programs,
//! // which is how REPL bindings survive between lines.
//! let env = Env::new();
//! let result = eval_program(&program, &env).unwrap();
//! assert_eq!(result.to_string(), "5");
//! ```
//!
//! # Core Components
//!
//! - [`MonkeyVal`] - The run-time value domain
//! - [`Env`] - Lexical environment for variable bindings
//! - [`eval_program`] - Evaluate a parsed program
//! - [`builtins`] - The fixed table of native functions

pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod value;

pub use builtins::set_puts_sink;
pub use env::Env;
pub use error::{AritySpec, Error, Result};
pub use eval::{apply, eval, eval_program, get_max_eval_depth, set_max_eval_depth};
pub use value::{HashKey, HashPair, MonkeyBuiltin, MonkeyFn, MonkeyVal};

// Re-export parser types for convenience
pub use monkey_parser::{Parser, Program};
