// monkey-core - Built-in functions
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Built-in functions for Monkey.
//!
//! The table is fixed: `len`, `first`, `last`, `rest`, `push`, `puts`.
//! Identifier resolution consults it only after the lexical environment
//! misses, so user bindings shadow builtins.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::{MonkeyBuiltin, MonkeyVal};

/// The builtin table, in resolution order.
const BUILTINS: &[MonkeyBuiltin] = &[
    MonkeyBuiltin::new("len", builtin_len),
    MonkeyBuiltin::new("first", builtin_first),
    MonkeyBuiltin::new("last", builtin_last),
    MonkeyBuiltin::new("rest", builtin_rest),
    MonkeyBuiltin::new("push", builtin_push),
    MonkeyBuiltin::new("puts", builtin_puts),
];

/// Look up a builtin by name.
#[must_use]
pub fn lookup(name: &str) -> Option<MonkeyBuiltin> {
    BUILTINS.iter().find(|b| b.name() == name).copied()
}

// ============================================================================
// puts output sink
// ============================================================================

thread_local! {
    /// Where `puts` writes. None means standard output.
    static PUTS_SINK: RefCell<Option<Rc<RefCell<dyn Write>>>> = const { RefCell::new(None) };
}

/// Redirect `puts` output for this thread. `None` restores standard
/// output. Returns the previous sink.
pub fn set_puts_sink(
    sink: Option<Rc<RefCell<dyn Write>>>,
) -> Option<Rc<RefCell<dyn Write>>> {
    PUTS_SINK.with(|s| s.replace(sink))
}

fn puts_line(val: &MonkeyVal) {
    PUTS_SINK.with(|s| match s.borrow().as_ref() {
        Some(sink) => {
            let _ = writeln!(sink.borrow_mut(), "{}", val);
        }
        None => {
            let _ = writeln!(io::stdout(), "{}", val);
        }
    });
}

// ============================================================================
// Builtin implementations
// ============================================================================

/// `len(x)`: byte length of a string, or element count of an array.
fn builtin_len(args: &[MonkeyVal]) -> Result<MonkeyVal> {
    if args.len() != 1 {
        return Err(Error::arity(args.len(), 1));
    }

    match &args[0] {
        MonkeyVal::Str(s) => Ok(MonkeyVal::Int(s.len() as i64)),
        MonkeyVal::Array(elements) => Ok(MonkeyVal::Int(elements.len() as i64)),
        other => Err(Error::unsupported_argument("len", other.type_name())),
    }
}

/// `first(array)`: element 0, or null if the array is empty.
fn builtin_first(args: &[MonkeyVal]) -> Result<MonkeyVal> {
    if args.len() != 1 {
        return Err(Error::arity(args.len(), 1));
    }

    match &args[0] {
        MonkeyVal::Array(elements) => {
            Ok(elements.front().cloned().unwrap_or(MonkeyVal::Null))
        }
        other => Err(Error::unsupported_argument("first", other.type_name())),
    }
}

/// `last(array)`: the last element, or null if the array is empty.
fn builtin_last(args: &[MonkeyVal]) -> Result<MonkeyVal> {
    if args.len() != 1 {
        return Err(Error::arity(args.len(), 1));
    }

    match &args[0] {
        MonkeyVal::Array(elements) => {
            Ok(elements.back().cloned().unwrap_or(MonkeyVal::Null))
        }
        other => Err(Error::unsupported_argument("last", other.type_name())),
    }
}

/// `rest(array)`: a new array of everything after the first element;
/// null for an empty array.
fn builtin_rest(args: &[MonkeyVal]) -> Result<MonkeyVal> {
    if args.len() != 1 {
        return Err(Error::arity(args.len(), 1));
    }

    match &args[0] {
        MonkeyVal::Array(elements) => {
            if elements.is_empty() {
                Ok(MonkeyVal::Null)
            } else {
                Ok(MonkeyVal::Array(elements.clone().split_at(1).1))
            }
        }
        other => Err(Error::unsupported_argument("rest", other.type_name())),
    }
}

/// `push(array, v, ...)`: a new array with the extra values appended.
/// The input array is not mutated.
fn builtin_push(args: &[MonkeyVal]) -> Result<MonkeyVal> {
    if args.len() < 2 {
        return Err(Error::arity_at_least(args.len(), 2));
    }

    match &args[0] {
        MonkeyVal::Array(elements) => {
            let mut appended = elements.clone();
            for arg in &args[1..] {
                appended.push_back(arg.clone());
            }
            Ok(MonkeyVal::Array(appended))
        }
        other => Err(Error::unsupported_argument_want(
            "push",
            "ARRAY",
            other.type_name(),
        )),
    }
}

/// `puts(v, ...)`: print each argument's inspection string on its own
/// line. Returns null.
fn builtin_puts(args: &[MonkeyVal]) -> Result<MonkeyVal> {
    if args.is_empty() {
        return Err(Error::arity_at_least(0, 1));
    }

    for arg in args {
        puts_line(arg);
    }
    Ok(MonkeyVal::Null)
}
