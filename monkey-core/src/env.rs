// monkey-core - Environment for lexical scoping
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Environment for variable bindings with lexical scoping.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::value::MonkeyVal;

/// A lexical environment for variable bindings.
///
/// Environments form a chain through parent references, enabling lexical
/// scoping. Each environment has its own bindings map and optionally a
/// parent environment for outer scope lookup. Environments are shared by
/// reference: a closure's captured environment outlives the call that
/// constructed it.
///
/// # Examples
///
/// ```
/// use monkey_core::{Env, MonkeyVal};
///
/// // Create a root environment
/// let env = Env::new();
///
/// // Define a binding
/// env.define("x", MonkeyVal::int(42));
///
/// // Look up the binding
/// assert_eq!(env.lookup("x").unwrap(), MonkeyVal::int(42));
///
/// // A child environment inherits parent bindings
/// let child = env.child();
/// assert_eq!(child.lookup("x").unwrap(), MonkeyVal::int(42));
///
/// // The child can shadow parent bindings without touching the parent
/// child.define("x", MonkeyVal::int(100));
/// assert_eq!(child.lookup("x").unwrap(), MonkeyVal::int(100));
/// assert_eq!(env.lookup("x").unwrap(), MonkeyVal::int(42));
/// ```
#[derive(Debug, Clone)]
pub struct Env {
    inner: Rc<RefCell<EnvInner>>,
}

#[derive(Debug)]
struct EnvInner {
    bindings: HashMap<String, MonkeyVal>,
    parent: Option<Env>,
}

impl Env {
    /// Create a new root environment with no parent.
    #[must_use]
    pub fn new() -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: None,
            })),
        }
    }

    /// Create a child environment with this environment as parent.
    #[must_use]
    pub fn child(&self) -> Self {
        Env {
            inner: Rc::new(RefCell::new(EnvInner {
                bindings: HashMap::new(),
                parent: Some(self.clone()),
            })),
        }
    }

    /// Define a binding in this environment (never in a parent).
    pub fn define(&self, name: impl Into<String>, val: MonkeyVal) {
        self.inner.borrow_mut().bindings.insert(name.into(), val);
    }

    /// Look up a name in this environment or the parent chain.
    /// Uses iterative traversal to avoid stack overflow on deep chains.
    pub fn lookup(&self, name: &str) -> Result<MonkeyVal> {
        let mut current = self.clone();
        loop {
            let inner = current.inner.borrow();
            if let Some(val) = inner.bindings.get(name) {
                return Ok(val.clone());
            }
            let parent = inner.parent.clone();
            drop(inner);
            match parent {
                Some(p) => current = p,
                None => return Err(Error::identifier_not_found(name)),
            }
        }
    }

    /// Check if a name is bound in this environment or the parent chain.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }
}

impl Default for Env {
    fn default() -> Self {
        Self::new()
    }
}
