//! Shared behaviors and the per-class behavior table

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::AlphaResult;
use crate::instance::Instance;
use crate::value::Value;

/// Signature of a behavior body: receiver first, then call arguments
pub type BehaviorFn = dyn Fn(&Instance, &[Value]) -> AlphaResult<Value>;

/// A named, invocable property shared by every instance of a class.
///
/// Cloning a `Behavior` clones the handle, not the closure.
#[derive(Clone)]
pub struct Behavior {
    func: Rc<BehaviorFn>,
}

impl Behavior {
    /// Wrap a closure as a behavior
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> AlphaResult<Value> + 'static,
    {
        Self {
            func: Rc::new(func),
        }
    }

    /// Invoke with `this` bound to `receiver`
    pub fn call(&self, receiver: &Instance, args: &[Value]) -> AlphaResult<Value> {
        (self.func)(receiver, args)
    }

    /// Check if both handles point at the same closure
    pub fn ptr_eq(&self, other: &Behavior) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Behavior({:p})", Rc::as_ptr(&self.func) as *const ())
    }
}

/// Name -> behavior mapping, iterated in insertion order
#[derive(Debug, Clone, Default)]
pub struct BehaviorTable {
    entries: IndexMap<String, Behavior>,
}

impl BehaviorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a behavior
    pub fn insert(&mut self, name: impl Into<String>, behavior: Behavior) {
        self.entries.insert(name.into(), behavior);
    }

    /// Look up a behavior by name
    pub fn get(&self, name: &str) -> Option<&Behavior> {
        self.entries.get(name)
    }

    /// Check if a behavior exists
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Copy every entry of `other` over this table (entries of `other` win)
    pub fn merge(&mut self, other: &BehaviorTable) {
        for (name, behavior) in &other.entries {
            self.entries.insert(name.clone(), behavior.clone());
        }
    }

    /// Behavior names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over entries
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Behavior)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of behaviors
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
