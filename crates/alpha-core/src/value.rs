//! Dynamic values stored in instance fields
//!
//! Scalars are stored inline. Lists and maps live behind `Rc<RefCell<..>>`
//! so that cloning a `Value` shares the nested storage; this is what makes
//! instance cloning shallow.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::behavior::Behavior;
use crate::class::Class;
use crate::instance::Instance;

/// Insertion-ordered property map
pub type PropertyMap = IndexMap<String, Value>;

/// Shared, mutable list storage
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable map storage
pub type MapRef = Rc<RefCell<PropertyMap>>;

/// A dynamically typed property value.
///
/// Lists and maps may end up containing themselves through their shared
/// storage. Formatting stops at such a cycle; structural equality does not,
/// so comparing two distinct self-containing values never returns.
#[derive(Clone, Default)]
pub enum Value {
    /// Absent value
    #[default]
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// Text
    Str(String),
    /// Shared sequence
    List(ListRef),
    /// Shared name -> value mapping
    Map(MapRef),
    /// Instance produced by a class
    Object(Instance),
    /// A construction function
    Class(Class),
    /// Invocable value
    Behavior(Behavior),
}

impl Value {
    /// Create a list value from owned elements
    pub fn list(elements: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(elements)))
    }

    /// Create a map value from owned entries
    pub fn map(entries: PropertyMap) -> Self {
        Value::Map(Rc::new(RefCell::new(entries)))
    }

    /// Create a map value from `(name, value)` pairs
    pub fn map_from<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Object(_) => "object",
            Value::Class(_) => "class",
            Value::Behavior(_) => "behavior",
        }
    }

    /// Check if this is null
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value can be invoked
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Behavior(_))
    }

    /// Check if this value can act as a property source (map or instance)
    pub fn is_structured(&self) -> bool {
        matches!(self, Value::Map(_) | Value::Object(_))
    }

    /// Get as boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get as integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get as float (integers widen)
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Get as text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get the shared list storage
    pub fn as_list(&self) -> Option<&ListRef> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Get the shared map storage
    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as instance
    pub fn as_object(&self) -> Option<&Instance> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get as class
    pub fn as_class(&self) -> Option<&Class> {
        match self {
            Value::Class(c) => Some(c),
            _ => None,
        }
    }

    /// Get as behavior
    pub fn as_behavior(&self) -> Option<&Behavior> {
        match self {
            Value::Behavior(b) => Some(b),
            _ => None,
        }
    }

    /// Snapshot of the entries of a structured value, in iteration order.
    ///
    /// Maps yield their entries; instances yield their own fields only.
    /// Returns `None` for anything else.
    pub fn entries(&self) -> Option<Vec<(String, Value)>> {
        match self {
            Value::Map(m) => Some(
                m.borrow()
                    .iter()
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect(),
            ),
            Value::Object(o) => Some(o.fields().into_iter().collect()),
            _ => None,
        }
    }

    /// Check if two values share the same storage (or are equal scalars)
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => a.ptr_eq(b),
            (Value::Behavior(a), Value::Behavior(b)) => a.ptr_eq(b),
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Map(a), Value::Map(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
            (Value::Object(a), Value::Object(b)) => a.ptr_eq(b),
            (Value::Class(a), Value::Class(b)) => a.ptr_eq(b),
            (Value::Behavior(a), Value::Behavior(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Str(s) => write!(f, "Str({:?})", s),
            Value::List(_) | Value::Map(_) => write_nested(self, f, &mut Vec::new(), true),
            Value::Object(o) => write!(f, "Object({})", o.class().name()),
            Value::Class(c) => write!(f, "Class({})", c.name()),
            Value::Behavior(_) => write!(f, "Behavior"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::List(_) | Value::Map(_) => write_nested(self, f, &mut Vec::new(), false),
            Value::Object(o) => write!(f, "<{} instance>", o.class().name()),
            Value::Class(c) => write!(f, "<class {}>", c.name()),
            Value::Behavior(_) => write!(f, "<behavior>"),
        }
    }
}

/// Storage address of a list or map
fn storage_ptr(value: &Value) -> Option<*const ()> {
    match value {
        Value::List(l) => Some(Rc::as_ptr(l) as *const ()),
        Value::Map(m) => Some(Rc::as_ptr(m) as *const ()),
        _ => None,
    }
}

/// Format a value, printing `[...]` / `{...}` for storage already being
/// written further up (a list or map that contains itself).
fn write_nested(
    value: &Value,
    f: &mut fmt::Formatter<'_>,
    open: &mut Vec<*const ()>,
    debug: bool,
) -> fmt::Result {
    let Some(ptr) = storage_ptr(value) else {
        return if debug {
            write!(f, "{:?}", value)
        } else {
            write!(f, "{}", value)
        };
    };

    if open.contains(&ptr) {
        return match value {
            Value::List(_) => write!(f, "[...]"),
            _ => write!(f, "{{...}}"),
        };
    }

    open.push(ptr);
    let result = match value {
        Value::List(l) => {
            let items = l.borrow();
            if debug {
                write!(f, "List(")?;
            }
            write!(f, "[")?;
            for (i, v) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write_nested(v, f, open, debug)?;
            }
            write!(f, "]")?;
            if debug {
                write!(f, ")")?;
            }
            Ok(())
        }
        Value::Map(m) => {
            let entries = m.borrow();
            if debug {
                write!(f, "Map(")?;
            }
            write!(f, "{{")?;
            for (i, (k, v)) in entries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                if debug {
                    write!(f, "{:?}: ", k)?;
                } else {
                    write!(f, "{}: ", k)?;
                }
                write_nested(v, f, open, debug)?;
            }
            write!(f, "}}")?;
            if debug {
                write!(f, ")")?;
            }
            Ok(())
        }
        _ => Ok(()),
    };
    open.pop();
    result
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(elements: Vec<Value>) -> Self {
        Value::list(elements)
    }
}

impl From<PropertyMap> for Value {
    fn from(entries: PropertyMap) -> Self {
        Value::map(entries)
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Object(instance)
    }
}

impl From<Class> for Value {
    fn from(class: Class) -> Self {
        Value::Class(class)
    }
}

impl From<Behavior> for Value {
    fn from(behavior: Behavior) -> Self {
        Value::Behavior(behavior)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}
