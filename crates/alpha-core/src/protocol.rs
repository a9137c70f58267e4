//! The accessor protocol every class starts from: `get`, `set`, `clone`
//!
//! These are plain functions so an overriding behavior can re-invoke base
//! semantics explicitly:
//!
//! ```ignore
//! .behavior("set", |this, args| {
//!     protocol::set(this, args)?;
//!     // widget-specific side effects
//!     Ok(Value::Object(this.clone()))
//! })
//! ```

use crate::assign;
use crate::behavior::{Behavior, BehaviorTable};
use crate::error::{AlphaError, AlphaResult};
use crate::instance::Instance;
use crate::value::{PropertyMap, Value};

/// Name of the getter behavior
pub const GET: &str = "get";
/// Name of the setter behavior
pub const SET: &str = "set";
/// Name of the clone behavior
pub const CLONE: &str = "clone";

/// A fresh table holding the three protocol behaviors
pub fn base_table() -> BehaviorTable {
    let mut table = BehaviorTable::new();
    table.insert(GET, Behavior::new(get));
    table.insert(SET, Behavior::new(set));
    table.insert(CLONE, Behavior::new(clone));
    table
}

/// `get(name)` returns one own field; `get([names..])` returns a map.
///
/// The list form dispatches each name through the receiver's `get`, so an
/// override sees every lookup.
pub fn get(this: &Instance, args: &[Value]) -> AlphaResult<Value> {
    match args.first() {
        Some(Value::List(names)) => {
            let names = names.borrow().clone();
            if names.is_empty() {
                return Err(AlphaError::EmptySequence);
            }

            let mut result = PropertyMap::new();
            for name in names {
                let key = name.as_str().map(str::to_string).ok_or_else(|| {
                    AlphaError::invalid_parameter(
                        GET,
                        format!("property names must be text, got {}", name.type_name()),
                    )
                })?;
                let value = this.call(GET, &[name])?;
                result.insert(key, value);
            }
            Ok(Value::map(result))
        }
        Some(Value::Str(name)) => this.own(name).ok_or_else(|| AlphaError::PropertyNotFound {
            class: this.class().name().to_string(),
            name: name.clone(),
        }),
        other => Err(AlphaError::invalid_parameter(
            GET,
            format!(
                "parameter must be text or a list, got {}",
                other.map_or("nothing", Value::type_name)
            ),
        )),
    }
}

/// `set(name, value)` assigns one field under the receiver class's strict
/// flag; `set(map)` re-dispatches `set(name, value)` per entry, in order.
/// Returns the receiver.
///
/// Any other arity fails rather than silently doing nothing.
pub fn set(this: &Instance, args: &[Value]) -> AlphaResult<Value> {
    match args {
        [name, value] => {
            let name = name.as_str().ok_or_else(|| {
                AlphaError::invalid_parameter(
                    SET,
                    format!("property to modify must be text, got {}", name.type_name()),
                )
            })?;
            assign::setter(
                this,
                [(name.to_string(), value.clone())],
                this.class().is_strict(),
            )?;
        }
        [values] => {
            let entries = values.entries().ok_or_else(|| {
                AlphaError::invalid_parameter(
                    SET,
                    format!(
                        "set of properties to modify must be a structured value, got {}",
                        values.type_name()
                    ),
                )
            })?;
            for (name, value) in entries {
                this.call(SET, &[Value::Str(name), value])?;
            }
        }
        _ => {
            return Err(AlphaError::invalid_parameter(
                SET,
                format!("expected (name, value) or (map), got {} arguments", args.len()),
            ))
        }
    }

    Ok(Value::Object(this.clone()))
}

/// Construct a new instance of the receiver's class with the receiver as
/// data. Shallow: nested values are shared, and init runs again.
pub fn clone(this: &Instance, _args: &[Value]) -> AlphaResult<Value> {
    let copy = this
        .class()
        .instantiate(Some(&Value::Object(this.clone())))?;
    Ok(Value::Object(copy))
}
