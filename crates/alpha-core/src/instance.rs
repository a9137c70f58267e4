//! Instances: per-instance field storage plus dispatch through the class

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::class::Class;
use crate::error::{AlphaError, AlphaResult};
use crate::protocol;
use crate::value::{PropertyMap, Value};

struct InstanceInner {
    class: Class,
    fields: RefCell<PropertyMap>,
}

/// One constructed object.
///
/// Fields are owned per instance; behaviors are resolved through the
/// class's shared table. Cloning an `Instance` clones the handle; use
/// [`Instance::clone_instance`] for the `clone` protocol behavior.
#[derive(Clone)]
pub struct Instance(Rc<InstanceInner>);

impl Instance {
    pub(crate) fn new(class: Class) -> Self {
        Self(Rc::new(InstanceInner {
            class,
            fields: RefCell::new(PropertyMap::new()),
        }))
    }

    /// Class that constructed this instance
    pub fn class(&self) -> &Class {
        &self.0.class
    }

    /// Check if the instance owns a field of this name
    pub fn has_own(&self, name: &str) -> bool {
        self.0.fields.borrow().contains_key(name)
    }

    /// Own field names in insertion order
    pub fn field_names(&self) -> Vec<String> {
        self.0.fields.borrow().keys().cloned().collect()
    }

    /// Snapshot of the own fields (nested values are shared, not copied)
    pub fn fields(&self) -> PropertyMap {
        self.0.fields.borrow().clone()
    }

    pub(crate) fn own(&self, name: &str) -> Option<Value> {
        self.0.fields.borrow().get(name).cloned()
    }

    pub(crate) fn insert_field(&self, name: String, value: Value) {
        self.0.fields.borrow_mut().insert(name, value);
    }

    /// Invoke a behavior by name.
    ///
    /// An own field of the same name shadows the class table.
    pub fn call(&self, name: &str, args: &[Value]) -> AlphaResult<Value> {
        let behavior = match self.own(name) {
            Some(Value::Behavior(b)) => b,
            Some(_) => {
                return Err(AlphaError::NotCallable {
                    class: self.class().name().to_string(),
                    name: name.to_string(),
                })
            }
            None => self
                .class()
                .behavior(name)
                .ok_or_else(|| AlphaError::BehaviorNotFound {
                    class: self.class().name().to_string(),
                    name: name.to_string(),
                })?,
        };

        behavior.call(self, args)
    }

    /// Read one field through the `get` behavior
    pub fn get(&self, name: &str) -> AlphaResult<Value> {
        self.call(protocol::GET, &[Value::from(name)])
    }

    /// Read several fields through the `get` behavior
    pub fn get_many<I, S>(&self, names: I) -> AlphaResult<PropertyMap>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names.into_iter().map(|n| Value::Str(n.into())).collect();
        match self.call(protocol::GET, &[Value::list(names)])? {
            Value::Map(result) => Ok(result.borrow().clone()),
            other => Err(AlphaError::invalid_parameter(
                protocol::GET,
                format!("expected a map of values, got {}", other.type_name()),
            )),
        }
    }

    /// Assign one field through the `set` behavior (chainable)
    pub fn set(&self, name: &str, value: impl Into<Value>) -> AlphaResult<&Self> {
        self.call(protocol::SET, &[Value::from(name), value.into()])?;
        Ok(self)
    }

    /// Assign every entry of `values` through the `set` behavior (chainable)
    pub fn set_all(&self, values: PropertyMap) -> AlphaResult<&Self> {
        self.call(protocol::SET, &[Value::map(values)])?;
        Ok(self)
    }

    /// Shallow clone through the `clone` behavior
    pub fn clone_instance(&self) -> AlphaResult<Instance> {
        match self.call(protocol::CLONE, &[])? {
            Value::Object(instance) => Ok(instance),
            other => Err(AlphaError::invalid_parameter(
                protocol::CLONE,
                format!("expected an instance, got {}", other.type_name()),
            )),
        }
    }

    /// Check if this instance was constructed by exactly `class`
    pub fn is_instance_of(&self, class: &Class) -> bool {
        self.class().ptr_eq(class)
    }

    /// Check if both handles refer to the same instance
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("class", &self.class().name())
            .field("fields", &self.field_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::behavior::Behavior;
    use crate::class::ClassDescription;

    #[test]
    fn test_own_fields_match_declared() {
        let class = ClassDescription::new("Point")
            .field("x", 0)
            .field("y", 0)
            .behavior("norm", |_, _| Ok(Value::Null))
            .build()
            .unwrap();
        let p = class.new_instance().unwrap();

        assert_eq!(p.field_names(), vec!["x", "y"]);
        assert!(!p.has_own("norm"));
        assert!(p.is_instance_of(&class));
    }

    #[test]
    fn test_own_field_shadows_behavior() {
        let base = ClassDescription::new("Base")
            .behavior("effect", |_, _| Ok(Value::from("base")))
            .build()
            .unwrap();
        let child = ClassDescription::new("Child")
            .with_parent(&base)
            .field("effect", Value::Null)
            .build()
            .unwrap();

        let b = base.new_instance().unwrap();
        assert_eq!(b.call("effect", &[]).unwrap(), Value::from("base"));

        let c = child.new_instance().unwrap();
        assert!(matches!(c.call("effect", &[]), Err(AlphaError::NotCallable { .. })));
    }

    #[test]
    fn test_callable_field_is_invoked() {
        let class = ClassDescription::new("Btn").field("onClick", Value::Null).build().unwrap();
        let btn = class.new_instance().unwrap();
        btn.set("onClick", Behavior::new(|this, _| Ok(Value::from(this.class().name()))))
            .unwrap();

        assert_eq!(btn.call("onClick", &[]).unwrap(), Value::from("Btn"));
    }

    #[test]
    fn test_unknown_behavior() {
        let obj = ClassDescription::new("Empty").build().unwrap().new_instance().unwrap();
        assert_eq!(
            obj.call("fly", &[]).unwrap_err(),
            AlphaError::BehaviorNotFound {
                class: "Empty".to_string(),
                name: "fly".to_string()
            }
        );
    }

    #[test]
    fn test_chained_set() {
        let obj = ClassDescription::new("Human").build().unwrap().new_instance().unwrap();
        obj.set("name", "Bobby").unwrap().set("age", 20).unwrap();

        assert_eq!(obj.get("name").unwrap(), Value::from("Bobby"));
        assert_eq!(obj.get("age").unwrap(), Value::from(20));
    }
}
