//! Class builder and construction functions
//!
//! A [`ClassDescription`] is turned into a [`Class`] once, at definition
//! time. The class owns a shared [`BehaviorTable`] assembled in this order:
//!
//! 1. the protocol behaviors (`get`, `set`, `clone`)
//! 2. each parent's table, in list order (later parents win)
//! 3. the class's own behaviors (always win)
//!
//! Instantiation then runs a fixed pipeline against the new instance:
//! parents' pipelines in order, own field defaults, validated data
//! assignment, init hook.

use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::assign;
use crate::behavior::{Behavior, BehaviorTable};
use crate::compose;
use crate::error::{AlphaError, AlphaResult};
use crate::instance::Instance;
use crate::partition::{partition, Partition};
use crate::protocol;
use crate::value::{PropertyMap, Value};

/// Declarative description of a class
#[derive(Debug, Clone, Default)]
pub struct ClassDescription {
    /// Class name (diagnostics and identity only)
    pub name: String,
    /// Reject undeclared names on construction and `set`
    pub strict: bool,
    /// Parent classes, composed in order; `None` entries are skipped
    pub parents: Vec<Option<Class>>,
    /// Fields and behaviors, classified at build time
    pub properties: PropertyMap,
    /// Hook run with `this` bound to the instance once construction completes
    pub init: Option<Value>,
}

impl ClassDescription {
    /// Start a description with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the strict flag
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Append a parent class
    pub fn with_parent(mut self, parent: &Class) -> Self {
        self.parents.push(Some(parent.clone()));
        self
    }

    /// Replace the parents list
    pub fn with_parents<I>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = Option<Class>>,
    {
        self.parents = parents.into_iter().collect();
        self
    }

    /// Declare a field with its default value
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Declare a behavior
    pub fn behavior<F>(mut self, name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Instance, &[Value]) -> AlphaResult<Value> + 'static,
    {
        self.properties
            .insert(name.into(), Value::Behavior(Behavior::new(func)));
        self
    }

    /// Declare a property; behaviors and fields are told apart at build time
    pub fn property(mut self, name: impl Into<String>, value: Value) -> Self {
        self.properties.insert(name.into(), value);
        self
    }

    /// Set the init hook
    pub fn with_init<F>(mut self, func: F) -> Self
    where
        F: Fn(&Instance) -> AlphaResult<()> + 'static,
    {
        self.init = Some(Value::Behavior(Behavior::new(move |this, _| {
            func(this)?;
            Ok(Value::Null)
        })));
        self
    }

    /// Set the init hook from a dynamic value (checked at construction time)
    pub fn with_init_value(mut self, init: Value) -> Self {
        self.init = if init.is_null() { None } else { Some(init) };
        self
    }

    /// Parse a dynamic description.
    ///
    /// Expects a map with `name` (text), optional `strict` (bool), optional
    /// `parents` (list of classes or nulls), optional `properties` (map) and
    /// optional `init`.
    pub fn from_value(description: &Value) -> AlphaResult<Self> {
        let Value::Map(map) = description else {
            return Err(AlphaError::InvalidDescription(format!(
                "definition of a class must be a structured value, got {}",
                description.type_name()
            )));
        };
        let map = map.borrow();

        let name = match map.get("name") {
            None | Some(Value::Null) => return Err(AlphaError::MissingName),
            Some(Value::Str(name)) => name.clone(),
            Some(other) => {
                return Err(AlphaError::InvalidDescription(format!(
                    "name must be text, got {}",
                    other.type_name()
                )))
            }
        };

        let strict = match map.get("strict") {
            None | Some(Value::Null) => false,
            Some(Value::Bool(b)) => *b,
            Some(other) => return Err(AlphaError::InvalidStrict(other.type_name().to_string())),
        };

        let parents = match map.get("parents") {
            None | Some(Value::Null) => Vec::new(),
            Some(list) => compose::parents_from_value(list)?,
        };

        let properties = match map.get("properties") {
            None | Some(Value::Null) => PropertyMap::new(),
            Some(Value::Map(props)) => props.borrow().clone(),
            Some(other) => {
                return Err(AlphaError::InvalidDescription(format!(
                    "properties must be a map, got {}",
                    other.type_name()
                )))
            }
        };

        let init = map.get("init").cloned().filter(|v| !v.is_null());

        Ok(Self {
            name,
            strict,
            parents,
            properties,
            init,
        })
    }

    /// Build the construction function
    pub fn build(self) -> AlphaResult<Class> {
        if self.name.is_empty() {
            return Err(AlphaError::MissingName);
        }

        let Partition {
            fields,
            behaviors: own,
        } = partition(Some(&self.properties));

        let mut table = protocol::base_table();
        for parent in self.parents.iter().flatten() {
            table.merge(&parent.behaviors());
        }
        table.merge(&own);

        debug!(
            class = %self.name,
            strict = self.strict,
            parents = self.parents.len(),
            fields = fields.len(),
            behaviors = table.len(),
            "built class"
        );

        Ok(Class(Rc::new(ClassInner {
            name: self.name,
            strict: self.strict,
            parents: self.parents,
            fields,
            init: self.init,
            behaviors: RefCell::new(table),
        })))
    }
}

/// Build a class from a dynamic description (see [`ClassDescription::from_value`])
pub fn create_class(description: &Value) -> AlphaResult<Class> {
    ClassDescription::from_value(description)?.build()
}

struct ClassInner {
    name: String,
    strict: bool,
    parents: Vec<Option<Class>>,
    fields: PropertyMap,
    init: Option<Value>,
    behaviors: RefCell<BehaviorTable>,
}

/// Construction function produced by [`ClassDescription::build`].
///
/// Cloning a `Class` clones the handle; every clone creates instances that
/// share the same behavior table.
#[derive(Clone)]
pub struct Class(Rc<ClassInner>);

impl Class {
    /// Start a description (shorthand for [`ClassDescription::new`])
    pub fn builder(name: impl Into<String>) -> ClassDescription {
        ClassDescription::new(name)
    }

    /// Class name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Strict flag
    pub fn is_strict(&self) -> bool {
        self.0.strict
    }

    /// Parents in composition order
    pub fn parents(&self) -> &[Option<Class>] {
        &self.0.parents
    }

    /// Own declared fields with their defaults (parents' fields excluded)
    pub fn fields(&self) -> &PropertyMap {
        &self.0.fields
    }

    /// Borrow the shared behavior table
    pub fn behaviors(&self) -> Ref<'_, BehaviorTable> {
        self.0.behaviors.borrow()
    }

    /// Look up a shared behavior by name
    pub fn behavior(&self, name: &str) -> Option<Behavior> {
        self.0.behaviors.borrow().get(name).cloned()
    }

    /// Shared behavior names in table order
    pub fn behavior_names(&self) -> Vec<String> {
        self.0.behaviors.borrow().names().map(str::to_string).collect()
    }

    /// Add or replace a shared behavior after the class was built.
    ///
    /// Visible to every existing and future instance. Classes that already
    /// copied this table (children) are not affected.
    pub fn define_behavior(&self, name: impl Into<String>, behavior: Behavior) {
        self.0.behaviors.borrow_mut().insert(name, behavior);
    }

    /// Create an instance, optionally hydrated from a structured `data` value
    pub fn instantiate(&self, data: Option<&Value>) -> AlphaResult<Instance> {
        trace!(class = self.name(), "instantiate");
        let instance = Instance::new(self.clone());
        self.initialize(&instance, data)?;
        Ok(instance)
    }

    /// Create an instance without data
    pub fn new_instance(&self) -> AlphaResult<Instance> {
        self.instantiate(None)
    }

    /// Create an instance hydrated from a property map
    pub fn with_data(&self, data: PropertyMap) -> AlphaResult<Instance> {
        self.instantiate(Some(&Value::map(data)))
    }

    /// Run this class's construction pipeline against `target`
    pub(crate) fn initialize(&self, target: &Instance, data: Option<&Value>) -> AlphaResult<()> {
        let inner = &self.0;

        if !inner.parents.is_empty() {
            compose::extend(target, &inner.parents, data)?;
        }

        assign::hydrate(target, Some(&inner.fields));

        if let Some(data) = data.filter(|d| !d.is_null()) {
            let entries = data.entries().ok_or_else(|| AlphaError::InvalidData {
                class: inner.name.clone(),
                got: data.type_name().to_string(),
            })?;
            assign::setter(target, entries, inner.strict)?;
        }

        match &inner.init {
            None => {}
            Some(Value::Behavior(init)) => {
                init.call(target, &[])?;
            }
            Some(other) => {
                return Err(AlphaError::InitNotCallable {
                    class: inner.name.clone(),
                    got: other.type_name().to_string(),
                })
            }
        }

        Ok(())
    }

    /// Check if `ancestor` appears anywhere among this class's parents
    pub fn composes(&self, ancestor: &Class) -> bool {
        self.parents()
            .iter()
            .flatten()
            .any(|p| p.ptr_eq(ancestor) || p.composes(ancestor))
    }

    /// Check if both handles refer to the same class
    pub fn ptr_eq(&self, other: &Class) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Class")
            .field("name", &self.0.name)
            .field("strict", &self.0.strict)
            .field("fields", &self.0.fields.keys().collect::<Vec<_>>())
            .field("behaviors", &self.behavior_names())
            .finish()
    }
}
