//! Root object class for ad-hoc instances

use crate::class::{Class, ClassDescription};
use crate::error::AlphaResult;
use crate::instance::Instance;
use crate::value::Value;

/// Name of the root class
pub const ROOT_CLASS_NAME: &str = "AlphaObject";

/// Owns the root `AlphaObject` class (no fields, protocol behaviors only)
/// and creates plain instances of it.
#[derive(Debug, Clone)]
pub struct ObjectFactory {
    class: Class,
}

impl ObjectFactory {
    /// Build the root class
    pub fn new() -> AlphaResult<Self> {
        let class = ClassDescription::new(ROOT_CLASS_NAME).build()?;
        Ok(Self { class })
    }

    /// The root class, usable as a parent
    pub fn class(&self) -> &Class {
        &self.class
    }

    /// Create a root instance hydrated from `data`
    pub fn create_object(&self, data: Option<&Value>) -> AlphaResult<Instance> {
        self.class.instantiate(data)
    }
}
