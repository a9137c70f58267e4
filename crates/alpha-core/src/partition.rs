//! Property partitioning: fields vs. behaviors

use crate::behavior::BehaviorTable;
use crate::value::{PropertyMap, Value};

/// A property map split by invocability
#[derive(Debug, Clone, Default)]
pub struct Partition {
    /// Non-invocable properties, copied onto every instance
    pub fields: PropertyMap,
    /// Invocable properties, shared through the class behavior table
    pub behaviors: BehaviorTable,
}

/// Split `properties` into fields and behaviors.
///
/// Classification is decided here, once, by the variant of each value.
/// Absent input yields two empty groups.
pub fn partition(properties: Option<&PropertyMap>) -> Partition {
    let mut result = Partition::default();

    let Some(properties) = properties else {
        return result;
    };

    for (name, value) in properties {
        match value {
            Value::Behavior(behavior) => result.behaviors.insert(name.clone(), behavior.clone()),
            other => {
                result.fields.insert(name.clone(), other.clone());
            }
        }
    }

    result
}
