//! Composition engine: layering parent classes onto one instance

use tracing::trace;

use crate::class::Class;
use crate::error::{AlphaError, AlphaResult};
use crate::instance::Instance;
use crate::value::Value;

/// Run each parent's own construction pipeline against `target`, in order.
///
/// Every parent re-runs its inheritance, field hydration, data assignment
/// (under its own strict flag) and init hook. Later parents overwrite
/// earlier ones on name collision. `None` entries are skipped.
pub fn extend(target: &Instance, parents: &[Option<Class>], data: Option<&Value>) -> AlphaResult<()> {
    for parent in parents.iter().flatten() {
        trace!(class = target.class().name(), parent = parent.name(), "extend");
        parent.initialize(target, data)?;
    }
    Ok(())
}

/// Dynamic form of [`extend`]: `parents` must be a list of classes or nulls.
pub fn extend_value(target: &Instance, parents: &Value, data: Option<&Value>) -> AlphaResult<()> {
    let parents = parents_from_value(parents)?;
    extend(target, &parents, data)
}

/// Convert a dynamic parents list into typed entries
pub(crate) fn parents_from_value(parents: &Value) -> AlphaResult<Vec<Option<Class>>> {
    let list = parents
        .as_list()
        .ok_or_else(|| AlphaError::InvalidParents(parents.type_name().to_string()))?;

    list.borrow()
        .iter()
        .enumerate()
        .map(|(index, entry)| match entry {
            Value::Null => Ok(None),
            Value::Class(class) => Ok(Some(class.clone())),
            other => Err(AlphaError::InvalidParent {
                index,
                got: other.type_name().to_string(),
            }),
        })
        .collect()
}
