//! Field copying onto instances
//!
//! `hydrate` copies unconditionally; `setter` copies under an optional strict
//! policy that refuses names the target does not already own.

use tracing::{debug, trace};

use crate::error::{AlphaError, AlphaResult};
use crate::instance::Instance;
use crate::value::{PropertyMap, Value};

/// Copy every entry of `source` onto `target`, overwriting same-named fields.
///
/// An absent source is a no-op.
pub fn hydrate(target: &Instance, source: Option<&PropertyMap>) {
    let Some(source) = source else {
        return;
    };

    for (name, value) in source {
        target.insert_field(name.clone(), value.clone());
    }
}

/// Copy `(name, value)` pairs onto `target`.
///
/// With `strict` set, a name the target does not already own aborts the call
/// with [`AlphaError::UndeclaredProperty`]. Pairs before the offending one
/// stay assigned.
pub fn setter<I>(target: &Instance, source: I, strict: bool) -> AlphaResult<()>
where
    I: IntoIterator<Item = (String, Value)>,
{
    for (name, value) in source {
        if strict && !target.has_own(&name) {
            debug!(class = target.class().name(), property = %name, "strict mode rejected property");
            return Err(AlphaError::UndeclaredProperty {
                class: target.class().name().to_string(),
                name,
            });
        }

        trace!(class = target.class().name(), property = %name, "assign");
        target.insert_field(name, value);
    }

    Ok(())
}
