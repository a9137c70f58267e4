//! Alpha class manifests
//!
//! Declarative, field-only class definitions loaded from TOML, built through
//! the core class builder and collected in a [`ClassRegistry`].
//!
//! ```toml
//! [[class]]
//! name = "Pair"
//! strict = true
//!
//! [class.fields]
//! a = 0
//! b = 0
//! ```

#![warn(missing_docs)]

pub mod convert;
pub mod manifest;
pub mod registry;

pub use manifest::{ClassEntry, ClassManifest, ManifestError};
pub use registry::ClassRegistry;

use alpha_core::Value;

/// Parse JSON text into a core value (instance data, `--set` values)
pub fn parse_data(text: &str) -> Result<Value, ManifestError> {
    let json: serde_json::Value = serde_json::from_str(text)?;
    Ok(convert::from_json(&json))
}
