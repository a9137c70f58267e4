//! Class manifest parsing (classes.toml)
//!
//! A manifest declares field-only classes in TOML. Parents are referenced
//! by name and must be declared earlier in the same file.

use std::collections::HashSet;
use std::path::Path;

use alpha_core::{AlphaError, ClassDescription};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::convert;
use crate::registry::ClassRegistry;

/// Errors that can occur while reading or loading a manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("Failed to read manifest file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse manifest: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Failed to parse JSON instance data
    #[error("Failed to parse data: {0}")]
    DataError(#[from] serde_json::Error),

    /// Validation error
    #[error("Invalid manifest: {0}")]
    ValidationError(String),

    /// Two classes share a name
    #[error("Duplicate class: {0}")]
    DuplicateClass(String),

    /// A parent was not declared before its child
    #[error("Class {class} names unknown parent {parent}")]
    UnknownParent {
        /// Declaring class
        class: String,
        /// Missing parent name
        parent: String,
    },

    /// Lookup of a class the registry does not hold
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// Building or constructing failed in the core
    #[error(transparent)]
    Class(#[from] AlphaError),
}

/// Class manifest (classes.toml)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClassManifest {
    /// Declared classes, in dependency order
    #[serde(default, rename = "class")]
    pub classes: Vec<ClassEntry>,
}

/// One `[[class]]` entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassEntry {
    /// Class name
    pub name: String,

    /// Reject undeclared names
    #[serde(default)]
    pub strict: bool,

    /// Parent class names, composed in order
    #[serde(default)]
    pub parents: Vec<String>,

    /// Field defaults, in declaration order
    #[serde(default)]
    pub fields: toml::Table,
}

impl ClassManifest {
    /// Load a manifest from a file
    pub fn from_file(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a manifest from a string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, ManifestError> {
        let manifest: ClassManifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Validate names and parent ordering
    pub fn validate(&self) -> Result<(), ManifestError> {
        let mut declared = HashSet::new();

        for entry in &self.classes {
            if entry.name.is_empty() {
                return Err(ManifestError::ValidationError(
                    "Class name cannot be empty".to_string(),
                ));
            }

            for parent in &entry.parents {
                if !declared.contains(parent.as_str()) {
                    return Err(ManifestError::UnknownParent {
                        class: entry.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }

            if !declared.insert(entry.name.as_str()) {
                return Err(ManifestError::DuplicateClass(entry.name.clone()));
            }
        }

        Ok(())
    }

    /// Build every class, in file order
    pub fn load(&self) -> Result<ClassRegistry, ManifestError> {
        let mut registry = ClassRegistry::new();

        for entry in &self.classes {
            let mut description = ClassDescription::new(entry.name.clone()).strict(entry.strict);

            for parent in &entry.parents {
                let class = registry.get_by_name(parent).ok_or_else(|| {
                    ManifestError::UnknownParent {
                        class: entry.name.clone(),
                        parent: parent.clone(),
                    }
                })?;
                description = description.with_parent(class);
            }

            for (name, value) in convert::toml_table(&entry.fields) {
                description = description.field(name, value);
            }

            let class = description.build()?;
            registry
                .register(class)
                .ok_or_else(|| ManifestError::DuplicateClass(entry.name.clone()))?;
        }

        debug!(classes = registry.len(), "loaded manifest");
        Ok(registry)
    }
}
