//! Class registry: classes by index and by name

use alpha_core::Class;
use rustc_hash::FxHashMap;

/// Registry of built classes
#[derive(Debug, Default)]
pub struct ClassRegistry {
    /// Classes in registration order
    classes: Vec<Class>,
    /// Class name to index mapping
    name_to_id: FxHashMap<String, usize>,
}

impl ClassRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a class, returning its index.
    ///
    /// Returns `None` if a class with the same name is already registered.
    pub fn register(&mut self, class: Class) -> Option<usize> {
        if self.name_to_id.contains_key(class.name()) {
            return None;
        }

        let id = self.classes.len();
        self.name_to_id.insert(class.name().to_string(), id);
        self.classes.push(class);
        Some(id)
    }

    /// Get class by index
    pub fn get(&self, id: usize) -> Option<&Class> {
        self.classes.get(id)
    }

    /// Get class by name
    pub fn get_by_name(&self, name: &str) -> Option<&Class> {
        self.name_to_id.get(name).and_then(|id| self.classes.get(*id))
    }

    /// Iterate over classes in registration order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Class)> {
        self.classes.iter().enumerate()
    }

    /// Number of registered classes
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
