//! Explicitly owned numbering for generated identifiers

use std::cell::Cell;

/// Monotonic counter handed to whatever generates instance ids.
///
/// Behaviors capture it (usually behind an `Rc`) instead of reaching for a
/// module-wide static.
#[derive(Debug, Default)]
pub struct InstanceCounter {
    last: Cell<u64>,
}

impl InstanceCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new value (first call returns 1)
    pub fn next(&self) -> u64 {
        let n = self.last.get() + 1;
        self.last.set(n);
        n
    }

    /// Last value handed out (0 if none)
    pub fn current(&self) -> u64 {
        self.last.get()
    }

    /// Increment and format as `{prefix}_{n}`
    pub fn label(&self, prefix: &str) -> String {
        format!("{}_{}", prefix, self.next())
    }
}
