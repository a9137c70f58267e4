//! Alpha object-composition core
//!
//! This crate provides the runtime every Alpha widget is defined through:
//! - Class builder turning a declarative description into a construction function
//! - Multiple inheritance by composing parent construction pipelines in order
//! - Field / behavior partitioning with a shared per-class behavior table
//! - Optional strict validation of assigned property names
//! - Chainable `get` / `set` accessors and shallow `clone`
//!
//! Everything is single-threaded and synchronous.

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod assign;
pub mod behavior;
pub mod class;
pub mod compose;
pub mod counter;
pub mod error;
pub mod instance;
pub mod object;
pub mod partition;
pub mod protocol;
pub mod value;

pub use assign::{hydrate, setter};
pub use behavior::{Behavior, BehaviorTable};
pub use class::{create_class, Class, ClassDescription};
pub use compose::{extend, extend_value};
pub use counter::InstanceCounter;
pub use error::{AlphaError, AlphaResult};
pub use instance::Instance;
pub use object::ObjectFactory;
pub use partition::{partition, Partition};
pub use value::{ListRef, MapRef, PropertyMap, Value};
