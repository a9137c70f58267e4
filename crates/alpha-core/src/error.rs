//! Error types for class building, construction and accessor calls

/// Result type for every fallible core operation
pub type AlphaResult<T> = Result<T, AlphaError>;

/// Contract violation raised by the core.
///
/// Every variant is fatal to the operation that raised it; nothing in the
/// core retries or recovers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AlphaError {
    /// Class description is not a structured value (or is otherwise malformed)
    #[error("[create_class] {0}")]
    InvalidDescription(String),

    /// Class description has no name, or an empty one
    #[error("[create_class] name of the class must be indicated")]
    MissingName,

    /// `strict` was given but is not a boolean
    #[error("[create_class] strict must be boolean if specified, got {0}")]
    InvalidStrict(String),

    /// Parents list is not a sequence
    #[error("[extend] parents must be a sequence, got {0}")]
    InvalidParents(String),

    /// An entry of the parents list is neither a class nor null
    #[error("[extend] parent #{index} must be a class, got {got}")]
    InvalidParent {
        /// Position in the parents list
        index: usize,
        /// Type name of the offending entry
        got: String,
    },

    /// Constructor data argument is not a structured value
    #[error("[{class}] parameter of constructor must be a structured value, got {got}")]
    InvalidData {
        /// Class being constructed
        class: String,
        /// Type name of the offending argument
        got: String,
    },

    /// Declared init hook is not invocable
    #[error("[{class}] init must be a behavior, got {got}")]
    InitNotCallable {
        /// Class being constructed
        class: String,
        /// Type name of the declared init
        got: String,
    },

    /// Strict mode rejected a name the instance does not declare
    #[error("[setter] {name} is not a property of {class}")]
    UndeclaredProperty {
        /// Class of the target instance
        class: String,
        /// Rejected property name
        name: String,
    },

    /// `get` was called with an empty sequence
    #[error("[get] sequence must contain at least one name")]
    EmptySequence,

    /// `get` named a property the instance does not own
    #[error("[get] property {name} doesn't exist on {class}")]
    PropertyNotFound {
        /// Class of the instance
        class: String,
        /// Missing property name
        name: String,
    },

    /// Accessor called with an argument of the wrong shape
    #[error("[{operation}] {message}")]
    InvalidParameter {
        /// Accessor that rejected the call
        operation: &'static str,
        /// What was wrong
        message: String,
    },

    /// No own field and no shared behavior under this name
    #[error("{class} has no behavior named {name}")]
    BehaviorNotFound {
        /// Class of the receiver
        class: String,
        /// Requested behavior
        name: String,
    },

    /// An own field shadows the behavior table but holds no behavior
    #[error("property {name} of {class} is not invocable")]
    NotCallable {
        /// Class of the receiver
        class: String,
        /// Property name
        name: String,
    },

    /// Failure raised by a user-supplied behavior
    #[error("{0}")]
    Custom(String),
}

impl AlphaError {
    pub(crate) fn invalid_parameter(operation: &'static str, message: impl Into<String>) -> Self {
        AlphaError::InvalidParameter {
            operation,
            message: message.into(),
        }
    }
}

impl From<String> for AlphaError {
    fn from(s: String) -> Self {
        AlphaError::Custom(s)
    }
}

impl From<&str> for AlphaError {
    fn from(s: &str) -> Self {
        AlphaError::Custom(s.to_string())
    }
}
