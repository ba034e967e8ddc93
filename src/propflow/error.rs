use thiserror::Error;

#[derive(Error, Debug)]
pub enum PropflowError {
    /// A stage, predicate or handler needed a key the attribute set doesn't have.
    #[error("Missing attribute: {key}")]
    MissingAttribute { key: String },

    /// A dispatcher without a default handler found no matching route.
    #[error("No route matched in {dispatcher} and no default is defined")]
    NoMatch { dispatcher: String },

    /// A stage or handler was declared with the wrong number of operands.
    #[error("Stage '{stage}' expects {expected} operand(s), got {found}")]
    CompositionArity {
        stage: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: String },

    #[error("Definition error: {0}")]
    Definition(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PropflowError {
    pub fn missing(key: impl Into<String>) -> Self {
        PropflowError::MissingAttribute { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, expected: impl Into<String>) -> Self {
        PropflowError::InvalidValue {
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// True for failures caused by absent input keys, as opposed to faults
    /// raised while computing over keys that were present.
    pub fn is_missing_attribute(&self) -> bool {
        matches!(self, PropflowError::MissingAttribute { .. })
    }
}

pub type Result<T> = std::result::Result<T, PropflowError>;
