//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or processing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The category identifier is not one of the known categories.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// A variable name is empty or contains characters a token cannot hold.
    #[error("invalid variable name: {0}")]
    InvalidVariableName(String),

    /// The same variable name was declared by more than one category.
    #[error("variable declared twice: {0}")]
    DuplicateVariable(String),

    /// A computed category was given static variables.
    #[error("category {0} is computed and cannot declare variables")]
    ComputedCategory(String),

    /// Persisted state could not be decoded.
    #[error("invalid stored state: {0}")]
    InvalidStoredState(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
