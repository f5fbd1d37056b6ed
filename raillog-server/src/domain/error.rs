//! Domain error types.
//!
//! These errors represent validation failures on user-supplied values.
//! They are distinct from provider and storage errors.

/// Domain-level validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Train number was missing or only whitespace
    #[error("train number is required")]
    BlankTrainNumber,

    /// Train number does not follow the passenger service format
    #[error("malformed train number: {0}")]
    MalformedTrainNumber(String),
}
