//! Trip record error types.

use rust_decimal::Decimal;

/// Errors from validating trip records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TripError {
    /// Train number is blank or not in passenger service format
    #[error("invalid train number: {0}")]
    InvalidTrainNumber(String),

    /// A required text field is blank
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A numeric field is outside its accepted range
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: Decimal,
        max: Decimal,
    },
}
