use thiserror::Error;

/// Validation errors for identifiers and fixed-width encodings.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A textual identifier does not match its required pattern.
    #[error("{field} ('{value}') does not match the required format")]
    PatternMismatch {
        /// Identifier type that failed validation.
        field: &'static str,
        /// Offending value.
        value: String,
    },
    /// A value does not fit the width or range it must be encoded in.
    #[error("{field} out of bounds: {value}")]
    OutOfBounds {
        /// Quantity that is out of bounds.
        field: &'static str,
        /// Description of the offending value.
        value: String,
    },
}
