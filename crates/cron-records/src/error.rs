//! Error types for cron-records

use crate::field::Field;
use crate::schema::RecordKind;

/// Result type for cron-records operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in cron-records operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A logical record was handed to the generator without a field its
    /// kind declares as required. This is a caller bug, never an input
    /// condition, so generation fails instead of coercing.
    #[error("malformed {kind} record: required field {field} is absent")]
    MalformedRecord { kind: RecordKind, field: Field },

    /// The registry declared a non-optional field that its own pattern
    /// cannot capture. Contract violation in the schema, not user input.
    #[error("invalid {kind} schema: {message}")]
    InvalidSchema { kind: RecordKind, message: String },
}
