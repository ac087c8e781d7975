//! # Error Types
//!
//! Errors raised at the wire boundary.

use thiserror::Error;

/// Errors that can occur while decoding or encoding a wire payload.
#[derive(Debug, Error)]
pub enum WireError {
    /// Payload is not valid JSON or does not match the expected shape.
    #[error("Malformed payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A digest-typed field is not 64 lowercase hex characters.
    #[error("Malformed digest in field `{field}`: {value:?}")]
    MalformedDigest {
        /// Field name in the payload.
        field: &'static str,
        /// Offending value.
        value: String,
    },
}
