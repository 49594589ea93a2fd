//! Error types for the protocol layer.
//!
//! Each Rollcall crate defines its own error enum. A `ProtocolError`
//! always means a record failed to decode or violated a structural rule
//! — never a transport or storage problem.

/// Errors that can occur while decoding records.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Deserialization failed: malformed JSON, a missing required field,
    /// or a wrong data type.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The record decoded but is invalid at the protocol level.
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
