//! Error types for the presence layer.
//!
//! Deliberately small: connection failures, closes, and malformed
//! messages are not errors here — the worker absorbs them (reconnect,
//! drop-and-log) by contract. What's left is misuse and teardown.

/// Errors that can occur opening or tearing down the presence link.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    /// `connect` was called with an empty user key. An empty key would
    /// address nobody's feed; refusing is the explicit version of the
    /// "no identity, no connection" guard.
    #[error("cannot open a presence link without a user key")]
    MissingKey,

    /// The worker task panicked or was aborted out from under us.
    #[error("presence worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
