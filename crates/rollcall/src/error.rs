//! Unified error type for the Rollcall facade.

use rollcall_directory::DirectoryError;
use rollcall_presence::PresenceError;
use rollcall_protocol::ProtocolError;

/// Top-level error that wraps the per-crate errors.
///
/// Callers of the `rollcall` meta-crate deal with this single type; the
/// `#[from]` impls let `?` convert sub-crate errors automatically. The
/// session layer has no error type to wrap — its contract absorbs
/// storage faults by design.
#[derive(Debug, thiserror::Error)]
pub enum RollcallError {
    /// A record failed to decode or violated a structural rule.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// An HTTP call failed or was rejected.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The presence link was misused or its worker died.
    #[error(transparent)]
    Presence(#[from] PresenceError),
}
