//! Live presence synchronization for Rollcall.
//!
//! This crate keeps one question answered in near-real-time: *which
//! users are online right now?* It owns:
//!
//! 1. **The link state machine** ([`LinkState`]) — an explicit
//!    `Disconnected → Connecting → Connected` cycle, instead of an
//!    implicit timer buried in a close handler.
//! 2. **The worker** ([`PresenceSynchronizer`]) — one background task
//!    holding the WebSocket, replacing the [`PresenceSet`] wholesale on
//!    every inbound snapshot, and reconnecting on a fixed delay for as
//!    long as it lives.
//! 3. **Teardown** — cancellation that closes the socket and kills any
//!    pending reconnect, so no update can land after shutdown.
//!
//! # How it fits in the stack
//!
//! ```text
//! View / facade (above)  ← joins PresenceSet against the directory list
//!     ↕
//! Presence layer (this crate)  ← connection lifecycle, snapshot intake
//!     ↕
//! Protocol layer (below)  ← PresenceSnapshot decoding, UserKey
//! ```
//!
//! [`PresenceSet`]: rollcall_protocol::PresenceSet

mod error;
mod state;
mod synchronizer;

pub use error::PresenceError;
pub use state::LinkState;
pub use synchronizer::{PresenceConfig, PresenceSynchronizer};
