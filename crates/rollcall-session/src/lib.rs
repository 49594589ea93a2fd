//! Session management for Rollcall.
//!
//! This crate owns the answer to "who is signed in right now, in this
//! process":
//!
//! 1. **Persistence** — a small key-value abstraction
//!    ([`KeyValueStore`]) the session record is written through, so the
//!    backing medium (memory, disk, a browser store) is swappable.
//! 2. **State** — the [`SessionStore`], a two-state machine
//!    (`Anonymous ⇄ Authenticated`) holding the current [`Identity`].
//! 3. **Notification** — a watch channel dependents subscribe to, so the
//!    directory and presence layers re-key themselves when the session
//!    changes.
//!
//! # How it fits in the stack
//!
//! ```text
//! View / facade (above)   ← drives sign-in, sign-out
//!     ↕
//! Session layer (this crate)  ← holds identity, persists it, notifies
//!     ↕
//! Protocol layer (below)  ← provides Identity, UserKey
//! ```
//!
//! [`Identity`]: rollcall_protocol::Identity

mod session;
mod store;

pub use session::{SessionState, SessionStore, IDENTITY_RECORD_KEY};
pub use store::{KeyValueStore, MemoryStore};
