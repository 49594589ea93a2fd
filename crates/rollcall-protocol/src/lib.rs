//! Data types shared by every Rollcall layer.
//!
//! This crate defines the "language" the client speaks with the backend
//! and with its own persisted state:
//!
//! - **Identity types** ([`Identity`], [`UserKey`]) — who the signed-in
//!   user is, and the derived key that correlates a user across the
//!   directory and the presence feed.
//! - **Wire records** ([`UserRecord`], [`ProfileRecord`],
//!   [`PresenceSnapshot`]) — the JSON shapes the backend sends.
//! - **Display records** ([`DirectoryEntry`], [`Provider`]) — the
//!   canonical shape a rendering layer consumes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding.
//!
//! # Architecture
//!
//! The protocol layer sits below everything else. It knows nothing about
//! HTTP, WebSockets, or storage — it only knows how records are shaped
//! and how identifiers are derived.
//!
//! ```text
//! Session / Directory / Presence (above)
//!     ↕
//! Protocol (this crate) — records, keys, decode
//! ```

mod error;
mod key;
mod types;

pub use error::ProtocolError;
pub use key::UserKey;
pub use types::{
    DirectoryEntry, Identity, PresenceSet, PresenceSnapshot, ProfileRecord,
    Provider, UserRecord, PLACEHOLDER_AVATAR,
};
