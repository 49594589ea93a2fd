//! # Rollcall
//!
//! Headless client for a "who is signed in right now" service: sign-in
//! via an external provider, a directory of known users, and live
//! online/offline presence over a WebSocket feed.
//!
//! Rollcall is the state layer only. It holds the session, rebuilds the
//! directory list, and keeps the presence set current; a rendering
//! layer (CLI, TUI, web frontend) subscribes and draws.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use rollcall::prelude::*;
//!
//! # async fn run() -> Result<(), RollcallError> {
//! let mut client = RollcallClient::new(Config::from_env(), MemoryStore::new());
//!
//! // Pick up a persisted session, or complete one after the provider
//! // redirect landed.
//! if client.startup().is_none() {
//!     client.complete_sign_in().await?;
//! }
//!
//! let roster = client.directory().fetch().await;
//! let presence = client.open_presence()?;
//! let mut online = presence.presence();
//!
//! while online.changed().await.is_ok() {
//!     let set = online.borrow().clone();
//!     for entry in &roster {
//!         let mark = if set.contains(&entry.id) { "●" } else { "○" };
//!         println!("{mark} {}", entry.name);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod error;

pub use client::RollcallClient;
pub use config::Config;
pub use error::RollcallError;

/// The common imports, in one place.
pub mod prelude {
    pub use crate::{Config, RollcallClient, RollcallError};
    pub use rollcall_directory::{
        ApiClient, ApiConfig, DirectoryFetcher, NoSeed, SeedProvider,
        StaticSeed,
    };
    pub use rollcall_presence::{
        LinkState, PresenceConfig, PresenceSynchronizer,
    };
    pub use rollcall_protocol::{
        DirectoryEntry, Identity, PresenceSet, Provider, UserKey,
    };
    pub use rollcall_session::{
        KeyValueStore, MemoryStore, SessionState, SessionStore,
    };
}
