//! The session store: identity, persistence, and change notification.
//!
//! # Concurrency note
//!
//! `SessionStore` is NOT thread-safe by itself — mutations take `&mut
//! self`. This is intentional: there is one logical session per process,
//! owned by a single task, and serializing all updates through that
//! owner is what makes the two-state machine trustworthy. Dependents
//! that live on other tasks observe the session through the watch
//! channel, never by sharing the store.

use rollcall_protocol::{Identity, UserKey};
use tokio::sync::watch;

use crate::KeyValueStore;

/// Fixed storage key for the persisted session record.
///
/// The value under this key is the JSON-encoded [`Identity`]. The name
/// predates this crate — existing stored records use it, so it stays.
pub const IDENTITY_RECORD_KEY: &str = "authUser";

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The session's lifecycle state.
///
/// A two-state machine with no intermediate states:
///
/// ```text
///   Anonymous ──(set_identity)──→ Authenticated
///       ↑                              │
///       └───────────(clear)────────────┘
/// ```
///
/// `Authenticated` carries the identity so watch subscribers get the
/// whole picture from one message, without reaching back into the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No identity; the user must sign in.
    Anonymous,

    /// A user is signed in.
    Authenticated(Identity),
}

impl SessionState {
    /// Returns `true` when a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// Holds the current session and keeps the persisted record in sync.
///
/// Every mutation persists (or removes) the stored record synchronously
/// before returning, so a process restart followed by [`restore`]
/// reconstructs the same authenticated or anonymous state. Every
/// mutation also publishes the new [`SessionState`] exactly once.
///
/// [`restore`]: SessionStore::restore
pub struct SessionStore<S: KeyValueStore> {
    store: S,
    identity: Option<Identity>,
    changes: watch::Sender<SessionState>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Creates an anonymous session over the given backing store.
    ///
    /// Nothing is read yet — call [`restore`](Self::restore) to pick up
    /// a persisted record.
    pub fn new(store: S) -> Self {
        let (changes, _) = watch::channel(SessionState::Anonymous);
        Self {
            store,
            identity: None,
            changes,
        }
    }

    /// Reads the persisted record and adopts it, if present and valid.
    ///
    /// A missing record, or one that fails to decode, yields `None` and
    /// leaves the session anonymous — a stale or corrupt record is
    /// indistinguishable from signed-out, by contract.
    pub fn restore(&mut self) -> Option<Identity> {
        let raw = self.store.get(IDENTITY_RECORD_KEY)?;

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => {
                self.identity = Some(identity.clone());
                self.publish();
                tracing::info!(
                    user = %identity.user_key(),
                    "session restored from persisted record"
                );
                Some(identity)
            }
            Err(error) => {
                tracing::debug!(%error, "persisted session record is malformed, treating as absent");
                None
            }
        }
    }

    /// Replaces the current identity and persists it.
    ///
    /// Transitions to `Authenticated`. Calling this while already
    /// authenticated replaces the identity in place — there is no
    /// separate "re-authenticate" path.
    pub fn set_identity(
        &mut self,
        display_name: impl Into<String>,
        email_or_login: impl Into<String>,
        avatar_url: Option<String>,
    ) -> &Identity {
        let identity = Identity {
            display_name: display_name.into(),
            email_or_login: email_or_login.into(),
            avatar_url,
        };

        match serde_json::to_string(&identity) {
            Ok(json) => self.store.set(IDENTITY_RECORD_KEY, json),
            // Identity always serializes; if it ever doesn't, the
            // in-memory session still works for this process lifetime.
            Err(error) => {
                tracing::warn!(%error, "failed to persist session record");
            }
        }

        tracing::info!(user = %identity.user_key(), "session authenticated");
        self.identity = Some(identity);
        self.publish();
        self.identity.as_ref().expect("just set")
    }

    /// Drops the identity and removes the persisted record.
    ///
    /// Transitions to `Anonymous`. Performs no network call — callers
    /// orchestrate backend account deletion separately, *before* calling
    /// this, so a failed deletion leaves the session intact.
    pub fn clear(&mut self) {
        self.store.remove(IDENTITY_RECORD_KEY);
        if self.identity.take().is_some() {
            tracing::info!("session cleared");
        }
        self.publish();
    }

    /// The current identity, if authenticated.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Returns `true` when a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }

    /// The derived key of the current identity, if authenticated.
    ///
    /// This is the key the presence connection is opened with and the
    /// directory list is joined on.
    pub fn user_key(&self) -> Option<UserKey> {
        self.identity.as_ref().map(Identity::user_key)
    }

    /// The current state as a value.
    pub fn state(&self) -> SessionState {
        match &self.identity {
            Some(identity) => SessionState::Authenticated(identity.clone()),
            None => SessionState::Anonymous,
        }
    }

    /// Subscribes to session changes.
    ///
    /// The receiver yields the state as of subscription time first, then
    /// one update per mutation.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.changes.subscribe()
    }

    fn publish(&self) {
        // send_replace delivers even with zero receivers; subscribers
        // that arrive later still see the latest state.
        self.changes.send_replace(self.state());
    }
}

// =========================================================================
// Tests
// =========================================================================
