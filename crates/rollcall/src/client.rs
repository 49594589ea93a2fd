//! The client facade: session, directory, and presence wired together.
//!
//! The flow a view drives through this type:
//!
//! ```text
//! startup() ──restored──→ directory() / open_presence()
//!     │
//!     └─none─→ sign_in_url() → (browser redirect happens elsewhere)
//!                  → complete_sign_in() → directory() / open_presence()
//!
//! sign_out() → backend deletion → session cleared
//!                  └─on failure: error out, session intact
//! ```

use rollcall_directory::{
    ApiClient, DirectoryFetcher, SeedProvider, StaticSeed,
};
use rollcall_presence::{PresenceError, PresenceSynchronizer};
use rollcall_protocol::{Identity, Provider};
use rollcall_session::{KeyValueStore, SessionStore};

use crate::{Config, RollcallError};

/// One user's Rollcall client: owns the session and hands out the
/// directory fetcher and presence feed keyed by it.
///
/// Generic over the session's backing store so a process can persist
/// the session wherever it likes ([`MemoryStore`] in tests and demos,
/// something durable in real deployments).
///
/// [`MemoryStore`]: rollcall_session::MemoryStore
pub struct RollcallClient<S: KeyValueStore> {
    config: Config,
    session: SessionStore<S>,
    api: ApiClient,
}

impl<S: KeyValueStore> RollcallClient<S> {
    /// Creates a client over the given configuration and session store.
    pub fn new(config: Config, store: S) -> Self {
        let api = ApiClient::new(config.api_config());
        Self {
            session: SessionStore::new(store),
            api,
            config,
        }
    }

    /// Restores a persisted session, if one exists.
    ///
    /// Call once at startup, before deciding whether to send the user
    /// through a provider sign-in.
    pub fn startup(&mut self) -> Option<Identity> {
        self.session.restore()
    }

    /// The provider authorization URL the view should navigate to.
    ///
    /// The client sends nothing beyond the navigation itself — the
    /// provider hand-off is entirely the browser's business. `None` for
    /// [`Provider::Unknown`].
    pub fn sign_in_url(&self, provider: Provider) -> Option<String> {
        self.config.authorize_url(provider)
    }

    /// Completes a sign-in after the provider redirect landed: fetches
    /// the profile record and adopts it as the session identity.
    ///
    /// # Errors
    /// [`RollcallError::Directory`] if the profile fetch fails; the
    /// session stays as it was.
    pub async fn complete_sign_in(&mut self) -> Result<Identity, RollcallError> {
        let identity = self.api.fetch_profile().await?.into_identity();

        self.session.set_identity(
            identity.display_name.clone(),
            identity.email_or_login.clone(),
            identity.avatar_url.clone(),
        );

        Ok(identity)
    }

    /// The session store, for reading identity and subscribing to
    /// changes.
    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    /// A directory fetcher with the default demo seed.
    pub fn directory(&self) -> DirectoryFetcher<StaticSeed> {
        DirectoryFetcher::new(self.api.clone())
    }

    /// A directory fetcher with a custom (or disabled) seed.
    pub fn directory_with_seed<P: SeedProvider>(
        &self,
        seed: P,
    ) -> DirectoryFetcher<P> {
        DirectoryFetcher::with_seed(self.api.clone(), seed)
    }

    /// Opens the presence feed keyed by the current session.
    ///
    /// # Errors
    /// [`PresenceError::MissingKey`] (wrapped) when the session is
    /// anonymous — there is no feed to follow without an identity.
    pub fn open_presence(
        &self,
    ) -> Result<PresenceSynchronizer, RollcallError> {
        let key = self
            .session
            .user_key()
            .ok_or(PresenceError::MissingKey)?;

        Ok(PresenceSynchronizer::connect(
            &self.config.presence_endpoint(),
            &key,
            self.config.presence_config(),
        )?)
    }

    /// Signs out: deletes the account on the backend, then clears the
    /// session.
    ///
    /// Order matters and is part of the contract — the session is
    /// cleared only after the backend confirmed the deletion, so a
    /// failure leaves the user signed in and the caller must surface
    /// the error instead of proceeding.
    ///
    /// An anonymous session (nothing to delete) just clears.
    ///
    /// # Errors
    /// [`RollcallError::Directory`] if the deletion request fails or is
    /// rejected.
    pub async fn sign_out(&mut self) -> Result<(), RollcallError> {
        let email = self
            .session
            .identity()
            .map(|identity| identity.email_or_login.clone());

        match email {
            Some(email) => {
                self.api.delete_account(&email).await?;
                self.session.clear();
            }
            None => {
                tracing::warn!(
                    "sign-out without an identity, clearing session only"
                );
                self.session.clear();
            }
        }
        Ok(())
    }
}
