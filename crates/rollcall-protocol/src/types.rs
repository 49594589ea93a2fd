//! Record types for Rollcall's wire traffic and persisted state.
//!
//! Three families live here:
//!
//! - what the backend sends ([`UserRecord`], [`ProfileRecord`],
//!   [`PresenceSnapshot`]) — field names and fallback chains follow the
//!   backend's JSON exactly;
//! - what gets persisted ([`Identity`]) — serialized under the field
//!   names the stored record has always used, so existing records keep
//!   restoring;
//! - what a rendering layer consumes ([`DirectoryEntry`], [`Provider`]).

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, UserKey};

/// Avatar URL substituted when a record carries no picture.
pub const PLACEHOLDER_AVATAR: &str = "https://placehold.co/128x128";

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// The authenticated user's profile, held by the session store.
///
/// Persisted as JSON under a fixed storage key. The serde renames pin the
/// on-disk field names (`name`, `email`, `picture`) independently of the
/// Rust field names, so the persisted format is a compatibility surface,
/// not an accident of refactoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Display name, e.g. `"Ada Lovelace"`.
    #[serde(rename = "name")]
    pub display_name: String,

    /// The best available login identifier: the provider email when
    /// present, otherwise the provider login, otherwise the name.
    #[serde(rename = "email")]
    pub email_or_login: String,

    /// Avatar URL, when the provider supplied one.
    #[serde(rename = "picture")]
    pub avatar_url: Option<String>,
}

impl Identity {
    /// The derived key for this identity.
    ///
    /// Must stay stable for the lifetime of a session — it is the join
    /// key between the directory list and the presence feed.
    pub fn user_key(&self) -> UserKey {
        UserKey::derive(&self.email_or_login)
    }
}

// ---------------------------------------------------------------------------
// Provider
// ---------------------------------------------------------------------------

/// The external identity service a user signed in with.
///
/// Wire form is uppercase (`"GOOGLE"`, `"GITHUB"`). Anything else —
/// including a missing field — decodes to `Unknown` rather than failing
/// the whole record, which is why `Deserialize` is hand-written instead
/// of derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Provider {
    Google,
    Github,
    #[default]
    Unknown,
}

impl<'de> Deserialize<'de> for Provider {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.as_str() {
            "GOOGLE" => Self::Google,
            "GITHUB" => Self::Github,
            _ => Self::Unknown,
        })
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Google => write!(f, "GOOGLE"),
            Self::Github => write!(f, "GITHUB"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// ---------------------------------------------------------------------------
// Backend records
// ---------------------------------------------------------------------------

/// One record from the directory endpoint.
///
/// Different providers populate different fields: Google sends `email`
/// and `picture`, GitHub sends `login` and `avatar_url`. The accessors
/// encode the preference order so callers never re-implement it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub provider: Provider,
}

impl UserRecord {
    /// The identifier the derived key is computed from:
    /// `email → login → name`.
    pub fn preferred_id(&self) -> &str {
        self.email
            .as_deref()
            .or(self.login.as_deref())
            .unwrap_or(&self.name)
    }

    /// The best available avatar URL: `picture → avatar_url`.
    pub fn avatar(&self) -> Option<&str> {
        self.picture.as_deref().or(self.avatar_url.as_deref())
    }
}

/// The record the profile endpoint returns after a provider redirect
/// completes. Same provider-dependent fields as [`UserRecord`], plus the
/// `image_url` some providers use for the avatar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub login: Option<String>,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl ProfileRecord {
    /// Collapses the provider-specific fields into an [`Identity`].
    ///
    /// Fallback chains: `email → login → name` for the login id,
    /// `picture → avatar_url → image_url` for the avatar.
    pub fn into_identity(self) -> Identity {
        let email_or_login = self
            .email
            .or(self.login)
            .unwrap_or_else(|| self.name.clone());
        let avatar_url = self.picture.or(self.avatar_url).or(self.image_url);

        Identity {
            display_name: self.name,
            email_or_login,
            avatar_url,
        }
    }
}

// ---------------------------------------------------------------------------
// DirectoryEntry
// ---------------------------------------------------------------------------

/// A displayable row in the "who is signed in" list.
///
/// The collection is a plain list rebuilt in full on every fetch — `id`
/// exists only for joining against the presence set, not for keyed
/// storage or partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Derived key; the join point with [`PresenceSet`].
    pub id: UserKey,
    pub name: String,
    /// Always populated — [`PLACEHOLDER_AVATAR`] when the record had none.
    pub avatar_url: String,
    pub provider: Provider,
    /// Static hint from the record's source, independent of the live
    /// presence feed. Live backend records report present; seed entries
    /// carry whatever the seed assigned.
    pub online_hint: bool,
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

/// The set of derived keys currently reported online. Fully replaced on
/// every inbound snapshot — never merged.
pub type PresenceSet = HashSet<UserKey>;

/// One inbound message on the presence feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresenceSnapshot {
    #[serde(rename = "onlineUsers")]
    pub online_users: Vec<UserKey>,
}

impl PresenceSnapshot {
    /// Decodes a snapshot from one feed message.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] for malformed JSON or a missing
    /// `onlineUsers` field. Callers drop such messages and keep the
    /// previous set.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        serde_json::from_str(text).map_err(ProtocolError::Decode)
    }

    /// Consumes the snapshot into the set it denotes. Duplicate keys in
    /// the payload collapse; order carries no meaning.
    pub fn into_set(self) -> PresenceSet {
        self.online_users.into_iter().collect()
    }
}

// =========================================================================
// Tests
// =========================================================================
