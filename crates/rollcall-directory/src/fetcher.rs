//! The fetch-and-merge policy for the directory list.

use rollcall_protocol::{DirectoryEntry, UserKey, PLACEHOLDER_AVATAR, UserRecord};

use crate::{ApiClient, SeedProvider, StaticSeed};

/// Builds the displayable directory list from live and seed sources.
///
/// The list is rebuilt in full on every call — there are no partial
/// updates and no caching. Live records are authoritative and come
/// first; seed entries follow. When the backend is unreachable the seed
/// entries are the whole list.
pub struct DirectoryFetcher<S: SeedProvider = StaticSeed> {
    api: ApiClient,
    seed: S,
}

impl DirectoryFetcher<StaticSeed> {
    /// Creates a fetcher with the default demo seed.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            seed: StaticSeed::default(),
        }
    }
}

impl<S: SeedProvider> DirectoryFetcher<S> {
    /// Creates a fetcher with a custom (or disabled) seed.
    pub fn with_seed(api: ApiClient, seed: S) -> Self {
        Self { api, seed }
    }

    /// Fetches the directory. Never errors.
    ///
    /// One request; on success the normalized live records plus the seed
    /// entries, on any failure (network, non-2xx, undecodable body) a
    /// warning log and the seed entries alone.
    pub async fn fetch(&self) -> Vec<DirectoryEntry> {
        match self.api.fetch_users().await {
            Ok(records) => {
                let mut entries: Vec<DirectoryEntry> =
                    records.into_iter().map(normalize).collect();
                entries.extend(self.seed.entries());
                tracing::debug!(count = entries.len(), "directory rebuilt");
                entries
            }
            Err(error) => {
                tracing::warn!(
                    %error,
                    "directory fetch failed, serving seed entries only"
                );
                self.seed.entries()
            }
        }
    }
}

/// Normalizes one backend record into its canonical display shape.
///
/// - `id` — derived key over `email → login → name`.
/// - `avatar_url` — the record's best avatar, or the placeholder.
/// - `online_hint` — live records report present; the live presence
///   feed refines this, the fetch does not.
fn normalize(record: UserRecord) -> DirectoryEntry {
    let id = UserKey::derive(record.preferred_id());
    let avatar_url = record
        .avatar()
        .unwrap_or(PLACEHOLDER_AVATAR)
        .to_string();

    DirectoryEntry {
        id,
        name: record.name,
        avatar_url,
        provider: record.provider,
        online_hint: true,
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for normalization. The fetch/fallback paths need a
    //! live HTTP endpoint and live in `tests/fetch.rs`.

    use rollcall_protocol::Provider;

    use super::*;

    fn record(json: &str) -> UserRecord {
        serde_json::from_str(json).expect("test record should parse")
    }

    #[test]
    fn test_normalize_derives_id_from_email() {
        let entry = normalize(record(
            r#"{"name": "Ada Lovelace", "email": "Ada.Lovelace@x.com"}"#,
        ));
        assert_eq!(entry.id.as_str(), "ada-lovelace-x-com");
    }

    #[test]
    fn test_normalize_falls_back_to_login_then_name() {
        let entry =
            normalize(record(r#"{"name": "Grace", "login": "ghopper"}"#));
        assert_eq!(entry.id.as_str(), "ghopper");

        let entry = normalize(record(r#"{"name": "Solo Person"}"#));
        assert_eq!(entry.id.as_str(), "solo-person");
    }

    #[test]
    fn test_normalize_substitutes_placeholder_avatar() {
        let entry = normalize(record(r#"{"name": "No Pic"}"#));
        assert_eq!(entry.avatar_url, PLACEHOLDER_AVATAR);
    }

    #[test]
    fn test_normalize_keeps_real_avatar() {
        let entry = normalize(record(
            r#"{"name": "Pic", "picture": "https://g.test/p.png"}"#,
        ));
        assert_eq!(entry.avatar_url, "https://g.test/p.png");
    }

    #[test]
    fn test_normalize_passes_provider_through() {
        let entry = normalize(record(
            r#"{"name": "G", "provider": "GITHUB"}"#,
        ));
        assert_eq!(entry.provider, Provider::Github);
    }

    #[test]
    fn test_normalize_marks_live_records_present() {
        let entry = normalize(record(r#"{"name": "Live"}"#));
        assert!(entry.online_hint);
    }
}
