//! The derived user key: a slug that names one user everywhere.
//!
//! The directory list and the presence feed have no shared database id.
//! What they share is this key, derived the same way on both ends from
//! the user's email (or name, when no email exists). As long as the
//! source string doesn't change mid-session, the key is stable — that
//! stability is what lets a presence snapshot be joined against the
//! directory list.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A normalized identifier for one user.
///
/// Newtype over `String` so a raw email or display name can't be passed
/// where a derived key is expected. `#[serde(transparent)]` makes it
/// serialize as a plain JSON string, which is exactly what the presence
/// feed carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserKey(String);

impl UserKey {
    /// Derives a key from a raw source string (email or name).
    ///
    /// Rules, applied in order:
    /// 1. Lowercase.
    /// 2. Every run of characters outside `[a-z0-9]` collapses to a
    ///    single hyphen.
    /// 3. Leading and trailing hyphens are trimmed.
    ///
    /// `"Ada.Lovelace@x.com"` → `ada-lovelace-x-com`.
    pub fn derive(source: &str) -> Self {
        let mut out = String::with_capacity(source.len());
        let mut pending_hyphen = false;

        for ch in source.to_lowercase().chars() {
            if ch.is_ascii_alphanumeric() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(ch);
            } else {
                // Run of separators; emit at most one hyphen, and only
                // between alphanumeric segments (trims both ends).
                pending_hyphen = true;
            }
        }

        Self(out)
    }

    /// Wraps a string that is already a derived key.
    ///
    /// Used for keys received on the wire — the backend derives them
    /// with the same rules, so they are taken as-is, not re-derived.
    pub fn from_raw(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the derivation produced nothing (e.g. an empty or
    /// all-punctuation source). An empty key must never be used to open
    /// a presence connection.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_email_collapses_punctuation_to_hyphens() {
        // The canonical example: dots and the @ each become a hyphen.
        let key = UserKey::derive("Ada.Lovelace@x.com");
        assert_eq!(key.as_str(), "ada-lovelace-x-com");
    }

    #[test]
    fn test_derive_lowercases_input() {
        assert_eq!(UserKey::derive("ALICE").as_str(), "alice");
    }

    #[test]
    fn test_derive_collapses_separator_runs_to_one_hyphen() {
        // "  --  " between words is a single run, so a single hyphen.
        let key = UserKey::derive("Ada  --  Lovelace");
        assert_eq!(key.as_str(), "ada-lovelace");
    }

    #[test]
    fn test_derive_trims_leading_and_trailing_separators() {
        let key = UserKey::derive("...ada@x.com...");
        assert_eq!(key.as_str(), "ada-x-com");
    }

    #[test]
    fn test_derive_keeps_digits() {
        let key = UserKey::derive("user42@example.org");
        assert_eq!(key.as_str(), "user42-example-org");
    }

    #[test]
    fn test_derive_empty_source_is_empty_key() {
        assert!(UserKey::derive("").is_empty());
        assert!(UserKey::derive("@@@").is_empty());
    }

    #[test]
    fn test_derive_is_stable() {
        // Same source, same key — every time. Presence correlation
        // depends on this.
        let a = UserKey::derive("Ada.Lovelace@x.com");
        let b = UserKey::derive("Ada.Lovelace@x.com");
        assert_eq!(a, b);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let json = serde_json::to_string(&UserKey::derive("a@b")).unwrap();
        assert_eq!(json, "\"a-b\"");
    }

    #[test]
    fn test_deserializes_from_plain_string() {
        let key: UserKey = serde_json::from_str("\"ada-lovelace\"").unwrap();
        assert_eq!(key, UserKey::from_raw("ada-lovelace"));
    }

    #[test]
    fn test_display_matches_inner() {
        assert_eq!(UserKey::derive("A B").to_string(), "a-b");
    }
}
