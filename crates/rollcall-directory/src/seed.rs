//! Pluggable demo data for the directory list.
//!
//! The demo roster is deliberately fenced off behind a trait. It exists
//! to keep the "who is signed in" page populated while the backing
//! service has few real users (or none, when it's down), and a
//! production build disables it by plugging in [`NoSeed`] — no scattered
//! `if demo_mode` checks anywhere else in the codebase.

use rand::seq::index::sample;
use rollcall_protocol::{DirectoryEntry, Provider, UserKey};

/// Supplies the static entries appended to (or substituted for) the
/// live directory.
pub trait SeedProvider: Send + Sync + 'static {
    /// Produces the seed entries for one fetch. Implementations decide
    /// per call which entries carry an online hint.
    fn entries(&self) -> Vec<DirectoryEntry>;
}

// ---------------------------------------------------------------------------
// StaticSeed
// ---------------------------------------------------------------------------

/// A fixed roster with a randomized online subset.
///
/// Each call to [`entries`](SeedProvider::entries) returns the same
/// people, with exactly `online_count` of them (capped at the roster
/// size) marked online — chosen uniformly at random, per invocation,
/// independent of the live presence feed. Purely cosmetic filler.
#[derive(Debug, Clone)]
pub struct StaticSeed {
    people: Vec<DirectoryEntry>,
    online_count: usize,
}

impl StaticSeed {
    /// Creates a seed over a custom roster.
    pub fn new(people: Vec<DirectoryEntry>, online_count: usize) -> Self {
        Self {
            people,
            online_count,
        }
    }
}

/// The default six demo people, three of them online per fetch.
impl Default for StaticSeed {
    fn default() -> Self {
        Self::new(demo_roster(), 3)
    }
}

impl SeedProvider for StaticSeed {
    fn entries(&self) -> Vec<DirectoryEntry> {
        let mut entries = self.people.clone();

        // Hints are recomputed from scratch each call; whatever the
        // stored roster says is overwritten.
        for entry in &mut entries {
            entry.online_hint = false;
        }

        let count = self.online_count.min(entries.len());
        let mut rng = rand::rng();
        for index in sample(&mut rng, entries.len(), count) {
            entries[index].online_hint = true;
        }

        entries
    }
}

// ---------------------------------------------------------------------------
// NoSeed
// ---------------------------------------------------------------------------

/// The production seed: nothing.
///
/// With this provider the directory shows live backend records only,
/// and a failed fetch yields an empty list.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSeed;

impl SeedProvider for NoSeed {
    fn entries(&self) -> Vec<DirectoryEntry> {
        Vec::new()
    }
}

// ---------------------------------------------------------------------------
// Demo roster
// ---------------------------------------------------------------------------

fn demo_person(name: &str, avatar: &str) -> DirectoryEntry {
    DirectoryEntry {
        id: UserKey::derive(name),
        name: name.to_string(),
        avatar_url: avatar.to_string(),
        provider: Provider::Google,
        online_hint: false,
    }
}

fn demo_roster() -> Vec<DirectoryEntry> {
    vec![
        demo_person(
            "Aarav Sharma",
            "https://placehold.co/128x128/10b981/ffffff?text=AS",
        ),
        demo_person(
            "Emily Johnson",
            "https://placehold.co/128x128/ef4444/ffffff?text=EJ",
        ),
        demo_person(
            "Riya Gupta",
            "https://placehold.co/128x128/f59e0b/ffffff?text=RG",
        ),
        demo_person(
            "Oliver Smith",
            "https://placehold.co/128x128/3b82f6/ffffff?text=OS",
        ),
        demo_person(
            "Kabir Verma",
            "https://placehold.co/128x128/8b5cf6/ffffff?text=KV",
        ),
        demo_person(
            "Sophia Martinez",
            "https://placehold.co/128x128/06b6d4/ffffff?text=SM",
        ),
    ]
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn online_count(entries: &[DirectoryEntry]) -> usize {
        entries.iter().filter(|e| e.online_hint).count()
    }

    #[test]
    fn test_default_seed_has_six_people() {
        let entries = StaticSeed::default().entries();
        assert_eq!(entries.len(), 6);
    }

    #[test]
    fn test_default_seed_marks_exactly_three_online() {
        // Never more, never fewer — regardless of which three the RNG
        // picks. Run it repeatedly to cover many draws.
        let seed = StaticSeed::default();
        for _ in 0..50 {
            assert_eq!(online_count(&seed.entries()), 3);
        }
    }

    #[test]
    fn test_seed_ids_are_derived_slugs() {
        let entries = StaticSeed::default().entries();
        let ids: Vec<&str> =
            entries.iter().map(|e| e.id.as_str()).collect();
        assert!(ids.contains(&"aarav-sharma"));
        assert!(ids.contains(&"sophia-martinez"));
    }

    #[test]
    fn test_online_count_caps_at_roster_size() {
        // Asking for more online entries than people exist must not
        // panic the sampler.
        let roster = demo_roster()[..2].to_vec();
        let seed = StaticSeed::new(roster, 5);
        assert_eq!(online_count(&seed.entries()), 2);
    }

    #[test]
    fn test_zero_online_count_marks_none() {
        let seed = StaticSeed::new(demo_roster(), 0);
        assert_eq!(online_count(&seed.entries()), 0);
    }

    #[test]
    fn test_stale_hints_are_reset_each_call() {
        // A roster that claims everyone is online still yields exactly
        // the configured count.
        let mut roster = demo_roster();
        for entry in &mut roster {
            entry.online_hint = true;
        }
        let seed = StaticSeed::new(roster, 1);
        assert_eq!(online_count(&seed.entries()), 1);
    }

    #[test]
    fn test_no_seed_is_empty() {
        assert!(NoSeed.entries().is_empty());
    }

    #[test]
    fn test_empty_roster_is_fine() {
        let seed = StaticSeed::new(Vec::new(), 3);
        assert!(seed.entries().is_empty());
    }
}
