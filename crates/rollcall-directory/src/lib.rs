//! The directory layer: who does the backend know about?
//!
//! Three pieces:
//!
//! 1. **[`ApiClient`]** — the HTTP surface: directory list, profile
//!    fetch, account deletion. One request per call, no retries.
//! 2. **[`SeedProvider`]** — pluggable demo data. The service ships with
//!    a fixed roster of demo people ([`StaticSeed`]) that pads the
//!    directory while the backend is sparse, and stands in for it
//!    entirely when it is unreachable. Production builds plug in
//!    [`NoSeed`].
//! 3. **[`DirectoryFetcher`]** — the merge policy: live records
//!    normalized into [`DirectoryEntry`] values, seed entries appended;
//!    on failure, seed entries alone. Fetching never errors — a dead
//!    backend degrades the list, it doesn't break the page.
//!
//! [`DirectoryEntry`]: rollcall_protocol::DirectoryEntry

mod api;
mod error;
mod fetcher;
mod seed;

pub use api::{ApiClient, ApiConfig};
pub use error::DirectoryError;
pub use fetcher::DirectoryFetcher;
pub use seed::{NoSeed, SeedProvider, StaticSeed};
