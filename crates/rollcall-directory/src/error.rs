//! Error types for the directory layer.

/// Errors from the HTTP surface.
///
/// Note the asymmetry with [`DirectoryFetcher`]: the raw [`ApiClient`]
/// calls return these, while `DirectoryFetcher::fetch` absorbs them into
/// the seed fallback. Account deletion is the one call whose failure
/// callers must surface — it aborts sign-out.
///
/// [`ApiClient`]: crate::ApiClient
/// [`DirectoryFetcher`]: crate::DirectoryFetcher
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The request failed: connection error, timeout, a non-2xx status,
    /// or a body that didn't decode.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Account deletion returned something other than 200.
    #[error("account deletion rejected: HTTP {status}")]
    DeleteRejected {
        /// The HTTP status the backend answered with.
        status: u16,
    },
}
