//! The HTTP surface: the three backend calls Rollcall makes.

use rollcall_protocol::{ProfileRecord, UserRecord};

use crate::DirectoryError;

/// Fully-resolved endpoint URLs for the backend.
///
/// Assembled by the configuration layer; this crate never builds URLs
/// from parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// `GET` — the signed-in user's profile record.
    pub profile_url: String,
    /// `GET` — every known user.
    pub directory_url: String,
    /// `DELETE` (+ `email` query parameter) — account removal.
    pub logout_url: String,
}

/// HTTP client for the Rollcall backend.
///
/// Wraps one `reqwest::Client` (connection pool included) for the life
/// of the process. Every method is a single attempt — retry policy, if
/// any, belongs to callers.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    /// Creates a client for the given endpoints.
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Fetches the signed-in user's profile.
    ///
    /// Called once after a provider redirect lands, to complete sign-in.
    ///
    /// # Errors
    /// [`DirectoryError::Request`] on network failure, non-2xx status,
    /// or an undecodable body.
    pub async fn fetch_profile(&self) -> Result<ProfileRecord, DirectoryError> {
        let response = self
            .http
            .get(&self.config.profile_url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Fetches the full user directory.
    ///
    /// # Errors
    /// [`DirectoryError::Request`] on network failure, non-2xx status,
    /// or an undecodable body.
    pub async fn fetch_users(&self) -> Result<Vec<UserRecord>, DirectoryError> {
        let response = self
            .http
            .get(&self.config.directory_url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    /// Deletes the account identified by `email`.
    ///
    /// Exactly 200 counts as success; any other answer is a rejection
    /// the caller must surface, because sign-out must not proceed past a
    /// failed deletion.
    ///
    /// # Errors
    /// - [`DirectoryError::Request`] — the request never completed.
    /// - [`DirectoryError::DeleteRejected`] — the backend answered, but
    ///   not with 200.
    pub async fn delete_account(&self, email: &str) -> Result<(), DirectoryError> {
        let response = self
            .http
            .delete(&self.config.logout_url)
            .query(&[("email", email)])
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            tracing::info!(email, "account deleted");
            Ok(())
        } else {
            Err(DirectoryError::DeleteRejected {
                status: status.as_u16(),
            })
        }
    }
}
