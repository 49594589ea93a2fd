//! Endpoint configuration, parsed from environment variables.
//!
//! Nothing network-shaped is hardcoded anywhere else: every host and
//! path the client touches comes from here. The base URL is
//! scheme-less (`host:port`) — the same base serves `http://` for the
//! REST calls and `ws://` for the presence feed.

use std::time::Duration;

use rollcall_directory::ApiConfig;
use rollcall_presence::PresenceConfig;
use rollcall_protocol::Provider;

pub const DEFAULT_BASE_URL: &str = "localhost:8080";
pub const DEFAULT_PROFILE_PATH: &str = "/api/user-info";
pub const DEFAULT_DIRECTORY_PATH: &str = "/api/all-users";
pub const DEFAULT_PRESENCE_PATH: &str = "/presence/";
pub const DEFAULT_LOGOUT_PATH: &str = "/api/logout";
pub const DEFAULT_AUTHORIZE_GOOGLE_PATH: &str = "/oauth2/authorization/google";
pub const DEFAULT_AUTHORIZE_GITHUB_PATH: &str = "/oauth2/authorization/github";
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 3;

/// Everything the client needs to find its backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Scheme-less backend address, e.g. `localhost:8080`.
    pub base_url: String,
    /// `GET` — profile of the signed-in user.
    pub profile_path: String,
    /// `GET` — the full user directory.
    pub directory_path: String,
    /// WebSocket path prefix; the derived user key is appended.
    pub presence_path: String,
    /// `DELETE` — account removal on sign-out.
    pub logout_path: String,
    /// Browser-navigation target to start a Google sign-in.
    pub authorize_google_path: String,
    /// Browser-navigation target to start a GitHub sign-in.
    pub authorize_github_path: String,
    /// Presence reconnect delay, in seconds.
    pub retry_delay_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            profile_path: DEFAULT_PROFILE_PATH.into(),
            directory_path: DEFAULT_DIRECTORY_PATH.into(),
            presence_path: DEFAULT_PRESENCE_PATH.into(),
            logout_path: DEFAULT_LOGOUT_PATH.into(),
            authorize_google_path: DEFAULT_AUTHORIZE_GOOGLE_PATH.into(),
            authorize_github_path: DEFAULT_AUTHORIZE_GITHUB_PATH.into(),
            retry_delay_secs: DEFAULT_RETRY_DELAY_SECS,
        }
    }
}

impl Config {
    /// Builds a config from environment variables, falling back to the
    /// defaults above. All variables are optional:
    ///
    /// - `ROLLCALL_BASE_URL` (scheme-less; a scheme or leading `//` is
    ///   stripped if present)
    /// - `ROLLCALL_PROFILE_PATH`
    /// - `ROLLCALL_DIRECTORY_PATH`
    /// - `ROLLCALL_PRESENCE_PATH`
    /// - `ROLLCALL_LOGOUT_PATH`
    /// - `ROLLCALL_AUTHORIZE_GOOGLE`
    /// - `ROLLCALL_AUTHORIZE_GITHUB`
    /// - `ROLLCALL_RETRY_DELAY_SECS`
    pub fn from_env() -> Self {
        Self {
            base_url: normalize_base(&env_or(
                "ROLLCALL_BASE_URL",
                DEFAULT_BASE_URL,
            )),
            profile_path: env_or("ROLLCALL_PROFILE_PATH", DEFAULT_PROFILE_PATH),
            directory_path: env_or(
                "ROLLCALL_DIRECTORY_PATH",
                DEFAULT_DIRECTORY_PATH,
            ),
            presence_path: env_or(
                "ROLLCALL_PRESENCE_PATH",
                DEFAULT_PRESENCE_PATH,
            ),
            logout_path: env_or("ROLLCALL_LOGOUT_PATH", DEFAULT_LOGOUT_PATH),
            authorize_google_path: env_or(
                "ROLLCALL_AUTHORIZE_GOOGLE",
                DEFAULT_AUTHORIZE_GOOGLE_PATH,
            ),
            authorize_github_path: env_or(
                "ROLLCALL_AUTHORIZE_GITHUB",
                DEFAULT_AUTHORIZE_GITHUB_PATH,
            ),
            retry_delay_secs: env_parse_u64(
                "ROLLCALL_RETRY_DELAY_SECS",
                DEFAULT_RETRY_DELAY_SECS,
            ),
        }
    }

    /// `http://` URL for a path on the backend.
    pub fn http_url(&self, path: &str) -> String {
        format!("http://{}{path}", self.base_url)
    }

    /// `ws://` URL for a path on the backend.
    pub fn ws_url(&self, path: &str) -> String {
        format!("ws://{}{path}", self.base_url)
    }

    /// The resolved REST endpoints.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            profile_url: self.http_url(&self.profile_path),
            directory_url: self.http_url(&self.directory_path),
            logout_url: self.http_url(&self.logout_path),
        }
    }

    /// The presence feed prefix the user key is appended to.
    pub fn presence_endpoint(&self) -> String {
        self.ws_url(&self.presence_path)
    }

    /// Presence link settings.
    pub fn presence_config(&self) -> PresenceConfig {
        PresenceConfig {
            retry_delay: Duration::from_secs(self.retry_delay_secs),
        }
    }

    /// The authorization URL a view navigates to for the given
    /// provider. `None` for [`Provider::Unknown`] — there is nowhere to
    /// send the user.
    pub fn authorize_url(&self, provider: Provider) -> Option<String> {
        match provider {
            Provider::Google => {
                Some(self.http_url(&self.authorize_google_path))
            }
            Provider::Github => {
                Some(self.http_url(&self.authorize_github_path))
            }
            Provider::Unknown => None,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(default)
}

/// Strips a scheme or protocol-relative prefix and any trailing slash,
/// leaving bare `host[:port]`.
fn normalize_base(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw
        .strip_prefix("http://")
        .or_else(|| raw.strip_prefix("https://"))
        .or_else(|| raw.strip_prefix("ws://"))
        .or_else(|| raw.strip_prefix("wss://"))
        .or_else(|| raw.strip_prefix("//"))
        .unwrap_or(raw);
    raw.trim_end_matches('/').to_string()
}

// =========================================================================
// Tests
// =========================================================================
