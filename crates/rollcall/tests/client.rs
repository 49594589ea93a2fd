//! Integration tests for the client facade against a local HTTP
//! backend.
//!
//! The axum app plays the backend's part: a profile endpoint to
//! complete sign-in against, and a logout endpoint whose answer decides
//! whether sign-out may clear the session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use rollcall::prelude::*;
use rollcall_session::IDENTITY_RECORD_KEY;

/// A `KeyValueStore` over shared state, so two clients can see the same
/// persisted records — one process "reloading" as another.
#[derive(Debug, Clone, Default)]
struct SharedStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.lock().unwrap().insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.values.lock().unwrap().remove(key);
    }
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("should bind");
    let addr = listener.local_addr().expect("should have local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server should run");
    });

    addr.to_string()
}

fn config_for(base_url: String) -> Config {
    Config {
        base_url,
        ..Config::default()
    }
}

async fn ada_profile() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Ada Lovelace",
        "email": "ada@x.com",
        "picture": "https://g.test/ada.png"
    }))
}

async fn logout_ok(
    Query(params): Query<HashMap<String, String>>,
) -> StatusCode {
    if params.get("email").map(String::as_str) == Some("ada@x.com") {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}

fn backend() -> Router {
    Router::new()
        .route("/api/user-info", get(ada_profile))
        .route("/api/logout", delete(logout_ok))
}

// =========================================================================
// Sign-in and restore
// =========================================================================

#[tokio::test]
async fn test_complete_sign_in_persists_then_restores_elsewhere() {
    let base = serve(backend()).await;
    let store = SharedStore::default();

    // First "process": complete the sign-in.
    let mut first =
        RollcallClient::new(config_for(base.clone()), store.clone());
    let identity = first
        .complete_sign_in()
        .await
        .expect("sign-in should complete");
    assert_eq!(identity.email_or_login, "ada@x.com");
    assert!(first.session().is_authenticated());

    // Second "process" over the same storage: restore reproduces it.
    let mut second = RollcallClient::new(config_for(base), store);
    let restored = second.startup().expect("record should restore");
    assert_eq!(restored, identity);
}

#[tokio::test]
async fn test_startup_with_no_record_is_anonymous() {
    let mut client =
        RollcallClient::new(Config::default(), SharedStore::default());

    assert_eq!(client.startup(), None);
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_complete_sign_in_failure_leaves_session_anonymous() {
    // No profile route: the fetch 404s and nothing is adopted.
    let base = serve(Router::new()).await;
    let mut client =
        RollcallClient::new(config_for(base), SharedStore::default());

    let result = client.complete_sign_in().await;

    assert!(matches!(result, Err(RollcallError::Directory(_))));
    assert!(!client.session().is_authenticated());
}

// =========================================================================
// Sign-out
// =========================================================================

#[tokio::test]
async fn test_sign_out_deletes_account_then_clears_session() {
    let base = serve(backend()).await;
    let store = SharedStore::default();
    let mut client = RollcallClient::new(config_for(base), store.clone());
    client.complete_sign_in().await.expect("sign-in");

    client.sign_out().await.expect("sign-out should succeed");

    assert!(!client.session().is_authenticated());
    assert_eq!(
        store.get(IDENTITY_RECORD_KEY),
        None,
        "persisted record must be gone after sign-out"
    );
}

#[tokio::test]
async fn test_sign_out_failure_leaves_session_signed_in() {
    // The backend refuses the deletion; the session must survive so
    // the caller can surface the failure and try again.
    let app = Router::new()
        .route("/api/user-info", get(ada_profile))
        .route(
            "/api/logout",
            delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let base = serve(app).await;
    let store = SharedStore::default();
    let mut client = RollcallClient::new(config_for(base), store.clone());
    client.complete_sign_in().await.expect("sign-in");

    let result = client.sign_out().await;

    assert!(matches!(result, Err(RollcallError::Directory(_))));
    assert!(
        client.session().is_authenticated(),
        "a failed deletion must not clear the session"
    );
    assert!(
        store.get(IDENTITY_RECORD_KEY).is_some(),
        "the persisted record must survive a failed deletion"
    );
}

#[tokio::test]
async fn test_sign_out_when_anonymous_just_clears() {
    let mut client =
        RollcallClient::new(Config::default(), SharedStore::default());

    client
        .sign_out()
        .await
        .expect("anonymous sign-out is a local no-op");
    assert!(!client.session().is_authenticated());
}

// =========================================================================
// Presence wiring
// =========================================================================

#[tokio::test]
async fn test_open_presence_requires_an_identity() {
    let client =
        RollcallClient::new(Config::default(), SharedStore::default());

    let result = client.open_presence();
    assert!(matches!(result, Err(RollcallError::Presence(_))));
}

#[tokio::test]
async fn test_open_presence_keys_off_the_session() {
    let base = serve(backend()).await;
    let mut client =
        RollcallClient::new(config_for(base), SharedStore::default());
    client.complete_sign_in().await.expect("sign-in");
    assert_eq!(client.session().user_key().unwrap().as_str(), "ada-x-com");

    // The feed endpoint isn't served here; opening still succeeds (the
    // worker retries in the background) and teardown is clean.
    let presence = client.open_presence().expect("open should succeed");
    presence.shutdown().await.expect("shutdown should succeed");
}

// =========================================================================
// Sign-in URLs
// =========================================================================

#[tokio::test]
async fn test_sign_in_url_per_provider() {
    let client = RollcallClient::new(
        config_for("backend.test:9000".into()),
        SharedStore::default(),
    );

    assert_eq!(
        client.sign_in_url(Provider::Google).as_deref(),
        Some("http://backend.test:9000/oauth2/authorization/google")
    );
    assert_eq!(
        client.sign_in_url(Provider::Github).as_deref(),
        Some("http://backend.test:9000/oauth2/authorization/github")
    );
    assert_eq!(client.sign_in_url(Provider::Unknown), None);
}
