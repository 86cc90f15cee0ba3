mod support;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use axum::http::StatusCode;
use chrono::Utc;
use larder::config::Config;
use larder_adapters::{AdapterError, MemorySessionStore, Session, SessionStore, SessionUser};
use support::{body_json, set_cookies, TestApp};

/// A store that cannot be reached for lookups and counts revocations.
#[derive(Default)]
struct UnreachableStore {
    revocations: AtomicUsize,
}

#[async_trait]
impl SessionStore for UnreachableStore {
    async fn create(
        &self,
        _user: SessionUser,
        _ttl: chrono::Duration,
    ) -> Result<Session, AdapterError> {
        Err(AdapterError::Backend("timeout".to_string()))
    }

    async fn get(&self, _token: &str) -> Result<Option<Session>, AdapterError> {
        Err(AdapterError::Backend("timeout".to_string()))
    }

    async fn revoke(&self, _token: &str) -> Result<(), AdapterError> {
        self.revocations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn purge_expired(&self) -> Result<usize, AdapterError> {
        Ok(0)
    }
}

fn assert_redirects_to_sign_in(response: &axum::http::Response<axum::body::Body>, path: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], path);
    assert!(set_cookies(response)
        .iter()
        .any(|cookie| cookie.starts_with("larder.session-token=;") && cookie.contains("Max-Age=0")));
}

#[tokio::test]
async fn sign_out_without_session_still_redirects() {
    let app = TestApp::new();

    for method in ["GET", "POST"] {
        let response = app.send(method, "/api/auth/signout", None).await;
        assert_redirects_to_sign_in(&response, "/auth/signin");
    }
}

#[tokio::test]
async fn sign_out_revokes_the_session() {
    let app = TestApp::new();
    let session = app.sign_in("user-ada").await;

    let response = app
        .send("POST", "/api/auth/signout", Some(&session.token))
        .await;
    assert_redirects_to_sign_in(&response, "/auth/signin");

    assert_eq!(app.state.auth.validate(&session.token).await.unwrap(), None);
}

#[tokio::test]
async fn sign_out_with_stale_cookie_redirects() {
    let app = TestApp::new();

    let response = app
        .send("POST", "/api/auth/signout", Some("deadbeef"))
        .await;
    assert_redirects_to_sign_in(&response, "/auth/signin");
    assert_eq!(set_cookies(&response).len(), 1);
}

#[tokio::test]
async fn sign_in_path_that_is_not_a_header_value_falls_back_to_default() {
    let app = TestApp::with_config(Config {
        sign_in_path: "/login\n".to_string(),
        ..Config::default()
    });

    let response = app.send("POST", "/api/auth/signout", None).await;
    assert_redirects_to_sign_in(&response, "/auth/signin");
}

#[tokio::test]
async fn sign_out_follows_configured_sign_in_path() {
    let app = TestApp::with_config(Config {
        sign_in_path: "/login".to_string(),
        ..Config::default()
    });

    let response = app.send("POST", "/api/auth/signout", None).await;
    assert_redirects_to_sign_in(&response, "/login");
}

#[tokio::test]
async fn session_endpoint_reflects_cookie() {
    let app = TestApp::new();

    let anonymous = body_json(app.get("/api/auth/session", None).await).await;
    assert_eq!(anonymous, serde_json::json!({}));

    let session = app.sign_in("user-grace").await;
    let response = app.get("/api/auth/session", Some(&session.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());

    let json = body_json(response).await;
    assert_eq!(json["user"]["id"], "user-grace");
    assert!(json["expiresAt"].is_string());
    assert!(json.get("token").is_none());
}

#[tokio::test]
async fn unknown_cookie_is_cleared_and_caller_is_anonymous() {
    let app = TestApp::new();

    let response = app.get("/api/auth/session", Some("not-a-session")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response)
        .iter()
        .any(|cookie| cookie.contains("Max-Age=0")));

    assert_eq!(body_json(response).await, serde_json::json!({}));
}

#[tokio::test]
async fn expired_session_cookie_is_cleared_and_revoked() {
    let store = Arc::new(MemorySessionStore::new());
    store
        .insert(Session::new(
            "expired-token".to_string(),
            SessionUser {
                id: "user-ada".to_string(),
                name: None,
                email: None,
            },
            Utc::now() - chrono::Duration::minutes(5),
        ))
        .await;
    let app = TestApp::with_store(Config::default(), store.clone());

    let response = app.get("/api/user/me", Some("expired-token")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(set_cookies(&response).len(), 1);
    assert!(set_cookies(&response)[0].contains("Max-Age=0"));

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn store_outage_keeps_the_cookie() {
    let store = Arc::new(UnreachableStore::default());
    let app = TestApp::with_store(Config::default(), store.clone());

    let response = app.get("/api/auth/session", Some("livetoken")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(body_json(response).await, serde_json::json!({}));

    let response = app.get("/api/user/me", Some("livetoken")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());

    assert_eq!(store.revocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn profile_requires_a_session() {
    let app = TestApp::new();

    let response = app.get("/api/user/me", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        body_json(response).await["error"],
        "authentication required"
    );

    let session = app.sign_in("user-ada").await;
    let response = app.get("/api/user/me", Some(&session.token)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["email"], "user-ada@example.com");
}
