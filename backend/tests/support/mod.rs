#![allow(dead_code)]

use std::{path::Path, sync::Arc};

use axum::{
    body::Body,
    http::{header::COOKIE, Request, Response},
    Router,
};
use http_body_util::BodyExt;
use larder::{
    auth::SESSION_COOKIE, build_router, config::Config, database::Database, state::AppState,
};
use larder_adapters::{MemorySessionStore, Session, SessionStore, SessionUser};
use tower::ServiceExt;

pub struct TestApp {
    pub state: Arc<AppState>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_store(config, Arc::new(MemorySessionStore::new()))
    }

    pub fn with_store(config: Config, store: Arc<dyn SessionStore>) -> Self {
        let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/lists.json");
        let database = Database::load(&fixture).expect("load fixture lists");

        let state = AppState::with_parts(config, store, database);
        let router = build_router(state.clone());

        Self { state, router }
    }

    pub async fn sign_in(&self, user_id: &str) -> Session {
        self.state
            .auth
            .establish(SessionUser {
                id: user_id.to_string(),
                name: Some(user_id.to_string()),
                email: Some(format!("{user_id}@example.com")),
            })
            .await
            .expect("establish session")
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> Response<Body> {
        self.send("GET", path, token).await
    }

    pub async fn send(&self, method: &str, path: &str, token: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = token {
            builder = builder.header(COOKIE, format!("{SESSION_COOKIE}={token}"));
        }

        self.router
            .clone()
            .oneshot(builder.body(Body::empty()).expect("build request"))
            .await
            .expect("router is infallible")
    }
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let text = body_text(response).await;
    serde_json::from_str(&text).expect("json body")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("read body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all("set-cookie")
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}
