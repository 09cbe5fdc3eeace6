//! Shared helpers for the HTTP integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use cutiscura::{build_app, AppConfig, AppState, MemoryStore, Store};

pub const SESSION_COOKIE: &str = "cutiscura_session";

/// Test server over the given store
pub fn server_with(store: Arc<MemoryStore>) -> TestServer {
    let state = AppState::from_parts(store as Arc<dyn Store>, Arc::new(AppConfig::default()));
    TestServer::new(build_app(state)).expect("Failed to create test server")
}

/// Test server over the seeded catalog, plus a handle to flip it into failure
pub fn seeded_server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::seeded());
    (server_with(store.clone()), store)
}

/// Log in and return the session cookie value
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&[("email", email), ("password", password)])
        .await;
    assert_eq!(response.status_code(), 303);
    response.cookie(SESSION_COOKIE).value().to_string()
}

pub fn session_cookie(value: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(SESSION_COOKIE, value.to_string())
}
