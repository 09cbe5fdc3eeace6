//! Login and logout through the HTTP surface

mod common;

use std::sync::Arc;

use common::{login, seeded_server, server_with, session_cookie, SESSION_COOKIE};
use cutiscura::auth::password::hash_password;
use cutiscura::MemoryStore;

#[tokio::test]
async fn test_login_page_renders_for_anonymous_visitor() {
    let (server, _) = seeded_server();
    let response = server.get("/login").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("name=\"password\""));
}

#[tokio::test]
async fn test_wrong_password_redisplays_form_without_session() {
    let (server, _) = seeded_server();
    let response = server
        .post("/login")
        .form(&[("email", "amara@cutiscura.test"), ("password", "not-it")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Invalid email or password."));
    assert!(response.cookies().get(SESSION_COOKIE).is_none());
}

#[tokio::test]
async fn test_unknown_and_blank_emails_are_invalid_credentials() {
    let (server, _) = seeded_server();
    for email in ["nobody@cutiscura.test", "not-an-email", "", "   "] {
        let response = server
            .post("/login")
            .form(&[("email", email), ("password", "glow123")])
            .await;
        assert_eq!(response.status_code(), 200);
        assert!(response.text().contains("Invalid email or password."));
        assert!(response.cookies().get(SESSION_COOKIE).is_none());
    }
}

#[tokio::test]
async fn test_login_success_sets_cookie_and_redirects_home() {
    let (server, _) = seeded_server();
    let response = server
        .post("/login")
        .form(&[("email", "  AMARA@cutiscura.test "), ("password", "glow123")])
        .await;

    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
    let session = response.cookie(SESSION_COOKIE);
    assert!(!session.value().is_empty());

    let response = server
        .get("/")
        .add_cookie(session_cookie(session.value()))
        .await;
    assert!(response.text().contains("Signed in as Amara Okafor"));
}

#[tokio::test]
async fn test_stored_email_without_domain_suffix_logs_in() {
    let store = Arc::new(MemoryStore::new().with_user(
        9,
        "Clinic Admin",
        "admin@localhost",
        "pw",
        None,
    ));
    let server = server_with(store);

    let session = login(&server, "admin@localhost", "pw").await;
    let response = server.get("/").add_cookie(session_cookie(&session)).await;
    assert!(response.text().contains("Signed in as Clinic Admin"));
}

#[tokio::test]
async fn test_login_page_redirects_when_already_signed_in() {
    let (server, _) = seeded_server();
    let session = login(&server, "amara@cutiscura.test", "glow123").await;

    let response = server.get("/login").add_cookie(session_cookie(&session)).await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/");
}

#[tokio::test]
async fn test_store_failure_shows_unavailable_message() {
    let (server, store) = seeded_server();
    store.set_failing(true);
    let response = server
        .post("/login")
        .form(&[("email", "amara@cutiscura.test"), ("password", "glow123")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert!(response.text().contains("Unable to login right now."));
    assert!(response.cookies().get(SESSION_COOKIE).is_none());
}

#[tokio::test]
async fn test_argon2_stored_password_is_accepted() {
    let hash = hash_password("s3cret-serum").expect("hash");
    let store = Arc::new(MemoryStore::new().with_user(
        7,
        "Lena Park",
        "lena@cutiscura.test",
        &hash,
        None,
    ));
    let server = server_with(store);

    let session = login(&server, "lena@cutiscura.test", "s3cret-serum").await;
    let response = server.get("/").add_cookie(session_cookie(&session)).await;
    assert!(response.text().contains("Signed in as Lena Park"));

    let response = server
        .post("/login")
        .form(&[("email", "lena@cutiscura.test"), ("password", hash.as_str())])
        .await;
    assert!(response.text().contains("Invalid email or password."));
}

#[tokio::test]
async fn test_corrupt_stored_hash_shows_unavailable_message() {
    let store = Arc::new(MemoryStore::new().with_user(
        8,
        "Noor Haddad",
        "noor@cutiscura.test",
        "$argon2!id$corrupt",
        None,
    ));
    let server = server_with(store);

    let response = server
        .post("/login")
        .form(&[("email", "noor@cutiscura.test"), ("password", "anything")])
        .await;
    assert_eq!(response.status_code(), 200);
    let body = response.text();
    assert!(body.contains("Unable to login right now."));
    assert!(!body.contains("Invalid email or password."));
    assert!(response.cookies().get(SESSION_COOKIE).is_none());
}

#[tokio::test]
async fn test_logout_clears_session_and_redirects_to_login() {
    let (server, _) = seeded_server();
    let session = login(&server, "amara@cutiscura.test", "glow123").await;

    let response = server
        .post("/logout")
        .add_cookie(session_cookie(&session))
        .await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
    assert_eq!(response.cookie(SESSION_COOKIE).value(), "");

    // The old token no longer names a live session
    let response = server.get("/").add_cookie(session_cookie(&session)).await;
    assert!(!response.text().contains("Signed in as"));
    let response = server.get("/login").add_cookie(session_cookie(&session)).await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_logout_without_session_still_redirects() {
    let (server, _) = seeded_server();
    let response = server.post("/logout").await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(response.header("location"), "/login");
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let (server, _) = seeded_server();
    let response = server
        .get("/")
        .add_cookie(session_cookie("definitely.not.valid"))
        .await;
    assert_eq!(response.status_code(), 200);
    assert!(!response.text().contains("Signed in as"));
}

#[tokio::test]
async fn test_can_relogin_after_logout() {
    let (server, _) = seeded_server();
    let first = login(&server, "ben@cutiscura.test", "sunscreen").await;
    server.post("/logout").add_cookie(session_cookie(&first)).await;

    let second = login(&server, "ben@cutiscura.test", "sunscreen").await;
    assert_ne!(first, second);
    let response = server.get("/").add_cookie(session_cookie(&second)).await;
    assert!(response.text().contains("Signed in as Ben Carter"));
}
