//! Auth flow integration tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn sign_up_verify_and_me() {
    let app = TestApp::new();

    let secret = app.sign_in("Ada Lovelace", "ada@example.com").await;

    let response = app.request("GET", "/api/auth/me", None, Some(&secret)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["fullName"], "Ada Lovelace");
    assert_eq!(response.body["data"]["email"], "ada@example.com");
}

#[tokio::test]
async fn me_without_session_is_unauthorized() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "UNAUTHENTICATED");

    let response = app
        .request("GET", "/api/auth/me", None, Some("stale-secret"))
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn sign_up_rejects_invalid_email() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "full_name": "Ada", "email": "not-an-email" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn wrong_otp_is_rejected() {
    let app = TestApp::new();

    let response = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "full_name": "Ada", "email": "ada@example.com" })),
            None,
        )
        .await;
    let account_id = response.body["data"]["account_id"].as_str().unwrap();

    let code = app.backend.pending_code("ada@example.com").await.unwrap();
    let wrong = if code == "123456" { "654321" } else { "123456" };

    let response = app
        .request(
            "POST",
            "/api/auth/verify",
            Some(json!({ "account_id": account_id, "otp": wrong })),
            None,
        )
        .await;

    assert!(!response.status.is_success());
    assert!(response.session_cookie().is_none());
}

#[tokio::test]
async fn sign_out_destroys_the_session() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    let response = app
        .request("POST", "/api/auth/sign-out", None, Some(&secret))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    // The cookie is cleared in the response...
    let cleared = response.session_cookie().unwrap_or_default();
    assert!(cleared.is_empty());

    // ...and the old secret no longer resolves.
    let response = app.request("GET", "/api/auth/me", None, Some(&secret)).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn repeat_sign_up_reuses_the_account() {
    let app = TestApp::new();

    let first = app
        .request(
            "POST",
            "/api/auth/sign-up",
            Some(json!({ "full_name": "Ada", "email": "ada@example.com" })),
            None,
        )
        .await;
    let second = app
        .request(
            "POST",
            "/api/auth/send-otp",
            Some(json!({ "email": "ada@example.com" })),
            None,
        )
        .await;

    assert_eq!(
        first.body["data"]["account_id"],
        second.body["data"]["account_id"]
    );
}
