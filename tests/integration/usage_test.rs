//! Usage summary integration tests.

use axum::http::StatusCode;

use crate::helpers::TestApp;

#[tokio::test]
async fn usage_sums_owned_files_per_category() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    for (name, len) in [("a.png", 10usize), ("b.png", 20), ("c.png", 30)] {
        let response = app.upload(&secret, name, &vec![0u8; len], "/images").await;
        assert_eq!(response.status, StatusCode::OK);
    }
    app.upload(&secret, "song.mp3", &[0u8; 7], "/media").await;

    let response = app.request("GET", "/api/usage", None, Some(&secret)).await;
    assert_eq!(response.status, StatusCode::OK);

    let data = &response.body["data"];
    assert_eq!(data["image"]["size"], 60);
    assert_eq!(data["audio"]["size"], 7);
    assert_eq!(data["document"]["size"], 0);
    assert_eq!(data["used"], 67);
    assert_eq!(data["all"], 2u64 * 1024 * 1024 * 1024);
    assert!(data["image"]["latestDate"].is_string());
    assert!(data["document"]["latestDate"].is_null());
}

#[tokio::test]
async fn usage_excludes_files_shared_by_others() {
    let app = TestApp::new();
    let ada = app.sign_in("Ada", "ada@example.com").await;
    let bob = app.sign_in("Bob", "bob@example.com").await;

    let response = app.upload(&bob, "big.png", &[0u8; 40], "/").await;
    let file_id = response.body["data"]["id"].as_str().unwrap().to_string();
    app.request(
        "PUT",
        &format!("/api/files/{file_id}/users"),
        Some(serde_json::json!({ "emails": ["ada@example.com"] })),
        Some(&bob),
    )
    .await;

    app.upload(&ada, "mine.png", &[0u8; 4], "/").await;

    let response = app.request("GET", "/api/usage", None, Some(&ada)).await;
    assert_eq!(response.body["data"]["used"], 4);
}
