//! File operation integration tests.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::TestApp;

#[tokio::test]
async fn upload_and_list() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    let response = app
        .upload(&secret, "report.pdf", b"pdf bytes", "/documents")
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["name"], "report.pdf");
    assert_eq!(response.body["data"]["type"], "document");
    assert_eq!(response.body["data"]["extension"], "pdf");
    assert_eq!(response.body["data"]["size"], 9);

    let response = app.request("GET", "/api/files", None, Some(&secret)).await;
    assert_eq!(response.status, StatusCode::OK);
    let files = response.body["data"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "report.pdf");
}

#[tokio::test]
async fn file_routes_require_a_session() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/files", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app.request("GET", "/api/usage", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_supports_type_search_sort_and_limit() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    for name in ["b.png", "a.png", "notes.txt", "clip.mp4"] {
        let response = app.upload(&secret, name, b"x", "/").await;
        assert_eq!(response.status, StatusCode::OK);
    }

    let response = app
        .request(
            "GET",
            "/api/files?type=image&sort=name-asc&limit=1",
            None,
            Some(&secret),
        )
        .await;
    let files = response.body["data"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "a.png");

    let response = app
        .request("GET", "/api/files?search=notes", None, Some(&secret))
        .await;
    let files = response.body["data"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "notes.txt");

    let response = app
        .request("GET", "/api/files?type=bogus", None, Some(&secret))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn shared_files_appear_for_the_sharee() {
    let app = TestApp::new();
    let ada = app.sign_in("Ada", "ada@example.com").await;
    let bob = app.sign_in("Bob", "bob@example.com").await;

    let response = app.upload(&bob, "bobs.txt", b"x", "/").await;
    let file_id = response.body["data"]["id"].as_str().unwrap().to_string();

    // Not visible to Ada before sharing.
    let response = app.request("GET", "/api/files", None, Some(&ada)).await;
    assert!(response.body["data"].as_array().unwrap().is_empty());

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}/users"),
            Some(json!({ "emails": ["ada@example.com"] })),
            Some(&bob),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["users"][0], "ada@example.com");

    let response = app.request("GET", "/api/files", None, Some(&ada)).await;
    let files = response.body["data"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "bobs.txt");
}

#[tokio::test]
async fn rename_changes_name_only() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    let response = app.upload(&secret, "draft.pdf", b"x", "/documents").await;
    let file_id = response.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request(
            "PUT",
            &format!("/api/files/{file_id}/rename"),
            Some(json!({ "name": "final", "extension": "pdf", "path": "/documents" })),
            Some(&secret),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "final.pdf");
    assert_eq!(response.body["data"]["extension"], "pdf");
}

#[tokio::test]
async fn delete_removes_metadata_and_blob() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    let response = app.upload(&secret, "gone.txt", b"x", "/").await;
    let file_id = response.body["data"]["id"].as_str().unwrap().to_string();
    let blob_id = response.body["data"]["bucketFileId"]
        .as_str()
        .unwrap()
        .to_string();

    let response = app
        .request(
            "DELETE",
            &format!("/api/files/{file_id}"),
            Some(json!({ "bucket_file_id": blob_id, "path": "/" })),
            Some(&secret),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert!(!app.backend.blob_exists(&blob_id).await);
    let response = app.request("GET", "/api/files", None, Some(&secret)).await;
    assert!(response.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn failed_metadata_write_leaves_no_blob_behind() {
    let app = TestApp::new();
    let secret = app.sign_in("Ada", "ada@example.com").await;

    app.backend.fail_next_document_create();
    let response = app.upload(&secret, "lost.txt", b"x", "/").await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(app.backend.blob_count().await, 0);
}
