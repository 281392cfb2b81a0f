//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use docbox_api::state::AppState;
use docbox_backend::MemoryBackend;
use docbox_core::config::AppConfig;
use docbox_core::config::backend::BackendConfig;
use docbox_core::config::logging::LoggingConfig;
use docbox_core::config::server::ServerConfig;
use docbox_core::config::upload::UploadConfig;
use docbox_core::traits::BackendFactory;
use docbox_core::traits::revalidate::LoggingRevalidator;
use docbox_service::file::FileService;
use docbox_service::usage::UsageService;
use docbox_service::user::UserService;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// The in-memory backend, for fault injection and OTP retrieval
    pub backend: MemoryBackend,
}

impl TestApp {
    /// Create a new test application over a fresh in-memory backend
    pub fn new() -> Self {
        let config = Arc::new(test_config());
        let backend = MemoryBackend::new();
        let factory: Arc<dyn BackendFactory> = Arc::new(backend.clone());
        let revalidator = Arc::new(LoggingRevalidator);

        let user_service = Arc::new(UserService::new(Arc::clone(&factory), Arc::clone(&config)));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&factory),
            revalidator,
            Arc::clone(&config),
        ));
        let usage_service = Arc::new(UsageService::new(factory, Arc::clone(&config)));

        let state = AppState {
            config,
            user_service,
            file_service,
            usage_service,
        };

        Self {
            router: docbox_api::router::build_router(state),
            backend,
        }
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        session: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(secret) = session {
            builder = builder.header(header::COOKIE, format!("docbox-session={secret}"));
        }

        let body = body
            .map(|b| Body::from(serde_json::to_string(&b).expect("Failed to serialize body")))
            .unwrap_or_else(Body::empty);

        self.send(builder.body(body).expect("Failed to build request"))
            .await
    }

    /// Upload a file through the multipart endpoint
    pub async fn upload(
        &self,
        session: &str,
        file_name: &str,
        content: &[u8],
        path: &str,
    ) -> TestResponse {
        let boundary = "docbox-test-boundary";

        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(
            format!(
                "\r\n--{boundary}\r\nContent-Disposition: form-data; name=\"path\"\r\n\r\n\
                 {path}\r\n--{boundary}--\r\n"
            )
            .as_bytes(),
        );

        let request = Request::builder()
            .method("POST")
            .uri("/api/files")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .header(header::COOKIE, format!("docbox-session={session}"))
            .body(Body::from(body))
            .expect("Failed to build upload request");

        self.send(request).await
    }

    /// Run the full OTP sign-in flow and return the session secret
    pub async fn sign_in(&self, full_name: &str, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/sign-up",
                Some(json!({ "full_name": full_name, "email": email })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Sign-up failed: {:?}", response.body);
        let account_id = response.body["data"]["account_id"]
            .as_str()
            .expect("No account_id in sign-up response")
            .to_string();

        let code = self
            .backend
            .pending_code(email)
            .await
            .expect("No pending OTP code");

        let response = self
            .request(
                "POST",
                "/api/auth/verify",
                Some(json!({ "account_id": account_id, "otp": code })),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "Verify failed: {:?}", response.body);

        response.session_cookie().expect("No session cookie set")
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The session secret from the Set-Cookie header, if one was set
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get(header::SET_COOKIE)?
            .to_str()
            .ok()?
            .split(';')
            .next()?
            .strip_prefix("docbox-session=")
            .map(String::from)
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        backend: BackendConfig {
            endpoint: "memory://local".to_string(),
            project_id: "test-project".to_string(),
            database_id: "test-db".to_string(),
            users_collection_id: "users".to_string(),
            files_collection_id: "files".to_string(),
            bucket_id: "bucket".to_string(),
            api_key: "test-key".to_string(),
        },
        upload: UploadConfig::default(),
        logging: LoggingConfig::default(),
    }
}
