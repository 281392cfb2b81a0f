//! Reqwest client for the hosted backend REST API.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use docbox_core::config::backend::BackendConfig;
use docbox_core::error::AppError;
use docbox_core::result::AppResult;
use docbox_core::traits::{BackendFactory, BackendHandles};

/// Credential a handle authenticates its requests with.
#[derive(Debug, Clone)]
pub(crate) enum Credential {
    /// Elevated service key (admin handles).
    ApiKey(String),
    /// Opaque user session secret (session handles).
    Session(String),
}

/// One privilege level's HTTP client for the hosted backend.
///
/// Implements all three capability traits; the credential decides what the
/// backend will allow. Cheap to construct — handles are built per request.
#[derive(Debug, Clone)]
pub struct HostedBackend {
    pub(crate) http: reqwest::Client,
    pub(crate) config: Arc<BackendConfig>,
    pub(crate) credential: Credential,
}

impl HostedBackend {
    /// Absolute URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    /// Request builder with project and credential headers applied.
    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header("X-Project-Id", &self.config.project_id);

        match &self.credential {
            Credential::ApiKey(key) => builder.header("X-Api-Key", key),
            Credential::Session(secret) => builder.header("X-Session-Token", secret),
        }
    }

    /// Send a request and decode a JSON response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        context: &'static str,
    ) -> AppResult<T> {
        let response = self.send(builder, context).await?;

        response.json::<T>().await.map_err(|e| {
            tracing::warn!(context, error = %e, "Backend response decode failed");
            AppError::backend(format!("{context}: invalid backend response: {e}"))
        })
    }

    /// Send a request and discard the response body.
    pub(crate) async fn send_unit(
        &self,
        builder: reqwest::RequestBuilder,
        context: &'static str,
    ) -> AppResult<()> {
        self.send(builder, context).await.map(|_| ())
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        context: &'static str,
    ) -> AppResult<reqwest::Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(context, error = %e, "Backend request failed");
            AppError::backend(format!("{context}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(context, %status, %body, "Backend returned error status");
            return Err(AppError::backend(format!("{context}: backend returned {status}")));
        }

        Ok(response)
    }
}

/// Produces [`HostedBackend`] handles per privilege level.
#[derive(Debug, Clone)]
pub struct HostedBackendFactory {
    http: reqwest::Client,
    config: Arc<BackendConfig>,
}

impl HostedBackendFactory {
    /// Create a factory over one shared HTTP connection pool.
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    fn handles(&self, credential: Credential) -> BackendHandles {
        let backend = Arc::new(HostedBackend {
            http: self.http.clone(),
            config: Arc::clone(&self.config),
            credential,
        });

        BackendHandles {
            identity: Arc::clone(&backend) as _,
            documents: Arc::clone(&backend) as _,
            blobs: backend as _,
        }
    }
}

impl BackendFactory for HostedBackendFactory {
    fn admin(&self) -> BackendHandles {
        self.handles(Credential::ApiKey(self.config.api_key.clone()))
    }

    fn session(&self, session_secret: &str) -> BackendHandles {
        self.handles(Credential::Session(session_secret.to_string()))
    }
}
