//! Document database capability of the hosted backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::result::AppResult;
use crate::types::DocumentQuery;

/// A raw document as returned by the backend: system fields plus the
/// application-defined attribute payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Backend-assigned document id.
    pub id: String,
    /// Creation timestamp (system attribute).
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp (system attribute).
    pub updated_at: DateTime<Utc>,
    /// Application attributes.
    pub data: serde_json::Value,
}

/// A page of documents with the backend's total match count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentList {
    /// Total number of matching documents (not capped by `limit`).
    pub total: u64,
    /// The returned documents.
    pub documents: Vec<Document>,
}

/// CRUD + query surface over one named collection at a time.
///
/// The owning database is fixed by configuration; collections are addressed
/// by id on every call, mirroring the backend SDK.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Create a document with a backend-assigned id.
    async fn create_document(
        &self,
        collection_id: &str,
        data: serde_json::Value,
    ) -> AppResult<Document>;

    /// List documents matching the query.
    async fn list_documents(
        &self,
        collection_id: &str,
        query: &DocumentQuery,
    ) -> AppResult<DocumentList>;

    /// Patch the given attributes of an existing document. Attributes not
    /// present in `data` are left untouched.
    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: serde_json::Value,
    ) -> AppResult<Document>;

    /// Delete a document by id.
    async fn delete_document(&self, collection_id: &str, document_id: &str) -> AppResult<()>;
}
