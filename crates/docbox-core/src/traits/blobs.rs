//! Object storage capability of the hosted backend.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// Metadata about a stored blob object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobObject {
    /// Backend-assigned blob id.
    pub id: String,
    /// Name the blob was stored under.
    pub name: String,
    /// Size of the stored content in bytes.
    pub size: u64,
}

/// Blob create/delete surface over the configured bucket.
///
/// Blobs have no lifecycle record of their own in this system; the file
/// metadata document referencing a blob id is the only ledger.
#[async_trait]
pub trait BlobStore: Send + Sync + 'static {
    /// Store the bytes under a fresh blob id.
    async fn create_blob(&self, file_name: &str, data: Bytes) -> AppResult<BlobObject>;

    /// Delete a blob by id.
    async fn delete_blob(&self, blob_id: &str) -> AppResult<()>;

    /// Publicly-embeddable view URL for a blob id.
    fn blob_url(&self, blob_id: &str) -> String;
}
