//! File-metadata entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use docbox_core::error::AppError;
use docbox_core::traits::Document;
use docbox_core::types::FileKind;

/// Attribute names of the files collection.
pub mod attrs {
    /// File name attribute (base name plus extension).
    pub const NAME: &str = "name";
    /// View URL attribute.
    pub const URL: &str = "url";
    /// Content category attribute.
    pub const TYPE: &str = "type";
    /// Extension attribute, derived from the name at upload time.
    pub const EXTENSION: &str = "extension";
    /// Size-in-bytes attribute.
    pub const SIZE: &str = "size";
    /// Owning user's document id.
    pub const OWNER: &str = "owner";
    /// Owning user's backend account id.
    pub const ACCOUNT_ID: &str = "accountId";
    /// Emails granted shared access.
    pub const USERS: &str = "users";
    /// Referenced blob object id.
    pub const BUCKET_FILE_ID: &str = "bucketFileId";
}

/// A file-metadata document.
///
/// Must never reference a non-existent blob object in steady state; the
/// upload operation enforces this by deleting the blob when the metadata
/// write fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDoc {
    /// Document id.
    pub id: String,
    /// File name, including extension.
    pub name: String,
    /// Publicly-embeddable view URL of the blob.
    pub url: String,
    /// Content category.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Extension derived from the original name at upload time; rename does
    /// not recompute it.
    pub extension: String,
    /// Size in bytes.
    pub size: u64,
    /// Owner's user-document id. Set once at creation, never changed.
    pub owner: String,
    /// Owner's backend account id.
    pub account_id: String,
    /// Emails granted shared access. Replaced wholesale on share updates.
    pub users: Vec<String>,
    /// Id of the blob object holding the content.
    pub bucket_file_id: String,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileAttrs {
    name: String,
    url: String,
    #[serde(rename = "type")]
    kind: FileKind,
    #[serde(default)]
    extension: String,
    size: u64,
    owner: String,
    account_id: String,
    #[serde(default)]
    users: Vec<String>,
    bucket_file_id: String,
}

impl FileDoc {
    /// Decode a backend document into a `FileDoc`.
    pub fn from_document(doc: &Document) -> Result<Self, AppError> {
        let attrs: FileAttrs = serde_json::from_value(doc.data.clone())?;

        Ok(Self {
            id: doc.id.clone(),
            name: attrs.name,
            url: attrs.url,
            kind: attrs.kind,
            extension: attrs.extension,
            size: attrs.size,
            owner: attrs.owner,
            account_id: attrs.account_id,
            users: attrs.users,
            bucket_file_id: attrs.bucket_file_id,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

/// Attributes for a file-metadata document about to be created.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFileDoc {
    /// File name, including extension.
    pub name: String,
    /// View URL of the stored blob.
    pub url: String,
    /// Content category.
    #[serde(rename = "type")]
    pub kind: FileKind,
    /// Extension derived from the name.
    pub extension: String,
    /// Size in bytes, as reported by the blob store.
    pub size: u64,
    /// Owner's user-document id.
    pub owner: String,
    /// Owner's backend account id.
    pub account_id: String,
    /// Shared-access emails; empty for a fresh upload.
    pub users: Vec<String>,
    /// Referenced blob id.
    pub bucket_file_id: String,
}

impl NewFileDoc {
    /// Attribute payload for the document create call.
    pub fn to_payload(&self) -> Result<serde_json::Value, AppError> {
        Ok(serde_json::to_value(self)?)
    }
}
