//! File operations: upload, list, rename, share, delete.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::json;
use tracing::{info, warn};

use docbox_core::config::AppConfig;
use docbox_core::error::AppError;
use docbox_core::traits::{BackendFactory, PathRevalidator};
use docbox_core::types::FileKind;
use docbox_entity::file::{FileDoc, NewFileDoc, attrs};
use docbox_entity::user::User;

use crate::saga::Saga;

use super::query::build_file_query;

/// Parameters for an upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Original file name, classification input.
    pub file_name: String,
    /// Raw file content.
    pub data: Bytes,
    /// View path whose cache the upload invalidates.
    pub path: String,
}

/// Parameters for the file listing.
#[derive(Debug, Clone)]
pub struct ListFilesParams {
    /// Content categories to include; empty means all.
    pub types: Vec<FileKind>,
    /// Name-substring search text; empty means no search filter.
    pub search_text: String,
    /// Sort key, `"field-asc"` / `"field-desc"`.
    pub sort: String,
    /// Result cap.
    pub limit: Option<u32>,
}

impl Default for ListFilesParams {
    fn default() -> Self {
        Self {
            types: Vec::new(),
            search_text: String::new(),
            sort: "$createdAt-desc".to_string(),
            limit: None,
        }
    }
}

/// File-metadata and blob lifecycle operations.
///
/// All writes go through the elevated handle; read authorization is the
/// access predicate built into every listing query.
#[derive(Clone)]
pub struct FileService {
    backend: Arc<dyn BackendFactory>,
    revalidator: Arc<dyn PathRevalidator>,
    config: Arc<AppConfig>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        backend: Arc<dyn BackendFactory>,
        revalidator: Arc<dyn PathRevalidator>,
        config: Arc<AppConfig>,
    ) -> Self {
        Self {
            backend,
            revalidator,
            config,
        }
    }

    fn files_collection(&self) -> &str {
        &self.config.backend.files_collection_id
    }

    /// Store a blob plus its metadata document.
    ///
    /// The two writes are paired by a saga: when the metadata create fails,
    /// the already-stored blob is deleted before the error propagates, so a
    /// metadata document never points at a missing blob and no orphaned
    /// metadata row is ever written. There are no retries; the caller may
    /// re-invoke the whole operation.
    pub async fn upload(&self, owner: &User, params: UploadParams) -> Result<FileDoc, AppError> {
        let max_size = self.config.upload.max_size_bytes;
        if params.data.len() as u64 > max_size {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {max_size} bytes"
            )));
        }

        let admin = self.backend.admin();
        let (kind, extension) = FileKind::classify(&params.file_name);

        let blob = admin
            .blobs
            .create_blob(&params.file_name, params.data.clone())
            .await?;

        let mut saga = Saga::new("upload_file");
        {
            let blobs = Arc::clone(&admin.blobs);
            let blob_id = blob.id.clone();
            saga.push("delete uploaded blob", async move {
                blobs.delete_blob(&blob_id).await
            });
        }

        let new_file = NewFileDoc {
            name: blob.name.clone(),
            url: admin.blobs.blob_url(&blob.id),
            kind,
            extension,
            size: blob.size,
            owner: owner.id.clone(),
            account_id: owner.account_id.clone(),
            users: Vec::new(),
            bucket_file_id: blob.id.clone(),
        };

        let payload = match new_file.to_payload() {
            Ok(payload) => payload,
            Err(error) => return Err(saga.abort(error).await),
        };

        let document = match admin
            .documents
            .create_document(self.files_collection(), payload)
            .await
        {
            Ok(document) => document,
            Err(error) => {
                warn!(
                    blob_id = %blob.id,
                    error = %error,
                    "Metadata create failed, rolling back blob"
                );
                return Err(saga.abort(error).await);
            }
        };
        saga.commit();

        let file = FileDoc::from_document(&document)?;

        info!(
            owner = %owner.id,
            file_id = %file.id,
            name = %file.name,
            size = file.size,
            "File uploaded"
        );

        self.revalidator.invalidate(&params.path);
        Ok(file)
    }

    /// List the files the caller may see, filtered and sorted.
    pub async fn list(
        &self,
        current_user: &User,
        params: &ListFilesParams,
    ) -> Result<Vec<FileDoc>, AppError> {
        let admin = self.backend.admin();
        let query = build_file_query(
            current_user,
            &params.types,
            &params.search_text,
            &params.sort,
            params.limit,
        );

        let list = admin
            .documents
            .list_documents(self.files_collection(), &query)
            .await?;

        list.documents.iter().map(FileDoc::from_document).collect()
    }

    /// Rename a file: updates the `name` attribute only. The blob and the
    /// stored `extension` attribute are untouched.
    pub async fn rename(
        &self,
        file_id: &str,
        name: &str,
        extension: &str,
        path: &str,
    ) -> Result<FileDoc, AppError> {
        let new_name = format!("{name}.{extension}");

        let admin = self.backend.admin();
        let document = admin
            .documents
            .update_document(
                self.files_collection(),
                file_id,
                json!({ attrs::NAME: new_name }),
            )
            .await?;

        info!(file_id, "File renamed");

        self.revalidator.invalidate(path);
        FileDoc::from_document(&document)
    }

    /// Replace a file's shared-access email list. A replace, not a merge:
    /// callers supply the full desired list, including entries to retain.
    pub async fn update_users(
        &self,
        file_id: &str,
        emails: &[String],
        path: &str,
    ) -> Result<FileDoc, AppError> {
        let admin = self.backend.admin();
        let document = admin
            .documents
            .update_document(
                self.files_collection(),
                file_id,
                json!({ attrs::USERS: emails }),
            )
            .await?;

        info!(file_id, shared_with = emails.len(), "File sharing updated");

        self.revalidator.invalidate(path);
        FileDoc::from_document(&document)
    }

    /// Delete the metadata document, then the blob.
    ///
    /// Only a successful document delete proceeds to the blob delete. No
    /// transaction spans the two: a blob-delete failure after the document
    /// is gone leaves an orphaned blob with no referencing metadata — logged
    /// and propagated, with no recovery path here.
    pub async fn delete(
        &self,
        file_id: &str,
        bucket_file_id: &str,
        path: &str,
    ) -> Result<(), AppError> {
        let admin = self.backend.admin();

        admin
            .documents
            .delete_document(self.files_collection(), file_id)
            .await?;

        if let Err(error) = admin.blobs.delete_blob(bucket_file_id).await {
            warn!(
                file_id,
                blob_id = bucket_file_id,
                error = %error,
                "Blob delete failed after metadata delete, blob orphaned"
            );
            return Err(error);
        }

        info!(file_id, blob_id = bucket_file_id, "File deleted");

        self.revalidator.invalidate(path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::TestEnv;

    fn upload_params(file_name: &str, bytes: &'static [u8]) -> UploadParams {
        UploadParams {
            file_name: file_name.to_string(),
            data: Bytes::from_static(bytes),
            path: "/documents".to_string(),
        }
    }

    #[tokio::test]
    async fn upload_creates_metadata_referencing_blob() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        let file = env
            .files
            .upload(&ada, upload_params("notes.pdf", b"content"))
            .await
            .unwrap();

        assert_eq!(file.name, "notes.pdf");
        assert_eq!(file.kind, FileKind::Document);
        assert_eq!(file.extension, "pdf");
        assert_eq!(file.size, 7);
        assert_eq!(file.owner, ada.id);
        assert_eq!(file.account_id, ada.account_id);
        assert!(file.users.is_empty());
        assert!(file.url.contains(&file.bucket_file_id));
        assert!(env.backend.blob_exists(&file.bucket_file_id).await);
    }

    #[tokio::test]
    async fn upload_rejects_oversized_file() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        let params = UploadParams {
            file_name: "big.bin".to_string(),
            data: Bytes::from(vec![0u8; 64]),
            path: "/others".to_string(),
        };

        // Test config caps uploads at 32 bytes.
        let err = env.files.upload(&ada, params).await.unwrap_err();
        assert_eq!(err.kind, docbox_core::error::ErrorKind::Validation);
        assert_eq!(env.backend.blob_count().await, 0);
    }

    #[tokio::test]
    async fn failed_metadata_create_rolls_back_blob() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        env.backend.fail_next_document_create();
        let err = env
            .files
            .upload(&ada, upload_params("notes.pdf", b"content"))
            .await
            .unwrap_err();

        assert_eq!(err.kind, docbox_core::error::ErrorKind::Backend);
        assert_eq!(env.backend.blob_count().await, 0);

        let listed = env
            .files
            .list(&ada, &ListFilesParams::default())
            .await
            .unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn list_returns_owned_and_shared_files_only() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;
        let (bob, _) = env.sign_in("Bob", "bob@example.com").await;

        let adas = env
            .files
            .upload(&ada, upload_params("ada.txt", b"a"))
            .await
            .unwrap();
        let bobs = env
            .files
            .upload(&bob, upload_params("bob.txt", b"b"))
            .await
            .unwrap();
        let shared = env
            .files
            .upload(&bob, upload_params("shared.txt", b"s"))
            .await
            .unwrap();
        env.files
            .update_users(&shared.id, &["ada@example.com".to_string()], "/documents")
            .await
            .unwrap();

        let ada_sees: Vec<String> = env
            .files
            .list(&ada, &ListFilesParams::default())
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert!(ada_sees.contains(&adas.id));
        assert!(ada_sees.contains(&shared.id));
        assert!(!ada_sees.contains(&bobs.id));

        let bob_sees: Vec<String> = env
            .files
            .list(&bob, &ListFilesParams::default())
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert!(!bob_sees.contains(&adas.id));
        assert!(bob_sees.contains(&bobs.id));
        assert!(bob_sees.contains(&shared.id));
    }

    #[tokio::test]
    async fn list_composes_type_and_search_filters() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        for name in ["holiday.png", "work.png", "holiday.mp4", "holiday.txt"] {
            env.files
                .upload(&ada, upload_params(name, b"x"))
                .await
                .unwrap();
        }

        let params = ListFilesParams {
            types: vec![FileKind::Image, FileKind::Video],
            search_text: "holiday".to_string(),
            ..ListFilesParams::default()
        };
        let names: Vec<String> = env
            .files
            .list(&ada, &params)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();

        assert_eq!(names.len(), 2);
        assert!(names.contains(&"holiday.png".to_string()));
        assert!(names.contains(&"holiday.mp4".to_string()));
    }

    #[tokio::test]
    async fn list_sorts_by_name_and_caps_results() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        for name in ["c.txt", "a.txt", "b.txt"] {
            env.files
                .upload(&ada, upload_params(name, b"x"))
                .await
                .unwrap();
        }

        let params = ListFilesParams {
            sort: "name-asc".to_string(),
            limit: Some(2),
            ..ListFilesParams::default()
        };
        let names: Vec<String> = env
            .files
            .list(&ada, &params)
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.name)
            .collect();

        assert_eq!(names, vec!["a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn rename_updates_name_but_not_extension() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        let file = env
            .files
            .upload(&ada, upload_params("draft.pdf", b"x"))
            .await
            .unwrap();

        let renamed = env
            .files
            .rename(&file.id, "final", "pdf", "/documents")
            .await
            .unwrap();

        assert_eq!(renamed.name, "final.pdf");
        assert_eq!(renamed.extension, "pdf");
        assert_eq!(renamed.bucket_file_id, file.bucket_file_id);

        // Renaming an unknown document surfaces the generic backend error.
        assert!(
            env.files
                .rename("missing", "x", "pdf", "/documents")
                .await
                .is_err()
        );
    }

    #[tokio::test]
    async fn update_users_replaces_the_whole_list() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        let file = env
            .files
            .upload(&ada, upload_params("shared.txt", b"x"))
            .await
            .unwrap();

        env.files
            .update_users(&file.id, &["a@x.com".to_string()], "/documents")
            .await
            .unwrap();
        let updated = env
            .files
            .update_users(&file.id, &["b@x.com".to_string()], "/documents")
            .await
            .unwrap();

        assert_eq!(updated.users, vec!["b@x.com".to_string()]);
    }

    #[tokio::test]
    async fn delete_removes_document_then_blob() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        let file = env
            .files
            .upload(&ada, upload_params("gone.txt", b"x"))
            .await
            .unwrap();

        env.files
            .delete(&file.id, &file.bucket_file_id, "/documents")
            .await
            .unwrap();

        assert!(!env.backend.blob_exists(&file.bucket_file_id).await);
        assert!(
            env.files
                .list(&ada, &ListFilesParams::default())
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn failed_metadata_delete_skips_blob_delete() {
        let env = TestEnv::new();
        let (ada, _) = env.sign_in("Ada", "ada@example.com").await;

        let file = env
            .files
            .upload(&ada, upload_params("kept.txt", b"x"))
            .await
            .unwrap();

        env.backend.set_fail_document_deletes(true);
        assert!(
            env.files
                .delete(&file.id, &file.bucket_file_id, "/documents")
                .await
                .is_err()
        );

        // The blob delete must not have been attempted.
        assert!(env.backend.blob_exists(&file.bucket_file_id).await);
    }
}
