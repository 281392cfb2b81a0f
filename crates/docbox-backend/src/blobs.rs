//! Object storage surface of the hosted backend.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Method;
use serde::Deserialize;

use docbox_core::result::AppResult;
use docbox_core::traits::{BlobObject, BlobStore};

use crate::client::HostedBackend;

#[derive(Debug, Deserialize)]
struct BlobResponse {
    #[serde(rename = "$id")]
    id: String,
    name: String,
    #[serde(rename = "sizeOriginal")]
    size_original: u64,
}

impl HostedBackend {
    fn files_path(&self) -> String {
        format!("/storage/buckets/{}/files", self.config.bucket_id)
    }
}

#[async_trait]
impl BlobStore for HostedBackend {
    async fn create_blob(&self, file_name: &str, data: Bytes) -> AppResult<BlobObject> {
        let part = reqwest::multipart::Part::bytes(data.to_vec()).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response: BlobResponse = self
            .send_json(
                self.request(Method::POST, &self.files_path()).multipart(form),
                "create blob",
            )
            .await?;

        Ok(BlobObject {
            id: response.id,
            name: response.name,
            size: response.size_original,
        })
    }

    async fn delete_blob(&self, blob_id: &str) -> AppResult<()> {
        let path = format!("{}/{}", self.files_path(), blob_id);
        self.send_unit(self.request(Method::DELETE, &path), "delete blob")
            .await
    }

    fn blob_url(&self, blob_id: &str) -> String {
        format!(
            "{}/storage/buckets/{}/files/{}/view?project={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.bucket_id,
            blob_id,
            self.config.project_id
        )
    }
}
