//! Document surface of the hosted backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::{Value, json};

use docbox_core::error::AppError;
use docbox_core::result::AppResult;
use docbox_core::traits::{Document, DocumentList, DocumentStore};
use docbox_core::types::DocumentQuery;

use crate::client::HostedBackend;
use crate::query;

impl HostedBackend {
    fn documents_path(&self, collection_id: &str) -> String {
        format!(
            "/databases/{}/collections/{}/documents",
            self.config.database_id, collection_id
        )
    }

    fn document_path(&self, collection_id: &str, document_id: &str) -> String {
        format!("{}/{}", self.documents_path(collection_id), document_id)
    }
}

/// Split a wire document into system fields plus the attribute payload.
///
/// System attributes are `$`-prefixed; everything else is application data.
fn decode_document(value: Value) -> AppResult<Document> {
    let Value::Object(mut obj) = value else {
        return Err(AppError::backend("Document response is not an object"));
    };

    let id = obj
        .remove("$id")
        .and_then(|v| v.as_str().map(String::from))
        .ok_or_else(|| AppError::backend("Document response is missing $id"))?;
    let created_at = decode_timestamp(obj.remove("$createdAt"), "$createdAt")?;
    let updated_at = decode_timestamp(obj.remove("$updatedAt"), "$updatedAt")?;

    obj.retain(|key, _| !key.starts_with('$'));

    Ok(Document {
        id,
        created_at,
        updated_at,
        data: Value::Object(obj),
    })
}

fn decode_timestamp(value: Option<Value>, field: &str) -> AppResult<DateTime<Utc>> {
    let raw = value
        .and_then(|v| v.as_str().map(String::from))
        .ok_or_else(|| AppError::backend(format!("Document response is missing {field}")))?;

    DateTime::parse_from_rfc3339(&raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| AppError::backend(format!("Invalid {field} timestamp '{raw}': {e}")))
}

#[async_trait]
impl DocumentStore for HostedBackend {
    async fn create_document(
        &self,
        collection_id: &str,
        data: Value,
    ) -> AppResult<Document> {
        let value: Value = self
            .send_json(
                self.request(Method::POST, &self.documents_path(collection_id))
                    .json(&json!({ "data": data })),
                "create document",
            )
            .await?;

        decode_document(value)
    }

    async fn list_documents(
        &self,
        collection_id: &str,
        query: &DocumentQuery,
    ) -> AppResult<DocumentList> {
        let params: Vec<(&str, String)> = query::encode(query)?
            .into_iter()
            .map(|q| ("queries[]", q))
            .collect();

        let value: Value = self
            .send_json(
                self.request(Method::GET, &self.documents_path(collection_id))
                    .query(&params),
                "list documents",
            )
            .await?;

        let total = value
            .get("total")
            .and_then(Value::as_u64)
            .ok_or_else(|| AppError::backend("Document list response is missing total"))?;

        let documents = value
            .get("documents")
            .and_then(Value::as_array)
            .ok_or_else(|| AppError::backend("Document list response is missing documents"))?
            .iter()
            .cloned()
            .map(decode_document)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(DocumentList { total, documents })
    }

    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> AppResult<Document> {
        let value: Value = self
            .send_json(
                self.request(Method::PATCH, &self.document_path(collection_id, document_id))
                    .json(&json!({ "data": data })),
                "update document",
            )
            .await?;

        decode_document(value)
    }

    async fn delete_document(&self, collection_id: &str, document_id: &str) -> AppResult<()> {
        self.send_unit(
            self.request(
                Method::DELETE,
                &self.document_path(collection_id, document_id),
            ),
            "delete document",
        )
        .await
    }
}
