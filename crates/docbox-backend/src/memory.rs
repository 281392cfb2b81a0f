//! In-memory backend implementation.
//!
//! A complete, substitutable implementation of the three capability traits
//! plus the factory, backed by `tokio::sync::RwLock` tables. Used by unit
//! and integration tests (which also need its fault switches to exercise
//! partial-failure paths) and usable for local development without backend
//! credentials.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use rand::RngExt;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use docbox_core::error::AppError;
use docbox_core::result::AppResult;
use docbox_core::traits::{
    Account, BackendFactory, BackendHandles, BlobObject, BlobStore, Document, DocumentList,
    DocumentStore, Identity, SessionToken,
};
use docbox_core::types::query::{ATTR_CREATED_AT, ATTR_UPDATED_AT};
use docbox_core::types::{DocumentQuery, Filter, SortDirection};

#[derive(Debug, Clone)]
struct AccountRecord {
    email: String,
    pending_code: Option<String>,
}

#[derive(Debug, Clone)]
struct SessionRecord {
    id: String,
    account_id: String,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    data: Value,
}

impl StoredDocument {
    fn to_document(&self) -> Document {
        Document {
            id: self.id.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            data: self.data.clone(),
        }
    }
}

#[derive(Debug)]
struct StoredBlob {
    data: Bytes,
}

#[derive(Debug, Default)]
struct MemoryState {
    /// Accounts by account id.
    accounts: HashMap<String, AccountRecord>,
    /// Sessions by session secret.
    sessions: HashMap<String, SessionRecord>,
    /// Documents per collection id, in insertion order.
    collections: HashMap<String, Vec<StoredDocument>>,
    /// Blobs by blob id.
    blobs: HashMap<String, StoredBlob>,
}

#[derive(Debug, Default)]
struct FaultSwitches {
    fail_next_document_create: AtomicBool,
    fail_document_deletes: AtomicBool,
}

/// Shared in-memory backend state; also the [`BackendFactory`].
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    state: Arc<RwLock<MemoryState>>,
    faults: Arc<FaultSwitches>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// The one-time code most recently issued for an email, if any.
    pub async fn pending_code(&self, email: &str) -> Option<String> {
        let state = self.state.read().await;
        state
            .accounts
            .values()
            .find(|account| account.email == email)
            .and_then(|account| account.pending_code.clone())
    }

    /// Make the next document create fail, once.
    pub fn fail_next_document_create(&self) {
        self.faults
            .fail_next_document_create
            .store(true, AtomicOrdering::SeqCst);
    }

    /// Toggle failure of every document delete.
    pub fn set_fail_document_deletes(&self, fail: bool) {
        self.faults
            .fail_document_deletes
            .store(fail, AtomicOrdering::SeqCst);
    }

    /// Whether a blob with the given id exists.
    pub async fn blob_exists(&self, blob_id: &str) -> bool {
        self.state.read().await.blobs.contains_key(blob_id)
    }

    /// Number of stored blobs.
    pub async fn blob_count(&self) -> usize {
        self.state.read().await.blobs.len()
    }

    /// Size in bytes of a stored blob's content.
    pub async fn blob_size(&self, blob_id: &str) -> Option<usize> {
        self.state
            .read()
            .await
            .blobs
            .get(blob_id)
            .map(|blob| blob.data.len())
    }

    fn handle(&self, session: Option<String>) -> BackendHandles {
        let handle = Arc::new(MemoryHandle {
            state: Arc::clone(&self.state),
            faults: Arc::clone(&self.faults),
            session,
        });

        BackendHandles {
            identity: Arc::clone(&handle) as _,
            documents: Arc::clone(&handle) as _,
            blobs: handle as _,
        }
    }
}

impl BackendFactory for MemoryBackend {
    fn admin(&self) -> BackendHandles {
        self.handle(None)
    }

    fn session(&self, session_secret: &str) -> BackendHandles {
        self.handle(Some(session_secret.to_string()))
    }
}

/// One privilege level's view of the in-memory backend.
#[derive(Debug)]
pub struct MemoryHandle {
    state: Arc<RwLock<MemoryState>>,
    faults: Arc<FaultSwitches>,
    session: Option<String>,
}

fn generate_code() -> String {
    format!("{:06}", rand::rng().random_range(0..1_000_000u32))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl Identity for MemoryHandle {
    async fn create_email_token(&self, email: &str) -> AppResult<String> {
        let code = generate_code();
        let mut state = self.state.write().await;

        let existing = state
            .accounts
            .iter()
            .find(|(_, account)| account.email == email)
            .map(|(id, _)| id.clone());

        let account_id = existing.unwrap_or_else(new_id);
        state.accounts.insert(
            account_id.clone(),
            AccountRecord {
                email: email.to_string(),
                pending_code: Some(code),
            },
        );

        tracing::debug!(email, account_id, "Issued one-time email code");
        Ok(account_id)
    }

    async fn create_session(&self, account_id: &str, secret: &str) -> AppResult<SessionToken> {
        let mut state = self.state.write().await;

        let account = state
            .accounts
            .get_mut(account_id)
            .ok_or_else(|| AppError::backend("Unknown account"))?;

        if account.pending_code.as_deref() != Some(secret) {
            return Err(AppError::backend("Invalid one-time code"));
        }
        account.pending_code = None;

        let token = SessionToken {
            id: new_id(),
            secret: new_id(),
        };
        state.sessions.insert(
            token.secret.clone(),
            SessionRecord {
                id: token.id.clone(),
                account_id: account_id.to_string(),
            },
        );

        Ok(token)
    }

    async fn get_account(&self) -> AppResult<Account> {
        let secret = self
            .session
            .as_deref()
            .ok_or_else(|| AppError::unauthenticated("Handle has no bound session"))?;

        let state = self.state.read().await;
        let session = state
            .sessions
            .get(secret)
            .ok_or_else(|| AppError::unauthenticated("Session not found"))?;
        let account = state
            .accounts
            .get(&session.account_id)
            .ok_or_else(|| AppError::unauthenticated("Account not found"))?;

        Ok(Account {
            id: session.account_id.clone(),
            email: account.email.clone(),
        })
    }

    async fn delete_session(&self) -> AppResult<()> {
        let secret = self
            .session
            .as_deref()
            .ok_or_else(|| AppError::unauthenticated("Handle has no bound session"))?;

        self.state.write().await.sessions.remove(secret);
        Ok(())
    }
}

/// Resolve an attribute value, including the `$`-prefixed system fields.
fn attr(doc: &StoredDocument, field: &str) -> Option<Value> {
    match field {
        "$id" => Some(Value::String(doc.id.clone())),
        ATTR_CREATED_AT => Some(Value::String(doc.created_at.to_rfc3339())),
        ATTR_UPDATED_AT => Some(Value::String(doc.updated_at.to_rfc3339())),
        _ => doc.data.get(field).cloned(),
    }
}

fn attr_as_string(doc: &StoredDocument, field: &str) -> Option<String> {
    match attr(doc, field)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Substring containment for strings, membership for lists; other attribute
/// shapes never match. String matching is case-sensitive.
fn matches(doc: &StoredDocument, filter: &Filter) -> bool {
    match filter {
        Filter::Equal { field, values } => attr_as_string(doc, field)
            .map(|actual| values.contains(&actual))
            .unwrap_or(false),
        Filter::Contains { field, value } => match attr(doc, field) {
            Some(Value::String(s)) => s.contains(value.as_str()),
            Some(Value::Array(items)) => {
                items.iter().any(|item| item.as_str() == Some(value.as_str()))
            }
            _ => false,
        },
        Filter::Or(filters) => filters.iter().any(|nested| matches(doc, nested)),
    }
}

fn compare(a: &StoredDocument, b: &StoredDocument, field: &str) -> Ordering {
    match field {
        ATTR_CREATED_AT => a.created_at.cmp(&b.created_at),
        ATTR_UPDATED_AT => a.updated_at.cmp(&b.updated_at),
        _ => match (a.data.get(field), b.data.get(field)) {
            (Some(Value::Number(x)), Some(Value::Number(y))) => x
                .as_f64()
                .unwrap_or(0.0)
                .partial_cmp(&y.as_f64().unwrap_or(0.0))
                .unwrap_or(Ordering::Equal),
            (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
            (Some(_), None) => Ordering::Greater,
            (None, Some(_)) => Ordering::Less,
            _ => Ordering::Equal,
        },
    }
}

#[async_trait]
impl DocumentStore for MemoryHandle {
    async fn create_document(&self, collection_id: &str, data: Value) -> AppResult<Document> {
        if self
            .faults
            .fail_next_document_create
            .swap(false, AtomicOrdering::SeqCst)
        {
            return Err(AppError::backend("Simulated document-create failure"));
        }

        let now = Utc::now();
        let stored = StoredDocument {
            id: new_id(),
            created_at: now,
            updated_at: now,
            data,
        };
        let document = stored.to_document();

        let mut state = self.state.write().await;
        state
            .collections
            .entry(collection_id.to_string())
            .or_default()
            .push(stored);

        Ok(document)
    }

    async fn list_documents(
        &self,
        collection_id: &str,
        query: &DocumentQuery,
    ) -> AppResult<DocumentList> {
        let state = self.state.read().await;
        let empty = Vec::new();
        let documents = state.collections.get(collection_id).unwrap_or(&empty);

        let mut matched: Vec<&StoredDocument> = documents
            .iter()
            .filter(|doc| query.filters.iter().all(|filter| matches(doc, filter)))
            .collect();
        let total = matched.len() as u64;

        if let Some(sort) = &query.sort {
            matched.sort_by(|a, b| {
                let ordering = compare(a, b, &sort.field);
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(limit) = query.limit {
            matched.truncate(limit as usize);
        }

        Ok(DocumentList {
            total,
            documents: matched.iter().map(|doc| doc.to_document()).collect(),
        })
    }

    async fn update_document(
        &self,
        collection_id: &str,
        document_id: &str,
        data: Value,
    ) -> AppResult<Document> {
        let mut state = self.state.write().await;

        let stored = state
            .collections
            .get_mut(collection_id)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == document_id))
            .ok_or_else(|| AppError::backend("Document not found"))?;

        if let (Value::Object(target), Value::Object(patch)) = (&mut stored.data, data) {
            for (key, value) in patch {
                target.insert(key, value);
            }
        }
        stored.updated_at = Utc::now();

        Ok(stored.to_document())
    }

    async fn delete_document(&self, collection_id: &str, document_id: &str) -> AppResult<()> {
        if self.faults.fail_document_deletes.load(AtomicOrdering::SeqCst) {
            return Err(AppError::backend("Simulated document-delete failure"));
        }

        let mut state = self.state.write().await;
        let documents = state
            .collections
            .get_mut(collection_id)
            .ok_or_else(|| AppError::backend("Document not found"))?;

        let before = documents.len();
        documents.retain(|doc| doc.id != document_id);
        if documents.len() == before {
            return Err(AppError::backend("Document not found"));
        }

        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryHandle {
    async fn create_blob(&self, file_name: &str, data: Bytes) -> AppResult<BlobObject> {
        let blob = BlobObject {
            id: new_id(),
            name: file_name.to_string(),
            size: data.len() as u64,
        };

        self.state
            .write()
            .await
            .blobs
            .insert(blob.id.clone(), StoredBlob { data });

        Ok(blob)
    }

    async fn delete_blob(&self, blob_id: &str) -> AppResult<()> {
        self.state
            .write()
            .await
            .blobs
            .remove(blob_id)
            .map(|_| ())
            .ok_or_else(|| AppError::backend("Blob not found"))
    }

    fn blob_url(&self, blob_id: &str) -> String {
        format!("memory://blobs/{blob_id}/view")
    }
}
