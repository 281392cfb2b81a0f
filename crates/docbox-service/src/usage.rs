//! Storage usage aggregation.

use std::sync::Arc;

use docbox_core::config::AppConfig;
use docbox_core::error::AppError;
use docbox_core::traits::BackendFactory;
use docbox_core::types::{DocumentQuery, Filter};
use docbox_entity::file::{FileDoc, attrs};
use docbox_entity::usage::TotalSpace;
use docbox_entity::user::User;

/// Computes the per-category storage summary for a user's owned files.
///
/// Owned files only — sharing-based access does not count against the
/// sharee's space. Reads go through the caller's session handle.
#[derive(Clone)]
pub struct UsageService {
    backend: Arc<dyn BackendFactory>,
    config: Arc<AppConfig>,
}

impl std::fmt::Debug for UsageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsageService").finish()
    }
}

impl UsageService {
    /// Creates a new usage service.
    pub fn new(backend: Arc<dyn BackendFactory>, config: Arc<AppConfig>) -> Self {
        Self { backend, config }
    }

    /// Fold every owned file-metadata document into a [`TotalSpace`].
    pub async fn total_space(
        &self,
        current_user: &User,
        session_secret: &str,
    ) -> Result<TotalSpace, AppError> {
        let session = self.backend.session(session_secret);
        let query =
            DocumentQuery::new().filter(Filter::equal(attrs::OWNER, current_user.id.as_str()));

        let list = session
            .documents
            .list_documents(&self.config.backend.files_collection_id, &query)
            .await?;

        let mut space = TotalSpace::new();
        for document in &list.documents {
            let file = FileDoc::from_document(document)?;
            space.record(file.kind, file.size, file.updated_at);
        }

        Ok(space)
    }
}
