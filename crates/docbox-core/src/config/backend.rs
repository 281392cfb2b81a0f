//! Hosted backend configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Connection settings for the hosted backend-as-a-service.
///
/// Every field is mandatory: the application cannot reach its identity,
/// document, or blob surfaces without all of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base endpoint URL of the backend REST API.
    pub endpoint: String,
    /// Project identifier.
    pub project_id: String,
    /// Database identifier.
    pub database_id: String,
    /// Collection id holding user documents.
    pub users_collection_id: String,
    /// Collection id holding file-metadata documents.
    pub files_collection_id: String,
    /// Bucket id holding blob objects.
    pub bucket_id: String,
    /// Elevated-privilege API key used by the admin handle only.
    pub api_key: String,
}

impl BackendConfig {
    /// Reject empty fields with an error naming the first offender.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("backend.endpoint", &self.endpoint),
            ("backend.project_id", &self.project_id),
            ("backend.database_id", &self.database_id),
            ("backend.users_collection_id", &self.users_collection_id),
            ("backend.files_collection_id", &self.files_collection_id),
            ("backend.bucket_id", &self.bucket_id),
            ("backend.api_key", &self.api_key),
        ];

        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::configuration(format!(
                    "Required configuration field '{name}' is empty"
                )));
            }
        }

        Ok(())
    }
}
