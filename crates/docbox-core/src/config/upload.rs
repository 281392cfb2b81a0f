//! Upload limit configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to file uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Maximum accepted upload size in bytes.
    #[serde(default = "default_max_upload_size")]
    pub max_size_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: default_max_upload_size(),
        }
    }
}

fn default_max_upload_size() -> u64 {
    50 * 1024 * 1024
}
