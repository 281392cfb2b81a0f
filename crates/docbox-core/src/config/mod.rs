//! Application configuration schemas.
//!
//! Configuration is deserialized once at process start from an optional TOML
//! file merged with `DOCBOX`-prefixed environment variables, then validated.
//! The hosted-backend section carries the credentials and ids the whole
//! application depends on; a missing or empty field there is a fatal startup
//! condition, never a runtime-recoverable one.

pub mod backend;
pub mod logging;
pub mod server;
pub mod upload;

use serde::{Deserialize, Serialize};

use self::backend::BackendConfig;
use self::logging::LoggingConfig;
use self::server::ServerConfig;
use self::upload::UploadConfig;

use crate::error::AppError;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted backend (identity + documents + blobs) settings.
    pub backend: BackendConfig,
    /// Upload limits.
    #[serde(default)]
    pub upload: UploadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from the optional `config/default.toml` overlayed
    /// with environment variables prefixed with `DOCBOX` (separator `__`,
    /// e.g. `DOCBOX__BACKEND__API_KEY`).
    pub fn load() -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("DOCBOX")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration, failing fast on empty fields.
    pub fn validate(&self) -> Result<(), AppError> {
        self.backend.validate()
    }
}
