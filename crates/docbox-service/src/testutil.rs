//! Shared fixtures for service tests: the full service stack wired over an
//! in-memory backend.

use std::sync::Arc;

use docbox_backend::MemoryBackend;
use docbox_core::config::AppConfig;
use docbox_core::config::backend::BackendConfig;
use docbox_core::config::logging::LoggingConfig;
use docbox_core::config::server::ServerConfig;
use docbox_core::config::upload::UploadConfig;
use docbox_core::traits::BackendFactory;
use docbox_core::traits::revalidate::LoggingRevalidator;
use docbox_entity::user::User;

use crate::file::FileService;
use crate::usage::UsageService;
use crate::user::UserService;

pub(crate) struct TestEnv {
    pub backend: MemoryBackend,
    pub users: UserService,
    pub files: FileService,
    pub usage: UsageService,
}

impl TestEnv {
    pub fn new() -> Self {
        let config = Arc::new(test_config());
        let backend = MemoryBackend::new();
        let factory: Arc<dyn BackendFactory> = Arc::new(backend.clone());
        let revalidator = Arc::new(LoggingRevalidator);

        Self {
            users: UserService::new(Arc::clone(&factory), Arc::clone(&config)),
            files: FileService::new(Arc::clone(&factory), revalidator, Arc::clone(&config)),
            usage: UsageService::new(factory, config),
            backend,
        }
    }

    /// Run the full OTP flow for an email and resolve the signed-in user.
    pub async fn sign_in(&self, full_name: &str, email: &str) -> (User, String) {
        let account_id = self.users.create_account(full_name, email).await.unwrap();
        let code = self.backend.pending_code(email).await.unwrap();
        let token = self.users.verify_otp(&account_id, &code).await.unwrap();
        let user = self
            .users
            .current_user(Some(&token.secret))
            .await
            .unwrap()
            .expect("signed-in user should resolve");
        (user, token.secret)
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig::default(),
        backend: BackendConfig {
            endpoint: "memory://local".to_string(),
            project_id: "test-project".to_string(),
            database_id: "test-db".to_string(),
            users_collection_id: "users".to_string(),
            files_collection_id: "files".to_string(),
            bucket_id: "bucket".to_string(),
            api_key: "test-key".to_string(),
        },
        // Small cap so oversize rejection is cheap to exercise.
        upload: UploadConfig { max_size_bytes: 32 },
        logging: LoggingConfig::default(),
    }
}
