//! Application state shared across all handlers.

use std::sync::Arc;

use docbox_core::config::AppConfig;
use docbox_service::file::FileService;
use docbox_service::usage::UsageService;
use docbox_service::user::UserService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Account flows and session resolution.
    pub user_service: Arc<UserService>,
    /// File operations.
    pub file_service: Arc<FileService>,
    /// Storage usage aggregation.
    pub usage_service: Arc<UsageService>,
}
