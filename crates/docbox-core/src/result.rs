//! Shared result alias.

use crate::error::AppError;

/// Result alias used across all DocBox crates.
pub type AppResult<T> = Result<T, AppError>;
