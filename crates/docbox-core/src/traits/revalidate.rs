//! Caller-cache invalidation hints.

/// Cooperative page-revalidation signal fired after mutating operations.
///
/// This is a hint for whatever view cache sits in front of the API, not a
/// freshness guarantee for concurrent viewers.
pub trait PathRevalidator: Send + Sync + 'static {
    /// Mark the cached view for the path as stale.
    fn invalidate(&self, path: &str);
}

/// Revalidator that records the hint in the log and nothing else.
#[derive(Debug, Default, Clone)]
pub struct LoggingRevalidator;

impl PathRevalidator for LoggingRevalidator {
    fn invalidate(&self, path: &str) {
        tracing::debug!(path, "View cache invalidated");
    }
}
