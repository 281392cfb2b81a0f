//! Backend client factory — privilege-scoped handle bundles.

use std::sync::Arc;

use super::blobs::BlobStore;
use super::documents::DocumentStore;
use super::identity::Identity;

/// One privilege level's view of the backend: the three capability
/// surfaces, sharing the same credentials.
#[derive(Clone)]
pub struct BackendHandles {
    /// Account/session surface.
    pub identity: Arc<dyn Identity>,
    /// Document database surface.
    pub documents: Arc<dyn DocumentStore>,
    /// Object storage surface.
    pub blobs: Arc<dyn BlobStore>,
}

impl std::fmt::Debug for BackendHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHandles").finish()
    }
}

/// Constructs privilege-scoped backend handles.
///
/// `admin` handles authenticate with the elevated service key and are used
/// for administrative writes; `session` handles authenticate as the user
/// owning the given session secret and are used for ordinary reads.
pub trait BackendFactory: Send + Sync + 'static {
    /// Elevated-privilege handles.
    fn admin(&self) -> BackendHandles;

    /// Handles scoped to one user's session.
    fn session(&self, session_secret: &str) -> BackendHandles;
}
