//! Identity/session capability of the hosted backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::result::AppResult;

/// A backend account identity, resolved from a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Backend account id.
    pub id: String,
    /// Email the account was created for.
    pub email: String,
}

/// A backend-issued session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionToken {
    /// Session id.
    pub id: String,
    /// Opaque session secret, carried by the client in a cookie.
    pub secret: String,
}

/// Account and session management surface.
///
/// `create_email_token` and `create_session` are meaningful on the
/// elevated (admin) handle; `get_account` and `delete_session` act on the
/// session a user-scoped handle was bound to.
#[async_trait]
pub trait Identity: Send + Sync + 'static {
    /// Send a one-time email code for the address and return the backend
    /// account id it was issued under. Delivery itself is the backend's job.
    async fn create_email_token(&self, email: &str) -> AppResult<String>;

    /// Exchange an account id plus the emailed code for a session.
    async fn create_session(&self, account_id: &str, secret: &str) -> AppResult<SessionToken>;

    /// Resolve the handle's bound session into an account identity.
    async fn get_account(&self) -> AppResult<Account>;

    /// Destroy the handle's bound session.
    async fn delete_session(&self) -> AppResult<()>;
}
