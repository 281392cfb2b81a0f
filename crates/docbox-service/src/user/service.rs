//! OTP account flows and the session/user resolver.

use std::sync::Arc;

use tracing::{debug, info};

use docbox_core::config::AppConfig;
use docbox_core::error::AppError;
use docbox_core::traits::{BackendFactory, SessionToken};
use docbox_core::types::{DocumentQuery, Filter};
use docbox_entity::user::{User, attrs};

/// Account creation, OTP verification, sign-out, and the resolver every
/// other operation uses as its authorization gate.
#[derive(Clone)]
pub struct UserService {
    backend: Arc<dyn BackendFactory>,
    config: Arc<AppConfig>,
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService").finish()
    }
}

impl UserService {
    /// Creates a new user service.
    pub fn new(backend: Arc<dyn BackendFactory>, config: Arc<AppConfig>) -> Self {
        Self { backend, config }
    }

    fn users_collection(&self) -> &str {
        &self.config.backend.users_collection_id
    }

    /// Look a user document up by email (elevated read; emails are the
    /// account-creation key, not a session-scoped attribute).
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let admin = self.backend.admin();
        let query = DocumentQuery::new().filter(Filter::equal(attrs::EMAIL, email));

        let list = admin
            .documents
            .list_documents(self.users_collection(), &query)
            .await?;

        list.documents
            .first()
            .map(User::from_document)
            .transpose()
    }

    /// Send a one-time code to the email and return the backend account id
    /// it was issued under. Delivery is the backend's responsibility.
    pub async fn send_otp(&self, email: &str) -> Result<String, AppError> {
        let admin = self.backend.admin();
        let account_id = admin.identity.create_email_token(email).await?;

        info!(account_id, "One-time code issued");
        Ok(account_id)
    }

    /// Sign-up flow: issue an OTP and create the user document when the
    /// email is new. Repeated sign-ups for a known email just re-issue the
    /// code; the existing document is untouched.
    pub async fn create_account(&self, full_name: &str, email: &str) -> Result<String, AppError> {
        let existing = self.find_user_by_email(email).await?;

        let account_id = self.send_otp(email).await?;

        if existing.is_none() {
            let admin = self.backend.admin();
            admin
                .documents
                .create_document(
                    self.users_collection(),
                    User::create_payload(full_name, email, &account_id),
                )
                .await?;

            info!(account_id, "User document created");
        }

        Ok(account_id)
    }

    /// Exchange the emailed code for a session.
    pub async fn verify_otp(
        &self,
        account_id: &str,
        code: &str,
    ) -> Result<SessionToken, AppError> {
        let admin = self.backend.admin();
        let token = admin.identity.create_session(account_id, code).await?;

        info!(account_id, session_id = %token.id, "Session created");
        Ok(token)
    }

    /// Destroy the backend session behind the secret.
    pub async fn sign_out(&self, session_secret: &str) -> Result<(), AppError> {
        let session = self.backend.session(session_secret);
        session.identity.delete_session().await?;

        info!("Session destroyed");
        Ok(())
    }

    /// Resolve a session secret into the current user.
    ///
    /// Returns `None` — never an error — when there is no session, the
    /// session does not resolve to an account, or no user document matches
    /// the account. Callers uniformly treat `None` as "redirect to sign-in".
    pub async fn current_user(
        &self,
        session_secret: Option<&str>,
    ) -> Result<Option<User>, AppError> {
        let Some(secret) = session_secret else {
            return Ok(None);
        };

        let session = self.backend.session(secret);
        let account = match session.identity.get_account().await {
            Ok(account) => account,
            Err(error) => {
                debug!(error = %error, "Session did not resolve to an account");
                return Ok(None);
            }
        };

        let query = DocumentQuery::new().filter(Filter::equal(attrs::ACCOUNT_ID, account.id.as_str()));
        let list = session
            .documents
            .list_documents(self.users_collection(), &query)
            .await?;

        list.documents
            .first()
            .map(User::from_document)
            .transpose()
    }
}
