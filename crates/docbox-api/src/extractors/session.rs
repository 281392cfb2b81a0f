//! Session-cookie extractors.
//!
//! [`SessionSecret`] pulls the raw secret out of the session cookie;
//! [`CurrentUser`] additionally resolves it through the user service and
//! rejects with 401 when no current user exists — the uniform
//! "redirect to sign-in" signal, whatever the underlying cause.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use docbox_core::error::AppError;
use docbox_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Name of the HTTP cookie carrying the opaque session secret.
pub const SESSION_COOKIE: &str = "docbox-session";

/// The raw session secret from the cookie, if present.
#[derive(Debug, Clone)]
pub struct SessionSecret(pub Option<String>);

impl FromRequestParts<AppState> for SessionSecret {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let secret = jar
            .get(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());

        Ok(Self(secret))
    }
}

/// The resolved current user plus the session secret that proved them.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The caller's user document.
    pub user: User,
    /// The session secret from the cookie.
    pub session_secret: String,
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let SessionSecret(secret) = SessionSecret::from_request_parts(parts, state).await?;

        let user = state
            .user_service
            .current_user(secret.as_deref())
            .await
            .map_err(ApiError::from)?;

        match (user, secret) {
            (Some(user), Some(session_secret)) => Ok(Self {
                user,
                session_secret,
            }),
            _ => Err(ApiError::from(AppError::unauthenticated(
                "Sign in required",
            ))),
        }
    }
}
