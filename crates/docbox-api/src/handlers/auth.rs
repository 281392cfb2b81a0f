//! Auth handlers — sign-up, send-otp, verify, sign-out, me.

use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use docbox_entity::user::User;

use crate::dto::request::{SendOtpRequest, SignUpRequest, VerifyOtpRequest};
use crate::dto::response::{AccountResponse, ApiResponse, MessageResponse, SessionResponse};
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::{CurrentUser, SESSION_COOKIE, SessionSecret};
use crate::state::AppState;

/// POST /api/auth/sign-up
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    validate(&req)?;

    let account_id = state
        .user_service
        .create_account(&req.full_name, &req.email)
        .await?;

    Ok(Json(ApiResponse::ok(AccountResponse { account_id })))
}

/// POST /api/auth/send-otp
pub async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    validate(&req)?;

    let account_id = state.user_service.send_otp(&req.email).await?;

    Ok(Json(ApiResponse::ok(AccountResponse { account_id })))
}

/// POST /api/auth/verify
///
/// On success the session secret is set as a path-scoped, HttpOnly, Secure,
/// SameSite=Strict cookie; the response body only carries the session id.
pub async fn verify(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<(CookieJar, Json<ApiResponse<SessionResponse>>), ApiError> {
    validate(&req)?;

    let token = state
        .user_service
        .verify_otp(&req.account_id, &req.otp)
        .await?;

    let cookie = Cookie::build((SESSION_COOKIE, token.secret))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .build();

    Ok((
        jar.add(cookie),
        Json(ApiResponse::ok(SessionResponse {
            session_id: token.id,
        })),
    ))
}

/// POST /api/auth/sign-out
pub async fn sign_out(
    State(state): State<AppState>,
    SessionSecret(secret): SessionSecret,
    jar: CookieJar,
) -> Result<(CookieJar, Json<ApiResponse<MessageResponse>>), ApiError> {
    if let Some(secret) = secret {
        state.user_service.sign_out(&secret).await?;
    }

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));

    Ok((
        jar,
        Json(ApiResponse::ok(MessageResponse {
            message: "Signed out".to_string(),
        })),
    ))
}

/// GET /api/auth/me
pub async fn me(current: CurrentUser) -> Json<ApiResponse<User>> {
    Json(ApiResponse::ok(current.user))
}
