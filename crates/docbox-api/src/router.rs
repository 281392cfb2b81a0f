//! Route definitions for the DocBox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via Axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Leave multipart framing headroom above the configured upload cap.
    let body_limit = state.config.upload.max_size_bytes as usize + 64 * 1024;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(file_routes())
        .merge(usage_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth endpoints: sign-up, send-otp, verify, sign-out, me
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/sign-up", post(handlers::auth::sign_up))
        .route("/auth/send-otp", post(handlers::auth::send_otp))
        .route("/auth/verify", post(handlers::auth::verify))
        .route("/auth/sign-out", post(handlers::auth::sign_out))
        .route("/auth/me", get(handlers::auth::me))
}

/// File upload, listing, rename, share, delete
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files", post(handlers::file::upload))
        .route("/files", get(handlers::file::list))
        .route("/files/{id}/rename", put(handlers::file::rename))
        .route("/files/{id}/users", put(handlers::file::update_users))
        .route("/files/{id}", delete(handlers::file::delete))
}

/// Storage usage summary
fn usage_routes() -> Router<AppState> {
    Router::new().route("/usage", get(handlers::usage::total_space))
}

/// Health check endpoints (no auth required)
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
