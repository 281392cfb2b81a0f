//! Usage handler.

use axum::Json;
use axum::extract::State;

use docbox_entity::usage::TotalSpace;

use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// GET /api/usage
pub async fn total_space(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<ApiResponse<TotalSpace>>, ApiError> {
    let space = state
        .usage_service
        .total_space(&current.user, &current.session_secret)
        .await?;

    Ok(Json(ApiResponse::ok(space)))
}
