//! File handlers — upload, list, rename, share, delete.

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};

use docbox_core::error::AppError;
use docbox_core::types::FileKind;
use docbox_entity::file::FileDoc;
use docbox_service::file::{ListFilesParams, UploadParams};

use crate::dto::request::{
    DeleteFileRequest, ListFilesQuery, RenameFileRequest, UpdateFileUsersRequest,
};
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::dto::validate;
use crate::error::ApiError;
use crate::extractors::CurrentUser;
use crate::state::AppState;

/// POST /api/files (multipart)
///
/// Expects a `file` part; an optional `path` text part names the view to
/// revalidate.
pub async fn upload(
    State(state): State<AppState>,
    current: CurrentUser,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<FileDoc>>, ApiError> {
    let mut upload: Option<(String, bytes::Bytes)> = None;
    let mut path = "/".to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(String::from);
        match name.as_deref() {
            Some("file") => {
                let file_name = field
                    .file_name()
                    .map(String::from)
                    .ok_or_else(|| AppError::validation("File part is missing a filename"))?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read file part: {e}")))?;
                upload = Some((file_name, data));
            }
            Some("path") => {
                path = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Failed to read path part: {e}")))?;
            }
            _ => {}
        }
    }

    let (file_name, data) =
        upload.ok_or_else(|| AppError::validation("Multipart body is missing a file part"))?;

    let file = state
        .file_service
        .upload(
            &current.user,
            UploadParams {
                file_name,
                data,
                path,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

/// GET /api/files?type=&search=&sort=&limit=
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ApiResponse<Vec<FileDoc>>>, ApiError> {
    let mut params = ListFilesParams::default();

    if let Some(types) = &query.types {
        params.types = types
            .split(',')
            .filter(|token| !token.is_empty())
            .map(str::parse::<FileKind>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(ApiError::from)?;
    }
    if let Some(search) = query.search {
        params.search_text = search;
    }
    if let Some(sort) = query.sort {
        params.sort = sort;
    }
    params.limit = query.limit;

    let files = state.file_service.list(&current.user, &params).await?;

    Ok(Json(ApiResponse::ok(files)))
}

/// PUT /api/files/{id}/rename
pub async fn rename(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(file_id): Path<String>,
    Json(req): Json<RenameFileRequest>,
) -> Result<Json<ApiResponse<FileDoc>>, ApiError> {
    validate(&req)?;

    let file = state
        .file_service
        .rename(&file_id, &req.name, &req.extension, &req.path)
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

/// PUT /api/files/{id}/users
pub async fn update_users(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(file_id): Path<String>,
    Json(req): Json<UpdateFileUsersRequest>,
) -> Result<Json<ApiResponse<FileDoc>>, ApiError> {
    let file = state
        .file_service
        .update_users(&file_id, &req.emails, &req.path)
        .await?;

    Ok(Json(ApiResponse::ok(file)))
}

/// DELETE /api/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    _current: CurrentUser,
    Path(file_id): Path<String>,
    Json(req): Json<DeleteFileRequest>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    validate(&req)?;

    state
        .file_service
        .delete(&file_id, &req.bucket_file_id, &req.path)
        .await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "File deleted".to_string(),
    })))
}
