use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::column::{self, ColumnWithTasks};
use models::validation::parse_identifier;

use crate::{errors::JsonApiError, state::AppState};

pub const COLUMN_NOT_FOUND: &str = "Column not found";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateColumnInput {
    pub title: Option<String>,
    pub color: Option<String>,
}

/// Both fields overwrite the stored values; an absent one becomes empty.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateColumnInput {
    pub title: Option<String>,
    pub color: Option<String>,
}

pub(crate) fn column_id(raw: &str) -> Result<i32, JsonApiError> {
    parse_identifier(raw).map_err(|e| JsonApiError::bad_request("Invalid column ID", e.to_string()))
}

#[utoipa::path(
    get, path = "/columns", tag = "columns",
    responses(
        (status = 200, description = "Every column with its tasks", body = [crate::openapi::ColumnDoc]),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ColumnWithTasks>>, JsonApiError> {
    let all = state
        .columns
        .get_all_columns()
        .await
        .map_err(|e| JsonApiError::from_service(e, COLUMN_NOT_FOUND, "List Failed"))?;
    info!(count = all.len(), "list columns");
    Ok(Json(all))
}

#[utoipa::path(
    post, path = "/columns", tag = "columns",
    request_body = crate::openapi::CreateColumnRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ColumnDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateColumnInput>, JsonRejection>,
) -> Result<(StatusCode, Json<ColumnWithTasks>), JsonApiError> {
    let Json(input) = payload?;
    let title = input.title.unwrap_or_default();
    column::validate_title(&title)?;

    let created = state
        .columns
        .create_column(&title, input.color.as_deref().unwrap_or_default())
        .await
        .map_err(|e| JsonApiError::from_service(e, COLUMN_NOT_FOUND, "Create Failed"))?;
    info!(id = created.column.id, title = %created.column.title, "created column");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/columns/{id}", tag = "columns",
    params(("id" = u32, Path, description = "Column ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ColumnDoc),
        (status = 400, description = "Invalid column ID", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Column not found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ColumnWithTasks>, JsonApiError> {
    let id = column_id(&id)?;
    state
        .columns
        .get_column_by_id(id)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, COLUMN_NOT_FOUND, "Fetch Failed"))
}

#[utoipa::path(
    put, path = "/columns/{id}", tag = "columns",
    params(("id" = u32, Path, description = "Column ID")),
    request_body = crate::openapi::UpdateColumnRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ColumnDoc),
        (status = 400, description = "Invalid Request Body", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Column not found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateColumnInput>, JsonRejection>,
) -> Result<Json<ColumnWithTasks>, JsonApiError> {
    let id = column_id(&id)?;
    let Json(input) = payload?;

    let updated = state
        .columns
        .update_column(
            id,
            input.title.as_deref().unwrap_or_default(),
            input.color.as_deref().unwrap_or_default(),
        )
        .await
        .map_err(|e| JsonApiError::from_service(e, COLUMN_NOT_FOUND, "Update Failed"))?;
    info!(id, "updated column");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/columns/{id}", tag = "columns",
    params(("id" = u32, Path, description = "Column ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid column ID", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Column not found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = column_id(&id)?;
    state
        .columns
        .delete_column(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, COLUMN_NOT_FOUND, "Delete Failed"))?;
    info!(id, "deleted column");
    Ok(StatusCode::NO_CONTENT)
}
