use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use models::task;
use models::validation::parse_identifier;

use crate::{errors::JsonApiError, routes::columns::column_id, state::AppState};

pub const TASK_NOT_FOUND: &str = "Task not found";

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CreateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<i32>,
    pub column_id: Option<i64>,
}

/// Empty `title`/`description` keep the stored text; `progress` is always
/// written and defaults to 0.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub progress: Option<i32>,
}

fn task_id(raw: &str) -> Result<i32, JsonApiError> {
    parse_identifier(raw).map_err(|e| JsonApiError::bad_request("Invalid task ID", e.to_string()))
}

#[utoipa::path(
    post, path = "/tasks", tag = "tasks",
    request_body = crate::openapi::CreateTaskRequest,
    responses(
        (status = 201, description = "Created", body = crate::openapi::TaskDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Create Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTaskInput>, JsonRejection>,
) -> Result<(StatusCode, Json<task::Model>), JsonApiError> {
    let Json(input) = payload?;
    let title = input.title.unwrap_or_default();
    task::validate_title(&title)?;
    let column_id = task::validate_column_id(input.column_id)?;

    let created = state
        .tasks
        .create_task(
            &title,
            input.description.as_deref().unwrap_or_default(),
            input.progress.unwrap_or_default(),
            column_id,
        )
        .await
        .map_err(|e| JsonApiError::from_service(e, TASK_NOT_FOUND, "Create Failed"))?;
    info!(id = created.id, column_id, "created task");
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/tasks/{id}", tag = "tasks",
    params(("id" = u32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::TaskDoc),
        (status = 400, description = "Invalid task ID", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Task not found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<task::Model>, JsonApiError> {
    let id = task_id(&id)?;
    state
        .tasks
        .get_task_by_id(id)
        .await
        .map(Json)
        .map_err(|e| JsonApiError::from_service(e, TASK_NOT_FOUND, "Fetch Failed"))
}

#[utoipa::path(
    put, path = "/tasks/{id}", tag = "tasks",
    params(("id" = u32, Path, description = "Task ID")),
    request_body = crate::openapi::UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::TaskDoc),
        (status = 400, description = "Invalid Request Body", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Task not found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Update Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskInput>, JsonRejection>,
) -> Result<Json<task::Model>, JsonApiError> {
    let id = task_id(&id)?;
    let Json(input) = payload?;

    let updated = state
        .tasks
        .update_task(
            id,
            input.title.as_deref().unwrap_or_default(),
            input.description.as_deref().unwrap_or_default(),
            input.progress.unwrap_or_default(),
        )
        .await
        .map_err(|e| JsonApiError::from_service(e, TASK_NOT_FOUND, "Update Failed"))?;
    info!(id, progress = updated.progress, "updated task");
    Ok(Json(updated))
}

#[utoipa::path(
    delete, path = "/tasks/{id}", tag = "tasks",
    params(("id" = u32, Path, description = "Task ID")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 400, description = "Invalid task ID", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Task not found", body = crate::openapi::ErrorResponse),
        (status = 500, description = "Delete Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<StatusCode, JsonApiError> {
    let id = task_id(&id)?;
    state
        .tasks
        .delete_task(id)
        .await
        .map_err(|e| JsonApiError::from_service(e, TASK_NOT_FOUND, "Delete Failed"))?;
    info!(id, "deleted task");
    Ok(StatusCode::NO_CONTENT)
}

/// Tasks of one column. The column itself is not looked up, so an unknown
/// column yields an empty list.
#[utoipa::path(
    get, path = "/columns/{id}/tasks", tag = "tasks",
    params(("id" = u32, Path, description = "Column ID")),
    responses(
        (status = 200, description = "Tasks in the column", body = [crate::openapi::TaskDoc]),
        (status = 400, description = "Invalid column ID", body = crate::openapi::ErrorResponse),
        (status = 500, description = "List Failed", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list_by_column(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<task::Model>>, JsonApiError> {
    let column_id = column_id(&id)?;
    let tasks = state
        .tasks
        .get_tasks_by_column_id(column_id)
        .await
        .map_err(|e| JsonApiError::from_service(e, TASK_NOT_FOUND, "List Failed"))?;
    info!(column_id, count = tasks.len(), "list tasks by column");
    Ok(Json(tasks))
}
