use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: Option<String>,
}

#[derive(ToSchema)]
pub struct TaskDoc {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub progress: i32,
    pub column_id: u32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct ColumnDoc {
    pub id: u32,
    pub title: String,
    pub color: String,
    pub created_at: String,
    pub updated_at: String,
    pub tasks: Vec<TaskDoc>,
}

#[derive(ToSchema)]
pub struct CreateColumnRequest { pub title: String, pub color: Option<String> }

#[derive(ToSchema)]
pub struct UpdateColumnRequest { pub title: Option<String>, pub color: Option<String> }

#[derive(ToSchema)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    pub progress: Option<i32>,
    pub column_id: u32,
}

#[derive(ToSchema)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Always written; omitted means 0.
    pub progress: Option<i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::columns::list,
        crate::routes::columns::create,
        crate::routes::columns::get,
        crate::routes::columns::update,
        crate::routes::columns::delete,
        crate::routes::tasks::create,
        crate::routes::tasks::get,
        crate::routes::tasks::update,
        crate::routes::tasks::delete,
        crate::routes::tasks::list_by_column,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            TaskDoc,
            ColumnDoc,
            CreateColumnRequest,
            UpdateColumnRequest,
            CreateTaskRequest,
            UpdateTaskRequest,
        )
    ),
    servers((url = "/pm/api", description = "Kanban API base path")),
    tags(
        (name = "health"),
        (name = "columns"),
        (name = "tasks")
    )
)]
pub struct ApiDoc;
