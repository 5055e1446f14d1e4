use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod columns;
pub mod tasks;

#[utoipa::path(
    get, path = "/health", tag = "health",
    responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse))
)]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Column and task routes, relative to the API base path.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/columns", get(columns::list).post(columns::create))
        .route("/columns/:id", get(columns::get).put(columns::update).delete(columns::delete))
        .route("/columns/:id/tasks", get(tasks::list_by_column))
        .route("/tasks", post(tasks::create))
        .route("/tasks/:id", get(tasks::get).put(tasks::update).delete(tasks::delete))
}

/// Build the full application router.
///
/// The API is mounted under `base_path` (empty means the root); `/health` and
/// the docs stay at the root.
pub fn build_router(state: AppState, cors: CorsLayer, base_path: &str, enable_docs: bool) -> Router {
    let api = api_routes().with_state(state);

    let mut app = Router::new().route("/health", get(health));
    app = if base_path.is_empty() { app.merge(api) } else { app.nest(base_path, api) };

    if enable_docs {
        app = app.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app.layer(cors).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
