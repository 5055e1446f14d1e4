use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use models::column::{self, ColumnWithTasks, NewColumn};
use models::task::{self, NewTask};
use server::routes;
use server::startup::build_cors;
use server::state::AppState;
use service::column::ColumnRepository;
use service::errors::ServiceError;
use service::task::TaskRepository;

const BASE: &str = "/pm/api";

fn app_with(state: AppState) -> Router {
    let cors = build_cors(&configs::CorsConfig::default()).unwrap();
    routes::build_router(state, cors, BASE, true)
}

fn app() -> Router { app_with(AppState::in_memory()) }

async fn send(app: &Router, method: &str, path: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(format!("{BASE}{path}"));
    let body = match body {
        Some(v) => {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&v).unwrap())
        }
        None => Body::empty(),
    };
    raw(app, builder.body(body).unwrap()).await
}

async fn raw(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().call(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

#[tokio::test]
async fn board_lifecycle() {
    let app = app();

    let (status, column) = send(&app, "POST", "/columns", Some(json!({"title": "To Do"}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(column["id"], 1);
    assert_eq!(column["title"], "To Do");
    assert_eq!(column["color"], "");
    assert_eq!(column["tasks"], json!([]));

    let (status, task) = send(&app, "POST", "/tasks", Some(json!({"title": "Write spec", "column_id": 1}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["id"], 1);
    assert_eq!(task["column_id"], 1);
    assert_eq!(task["progress"], 0);
    assert_eq!(task["description"], "");

    let (status, listed) = send(&app, "GET", "/columns/1/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([task]));

    let (status, body) = send(&app, "DELETE", "/tasks/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, "GET", "/tasks/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Task not found"}));
}

#[tokio::test]
async fn column_round_trips_title_and_color() {
    let app = app();
    let (_, created) = send(&app, "POST", "/columns", Some(json!({"title": "Doing", "color": "#ffaa00"}))).await;

    let (status, fetched) = send(&app, "GET", &format!("/columns/{}", created["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Doing");
    assert_eq!(fetched["color"], "#ffaa00");
}

#[tokio::test]
async fn blank_column_title_is_rejected_and_nothing_persisted() {
    let app = app();
    for body in [json!({"title": ""}), json!({"title": "   "}), json!({"color": "#fff"})] {
        let (status, err) = send(&app, "POST", "/columns", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err["error"], "Validation Error");
    }

    let (status, all) = send(&app, "GET", "/columns", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn non_numeric_identifiers_are_bad_requests() {
    let app = app();
    for path in ["/columns/abc", "/columns/-1", "/tasks/abc", "/tasks/1.5", "/columns/x/tasks"] {
        let (status, err) = send(&app, "GET", path, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert!(err["detail"].as_str().unwrap().contains("invalid identifier"), "{path}");
    }
    let (status, _) = send(&app, "DELETE", "/tasks/nope", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(&app, "PUT", "/columns/nope", Some(json!({"title": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleted_column_is_not_found() {
    let app = app();
    let (_, created) = send(&app, "POST", "/columns", Some(json!({"title": "Gone"}))).await;
    let path = format!("/columns/{}", created["id"]);

    let (status, _) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, err) = send(&app, "GET", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(err, json!({"error": "Column not found"}));

    let (status, _) = send(&app, "DELETE", &path, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "PUT", &path, Some(json!({"title": "back"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn column_update_overwrites_both_fields() {
    let app = app();
    send(&app, "POST", "/columns", Some(json!({"title": "Review", "color": "#123456"}))).await;

    let (status, updated) = send(&app, "PUT", "/columns/1", Some(json!({"title": "Checked"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Checked");
    assert_eq!(updated["color"], "");
    assert_eq!(updated["tasks"], json!([]));
}

#[tokio::test]
async fn task_update_without_progress_resets_it() {
    let app = app();
    send(&app, "POST", "/columns", Some(json!({"title": "To Do"}))).await;
    let (_, task) = send(
        &app,
        "POST",
        "/tasks",
        Some(json!({"title": "half", "description": "notes", "progress": 50, "column_id": 1})),
    )
    .await;
    assert_eq!(task["progress"], 50);

    let (status, updated) = send(&app, "PUT", "/tasks/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["progress"], 0);
    assert_eq!(updated["title"], "half");
    assert_eq!(updated["description"], "notes");

    let (_, updated) = send(&app, "PUT", "/tasks/1", Some(json!({"title": "full", "progress": 100}))).await;
    assert_eq!(updated["title"], "full");
    assert_eq!(updated["progress"], 100);
    assert_eq!(updated["description"], "notes");
}

#[tokio::test]
async fn listing_tasks_of_empty_or_unknown_column_is_ok() {
    let app = app();
    send(&app, "POST", "/columns", Some(json!({"title": "Empty"}))).await;

    let (status, listed) = send(&app, "GET", "/columns/1/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));

    let (status, listed) = send(&app, "GET", "/columns/42/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn task_creation_validates_input() {
    let app = app();
    send(&app, "POST", "/columns", Some(json!({"title": "To Do"}))).await;

    let cases = [
        json!({"column_id": 1}),
        json!({"title": "", "column_id": 1}),
        json!({"title": "no column"}),
        json!({"title": "zero", "column_id": 0}),
        json!({"title": "negative", "column_id": -3}),
        json!({"title": "typed", "column_id": "1"}),
    ];
    for body in cases {
        let (status, _) = send(&app, "POST", "/tasks", Some(body.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let req = Request::builder()
        .method("POST")
        .uri(format!("{BASE}/columns"))
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();
    let (status, err) = raw(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(err["error"], "Invalid Request Body");

    let (_, all) = send(&app, "GET", "/columns", None).await;
    assert_eq!(all, json!([]));
}

#[tokio::test]
async fn task_in_missing_column_is_a_server_error() {
    let app = app();
    let (status, err) = send(&app, "POST", "/tasks", Some(json!({"title": "orphan", "column_id": 9}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Create Failed");
    assert!(err["detail"].as_str().unwrap().contains("foreign key"));
}

#[tokio::test]
async fn column_holding_tasks_cannot_be_deleted() {
    let app = app();
    send(&app, "POST", "/columns", Some(json!({"title": "Busy"}))).await;
    send(&app, "POST", "/tasks", Some(json!({"title": "stay", "column_id": 1}))).await;

    let (status, err) = send(&app, "DELETE", "/columns/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "Delete Failed");

    let (status, column) = send(&app, "GET", "/columns/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(column["tasks"].as_array().unwrap().len(), 1);
}

struct BrokenStore;

fn down() -> ServiceError { ServiceError::Db("connection refused".into()) }

#[async_trait]
impl ColumnRepository for BrokenStore {
    async fn create(&self, _: NewColumn) -> Result<column::Model, ServiceError> { Err(down()) }
    async fn get_all(&self) -> Result<Vec<ColumnWithTasks>, ServiceError> { Err(down()) }
    async fn get_by_id(&self, _: i32) -> Result<ColumnWithTasks, ServiceError> { Err(down()) }
    async fn update(&self, _: column::Model) -> Result<column::Model, ServiceError> { Err(down()) }
    async fn delete(&self, _: i32) -> Result<(), ServiceError> { Err(down()) }
}

#[async_trait]
impl TaskRepository for BrokenStore {
    async fn create(&self, _: NewTask) -> Result<task::Model, ServiceError> { Err(down()) }
    async fn get_by_id(&self, _: i32) -> Result<task::Model, ServiceError> { Err(down()) }
    async fn update(&self, _: task::Model) -> Result<task::Model, ServiceError> { Err(down()) }
    async fn delete(&self, _: i32) -> Result<(), ServiceError> { Err(down()) }
    async fn get_by_column_id(&self, _: i32) -> Result<Vec<task::Model>, ServiceError> { Err(down()) }
}

#[tokio::test]
async fn store_failures_are_internal_errors_with_detail() {
    let store = Arc::new(BrokenStore);
    let app = app_with(AppState::new(store.clone(), store));

    let (status, err) = send(&app, "GET", "/columns", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err["error"], "List Failed");
    assert!(err["detail"].as_str().unwrap().contains("connection refused"));

    let (status, _) = send(&app, "GET", "/columns/1/tasks", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = send(&app, "PUT", "/tasks/1", Some(json!({"progress": 5}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn health_and_docs_are_served_at_root() {
    let app = app();
    let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));

    let req = Request::builder().uri("/api-docs/openapi.json").body(Body::empty()).unwrap();
    let (status, doc) = raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"].get("/columns/{id}/tasks").is_some());
}

#[tokio::test]
async fn routes_can_be_mounted_at_root() {
    let cors = build_cors(&configs::CorsConfig::default()).unwrap();
    let app = routes::build_router(AppState::in_memory(), cors, "", false);
    let req = Request::builder().uri("/columns").body(Body::empty()).unwrap();
    let (status, body) = raw(&app, req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn preflight_from_frontend_origin_is_allowed() {
    let app = app();
    let req = Request::builder()
        .method("OPTIONS")
        .uri(format!("{BASE}/columns"))
        .header("origin", "http://localhost:3000")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().call(req).await.unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.headers()["access-control-allow-origin"], "http://localhost:3000");
    assert_eq!(resp.headers()["access-control-allow-credentials"], "true");
}
