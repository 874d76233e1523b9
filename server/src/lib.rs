//! HTTP surface of the todo backend.
//!
//! Routes map one-to-one onto `TodoService` calls. Failures are logged with
//! their cause and answered with a generic message (see [`ApiError`]).

pub mod config;
pub mod error;
pub mod telemetry;

use std::future::Future;
use std::path::Path as FsPath;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::PathRejection, Path, State},
    http::{header, Method, Request},
    routing::{delete, get, get_service},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use todo_core::{NewTodo, Todo, TodoId, TodoService, User};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeFile,
    trace::TraceLayer,
};
use tracing::{error, info, info_span, warn, Span};
use uuid::Uuid;

pub use config::ServerConfig;
pub use error::ApiError;

/// Build the router. `index_file` is served at `/`.
pub fn app(service: TodoService, index_file: impl AsRef<FsPath>) -> Router {
    Router::new()
        .route("/", get_service(ServeFile::new(index_file.as_ref())))
        .route("/users", get(list_users))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", delete(delete_todo))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    info_span!(
                        "request",
                        id = %Uuid::new_v4(),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!(method = %request.method(), path = %request.uri().path(), "request");
                }),
        )
        .layer(cors_layer())
        .with_state(service)
}

/// Serve `app` until `shutdown` resolves, then drain in-flight requests.
pub async fn run<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

/// Any origin; the methods and header the API uses. Every `OPTIONS`
/// request is answered here with `200` and never reaches a route.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

async fn list_users(State(service): State<TodoService>) -> Result<Json<Vec<User>>, ApiError> {
    service.list_users().await.map(Json).map_err(|e| {
        error!(error = %e, "listing users failed");
        ApiError::Internal("Failed to get users")
    })
}

async fn list_todos(State(service): State<TodoService>) -> Result<Json<Vec<Todo>>, ApiError> {
    service.list_todos().await.map(Json).map_err(|e| {
        error!(error = %e, "listing todos failed");
        ApiError::Internal("Failed to get todos")
    })
}

async fn create_todo(
    State(service): State<TodoService>,
    body: Bytes,
) -> Result<Json<Todo>, ApiError> {
    // Decoded regardless of the declared content type.
    let draft: NewTodo = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected todo body");
        ApiError::BadRequest("Invalid request body")
    })?;
    service.create_todo(draft).await.map(Json).map_err(|e| {
        error!(error = %e, "creating todo failed");
        ApiError::Internal("Failed to create todo")
    })
}

async fn delete_todo(
    State(service): State<TodoService>,
    id: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ApiError> {
    let Path(id) = id.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected todo id");
        ApiError::BadRequest("Invalid id parameter")
    })?;
    let id: TodoId = id
        .parse()
        .map_err(|_| ApiError::BadRequest("Invalid id parameter"))?;
    match service.delete_todo(id).await {
        Ok(()) => Ok(Json(json!({ "message": "Todo deleted" }))),
        Err(e) if e.is_not_found() => Err(ApiError::NotFound("Todo not found")),
        Err(e) => {
            error!(id, error = %e, "deleting todo failed");
            Err(ApiError::Internal("Failed to delete todo"))
        }
    }
}

