//! Route table and HTTP layers.

use crate::handlers::{create_todo, delete_todo, health_check, list_todos, update_todo};
use crate::middleware::correlation_id;
use crate::state::AppState;
use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Origin allowed by default.
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Todo routes.
///
/// - `GET /todos`
/// - `POST /todos`
/// - `PUT /todos/:id`
/// - `DELETE /todos/:id`
pub fn todo_router(state: AppState) -> Router {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/:id", put(update_todo).delete(delete_todo))
        .with_state(state)
}

/// CORS policy: `allowed_origin` may call GET/POST/PUT/DELETE on every path.
///
/// # Errors
///
/// Returns an error if `allowed_origin` is not a valid header value.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(allowed_origin.trim_end_matches('/'))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]))
}

/// Full application: todo routes, `/health`, tracing, correlation ids, and CORS.
///
/// # Example
///
/// ```ignore
/// let app = build_app(AppState::new(store), cors_layer("http://localhost:3000")?);
/// axum::serve(listener, app).await?;
/// ```
pub fn build_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(todo_router(state))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(correlation_id))
        .layer(cors)
}
