//! End-to-end tests of the todo HTTP API over the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use todolist_core::id::ObjectId;
use todolist_core::store::{StoreError, StoreFuture, TodoStore};
use todolist_core::todo::Todo;
use todolist_testing::fixtures::todo;
use todolist_testing::InMemoryTodoStore;
use todolist_web::{build_app, cors_layer, AppState, ErrorResponse, CORRELATION_ID_HEADER};
use tower::ServiceExt;

fn app_with(store: &InMemoryTodoStore) -> Router {
    let state = AppState::new(Arc::new(store.clone()));
    build_app(state, cors_layer("http://localhost:3000").unwrap())
}

/// Store whose every call fails with a database error.
struct FailingStore;

fn database_down<T>() -> Result<T, StoreError> {
    Err(StoreError::Database("connection refused to db-internal:5432".to_string()))
}

impl TodoStore for FailingStore {
    fn save(&self, _todo: Todo) -> StoreFuture<'_, Todo> {
        Box::pin(async { database_down() })
    }

    fn find_by_id<'a>(&'a self, _id: &'a ObjectId) -> StoreFuture<'a, Option<Todo>> {
        Box::pin(async { database_down() })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async { database_down() })
    }

    fn delete_by_id<'a>(&'a self, _id: &'a ObjectId) -> StoreFuture<'a, ()> {
        Box::pin(async { database_down() })
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        Box::pin(async { database_down() })
    }
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).expect("response body should be JSON")
}

#[tokio::test]
async fn get_all_todos_when_todos_exist() {
    let store = InMemoryTodoStore::with_todos([todo("testing text1", true)]);

    let response = send(app_with(&store), Method::GET, "/todos", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert!(body[0]["id"].is_string());
    assert_eq!(body[0]["text"], "testing text1");
    assert_eq!(body[0]["done"], true);
}

#[tokio::test]
async fn get_all_todos_when_empty() {
    let store = InMemoryTodoStore::new();

    let response = send(app_with(&store), Method::GET, "/todos", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Todo> = body_json(response).await;
    assert!(body.is_empty());
}

#[tokio::test]
async fn put_done_returns_merged_todo() {
    let existing = todo("testing text1", true);
    let store = InMemoryTodoStore::with_todos([existing.clone()]);
    let id = existing.id.to_string();

    let response = send(
        app_with(&store),
        Method::PUT,
        &format!("/todos/{id}"),
        Some(json!({"id": id, "text": null, "done": false})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["text"], "testing text1");
    assert_eq!(body["done"], false);

    let stored = store.snapshot();
    assert_eq!(stored[0].text.as_deref(), Some("testing text1"));
    assert_eq!(stored[0].done, Some(false));
}

#[tokio::test]
async fn put_text_returns_merged_todo() {
    let existing = todo("testing text1", true);
    let store = InMemoryTodoStore::with_todos([existing.clone()]);
    let id = existing.id.to_string();

    let response = send(
        app_with(&store),
        Method::PUT,
        &format!("/todos/{id}"),
        Some(json!({"text": "updated_text"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = body_json(response).await;
    assert_eq!(body["text"], "updated_text");
    assert_eq!(body["done"], true);

    let stored = store.snapshot();
    assert_eq!(stored[0].text.as_deref(), Some("updated_text"));
    assert_eq!(stored[0].done, Some(true));
}

#[tokio::test]
async fn put_with_malformed_id_is_bad_request() {
    let store = InMemoryTodoStore::with_todos([todo("testing text1", true)]);

    let response = send(
        app_with(&store),
        Method::PUT,
        "/todos/not-an-id",
        Some(json!({"done": false})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body.code, "INVALID_ID");
    assert!(body.message.contains("not-an-id"));
}

#[tokio::test]
async fn put_with_unknown_id_is_not_found() {
    let store = InMemoryTodoStore::with_todos([todo("testing text1", true)]);
    let unknown = ObjectId::new().to_string();

    let response = send(
        app_with(&store),
        Method::PUT,
        &format!("/todos/{unknown}"),
        Some(json!({"done": false})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body.code, "NOT_FOUND");
}

#[tokio::test]
async fn post_creates_todo() {
    let store = InMemoryTodoStore::new();
    let id = ObjectId::new().to_string();

    let response = send(
        app_with(&store),
        Method::POST,
        "/todos",
        Some(json!({"id": id, "text": "newtext", "done": false})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = body_json(response).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["text"], "newtext");
    assert_eq!(body["done"], false);

    let stored = store.snapshot();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].text.as_deref(), Some("newtext"));
    assert_eq!(stored[0].done, Some(false));
}

#[tokio::test]
async fn post_without_id_assigns_one() {
    let store = InMemoryTodoStore::new();

    let response = send(
        app_with(&store),
        Method::POST,
        "/todos",
        Some(json!({"text": "no id"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Todo = body_json(response).await;
    assert!(store.contains(&body.id));
    assert!(body.done.is_none());
}

#[tokio::test]
async fn post_with_malformed_id_is_rejected() {
    let store = InMemoryTodoStore::new();

    let response = send(
        app_with(&store),
        Method::POST,
        "/todos",
        Some(json!({"id": "abc", "text": "bad"})),
    )
    .await;

    assert!(response.status().is_client_error());
    assert!(store.is_empty());
}

#[tokio::test]
async fn delete_returns_no_content_and_is_idempotent() {
    let existing = todo("testing text1", true);
    let store = InMemoryTodoStore::with_todos([existing.clone()]);
    let uri = format!("/todos/{}", existing.id);

    let first = send(app_with(&store), Method::DELETE, &uri, None).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    assert!(store.is_empty());

    let second = send(app_with(&store), Method::DELETE, &uri, None).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);

    let bytes = axum::body::to_bytes(second.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn delete_with_malformed_id_is_no_content() {
    let existing = todo("testing text1", true);
    let store = InMemoryTodoStore::with_todos([existing.clone()]);

    let response = send(app_with(&store), Method::DELETE, "/todos/not-an-id", None).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.contains(&existing.id));
}

#[tokio::test]
async fn store_failure_is_internal_error_without_detail() {
    let state = AppState::new(Arc::new(FailingStore));
    let app = build_app(state, cors_layer("http://localhost:3000").unwrap());

    let response = send(app, Method::GET, "/todos", None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = body_json(response).await;
    assert_eq!(body.code, "INTERNAL_SERVER_ERROR");
    assert!(!body.message.contains("db-internal"));
    assert!(!body.message.contains("connection refused"));
}

#[tokio::test]
async fn health_check_is_ok() {
    let store = InMemoryTodoStore::new();
    let response = send(app_with(&store), Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn responses_carry_correlation_id() {
    let store = InMemoryTodoStore::new();
    let response = send(app_with(&store), Method::GET, "/todos", None).await;
    assert!(response.headers().contains_key(CORRELATION_ID_HEADER));
}

#[tokio::test]
async fn cors_allows_configured_origin() {
    let store = InMemoryTodoStore::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/todos")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();

    let response = app_with(&store).oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
    let methods = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("PUT"));
    assert!(methods.contains("DELETE"));
}

#[tokio::test]
async fn cors_ignores_other_origins() {
    let store = InMemoryTodoStore::new();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/todos")
        .header(header::ORIGIN, "http://evil.example")
        .body(Body::empty())
        .unwrap();

    let response = app_with(&store).oneshot(request).await.unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}
