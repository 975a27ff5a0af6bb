//! Todo API endpoints.
//!
//! - `GET /todos` - List every todo
//! - `POST /todos` - Create a todo
//! - `PUT /todos/:id` - Merge a partial update into a todo
//! - `DELETE /todos/:id` - Delete a todo (idempotent)

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use todolist_core::todo::{NewTodo, Todo, TodoPatch};

/// List every todo.
///
/// ```bash
/// curl http://localhost:8080/todos
/// ```
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, AppError> {
    Ok(Json(state.todos.find_all().await?))
}

/// Create a todo. The body is stored as given; `id` is generated when absent.
///
/// ```bash
/// curl -X POST http://localhost:8080/todos \
///   -H "Content-Type: application/json" \
///   -d '{"text": "buy milk", "done": false}'
/// ```
pub async fn create_todo(
    State(state): State<AppState>,
    Json(new_todo): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), AppError> {
    let todo = state.todos.create(new_todo).await?;
    tracing::info!(todo_id = %todo.id, "Todo created");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Merge `text` and/or `done` into an existing todo.
///
/// Fields missing from the body keep their stored values.
///
/// ```bash
/// curl -X PUT http://localhost:8080/todos/507f1f77bcf86cd799439011 \
///   -H "Content-Type: application/json" \
///   -d '{"done": true}'
/// ```
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<Todo>, AppError> {
    let todo = state.todos.update(&id, patch).await?;
    tracing::info!(todo_id = %todo.id, "Todo updated");
    Ok(Json(todo))
}

/// Delete a todo. Deleting a missing todo still returns 204.
///
/// ```bash
/// curl -X DELETE http://localhost:8080/todos/507f1f77bcf86cd799439011
/// ```
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.todos.delete(&id).await?;
    tracing::info!(todo_id = %id, "Todo deleted");
    Ok(StatusCode::NO_CONTENT)
}
