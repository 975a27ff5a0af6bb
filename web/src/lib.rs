//! HTTP interface for the todo list service.
//!
//! Maps HTTP verbs and paths onto `TodoService` calls and JSON bodies onto
//! domain types.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** path id and JSON body (`NewTodo` / `TodoPatch`)
//! 3. **Call** the `TodoService` held in [`AppState`]
//! 4. **Map** the result or `TodoError` to an HTTP response
//!
//! # Routes
//!
//! | Method | Path | Success |
//! |---|---|---|
//! | GET | `/todos` | 200, JSON array |
//! | POST | `/todos` | 201, created todo |
//! | PUT | `/todos/:id` | 200, merged todo (400 bad id, 404 missing) |
//! | DELETE | `/todos/:id` | 204 |
//! | GET | `/health` | 200 |
//!
//! # Example
//!
//! ```ignore
//! use todolist_web::{build_app, cors_layer, AppState};
//!
//! let app = build_app(AppState::new(store), cors_layer("http://localhost:3000")?);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use error::{AppError, ErrorResponse};
pub use middleware::{CORRELATION_ID_HEADER, CorrelationId};
pub use router::{DEFAULT_ALLOWED_ORIGIN, build_app, cors_layer, todo_router};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
