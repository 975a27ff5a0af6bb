//! # Todolist Core
//!
//! Domain types and rules for the todo list service.
//!
//! ## Core Concepts
//!
//! - **`ObjectId`**: 12-byte document id, 24 lowercase hex characters on the wire
//! - **`Todo`**: persisted record with optional `text` and `done` fields
//! - **`TodoPatch`**: partial update; absent fields leave stored values alone
//! - **`TodoStore`**: injected document store (Postgres in production, in-memory in tests)
//! - **`TodoService`**: create/list/update/delete rules on top of a store
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use todolist_core::{NewTodo, TodoPatch, TodoService};
//!
//! let service = TodoService::new(Arc::new(store));
//! let todo = service.create(NewTodo::new("write docs", false)).await?;
//! let todo = service.update(&todo.id.to_string(), TodoPatch::done(true)).await?;
//! ```

pub mod id;
pub mod service;
pub mod store;
pub mod todo;

pub use id::{InvalidObjectId, ObjectId};
pub use service::{TodoError, TodoService};
pub use store::{StoreError, StoreFuture, TodoStore};
pub use todo::{NewTodo, Todo, TodoPatch};
