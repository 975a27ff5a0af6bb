//! Document store abstraction for todos.
//!
//! The store is a persistent keyed collection supporting insert-or-replace by
//! id, lookup by id, enumeration, and deletion.
//!
//! # Implementations
//!
//! - `PostgresTodoStore` (in `todolist-postgres`): JSONB documents in `PostgreSQL`
//! - `InMemoryTodoStore` (in `todolist-testing`): fast, deterministic tests
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! service can hold an `Arc<dyn TodoStore>` chosen at startup.

use crate::id::ObjectId;
use crate::todo::Todo;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`TodoStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors raised by a document store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database connection or query failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Persistent collection of todos keyed by [`ObjectId`].
///
/// Implementations must be `Send + Sync`; a single call is atomic with respect
/// to other calls on the same document, but nothing spans two calls.
pub trait TodoStore: Send + Sync {
    /// Insert `todo`, or replace the stored document with the same id.
    ///
    /// Returns the document as stored.
    ///
    /// # Errors
    ///
    /// - `Database`: the write failed
    /// - `Serialization`: the document could not be encoded
    fn save(&self, todo: Todo) -> StoreFuture<'_, Todo>;

    /// Look up a document by id. `None` when absent.
    ///
    /// # Errors
    ///
    /// - `Database`: the query failed
    /// - `Serialization`: the stored document could not be decoded
    fn find_by_id<'a>(&'a self, id: &'a ObjectId) -> StoreFuture<'a, Option<Todo>>;

    /// Every stored document in the store's natural order.
    ///
    /// # Errors
    ///
    /// - `Database`: the query failed
    /// - `Serialization`: a stored document could not be decoded
    fn find_all(&self) -> StoreFuture<'_, Vec<Todo>>;

    /// Remove the document with `id`. Removing a missing id is not an error.
    ///
    /// # Errors
    ///
    /// - `Database`: the delete failed
    fn delete_by_id<'a>(&'a self, id: &'a ObjectId) -> StoreFuture<'a, ()>;

    /// Remove every document.
    ///
    /// # Errors
    ///
    /// - `Database`: the delete failed
    fn delete_all(&self) -> StoreFuture<'_, ()>;
}
