//! Todo record manager.
//!
//! [`TodoService`] owns the create/read/update/delete rules. It holds no
//! state of its own besides the injected store handle.
//!
//! Update is a read-merge-write across two store calls with no locking or
//! versioning: concurrent updates of the same todo are last-write-wins.

use crate::id::ObjectId;
use crate::store::{StoreError, TodoStore};
use crate::todo::{NewTodo, Todo, TodoPatch};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by [`TodoService`].
#[derive(Error, Debug)]
pub enum TodoError {
    /// The supplied id is not 24 lowercase hex characters.
    #[error("Invalid id: {0}")]
    InvalidId(String),

    /// No todo is stored under a well-formed id.
    #[error("Todo not found: {0}")]
    TodoNotFound(String),

    /// The store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for todo operations.
pub type Result<T> = std::result::Result<T, TodoError>;

/// Create, list, update, and delete todos against a [`TodoStore`].
///
/// # Example
///
/// ```ignore
/// let service = TodoService::new(Arc::new(InMemoryTodoStore::new()));
///
/// let created = service.create(NewTodo::new("buy milk", false)).await?;
/// let updated = service
///     .update(&created.id.to_string(), TodoPatch::done(true))
///     .await?;
/// assert_eq!(updated.done, Some(true));
/// ```
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    /// Create a service backed by `store`.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn TodoStore> {
        &self.store
    }

    /// Every stored todo, in store order.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store fails.
    pub async fn find_all(&self) -> Result<Vec<Todo>> {
        let todos = self.store.find_all().await?;
        tracing::debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    /// Persist a new todo as given, assigning an id if none was supplied.
    ///
    /// A supplied id that already exists replaces the stored document.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store fails.
    pub async fn create(&self, new_todo: NewTodo) -> Result<Todo> {
        let todo = self.store.save(new_todo.into_todo()).await?;
        tracing::debug!(todo_id = %todo.id, "Created todo");
        Ok(todo)
    }

    /// Look up a todo by id.
    ///
    /// # Errors
    ///
    /// - [`TodoError::InvalidId`] if `id` is malformed
    /// - [`TodoError::TodoNotFound`] if nothing is stored under `id`
    /// - [`TodoError::Store`] if the store fails
    pub async fn find_by_id(&self, id: &str) -> Result<Todo> {
        let object_id = Self::validate_id(id)?;
        self.store
            .find_by_id(&object_id)
            .await?
            .ok_or_else(|| TodoError::TodoNotFound(id.to_string()))
    }

    /// Merge `patch` into the stored todo and persist the result.
    ///
    /// Fields absent from the patch keep their stored values.
    ///
    /// # Errors
    ///
    /// - [`TodoError::InvalidId`] if `id` is malformed (the store is not touched)
    /// - [`TodoError::TodoNotFound`] if nothing is stored under `id`
    /// - [`TodoError::Store`] if the store fails
    pub async fn update(&self, id: &str, patch: TodoPatch) -> Result<Todo> {
        let mut existing = self.find_by_id(id).await?;
        existing.merge(patch);

        let saved = self.store.save(existing).await?;
        tracing::debug!(todo_id = %saved.id, "Updated todo");
        Ok(saved)
    }

    /// Delete the todo stored under `id`.
    ///
    /// Idempotent: a missing id is a no-op, and so is a malformed one since
    /// it cannot name a stored todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store fails.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let Ok(object_id) = ObjectId::parse(id) else {
            tracing::debug!(todo_id = id, "Ignoring delete of malformed id");
            return Ok(());
        };

        self.store.delete_by_id(&object_id).await?;
        tracing::debug!(todo_id = %object_id, "Deleted todo");
        Ok(())
    }

    /// Delete every todo.
    ///
    /// # Errors
    ///
    /// Returns [`TodoError::Store`] if the store fails.
    pub async fn delete_all(&self) -> Result<()> {
        self.store.delete_all().await?;
        tracing::debug!("Deleted all todos");
        Ok(())
    }

    fn validate_id(id: &str) -> Result<ObjectId> {
        ObjectId::parse(id).map_err(|_| TodoError::InvalidId(id.to_string()))
    }
}
