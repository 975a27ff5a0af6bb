//! In-memory todo store
//!
//! [`InMemoryTodoStore`] keeps documents in a `Vec` behind an `RwLock`,
//! preserving insertion order the way a document collection enumerates in
//! natural order.

#![allow(clippy::unwrap_used)] // Inspection helpers are test-only and unwrap the lock
#![allow(clippy::missing_panics_doc)] // Lock poisoning only happens after a test already panicked

use std::sync::{Arc, RwLock};
use todolist_core::id::ObjectId;
use todolist_core::store::{StoreError, StoreFuture, TodoStore};
use todolist_core::todo::Todo;

/// In-memory document store for fast, deterministic tests.
///
/// Clones share the same underlying collection.
///
/// # Example
///
/// ```
/// use todolist_testing::InMemoryTodoStore;
/// use todolist_core::{ObjectId, Todo, TodoStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = InMemoryTodoStore::new();
/// let todo = Todo::new(ObjectId::new(), Some("buy milk"), Some(false));
///
/// store.save(todo.clone()).await?;
/// assert_eq!(store.find_by_id(&todo.id).await?, Some(todo));
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryTodoStore {
    todos: Arc<RwLock<Vec<Todo>>>,
}

impl InMemoryTodoStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `todos`, in order
    #[must_use]
    pub fn with_todos(todos: impl IntoIterator<Item = Todo>) -> Self {
        Self {
            todos: Arc::new(RwLock::new(todos.into_iter().collect())),
        }
    }

    /// Remove everything (for test isolation)
    pub fn clear(&self) {
        self.todos.write().unwrap().clear();
    }

    /// Number of stored todos
    #[must_use]
    pub fn len(&self) -> usize {
        self.todos.read().unwrap().len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.todos.read().unwrap().is_empty()
    }

    /// Check if a todo with `id` is stored
    #[must_use]
    pub fn contains(&self, id: &ObjectId) -> bool {
        self.todos.read().unwrap().iter().any(|t| t.id == *id)
    }

    /// Snapshot of every stored todo
    #[must_use]
    pub fn snapshot(&self) -> Vec<Todo> {
        self.todos.read().unwrap().clone()
    }
}

impl TodoStore for InMemoryTodoStore {
    fn save(&self, todo: Todo) -> StoreFuture<'_, Todo> {
        Box::pin(async move {
            let mut todos = self.todos.write().map_err(|_| poisoned())?;
            match todos.iter_mut().find(|t| t.id == todo.id) {
                Some(existing) => existing.clone_from(&todo),
                None => todos.push(todo.clone()),
            }
            Ok(todo)
        })
    }

    fn find_by_id<'a>(&'a self, id: &'a ObjectId) -> StoreFuture<'a, Option<Todo>> {
        Box::pin(async move {
            let todos = self.todos.read().map_err(|_| poisoned())?;
            Ok(todos.iter().find(|t| t.id == *id).cloned())
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let todos = self.todos.read().map_err(|_| poisoned())?;
            Ok(todos.clone())
        })
    }

    fn delete_by_id<'a>(&'a self, id: &'a ObjectId) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let mut todos = self.todos.write().map_err(|_| poisoned())?;
            todos.retain(|t| t.id != *id);
            Ok(())
        })
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            self.todos.write().map_err(|_| poisoned())?.clear();
            Ok(())
        })
    }
}

fn poisoned() -> StoreError {
    StoreError::Database("in-memory store lock poisoned".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(text: &str) -> Todo {
        Todo::new(ObjectId::new(), Some(text), Some(false))
    }

    #[tokio::test]
    async fn save_appends_in_insertion_order() {
        let store = InMemoryTodoStore::new();
        let first = todo("first");
        let second = todo("second");

        store.save(first.clone()).await.unwrap();
        store.save(second.clone()).await.unwrap();

        assert_eq!(store.find_all().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn save_replaces_in_place() {
        let first = todo("first");
        let second = todo("second");
        let store = InMemoryTodoStore::with_todos([first.clone(), second.clone()]);

        let mut replaced = first.clone();
        replaced.text = Some("replaced".to_string());
        store.save(replaced.clone()).await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.find_all().await.unwrap(), vec![replaced, second]);
    }

    #[tokio::test]
    async fn delete_missing_id_is_ok() {
        let store = InMemoryTodoStore::new();
        store.delete_by_id(&ObjectId::new()).await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn delete_all_empties_store() {
        let store = InMemoryTodoStore::with_todos([todo("a"), todo("b")]);
        store.delete_all().await.unwrap();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryTodoStore::new();
        let handle = store.clone();
        let item = todo("shared");

        handle.save(item.clone()).await.unwrap();
        assert!(store.contains(&item.id));
    }
}
