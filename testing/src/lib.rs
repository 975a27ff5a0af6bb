//! # Todolist Testing
//!
//! Testing utilities for the todo list service.
//!
//! This crate provides:
//! - [`InMemoryTodoStore`]: a `TodoStore` with no I/O
//! - Fixture builders for todos and services
//! - proptest strategies for identifiers
//!
//! ## Example
//!
//! ```ignore
//! use todolist_testing::{helpers::service_with, fixtures::todo};
//!
//! #[tokio::test]
//! async fn updates_done_flag() {
//!     let (service, store) = service_with([todo("testing text1", true)]);
//!     // ...
//! }
//! ```

pub mod todo_store;

/// Fixture builders for todos.
pub mod fixtures {
    use todolist_core::id::ObjectId;
    use todolist_core::todo::{NewTodo, Todo};

    /// A stored todo with a fresh id
    #[must_use]
    pub fn todo(text: &str, done: bool) -> Todo {
        Todo::new(ObjectId::new(), Some(text), Some(done))
    }

    /// A create payload carrying a fresh caller-supplied id
    #[must_use]
    pub fn new_todo_with_id(text: &str, done: bool) -> NewTodo {
        NewTodo::new(text, done).with_id(ObjectId::new())
    }
}

/// Test helpers.
pub mod helpers {
    use crate::todo_store::InMemoryTodoStore;
    use std::sync::Arc;
    use todolist_core::service::TodoService;
    use todolist_core::todo::Todo;

    /// A service over a store pre-populated with `todos`.
    ///
    /// The returned store shares state with the service's store, so tests can
    /// inspect what was persisted.
    #[must_use]
    pub fn service_with(todos: impl IntoIterator<Item = Todo>) -> (TodoService, InMemoryTodoStore) {
        let store = InMemoryTodoStore::with_todos(todos);
        let service = TodoService::new(Arc::new(store.clone()));
        (service, store)
    }

    /// A service over an empty store.
    #[must_use]
    pub fn empty_service() -> (TodoService, InMemoryTodoStore) {
        service_with([])
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use todolist_core::id::{OBJECT_ID_LEN, ObjectId};

    /// Any well-formed object id
    pub fn object_id() -> impl Strategy<Value = ObjectId> {
        any::<[u8; OBJECT_ID_LEN]>().prop_map(ObjectId::from_bytes)
    }

    /// Strings that are never valid object ids
    pub fn malformed_id() -> impl Strategy<Value = String> {
        prop_oneof![
            "[0-9a-f]{0,23}",
            "[0-9a-f]{25,40}",
            ("[0-9a-f]{23}", "[g-zA-Z \\-]", 0..24usize).prop_map(|(base, bad, at)| {
                let mut s = base;
                s.insert_str(at, &bad);
                s
            }),
        ]
    }
}

// Re-export commonly used items
pub use todo_store::InMemoryTodoStore;
