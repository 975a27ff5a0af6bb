//! Application state for Axum handlers.

use std::sync::Arc;
use todolist_core::service::TodoService;
use todolist_core::store::TodoStore;

/// Application state shared across all HTTP handlers.
///
/// Built once at process start with the store chosen by configuration.
///
/// # Examples
///
/// ```ignore
/// let state = AppState::new(Arc::new(InMemoryTodoStore::new()));
/// let app = todo_router(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    /// Todo record manager.
    pub todos: TodoService,
}

impl AppState {
    /// Create application state over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            todos: TodoService::new(store),
        }
    }
}

impl From<TodoService> for AppState {
    fn from(todos: TodoService) -> Self {
        Self { todos }
    }
}
