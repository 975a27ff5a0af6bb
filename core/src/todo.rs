//! Todo records and the payloads that create and update them.
//!
//! JSON shape of a persisted todo:
//!
//! ```json
//! { "id": "507f1f77bcf86cd799439011", "text": "buy milk", "done": false }
//! ```
//!
//! `text` and `done` are independently optional and serialize as `null`
//! when absent.

use crate::id::ObjectId;
use serde::{Deserialize, Serialize};

/// A persisted todo. Always carries an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Document id. Never changes once persisted.
    pub id: ObjectId,
    /// Task description.
    pub text: Option<String>,
    /// Completion flag.
    pub done: Option<bool>,
}

impl Todo {
    /// Create a todo with the given fields.
    #[must_use]
    pub fn new(id: ObjectId, text: Option<impl Into<String>>, done: Option<bool>) -> Self {
        Self {
            id,
            text: text.map(Into::into),
            done,
        }
    }

    /// Apply a partial update.
    ///
    /// Each field present in `patch` overwrites the stored one; absent fields
    /// are left untouched. The id is never modified.
    ///
    /// ```
    /// use todolist_core::id::ObjectId;
    /// use todolist_core::todo::{Todo, TodoPatch};
    ///
    /// let mut todo = Todo::new(ObjectId::new(), Some("testing text1"), Some(true));
    /// todo.merge(TodoPatch { text: None, done: Some(false) });
    ///
    /// assert_eq!(todo.text.as_deref(), Some("testing text1"));
    /// assert_eq!(todo.done, Some(false));
    /// ```
    pub fn merge(&mut self, patch: TodoPatch) {
        if let Some(done) = patch.done {
            self.done = Some(done);
        }
        if let Some(text) = patch.text {
            self.text = Some(text);
        }
    }
}

/// Payload for creating a todo. The id is optional; one is assigned when absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    /// Caller-supplied id, if any.
    #[serde(default)]
    pub id: Option<ObjectId>,
    /// Task description.
    #[serde(default)]
    pub text: Option<String>,
    /// Completion flag.
    #[serde(default)]
    pub done: Option<bool>,
}

impl NewTodo {
    /// Payload with the given text and completion flag, no id.
    #[must_use]
    pub fn new(text: impl Into<String>, done: bool) -> Self {
        Self {
            id: None,
            text: Some(text.into()),
            done: Some(done),
        }
    }

    /// Set a caller-supplied id.
    #[must_use]
    pub const fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }

    /// Turn the payload into a record, generating an id if none was supplied.
    #[must_use]
    pub fn into_todo(self) -> Todo {
        Todo {
            id: self.id.unwrap_or_else(ObjectId::new),
            text: self.text,
            done: self.done,
        }
    }
}

impl From<Todo> for NewTodo {
    fn from(todo: Todo) -> Self {
        Self {
            id: Some(todo.id),
            text: todo.text,
            done: todo.done,
        }
    }
}

/// Partial update for a todo.
///
/// An absent field means "leave as stored"; a patch cannot clear a field.
/// Any other JSON keys (such as an `id` in the body) are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    /// New description.
    #[serde(default)]
    pub text: Option<String>,
    /// New completion flag.
    #[serde(default)]
    pub done: Option<bool>,
}

impl TodoPatch {
    /// Patch that only changes the completion flag.
    #[must_use]
    pub const fn done(done: bool) -> Self {
        Self {
            text: None,
            done: Some(done),
        }
    }

    /// Patch that only changes the description.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            done: None,
        }
    }

    /// True when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.text.is_none() && self.done.is_none()
    }
}
