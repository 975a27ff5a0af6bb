//! `PostgreSQL` document store for the todo list service.
//!
//! Implements the `TodoStore` trait from `todolist-core` on top of a single
//! JSONB table. Uses sqlx with:
//!
//! - Connection pooling
//! - Insert-or-replace by id (`ON CONFLICT DO UPDATE`)
//! - Insertion-ordered enumeration
//!
//! # Example
//!
//! ```ignore
//! use todolist_postgres::PostgresTodoStore;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresTodoStore::new("postgres://localhost/todos").await?;
//!     store.migrate().await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod todo_store;

pub use todo_store::{DEFAULT_MAX_CONNECTIONS, PostgresTodoStore};
