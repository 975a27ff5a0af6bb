//! `PostgreSQL`-backed todo store.
//!
//! Each todo is one JSONB document in the `todos` table:
//!
//! ```sql
//! CREATE TABLE todos (
//!     seq BIGSERIAL NOT NULL,
//!     id TEXT PRIMARY KEY,
//!     document JSONB NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! `seq` is assigned on first insert and kept on replace, so listing by `seq`
//! yields insertion order.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::types::Json;
use todolist_core::id::ObjectId;
use todolist_core::store::{StoreError, StoreFuture, TodoStore};
use todolist_core::todo::Todo;

/// Default maximum number of pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// PostgreSQL-backed document store for todos.
///
/// # Example
///
/// ```ignore
/// use todolist_postgres::PostgresTodoStore;
///
/// let store = PostgresTodoStore::new("postgres://localhost/todos").await?;
/// store.migrate().await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresTodoStore {
    pool: PgPool,
}

impl PostgresTodoStore {
    /// Connect with [`DEFAULT_MAX_CONNECTIONS`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection fails.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        Self::connect(database_url, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Connect with an explicit pool size.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection fails.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to connect: {e}")))?;

        Ok(Self::from_pool(pool))
    }

    /// Use an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create the `todos` table if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the DDL fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS todos (
                seq BIGSERIAL NOT NULL,
                id TEXT PRIMARY KEY,
                document JSONB NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_seq ON todos(seq)")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Migration failed: {e}")))?;

        tracing::info!("Todo table migrated");
        Ok(())
    }
}

impl TodoStore for PostgresTodoStore {
    fn save(&self, todo: Todo) -> StoreFuture<'_, Todo> {
        Box::pin(async move {
            sqlx::query(
                r"
                INSERT INTO todos (id, document, updated_at)
                VALUES ($1, $2, now())
                ON CONFLICT (id) DO UPDATE
                SET document = EXCLUDED.document, updated_at = now()
                ",
            )
            .bind(todo.id.to_hex())
            .bind(Json(&todo))
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to save: {e}")))?;

            tracing::debug!(todo_id = %todo.id, "Saved todo document");
            Ok(todo)
        })
    }

    fn find_by_id<'a>(&'a self, id: &'a ObjectId) -> StoreFuture<'a, Option<Todo>> {
        Box::pin(async move {
            let row: Option<(Json<Todo>,)> =
                sqlx::query_as("SELECT document FROM todos WHERE id = $1")
                    .bind(id.to_hex())
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(map_read_error)?;

            Ok(row.map(|(Json(todo),)| todo))
        })
    }

    fn find_all(&self) -> StoreFuture<'_, Vec<Todo>> {
        Box::pin(async move {
            let rows: Vec<(Json<Todo>,)> =
                sqlx::query_as("SELECT document FROM todos ORDER BY seq")
                    .fetch_all(&self.pool)
                    .await
                    .map_err(map_read_error)?;

            Ok(rows.into_iter().map(|(Json(todo),)| todo).collect())
        })
    }

    fn delete_by_id<'a>(&'a self, id: &'a ObjectId) -> StoreFuture<'a, ()> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM todos WHERE id = $1")
                .bind(id.to_hex())
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Database(format!("Failed to delete: {e}")))?;

            tracing::debug!(
                todo_id = %id,
                rows = result.rows_affected(),
                "Deleted todo document"
            );
            Ok(())
        })
    }

    fn delete_all(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("DELETE FROM todos")
                .execute(&self.pool)
                .await
                .map_err(|e| StoreError::Database(format!("Failed to delete all: {e}")))?;
            Ok(())
        })
    }
}

fn map_read_error(error: sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::ColumnDecode { source, .. } | sqlx::Error::Decode(source) => {
            StoreError::Serialization(source.to_string())
        }
        other => StoreError::Database(format!("Failed to read: {other}")),
    }
}
