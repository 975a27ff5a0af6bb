//! Todo list HTTP server.
//!
//! Wires configuration, the document store, and the HTTP interface together.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;

use anyhow::Context;
use config::{Config, DatabaseConfig};
use std::sync::Arc;
use todolist_core::store::TodoStore;
use todolist_postgres::PostgresTodoStore;
use todolist_testing::InMemoryTodoStore;
use todolist_web::{build_app, cors_layer, AppState};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default tracing filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "todolist_server=info,todolist_web=info,tower_http=debug";

/// Initialize the global tracing subscriber from `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Choose the document store: `PostgreSQL` when a URL is configured, otherwise in-memory.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or migrated.
pub async fn build_store(database: &DatabaseConfig) -> anyhow::Result<Arc<dyn TodoStore>> {
    if let Some(url) = &database.url {
        info!(max_connections = database.max_connections, "Using PostgreSQL todo store");
        let store = PostgresTodoStore::connect(url, database.max_connections)
            .await
            .context("connecting to PostgreSQL")?;
        store.migrate().await.context("migrating todo table")?;
        Ok(Arc::new(store))
    } else {
        info!("DATABASE_URL not set, using in-memory todo store");
        Ok(Arc::new(InMemoryTodoStore::new()))
    }
}

/// Bind and serve until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns an error if the store, CORS origin, or listener cannot be set up,
/// or if the server fails.
pub async fn run(config: Config) -> anyhow::Result<()> {
    let store = build_store(&config.database).await?;
    let cors = cors_layer(&config.server.cors_allowed_origin)
        .with_context(|| format!("invalid CORS origin {:?}", config.server.cors_allowed_origin))?;
    let app = build_app(AppState::new(store), cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;

    info!(%addr, allowed_origin = %config.server.cors_allowed_origin, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving HTTP")?;

    info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        () = terminate => {
            info!("Received SIGTERM signal");
        }
    }
}
