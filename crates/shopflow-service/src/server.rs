//! Process bootstrap shared by the three binaries.

use std::sync::Arc;

use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopflow_store::{BalanceStore, MemoryStore, OrderStore, PgStore, StoreError, UserStore};

use crate::config::ServiceConfig;

/// Initialize tracing with `RUST_LOG`, defaulting to `info,shopflow=debug`.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shopflow=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Storage handles, one per capability.
#[derive(Clone)]
pub struct Stores {
    /// Balance rows.
    pub balances: Arc<dyn BalanceStore>,
    /// Order rows.
    pub orders: Arc<dyn OrderStore>,
    /// User rows.
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// Expose one backend through all three capabilities.
    pub fn from_backend<S>(store: Arc<S>) -> Self
    where
        S: BalanceStore + OrderStore + UserStore + 'static,
    {
        let balances: Arc<S> = Arc::clone(&store);
        let orders: Arc<S> = Arc::clone(&store);
        Self {
            balances,
            orders,
            users: store,
        }
    }
}

/// Open PostgreSQL when `DATABASE_URL` is set, otherwise an in-memory store.
///
/// # Errors
///
/// Returns an error if the database cannot be reached or migrated.
pub async fn open_stores(config: &ServiceConfig) -> Result<Stores, StoreError> {
    if let Some(url) = &config.database_url {
        let store = PgStore::connect(url, config.database_max_connections).await?;
        store.migrate().await?;
        Ok(Stores::from_backend(Arc::new(store)))
    } else {
        tracing::warn!("DATABASE_URL not set - using in-memory storage, data will not persist");
        Ok(Stores::from_backend(Arc::new(MemoryStore::new())))
    }
}

/// Bind `listen_addr` and serve until SIGTERM or Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn serve(router: Router, listen_addr: &str) -> std::io::Result<()> {
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
