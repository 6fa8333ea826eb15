//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use super::state::AppState;
use crate::core::service::{OrderStore, ShopStore, StockStore, UserStore};
use crate::core::status::StatusPolicy;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the shop HTTP server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_status_policy(StatusPolicy::Strict)
///     .serve("127.0.0.1:3000")
///     .await?;
/// ```
pub struct ServerBuilder {
    stock: Option<Arc<dyn StockStore>>,
    orders: Option<Arc<dyn OrderStore>>,
    users: Option<Arc<dyn UserStore>>,
    policy: StatusPolicy,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            stock: None,
            orders: None,
            users: None,
            policy: StatusPolicy::default(),
        }
    }

    /// Set the store every service reads and writes (required)
    pub fn with_store(self, store: impl ShopStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Same as [`with_store`](Self::with_store), for a store the caller keeps a handle to
    pub fn with_shared_store<S: ShopStore + 'static>(mut self, store: Arc<S>) -> Self {
        self.stock = Some(store.clone());
        self.orders = Some(store.clone());
        self.users = Some(store);
        self
    }

    /// Which status transitions the tracker accepts
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Wire the services into the handler state
    pub fn build_state(self) -> Result<AppState> {
        let missing = || anyhow::anyhow!("A store is required. Call .with_store()");
        Ok(AppState::from_parts(
            self.stock.ok_or_else(missing)?,
            self.orders.ok_or_else(missing)?,
            self.users.ok_or_else(missing)?,
            self.policy,
        ))
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_state()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
