//! Axum server: router assembly and graceful serving.

use crate::error::RpcError;
use crate::handlers;
use axum::routing::{get, post};
use axum::Router;
use credence_service::ServiceMetrics;
use credence_verification::Orchestrator;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub metrics: Arc<ServiceMetrics>,
}

/// Build the service router. Exposed separately from [`RpcServer`] so tests
/// can drive it without binding a socket.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/verify", post(handlers::verify))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// The HTTP server for one service instance.
pub struct RpcServer {
    addr: SocketAddr,
    state: AppState,
}

impl RpcServer {
    pub fn new(
        addr: SocketAddr,
        orchestrator: Arc<Orchestrator>,
        metrics: Arc<ServiceMetrics>,
    ) -> Self {
        Self {
            addr,
            state: AppState {
                orchestrator,
                metrics,
            },
        }
    }

    pub fn router(&self) -> Router {
        router(self.state.clone())
    }

    /// Bind and serve until the shutdown receiver fires, then drain.
    pub async fn serve(self, mut shutdown: broadcast::Receiver<()>) -> Result<(), RpcError> {
        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|e| RpcError::Server(format!("bind {}: {e}", self.addr)))?;
        let addr = listener
            .local_addr()
            .map_err(|e| RpcError::Server(e.to_string()))?;
        info!(%addr, "http api listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                info!("http api draining");
            })
            .await
            .map_err(|e| RpcError::Server(e.to_string()))
    }
}
