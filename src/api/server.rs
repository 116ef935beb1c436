//! Stub backend server lifecycle.
//!
//! bind → spawn background task → return handle with shutdown channel.
//! Binding port 0 picks an ephemeral port; tests rely on that.

use std::net::{IpAddr, SocketAddr};

use tokio::sync::oneshot;

use crate::api::router::{stub_router, API_PREFIX};
use crate::api::types::ApiContext;

// ═══════════════════════════════════════════════════════════
// Public types
// ═══════════════════════════════════════════════════════════

/// Handle to a running stub backend.
pub struct StubServer {
    addr: SocketAddr,
    ctx: ApiContext,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl StubServer {
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Base URL for `ApiClient`, including the `/api/v1` prefix.
    pub fn base_url(&self) -> String {
        format!("http://{}{}", self.addr, API_PREFIX)
    }

    /// Shared state, for inspecting the store or the access log.
    pub fn context(&self) -> &ApiContext {
        &self.ctx
    }

    /// Shut down the server gracefully.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
            tracing::info!("Stub server shutdown signal sent");
        }
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ═══════════════════════════════════════════════════════════
// Server lifecycle
// ═══════════════════════════════════════════════════════════

/// Start the stub backend on `addr` (e.g. `127.0.0.1:3000`).
pub async fn start_stub_server(addr: &str) -> Result<StubServer, String> {
    let addr: SocketAddr = addr
        .parse()
        .map_err(|e| format!("Invalid stub server address '{addr}': {e}"))?;
    start_stub_server_on(addr.ip(), addr.port()).await
}

/// Start the stub backend on a specific IP and port over freshly seeded data.
pub async fn start_stub_server_on(ip: IpAddr, port: u16) -> Result<StubServer, String> {
    start_with_context(ApiContext::seeded(), SocketAddr::new(ip, port)).await
}

/// Start the stub backend over an existing context.
pub async fn start_with_context(ctx: ApiContext, addr: SocketAddr) -> Result<StubServer, String> {
    // 1. Bind
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("Failed to bind stub server: {e}"))?;

    let addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to get server address: {e}"))?;

    // 2. Build the router
    let app = stub_router(ctx.clone());

    // 3. Set up shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    // 4. Spawn server in background task
    tokio::spawn(async move {
        let shutdown_signal = async move {
            let _ = shutdown_rx.await;
            tracing::info!("Stub server received shutdown signal");
        };

        tracing::info!(%addr, "Stub server started");

        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
        {
            tracing::error!("Stub server error: {e}");
        }

        tracing::info!("Stub server stopped");
    });

    Ok(StubServer {
        addr,
        ctx,
        shutdown_tx: Some(shutdown_tx),
    })
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
