pub mod analytics; // Mock and remote analytics sources
pub mod api; // Stub backend (axum)
pub mod client; // Typed REST client
pub mod config;
pub mod models;
pub mod screens; // Page state machines
pub mod session; // Token + signed-in principal
pub mod validation; // Form validation

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. `RUST_LOG` overrides the
/// default filter. Calling it twice is harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();
}
