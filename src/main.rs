//! Runs the stub backend for offline frontend development.

use ruralcare_lib::{api, config, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing();
    tracing::info!("{} stub backend v{}", config::APP_NAME, config::APP_VERSION);

    let addr = config::stub_addr();
    let mut server = match api::start_stub_server(&addr).await {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };
    tracing::info!(base_url = %server.base_url(), "Serving seeded fixtures");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl-C: {e}");
    }
    server.shutdown();
}
