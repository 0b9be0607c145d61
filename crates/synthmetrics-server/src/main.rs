//! synthmetrics server
//!
//! Serves synthetic, monotonically increasing custom metrics.
//! - Config: first CLI argument, default `synthmetrics.yaml`
//! - Log filter: `RUST_LOG`

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use synthmetrics_core::error::{MetricsError, Result};
use synthmetrics_server::{app_state, config, router};

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "synthmetrics.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| MetricsError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}")))?;

    let state = app_state::AppState::new(cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, config = %path, "synthmetrics-server starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| MetricsError::Internal(format!("failed to bind: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| MetricsError::Internal(format!("server failed: {e}")))
}
