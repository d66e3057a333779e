//! picontrol server
//!
//! - UDP endpoint: JSON command per datagram, JSON reply for `serverInfo`/`monitor`
//! - Metric table compiled at startup
//! - Single request loop; Ctrl-C stops it

use tracing_subscriber::{fmt, EnvFilter};

use picontrol_core::error::Result;
use picontrol_server::{app_state, config, transport};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.client_code().as_str(), error = %e, "picontrol-server failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(cfg)?;
    let socket = transport::udp::bind(listen).await?;

    tracing::info!(%listen, "picontrol-server starting");
    transport::udp::serve(state, socket, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    })
    .await
}
