//! Usher daemon - progressive disclosure session service.
//!
//! Owns the session's progress state: folds interactions into the score,
//! re-evaluates the confidence tier on a timer, persists snapshots, and
//! serves the control socket.

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use usher_common::config::UsherConfig;
use usher_common::{SOCKET_PATH, VERSION};
use usherd::engine::DisclosureEngine;
use usherd::rpc_server::{self, ServerState};
use usherd::scheduler::Scheduler;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("usherd v{} starting", VERSION);

    let config = UsherConfig::load_or_default();
    info!(
        state_dir = %config.state_dir.display(),
        mode = ?config.thresholds.mode,
        "configuration loaded"
    );

    let engine = Arc::new(DisclosureEngine::new(&config));
    let scheduler = Scheduler::spawn(engine.clone(), &config);

    let socket_path = std::env::var("USHER_SOCKET")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(SOCKET_PATH));
    let server_state = Arc::new(ServerState {
        engine: engine.clone(),
        start_time: Instant::now(),
    });
    tokio::spawn(async move {
        if let Err(e) = rpc_server::start_server(server_state, &socket_path).await {
            error!("RPC server failed: {}", e);
        }
    });

    info!("usherd ready");
    tokio::signal::ctrl_c().await?;

    info!("shutting down");
    scheduler.stop().await;
    engine.persist().await;

    Ok(())
}
