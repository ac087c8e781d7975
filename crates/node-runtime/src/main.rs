//! # Slonocoin Node Runtime
//!
//! Runs one proof-of-work node against the in-memory loopback broker.
//!
//! ## Startup Sequence
//!
//! 1. Install the log subscriber (`RUST_LOG`, default `info`)
//! 2. Load configuration from `SC_*` environment variables
//! 3. Build the node and connect it to the broker
//! 4. Mine until Ctrl+C, then shut every thread down

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{NodeConfig, NodeController};
use shared_bus::InMemoryBroker;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .with_thread_names(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("===========================================");
    info!("  Slonocoin Node Runtime v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = NodeConfig::from_env();
    config.validate().context("Invalid configuration")?;

    let broker = InMemoryBroker::new(config.transport.broker_uri.clone());
    let transport = Arc::new(broker.client(config.transport.node_id.clone()));
    let node = Arc::new(NodeController::new(config, transport)?);

    let starter = {
        let node = Arc::clone(&node);
        tokio::task::spawn_blocking(move || node.start_mining())
    };

    tokio::select! {
        started = starter => {
            started.context("Startup task failed")??;
            info!("Node is running. Press Ctrl+C to stop.");
            tokio::signal::ctrl_c().await?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!("Interrupted before the transport became ready");
        }
    }

    let status = node.status();
    info!(
        pending_id = %status.pending_id,
        accepted_blocks = status.accepted_blocks,
        hashes = status.hashes_attempted,
        "Final chain position"
    );

    tokio::task::spawn_blocking(move || node.shutdown())
        .await
        .context("Shutdown task failed")?;

    Ok(())
}
