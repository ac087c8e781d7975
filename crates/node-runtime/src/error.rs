//! Error types for the node runtime

use crate::container::ConfigError;
use sc_02_block_propagation::PropagationError;
use sc_03_block_production::MiningError;
use thiserror::Error;

/// Result type alias for node operations
pub type Result<T> = std::result::Result<T, NodeError>;

/// Errors surfaced by [`NodeController`](crate::NodeController)
#[derive(Debug, Error)]
pub enum NodeError {
    /// Configuration rejected before anything started
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Miner pool could not be created or started
    #[error(transparent)]
    Mining(#[from] MiningError),

    /// A pipeline consumer thread could not be started
    #[error("Failed to spawn pipeline consumer: {0}")]
    Spawn(#[from] std::io::Error),

    /// Ingress or submission failed
    #[error(transparent)]
    Propagation(#[from] PropagationError),

    /// `start_mining` was called twice
    #[error("Node already started")]
    AlreadyStarted,

    /// Shut down before the transport became ready
    #[error("Cancelled while waiting for the transport")]
    Cancelled,
}
