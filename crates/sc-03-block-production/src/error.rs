//! Error types for block production

use thiserror::Error;

/// Result type alias for block production operations
pub type Result<T> = std::result::Result<T, MiningError>;

/// Errors that can occur while starting the miner pool
#[derive(Debug, Error)]
pub enum MiningError {
    /// A pool needs at least one thread
    #[error("Miner pool needs at least one thread")]
    NoThreads,

    /// The OS refused to start a miner thread
    #[error("Failed to spawn miner {index}: {source}")]
    Spawn {
        /// Index of the miner that failed to start
        index: usize,
        /// Underlying OS error
        #[source]
        source: std::io::Error,
    },
}
