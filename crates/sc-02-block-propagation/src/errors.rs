//! Errors raised at the ingress boundary.

use shared_bus::QueueClosed;
use shared_types::WireError;
use thiserror::Error;

/// Why an inbound message was dropped.
#[derive(Debug, Error)]
pub enum PropagationError {
    /// The payload could not be decoded.
    #[error("Decode failed: {0}")]
    Decode(#[from] WireError),

    /// The consuming pipeline has shut down.
    #[error(transparent)]
    QueueClosed(#[from] QueueClosed),
}
