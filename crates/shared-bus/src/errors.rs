//! Error types for transports and queues.

use thiserror::Error;

/// Errors returned by a [`Transport`](crate::Transport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The broker cannot be reached.
    #[error("Broker unreachable: {0}")]
    Unreachable(String),

    /// An operation that needs a connection was attempted without one.
    #[error("Not connected")]
    NotConnected,
}

/// The consuming side of a queue has gone away.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Queue `{0}` is closed")]
pub struct QueueClosed(pub &'static str);
