//! # Transport Port
//!
//! The node publishes to, and subscribes to, exactly two topics. Because it
//! subscribes to what it publishes, it observes its own broadcasts; the
//! chain only ever advances on blocks that came back through the transport.

use crate::errors::TransportError;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Publish/subscribe topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Mined blocks.
    Blocks,
    /// Submitted transactions.
    Transactions,
}

impl Topic {
    /// Every topic the node subscribes to.
    pub const ALL: [Topic; 2] = [Topic::Blocks, Topic::Transactions];

    /// Topic name on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Blocks => "blocks",
            Topic::Transactions => "transactions",
        }
    }

    /// Look up a topic by its wire name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == name)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ingress callbacks a transport invokes for every delivered message.
///
/// Implementations must not block: they run on the transport's delivery
/// thread.
pub trait MessageHandler: Send + Sync {
    /// A payload arrived on [`Topic::Blocks`].
    fn on_block(&self, payload: &[u8]);

    /// A payload arrived on [`Topic::Transactions`].
    fn on_transaction(&self, payload: &[u8]);
}

/// Publish/subscribe transport.
pub trait Transport: Send + Sync {
    /// Start connecting. Success does not imply [`is_connected`](Self::is_connected).
    fn connect(&self) -> Result<(), TransportError>;

    /// True once the transport can publish and deliver.
    fn is_connected(&self) -> bool;

    /// Publish `payload` on `topic`.
    fn send(&self, topic: Topic, payload: &[u8]) -> Result<(), TransportError>;

    /// Register the handler that receives messages on every subscribed topic.
    fn set_handler(&self, handler: Arc<dyn MessageHandler>);
}

/// Route a raw `(topic, payload)` delivery to the matching callback.
///
/// Returns `false` for topics the node does not subscribe to.
pub fn dispatch(handler: &dyn MessageHandler, topic: &str, payload: &[u8]) -> bool {
    match Topic::from_name(topic) {
        Some(Topic::Blocks) => handler.on_block(payload),
        Some(Topic::Transactions) => handler.on_transaction(payload),
        None => {
            debug!(topic, "Message on unknown topic ignored");
            return false;
        }
    }
    true
}
