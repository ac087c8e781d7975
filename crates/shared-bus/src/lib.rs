//! # Shared Bus - Inter-Thread and Peer Communication
//!
//! Everything that moves data between the node's threads, and between the
//! node and its peers, goes through this crate.
//!
//! ## Pieces
//!
//! ```text
//!  miners ──push──→ [work queue] ──next_batch──→ consumer ──send──→ Transport
//!                                                                     │
//!  Transport ──MessageHandler::on_block/on_transaction──→ [work queue] ←┘
//! ```
//!
//! - [`Transport`]: publish/subscribe port (`blocks` and `transactions` topics)
//! - [`MessageHandler`]: the two ingress callbacks a transport invokes
//! - [`work_queue`]: single-consumer queues drained in batches
//! - [`CancellationToken`]: cooperative shutdown that also wakes blocked
//!   consumers
//! - [`InMemoryBroker`]: loopback broker for single-process operation and tests

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod cancel;
pub mod errors;
pub mod memory;
pub mod queue;
pub mod transport;

// Re-export main types
pub use cancel::CancellationToken;
pub use errors::{QueueClosed, TransportError};
pub use memory::{InMemoryBroker, InMemoryTransport};
pub use queue::{work_queue, QueueReceiver, QueueSender};
pub use transport::{dispatch, MessageHandler, Topic, Transport};
