//! # In-Memory Broker
//!
//! Loopback implementation of the [`Transport`] port. Every client created
//! from one broker shares the same two topics; a publication is delivered
//! synchronously, on the publisher's thread, to every connected client that
//! registered a handler, the publisher included.
//!
//! The broker can be switched offline to exercise connection retry.

use crate::errors::TransportError;
use crate::transport::{dispatch, MessageHandler, Topic, Transport};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

struct ClientSlot {
    client_id: String,
    connected: AtomicBool,
    handler: RwLock<Option<Arc<dyn MessageHandler>>>,
}

struct BrokerInner {
    address: String,
    online: AtomicBool,
    clients: RwLock<Vec<Arc<ClientSlot>>>,
    published: AtomicU64,
}

/// Shared in-process broker.
#[derive(Clone)]
pub struct InMemoryBroker {
    inner: Arc<BrokerInner>,
}

impl InMemoryBroker {
    /// A broker that accepts connections immediately.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(BrokerInner {
                address: address.into(),
                online: AtomicBool::new(true),
                clients: RwLock::new(Vec::new()),
                published: AtomicU64::new(0),
            }),
        }
    }

    /// Bring the broker up or down. Clients report disconnected while down.
    pub fn set_online(&self, online: bool) {
        self.inner.online.store(online, Ordering::SeqCst);
        info!(address = %self.inner.address, online, "Broker availability changed");
    }

    #[must_use]
    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Create a client transport with the given identity.
    #[must_use]
    pub fn client(&self, client_id: impl Into<String>) -> InMemoryTransport {
        let slot = Arc::new(ClientSlot {
            client_id: client_id.into(),
            connected: AtomicBool::new(false),
            handler: RwLock::new(None),
        });
        self.inner.clients.write().push(Arc::clone(&slot));
        InMemoryTransport {
            broker: Arc::clone(&self.inner),
            slot,
        }
    }

    /// Total messages accepted for delivery.
    #[must_use]
    pub fn published(&self) -> u64 {
        self.inner.published.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.inner.address
    }

    /// Clients currently registered with the broker.
    #[must_use]
    pub fn clients(&self) -> usize {
        self.inner.clients.read().len()
    }
}

/// One node's connection to an [`InMemoryBroker`].
///
/// Dropping the transport removes it from the broker.
pub struct InMemoryTransport {
    broker: Arc<BrokerInner>,
    slot: Arc<ClientSlot>,
}

impl InMemoryTransport {
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.slot.client_id
    }
}

impl Transport for InMemoryTransport {
    fn connect(&self) -> Result<(), TransportError> {
        if !self.broker.online.load(Ordering::SeqCst) {
            return Err(TransportError::Unreachable(self.broker.address.clone()));
        }
        self.slot.connected.store(true, Ordering::SeqCst);
        info!(
            client = %self.slot.client_id,
            address = %self.broker.address,
            topics = ?Topic::ALL.map(Topic::as_str),
            "Connected and subscribed"
        );
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.slot.connected.load(Ordering::SeqCst) && self.broker.online.load(Ordering::SeqCst)
    }

    fn send(&self, topic: Topic, payload: &[u8]) -> Result<(), TransportError> {
        if !self.is_connected() {
            return Err(TransportError::NotConnected);
        }
        self.broker.published.fetch_add(1, Ordering::Relaxed);

        // Collect handlers first so no broker lock is held during delivery.
        let handlers: Vec<Arc<dyn MessageHandler>> = self
            .broker
            .clients
            .read()
            .iter()
            .filter(|slot| slot.connected.load(Ordering::SeqCst))
            .filter_map(|slot| slot.handler.read().clone())
            .collect();

        debug!(
            client = %self.slot.client_id,
            topic = %topic,
            bytes = payload.len(),
            receivers = handlers.len(),
            "Message published"
        );

        for handler in handlers {
            dispatch(handler.as_ref(), topic.as_str(), payload);
        }
        Ok(())
    }

    fn set_handler(&self, handler: Arc<dyn MessageHandler>) {
        *self.slot.handler.write() = Some(handler);
    }
}

impl Drop for InMemoryTransport {
    fn drop(&mut self) {
        self.slot.connected.store(false, Ordering::SeqCst);
        *self.slot.handler.write() = None;
        self.broker
            .clients
            .write()
            .retain(|slot| !Arc::ptr_eq(slot, &self.slot));
        debug!(client = %self.slot.client_id, "Client removed");
    }
}
