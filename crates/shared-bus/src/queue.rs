//! # Work Queues
//!
//! Unbounded multi-producer, single-consumer queues. The consumer blocks
//! until at least one item is queued, then takes everything that is queued
//! in one batch (FIFO). A cancelled token ends the wait immediately.

use crate::cancel::CancellationToken;
use crate::errors::QueueClosed;
use crossbeam_channel::{select, unbounded, Receiver, Sender};

/// Create a named queue.
pub fn work_queue<T>(name: &'static str) -> (QueueSender<T>, QueueReceiver<T>) {
    let (tx, rx) = unbounded();
    (QueueSender { name, tx }, QueueReceiver { name, rx })
}

/// Producing half of a work queue. Cheap to clone.
pub struct QueueSender<T> {
    name: &'static str,
    tx: Sender<T>,
}

impl<T> Clone for QueueSender<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tx: self.tx.clone(),
        }
    }
}

impl<T> QueueSender<T> {
    /// Enqueue an item. Fails only once the consumer has gone away.
    pub fn push(&self, item: T) -> Result<(), QueueClosed> {
        self.tx.send(item).map_err(|_| QueueClosed(self.name))
    }

    /// Items waiting to be consumed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Consuming half of a work queue.
pub struct QueueReceiver<T> {
    name: &'static str,
    rx: Receiver<T>,
}

impl<T> QueueReceiver<T> {
    /// Block until items are available, then drain them all.
    ///
    /// Returns `None` once `cancel` fires or every sender is gone; queued
    /// items are abandoned in that case.
    pub fn next_batch(&self, cancel: &CancellationToken) -> Option<Vec<T>> {
        if cancel.is_cancelled() {
            return None;
        }

        select! {
            recv(self.rx) -> first => match first {
                Ok(first) => {
                    let mut batch = vec![first];
                    batch.extend(self.rx.try_iter());
                    Some(batch)
                }
                Err(_) => None,
            },
            recv(cancel.signal()) -> _ => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }
}
