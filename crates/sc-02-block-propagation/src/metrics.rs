//! Metrics collection for the propagation pipelines
//!
//! Stale and invalid blocks are wasted work; decode and publish failures are
//! faults. They are counted separately.

use std::sync::atomic::{AtomicU64, Ordering};

/// Pipeline counters, shared by all consumers and the ingress
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    /// Blocks handed to the transport
    pub blocks_published: AtomicU64,

    /// Transactions handed to the transport
    pub transactions_published: AtomicU64,

    /// Items dropped because encoding or sending failed
    pub publish_failures: AtomicU64,

    /// Inbound blocks that advanced the chain
    pub blocks_accepted: AtomicU64,

    /// Inbound blocks for a round that had already closed
    pub blocks_stale: AtomicU64,

    /// Inbound blocks whose digest was not below their threshold
    pub blocks_invalid_pow: AtomicU64,

    /// Transactions appended to the pending block
    pub transactions_applied: AtomicU64,

    /// Pending transactions dropped when a round closed
    pub transactions_discarded: AtomicU64,

    /// Inbound payloads that failed to decode
    pub decode_failures: AtomicU64,
}

impl PipelineMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_block_published(&self) {
        self.blocks_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transaction_published(&self) {
        self.transactions_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_publish_failure(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a round closed by an accepted block
    pub fn record_block_accepted(&self, discarded_transactions: usize) {
        self.blocks_accepted.fetch_add(1, Ordering::Relaxed);
        self.transactions_discarded
            .fetch_add(discarded_transactions as u64, Ordering::Relaxed);
    }

    pub fn record_block_stale(&self) {
        self.blocks_stale.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_block_invalid_pow(&self) {
        self.blocks_invalid_pow.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_transactions_applied(&self, count: usize) {
        self.transactions_applied
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_decode_failure(&self) {
        self.decode_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_blocks_published(&self) -> u64 {
        self.blocks_published.load(Ordering::Relaxed)
    }

    pub fn get_transactions_published(&self) -> u64 {
        self.transactions_published.load(Ordering::Relaxed)
    }

    pub fn get_publish_failures(&self) -> u64 {
        self.publish_failures.load(Ordering::Relaxed)
    }

    pub fn get_blocks_accepted(&self) -> u64 {
        self.blocks_accepted.load(Ordering::Relaxed)
    }

    pub fn get_blocks_stale(&self) -> u64 {
        self.blocks_stale.load(Ordering::Relaxed)
    }

    pub fn get_blocks_invalid_pow(&self) -> u64 {
        self.blocks_invalid_pow.load(Ordering::Relaxed)
    }

    pub fn get_transactions_applied(&self) -> u64 {
        self.transactions_applied.load(Ordering::Relaxed)
    }

    pub fn get_transactions_discarded(&self) -> u64 {
        self.transactions_discarded.load(Ordering::Relaxed)
    }

    pub fn get_decode_failures(&self) -> u64 {
        self.decode_failures.load(Ordering::Relaxed)
    }

    /// Blocks that cost mining effort without advancing the chain
    pub fn get_wasted_blocks(&self) -> u64 {
        self.get_blocks_stale() + self.get_blocks_invalid_pow()
    }

    /// Drops caused by malformed input or transport trouble
    pub fn get_faults(&self) -> u64 {
        self.get_decode_failures() + self.get_publish_failures()
    }
}
