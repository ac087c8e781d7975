//! Metrics collection for the miner pool

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector shared by every miner thread
#[derive(Debug, Default)]
pub struct MiningMetrics {
    /// Candidate digests computed
    pub hashes_attempted: AtomicU64,

    /// Candidates below the threshold pushed to the outbound queue
    pub winners_found: AtomicU64,
}

impl MiningMetrics {
    /// Create new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a batch of attempts counted locally by one miner
    pub fn record_hashes(&self, count: u64) {
        self.hashes_attempted.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_winner(&self) {
        self.winners_found.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get_hashes_attempted(&self) -> u64 {
        self.hashes_attempted.load(Ordering::Relaxed)
    }

    pub fn get_winners_found(&self) -> u64 {
        self.winners_found.load(Ordering::Relaxed)
    }
}
