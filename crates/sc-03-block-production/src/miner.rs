//! Miner threads.

use crate::error::{MiningError, Result};
use crate::metrics::MiningMetrics;
use crate::nonce_range::NonceRange;
use sc_01_chain_state::ChainState;
use shared_bus::{CancellationToken, QueueSender};
use shared_crypto::digest;
use shared_types::{Block, U256};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, warn};

/// Attempts a miner counts locally before flushing to [`MiningMetrics`].
const HASH_FLUSH_INTERVAL: u64 = 4096;

/// Fixed-size pool of miner threads.
#[derive(Debug, Clone)]
pub struct MinerPool {
    ranges: Vec<NonceRange>,
}

impl MinerPool {
    /// Partition the nonce space for `threads` miners.
    pub fn new(threads: usize) -> Result<Self> {
        Ok(Self {
            ranges: NonceRange::partition(threads)?,
        })
    }

    pub fn threads(&self) -> usize {
        self.ranges.len()
    }

    pub fn ranges(&self) -> &[NonceRange] {
        &self.ranges
    }

    /// Start one named thread (`miner-{i}`) per range.
    ///
    /// Winners go to `winners`. Every miner exits once `cancel` fires or the
    /// queue's consumer is gone. If a spawn fails, `cancel` is fired and the
    /// miners already started are joined before the error is returned.
    pub fn spawn(
        &self,
        state: Arc<ChainState>,
        winners: QueueSender<Block>,
        cancel: CancellationToken,
        metrics: Arc<MiningMetrics>,
    ) -> Result<Vec<JoinHandle<()>>> {
        self.spawn_with(state, winners, cancel, metrics, |name, miner| {
            thread::Builder::new().name(name).spawn(move || miner.run())
        })
    }

    fn spawn_with(
        &self,
        state: Arc<ChainState>,
        winners: QueueSender<Block>,
        cancel: CancellationToken,
        metrics: Arc<MiningMetrics>,
        spawn: impl Fn(String, Miner) -> io::Result<JoinHandle<()>>,
    ) -> Result<Vec<JoinHandle<()>>> {
        let mut handles = Vec::with_capacity(self.ranges.len());

        for range in self.ranges.iter().copied() {
            let miner = Miner {
                range,
                state: Arc::clone(&state),
                winners: winners.clone(),
                cancel: cancel.clone(),
                metrics: Arc::clone(&metrics),
            };
            match spawn(format!("miner-{}", range.index), miner) {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    warn!(miner = range.index, error = %source, started = handles.len(), "Miner spawn failed");
                    cancel.cancel();
                    for handle in handles {
                        let _ = handle.join();
                    }
                    return Err(MiningError::Spawn {
                        index: range.index,
                        source,
                    });
                }
            }
        }

        info!(threads = handles.len(), "Miner pool started");
        Ok(handles)
    }
}

struct Miner {
    range: NonceRange,
    state: Arc<ChainState>,
    winners: QueueSender<Block>,
    cancel: CancellationToken,
    metrics: Arc<MiningMetrics>,
}

impl Miner {
    fn run(self) {
        debug!(
            miner = self.range.index,
            start = %self.range.start,
            "Miner started"
        );

        let mut offset = U256::zero();
        let mut unflushed = 0u64;

        while !self.cancel.is_cancelled() {
            let snapshot = self.state.snapshot();
            let nonce = self.range.nonce(offset);
            let candidate = snapshot.digests.speculative(&digest(&nonce));
            unflushed += 1;

            if candidate < snapshot.block.threshold {
                debug!(
                    miner = self.range.index,
                    id = %snapshot.block.id,
                    %nonce,
                    digest = %candidate,
                    "Winning nonce found"
                );
                self.metrics.record_winner();
                if self.winners.push(snapshot.block.with_nonce(nonce)).is_err() {
                    debug!(miner = self.range.index, "Outbound queue closed");
                    break;
                }
            }

            if unflushed == HASH_FLUSH_INTERVAL {
                self.metrics.record_hashes(unflushed);
                unflushed = 0;
            }
            offset = self.range.next_offset(offset);
        }

        self.metrics.record_hashes(unflushed);
        debug!(miner = self.range.index, "Miner stopped");
    }
}
