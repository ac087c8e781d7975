//! Pipeline consumers.
//!
//! One thread per queue. Each blocks until work arrives or the node is
//! cancelled, then handles the whole batch in arrival order.

use crate::metrics::PipelineMetrics;
use crate::pipelines::PipelineReceivers;
use sc_01_chain_state::{AdvanceOutcome, ChainState};
use shared_bus::{CancellationToken, QueueReceiver, Topic, Transport};
use shared_crypto::block_digest;
use shared_types::{encode_block, encode_transaction, Block, Digest, Transaction, WireError, U256};
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, info, trace, warn};

/// What the inbound-block validator did with one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockVerdict {
    /// The block closed the pending round.
    Accepted {
        accepted_id: U256,
        /// Recomputed digest, now the pending block's `prev_hash`.
        digest: Digest,
        discarded_transactions: usize,
    },
    /// Valid proof-of-work for a round that is no longer pending.
    Stale { candidate_id: U256, pending_id: U256 },
    /// The recomputed digest is not below the block's threshold.
    InvalidProofOfWork { digest: Digest, threshold: Digest },
}

/// Verify one inbound block and advance the chain if it wins the round.
///
/// The digest is recomputed locally; nothing the sender claims is trusted
/// except the threshold the block carries.
pub fn apply_block(state: &ChainState, block: &Block, metrics: &PipelineMetrics) -> BlockVerdict {
    let computed = block_digest(block);

    if computed >= block.threshold {
        metrics.record_block_invalid_pow();
        debug!(
            id = %block.id,
            nonce = %block.nonce,
            digest = %computed,
            threshold = %block.threshold,
            "Discarding block with invalid proof-of-work"
        );
        return BlockVerdict::InvalidProofOfWork {
            digest: computed,
            threshold: block.threshold.clone(),
        };
    }

    match state.try_advance(block.id, &computed, computed.clone()) {
        AdvanceOutcome::Advanced {
            accepted_id,
            discarded_transactions,
        } => {
            metrics.record_block_accepted(discarded_transactions);
            BlockVerdict::Accepted {
                accepted_id,
                digest: computed,
                discarded_transactions,
            }
        }
        AdvanceOutcome::Stale {
            candidate_id,
            pending_id,
        } => {
            metrics.record_block_stale();
            BlockVerdict::Stale {
                candidate_id,
                pending_id,
            }
        }
    }
}

/// Encode and send every queued item on `topic`. Failures drop the item.
fn run_publisher<T>(
    queue: QueueReceiver<T>,
    topic: Topic,
    encode: fn(&T) -> Result<Vec<u8>, WireError>,
    transport: Arc<dyn Transport>,
    cancel: CancellationToken,
    metrics: Arc<PipelineMetrics>,
) {
    while let Some(batch) = queue.next_batch(&cancel) {
        trace!(queue = queue.name(), items = batch.len(), "Publishing batch");
        for item in &batch {
            let sent = encode(item)
                .map_err(|e| e.to_string())
                .and_then(|payload| transport.send(topic, &payload).map_err(|e| e.to_string()));

            match sent {
                Ok(()) => match topic {
                    Topic::Blocks => metrics.record_block_published(),
                    Topic::Transactions => metrics.record_transaction_published(),
                },
                Err(error) => {
                    metrics.record_publish_failure();
                    warn!(%topic, %error, "Publish failed, item dropped");
                }
            }
        }
    }
    debug!(queue = queue.name(), "Publisher stopped");
}

fn run_block_validator(
    queue: QueueReceiver<Block>,
    state: Arc<ChainState>,
    cancel: CancellationToken,
    metrics: Arc<PipelineMetrics>,
) {
    while let Some(batch) = queue.next_batch(&cancel) {
        for block in &batch {
            apply_block(&state, block, &metrics);
        }
    }
    debug!(queue = queue.name(), "Block validator stopped");
}

fn run_transaction_applier(
    queue: QueueReceiver<Transaction>,
    state: Arc<ChainState>,
    cancel: CancellationToken,
    metrics: Arc<PipelineMetrics>,
) {
    while let Some(batch) = queue.next_batch(&cancel) {
        let applied = batch.len();
        let mut pending = 0;
        for tx in batch {
            pending = state.append_transaction(tx);
        }
        metrics.record_transactions_applied(applied);
        trace!(applied, pending, "Transactions appended");
    }
    debug!(queue = queue.name(), "Transaction applier stopped");
}

/// Body of a consumer thread.
type Work = Box<dyn FnOnce() + Send + 'static>;

fn spawn_named(name: &str, work: Work) -> io::Result<JoinHandle<()>> {
    thread::Builder::new().name(name.to_owned()).spawn(work)
}

/// Spawn one named thread per pipeline.
///
/// Every thread exits once `cancel` fires. Returns the join handles in
/// spawn order. If a spawn fails, `cancel` is fired and the threads already
/// started are joined before the error is returned.
pub fn spawn_consumers(
    receivers: PipelineReceivers,
    transport: Arc<dyn Transport>,
    state: Arc<ChainState>,
    cancel: CancellationToken,
    metrics: Arc<PipelineMetrics>,
) -> io::Result<Vec<JoinHandle<()>>> {
    spawn_consumers_with(receivers, transport, state, cancel, metrics, spawn_named)
}

fn spawn_consumers_with(
    receivers: PipelineReceivers,
    transport: Arc<dyn Transport>,
    state: Arc<ChainState>,
    cancel: CancellationToken,
    metrics: Arc<PipelineMetrics>,
    spawn: impl Fn(&str, Work) -> io::Result<JoinHandle<()>>,
) -> io::Result<Vec<JoinHandle<()>>> {
    let PipelineReceivers {
        outbound_blocks,
        outbound_transactions,
        inbound_blocks,
        inbound_transactions,
    } = receivers;

    let validator: (String, Work) = {
        let (state, cancel, metrics) = (Arc::clone(&state), cancel.clone(), Arc::clone(&metrics));
        (
            inbound_blocks.name().to_owned(),
            Box::new(move || run_block_validator(inbound_blocks, state, cancel, metrics)),
        )
    };
    let block_publisher: (String, Work) = {
        let (transport, cancel, metrics) =
            (Arc::clone(&transport), cancel.clone(), Arc::clone(&metrics));
        (
            outbound_blocks.name().to_owned(),
            Box::new(move || {
                run_publisher(
                    outbound_blocks,
                    Topic::Blocks,
                    encode_block,
                    transport,
                    cancel,
                    metrics,
                )
            }),
        )
    };
    let transaction_publisher: (String, Work) = {
        let (cancel, metrics) = (cancel.clone(), Arc::clone(&metrics));
        (
            outbound_transactions.name().to_owned(),
            Box::new(move || {
                run_publisher(
                    outbound_transactions,
                    Topic::Transactions,
                    encode_transaction,
                    transport,
                    cancel,
                    metrics,
                )
            }),
        )
    };
    let applier: (String, Work) = {
        let cancel = cancel.clone();
        (
            inbound_transactions.name().to_owned(),
            Box::new(move || run_transaction_applier(inbound_transactions, state, cancel, metrics)),
        )
    };

    let mut handles = Vec::with_capacity(4);
    for (name, work) in [validator, block_publisher, transaction_publisher, applier] {
        match spawn(&name, work) {
            Ok(handle) => handles.push(handle),
            Err(e) => {
                warn!(thread = %name, error = %e, started = handles.len(), "Consumer spawn failed");
                cancel.cancel();
                for handle in handles {
                    let _ = handle.join();
                }
                return Err(e);
            }
        }
    }

    info!(consumers = handles.len(), "Pipeline consumers started");
    Ok(handles)
}
