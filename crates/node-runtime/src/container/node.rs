//! The node controller.

use crate::container::config::{ConfigError, NodeConfig};
use crate::error::{NodeError, Result};
use parking_lot::Mutex;
use sc_01_chain_state::{AcceptedBlock, ChainState, GenesisParams};
use sc_02_block_propagation::{
    pipelines, spawn_consumers, Ingress, PipelineMetrics, PipelineReceivers, PipelineSenders,
};
use sc_03_block_production::{MinerPool, MiningMetrics};
use shared_bus::{CancellationToken, Transport};
use shared_crypto::threshold_from_divisor;
use shared_types::{Digest, Transaction, U256};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info, warn};

/// Point-in-time view of a node, for operators and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeStatus {
    pub node_id: String,
    pub connected: bool,
    pub running: bool,
    pub pending_id: U256,
    pub prev_hash: Digest,
    pub threshold: Digest,
    pub pending_transactions: usize,
    pub accepted_blocks: usize,
    pub hashes_attempted: u64,
    pub winners_found: u64,
    pub blocks_published: u64,
    pub transactions_published: u64,
    pub publish_failures: u64,
    pub blocks_accepted: u64,
    pub blocks_stale: u64,
    pub blocks_invalid_pow: u64,
    pub transactions_applied: u64,
    pub transactions_discarded: u64,
    pub decode_failures: u64,
}

/// One proof-of-work node.
///
/// Created idle: the genesis round is open and the ingress is registered with
/// the transport, but nothing runs until [`start_mining`](Self::start_mining).
/// Dropping the controller shuts the node down.
pub struct NodeController {
    config: NodeConfig,
    state: Arc<ChainState>,
    transport: Arc<dyn Transport>,
    senders: PipelineSenders,
    /// Taken by `start_mining`.
    receivers: Mutex<Option<PipelineReceivers>>,
    ingress: Arc<Ingress>,
    pool: MinerPool,
    cancel: CancellationToken,
    pipeline_metrics: Arc<PipelineMetrics>,
    mining_metrics: Arc<MiningMetrics>,
    threads: Mutex<Vec<JoinHandle<()>>>,
}

impl NodeController {
    /// Build an idle node on `transport`.
    pub fn new(config: NodeConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let threshold = threshold_from_divisor(config.chain.difficulty_divisor)
            .ok_or(ConfigError::ZeroDivisor)?;
        let pool = MinerPool::new(config.mining.threads)?;

        let state = Arc::new(ChainState::new(GenesisParams {
            threshold,
            version: config.chain.version.clone(),
        }));
        let (senders, receivers) = pipelines();
        let pipeline_metrics = Arc::new(PipelineMetrics::new());

        let ingress = Arc::new(Ingress::new(
            senders.inbound_blocks.clone(),
            senders.inbound_transactions.clone(),
            Arc::clone(&pipeline_metrics),
        ));
        transport.set_handler(ingress.clone());

        Ok(Self {
            config,
            state,
            transport,
            senders,
            receivers: Mutex::new(Some(receivers)),
            ingress,
            pool,
            cancel: CancellationToken::new(),
            pipeline_metrics,
            mining_metrics: Arc::new(MiningMetrics::new()),
            threads: Mutex::new(Vec::new()),
        })
    }

    /// Connect, wait for the transport, then start consumers and miners.
    ///
    /// Blocks until the transport is ready. Connection failures are retried
    /// every `connect_retry`; only cancellation ends the wait early.
    pub fn start_mining(&self) -> Result<()> {
        let receivers = self
            .receivers
            .lock()
            .take()
            .ok_or(NodeError::AlreadyStarted)?;

        self.wait_for_transport()?;

        info!(
            node_id = %self.config.transport.node_id,
            threshold = %self.state.threshold(),
            divisor = %self.config.chain.difficulty_divisor,
            version = %self.config.chain.version,
            "Starting mining"
        );

        let mut threads = self.threads.lock();
        threads.extend(spawn_consumers(
            receivers,
            Arc::clone(&self.transport),
            Arc::clone(&self.state),
            self.cancel.clone(),
            Arc::clone(&self.pipeline_metrics),
        )?);
        threads.extend(self.pool.spawn(
            Arc::clone(&self.state),
            self.senders.outbound_blocks.clone(),
            self.cancel.clone(),
            Arc::clone(&self.mining_metrics),
        )?);

        info!(
            miners = self.pool.threads(),
            threads = threads.len(),
            "Node running"
        );
        Ok(())
    }

    fn wait_for_transport(&self) -> Result<()> {
        let uri = &self.config.transport.broker_uri;
        let retry = self.config.transport.connect_retry;

        loop {
            if !self.transport.is_connected() {
                if let Err(e) = self.transport.connect() {
                    warn!(broker = %uri, error = %e, retry_ms = retry.as_millis() as u64, "Connection failed");
                }
            }
            if self.transport.is_connected() {
                info!(broker = %uri, "Transport ready");
                return Ok(());
            }
            debug!(broker = %uri, "Waiting for transport");
            if self.cancel.wait_timeout(retry) {
                return Err(NodeError::Cancelled);
            }
        }
    }

    /// Ingress for a raw block payload. Malformed payloads are dropped.
    pub fn block_arrived(&self, raw: &[u8]) -> Result<()> {
        Ok(self.ingress.block_arrived(raw)?)
    }

    /// Ingress for a raw transaction payload. Malformed payloads are dropped.
    pub fn transaction_arrived(&self, raw: &[u8]) -> Result<()> {
        Ok(self.ingress.transaction_arrived(raw)?)
    }

    /// Queue a local transaction for broadcast.
    ///
    /// It reaches the pending block only after coming back through the
    /// transport, like any peer's transaction.
    pub fn submit_transaction(&self, tx: Transaction) -> Result<()> {
        self.senders
            .outbound_transactions
            .push(tx)
            .map_err(|e| NodeError::Propagation(e.into()))
    }

    pub fn status(&self) -> NodeStatus {
        let snapshot = self.state.snapshot();
        let pm = &self.pipeline_metrics;
        NodeStatus {
            node_id: self.config.transport.node_id.clone(),
            connected: self.transport.is_connected(),
            running: self.is_running(),
            pending_id: snapshot.block.id,
            prev_hash: snapshot.block.prev_hash,
            threshold: snapshot.block.threshold,
            pending_transactions: snapshot.block.transactions.len(),
            accepted_blocks: self.state.accepted_len(),
            hashes_attempted: self.mining_metrics.get_hashes_attempted(),
            winners_found: self.mining_metrics.get_winners_found(),
            blocks_published: pm.get_blocks_published(),
            transactions_published: pm.get_transactions_published(),
            publish_failures: pm.get_publish_failures(),
            blocks_accepted: pm.get_blocks_accepted(),
            blocks_stale: pm.get_blocks_stale(),
            blocks_invalid_pow: pm.get_blocks_invalid_pow(),
            transactions_applied: pm.get_transactions_applied(),
            transactions_discarded: pm.get_transactions_discarded(),
            decode_failures: pm.get_decode_failures(),
        }
    }

    /// True once threads have been started and until shutdown.
    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled() && !self.threads.lock().is_empty()
    }

    pub fn chain_state(&self) -> &Arc<ChainState> {
        &self.state
    }

    /// Blocks that advanced this node's chain, oldest first.
    pub fn accepted_blocks(&self) -> Vec<AcceptedBlock> {
        self.state.accepted()
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Cancel every thread and wait for all of them. Idempotent.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        let threads: Vec<_> = self.threads.lock().drain(..).collect();
        if threads.is_empty() {
            return;
        }

        info!(threads = threads.len(), "Shutting down");
        for handle in threads {
            let name = handle.thread().name().map(str::to_owned);
            if handle.join().is_err() {
                error!(thread = ?name, "Worker panicked");
            }
        }
        info!("Shutdown complete");
    }
}

impl Drop for NodeController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
