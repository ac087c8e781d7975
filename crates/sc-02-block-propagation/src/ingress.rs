//! Transport-facing entry points.
//!
//! Decoding happens on the transport's delivery thread; the decoded value is
//! queued for the matching inbound consumer. A payload that does not decode
//! is logged, counted and dropped. Nothing is retried.

use crate::errors::PropagationError;
use crate::metrics::PipelineMetrics;
use shared_bus::{MessageHandler, QueueSender};
use shared_types::{decode_block, decode_transaction, Block, Transaction};
use std::sync::Arc;
use tracing::{trace, warn};

/// Decodes inbound payloads and feeds the inbound pipelines.
pub struct Ingress {
    blocks: QueueSender<Block>,
    transactions: QueueSender<Transaction>,
    metrics: Arc<PipelineMetrics>,
}

impl Ingress {
    pub fn new(
        blocks: QueueSender<Block>,
        transactions: QueueSender<Transaction>,
        metrics: Arc<PipelineMetrics>,
    ) -> Self {
        Self {
            blocks,
            transactions,
            metrics,
        }
    }

    /// Decode a block payload and queue it for validation.
    pub fn block_arrived(&self, raw: &[u8]) -> Result<(), PropagationError> {
        let block = decode_block(raw).map_err(|e| {
            self.metrics.record_decode_failure();
            warn!(error = %e, bytes = raw.len(), "Dropping undecodable block");
            e
        })?;
        trace!(id = %block.id, nonce = %block.nonce, "Block arrived");
        self.blocks.push(block)?;
        Ok(())
    }

    /// Decode a transaction payload and queue it for the pending block.
    pub fn transaction_arrived(&self, raw: &[u8]) -> Result<(), PropagationError> {
        let tx = decode_transaction(raw).map_err(|e| {
            self.metrics.record_decode_failure();
            warn!(error = %e, bytes = raw.len(), "Dropping undecodable transaction");
            e
        })?;
        trace!(from = %tx.from, to = %tx.to, amount = %tx.amount, "Transaction arrived");
        self.transactions.push(tx)?;
        Ok(())
    }
}

impl MessageHandler for Ingress {
    fn on_block(&self, payload: &[u8]) {
        if let Err(PropagationError::QueueClosed(e)) = self.block_arrived(payload) {
            trace!(error = %e, "Block arrived after shutdown");
        }
    }

    fn on_transaction(&self, payload: &[u8]) {
        if let Err(PropagationError::QueueClosed(e)) = self.transaction_arrived(payload) {
            trace!(error = %e, "Transaction arrived after shutdown");
        }
    }
}
