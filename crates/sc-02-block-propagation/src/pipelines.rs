//! The four work queues, split into producing and consuming halves.

use shared_bus::{work_queue, QueueReceiver, QueueSender};
use shared_types::{Block, Transaction};

/// Producing halves, cloned into miners, the ingress and the node.
#[derive(Clone)]
pub struct PipelineSenders {
    pub outbound_blocks: QueueSender<Block>,
    pub outbound_transactions: QueueSender<Transaction>,
    pub inbound_blocks: QueueSender<Block>,
    pub inbound_transactions: QueueSender<Transaction>,
}

/// Consuming halves, each moved into exactly one consumer thread.
pub struct PipelineReceivers {
    pub outbound_blocks: QueueReceiver<Block>,
    pub outbound_transactions: QueueReceiver<Transaction>,
    pub inbound_blocks: QueueReceiver<Block>,
    pub inbound_transactions: QueueReceiver<Transaction>,
}

/// Create all four queues.
pub fn pipelines() -> (PipelineSenders, PipelineReceivers) {
    let (outbound_blocks_tx, outbound_blocks_rx) = work_queue("outbound-blocks");
    let (outbound_txs_tx, outbound_txs_rx) = work_queue("outbound-transactions");
    let (inbound_blocks_tx, inbound_blocks_rx) = work_queue("inbound-blocks");
    let (inbound_txs_tx, inbound_txs_rx) = work_queue("inbound-transactions");

    (
        PipelineSenders {
            outbound_blocks: outbound_blocks_tx,
            outbound_transactions: outbound_txs_tx,
            inbound_blocks: inbound_blocks_tx,
            inbound_transactions: inbound_txs_tx,
        },
        PipelineReceivers {
            outbound_blocks: outbound_blocks_rx,
            outbound_transactions: outbound_txs_rx,
            inbound_blocks: inbound_blocks_rx,
            inbound_transactions: inbound_txs_rx,
        },
    )
}
