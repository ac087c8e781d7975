//! Shared fixtures for the integration scenarios.

use node_runtime::{NodeConfig, NodeController};
use parking_lot::Mutex;
use shared_bus::{InMemoryBroker, MessageHandler};
use shared_types::{decode_block, Block, U256};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Upper bound for any single wait in a scenario.
pub const DEADLINE: Duration = Duration::from_secs(30);

/// Divisor easy enough to close a round every few thousand hashes.
pub const EASY_DIVISOR: u64 = 4096;

/// Poll `condition` until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    loop {
        if condition() {
            return true;
        }
        if Instant::now() >= deadline {
            return false;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

/// Configuration for a test node with a fast connection poll.
pub fn node_config(node_id: &str, divisor: U256, threads: usize) -> NodeConfig {
    let mut config = NodeConfig::default();
    config.transport.node_id = node_id.to_string();
    config.transport.connect_retry = Duration::from_millis(10);
    config.chain.difficulty_divisor = divisor;
    config.mining.threads = threads;
    config
}

/// A node whose own miners can never win (threshold of 1).
///
/// Its chain only moves when blocks carrying their own threshold arrive.
pub fn idle_node(broker: &InMemoryBroker, node_id: &str) -> NodeController {
    let config = node_config(node_id, U256::MAX, 1);
    let transport = Arc::new(broker.client(node_id));
    match NodeController::new(config, transport) {
        Ok(node) => node,
        Err(e) => panic!("failed to build {node_id}: {e}"),
    }
}

/// A node mining at [`EASY_DIVISOR`].
pub fn mining_node(broker: &InMemoryBroker, node_id: &str, threads: usize) -> NodeController {
    let config = node_config(node_id, U256::from(EASY_DIVISOR), threads);
    let transport = Arc::new(broker.client(node_id));
    match NodeController::new(config, transport) {
        Ok(node) => node,
        Err(e) => panic!("failed to build {node_id}: {e}"),
    }
}

/// Observer that keeps every block and transaction payload it is handed.
#[derive(Default)]
pub struct Recorder {
    pub blocks: Mutex<Vec<Vec<u8>>>,
    pub transactions: Mutex<Vec<Vec<u8>>>,
}

impl Recorder {
    /// Every recorded block that decodes.
    pub fn decoded_blocks(&self) -> Vec<Block> {
        self.blocks
            .lock()
            .iter()
            .filter_map(|raw| decode_block(raw).ok())
            .collect()
    }
}

impl MessageHandler for Recorder {
    fn on_block(&self, payload: &[u8]) {
        self.blocks.lock().push(payload.to_vec());
    }

    fn on_transaction(&self, payload: &[u8]) {
        self.transactions.lock().push(payload.to_vec());
    }
}
