//! # Mining Loop
//!
//! ```text
//! miner ──winner──→ outbound-blocks ──send──→ [broker] ──on_block──→ inbound-blocks
//!                                                                          │
//!                          ChainState { id + 1, prev_hash = digest } ←─────┘
//! ```
//!
//! A node only advances on blocks that came back through the transport, its
//! own included.

#[cfg(test)]
mod tests {
    use super::super::support::{mining_node, wait_until, Recorder, DEADLINE};
    use shared_bus::{InMemoryBroker, Transport};
    use shared_crypto::block_digest;
    use shared_types::U256;
    use std::sync::Arc;

    #[test]
    fn test_own_block_loops_back_and_advances_chain() {
        let broker = InMemoryBroker::new("memory://mining-loop");
        let observer = broker.client("observer");
        let recorder = Arc::new(Recorder::default());
        observer.set_handler(recorder.clone());
        observer.connect().unwrap();

        let node = mining_node(&broker, "miner", 2);
        let genesis = node.chain_state().snapshot().block;
        node.start_mining().unwrap();

        assert!(wait_until(DEADLINE, || node.accepted_blocks().len() >= 2));
        node.shutdown();

        let ledger = node.accepted_blocks();
        let published = recorder.decoded_blocks();

        // Round 0: the accepted block is a published genesis candidate.
        let first = published
            .iter()
            .find(|b| b.id == U256::zero() && block_digest(b) == ledger[0].digest)
            .expect("accepted block 0 was published");
        assert!(first.prev_hash.is_empty());
        assert_eq!(first.threshold, genesis.threshold);
        assert_eq!(first.version, genesis.version);
        assert!(ledger[0].digest < first.threshold);

        // Round 1 extends the recomputed digest of round 0.
        let second = published
            .iter()
            .find(|b| b.id == U256::one() && block_digest(b) == ledger[1].digest)
            .expect("accepted block 1 was published");
        assert_eq!(second.prev_hash, ledger[0].digest);

        // Every advance moved the pending id by exactly one.
        let status = node.status();
        assert_eq!(status.pending_id, U256::from(ledger.len()));
        assert_eq!(status.blocks_accepted, ledger.len() as u64);
        assert!(status.winners_found >= ledger.len() as u64);
        assert!(status.hashes_attempted > 0);
        for (i, entry) in ledger.iter().enumerate() {
            assert_eq!(entry.id, U256::from(i));
        }
    }

    #[test]
    fn test_pending_block_resets_after_each_round() {
        let broker = InMemoryBroker::new("memory://reset");
        let node = mining_node(&broker, "miner", 1);
        node.start_mining().unwrap();

        assert!(wait_until(DEADLINE, || node.status().pending_id >= U256::from(3u64)));
        node.shutdown();

        let snapshot = node.chain_state().snapshot();
        let last = node.accepted_blocks().last().cloned().unwrap();
        assert_eq!(snapshot.block.prev_hash, last.digest);
        assert!(snapshot.block.transactions.is_empty());
        assert_eq!(snapshot.digests.len(), 4);
    }
}
