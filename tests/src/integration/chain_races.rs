//! # Chain Races
//!
//! Inbound blocks are judged on their own merits: the digest is recomputed,
//! compared against the threshold the block carries, and the round id must
//! still be pending. Late winners and forged nonces change nothing.

#[cfg(test)]
mod tests {
    use super::super::support::{idle_node, wait_until, DEADLINE};
    use shared_bus::InMemoryBroker;
    use shared_crypto::block_digest;
    use shared_types::{encode_block, Block, Digest, U256};

    fn easy_block(id: u64, nonce: u64, prev_hash: Digest) -> Block {
        let mut block = Block::genesis(Digest::from_u256(U256::MAX), "0.0.1");
        block.id = U256::from(id);
        block.nonce = U256::from(nonce);
        block.prev_hash = prev_hash;
        block
    }

    #[test]
    fn test_stale_block_after_advance_is_discarded() {
        let broker = InMemoryBroker::new("memory://stale");
        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();

        let winner = easy_block(0, 1, Digest::empty());
        let winner_digest = block_digest(&winner);
        node.block_arrived(&encode_block(&winner).unwrap()).unwrap();
        assert!(wait_until(DEADLINE, || node.status().pending_id == U256::one()));

        let before = node.chain_state().snapshot();
        let late = easy_block(0, 2, Digest::empty());
        node.block_arrived(&encode_block(&late).unwrap()).unwrap();
        assert!(wait_until(DEADLINE, || node.status().blocks_stale == 1));

        let after = node.chain_state().snapshot();
        assert_eq!(after.block, before.block);
        assert_eq!(after.digests, before.digests);
        assert_eq!(after.block.prev_hash, winner_digest);
        assert_eq!(node.accepted_blocks().len(), 1);
        node.shutdown();
    }

    #[test]
    fn test_future_round_is_discarded() {
        let broker = InMemoryBroker::new("memory://future");
        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();

        let early = easy_block(5, 1, Digest::from_u256(U256::one()));
        node.block_arrived(&encode_block(&early).unwrap()).unwrap();

        assert!(wait_until(DEADLINE, || node.status().blocks_stale == 1));
        assert_eq!(node.status().pending_id, U256::zero());
        node.shutdown();
    }

    #[test]
    fn test_invalid_proof_of_work_is_discarded() {
        let broker = InMemoryBroker::new("memory://forged");
        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();

        // Threshold zero: no digest is below it.
        let mut forged = easy_block(0, 1, Digest::empty());
        forged.threshold = Digest::from_u256(U256::zero());
        node.block_arrived(&encode_block(&forged).unwrap()).unwrap();

        assert!(wait_until(DEADLINE, || node.status().blocks_invalid_pow == 1));
        let status = node.status();
        assert_eq!(status.pending_id, U256::zero());
        assert_eq!(status.blocks_accepted, 0);
        node.shutdown();
    }

    #[test]
    fn test_first_of_competing_winners_wins() {
        let broker = InMemoryBroker::new("memory://compete");
        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();

        let candidates: Vec<Block> = (1..=5u64)
            .map(|nonce| easy_block(0, nonce, Digest::empty()))
            .collect();
        for block in &candidates {
            node.block_arrived(&encode_block(block).unwrap()).unwrap();
        }

        assert!(wait_until(DEADLINE, || node.status().blocks_stale == 4));
        let ledger = node.accepted_blocks();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger[0].digest, block_digest(&candidates[0]));
        node.shutdown();
    }
}
