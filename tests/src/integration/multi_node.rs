//! # Multiple Nodes
//!
//! Nodes sharing one broker receive every block. Blocks from a single
//! publisher arrive everywhere in the same order, so followers of one miner
//! accept the same winner for every round.

#[cfg(test)]
mod tests {
    use super::super::support::{idle_node, mining_node, wait_until, DEADLINE};
    use shared_bus::InMemoryBroker;
    use shared_types::U256;

    #[test]
    fn test_follower_adopts_miner_chain() {
        let broker = InMemoryBroker::new("memory://shared");
        let miner = mining_node(&broker, "miner", 2);
        let follower = idle_node(&broker, "follower");
        follower.start_mining().unwrap();
        miner.start_mining().unwrap();

        assert!(wait_until(DEADLINE, || {
            follower.status().pending_id >= U256::from(3u64)
        }));
        miner.shutdown();
        follower.shutdown();

        let ours = miner.accepted_blocks();
        let theirs = follower.accepted_blocks();
        let common = ours.len().min(theirs.len());
        assert!(common >= 1);
        assert_eq!(ours[..common], theirs[..common]);
        // The follower never found anything itself.
        assert_eq!(follower.status().winners_found, 0);
    }

    #[test]
    fn test_competing_miners_each_keep_a_linear_chain() {
        // With two publishers delivery order may differ per node, so the
        // nodes can pick different winners. Each chain must still be linear.
        let broker = InMemoryBroker::new("memory://race");
        let a = mining_node(&broker, "a", 1);
        let b = mining_node(&broker, "b", 1);
        a.start_mining().unwrap();
        b.start_mining().unwrap();

        assert!(wait_until(DEADLINE, || {
            a.status().pending_id >= U256::from(4u64) && b.status().pending_id >= U256::from(4u64)
        }));
        a.shutdown();
        b.shutdown();

        for node in [&a, &b] {
            let ledger = node.accepted_blocks();
            for (i, entry) in ledger.iter().enumerate() {
                assert_eq!(entry.id, U256::from(i));
            }
            assert_eq!(node.status().pending_id, U256::from(ledger.len()));
        }
        let published = a.status().blocks_published + b.status().blocks_published;
        assert!(published >= 4);
    }
}
