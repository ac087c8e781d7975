//! # Transactions
//!
//! Transactions are appended to the pending block unconditionally. Each one
//! adds the digests of `from`, `to` and `amount` to the sorted digest set.

#[cfg(test)]
mod tests {
    use super::super::support::{idle_node, wait_until, Recorder, DEADLINE};
    use shared_bus::{InMemoryBroker, Topic, Transport};
    use shared_crypto::{block_digest, digest};
    use shared_types::{encode_transaction, Transaction, U256};
    use std::sync::Arc;
    use std::thread;

    fn tx(n: u64) -> Transaction {
        Transaction::new(
            digest(&U256::from(n)),
            digest(&U256::from(n + 1)),
            n.to_string(),
        )
    }

    #[test]
    fn test_concurrent_transactions_both_applied() {
        let broker = InMemoryBroker::new("memory://concurrent-tx");
        let node = Arc::new(idle_node(&broker, "idle"));
        node.start_mining().unwrap();
        let before = node.chain_state().snapshot();

        let senders: Vec<_> = [tx(10), tx(20)]
            .into_iter()
            .map(|t| {
                let node = Arc::clone(&node);
                thread::spawn(move || node.transaction_arrived(&encode_transaction(&t).unwrap()))
            })
            .collect();
        for sender in senders {
            sender.join().unwrap().unwrap();
        }

        assert!(wait_until(DEADLINE, || node.status().pending_transactions == 2));
        let after = node.chain_state().snapshot();
        assert_eq!(after.digests.len(), before.digests.len() + 6);
        assert!(after.digests.is_sorted());
        assert!(after.block.transactions.contains(&tx(10)));
        assert!(after.block.transactions.contains(&tx(20)));
        assert_eq!(after.block.id, before.block.id);
        assert_eq!(after.block.prev_hash, before.block.prev_hash);

        // The digest set still fingerprints the block it belongs to.
        let nonce = U256::from(99u64);
        assert_eq!(
            after.digests.speculative(&digest(&nonce)),
            block_digest(&after.block.with_nonce(nonce))
        );
        node.shutdown();
    }

    #[test]
    fn test_submitted_transaction_is_broadcast_then_applied() {
        let broker = InMemoryBroker::new("memory://submit");
        let observer = broker.client("observer");
        let recorder = Arc::new(Recorder::default());
        observer.set_handler(recorder.clone());
        observer.connect().unwrap();

        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();
        node.submit_transaction(tx(1)).unwrap();

        assert!(wait_until(DEADLINE, || node.status().pending_transactions == 1));
        assert_eq!(
            *recorder.transactions.lock(),
            vec![encode_transaction(&tx(1)).unwrap()]
        );
        let status = node.status();
        assert_eq!(status.transactions_published, 1);
        assert_eq!(status.transactions_applied, 1);
        node.shutdown();
    }

    #[test]
    fn test_non_json_transaction_is_dropped() {
        let broker = InMemoryBroker::new("memory://garbage");
        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();
        let before = node.chain_state().snapshot();

        assert!(node.transaction_arrived(b"\x00\x01 definitely not json").is_err());

        // The same garbage from a peer goes through the transport ingress.
        let peer = broker.client("peer");
        peer.connect().unwrap();
        peer.send(Topic::Transactions, b"{\"from\":").unwrap();

        let status = node.status();
        assert_eq!(status.decode_failures, 2);
        assert_eq!(status.transactions_applied, 0);
        let after = node.chain_state().snapshot();
        assert_eq!(after.block, before.block);
        assert_eq!(after.digests, before.digests);

        // The pipeline is still alive afterwards.
        node.transaction_arrived(&encode_transaction(&tx(5)).unwrap())
            .unwrap();
        assert!(wait_until(DEADLINE, || node.status().pending_transactions == 1));
        node.shutdown();
    }

    #[test]
    fn test_pending_transactions_discarded_when_round_closes() {
        let broker = InMemoryBroker::new("memory://discard");
        let node = idle_node(&broker, "idle");
        node.start_mining().unwrap();

        node.transaction_arrived(&encode_transaction(&tx(1)).unwrap())
            .unwrap();
        assert!(wait_until(DEADLINE, || node.status().pending_transactions == 1));

        let mut winner = node.chain_state().snapshot().block;
        winner.threshold = shared_types::Digest::from_u256(U256::MAX);
        node.block_arrived(&shared_types::encode_block(&winner).unwrap())
            .unwrap();

        assert!(wait_until(DEADLINE, || node.status().pending_id == U256::one()));
        let status = node.status();
        assert_eq!(status.pending_transactions, 0);
        assert_eq!(status.transactions_discarded, 1);
        node.shutdown();
    }
}
