//! Reader/writer guarded pending round.

use crate::entities::{AcceptedBlock, AdvanceOutcome, GenesisParams, Snapshot};
use parking_lot::{Mutex, RwLock};
use shared_crypto::{transaction_digests, DigestSet};
use shared_types::{Block, Digest, Transaction, U256};
use tracing::{debug, info};

struct Round {
    block: Block,
    digests: DigestSet,
}

/// The node's pending block and its digest set.
///
/// ## Thread Safety
///
/// Shared via `Arc` between all miners and the two inbound consumers. Every
/// critical section is O(size of the digest set); digests of new components
/// are computed before the write lock is taken.
///
/// The accepted-block ledger sits behind its own lock. Readers of the ledger
/// never hold the round lock. `try_advance` takes the ledger lock before
/// releasing the round lock, so entries stay in id order.
pub struct ChainState {
    round: RwLock<Round>,
    ledger: Mutex<Vec<AcceptedBlock>>,
}

impl ChainState {
    /// Open the first round: id 0, nonce 0, empty `prev_hash`.
    pub fn new(params: GenesisParams) -> Self {
        let block = Block::genesis(params.threshold, params.version);
        let digests = DigestSet::base(&block);
        Self {
            round: RwLock::new(Round { block, digests }),
            ledger: Mutex::new(Vec::new()),
        }
    }

    /// Copy of the pending block and its digest set.
    pub fn snapshot(&self) -> Snapshot {
        let round = self.round.read();
        Snapshot {
            block: round.block.clone(),
            digests: round.digests.clone(),
        }
    }

    /// Close the pending round if `candidate_id` is still the pending id.
    ///
    /// On success the id is incremented, `prev_hash` replaced, transactions
    /// cleared and the digest set reset to the four base components.
    /// `computed_digest` is recorded in the accepted-block ledger.
    pub fn try_advance(
        &self,
        candidate_id: U256,
        computed_digest: &Digest,
        new_prev_hash: Digest,
    ) -> AdvanceOutcome {
        let outcome = {
            let mut round = self.round.write();
            let pending_id = round.block.id;
            if candidate_id != pending_id {
                AdvanceOutcome::Stale {
                    candidate_id,
                    pending_id,
                }
            } else {
                let discarded_transactions = round.block.transactions.len();
                round.block.id = pending_id.saturating_add(U256::one());
                round.block.prev_hash = new_prev_hash;
                round.block.transactions.clear();
                round.digests = DigestSet::base(&round.block);

                let mut ledger = self.ledger.lock();
                drop(round);
                ledger.push(AcceptedBlock {
                    id: pending_id,
                    digest: computed_digest.clone(),
                });
                AdvanceOutcome::Advanced {
                    accepted_id: pending_id,
                    discarded_transactions,
                }
            }
        };

        match &outcome {
            AdvanceOutcome::Advanced {
                accepted_id,
                discarded_transactions,
            } => info!(
                accepted_id = %accepted_id,
                digest = %computed_digest,
                discarded_transactions,
                "Chain advanced"
            ),
            AdvanceOutcome::Stale {
                candidate_id,
                pending_id,
            } => debug!(
                candidate_id = %candidate_id,
                pending_id = %pending_id,
                "Stale block ignored"
            ),
        }
        outcome
    }

    /// Append a transaction to the pending block. Returns the pending count.
    ///
    /// No validation of any kind is performed.
    pub fn append_transaction(&self, tx: Transaction) -> usize {
        let parts = transaction_digests(&tx);
        let mut round = self.round.write();
        round.block.transactions.push(tx);
        round.digests.extend(parts);
        round.block.transactions.len()
    }

    /// Id of the pending block.
    pub fn pending_id(&self) -> U256 {
        self.round.read().block.id
    }

    /// `prev_hash` of the pending block.
    pub fn prev_hash(&self) -> Digest {
        self.round.read().block.prev_hash.clone()
    }

    pub fn threshold(&self) -> Digest {
        self.round.read().block.threshold.clone()
    }

    pub fn pending_transactions(&self) -> usize {
        self.round.read().block.transactions.len()
    }

    /// Every block that advanced the chain, oldest first.
    ///
    /// Copies the whole ledger. Use [`accepted_len`](Self::accepted_len) when
    /// only the count is needed.
    pub fn accepted(&self) -> Vec<AcceptedBlock> {
        self.ledger.lock().clone()
    }

    /// Number of blocks that advanced the chain.
    pub fn accepted_len(&self) -> usize {
        self.ledger.lock().len()
    }
}
