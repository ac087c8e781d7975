//! Values exchanged with the chain state.

use shared_crypto::DigestSet;
use shared_types::{Block, Digest, U256};

/// Parameters of the first pending block.
#[derive(Clone, Debug)]
pub struct GenesisParams {
    /// Difficulty threshold carried by every block of this chain.
    pub threshold: Digest,
    /// Chain protocol version.
    pub version: String,
}

/// Copy of the pending round taken under the shared lock.
#[derive(Clone, Debug)]
pub struct Snapshot {
    pub block: Block,
    pub digests: DigestSet,
}

/// Result of [`ChainState::try_advance`](crate::ChainState::try_advance).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The round closed and the next one opened.
    Advanced {
        /// Id of the block that was accepted.
        accepted_id: U256,
        /// Pending transactions dropped with the closed round.
        discarded_transactions: usize,
    },
    /// The candidate belongs to a round that is no longer pending.
    Stale {
        candidate_id: U256,
        pending_id: U256,
    },
}

impl AdvanceOutcome {
    #[must_use]
    pub fn is_advanced(&self) -> bool {
        matches!(self, Self::Advanced { .. })
    }
}

/// Ledger entry for a block that advanced the chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AcceptedBlock {
    pub id: U256,
    pub digest: Digest,
}
