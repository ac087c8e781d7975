//! # Digest Set
//!
//! Sorted multiset of component digests whose fold is a block's content
//! fingerprint. Every mutation keeps the set sorted, so [`DigestSet::fold`]
//! never has to sort and is independent of insertion order.

use crate::hashing::{digest, digest_of_set, speculative_digest};
use shared_types::{Block, Digest};

/// Sorted component digests of a pending block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DigestSet {
    items: Vec<Digest>,
}

impl DigestSet {
    /// Build a set from digests in any order.
    #[must_use]
    pub fn from_unsorted(mut items: Vec<Digest>) -> Self {
        items.sort();
        Self { items }
    }

    /// The four base components of a pending block: `id`, `prev_hash`,
    /// `version` and `threshold`. Nonce and transactions are excluded.
    #[must_use]
    pub fn base(block: &Block) -> Self {
        Self::from_unsorted(vec![
            digest(&block.id),
            digest(&block.prev_hash),
            digest(&block.version),
            digest(&block.threshold),
        ])
    }

    /// Insert one digest at its sorted position.
    pub fn insert(&mut self, item: Digest) {
        let at = self.items.partition_point(|existing| existing <= &item);
        self.items.insert(at, item);
    }

    /// Insert several digests, each at its sorted position.
    pub fn extend(&mut self, items: impl IntoIterator<Item = Digest>) {
        for item in items {
            self.insert(item);
        }
    }

    /// Aggregate digest of the set.
    #[must_use]
    pub fn fold(&self) -> Digest {
        digest_of_set(&self.items)
    }

    /// Aggregate digest the set would have with `candidate` added.
    #[must_use]
    pub fn speculative(&self, candidate: &Digest) -> Digest {
        speculative_digest(&self.items, candidate)
    }

    /// Number of component digests.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the set holds no digests.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Components in ascending order.
    #[must_use]
    pub fn as_slice(&self) -> &[Digest] {
        &self.items
    }

    /// True when the components are in ascending order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.items.windows(2).all(|w| w[0] <= w[1])
    }
}
