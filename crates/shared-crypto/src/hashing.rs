//! # SHA-256 Digests
//!
//! Every value is digested through its canonical string form: integers in
//! decimal, digests and strings verbatim. The output is lowercase hex.

use sha2::{Digest as _, Sha256};
use shared_types::{Block, Digest, Transaction, U256};
use std::borrow::Cow;

/// Canonical string form of a value fed to [`digest`].
pub trait Canonical {
    /// The exact text that is hashed.
    fn canonical(&self) -> Cow<'_, str>;
}

impl Canonical for U256 {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

impl Canonical for Digest {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl Canonical for str {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl Canonical for String {
    fn canonical(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

#[inline]
fn finish(hasher: Sha256) -> Digest {
    Digest::from_hex_unchecked(hex::encode(hasher.finalize()))
}

/// Digest of a single value.
pub fn digest<T: Canonical + ?Sized>(value: &T) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(value.canonical().as_bytes());
    finish(hasher)
}

/// Digest of the concatenation of `set` in its current order.
///
/// The caller is responsible for sorting; this function never reorders.
pub fn digest_of_set(set: &[Digest]) -> Digest {
    let mut hasher = Sha256::new();
    for item in set {
        hasher.update(item.as_str().as_bytes());
    }
    finish(hasher)
}

/// Digest that `set` would fold to after inserting `candidate`.
///
/// `candidate` is placed at its upper-bound position, exactly where a sorted
/// insert would put it, and `set` is left untouched.
///
/// # Precondition
///
/// `set` must be sorted ascending. Debug builds assert this; release builds
/// return a digest of the mis-ordered concatenation without panicking.
pub fn speculative_digest(set: &[Digest], candidate: &Digest) -> Digest {
    debug_assert!(
        set.windows(2).all(|w| w[0] <= w[1]),
        "speculative_digest requires a sorted digest set"
    );

    let upper = set.partition_point(|item| item <= candidate);
    let mut hasher = Sha256::new();
    for item in &set[..upper] {
        hasher.update(item.as_str().as_bytes());
    }
    hasher.update(candidate.as_str().as_bytes());
    for item in &set[upper..] {
        hasher.update(item.as_str().as_bytes());
    }
    finish(hasher)
}

/// Content fingerprint of a whole block, nonce included.
///
/// Folds the sorted digests of `id`, `nonce`, `prev_hash`, `threshold`,
/// `version` and every transaction's `from`, `to` and `amount`. A miner's
/// speculative digest for a nonce equals this value for the mined block.
pub fn block_digest(block: &Block) -> Digest {
    let mut parts = Vec::with_capacity(5 + 3 * block.transactions.len());
    parts.push(digest(&block.id));
    parts.push(digest(&block.nonce));
    parts.push(digest(&block.prev_hash));
    parts.push(digest(&block.threshold));
    parts.push(digest(&block.version));
    for tx in &block.transactions {
        parts.extend(transaction_digests(tx));
    }
    parts.sort();
    digest_of_set(&parts)
}

/// Digests of a transaction's `from`, `to` and `amount`.
pub fn transaction_digests(tx: &Transaction) -> [Digest; 3] {
    [digest(&tx.from), digest(&tx.to), digest(&tx.amount)]
}

/// Threshold for a difficulty divisor: `U256::MAX / divisor`, fixed width.
///
/// Returns `None` for a zero divisor.
pub fn threshold_from_divisor(divisor: U256) -> Option<Digest> {
    U256::MAX.checked_div(divisor).map(Digest::from_u256)
}
