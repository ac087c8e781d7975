//! # Block Production (sc-03)
//!
//! A pool of miner threads searching disjoint slices of the nonce space for a
//! nonce that puts the pending block's digest below its threshold.
//!
//! ## Search Loop
//!
//! ```text
//! loop until cancelled:
//!     snapshot = chain_state.snapshot()
//!     nonce    = range.start + offset
//!     d        = snapshot.digests.speculative(digest(nonce))
//!     if d < snapshot.block.threshold:
//!         outbound_blocks.push(snapshot.block.with_nonce(nonce))
//!     offset   = (offset + 1) mod delta
//! ```
//!
//! The speculative digest inserts `digest(nonce)` into the sorted digest set
//! without copying it, so a candidate costs one SHA-256 over the set.
//!
//! ## Critical Invariants
//!
//! 1. **Disjoint Ranges**: thread `i` of `N` owns `[i·delta, (i+1)·delta)`
//!    with `delta = U256::MAX / N`.
//! 2. **Read Only**: miners never advance the chain. A winner is pushed to the
//!    outbound-block queue and counts only once it comes back through the
//!    transport.
//! 3. **No Coordination**: a winner does not stop its siblings. Late winners
//!    for a closed round are discarded by the round id check.

#![warn(clippy::all)]

pub mod error;
pub mod metrics;
pub mod miner;
pub mod nonce_range;

pub use error::{MiningError, Result};
pub use metrics::MiningMetrics;
pub use miner::MinerPool;
pub use nonce_range::NonceRange;
