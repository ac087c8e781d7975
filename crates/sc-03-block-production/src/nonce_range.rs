//! Partition of the nonce space between miner threads.

use crate::error::{MiningError, Result};
use shared_types::U256;

/// Slice `[start, start + delta)` of the nonce space owned by one miner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NonceRange {
    /// Miner index, `0..N`
    pub index: usize,
    /// First nonce of the slice
    pub start: U256,
    /// Width of every slice, `U256::MAX / N`
    pub delta: U256,
}

impl NonceRange {
    /// Split the nonce space into `threads` equal, contiguous slices.
    ///
    /// The remainder of `U256::MAX / threads` (at most `threads` nonces at
    /// the very top of the space) is left unsearched.
    pub fn partition(threads: usize) -> Result<Vec<NonceRange>> {
        if threads == 0 {
            return Err(MiningError::NoThreads);
        }
        let delta = U256::MAX / U256::from(threads);
        Ok((0..threads)
            .map(|index| NonceRange {
                index,
                start: delta * U256::from(index),
                delta,
            })
            .collect())
    }

    /// One past the last nonce of the slice.
    pub fn end(&self) -> U256 {
        self.start + self.delta
    }

    /// Nonce at `offset`. Requires `offset < delta`.
    pub fn nonce(&self, offset: U256) -> U256 {
        debug_assert!(offset < self.delta);
        self.start + offset
    }

    /// Offset following `offset`, wrapping to zero at the end of the slice.
    pub fn next_offset(&self, offset: U256) -> U256 {
        let next = offset + U256::one();
        if next >= self.delta {
            U256::zero()
        } else {
            next
        }
    }

    pub fn contains(&self, nonce: U256) -> bool {
        nonce >= self.start && nonce < self.end()
    }
}
