//! # Chain State (sc-01)
//!
//! The single pending block the node is trying to extend, plus the sorted
//! digest set that fingerprints it.
//!
//! ## Access Discipline
//!
//! ```text
//!   miners (N) ──snapshot()──────────→ ┌──────────────┐
//!                                      │  ChainState  │  RwLock
//!   inbound blocks ──try_advance()───→ │  block       │
//!   inbound txs ──append_transaction()→│  digests     │
//!                                      └──────────────┘
//! ```
//!
//! - Miners only read, under the shared lock.
//! - `try_advance` is the only way the chain moves forward and is called only
//!   by the inbound-block consumer. Its id check makes a second winner for
//!   the same round a no-op.
//! - `append_transaction` never touches `id` or `prev_hash`.
//! - The accepted-block ledger has its own lock; reading it never stalls
//!   the round.
//!
//! ## Known Limitation
//!
//! Advancing clears the pending transactions. Transactions that arrived for a
//! round that a peer closed are discarded, not carried into the next round.

#![warn(clippy::all)]

mod entities;
mod state;

pub use entities::{AcceptedBlock, AdvanceOutcome, GenesisParams, Snapshot};
pub use state::ChainState;
