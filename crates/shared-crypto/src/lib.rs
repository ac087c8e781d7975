//! # Shared Crypto - Digest Engine
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, hex | Canonical digests of values and blocks |
//! | `digest_set` | SHA-256 over sorted digests | Incremental block fingerprint |
//!
//! ## Properties
//!
//! - **Deterministic**: the digest of a value depends only on its canonical
//!   string form.
//! - **Order independent**: a block fingerprint folds a *sorted* set of
//!   component digests, so insertion order never matters.
//! - **Cheap speculation**: [`speculative_digest`] tests one extra component
//!   against a sorted set without cloning or re-sorting it.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod digest_set;
pub mod hashing;

// Re-exports
pub use digest_set::DigestSet;
pub use hashing::{
    block_digest, digest, digest_of_set, speculative_digest, threshold_from_divisor,
    transaction_digests, Canonical,
};
