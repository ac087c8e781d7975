//! # Shared Types Crate
//!
//! This crate contains the chain entities exchanged between the node's
//! components and with peers.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Block`, `Transaction` and `Digest` are
//!   defined here and nowhere else.
//! - **Fixed-width digests**: every well-formed [`Digest`] is 64 lowercase hex
//!   characters, so string ordering is numeric ordering.
//! - **Wire boundary**: [`wire`] owns the JSON payload format; decoding never
//!   panics and reports a [`WireError`].

pub mod entities;
pub mod errors;
pub mod wire;

pub use entities::*;
pub use errors::*;
pub use wire::{decode_block, decode_transaction, encode_block, encode_transaction};
