//! # Wire Codec
//!
//! JSON payloads published on the `blocks` and `transactions` topics.
//!
//! ```text
//! {"id":"0","nonce":"17","prev_hash":"","threshold":"0000ffff…",
//!  "version":"0.0.1","transactions":[{"from":"…","to":"…","amount":"5"}]}
//! ```
//!
//! `id` and `nonce` are decimal strings. Older peers send `ver` and `charge`
//! instead of `version` and `amount`; both spellings decode. A missing
//! `transactions` array decodes as an empty one.

use crate::entities::{Block, Digest, Transaction};
use crate::errors::WireError;

/// Encode a block payload.
pub fn encode_block(block: &Block) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(block)?)
}

/// Decode a block payload.
///
/// The threshold gates proof-of-work and must be a well-formed digest. The
/// previous hash must be well-formed or empty.
pub fn decode_block(payload: &[u8]) -> Result<Block, WireError> {
    let block: Block = serde_json::from_slice(payload)?;

    Digest::parse("threshold", block.threshold.as_str())?;
    if !block.prev_hash.is_empty() {
        Digest::parse("prev_hash", block.prev_hash.as_str())?;
    }

    Ok(block)
}

/// Encode a transaction payload.
pub fn encode_transaction(tx: &Transaction) -> Result<Vec<u8>, WireError> {
    Ok(serde_json::to_vec(tx)?)
}

/// Decode a transaction payload.
///
/// Account fields are taken verbatim and need not be well-formed digests;
/// transactions are not authenticated.
pub fn decode_transaction(payload: &[u8]) -> Result<Transaction, WireError> {
    Ok(serde_json::from_slice(payload)?)
}
