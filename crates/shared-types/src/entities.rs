//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Digests**: `Digest`, the fixed-width hex fingerprint used for hashes
//!   and difficulty thresholds alike
//! - **Chain**: `Block`, `Transaction`

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::WireError;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

// =============================================================================
// CLUSTER A: DIGESTS
// =============================================================================

/// Lowercase hex encoding of a SHA-256 output.
///
/// Well-formed digests are exactly [`Digest::HEX_LEN`] characters long, which
/// makes the derived (byte-wise) ordering identical to the ordering of the
/// 256-bit integers they encode. Two exceptions are accepted: the empty
/// `prev_hash` of the genesis round, and the `from`/`to` account fields of a
/// transaction, which are decoded verbatim and may hold any string. Neither
/// is ever compared against a threshold.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Digest(String);

impl Digest {
    /// Length of a well-formed digest in hex characters.
    pub const HEX_LEN: usize = 64;

    /// The empty digest (genesis `prev_hash`).
    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Wrap a hex string produced by a trusted encoder.
    ///
    /// No validation is performed; use [`Digest::parse`] for untrusted input.
    #[must_use]
    pub fn from_hex_unchecked(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Parse an untrusted string, requiring 64 lowercase hex characters.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, WireError> {
        let digest = Self(value.to_owned());
        if digest.is_well_formed() {
            Ok(digest)
        } else {
            Err(WireError::MalformedDigest {
                field,
                value: value.to_owned(),
            })
        }
    }

    /// Fixed-width encoding of a 256-bit integer.
    #[must_use]
    pub fn from_u256(value: U256) -> Self {
        let mut bytes = [0u8; 32];
        value.to_big_endian(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Numeric value of a well-formed digest.
    #[must_use]
    pub fn to_u256(&self) -> Option<U256> {
        if !self.is_well_formed() {
            return None;
        }
        let bytes = hex::decode(&self.0).ok()?;
        Some(U256::from_big_endian(&bytes))
    }

    /// True when the digest is 64 lowercase hex characters.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::HEX_LEN
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Digest {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// =============================================================================
// CLUSTER B: THE CHAIN
// =============================================================================

/// A value transfer between two account digests.
///
/// Transactions are never authenticated: whatever arrives is appended to the
/// pending block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Sender account.
    pub from: Digest,
    /// Recipient account.
    pub to: Digest,
    /// Transferred amount, kept verbatim.
    #[serde(alias = "charge")]
    pub amount: String,
}

impl Transaction {
    pub fn new(from: Digest, to: Digest, amount: impl Into<String>) -> Self {
        Self {
            from,
            to,
            amount: amount.into(),
        }
    }
}

/// A block at chain position `id`.
///
/// `id` is a position counter, not a content hash. The content fingerprint is
/// computed by the digest engine over every field, nonce included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Chain position of this block.
    #[serde(with = "decimal_u256")]
    pub id: U256,
    /// Proof-of-work nonce.
    #[serde(with = "decimal_u256")]
    pub nonce: U256,
    /// Digest of the block this one extends (empty for the first round).
    pub prev_hash: Digest,
    /// Largest acceptable block digest.
    pub threshold: Digest,
    /// Chain protocol version.
    #[serde(alias = "ver")]
    pub version: String,
    /// Transactions in arrival order.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// The first pending block of a chain.
    pub fn genesis(threshold: Digest, version: impl Into<String>) -> Self {
        Self {
            id: U256::zero(),
            nonce: U256::zero(),
            prev_hash: Digest::empty(),
            threshold,
            version: version.into(),
            transactions: Vec::new(),
        }
    }

    /// Copy of this block carrying `nonce`.
    #[must_use]
    pub fn with_nonce(&self, nonce: U256) -> Self {
        Self {
            nonce,
            ..self.clone()
        }
    }
}

/// Serde adapter encoding a `U256` as a decimal string.
mod decimal_u256 {
    use primitive_types::U256;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let raw = String::deserialize(deserializer)?;
        U256::from_dec_str(&raw)
            .map_err(|e| D::Error::custom(format!("invalid decimal u256 {raw:?}: {e:?}")))
    }
}
