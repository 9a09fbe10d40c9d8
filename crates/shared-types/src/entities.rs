//! # Chain Primitives
//!
//! Identifiers and numeric types used to describe cross-chain traffic.
//!
//! ## Clusters
//!
//! - **Chains**: `ChainSelector`, `OracleId`
//! - **Ordering**: `SeqNum`, `SeqNumRange`
//! - **Values**: `Bytes32`, `BigInt`, `TokenId`

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all crates
pub use primitive_types::U256;

/// Opaque chain identifier.
pub type ChainSelector = u64;

/// Per-source-chain message counter.
pub type SeqNum = u64;

/// Fixed-width 32-byte value (message ids, message hashes, merkle roots).
pub type Bytes32 = [u8; 32];

/// Index of an oracle node within the committee.
pub type OracleId = u8;

/// Token identifier (an on-chain account/address string).
pub type TokenId = String;

/// Hex rendering of a 32-byte value, `0x`-prefixed.
pub fn bytes32_hex(value: &Bytes32) -> String {
    format!("0x{}", hex::encode(value))
}

/// Inclusive range of sequence numbers `[start, end]`.
///
/// Serialized as a two-element array.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SeqNumRange(SeqNum, SeqNum);

impl SeqNumRange {
    /// Create a range. Bounds are kept as given.
    pub fn new(start: SeqNum, end: SeqNum) -> Self {
        Self(start, end)
    }

    /// First sequence number of the range.
    pub fn start(&self) -> SeqNum {
        self.0
    }

    /// Last sequence number of the range (inclusive).
    pub fn end(&self) -> SeqNum {
        self.1
    }

    /// Whether `seq_num` falls inside the range.
    pub fn contains(&self, seq_num: SeqNum) -> bool {
        self.0 <= seq_num && seq_num <= self.1
    }

    /// Number of sequence numbers covered. Inverted ranges are empty.
    pub fn len(&self) -> u64 {
        if self.1 < self.0 {
            0
        } else {
            self.1 - self.0 + 1
        }
    }

    /// True for inverted ranges.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the two ranges share at least one sequence number.
    pub fn overlaps(&self, other: &SeqNumRange) -> bool {
        !self.is_empty() && !other.is_empty() && self.0 <= other.1 && other.0 <= self.1
    }

    /// Iterate every sequence number in the range.
    pub fn iter(&self) -> impl Iterator<Item = SeqNum> {
        self.0..=self.1
    }
}

impl fmt::Display for SeqNumRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} -> {}]", self.0, self.1)
    }
}

/// Arbitrary precision (256-bit) unsigned integer that may be absent.
///
/// Prices arrive from peers over the wire; an absent value must survive
/// decoding so validation can reject it instead of reading it as zero.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BigInt(Option<U256>);

impl BigInt {
    /// Wrap a present value.
    pub fn new(value: U256) -> Self {
        Self(Some(value))
    }

    /// The absent value.
    pub fn empty() -> Self {
        Self(None)
    }

    /// True when no value is present.
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    /// The wrapped value, if any.
    pub fn value(&self) -> Option<U256> {
        self.0
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::new(U256::from(value))
    }
}

impl From<U256> for BigInt {
    fn from(value: U256) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "<nil>"),
        }
    }
}
