//! Keccak-256 Message Hasher
//!
//! Leaf hash used in merkle roots:
//!
//! ```text
//! keccak256(LEAF_DOMAIN_SEPARATOR || id || source_chain || seq_num
//!           || keccak256(sender) || keccak256(receiver) || keccak256(data))
//! ```
//!
//! Integers are big-endian. Variable-length fields are hashed first so the
//! preimage has a fixed layout.

use crate::domain::CCIPMsg;
use crate::ports::outbound::MessageHasher;
use sha3::{Digest, Keccak256};
use shared_types::Bytes32;

/// Prefix for leaf hashes, distinct from the internal node separator.
pub const LEAF_DOMAIN_SEPARATOR: Bytes32 = [0u8; 32];

/// Keccak-256 based [`MessageHasher`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Keccak256MessageHasher;

impl Keccak256MessageHasher {
    /// Create a hasher.
    pub fn new() -> Self {
        Self
    }
}

impl MessageHasher for Keccak256MessageHasher {
    fn hash(&self, msg: &CCIPMsg) -> Bytes32 {
        let mut hasher = Keccak256::new();
        hasher.update(LEAF_DOMAIN_SEPARATOR);
        hasher.update(msg.header.id);
        hasher.update(msg.header.source_chain.to_be_bytes());
        hasher.update(msg.header.seq_num.to_be_bytes());
        hasher.update(Keccak256::digest(&msg.sender));
        hasher.update(Keccak256::digest(&msg.receiver));
        hasher.update(Keccak256::digest(&msg.data));
        hasher.finalize().into()
    }
}
