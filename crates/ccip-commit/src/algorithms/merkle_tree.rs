//! # Merkle Tree
//!
//! Binary Keccak-256 tree over message leaf hashes.
//!
//! - internal node: `keccak256(INTERNAL_DOMAIN_SEPARATOR || min(a, b) || max(a, b))`
//! - a node without a sibling is carried up to the next level unchanged
//! - a single leaf is its own root
//!
//! Sorting each pair makes proofs position-independent: a proof is just the
//! list of siblings from leaf to root.

use sha3::{Digest, Keccak256};
use shared_types::Bytes32;

/// Prefix for internal node hashes. Leaves use a different separator (see
/// the message hasher) so a leaf can never be mistaken for a node.
pub const INTERNAL_DOMAIN_SEPARATOR: Bytes32 = {
    let mut sep = [0u8; 32];
    sep[31] = 1;
    sep
};

fn hash_pair(a: &Bytes32, b: &Bytes32) -> Bytes32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut hasher = Keccak256::new();
    hasher.update(INTERNAL_DOMAIN_SEPARATOR);
    hasher.update(lo);
    hasher.update(hi);
    hasher.finalize().into()
}

/// A fully materialized tree, level 0 being the leaves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MerkleTree {
    layers: Vec<Vec<Bytes32>>,
}

impl MerkleTree {
    /// Build a tree over ordered leaves. `None` when there are no leaves.
    pub fn new(leaves: Vec<Bytes32>) -> Option<Self> {
        if leaves.is_empty() {
            return None;
        }

        let mut layers = vec![leaves];
        while let Some(level) = layers.last() {
            if level.len() == 1 {
                break;
            }
            let next: Vec<Bytes32> = level
                .chunks(2)
                .map(|pair| match pair {
                    [a, b] => hash_pair(a, b),
                    _ => pair[0],
                })
                .collect();
            layers.push(next);
        }

        Some(Self { layers })
    }

    /// Root hash.
    pub fn root(&self) -> Bytes32 {
        // Construction guarantees a non-empty top layer.
        self.layers
            .last()
            .and_then(|top| top.first())
            .copied()
            .unwrap_or_default()
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.layers.first().map_or(0, Vec::len)
    }

    /// Sibling path for the leaf at `index`, or `None` if out of range.
    pub fn proof(&self, index: usize) -> Option<Vec<Bytes32>> {
        if index >= self.leaf_count() {
            return None;
        }

        let mut path = Vec::new();
        let mut idx = index;
        for level in &self.layers[..self.layers.len() - 1] {
            let sibling = idx ^ 1;
            if sibling < level.len() {
                path.push(level[sibling]);
            }
            idx /= 2;
        }
        Some(path)
    }
}

/// Check that `leaf` is committed to by `root` through `proof`.
pub fn verify_proof(root: &Bytes32, leaf: &Bytes32, proof: &[Bytes32]) -> bool {
    let computed = proof.iter().fold(*leaf, |acc, sibling| hash_pair(&acc, sibling));
    computed == *root
}
