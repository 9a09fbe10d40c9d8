//! # Algorithms Module
//!
//! Deterministic aggregation of validated observations into one outcome.
//!
//! Everything here is pure and single-threaded: same observations in, same
//! bytes out, on every node. Maps are `BTreeMap` so iteration is by key.

pub mod f_chain;
pub mod merkle_roots;
pub mod merkle_tree;
pub mod prices;
pub mod seq_nums;
mod tally;

pub use f_chain::f_chain_consensus;
pub use merkle_roots::new_msgs_consensus;
pub use merkle_tree::{verify_proof, MerkleTree, INTERNAL_DOMAIN_SEPARATOR};
pub use prices::{gas_prices_consensus, quorum, token_prices_consensus};
pub use seq_nums::max_seq_nums_consensus;
