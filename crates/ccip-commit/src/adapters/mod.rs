//! # Adapters Layer (Hexagonal Architecture)
//!
//! In-memory implementations of the outbound ports. The static readers and
//! registry serve fixtures and support failure injection; the hasher and
//! codec are the ones used in production rounds.

mod bincode_codec;
mod keccak_hasher;
mod static_chain_reader;
mod static_home_chain;
mod static_token_prices;

pub use bincode_codec::BincodeReportCodec;
pub use keccak_hasher::{Keccak256MessageHasher, LEAF_DOMAIN_SEPARATOR};
pub use static_chain_reader::{ReaderOp, StaticChainReader};
pub use static_home_chain::StaticHomeChain;
pub use static_token_prices::StaticTokenPricesReader;
