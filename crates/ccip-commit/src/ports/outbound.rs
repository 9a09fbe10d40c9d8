//! # Outbound Ports
//!
//! Collaborators the plugin depends on. Chain I/O is async; hashing,
//! encoding and registry lookups are synchronous.

use crate::domain::{CCIPMsg, CodecError, CommitPluginReport, ObserverInfo, ReaderError};
use async_trait::async_trait;
use shared_types::{BigInt, Bytes32, ChainSelector, OracleId, SeqNum, SeqNumRange, TokenId};
use std::collections::{BTreeMap, BTreeSet};

/// Reads source and destination chain state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Latest committed sequence number per source chain, read on the
    /// destination. One result per requested chain, in request order.
    async fn next_seq_num(&self, chains: &[ChainSelector]) -> Result<Vec<SeqNum>, ReaderError>;

    /// Messages sent from `chain` with sequence numbers in `range`.
    async fn msgs_between_seq_nums(
        &self,
        chain: ChainSelector,
        range: SeqNumRange,
    ) -> Result<Vec<CCIPMsg>, ReaderError>;

    /// Gas price per requested chain, in request order.
    async fn gas_prices(&self, chains: &[ChainSelector]) -> Result<Vec<BigInt>, ReaderError>;

    /// Refresh internal discovery caches.
    async fn sync(&self) -> Result<(), ReaderError>;
}

/// Reads USD token prices.
#[async_trait]
pub trait TokenPricesReader: Send + Sync {
    /// Price per requested token, in request order.
    async fn get_token_prices_usd(&self, tokens: &[TokenId]) -> Result<Vec<BigInt>, ReaderError>;
}

/// Produces the merkle leaf hash of a message.
pub trait MessageHasher: Send + Sync {
    /// Fixed-width digest of `msg`.
    fn hash(&self, msg: &CCIPMsg) -> Bytes32;
}

/// Encodes reports for on-chain submission. `decode(encode(r)) == r`.
pub trait ReportCodec: Send + Sync {
    /// Encode a report.
    fn encode(&self, report: &CommitPluginReport) -> Result<Vec<u8>, CodecError>;

    /// Decode a report produced by [`ReportCodec::encode`].
    fn decode(&self, bytes: &[u8]) -> Result<CommitPluginReport, CodecError>;
}

/// Home-chain registry snapshot.
pub trait HomeChain: Send + Sync {
    /// Registry entry of an oracle, if it has one.
    fn observer_info(&self, oracle: OracleId) -> Option<ObserverInfo>;

    /// Fault tolerance per chain.
    fn f_chain(&self) -> BTreeMap<ChainSelector, usize>;

    /// Every chain the registry knows, destination included.
    fn known_chains(&self) -> BTreeSet<ChainSelector>;
}
