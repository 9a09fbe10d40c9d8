//! # Domain Value Objects
//!
//! Immutable value types carried inside observations, outcomes and reports.

use serde::{Deserialize, Serialize};
use shared_types::{BigInt, Bytes32, ChainSelector, SeqNum, SeqNumRange, TokenId};
use std::collections::BTreeSet;

/// A sequence number scoped to a source chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeqNumChain {
    /// Source chain.
    pub chain_sel: ChainSelector,
    /// Sequence number on that chain.
    pub seq_num: SeqNum,
}

impl SeqNumChain {
    /// Create a new chain-scoped sequence number.
    pub fn new(chain_sel: ChainSelector, seq_num: SeqNum) -> Self {
        Self { chain_sel, seq_num }
    }
}

/// Commitment to a contiguous run of messages from one source chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MerkleRootChain {
    /// Source chain.
    pub chain_sel: ChainSelector,
    /// Committed sequence numbers, inclusive.
    pub seq_nums_range: SeqNumRange,
    /// Root of the merkle tree over the message hashes in range order.
    pub merkle_root: Bytes32,
}

impl MerkleRootChain {
    /// Create a new merkle root entry.
    pub fn new(chain_sel: ChainSelector, seq_nums_range: SeqNumRange, merkle_root: Bytes32) -> Self {
        Self {
            chain_sel,
            seq_nums_range,
            merkle_root,
        }
    }
}

/// USD price of a fee token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPrice {
    /// Token account.
    pub token_id: TokenId,
    /// Price, absent if the observer sent none.
    pub price: BigInt,
}

impl TokenPrice {
    /// Create a new token price.
    pub fn new(token_id: impl Into<TokenId>, price: impl Into<BigInt>) -> Self {
        Self {
            token_id: token_id.into(),
            price: price.into(),
        }
    }
}

/// Gas price of a chain.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GasPriceChain {
    /// Chain the price applies to.
    pub chain_sel: ChainSelector,
    /// Price, absent if the observer sent none.
    pub gas_price: BigInt,
}

impl GasPriceChain {
    /// Create a new gas price entry.
    pub fn new(chain_sel: ChainSelector, gas_price: impl Into<BigInt>) -> Self {
        Self {
            chain_sel,
            gas_price: gas_price.into(),
        }
    }
}

/// Price updates carried by a report.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceUpdates {
    /// Token price updates.
    pub token_price_updates: Vec<TokenPrice>,
    /// Gas price updates.
    pub gas_price_updates: Vec<GasPriceChain>,
}

impl PriceUpdates {
    /// True when neither token nor gas prices are present.
    pub fn is_empty(&self) -> bool {
        self.token_price_updates.is_empty() && self.gas_price_updates.is_empty()
    }
}

/// What a given oracle is registered to observe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObserverInfo {
    /// Registered writer on the destination chain.
    pub writer: bool,
    /// Chains the oracle is allowed to read.
    pub reads: BTreeSet<ChainSelector>,
}

impl ObserverInfo {
    /// Create a registry entry.
    pub fn new(writer: bool, reads: impl IntoIterator<Item = ChainSelector>) -> Self {
        Self {
            writer,
            reads: reads.into_iter().collect(),
        }
    }

    /// Whether the oracle may read `chain`.
    pub fn can_read(&self, chain: ChainSelector) -> bool {
        self.reads.contains(&chain)
    }
}

/// Identity fields of a cross-chain message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CCIPMsgHeader {
    /// Message id.
    pub id: Bytes32,
    /// Chain the message was sent from.
    pub source_chain: ChainSelector,
    /// Sequence number on the source chain.
    pub seq_num: SeqNum,
}

/// A cross-chain message as returned by the chain reader.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CCIPMsg {
    /// Identity fields.
    pub header: CCIPMsgHeader,
    /// Sender address on the source chain.
    pub sender: Vec<u8>,
    /// Receiver address on the destination chain.
    pub receiver: Vec<u8>,
    /// Opaque payload.
    pub data: Vec<u8>,
}

impl CCIPMsg {
    /// Message with an empty payload, mostly useful for fixtures.
    pub fn new(id: Bytes32, source_chain: ChainSelector, seq_num: SeqNum) -> Self {
        Self {
            header: CCIPMsgHeader {
                id,
                source_chain,
                seq_num,
            },
            ..Default::default()
        }
    }
}

/// Observed message identity plus its hash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CCIPMsgBaseDetails {
    /// Message id.
    pub id: Bytes32,
    /// Chain the message was sent from.
    pub source_chain: ChainSelector,
    /// Sequence number on the source chain.
    pub seq_num: SeqNum,
    /// Leaf hash produced by the message hasher.
    pub msg_hash: Bytes32,
}

impl CCIPMsgBaseDetails {
    /// Create observed message details.
    pub fn new(id: Bytes32, source_chain: ChainSelector, seq_num: SeqNum, msg_hash: Bytes32) -> Self {
        Self {
            id,
            source_chain,
            seq_num,
            msg_hash,
        }
    }
}
