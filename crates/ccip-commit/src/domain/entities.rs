//! # Domain Entities
//!
//! Round artifacts exchanged between oracle nodes: the per-node observation,
//! the agreed outcome and the report placed on the destination chain.
//!
//! Observations and outcomes travel as JSON blobs. An outcome with nothing
//! agreed is encoded as the empty blob, never as a zero-valued struct.

use super::errors::{CodecError, CommitResult};
use super::value_objects::{
    CCIPMsgBaseDetails, GasPriceChain, MerkleRootChain, PriceUpdates, SeqNumChain, TokenPrice,
};
use serde::{Deserialize, Serialize};
use shared_types::ChainSelector;
use std::collections::BTreeMap;

/// One node's local view for a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPluginObservation {
    /// Messages found above the previous outcome's max sequence numbers.
    pub new_msgs: Vec<CCIPMsgBaseDetails>,
    /// Gas prices of the known source chains.
    pub gas_prices: Vec<GasPriceChain>,
    /// USD prices of the configured fee tokens.
    pub token_prices: Vec<TokenPrice>,
    /// Latest committed sequence number per source chain, as read on the
    /// destination. Empty when the node cannot read the destination.
    pub max_seq_nums: Vec<SeqNumChain>,
    /// Fault tolerance per chain from this node's registry snapshot.
    pub f_chain: BTreeMap<ChainSelector, usize>,
}

impl CommitPluginObservation {
    /// Serialize into an observation blob.
    pub fn encode(&self) -> CommitResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()).into())
    }

    /// Deserialize a peer's observation blob.
    pub fn decode(bytes: &[u8]) -> CommitResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()).into())
    }
}

/// The agreed result of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPluginOutcome {
    /// Agreed committed sequence number per source chain.
    pub max_seq_nums: Vec<SeqNumChain>,
    /// Agreed commitments over new messages.
    pub merkle_roots: Vec<MerkleRootChain>,
    /// Agreed token prices.
    pub token_prices: Vec<TokenPrice>,
    /// Agreed gas prices.
    pub gas_prices: Vec<GasPriceChain>,
}

impl CommitPluginOutcome {
    /// True when the round agreed on nothing.
    pub fn is_empty(&self) -> bool {
        self.max_seq_nums.is_empty()
            && self.merkle_roots.is_empty()
            && self.token_prices.is_empty()
            && self.gas_prices.is_empty()
    }

    /// Serialize the outcome as JSON, including an empty one.
    pub fn encode(&self) -> CommitResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| CodecError::Encode(e.to_string()).into())
    }

    /// Deserialize an outcome produced by [`Self::encode`].
    pub fn decode(bytes: &[u8]) -> CommitResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()).into())
    }

    /// Round blob for this outcome: the empty sentinel when nothing was
    /// agreed, JSON otherwise.
    pub fn to_blob(&self) -> CommitResult<Vec<u8>> {
        if self.is_empty() {
            return Ok(Vec::new());
        }
        self.encode()
    }

    /// Read a previous-outcome blob. `None` for the empty sentinel.
    pub fn from_blob(bytes: &[u8]) -> CommitResult<Option<Self>> {
        if bytes.is_empty() {
            return Ok(None);
        }
        Self::decode(bytes).map(Some)
    }
}

/// The part of an outcome that is placed on-chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitPluginReport {
    /// Merkle roots to commit.
    pub merkle_roots: Vec<MerkleRootChain>,
    /// Token and gas price updates.
    pub price_updates: PriceUpdates,
}

impl CommitPluginReport {
    /// Build the report for an outcome. Sequence numbers are consensus
    /// bookkeeping and are not carried.
    pub fn from_outcome(outcome: &CommitPluginOutcome) -> Self {
        Self {
            merkle_roots: outcome.merkle_roots.clone(),
            price_updates: PriceUpdates {
                token_price_updates: outcome.token_prices.clone(),
                gas_price_updates: outcome.gas_prices.clone(),
            },
        }
    }

    /// True when there is nothing to put on-chain.
    pub fn is_empty(&self) -> bool {
        self.merkle_roots.is_empty() && self.price_updates.is_empty()
    }
}
