//! # Domain Errors
//!
//! Error types for the commit plugin.
//!
//! | Kind | Variant | Effect |
//! |------|---------|--------|
//! | Transient reader failure | `Reader` | phase fails, host retries next round |
//! | Malformed / ineligible peer observation | validation variants | that observation is discarded |
//! | Missing fault-tolerance config | `MissingFChain` | round produces no outcome |
//! | Reader contract mismatch | `ResultCountMismatch` | price phase omitted |

use shared_types::{bytes32_hex, Bytes32, ChainSelector, OracleId, SeqNum, TokenId};
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the chain and token-price readers.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReaderError {
    /// RPC call against a chain failed.
    #[error("RPC failure on chain {chain}: {reason}")]
    Rpc {
        /// Chain the call was made against
        chain: ChainSelector,
        /// Underlying failure
        reason: String,
    },

    /// The reader has no writer/contract binding for this chain.
    #[error("No chain writer bound for chain {0}")]
    ChainWriterNotFound(ChainSelector),

    /// The reader does not know this chain.
    #[error("Unsupported chain: {0}")]
    UnsupportedChain(ChainSelector),

    /// The read did not complete before its deadline.
    #[error("Read timed out after {0:?}")]
    Timeout(Duration),
}

/// Report/observation codec errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Serialization failed.
    #[error("Encode failed: {0}")]
    Encode(String),

    /// Deserialization failed.
    #[error("Decode failed: {0}")]
    Decode(String),
}

/// Invalid plugin configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Message scan batch size must be positive.
    #[error("new_msg_scan_batch_size must be greater than zero")]
    ZeroScanBatchSize,

    /// A duration setting is zero.
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),

    /// Tokens are configured but no price chain is set, or vice versa.
    #[error("tokens_to_query requires price_fee_chain to be set")]
    TokensWithoutPriceChain,

    /// The same token is configured twice.
    #[error("Duplicate token in tokens_to_query: {0}")]
    DuplicateToken(TokenId),
}

/// Commit plugin error types.
#[derive(Debug, Error)]
pub enum CommitError {
    /// Chain or price reader failure.
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderError),

    /// Encoding or decoding failure.
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    /// Invalid configuration.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A reader returned a different number of results than requested.
    #[error("Result count mismatch for {what}: requested {requested}, got {got}")]
    ResultCountMismatch {
        /// What was being read
        what: &'static str,
        /// Number of items requested
        requested: usize,
        /// Number of items returned
        got: usize,
    },

    /// Chain reported twice in an observation's max sequence numbers.
    #[error("Duplicate max sequence number for chain {chain}")]
    DuplicateMaxSeqNum {
        /// Offending chain
        chain: ChainSelector,
    },

    /// Sequence number reported twice for the same source chain.
    #[error("Duplicate message sequence number {seq_num} on chain {chain}")]
    DuplicateMsgSeqNum {
        /// Source chain
        chain: ChainSelector,
        /// Repeated sequence number
        seq_num: SeqNum,
    },

    /// Message hash reported twice within one observation.
    #[error("Duplicate message hash {}", bytes32_hex(.0))]
    DuplicateMsgHash(Bytes32),

    /// Message is not newer than the observer's own max sequence number.
    #[error("Message seq num {seq_num} on chain {chain} is not above observed max {max}")]
    MsgSeqNumNotAboveMax {
        /// Source chain
        chain: ChainSelector,
        /// Message sequence number
        seq_num: SeqNum,
        /// Max reported by the same observer
        max: SeqNum,
    },

    /// Message chain has no entry in the observer's max sequence numbers.
    #[error("No max sequence number observed for chain {chain}")]
    MaxSeqNumNotFound {
        /// Source chain
        chain: ChainSelector,
    },

    /// Observer is not in the home-chain registry.
    #[error("Observer {observer} not found in registry")]
    ObserverNotFound {
        /// Oracle index
        observer: OracleId,
    },

    /// Observer reported sequence numbers without being a destination writer.
    #[error("Observer {observer} reported sequence numbers but is not a writer")]
    ObserverNotWriter {
        /// Oracle index
        observer: OracleId,
    },

    /// Observer reported messages from a chain it is not allowed to read.
    #[error("Observer {observer} is not allowed to read chain {chain}")]
    ChainNotReadable {
        /// Oracle index
        observer: OracleId,
        /// Source chain of the offending message
        chain: ChainSelector,
    },

    /// Token price reported twice.
    #[error("Duplicate token price for {0}")]
    DuplicateTokenPrice(TokenId),

    /// Token price entry without a value.
    #[error("Empty token price for {0}")]
    EmptyTokenPrice(TokenId),

    /// Gas price reported twice.
    #[error("Duplicate gas price for chain {0}")]
    DuplicateGasPrice(ChainSelector),

    /// Gas price entry without a value.
    #[error("Empty gas price for chain {0}")]
    EmptyGasPrice(ChainSelector),

    /// No agreed fault-tolerance value for a chain the round depends on.
    #[error("No f configured for chain {chain}")]
    MissingFChain {
        /// Chain without an agreed f
        chain: ChainSelector,
    },

    /// Fewer valid observations than the round quorum.
    #[error("Insufficient observations: got {got}, need {required}")]
    InsufficientObservations {
        /// Observations received
        got: usize,
        /// 2f+1 of the destination chain
        required: usize,
    },
}

impl CommitError {
    /// Short stable label, used for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Reader(_) => "reader",
            Self::Codec(_) => "codec",
            Self::Config(_) => "config",
            Self::ResultCountMismatch { .. } => "result_count_mismatch",
            Self::DuplicateMaxSeqNum { .. } => "duplicate_max_seq_num",
            Self::DuplicateMsgSeqNum { .. } => "duplicate_msg_seq_num",
            Self::DuplicateMsgHash(_) => "duplicate_msg_hash",
            Self::MsgSeqNumNotAboveMax { .. } => "msg_seq_num_not_above_max",
            Self::MaxSeqNumNotFound { .. } => "max_seq_num_not_found",
            Self::ObserverNotFound { .. } => "observer_not_found",
            Self::ObserverNotWriter { .. } => "observer_not_writer",
            Self::ChainNotReadable { .. } => "chain_not_readable",
            Self::DuplicateTokenPrice(_) => "duplicate_token_price",
            Self::EmptyTokenPrice(_) => "empty_token_price",
            Self::DuplicateGasPrice(_) => "duplicate_gas_price",
            Self::EmptyGasPrice(_) => "empty_gas_price",
            Self::MissingFChain { .. } => "missing_f_chain",
            Self::InsufficientObservations { .. } => "insufficient_observations",
        }
    }
}

/// Result type for commit plugin operations
pub type CommitResult<T> = Result<T, CommitError>;
