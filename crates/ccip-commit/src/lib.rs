//! # ccip-commit
//!
//! Commit plugin of a cross-chain interoperability oracle network.
//!
//! ## Overview
//!
//! Each round, every oracle node observes source-chain messages not yet
//! committed on the destination chain, plus token and gas prices. The
//! plugin turns a set of such observations into one agreed outcome:
//! - **Merkle roots**: one root per source chain over a contiguous message range
//! - **Sequence numbers**: the agreed on-chain max per source chain
//! - **Prices**: median token and gas prices, gated on a `2f+1` quorum
//!
//! The consensus runtime (round scheduling, networking, signing) lives
//! outside this crate. It drives the plugin through [`ReportingPlugin`].
//!
//! ## Architecture
//!
//! ```text
//! Host runtime ──ReportingPlugin──→ CommitPlugin
//!                                       │
//!                                       ├── ChainReader ──→ source / dest chains
//!                                       ├── TokenPricesReader ──→ price feeds
//!                                       ├── HomeChain ──→ registry (f, observers)
//!                                       ├── MessageHasher (Keccak256 leaves)
//!                                       └── ReportCodec (on-chain report bytes)
//! ```
//!
//! ## Determinism
//!
//! Every node must derive the same outcome from the same observations.
//! Tallies use ordered maps, ties resolve to the smallest key, and the
//! outcome step performs no I/O.
//!
//! ## Example
//!
//! ```rust,ignore
//! use ccip_commit::{CommitPlugin, CommitPluginConfig, ReportingPlugin};
//!
//! let plugin = CommitPlugin::new(
//!     oracle_id,
//!     CommitPluginConfig::for_dest_chain(dest),
//!     chain_reader,
//!     token_prices_reader,
//!     msg_hasher,
//!     report_codec,
//!     home_chain,
//! )?;
//!
//! let observation = plugin.observation(&ctx, &query).await?;
//! ```

pub mod adapters;
pub mod algorithms;
pub mod config;
pub mod domain;
pub mod metrics;
pub mod ports;
pub mod service;

pub use config::CommitPluginConfig;
pub use domain::{
    CCIPMsg, CCIPMsgBaseDetails, CommitError, CommitPluginObservation, CommitPluginOutcome,
    CommitPluginReport, CommitResult, GasPriceChain, MerkleRootChain, ObserverInfo, PriceUpdates,
    ReaderError, SeqNumChain, TokenPrice,
};
pub use ports::inbound::ReportingPlugin;
pub use ports::outbound::{ChainReader, HomeChain, MessageHasher, ReportCodec, TokenPricesReader};
pub use service::CommitPlugin;
