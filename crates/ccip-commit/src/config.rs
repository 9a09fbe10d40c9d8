//! Commit plugin configuration.

use crate::domain::ConfigError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use shared_types::{ChainSelector, TokenId};
use std::collections::BTreeSet;
use std::time::Duration;

/// Commit plugin configuration.
///
/// Durations are expressed in whole seconds when serialized. Missing fields
/// take their default.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommitPluginConfig {
    /// Chain messages are committed to.
    pub dest_chain: ChainSelector,
    /// Chain token prices are read from. Nodes that cannot read it report
    /// no token prices.
    pub price_fee_chain: Option<ChainSelector>,
    /// Fee tokens to price.
    pub tokens_to_query: Vec<TokenId>,
    /// Messages scanned per source chain and round.
    pub new_msg_scan_batch_size: u64,
    /// Interval between background reader syncs.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub sync_frequency: Duration,
    /// Deadline of one background sync attempt.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub sync_timeout: Duration,
    /// Deadline of every chain or price read during observation.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub reader_timeout: Duration,
    /// How long `close` waits for the background task.
    #[serde_as(as = "DurationSeconds<u64>")]
    pub shutdown_timeout: Duration,
}

impl Default for CommitPluginConfig {
    fn default() -> Self {
        Self {
            dest_chain: 0,
            price_fee_chain: None,
            tokens_to_query: Vec::new(),
            new_msg_scan_batch_size: 256,
            sync_frequency: Duration::from_secs(10),
            sync_timeout: Duration::from_secs(3),
            reader_timeout: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(5),
        }
    }
}

impl CommitPluginConfig {
    /// Default configuration for a destination chain.
    pub fn for_dest_chain(dest_chain: ChainSelector) -> Self {
        Self {
            dest_chain,
            ..Self::default()
        }
    }

    /// Check the configuration before a plugin is built from it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.new_msg_scan_batch_size == 0 {
            return Err(ConfigError::ZeroScanBatchSize);
        }

        let durations = [
            ("sync_frequency", self.sync_frequency),
            ("sync_timeout", self.sync_timeout),
            ("reader_timeout", self.reader_timeout),
            ("shutdown_timeout", self.shutdown_timeout),
        ];
        for (name, value) in durations {
            if value.is_zero() {
                return Err(ConfigError::ZeroDuration(name));
            }
        }

        if !self.tokens_to_query.is_empty() && self.price_fee_chain.is_none() {
            return Err(ConfigError::TokensWithoutPriceChain);
        }

        let mut seen = BTreeSet::new();
        for token in &self.tokens_to_query {
            if !seen.insert(token) {
                return Err(ConfigError::DuplicateToken(token.clone()));
            }
        }

        Ok(())
    }
}
