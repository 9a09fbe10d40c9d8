//! Static Token Prices Adapter

use crate::domain::ReaderError;
use crate::ports::outbound::TokenPricesReader;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{BigInt, TokenId};
use std::collections::BTreeMap;

/// Token price reader serving fixed USD prices.
///
/// Tokens without a fixture are left out of the result, so asking for one
/// returns fewer prices than requested.
#[derive(Default)]
pub struct StaticTokenPricesReader {
    prices: RwLock<BTreeMap<TokenId, BigInt>>,
    failure: RwLock<Option<ReaderError>>,
}

impl StaticTokenPricesReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token price.
    pub fn with_price(self, token: impl Into<TokenId>, price: impl Into<BigInt>) -> Self {
        self.set_price(token, price);
        self
    }

    /// Update a token price.
    pub fn set_price(&self, token: impl Into<TokenId>, price: impl Into<BigInt>) {
        self.prices.write().insert(token.into(), price.into());
    }

    /// Fail every call with `err` (or stop failing with `None`).
    pub fn set_failure(&self, err: Option<ReaderError>) {
        *self.failure.write() = err;
    }
}

#[async_trait]
impl TokenPricesReader for StaticTokenPricesReader {
    async fn get_token_prices_usd(&self, tokens: &[TokenId]) -> Result<Vec<BigInt>, ReaderError> {
        let failure = self.failure.read().clone();
        if let Some(err) = failure {
            return Err(err);
        }
        let prices = self.prices.read();
        Ok(tokens.iter().filter_map(|t| prices.get(t).copied()).collect())
    }
}
