//! Static Chain Reader Adapter
//!
//! Implements `ChainReader` over in-memory fixtures.

use crate::domain::{CCIPMsg, ReaderError};
use crate::ports::outbound::ChainReader;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{BigInt, ChainSelector, SeqNum, SeqNumRange};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// Reader operation, used to target failure injection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReaderOp {
    /// `next_seq_num`
    NextSeqNum,
    /// `msgs_between_seq_nums`
    Msgs,
    /// `gas_prices`
    GasPrices,
    /// `sync`
    Sync,
}

/// Chain reader serving fixed chain state.
///
/// Unknown chains yield `ReaderError::UnsupportedChain`.
#[derive(Default)]
pub struct StaticChainReader {
    seq_nums: RwLock<BTreeMap<ChainSelector, SeqNum>>,
    msgs: RwLock<BTreeMap<ChainSelector, Vec<CCIPMsg>>>,
    gas_prices: RwLock<BTreeMap<ChainSelector, BigInt>>,
    failures: RwLock<BTreeMap<ReaderOp, ReaderError>>,
    latency: RwLock<Option<Duration>>,
    sync_calls: AtomicUsize,
}

impl StaticChainReader {
    /// Create an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the committed sequence number of a source chain.
    pub fn with_seq_num(self, chain: ChainSelector, seq_num: SeqNum) -> Self {
        self.set_seq_num(chain, seq_num);
        self
    }

    /// Add messages sent from a source chain.
    pub fn with_msgs(self, chain: ChainSelector, msgs: Vec<CCIPMsg>) -> Self {
        self.push_msgs(chain, msgs);
        self
    }

    /// Set the gas price of a chain.
    pub fn with_gas_price(self, chain: ChainSelector, price: impl Into<BigInt>) -> Self {
        self.set_gas_price(chain, price);
        self
    }

    /// Update the committed sequence number, e.g. after a commit lands.
    pub fn set_seq_num(&self, chain: ChainSelector, seq_num: SeqNum) {
        self.seq_nums.write().insert(chain, seq_num);
    }

    /// Append messages sent from a source chain.
    pub fn push_msgs(&self, chain: ChainSelector, msgs: Vec<CCIPMsg>) {
        self.msgs.write().entry(chain).or_default().extend(msgs);
    }

    /// Update the gas price of a chain.
    pub fn set_gas_price(&self, chain: ChainSelector, price: impl Into<BigInt>) {
        self.gas_prices.write().insert(chain, price.into());
    }

    /// Make every call of `op` fail with `err` until cleared.
    pub fn fail(&self, op: ReaderOp, err: ReaderError) {
        self.failures.write().insert(op, err);
    }

    /// Stop failing `op`.
    pub fn clear_failure(&self, op: ReaderOp) {
        self.failures.write().remove(&op);
    }

    /// Delay every call by `latency`.
    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }

    /// Number of completed `sync` calls.
    pub fn sync_count(&self) -> usize {
        self.sync_calls.load(Ordering::SeqCst)
    }

    async fn enter(&self, op: ReaderOp) -> Result<(), ReaderError> {
        let latency = *self.latency.read();
        if let Some(delay) = latency {
            tokio::time::sleep(delay).await;
        }
        let failure = self.failures.read().get(&op).cloned();
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ChainReader for StaticChainReader {
    async fn next_seq_num(&self, chains: &[ChainSelector]) -> Result<Vec<SeqNum>, ReaderError> {
        self.enter(ReaderOp::NextSeqNum).await?;
        let seq_nums = self.seq_nums.read();
        chains
            .iter()
            .map(|c| seq_nums.get(c).copied().ok_or(ReaderError::UnsupportedChain(*c)))
            .collect()
    }

    async fn msgs_between_seq_nums(
        &self,
        chain: ChainSelector,
        range: SeqNumRange,
    ) -> Result<Vec<CCIPMsg>, ReaderError> {
        self.enter(ReaderOp::Msgs).await?;
        debug!("[commit] Static reader scanning chain {} range {}", chain, range);
        let msgs = self.msgs.read();
        Ok(msgs
            .get(&chain)
            .map(|all| {
                all.iter()
                    .filter(|m| range.contains(m.header.seq_num))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn gas_prices(&self, chains: &[ChainSelector]) -> Result<Vec<BigInt>, ReaderError> {
        self.enter(ReaderOp::GasPrices).await?;
        let prices = self.gas_prices.read();
        chains
            .iter()
            .map(|c| prices.get(c).copied().ok_or(ReaderError::UnsupportedChain(*c)))
            .collect()
    }

    async fn sync(&self) -> Result<(), ReaderError> {
        self.enter(ReaderOp::Sync).await?;
        self.sync_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
