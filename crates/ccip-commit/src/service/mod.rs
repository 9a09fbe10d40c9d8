//! # Commit Plugin Service
//!
//! Implements the `ReportingPlugin` port.
//!
//! ## Round Flow
//!
//! ```text
//! previous outcome ──→ observation ──→ [host exchange] ──→ validate (per peer)
//!                                                              │
//!          next round ←── reports ←── outcome ←────────────────┘
//!                            │
//!                            └──→ should_accept ──→ should_transmit ──→ transmit
//! ```
//!
//! Registry facts (who reads what, f per chain) enter a round through the
//! node's own observation and the peer admission check only. The outcome
//! step is pure: it reads nothing but the observations it is handed.

mod background;
mod observation;


use crate::algorithms::{
    f_chain_consensus, gas_prices_consensus, max_seq_nums_consensus, new_msgs_consensus, quorum,
    token_prices_consensus,
};
use crate::config::CommitPluginConfig;
use crate::domain::{
    validate_observed_gas_prices, validate_observed_sequence_numbers,
    validate_observed_token_prices, validate_observer_reading_eligibility, CommitError,
    CommitPluginObservation, CommitPluginOutcome, CommitPluginReport, CommitResult,
};
use crate::metrics;
use crate::ports::inbound::ReportingPlugin;
use crate::ports::outbound::{ChainReader, HomeChain, MessageHasher, ReportCodec, TokenPricesReader};
use async_trait::async_trait;
use background::BackgroundSync;
use observation::{
    observe_gas_prices, observe_max_seq_nums, observe_new_msgs, observe_token_prices, with_deadline,
};
use parking_lot::Mutex;
use shared_types::{
    AttributedObservation, ChainSelector, Observation, OracleId, Outcome, OutcomeContext, Query,
    ReportWithInfo,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Commit plugin of one oracle node.
pub struct CommitPlugin<R, P, H, C, K>
where
    R: ChainReader + 'static,
    P: TokenPricesReader,
    H: MessageHasher,
    C: ReportCodec,
    K: HomeChain,
{
    oracle_id: OracleId,
    config: CommitPluginConfig,
    chain_reader: Arc<R>,
    token_prices_reader: Arc<P>,
    msg_hasher: Arc<H>,
    report_codec: Arc<C>,
    home_chain: Arc<K>,
    background: Mutex<Option<BackgroundSync>>,
}

impl<R, P, H, C, K> CommitPlugin<R, P, H, C, K>
where
    R: ChainReader + 'static,
    P: TokenPricesReader,
    H: MessageHasher,
    C: ReportCodec,
    K: HomeChain,
{
    /// Create the plugin for oracle `oracle_id`.
    ///
    /// Starts the background reader sync when called inside a tokio
    /// runtime.
    pub fn new(
        oracle_id: OracleId,
        config: CommitPluginConfig,
        chain_reader: Arc<R>,
        token_prices_reader: Arc<P>,
        msg_hasher: Arc<H>,
        report_codec: Arc<C>,
        home_chain: Arc<K>,
    ) -> CommitResult<Self> {
        config.validate()?;

        let background = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => Some(BackgroundSync::spawn(
                &runtime,
                chain_reader.clone(),
                config.sync_frequency,
                config.sync_timeout,
            )),
            Err(_) => {
                warn!("[commit] No tokio runtime, background reader sync disabled");
                None
            }
        };

        info!(
            "[commit] Oracle {} initialized for destination chain {}",
            oracle_id, config.dest_chain
        );

        Ok(Self {
            oracle_id,
            config,
            chain_reader,
            token_prices_reader,
            msg_hasher,
            report_codec,
            home_chain,
            background: Mutex::new(background),
        })
    }

    /// Oracle index of this node.
    pub fn oracle_id(&self) -> OracleId {
        self.oracle_id
    }

    /// Plugin configuration.
    pub fn config(&self) -> &CommitPluginConfig {
        &self.config
    }

    /// Known chains other than the destination, ascending.
    fn known_source_chains(&self) -> Vec<ChainSelector> {
        self.home_chain
            .known_chains()
            .into_iter()
            .filter(|&c| c != self.config.dest_chain)
            .collect()
    }

    fn check_observation(&self, ao: &AttributedObservation) -> CommitResult<()> {
        let obs = CommitPluginObservation::decode(&ao.observation)?;
        validate_observed_sequence_numbers(&obs.new_msgs, &obs.max_seq_nums)?;
        validate_observer_reading_eligibility(
            ao.observer,
            &obs.new_msgs,
            &obs.max_seq_nums,
            self.home_chain.observer_info(ao.observer).as_ref(),
        )?;
        validate_observed_token_prices(&obs.token_prices)?;
        validate_observed_gas_prices(&obs.gas_prices)?;
        Ok(())
    }

    fn compute_outcome(&self, seq_nr: u64, aos: &[AttributedObservation]) -> CommitResult<CommitPluginOutcome> {
        let observations: Vec<CommitPluginObservation> = aos
            .iter()
            .filter_map(|ao| match CommitPluginObservation::decode(&ao.observation) {
                Ok(obs) => Some(obs),
                Err(e) => {
                    warn!("[commit] Round {}: dropping observation of oracle {}: {}", seq_nr, ao.observer, e);
                    None
                }
            })
            .collect();

        let f_chain = f_chain_consensus(&observations);
        let dest = self.config.dest_chain;
        let f_dest = *f_chain
            .get(&dest)
            .ok_or(CommitError::MissingFChain { chain: dest })?;

        let required = quorum(f_dest);
        if observations.len() < required {
            return Err(CommitError::InsufficientObservations {
                got: observations.len(),
                required,
            });
        }

        let max_seq_nums = max_seq_nums_consensus(f_dest, &observations);
        let merkle_roots = new_msgs_consensus(&max_seq_nums, &observations, &f_chain);
        let token_prices = token_prices_consensus(&observations, f_dest);
        let gas_prices = gas_prices_consensus(&observations, f_dest);

        Ok(CommitPluginOutcome {
            max_seq_nums,
            merkle_roots,
            token_prices,
            gas_prices,
        })
    }
}

#[async_trait]
impl<R, P, H, C, K> ReportingPlugin for CommitPlugin<R, P, H, C, K>
where
    R: ChainReader + 'static,
    P: TokenPricesReader,
    H: MessageHasher,
    C: ReportCodec,
    K: HomeChain,
{
    async fn query(&self, _ctx: &OutcomeContext) -> CommitResult<Query> {
        Ok(Query::new())
    }

    async fn observation(&self, ctx: &OutcomeContext, _query: &Query) -> CommitResult<Observation> {
        let prev = CommitPluginOutcome::from_blob(&ctx.previous_outcome)?;
        let f_chain = self.home_chain.f_chain();
        let mut obs = CommitPluginObservation {
            f_chain,
            ..Default::default()
        };

        let Some(info) = self.home_chain.observer_info(self.oracle_id) else {
            warn!("[commit] Oracle {} has no registry entry, observing nothing", self.oracle_id);
            return obs.encode();
        };

        let deadline = self.config.reader_timeout;
        let source_chains = self.known_source_chains();

        if info.can_read(self.config.dest_chain) {
            obs.max_seq_nums =
                observe_max_seq_nums(self.chain_reader.as_ref(), &source_chains, deadline).await?;
        }

        let Some(prev) = prev else {
            debug!("[commit] Round {}: no previous outcome, skipping message scan", ctx.seq_nr);
            metrics::record_observation();
            return obs.encode();
        };

        obs.new_msgs = observe_new_msgs(
            self.chain_reader.as_ref(),
            self.msg_hasher.as_ref(),
            &prev.max_seq_nums,
            &info,
            self.config.new_msg_scan_batch_size,
            deadline,
        )
        .await?;

        // Commits may have landed since the previous outcome; peers reject
        // messages at or below our own max.
        if !obs.max_seq_nums.is_empty() {
            let own_max: BTreeMap<ChainSelector, u64> = obs
                .max_seq_nums
                .iter()
                .map(|s| (s.chain_sel, s.seq_num))
                .collect();
            obs.new_msgs.retain(|m| {
                own_max
                    .get(&m.source_chain)
                    .map_or(false, |&max| m.seq_num > max)
            });
        }

        if let Some(price_chain) = self.config.price_fee_chain {
            if info.can_read(price_chain) {
                obs.token_prices = match observe_token_prices(
                    self.token_prices_reader.as_ref(),
                    &self.config.tokens_to_query,
                    deadline,
                )
                .await
                {
                    Ok(prices) => prices,
                    Err(e @ CommitError::ResultCountMismatch { .. }) => {
                        warn!("[commit] Round {}: omitting token prices: {}", ctx.seq_nr, e);
                        Vec::new()
                    }
                    Err(e) => return Err(e),
                };
            }
        }

        obs.gas_prices =
            match observe_gas_prices(self.chain_reader.as_ref(), &source_chains, deadline).await {
                Ok(prices) => prices,
                Err(e @ CommitError::ResultCountMismatch { .. }) => {
                    warn!("[commit] Round {}: omitting gas prices: {}", ctx.seq_nr, e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

        info!(
            seq_nr = ctx.seq_nr,
            oracle = self.oracle_id,
            new_msgs = obs.new_msgs.len(),
            max_seq_nums = obs.max_seq_nums.len(),
            token_prices = obs.token_prices.len(),
            gas_prices = obs.gas_prices.len(),
            "[commit] Observation built"
        );
        metrics::record_observation();
        obs.encode()
    }

    fn validate_observation(
        &self,
        ctx: &OutcomeContext,
        _query: &Query,
        ao: &AttributedObservation,
    ) -> CommitResult<()> {
        let res = self.check_observation(ao);
        if let Err(e) = &res {
            warn!(
                "[commit] Round {}: rejecting observation of oracle {}: {}",
                ctx.seq_nr, ao.observer, e
            );
            metrics::record_observation_rejected(e.kind());
        }
        res
    }

    fn outcome(
        &self,
        ctx: &OutcomeContext,
        _query: &Query,
        aos: &[AttributedObservation],
    ) -> CommitResult<Outcome> {
        let outcome = match self.compute_outcome(ctx.seq_nr, aos) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("[commit] Round {}: no outcome: {}", ctx.seq_nr, e);
                metrics::record_outcome("failed", 0);
                return Err(e);
            }
        };

        if outcome.is_empty() {
            info!("[commit] Round {}: nothing agreed", ctx.seq_nr);
            metrics::record_outcome("empty", 0);
        } else {
            info!(
                seq_nr = ctx.seq_nr,
                max_seq_nums = outcome.max_seq_nums.len(),
                merkle_roots = outcome.merkle_roots.len(),
                token_prices = outcome.token_prices.len(),
                gas_prices = outcome.gas_prices.len(),
                "[commit] Outcome agreed"
            );
            metrics::record_outcome("agreed", outcome.merkle_roots.len());
        }
        outcome.to_blob()
    }

    fn reports(&self, seq_nr: u64, outcome: &Outcome) -> CommitResult<Vec<ReportWithInfo>> {
        let Some(outcome) = CommitPluginOutcome::from_blob(outcome)? else {
            debug!("[commit] Round {}: empty outcome, no report", seq_nr);
            return Ok(Vec::new());
        };

        let report = CommitPluginReport::from_outcome(&outcome);
        let encoded = self.report_codec.encode(&report)?;
        Ok(vec![ReportWithInfo {
            report: encoded,
            info: Vec::new(),
        }])
    }

    async fn should_accept_attested_report(
        &self,
        seq_nr: u64,
        report: &ReportWithInfo,
    ) -> CommitResult<bool> {
        let decoded = self.report_codec.decode(&report.report)?;
        if decoded.is_empty() {
            debug!("[commit] Round {}: empty report not accepted", seq_nr);
            return Ok(false);
        }
        Ok(true)
    }

    async fn should_transmit_accepted_report(
        &self,
        seq_nr: u64,
        report: &ReportWithInfo,
    ) -> CommitResult<bool> {
        let is_writer = self
            .home_chain
            .observer_info(self.oracle_id)
            .map_or(false, |info| info.writer);
        if !is_writer {
            debug!("[commit] Round {}: oracle {} is not a writer", seq_nr, self.oracle_id);
            metrics::record_transmit_decision(false);
            return Ok(false);
        }

        let decoded = self.report_codec.decode(&report.report)?;
        if decoded.merkle_roots.is_empty() {
            metrics::record_transmit_decision(true);
            return Ok(true);
        }

        // Another node may have committed these ranges since the round ran.
        let chains: Vec<ChainSelector> = decoded.merkle_roots.iter().map(|r| r.chain_sel).collect();
        let committed = with_deadline(
            self.config.reader_timeout,
            self.chain_reader.next_seq_num(&chains),
        )
        .await?;
        if committed.len() != chains.len() {
            return Err(CommitError::ResultCountMismatch {
                what: "on-chain seq nums",
                requested: chains.len(),
                got: committed.len(),
            });
        }

        for (root, on_chain) in decoded.merkle_roots.iter().zip(committed) {
            if root.seq_nums_range.start() != on_chain.saturating_add(1) {
                info!(
                    "[commit] Round {}: skipping transmit, chain {} range {} is stale (on-chain {})",
                    seq_nr, root.chain_sel, root.seq_nums_range, on_chain
                );
                metrics::record_transmit_decision(false);
                return Ok(false);
            }
        }

        metrics::record_transmit_decision(true);
        Ok(true)
    }

    async fn close(&self) -> CommitResult<()> {
        let background = self.background.lock().take();
        if let Some(background) = background {
            background.stop(self.config.shutdown_timeout).await;
        }
        info!("[commit] Oracle {} closed", self.oracle_id);
        Ok(())
    }
}
