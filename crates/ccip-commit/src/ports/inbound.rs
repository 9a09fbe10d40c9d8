//! # Inbound Ports
//!
//! The phases a host consensus runtime invokes on the plugin each round.
//!
//! ```text
//! query → observation → validate_observation (per peer) → outcome → reports
//!       → should_accept_attested_report → should_transmit_accepted_report
//! ```
//!
//! Phases that read chain state are async. `validate_observation`,
//! `outcome` and `reports` are pure and synchronous.

use crate::domain::CommitResult;
use async_trait::async_trait;
use shared_types::{AttributedObservation, Observation, Outcome, OutcomeContext, Query, ReportWithInfo};

/// Reporting plugin API - inbound port.
#[async_trait]
pub trait ReportingPlugin: Send + Sync {
    /// Leader query for the round. The commit plugin needs none.
    async fn query(&self, ctx: &OutcomeContext) -> CommitResult<Query>;

    /// Build this node's observation for the round.
    async fn observation(&self, ctx: &OutcomeContext, query: &Query) -> CommitResult<Observation>;

    /// Admit or reject one peer's observation.
    fn validate_observation(
        &self,
        ctx: &OutcomeContext,
        query: &Query,
        observation: &AttributedObservation,
    ) -> CommitResult<()>;

    /// Aggregate validated observations into the round outcome.
    fn outcome(
        &self,
        ctx: &OutcomeContext,
        query: &Query,
        observations: &[AttributedObservation],
    ) -> CommitResult<Outcome>;

    /// Reports to attest for an outcome. Empty for the empty outcome.
    fn reports(&self, seq_nr: u64, outcome: &Outcome) -> CommitResult<Vec<ReportWithInfo>>;

    /// Whether an attested report should be accepted for transmission.
    async fn should_accept_attested_report(
        &self,
        seq_nr: u64,
        report: &ReportWithInfo,
    ) -> CommitResult<bool>;

    /// Whether this node should submit an accepted report on-chain.
    async fn should_transmit_accepted_report(
        &self,
        seq_nr: u64,
        report: &ReportWithInfo,
    ) -> CommitResult<bool>;

    /// Stop background work and release resources.
    async fn close(&self) -> CommitResult<()>;
}
