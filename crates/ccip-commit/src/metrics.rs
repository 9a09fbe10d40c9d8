//! # Commit Plugin Metrics
//!
//! Prometheus metrics for round health.
//!
//! ## Usage
//!
//! Enable with the `metrics` feature:
//! ```toml
//! ccip-commit = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `ccip_commit_observations_total` - Counter of observations built by this node
//! - `ccip_commit_observations_rejected_total` - Counter of rejected peer observations (by reason)
//! - `ccip_commit_outcomes_total` - Counter of computed outcomes (by result)
//! - `ccip_commit_merkle_roots_total` - Counter of agreed merkle roots
//! - `ccip_commit_transmit_decisions_total` - Counter of transmit gate decisions (by decision)
//! - `ccip_commit_sync_failures_total` - Counter of failed background syncs

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Observations built by this node
    pub static ref OBSERVATIONS: IntCounter = register_int_counter!(
        "ccip_commit_observations_total",
        "Total number of observations built"
    )
    .expect("Failed to create OBSERVATIONS metric");

    /// Peer observations rejected, labeled by reason
    pub static ref OBSERVATIONS_REJECTED: IntCounterVec = register_int_counter_vec!(
        "ccip_commit_observations_rejected_total",
        "Total number of peer observations rejected",
        &["reason"]
    )
    .expect("Failed to create OBSERVATIONS_REJECTED metric");

    /// Outcomes, labeled by result (agreed, empty, failed)
    pub static ref OUTCOMES: IntCounterVec = register_int_counter_vec!(
        "ccip_commit_outcomes_total",
        "Total number of round outcomes",
        &["result"]
    )
    .expect("Failed to create OUTCOMES metric");

    /// Agreed merkle roots
    pub static ref MERKLE_ROOTS: IntCounter = register_int_counter!(
        "ccip_commit_merkle_roots_total",
        "Total number of agreed merkle roots"
    )
    .expect("Failed to create MERKLE_ROOTS metric");

    /// Transmit gate decisions
    pub static ref TRANSMIT_DECISIONS: IntCounterVec = register_int_counter_vec!(
        "ccip_commit_transmit_decisions_total",
        "Total number of transmit gate decisions",
        &["decision"]
    )
    .expect("Failed to create TRANSMIT_DECISIONS metric");

    /// Failed background syncs
    pub static ref SYNC_FAILURES: IntCounter = register_int_counter!(
        "ccip_commit_sync_failures_total",
        "Total number of failed background reader syncs"
    )
    .expect("Failed to create SYNC_FAILURES metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record an observation built
#[cfg(feature = "metrics")]
pub fn record_observation() {
    OBSERVATIONS.inc();
}

/// Record a peer observation rejected with reason
#[cfg(feature = "metrics")]
pub fn record_observation_rejected(reason: &str) {
    OBSERVATIONS_REJECTED.with_label_values(&[reason]).inc();
}

/// Record an outcome and the merkle roots it carries
#[cfg(feature = "metrics")]
pub fn record_outcome(result: &str, merkle_roots: usize) {
    OUTCOMES.with_label_values(&[result]).inc();
    MERKLE_ROOTS.inc_by(merkle_roots as u64);
}

/// Record a transmit gate decision
#[cfg(feature = "metrics")]
pub fn record_transmit_decision(transmit: bool) {
    let decision = if transmit { "transmit" } else { "skip" };
    TRANSMIT_DECISIONS.with_label_values(&[decision]).inc();
}

/// Record a failed background sync
#[cfg(feature = "metrics")]
pub fn record_sync_failure() {
    SYNC_FAILURES.inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

#[cfg(not(feature = "metrics"))]
pub fn record_observation() {}

#[cfg(not(feature = "metrics"))]
pub fn record_observation_rejected(_reason: &str) {}

#[cfg(not(feature = "metrics"))]
pub fn record_outcome(_result: &str, _merkle_roots: usize) {}

#[cfg(not(feature = "metrics"))]
pub fn record_transmit_decision(_transmit: bool) {}

#[cfg(not(feature = "metrics"))]
pub fn record_sync_failure() {}
