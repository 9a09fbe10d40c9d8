//! # Round Envelope Types
//!
//! Types exchanged with the host consensus runtime each round. The runtime
//! treats every payload as an opaque blob.

use crate::entities::OracleId;

/// Query blob produced by the leader (unused by the commit plugin).
pub type Query = Vec<u8>;

/// One node's encoded observation.
pub type Observation = Vec<u8>;

/// Encoded agreed outcome. An empty blob means "nothing agreed".
pub type Outcome = Vec<u8>;

/// Context the runtime hands to every phase of a round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeContext {
    /// Round sequence number.
    pub seq_nr: u64,
    /// Outcome blob of the previous round (empty on the first round).
    pub previous_outcome: Outcome,
}

impl OutcomeContext {
    /// Context for round `seq_nr` following `previous_outcome`.
    pub fn new(seq_nr: u64, previous_outcome: Outcome) -> Self {
        Self {
            seq_nr,
            previous_outcome,
        }
    }
}

/// Observation plus the identity of the node that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributedObservation {
    /// Encoded observation.
    pub observation: Observation,
    /// Oracle that produced it.
    pub observer: OracleId,
}

impl AttributedObservation {
    /// Attribute `observation` to `observer`.
    pub fn new(observation: Observation, observer: OracleId) -> Self {
        Self {
            observation,
            observer,
        }
    }
}

/// A report with runtime-opaque metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReportWithInfo {
    /// Encoded report.
    pub report: Vec<u8>,
    /// Runtime metadata, unused by the commit plugin.
    pub info: Vec<u8>,
}
