//! # F-Config Consensus
//!
//! Each node reports the per-chain fault tolerance from its own registry
//! snapshot, which may be stale. The round settles on the modal value per
//! chain; among equally frequent values the smallest wins.

use super::tally::most_voted;
use crate::domain::CommitPluginObservation;
use shared_types::ChainSelector;
use std::collections::BTreeMap;

/// Agreed `f` per chain across all observations.
pub fn f_chain_consensus(observations: &[CommitPluginObservation]) -> BTreeMap<ChainSelector, usize> {
    let mut votes: BTreeMap<ChainSelector, BTreeMap<usize, usize>> = BTreeMap::new();
    for obs in observations {
        for (&chain, &f) in &obs.f_chain {
            *votes.entry(chain).or_default().entry(f).or_default() += 1;
        }
    }

    votes
        .iter()
        .filter_map(|(&chain, counts)| most_voted(counts).map(|(f, _)| (chain, f)))
        .collect()
}
