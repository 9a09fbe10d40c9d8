//! # Sequence-Number Consensus
//!
//! Per source chain, the agreed committed sequence number is `sorted[f]`
//! over all reported values. At least one honest node has seen a value at
//! that index, so a faulty minority cannot inflate it.

use super::prices::quorum;
use crate::domain::{CommitPluginObservation, SeqNumChain};
use shared_types::{ChainSelector, SeqNum};
use std::collections::BTreeMap;
use tracing::debug;

/// Agreed max sequence number per chain, sorted by chain selector.
///
/// Chains with fewer than `2f+1` reports are dropped for this round.
pub fn max_seq_nums_consensus(f: usize, observations: &[CommitPluginObservation]) -> Vec<SeqNumChain> {
    let mut reported: BTreeMap<ChainSelector, Vec<SeqNum>> = BTreeMap::new();
    for obs in observations {
        for entry in &obs.max_seq_nums {
            reported.entry(entry.chain_sel).or_default().push(entry.seq_num);
        }
    }

    let required = quorum(f);
    let mut agreed = Vec::with_capacity(reported.len());
    for (chain, mut values) in reported {
        if values.len() < required {
            debug!(
                "[commit] Not enough max seq num reports for chain {}: {} < {}",
                chain,
                values.len(),
                required
            );
            continue;
        }
        values.sort_unstable();
        agreed.push(SeqNumChain::new(chain, values[f]));
    }
    agreed
}
