//! # Message / Merkle-Root Consensus
//!
//! ## Algorithm
//!
//! 1. Drop messages at or below the chain's agreed max (already committed)
//!    and messages of chains with no agreed max.
//! 2. Per `(chain, seq_num)`, tally votes per message hash. The winner is
//!    the most voted hash, ties going to the smallest hash.
//! 3. Keep sequence numbers whose winner has at least `2f_chain+1` votes.
//! 4. From the smallest kept sequence number, extend while contiguous and
//!    stop at the first gap. Messages commit in order, so only a prefix
//!    can be agreed.
//! 5. Root over the winning hashes of that prefix.

use super::merkle_tree::MerkleTree;
use super::prices::quorum;
use super::tally::most_voted;
use crate::domain::{CommitPluginObservation, MerkleRootChain, SeqNumChain};
use shared_types::{Bytes32, ChainSelector, SeqNum, SeqNumRange};
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

type HashVotes = BTreeMap<Bytes32, usize>;

/// Agreed merkle roots over new messages, sorted by chain selector.
///
/// A chain with no quorum-reaching sequence number contributes nothing.
pub fn new_msgs_consensus(
    max_seq_nums: &[SeqNumChain],
    observations: &[CommitPluginObservation],
    f_chain: &BTreeMap<ChainSelector, usize>,
) -> Vec<MerkleRootChain> {
    let max_by_chain: BTreeMap<ChainSelector, SeqNum> = max_seq_nums
        .iter()
        .map(|s| (s.chain_sel, s.seq_num))
        .collect();

    let mut votes: BTreeMap<ChainSelector, BTreeMap<SeqNum, HashVotes>> = BTreeMap::new();
    for msg in observations.iter().flat_map(|o| &o.new_msgs) {
        match max_by_chain.get(&msg.source_chain) {
            Some(&max) if msg.seq_num > max => {
                *votes
                    .entry(msg.source_chain)
                    .or_default()
                    .entry(msg.seq_num)
                    .or_default()
                    .entry(msg.msg_hash)
                    .or_default() += 1;
            }
            Some(_) => {}
            None => debug!(
                "[commit] Ignoring message {} on chain {} without agreed max seq num",
                msg.seq_num, msg.source_chain
            ),
        }
    }

    let mut roots = Vec::new();
    for (chain, by_seq) in &votes {
        let Some(&f) = f_chain.get(chain) else {
            warn!("[commit] No f configured for chain {}, skipping its messages", chain);
            continue;
        };
        if let Some(root) = merkle_root_for_chain(*chain, by_seq, quorum(f)) {
            roots.push(root);
        }
    }
    roots
}

fn merkle_root_for_chain(
    chain: ChainSelector,
    by_seq: &BTreeMap<SeqNum, HashVotes>,
    required: usize,
) -> Option<MerkleRootChain> {
    let mut agreed: Vec<(SeqNum, Bytes32)> = Vec::with_capacity(by_seq.len());
    for (&seq_num, counts) in by_seq {
        match most_voted(counts) {
            Some((hash, n)) if n >= required => agreed.push((seq_num, hash)),
            Some((_, n)) => debug!(
                "[commit] Message {} on chain {} below quorum: {} < {}",
                seq_num, chain, n, required
            ),
            None => error!(
                "[commit] Empty vote tally for message {} on chain {}",
                seq_num, chain
            ),
        }
    }

    // BTreeMap iteration already yields ascending sequence numbers.
    let (start, _) = *agreed.first()?;
    let prefix: Vec<(SeqNum, Bytes32)> = agreed
        .iter()
        .enumerate()
        .take_while(|(i, (seq_num, _))| *seq_num == start + *i as u64)
        .map(|(_, entry)| *entry)
        .collect();
    let end = prefix.last().map_or(start, |(s, _)| *s);

    let tree = MerkleTree::new(prefix.iter().map(|(_, h)| *h).collect())?;
    debug!(
        "[commit] Agreed messages {} on chain {}",
        SeqNumRange::new(start, end),
        chain
    );
    Some(MerkleRootChain::new(chain, SeqNumRange::new(start, end), tree.root()))
}
