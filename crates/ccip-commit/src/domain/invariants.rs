//! # Domain Invariants
//!
//! Admission rules for a peer's observation. Each rule returns the first
//! violation it finds; a violation discards that single observation.

use super::errors::{CommitError, CommitResult};
use super::value_objects::{CCIPMsgBaseDetails, GasPriceChain, ObserverInfo, SeqNumChain, TokenPrice};
use shared_types::{Bytes32, ChainSelector, OracleId, SeqNum, TokenId};
use std::collections::{BTreeMap, BTreeSet};

/// Invariant: sequence numbers are unique and new.
///
/// - no chain appears twice in `max_seq_nums`
/// - no sequence number repeats within one source chain
/// - no message hash repeats across the whole observation
/// - every message is above the observer's own max for its chain, and that
///   max must be present when the observer reported any
pub fn validate_observed_sequence_numbers(
    msgs: &[CCIPMsgBaseDetails],
    max_seq_nums: &[SeqNumChain],
) -> CommitResult<()> {
    let mut max_by_chain: BTreeMap<ChainSelector, SeqNum> = BTreeMap::new();
    for entry in max_seq_nums {
        if max_by_chain.insert(entry.chain_sel, entry.seq_num).is_some() {
            return Err(CommitError::DuplicateMaxSeqNum {
                chain: entry.chain_sel,
            });
        }
    }

    let mut seen_seq: BTreeSet<(ChainSelector, SeqNum)> = BTreeSet::new();
    let mut seen_hash: BTreeSet<Bytes32> = BTreeSet::new();
    for msg in msgs {
        if !seen_seq.insert((msg.source_chain, msg.seq_num)) {
            return Err(CommitError::DuplicateMsgSeqNum {
                chain: msg.source_chain,
                seq_num: msg.seq_num,
            });
        }
        if !seen_hash.insert(msg.msg_hash) {
            return Err(CommitError::DuplicateMsgHash(msg.msg_hash));
        }

        // A non-writer observes no max at all; nothing to compare against.
        if max_by_chain.is_empty() {
            continue;
        }
        match max_by_chain.get(&msg.source_chain) {
            None => {
                return Err(CommitError::MaxSeqNumNotFound {
                    chain: msg.source_chain,
                })
            }
            Some(&max) if msg.seq_num <= max => {
                return Err(CommitError::MsgSeqNumNotAboveMax {
                    chain: msg.source_chain,
                    seq_num: msg.seq_num,
                    max,
                })
            }
            Some(_) => {}
        }
    }

    Ok(())
}

/// Invariant: the observer was allowed to see what it reported.
///
/// `info` is the observer's home-chain registry entry, if it has one.
pub fn validate_observer_reading_eligibility(
    observer: OracleId,
    msgs: &[CCIPMsgBaseDetails],
    max_seq_nums: &[SeqNumChain],
    info: Option<&ObserverInfo>,
) -> CommitResult<()> {
    if msgs.is_empty() && max_seq_nums.is_empty() {
        return Ok(());
    }

    let info = info.ok_or(CommitError::ObserverNotFound { observer })?;

    if !max_seq_nums.is_empty() && !info.writer {
        return Err(CommitError::ObserverNotWriter { observer });
    }

    for msg in msgs {
        if !info.can_read(msg.source_chain) {
            return Err(CommitError::ChainNotReadable {
                observer,
                chain: msg.source_chain,
            });
        }
    }

    Ok(())
}

/// Invariant: token prices are unique per token and carry a value.
pub fn validate_observed_token_prices(token_prices: &[TokenPrice]) -> CommitResult<()> {
    let mut seen: BTreeSet<&TokenId> = BTreeSet::new();
    for tp in token_prices {
        if !seen.insert(&tp.token_id) {
            return Err(CommitError::DuplicateTokenPrice(tp.token_id.clone()));
        }
        if tp.price.is_empty() {
            return Err(CommitError::EmptyTokenPrice(tp.token_id.clone()));
        }
    }
    Ok(())
}

/// Invariant: gas prices are unique per chain and carry a value.
pub fn validate_observed_gas_prices(gas_prices: &[GasPriceChain]) -> CommitResult<()> {
    let mut seen: BTreeSet<ChainSelector> = BTreeSet::new();
    for gp in gas_prices {
        if !seen.insert(gp.chain_sel) {
            return Err(CommitError::DuplicateGasPrice(gp.chain_sel));
        }
        if gp.gas_price.is_empty() {
            return Err(CommitError::EmptyGasPrice(gp.chain_sel));
        }
    }
    Ok(())
}
