//! # Price Consensus
//!
//! Token and gas prices are included when at least `2f+1` observations
//! report them; the agreed value is the median `sorted[len / 2]`.

use crate::domain::{CommitPluginObservation, GasPriceChain, TokenPrice};
use shared_types::{BigInt, ChainSelector, TokenId};
use std::collections::BTreeMap;
use tracing::debug;

/// Round quorum for fault tolerance `f`.
pub fn quorum(f: usize) -> usize {
    2 * f + 1
}

fn median_with_quorum(mut values: Vec<BigInt>, required: usize) -> Option<BigInt> {
    if values.len() < required {
        return None;
    }
    values.sort_unstable();
    values.get(values.len() / 2).copied()
}

/// Agreed token prices, sorted by token id.
pub fn token_prices_consensus(observations: &[CommitPluginObservation], f: usize) -> Vec<TokenPrice> {
    let mut reported: BTreeMap<&TokenId, Vec<BigInt>> = BTreeMap::new();
    for tp in observations.iter().flat_map(|o| &o.token_prices) {
        reported.entry(&tp.token_id).or_default().push(tp.price);
    }

    reported
        .into_iter()
        .filter_map(|(token, values)| {
            let n = values.len();
            let agreed = median_with_quorum(values, quorum(f));
            if agreed.is_none() {
                debug!("[commit] Not enough price reports for token {}: {}", token, n);
            }
            agreed.map(|price| TokenPrice::new(token.clone(), price))
        })
        .collect()
}

/// Agreed gas prices, sorted by chain selector.
pub fn gas_prices_consensus(observations: &[CommitPluginObservation], f: usize) -> Vec<GasPriceChain> {
    let mut reported: BTreeMap<ChainSelector, Vec<BigInt>> = BTreeMap::new();
    for gp in observations.iter().flat_map(|o| &o.gas_prices) {
        reported.entry(gp.chain_sel).or_default().push(gp.gas_price);
    }

    reported
        .into_iter()
        .filter_map(|(chain, values)| {
            let n = values.len();
            let agreed = median_with_quorum(values, quorum(f));
            if agreed.is_none() {
                debug!("[commit] Not enough gas price reports for chain {}: {}", chain, n);
            }
            agreed.map(|price| GasPriceChain::new(chain, price))
        })
        .collect()
}
