//! # Round Scenarios
//!
//! Healthy networks driven through one or more rounds:
//!
//! 1. **All nodes read all chains**: first round agrees on seq nums only,
//!    second round commits the new messages
//! 2. **Multi-round**: commits land and later rounds pick up from there
//! 3. **Prices**: median token prices across nodes

use super::harness::{NodeSpec, TestNetwork};

use ccip_commit::adapters::{
    Keccak256MessageHasher, StaticChainReader, StaticHomeChain, StaticTokenPricesReader,
};
use ccip_commit::algorithms::{verify_proof, MerkleTree};
use ccip_commit::{
    CCIPMsg, CommitPluginConfig, CommitPluginOutcome, CommitPluginReport, GasPriceChain,
    MerkleRootChain, MessageHasher, ObserverInfo, ReportingPlugin, SeqNumChain, TokenPrice,
};
use shared_types::{ChainSelector, OracleId, Outcome, SeqNumRange};

const CHAIN_A: ChainSelector = 1;
const CHAIN_B: ChainSelector = 2;
const DEST: ChainSelector = 3;

// =============================================================================
// TEST FIXTURES
// =============================================================================

fn registry(nodes: usize) -> StaticHomeChain {
    let mut home = StaticHomeChain::new()
        .with_chain(CHAIN_A, 1)
        .with_chain(CHAIN_B, 1)
        .with_chain(DEST, 1);
    for oracle in 0..nodes {
        home = home.with_observer(
            oracle as OracleId,
            ObserverInfo::new(true, [CHAIN_A, CHAIN_B, DEST]),
        );
    }
    home
}

fn b_msgs() -> Vec<CCIPMsg> {
    vec![CCIPMsg::new([21; 32], CHAIN_B, 21), CCIPMsg::new([22; 32], CHAIN_B, 22)]
}

/// A at 10 with nothing new, B at 20 with two new messages.
fn chain_state() -> StaticChainReader {
    StaticChainReader::new()
        .with_seq_num(CHAIN_A, 10)
        .with_seq_num(CHAIN_B, 20)
        .with_msgs(CHAIN_B, b_msgs())
        .with_gas_price(CHAIN_A, 1_000u64)
        .with_gas_price(CHAIN_B, 20_000u64)
}

fn network(nodes: usize) -> TestNetwork {
    ccip_telemetry::init_test_tracing();
    let specs = (0..nodes)
        .map(|oracle| NodeSpec::new(oracle as OracleId, chain_state()))
        .collect();
    TestNetwork::new(CommitPluginConfig::for_dest_chain(DEST), registry(nodes), specs).unwrap()
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[tokio::test]
async fn test_all_nodes_read_all_chains() {
    let net = network(3);

    // Round 1: no previous outcome, nothing scanned.
    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert!(r1.rejected.is_empty());
    assert_eq!(
        r1.decoded(),
        CommitPluginOutcome {
            max_seq_nums: vec![SeqNumChain::new(CHAIN_A, 10), SeqNumChain::new(CHAIN_B, 20)],
            ..Default::default()
        }
    );
    assert_eq!(r1.reports.len(), 1);
    assert_eq!(net.transmit(1, &r1.reports[0]).await.unwrap(), None);

    // Round 2: the two B messages are committed.
    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    let outcome = r2.decoded();

    let hasher = Keccak256MessageHasher::new();
    let leaves: Vec<_> = b_msgs().iter().map(|m| hasher.hash(m)).collect();
    let tree = MerkleTree::new(leaves.clone()).unwrap();

    assert_eq!(
        outcome,
        CommitPluginOutcome {
            max_seq_nums: vec![SeqNumChain::new(CHAIN_A, 10), SeqNumChain::new(CHAIN_B, 20)],
            merkle_roots: vec![MerkleRootChain::new(
                CHAIN_B,
                SeqNumRange::new(21, 22),
                tree.root()
            )],
            token_prices: vec![],
            gas_prices: vec![
                GasPriceChain::new(CHAIN_A, 1_000u64),
                GasPriceChain::new(CHAIN_B, 20_000u64)
            ],
        }
    );
    for (i, leaf) in leaves.iter().enumerate() {
        let proof = tree.proof(i).unwrap();
        assert!(verify_proof(&tree.root(), leaf, &proof));
    }

    // The report carries roots and prices, not the seq nums.
    assert_eq!(r2.reports.len(), 1);
    let report = net.decode_report(&r2.reports[0]).unwrap();
    assert_eq!(report, CommitPluginReport::from_outcome(&outcome));
    assert_eq!(report.merkle_roots, outcome.merkle_roots);
    assert_eq!(report.price_updates.gas_price_updates, outcome.gas_prices);

    assert_eq!(net.transmit(2, &r2.reports[0]).await.unwrap(), Some(0));

    // Landed: any later attempt at the same range is stale.
    for node in &net.nodes {
        assert!(!node
            .plugin
            .should_transmit_accepted_report(2, &r2.reports[0])
            .await
            .unwrap());
    }

    net.close().await.unwrap();
}

#[tokio::test]
async fn test_rounds_continue_after_commit() {
    let net = network(4);

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(net.transmit(2, &r2.reports[0]).await.unwrap(), Some(0));

    for node in &net.nodes {
        node.reader.push_msgs(CHAIN_A, vec![CCIPMsg::new([11; 32], CHAIN_A, 11)]);
        node.reader.push_msgs(
            CHAIN_B,
            vec![CCIPMsg::new([23; 32], CHAIN_B, 23), CCIPMsg::new([24; 32], CHAIN_B, 24)],
        );
    }

    // Round 3 still follows round 2's outcome (B at 20), but the nodes now
    // read B at 22 and only report what is above it.
    let r3 = net.run_round(3, &r2.outcome).await.unwrap();
    assert!(r3.rejected.is_empty());
    let outcome = r3.decoded();
    assert_eq!(
        outcome.max_seq_nums,
        vec![SeqNumChain::new(CHAIN_A, 10), SeqNumChain::new(CHAIN_B, 22)]
    );
    let ranges: Vec<_> = outcome
        .merkle_roots
        .iter()
        .map(|r| (r.chain_sel, r.seq_nums_range))
        .collect();
    assert_eq!(
        ranges,
        vec![(CHAIN_A, SeqNumRange::new(11, 11)), (CHAIN_B, SeqNumRange::new(23, 24))]
    );
    assert_eq!(net.transmit(3, &r3.reports[0]).await.unwrap(), Some(0));

    // Round 4: everything is committed, only prices remain.
    let r4 = net.run_round(4, &r3.outcome).await.unwrap();
    let outcome = r4.decoded();
    assert_eq!(
        outcome.max_seq_nums,
        vec![SeqNumChain::new(CHAIN_A, 11), SeqNumChain::new(CHAIN_B, 24)]
    );
    assert!(outcome.merkle_roots.is_empty());
    assert_eq!(outcome.gas_prices.len(), 2);

    // A price-only report is accepted and transmitted.
    assert_eq!(net.transmit(4, &r4.reports[0]).await.unwrap(), Some(0));
}

#[tokio::test]
async fn test_token_prices_median() {
    ccip_telemetry::init_test_tracing();
    let config = CommitPluginConfig {
        price_fee_chain: Some(DEST),
        tokens_to_query: vec!["0xA".into()],
        ..CommitPluginConfig::for_dest_chain(DEST)
    };
    let specs = [30u64, 10, 20]
        .into_iter()
        .enumerate()
        .map(|(oracle, price)| {
            NodeSpec::new(oracle as OracleId, chain_state())
                .with_prices(StaticTokenPricesReader::new().with_price("0xA", price))
        })
        .collect();
    let net = TestNetwork::new(config, registry(3), specs).unwrap();

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert!(r1.decoded().token_prices.is_empty());

    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(r2.decoded().token_prices, vec![TokenPrice::new("0xA", 20u64)]);

    let report = net.decode_report(&r2.reports[0]).unwrap();
    assert_eq!(
        report.price_updates.token_price_updates,
        vec![TokenPrice::new("0xA", 20u64)]
    );
}

#[tokio::test]
async fn test_single_node_network() {
    ccip_telemetry::init_test_tracing();
    let home = StaticHomeChain::new()
        .with_chain(CHAIN_A, 0)
        .with_chain(CHAIN_B, 0)
        .with_chain(DEST, 0)
        .with_observer(0, ObserverInfo::new(true, [CHAIN_A, CHAIN_B, DEST]));
    let net = TestNetwork::new(
        CommitPluginConfig::for_dest_chain(DEST),
        home,
        vec![NodeSpec::new(0, chain_state())],
    )
    .unwrap();

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    let ranges: Vec<_> = r2
        .decoded()
        .merkle_roots
        .iter()
        .map(|r| r.seq_nums_range)
        .collect();
    assert_eq!(ranges, vec![SeqNumRange::new(21, 22)]);
}
