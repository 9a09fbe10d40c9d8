//! # Fault Scenarios
//!
//! Networks where some nodes disagree, fail or overstep their registry
//! entry. Faulty observations are dropped one by one; the round itself
//! only fails when too few valid observations remain.

use super::harness::{NodeSpec, TestNetwork};

use ccip_commit::adapters::{ReaderOp, StaticChainReader, StaticHomeChain};
use ccip_commit::{
    CCIPMsg, CommitError, CommitPluginConfig, CommitPluginOutcome, ObserverInfo, ReaderError, ReportingPlugin,
    SeqNumChain,
};
use shared_types::{ChainSelector, OracleId, Outcome, SeqNumRange};

const CHAIN_A: ChainSelector = 1;
const CHAIN_B: ChainSelector = 2;
const DEST: ChainSelector = 3;
const ALL: [ChainSelector; 3] = [CHAIN_A, CHAIN_B, DEST];

fn home(f: usize) -> StaticHomeChain {
    StaticHomeChain::new()
        .with_chain(CHAIN_A, f)
        .with_chain(CHAIN_B, f)
        .with_chain(DEST, f)
}

fn registry(nodes: usize) -> StaticHomeChain {
    let mut home = home(1);
    for oracle in 0..nodes {
        home = home.with_observer(oracle as OracleId, ObserverInfo::new(true, ALL));
    }
    home
}

fn chain_state_with(b_seq: u64, b_msg_ids: [u8; 2]) -> StaticChainReader {
    StaticChainReader::new()
        .with_seq_num(CHAIN_A, 10)
        .with_seq_num(CHAIN_B, b_seq)
        .with_msgs(
            CHAIN_B,
            vec![
                CCIPMsg::new([b_msg_ids[0]; 32], CHAIN_B, 21),
                CCIPMsg::new([b_msg_ids[1]; 32], CHAIN_B, 22),
            ],
        )
        .with_gas_price(CHAIN_A, 1_000u64)
        .with_gas_price(CHAIN_B, 20_000u64)
}

fn chain_state() -> StaticChainReader {
    chain_state_with(20, [21, 22])
}

fn build(registry: StaticHomeChain, specs: Vec<NodeSpec>) -> TestNetwork {
    ccip_telemetry::init_test_tracing();
    TestNetwork::new(CommitPluginConfig::for_dest_chain(DEST), registry, specs).unwrap()
}

fn ranges(outcome: &CommitPluginOutcome) -> Vec<(ChainSelector, SeqNumRange)> {
    outcome
        .merkle_roots
        .iter()
        .map(|r| (r.chain_sel, r.seq_nums_range))
        .collect()
}

#[tokio::test]
async fn test_divergent_messages_commit_nothing() {
    // Node 2 sees other messages at B 21 and 22.
    let net = build(
        registry(3),
        vec![
            NodeSpec::new(0, chain_state()),
            NodeSpec::new(1, chain_state()),
            NodeSpec::new(2, chain_state_with(20, [0xE1, 0xE2])),
        ],
    );

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    let outcome = r2.decoded();

    assert!(outcome.merkle_roots.is_empty());
    assert_eq!(
        outcome.max_seq_nums,
        vec![SeqNumChain::new(CHAIN_A, 10), SeqNumChain::new(CHAIN_B, 20)]
    );
    assert_eq!(outcome.gas_prices.len(), 2);
}

#[tokio::test]
async fn test_one_divergent_node_out_of_four() {
    let net = build(
        registry(4),
        vec![
            NodeSpec::new(0, chain_state()),
            NodeSpec::new(1, chain_state()),
            NodeSpec::new(2, chain_state()),
            NodeSpec::new(3, chain_state_with(20, [0xE1, 0xE2])),
        ],
    );

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(ranges(&r2.decoded()), vec![(CHAIN_B, SeqNumRange::new(21, 22))]);
}

#[tokio::test]
async fn test_lagging_destination_view() {
    // Node 2 still reads B at 18; the agreed max ignores it.
    let net = build(
        registry(3),
        vec![
            NodeSpec::new(0, chain_state()),
            NodeSpec::new(1, chain_state()),
            NodeSpec::new(2, chain_state_with(18, [21, 22])),
        ],
    );

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert_eq!(
        r1.decoded().max_seq_nums,
        vec![SeqNumChain::new(CHAIN_A, 10), SeqNumChain::new(CHAIN_B, 20)]
    );

    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(ranges(&r2.decoded()), vec![(CHAIN_B, SeqNumRange::new(21, 22))]);
}

#[tokio::test]
async fn test_failed_scan_drops_node() {
    let net = build(
        registry(4),
        (0..4).map(|o| NodeSpec::new(o, chain_state())).collect(),
    );
    net.nodes[3].reader.fail(
        ReaderOp::Msgs,
        ReaderError::Rpc {
            chain: CHAIN_B,
            reason: "connection reset".into(),
        },
    );

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert_eq!(r1.observed.len(), 4);

    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(r2.observed, vec![0, 1, 2]);
    assert_eq!(ranges(&r2.decoded()), vec![(CHAIN_B, SeqNumRange::new(21, 22))]);
}

#[tokio::test]
async fn test_too_few_observations_fail_round() {
    let net = build(
        registry(3),
        (0..3).map(|o| NodeSpec::new(o, chain_state())).collect(),
    );
    for node in &net.nodes[1..] {
        node.reader.fail(
            ReaderOp::NextSeqNum,
            ReaderError::Rpc {
                chain: DEST,
                reason: "unavailable".into(),
            },
        );
    }

    let err = net.run_round(1, &Outcome::new()).await.unwrap_err();
    assert!(matches!(
        err,
        CommitError::InsufficientObservations { got: 1, required: 3 }
    ));
}

#[tokio::test]
async fn test_first_round_never_scans() {
    let net = build(
        registry(3),
        (0..3).map(|o| NodeSpec::new(o, chain_state())).collect(),
    );
    for node in &net.nodes {
        node.reader.fail(
            ReaderOp::Msgs,
            ReaderError::Rpc {
                chain: CHAIN_B,
                reason: "scan disabled".into(),
            },
        );
    }

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert_eq!(r1.observed.len(), 3);
    assert_eq!(r1.decoded().max_seq_nums.len(), 2);

    // Second round scans, every node fails, nothing is agreed.
    let err = net.run_round(2, &r1.outcome).await.unwrap_err();
    assert_eq!(err.kind(), "missing_f_chain");
}

#[tokio::test]
async fn test_seq_nums_from_unregistered_writer_rejected() {
    // Registry: oracle 3 reads everything but may not write. Node 3 believes
    // otherwise and reports seq nums.
    let registry = registry(3).with_observer(3, ObserverInfo::new(false, ALL));
    let self_image = home(1).with_observer(3, ObserverInfo::new(true, ALL));

    let net = build(
        registry,
        vec![
            NodeSpec::new(0, chain_state()),
            NodeSpec::new(1, chain_state()),
            NodeSpec::new(2, chain_state()),
            NodeSpec::new(3, chain_state()).with_home(self_image),
        ],
    );

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert_eq!(r1.rejected, vec![3]);

    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(r2.rejected, vec![3]);
    assert_eq!(ranges(&r2.decoded()), vec![(CHAIN_B, SeqNumRange::new(21, 22))]);
}

#[tokio::test]
async fn test_messages_from_unreadable_chain_rejected() {
    // Registry: oracle 3 may not read B. Node 3 scans B anyway.
    let registry = registry(3).with_observer(3, ObserverInfo::new(true, [CHAIN_A, DEST]));
    let self_image = home(1).with_observer(3, ObserverInfo::new(true, ALL));

    let net = build(
        registry,
        vec![
            NodeSpec::new(0, chain_state()),
            NodeSpec::new(1, chain_state()),
            NodeSpec::new(2, chain_state()),
            NodeSpec::new(3, chain_state()).with_home(self_image),
        ],
    );

    // Nothing scanned yet, so nothing to object to.
    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert!(r1.rejected.is_empty());

    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(r2.rejected, vec![3]);
    assert_eq!(ranges(&r2.decoded()), vec![(CHAIN_B, SeqNumRange::new(21, 22))]);
}

#[tokio::test]
async fn test_non_writer_never_transmits() {
    // Oracle 3 reads the destination but may not write: its seq nums are
    // refused, and it never transmits.
    let registry = registry(3).with_observer(3, ObserverInfo::new(false, ALL));
    let net = build(
        registry,
        (0..4).map(|o| NodeSpec::new(o, chain_state())).collect(),
    );

    let r1 = net.run_round(1, &Outcome::new()).await.unwrap();
    assert_eq!(r1.rejected, vec![3]);
    let r2 = net.run_round(2, &r1.outcome).await.unwrap();
    assert_eq!(ranges(&r2.decoded()), vec![(CHAIN_B, SeqNumRange::new(21, 22))]);
    let report = &r2.reports[0];

    assert!(!net.nodes[3]
        .plugin
        .should_transmit_accepted_report(2, report)
        .await
        .unwrap());
    assert!(net.nodes[0]
        .plugin
        .should_transmit_accepted_report(2, report)
        .await
        .unwrap());
}
