//! # CCIP Commit Benchmarks
//!
//! | Area | Operation | Scale |
//! |------|-----------|-------|
//! | Merkle tree | build, prove, verify | up to 4096 leaves |
//! | Message consensus | tally + root per chain | 16 nodes, 256 msgs |
//! | Price consensus | median per chain | 16 nodes, 64 chains |

use ccip_commit::algorithms::{
    gas_prices_consensus, new_msgs_consensus, verify_proof, MerkleTree,
};
use ccip_commit::{CCIPMsgBaseDetails, CommitPluginObservation, GasPriceChain, SeqNumChain};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::collections::BTreeMap;
use std::time::Duration;

fn random_hashes(count: usize) -> Vec<[u8; 32]> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let mut hash = [0u8; 32];
            rng.fill(&mut hash);
            hash
        })
        .collect()
}

// ============================================================================
// Merkle tree
// ============================================================================

fn bench_merkle_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle-tree");
    group.measurement_time(Duration::from_secs(10));

    for size in [16usize, 256, 4096] {
        let leaves = random_hashes(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("build", size), &leaves, |b, leaves| {
            b.iter(|| black_box(MerkleTree::new(leaves.clone())))
        });

        let Some(tree) = MerkleTree::new(leaves.clone()) else {
            continue;
        };
        let root = tree.root();
        let index = size / 2;
        let proof = tree.proof(index).unwrap_or_default();

        group.bench_with_input(BenchmarkId::new("prove", size), &index, |b, &index| {
            b.iter(|| black_box(tree.proof(index)))
        });
        group.bench_with_input(BenchmarkId::new("verify", size), &proof, |b, proof| {
            b.iter(|| black_box(verify_proof(&root, &leaves[index], proof)))
        });
    }

    group.finish();
}

// ============================================================================
// Consensus
// ============================================================================

fn bench_new_msgs_consensus(c: &mut Criterion) {
    let mut group = c.benchmark_group("new-msgs-consensus");

    let chains = 4u64;
    let msgs_per_chain = 64u64;
    let hashes = random_hashes((chains * msgs_per_chain) as usize);
    let msgs: Vec<CCIPMsgBaseDetails> = (0..chains)
        .flat_map(|chain| (1..=msgs_per_chain).map(move |seq| (chain + 1, seq)))
        .zip(hashes)
        .map(|((chain, seq), hash)| CCIPMsgBaseDetails::new(hash, chain, seq, hash))
        .collect();

    let max_seq_nums: Vec<SeqNumChain> = (1..=chains).map(|c| SeqNumChain::new(c, 0)).collect();
    let f_chain: BTreeMap<u64, usize> = (1..=chains).map(|c| (c, 5)).collect();

    for nodes in [4usize, 16] {
        let observations: Vec<CommitPluginObservation> = (0..nodes)
            .map(|_| CommitPluginObservation {
                new_msgs: msgs.clone(),
                ..Default::default()
            })
            .collect();

        group.throughput(Throughput::Elements((nodes * msgs.len()) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &observations, |b, obs| {
            b.iter(|| black_box(new_msgs_consensus(&max_seq_nums, obs, &f_chain)))
        });
    }

    group.finish();
}

fn bench_gas_prices_consensus(c: &mut Criterion) {
    let mut group = c.benchmark_group("gas-prices-consensus");
    let mut rng = rand::thread_rng();

    let observations: Vec<CommitPluginObservation> = (0..16)
        .map(|_| CommitPluginObservation {
            gas_prices: (1..=64u64)
                .map(|chain| GasPriceChain::new(chain, rng.gen_range(1_000u64..1_000_000)))
                .collect(),
            ..Default::default()
        })
        .collect();

    group.bench_function("16-nodes-64-chains", |b| {
        b.iter(|| black_box(gas_prices_consensus(&observations, 5)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_merkle_tree,
    bench_new_msgs_consensus,
    bench_gas_prices_consensus
);
criterion_main!(benches);
