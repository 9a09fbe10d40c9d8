//! # Commit Devnet
//!
//! In-process simulator for the commit plugin.
//!
//! ## Round Loop
//!
//! ```text
//! new msgs on sources ──→ observation (all nodes) ──→ validate (leader)
//!                                                          │
//!      land roots on dest ←── transmit ←── reports ←── outcome
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CCIP_COMMIT_CONFIG` | - | JSON plugin config (or first CLI argument) |
//! | `CCIP_DEVNET_NODES` | `4` | Number of oracle nodes |
//! | `CCIP_DEVNET_ROUNDS` | `5` | Number of rounds to run |
//! | `CCIP_DEVNET_MSGS_PER_ROUND` | `3` | Messages sent per source chain and round |

use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::{info, warn, Instrument};

use ccip_commit::adapters::{
    BincodeReportCodec, Keccak256MessageHasher, StaticChainReader, StaticHomeChain,
    StaticTokenPricesReader,
};
use ccip_commit::{
    CCIPMsg, CommitPlugin, CommitPluginConfig, CommitPluginOutcome, ObserverInfo, ReportCodec,
    ReportingPlugin,
};
use ccip_telemetry::{init_tracing, log_round_event, round_span, TelemetryConfig};
use shared_types::{
    AttributedObservation, ChainSelector, OracleId, Outcome, OutcomeContext, Query, SeqNum,
};

type DevnetPlugin = CommitPlugin<
    StaticChainReader,
    StaticTokenPricesReader,
    Keccak256MessageHasher,
    BincodeReportCodec,
    StaticHomeChain,
>;

const DEFAULT_DEST_CHAIN: ChainSelector = 3;
const SOURCE_CHAINS: [ChainSelector; 2] = [1, 2];
const FEE_TOKENS: [&str; 2] = ["0xLINK", "0xWETH"];

/// Devnet settings.
struct DevnetConfig {
    plugin: CommitPluginConfig,
    nodes: usize,
    rounds: u64,
    msgs_per_round: u64,
}

/// Fake chains shared by every node.
struct Chains {
    reader: Arc<StaticChainReader>,
    prices: Arc<StaticTokenPricesReader>,
    home: Arc<StaticHomeChain>,
    codec: BincodeReportCodec,
    /// Highest sequence number sent per source chain.
    sent: BTreeMap<ChainSelector, SeqNum>,
}

impl Chains {
    fn new(config: &DevnetConfig) -> Self {
        let f = (config.nodes - 1) / 3;
        let dest = config.plugin.dest_chain;

        let mut reader = StaticChainReader::new();
        let mut home = StaticHomeChain::new().with_chain(dest, f);
        for (i, chain) in SOURCE_CHAINS.into_iter().enumerate() {
            reader = reader
                .with_seq_num(chain, 0)
                .with_gas_price(chain, 1_000u64 * (i as u64 + 1));
            home = home.with_chain(chain, f);
        }

        let mut readable: Vec<ChainSelector> = SOURCE_CHAINS.to_vec();
        readable.push(dest);
        for oracle in 0..config.nodes {
            home = home.with_observer(oracle as OracleId, ObserverInfo::new(true, readable.clone()));
        }

        let mut prices = StaticTokenPricesReader::new();
        for (i, token) in config.plugin.tokens_to_query.iter().enumerate() {
            prices = prices.with_price(token.clone(), 10u64.pow(18) * (i as u64 + 1));
        }

        Self {
            reader: Arc::new(reader),
            prices: Arc::new(prices),
            home: Arc::new(home),
            codec: BincodeReportCodec::new(),
            sent: SOURCE_CHAINS.iter().map(|&c| (c, 0)).collect(),
        }
    }

    /// Send `count` new messages on every source chain.
    fn send_msgs(&mut self, count: u64) {
        for (&chain, last) in self.sent.iter_mut() {
            let msgs = (*last + 1..=*last + count)
                .map(|seq_num| {
                    let mut id = [0u8; 32];
                    id[..8].copy_from_slice(&chain.to_be_bytes());
                    id[8..16].copy_from_slice(&seq_num.to_be_bytes());
                    CCIPMsg::new(id, chain, seq_num)
                })
                .collect();
            self.reader.push_msgs(chain, msgs);
            *last += count;
        }
    }

    /// Apply a transmitted report to the destination chain.
    fn land(&self, report: &[u8]) -> Result<()> {
        let report = self.codec.decode(report)?;
        for root in &report.merkle_roots {
            self.reader.set_seq_num(root.chain_sel, root.seq_nums_range.end());
        }
        for gas in &report.price_updates.gas_price_updates {
            self.reader.set_gas_price(gas.chain_sel, gas.gas_price);
        }
        Ok(())
    }
}

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} is not a valid value: {}", name, raw)),
        Err(_) => Ok(default),
    }
}

fn load_config() -> Result<DevnetConfig> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("CCIP_COMMIT_CONFIG").ok());

    let plugin = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Failed to parse config {}", path))?
        }
        None => CommitPluginConfig {
            price_fee_chain: Some(DEFAULT_DEST_CHAIN),
            tokens_to_query: FEE_TOKENS.iter().map(|t| t.to_string()).collect(),
            ..CommitPluginConfig::for_dest_chain(DEFAULT_DEST_CHAIN)
        },
    };

    let nodes = env_or("CCIP_DEVNET_NODES", 4usize)?;
    if nodes == 0 {
        bail!("CCIP_DEVNET_NODES must be at least 1");
    }

    Ok(DevnetConfig {
        plugin,
        nodes,
        rounds: env_or("CCIP_DEVNET_ROUNDS", 5u64)?,
        msgs_per_round: env_or("CCIP_DEVNET_MSGS_PER_ROUND", 3u64)?,
    })
}

/// Run one round across all nodes and return its outcome.
async fn run_round(
    plugins: &[DevnetPlugin],
    chains: &Chains,
    seq_nr: u64,
    previous_outcome: Outcome,
) -> Result<Outcome> {
    let ctx = OutcomeContext::new(seq_nr, previous_outcome);
    let query = Query::new();

    let mut observations = Vec::with_capacity(plugins.len());
    for plugin in plugins {
        match plugin.observation(&ctx, &query).await {
            Ok(obs) => observations.push(AttributedObservation::new(obs, plugin.oracle_id())),
            Err(e) => warn!("[devnet] Oracle {} failed to observe: {}", plugin.oracle_id(), e),
        }
    }

    let leader = &plugins[(seq_nr as usize) % plugins.len()];
    observations.retain(|ao| leader.validate_observation(&ctx, &query, ao).is_ok());

    let outcome = leader.outcome(&ctx, &query, &observations)?;
    for plugin in plugins {
        if plugin.outcome(&ctx, &query, &observations)? != outcome {
            bail!("Oracle {} computed a diverging outcome", plugin.oracle_id());
        }
    }

    for report in leader.reports(seq_nr, &outcome)? {
        if !leader.should_accept_attested_report(seq_nr, &report).await? {
            continue;
        }
        let mut transmitted = false;
        for plugin in plugins {
            if plugin.should_transmit_accepted_report(seq_nr, &report).await? {
                chains.land(&report.report)?;
                log_round_event!(info, seq_nr, plugin.oracle_id(), "[devnet] Report transmitted");
                transmitted = true;
                break;
            }
        }
        if !transmitted {
            info!("[devnet] Round {}: report not transmitted", seq_nr);
        }
    }

    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(&TelemetryConfig::from_env())?;

    let config = load_config()?;
    config.plugin.validate()?;
    info!(
        "[devnet] Starting {} nodes for {} rounds, destination chain {}",
        config.nodes, config.rounds, config.plugin.dest_chain
    );

    let mut chains = Chains::new(&config);
    let plugins = (0..config.nodes)
        .map(|oracle| {
            CommitPlugin::new(
                oracle as OracleId,
                config.plugin.clone(),
                chains.reader.clone(),
                chains.prices.clone(),
                Arc::new(Keccak256MessageHasher::new()),
                Arc::new(BincodeReportCodec::new()),
                chains.home.clone(),
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut previous_outcome = Outcome::new();
    for seq_nr in 1..=config.rounds {
        chains.send_msgs(config.msgs_per_round);

        let round = run_round(&plugins, &chains, seq_nr, previous_outcome)
            .instrument(round_span!("round", seq_nr = seq_nr));
        previous_outcome = match round.await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("[devnet] Round {} failed: {}", seq_nr, e);
                Outcome::new()
            }
        };

        let decoded = CommitPluginOutcome::from_blob(&previous_outcome)?.unwrap_or_default();
        println!("round {}: {}", seq_nr, serde_json::to_string(&decoded)?);
    }

    for plugin in &plugins {
        plugin.close().await?;
    }
    info!("[devnet] Done");
    Ok(())
}
