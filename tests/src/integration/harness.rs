//! # Test Network Harness
//!
//! A set of commit plugins plus the fake chains they read, driven round by
//! round in-process.
//!
//! Every node gets its own reader so tests can make nodes see different
//! chain state. The registry is shared unless a node brings its own.

use std::sync::Arc;

use futures::future::join_all;

use ccip_commit::adapters::{
    BincodeReportCodec, Keccak256MessageHasher, StaticChainReader, StaticHomeChain,
    StaticTokenPricesReader,
};
use ccip_commit::{
    CommitPlugin, CommitPluginConfig, CommitPluginOutcome, CommitPluginReport, CommitResult,
    ReportCodec, ReportingPlugin,
};
use shared_types::{
    AttributedObservation, ChainSelector, OracleId, Outcome, OutcomeContext, Query,
    ReportWithInfo,
};

/// Plugin wired to the in-memory adapters.
pub type TestPlugin = CommitPlugin<
    StaticChainReader,
    StaticTokenPricesReader,
    Keccak256MessageHasher,
    BincodeReportCodec,
    StaticHomeChain,
>;

/// How to build one node.
pub struct NodeSpec {
    pub oracle: OracleId,
    pub reader: StaticChainReader,
    pub prices: StaticTokenPricesReader,
    /// Registry view of this node; the network's registry when `None`.
    pub home: Option<StaticHomeChain>,
}

impl NodeSpec {
    pub fn new(oracle: OracleId, reader: StaticChainReader) -> Self {
        Self {
            oracle,
            reader,
            prices: StaticTokenPricesReader::new(),
            home: None,
        }
    }

    pub fn with_prices(mut self, prices: StaticTokenPricesReader) -> Self {
        self.prices = prices;
        self
    }

    pub fn with_home(mut self, home: StaticHomeChain) -> Self {
        self.home = Some(home);
        self
    }
}

/// One running node.
pub struct Node {
    pub plugin: TestPlugin,
    pub reader: Arc<StaticChainReader>,
    pub prices: Arc<StaticTokenPricesReader>,
}

/// Everything one round produced.
#[derive(Debug)]
pub struct RoundResult {
    /// Oracles whose observation was built.
    pub observed: Vec<OracleId>,
    /// Oracles whose observation the leader rejected.
    pub rejected: Vec<OracleId>,
    /// Outcome blob, identical on every node.
    pub outcome: Outcome,
    pub reports: Vec<ReportWithInfo>,
}

impl RoundResult {
    /// Decoded outcome; default when nothing was agreed.
    pub fn decoded(&self) -> CommitPluginOutcome {
        CommitPluginOutcome::from_blob(&self.outcome)
            .ok()
            .flatten()
            .unwrap_or_default()
    }
}

/// In-process network of commit plugins.
pub struct TestNetwork {
    pub home: Arc<StaticHomeChain>,
    pub nodes: Vec<Node>,
    codec: BincodeReportCodec,
}

impl TestNetwork {
    /// Build the network. Must run inside a tokio runtime.
    pub fn new(
        config: CommitPluginConfig,
        home: StaticHomeChain,
        specs: Vec<NodeSpec>,
    ) -> CommitResult<Self> {
        let home = Arc::new(home);
        let mut nodes = Vec::with_capacity(specs.len());
        for spec in specs {
            let reader = Arc::new(spec.reader);
            let prices = Arc::new(spec.prices);
            let node_home = match spec.home {
                Some(own) => Arc::new(own),
                None => home.clone(),
            };
            let plugin = CommitPlugin::new(
                spec.oracle,
                config.clone(),
                reader.clone(),
                prices.clone(),
                Arc::new(Keccak256MessageHasher::new()),
                Arc::new(BincodeReportCodec::new()),
                node_home,
            )?;
            nodes.push(Node {
                plugin,
                reader,
                prices,
            });
        }

        Ok(Self {
            home,
            nodes,
            codec: BincodeReportCodec::new(),
        })
    }

    fn leader(&self, seq_nr: u64) -> &Node {
        &self.nodes[(seq_nr as usize) % self.nodes.len()]
    }

    /// Run one round following `previous_outcome`.
    ///
    /// Observations are built concurrently. Nodes that fail to observe are
    /// left out, as a host runtime would after a timeout. Every node computes
    /// the outcome; a diverging outcome panics.
    pub async fn run_round(&self, seq_nr: u64, previous_outcome: &Outcome) -> CommitResult<RoundResult> {
        let ctx = OutcomeContext::new(seq_nr, previous_outcome.clone());
        let query = Query::new();

        let built = join_all(self.nodes.iter().map(|n| n.plugin.observation(&ctx, &query))).await;
        let mut observations = Vec::new();
        for (node, res) in self.nodes.iter().zip(built) {
            if let Ok(obs) = res {
                observations.push(AttributedObservation::new(obs, node.plugin.oracle_id()));
            }
        }
        let observed = observations.iter().map(|ao| ao.observer).collect();

        let leader = &self.leader(seq_nr).plugin;
        let (accepted, rejected): (Vec<_>, Vec<_>) = observations
            .into_iter()
            .partition(|ao| leader.validate_observation(&ctx, &query, ao).is_ok());
        let rejected = rejected.iter().map(|ao| ao.observer).collect();

        let outcome = leader.outcome(&ctx, &query, &accepted)?;
        for node in &self.nodes {
            let other = node.plugin.outcome(&ctx, &query, &accepted)?;
            assert_eq!(other, outcome, "oracle {} diverged", node.plugin.oracle_id());
        }

        let reports = leader.reports(seq_nr, &outcome)?;
        Ok(RoundResult {
            observed,
            rejected,
            outcome,
            reports,
        })
    }

    /// Pass `report` through the accept and transmit gates. Returns the
    /// oracle that transmitted it, after landing it on every node's view of
    /// the destination chain.
    pub async fn transmit(&self, seq_nr: u64, report: &ReportWithInfo) -> CommitResult<Option<OracleId>> {
        if !self
            .leader(seq_nr)
            .plugin
            .should_accept_attested_report(seq_nr, report)
            .await?
        {
            return Ok(None);
        }
        for node in &self.nodes {
            if node.plugin.should_transmit_accepted_report(seq_nr, report).await? {
                let decoded = self.decode_report(report)?;
                self.land(&decoded);
                return Ok(Some(node.plugin.oracle_id()));
            }
        }
        Ok(None)
    }

    pub fn decode_report(&self, report: &ReportWithInfo) -> CommitResult<CommitPluginReport> {
        Ok(self.codec.decode(&report.report)?)
    }

    /// Commit the report's ranges on every node's destination view.
    pub fn land(&self, report: &CommitPluginReport) {
        for node in &self.nodes {
            for root in &report.merkle_roots {
                node.reader.set_seq_num(root.chain_sel, root.seq_nums_range.end());
            }
        }
    }

    /// Set a committed sequence number on every node's view.
    pub fn set_seq_num(&self, chain: ChainSelector, seq_num: u64) {
        for node in &self.nodes {
            node.reader.set_seq_num(chain, seq_num);
        }
    }

    pub async fn close(&self) -> CommitResult<()> {
        for node in &self.nodes {
            node.plugin.close().await?;
        }
        Ok(())
    }
}
