//! Static Home-Chain Registry Adapter

use crate::domain::ObserverInfo;
use crate::ports::outbound::HomeChain;
use parking_lot::RwLock;
use shared_types::{ChainSelector, OracleId};
use std::collections::{BTreeMap, BTreeSet};

/// In-memory registry snapshot.
#[derive(Default)]
pub struct StaticHomeChain {
    observers: RwLock<BTreeMap<OracleId, ObserverInfo>>,
    f_chain: RwLock<BTreeMap<ChainSelector, usize>>,
    known_chains: RwLock<BTreeSet<ChainSelector>>,
}

impl StaticHomeChain {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a chain with its fault tolerance.
    pub fn with_chain(self, chain: ChainSelector, f: usize) -> Self {
        self.set_f(chain, f);
        self
    }

    /// Register an oracle.
    pub fn with_observer(self, oracle: OracleId, info: ObserverInfo) -> Self {
        self.observers.write().insert(oracle, info);
        self
    }

    /// Change the fault tolerance of a chain (registers it if unknown).
    pub fn set_f(&self, chain: ChainSelector, f: usize) {
        self.f_chain.write().insert(chain, f);
        self.known_chains.write().insert(chain);
    }
}

impl HomeChain for StaticHomeChain {
    fn observer_info(&self, oracle: OracleId) -> Option<ObserverInfo> {
        self.observers.read().get(&oracle).cloned()
    }

    fn f_chain(&self) -> BTreeMap<ChainSelector, usize> {
        self.f_chain.read().clone()
    }

    fn known_chains(&self) -> BTreeSet<ChainSelector> {
        self.known_chains.read().clone()
    }
}
