//! Page link graph and dependency propagation

pub mod propagate;

pub use propagate::{propagate, Propagation};

use std::collections::{BTreeMap, BTreeSet};

/// Set of question variables
pub type VarSet = BTreeSet<String>;

/// Directed page links discovered during analysis; presence only
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    outbound: BTreeMap<String, BTreeSet<String>>,
    inbound: BTreeMap<String, BTreeSet<String>>,
}

impl LinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `source → target`; returns false if the edge already existed
    pub fn add_edge(&mut self, source: &str, target: &str) -> bool {
        let added = self
            .outbound
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string());
        if added {
            self.inbound
                .entry(target.to_string())
                .or_default()
                .insert(source.to_string());
        }
        added
    }

    /// Pages linking to `target`
    pub fn sources_of(&self, target: &str) -> impl Iterator<Item = &str> {
        self.inbound
            .get(target)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Pages `source` links to
    pub fn targets_of(&self, source: &str) -> impl Iterator<Item = &str> {
        self.outbound
            .get(source)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// Every page that is the target of at least one edge
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.inbound.keys().map(String::as_str)
    }

    pub fn edge_count(&self) -> usize {
        self.outbound.values().map(BTreeSet::len).sum()
    }
}
