//! Backward fixed point over the link graph
//!
//! `V(page)` starts as the variables the page read itself. Every pass pulls
//! each target's set into every page that links to it, minus the variables
//! the linking page asks itself:
//!
//! ```text
//! V(Q) := V(Q) ∪ (V(P) \ own(Q))    for every edge Q → P
//! ```
//!
//! The sets only grow and the variable domain is finite, so the iteration
//! stops at the least fixed point.

use log::debug;
use std::collections::BTreeMap;

use super::{LinkGraph, VarSet};

/// Converged variable sets
#[derive(Debug, Clone, Default)]
pub struct Propagation {
    pub vars: BTreeMap<String, VarSet>,
    /// Full passes run, including the final one that changed nothing
    pub passes: usize,
}

/// Naive full-pass iteration until nothing changes
pub fn propagate(
    links: &LinkGraph,
    local: &BTreeMap<String, VarSet>,
    owned: &BTreeMap<String, VarSet>,
) -> Propagation {
    let mut vars = local.clone();
    for target in links.targets() {
        vars.entry(target.to_string()).or_default();
        for source in links.sources_of(target) {
            vars.entry(source.to_string()).or_default();
        }
    }

    let empty = VarSet::new();
    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;

        for target in links.targets() {
            let inherited = vars.get(target).cloned().unwrap_or_default();
            if inherited.is_empty() {
                continue;
            }
            for source in links.sources_of(target) {
                let own = owned.get(source).unwrap_or(&empty);
                let source_vars = vars.entry(source.to_string()).or_default();
                for var in inherited.iter().filter(|v| !own.contains(*v)) {
                    changed |= source_vars.insert(var.clone());
                }
            }
        }

        debug!("propagation pass {}: changed = {}", passes, changed);
        if !changed {
            break;
        }
    }

    Propagation { vars, passes }
}
