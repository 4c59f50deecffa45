use log::warn;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::choice::{ChoiceRegistry, OptionAdded};
use crate::graph::{propagate, LinkGraph, VarSet};
use crate::page::Visit;

static NO_VARS: VarSet = VarSet::new();

/// Everything the analysis learned about the site
///
/// Written during analysis and propagation, read-only while writing.
#[derive(Debug, Clone, Default)]
pub struct SiteState {
    registry: ChoiceRegistry,
    links: LinkGraph,
    /// Variables each page read itself, over all its visits
    local_vars: BTreeMap<String, VarSet>,
    /// Variables each page asks
    owned: BTreeMap<String, VarSet>,
    /// Converged `V(page)`
    page_vars: BTreeMap<String, VarSet>,
}

/// One page as seen by the analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub page: String,
    pub local_vars: VarSet,
    pub vars: VarSet,
    pub owned_questions: VarSet,
    pub links: BTreeSet<String>,
}

impl SiteState {
    pub fn registry(&self) -> &ChoiceRegistry {
        &self.registry
    }

    pub fn links(&self) -> &LinkGraph {
        &self.links
    }

    pub fn local_vars(&self, page: &str) -> &VarSet {
        self.local_vars.get(page).unwrap_or(&NO_VARS)
    }

    pub fn owned_questions(&self, page: &str) -> &VarSet {
        self.owned.get(page).unwrap_or(&NO_VARS)
    }

    /// Converged variable set; empty before [`SiteState::propagate`]
    pub fn page_vars(&self, page: &str) -> &VarSet {
        self.page_vars.get(page).unwrap_or(&NO_VARS)
    }

    pub(crate) fn page_vars_map(&self) -> &BTreeMap<String, VarSet> {
        &self.page_vars
    }

    /// Pages rendered successfully at least once
    pub fn pages(&self) -> impl Iterator<Item = &str> {
        self.local_vars.keys().map(String::as_str)
    }

    /// Fold a successful visit of `page` into the state
    pub(crate) fn commit(&mut self, page: &str, visit: &Visit) {
        self.local_vars
            .entry(page.to_string())
            .or_default()
            .extend(visit.touched.iter().cloned());

        for (var, prompt) in &visit.questions {
            self.registry.declare(var, prompt);
            self.owned
                .entry(page.to_string())
                .or_default()
                .insert(var.clone());
        }

        for (var, option) in &visit.options {
            if let OptionAdded::LabelConflict { existing } =
                self.registry.add_option(var, option.clone())
            {
                warn!(
                    "{}: option '{}' of '{}' labelled '{}', keeping earlier label '{}'",
                    page, option.value, var, option.label, existing
                );
            }
        }

        for target in &visit.links {
            self.links.add_edge(page, target);
        }
    }

    /// Run the fixed point; returns the number of passes
    pub fn propagate(&mut self) -> usize {
        let result = propagate(&self.links, &self.local_vars, &self.owned);
        self.page_vars = result.vars;
        result.passes
    }

    pub fn summaries(&self) -> Vec<PageSummary> {
        self.pages()
            .map(|page| PageSummary {
                page: page.to_string(),
                local_vars: self.local_vars(page).clone(),
                vars: self.page_vars(page).clone(),
                owned_questions: self.owned_questions(page).clone(),
                links: self.links.targets_of(page).map(str::to_string).collect(),
            })
            .collect()
    }
}
