//! Site generation: analyze, propagate, write
//!
//! # Phases
//! 1. Analyze: render every reachable (page, picks) instance from the start
//!    page with link placeholders, collecting questions, links and reads
//! 2. Propagate: compute `V(page)` for every page to a fixed point
//! 3. Write: render again with real links, name each instance by the picks
//!    in `V(page)`, append breadcrumbs and write the file
//!
//! Both traversals use a LIFO work list and visit each (page, picks) pair
//! once. A page that fails with a content defect is reported and skipped;
//! any other error aborts the run.

pub mod output;
pub mod report;
pub mod state;

pub use report::{
    distinct_failures, AnalysisReport, GenerateReport, PageFailure, UnexpectedRead, WriteReport,
    WrittenVariant,
};
pub use state::{PageSummary, SiteState};

use log::{debug, warn};
use std::collections::HashSet;
use std::path::Path;

use crate::choice::Picks;
use crate::config::Config;
use crate::error::Result;
use crate::page::{
    breadcrumbs, validate_page_id, variant_key, visit_page, PageSource, Visit, VisitContext,
    VisitMode,
};
use crate::template::TemplateEngine;

/// LIFO work list that skips (page, picks) pairs it has already handed out
struct WorkList {
    stack: Vec<(String, Picks)>,
    seen: HashSet<(String, Picks)>,
}

impl WorkList {
    fn starting_at(page: &str) -> Self {
        Self {
            stack: vec![(page.to_string(), Picks::new())],
            seen: HashSet::new(),
        }
    }

    /// Enqueue so that the first link is handled first
    fn extend(&mut self, next: Vec<(String, Picks)>) {
        self.stack.extend(next.into_iter().rev());
    }

    fn pop(&mut self) -> Option<(String, Picks)> {
        while let Some(item) = self.stack.pop() {
            if self.seen.insert(item.clone()) {
                return Some(item);
            }
        }
        None
    }
}

/// Drives the phases over one page source
pub struct Generator<'a> {
    source: &'a dyn PageSource,
    config: &'a Config,
    engine: TemplateEngine,
    data: toml::Value,
    state: SiteState,
}

impl<'a> Generator<'a> {
    pub fn new(source: &'a dyn PageSource, config: &'a Config) -> Self {
        Self {
            source,
            config,
            engine: TemplateEngine::new(),
            data: config.data_value(),
            state: SiteState::default(),
        }
    }

    pub fn state(&self) -> &SiteState {
        &self.state
    }

    /// All three phases
    pub fn run(&mut self, start: &str, out_dir: &Path) -> Result<GenerateReport> {
        let analysis = self.analyze(start)?;
        let passes = self.propagate();
        let write = self.write(start, out_dir)?;
        Ok(GenerateReport {
            analysis,
            passes,
            write,
        })
    }

    /// Visit everything reachable from `start`, accumulating into the state
    pub fn analyze(&mut self, start: &str) -> Result<AnalysisReport> {
        debug!("analyze: starting at {}", start);
        let mut report = AnalysisReport::default();
        let mut work = WorkList::starting_at(start);

        while let Some((page, picks)) = work.pop() {
            report.visited += 1;
            let ctx = VisitContext {
                source: self.source,
                engine: self.engine,
                data: &self.data,
                registry: self.state.registry(),
            };

            match visit_page(&ctx, &page, &picks, VisitMode::Analyze) {
                Ok(visit) => {
                    debug!("analyzed {} {}: read {:?}", page, picks, visit.touched);
                    self.state.commit(&page, &visit);
                    work.extend(visit.next);
                }
                Err(error) if error.is_content_defect() => {
                    debug!("analyze: {} {} failed: {}", page, picks, error);
                    report.failures.push(PageFailure { page, picks, error });
                }
                Err(error) => return Err(error),
            }
        }

        debug!(
            "analyze: {} instances, {} pages, {} questions",
            report.visited,
            self.state.pages().count(),
            self.state.registry().len()
        );
        Ok(report)
    }

    /// Compute `V(page)` from what analysis collected
    pub fn propagate(&mut self) -> usize {
        let passes = self.state.propagate();
        debug!("propagate: fixed point after {} passes", passes);
        passes
    }

    /// Render and write every reachable variant under the converged sets
    pub fn write(&self, start: &str, out_dir: &Path) -> Result<WriteReport> {
        output::prepare_out_dir(out_dir)?;
        debug!("write: starting at {} into {}", start, out_dir.display());

        let ctx = VisitContext {
            source: self.source,
            engine: self.engine,
            data: &self.data,
            registry: self.state.registry(),
        };
        let mode = VisitMode::Write {
            page_vars: self.state.page_vars_map(),
        };

        let mut report = WriteReport::default();
        let mut written_keys = HashSet::new();
        let mut work = WorkList::starting_at(start);

        while let Some((page, picks)) = work.pop() {
            report.visited += 1;
            let visit = match visit_page(&ctx, &page, &picks, mode) {
                Ok(visit) => visit,
                Err(error) if error.is_content_defect() => {
                    debug!("write: {} {} failed: {}", page, picks, error);
                    report.failures.push(PageFailure { page, picks, error });
                    continue;
                }
                Err(error) => return Err(error),
            };

            let vars = self.state.page_vars(&page);
            for var in visit.touched.difference(vars) {
                warn!(
                    "{}: read '{}' under {} but analysis never saw it read; variants may be merged",
                    page, var, picks
                );
                report.unexpected_reads.push(UnexpectedRead {
                    page: page.clone(),
                    picks: picks.clone(),
                    var: var.clone(),
                });
            }

            let Visit { text, next, .. } = visit;
            work.extend(next);

            let key = variant_key(&page, &picks, vars);
            // Picked values go into the file name verbatim
            if let Err(error) = validate_page_id(&key) {
                debug!("write: {} {} failed: {}", page, picks, error);
                report.failures.push(PageFailure { page, picks, error });
                continue;
            }
            if !written_keys.insert(key.clone()) {
                debug!("write: {} already written", key);
                continue;
            }

            let mut content = text;
            content.push('\n');
            content.push_str(&breadcrumbs(
                &page,
                &picks,
                vars,
                self.state.registry(),
                &self.config.render.breadcrumb_heading,
            ));

            let path = output::write_variant(out_dir, &key, &content)?;
            debug!("write: {} {} -> {}", page, picks, path.display());
            report.written.push(WrittenVariant { page, key, path });
        }

        Ok(report)
    }
}
