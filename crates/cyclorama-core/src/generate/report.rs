use std::collections::HashSet;
use std::path::PathBuf;

use crate::choice::Picks;
use crate::error::CycloramaError;

/// A (page, picks) instance that could not be rendered
#[derive(Debug)]
pub struct PageFailure {
    pub page: String,
    pub picks: Picks,
    pub error: CycloramaError,
}

#[derive(Debug, Default)]
pub struct AnalysisReport {
    /// Distinct (page, picks) instances rendered or attempted
    pub visited: usize,
    pub failures: Vec<PageFailure>,
}

/// One file written by the write phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenVariant {
    pub page: String,
    pub key: String,
    pub path: PathBuf,
}

/// A variable read while writing that analysis did not put in `V(page)`
///
/// The variant was written under a key that ignores `var`, so instances
/// differing in it may have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedRead {
    pub page: String,
    pub picks: Picks,
    pub var: String,
}

#[derive(Debug, Default)]
pub struct WriteReport {
    pub visited: usize,
    /// In write order; each key appears once
    pub written: Vec<WrittenVariant>,
    pub failures: Vec<PageFailure>,
    pub unexpected_reads: Vec<UnexpectedRead>,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub analysis: AnalysisReport,
    /// Propagation passes until the fixed point
    pub passes: usize,
    pub write: WriteReport,
}

impl GenerateReport {
    /// Failures of both phases, one per distinct (page, message)
    pub fn distinct_failures(&self) -> Vec<&PageFailure> {
        distinct_failures(self.analysis.failures.iter().chain(&self.write.failures))
    }
}

/// Keep the first failure for each (page, message) pair
///
/// A page that fails the same way under many picks is reported once.
pub fn distinct_failures<'a>(
    failures: impl IntoIterator<Item = &'a PageFailure>,
) -> Vec<&'a PageFailure> {
    let mut seen = HashSet::new();
    failures
        .into_iter()
        .filter(|f| seen.insert((f.page.clone(), f.error.to_string())))
        .collect()
}
