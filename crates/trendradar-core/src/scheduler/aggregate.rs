//! Merge completed platform tasks into the batch report.
//!
//! The coordinator is the only writer: it feeds completions in finish order,
//! so the result map, name map, failed list and completed count need no lock.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::fetch::FetchError;
use crate::parser::PlatformResult;
use crate::platform::Platform;

use super::progress::FetchProgress;
use super::task::TaskOutcome;

/// Platform id → its parsed list.
pub type ResultSet = BTreeMap<String, PlatformResult>;
/// Platform id → display alias.
pub type NameMap = BTreeMap<String, String>;

/// Output of one batch. `results` and `id_to_name` always share the same keys;
/// `failed_ids` holds only platforms that errored, in completion order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FetchReport {
    pub results: ResultSet,
    pub id_to_name: NameMap,
    pub failed_ids: Vec<String>,
    /// Number of distinct platforms dispatched.
    pub total: usize,
}

impl FetchReport {
    pub fn into_parts(self) -> (ResultSet, NameMap, Vec<String>) {
        (self.results, self.id_to_name, self.failed_ids)
    }

    pub fn succeeded(&self) -> usize {
        self.results.len()
    }

    /// Platforms that neither produced data nor failed (benign non-matches).
    pub fn empty(&self) -> usize {
        self.total
            .saturating_sub(self.results.len() + self.failed_ids.len())
    }
}

pub(super) struct Aggregator {
    completed: usize,
    report: FetchReport,
}

impl Aggregator {
    pub(super) fn new(total: usize) -> Self {
        Self {
            completed: 0,
            report: FetchReport {
                total,
                ..FetchReport::default()
            },
        }
    }

    /// Merges one completion and returns the progress after it.
    pub(super) fn record(&mut self, outcome: TaskOutcome) -> FetchProgress {
        let TaskOutcome { platform, result } = outcome;
        match result.and_then(|parsed| self.merge(&platform, parsed)) {
            Ok(Some(titles)) => {
                tracing::info!(platform = %platform.id, titles, "platform fetched");
            }
            Ok(None) => {
                tracing::debug!(platform = %platform.id, "no usable data");
            }
            Err(e) => self.fail(&platform.id, &e),
        }
        self.advance()
    }

    /// Counts a completion whose platform is unknown (its task was lost);
    /// the platform is failed later via `fail`.
    pub(super) fn record_lost(&mut self) -> FetchProgress {
        self.advance()
    }

    pub(super) fn fail(&mut self, id: &str, e: &FetchError) {
        tracing::warn!(platform = id, kind = ?e.kind(), "platform failed: {}", e);
        self.report.failed_ids.push(id.to_string());
    }

    pub(super) fn finish(self) -> FetchReport {
        self.report
    }

    fn advance(&mut self) -> FetchProgress {
        self.completed += 1;
        FetchProgress::new(self.completed, self.report.total)
    }

    /// Returns the number of titles merged, or None for a benign non-match.
    fn merge(
        &mut self,
        platform: &Platform,
        parsed: Option<PlatformResult>,
    ) -> Result<Option<usize>, FetchError> {
        let Some(parsed) = parsed.filter(|r| !r.is_empty()) else {
            return Ok(None);
        };
        if self.report.results.contains_key(&platform.id) {
            return Err(FetchError::Merge(format!(
                "result for {} already merged",
                platform.id
            )));
        }
        let titles = parsed.len();
        self.report.results.insert(platform.id.clone(), parsed);
        self.report
            .id_to_name
            .insert(platform.id.clone(), platform.name.clone());
        Ok(Some(titles))
    }
}
