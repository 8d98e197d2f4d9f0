//! One platform's fetch-parse cycle, run on the blocking pool.

use std::sync::Arc;

use crate::fetch::{self, FetchError, FetchOptions, FetchResponse};
use crate::parser::{self, PlatformResult};
use crate::platform::Platform;

/// What a finished task hands to the aggregator. `Ok(None)` is a benign non-match.
#[derive(Debug)]
pub(super) struct TaskOutcome {
    pub(super) platform: Platform,
    pub(super) result: Result<Option<PlatformResult>, FetchError>,
}

/// Blocking: one GET, then parse the body if its status was accepted.
pub(super) fn fetch_and_parse(
    id: &str,
    opts: &FetchOptions,
) -> Result<Option<PlatformResult>, FetchError> {
    match fetch::fetch_platform(id, opts)? {
        FetchResponse::NonMatch { .. } => Ok(None),
        FetchResponse::Data { body, .. } => parser::parse_platform(&body).map(Some),
    }
}

/// Runs `fetch_and_parse` in `spawn_blocking`. Never fails: a panicked worker
/// becomes a merge error for this platform.
pub(super) async fn run_platform_task(platform: Platform, opts: Arc<FetchOptions>) -> TaskOutcome {
    let id = platform.id.clone();
    let result = tokio::task::spawn_blocking(move || fetch_and_parse(&id, &opts))
        .await
        .unwrap_or_else(|e| Err(FetchError::Merge(format!("worker task: {}", e))));
    TaskOutcome { platform, result }
}
