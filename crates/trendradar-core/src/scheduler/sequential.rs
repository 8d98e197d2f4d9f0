//! Fetch platforms one at a time, pausing between requests.

use std::sync::Arc;
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::platform::Platform;

use super::aggregate::{Aggregator, FetchReport};
use super::progress::FetchProgress;
use super::task::run_platform_task;

/// Same pipeline as the parallel path, in input order, sleeping `interval`
/// between consecutive requests.
pub(super) async fn run_platforms_sequential(
    platforms: Vec<Platform>,
    opts: Arc<FetchOptions>,
    interval: Duration,
    progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<FetchProgress>>,
) -> FetchReport {
    let mut aggregator = Aggregator::new(platforms.len());

    for (i, platform) in platforms.into_iter().enumerate() {
        if i > 0 && !interval.is_zero() {
            tokio::time::sleep(interval).await;
        }
        let outcome = run_platform_task(platform, Arc::clone(&opts)).await;
        let progress = aggregator.record(outcome);
        if let Some(tx) = progress_tx {
            let _ = tx.send(progress);
        }
    }

    aggregator.finish()
}
