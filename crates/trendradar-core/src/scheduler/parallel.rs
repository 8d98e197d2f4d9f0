//! Run platform tasks concurrently with a bounded number in flight.
//!
//! Keeps up to `max_workers` tasks running at once; when one finishes, its
//! outcome is merged and the next queued platform is started until the
//! queue is empty.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::fetch::{FetchError, FetchOptions};
use crate::platform::Platform;

use super::aggregate::{Aggregator, FetchReport};
use super::progress::FetchProgress;
use super::task::run_platform_task;

/// Fetches every platform (ids must be unique) with at most `max_workers`
/// requests in flight. Completions are merged in finish order; progress is
/// sent to `progress_tx` after each one.
pub(super) async fn run_platforms_parallel(
    platforms: Vec<Platform>,
    opts: Arc<FetchOptions>,
    max_workers: usize,
    progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<FetchProgress>>,
) -> FetchReport {
    let max_workers = max_workers.max(1);
    let mut aggregator = Aggregator::new(platforms.len());
    // Ids dispatched but not yet merged, in input order.
    let mut in_flight: Vec<String> = Vec::new();
    let mut queue: VecDeque<Platform> = platforms.into();
    let mut join_set = tokio::task::JoinSet::new();

    loop {
        while join_set.len() < max_workers {
            let Some(platform) = queue.pop_front() else {
                break;
            };
            in_flight.push(platform.id.clone());
            join_set.spawn(run_platform_task(platform, Arc::clone(&opts)));
        }

        let Some(res) = join_set.join_next().await else {
            break;
        };
        let progress = match res {
            Ok(outcome) => {
                in_flight.retain(|id| *id != outcome.platform.id);
                aggregator.record(outcome)
            }
            Err(e) => {
                tracing::error!("platform task join: {}", e);
                aggregator.record_lost()
            }
        };
        if let Some(tx) = progress_tx {
            let _ = tx.send(progress);
        }
    }

    for id in in_flight {
        aggregator.fail(&id, &FetchError::Merge("worker task lost".to_string()));
    }

    aggregator.finish()
}
