//! Public entry points for a fetch batch.

use std::sync::Arc;
use std::time::Duration;

use crate::config::{CrawlerConfig, DEFAULT_API_URL};
use crate::fetch::FetchOptions;
use crate::platform::{dedup_platforms, Platform};

use super::aggregate::FetchReport;
use super::parallel::run_platforms_parallel;
use super::progress::FetchProgress;
use super::sequential::run_platforms_sequential;

/// Fetches trending lists for many platforms with bounded concurrency.
///
/// Every platform gets exactly one request. Failures are collected into
/// `FetchReport::failed_ids` and never abort the batch.
#[derive(Debug, Clone)]
pub struct ParallelFetcher {
    options: Arc<FetchOptions>,
    max_workers: usize,
}

impl ParallelFetcher {
    pub const DEFAULT_MAX_WORKERS: usize = 5;

    /// `max_workers` below 1 is treated as 1.
    pub fn new(options: FetchOptions, max_workers: usize) -> Self {
        Self {
            options: Arc::new(options),
            max_workers: max_workers.max(1),
        }
    }

    pub fn from_config(cfg: &CrawlerConfig) -> Self {
        Self::new(cfg.fetch_options(), cfg.max_workers)
    }

    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    /// Fetches all platforms concurrently. Repeated ids are fetched once.
    ///
    /// `request_interval_ms` does not pace requests here; it is only logged.
    /// If `progress_tx` is `Some`, a `FetchProgress` is sent after every
    /// completed platform. Sending never waits on the receiver.
    pub async fn fetch_all_parallel(
        &self,
        platforms: &[Platform],
        progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<FetchProgress>>,
        request_interval_ms: u64,
    ) -> FetchReport {
        let Some(platforms) = prepare(platforms) else {
            return FetchReport::default();
        };
        let total = platforms.len();
        tracing::info!(
            "fetching {} platforms in parallel (workers: {})",
            total,
            self.max_workers
        );
        if request_interval_ms > 0 {
            tracing::info!(
                "request interval: {} ms (not applied in parallel mode)",
                request_interval_ms
            );
        }

        let report = run_platforms_parallel(
            platforms,
            Arc::clone(&self.options),
            self.max_workers,
            progress_tx,
        )
        .await;
        log_summary("parallel", &report);
        report
    }

    /// Fetches platforms one by one in input order, waiting
    /// `request_interval_ms` between requests.
    pub async fn fetch_all_sequential(
        &self,
        platforms: &[Platform],
        progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<FetchProgress>>,
        request_interval_ms: u64,
    ) -> FetchReport {
        let Some(platforms) = prepare(platforms) else {
            return FetchReport::default();
        };
        tracing::info!(
            "fetching {} platforms sequentially (interval: {} ms)",
            platforms.len(),
            request_interval_ms
        );

        let report = run_platforms_sequential(
            platforms,
            Arc::clone(&self.options),
            Duration::from_millis(request_interval_ms),
            progress_tx,
        )
        .await;
        log_summary("sequential", &report);
        report
    }
}

/// Convenience wrapper: build a fetcher and run one parallel batch.
pub async fn parallel_fetch_all(
    platforms: &[Platform],
    proxy_url: Option<&str>,
    api_url: Option<&str>,
    max_workers: usize,
    timeout: Duration,
    progress_tx: Option<&tokio::sync::mpsc::UnboundedSender<FetchProgress>>,
) -> FetchReport {
    let options = FetchOptions {
        api_url: api_url.unwrap_or(DEFAULT_API_URL).to_string(),
        proxy: proxy_url.map(str::to_string),
        timeout,
    };
    ParallelFetcher::new(options, max_workers)
        .fetch_all_parallel(platforms, progress_tx, 0)
        .await
}

/// Dedups ids; None when there is nothing to fetch.
fn prepare(platforms: &[Platform]) -> Option<Vec<Platform>> {
    if platforms.is_empty() {
        tracing::warn!("no platforms to fetch");
        return None;
    }
    let unique = dedup_platforms(platforms);
    if unique.len() < platforms.len() {
        tracing::warn!(
            "ignoring {} duplicate platform id(s)",
            platforms.len() - unique.len()
        );
    }
    Some(unique)
}

fn log_summary(mode: &str, report: &FetchReport) {
    tracing::info!(
        "{} fetch finished: {}/{} succeeded, {} failed, {} without data",
        mode,
        report.succeeded(),
        report.total,
        report.failed_ids.len(),
        report.empty()
    );
}
