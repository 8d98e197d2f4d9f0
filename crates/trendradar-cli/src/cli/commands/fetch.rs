//! `trendradar fetch` – fetch trending lists and print a summary.

use anyhow::{Context, Result};
use std::path::Path;
use trendradar_core::config::CrawlerConfig;
use trendradar_core::{FetchProgress, FetchReport, ParallelFetcher};

use crate::cli::FetchArgs;

pub async fn run_fetch(mut cfg: CrawlerConfig, args: &FetchArgs) -> Result<()> {
    args.apply(&mut cfg);
    if cfg.platforms.is_empty() {
        println!("No platforms to fetch.");
        return Ok(());
    }

    let fetcher = ParallelFetcher::from_config(&cfg);
    let (progress_tx, mut progress_rx) =
        tokio::sync::mpsc::unbounded_channel::<FetchProgress>();
    let progress_handle = tokio::spawn(async move {
        while let Some(p) = progress_rx.recv().await {
            println!("  {:>5.1}% ({}/{})", p.percent, p.completed, p.total);
        }
    });

    let report = if args.sequential {
        fetcher
            .fetch_all_sequential(&cfg.platforms, Some(&progress_tx), cfg.request_interval_ms)
            .await
    } else {
        fetcher
            .fetch_all_parallel(&cfg.platforms, Some(&progress_tx), cfg.request_interval_ms)
            .await
    };
    drop(progress_tx);
    let _ = progress_handle.await;

    print_summary(&report);
    if let Some(path) = &args.output {
        write_report(&report, path)?;
        println!("Wrote {}", path.display());
    }
    Ok(())
}

fn print_summary(report: &FetchReport) {
    println!(
        "Fetched {}/{} platforms ({} failed, {} without data)",
        report.succeeded(),
        report.total,
        report.failed_ids.len(),
        report.empty()
    );
    for (id, result) in &report.results {
        let name = report.id_to_name.get(id).map(String::as_str).unwrap_or(id);
        println!("  {:<24} {:>4} titles  [{}]", name, result.len(), id);
    }
    if !report.failed_ids.is_empty() {
        println!("Failed: {}", report.failed_ids.join(", "));
    }
}

fn write_report(report: &FetchReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("serialize fetch report")?;
    std::fs::write(path, json).with_context(|| format!("write report: {}", path.display()))?;
    tracing::info!("wrote fetch report to {}", path.display());
    Ok(())
}
