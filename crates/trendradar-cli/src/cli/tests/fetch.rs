//! Tests for the fetch subcommand and its config overrides.

use super::parse;
use clap::Parser;
use crate::cli::{CliCommand, FetchArgs};
use trendradar_core::config::CrawlerConfig;
use trendradar_core::Platform;

fn fetch_args(args: &[&str]) -> FetchArgs {
    match parse(args) {
        CliCommand::Fetch(a) => a,
        _ => panic!("expected Fetch"),
    }
}

#[test]
fn cli_parse_fetch_defaults() {
    let a = fetch_args(&["trendradar", "fetch"]);
    assert!(a.ids.is_empty());
    assert!(a.workers.is_none());
    assert!(a.timeout.is_none());
    assert!(a.proxy.is_none());
    assert!(!a.sequential);
    assert!(a.output.is_none());
}

#[test]
fn cli_parse_fetch_ids_with_aliases() {
    let a = fetch_args(&["trendradar", "fetch", "weibo", "baidu=Baidu Hot"]);
    assert_eq!(
        a.ids,
        vec![
            Platform::new("weibo"),
            Platform::with_name("baidu", "Baidu Hot")
        ]
    );
}

#[test]
fn cli_parse_fetch_options() {
    let a = fetch_args(&[
        "trendradar",
        "fetch",
        "--workers",
        "8",
        "--timeout",
        "3",
        "--proxy",
        "http://127.0.0.1:10086",
        "--api-url",
        "http://localhost/api/s",
        "--sequential",
        "--interval",
        "250",
        "-o",
        "/tmp/out.json",
    ]);
    assert_eq!(a.workers, Some(8));
    assert_eq!(a.timeout, Some(3));
    assert_eq!(a.proxy.as_deref(), Some("http://127.0.0.1:10086"));
    assert_eq!(a.api_url.as_deref(), Some("http://localhost/api/s"));
    assert!(a.sequential);
    assert_eq!(a.interval, Some(250));
    assert_eq!(
        a.output.as_deref(),
        Some(std::path::Path::new("/tmp/out.json"))
    );
}

#[test]
fn cli_parse_fetch_rejects_empty_id() {
    assert!(crate::cli::Cli::try_parse_from(["trendradar", "fetch", "=Alias"]).is_err());
}

#[test]
fn fetch_overrides_apply_to_config() {
    let a = fetch_args(&[
        "trendradar",
        "fetch",
        "zhihu",
        "--workers",
        "2",
        "--proxy",
        "http://proxy:8080",
    ]);
    let mut cfg = CrawlerConfig::default();
    a.apply(&mut cfg);
    assert_eq!(cfg.max_workers, 2);
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.effective_proxy(), Some("http://proxy:8080"));
    assert_eq!(cfg.platforms, vec![Platform::new("zhihu")]);
}

#[test]
fn fetch_without_ids_keeps_configured_platforms() {
    let a = fetch_args(&["trendradar", "fetch"]);
    let mut cfg = CrawlerConfig::default();
    let before = cfg.platforms.clone();
    a.apply(&mut cfg);
    assert_eq!(cfg.platforms, before);
    assert!(cfg.effective_proxy().is_none());
}
