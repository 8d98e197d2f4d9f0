//! CLI for the TrendRadar fetcher.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use trendradar_core::config::{self, CrawlerConfig};
use trendradar_core::Platform;

use commands::{run_config_path, run_fetch, run_platforms};

/// Top-level CLI for the TrendRadar fetcher.
#[derive(Debug, Parser)]
#[command(name = "trendradar")]
#[command(
    about = "TrendRadar: fetch trending lists from many platforms at once",
    long_about = None
)]
pub struct Cli {
    /// Use this config file instead of ~/.config/trendradar/config.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch trending lists (configured platforms unless IDs are given).
    Fetch(FetchArgs),

    /// List configured platforms.
    Platforms,

    /// Print the default config file location.
    ConfigPath,
}

#[derive(Debug, Clone, Args)]
pub struct FetchArgs {
    /// Platform ids, as `id` or `id=Alias`.
    #[arg(value_name = "ID", value_parser = <Platform as std::str::FromStr>::from_str)]
    pub ids: Vec<Platform>,

    /// Maximum concurrent requests.
    #[arg(long, value_name = "N")]
    pub workers: Option<usize>,

    /// Per-request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Proxy for all requests (enables proxy use for this run).
    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Base API endpoint.
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Fetch one platform at a time, waiting --interval between requests.
    #[arg(long)]
    pub sequential: bool,

    /// Request interval in milliseconds (only paces sequential mode).
    #[arg(long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Write results, names and failed ids as JSON to this file.
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl FetchArgs {
    /// Applies command-line overrides on top of the loaded config.
    pub fn apply(&self, cfg: &mut CrawlerConfig) {
        if let Some(workers) = self.workers {
            cfg.max_workers = workers;
        }
        if let Some(timeout) = self.timeout {
            cfg.request_timeout_secs = timeout;
        }
        if let Some(proxy) = &self.proxy {
            cfg.proxy_url = Some(proxy.clone());
            cfg.use_proxy = true;
        }
        if let Some(api_url) = &self.api_url {
            cfg.api_url = api_url.clone();
        }
        if let Some(interval) = self.interval {
            cfg.request_interval_ms = interval;
        }
        if !self.ids.is_empty() {
            cfg.platforms = self.ids.clone();
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch(args) => run_fetch(cfg, &args).await?,
            CliCommand::Platforms => run_platforms(&cfg)?,
            CliCommand::ConfigPath => run_config_path()?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
