//! `trendradar platforms` – list configured platforms.

use anyhow::Result;
use trendradar_core::config::CrawlerConfig;

pub fn run_platforms(cfg: &CrawlerConfig) -> Result<()> {
    if cfg.platforms.is_empty() {
        println!("No platforms configured.");
        return Ok(());
    }
    println!("ID                       NAME");
    for p in &cfg.platforms {
        println!("{:<24} {}", p.id, p.name);
    }
    Ok(())
}
