use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::platform::Platform;

/// Default trending-list API endpoint; requests go to `{api_url}?id={platform}`.
pub const DEFAULT_API_URL: &str = "https://newsnow.busiyi.world/api/s";

/// Crawler configuration loaded from `~/.config/trendradar/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// Base API endpoint.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Proxy applied to every request when `use_proxy` is set (e.g. "http://127.0.0.1:10086").
    #[serde(default)]
    pub proxy_url: Option<String>,
    /// Lets the proxy stay configured while switched off.
    #[serde(default)]
    pub use_proxy: bool,
    /// Maximum number of platforms fetched concurrently.
    #[serde(default = "default_max_workers")]
    pub max_workers: usize,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Pause between requests in sequential mode (ms). Only logged in parallel mode.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
    /// Platforms to fetch when none are given on the command line.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<Platform>,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_max_workers() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_request_interval_ms() -> u64 {
    100
}

fn default_platforms() -> Vec<Platform> {
    [
        ("toutiao", "今日头条"),
        ("baidu", "百度热搜"),
        ("weibo", "微博"),
        ("zhihu", "知乎"),
        ("bilibili-hot-search", "bilibili 热搜"),
        ("douyin", "抖音"),
        ("thepaper", "澎湃新闻"),
        ("wallstreetcn-hot", "华尔街见闻"),
        ("cls-hot", "财联社热门"),
        ("ifeng", "凤凰网"),
        ("tieba", "贴吧"),
    ]
    .into_iter()
    .map(Platform::from)
    .collect()
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            proxy_url: None,
            use_proxy: false,
            max_workers: default_max_workers(),
            request_timeout_secs: default_timeout_secs(),
            request_interval_ms: default_request_interval_ms(),
            platforms: default_platforms(),
        }
    }
}

impl CrawlerConfig {
    /// Proxy that should actually be used (None unless enabled and non-empty).
    pub fn effective_proxy(&self) -> Option<&str> {
        if !self.use_proxy {
            return None;
        }
        self.proxy_url
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    /// Request options for the HTTP client wrapper.
    pub fn fetch_options(&self) -> FetchOptions {
        FetchOptions {
            api_url: self.api_url.clone(),
            proxy: self.effective_proxy().map(str::to_string),
            timeout: Duration::from_secs(self.request_timeout_secs.max(1)),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("trendradar")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<CrawlerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = CrawlerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<CrawlerConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: CrawlerConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = CrawlerConfig::default();
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.max_workers, 5);
        assert_eq!(cfg.request_timeout_secs, 15);
        assert_eq!(cfg.request_interval_ms, 100);
        assert!(cfg.proxy_url.is_none());
        assert!(!cfg.platforms.is_empty());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = CrawlerConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: CrawlerConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.api_url, cfg.api_url);
        assert_eq!(parsed.max_workers, cfg.max_workers);
        assert_eq!(parsed.platforms, cfg.platforms);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            api_url = "http://localhost:4444/api/s"
            max_workers = 2
            request_timeout_secs = 3
            platforms = ["weibo", ["zhihu", "Zhihu"]]
        "#;
        let cfg: CrawlerConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.api_url, "http://localhost:4444/api/s");
        assert_eq!(cfg.max_workers, 2);
        assert_eq!(cfg.request_timeout_secs, 3);
        assert_eq!(cfg.request_interval_ms, 100);
        assert_eq!(cfg.platforms.len(), 2);
        assert_eq!(cfg.platforms[1].name, "Zhihu");
    }

    #[test]
    fn proxy_only_used_when_enabled() {
        let mut cfg = CrawlerConfig {
            proxy_url: Some("http://127.0.0.1:10086".to_string()),
            ..CrawlerConfig::default()
        };
        assert!(cfg.effective_proxy().is_none());
        assert!(cfg.fetch_options().proxy.is_none());
        cfg.use_proxy = true;
        assert_eq!(cfg.effective_proxy(), Some("http://127.0.0.1:10086"));
        cfg.proxy_url = Some("  ".to_string());
        assert!(cfg.effective_proxy().is_none());
    }

    #[test]
    fn fetch_options_timeout_from_secs() {
        let cfg = CrawlerConfig {
            request_timeout_secs: 7,
            ..CrawlerConfig::default()
        };
        assert_eq!(cfg.fetch_options().timeout, Duration::from_secs(7));
    }

    #[test]
    fn load_from_path_reads_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut f, b"max_workers = 9\n").unwrap();
        let cfg = load_from_path(f.path()).unwrap();
        assert_eq!(cfg.max_workers, 9);
        assert_eq!(cfg.request_timeout_secs, 15);
    }
}
