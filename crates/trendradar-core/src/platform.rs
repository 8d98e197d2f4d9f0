//! Platform identifiers and their display aliases.
//!
//! A platform is addressed by its API id (`weibo`, `zhihu`, ...) and shown
//! under a display alias. Config files and the CLI accept either a bare id
//! (alias = id) or an id paired with an alias.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// One platform to fetch: API identifier plus display alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PlatformRepr")]
pub struct Platform {
    pub id: String,
    pub name: String,
}

/// Accepted config shapes: `"weibo"`, `["weibo", "Weibo"]` or `{ id = "weibo", name = "Weibo" }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlatformRepr {
    Bare(String),
    Pair(String, String),
    Table { id: String, name: Option<String> },
}

impl TryFrom<PlatformRepr> for Platform {
    type Error = String;

    fn try_from(repr: PlatformRepr) -> Result<Self, Self::Error> {
        let (id, name) = match repr {
            PlatformRepr::Bare(id) => (id, None),
            PlatformRepr::Pair(id, name) => (id, Some(name)),
            PlatformRepr::Table { id, name } => (id, name),
        };
        Platform::try_new(&id, name.as_deref())
    }
}

impl Platform {
    /// Platform whose display alias is its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
        }
    }

    /// Platform with an explicit display alias.
    pub fn with_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Validating constructor: id must be non-empty after trimming.
    /// A blank alias falls back to the id.
    pub fn try_new(id: &str, name: Option<&str>) -> Result<Self, String> {
        let id = id.trim();
        if id.is_empty() {
            return Err("platform id must not be empty".to_string());
        }
        match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => Ok(Self::with_name(id, name)),
            None => Ok(Self::new(id)),
        }
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        Platform::new(id)
    }
}

impl From<(&str, &str)> for Platform {
    fn from((id, name): (&str, &str)) -> Self {
        Platform::with_name(id, name)
    }
}

/// CLI form: `id` or `id=Alias`.
impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((id, name)) => Platform::try_new(id, Some(name)),
            None => Platform::try_new(s, None),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.id == self.name {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} ({})", self.id, self.name)
        }
    }
}

/// Drops repeated ids, keeping the first occurrence (and its alias) in input order.
pub fn dedup_platforms(platforms: &[Platform]) -> Vec<Platform> {
    let mut seen = HashSet::new();
    platforms
        .iter()
        .filter(|p| seen.insert(p.id.as_str()))
        .cloned()
        .collect()
}
