//! Per-platform result types: title → ranks and links.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;

/// One distinct title within a platform's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedItem {
    /// 1-based positions at which the title appeared, in encounter order.
    pub ranks: Vec<u32>,
    pub url: String,
    pub mobile_url: String,
}

/// Title → `RankedItem` for one platform, iterated in first-appearance order.
/// Serializes as a JSON object keyed by title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformResult {
    entries: Vec<(String, RankedItem)>,
    index: HashMap<String, usize>,
}

impl PlatformResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, title: &str) -> Option<&RankedItem> {
        self.index.get(title).map(|&i| &self.entries[i].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RankedItem)> {
        self.entries.iter().map(|(t, item)| (t.as_str(), item))
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(t, _)| t.as_str())
    }

    /// Records `title` at `rank`. A repeated title only gains the rank; its first-seen links stay.
    pub fn record(&mut self, title: String, rank: u32, url: String, mobile_url: String) {
        if let Some(&i) = self.index.get(&title) {
            self.entries[i].1.ranks.push(rank);
            return;
        }
        self.index.insert(title.clone(), self.entries.len());
        self.entries.push((
            title,
            RankedItem {
                ranks: vec![rank],
                url,
                mobile_url,
            },
        ));
    }
}

impl Serialize for PlatformResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, item) in &self.entries {
            map.serialize_entry(title, item)?;
        }
        map.end()
    }
}
