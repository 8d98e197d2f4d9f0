//! Decode a trending-list body into a `PlatformResult`.
//!
//! Positions are 1-based indexes into the original `items` list. Items
//! without a usable title are skipped but still consume their position, so
//! later ranks are never renumbered.

mod types;

pub use types::{PlatformResult, RankedItem};

use serde_json::{Map, Value};

use crate::fetch::FetchError;

/// Parses a JSON body. Missing or null `items` yields an empty result, not an error.
pub fn parse_platform(body: &str) -> Result<PlatformResult, FetchError> {
    let value: Value = serde_json::from_str(body)?;
    let obj = value
        .as_object()
        .ok_or_else(|| FetchError::Malformed("body is not a JSON object".to_string()))?;

    let items = match obj.get("items") {
        None | Some(Value::Null) => return Ok(PlatformResult::new()),
        Some(Value::Array(items)) => items,
        Some(_) => return Err(FetchError::Malformed("`items` is not a list".to_string())),
    };

    let mut result = PlatformResult::new();
    for (i, item) in items.iter().enumerate() {
        let rank = (i + 1) as u32;
        let item = item
            .as_object()
            .ok_or_else(|| FetchError::Malformed(format!("item {} is not an object", rank)))?;
        let Some(title) = normalize_title(item.get("title")) else {
            continue;
        };
        result.record(
            title,
            rank,
            string_field(item, "url"),
            string_field(item, "mobileUrl"),
        );
    }
    Ok(result)
}

/// Null, floats and blanks are not titles. Other non-string values are
/// rendered as compact JSON text (`2024`, `true`, `["a"]`).
fn normalize_title(value: Option<&Value>) -> Option<String> {
    let raw = match value? {
        Value::Null => return None,
        Value::Number(n) if n.is_f64() => return None,
        Value::String(s) => s.trim().to_string(),
        other => other.to_string(),
    };
    if raw.is_empty() {
        None
    } else {
        Some(raw)
    }
}

fn string_field(item: &Map<String, Value>, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
