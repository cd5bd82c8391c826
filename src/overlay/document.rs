//! # Overlay Documents
//!
//! Reading and writing the custom items JSON document:
//!
//! ```json
//! {
//!   "GLOBAL": ["Bent spoon"],
//!   "CR_SCOPED": [{"range": [17, null], "item": "Dragon scale"}],
//!   "A": ["Lucky coin"]
//! }
//! ```
//!
//! Malformed entries are skipped with a warning; only a document that is
//! neither an object nor an array is rejected outright.

use super::{clean_item, CustomItemOverlay};
use crate::{DifficultyRange, LootError, LootResult};
use log::{debug, info, warn};
use serde_json::{json, Map, Value};
use std::borrow::Cow;
use std::path::Path;

const GLOBAL_KEY: &str = "GLOBAL";
const CR_SCOPED_KEY: &str = "CR_SCOPED";

/// Number tokens outside the JSON grammar, longest first.
const NON_FINITE_TOKENS: [&str; 3] = ["-Infinity", "Infinity", "NaN"];

/// Tier that receives the items of a document that is a bare array.
const BARE_LIST_TIER: &str = "A";

impl CustomItemOverlay {
    /// Parses a custom items document.
    ///
    /// Bare `Infinity`, `-Infinity` and `NaN` tokens are read as `null`, so
    /// open-ended ranges written by float-preserving JSON writers still load.
    pub fn from_json_str(text: &str) -> LootResult<Self> {
        let value: Value = serde_json::from_str(&relax_non_finite(text))?;
        Self::from_value(&value)
    }

    /// Builds an overlay from an already parsed document.
    ///
    /// Keys are matched case-insensitively. Every list key other than
    /// `GLOBAL` and `CR_SCOPED` names a tier.
    pub fn from_value(value: &Value) -> LootResult<Self> {
        let mut overlay = CustomItemOverlay::new();
        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    let key = key.trim().to_uppercase();
                    let Some(entries) = value.as_array() else {
                        warn!("Skipping custom items key '{}': expected a list", key);
                        continue;
                    };
                    match key.as_str() {
                        GLOBAL_KEY => overlay.global = item_list(entries),
                        CR_SCOPED_KEY => {
                            for entry in entries {
                                match scoped_entry(entry) {
                                    Ok((range, item)) => overlay.add_difficulty_item(range, &item),
                                    Err(e) => warn!("Skipping scoped custom item: {}", e),
                                }
                            }
                        }
                        _ => {
                            let items = item_list(entries);
                            if !items.is_empty() {
                                overlay.by_tier.insert(key, items);
                            }
                        }
                    }
                }
            }
            Value::Array(entries) => {
                let items = item_list(entries);
                if !items.is_empty() {
                    overlay.by_tier.insert(BARE_LIST_TIER.to_string(), items);
                }
            }
            _ => {
                return Err(LootError::OverlayParse(
                    "expected an object or a list of items".to_string(),
                ))
            }
        }
        debug!(
            "Parsed custom items: {} tiers, {} global, {} scoped",
            overlay.by_tier.len(),
            overlay.global.len(),
            overlay.by_difficulty.len()
        );
        Ok(overlay)
    }

    /// Reads a custom items file.
    pub fn load(path: &Path) -> LootResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let overlay = Self::from_json_str(&text)?;
        info!("Loaded custom items from {}", path.display());
        Ok(overlay)
    }

    /// Serializes the overlay back into the document shape it is read from.
    ///
    /// Open-ended range bounds are written as `null`.
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        for (tier, items) in &self.by_tier {
            if !items.is_empty() {
                map.insert(tier.clone(), json!(items));
            }
        }
        if !self.global.is_empty() {
            map.insert(GLOBAL_KEY.to_string(), json!(self.global));
        }
        if !self.by_difficulty.is_empty() {
            let scoped: Vec<Value> = self
                .by_difficulty
                .iter()
                .map(|scoped| {
                    json!({
                        "range": [bound_value(scoped.range.low), bound_value(scoped.range.high)],
                        "item": scoped.item,
                    })
                })
                .collect();
            map.insert(CR_SCOPED_KEY.to_string(), Value::Array(scoped));
        }
        Value::Object(map)
    }

    /// Writes the overlay as a pretty-printed document.
    pub fn save(&self, path: &Path) -> LootResult<()> {
        let text = serde_json::to_string_pretty(&self.to_value())?;
        std::fs::write(path, text)?;
        info!("Saved custom items to {}", path.display());
        Ok(())
    }
}

/// Replaces non-finite number tokens outside string literals with `null`.
fn relax_non_finite(text: &str) -> Cow<'_, str> {
    if !NON_FINITE_TOKENS.iter().any(|token| text.contains(token)) {
        return Cow::Borrowed(text);
    }

    let mut relaxed = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
        } else if c == '"' {
            in_string = true;
        } else if let Some(token) = NON_FINITE_TOKENS
            .iter()
            .find(|token| rest.starts_with(**token))
        {
            relaxed.push_str("null");
            rest = &rest[token.len()..];
            continue;
        }
        relaxed.push(c);
        rest = &rest[c.len_utf8()..];
    }
    Cow::Owned(relaxed)
}

/// Coerces list entries to trimmed strings, dropping blanks and nulls.
fn item_list(entries: &[Value]) -> Vec<String> {
    entries.iter().filter_map(item_text).collect()
}

fn item_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => clean_item(text),
        other => clean_item(&other.to_string()),
    }
}

fn scoped_entry(entry: &Value) -> LootResult<(DifficultyRange, String)> {
    let malformed = |reason: &str| LootError::OverlayParse(format!("{}: {}", reason, entry));

    let range = entry
        .get("range")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("missing range"))?;
    let item = entry
        .get("item")
        .and_then(item_text)
        .ok_or_else(|| malformed("missing item"))?;
    let [low, high] = range.as_slice() else {
        return Err(malformed("range needs two bounds"));
    };

    let low = bound(low, 0.0).ok_or_else(|| malformed("non-numeric lower bound"))?;
    let high = bound(high, f64::INFINITY).ok_or_else(|| malformed("non-numeric upper bound"))?;
    Ok((DifficultyRange::new(low, high), item))
}

/// Reads a range bound: a number, a numeric string, or `null` for `open`.
fn bound(value: &Value, open: f64) -> Option<f64> {
    match value {
        Value::Null => Some(open),
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok().filter(|b| !b.is_nan()),
        _ => None,
    }
}

fn bound_value(bound: f64) -> Value {
    if bound.is_finite() {
        json!(bound)
    } else {
        Value::Null
    }
}
