//! # Loot Display
//!
//! Plain-text and JSON rendering of resolved enemy groups.

use crate::{EncounterRequest, LootBag, LootError, LootResult};
use serde::Serialize;

/// The outcome of one enemy group, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupReport {
    /// 1-based position of the group in the request list
    pub group: usize,
    /// The resolved request; absent when the descriptor did not parse
    #[serde(flatten)]
    pub request: Option<EncounterRequest>,
    /// Descriptor text that could not be parsed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<String>,
    /// One bag per resolution; empty when the group failed
    pub bags: Vec<LootBag>,
    /// Why the group produced no loot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GroupReport {
    /// Captures a group's result, turning a failure into an explanatory
    /// message rather than partial loot.
    pub fn new(group: usize, request: &EncounterRequest, outcome: LootResult<Vec<LootBag>>) -> Self {
        let (bags, error) = match outcome {
            Ok(bags) => (bags, None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };
        Self {
            group,
            request: Some(EncounterRequest {
                count: request.count.max(1),
                ..*request
            }),
            descriptor: None,
            bags,
            error,
        }
    }

    /// A group whose descriptor could not be turned into a request.
    pub fn unparsed(group: usize, descriptor: &str, error: LootError) -> Self {
        Self {
            group,
            request: None,
            descriptor: Some(descriptor.to_string()),
            bags: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Difficulty is printed as a float (`CR 1.0`, `CR 0.25`).
    pub fn header(&self) -> String {
        match &self.request {
            Some(request) => format!(
                "Enemy group {}: CR {:?}, count {}, {}",
                self.group,
                request.difficulty,
                request.count,
                if request.is_hoard { "Hoard" } else { "Individual" }
            ),
            None => format!(
                "Enemy group {}: '{}'",
                self.group,
                self.descriptor.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// Display lines for one bag, each indented by two spaces.
///
/// # Examples
///
/// ```
/// use lootgen::{format_loot, LootBag};
///
/// let mut bag = LootBag::new();
/// assert_eq!(format_loot(&bag), vec!["  No additional treasure"]);
///
/// bag.coins = vec!["12 cp".to_string(), "3 gp".to_string()];
/// assert_eq!(format_loot(&bag), vec!["  Coins: 12 cp, 3 gp"]);
/// ```
pub fn format_loot(bag: &LootBag) -> Vec<String> {
    let sections = [
        ("Coins", &bag.coins),
        ("Gems", &bag.gems),
        ("Art", &bag.art),
        ("Magic", &bag.magic),
    ];
    let mut lines: Vec<String> = sections
        .iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(label, entries)| format!("  {}: {}", label, entries.join(", ")))
        .collect();
    if lines.is_empty() {
        lines.push("  No additional treasure".to_string());
    }
    lines
}

/// Renders every group as text, groups separated by a blank line.
pub fn render_text(groups: &[GroupReport]) -> String {
    let mut buffer = Vec::new();
    for group in groups {
        buffer.push(group.header());
        match &group.error {
            Some(error) => buffer.push(format!("  Error while generating loot: {}", error)),
            None => {
                for bag in &group.bags {
                    buffer.extend(format_loot(bag));
                }
            }
        }
        buffer.push(String::new());
    }
    buffer.join("\n").trim().to_string()
}

/// Renders every group as a pretty-printed JSON array.
pub fn render_json(groups: &[GroupReport]) -> LootResult<String> {
    Ok(serde_json::to_string_pretty(groups)?)
}
