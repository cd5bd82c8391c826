//! # Overlay Module
//!
//! Caller-supplied custom magic items, spliced into tier tables at draw time.
//!
//! Items can be scoped three ways: to one tier, to every tier, or to every
//! tier while the active difficulty lies inside a range. Overlays are plain
//! lists owned by the caller; base tier tables are never modified.

pub mod document;

use crate::{DifficultyBand, DifficultyRange};
use std::collections::BTreeMap;

/// Tier name used by callers to mean "not tied to one tier".
pub const ALL_TIERS: &str = "ALL";

/// A custom item active only while the difficulty lies inside `range`.
#[derive(Debug, Clone, PartialEq)]
pub struct DifficultyScopedItem {
    pub range: DifficultyRange,
    pub item: String,
}

/// The three custom item lists consulted by every magic item draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomItemOverlay {
    /// Extra items for one named tier
    pub by_tier: BTreeMap<String, Vec<String>>,
    /// Extra items for every tier
    pub global: Vec<String>,
    /// Extra items for every tier, limited to a difficulty range
    pub by_difficulty: Vec<DifficultyScopedItem>,
}

impl CustomItemOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_tier.values().all(Vec::is_empty)
            && self.global.is_empty()
            && self.by_difficulty.is_empty()
    }

    /// Adds an item to one tier's list. Blank items are ignored.
    pub fn add_tier_item(&mut self, tier: &str, item: &str) {
        if let Some(item) = clean_item(item) {
            self.by_tier
                .entry(tier.trim().to_uppercase())
                .or_default()
                .push(item);
        }
    }

    /// Adds an item drawn from every tier. Blank items are ignored.
    pub fn add_global_item(&mut self, item: &str) {
        if let Some(item) = clean_item(item) {
            self.global.push(item);
        }
    }

    /// Adds an item drawn from every tier inside a difficulty range.
    pub fn add_difficulty_item(&mut self, range: DifficultyRange, item: &str) {
        if let Some(item) = clean_item(item) {
            self.by_difficulty.push(DifficultyScopedItem { range, item });
        }
    }

    /// Registers an item the way the scoped-item form does.
    ///
    /// With tier [`ALL_TIERS`] the item becomes difficulty-scoped (an absent
    /// band meaning every difficulty). With a named tier it is tier-scoped,
    /// and a band additionally registers it as difficulty-scoped, so inside
    /// that band it can be offered twice for the tier.
    pub fn add_scoped(&mut self, item: &str, tier: &str, band: Option<DifficultyBand>) {
        let range = band.map_or_else(DifficultyRange::any, DifficultyBand::range);
        if tier.trim().eq_ignore_ascii_case(ALL_TIERS) {
            self.add_difficulty_item(range, item);
        } else {
            self.add_tier_item(tier, item);
            if !range.is_any() {
                self.add_difficulty_item(range, item);
            }
        }
    }

    /// Extra items for a draw from `tier` at `difficulty`: tier-scoped items,
    /// then global items, then matching difficulty-scoped items.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::{CustomItemOverlay, DifficultyBand};
    ///
    /// let mut overlay = CustomItemOverlay::new();
    /// overlay.add_tier_item("A", "Lucky coin");
    /// overlay.add_global_item("Bent spoon");
    /// overlay.add_scoped("Dragon scale", "ALL", Some(DifficultyBand::Epic));
    ///
    /// assert_eq!(overlay.extras_for("A", 2.0), vec!["Lucky coin", "Bent spoon"]);
    /// assert_eq!(overlay.extras_for("G", 20.0), vec!["Bent spoon", "Dragon scale"]);
    /// ```
    pub fn extras_for(&self, tier: &str, difficulty: f64) -> Vec<String> {
        let mut extras = Vec::new();
        if let Some(items) = self.by_tier.get(tier) {
            extras.extend(items.iter().cloned());
        }
        extras.extend(self.global.iter().cloned());
        extras.extend(
            self.by_difficulty
                .iter()
                .filter(|scoped| scoped.range.contains(difficulty))
                .map(|scoped| scoped.item.clone()),
        );
        extras
    }

    /// Appends every list of `other` to this overlay.
    pub fn merge(&mut self, other: CustomItemOverlay) {
        for (tier, items) in other.by_tier {
            self.by_tier.entry(tier).or_default().extend(items);
        }
        self.global.extend(other.global);
        self.by_difficulty.extend(other.by_difficulty);
    }
}

/// Trims an item name, dropping it when nothing is left.
pub(crate) fn clean_item(item: &str) -> Option<String> {
    let trimmed = item.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
