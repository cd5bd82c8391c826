//! # Spell Scrolls
//!
//! Replaces a drawn "Spell scroll (3rd level)" with a scroll of a concrete
//! spell of that level.
//!
//! Spell names come from a [`SpellSource`]. The built-in source is a short
//! offline list per level; a cached spell list document can supply a richer
//! one, and any other provider can be plugged in through the trait.

use crate::{LootError, LootResult};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Level markers in the order they are searched for in an item name.
const LEVEL_MARKERS: [(&str, u8); 10] = [
    ("cantrip", 0),
    ("1st", 1),
    ("2nd", 2),
    ("3rd", 3),
    ("4th", 4),
    ("5th", 5),
    ("6th", 6),
    ("7th", 7),
    ("8th", 8),
    ("9th", 9),
];

const SCROLL_PREFIX: &str = "spell scroll";

/// Built-in spell names per level, 0 being cantrips.
const BUILTIN_SPELLS: [&[&str]; 10] = [
    &["Mage Hand", "Light", "Minor Illusion"],
    &["Magic Missile", "Cure Wounds", "Shield"],
    &["Invisibility", "Lesser Restoration"],
    &["Fireball", "Counterspell"],
    &["Polymorph", "Greater Invisibility"],
    &["Cone of Cold", "Raise Dead"],
    &["Chain Lightning", "Heal"],
    &["Teleport", "Finger of Death"],
    &["Mind Blank", "Power Word Stun"],
    &["Wish", "Meteor Swarm"],
];

/// Provides spell names for scroll expansion.
pub trait SpellSource: Send + Sync {
    /// Spell names of the given level (0 for cantrips). An empty list means
    /// the source knows none and the built-in names are used instead.
    fn spells_at_level(&self, level: u8) -> Vec<String>;

    /// Gets the source name for logging and debugging.
    fn source_name(&self) -> &'static str;
}

/// The short offline spell lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSpells;

impl SpellSource for BuiltinSpells {
    fn spells_at_level(&self, level: u8) -> Vec<String> {
        builtin_spells(level)
    }

    fn source_name(&self) -> &'static str {
        "builtin"
    }
}

fn builtin_spells(level: u8) -> Vec<String> {
    BUILTIN_SPELLS
        .get(usize::from(level))
        .map(|names| names.iter().map(|name| name.to_string()).collect())
        .unwrap_or_default()
}

/// Spell lists read from a cache document: `{"0": ["Light", ...], "3": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpellCache {
    by_level: BTreeMap<u8, Vec<String>>,
}

impl SpellCache {
    /// Parses a cache document. Keys that are not levels and values that are
    /// not lists are skipped.
    pub fn from_json(text: &str) -> LootResult<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(text)?;
        let mut by_level = BTreeMap::new();
        for (key, value) in raw {
            let Ok(level) = key.trim().parse::<u8>() else {
                debug!("Skipping spell cache key '{}'", key);
                continue;
            };
            let Some(names) = value.as_array() else {
                debug!("Skipping spell cache level {}: not a list", level);
                continue;
            };
            let names = names
                .iter()
                .map(|name| match name {
                    serde_json::Value::String(text) => text.clone(),
                    other => other.to_string(),
                })
                .collect();
            by_level.insert(level, names);
        }
        Ok(Self { by_level })
    }

    pub fn load(path: &Path) -> LootResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let cache = Self::from_json(&text)?;
        info!("Loaded spell cache from {}", path.display());
        Ok(cache)
    }

    pub fn levels(&self) -> impl Iterator<Item = u8> + '_ {
        self.by_level.keys().copied()
    }
}

impl SpellSource for SpellCache {
    fn spells_at_level(&self, level: u8) -> Vec<String> {
        self.by_level.get(&level).cloned().unwrap_or_default()
    }

    fn source_name(&self) -> &'static str {
        "spell cache"
    }
}

/// Substitutes concrete spells into drawn spell scrolls.
pub struct SpellScrollExpander {
    source: Box<dyn SpellSource>,
}

impl fmt::Debug for SpellScrollExpander {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpellScrollExpander")
            .field("source", &self.source.source_name())
            .finish()
    }
}

impl Default for SpellScrollExpander {
    fn default() -> Self {
        Self::new(Box::new(BuiltinSpells))
    }
}

impl SpellScrollExpander {
    pub fn new(source: Box<dyn SpellSource>) -> Self {
        Self { source }
    }

    /// Uses the spell cache at `path` when it loads, the built-in lists
    /// otherwise.
    pub fn from_cache_or_builtin(path: &Path) -> Self {
        match SpellCache::load(path) {
            Ok(cache) => Self::new(Box::new(cache)),
            Err(LootError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No spell cache at {}", path.display());
                Self::default()
            }
            Err(e) => {
                warn!("Ignoring spell cache {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn source_name(&self) -> &'static str {
        self.source.source_name()
    }

    /// The spell level a scroll names, or `None` for anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::SpellScrollExpander;
    ///
    /// assert_eq!(SpellScrollExpander::scroll_level("Spell scroll (cantrip)"), Some(0));
    /// assert_eq!(SpellScrollExpander::scroll_level("spell scroll (7th level)"), Some(7));
    /// assert_eq!(SpellScrollExpander::scroll_level("Scroll of protection"), None);
    /// ```
    pub fn scroll_level(item: &str) -> Option<u8> {
        let lowered = item.to_lowercase();
        if !lowered.starts_with(SCROLL_PREFIX) {
            return None;
        }
        LEVEL_MARKERS
            .iter()
            .find(|(marker, _)| lowered.contains(marker))
            .map(|(_, level)| *level)
    }

    /// Returns the item with a random spell of its level substituted in, or
    /// the item unchanged when it is not a recognisable spell scroll.
    pub fn expand<R: Rng + ?Sized>(&self, item: &str, rng: &mut R) -> String {
        let Some(level) = Self::scroll_level(item) else {
            return item.to_string();
        };

        let mut spells = self.source.spells_at_level(level);
        if spells.is_empty() {
            spells = builtin_spells(level);
        }
        let Some(spell) = spells.choose(rng) else {
            return item.to_string();
        };

        let level_text = if level == 0 {
            "cantrip".to_string()
        } else {
            level.to_string()
        };
        format!("Spell scroll (level {}): {}", level_text, spell)
    }
}
