//! # Generation Module
//!
//! Treasure resolution: individual treasure, hoards and magic item draws.
//!
//! Resolvers read from an immutable [`TreasureContext`] (tables, spell scroll
//! expander and the caller's overlay) and produce plain [`LootBag`]s. The
//! [`LootEngine`] owns the reference data and is the usual entry point.

pub mod hoard;
pub mod individual;
pub mod items;
pub mod scrolls;

pub use hoard::*;
pub use individual::*;
pub use items::*;
pub use scrolls::*;

use crate::config::{DEFAULT_CUSTOM_ITEMS_FILE, DEFAULT_MAGIC_TABLES_FILE};
use crate::{CustomItemOverlay, LootError, LootResult, MagicItemCatalog, TreasureTables};
use log::{debug, warn};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the loot engine and the files it is built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Random seed for reproducible loot; entropy-seeded when absent
    pub seed: Option<u64>,
    /// Whether individual treasure also draws magic items
    pub include_individual_magic: bool,
    /// Custom items overlay document
    pub custom_items_path: PathBuf,
    /// Magic tier override document
    pub magic_tables_path: PathBuf,
    /// Optional cached spell list document
    pub spell_cache_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Creates a default engine configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::EngineConfig;
    ///
    /// let config = EngineConfig::new();
    /// assert!(config.seed.is_none());
    /// assert!(config.include_individual_magic);
    /// ```
    pub fn new() -> Self {
        Self {
            seed: None,
            include_individual_magic: true,
            custom_items_path: PathBuf::from(DEFAULT_CUSTOM_ITEMS_FILE),
            magic_tables_path: PathBuf::from(DEFAULT_MAGIC_TABLES_FILE),
            spell_cache_path: None,
        }
    }

    /// Creates a seeded configuration that reads no files.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            include_individual_magic: true,
            custom_items_path: PathBuf::new(),
            magic_tables_path: PathBuf::new(),
            spell_cache_path: None,
        }
    }

    /// Reads the custom items document, treating a missing or unreadable
    /// file as an empty overlay.
    pub fn load_custom_items(&self) -> CustomItemOverlay {
        if self.custom_items_path.as_os_str().is_empty() {
            return CustomItemOverlay::new();
        }
        match CustomItemOverlay::load(&self.custom_items_path) {
            Ok(overlay) => overlay,
            Err(LootError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No custom items at {}", self.custom_items_path.display());
                CustomItemOverlay::new()
            }
            Err(e) => {
                warn!(
                    "Ignoring custom items {}: {}",
                    self.custom_items_path.display(),
                    e
                );
                CustomItemOverlay::new()
            }
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The treasure produced by one resolution: human-readable lines per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootBag {
    pub coins: Vec<String>,
    pub gems: Vec<String>,
    pub art: Vec<String>,
    pub magic: Vec<String>,
}

impl LootBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty() && self.gems.is_empty() && self.art.is_empty() && self.magic.is_empty()
    }
}

/// One enemy group: resolved `count` times, as hoards or individually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncounterRequest {
    pub difficulty: f64,
    pub count: u32,
    #[serde(rename = "hoard")]
    pub is_hoard: bool,
}

impl EncounterRequest {
    pub fn individual(difficulty: f64, count: u32) -> Self {
        Self {
            difficulty,
            count,
            is_hoard: false,
        }
    }

    pub fn hoard(difficulty: f64, count: u32) -> Self {
        Self {
            difficulty,
            count,
            is_hoard: true,
        }
    }
}

/// Read-only view of everything a resolver consults.
#[derive(Debug, Clone, Copy)]
pub struct TreasureContext<'a> {
    pub tables: &'a TreasureTables,
    pub scrolls: &'a SpellScrollExpander,
    pub overlay: &'a CustomItemOverlay,
}

/// Trait for treasure generators.
///
/// Every resolver implements this trait, giving them a common shape for
/// generation, validation and logging.
pub trait TreasureGenerator<T> {
    /// Generates treasure from the context using the provided random number generator.
    fn generate(&self, ctx: &TreasureContext<'_>, rng: &mut StdRng) -> LootResult<T>;

    /// Validates that the generated treasure meets the generator's guarantees.
    fn validate(&self, content: &T) -> LootResult<()> {
        let _ = content;
        Ok(())
    }

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Owns the treasure reference data and resolves requests against it.
#[derive(Debug, Default)]
pub struct LootEngine {
    tables: TreasureTables,
    scrolls: SpellScrollExpander,
}

impl LootEngine {
    pub fn new(tables: TreasureTables, scrolls: SpellScrollExpander) -> Self {
        Self { tables, scrolls }
    }

    /// Builds the engine from the configured files, falling back to built-in
    /// data for anything missing.
    pub fn from_config(config: &EngineConfig) -> Self {
        let catalog = if config.magic_tables_path.as_os_str().is_empty() {
            MagicItemCatalog::srd()
        } else {
            MagicItemCatalog::load_or_default(&config.magic_tables_path)
        };
        let scrolls = match &config.spell_cache_path {
            Some(path) => SpellScrollExpander::from_cache_or_builtin(path),
            None => SpellScrollExpander::default(),
        };
        Self::new(TreasureTables::with_catalog(catalog), scrolls)
    }

    pub fn tables(&self) -> &TreasureTables {
        &self.tables
    }

    pub fn context<'a>(&'a self, overlay: &'a CustomItemOverlay) -> TreasureContext<'a> {
        TreasureContext {
            tables: &self.tables,
            scrolls: &self.scrolls,
            overlay,
        }
    }

    /// Individual treasure for one creature.
    pub fn resolve_individual(
        &self,
        difficulty: f64,
        include_magic: bool,
        overlay: &CustomItemOverlay,
        rng: &mut StdRng,
    ) -> LootResult<LootBag> {
        run(
            &IndividualTreasureGenerator::new(difficulty, include_magic),
            &self.context(overlay),
            rng,
        )
    }

    /// Hoard treasure for a group.
    pub fn resolve_hoard(
        &self,
        difficulty: f64,
        overlay: &CustomItemOverlay,
        rng: &mut StdRng,
    ) -> LootResult<LootBag> {
        run(&HoardTreasureGenerator::new(difficulty), &self.context(overlay), rng)
    }

    /// Draws a dice-determined number of items from a tier.
    pub fn draw_magic_items(
        &self,
        tier: &str,
        dice: &str,
        overlay: &CustomItemOverlay,
        difficulty: f64,
        rng: &mut StdRng,
    ) -> LootResult<Vec<String>> {
        run(
            &MagicItemGenerator::new(tier, dice, difficulty),
            &self.context(overlay),
            rng,
        )
    }

    /// Resolves one enemy group into `count` independent bags.
    ///
    /// A count below one is treated as one. Any failure fails the whole group
    /// so no partial result escapes.
    pub fn resolve_request(
        &self,
        request: &EncounterRequest,
        include_magic: bool,
        overlay: &CustomItemOverlay,
        rng: &mut StdRng,
    ) -> LootResult<Vec<LootBag>> {
        (0..request.count.max(1))
            .map(|_| {
                if request.is_hoard {
                    self.resolve_hoard(request.difficulty, overlay, rng)
                } else {
                    self.resolve_individual(request.difficulty, include_magic, overlay, rng)
                }
            })
            .collect()
    }
}

fn run<T, G: TreasureGenerator<T>>(
    generator: &G,
    ctx: &TreasureContext<'_>,
    rng: &mut StdRng,
) -> LootResult<T> {
    let content = generator.generate(ctx, rng)?;
    generator.validate(&content)?;
    Ok(content)
}
