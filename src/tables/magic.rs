//! # Magic Item Catalog
//!
//! Named magic item tiers, each a percentile table of item names. The
//! built-in tiers are a condensed SRD set; a JSON document can replace them.

use crate::{LootError, LootResult, WeightedTable};
use log::{info, warn};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Magic item tiers keyed by tier name ("A", "B", ...).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MagicItemCatalog {
    tiers: BTreeMap<String, WeightedTable<String>>,
}

impl MagicItemCatalog {
    pub fn new(tiers: BTreeMap<String, WeightedTable<String>>) -> Self {
        Self { tiers }
    }

    /// Base table of a tier. Unknown tiers have no rows.
    pub fn tier(&self, name: &str) -> Option<&WeightedTable<String>> {
        self.tiers.get(name)
    }

    pub fn tier_names(&self) -> impl Iterator<Item = &str> {
        self.tiers.keys().map(String::as_str)
    }

    /// Parses a tier override document: tier name to `[[threshold, item], ...]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::MagicItemCatalog;
    ///
    /// let catalog = MagicItemCatalog::from_json(r#"{"A": [[50, "Rope"], [100, "Lamp"]]}"#).unwrap();
    /// assert_eq!(catalog.tier("A").unwrap().len(), 2);
    /// assert!(catalog.tier("B").is_none());
    /// ```
    pub fn from_json(text: &str) -> LootResult<Self> {
        let raw: HashMap<String, Vec<(u32, String)>> = serde_json::from_str(text)
            .map_err(|e| LootError::TableDataUnavailable(e.to_string()))?;
        let tiers = raw
            .into_iter()
            .map(|(name, rows)| (name, WeightedTable::from_pairs(rows)))
            .collect();
        Ok(Self::new(tiers))
    }

    /// Reads a tier override file.
    pub fn load(path: &Path) -> LootResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| LootError::TableDataUnavailable(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    /// Uses the override file when it exists and parses, the built-in tiers
    /// otherwise.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                info!(
                    "Loaded magic tables from {} (tiers {})",
                    path.display(),
                    catalog.tier_names().collect::<Vec<_>>().join(", ")
                );
                catalog
            }
            Err(e) => {
                if path.exists() {
                    warn!("Falling back to built-in magic tables: {}", e);
                }
                Self::srd()
            }
        }
    }

    /// The built-in condensed SRD tiers.
    pub fn srd() -> Self {
        let mut tiers = BTreeMap::new();
        for (name, rows) in SRD_TIERS {
            let pairs = rows
                .iter()
                .map(|(threshold, item)| (*threshold, item.to_string()))
                .collect();
            tiers.insert(name.to_string(), WeightedTable::from_pairs(pairs));
        }
        Self::new(tiers)
    }
}

type TierData = (&'static str, &'static [(u32, &'static str)]);

const SRD_TIERS: &[TierData] = &[
    (
        "A",
        &[
            (50, "Potion of healing"),
            (60, "Spell scroll (cantrip)"),
            (70, "Potion of climbing"),
            (90, "Spell scroll (1st level)"),
            (94, "Spell scroll (2nd level)"),
            (98, "Potion of greater healing"),
            (99, "Bag of holding"),
            (100, "Driftglobe"),
        ],
    ),
    (
        "B",
        &[
            (15, "Potion of greater healing"),
            (22, "Potion of fire breath"),
            (29, "Potion of resistance"),
            (34, "+1 ammunition"),
            (39, "Potion of animal friendship"),
            (44, "Potion of hill giant strength"),
            (49, "Potion of growth"),
            (54, "Potion of water breathing"),
            (59, "Spell scroll (2nd level)"),
            (64, "Spell scroll (3rd level)"),
            (67, "Bag of holding"),
            (69, "Keoghtom's ointment"),
            (71, "Oil of slipperiness"),
            (73, "Dust of disappearance"),
            (75, "Dust of dryness"),
            (77, "Dust of sneezing and choking"),
            (79, "Elemental gem"),
            (81, "Philter of love"),
            (84, "Alchemy jug"),
            (87, "Cap of water breathing"),
            (90, "Cloak of the manta ray"),
            (92, "Driftglobe"),
            (94, "Goggles of night"),
            (96, "Tankard of sobriety"),
            (98, "Rope of climbing"),
            (100, "Wand of magic detection"),
        ],
    ),
    (
        "C",
        &[
            (15, "Potion of superior healing"),
            (22, "+1 weapon"),
            (27, "Spell scroll (4th level)"),
            (32, "+1 ammunition"),
            (36, "Potion of clairvoyance"),
            (40, "Potion of diminution"),
            (44, "Potion of gaseous form"),
            (48, "Potion of frost giant strength"),
            (52, "Potion of stone giant strength"),
            (56, "Potion of heroism"),
            (60, "Potion of invulnerability"),
            (64, "Potion of mind reading"),
            (67, "Spell scroll (5th level)"),
            (70, "Elixir of health"),
            (73, "Oil of etherealness"),
            (76, "Potion of fire giant strength"),
            (79, "Quaal's feather token"),
            (82, "Scroll of protection"),
            (84, "Bag of holding"),
            (86, "Portable hole"),
            (88, "Boots of elvenkind"),
            (90, "Cloak of elvenkind"),
            (92, "Eyes of minute seeing"),
            (94, "Gloves of swimming and climbing"),
            (96, "Hat of disguise"),
            (98, "Potion of poison"),
            (100, "Ring of swimming"),
        ],
    ),
    (
        "F",
        &[
            (15, "+1 weapon"),
            (25, "Potion of supreme healing"),
            (35, "Spell scroll (6th level)"),
            (45, "Spell scroll (7th level)"),
            (55, "Spell scroll (8th level)"),
            (65, "+2 weapon"),
            (70, "Potion of storm giant strength"),
            (75, "Potion of invulnerability"),
            (80, "Spellguard shield"),
            (85, "+1 amulet of the devout"),
            (90, "Ring of evasion"),
            (95, "Ring of protection"),
            (100, "Rod of absorption"),
        ],
    ),
    (
        "G",
        &[
            (11, "Weapon, +2"),
            (22, "Figurine of wondrous power"),
            (33, "Potion of speed"),
            (44, "Spell scroll (8th level)"),
            (55, "Spell scroll (7th level)"),
            (66, "+3 weapon"),
            (77, "Amulet of health"),
            (88, "Boots of speed"),
            (94, "Diamond necklace"),
            (100, "Ring of regeneration"),
        ],
    ),
    (
        "H",
        &[
            (10, "+2 armor"),
            (20, "+3 weapon"),
            (30, "Cloak of invisibility"),
            (40, "Ring of spell turning"),
            (50, "Rod of lordly might"),
            (60, "Vorpal sword"),
            (70, "Manual of quickness of action"),
            (80, "Staff of power"),
            (90, "Ring of three wishes"),
            (100, "Apparatus of Kwalish"),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_srd_tiers() {
        let catalog = MagicItemCatalog::srd();
        let names: Vec<&str> = catalog.tier_names().collect();
        assert_eq!(names, vec!["A", "B", "C", "F", "G", "H"]);
        for name in names {
            let tier = catalog.tier(name).unwrap();
            assert_eq!(tier.last_threshold(), 100);
            let thresholds: Vec<u32> = tier.rows().iter().map(|r| r.threshold).collect();
            assert!(thresholds.windows(2).all(|pair| pair[0] < pair[1]));
        }
        assert!(catalog.tier("D").is_none());
    }

    #[test]
    fn test_tier_a_lookup() {
        let catalog = MagicItemCatalog::srd();
        let tier = catalog.tier("A").unwrap();
        assert_eq!(tier.lookup(1).unwrap(), "Potion of healing");
        assert_eq!(tier.lookup(95).unwrap(), "Potion of greater healing");
    }

    #[test]
    fn test_override_document_replaces_tiers() {
        let catalog =
            MagicItemCatalog::from_json(r#"{"Z": [[40, "Lantern"], [100, "Compass"]]}"#).unwrap();
        assert!(catalog.tier("A").is_none());
        assert_eq!(catalog.tier("Z").unwrap().lookup(41).unwrap(), "Compass");
    }

    #[test]
    fn test_bad_override_is_unavailable() {
        let result = MagicItemCatalog::from_json(r#"{"A": "not rows"}"#);
        assert!(matches!(result, Err(LootError::TableDataUnavailable(_))));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("magic_tables.json");
        assert_eq!(MagicItemCatalog::load_or_default(&missing), MagicItemCatalog::srd());

        let broken = dir.path().join("broken.json");
        let mut file = std::fs::File::create(&broken).unwrap();
        file.write_all(b"{ not json").unwrap();
        assert_eq!(MagicItemCatalog::load_or_default(&broken), MagicItemCatalog::srd());
    }

    #[test]
    fn test_load_or_default_uses_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("magic_tables.json");
        std::fs::write(&path, r#"{"A": [[100, "Everburning torch"]]}"#).unwrap();
        let catalog = MagicItemCatalog::load_or_default(&path);
        assert_eq!(catalog.tier("A").unwrap().lookup(50).unwrap(), "Everburning torch");
    }
}
