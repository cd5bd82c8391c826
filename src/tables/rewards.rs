//! # Hoard Tables
//!
//! Gem and art packages, hoard reward rows and the per-band hoard tables.

use crate::{hoard_coins, CoinEntry, DifficultyBand, WeightedTable};
use serde::{Deserialize, Serialize};

/// A dice-determined count of one fixed kind of valuable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreasurePackage {
    pub dice: &'static str,
    pub description: &'static str,
}

/// Gem packages referenced by hoard rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemPackage {
    Gp10,
    Gp50,
    Gp100,
    Gp500,
    Gp1000,
}

impl GemPackage {
    pub fn package(self) -> TreasurePackage {
        let (dice, description) = match self {
            GemPackage::Gp10 => ("2d6", "10 gp gems"),
            GemPackage::Gp50 => ("2d6", "50 gp gems"),
            GemPackage::Gp100 => ("2d4", "100 gp gems"),
            GemPackage::Gp500 => ("3d6", "500 gp gems"),
            GemPackage::Gp1000 => ("3d6", "1,000 gp precious gems"),
        };
        TreasurePackage { dice, description }
    }
}

/// Art object packages referenced by hoard rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtPackage {
    Gp25,
    Gp250,
    Gp750,
}

impl ArtPackage {
    pub fn package(self) -> TreasurePackage {
        let (dice, description) = match self {
            ArtPackage::Gp25 => ("2d4", "25 gp art objects"),
            ArtPackage::Gp250 => ("2d4", "250 gp art objects"),
            ArtPackage::Gp750 => ("2d4", "750 gp art objects"),
        };
        TreasurePackage { dice, description }
    }
}

/// A number of draws from one magic item tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MagicDraw {
    pub tier: String,
    pub dice: String,
}

impl MagicDraw {
    pub fn new(tier: &str, dice: &str) -> Self {
        Self {
            tier: tier.to_string(),
            dice: dice.to_string(),
        }
    }
}

/// What a matched hoard row awards on top of the hoard's coins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoardReward {
    pub gems: Option<GemPackage>,
    pub art: Option<ArtPackage>,
    pub magic: Vec<MagicDraw>,
}

impl HoardReward {
    pub fn nothing() -> Self {
        Self::default()
    }

    pub fn gems(package: GemPackage) -> Self {
        Self {
            gems: Some(package),
            ..Self::default()
        }
    }

    pub fn art(package: ArtPackage) -> Self {
        Self {
            art: Some(package),
            ..Self::default()
        }
    }

    /// Adds a magic draw, keeping the order draws are listed in.
    pub fn and_magic(mut self, tier: &str, dice: &str) -> Self {
        self.magic.push(MagicDraw::new(tier, dice));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.gems.is_none() && self.art.is_none() && self.magic.is_empty()
    }
}

/// A hoard: one coin entry rolled once, plus a percentile table of rewards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoardTable {
    pub coins: CoinEntry,
    pub rows: WeightedTable<HoardReward>,
}

/// Hoard table for a difficulty band.
pub fn hoard_table(band: DifficultyBand) -> HoardTable {
    use ArtPackage as Art;
    use GemPackage as Gem;
    use HoardReward as R;

    let rows = match band {
        DifficultyBand::Low => vec![
            (6, R::nothing()),
            (16, R::gems(Gem::Gp10)),
            (26, R::art(Art::Gp25)),
            (36, R::gems(Gem::Gp50)),
            (52, R::gems(Gem::Gp10).and_magic("A", "1d6")),
            (60, R::art(Art::Gp25).and_magic("A", "1d6")),
            (70, R::gems(Gem::Gp50).and_magic("A", "1d6")),
            (80, R::gems(Gem::Gp50).and_magic("B", "1d4")),
            (90, R::art(Art::Gp25).and_magic("B", "1d4")),
            (100, R::gems(Gem::Gp50).and_magic("C", "1d4")),
        ],
        DifficultyBand::Mid => vec![
            (4, R::nothing()),
            (10, R::gems(Gem::Gp50)),
            (16, R::art(Art::Gp25)),
            (22, R::gems(Gem::Gp100)),
            (28, R::art(Art::Gp250)),
            (36, R::gems(Gem::Gp100).and_magic("A", "1d6")),
            (44, R::art(Art::Gp250).and_magic("A", "1d6")),
            (52, R::gems(Gem::Gp100).and_magic("B", "1d4")),
            (60, R::art(Art::Gp250).and_magic("B", "1d4")),
            (70, R::gems(Gem::Gp100).and_magic("C", "1d4")),
            (85, R::art(Art::Gp250).and_magic("F", "1d2")),
            (100, R::gems(Gem::Gp100).and_magic("G", "1d1")),
        ],
        DifficultyBand::High => vec![
            (2, R::nothing()),
            (6, R::gems(Gem::Gp100)),
            (10, R::art(Art::Gp250)),
            (12, R::gems(Gem::Gp500)),
            (14, R::art(Art::Gp750)),
            (22, R::gems(Gem::Gp500).and_magic("C", "1d4").and_magic("F", "1d1")),
            (30, R::art(Art::Gp750).and_magic("C", "1d4").and_magic("F", "1d1")),
            (38, R::gems(Gem::Gp500).and_magic("F", "1d2")),
            (46, R::art(Art::Gp750).and_magic("F", "1d2")),
            (60, R::gems(Gem::Gp500).and_magic("G", "1d1")),
            (75, R::art(Art::Gp750).and_magic("G", "1d1")),
            (100, R::gems(Gem::Gp1000).and_magic("H", "1d1")),
        ],
        DifficultyBand::Epic => vec![
            (2, R::nothing()),
            (5, R::art(Art::Gp250)),
            (8, R::gems(Gem::Gp500)),
            (10, R::art(Art::Gp750)),
            (12, R::gems(Gem::Gp1000)),
            (20, R::gems(Gem::Gp1000).and_magic("F", "1d2").and_magic("G", "1d1")),
            (35, R::art(Art::Gp750).and_magic("F", "1d2").and_magic("G", "1d1")),
            (50, R::gems(Gem::Gp1000).and_magic("G", "1d2")),
            (65, R::art(Art::Gp750).and_magic("G", "1d2")),
            (80, R::gems(Gem::Gp1000).and_magic("H", "1d1")),
            (100, R::art(Art::Gp750).and_magic("H", "1d1")),
        ],
    };

    HoardTable {
        coins: hoard_coins(band),
        rows: WeightedTable::from_pairs(rows),
    }
}

/// The single tier and draw count used for magic on individual treasure.
pub fn individual_magic_draw(band: DifficultyBand) -> MagicDraw {
    match band {
        DifficultyBand::Low => MagicDraw::new("A", "1d1"),
        DifficultyBand::Mid => MagicDraw::new("B", "1d1"),
        DifficultyBand::High => MagicDraw::new("C", "1d1"),
        DifficultyBand::Epic => MagicDraw::new("G", "1d2"),
    }
}
