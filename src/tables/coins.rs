//! # Coin Tables
//!
//! Coin denominations, per-denomination dice entries and the individual
//! treasure coin tables.

use crate::{evaluate, DifficultyBand, LootResult, WeightedTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coin denominations in the order they are always rolled and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Denomination {
    Copper,
    Silver,
    Electrum,
    Gold,
    Platinum,
}

impl Denomination {
    pub const ALL: [Denomination; 5] = [
        Denomination::Copper,
        Denomination::Silver,
        Denomination::Electrum,
        Denomination::Gold,
        Denomination::Platinum,
    ];

    pub fn abbreviation(self) -> &'static str {
        match self {
            Denomination::Copper => "cp",
            Denomination::Silver => "sp",
            Denomination::Electrum => "ep",
            Denomination::Gold => "gp",
            Denomination::Platinum => "pp",
        }
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// How much of each coin to roll. Absent, empty or `"0"` expressions mean
/// the denomination is not rolled at all.
///
/// # Examples
///
/// ```
/// use lootgen::{CoinEntry, Denomination};
///
/// let entry = CoinEntry::new().with(Denomination::Gold, "2d6*100");
/// assert_eq!(entry.expression(Denomination::Gold), Some("2d6*100"));
/// assert_eq!(entry.expression(Denomination::Copper), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinEntry {
    pub cp: Option<String>,
    pub sp: Option<String>,
    pub ep: Option<String>,
    pub gp: Option<String>,
    pub pp: Option<String>,
}

impl CoinEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dice expression for one denomination.
    pub fn with(mut self, denomination: Denomination, expr: &str) -> Self {
        *self.slot_mut(denomination) = Some(expr.to_string());
        self
    }

    /// The configured expression, if it would actually roll anything.
    pub fn expression(&self, denomination: Denomination) -> Option<&str> {
        let slot = match denomination {
            Denomination::Copper => &self.cp,
            Denomination::Silver => &self.sp,
            Denomination::Electrum => &self.ep,
            Denomination::Gold => &self.gp,
            Denomination::Platinum => &self.pp,
        };
        slot.as_deref()
            .map(str::trim)
            .filter(|expr| !expr.is_empty() && *expr != "0")
    }

    fn slot_mut(&mut self, denomination: Denomination) -> &mut Option<String> {
        match denomination {
            Denomination::Copper => &mut self.cp,
            Denomination::Silver => &mut self.sp,
            Denomination::Electrum => &mut self.ep,
            Denomination::Gold => &mut self.gp,
            Denomination::Platinum => &mut self.pp,
        }
    }
}

/// A realized amount of one denomination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinAmount {
    pub denomination: Denomination,
    pub amount: u64,
}

impl fmt::Display for CoinAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.denomination)
    }
}

/// Rolls every configured denomination of `entry`, in cp, sp, ep, gp, pp
/// order. Denominations without an expression are omitted.
pub fn resolve_coins<R: Rng + ?Sized>(entry: &CoinEntry, rng: &mut R) -> LootResult<Vec<CoinAmount>> {
    let mut coins = Vec::new();
    for denomination in Denomination::ALL {
        if let Some(expr) = entry.expression(denomination) {
            coins.push(CoinAmount {
                denomination,
                amount: evaluate(expr, rng)?,
            });
        }
    }
    Ok(coins)
}

fn coins(pairs: &[(Denomination, &str)]) -> CoinEntry {
    pairs
        .iter()
        .fold(CoinEntry::new(), |entry, (denomination, expr)| {
            entry.with(*denomination, expr)
        })
}

/// Individual treasure coin table for a difficulty band.
pub fn individual_coin_table(band: DifficultyBand) -> WeightedTable<CoinEntry> {
    use Denomination::*;

    let rows = match band {
        DifficultyBand::Low => vec![
            (30, coins(&[(Copper, "5d6")])),
            (60, coins(&[(Silver, "4d6")])),
            (70, coins(&[(Electrum, "3d6")])),
            (95, coins(&[(Gold, "3d6")])),
            (100, coins(&[(Platinum, "1d6")])),
        ],
        DifficultyBand::Mid => vec![
            (30, coins(&[(Copper, "4d6*100")])),
            (60, coins(&[(Silver, "6d6*10")])),
            (70, coins(&[(Electrum, "3d6*10")])),
            (95, coins(&[(Gold, "4d6*10")])),
            (100, coins(&[(Platinum, "2d6*10")])),
        ],
        DifficultyBand::High => vec![
            (20, coins(&[(Silver, "4d6*100")])),
            (35, coins(&[(Electrum, "1d6*100")])),
            (75, coins(&[(Gold, "2d6*100")])),
            (100, coins(&[(Platinum, "2d6*10")])),
        ],
        DifficultyBand::Epic => vec![
            (15, coins(&[(Gold, "2d6*100")])),
            (55, coins(&[(Gold, "2d6*100"), (Platinum, "1d6*10")])),
            (100, coins(&[(Gold, "2d6*100"), (Platinum, "2d6*10")])),
        ],
    };
    WeightedTable::from_pairs(rows)
}

/// Hoard coin entry for a difficulty band. Hoards roll these once per hoard.
pub fn hoard_coins(band: DifficultyBand) -> CoinEntry {
    use Denomination::*;

    match band {
        DifficultyBand::Low => coins(&[(Copper, "6d6*100"), (Silver, "3d6*100"), (Gold, "2d6*10")]),
        DifficultyBand::Mid => coins(&[
            (Copper, "2d6*100"),
            (Silver, "2d6*1000"),
            (Gold, "6d6*100"),
            (Platinum, "3d6*10"),
        ]),
        DifficultyBand::High => coins(&[(Silver, "4d6*1000"), (Gold, "1d6*1000"), (Platinum, "1d6*100")]),
        DifficultyBand::Epic => coins(&[(Gold, "4d6*1000"), (Platinum, "5d6*100")]),
    }
}
