//! # Tables Module
//!
//! Fixed treasure reference data and the cumulative-threshold table model it
//! is expressed in.
//!
//! Every table family (individual coins, hoards, individual magic) is keyed by
//! the same four difficulty bands. All data here is built once and then only
//! read; overlays never mutate a base table, they produce an extended copy.

pub mod coins;
pub mod magic;
pub mod rewards;

pub use coins::*;
pub use magic::*;
pub use rewards::*;

use crate::config::ROLL_MAX;
use crate::{LootError, LootResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One row of a [`WeightedTable`]: the payload is chosen for any roll at or
/// below `threshold` that no earlier row already claimed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedRow<T> {
    pub threshold: u32,
    pub payload: T,
}

impl<T> WeightedRow<T> {
    pub fn new(threshold: u32, payload: T) -> Self {
        Self { threshold, payload }
    }
}

/// A percentile table of rows with ascending cumulative thresholds.
///
/// Rolls are drawn from `1..=100` and resolve to the first row whose threshold
/// is at least the roll. A well-formed table ends at 100; a roll past the last
/// threshold falls back to the last row.
///
/// # Examples
///
/// ```
/// use lootgen::WeightedTable;
///
/// let table = WeightedTable::from_pairs(vec![(60, "copper"), (100, "silver")]);
/// assert_eq!(table.lookup(60).unwrap(), &"copper");
/// assert_eq!(table.lookup(61).unwrap(), &"silver");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTable<T> {
    rows: Vec<WeightedRow<T>>,
}

impl<T> Default for WeightedTable<T> {
    fn default() -> Self {
        Self { rows: Vec::new() }
    }
}

impl<T> WeightedTable<T> {
    /// Creates a table from rows already in threshold order.
    pub fn new(rows: Vec<WeightedRow<T>>) -> Self {
        Self { rows }
    }

    /// Creates a table from `(threshold, payload)` pairs.
    pub fn from_pairs(pairs: Vec<(u32, T)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(threshold, payload)| WeightedRow::new(threshold, payload))
                .collect(),
        )
    }

    pub fn rows(&self) -> &[WeightedRow<T>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Threshold of the final row, or 0 for an empty table.
    pub fn last_threshold(&self) -> u32 {
        self.rows.last().map_or(0, |row| row.threshold)
    }

    /// Resolves a roll to a payload without drawing randomness.
    pub fn lookup(&self, roll: u32) -> LootResult<&T> {
        let last = self.rows.last().ok_or(LootError::EmptyTable)?;
        Ok(self
            .rows
            .iter()
            .find(|row| row.threshold >= roll)
            .map_or(&last.payload, |row| &row.payload))
    }

    /// Rolls `1..=100` and resolves the roll.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> LootResult<&T> {
        if self.rows.is_empty() {
            return Err(LootError::EmptyTable);
        }
        let roll = rng.gen_range(1..=ROLL_MAX);
        self.lookup(roll)
    }
}

impl<T: Clone> WeightedTable<T> {
    /// Returns a copy of this table with `extras` spliced into the top of the
    /// distribution.
    ///
    /// Extras share the space above the current last threshold in equal steps
    /// (at least 1), and the last extra always lands on exactly 100. When the
    /// table is already saturated the extras are spread over the full width
    /// instead, overriding part of the existing distribution. Base rows keep
    /// their thresholds; the result is re-sorted by threshold (stable, so base
    /// rows win ties).
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::WeightedTable;
    ///
    /// let base = WeightedTable::from_pairs(vec![(60, "a".to_string())]);
    /// let extended = base.extended(&["b".to_string(), "c".to_string()]);
    /// let thresholds: Vec<u32> = extended.rows().iter().map(|r| r.threshold).collect();
    /// assert_eq!(thresholds, vec![60, 80, 100]);
    /// ```
    pub fn extended(&self, extras: &[T]) -> Self {
        if extras.is_empty() {
            return self.clone();
        }

        let mut start = self.last_threshold();
        let mut remaining = ROLL_MAX.saturating_sub(start);
        if remaining == 0 {
            start = 0;
            remaining = ROLL_MAX;
        }
        let slots = extras.len() as u32;
        let step = (remaining / slots).max(1);

        let mut rows = self.rows.clone();
        let mut cursor = start;
        for (index, extra) in extras.iter().enumerate() {
            cursor = (cursor + step).min(ROLL_MAX);
            if index == extras.len() - 1 {
                cursor = ROLL_MAX;
            }
            rows.push(WeightedRow::new(cursor, extra.clone()));
        }
        rows.sort_by_key(|row| row.threshold);

        Self { rows }
    }
}

/// The four difficulty bands that select coin, hoard and magic tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DifficultyBand {
    /// Difficulty 0 through 4
    Low,
    /// Difficulty 5 through 10
    Mid,
    /// Difficulty 11 through 16
    High,
    /// Difficulty 17 and above
    Epic,
}

impl DifficultyBand {
    pub const ALL: [DifficultyBand; crate::config::DIFFICULTY_BAND_COUNT] = [
        DifficultyBand::Low,
        DifficultyBand::Mid,
        DifficultyBand::High,
        DifficultyBand::Epic,
    ];

    /// Picks the hoard band for a difficulty value.
    ///
    /// Bands are checked by their upper bounds, so fractional values between
    /// two bands (such as 4.5) belong to the higher one. Negative and NaN
    /// values fall into the lowest band, anything above 16 into the highest.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::DifficultyBand;
    ///
    /// assert_eq!(DifficultyBand::from_difficulty(0.25), DifficultyBand::Low);
    /// assert_eq!(DifficultyBand::from_difficulty(10.0), DifficultyBand::Mid);
    /// assert_eq!(DifficultyBand::from_difficulty(30.0), DifficultyBand::Epic);
    /// ```
    pub fn from_difficulty(difficulty: f64) -> Self {
        if difficulty.is_nan() || difficulty <= 4.0 {
            DifficultyBand::Low
        } else if difficulty <= 10.0 {
            DifficultyBand::Mid
        } else if difficulty <= 16.0 {
            DifficultyBand::High
        } else {
            DifficultyBand::Epic
        }
    }

    /// Picks the band for individual treasure: the first band whose closed
    /// range contains the difficulty, or the highest band when none does.
    ///
    /// Unlike [`DifficultyBand::from_difficulty`], values in the gaps between
    /// bands (such as 4.5 or 16.5) resolve to [`DifficultyBand::Epic`].
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::DifficultyBand;
    ///
    /// assert_eq!(DifficultyBand::for_individual(4.0), DifficultyBand::Low);
    /// assert_eq!(DifficultyBand::for_individual(4.5), DifficultyBand::Epic);
    /// assert_eq!(DifficultyBand::from_difficulty(4.5), DifficultyBand::Mid);
    /// ```
    pub fn for_individual(difficulty: f64) -> Self {
        DifficultyBand::ALL
            .into_iter()
            .find(|band| band.range().contains(difficulty))
            .unwrap_or(DifficultyBand::Epic)
    }

    /// Position of the band in [`DifficultyBand::ALL`].
    pub fn index(self) -> usize {
        match self {
            DifficultyBand::Low => 0,
            DifficultyBand::Mid => 1,
            DifficultyBand::High => 2,
            DifficultyBand::Epic => 3,
        }
    }

    /// The closed difficulty range covered by the band.
    pub fn range(self) -> DifficultyRange {
        match self {
            DifficultyBand::Low => DifficultyRange::new(0.0, 4.0),
            DifficultyBand::Mid => DifficultyRange::new(5.0, 10.0),
            DifficultyBand::High => DifficultyRange::new(11.0, 16.0),
            DifficultyBand::Epic => DifficultyRange::new(17.0, f64::INFINITY),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyBand::Low => "0-4",
            DifficultyBand::Mid => "5-10",
            DifficultyBand::High => "11-16",
            DifficultyBand::Epic => "17+",
        }
    }
}

impl fmt::Display for DifficultyBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DifficultyBand {
    type Err = LootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        DifficultyBand::ALL
            .into_iter()
            .find(|band| band.label() == label)
            .ok_or_else(|| LootError::InvalidRequest(format!("unknown difficulty band '{}'", label)))
    }
}

/// A closed range of difficulty values, `low <= difficulty <= high`.
///
/// `high` may be infinite for open-ended ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyRange {
    pub low: f64,
    pub high: f64,
}

impl DifficultyRange {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    /// The range covering every non-negative difficulty.
    pub fn any() -> Self {
        Self::new(0.0, f64::INFINITY)
    }

    pub fn contains(&self, difficulty: f64) -> bool {
        self.low <= difficulty && difficulty <= self.high
    }

    pub fn is_any(&self) -> bool {
        *self == Self::any()
    }
}

impl From<DifficultyBand> for DifficultyRange {
    fn from(band: DifficultyBand) -> Self {
        band.range()
    }
}

/// All fixed treasure reference data, built once and shared read-only by the
/// resolvers.
#[derive(Debug, Clone)]
pub struct TreasureTables {
    individual_coins: Vec<WeightedTable<CoinEntry>>,
    hoards: Vec<HoardTable>,
    individual_magic: Vec<MagicDraw>,
    catalog: MagicItemCatalog,
}

impl TreasureTables {
    /// The built-in SRD-style tables with the given magic item catalog.
    pub fn with_catalog(catalog: MagicItemCatalog) -> Self {
        Self {
            individual_coins: DifficultyBand::ALL
                .into_iter()
                .map(individual_coin_table)
                .collect(),
            hoards: DifficultyBand::ALL.into_iter().map(hoard_table).collect(),
            individual_magic: DifficultyBand::ALL
                .into_iter()
                .map(individual_magic_draw)
                .collect(),
            catalog,
        }
    }

    /// The built-in tables including the built-in magic item catalog.
    pub fn srd() -> Self {
        Self::with_catalog(MagicItemCatalog::srd())
    }

    pub fn individual_coins(&self, band: DifficultyBand) -> &WeightedTable<CoinEntry> {
        &self.individual_coins[band.index()]
    }

    pub fn hoard(&self, band: DifficultyBand) -> &HoardTable {
        &self.hoards[band.index()]
    }

    /// The tier and draw count used for magic on individual treasure.
    pub fn individual_magic(&self, band: DifficultyBand) -> &MagicDraw {
        &self.individual_magic[band.index()]
    }

    pub fn catalog(&self) -> &MagicItemCatalog {
        &self.catalog
    }
}

impl Default for TreasureTables {
    fn default() -> Self {
        Self::srd()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiceExpression;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn thresholds(table: &WeightedTable<String>) -> Vec<u32> {
        table.rows().iter().map(|row| row.threshold).collect()
    }

    #[test]
    fn test_lookup_picks_first_row_at_or_above_roll() {
        let table = WeightedTable::from_pairs(vec![(30, "a"), (60, "b"), (100, "c")]);
        assert_eq!(*table.lookup(1).unwrap(), "a");
        assert_eq!(*table.lookup(30).unwrap(), "a");
        assert_eq!(*table.lookup(31).unwrap(), "b");
        assert_eq!(*table.lookup(100).unwrap(), "c");
    }

    #[test]
    fn test_lookup_past_last_threshold_falls_back_to_last_row() {
        let table = WeightedTable::from_pairs(vec![(20, "a"), (50, "b")]);
        assert_eq!(*table.lookup(80).unwrap(), "b");
    }

    #[test]
    fn test_empty_table_signals_empty() {
        let table: WeightedTable<String> = WeightedTable::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(matches!(table.sample(&mut rng), Err(LootError::EmptyTable)));
        assert!(matches!(table.lookup(5), Err(LootError::EmptyTable)));
        assert_eq!(table.last_threshold(), 0);
    }

    #[test]
    fn test_extended_without_extras_is_unchanged() {
        let base = WeightedTable::from_pairs(vec![(50, "a".to_string()), (100, "b".to_string())]);
        assert_eq!(base.extended(&[]), base);
    }

    #[test]
    fn test_extended_fills_unsaturated_space() {
        let base = WeightedTable::from_pairs(vec![(40, "a".to_string()), (70, "b".to_string())]);
        let extended = base.extended(&strings(&["x", "y", "z"]));
        assert_eq!(thresholds(&extended), vec![40, 70, 80, 90, 100]);
        assert_eq!(extended.rows()[4].payload, "z");
    }

    #[test]
    fn test_extended_forces_last_extra_to_100() {
        // 100 - 93 = 7 split three ways leaves rounding loss
        let base = WeightedTable::from_pairs(vec![(93, "a".to_string())]);
        let extended = base.extended(&strings(&["x", "y", "z"]));
        assert_eq!(thresholds(&extended), vec![93, 95, 97, 100]);
    }

    #[test]
    fn test_extended_saturated_table_uses_full_width() {
        let base = WeightedTable::from_pairs(vec![
            (50, "a".to_string()),
            (100, "b".to_string()),
        ]);
        let extended = base.extended(&strings(&["x", "y"]));
        assert_eq!(thresholds(&extended), vec![50, 50, 100, 100]);
        // Base rows come first on ties
        assert_eq!(extended.rows()[0].payload, "a");
        assert_eq!(extended.rows()[1].payload, "x");
    }

    #[test]
    fn test_extended_empty_base() {
        let base: WeightedTable<String> = WeightedTable::default();
        let extended = base.extended(&strings(&["x", "y", "z", "w"]));
        assert_eq!(thresholds(&extended), vec![25, 50, 75, 100]);

        let single = base.extended(&strings(&["only"]));
        assert_eq!(thresholds(&single), vec![100]);
    }

    #[test]
    fn test_extended_does_not_mutate_base() {
        let base = WeightedTable::from_pairs(vec![(60, "a".to_string())]);
        let _ = base.extended(&strings(&["x"]));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_band_selection() {
        assert_eq!(DifficultyBand::from_difficulty(0.0), DifficultyBand::Low);
        assert_eq!(DifficultyBand::from_difficulty(4.0), DifficultyBand::Low);
        assert_eq!(DifficultyBand::from_difficulty(4.5), DifficultyBand::Mid);
        assert_eq!(DifficultyBand::from_difficulty(5.0), DifficultyBand::Mid);
        assert_eq!(DifficultyBand::from_difficulty(16.0), DifficultyBand::High);
        assert_eq!(DifficultyBand::from_difficulty(17.0), DifficultyBand::Epic);
        assert_eq!(DifficultyBand::from_difficulty(250.0), DifficultyBand::Epic);
        assert_eq!(DifficultyBand::from_difficulty(-3.0), DifficultyBand::Low);
        assert_eq!(DifficultyBand::from_difficulty(f64::NAN), DifficultyBand::Low);
    }

    #[test]
    fn test_individual_band_selection() {
        assert_eq!(DifficultyBand::for_individual(0.25), DifficultyBand::Low);
        assert_eq!(DifficultyBand::for_individual(10.0), DifficultyBand::Mid);
        assert_eq!(DifficultyBand::for_individual(11.0), DifficultyBand::High);
        assert_eq!(DifficultyBand::for_individual(30.0), DifficultyBand::Epic);
        // Gaps between bands fall through to the last band
        for gap in [4.5, 10.5, 16.5] {
            assert_eq!(DifficultyBand::for_individual(gap), DifficultyBand::Epic);
        }
    }

    #[test]
    fn test_band_labels_round_trip() {
        for band in DifficultyBand::ALL {
            assert_eq!(band.label().parse::<DifficultyBand>().unwrap(), band);
        }
        assert!("18-20".parse::<DifficultyBand>().is_err());
    }

    #[test]
    fn test_difficulty_range_contains() {
        let range = DifficultyBand::Epic.range();
        assert!(range.contains(17.0));
        assert!(range.contains(1000.0));
        assert!(!range.contains(16.5));
        assert!(DifficultyRange::any().contains(0.0));
        assert!(DifficultyRange::any().is_any());
        assert!(!DifficultyBand::Low.range().is_any());
    }

    #[test]
    fn test_srd_tables_cover_every_band() {
        let tables = TreasureTables::srd();
        for band in DifficultyBand::ALL {
            assert_eq!(tables.individual_coins(band).last_threshold(), 100);
            assert_eq!(tables.hoard(band).rows.last_threshold(), 100);
            assert!(DiceExpression::parse(&tables.individual_magic(band).dice).is_ok());
        }
    }
}
