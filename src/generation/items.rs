//! # Magic Item Draws
//!
//! Draws magic items from a tier after splicing the caller's custom items
//! into the tier's table.

use crate::config::NO_ITEMS_SENTINEL;
use crate::{evaluate, LootError, LootResult, TreasureContext, TreasureGenerator, WeightedTable};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Draws `dice` items from `tier` at a given difficulty.
#[derive(Debug, Clone, PartialEq)]
pub struct MagicItemGenerator {
    pub tier: String,
    pub dice: String,
    pub difficulty: f64,
}

impl MagicItemGenerator {
    pub fn new(tier: &str, dice: &str, difficulty: f64) -> Self {
        Self {
            tier: tier.to_string(),
            dice: dice.to_string(),
            difficulty,
        }
    }
}

impl TreasureGenerator<Vec<String>> for MagicItemGenerator {
    fn generate(&self, ctx: &TreasureContext<'_>, rng: &mut StdRng) -> LootResult<Vec<String>> {
        draw_magic_items(ctx, &self.tier, &self.dice, self.difficulty, rng)
    }

    fn generator_type(&self) -> &'static str {
        "MagicItemGenerator"
    }
}

/// Rolls the draw count, extends the tier with the overlay's extras for this
/// tier and difficulty, then samples the extended table once per draw.
///
/// Every drawn name passes through the spell scroll expander. A tier with no
/// rows and no extras yields the no-items sentinel for each draw.
pub(crate) fn draw_magic_items<R: Rng + ?Sized>(
    ctx: &TreasureContext<'_>,
    tier: &str,
    dice: &str,
    difficulty: f64,
    rng: &mut R,
) -> LootResult<Vec<String>> {
    let count = evaluate(dice, rng)?;
    let extras = ctx.overlay.extras_for(tier, difficulty);
    let table = match ctx.tables.catalog().tier(tier) {
        Some(base) => base.extended(&extras),
        None => WeightedTable::default().extended(&extras),
    };
    debug!(
        "Drawing {} item(s) from tier {} ({} rows, {} custom)",
        count,
        tier,
        table.len(),
        extras.len()
    );

    let mut items = Vec::new();
    for _ in 0..count {
        let item = match table.sample(rng) {
            Ok(item) => ctx.scrolls.expand(item, rng),
            Err(LootError::EmptyTable) => NO_ITEMS_SENTINEL.to_string(),
            Err(e) => return Err(e),
        };
        items.push(item);
    }
    Ok(items)
}
