//! # Individual Treasure
//!
//! Coins for a single creature, optionally with one magic item draw.

use super::items::draw_magic_items;
use crate::{
    resolve_coins, DifficultyBand, LootBag, LootError, LootResult, TreasureContext,
    TreasureGenerator,
};
use log::debug;
use rand::rngs::StdRng;

/// Individual treasure at a difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndividualTreasureGenerator {
    pub difficulty: f64,
    pub include_magic: bool,
}

impl IndividualTreasureGenerator {
    pub fn new(difficulty: f64, include_magic: bool) -> Self {
        Self {
            difficulty,
            include_magic,
        }
    }
}

impl TreasureGenerator<LootBag> for IndividualTreasureGenerator {
    /// Rolls one row of the band's coin table and realizes its coins. With
    /// magic enabled, the band's fixed tier and count are drawn as well.
    fn generate(&self, ctx: &TreasureContext<'_>, rng: &mut StdRng) -> LootResult<LootBag> {
        let band = DifficultyBand::for_individual(self.difficulty);
        debug!(
            "{}: difficulty {} in band {}",
            self.generator_type(),
            self.difficulty,
            band
        );

        let mut bag = LootBag::new();
        let entry = ctx.tables.individual_coins(band).sample(rng)?;
        bag.coins = resolve_coins(entry, rng)?
            .into_iter()
            .map(|coin| coin.to_string())
            .collect();

        if self.include_magic {
            let draw = ctx.tables.individual_magic(band);
            bag.magic = draw_magic_items(ctx, &draw.tier, &draw.dice, self.difficulty, rng)?;
        }
        Ok(bag)
    }

    fn validate(&self, content: &LootBag) -> LootResult<()> {
        if !content.gems.is_empty() || !content.art.is_empty() {
            return Err(LootError::InvalidRequest(
                "individual treasure never contains gems or art".to_string(),
            ));
        }
        if !self.include_magic && !content.magic.is_empty() {
            return Err(LootError::InvalidRequest(
                "magic items drawn with magic disabled".to_string(),
            ));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "IndividualTreasureGenerator"
    }
}
