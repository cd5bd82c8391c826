//! # Hoard Treasure
//!
//! A hoard rolls its band's coins once, then one reward row that may add
//! gems, art objects and magic items from one or more tiers.

use super::items::draw_magic_items;
use crate::config::ROLL_MAX;
use crate::{
    evaluate, resolve_coins, DifficultyBand, HoardReward, LootBag, LootResult, TreasureContext,
    TreasureGenerator, TreasurePackage,
};
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;

/// Hoard treasure at a difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoardTreasureGenerator {
    pub difficulty: f64,
}

impl HoardTreasureGenerator {
    pub fn new(difficulty: f64) -> Self {
        Self { difficulty }
    }
}

impl TreasureGenerator<LootBag> for HoardTreasureGenerator {
    fn generate(&self, ctx: &TreasureContext<'_>, rng: &mut StdRng) -> LootResult<LootBag> {
        let band = DifficultyBand::from_difficulty(self.difficulty);
        let table = ctx.tables.hoard(band);

        let mut bag = LootBag::new();
        bag.coins = resolve_coins(&table.coins, rng)?
            .into_iter()
            .map(|coin| coin.to_string())
            .collect();

        let roll = rng.gen_range(1..=ROLL_MAX);
        let reward = table.rows.lookup(roll)?;
        debug!(
            "{}: band {} rolled {} on the hoard table",
            self.generator_type(),
            band,
            roll
        );
        apply_reward(ctx, reward, self.difficulty, &mut bag, rng)?;
        Ok(bag)
    }

    fn generator_type(&self) -> &'static str {
        "HoardTreasureGenerator"
    }
}

/// Adds a matched row's gems, art and magic draws to `bag`, in that order.
pub(crate) fn apply_reward<R: Rng + ?Sized>(
    ctx: &TreasureContext<'_>,
    reward: &HoardReward,
    difficulty: f64,
    bag: &mut LootBag,
    rng: &mut R,
) -> LootResult<()> {
    if let Some(gems) = reward.gems {
        bag.gems.push(open_package(gems.package(), rng)?);
    }
    if let Some(art) = reward.art {
        bag.art.push(open_package(art.package(), rng)?);
    }
    for draw in &reward.magic {
        let items = draw_magic_items(ctx, &draw.tier, &draw.dice, difficulty, rng)?;
        bag.magic.extend(items);
    }
    Ok(())
}

fn open_package<R: Rng + ?Sized>(package: TreasurePackage, rng: &mut R) -> LootResult<String> {
    let count = evaluate(package.dice, rng)?;
    Ok(format!("{} x {}", count, package.description))
}
