//! # Dice Expressions
//!
//! Parsing and evaluation of dice notation such as `2d4` or `4d6*10`.

use crate::{LootError, LootResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A parsed dice expression: roll `count` dice with `faces` sides, sum them,
/// then multiply by `multiplier`.
///
/// # Examples
///
/// ```
/// use lootgen::DiceExpression;
///
/// let dice: DiceExpression = "4d6*10".parse().unwrap();
/// assert_eq!(dice.count, 4);
/// assert_eq!(dice.faces, 6);
/// assert_eq!(dice.multiplier, 10);
/// assert_eq!(dice.min(), 40);
/// assert_eq!(dice.max(), 240);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceExpression {
    pub count: u32,
    pub faces: u32,
    pub multiplier: u32,
}

impl DiceExpression {
    /// Creates an expression, rejecting zero counts, faces or multipliers
    /// and any expression whose largest result does not fit in a `u64`.
    pub fn new(count: u32, faces: u32, multiplier: u32) -> LootResult<Self> {
        if count == 0
            || faces == 0
            || multiplier == 0
            || checked_max(count, faces, multiplier).is_none()
        {
            return Err(LootError::MalformedExpression(format!(
                "{}d{}*{}",
                count, faces, multiplier
            )));
        }
        Ok(Self {
            count,
            faces,
            multiplier,
        })
    }

    /// Parses `NdM` or `NdM*K`. Surrounding whitespace is ignored.
    pub fn parse(text: &str) -> LootResult<Self> {
        let malformed = || LootError::MalformedExpression(text.to_string());
        let trimmed = text.trim();

        let (count, rest) = trimmed.split_once('d').ok_or_else(malformed)?;
        let (faces, multiplier) = match rest.split_once('*') {
            Some((faces, multiplier)) => (faces, Some(multiplier)),
            None => (rest, None),
        };

        let count = parse_positive(count).ok_or_else(malformed)?;
        let faces = parse_positive(faces).ok_or_else(malformed)?;
        let multiplier = match multiplier {
            Some(text) => parse_positive(text).ok_or_else(malformed)?,
            None => 1,
        };

        Self::new(count, faces, multiplier).map_err(|_| malformed())
    }

    /// Rolls the expression. Every call draws fresh dice.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        let sum: u64 = (0..self.count)
            .map(|_| u64::from(rng.gen_range(1..=self.faces)))
            .sum();
        sum.saturating_mul(u64::from(self.multiplier))
    }

    /// Smallest possible result.
    pub fn min(&self) -> u64 {
        u64::from(self.count) * u64::from(self.multiplier)
    }

    /// Largest possible result.
    pub fn max(&self) -> u64 {
        checked_max(self.count, self.faces, self.multiplier).unwrap_or(u64::MAX)
    }
}

impl FromStr for DiceExpression {
    type Err = LootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for DiceExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiplier == 1 {
            write!(f, "{}d{}", self.count, self.faces)
        } else {
            write!(f, "{}d{}*{}", self.count, self.faces, self.multiplier)
        }
    }
}

/// `count * faces * multiplier`, or `None` when it overflows.
fn checked_max(count: u32, faces: u32, multiplier: u32) -> Option<u64> {
    (u64::from(count) * u64::from(faces)).checked_mul(u64::from(multiplier))
}

fn parse_positive(text: &str) -> Option<u32> {
    text.trim().parse::<u32>().ok().filter(|value| *value > 0)
}

/// Parses and rolls a dice expression in one step.
///
/// Nothing is cached: evaluating the same text twice draws independent dice.
pub fn evaluate<R: Rng + ?Sized>(expr: &str, rng: &mut R) -> LootResult<u64> {
    Ok(DiceExpression::parse(expr)?.roll(rng))
}
