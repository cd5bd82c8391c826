//! # Input Module
//!
//! Parsing of command line encounter descriptors and scoped custom items into
//! engine requests.

pub mod commands;

pub use commands::*;

use crate::{
    CustomItemOverlay, EncounterRequest, GroupReport, LootEngine, LootError, LootResult,
};
use log::warn;
use rand::rngs::StdRng;

/// Parses a difficulty rating: a non-negative number or a fraction such as
/// `1/4`.
///
/// # Examples
///
/// ```
/// use lootgen::parse_difficulty;
///
/// assert_eq!(parse_difficulty("3").unwrap(), 3.0);
/// assert_eq!(parse_difficulty("1/8").unwrap(), 0.125);
/// assert!(parse_difficulty("-2").is_err());
/// ```
pub fn parse_difficulty(text: &str) -> LootResult<f64> {
    let invalid = || LootError::InvalidRequest(format!("invalid difficulty '{}'", text.trim()));
    let trimmed = text.trim();

    let value = match trimmed.split_once('/') {
        Some((numerator, denominator)) => {
            let numerator: f64 = numerator.trim().parse().map_err(|_| invalid())?;
            let denominator: f64 = denominator.trim().parse().map_err(|_| invalid())?;
            if denominator == 0.0 {
                return Err(invalid());
            }
            numerator / denominator
        }
        None => trimmed.parse().map_err(|_| invalid())?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok(value)
}

/// Parses and resolves each descriptor as its own enemy group.
///
/// A descriptor that does not parse, or a request that fails to resolve,
/// fails only its own report; the remaining groups still resolve.
pub fn resolve_descriptors<S: AsRef<str>>(
    engine: &LootEngine,
    descriptors: &[S],
    include_magic: bool,
    overlay: &CustomItemOverlay,
    rng: &mut StdRng,
) -> Vec<GroupReport> {
    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let group = index + 1;
            let descriptor = descriptor.as_ref();
            let report = match descriptor.parse::<EncounterRequest>() {
                Ok(request) => GroupReport::new(
                    group,
                    &request,
                    engine.resolve_request(&request, include_magic, overlay, rng),
                ),
                Err(e) => GroupReport::unparsed(group, descriptor.trim(), e),
            };
            if let Some(error) = &report.error {
                warn!("Enemy group {} failed: {}", group, error);
            }
            report
        })
        .collect()
}
