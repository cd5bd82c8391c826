//! # Command Definitions
//!
//! Descriptor formats accepted on the command line:
//!
//! - encounters: `CR[xCOUNT][:hoard|:individual]`, e.g. `2`, `1/4x6`, `12:hoard`
//! - scoped items: `ITEM@TIER|ALL[@BAND|Any]`, e.g. `Glass key@C@11-16`

use super::parse_difficulty;
use crate::{CustomItemOverlay, DifficultyBand, EncounterRequest, LootError, ALL_TIERS};
use std::str::FromStr;

impl FromStr for EncounterRequest {
    type Err = LootError;

    /// Parses an encounter descriptor.
    ///
    /// # Examples
    ///
    /// ```
    /// use lootgen::EncounterRequest;
    ///
    /// let request: EncounterRequest = "5x3:hoard".parse().unwrap();
    /// assert_eq!(request, EncounterRequest::hoard(5.0, 3));
    ///
    /// let request: EncounterRequest = "1/2".parse().unwrap();
    /// assert_eq!(request, EncounterRequest::individual(0.5, 1));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| LootError::InvalidRequest(format!("{} in '{}'", reason, s));

        let (body, mode) = match s.trim().rsplit_once(':') {
            Some((body, mode)) => (body, Some(mode.trim().to_lowercase())),
            None => (s.trim(), None),
        };
        let is_hoard = match mode.as_deref() {
            None | Some("individual") | Some("i") => false,
            Some("hoard") | Some("h") => true,
            Some(_) => return Err(invalid("unknown treasure mode")),
        };

        let (difficulty, count) = match body.split_once(['x', 'X']) {
            Some((difficulty, count)) => {
                let count: u32 = count.trim().parse().map_err(|_| invalid("bad count"))?;
                (difficulty, count)
            }
            None => (body, 1),
        };

        Ok(EncounterRequest {
            difficulty: parse_difficulty(difficulty)?,
            count: count.max(1),
            is_hoard,
        })
    }
}

/// A custom item registered with a tier and optional difficulty band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopedItemSpec {
    pub item: String,
    pub tier: String,
    pub band: Option<DifficultyBand>,
}

impl ScopedItemSpec {
    /// Adds the item to an overlay.
    pub fn apply(&self, overlay: &mut CustomItemOverlay) {
        overlay.add_scoped(&self.item, &self.tier, self.band);
    }
}

impl FromStr for ScopedItemSpec {
    type Err = LootError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('@').map(str::trim);
        let item = parts.next().unwrap_or_default();
        if item.is_empty() {
            return Err(LootError::InvalidRequest(format!("no item text in '{}'", s)));
        }

        let tier = match parts.next() {
            Some(tier) if !tier.is_empty() => tier.to_uppercase(),
            _ => ALL_TIERS.to_string(),
        };
        let band = match parts.next() {
            None => None,
            Some(band) if band.is_empty() || band.eq_ignore_ascii_case("any") => None,
            Some(band) => Some(band.parse()?),
        };
        if parts.next().is_some() {
            return Err(LootError::InvalidRequest(format!("too many '@' parts in '{}'", s)));
        }

        Ok(Self {
            item: item.to_string(),
            tier,
            band,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encounter_descriptors() {
        assert_eq!(
            "3".parse::<EncounterRequest>().unwrap(),
            EncounterRequest::individual(3.0, 1)
        );
        assert_eq!(
            "1/4x6".parse::<EncounterRequest>().unwrap(),
            EncounterRequest::individual(0.25, 6)
        );
        assert_eq!(
            "12:HOARD".parse::<EncounterRequest>().unwrap(),
            EncounterRequest::hoard(12.0, 1)
        );
        assert_eq!(
            "8X2:i".parse::<EncounterRequest>().unwrap(),
            EncounterRequest::individual(8.0, 2)
        );
    }

    #[test]
    fn test_zero_count_is_clamped() {
        assert_eq!("2x0".parse::<EncounterRequest>().unwrap().count, 1);
    }

    #[test]
    fn test_bad_encounter_descriptors() {
        for text in ["", "x3", "3xmany", "3:lair", "dragon"] {
            assert!(text.parse::<EncounterRequest>().is_err(), "accepted {:?}", text);
        }
    }

    #[test]
    fn test_scoped_item_specs() {
        let item_spec: ScopedItemSpec = "Glass key@c@11-16".parse().unwrap();
        assert_eq!(item_spec.item, "Glass key");
        assert_eq!(item_spec.tier, "C");
        assert_eq!(item_spec.band, Some(DifficultyBand::High));

        let item_spec: ScopedItemSpec = "Bent spoon".parse().unwrap();
        assert_eq!(item_spec.tier, "ALL");
        assert_eq!(item_spec.band, None);

        let item_spec: ScopedItemSpec = "Dragon scale@ALL@17+".parse().unwrap();
        assert_eq!(item_spec.band, Some(DifficultyBand::Epic));

        let item_spec: ScopedItemSpec = "Rope@B@Any".parse().unwrap();
        assert_eq!(item_spec.band, None);
    }

    #[test]
    fn test_bad_scoped_item_specs() {
        assert!("@A".parse::<ScopedItemSpec>().is_err());
        assert!("Rope@A@3-9".parse::<ScopedItemSpec>().is_err());
        assert!("Rope@A@0-4@extra".parse::<ScopedItemSpec>().is_err());
    }

    #[test]
    fn test_apply_scoped_item() {
        let mut overlay = CustomItemOverlay::new();
        "Dragon scale@ALL@17+"
            .parse::<ScopedItemSpec>()
            .unwrap()
            .apply(&mut overlay);
        assert_eq!(overlay.extras_for("H", 20.0), vec!["Dragon scale"]);
        assert!(overlay.extras_for("H", 10.0).is_empty());
    }
}
