//! Integration tests resolving whole enemy groups through the public API.

use lootgen::{
    create_rng, render_text, resolve_descriptors, CustomItemOverlay, EncounterRequest,
    EngineConfig, GroupReport, LootEngine, LootResult,
};

fn tier_items(engine: &LootEngine, tier: &str) -> Vec<String> {
    engine
        .tables()
        .catalog()
        .tier(tier)
        .map(|table| table.rows().iter().map(|row| row.payload.clone()).collect())
        .unwrap_or_default()
}

fn is_spell_scroll(item: &str) -> bool {
    item.starts_with("Spell scroll (level ")
}

#[test]
fn test_individual_group_with_magic() -> LootResult<()> {
    let config = EngineConfig::for_testing(12345);
    let engine = LootEngine::from_config(&config);
    let overlay = CustomItemOverlay::new();
    let mut rng = create_rng(&config);

    let request: EncounterRequest = "1x2".parse()?;
    let bags = engine.resolve_request(&request, true, &overlay, &mut rng)?;
    assert_eq!(bags.len(), 2);

    let tier_a = tier_items(&engine, "A");
    for bag in &bags {
        assert!(!bag.coins.is_empty());
        assert!(bag.gems.is_empty());
        assert!(bag.art.is_empty());
        for item in &bag.magic {
            assert!(tier_a.contains(item) || is_spell_scroll(item), "unexpected {}", item);
        }
    }
    Ok(())
}

#[test]
fn test_individual_group_without_magic() -> LootResult<()> {
    let config = EngineConfig::for_testing(7);
    let engine = LootEngine::from_config(&config);
    let overlay = CustomItemOverlay::new();
    let mut rng = create_rng(&config);

    for bag in engine.resolve_request(&EncounterRequest::individual(0.0, 25), false, &overlay, &mut rng)? {
        assert!(bag.magic.is_empty());
        assert_eq!(bag.coins.len(), 1);
    }
    Ok(())
}

#[test]
fn test_hoards_in_every_band() -> LootResult<()> {
    let config = EngineConfig::for_testing(2024);
    let engine = LootEngine::from_config(&config);
    let overlay = CustomItemOverlay::new();
    let mut rng = create_rng(&config);

    for difficulty in [0.0, 2.0, 7.0, 13.0, 25.0] {
        for bag in engine.resolve_request(&EncounterRequest::hoard(difficulty, 20), true, &overlay, &mut rng)? {
            assert!(!bag.coins.is_empty());
            assert!(bag.gems.len() <= 1);
            assert!(bag.art.len() <= 1);
            for gem in &bag.gems {
                assert!(gem.contains(" x "));
            }
        }
    }
    Ok(())
}

#[test]
fn test_hoard_magic_respects_overlay() -> LootResult<()> {
    let config = EngineConfig::for_testing(55);
    let engine = LootEngine::from_config(&config);
    let mut overlay = CustomItemOverlay::new();
    // Every tier is saturated, so the first of two extras lands on 50 and
    // the second ties with the base row at 100
    overlay.add_scoped("Crown of the deep", "ALL", Some(lootgen::DifficultyBand::Epic));
    overlay.add_scoped("Tide pearl", "ALL", Some(lootgen::DifficultyBand::Epic));
    let mut rng = create_rng(&config);

    let mut seen = false;
    for _ in 0..300 {
        let bag = engine.resolve_hoard(25.0, &overlay, &mut rng)?;
        seen |= bag.magic.iter().any(|item| item == "Crown of the deep");
    }
    assert!(seen);

    for _ in 0..300 {
        let bag = engine.resolve_hoard(3.0, &overlay, &mut rng)?;
        assert!(!bag.magic.iter().any(|item| item == "Crown of the deep"));
    }
    Ok(())
}

#[test]
fn test_report_for_several_groups() -> LootResult<()> {
    let config = EngineConfig::for_testing(99);
    let engine = LootEngine::from_config(&config);
    let overlay = CustomItemOverlay::new();
    let mut rng = create_rng(&config);

    let requests: Vec<EncounterRequest> = ["1/4x3", "9:hoard"]
        .iter()
        .map(|text| text.parse())
        .collect::<LootResult<_>>()?;
    let groups: Vec<GroupReport> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            GroupReport::new(
                index + 1,
                request,
                engine.resolve_request(request, false, &overlay, &mut rng),
            )
        })
        .collect();

    let text = render_text(&groups);
    assert!(text.starts_with("Enemy group 1: CR 0.25, count 3, Individual"));
    assert!(text.contains("\n\nEnemy group 2: CR 9.0, count 1, Hoard\n  Coins: "));
    assert_eq!(text.matches("  Coins: ").count(), 4);
    Ok(())
}

#[test]
fn test_same_seed_same_loot() -> LootResult<()> {
    let config = EngineConfig::for_testing(4242);
    let engine = LootEngine::from_config(&config);
    let overlay = CustomItemOverlay::new();

    let mut first = create_rng(&config);
    let mut second = create_rng(&config);
    let request = EncounterRequest::hoard(11.0, 5);
    assert_eq!(
        engine.resolve_request(&request, true, &overlay, &mut first)?,
        engine.resolve_request(&request, true, &overlay, &mut second)?
    );
    Ok(())
}

#[test]
fn test_malformed_descriptor_only_fails_its_group() {
    let config = EngineConfig::for_testing(1);
    let engine = LootEngine::from_config(&config);
    let overlay = CustomItemOverlay::new();
    let mut rng = create_rng(&config);

    let groups = resolve_descriptors(&engine, &["1", "abc", "5:hoard"], true, &overlay, &mut rng);
    assert_eq!(groups.len(), 3);
    assert!(groups[0].error.is_none());
    assert!(groups[2].error.is_none());
    assert!(groups[1].bags.is_empty());

    let text = render_text(&groups);
    assert!(text.starts_with("Enemy group 1: CR 1.0, count 1, Individual\n  Coins: "));
    assert!(text.contains(
        "\n\nEnemy group 2: 'abc'\n  Error while generating loot: Invalid request: invalid difficulty 'abc'\n\n"
    ));
    assert!(text.contains("Enemy group 3: CR 5.0, count 1, Hoard\n  Coins: "));
}
