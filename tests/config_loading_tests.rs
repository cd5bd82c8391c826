//! Integration tests for building the engine and overlays from files on disk.

use lootgen::{create_rng, CustomItemOverlay, EngineConfig, LootEngine, LootResult};
use std::fs;

#[test]
fn test_engine_uses_magic_table_override() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let mut config = EngineConfig::for_testing(12345);
    config.magic_tables_path = dir.path().join("magic_tables.json");
    fs::write(
        &config.magic_tables_path,
        r#"{"A": [[60, "Tin whistle"], [100, "Spell scroll (5th level)"]]}"#,
    )?;
    config.spell_cache_path = Some(dir.path().join("spells_cache.json"));
    fs::write(
        config.spell_cache_path.as_ref().unwrap(),
        r#"{"5": ["Wall of Stone"]}"#,
    )?;

    let engine = LootEngine::from_config(&config);
    assert!(engine.tables().catalog().tier("B").is_none());

    let overlay = CustomItemOverlay::new();
    let mut rng = create_rng(&config);
    let items = engine.draw_magic_items("A", "50d1", &overlay, 2.0, &mut rng)?;
    assert_eq!(items.len(), 50);
    for item in &items {
        assert!(
            item == "Tin whistle" || item == "Spell scroll (level 5): Wall of Stone",
            "unexpected {}",
            item
        );
    }

    // Tier B is gone, so individual magic at difficulty 7 has nothing to draw
    let bag = engine.resolve_individual(7.0, true, &overlay, &mut rng)?;
    assert_eq!(bag.magic, vec!["(no items configured)"]);
    Ok(())
}

#[test]
fn test_unparseable_override_falls_back_to_builtin() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let mut config = EngineConfig::for_testing(1);
    config.magic_tables_path = dir.path().join("magic_tables.json");
    fs::write(&config.magic_tables_path, r#"{"A": [["fifty", "Rope"]]}"#)?;

    let engine = LootEngine::from_config(&config);
    assert_eq!(engine.tables().catalog().tier("A").map(|t| t.len()), Some(8));
    Ok(())
}

#[test]
fn test_custom_items_document_feeds_draws() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let mut config = EngineConfig::for_testing(8);
    config.custom_items_path = dir.path().join("custom_items.json");
    fs::write(
        &config.custom_items_path,
        r#"{
            "d": ["Deck of illusions", "Pipes of haunting"],
            "CR_SCOPED": [{"range": [5, 10], "item": "Mariner's armor"}, {"range": "bad"}]
        }"#,
    )?;

    let engine = LootEngine::from_config(&config);
    let overlay = config.load_custom_items();
    assert_eq!(overlay.by_tier["D"].len(), 2);
    assert_eq!(overlay.by_difficulty.len(), 1);

    let mut rng = create_rng(&config);
    let items = engine.draw_magic_items("D", "30d1", &overlay, 7.0, &mut rng)?;
    for item in &items {
        assert!(
            ["Deck of illusions", "Pipes of haunting", "Mariner's armor"].contains(&item.as_str())
        );
    }

    // Outside 5-10 only the tier items remain
    let items = engine.draw_magic_items("D", "30d1", &overlay, 12.0, &mut rng)?;
    assert!(!items.iter().any(|item| item == "Mariner's armor"));
    Ok(())
}

#[test]
fn test_saved_overlay_reloads() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("custom_items.json");

    let mut overlay = CustomItemOverlay::new();
    overlay.add_global_item("Bent spoon");
    overlay.add_scoped("Glass key", "C", "11-16".parse().ok());
    overlay.add_scoped("Dragon scale", "ALL", "17+".parse().ok());
    overlay.save(&path)?;

    let mut config = EngineConfig::for_testing(3);
    config.custom_items_path = path;
    assert_eq!(config.load_custom_items(), overlay);
    Ok(())
}

#[test]
fn test_custom_items_with_infinite_bounds_keep_every_list() -> LootResult<()> {
    let dir = tempfile::tempdir()?;
    let mut config = EngineConfig::for_testing(5);
    config.custom_items_path = dir.path().join("custom_items.json");
    fs::write(
        &config.custom_items_path,
        r#"{
  "B": [
    "Wind fan"
  ],
  "GLOBAL": [
    "Bent spoon"
  ],
  "CR_SCOPED": [
    {
      "range": [
        0,
        Infinity
      ],
      "item": "Lucky coin"
    },
    {
      "range": [
        17,
        Infinity
      ],
      "item": "Dragon scale"
    }
  ]
}"#,
    )?;

    let overlay = config.load_custom_items();
    assert_eq!(overlay.global, vec!["Bent spoon"]);
    assert_eq!(overlay.by_tier["B"], vec!["Wind fan"]);
    assert_eq!(overlay.by_difficulty.len(), 2);
    assert_eq!(overlay.extras_for("G", 20.0), vec!["Bent spoon", "Lucky coin", "Dragon scale"]);
    assert_eq!(overlay.extras_for("B", 3.0), vec!["Wind fan", "Bent spoon", "Lucky coin"]);
    Ok(())
}
