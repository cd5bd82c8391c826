//! # Lootgen Main Entry Point
//!
//! Loads the reference data and custom items, resolves every requested enemy
//! group and prints the loot.

use clap::Parser;
use lootgen::{
    create_rng, render_json, render_text, resolve_descriptors, CustomItemOverlay, EngineConfig,
    LootEngine, LootError, LootResult, ScopedItemSpec,
};
use log::{error, info};
use std::path::PathBuf;

/// Command line arguments for the loot generator.
#[derive(Parser, Debug)]
#[command(name = "lootgen")]
#[command(about = "Randomized tabletop treasure from SRD-style treasure tables")]
#[command(version)]
struct Args {
    /// Enemy group as CR[xCOUNT][:hoard|:individual], e.g. 3x4 or 12:hoard
    #[arg(short, long = "encounter", value_name = "DESCRIPTOR", required = true)]
    encounters: Vec<String>,

    /// Random seed for reproducible loot
    #[arg(short, long)]
    seed: Option<u64>,

    /// Skip magic items on individual treasure
    #[arg(long)]
    no_individual_magic: bool,

    /// Custom items JSON document (ignored when missing)
    #[arg(long, default_value = lootgen::config::DEFAULT_CUSTOM_ITEMS_FILE)]
    custom_items: PathBuf,

    /// Magic tier override JSON document (built-in tiers when missing)
    #[arg(long, default_value = lootgen::config::DEFAULT_MAGIC_TABLES_FILE)]
    magic_tables: PathBuf,

    /// Cached spell lists used for spell scrolls
    #[arg(long)]
    spell_cache: Option<PathBuf>,

    /// Extra custom item offered by every tier
    #[arg(long = "item", value_name = "ITEM")]
    items: Vec<String>,

    /// Scoped custom item as ITEM@TIER|ALL[@BAND|Any], e.g. "Glass key@C@11-16"
    #[arg(long = "scoped-item", value_name = "SPEC")]
    scoped_items: Vec<String>,

    /// Write the merged custom items to this JSON document
    #[arg(long, value_name = "PATH")]
    save_custom_items: Option<PathBuf>,

    /// Print the loot as JSON
    #[arg(long)]
    json: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("lootgen: {}", e);
        std::process::exit(1);
    }
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        let level = log_level
            .parse::<log::LevelFilter>()
            .unwrap_or(log::LevelFilter::Warn);
        env_logger::Builder::new().filter_level(level).init();
    }
}

fn run(args: &Args) -> LootResult<()> {
    let scoped = args
        .scoped_items
        .iter()
        .map(|text| text.parse::<ScopedItemSpec>())
        .collect::<LootResult<Vec<_>>>()?;

    let config = EngineConfig {
        seed: args.seed,
        include_individual_magic: !args.no_individual_magic,
        custom_items_path: args.custom_items.clone(),
        magic_tables_path: args.magic_tables.clone(),
        spell_cache_path: args.spell_cache.clone(),
    };
    info!("Starting lootgen v{}", lootgen::VERSION);

    let engine = LootEngine::from_config(&config);
    let mut additions = CustomItemOverlay::new();
    for item in &args.items {
        additions.add_global_item(item);
    }
    for scoped_item in &scoped {
        scoped_item.apply(&mut additions);
    }
    let mut overlay = config.load_custom_items();
    overlay.merge(additions);
    if let Some(path) = &args.save_custom_items {
        overlay.save(path)?;
    }

    let mut rng = create_rng(&config);
    let groups = resolve_descriptors(
        &engine,
        &args.encounters,
        config.include_individual_magic,
        &overlay,
        &mut rng,
    );

    let output = if args.json {
        render_json(&groups)?
    } else {
        render_text(&groups)
    };
    println!("{}", output);

    if groups.iter().all(|group| group.error.is_some()) {
        return Err(LootError::InvalidRequest(
            "no enemy group could be resolved".to_string(),
        ));
    }
    Ok(())
}
