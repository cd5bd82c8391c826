//! # Lootgen
//!
//! Randomized treasure generation for tabletop encounters, driven by
//! SRD-style random treasure tables.
//!
//! ## Architecture Overview
//!
//! The crate is organised around a small treasure-table resolution engine:
//!
//! - **Dice**: parsing and rolling of `NdM` / `NdM*K` expressions
//! - **Tables**: cumulative-threshold weighted tables, coin tables, hoard
//!   tables and the tiered magic item catalog
//! - **Overlays**: caller-supplied extra items spliced into magic tiers at
//!   draw time (global, per tier, or per difficulty band)
//! - **Generation**: individual and hoard resolvers producing a [`LootBag`]
//! - **Rendering**: plain-text and JSON output for the command line shell
//!
//! All reference data is immutable once built. Randomness is always passed
//! in explicitly, so callers decide whether draws are seeded or not.

pub mod generation;
pub mod input;
pub mod overlay;
pub mod rendering;
pub mod tables;
pub mod utils;

pub use generation::*;
pub use input::*;
pub use overlay::*;
pub use rendering::*;
pub use tables::*;
pub use utils::*;

/// Core error type for the loot engine.
#[derive(thiserror::Error, Debug)]
pub enum LootError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Dice text could not be parsed
    #[error("Invalid dice expression: {0}")]
    MalformedExpression(String),

    /// A sampled table had no rows
    #[error("Table has no rows")]
    EmptyTable,

    /// Custom item overlay document has the wrong shape
    #[error("Invalid custom items document: {0}")]
    OverlayParse(String),

    /// Magic tier override could not be used
    #[error("Magic table data unavailable: {0}")]
    TableDataUnavailable(String),

    /// A resolution request could not be understood
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Result type used throughout the lootgen codebase.
pub type LootResult<T> = Result<T, LootError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Upper bound of every percentile roll (rolls are 1..=ROLL_MAX)
    pub const ROLL_MAX: u32 = 100;

    /// Text produced for a draw from a tier with no rows and no extras
    pub const NO_ITEMS_SENTINEL: &str = "(no items configured)";

    /// Default location of the custom items overlay document
    pub const DEFAULT_CUSTOM_ITEMS_FILE: &str = "custom_items.json";

    /// Default location of the magic tier override document
    pub const DEFAULT_MAGIC_TABLES_FILE: &str = "magic_tables.json";

    /// Number of difficulty bands every table family is keyed by
    pub const DIFFICULTY_BAND_COUNT: usize = 4;
}
