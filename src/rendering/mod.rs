//! # Rendering Module
//!
//! Turns resolved loot into output for the command line: indented plain text
//! lines or a JSON document. The engine itself never formats anything.

pub mod display;

pub use display::*;
