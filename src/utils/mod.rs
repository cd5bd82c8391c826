//! # Utilities Module
//!
//! Dice rolling and random number generator helpers shared by the tables and
//! the resolvers.

pub mod dice;
pub mod rng;

pub use dice::*;
pub use rng::*;
