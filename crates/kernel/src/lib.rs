//! World kernel: the owned aggregate tying catalog, biome table, randomness,
//! and chunk streaming together, plus player movement resolution.
//!
//! # Invariants
//! - No global state: every world is an independent value, so tests can run
//!   several side by side.
//! - A constructed world has a validated catalog and biome table.

pub mod movement;
pub mod world;

pub use movement::MoveFlags;
pub use world::{PlayerProfile, World, WorldConfig, WorldError};
