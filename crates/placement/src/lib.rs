//! Placement primitives: the variable-pitch scan grid, coordinate-seeded
//! jitter, and the occupancy tests used both at placement time and for
//! player movement.
//!
//! # Invariants
//! - Everything here is pure geometry and pure randomness; chunk ownership
//!   and renderer calls live upstream.
//! - All spacing math halves the catalog's diameter fields and scales them
//!   by realized ÷ nominal size.

mod jitter;
mod occupancy;
mod scan;

pub use jitter::{jitter_for, Jitter};
pub use occupancy::{
    is_space_available, is_space_available_for_player, Candidate, PlacedItem,
};
pub use scan::ScanGrid;
