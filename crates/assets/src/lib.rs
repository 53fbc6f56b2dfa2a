//! Placeable asset descriptors, variant groups, and biome tables.
//!
//! Catalogs are compiled-in configuration: descriptors are built once at
//! startup, validated fail-fast, and shared by reference across every placed
//! instance. The renderer consumes assets by their `visual` name, never by
//! file path.
//!
//! # Invariants
//! - A validated catalog has no empty groups and no degenerate spacing.
//! - Variant resolution is a pure function of `(rng, group, cell)`.

mod biome;
mod catalog;
mod descriptor;
mod forest;

pub use biome::{Biome, BiomeId, BiomeTable, PlacementRule};
pub use catalog::{AssetCatalog, AssetGroup};
pub use descriptor::AssetDescriptor;
pub use forest::{forest_biomes, forest_catalog};

/// Errors from catalog and biome configuration.
///
/// These are all startup-time failures; a world is never built on top of an
/// invalid catalog.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("asset group {0:?} has no variants")]
    EmptyGroup(String),
    #[error("asset {name:?}: {reason}")]
    InvalidDescriptor { name: String, reason: String },
    #[error("unknown asset group {0:?}")]
    UnknownGroup(String),
    #[error("unknown biome {0:?}")]
    UnknownBiome(String),
    #[error("biome {biome}: rule for {group:?}: {reason}")]
    InvalidRule {
        biome: String,
        group: String,
        reason: String,
    },
}

pub fn crate_info() -> &'static str {
    "everwood-assets v0.1.0"
}
