use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Layering classification of a placeable asset.
///
/// The order matters: everything from `GroundDecal` upward is kept out of the
/// spawn-safe zone, and the two extremes (`GroundTexture`, `Sky`) are pinned
/// to fixed draw depths and never take part in occupancy queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Tier {
    /// Tiling ground imagery, always underneath everything else.
    GroundTexture,
    /// Small ground-level decoration (grass, brush). Depth-sorted.
    GroundDecal,
    /// Solid or spacing-enforcing object (trees, rocks). Depth-sorted.
    Obstacle,
    /// Overhead imagery, always on top.
    Sky,
}

impl Tier {
    /// Whether items of this tier are considered by occupancy queries,
    /// both at placement time and for player movement.
    pub fn participates_in_occupancy(self) -> bool {
        !matches!(self, Tier::GroundTexture | Tier::Sky)
    }

    /// Whether items of this tier are depth-sorted against the player
    /// rather than pinned to a fixed draw depth.
    pub fn is_depth_sorted(self) -> bool {
        matches!(self, Tier::GroundDecal | Tier::Obstacle)
    }
}

/// Nominal visual extent of an asset, before any size jitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

impl Footprint {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Square footprint, the common case for world props.
    pub fn square(side: f32) -> Self {
        Self::new(side, side)
    }

    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Realized extent after applying a scale factor.
    pub fn scaled(self, scale: f32) -> Vec2 {
        Vec2::new(self.width * scale, self.height * scale)
    }
}
