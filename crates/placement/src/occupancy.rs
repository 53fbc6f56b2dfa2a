use std::sync::Arc;

use everwood_assets::AssetDescriptor;
use everwood_common::Tier;
use everwood_render::VisualHandle;
use glam::Vec2;

/// A realized instance: what the placement engine produced for one accepted
/// candidate. The visual handle is owned by the chunk holding this record
/// and released when the chunk unloads.
#[derive(Debug, Clone)]
pub struct PlacedItem {
    pub descriptor: Arc<AssetDescriptor>,
    pub position: Vec2,
    /// Realized (post-jitter) extent.
    pub size: Vec2,
    pub rotation: f32,
    pub handle: VisualHandle,
}

impl PlacedItem {
    /// Realized ÷ nominal size ratio, applied to every spacing value.
    pub fn scale(&self) -> f32 {
        self.descriptor.scale_of(self.size.y)
    }
}

/// A candidate placement being tested against existing items.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub descriptor: &'a AssetDescriptor,
    pub position: Vec2,
    pub size: Vec2,
}

impl Candidate<'_> {
    pub fn scale(&self) -> f32 {
        self.descriptor.scale_of(self.size.y)
    }
}

/// Axis-aligned overlap with independent half-extents per axis.
///
/// The X test is a plain interval intersection around the anchor. The Y test
/// uses the band `[y - 2*half, y]`: a footprint sits behind its anchor point
/// (the anchor is the visual's base line), not centered on it.
fn overlaps(a_pos: Vec2, a_half: Vec2, b_pos: Vec2, b_half: Vec2) -> bool {
    let (a0, a1) = (a_pos.x - a_half.x, a_pos.x + a_half.x);
    let (b0, b1) = (b_pos.x - b_half.x, b_pos.x + b_half.x);
    if a1 <= b0 || b1 <= a0 {
        return false;
    }
    let (a2, a3) = (a_pos.y - 2.0 * a_half.y, a_pos.y);
    let (b2, b3) = (b_pos.y - 2.0 * b_half.y, b_pos.y);
    !(a3 <= b2 || b3 <= a2)
}

/// Spacing diameters for a pair: obstacle against obstacle keeps the full
/// safe zone, any pairing involving the ground tier uses the tighter ground
/// spacing.
fn spacing_zones(a: &AssetDescriptor, b: &AssetDescriptor) -> (f32, f32) {
    if a.tier == Tier::Obstacle && b.tier == Tier::Obstacle {
        (a.safe_zone, b.safe_zone)
    } else {
        (a.ground_safe_zone, b.ground_safe_zone)
    }
}

/// Placement-time occupancy query.
///
/// Ground-texture and sky subjects always fit. Comparisons skip
/// ground-texture/sky items and same-named items (same-species crowding is
/// expected). `against` is one or more item slices — typically the pending
/// items of the chunk being populated plus the loaded chunk under the
/// candidate's anchor.
pub fn is_space_available(candidate: &Candidate<'_>, against: &[&[PlacedItem]]) -> bool {
    if !candidate.descriptor.tier.participates_in_occupancy() {
        return true;
    }
    let scale = candidate.scale();
    for items in against {
        for item in *items {
            if !item.descriptor.tier.participates_in_occupancy() {
                continue;
            }
            if item.descriptor.name == candidate.descriptor.name {
                continue;
            }
            let (zone_a, zone_b) = spacing_zones(candidate.descriptor, &item.descriptor);
            let half_a = Vec2::splat(zone_a / 2.0 * scale);
            let half_b = Vec2::splat(zone_b / 2.0 * item.scale());
            if overlaps(candidate.position, half_a, item.position, half_b) {
                return false;
            }
        }
    }
    true
}

/// Player-movement occupancy query against one chunk's items.
///
/// Skips ground-texture/sky items and explicitly walkable decorations; solid
/// extents come from the collision zones with the ground-spacing fallback,
/// scaled by realized size. `collision_zone` is the player's solid diameter.
pub fn is_space_available_for_player(
    position: Vec2,
    collision_zone: f32,
    items: &[PlacedItem],
) -> bool {
    let player_half = Vec2::splat(collision_zone / 2.0);
    for item in items {
        if !item.descriptor.tier.participates_in_occupancy() {
            continue;
        }
        if item.descriptor.is_walkable() {
            continue;
        }
        let (zone_x, zone_y) = item.descriptor.collision_extent();
        let scale = item.scale();
        let half = Vec2::new(zone_x / 2.0 * scale, zone_y / 2.0 * scale);
        if overlaps(position, player_half, item.position, half) {
            return false;
        }
    }
    true
}
