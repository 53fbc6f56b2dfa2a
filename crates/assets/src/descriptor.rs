use everwood_common::{Footprint, Tier};
use serde::{Deserialize, Serialize};

/// Immutable definition of a placeable kind.
///
/// All spacing fields are diameters in world units, halved at the point of
/// use; `safe_zone` also drives the generation scan pitch, so it must stay
/// at least 1. Created once at load time and shared by `Arc` across every
/// placed instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Identity key. Variants of one group share it; same-name instances
    /// never crowd each other out.
    pub name: String,
    /// Opaque handle the renderer resolves to a texture/mesh.
    pub visual: String,
    pub footprint: Footprint,
    /// Spacing enforced against other obstacle-tier instances.
    pub safe_zone: f32,
    /// Spacing enforced against ground-tier instances.
    pub ground_safe_zone: f32,
    /// Solid-body extent; `None` falls back to `ground_safe_zone`,
    /// `Some(0.0)` marks an explicitly walkable decoration.
    pub collision_zone: Option<f32>,
    /// Vertical solid-body extent where it differs from `collision_zone`.
    pub collision_zone_y: Option<f32>,
    pub tier: Tier,
    /// Fraction of the footprint used for positional jitter (0..=1).
    pub displacement_ratio: f32,
    /// Fraction used for scale jitter (0..=1).
    pub size_ratio: f32,
}

impl AssetDescriptor {
    /// Whether the player can walk straight through this kind.
    pub fn is_walkable(&self) -> bool {
        matches!(self.collision_zone, Some(z) if z == 0.0)
    }

    /// Solid-body extents `(x, y)` with the fallback chain applied.
    pub fn collision_extent(&self) -> (f32, f32) {
        let x = self.collision_zone.unwrap_or(self.ground_safe_zone);
        (x, self.collision_zone_y.unwrap_or(x))
    }

    /// Scale factor of a realized size relative to the nominal footprint.
    pub fn scale_of(&self, realized_height: f32) -> f32 {
        realized_height / self.footprint.height
    }

    pub(crate) fn check(&self) -> Result<(), crate::AssetError> {
        let fail = |reason: &str| {
            Err(crate::AssetError::InvalidDescriptor {
                name: self.name.clone(),
                reason: reason.to_string(),
            })
        };
        if self.footprint.width <= 0.0 || self.footprint.height <= 0.0 {
            return fail("footprint must be positive");
        }
        if self.safe_zone < 1.0 {
            return fail("safe zone must be at least 1 (it is the scan pitch)");
        }
        if self.ground_safe_zone <= 0.0 {
            return fail("ground safe zone must be positive");
        }
        if !(0.0..=1.0).contains(&self.displacement_ratio) {
            return fail("displacement ratio must be within 0..=1");
        }
        if !(0.0..=1.0).contains(&self.size_ratio) {
            return fail("size ratio must be within 0..=1");
        }
        if self.collision_zone.is_some_and(|z| z < 0.0)
            || self.collision_zone_y.is_some_and(|z| z < 0.0)
        {
            return fail("collision zones must not be negative");
        }
        Ok(())
    }
}
