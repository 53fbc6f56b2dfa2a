use everwood_assets::AssetDescriptor;
use everwood_rng::{channel, SeedKey, WorldRng};
use glam::Vec2;

/// Positional, scale, and rotational perturbation for one candidate cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    pub offset: Vec2,
    pub scale: f32,
    pub rotation: f32,
}

/// Probability, in percent, of the rare-giant roll tripling an instance.
const GIANT_CHANCE: f32 = 1.0;

/// Compute the jitter for a variant at a cell, coordinate-seeded so the same
/// cell always perturbs identically.
///
/// The scale bias for a negative roll is `1 / (1 - r)`: shrink saturates
/// (never below half at `r = -1`) while growth stays linear, giving the
/// occasional larger instance instead of symmetric shrink/grow.
pub fn jitter_for(rng: &WorldRng, descriptor: &AssetDescriptor, x: i32, y: i32) -> Jitter {
    let mut offset = Vec2::ZERO;
    if descriptor.displacement_ratio > 0.0 {
        let span = 2.0 * descriptor.footprint.height * descriptor.displacement_ratio;
        let roll_x = rng.number(SeedKey::new(&descriptor.name, channel::DEVIATION_X, x, y));
        let roll_y = rng.number(SeedKey::new(&descriptor.name, channel::DEVIATION_Y, x, y));
        offset.x = span * (roll_x - 50.0) / 100.0;
        offset.y = span * (roll_y - 50.0) / 100.0;
    }

    let mut scale = 1.0;
    if descriptor.size_ratio > 0.0 {
        let roll = rng.number(SeedKey::new(&descriptor.name, channel::SIZE, x, y));
        let r = 2.0 * descriptor.size_ratio * (roll - 50.0) / 100.0;
        scale = if r < 0.0 { 1.0 / (1.0 - r) } else { 1.0 + r };
        if rng.number(SeedKey::new(&descriptor.name, channel::GIANT, x, y)) < GIANT_CHANCE {
            scale *= 3.0;
        }
    }

    let rotation = rng.number(SeedKey::new(&descriptor.name, channel::ROTATE, x, y)) / 100.0
        * std::f32::consts::TAU;

    Jitter {
        offset,
        scale,
        rotation,
    }
}
