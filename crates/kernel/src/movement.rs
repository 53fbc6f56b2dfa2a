use everwood_render::Instantiator;
use glam::Vec2;

use crate::world::{World, WorldError};

/// Directional intent for one tick. Axes follow screen convention: `up`
/// decreases y, `down` increases it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveFlags {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveFlags {
    pub fn none(self) -> bool {
        !(self.up || self.down || self.left || self.right)
    }
}

const DIAGONAL_RATIO: f32 = std::f32::consts::SQRT_2;

impl World {
    /// Advance the player by one tick of input.
    ///
    /// The full candidate position is tried first; if blocked, the X-only
    /// and then the Y-only candidate (sliding along walls instead of
    /// stopping dead). Diagonal movement is normalized by √2 after
    /// resolution, matching the per-axis flag accumulation. A successful
    /// move resynchronizes chunk streaming and re-sorts draw depths.
    pub fn step_player(
        &mut self,
        renderer: &mut dyn Instantiator,
        flags: MoveFlags,
        dt: f32,
    ) -> Result<Vec2, WorldError> {
        if flags.none() {
            return Ok(self.player_position());
        }

        let distance = self.profile().move_speed * dt;
        let current = self.player_position();
        let mut next = current;

        if flags.up {
            next.y -= distance;
        }
        if flags.down {
            next.y += distance;
        }
        if flags.left {
            next.x -= distance;
        }
        if flags.right {
            next.x += distance;
        }

        if self.is_occupied_for_player(next) {
            if !self.is_occupied_for_player(Vec2::new(next.x, current.y)) {
                next.y = current.y;
            } else if !self.is_occupied_for_player(Vec2::new(current.x, next.y)) {
                next.x = current.x;
            } else {
                return Ok(current);
            }
        }

        if next.x != current.x && next.y != current.y {
            next.x = current.x - (current.x - next.x) / DIAGONAL_RATIO;
            next.y = current.y - (current.y - next.y) / DIAGONAL_RATIO;
        }

        self.resync(renderer, next)?;
        self.refresh_depth(renderer);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{PlayerProfile, WorldConfig};
    use everwood_assets::{
        AssetCatalog, AssetDescriptor, AssetGroup, Biome, BiomeId, BiomeTable,
    };
    use everwood_common::{Footprint, Tier};
    use everwood_render::RecordingRenderer;
    use everwood_stream::StreamConfig;

    /// A world whose only content is the ground texture: movement is never
    /// blocked, so the geometry of the resolution is easy to pin down.
    fn open_world(seed: u64) -> World {
        let mut catalog = AssetCatalog::new();
        catalog.insert(
            AssetGroup::new(
                "ground",
                vec![AssetDescriptor {
                    name: "ground".into(),
                    visual: "test/ground".into(),
                    footprint: Footprint::square(100.0),
                    safe_zone: 100.0,
                    ground_safe_zone: 100.0,
                    collision_zone: None,
                    collision_zone_y: None,
                    tier: Tier::GroundTexture,
                    displacement_ratio: 0.0,
                    size_ratio: 0.0,
                }],
            )
            .unwrap(),
        );
        let mut biomes = BiomeTable::new();
        biomes.insert(
            BiomeId::Forest,
            Biome {
                ground: "ground".into(),
                rules: Vec::new(),
            },
        );
        World::new(
            catalog,
            biomes,
            WorldConfig {
                seed,
                stream: StreamConfig {
                    chunk_size: 400.0,
                    spawn_safe_zone: 50.0,
                },
                profile: PlayerProfile {
                    collision_zone: 5.0,
                    move_speed: 100.0,
                },
                ..WorldConfig::default()
            },
        )
        .unwrap()
    }

    /// Open world plus a short wall: two boulders at x = 100 whose collision
    /// bands (half-extent 20 on x, band `[y - 40, y]`) cover the player's
    /// path rightward at y = 0 and downward-right at y = 50.
    fn world_with_wall() -> (World, RecordingRenderer) {
        let mut world = open_world(42);
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let boulder = std::sync::Arc::new(AssetDescriptor {
            name: "boulder".into(),
            visual: "test/boulder".into(),
            footprint: Footprint::square(40.0),
            safe_zone: 60.0,
            ground_safe_zone: 60.0,
            collision_zone: Some(40.0),
            collision_zone_y: None,
            tier: Tier::Obstacle,
            displacement_ratio: 0.0,
            size_ratio: 0.0,
        });
        for y in [0.0, 60.0] {
            world
                .spawn_item(&mut renderer, &boulder, Vec2::new(100.0, y))
                .unwrap()
                .expect("wall chunk is loaded");
        }
        (world, renderer)
    }

    #[test]
    fn no_input_means_no_motion() {
        let mut world = open_world(42);
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let pos = world
            .step_player(&mut renderer, MoveFlags::default(), 1.0)
            .unwrap();
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn cardinal_movement_covers_speed_times_dt() {
        let mut world = open_world(42);
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let flags = MoveFlags {
            right: true,
            ..MoveFlags::default()
        };
        let pos = world.step_player(&mut renderer, flags, 0.5).unwrap();
        assert_eq!(pos, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn diagonal_movement_is_normalized() {
        let mut world = open_world(42);
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let flags = MoveFlags {
            right: true,
            down: true,
            ..MoveFlags::default()
        };
        let pos = world.step_player(&mut renderer, flags, 1.0).unwrap();
        let expected = 100.0 / DIAGONAL_RATIO;
        assert!((pos.x - expected).abs() < 1e-3);
        assert!((pos.y - expected).abs() < 1e-3);
        // Total displacement is one tick of speed.
        assert!((pos.length() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn opposed_flags_cancel() {
        let mut world = open_world(42);
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let flags = MoveFlags {
            left: true,
            right: true,
            up: true,
            down: true,
        };
        let pos = world.step_player(&mut renderer, flags, 1.0).unwrap();
        assert_eq!(pos, Vec2::ZERO);
    }

    #[test]
    fn blocked_straight_ahead_stops_the_player() {
        // Walking right from x=50 into the wall at x=100 must stop dead:
        // the full and the x-only candidates are both inside the band, and
        // the y-only candidate is the current position.
        let (mut world, mut renderer) = world_with_wall();
        world.resync(&mut renderer, Vec2::new(50.0, 0.0)).unwrap();

        let flags = MoveFlags {
            right: true,
            ..MoveFlags::default()
        };
        let pos = world.step_player(&mut renderer, flags, 0.5).unwrap();
        assert_eq!(pos, Vec2::new(50.0, 0.0));
    }

    #[test]
    fn wall_slide_keeps_the_free_axis() {
        // Moving diagonally into the wall: the X advance is blocked at both
        // heights, the Y advance survives, so the player slides along it.
        let (mut world, mut renderer) = world_with_wall();
        world.resync(&mut renderer, Vec2::new(50.0, 0.0)).unwrap();

        let flags = MoveFlags {
            right: true,
            down: true,
            ..MoveFlags::default()
        };
        let pos = world.step_player(&mut renderer, flags, 0.5).unwrap();
        assert_eq!(pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn pure_y_move_succeeds_beside_the_wall() {
        let (mut world, mut renderer) = world_with_wall();
        world.resync(&mut renderer, Vec2::new(50.0, 0.0)).unwrap();

        let flags = MoveFlags {
            down: true,
            ..MoveFlags::default()
        };
        let pos = world.step_player(&mut renderer, flags, 0.5).unwrap();
        assert_eq!(pos, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn crossing_a_boundary_restreams() {
        let mut world = open_world(42);
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();
        assert_eq!(world.current_chunk(), Some(everwood_stream::ChunkKey::new(0, 0)));

        // 400-unit chunks: three seconds at speed 100 crosses the boundary.
        let flags = MoveFlags {
            right: true,
            ..MoveFlags::default()
        };
        for _ in 0..3 {
            world.step_player(&mut renderer, flags, 1.0).unwrap();
        }
        assert_eq!(
            world.current_chunk(),
            Some(everwood_stream::ChunkKey::new(400, 0))
        );
        assert_eq!(world.chunks().loaded_count(), 9);
    }
}
