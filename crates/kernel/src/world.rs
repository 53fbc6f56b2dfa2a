use std::sync::Arc;

use everwood_assets::{AssetCatalog, AssetDescriptor, AssetError, BiomeId, BiomeTable};
use everwood_placement::{Candidate, PlacedItem};
use everwood_render::{depth_for, DrawDepth, Instantiator, RenderError, VisualHandle};
use everwood_rng::WorldRng;
use everwood_stream::{ChunkKey, ChunkManager, ResyncReport, StreamConfig, StreamError};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Player parameters the world needs: solid diameter for collision and
/// movement speed in world units per second.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub collision_zone: f32,
    pub move_speed: f32,
}

impl Default for PlayerProfile {
    fn default() -> Self {
        Self {
            collision_zone: 5.0,
            move_speed: 256.0,
        }
    }
}

/// World construction parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorldConfig {
    pub seed: u64,
    pub biome: BiomeId,
    pub stream: StreamConfig,
    pub profile: PlayerProfile,
}

/// Errors from world construction and resync.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Stream(#[from] StreamError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The world aggregate.
///
/// Owns the asset catalog, the biome table, the deterministic randomness,
/// the chunk manager, and the player state. Movement and render-sync logic
/// receive it by reference; there are no hidden statics, so multiple
/// independent worlds coexist (and the tests rely on that).
pub struct World {
    catalog: AssetCatalog,
    biomes: BiomeTable,
    biome: BiomeId,
    rng: WorldRng,
    chunks: ChunkManager,
    player_position: Vec2,
    profile: PlayerProfile,
}

impl World {
    /// Build a world over a catalog and biome table, validating everything
    /// up front: an empty group or dangling biome reference fails here, not
    /// as a silently empty landscape later.
    pub fn new(
        catalog: AssetCatalog,
        biomes: BiomeTable,
        config: WorldConfig,
    ) -> Result<Self, WorldError> {
        catalog.validate()?;
        biomes.validate(&catalog)?;
        biomes.get(config.biome)?;
        Ok(Self {
            catalog,
            biomes,
            biome: config.biome,
            rng: WorldRng::new(config.seed),
            chunks: ChunkManager::new(config.stream),
            player_position: Vec2::ZERO,
            profile: config.profile,
        })
    }

    /// The shipped forest world.
    pub fn forest(seed: u64) -> Result<Self, WorldError> {
        Self::new(
            everwood_assets::forest_catalog(),
            everwood_assets::forest_biomes(),
            WorldConfig {
                seed,
                ..WorldConfig::default()
            },
        )
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn player_position(&self) -> Vec2 {
        self.player_position
    }

    pub fn profile(&self) -> PlayerProfile {
        self.profile
    }

    pub fn current_chunk(&self) -> Option<ChunkKey> {
        self.chunks.current_chunk()
    }

    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }

    /// Move the player reference point and resynchronize chunk streaming
    /// around it. Chunk loads/unloads happen synchronously in this call.
    pub fn resync(
        &mut self,
        renderer: &mut dyn Instantiator,
        position: Vec2,
    ) -> Result<ResyncReport, WorldError> {
        self.player_position = position;
        let biome = self.biomes.get(self.biome)?;
        let report = self
            .chunks
            .resync(renderer, &self.catalog, biome, &self.rng, position)?;
        if !report.is_noop() {
            tracing::debug!(
                loaded = report.loaded.len(),
                unloaded = report.unloaded.len(),
                items = report.items_placed,
                "world resynced"
            );
        }
        Ok(report)
    }

    /// Would a subject with this descriptor and realized size collide with
    /// anything placed in the chunk under `position`?
    pub fn is_occupied(&self, position: Vec2, descriptor: &AssetDescriptor, size: Vec2) -> bool {
        !self.chunks.is_available(&Candidate {
            descriptor,
            position,
            size,
        })
    }

    /// Would the player collide with a solid item at `position`? Scans the
    /// current chunk only.
    pub fn is_occupied_for_player(&self, position: Vec2) -> bool {
        !self
            .chunks
            .is_available_for_player(position, self.profile.collision_zone)
    }

    /// Deterministically resolve the variant an asset group produces at a
    /// coordinate.
    pub fn resolve_asset(&self, group: &str, x: i32, y: i32) -> Result<&Arc<AssetDescriptor>, WorldError> {
        Ok(self.catalog.resolve(group, &self.rng, x, y)?)
    }

    /// Spawn a single item by hand into the loaded chunk containing
    /// `position`. The item goes through the same materialization path as
    /// generated placement and is owned by its chunk from then on. Returns
    /// `None` if no chunk is loaded there.
    pub fn spawn_item(
        &mut self,
        renderer: &mut dyn Instantiator,
        descriptor: &Arc<AssetDescriptor>,
        position: Vec2,
    ) -> Result<Option<VisualHandle>, WorldError> {
        let size = descriptor.footprint.as_vec2();
        let handle = renderer.instantiate(descriptor, position, size, 0.0)?;
        renderer.set_depth(
            handle,
            depth_for(descriptor.tier, position.y, self.player_position.y),
        );
        let item = PlacedItem {
            descriptor: Arc::clone(descriptor),
            position,
            size,
            rotation: 0.0,
            handle,
        };
        match self.chunks.insert_item(item) {
            Ok(()) => Ok(Some(handle)),
            Err(orphan) => {
                renderer.dispose(orphan.handle);
                Ok(None)
            }
        }
    }

    /// Re-sort the depth of every mid-tier item against the player, keeping
    /// draw order correct as the player moves vertically. Fixed-depth tiers
    /// are untouched.
    pub fn refresh_depth(&self, renderer: &mut dyn Instantiator) {
        for chunk in self.chunks.chunks() {
            for item in &chunk.items {
                if item.descriptor.tier.is_depth_sorted() {
                    renderer.set_depth(
                        item.handle,
                        DrawDepth::Sorted(item.position.y - self.player_position.y),
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use everwood_assets::{forest_biomes, forest_catalog, AssetGroup};
    use everwood_render::RecordingRenderer;

    fn small_config() -> WorldConfig {
        WorldConfig {
            seed: 42,
            stream: StreamConfig {
                chunk_size: 400.0,
                spawn_safe_zone: 50.0,
            },
            ..WorldConfig::default()
        }
    }

    #[test]
    fn forest_world_builds() {
        let world = World::forest(42).unwrap();
        assert_eq!(world.seed(), 42);
        assert_eq!(world.current_chunk(), None);
    }

    #[test]
    fn construction_rejects_dangling_biome_references() {
        let mut catalog = forest_catalog();
        let biomes = forest_biomes();
        // A catalog without the biome's ground group must fail fast.
        catalog = {
            let mut fresh = AssetCatalog::new();
            for name in ["tree", "rock"] {
                let group = catalog.group(name).unwrap();
                let variants = group
                    .variants()
                    .iter()
                    .map(|v| (**v).clone())
                    .collect::<Vec<_>>();
                fresh.insert(AssetGroup::new(name, variants).unwrap());
            }
            fresh
        };
        assert!(matches!(
            World::new(catalog, biomes, WorldConfig::default()),
            Err(WorldError::Asset(AssetError::UnknownGroup(_)))
        ));
    }

    #[test]
    fn resync_updates_player_and_streams() {
        let mut world = World::new(forest_catalog(), forest_biomes(), small_config()).unwrap();
        let mut renderer = RecordingRenderer::new();
        let report = world.resync(&mut renderer, Vec2::new(10.0, -10.0)).unwrap();

        assert_eq!(report.loaded.len(), 9);
        assert_eq!(world.player_position(), Vec2::new(10.0, -10.0));
        assert_eq!(world.current_chunk(), Some(ChunkKey::new(0, 0)));
        assert!(renderer.live_count() > 0);
    }

    #[test]
    fn resolve_asset_is_stable() {
        let world = World::forest(42).unwrap();
        let a = world.resolve_asset("tree", 120, -400).unwrap().clone();
        let b = world.resolve_asset("tree", 120, -400).unwrap().clone();
        assert_eq!(a.visual, b.visual);

        // A second world with the same seed resolves identically.
        let other = World::forest(42).unwrap();
        let c = other.resolve_asset("tree", 120, -400).unwrap().clone();
        assert_eq!(a.visual, c.visual);
    }

    #[test]
    fn unknown_group_resolution_fails() {
        let world = World::forest(42).unwrap();
        assert!(world.resolve_asset("kraken", 0, 0).is_err());
    }

    #[test]
    fn occupancy_sees_placed_obstacles() {
        let mut world = World::new(forest_catalog(), forest_biomes(), small_config()).unwrap();
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        // Pick an obstacle whose jittered anchor stayed in its home chunk,
        // so the query under its anchor scans the list that holds it.
        let solid = world
            .chunks()
            .chunks()
            .flat_map(|chunk| chunk.items.iter().map(move |item| (chunk.key, item)))
            .find(|(key, item)| {
                item.descriptor.tier == everwood_common::Tier::Obstacle
                    && item.descriptor.name != "rock"
                    && world.chunks().key_of(item.position) == *key
            })
            .map(|(_, item)| item.clone())
            .expect("forest places obstacles anchored in their home chunk");

        // A subject of a different species cannot be placed on top of it.
        let rock = world.resolve_asset("rock", 0, 0).unwrap().clone();
        assert!(world.is_occupied(solid.position, &rock, rock.footprint.as_vec2()));
        // Nothing is placed in unloaded space.
        assert!(!world.is_occupied(Vec2::new(50_000.0, 0.0), &rock, rock.footprint.as_vec2()));
    }

    #[test]
    fn player_occupancy_after_manual_spawn() {
        let mut world = World::new(forest_catalog(), forest_biomes(), small_config()).unwrap();
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let boulder = Arc::new(AssetDescriptor {
            name: "boulder".into(),
            visual: "test/boulder".into(),
            footprint: everwood_common::Footprint::square(40.0),
            safe_zone: 60.0,
            ground_safe_zone: 60.0,
            collision_zone: Some(40.0),
            collision_zone_y: None,
            tier: everwood_common::Tier::Obstacle,
            displacement_ratio: 0.0,
            size_ratio: 0.0,
        });
        let handle = world
            .spawn_item(&mut renderer, &boulder, Vec2::new(150.0, 0.0))
            .unwrap()
            .expect("current chunk is loaded");
        assert!(renderer.instance(handle).is_some());

        // Inside the boulder's collision band.
        assert!(world.is_occupied_for_player(Vec2::new(150.0, -5.0)));

        // Outside any loaded chunk nothing can block.
        let far = world.spawn_item(&mut renderer, &boulder, Vec2::new(50_000.0, 0.0)).unwrap();
        assert!(far.is_none());
    }

    #[test]
    fn depth_refresh_tracks_the_player() {
        let mut world = World::new(forest_catalog(), forest_biomes(), small_config()).unwrap();
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();
        world.refresh_depth(&mut renderer);

        let sorted_item = world
            .chunks()
            .chunks()
            .flat_map(|chunk| &chunk.items)
            .find(|item| item.descriptor.tier.is_depth_sorted())
            .expect("forest places depth-sorted items")
            .clone();
        let depth = renderer.instance(sorted_item.handle).unwrap().depth;
        assert_eq!(depth, Some(DrawDepth::Sorted(sorted_item.position.y)));

        // Moving the player down shifts every sorted depth by the same amount.
        world.player_position.y = 100.0;
        world.refresh_depth(&mut renderer);
        let depth = renderer.instance(sorted_item.handle).unwrap().depth;
        assert_eq!(depth, Some(DrawDepth::Sorted(sorted_item.position.y - 100.0)));
    }
}
