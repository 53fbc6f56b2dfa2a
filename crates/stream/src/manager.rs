use std::collections::HashMap;
use std::sync::Arc;

use everwood_assets::{AssetCatalog, AssetError, AssetGroup, Biome, PlacementRule};
use everwood_common::Tier;
use everwood_placement::{
    is_space_available, is_space_available_for_player, jitter_for, Candidate, PlacedItem,
    ScanGrid,
};
use everwood_render::{depth_for, Instantiator, RenderError};
use everwood_rng::{channel, SeedKey, WorldRng};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::chunk::{Chunk, ChunkKey};

/// Streaming configuration: chunk pitch and the spawn-safe clearing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Edge length of a chunk in world units.
    pub chunk_size: f32,
    /// Half-side of the square around the origin kept free of anything
    /// above the ground texture, so the spawn point is never obstructed.
    pub spawn_safe_zone: f32,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            chunk_size: 2000.0,
            spawn_safe_zone: 200.0,
        }
    }
}

/// Errors surfaced by a resync. Placement rejections are not errors; these
/// are configuration problems or collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What one resync did.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResyncReport {
    pub loaded: Vec<ChunkKey>,
    pub unloaded: Vec<ChunkKey>,
    pub items_placed: usize,
}

impl ResyncReport {
    pub fn is_noop(&self) -> bool {
        self.loaded.is_empty() && self.unloaded.is_empty()
    }
}

/// Owns every materialized chunk and keeps the loaded set equal to the 3×3
/// neighborhood of the player's chunk.
///
/// All work is synchronous: a chunk-boundary crossing populates and disposes
/// chunks within the resync call.
pub struct ChunkManager {
    config: StreamConfig,
    loaded: HashMap<ChunkKey, Chunk>,
    current: Option<ChunkKey>,
}

impl ChunkManager {
    pub fn new(config: StreamConfig) -> Self {
        Self {
            config,
            loaded: HashMap::new(),
            current: None,
        }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Chunk key for a world position.
    pub fn key_of(&self, position: Vec2) -> ChunkKey {
        ChunkKey::from_world(position, self.config.chunk_size)
    }

    /// The chunk the player was last resynced into.
    pub fn current_chunk(&self) -> Option<ChunkKey> {
        self.current
    }

    pub fn chunk(&self, key: ChunkKey) -> Option<&Chunk> {
        self.loaded.get(&key)
    }

    pub fn is_loaded(&self, key: ChunkKey) -> bool {
        self.loaded.contains_key(&key)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.loaded.values()
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn total_items(&self) -> usize {
        self.loaded.values().map(Chunk::item_count).sum()
    }

    /// Resynchronize the loaded set with the player's position.
    ///
    /// No-op while the player stays in their chunk. On a boundary crossing,
    /// chunks leaving the 3×3 neighborhood are disposed first, then missing
    /// neighbors are populated (ground layer, then item rules in biome
    /// order). Already-loaded chunks are never touched, so their contents —
    /// being coordinate-seeded — survive byte-identical.
    pub fn resync(
        &mut self,
        renderer: &mut dyn Instantiator,
        catalog: &AssetCatalog,
        biome: &Biome,
        rng: &WorldRng,
        player_position: Vec2,
    ) -> Result<ResyncReport, StreamError> {
        let _span = tracing::info_span!("resync").entered();

        let center = self.key_of(player_position);
        if self.current == Some(center) {
            return Ok(ResyncReport::default());
        }
        self.current = Some(center);

        let wanted = center.neighborhood(self.config.chunk_size);

        let stale: Vec<ChunkKey> = self
            .loaded
            .keys()
            .filter(|key| !wanted.contains(key))
            .copied()
            .collect();
        for key in &stale {
            if let Some(chunk) = self.loaded.remove(key) {
                tracing::debug!(%key, items = chunk.item_count(), "unloading chunk");
                for item in chunk.items {
                    renderer.dispose(item.handle);
                }
            }
        }

        let mut loaded = Vec::new();
        let mut items_placed = 0;
        for key in wanted {
            if self.loaded.contains_key(&key) {
                continue;
            }
            let chunk = self.populate(renderer, catalog, biome, rng, key, player_position.y)?;
            tracing::debug!(%key, items = chunk.item_count(), "loaded chunk");
            items_placed += chunk.item_count();
            self.loaded.insert(key, chunk);
            loaded.push(key);
        }

        Ok(ResyncReport {
            loaded,
            unloaded: stale,
            items_placed,
        })
    }

    /// Player-movement occupancy, scanned against the current chunk only.
    pub fn is_available_for_player(&self, position: Vec2, collision_zone: f32) -> bool {
        let Some(current) = self.current else {
            return true;
        };
        match self.loaded.get(&current) {
            Some(chunk) => is_space_available_for_player(position, collision_zone, &chunk.items),
            None => true,
        }
    }

    /// Placement-style occupancy for an external candidate, against the
    /// loaded chunk containing it.
    pub fn is_available(&self, candidate: &Candidate<'_>) -> bool {
        match self.loaded.get(&self.key_of(candidate.position)) {
            Some(chunk) => is_space_available(candidate, &[&chunk.items]),
            None => true,
        }
    }

    /// Hand an externally created item to the chunk that owns its position.
    /// Returns the item back if that chunk is not loaded — the caller still
    /// owns the visual handle in that case.
    pub fn insert_item(&mut self, item: PlacedItem) -> Result<(), PlacedItem> {
        let key = self.key_of(item.position);
        match self.loaded.get_mut(&key) {
            Some(chunk) => {
                chunk.items.push(item);
                Ok(())
            }
            None => Err(item),
        }
    }

    /// Populate one chunk. On any failure the chunk's already-created
    /// visuals are released before the error propagates; a chunk is either
    /// complete or absent.
    fn populate(
        &self,
        renderer: &mut dyn Instantiator,
        catalog: &AssetCatalog,
        biome: &Biome,
        rng: &WorldRng,
        key: ChunkKey,
        player_y: f32,
    ) -> Result<Chunk, StreamError> {
        let mut items = Vec::new();
        match self.populate_layers(renderer, catalog, biome, rng, key, player_y, &mut items) {
            Ok(()) => Ok(Chunk::new(key, items)),
            Err(error) => {
                for item in items {
                    renderer.dispose(item.handle);
                }
                Err(error)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn populate_layers(
        &self,
        renderer: &mut dyn Instantiator,
        catalog: &AssetCatalog,
        biome: &Biome,
        rng: &WorldRng,
        key: ChunkKey,
        player_y: f32,
        items: &mut Vec<PlacedItem>,
    ) -> Result<(), StreamError> {
        let ground = catalog.group(&biome.ground)?;
        self.populate_layer(renderer, rng, key, player_y, items, ground, 1.0, 0)?;

        for rule in &biome.rules {
            let group = catalog.group(&rule.group)?;
            let rate = self.effective_rate(rng, key, rule);
            // Large variants may straddle the chunk edge; extend the scan by
            // half the widest footprint so seams stay filled.
            let margin = (group.max_footprint_width() / 2.0).round() as i32;
            self.populate_layer(renderer, rng, key, player_y, items, group, rate, margin)?;
        }
        Ok(())
    }

    /// Chunk-level boost: one roll per chunk decides whether the whole chunk
    /// uses the rule's boosted rate, clustering items (groves) without
    /// per-cell correlation.
    fn effective_rate(&self, rng: &WorldRng, key: ChunkKey, rule: &PlacementRule) -> f32 {
        if let (Some(boost), Some(trigger)) = (rule.boost_draw_rate, rule.boost_trigger_rate) {
            if rng.chance(SeedKey::new(&rule.group, channel::BOOST, key.x, key.y), trigger) {
                return boost;
            }
        }
        rule.draw_rate
    }

    #[allow(clippy::too_many_arguments)]
    fn populate_layer(
        &self,
        renderer: &mut dyn Instantiator,
        rng: &WorldRng,
        key: ChunkKey,
        player_y: f32,
        items: &mut Vec<PlacedItem>,
        group: &AssetGroup,
        rate: f32,
        margin: i32,
    ) -> Result<(), StreamError> {
        let bound = (self.config.chunk_size / 2.0) as i32 + margin;
        let cells = ScanGrid::new(-bound, bound, |x, y| {
            group.resolve(rng, key.x + x, key.y + y).safe_zone
        });

        let mut placed = 0usize;
        for (cell_x, cell_y) in cells {
            let abs_x = key.x + cell_x;
            let abs_y = key.y + cell_y;
            let descriptor = group.resolve(rng, abs_x, abs_y);

            if !rng.chance(SeedKey::new(&descriptor.name, channel::DRAW, abs_x, abs_y), rate) {
                continue;
            }

            let jitter = jitter_for(rng, descriptor, abs_x, abs_y);
            let position = Vec2::new(abs_x as f32, abs_y as f32) + jitter.offset;
            let size = descriptor.footprint.scaled(jitter.scale);

            if descriptor.tier >= Tier::GroundDecal && self.in_spawn_zone(position) {
                continue;
            }

            let candidate = Candidate {
                descriptor,
                position,
                size,
            };
            if !self.candidate_fits(&candidate, items, key) {
                continue;
            }

            let handle = renderer.instantiate(descriptor, position, size, jitter.rotation)?;
            renderer.set_depth(handle, depth_for(descriptor.tier, position.y, player_y));
            items.push(PlacedItem {
                descriptor: Arc::clone(descriptor),
                position,
                size,
                rotation: jitter.rotation,
                handle,
            });
            placed += 1;
        }

        tracing::trace!(group = group.name(), %key, placed, "layer populated");
        Ok(())
    }

    fn in_spawn_zone(&self, position: Vec2) -> bool {
        let zone = self.config.spawn_safe_zone;
        position.x.abs() < zone && position.y.abs() < zone
    }

    /// A jittered candidate can drift across the chunk edge; check the
    /// pending items of the chunk under construction plus the loaded chunk
    /// under the candidate's anchor, so same-chunk pairs can never overlap
    /// regardless of drift.
    fn candidate_fits(
        &self,
        candidate: &Candidate<'_>,
        pending: &[PlacedItem],
        home: ChunkKey,
    ) -> bool {
        let anchor_key = self.key_of(candidate.position);
        if anchor_key != home {
            if let Some(neighbor) = self.loaded.get(&anchor_key) {
                return is_space_available(candidate, &[pending, &neighbor.items]);
            }
        }
        is_space_available(candidate, &[pending])
    }
}
