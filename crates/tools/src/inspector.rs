use everwood_common::Tier;
use everwood_kernel::World;

/// World inspector for developer tooling.
///
/// Read-only queries against the world state for debugging and development
/// overlays.
pub struct WorldInspector;

impl WorldInspector {
    /// Produce a summary of the streaming state.
    pub fn summary(world: &World) -> WorldSummary {
        let mut total_items = 0;
        let mut obstacles = 0;
        let mut decals = 0;
        for chunk in world.chunks().chunks() {
            total_items += chunk.item_count();
            for item in &chunk.items {
                match item.descriptor.tier {
                    Tier::Obstacle => obstacles += 1,
                    Tier::GroundDecal => decals += 1,
                    Tier::GroundTexture | Tier::Sky => {}
                }
            }
        }
        WorldSummary {
            seed: world.seed(),
            current_chunk: world.current_chunk().map(|key| key.to_string()),
            loaded_chunks: world.chunks().loaded_count(),
            total_items,
            obstacles,
            decals,
        }
    }
}

/// Summary of streaming state for the inspector.
#[derive(Debug, Clone)]
pub struct WorldSummary {
    pub seed: u64,
    pub current_chunk: Option<String>,
    pub loaded_chunks: usize,
    pub total_items: usize,
    pub obstacles: usize,
    pub decals: usize,
}

impl std::fmt::Display for WorldSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "World: seed={} chunk={} loaded={} items={} obstacles={} decals={}",
            self.seed,
            self.current_chunk.as_deref().unwrap_or("-"),
            self.loaded_chunks,
            self.total_items,
            self.obstacles,
            self.decals,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use everwood_render::RecordingRenderer;
    use glam::Vec2;

    #[test]
    fn summary_before_any_resync() {
        let world = World::forest(42).unwrap();
        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.loaded_chunks, 0);
        assert_eq!(summary.total_items, 0);
        assert_eq!(summary.current_chunk, None);
    }

    #[test]
    fn summary_counts_streamed_content() {
        let mut world = World::forest(42).unwrap();
        let mut renderer = RecordingRenderer::new();
        world.resync(&mut renderer, Vec2::ZERO).unwrap();

        let summary = WorldInspector::summary(&world);
        assert_eq!(summary.seed, 42);
        assert_eq!(summary.loaded_chunks, 9);
        assert_eq!(summary.current_chunk.as_deref(), Some("0/0"));
        assert!(summary.total_items > 0);
        assert!(summary.obstacles > 0);
        assert!(summary.total_items >= summary.obstacles + summary.decals);
    }

    #[test]
    fn summary_display() {
        let world = World::forest(7).unwrap();
        let text = WorldInspector::summary(&world).to_string();
        assert!(text.contains("seed=7"));
        assert!(text.contains("chunk=-"));
    }
}
