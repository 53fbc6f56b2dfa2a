use std::hint::black_box;
use std::time::Instant;

use everwood_assets::{forest_biomes, forest_catalog, BiomeId};
use everwood_render::RecordingRenderer;
use everwood_rng::WorldRng;
use everwood_stream::{ChunkManager, StreamConfig};
use glam::Vec2;

fn bench_cold_resync(iterations: usize) {
    let catalog = forest_catalog();
    let biomes = forest_biomes();
    let biome = biomes.get(BiomeId::Forest).unwrap();
    let rng = WorldRng::new(42);

    let start = Instant::now();
    for _ in 0..iterations {
        let mut manager = ChunkManager::new(StreamConfig::default());
        let mut renderer = RecordingRenderer::new();
        let report = manager
            .resync(&mut renderer, &catalog, biome, &rng, black_box(Vec2::ZERO))
            .unwrap();
        black_box(report);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  cold resync (9 chunks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_boundary_crossing(iterations: usize) {
    let catalog = forest_catalog();
    let biomes = forest_biomes();
    let biome = biomes.get(BiomeId::Forest).unwrap();
    let rng = WorldRng::new(42);
    let size = StreamConfig::default().chunk_size;

    let mut manager = ChunkManager::new(StreamConfig::default());
    let mut renderer = RecordingRenderer::new();
    manager
        .resync(&mut renderer, &catalog, biome, &rng, Vec2::ZERO)
        .unwrap();

    let start = Instant::now();
    for i in 0..iterations {
        // March east one chunk per iteration: 3 loads + 3 unloads each.
        let position = Vec2::new((i + 1) as f32 * size, 0.0);
        let report = manager
            .resync(&mut renderer, &catalog, biome, &rng, black_box(position))
            .unwrap();
        black_box(report);
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  boundary crossing ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn bench_player_query(iterations: usize) {
    let catalog = forest_catalog();
    let biomes = forest_biomes();
    let biome = biomes.get(BiomeId::Forest).unwrap();
    let rng = WorldRng::new(42);

    let mut manager = ChunkManager::new(StreamConfig::default());
    let mut renderer = RecordingRenderer::new();
    manager
        .resync(&mut renderer, &catalog, biome, &rng, Vec2::ZERO)
        .unwrap();

    let start = Instant::now();
    for i in 0..iterations {
        let position = Vec2::new((i % 500) as f32, (i % 700) as f32);
        black_box(manager.is_available_for_player(black_box(position), 5.0));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  player query ({iterations} iters): {per_iter:?}/iter, total {elapsed:?}");
}

fn main() {
    println!("=== Chunk Stream Benchmarks ===\n");

    println!("Cold resync:");
    bench_cold_resync(10);

    println!("\nBoundary crossing:");
    bench_boundary_crossing(50);

    println!("\nPlayer occupancy query:");
    bench_player_query(100_000);

    println!("\n=== Done ===");
}
