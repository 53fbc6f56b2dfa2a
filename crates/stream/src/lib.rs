//! Streaming: chunk partitioning of infinite world space, load/unload
//! lifecycle around the player, and chunk population.
//!
//! # Invariants
//! - After a resync the loaded set equals exactly the 3×3 neighborhood of
//!   the player's chunk.
//! - A chunk is loaded at most once; loading is idempotent by key.
//! - Unloading releases every visual handle the chunk owns.

mod chunk;
mod manager;

pub use chunk::{Chunk, ChunkKey};
pub use manager::{ChunkManager, ResyncReport, StreamConfig, StreamError};

pub fn crate_info() -> &'static str {
    "everwood-stream v0.1.0"
}
