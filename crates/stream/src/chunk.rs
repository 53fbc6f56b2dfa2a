use std::fmt;

use everwood_placement::PlacedItem;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Identifier of a chunk: its center coordinate rounded to the chunk grid,
/// so keys are always multiples of the chunk size. Serialized as `"x/y"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct ChunkKey {
    pub x: i32,
    pub y: i32,
}

impl ChunkKey {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chunk containing a world position: round to the grid independently
    /// per axis.
    pub fn from_world(position: Vec2, chunk_size: f32) -> Self {
        Self {
            x: (position.x / chunk_size).round() as i32 * chunk_size as i32,
            y: (position.y / chunk_size).round() as i32 * chunk_size as i32,
        }
    }

    /// The 3×3 neighborhood including this chunk.
    pub fn neighborhood(self, chunk_size: f32) -> [ChunkKey; 9] {
        let size = chunk_size as i32;
        let mut keys = [self; 9];
        for (index, key) in keys.iter_mut().enumerate() {
            let i = index as i32 % 3 - 1;
            let j = index as i32 / 3 - 1;
            key.x += i * size;
            key.y += j * size;
        }
        keys
    }
}

impl fmt::Display for ChunkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.x, self.y)
    }
}

/// A materialized chunk: the unit of load/unload. Owns its placed items and,
/// through them, their visual handles.
#[derive(Debug)]
pub struct Chunk {
    pub key: ChunkKey,
    pub items: Vec<PlacedItem>,
}

impl Chunk {
    pub fn new(key: ChunkKey, items: Vec<PlacedItem>) -> Self {
        Self { key, items }
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
