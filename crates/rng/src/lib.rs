//! Coordinate-seeded deterministic randomness.
//!
//! # Invariants
//! - Every roll is a pure function of `(world seed, seed key)`; there is no
//!   internal state and no call-order dependence. The same location always
//!   regenerates identically, across sessions and independent of load order.
//! - Values never reach 100.0, so a probability of 1.0 always passes.

use std::fmt;

/// Named channels for the rolls the generation pipeline makes, so a cell's
/// independent decisions (variant, draw, jitter axes, ...) never share a seed.
pub mod channel {
    pub const VARIANT: &str = "variant";
    pub const DRAW: &str = "draw";
    pub const BOOST: &str = "boost";
    pub const DEVIATION_X: &str = "deviation-x";
    pub const DEVIATION_Y: &str = "deviation-y";
    pub const SIZE: &str = "size";
    pub const GIANT: &str = "giant";
    pub const ROTATE: &str = "rotate";
}

/// A structured seed: an asset (or group) name, a roll channel, and the cell
/// coordinates. Hashing the fields separately with a separator avoids the
/// collisions a naive string concatenation would allow (`"a1" + "2"` vs
/// `"a" + "12"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedKey<'a> {
    pub name: &'a str,
    pub channel: &'a str,
    pub x: i32,
    pub y: i32,
}

impl<'a> SeedKey<'a> {
    pub fn new(name: &'a str, channel: &'a str, x: i32, y: i32) -> Self {
        Self { name, channel, x, y }
    }
}

impl fmt::Display for SeedKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}/{}", self.name, self.channel, self.x, self.y)
    }
}

/// Deterministic world randomness, keyed by a process-lifetime seed.
///
/// A different seed produces a different world; within one seed every
/// `SeedKey` maps to exactly one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldRng {
    seed: u64,
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;
const FIELD_SEPARATOR: u8 = 0x1f;

impl WorldRng {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A value in `[0, 100)`, uniform, pure in `(seed, key)`.
    pub fn number(&self, key: SeedKey<'_>) -> f32 {
        let h = self.hash(&key);
        // Top 24 bits: the f32 math stays exact, so the value is strictly
        // below 100 and a probability of 1.0 always passes.
        let unit = (h >> 40) as u32 as f32 / (1u32 << 24) as f32;
        unit * 100.0
    }

    /// True with the given probability (0.0..=1.0).
    pub fn chance(&self, key: SeedKey<'_>, probability: f32) -> bool {
        self.number(key) < probability * 100.0
    }

    fn hash(&self, key: &SeedKey<'_>) -> u64 {
        let mut h = FNV_OFFSET;
        h = fnv1a(h, key.name.as_bytes());
        h = fnv1a(h, &[FIELD_SEPARATOR]);
        h = fnv1a(h, key.channel.as_bytes());
        h = fnv1a(h, &[FIELD_SEPARATOR]);
        h = fnv1a(h, &key.x.to_le_bytes());
        h = fnv1a(h, &key.y.to_le_bytes());
        splitmix64(h ^ self.seed)
    }
}

fn fnv1a(mut h: u64, bytes: &[u8]) -> u64 {
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

/// Splitmix64 finalizer: spreads the FNV accumulation over all 64 bits so
/// nearby coordinates do not produce nearby values.
fn splitmix64(mut state: u64) -> u64 {
    state = state.wrapping_add(0x9e37_79b9_7f4a_7c15);
    let mut z = state;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
