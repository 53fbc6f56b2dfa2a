//! Shared types for the everwood world core.
//!
//! # Invariants
//! - Types here are plain data; no behavior that touches world state.

pub mod types;

pub use types::{Footprint, Tier};
