//! Developer tooling: read-only world inspection for debug output.
//!
//! # Invariants
//! - Tools never mutate world state.

pub mod inspector;

pub use inspector::{WorldInspector, WorldSummary};

pub fn crate_info() -> &'static str {
    "everwood-tools v0.1.0"
}
