//! Renderer collaborator seam.
//!
//! The world core never draws; it asks an [`Instantiator`] to materialize,
//! re-order, and release visuals. The trait is stable; swap in a sprite or
//! mesh backend without changing the generation pipeline.
//!
//! # Invariants
//! - The renderer owns visual resources but releases them only when told.
//! - Handles are opaque; the core never interprets them.

mod renderer;

pub use renderer::{
    depth_for, DrawDepth, Instantiator, RecordedInstance, RecordingRenderer, RenderError,
    VisualHandle, GROUND_TEXTURE_DEPTH, SKY_DEPTH,
};

pub fn crate_info() -> &'static str {
    "everwood-render v0.1.0"
}
