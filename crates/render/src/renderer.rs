use std::collections::BTreeMap;

use everwood_assets::AssetDescriptor;
use everwood_common::Tier;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque handle to a visual owned by the renderer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct VisualHandle(pub u64);

/// Draw ordering for a visual: pinned to a fixed layer, or depth-sorted by a
/// vertical coordinate relative to the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawDepth {
    Fixed(i32),
    Sorted(f32),
}

/// Fixed layers for the tier extremes, far outside any sorted range.
pub const GROUND_TEXTURE_DEPTH: i32 = -200_000;
pub const SKY_DEPTH: i32 = 100_000;

/// Draw depth for a tier at a given anchor, relative to the player.
pub fn depth_for(tier: Tier, anchor_y: f32, player_y: f32) -> DrawDepth {
    match tier {
        Tier::GroundTexture => DrawDepth::Fixed(GROUND_TEXTURE_DEPTH),
        Tier::Sky => DrawDepth::Fixed(SKY_DEPTH),
        Tier::GroundDecal | Tier::Obstacle => DrawDepth::Sorted(anchor_y - player_y),
    }
}

/// Errors from the renderer collaborator. A failed instantiation surfaces to
/// the caller of the chunk resync; a partially loaded chunk is a visible
/// correctness bug, not something to swallow.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to instantiate visual {0:?}")]
    InstantiateFailed(String),
}

/// What the world core needs from a renderer.
pub trait Instantiator {
    /// Materialize one instance of an asset at a world position with its
    /// realized (post-jitter) size and rotation.
    fn instantiate(
        &mut self,
        descriptor: &AssetDescriptor,
        position: Vec2,
        size: Vec2,
        rotation: f32,
    ) -> Result<VisualHandle, RenderError>;

    /// Release a visual. Safe to call once per handle; the handle is dead
    /// afterwards.
    fn dispose(&mut self, handle: VisualHandle);

    /// Assign draw ordering to a live visual.
    fn set_depth(&mut self, handle: VisualHandle, depth: DrawDepth);
}

/// One recorded instantiation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedInstance {
    pub visual: String,
    pub position: Vec2,
    pub size: Vec2,
    pub rotation: f32,
    pub depth: Option<DrawDepth>,
}

/// Headless renderer that records every instantiation.
///
/// Stands in for a GPU backend in tests and the CLI, and doubles as the
/// fault injector for collaborator-failure paths via [`fail_after`].
///
/// [`fail_after`]: RecordingRenderer::fail_after
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_handle: u64,
    live: BTreeMap<VisualHandle, RecordedInstance>,
    created: usize,
    disposed: usize,
    fail_after: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every instantiation after the first `n` succeed.
    pub fn fail_after(mut self, n: usize) -> Self {
        self.fail_after = Some(n);
        self
    }

    pub fn live_instances(&self) -> &BTreeMap<VisualHandle, RecordedInstance> {
        &self.live
    }

    pub fn instance(&self, handle: VisualHandle) -> Option<&RecordedInstance> {
        self.live.get(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn created_count(&self) -> usize {
        self.created
    }

    pub fn disposed_count(&self) -> usize {
        self.disposed
    }
}

impl Instantiator for RecordingRenderer {
    fn instantiate(
        &mut self,
        descriptor: &AssetDescriptor,
        position: Vec2,
        size: Vec2,
        rotation: f32,
    ) -> Result<VisualHandle, RenderError> {
        if self.fail_after.is_some_and(|n| self.created >= n) {
            return Err(RenderError::InstantiateFailed(descriptor.visual.clone()));
        }
        let handle = VisualHandle(self.next_handle);
        self.next_handle += 1;
        self.created += 1;
        self.live.insert(
            handle,
            RecordedInstance {
                visual: descriptor.visual.clone(),
                position,
                size,
                rotation,
                depth: None,
            },
        );
        Ok(handle)
    }

    fn dispose(&mut self, handle: VisualHandle) {
        if self.live.remove(&handle).is_some() {
            self.disposed += 1;
        }
    }

    fn set_depth(&mut self, handle: VisualHandle, depth: DrawDepth) {
        if let Some(instance) = self.live.get_mut(&handle) {
            instance.depth = Some(depth);
        }
    }
}
