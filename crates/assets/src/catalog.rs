use std::collections::BTreeMap;
use std::sync::Arc;

use everwood_rng::{channel, SeedKey, WorldRng};

use crate::{AssetDescriptor, AssetError};

/// A named bucket of 1+ descriptor variants ("tree" holding three tree kinds).
///
/// Constructed through [`AssetGroup::new`], which validates every variant, so
/// a group in hand is always resolvable.
#[derive(Debug, Clone)]
pub struct AssetGroup {
    name: String,
    variants: Vec<Arc<AssetDescriptor>>,
}

impl AssetGroup {
    pub fn new(
        name: impl Into<String>,
        variants: Vec<AssetDescriptor>,
    ) -> Result<Self, AssetError> {
        let name = name.into();
        if variants.is_empty() {
            return Err(AssetError::EmptyGroup(name));
        }
        for variant in &variants {
            variant.check()?;
        }
        Ok(Self {
            name,
            variants: variants.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[Arc<AssetDescriptor>] {
        &self.variants
    }

    /// Resolve the concrete variant for a cell, coordinate-seeded: revisiting
    /// the same coordinates always yields the same variant.
    pub fn resolve(&self, rng: &WorldRng, x: i32, y: i32) -> &Arc<AssetDescriptor> {
        if self.variants.len() > 1 {
            let roll = rng.number(SeedKey::new(&self.name, channel::VARIANT, x, y)) / 100.0;
            let index = (roll * self.variants.len() as f32 - 0.01).floor().abs() as usize;
            &self.variants[index]
        } else {
            &self.variants[0]
        }
    }

    /// Widest nominal footprint among the variants; the generation scan
    /// extends chunk bounds by half of this to avoid seams.
    pub fn max_footprint_width(&self) -> f32 {
        self.variants
            .iter()
            .map(|v| v.footprint.width)
            .fold(0.0, f32::max)
    }
}

/// Registry of all placeable groups, keyed by group name.
///
/// BTreeMap so iteration (and everything derived from it) is deterministic.
#[derive(Debug, Clone, Default)]
pub struct AssetCatalog {
    groups: BTreeMap<String, AssetGroup>,
}

impl AssetCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, group: AssetGroup) {
        self.groups.insert(group.name().to_string(), group);
    }

    pub fn group(&self, name: &str) -> Result<&AssetGroup, AssetError> {
        self.groups
            .get(name)
            .ok_or_else(|| AssetError::UnknownGroup(name.to_string()))
    }

    pub fn resolve(
        &self,
        name: &str,
        rng: &WorldRng,
        x: i32,
        y: i32,
    ) -> Result<&Arc<AssetDescriptor>, AssetError> {
        Ok(self.group(name)?.resolve(rng, x, y))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Re-check every descriptor, so a world constructor can vouch for
    /// whatever catalog it is handed.
    pub fn validate(&self) -> Result<(), AssetError> {
        for group in self.groups.values() {
            if group.variants().is_empty() {
                return Err(AssetError::EmptyGroup(group.name().to_string()));
            }
            for variant in group.variants() {
                variant.check()?;
            }
        }
        Ok(())
    }
}
