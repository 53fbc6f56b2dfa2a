use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{AssetCatalog, AssetError};

/// Biome identifier. Forest is the only shipped biome; the table exists so
/// more can be added without touching the generation pipeline.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum BiomeId {
    #[default]
    Forest,
}

impl fmt::Display for BiomeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BiomeId::Forest => write!(f, "forest"),
        }
    }
}

/// One placement rule of a biome: which group attempts placement, at what
/// base rate, and optionally a chunk-level boosted rate for dense clusters
/// (groves) decided once per chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub group: String,
    pub draw_rate: f32,
    pub boost_draw_rate: Option<f32>,
    pub boost_trigger_rate: Option<f32>,
}

impl PlacementRule {
    pub fn new(group: impl Into<String>, draw_rate: f32) -> Self {
        Self {
            group: group.into(),
            draw_rate,
            boost_draw_rate: None,
            boost_trigger_rate: None,
        }
    }

    pub fn with_boost(mut self, boost_draw_rate: f32, boost_trigger_rate: f32) -> Self {
        self.boost_draw_rate = Some(boost_draw_rate);
        self.boost_trigger_rate = Some(boost_trigger_rate);
        self
    }
}

/// Ground group plus the ordered item rules that populate a chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biome {
    pub ground: String,
    pub rules: Vec<PlacementRule>,
}

/// Maps biome identifiers to their ground and placement rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BiomeTable {
    biomes: BTreeMap<BiomeId, Biome>,
}

impl BiomeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: BiomeId, biome: Biome) {
        self.biomes.insert(id, biome);
    }

    pub fn get(&self, id: BiomeId) -> Result<&Biome, AssetError> {
        self.biomes
            .get(&id)
            .ok_or_else(|| AssetError::UnknownBiome(id.to_string()))
    }

    /// Fail fast on dangling group references or out-of-range rates, so a
    /// misconfigured biome never silently produces an empty world.
    pub fn validate(&self, catalog: &AssetCatalog) -> Result<(), AssetError> {
        for (id, biome) in &self.biomes {
            catalog.group(&biome.ground)?;
            for rule in &biome.rules {
                catalog.group(&rule.group)?;
                let check = |rate: f32, what: &str| {
                    if (0.0..=1.0).contains(&rate) {
                        Ok(())
                    } else {
                        Err(AssetError::InvalidRule {
                            biome: id.to_string(),
                            group: rule.group.clone(),
                            reason: format!("{what} {rate} outside 0..=1"),
                        })
                    }
                };
                check(rule.draw_rate, "draw rate")?;
                if let Some(rate) = rule.boost_draw_rate {
                    check(rate, "boost draw rate")?;
                }
                if let Some(rate) = rule.boost_trigger_rate {
                    check(rate, "boost trigger rate")?;
                }
                if rule.boost_draw_rate.is_some() != rule.boost_trigger_rate.is_some() {
                    return Err(AssetError::InvalidRule {
                        biome: id.to_string(),
                        group: rule.group.clone(),
                        reason: "boost rate and trigger must be set together".into(),
                    });
                }
            }
        }
        Ok(())
    }
}
