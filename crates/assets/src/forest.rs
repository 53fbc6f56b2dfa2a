//! Builtin forest content: the shipped catalog and biome table.

use everwood_common::{Footprint, Tier};

use crate::{AssetCatalog, AssetDescriptor, AssetGroup, Biome, BiomeId, BiomeTable, PlacementRule};

fn descriptor(name: &str, visual: &str, tier: Tier) -> AssetDescriptor {
    AssetDescriptor {
        name: name.into(),
        visual: visual.into(),
        footprint: Footprint::square(0.0),
        safe_zone: 1.0,
        ground_safe_zone: 1.0,
        collision_zone: None,
        collision_zone_y: None,
        tier,
        displacement_ratio: 0.0,
        size_ratio: 0.0,
    }
}

/// The forest catalog. Numbers are tuned for a 2000-unit chunk; trees carry
/// a collision body much smaller than their visual footprint so the player
/// can walk under the canopy.
pub fn forest_catalog() -> AssetCatalog {
    let mut catalog = AssetCatalog::new();

    let ground = AssetDescriptor {
        footprint: Footprint::square(500.0),
        safe_zone: 500.0,
        ground_safe_zone: 500.0,
        ..descriptor("ground", "forest/ground_texture", Tier::GroundTexture)
    };
    catalog.insert(AssetGroup::new("ground", vec![ground]).expect("forest ground"));

    let tree = AssetDescriptor {
        footprint: Footprint::square(250.0),
        safe_zone: 250.0,
        ground_safe_zone: 100.0,
        collision_zone: Some(85.0),
        collision_zone_y: Some(25.0),
        displacement_ratio: 0.2,
        size_ratio: 0.4,
        ..descriptor("tree", "forest/tree", Tier::Obstacle)
    };
    let tree2 = AssetDescriptor {
        footprint: Footprint::new(125.0, 150.0),
        safe_zone: 120.0,
        ground_safe_zone: 75.0,
        collision_zone: Some(50.0),
        collision_zone_y: Some(15.0),
        displacement_ratio: 0.2,
        size_ratio: 0.6,
        ..descriptor("tree", "forest/tree2", Tier::Obstacle)
    };
    let tree3 = AssetDescriptor {
        footprint: Footprint::new(80.0, 150.0),
        safe_zone: 120.0,
        ground_safe_zone: 75.0,
        collision_zone: Some(50.0),
        collision_zone_y: Some(15.0),
        displacement_ratio: 0.2,
        size_ratio: 0.6,
        ..descriptor("tree", "forest/tree3", Tier::Obstacle)
    };
    catalog.insert(AssetGroup::new("tree", vec![tree, tree2, tree3]).expect("forest trees"));

    let rock = AssetDescriptor {
        footprint: Footprint::square(50.0),
        safe_zone: 75.0,
        ground_safe_zone: 75.0,
        collision_zone: Some(45.0),
        displacement_ratio: 0.2,
        size_ratio: 0.5,
        ..descriptor("rock", "forest/rock", Tier::Obstacle)
    };
    let rock2 = AssetDescriptor {
        footprint: Footprint::square(50.0),
        safe_zone: 75.0,
        ground_safe_zone: 75.0,
        collision_zone: Some(45.0),
        displacement_ratio: 0.2,
        size_ratio: 0.5,
        ..descriptor("rock", "forest/rock2", Tier::Obstacle)
    };
    catalog.insert(AssetGroup::new("rock", vec![rock, rock2]).expect("forest rocks"));

    let stump = AssetDescriptor {
        footprint: Footprint::square(60.0),
        safe_zone: 60.0,
        ground_safe_zone: 60.0,
        collision_zone: Some(40.0),
        displacement_ratio: 0.6,
        size_ratio: 0.8,
        ..descriptor("stump", "forest/stump", Tier::Obstacle)
    };
    catalog.insert(AssetGroup::new("stump", vec![stump]).expect("forest stump"));

    let grass = AssetDescriptor {
        footprint: Footprint::square(40.0),
        safe_zone: 50.0,
        ground_safe_zone: 50.0,
        collision_zone: Some(0.0),
        size_ratio: 0.5,
        ..descriptor("grass", "forest/grass", Tier::GroundDecal)
    };
    catalog.insert(AssetGroup::new("grass", vec![grass]).expect("forest grass"));

    let bush = AssetDescriptor {
        footprint: Footprint::square(75.0),
        safe_zone: 75.0,
        ground_safe_zone: 75.0,
        collision_zone: Some(0.0),
        displacement_ratio: 0.5,
        size_ratio: 0.7,
        ..descriptor("bush", "forest/bush", Tier::GroundDecal)
    };
    catalog.insert(AssetGroup::new("bush", vec![bush]).expect("forest bush"));

    let brush = AssetDescriptor {
        footprint: Footprint::square(70.0),
        safe_zone: 70.0,
        ground_safe_zone: 70.0,
        collision_zone: Some(0.0),
        displacement_ratio: 0.2,
        size_ratio: 0.5,
        ..descriptor("brush", "forest/brush", Tier::GroundDecal)
    };
    catalog.insert(AssetGroup::new("brush", vec![brush]).expect("forest brush"));

    catalog
}

/// The forest biome: trees dominate, boosted per-chunk into groves; rocks,
/// stumps and walkable decals fill in the rest.
pub fn forest_biomes() -> BiomeTable {
    let mut table = BiomeTable::new();
    table.insert(
        BiomeId::Forest,
        Biome {
            ground: "ground".into(),
            rules: vec![
                PlacementRule::new("tree", 0.1).with_boost(0.4, 0.2),
                PlacementRule::new("rock", 0.02),
                PlacementRule::new("stump", 0.01),
                PlacementRule::new("bush", 0.01),
                PlacementRule::new("grass", 0.07),
                PlacementRule::new("brush", 0.005),
            ],
        },
    );
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use everwood_rng::WorldRng;

    #[test]
    fn forest_configuration_is_valid() {
        let catalog = forest_catalog();
        let biomes = forest_biomes();
        assert!(catalog.validate().is_ok());
        assert!(biomes.validate(&catalog).is_ok());
    }

    #[test]
    fn tree_variants_share_an_identity() {
        let catalog = forest_catalog();
        let rng = WorldRng::new(42);
        for x in 0..50 {
            let variant = catalog.resolve("tree", &rng, x, 0).unwrap();
            assert_eq!(variant.name, "tree");
        }
    }

    #[test]
    fn decals_are_walkable() {
        let catalog = forest_catalog();
        for name in ["grass", "bush", "brush"] {
            for variant in catalog.group(name).unwrap().variants() {
                assert!(variant.is_walkable(), "{name} should be walkable");
            }
        }
    }

    #[test]
    fn obstacles_are_solid() {
        let catalog = forest_catalog();
        for name in ["tree", "rock", "stump"] {
            for variant in catalog.group(name).unwrap().variants() {
                assert!(!variant.is_walkable(), "{name} should be solid");
            }
        }
    }
}
