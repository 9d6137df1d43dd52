//! Procedural stand-ins for the pre-loaded model set.
//!
//! Each biome kind gets a bowl-shaped underside and a noise-displaced top, plus a
//! handful of tree and rock meshes. Ids follow the `<kind>biome-bottom` /
//! `<kind>biome-top` pattern.

use glam::{UVec2, Vec2, Vec3};
use noise::{NoiseFn, Simplex};
use terreform_scatter::TerrainSpec;
use terreform_scene::{Mesh, ModelRegistry, RegistryError};

/// Terrain footprint edge length in biome-local units.
const TERRAIN_SIZE: f32 = 2.0;
const TERRAIN_RESOLUTION: u32 = 24;

/// One biome of the stock ring.
#[derive(Clone, Debug)]
pub struct BiomeKind {
    pub name: &'static str,
    pub position: Vec3,
    /// Peak height of the top surface noise.
    pub roughness: f32,
    pub models: &'static [&'static str],
}

impl BiomeKind {
    /// Registry ids of this biome's terrain and scenery.
    pub fn terrain(&self) -> TerrainSpec {
        TerrainSpec {
            bottom: format!("{}biome-bottom", self.name),
            top: format!("{}biome-top", self.name),
            models: self.models.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// The four biomes around the ring, in cycle order.
pub const STOCK_BIOMES: [BiomeKind; 4] = [
    BiomeKind {
        name: "forest",
        position: Vec3::new(0.0, 0.0, -6.0),
        roughness: 0.06,
        models: &["tree-1", "tree-2", "tree-3", "tree-4", "rock-1", "rock-2", "rock-3"],
    },
    BiomeKind {
        name: "desert",
        position: Vec3::new(0.0, -6.0, 0.0),
        roughness: 0.12,
        models: &["rock-1", "rock-2", "rock-3"],
    },
    BiomeKind {
        name: "tundra",
        position: Vec3::new(0.0, 0.0, 6.0),
        roughness: 0.03,
        models: &["tree-3", "rock-2"],
    },
    BiomeKind {
        name: "barren",
        position: Vec3::new(0.0, 6.0, 0.0),
        roughness: 0.2,
        models: &[],
    },
];

/// Builds every mesh the stock biomes reference.
pub fn stock_registry(seed: u32) -> Result<ModelRegistry, RegistryError> {
    let mut registry = ModelRegistry::new();

    for (i, kind) in STOCK_BIOMES.iter().enumerate() {
        let terrain = kind.terrain();
        registry.insert(terrain.bottom, underside())?;
        registry.insert(terrain.top, top_surface(seed.wrapping_add(i as u32), kind.roughness))?;
    }

    for (i, (trunk, crown)) in [(0.4, 1.0), (0.5, 1.4), (0.3, 0.8), (0.6, 1.8)].into_iter().enumerate() {
        registry.insert(format!("tree-{}", i + 1), tree(trunk, crown))?;
    }
    for (i, radius) in [0.2, 0.35, 0.5].into_iter().enumerate() {
        registry.insert(format!("rock-{}", i + 1), Mesh::octahedron(radius))?;
    }

    Ok(registry)
}

/// Shallow bowl hanging below the footprint.
fn underside() -> Mesh {
    let half = TERRAIN_SIZE * 0.5;
    Mesh::grid(
        Vec2::splat(TERRAIN_SIZE),
        UVec2::splat(TERRAIN_RESOLUTION),
        |x, z| -0.4 * (1.0 - (x * x + z * z) / (2.0 * half * half)).max(0.0),
    )
}

/// Two octaves of simplex noise over the footprint.
fn top_surface(seed: u32, roughness: f32) -> Mesh {
    let noise = Simplex::new(seed);
    Mesh::grid(
        Vec2::splat(TERRAIN_SIZE),
        UVec2::splat(TERRAIN_RESOLUTION),
        |x, z| {
            let (x, z) = (f64::from(x), f64::from(z));
            let h = noise.get([x * 1.5, z * 1.5]) + 0.5 * noise.get([x * 3.0, z * 3.0]);
            roughness * (h as f32) / 1.5
        },
    )
}

/// Trunk plus a conical crown.
fn tree(trunk_height: f32, crown_height: f32) -> Mesh {
    Mesh::merged(&[
        (Mesh::cone(0.08, trunk_height, 5), Vec3::ZERO),
        (Mesh::cone(crown_height * 0.35, crown_height, 8), Vec3::Y * trunk_height * 0.75),
    ])
}
