//! Small procedural registry shared by the unit tests.

use glam::{UVec2, Vec2};
use terreform_scatter::TerrainSpec;
use terreform_scene::{Mesh, ModelRegistry};

pub(crate) fn registry() -> ModelRegistry {
    let mut registry = ModelRegistry::new();
    registry
        .insert("bottom", Mesh::grid(Vec2::splat(2.0), UVec2::splat(8), |_, _| 0.0))
        .unwrap();
    registry
        .insert("top", Mesh::grid(Vec2::splat(2.0), UVec2::splat(8), |x, z| 0.1 + 0.05 * x * z))
        .unwrap();
    registry.insert("tree", Mesh::cone(0.05, 0.2, 6)).unwrap();
    registry.insert("rock", Mesh::octahedron(0.04)).unwrap();
    registry
}

pub(crate) fn terrain() -> TerrainSpec {
    TerrainSpec {
        bottom: "bottom".to_string(),
        top: "top".to_string(),
        models: vec!["tree".to_string(), "rock".to_string()],
    }
}
