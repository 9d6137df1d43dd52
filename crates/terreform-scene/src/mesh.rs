//! Immutable triangle meshes and a handful of procedural primitives.
//!
//! Decoded assets arrive from the host already in this form; the primitives exist so
//! the headless driver and the tests can fabricate stand-in models.

use glam::{UVec2, Vec2, Vec3};

/// Indexed triangle mesh. Only vertex positions matter to the placement pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    positions: Vec<Vec3>,
    indices: Vec<u32>,
}

impl Mesh {
    /// Builds a mesh from raw buffers.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    /// A point-only mesh (no triangles).
    pub fn from_positions(positions: Vec<Vec3>) -> Self {
        Self {
            positions,
            indices: Vec::new(),
        }
    }

    /// Vertex positions in model space.
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Triangle index buffer.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` if the mesh has no vertices.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Regular grid centred on the origin in the XZ plane, displaced along Y by `height`.
    ///
    /// `resolution` is the number of quads along X and Z; each axis gets
    /// `resolution + 1` vertices.
    pub fn grid(size: Vec2, resolution: UVec2, height: impl Fn(f32, f32) -> f32) -> Self {
        let cols = resolution.x.max(1);
        let rows = resolution.y.max(1);
        let mut positions = Vec::with_capacity(((cols + 1) * (rows + 1)) as usize);

        for row in 0..=rows {
            for col in 0..=cols {
                let x = (col as f32 / cols as f32 - 0.5) * size.x;
                let z = (row as f32 / rows as f32 - 0.5) * size.y;
                positions.push(Vec3::new(x, height(x, z), z));
            }
        }

        let mut indices = Vec::with_capacity((cols * rows * 6) as usize);
        let stride = cols + 1;
        for row in 0..rows {
            for col in 0..cols {
                let i = row * stride + col;
                indices.extend_from_slice(&[i, i + stride, i + 1, i + 1, i + stride, i + stride + 1]);
            }
        }

        Self { positions, indices }
    }

    /// Upright cone with its base centred on the origin.
    pub fn cone(radius: f32, height: f32, segments: u32) -> Self {
        let segments = segments.max(3);
        let mut positions = vec![Vec3::new(0.0, height, 0.0)];
        for s in 0..segments {
            let a = s as f32 / segments as f32 * std::f32::consts::TAU;
            positions.push(Vec3::new(a.cos() * radius, 0.0, a.sin() * radius));
        }
        let mut indices = Vec::with_capacity(segments as usize * 3);
        for s in 0..segments {
            let a = 1 + s;
            let b = 1 + (s + 1) % segments;
            indices.extend_from_slice(&[0, b, a]);
        }
        Self { positions, indices }
    }

    /// Octahedron of the given circumradius, centred on the origin.
    pub fn octahedron(radius: f32) -> Self {
        let positions = vec![
            Vec3::X * radius,
            -Vec3::X * radius,
            Vec3::Y * radius,
            -Vec3::Y * radius,
            Vec3::Z * radius,
            -Vec3::Z * radius,
        ];
        let indices = vec![
            0, 2, 4, 4, 2, 1, 1, 2, 5, 5, 2, 0, 4, 3, 0, 1, 3, 4, 5, 3, 1, 0, 3, 5,
        ];
        Self { positions, indices }
    }

    /// Small dart shape pointing down +Z, used for boid visuals.
    pub fn dart(length: f32) -> Self {
        let half = length * 0.5;
        let wing = length * 0.35;
        let positions = vec![
            Vec3::new(0.0, 0.0, half),
            Vec3::new(-wing, 0.0, -half),
            Vec3::new(wing, 0.0, -half),
            Vec3::new(0.0, wing * 0.5, -half),
        ];
        let indices = vec![0, 1, 3, 0, 3, 2, 0, 2, 1, 1, 2, 3];
        Self { positions, indices }
    }

    /// Concatenates `parts`, translating each by its offset.
    pub fn merged(parts: &[(Mesh, Vec3)]) -> Self {
        let mut positions = Vec::new();
        let mut indices = Vec::new();
        for (mesh, offset) in parts {
            let base = positions.len() as u32;
            positions.extend(mesh.positions.iter().map(|p| *p + *offset));
            indices.extend(mesh.indices.iter().map(|i| base + i));
        }
        Self { positions, indices }
    }
}
