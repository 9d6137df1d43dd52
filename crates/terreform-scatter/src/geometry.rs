//! Geometry utilities: coordinate extraction, footprint bounds, and surface nodes.

use glam::{Vec2, Vec3};
use hashbrown::HashMap;
use terreform_scene::{Mesh, Transform};

use crate::{Bounds, ScatterError};

/// Vertex coordinates split into per-axis lists.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    /// X coordinates.
    pub xs: Vec<f32>,
    /// Y (up) coordinates.
    pub ys: Vec<f32>,
    /// Z coordinates.
    pub zs: Vec<f32>,
}

impl PointCloud {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns `true` if the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// The `i`-th point.
    pub fn point(&self, i: usize) -> Vec3 {
        Vec3::new(self.xs[i], self.ys[i], self.zs[i])
    }

    /// The `i`-th point projected onto the XZ footprint.
    pub fn footprint_point(&self, i: usize) -> Vec2 {
        Vec2::new(self.xs[i], self.zs[i])
    }

    /// Iterates over the points.
    pub fn iter(&self) -> impl Iterator<Item = Vec3> + '_ {
        (0..self.len()).map(|i| self.point(i))
    }

    /// Component-wise minimum and maximum, or `None` when empty.
    pub fn extent(&self) -> Option<(Vec3, Vec3)> {
        let mut iter = self.iter();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Returns a copy with every coordinate multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        self.iter().map(|p| p * factor).collect()
    }

    /// Largest XZ distance from the local origin, i.e. the radius a model sweeps
    /// when spun about its up axis. `None` when empty.
    pub fn footprint_radius(&self) -> Option<f32> {
        (!self.is_empty()).then(|| {
            (0..self.len())
                .map(|i| self.footprint_point(i).length())
                .fold(0.0, f32::max)
        })
    }
}

impl FromIterator<Vec3> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Vec3>>(iter: I) -> Self {
        let mut cloud = PointCloud::default();
        for p in iter {
            cloud.xs.push(p.x);
            cloud.ys.push(p.y);
            cloud.zs.push(p.z);
        }
        cloud
    }
}

/// A placement point on the terrain surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    /// Position in the terrain's local space.
    pub position: Vec3,
    /// Heading of the local downhill direction, radians about +Y (0 on flat ground).
    pub normal_yaw: f32,
}

/// Flattens a mesh's vertex buffer into a coordinate list. The mesh is not modified.
pub fn separate_coordinates(mesh: &Mesh) -> PointCloud {
    mesh.positions().iter().copied().collect()
}

/// XZ footprint of a point cloud.
///
/// # Errors
///
/// Returns [`ScatterError::EmptyGeometry`] for an empty cloud.
pub fn get_bounds(cloud: &PointCloud) -> Result<Bounds, ScatterError> {
    Bounds::from_points((0..cloud.len()).map(|i| cloud.footprint_point(i)))
        .ok_or(ScatterError::EmptyGeometry("terrain footprint"))
}

/// Terrain footprint shrunk by the model's footprint radius on every side, so a model
/// centred anywhere inside the result never overhangs the terrain edge.
///
/// # Errors
///
/// - [`ScatterError::DegenerateBounds`] if the model is wider than the terrain.
/// - [`ScatterError::EmptyGeometry`] if either cloud is empty.
pub fn get_poisson_bounds(terrain: &PointCloud, model: &PointCloud) -> Result<Bounds, ScatterError> {
    let terrain_bounds = get_bounds(terrain)?;
    let footprint_radius = model
        .footprint_radius()
        .ok_or(ScatterError::EmptyGeometry("model footprint"))?;

    terrain_bounds
        .shrink(footprint_radius)
        .ok_or(ScatterError::DegenerateBounds {
            terrain: terrain_bounds,
            footprint_radius,
        })
}

/// Lifts footprint samples onto the top surface.
///
/// Each sample takes the height of the nearest top-surface vertex (XZ distance) and a
/// heading from a plane fitted through that vertex's neighbourhood.
///
/// # Errors
///
/// Returns [`ScatterError::EmptyGeometry`] if `top_surface` is empty.
pub fn get_nodes(samples: &[Vec2], top_surface: &PointCloud) -> Result<Vec<Node>, ScatterError> {
    if top_surface.is_empty() {
        return Err(ScatterError::EmptyGeometry("top surface"));
    }
    let index = SurfaceIndex::new(top_surface);

    Ok(samples
        .iter()
        .map(|&sample| {
            let nearest = index.nearest(sample);
            let height = top_surface.ys[nearest];
            Node {
                position: Vec3::new(sample.x, height, sample.y),
                normal_yaw: index.slope_yaw(nearest),
            }
        })
        .collect())
}

/// Local scale for a placed model inside a group scaled by `biome_scale`, so the model
/// ends up `jitter` times its native size in world space.
pub fn get_scale(biome_scale: f32, jitter: f32) -> f32 {
    jitter / biome_scale
}

/// World position of a node inside a biome group with transform `biome`.
pub fn get_position(node: &Node, biome: &Transform) -> Vec3 {
    biome.transform_point(node.position)
}

/// Uniform grid over the XZ footprint of a point cloud, roughly one vertex per cell.
struct SurfaceIndex<'a> {
    cloud: &'a PointCloud,
    origin: Vec2,
    cell: f32,
    cols: i64,
    rows: i64,
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl<'a> SurfaceIndex<'a> {
    fn new(cloud: &'a PointCloud) -> Self {
        let points = (0..cloud.len()).map(|i| cloud.footprint_point(i));
        let bounds = Bounds::from_points(points).unwrap_or(Bounds::new(Vec2::ZERO, Vec2::ZERO));
        let span = bounds.width().max(bounds.height());
        let cell = if span > 0.0 {
            span / (cloud.len() as f32).sqrt().max(1.0)
        } else {
            1.0
        };
        let cols = (bounds.width() / cell).floor() as i64 + 1;
        let rows = (bounds.height() / cell).floor() as i64 + 1;

        let mut index = Self {
            cloud,
            origin: bounds.min(),
            cell,
            cols,
            rows,
            cells: HashMap::new(),
        };
        for i in 0..cloud.len() {
            let key = index.cell_of(cloud.footprint_point(i));
            index.cells.entry(key).or_default().push(i);
        }
        index
    }

    fn cell_of(&self, p: Vec2) -> (i64, i64) {
        let local = (p - self.origin) / self.cell;
        (
            (local.x.floor() as i64).clamp(0, self.cols - 1),
            (local.y.floor() as i64).clamp(0, self.rows - 1),
        )
    }

    /// Index of the vertex nearest to `p`. Searches square rings of cells outward from
    /// `p`'s cell and stops once no unvisited ring can hold anything closer.
    fn nearest(&self, p: Vec2) -> usize {
        let (cx, cy) = self.cell_of(p);
        let max_ring = self.cols.max(self.rows);
        let mut best: Option<(usize, f32)> = None;

        for ring in 0..=max_ring {
            for (x, y) in ring_cells(cx, cy, ring) {
                let Some(indices) = self.cells.get(&(x, y)) else {
                    continue;
                };
                for &i in indices {
                    let d = self.cloud.footprint_point(i).distance_squared(p);
                    if best.is_none_or(|(_, bd)| d < bd) {
                        best = Some((i, d));
                    }
                }
            }
            // Cells in ring + 1 are at least `ring * cell` away.
            if let Some((_, d)) = best {
                let reach = ring as f32 * self.cell;
                if d <= reach * reach {
                    break;
                }
            }
        }

        best.map_or(0, |(i, _)| i)
    }

    /// Heading of the downhill direction of a plane fitted through the vertices
    /// around `center`. Flat or degenerate neighbourhoods give 0.
    fn slope_yaw(&self, center: usize) -> f32 {
        let c = self.cloud.point(center);
        let (cx, cy) = self.cell_of(Vec2::new(c.x, c.z));
        let radius = self.cell * 1.5;

        let (mut sxx, mut sxz, mut szz, mut sxy, mut szy) = (0.0f32, 0.0f32, 0.0f32, 0.0f32, 0.0f32);
        for ring in 0..=2 {
            for key in ring_cells(cx, cy, ring) {
                for &i in self.cells.get(&key).into_iter().flatten() {
                    let d = self.cloud.point(i) - c;
                    if d.x * d.x + d.z * d.z > radius * radius {
                        continue;
                    }
                    sxx += d.x * d.x;
                    sxz += d.x * d.z;
                    szz += d.z * d.z;
                    sxy += d.x * d.y;
                    szy += d.z * d.y;
                }
            }
        }

        // Least squares fit of dy = a * dx + b * dz.
        let det = sxx * szz - sxz * sxz;
        if det.abs() <= f32::EPSILON * (sxx * szz).max(f32::MIN_POSITIVE) {
            return 0.0;
        }
        let a = (sxy * szz - sxz * szy) / det;
        let b = (sxx * szy - sxz * sxy) / det;
        let normal = Vec3::new(-a, 1.0, -b).normalize();
        if normal.x.hypot(normal.z) < 1e-4 {
            0.0
        } else {
            normal.x.atan2(normal.z)
        }
    }
}

/// Cells on the square ring at Chebyshev distance `ring` around `(cx, cy)`.
fn ring_cells(cx: i64, cy: i64, ring: i64) -> impl Iterator<Item = (i64, i64)> {
    (-ring..=ring).flat_map(move |dy| {
        (-ring..=ring)
            .filter(move |dx| ring == 0 || dy.abs() == ring || dx.abs() == ring)
            .map(move |dx| (cx + dx, cy + dy))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::UVec2;
    use std::f32::consts::FRAC_PI_2;

    fn plate(size: f32, height: impl Fn(f32, f32) -> f32) -> PointCloud {
        separate_coordinates(&Mesh::grid(Vec2::splat(size), UVec2::splat(10), height))
    }

    #[test]
    fn test_separate_coordinates_preserves_order() {
        let mesh = Mesh::from_positions(vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.5, 4.0)]);
        let cloud = separate_coordinates(&mesh);
        assert_eq!(cloud.xs, vec![1.0, -1.0]);
        assert_eq!(cloud.ys, vec![2.0, 0.5]);
        assert_eq!(cloud.zs, vec![3.0, 4.0]);
        assert_eq!(mesh.vertex_count(), 2);
    }

    #[test]
    fn test_get_bounds_uses_xz_footprint() {
        let cloud: PointCloud = [Vec3::new(-1.0, 100.0, 2.0), Vec3::new(3.0, -50.0, -4.0)]
            .into_iter()
            .collect();
        let bounds = get_bounds(&cloud).unwrap();
        assert_eq!(bounds, Bounds::new(Vec2::new(-1.0, -4.0), Vec2::new(3.0, 2.0)));
        assert!(matches!(
            get_bounds(&PointCloud::default()),
            Err(ScatterError::EmptyGeometry(_))
        ));
    }

    #[test]
    fn test_poisson_bounds_shrinks_by_footprint_radius() {
        let terrain = plate(4.0, |_, _| 0.0);
        let model: PointCloud = [Vec3::new(0.3, 0.0, 0.0), Vec3::new(0.0, 1.0, -0.4)]
            .into_iter()
            .collect();

        let terrain_bounds = get_bounds(&terrain).unwrap();
        let bounds = get_poisson_bounds(&terrain, &model).unwrap();

        assert!(terrain_bounds.contains_bounds(&bounds));
        assert!((bounds.min() - (terrain_bounds.min() + Vec2::splat(0.4))).length() < 1e-5);
        assert!((bounds.max() - (terrain_bounds.max() - Vec2::splat(0.4))).length() < 1e-5);
    }

    #[test]
    fn test_poisson_bounds_degenerate_when_model_too_wide() {
        let terrain = plate(1.0, |_, _| 0.0);
        let model: PointCloud = [Vec3::new(2.0, 0.0, 0.0)].into_iter().collect();
        match get_poisson_bounds(&terrain, &model) {
            Err(ScatterError::DegenerateBounds { footprint_radius, .. }) => {
                assert!((footprint_radius - 2.0).abs() < 1e-6)
            }
            other => panic!("expected DegenerateBounds, got {other:?}"),
        }
    }

    #[test]
    fn test_nodes_take_height_of_nearest_vertex() {
        let top: PointCloud = [
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 2.0, 0.0),
            Vec3::new(0.0, 3.0, 1.0),
            Vec3::new(1.0, 4.0, 1.0),
        ]
        .into_iter()
        .collect();
        let samples = [Vec2::new(0.1, 0.1), Vec2::new(0.9, 0.05), Vec2::new(0.95, 0.9), Vec2::new(5.0, -3.0)];
        let nodes = get_nodes(&samples, &top).unwrap();

        let heights: Vec<f32> = nodes.iter().map(|n| n.position.y).collect();
        assert_eq!(heights, vec![1.0, 2.0, 4.0, 2.0]);
        assert_eq!(nodes[0].position.x, 0.1);
        assert_eq!(nodes[0].position.z, 0.1);
    }

    #[test]
    fn test_nearest_matches_brute_force() {
        let top = plate(6.0, |x, z| (x * 1.3).sin() + z.cos());
        let index = SurfaceIndex::new(&top);
        for i in 0..50 {
            let p = Vec2::new((i as f32 * 0.37).sin() * 4.0, (i as f32 * 0.91).cos() * 4.0);
            let brute = (0..top.len())
                .map(|j| top.footprint_point(j).distance_squared(p))
                .fold(f32::INFINITY, f32::min);
            let got = top.footprint_point(index.nearest(p)).distance_squared(p);
            assert!((got - brute).abs() < 1e-5, "sample {p}: {got} vs {brute}");
        }
    }

    #[test]
    fn test_flat_surface_has_zero_yaw() {
        let top = plate(2.0, |_, _| 0.5);
        let nodes = get_nodes(&[Vec2::ZERO, Vec2::new(0.4, -0.3)], &top).unwrap();
        assert!(nodes.iter().all(|n| n.normal_yaw == 0.0));
        assert!(nodes.iter().all(|n| n.position.y == 0.5));
    }

    #[test]
    fn test_slope_yaw_points_downhill() {
        // Height falls along +X, so the surface normal leans toward +X.
        let top = plate(2.0, |x, _| -x);
        let nodes = get_nodes(&[Vec2::ZERO], &top).unwrap();
        assert!((nodes[0].normal_yaw - FRAC_PI_2).abs() < 1e-3, "yaw {}", nodes[0].normal_yaw);
    }

    #[test]
    fn test_empty_top_surface_is_an_error() {
        assert!(matches!(
            get_nodes(&[Vec2::ZERO], &PointCloud::default()),
            Err(ScatterError::EmptyGeometry(_))
        ));
    }

    #[test]
    fn test_scale_and_position_helpers() {
        assert!((get_scale(5.0, 1.0) - 0.2).abs() < 1e-6);
        let node = Node {
            position: Vec3::new(1.0, 0.5, -1.0),
            normal_yaw: 0.0,
        };
        let biome = Transform::from_translation(Vec3::new(0.0, 0.0, -6.0)).with_uniform_scale(5.0);
        assert_eq!(get_position(&node, &biome), Vec3::new(5.0, 2.5, -11.0));
    }
}
