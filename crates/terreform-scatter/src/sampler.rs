//! Poisson disk sampling (Bridson's algorithm) over a rectangular footprint.

use std::f32::consts::TAU;

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::{Bounds, ScatterError};

/// Generates points inside `bounds` with no two points closer than `min_distance`.
///
/// Dart throwing with an active list: each active point spawns up to `max_attempts`
/// candidates in the annulus `[min_distance, 2 * min_distance]` at a random angle. A
/// candidate is accepted if it lies inside `bounds` and clears every accepted point;
/// a point whose candidates all fail retires from the active list but stays in the
/// output. Neighbour checks go through a uniform grid with cell size `min_distance`.
///
/// The point count depends on the RNG. A zero-area `bounds` yields no points, and a
/// `min_distance` longer than the diagonal yields exactly one.
///
/// # Errors
///
/// Returns [`ScatterError::InvalidConfiguration`] if `min_distance` is not a positive
/// finite number or `max_attempts` is zero.
pub fn sample<R: Rng + ?Sized>(
    min_distance: f32,
    max_attempts: u32,
    bounds: &Bounds,
    rng: &mut R,
) -> Result<Vec<Vec2>, ScatterError> {
    if !(min_distance.is_finite() && min_distance > 0.0) {
        return Err(ScatterError::InvalidConfiguration(format!(
            "minimum distance must be positive, got {min_distance}"
        )));
    }
    if max_attempts == 0 {
        return Err(ScatterError::InvalidConfiguration(
            "max attempts must be at least 1".to_string(),
        ));
    }
    if bounds.is_empty() {
        debug!("poisson sampling skipped: zero-area bounds {bounds:?}");
        return Ok(Vec::new());
    }

    let (min, max) = (bounds.min(), bounds.max());
    let first = Vec2::new(rng.random_range(min.x..max.x), rng.random_range(min.y..max.y));

    let mut grid = SampleGrid::new(bounds, min_distance);
    let mut points = vec![first];
    let mut active = vec![0usize];
    grid.insert(first, 0);

    while !active.is_empty() {
        let slot = rng.random_range(0..active.len());
        let origin = points[active[slot]];

        let mut accepted = None;
        for _ in 0..max_attempts {
            let angle = rng.random_range(0.0..TAU);
            let radius = rng.random_range(min_distance..=2.0 * min_distance);
            let candidate = origin + Vec2::from_angle(angle) * radius;
            if bounds.contains(candidate) && !grid.is_crowded(candidate, &points) {
                accepted = Some(candidate);
                break;
            }
        }

        match accepted {
            Some(candidate) => {
                let index = points.len();
                points.push(candidate);
                grid.insert(candidate, index);
                active.push(index);
            }
            None => {
                active.swap_remove(slot);
            }
        }
    }

    debug!(
        "poisson sampling produced {} points (r={min_distance}, area={})",
        points.len(),
        bounds.area()
    );
    Ok(points)
}

/// Dense acceleration grid. A cell is `min_distance` wide, so any point closer than
/// `min_distance` to a candidate lives in the candidate's cell or one of its 8 neighbours.
struct SampleGrid {
    origin: Vec2,
    cell: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SampleGrid {
    fn new(bounds: &Bounds, cell: f32) -> Self {
        let cols = (bounds.width() / cell).floor() as usize + 1;
        let rows = (bounds.height() / cell).floor() as usize + 1;
        Self {
            origin: bounds.min(),
            cell,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    fn cell_of(&self, p: Vec2) -> (usize, usize) {
        let local = (p - self.origin) / self.cell;
        let col = (local.x.max(0.0) as usize).min(self.cols - 1);
        let row = (local.y.max(0.0) as usize).min(self.rows - 1);
        (col, row)
    }

    fn insert(&mut self, p: Vec2, index: usize) {
        let (col, row) = self.cell_of(p);
        self.cells[row * self.cols + col].push(index);
    }

    fn is_crowded(&self, candidate: Vec2, points: &[Vec2]) -> bool {
        let (col, row) = self.cell_of(candidate);
        let limit = self.cell * self.cell;
        for r in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(self.cols - 1) {
                let crowded = self.cells[r * self.cols + c]
                    .iter()
                    .any(|&i| points[i].distance_squared(candidate) < limit);
                if crowded {
                    return true;
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng(seed: u64) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(seed)
    }

    #[test]
    fn test_poisson_sampling_maintains_minimum_distance() {
        let min_distance = 0.2;
        let bounds = Bounds::new(Vec2::splat(-2.0), Vec2::splat(2.0));
        let points = sample(min_distance, 20, &bounds, &mut rng(123)).unwrap();

        for (i, a) in points.iter().enumerate() {
            for (j, b) in points.iter().enumerate().skip(i + 1) {
                let dist = a.distance(*b);
                assert!(
                    dist >= min_distance - 1e-6,
                    "Points {i} and {j} are too close: distance={dist}, min={min_distance}"
                );
            }
        }
    }

    #[test]
    fn test_poisson_points_within_bounds() {
        let bounds = Bounds::new(Vec2::new(10.0, 20.0), Vec2::new(50.0, 80.0));
        let points = sample(3.0, 30, &bounds, &mut rng(99)).unwrap();
        assert!(!points.is_empty());
        for p in &points {
            assert!(bounds.contains(*p), "Point {p} is outside bounds {bounds:?}");
        }
    }

    #[test]
    fn test_poisson_sampling_fills_region() {
        let bounds = Bounds::new(Vec2::ZERO, Vec2::splat(100.0));
        let min_distance = 5.0;
        let points = sample(min_distance, 30, &bounds, &mut rng(42)).unwrap();

        // Maximal disk packings of this size land well above 150 points.
        assert!(points.len() > 150, "expected dense coverage, got {}", points.len());

        // Disks of radius r/2 around each point are disjoint and stay within the
        // footprint grown by r/2 on every side.
        let grown = (100.0 + min_distance) * (100.0 + min_distance);
        let disk = std::f32::consts::PI * (min_distance / 2.0).powi(2);
        assert!(points.len() as f32 <= grown / disk);
    }

    #[test]
    fn test_zero_area_bounds_yield_no_points() {
        let line = Bounds::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0));
        assert!(sample(0.5, 20, &line, &mut rng(1)).unwrap().is_empty());

        let dot = Bounds::new(Vec2::ONE, Vec2::ONE);
        assert!(sample(0.5, 20, &dot, &mut rng(1)).unwrap().is_empty());
    }

    #[test]
    fn test_distance_beyond_diagonal_yields_one_point() {
        let bounds = Bounds::new(Vec2::ZERO, Vec2::new(1.0, 1.0));
        for seed in 0..16 {
            let points = sample(1.5, 30, &bounds, &mut rng(seed)).unwrap();
            assert_eq!(points.len(), 1, "seed {seed}");
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let bounds = Bounds::new(Vec2::ZERO, Vec2::ONE);
        for bad in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                sample(bad, 20, &bounds, &mut rng(0)),
                Err(ScatterError::InvalidConfiguration(_))
            ));
        }
        assert!(matches!(
            sample(0.1, 0, &bounds, &mut rng(0)),
            Err(ScatterError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_deterministic_placement_from_seed() {
        let bounds = Bounds::new(Vec2::ZERO, Vec2::splat(10.0));
        let a = sample(0.5, 20, &bounds, &mut rng(7)).unwrap();
        let b = sample(0.5, 20, &bounds, &mut rng(7)).unwrap();
        assert_eq!(a, b);

        let c = sample(0.5, 20, &bounds, &mut rng(8)).unwrap();
        assert_ne!(a, c, "different seeds should give different distributions");
    }
}
