//! Flock state, the per-tick update, and visual lifecycle.

use std::sync::Arc;

use glam::{Quat, Vec3};
use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terreform_scene::{Mesh, NodeId, SceneContainer, SceneObject, Transform};

use crate::{Bounds3, FlockError, FlockParams};

/// One simulated agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Boid {
    /// Position in world units.
    pub position: Vec3,
    /// Displacement per tick.
    pub velocity: Vec3,
    /// Acceleration applied on the last tick.
    pub acceleration: Vec3,
}

/// Raw (unweighted) rule outputs for one boid.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Steering {
    /// Away from crowding neighbours, each weighted by `1 / distance`.
    pub separation: Vec3,
    /// Mean neighbour velocity minus own velocity.
    pub alignment: Vec3,
    /// Neighbour centre of mass minus own position.
    pub cohesion: Vec3,
}

impl Steering {
    /// Weighted sum of the three rules.
    pub fn weighted(&self, params: &FlockParams) -> Vec3 {
        self.separation * params.separation_weight
            + self.alignment * params.alignment_weight
            + self.cohesion * params.cohesion_weight
    }
}

/// A fixed-size group of boids sharing an airspace.
#[derive(Debug)]
pub struct Flock {
    boids: Vec<Boid>,
    bounds: Bounds3,
    params: FlockParams,
    mesh: Arc<Mesh>,
    visuals: Vec<NodeId>,
}

impl Flock {
    /// Spawns `count` boids at random positions with zero velocity, default tuning,
    /// and a speed cap of `max_speed`.
    pub fn new(count: usize, bounds: Bounds3, max_speed: f32) -> Result<Self, FlockError> {
        let mut rng = ChaCha8Rng::seed_from_u64(rand::random());
        Self::with_params(count, bounds, FlockParams::with_max_speed(max_speed), &mut rng)
    }

    /// Spawns `count` boids using explicit tuning and RNG.
    ///
    /// # Errors
    ///
    /// Returns [`FlockError::InvalidConfiguration`] for a zero count or parameters that
    /// fail [`FlockParams::validate`].
    pub fn with_params<R: Rng + ?Sized>(
        count: usize,
        bounds: Bounds3,
        params: FlockParams,
        rng: &mut R,
    ) -> Result<Self, FlockError> {
        if count == 0 {
            return Err(FlockError::InvalidConfiguration(
                "a flock needs at least one boid".to_string(),
            ));
        }
        params.validate(&bounds)?;

        let boids = (0..count)
            .map(|_| Boid {
                position: bounds.random_point(rng),
                velocity: Vec3::ZERO,
                acceleration: Vec3::ZERO,
            })
            .collect();
        debug!("spawned flock of {count} in {:?}..{:?}", bounds.min(), bounds.max());

        Ok(Self {
            boids,
            bounds,
            params,
            mesh: Arc::new(Mesh::dart(0.6)),
            visuals: Vec::new(),
        })
    }

    /// The boids, in spawn order.
    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    /// Number of boids.
    pub fn len(&self) -> usize {
        self.boids.len()
    }

    /// Always `false`; flocks are never empty.
    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    /// The airspace.
    pub fn bounds(&self) -> &Bounds3 {
        &self.bounds
    }

    /// The tuning.
    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    /// Returns `true` while visuals are in a scene.
    pub fn is_attached(&self) -> bool {
        !self.visuals.is_empty()
    }

    /// Rule outputs for boid `index` against the current state.
    pub fn steering(&self, index: usize) -> Steering {
        steering(index, &self.boids, &self.params)
    }

    /// Advances the simulation one step.
    ///
    /// Flocking steer is clamped to `max_force`, the wall push is added on top, velocity
    /// is clamped to `max_speed`, then position integrates.
    pub fn tick(&mut self) {
        let previous = self.boids.clone();
        let params = &self.params;

        for (i, boid) in self.boids.iter_mut().enumerate() {
            let flocking = steering(i, &previous, params)
                .weighted(params)
                .clamp_length_max(params.max_force);
            let flocking = if flocking.is_finite() { flocking } else { Vec3::ZERO };
            let wall = self.bounds.containment(
                previous[i].position,
                params.boundary_margin,
                params.boundary_force,
            );

            boid.acceleration = flocking + wall;
            boid.velocity = (boid.velocity + boid.acceleration).clamp_length_max(params.max_speed);
            boid.position += boid.velocity;
        }
    }

    /// Adds one visual per boid to `scene`. No-op if already attached.
    pub fn attach(&mut self, scene: &mut dyn SceneContainer) {
        if self.is_attached() {
            return;
        }
        let visuals: Vec<NodeId> = self
            .boids
            .iter()
            .map(|b| scene.add_child(SceneObject::new("boid", Arc::clone(&self.mesh), boid_transform(b))))
            .collect();
        self.visuals = visuals;
    }

    /// Removes this flock's visuals from `scene`. Simulation state is kept.
    pub fn detach(&mut self, scene: &mut dyn SceneContainer) {
        for id in self.visuals.drain(..) {
            scene.remove_child(id);
        }
    }

    /// Pushes current boid transforms to the attached visuals.
    pub fn sync_visuals(&self, scene: &mut dyn SceneContainer) {
        for (id, boid) in self.visuals.iter().zip(&self.boids) {
            scene.set_transform(*id, boid_transform(boid));
        }
    }
}

fn steering(index: usize, boids: &[Boid], params: &FlockParams) -> Steering {
    let me = boids[index];
    let mut separation = Vec3::ZERO;
    let mut heading_sum = Vec3::ZERO;
    let mut center_sum = Vec3::ZERO;
    let mut neighbours = 0usize;

    for (j, other) in boids.iter().enumerate() {
        if j == index {
            continue;
        }
        neighbours += 1;
        heading_sum += other.velocity;
        center_sum += other.position;

        let offset = me.position - other.position;
        let distance = offset.length();
        // Coincident boids have no defined "away"; skip them.
        if distance > 0.0 && distance < params.separation_distance {
            separation += offset / (distance * distance);
        }
    }

    if neighbours == 0 {
        return Steering::default();
    }
    let n = neighbours as f32;
    Steering {
        separation,
        alignment: heading_sum / n - me.velocity,
        cohesion: center_sum / n - me.position,
    }
}

/// Visual faces along the velocity; a stationary boid keeps the identity rotation.
fn boid_transform(boid: &Boid) -> Transform {
    let rotation = boid
        .velocity
        .try_normalize()
        .map_or(Quat::IDENTITY, |dir| Quat::from_rotation_arc(Vec3::Z, dir));
    Transform::from_translation(boid.position).with_rotation(rotation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CONTAINMENT_SLACK;
    use terreform_scene::SceneTree;

    fn airspace() -> Bounds3 {
        Bounds3::new(Vec3::new(-15.0, -10.0, -15.0), Vec3::new(25.0, 10.0, 25.0))
    }

    fn flock(count: usize, seed: u64) -> Flock {
        Flock::with_params(
            count,
            airspace(),
            FlockParams::default(),
            &mut ChaCha8Rng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_spawn_inside_bounds_at_rest() {
        let f = flock(10, 1);
        assert_eq!(f.len(), 10);
        for b in f.boids() {
            assert!(f.bounds().contains(b.position));
            assert_eq!(b.velocity, Vec3::ZERO);
        }
    }

    #[test]
    fn test_invalid_configuration_rejected() {
        assert!(matches!(
            Flock::new(0, airspace(), 0.1),
            Err(FlockError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Flock::new(10, airspace(), 0.0),
            Err(FlockError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Flock::new(10, airspace(), 50.0),
            Err(FlockError::InvalidConfiguration(_))
        ));
        let sliver = Bounds3::new(Vec3::ZERO, Vec3::new(10.0, 1.0, 10.0));
        assert!(matches!(
            Flock::new(10, sliver, 0.1),
            Err(FlockError::InvalidConfiguration(_))
        ));

        let weak_walls = FlockParams {
            boundary_force: 0.001,
            ..FlockParams::default()
        };
        assert!(matches!(
            Flock::with_params(10, airspace(), weak_walls, &mut ChaCha8Rng::seed_from_u64(0)),
            Err(FlockError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_default_flock_constructs() {
        let f = Flock::new(10, airspace(), 0.1).unwrap();
        assert_eq!(f.len(), 10);
        assert!(!f.is_attached());
    }

    #[test]
    fn test_single_boid_has_no_rule_contribution() {
        let mut f = flock(1, 4);
        f.boids[0].position = airspace().center();
        for _ in 0..100 {
            assert_eq!(f.steering(0), Steering::default());
            f.tick();
            assert_eq!(f.boids()[0].acceleration, Vec3::ZERO);
        }
        assert_eq!(f.boids()[0].position, airspace().center());
    }

    #[test]
    fn test_single_boid_near_wall_only_feels_containment() {
        let mut f = flock(1, 4);
        f.boids[0].position = Vec3::new(24.5, 0.0, 5.0);
        f.tick();
        let a = f.boids()[0].acceleration;
        assert!(a.x < 0.0);
        assert_eq!(a.y, 0.0);
        assert_eq!(a.z, 0.0);
    }

    #[test]
    fn test_separation_pushes_apart() {
        let mut f = flock(2, 5);
        f.boids[0].position = Vec3::new(0.0, 0.0, 0.0);
        f.boids[1].position = Vec3::new(0.5, 0.0, 0.0);
        let s = f.steering(0);
        assert!(s.separation.x < 0.0);
        assert!((s.separation.x + 2.0).abs() < 1e-5, "1/d weighting: {}", s.separation.x);
        assert_eq!(s.cohesion, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_coincident_boids_stay_finite() {
        let mut f = flock(3, 6);
        for b in &mut f.boids {
            b.position = Vec3::new(1.0, 2.0, 3.0);
        }
        for _ in 0..50 {
            f.tick();
        }
        assert!(f.boids().iter().all(|b| b.position.is_finite() && b.velocity.is_finite()));
    }

    #[test]
    fn test_update_is_order_independent() {
        let mut forward = flock(10, 7);
        let mut reversed = flock(10, 7);
        reversed.boids.reverse();

        for _ in 0..25 {
            forward.tick();
            reversed.tick();
        }

        for (a, b) in forward.boids().iter().zip(reversed.boids().iter().rev()) {
            assert!((a.position - b.position).length() < 1e-4);
        }
    }

    #[test]
    fn test_speed_never_exceeds_cap() {
        let mut f = flock(10, 8);
        for _ in 0..500 {
            f.tick();
            for b in f.boids() {
                assert!(b.velocity.length() <= f.params().max_speed + 1e-6);
            }
        }
    }

    #[test]
    fn test_boids_stay_within_expanded_bounds() {
        let outer = airspace().expanded(CONTAINMENT_SLACK);
        for seed in 0..4 {
            let mut f = flock(10, seed);
            for tick in 0..5000 {
                f.tick();
                for b in f.boids() {
                    assert!(outer.contains(b.position), "seed {seed} tick {tick}: escaped to {}", b.position);
                }
            }
        }
    }

    #[test]
    fn test_boid_at_full_speed_toward_wall_turns_back() {
        let mut f = flock(1, 9);
        f.boids[0].position = Vec3::new(24.99, 0.0, 0.0);
        f.boids[0].velocity = Vec3::new(0.1, 0.0, 0.0);
        let mut furthest = f32::MIN;
        for _ in 0..200 {
            f.tick();
            furthest = furthest.max(f.boids()[0].position.x);
        }
        assert!(furthest <= 25.0 + CONTAINMENT_SLACK);
        assert!(f.boids()[0].velocity.x < 0.0, "boid should be heading back inside");
    }

    #[test]
    fn test_attach_detach_manage_only_visuals() {
        let mut scene = SceneTree::new();
        let mut f = flock(10, 10);

        f.attach(&mut scene);
        f.attach(&mut scene);
        assert_eq!(scene.count_named("boid"), 10);
        assert!(f.is_attached());

        for _ in 0..10 {
            f.tick();
        }
        f.sync_visuals(&mut scene);
        let tracked: Vec<Vec3> = f.boids().iter().map(|b| b.position).collect();
        let mut shown: Vec<Vec3> = scene.iter().map(|(_, n)| n.transform.translation).collect();
        shown.sort_by(|a, b| a.x.total_cmp(&b.x));
        let mut expected = tracked.clone();
        expected.sort_by(|a, b| a.x.total_cmp(&b.x));
        assert_eq!(shown, expected);

        f.detach(&mut scene);
        assert!(scene.is_empty());
        assert!(!f.is_attached());
        assert_eq!(f.boids().iter().map(|b| b.position).collect::<Vec<_>>(), tracked);
    }
}
