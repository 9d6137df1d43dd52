//! Ring of puff clouds that slowly turns around the world origin.

use std::sync::Arc;

use glam::{Quat, Vec3};
use rand::Rng;
use terreform_scene::{Mesh, NodeId, SceneContainer, SceneObject, Transform};

use crate::AmbientSettings;

/// Clouds spread around a ring, each facing outward.
#[derive(Debug)]
pub struct CloudLayer {
    clouds: Vec<Transform>,
    mesh: Arc<Mesh>,
    spin: f32,
    spin_per_tick: f32,
    visuals: Vec<NodeId>,
}

impl CloudLayer {
    /// Scatters `settings.cloud_count` clouds on the ring.
    ///
    /// Each cloud picks `x` across the ring diameter and a random side for `z`, so it
    /// lands on the circle of radius `ring_radius` in the XZ plane.
    pub fn new<R: Rng + ?Sized>(settings: &AmbientSettings, rng: &mut R) -> Self {
        let r = settings.ring_radius;
        let clouds = (0..settings.cloud_count)
            .map(|_| {
                let x = rng.random_range(-r..=r);
                let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
                let z = side * (r * r - x * x).max(0.0).sqrt();
                let y = random_in(rng, settings.height_range);
                let size = random_in(rng, settings.size_range);
                Transform::from_translation(Vec3::new(x, y, z))
                    .with_rotation(Quat::from_rotation_y(x.atan2(z)))
                    .with_uniform_scale(size)
            })
            .collect();

        Self {
            clouds,
            mesh: Arc::new(puff()),
            spin: 0.0,
            spin_per_tick: settings.spin_per_tick,
            visuals: Vec::new(),
        }
    }

    /// Number of clouds.
    pub fn len(&self) -> usize {
        self.clouds.len()
    }

    /// Returns `true` if the layer has no clouds.
    pub fn is_empty(&self) -> bool {
        self.clouds.is_empty()
    }

    /// Accumulated ring rotation in radians.
    pub fn spin(&self) -> f32 {
        self.spin
    }

    /// Adds the clouds to `scene`. No-op if already attached.
    pub fn attach(&mut self, scene: &mut dyn SceneContainer) {
        if !self.visuals.is_empty() {
            return;
        }
        let visuals: Vec<NodeId> = (0..self.clouds.len())
            .map(|i| scene.add_child(SceneObject::new("cloud", Arc::clone(&self.mesh), self.world_transform(i))))
            .collect();
        self.visuals = visuals;
    }

    /// Removes the clouds from `scene`.
    pub fn detach(&mut self, scene: &mut dyn SceneContainer) {
        for id in self.visuals.drain(..) {
            scene.remove_child(id);
        }
    }

    /// Turns the ring one step and updates attached clouds.
    pub fn tick(&mut self, scene: &mut dyn SceneContainer) {
        self.spin += self.spin_per_tick;
        for (i, id) in self.visuals.iter().enumerate() {
            scene.set_transform(*id, self.world_transform(i));
        }
    }

    fn world_transform(&self, index: usize) -> Transform {
        let turn = Quat::from_rotation_y(self.spin);
        let local = self.clouds[index];
        Transform {
            translation: turn * local.translation,
            rotation: turn * local.rotation,
            scale: local.scale,
        }
    }
}

fn random_in<R: Rng + ?Sized>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Three overlapping blobs.
fn puff() -> Mesh {
    Mesh::merged(&[
        (Mesh::octahedron(0.5), Vec3::ZERO),
        (Mesh::octahedron(0.35), Vec3::new(0.45, -0.1, 0.0)),
        (Mesh::octahedron(0.35), Vec3::new(-0.45, -0.1, 0.0)),
    ])
}
