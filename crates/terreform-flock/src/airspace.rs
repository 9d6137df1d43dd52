//! Axis-aligned airspace box and its soft containment field.

use glam::Vec3;
use rand::Rng;

/// Axis-aligned box. `min <= max` on every axis by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds3 {
    min: Vec3,
    max: Vec3,
}

impl Bounds3 {
    /// Builds the box spanned by two corners, in any order.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Lower corner.
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Upper corner.
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Edge lengths.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Centre point.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// The box grown by `margin` on every face.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Uniformly distributed point inside the box.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let t = Vec3::new(rng.random(), rng.random(), rng.random());
        self.min + self.size() * t
    }

    /// Inward acceleration for a point near or past the faces.
    ///
    /// Inside a zone `margin` deep along each face the push grows linearly from zero to
    /// `strength`; at the face and beyond it stays at `strength`. Axes are independent.
    pub fn containment(&self, p: Vec3, margin: f32, strength: f32) -> Vec3 {
        let inner_min = self.min + Vec3::splat(margin);
        let inner_max = self.max - Vec3::splat(margin);
        let push = |depth: f32| (depth / margin).clamp(0.0, 1.0) * strength;

        let mut accel = Vec3::ZERO;
        for axis in 0..3 {
            if p[axis] < inner_min[axis] {
                accel[axis] += push(inner_min[axis] - p[axis]);
            }
            if p[axis] > inner_max[axis] {
                accel[axis] -= push(p[axis] - inner_max[axis]);
            }
        }
        accel
    }
}
