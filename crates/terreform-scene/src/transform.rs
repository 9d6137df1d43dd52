//! Translation / rotation / scale triple used by every scene object.

use glam::{Quat, Vec3};

/// Local transform of a scene object relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Offset from the parent origin.
    pub translation: Vec3,
    /// Orientation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale factor.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Identity rotation and scale, placed at `translation`.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Returns a copy with a uniform scale.
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Returns a copy with the given rotation.
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Maps a point from local space into parent space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_point_applies_scale_rotation_translation() {
        let t = Transform::from_translation(Vec3::new(1.0, 0.0, 0.0))
            .with_uniform_scale(2.0)
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2));
        let p = t.transform_point(Vec3::X);
        // X scaled to 2, rotated a quarter turn about Y lands on -Z.
        assert!((p - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5, "got {p}");
    }

    #[test]
    fn test_identity_leaves_points_alone() {
        let p = Vec3::new(0.3, -0.2, 1.1);
        assert_eq!(Transform::default().transform_point(p), p);
    }
}
