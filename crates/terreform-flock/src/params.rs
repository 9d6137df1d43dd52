//! Flocking rule weights and limits.

use crate::{Bounds3, FlockError};

/// How far past any airspace face a boid may ever travel.
pub const CONTAINMENT_SLACK: f32 = 2.0;

/// Tuning for a flock. Units are world units and ticks.
#[derive(Clone, Debug, PartialEq)]
pub struct FlockParams {
    /// Speed cap per tick.
    pub max_speed: f32,
    /// Cap on the combined separation/alignment/cohesion steering per tick.
    pub max_force: f32,
    /// Neighbours closer than this push each other apart.
    pub separation_distance: f32,
    /// Weight of the separation rule.
    pub separation_weight: f32,
    /// Weight of the alignment rule.
    pub alignment_weight: f32,
    /// Weight of the cohesion rule.
    pub cohesion_weight: f32,
    /// Depth of the soft zone inside each airspace face.
    pub boundary_margin: f32,
    /// Peak inward acceleration from the walls. Must exceed `max_force`.
    pub boundary_force: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            max_speed: 0.1,
            max_force: 0.004,
            separation_distance: 1.5,
            separation_weight: 1.5,
            alignment_weight: 1.0,
            cohesion_weight: 1.0,
            boundary_margin: 2.0,
            boundary_force: 0.02,
        }
    }
}

impl FlockParams {
    /// Default tuning with a different speed cap.
    pub fn with_max_speed(max_speed: f32) -> Self {
        Self {
            max_speed,
            ..Self::default()
        }
    }

    /// Checks the parameters against an airspace.
    ///
    /// Beyond a face the walls must out-pull any flocking steer, otherwise a boid could
    /// drift out for good.
    pub fn validate(&self, bounds: &Bounds3) -> Result<(), FlockError> {
        let positive = |name: &str, v: f32| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(FlockError::InvalidConfiguration(format!(
                    "{name} must be positive, got {v}"
                )))
            }
        };
        positive("max speed", self.max_speed)?;
        positive("max force", self.max_force)?;
        positive("separation distance", self.separation_distance)?;
        positive("boundary margin", self.boundary_margin)?;
        positive("boundary force", self.boundary_force)?;

        for (name, w) in [
            ("separation weight", self.separation_weight),
            ("alignment weight", self.alignment_weight),
            ("cohesion weight", self.cohesion_weight),
        ] {
            if !(w.is_finite() && w >= 0.0) {
                return Err(FlockError::InvalidConfiguration(format!(
                    "{name} must be non-negative, got {w}"
                )));
            }
        }

        if self.boundary_force <= self.max_force {
            return Err(FlockError::InvalidConfiguration(format!(
                "boundary force {} must exceed max force {}",
                self.boundary_force, self.max_force
            )));
        }

        // Worst case overshoot: a boid crossing a face at full speed loses at least
        // `boundary_force - max_force` of outward speed per tick.
        let net = self.boundary_force - self.max_force;
        let overshoot = self.max_speed * (1.0 + (self.max_speed / net).ceil());
        if overshoot > CONTAINMENT_SLACK {
            return Err(FlockError::InvalidConfiguration(format!(
                "max speed {} can carry boids {overshoot} past the airspace, limit is {CONTAINMENT_SLACK}",
                self.max_speed
            )));
        }

        if bounds.size().min_element() < 2.0 * self.boundary_margin {
            return Err(FlockError::InvalidConfiguration(format!(
                "airspace {:?} is thinner than twice the boundary margin {}",
                bounds.size(),
                self.boundary_margin
            )));
        }
        Ok(())
    }
}
