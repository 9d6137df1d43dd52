//! Tuning for biomes, their ambient effects and transitions.

use std::f32::consts::FRAC_PI_2;
use std::time::Duration;

use glam::Vec3;
use terreform_flock::{Bounds3, FlockError, FlockParams};
use terreform_scatter::ScatterSettings;

use crate::BiomeError;

/// Flocks spawned when a biome activates.
#[derive(Clone, Debug, PartialEq)]
pub struct FlockSettings {
    /// Number of flocks per active biome. Zero disables flocking.
    pub flocks_per_biome: usize,
    /// Boids in each flock.
    pub boids_per_flock: usize,
    /// World-space airspace shared by the flocks.
    pub airspace: Bounds3,
    /// Rule weights and limits.
    pub params: FlockParams,
}

impl Default for FlockSettings {
    fn default() -> Self {
        Self {
            flocks_per_biome: 2,
            boids_per_flock: 10,
            airspace: Bounds3::new(Vec3::new(-15.0, -10.0, -15.0), Vec3::new(25.0, 10.0, 25.0)),
            params: FlockParams::default(),
        }
    }
}

impl FlockSettings {
    /// Rejects settings that would fail at activation time.
    pub fn validate(&self) -> Result<(), FlockError> {
        if self.flocks_per_biome == 0 {
            return Ok(());
        }
        if self.boids_per_flock == 0 {
            return Err(FlockError::InvalidConfiguration(
                "boids per flock must be at least 1".to_string(),
            ));
        }
        self.params.validate(&self.airspace)
    }
}

/// Clouds and background fade.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientSettings {
    /// Clouds in the ring.
    pub cloud_count: usize,
    /// Ring radius around the world origin.
    pub ring_radius: f32,
    /// Half-open range of cloud heights.
    pub height_range: (f32, f32),
    /// Half-open range of cloud sizes.
    pub size_range: (f32, f32),
    /// Ring rotation about Y per tick, in radians.
    pub spin_per_tick: f32,
    /// Background colour fade time.
    pub background_fade: Duration,
}

impl Default for AmbientSettings {
    fn default() -> Self {
        Self {
            cloud_count: 15,
            ring_radius: 30.0,
            height_range: (-10.0, 5.0),
            size_range: (3.0, 8.0),
            spin_per_tick: 0.0005,
            background_fade: Duration::from_millis(1000),
        }
    }
}

impl AmbientSettings {
    /// Rejects a ring clouds cannot be placed on.
    pub fn validate(&self) -> Result<(), BiomeError> {
        if !(self.ring_radius.is_finite() && self.ring_radius >= 0.0) {
            return Err(BiomeError::InvalidConfiguration(format!(
                "cloud ring radius must be finite and non-negative, got {}",
                self.ring_radius
            )));
        }
        if !self.spin_per_tick.is_finite() {
            return Err(BiomeError::InvalidConfiguration(format!(
                "cloud spin must be finite, got {}",
                self.spin_per_tick
            )));
        }
        Ok(())
    }
}

/// Everything a [`StarterBiome`](crate::StarterBiome) needs besides its terrain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BiomeSettings {
    /// Static placement.
    pub scatter: ScatterSettings,
    /// Flocks.
    pub flock: FlockSettings,
    /// Clouds and background.
    pub ambient: AmbientSettings,
}

/// Timing of [`BiomeManager`](crate::BiomeManager) rotations.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSettings {
    /// Minimum time between the starts of two transitions.
    pub cooldown: Duration,
    /// Length of the rotation.
    pub duration: Duration,
    /// Rotation about world X per transition, in radians.
    pub angle: f32,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            cooldown: Duration::from_millis(1000),
            duration: Duration::from_millis(1000),
            angle: FRAC_PI_2,
        }
    }
}
