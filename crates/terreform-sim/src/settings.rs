//! Maps the persisted config onto the library settings types.

use std::time::Duration;

use glam::Vec3;
use terreform_biome::{AmbientSettings, BiomeSettings, FlockSettings, TransitionSettings};
use terreform_config::Config;
use terreform_flock::{Bounds3, FlockParams};
use terreform_scatter::{PlacementParams, ScatterSettings};

pub fn biome_settings(config: &Config) -> BiomeSettings {
    let scatter = &config.scatter;
    let flock = &config.flock;
    let ambient = &config.ambient;

    BiomeSettings {
        scatter: ScatterSettings {
            min_distance: scatter.min_distance,
            max_attempts: scatter.max_attempts,
            biome_scale: scatter.biome_scale,
            placement: PlacementParams {
                scale_range: (scatter.scale_min, scatter.scale_max),
            },
        },
        flock: FlockSettings {
            flocks_per_biome: flock.flocks_per_biome,
            boids_per_flock: flock.boids_per_flock,
            airspace: Bounds3::new(
                Vec3::from_array(flock.airspace_min),
                Vec3::from_array(flock.airspace_max),
            ),
            params: FlockParams {
                max_speed: flock.max_speed,
                max_force: flock.max_force,
                separation_distance: flock.separation_distance,
                separation_weight: flock.separation_weight,
                alignment_weight: flock.alignment_weight,
                cohesion_weight: flock.cohesion_weight,
                boundary_margin: flock.boundary_margin,
                boundary_force: flock.boundary_force,
            },
        },
        ambient: AmbientSettings {
            cloud_count: ambient.cloud_count,
            ring_radius: ambient.ring_radius,
            height_range: (ambient.cloud_height_min, ambient.cloud_height_max),
            size_range: (ambient.cloud_size_min, ambient.cloud_size_max),
            spin_per_tick: ambient.spin_per_tick,
            background_fade: Duration::from_millis(ambient.background_fade_ms),
        },
    }
}

pub fn transition_settings(config: &Config) -> TransitionSettings {
    TransitionSettings {
        cooldown: Duration::from_millis(config.transition.cooldown_ms),
        duration: Duration::from_millis(config.transition.duration_ms),
        angle: config.transition.angle_deg.to_radians(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_library_defaults() {
        let config = Config::default();
        assert_eq!(biome_settings(&config), BiomeSettings::default());

        let transition = transition_settings(&config);
        let defaults = TransitionSettings::default();
        assert_eq!(transition.cooldown, defaults.cooldown);
        assert_eq!(transition.duration, defaults.duration);
        assert!((transition.angle - defaults.angle).abs() < 1e-6);
    }

    #[test]
    fn test_overrides_flow_through() {
        let mut config = Config::default();
        config.flock.flocks_per_biome = 1;
        config.ambient.background_fade_ms = 250;
        config.transition.angle_deg = 45.0;

        let biome = biome_settings(&config);
        assert_eq!(biome.flock.flocks_per_biome, 1);
        assert_eq!(biome.ambient.background_fade, Duration::from_millis(250));
        assert!((transition_settings(&config).angle - std::f32::consts::FRAC_PI_4).abs() < 1e-6);
    }
}
