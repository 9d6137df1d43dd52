//! Configuration sections, their defaults, and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const FILE_NAME: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Static scenery placement.
    pub scatter: ScatterConfig,
    /// Boid flocks of the active biome.
    pub flock: FlockConfig,
    /// Clouds and background fade.
    pub ambient: AmbientConfig,
    /// Biome rotation timing.
    pub transition: TransitionConfig,
    /// Headless frame loop.
    pub sim: SimConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Poisson scatter and per-instance jitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScatterConfig {
    /// Minimum spacing of placed models in terrain-local units.
    pub min_distance: f32,
    /// Candidates tried around each active sample.
    pub max_attempts: u32,
    /// Uniform scale of each biome group.
    pub biome_scale: f32,
    /// Smallest world-space size multiplier of a placed model.
    pub scale_min: f32,
    /// Largest world-space size multiplier of a placed model.
    pub scale_max: f32,
}

/// Flock count, airspace and steering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlockConfig {
    /// Flocks spawned per active biome.
    pub flocks_per_biome: usize,
    /// Boids per flock.
    pub boids_per_flock: usize,
    /// Lower airspace corner.
    pub airspace_min: [f32; 3],
    /// Upper airspace corner.
    pub airspace_max: [f32; 3],
    /// Speed cap, world units per tick.
    pub max_speed: f32,
    /// Cap on flocking steer per tick.
    pub max_force: f32,
    /// Neighbours closer than this repel.
    pub separation_distance: f32,
    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    /// Depth of the soft wall zone.
    pub boundary_margin: f32,
    /// Peak wall push. Must exceed `max_force`.
    pub boundary_force: f32,
}

/// Cloud ring and background colour fade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AmbientConfig {
    pub cloud_count: usize,
    pub ring_radius: f32,
    pub cloud_height_min: f32,
    pub cloud_height_max: f32,
    pub cloud_size_min: f32,
    pub cloud_size_max: f32,
    /// Ring rotation per tick in radians.
    pub spin_per_tick: f32,
    pub background_fade_ms: u64,
}

/// Biome rotation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// Minimum time between starts of two rotations.
    pub cooldown_ms: u64,
    /// Length of one rotation.
    pub duration_ms: u64,
    /// Turn per rotation in degrees.
    pub angle_deg: f32,
}

/// Headless frame loop driving the biomes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Frames to run before exiting.
    pub frames: u64,
    /// Simulated time per frame.
    pub frame_ms: u64,
    /// Interval between automatic "next biome" presses. 0 disables them.
    pub rotate_every_ms: u64,
    /// Master seed. `None` picks one at startup.
    pub seed: Option<u64>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.2,
            max_attempts: 20,
            biome_scale: 5.0,
            scale_min: 0.8,
            scale_max: 1.2,
        }
    }
}

impl Default for FlockConfig {
    fn default() -> Self {
        Self {
            flocks_per_biome: 2,
            boids_per_flock: 10,
            airspace_min: [-15.0, -10.0, -15.0],
            airspace_max: [25.0, 10.0, 25.0],
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

impl Default for AmbientConfig {
    fn default() -> Self {
        Self {
            cloud_count: 15,
            ring_radius: 30.0,
            cloud_height_min: -10.0,
            cloud_height_max: 5.0,
            cloud_size_min: 3.0,
            cloud_size_max: 8.0,
            spin_per_tick: 0.0005,
            background_fade_ms: 1000,
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 1000,
            duration_ms: 1000,
            angle_deg: 90.0,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            frames: 600,
            frame_ms: 16,
            rotate_every_ms: 1500,
            seed: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// `<platform config dir>/terreform`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join("terreform"))
        .ok_or(ConfigError::NoConfigDir)
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(FILE_NAME);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(FILE_NAME), serialized).map_err(ConfigError::WriteError)
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(FILE_NAME))?;
        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    /// Checks values the loaders cannot. Deeper range checks happen where the
    /// values are used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason: String| Err(ConfigError::InvalidValue { field, reason });

        if self.sim.frame_ms == 0 {
            return invalid("sim.frame_ms", "must be at least 1".to_string());
        }
        if self.scatter.scale_min > self.scatter.scale_max {
            return invalid(
                "scatter.scale_min",
                format!("{} exceeds scale_max {}", self.scatter.scale_min, self.scatter.scale_max),
            );
        }
        if !(self.ambient.ring_radius.is_finite() && self.ambient.ring_radius >= 0.0) {
            return invalid(
                "ambient.ring_radius",
                format!("must be finite and non-negative, got {}", self.ambient.ring_radius),
            );
        }
        if self.ambient.cloud_height_min > self.ambient.cloud_height_max {
            return invalid("ambient.cloud_height_min", "exceeds cloud_height_max".to_string());
        }
        if self.ambient.cloud_size_min > self.ambient.cloud_size_max {
            return invalid("ambient.cloud_size_min", "exceeds cloud_size_max".to_string());
        }
        if !self.transition.angle_deg.is_finite() {
            return invalid("transition.angle_deg", "must be finite".to_string());
        }
        Ok(())
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
