//! Headless frame loop: builds the stock biomes and drives the manager.

use std::time::Duration;

use terreform_biome::{Biome, BiomeManager, StarterBiome};
use terreform_config::Config;
use terreform_scene::SceneTree;
use tracing::{debug, info};

use crate::assets::{STOCK_BIOMES, stock_registry};
use crate::error::SimError;
use crate::settings::{biome_settings, transition_settings};

/// Counters reported at the end of a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub frames: u64,
    pub presses: u32,
    pub transitions: u32,
    pub visited: Vec<usize>,
}

pub struct Simulation {
    scene: SceneTree,
    manager: BiomeManager,
    frame: Duration,
    rotate_every: Option<Duration>,
    since_press: Duration,
    stats: RunStats,
}

impl Simulation {
    /// Builds the stock registry and biomes, then activates the first biome.
    pub fn new(config: &Config, seed: u64) -> Result<Self, SimError> {
        config.validate()?;

        let registry = stock_registry(seed as u32)?;
        let settings = biome_settings(config);
        let biomes = STOCK_BIOMES
            .iter()
            .enumerate()
            .map(|(i, kind)| {
                StarterBiome::new(
                    kind.name,
                    kind.position,
                    &kind.terrain(),
                    &registry,
                    &settings,
                    seed.wrapping_add(i as u64),
                )
                .map(|b| Box::new(b) as Box<dyn Biome>)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut scene = SceneTree::new();
        let manager = BiomeManager::new(biomes, transition_settings(config), &mut scene)?;
        let rotate_every =
            (config.sim.rotate_every_ms > 0).then(|| Duration::from_millis(config.sim.rotate_every_ms));

        Ok(Self {
            scene,
            manager,
            frame: Duration::from_millis(config.sim.frame_ms),
            rotate_every,
            since_press: Duration::ZERO,
            stats: RunStats {
                visited: vec![0],
                ..RunStats::default()
            },
        })
    }

    /// One frame: press "next" if the interval elapsed, then tick everything.
    pub fn step(&mut self) -> Result<(), SimError> {
        if let Some(every) = self.rotate_every {
            self.since_press += self.frame;
            if self.since_press >= every {
                self.since_press -= every;
                self.stats.presses += 1;
                if self.manager.next(&mut self.scene) {
                    self.stats.transitions += 1;
                }
            }
        }

        let before = self.manager.current_index();
        self.manager.tick(self.frame, &mut self.scene)?;
        let after = self.manager.current_index();
        if after != before {
            self.stats.visited.push(after);
            info!(
                biome = self.manager.current().name(),
                nodes = self.scene.len(),
                "arrived at biome {after}"
            );
        }

        self.stats.frames += 1;
        Ok(())
    }

    /// Runs `frames` frames and returns the totals.
    pub fn run(&mut self, frames: u64) -> Result<RunStats, SimError> {
        for _ in 0..frames {
            self.step()?;
            if self.stats.frames % 60 == 0 {
                debug!(
                    frame = self.stats.frames,
                    nodes = self.scene.len(),
                    transitioning = self.manager.is_transitioning(),
                    "frame"
                );
            }
        }
        Ok(self.stats.clone())
    }

    pub fn scene(&self) -> &SceneTree {
        &self.scene
    }

    pub fn manager(&self) -> &BiomeManager {
        &self.manager
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_config() -> Config {
        let mut config = Config::default();
        config.sim.frame_ms = 50;
        config.sim.rotate_every_ms = 1100;
        config.flock.flocks_per_biome = 1;
        config
    }

    #[test]
    fn test_builds_four_biomes() {
        let sim = Simulation::new(&quick_config(), 5).unwrap();
        let names: Vec<&str> = sim.manager().biomes().iter().map(|b| b.name()).collect();
        assert_eq!(names, ["forest", "desert", "tundra", "barren"]);
        assert_eq!(sim.scene().count_named("boid"), 10);
        assert_eq!(sim.scene().count_named("cloud"), 15);

        let barren = &sim.manager().biomes()[3];
        assert_eq!(barren.group().len(), 2, "a biome without models holds terrain only");
    }

    #[test]
    fn test_auto_rotation_cycles_the_ring() {
        let mut sim = Simulation::new(&quick_config(), 6).unwrap();
        // A press every 22 frames; the fourth rotation lands back on the first biome.
        let stats = sim.run(110).unwrap();
        assert_eq!(stats.presses, 5);
        assert_eq!(stats.transitions, 5);
        assert_eq!(&stats.visited[..5], &[0, 1, 2, 3, 0]);
        assert!(sim.manager().biomes().iter().filter(|b| b.is_active()).count() <= 1);
    }

    #[test]
    fn test_rotation_disabled() {
        let mut config = quick_config();
        config.sim.rotate_every_ms = 0;
        let mut sim = Simulation::new(&config, 7).unwrap();
        let stats = sim.run(40).unwrap();
        assert_eq!(stats.presses, 0);
        assert_eq!(stats.visited, vec![0]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = quick_config();
        config.flock.boundary_force = 0.0;
        assert!(matches!(Simulation::new(&config, 1), Err(SimError::Biome(_))));
    }

    #[test]
    fn test_negative_cloud_ring_is_an_error() {
        let mut config = quick_config();
        config.ambient.ring_radius = -5.0;
        assert!(matches!(Simulation::new(&config, 1), Err(SimError::Config(_))));
    }
}
