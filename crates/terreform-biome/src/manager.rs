//! Cycles through biomes with an eased quarter turn of the whole ring.

use std::time::Duration;

use glam::Quat;
use log::{debug, info};
use terreform_scene::SceneContainer;

use crate::{Biome, BiomeError, Easing, TransitionSettings, Tween};

enum TransitionState {
    Idle,
    Transitioning { target: usize, tween: Tween<f32> },
}

/// Owns the biomes and keeps exactly one of them active outside a transition.
pub struct BiomeManager {
    biomes: Vec<Box<dyn Biome>>,
    settings: TransitionSettings,
    current: usize,
    state: TransitionState,
    clock: Duration,
    last_started: Option<Duration>,
    /// Accumulated ring turn about world X, in radians.
    angle: f32,
}

impl BiomeManager {
    /// Takes ownership of `biomes` and activates the first one.
    ///
    /// # Errors
    ///
    /// [`BiomeError::NoBiomes`] for an empty list, or whatever activation of the first
    /// biome returns.
    pub fn new(
        mut biomes: Vec<Box<dyn Biome>>,
        settings: TransitionSettings,
        scene: &mut dyn SceneContainer,
    ) -> Result<Self, BiomeError> {
        let count = biomes.len();
        let first = biomes.first_mut().ok_or(BiomeError::NoBiomes)?;
        first.activate(scene)?;
        info!("biome manager: {count} biomes, starting at {}", first.name());

        Ok(Self {
            biomes,
            settings,
            current: 0,
            state: TransitionState::Idle,
            clock: Duration::ZERO,
            last_started: None,
            angle: 0.0,
        })
    }

    /// Starts a transition to the next biome.
    ///
    /// Returns `false` and does nothing while a transition runs or within the cooldown
    /// of the previous start. Otherwise the current biome deactivates at once and the
    /// next one activates when the rotation finishes.
    pub fn next(&mut self, scene: &mut dyn SceneContainer) -> bool {
        if self.is_transitioning() {
            debug!("biome manager: next ignored, transition in progress");
            return false;
        }
        let cooling_down = self
            .last_started
            .is_some_and(|t| self.clock - t < self.settings.cooldown);
        if cooling_down {
            debug!("biome manager: next ignored, cooling down");
            return false;
        }

        self.biomes[self.current].deactivate(scene);
        let target = (self.current + 1) % self.biomes.len();
        let end = self.angle + self.settings.angle;
        let tween = Tween::new(self.angle, end, self.settings.duration, Easing::QuadOut);

        info!(
            "biome manager: {} -> {}",
            self.biomes[self.current].name(),
            self.biomes[target].name()
        );
        self.state = TransitionState::Transitioning { target, tween };
        self.last_started = Some(self.clock);
        true
    }

    /// Advances the clock, every biome, and any running transition.
    ///
    /// # Errors
    ///
    /// Propagates a failed activation of the transition target.
    pub fn tick(&mut self, dt: Duration, scene: &mut dyn SceneContainer) -> Result<(), BiomeError> {
        self.clock += dt;
        for biome in &mut self.biomes {
            biome.tick(dt, scene);
        }

        let finished = match &mut self.state {
            TransitionState::Idle => None,
            TransitionState::Transitioning { target, tween } => {
                self.angle = tween.advance(dt);
                tween.is_finished().then_some(*target)
            }
        };
        if let Some(target) = finished {
            self.state = TransitionState::Idle;
            self.biomes[target].activate(scene)?;
            self.current = target;
            debug!("biome manager: now at {}", self.biomes[target].name());
        }
        Ok(())
    }

    /// Index of the current biome. During a transition this is still the old one.
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The current biome.
    pub fn current(&self) -> &dyn Biome {
        self.biomes[self.current].as_ref()
    }

    /// Returns `true` while the ring is turning.
    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, TransitionState::Transitioning { .. })
    }

    /// Orientation of the whole biome ring.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_x(self.angle)
    }

    /// Total ring turn about world X in radians. Grows by the configured angle per
    /// transition, without wrapping.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// All biomes in cycle order.
    pub fn biomes(&self) -> &[Box<dyn Biome>] {
        &self.biomes
    }

    /// Time accumulated through [`tick`](Self::tick).
    pub fn clock(&self) -> Duration {
        self.clock
    }
}
