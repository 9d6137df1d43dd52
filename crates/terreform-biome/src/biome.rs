//! Biome lifecycle: static scenery built once, animated content only while active.

use std::mem;
use std::time::Duration;

use glam::{Quat, Vec3};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use terreform_flock::Flock;
use terreform_scatter::{TerrainSpec, build_static_content};
use terreform_scene::{Group, ModelRegistry, SceneContainer, Transform};

use crate::{BiomeError, BiomeSettings, CloudLayer, Easing, Tween};

/// A swappable scene unit driven by the [`BiomeManager`](crate::BiomeManager).
pub trait Biome {
    /// Display name.
    fn name(&self) -> &str;

    /// Static terrain and scenery. Never changes after construction.
    fn group(&self) -> &Group;

    /// Returns `true` while animated content exists.
    fn is_active(&self) -> bool;

    /// Spawns animated content into `scene`. No-op if already active.
    fn activate(&mut self, scene: &mut dyn SceneContainer) -> Result<(), BiomeError>;

    /// Removes and drops animated content. No-op if inactive.
    fn deactivate(&mut self, scene: &mut dyn SceneContainer);

    /// Advances animated content one step. No-op if inactive.
    fn tick(&mut self, dt: Duration, scene: &mut dyn SceneContainer);
}

enum BiomeState {
    Built,
    Active(ActiveContent),
}

struct ActiveContent {
    flocks: Vec<Flock>,
    clouds: CloudLayer,
    background: Tween<Vec3>,
}

/// The stock biome: scattered scenery on a terrain, with flocks and clouds when active.
///
/// Dropping an active biome does not touch the scene; deactivate it first.
pub struct StarterBiome {
    name: String,
    group: Group,
    settings: BiomeSettings,
    rng: ChaCha8Rng,
    state: BiomeState,
}

impl StarterBiome {
    /// Builds the static content once and places the group at `position`.
    ///
    /// # Errors
    ///
    /// - [`BiomeError::Scatter`] if a model id is missing or placement settings are
    ///   out of range.
    /// - [`BiomeError::Flock`] if flock settings would be rejected on activation.
    /// - [`BiomeError::InvalidConfiguration`] if the cloud ring cannot be built.
    pub fn new(
        name: impl Into<String>,
        position: Vec3,
        terrain: &TerrainSpec,
        registry: &ModelRegistry,
        settings: &BiomeSettings,
        seed: u64,
    ) -> Result<Self, BiomeError> {
        let name = name.into();
        settings.flock.validate()?;
        settings.ambient.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut group = build_static_content(terrain, registry, &settings.scatter, &mut rng)?;
        group.name.clone_from(&name);
        group.transform = Transform::from_translation(position)
            .with_rotation(world_alignment(position))
            .with_uniform_scale(settings.scatter.biome_scale);

        info!("biome {name}: built {} static objects at {position}", group.len());
        Ok(Self {
            name,
            group,
            settings: settings.clone(),
            rng,
            state: BiomeState::Built,
        })
    }

    /// Flocks of the active biome; empty while inactive.
    pub fn flocks(&self) -> &[Flock] {
        match &self.state {
            BiomeState::Active(content) => &content.flocks,
            BiomeState::Built => &[],
        }
    }

    /// Cloud layer of the active biome.
    pub fn clouds(&self) -> Option<&CloudLayer> {
        match &self.state {
            BiomeState::Active(content) => Some(&content.clouds),
            BiomeState::Built => None,
        }
    }
}

impl Biome for StarterBiome {
    fn name(&self) -> &str {
        &self.name
    }

    fn group(&self) -> &Group {
        &self.group
    }

    fn is_active(&self) -> bool {
        matches!(self.state, BiomeState::Active(_))
    }

    fn activate(&mut self, scene: &mut dyn SceneContainer) -> Result<(), BiomeError> {
        if self.is_active() {
            return Ok(());
        }

        let flock = &self.settings.flock;
        let mut flocks = (0..flock.flocks_per_biome)
            .map(|_| {
                Flock::with_params(
                    flock.boids_per_flock,
                    flock.airspace,
                    flock.params.clone(),
                    &mut self.rng,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        for f in &mut flocks {
            f.attach(scene);
        }

        let mut clouds = CloudLayer::new(&self.settings.ambient, &mut self.rng);
        clouds.attach(scene);

        let color = Vec3::new(self.rng.random(), self.rng.random(), self.rng.random());
        let background = Tween::new(
            scene.background(),
            color,
            self.settings.ambient.background_fade,
            Easing::QuadOut,
        );

        debug!(
            "biome {}: activated {} flocks, {} clouds",
            self.name,
            flocks.len(),
            clouds.len()
        );
        self.state = BiomeState::Active(ActiveContent {
            flocks,
            clouds,
            background,
        });
        Ok(())
    }

    fn deactivate(&mut self, scene: &mut dyn SceneContainer) {
        if let BiomeState::Active(mut content) = mem::replace(&mut self.state, BiomeState::Built) {
            for flock in &mut content.flocks {
                flock.detach(scene);
            }
            content.clouds.detach(scene);
            debug!("biome {}: deactivated", self.name);
        }
    }

    fn tick(&mut self, dt: Duration, scene: &mut dyn SceneContainer) {
        let BiomeState::Active(content) = &mut self.state else {
            return;
        };
        for flock in &mut content.flocks {
            flock.tick();
            flock.sync_visuals(scene);
        }
        content.clouds.tick(scene);
        if !content.background.is_finished() {
            scene.set_background(content.background.advance(dt));
        }
    }
}

/// Rotation about world X that turns a biome at `position` into the slot at `-Z`.
///
/// The angle is the one between `position` and `-Z`, negated for biomes below the
/// origin plane. A biome at the origin is left unrotated.
pub fn world_alignment(position: Vec3) -> Quat {
    if position.length_squared() == 0.0 {
        return Quat::IDENTITY;
    }
    let angle = position.angle_between(Vec3::NEG_Z);
    let sign = if position.y < 0.0 { -1.0 } else { 1.0 };
    Quat::from_rotation_x(angle * sign)
}
