//! Node rendering and the full static placement pipeline.

use std::f32::consts::TAU;

use glam::Quat;
use log::{debug, info, warn};
use rand::Rng;
use terreform_scene::{Group, ModelHandle, ModelRegistry, Transform};

use crate::{
    Node, PointCloud, ScatterError, get_nodes, get_poisson_bounds, get_scale, sample,
    separate_coordinates,
};

/// Per-instance variation applied when placing models.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementParams {
    /// Inclusive range of the world-space size multiplier.
    pub scale_range: (f32, f32),
}

impl Default for PlacementParams {
    fn default() -> Self {
        Self {
            scale_range: (0.8, 1.2),
        }
    }
}

/// Everything the pipeline needs besides the terrain and the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct ScatterSettings {
    /// Minimum distance between placed models, in terrain-local units.
    pub min_distance: f32,
    /// Candidates tried per active sample before it retires.
    pub max_attempts: u32,
    /// Uniform scale of the biome group.
    pub biome_scale: f32,
    /// Per-instance variation.
    pub placement: PlacementParams,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            min_distance: 0.2,
            max_attempts: 20,
            biome_scale: 5.0,
            placement: PlacementParams::default(),
        }
    }
}

impl PlacementParams {
    /// Rejects a scale range that is empty, non-positive or not finite.
    pub fn validate(&self) -> Result<(), ScatterError> {
        let (lo, hi) = self.scale_range;
        if !(lo > 0.0 && lo <= hi && hi.is_finite()) {
            return Err(ScatterError::InvalidConfiguration(format!(
                "scale range must satisfy 0 < min <= max, got ({lo}, {hi})"
            )));
        }
        Ok(())
    }
}

impl ScatterSettings {
    /// Checks every parameter is in range.
    pub fn validate(&self) -> Result<(), ScatterError> {
        if !(self.biome_scale.is_finite() && self.biome_scale > 0.0) {
            return Err(ScatterError::InvalidConfiguration(format!(
                "biome scale must be positive, got {}",
                self.biome_scale
            )));
        }
        self.placement.validate()?;
        if !(self.min_distance.is_finite() && self.min_distance > 0.0) {
            return Err(ScatterError::InvalidConfiguration(format!(
                "minimum distance must be positive, got {}",
                self.min_distance
            )));
        }
        if self.max_attempts == 0 {
            return Err(ScatterError::InvalidConfiguration(
                "max attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Registry ids making up one biome's terrain and scenery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TerrainSpec {
    /// Terrain underside; its footprint bounds the sampling area.
    pub bottom: String,
    /// Walkable top surface; placed models sit on it.
    pub top: String,
    /// Candidate scenery models.
    pub models: Vec<String>,
}

/// Places one model instance per node into `group` and returns how many were placed.
///
/// Each node picks a candidate uniformly at random, gets a yaw of its surface heading
/// plus a random turn, and a scale drawn from `params.scale_range` divided by
/// `biome_scale`. An empty candidate list places nothing and leaves `group` untouched.
///
/// # Errors
///
/// [`ScatterError::InvalidConfiguration`] for a bad scale range or a non-positive
/// `biome_scale`. Nothing is placed in that case.
pub fn render_nodes<R: Rng + ?Sized>(
    nodes: &[Node],
    candidates: &[ModelHandle],
    group: &mut Group,
    biome_scale: f32,
    params: &PlacementParams,
    rng: &mut R,
) -> Result<usize, ScatterError> {
    params.validate()?;
    if !(biome_scale.is_finite() && biome_scale > 0.0) {
        return Err(ScatterError::InvalidConfiguration(format!(
            "biome scale must be positive, got {biome_scale}"
        )));
    }
    if candidates.is_empty() {
        debug!("no candidate models for {}: skipping {} nodes", group.name, nodes.len());
        return Ok(0);
    }

    let (lo, hi) = params.scale_range;
    for node in nodes {
        let model = &candidates[rng.random_range(0..candidates.len())];
        let jitter = rng.random_range(lo..=hi);
        let yaw = node.normal_yaw + rng.random_range(0.0..TAU);

        let mut instance = model.instantiate();
        instance.transform = Transform::from_translation(node.position)
            .with_rotation(Quat::from_rotation_y(yaw))
            .with_uniform_scale(get_scale(biome_scale, jitter));
        group.add(instance);
    }
    Ok(nodes.len())
}

/// Runs the full placement pipeline for one terrain piece.
///
/// Adds the bottom and top terrain pieces to a new group, scatters Poisson samples over
/// the bottom footprint shrunk by the widest candidate model, lifts them onto the top
/// surface, and places a model on each. A terrain too small for the models gives a group
/// with terrain only.
///
/// # Errors
///
/// - [`ScatterError::Registry`] if any id in `terrain` is not registered.
/// - [`ScatterError::InvalidConfiguration`] for out-of-range settings.
/// - [`ScatterError::EmptyGeometry`] if a terrain or model mesh has no vertices.
pub fn build_static_content<R: Rng + ?Sized>(
    terrain: &TerrainSpec,
    registry: &ModelRegistry,
    settings: &ScatterSettings,
    rng: &mut R,
) -> Result<Group, ScatterError> {
    settings.validate()?;

    let bottom = registry.lookup(&terrain.bottom)?;
    let top = registry.lookup(&terrain.top)?;
    let models = registry.lookup_all(&terrain.models)?;

    let mut group = Group::new(format!("{}+{}", terrain.bottom, terrain.top));
    group.add(bottom.instantiate());
    group.add(top.instantiate());

    if models.is_empty() {
        info!("{}: no scenery models, terrain only", group.name);
        return Ok(group);
    }

    let bottom_points = separate_coordinates(bottom.mesh());
    let top_points = separate_coordinates(top.mesh());

    // Footprint of the widest candidate at the largest scale it can be placed with.
    let max_scale = get_scale(settings.biome_scale, settings.placement.scale_range.1);
    let model_points = models
        .iter()
        .flat_map(|m| m.mesh().positions().iter().copied())
        .collect::<PointCloud>()
        .scaled(max_scale);

    let bounds = match get_poisson_bounds(&bottom_points, &model_points) {
        Ok(bounds) => bounds,
        Err(ScatterError::DegenerateBounds {
            terrain: footprint,
            footprint_radius,
        }) => {
            warn!(
                "{}: model footprint {footprint_radius:.3} does not fit terrain {:.3}x{:.3}, placing no scenery",
                group.name,
                footprint.width(),
                footprint.height()
            );
            return Ok(group);
        }
        Err(e) => return Err(e),
    };

    let samples = sample(settings.min_distance, settings.max_attempts, &bounds, rng)?;
    let nodes = get_nodes(&samples, &top_points)?;
    let placed = render_nodes(
        &nodes,
        &models,
        &mut group,
        settings.biome_scale,
        &settings.placement,
        rng,
    )?;

    info!(
        "{}: placed {placed} instances from {} candidate models",
        group.name,
        models.len()
    );
    Ok(group)
}
