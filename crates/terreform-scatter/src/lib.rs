//! Procedural scenery scattering: Poisson disk sampling over a terrain footprint,
//! surface node generation, and model placement.
//!
//! The pipeline runs once per biome at construction time:
//! terrain geometry → [`get_poisson_bounds`] → [`sample`] → [`get_nodes`] → [`render_nodes`].
//! [`build_static_content`] strings the stages together.

mod bounds;
mod error;
mod geometry;
mod placement;
mod sampler;

pub use bounds::Bounds;
pub use error::ScatterError;
pub use geometry::{
    Node, PointCloud, get_bounds, get_nodes, get_poisson_bounds, get_position, get_scale,
    separate_coordinates,
};
pub use placement::{
    PlacementParams, ScatterSettings, TerrainSpec, build_static_content, render_nodes,
};
pub use sampler::sample;

/// A sample in a terrain's local footprint: `x` is local X, `y` is local Z.
pub type Point2D = glam::Vec2;
