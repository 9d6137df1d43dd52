//! Scatter pipeline error types.

use terreform_scene::RegistryError;

use crate::Bounds;

/// Errors raised by the sampling and placement pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ScatterError {
    /// A parameter is out of range (non-positive distance, zero attempts, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The model footprint does not fit inside the terrain footprint.
    #[error("degenerate bounds: footprint radius {footprint_radius} does not fit in {terrain:?}")]
    DegenerateBounds {
        /// Footprint of the terrain piece.
        terrain: Bounds,
        /// Radius the terrain would have to be shrunk by.
        footprint_radius: f32,
    },

    /// A geometry input had no vertices.
    #[error("empty geometry: {0}")]
    EmptyGeometry(&'static str),

    /// A model id could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}
