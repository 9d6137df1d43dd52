//! Biome error types.

use terreform_flock::FlockError;
use terreform_scatter::ScatterError;

/// Errors from building, activating or managing biomes.
#[derive(Debug, thiserror::Error)]
pub enum BiomeError {
    /// Static placement failed, including missing models.
    #[error(transparent)]
    Scatter(#[from] ScatterError),

    /// Flock settings were rejected.
    #[error(transparent)]
    Flock(#[from] FlockError),

    /// Ambient settings are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A manager was created without biomes.
    #[error("biome manager needs at least one biome")]
    NoBiomes,
}
