//! Errors surfaced by the simulation binary.

use terreform_biome::BiomeError;
use terreform_config::ConfigError;
use terreform_scene::RegistryError;

#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("building stock models: {0}")]
    Assets(#[from] RegistryError),

    #[error(transparent)]
    Biome(#[from] BiomeError),
}
