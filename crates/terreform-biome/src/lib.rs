//! Swappable biomes and the rotation that cycles between them.
//!
//! A [`StarterBiome`] builds its static scenery once. Animated content (flocks, clouds
//! and the background fade) only exists while the biome is active. The
//! [`BiomeManager`] keeps exactly one biome active and turns the whole ring of biomes
//! by a quarter turn on each accepted [`BiomeManager::next`].

mod biome;
mod clouds;
mod error;
mod manager;
mod settings;
mod tween;

#[cfg(test)]
mod test_support;

pub use biome::{Biome, StarterBiome, world_alignment};
pub use clouds::CloudLayer;
pub use error::BiomeError;
pub use manager::BiomeManager;
pub use settings::{AmbientSettings, BiomeSettings, FlockSettings, TransitionSettings};
pub use tween::{Easing, Lerp, Tween};
