//! Host-facing scene interfaces for the biome core.
//!
//! The renderer, asset loader and scene graph live outside this workspace. This crate
//! pins down the narrow surface the core needs from them: immutable meshes, a keyed
//! registry of pre-loaded models, owned placement groups, and a [`SceneContainer`]
//! the host exposes for attaching animated content.

mod container;
mod group;
mod mesh;
mod model;
mod transform;

pub use container::{NodeId, SceneContainer, SceneObject, SceneTree};
pub use group::Group;
pub use mesh::Mesh;
pub use model::{Model, ModelHandle, ModelRegistry, RegistryError};
pub use transform::Transform;
