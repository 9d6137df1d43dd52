//! Model registry: maps string identifiers to pre-loaded, clonable model handles.

use std::sync::Arc;

use hashbrown::HashMap;
use log::debug;

use crate::{Mesh, SceneObject, Transform};

/// Shared, immutable handle to a registered model.
pub type ModelHandle = Arc<Model>;

/// Errors raised by [`ModelRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The requested identifier is not registered.
    #[error("missing model: {0}")]
    MissingModel(String),

    /// A model with this identifier is already registered.
    #[error("duplicate model id: {0}")]
    DuplicateModel(String),
}

/// A pre-loaded model: an identifier plus its geometry.
#[derive(Debug)]
pub struct Model {
    id: String,
    mesh: Arc<Mesh>,
}

impl Model {
    /// The registry identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The model geometry.
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Creates a fresh scene object for this model at the identity transform.
    ///
    /// Geometry is shared read-only; the instance owns its transform.
    pub fn instantiate(&self) -> SceneObject {
        SceneObject {
            name: self.id.clone(),
            mesh: Arc::clone(&self.mesh),
            transform: Transform::IDENTITY,
        }
    }
}

/// Read-only lookup of pre-loaded models by id.
///
/// Passed explicitly into biome construction rather than reached through global state,
/// so tests can build fake registries from procedural meshes.
#[derive(Debug, Default)]
pub struct ModelRegistry {
    models: HashMap<String, ModelHandle>,
}

impl ModelRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `mesh` under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateModel`] if `id` is already taken.
    pub fn insert(&mut self, id: impl Into<String>, mesh: Mesh) -> Result<ModelHandle, RegistryError> {
        let id = id.into();
        if self.models.contains_key(&id) {
            return Err(RegistryError::DuplicateModel(id));
        }
        let handle = Arc::new(Model {
            id: id.clone(),
            mesh: Arc::new(mesh),
        });
        debug!("registered model {id} ({} vertices)", handle.mesh.vertex_count());
        self.models.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    /// Looks up a model by id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::MissingModel`] if `id` is not registered.
    pub fn lookup(&self, id: &str) -> Result<ModelHandle, RegistryError> {
        self.models
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::MissingModel(id.to_string()))
    }

    /// Looks up every id in order, failing on the first missing one.
    pub fn lookup_all<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<ModelHandle>, RegistryError> {
        ids.iter().map(|id| self.lookup(id.as_ref())).collect()
    }

    /// Returns `true` if `id` is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
