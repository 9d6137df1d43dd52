//! Owned container of scene objects sharing one parent transform.

use crate::{SceneObject, Transform};

/// A named collection of child objects under a common transform.
///
/// A biome's terrain pieces and placed scenery live in a `Group` the biome owns
/// outright; dropping the group drops every placed instance.
#[derive(Clone, Debug, Default)]
pub struct Group {
    /// Group name, used in logs.
    pub name: String,
    /// Transform applied to all children.
    pub transform: Transform,
    children: Vec<SceneObject>,
}

impl Group {
    /// Creates an empty group with the identity transform.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::IDENTITY,
            children: Vec::new(),
        }
    }

    /// Appends a child.
    pub fn add(&mut self, child: SceneObject) {
        self.children.push(child);
    }

    /// Child objects in insertion order.
    pub fn children(&self) -> &[SceneObject] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the group has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of children instantiated from the model `id`.
    pub fn count_named(&self, id: &str) -> usize {
        self.children.iter().filter(|c| c.name == id).count()
    }
}
