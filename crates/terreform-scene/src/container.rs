//! Scene container interface and an in-memory implementation.
//!
//! The host owns the real scene graph. Biomes and flocks only add, move and remove
//! the nodes they created, and fade the background colour.

use std::sync::Arc;

use glam::Vec3;
use hashbrown::HashMap;

use crate::{Mesh, Transform};

/// Handle to a node inserted into a [`SceneContainer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

/// A renderable object: a mesh under a transform.
#[derive(Clone, Debug)]
pub struct SceneObject {
    /// Model id or a descriptive name for procedural objects.
    pub name: String,
    /// Read-only geometry, possibly shared with the model registry.
    pub mesh: Arc<Mesh>,
    /// Transform relative to the parent.
    pub transform: Transform,
}

impl SceneObject {
    /// Wraps a procedurally built mesh.
    pub fn new(name: impl Into<String>, mesh: Arc<Mesh>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform,
        }
    }
}

/// The host scene as seen by the core.
pub trait SceneContainer {
    /// Inserts `object` at the scene root and returns its handle.
    fn add_child(&mut self, object: SceneObject) -> NodeId;

    /// Removes a node, returning it if it was present.
    fn remove_child(&mut self, id: NodeId) -> Option<SceneObject>;

    /// Replaces a node's transform. Returns `false` for unknown ids.
    fn set_transform(&mut self, id: NodeId, transform: Transform) -> bool;

    /// Removes every node.
    fn clear(&mut self);

    /// Current background colour (linear RGB).
    fn background(&self) -> Vec3;

    /// Sets the background colour (linear RGB).
    fn set_background(&mut self, color: Vec3);
}

/// Flat in-memory scene used by the headless driver and by tests.
#[derive(Debug, Default)]
pub struct SceneTree {
    nodes: HashMap<NodeId, SceneObject>,
    next_id: u64,
    background: Vec3,
}

impl SceneTree {
    /// Creates an empty scene with a black background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes are attached.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node.
    pub fn get(&self, id: NodeId) -> Option<&SceneObject> {
        self.nodes.get(&id)
    }

    /// Returns `true` if `id` is attached.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Number of live nodes with the given name.
    pub fn count_named(&self, name: &str) -> usize {
        self.nodes.values().filter(|n| n.name == name).count()
    }

    /// Iterates over all live nodes in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneObject)> {
        self.nodes.iter().map(|(id, obj)| (*id, obj))
    }
}

impl SceneContainer for SceneTree {
    fn add_child(&mut self, object: SceneObject) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, object);
        id
    }

    fn remove_child(&mut self, id: NodeId) -> Option<SceneObject> {
        self.nodes.remove(&id)
    }

    fn set_transform(&mut self, id: NodeId, transform: Transform) -> bool {
        match self.nodes.get_mut(&id) {
            Some(node) => {
                node.transform = transform;
                true
            }
            None => false,
        }
    }

    fn clear(&mut self) {
        self.nodes.clear();
    }

    fn background(&self) -> Vec3 {
        self.background
    }

    fn set_background(&mut self, color: Vec3) {
        self.background = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puff() -> SceneObject {
        SceneObject::new("puff", Arc::new(Mesh::octahedron(1.0)), Transform::IDENTITY)
    }

    #[test]
    fn test_add_and_remove_child() {
        let mut scene = SceneTree::new();
        let a = scene.add_child(puff());
        let b = scene.add_child(puff());
        assert_ne!(a, b);
        assert_eq!(scene.len(), 2);

        assert!(scene.remove_child(a).is_some());
        assert!(scene.remove_child(a).is_none());
        assert!(!scene.contains(a));
        assert!(scene.contains(b));
    }

    #[test]
    fn test_ids_are_not_reused_after_clear() {
        let mut scene = SceneTree::new();
        let a = scene.add_child(puff());
        scene.clear();
        assert!(scene.is_empty());
        let b = scene.add_child(puff());
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_transform_unknown_id() {
        let mut scene = SceneTree::new();
        assert!(!scene.set_transform(NodeId(42), Transform::IDENTITY));
        let id = scene.add_child(puff());
        let moved = Transform::from_translation(Vec3::Y);
        assert!(scene.set_transform(id, moved));
        assert_eq!(scene.get(id).map(|n| n.transform), Some(moved));
    }
}
