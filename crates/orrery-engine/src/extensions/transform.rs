// extensions/transform.rs
//
// Transform hierarchy extension: tracks parent-child relationships by EntityId.
// Completely decoupled from Entity/Scene internals.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(pivot, LocalTransform::new());
//   graph.register_with(planet, LocalTransform::new().with_offset(Vec3::X * 16.0));
//   graph.set_parent(planet, Some(pivot));
//   graph.propagate(&mut scene);  // Writes world pos/rotation/scale into entities

use std::collections::HashMap;
use glam::{Affine3A, Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Local transform data for entities in a hierarchy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    /// Position relative to parent (or world if no parent).
    pub offset: Vec3,
    /// Rotation relative to parent.
    pub rotation: Quat,
    /// Scale multiplier relative to parent.
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Local matrix: scale, then rotate, then translate.
    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.offset)
    }
}

/// Node in the transform hierarchy.
#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
    world: Affine3A,
}

/// Transform hierarchy graph: manages parent-child relationships.
///
/// World transforms compose parent-then-child (`world = parent * local`), so
/// rotating a parent sweeps every descendant around the parent's origin.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    /// Entities with no parent (top-level), in registration order.
    roots: Vec<EntityId>,
    /// Set when anything changes, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity in the hierarchy with default local transform.
    pub fn register(&mut self, id: EntityId) {
        self.register_with(id, LocalTransform::default());
    }

    /// Register an entity with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Set the parent of an entity. Pass `None` to make it a root.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                self.register(p);
            }
        }

        // Detach from the old parent
        if let Some(old_parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old_parent) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    /// Attach `child` under `parent` with the given local transform.
    pub fn attach(&mut self, child: EntityId, parent: EntityId, local: LocalTransform) {
        self.register_with(child, local);
        self.set_parent(child, Some(parent));
    }

    /// Set the local transform for an entity.
    pub fn set_local(&mut self, id: EntityId, local: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local = local;
            self.dirty = true;
        }
    }

    /// Replace only the local rotation.
    pub fn set_rotation(&mut self, id: EntityId, rotation: Quat) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.rotation = rotation;
            self.dirty = true;
        }
    }

    /// Get the local transform for an entity.
    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    /// Get the parent of an entity.
    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    /// Get the children of an entity.
    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// World transform as of the last propagate.
    pub fn world(&self, id: EntityId) -> Option<Affine3A> {
        self.nodes.get(&id).map(|n| n.world)
    }

    /// World position as of the last propagate.
    pub fn world_position(&self, id: EntityId) -> Option<Vec3> {
        self.world(id).map(|w| Vec3::from(w.translation))
    }

    /// Recompute world transforms from roots down, writing them into the
    /// matching scene entities. No-op when nothing changed.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }

        let roots = self.roots.clone();
        for root in roots {
            self.propagate_recursive(root, Affine3A::IDENTITY, scene);
        }

        self.dirty = false;
    }

    fn propagate_recursive(&mut self, id: EntityId, parent_world: Affine3A, scene: &mut Scene) {
        let Some(node) = self.nodes.get_mut(&id) else { return };
        let world = parent_world * node.local.to_affine();
        node.world = world;
        let children = node.children.clone();

        if let Some(entity) = scene.get_mut(id) {
            let (scale, rotation, translation) = world.to_scale_rotation_translation();
            entity.pos = translation;
            entity.rotation = rotation;
            entity.scale = scale;
        }

        for child in children {
            self.propagate_recursive(child, world, scene);
        }
    }

    /// Check if the hierarchy has pending changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of entities in the hierarchy.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the hierarchy is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register(parent);
        graph.register(child);
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn propagate_updates_positions() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        scene.spawn(Entity::new(parent));
        scene.spawn(Entity::new(child));

        graph.register_with(parent, LocalTransform::new().with_offset(Vec3::new(100.0, 0.0, 100.0)));
        graph.attach(child, parent, LocalTransform::new().with_offset(Vec3::new(50.0, 0.0, 0.0)));
        graph.propagate(&mut scene);

        assert!(close(scene.get(child).unwrap().pos, Vec3::new(150.0, 0.0, 100.0)));
    }

    #[test]
    fn parent_rotation_sweeps_child_around_parent_origin() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let pivot = EntityId(1);
        let body = EntityId(2);
        scene.spawn(Entity::new(body));

        graph.register(pivot);
        graph.attach(body, pivot, LocalTransform::new().with_offset(Vec3::new(10.0, 0.0, 0.0)));
        graph.set_rotation(pivot, Quat::from_rotation_y(FRAC_PI_2));
        graph.propagate(&mut scene);

        // +X rotated a quarter turn about +Y lands on -Z
        assert!(close(scene.get(body).unwrap().pos, Vec3::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn nested_rotations_compose() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let outer = EntityId(1);
        let inner = EntityId(2);
        let leaf = EntityId(3);
        scene.spawn(Entity::new(leaf));

        graph.register(outer);
        graph.attach(inner, outer, LocalTransform::new().with_offset(Vec3::new(16.0, 0.0, 0.0)));
        graph.attach(leaf, inner, LocalTransform::new().with_offset(Vec3::new(2.0, 0.0, 0.0)));
        graph.set_rotation(outer, Quat::from_rotation_y(0.3));
        graph.set_rotation(inner, Quat::from_rotation_y(1.1));
        graph.propagate(&mut scene);

        let expected = Quat::from_rotation_y(0.3)
            * (Vec3::new(16.0, 0.0, 0.0) + Quat::from_rotation_y(1.1) * Vec3::new(2.0, 0.0, 0.0));
        assert!(close(scene.get(leaf).unwrap().pos, expected));
        assert!(close(graph.world_position(leaf).unwrap(), expected));
    }

    #[test]
    fn propagate_clears_dirty() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        graph.register(EntityId(1));
        assert!(graph.is_dirty());
        graph.propagate(&mut scene);
        assert!(!graph.is_dirty());
        graph.set_rotation(EntityId(1), Quat::from_rotation_y(0.1));
        assert!(graph.is_dirty());
    }
}
