use glam::{Mat4, Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::layer::Layers;
use crate::components::mesh::MeshComponent;

/// Fat Entity: a single struct with optional components.
/// Designed for simplicity over ECS purity: a solar system has a few dozen nodes.
///
/// `pos`/`rotation`/`scale` are WORLD values. Entities registered in a
/// `TransformGraph` get them overwritten on every propagate.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Hidden entities are neither rendered nor picked.
    pub visible: bool,
    /// Position in world space.
    pub pos: Vec3,
    /// Orientation in world space.
    pub rotation: Quat,
    /// World-space scale.
    pub scale: Vec3,
    /// Layer membership (picking filter).
    pub layers: Layers,
    /// Mesh component (optional: pivots have none).
    pub mesh: Option<MeshComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            visible: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            layers: Layers::default(),
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
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

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    pub fn with_layer(mut self, layer: u8) -> Self {
        self.layers.enable(layer);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// World matrix built from pos/rotation/scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let e = Entity::new(EntityId(3))
            .with_tag("earth")
            .with_pos(Vec3::new(16.0, 0.0, 0.0))
            .with_layer(Layers::PICK);
        assert_eq!(e.tag, "earth");
        assert!(e.visible);
        assert!(e.layers.contains(Layers::PICK));
        assert!(e.layers.contains(Layers::DEFAULT));
    }

    #[test]
    fn model_matrix_translates() {
        let e = Entity::new(EntityId(1)).with_pos(Vec3::new(1.0, 2.0, 3.0));
        let p = e.model_matrix().transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-6);
    }
}
