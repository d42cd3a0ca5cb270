use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;
use crate::renderer::camera::Ray;

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub id: EntityId,
    /// Distance from the ray origin.
    pub distance: f32,
    pub point: Vec3,
}

/// Cast `ray` against the bounding spheres of visible meshes on `layer`.
/// Returns the nearest hit.
pub fn pick(scene: &Scene, ray: &Ray, layer: u8) -> Option<PickHit> {
    let mut best: Option<PickHit> = None;

    for entity in scene.iter() {
        if !entity.visible || !entity.layers.contains(layer) {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let radius = mesh.bounding_radius() * entity.scale.max_element();
        if let Some(distance) = ray.intersect_sphere(entity.pos, radius) {
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(PickHit {
                    id: entity.id,
                    distance,
                    point: ray.at(distance),
                });
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use crate::components::layer::Layers;
    use crate::components::mesh::{Color, Material, MeshComponent};

    fn ball(id: u32, pos: Vec3, radius: f32) -> Entity {
        Entity::new(EntityId(id))
            .with_pos(pos)
            .with_mesh(MeshComponent::sphere(radius, Material::Basic { color: Color::WHITE, opacity: 1.0 }))
            .with_layer(Layers::PICK)
    }

    fn down_z() -> Ray {
        Ray::new(Vec3::new(0.0, 0.0, 50.0), Vec3::NEG_Z)
    }

    #[test]
    fn nearest_hit_wins() {
        let mut scene = Scene::new();
        scene.spawn(ball(1, Vec3::ZERO, 2.0));
        scene.spawn(ball(2, Vec3::new(0.0, 0.0, 20.0), 1.0));

        let hit = pick(&scene, &down_z(), Layers::PICK).unwrap();
        assert_eq!(hit.id, EntityId(2));
        assert!((hit.distance - 29.0).abs() < 1e-4);
    }

    #[test]
    fn entities_off_layer_are_ignored() {
        let mut scene = Scene::new();
        scene.spawn(
            Entity::new(EntityId(1))
                .with_mesh(MeshComponent::sphere(5.0, Material::Basic { color: Color::WHITE, opacity: 1.0 })),
        );
        assert!(pick(&scene, &down_z(), Layers::PICK).is_none());
        assert!(pick(&scene, &down_z(), Layers::DEFAULT).is_some());
    }

    #[test]
    fn hidden_entities_are_ignored() {
        let mut scene = Scene::new();
        scene.spawn(ball(1, Vec3::ZERO, 2.0).hidden());
        assert!(pick(&scene, &down_z(), Layers::PICK).is_none());
    }

    #[test]
    fn scale_grows_the_pick_sphere() {
        let mut scene = Scene::new();
        scene.spawn(ball(1, Vec3::new(3.0, 0.0, 0.0), 1.0).with_scale(Vec3::splat(4.0)));
        assert!(pick(&scene, &down_z(), Layers::PICK).is_some());
    }
}
