/// One-time scene construction: sun, pivots, planets, moon, Saturn's ring,
/// orbit paths and the hover halo.

use glam::{Quat, Vec3};
use orrery_engine::{
    AssetError, Color, EngineContext, Entity, EntityId, Layers, LocalTransform, Material,
    MeshComponent, TextureRegistry,
};
use std::f32::consts::FRAC_PI_2;

use crate::bodies::{self, BodyDef, RingDef, BODIES, BODY_COUNT};
use crate::kinematics::OrbitalKinematics;

// ── Hover halo ───────────────────────────────────────────────────────

pub const HALO_INNER: f32 = 1.05;
pub const HALO_OUTER: f32 = 1.15;
pub const HALO_COLOR: u32 = 0xaaaaff;
pub const HALO_OPACITY: f32 = 0.7;

/// Handles to everything the game touches after setup.
#[derive(Debug, Clone)]
pub struct SolarScene {
    /// Body entity per catalog index.
    pub bodies: [EntityId; BODY_COUNT],
    /// Orbit pivot per catalog index (None for the sun).
    pub pivots: [Option<EntityId>; BODY_COUNT],
    pub orbit_paths: Vec<EntityId>,
    pub ring: Option<EntityId>,
    pub halo: EntityId,
}

impl SolarScene {
    /// Catalog index of a body entity.
    pub fn body_index(&self, id: EntityId) -> Option<usize> {
        self.bodies.iter().position(|&b| b == id)
    }

    pub fn set_orbits_visible(&self, ctx: &mut EngineContext, visible: bool) {
        for &id in &self.orbit_paths {
            ctx.scene.set_visible(id, visible);
        }
    }
}

/// Texture if the host loaded it, flat color otherwise.
pub fn body_material(textures: &TextureRegistry, def: &BodyDef) -> Material {
    match textures.resolve(def.key) {
        Ok(texture) => Material::Textured { texture, emissive: def.emissive, opacity: 1.0 },
        Err(err) => {
            log::warn!("{err}; drawing {} with a flat color", def.key);
            Material::Basic { color: Color::hex(def.fallback_color), opacity: 1.0 }
        }
    }
}

/// Textured ring, or the translucent grey fallback when the texture is unavailable.
pub fn ring_material(textures: &TextureRegistry, ring: &RingDef) -> Material {
    ring_material_from(textures.resolve(ring.texture), ring)
}

fn ring_material_from(resolved: Result<orrery_engine::TextureId, AssetError>, ring: &RingDef) -> Material {
    match resolved {
        Ok(texture) => Material::Textured { texture, emissive: true, opacity: ring.opacity },
        Err(err) => {
            log::warn!("could not load ring texture ({err}); using basic material");
            Material::Basic {
                color: Color::hex(bodies::RING_FALLBACK_COLOR),
                opacity: bodies::RING_FALLBACK_OPACITY,
            }
        }
    }
}

/// Spawn the whole system and register every rotating node with `kinematics`.
pub fn build(ctx: &mut EngineContext, kinematics: &mut OrbitalKinematics, show_orbits: bool) -> SolarScene {
    let mut body_ids = [EntityId(0); BODY_COUNT];
    let mut pivots = [None; BODY_COUNT];
    let mut ring = None;

    for (i, def) in BODIES.iter().enumerate() {
        // Pivot first so the body can hang off it.
        let pivot = match def.orbit_speed {
            Some(speed) => {
                let pivot = ctx.next_id();
                ctx.scene.spawn(Entity::new(pivot).with_tag(format!("{}_pivot", def.key)));
                match def.parent.and_then(|p| pivots[p].map(|pivot| (p, pivot))) {
                    // Nested pivot sits at the parent body's offset inside the parent's pivot.
                    Some((p, parent_pivot)) => ctx.transforms.attach(
                        pivot,
                        parent_pivot,
                        LocalTransform::new().with_offset(Vec3::X * BODIES[p].distance),
                    ),
                    None => ctx.transforms.register(pivot),
                }
                kinematics.add_orbit(pivot, speed);
                Some(pivot)
            }
            None => None,
        };
        pivots[i] = pivot;

        let id = ctx.next_id();
        let material = body_material(&ctx.textures, def);
        let mut entity = Entity::new(id)
            .with_tag(def.key)
            .with_mesh(MeshComponent::sphere(def.radius, material));
        if def.selectable {
            entity = entity.with_layer(Layers::PICK);
        }
        ctx.scene.spawn(entity);

        let local = LocalTransform::new().with_offset(Vec3::X * def.distance);
        match pivot {
            Some(pivot) => ctx.transforms.attach(id, pivot, local),
            None => ctx.transforms.register_with(id, local),
        }
        kinematics.add_spin(id, def.spin);
        body_ids[i] = id;

        if let Some(ring_def) = &def.ring {
            let ring_id = ctx.next_id();
            let mesh = MeshComponent::ring(ring_def.inner, ring_def.outer, ring_material(&ctx.textures, ring_def))
                .double_sided();
            // Default layer only: the ring never takes a pick.
            ctx.scene.spawn(Entity::new(ring_id).with_tag(format!("{}_ring", def.key)).with_mesh(mesh));
            ctx.transforms.attach(
                ring_id,
                id,
                LocalTransform::new().with_rotation(Quat::from_rotation_x(-FRAC_PI_2)),
            );
            ring = Some(ring_id);
        }
    }

    let orbit_material = Material::Basic { color: Color::hex(bodies::ORBIT_PATH_COLOR), opacity: 1.0 };
    let mut orbit_paths = Vec::new();
    for def in BODIES.iter().filter(|d| d.orbit_speed.is_some() && d.parent.is_none()) {
        let id = ctx.next_id();
        let mut path = Entity::new(id)
            .with_tag(format!("{}_orbit", def.key))
            .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
            .with_mesh(MeshComponent::torus(def.distance, bodies::ORBIT_PATH_TUBE, orbit_material).double_sided());
        path.visible = show_orbits;
        ctx.scene.spawn(path);
        orbit_paths.push(id);
    }

    let halo = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(halo)
            .with_tag("hover_halo")
            .with_mesh(
                MeshComponent::ring(
                    HALO_INNER,
                    HALO_OUTER,
                    Material::Basic { color: Color::hex(HALO_COLOR), opacity: HALO_OPACITY },
                )
                .double_sided()
                .without_depth_write(),
            )
            .hidden(),
    );

    ctx.transforms.propagate(&mut ctx.scene);
    log::info!(
        "solar system built: {} entities, {} orbit paths",
        ctx.scene.len(),
        orbit_paths.len()
    );

    SolarScene {
        bodies: body_ids,
        pivots,
        orbit_paths,
        ring,
        halo,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::{Shape, TextureDescriptor, TextureManifest};
    use crate::bodies::{EARTH, MOON, SATURN, SUN};

    fn built(manifest: TextureManifest) -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::new();
        ctx.load_manifest(&manifest);
        let mut kinematics = OrbitalKinematics::new();
        let scene = build(&mut ctx, &mut kinematics, true);
        (ctx, scene)
    }

    fn loaded(names: &[&str]) -> TextureManifest {
        TextureManifest {
            textures: names
                .iter()
                .map(|n| TextureDescriptor { name: n.to_string(), path: format!("{n}.jpg"), loaded: true })
                .collect(),
        }
    }

    #[test]
    fn planets_start_on_positive_x() {
        let (ctx, scene) = built(TextureManifest::default());
        let earth = ctx.scene.get(scene.bodies[EARTH]).unwrap();
        assert!((earth.pos - Vec3::new(16.0, 0.0, 0.0)).length() < 1e-5);
        let moon = ctx.scene.get(scene.bodies[MOON]).unwrap();
        assert!((moon.pos - Vec3::new(18.0, 0.0, 0.0)).length() < 1e-5);
        assert!(scene.pivots[SUN].is_none());
    }

    #[test]
    fn only_planets_are_pickable() {
        let (ctx, scene) = built(TextureManifest::default());
        let pickable = ctx.scene.iter().filter(|e| e.layers.contains(Layers::PICK)).count();
        assert_eq!(pickable, 8);
        let ring = ctx.scene.get(scene.ring.unwrap()).unwrap();
        assert!(!ring.layers.contains(Layers::PICK));
    }

    #[test]
    fn moon_pivot_nests_in_earth_pivot() {
        let (ctx, scene) = built(TextureManifest::default());
        let moon_pivot = scene.pivots[MOON].unwrap();
        assert_eq!(ctx.transforms.get_parent(moon_pivot), scene.pivots[EARTH]);
    }

    #[test]
    fn eight_orbit_paths_lie_flat() {
        let (ctx, scene) = built(TextureManifest::default());
        assert_eq!(scene.orbit_paths.len(), 8);
        let earth_path = ctx.scene.find_by_tag("earth_orbit").unwrap();
        match earth_path.mesh.unwrap().shape {
            Shape::Torus { radius, tube } => {
                assert_eq!(radius, 16.0);
                assert_eq!(tube, 0.01);
            }
            other => panic!("unexpected shape {other:?}"),
        }
        // Torus axis (local Z) turned onto world Y.
        let axis = earth_path.rotation * Vec3::Z;
        assert!((axis.y.abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn missing_ring_texture_falls_back_to_translucent_grey() {
        let (ctx, scene) = built(loaded(&["saturn"]));
        let ring = ctx.scene.get(scene.ring.unwrap()).unwrap().mesh.unwrap();
        assert_eq!(
            ring.material,
            Material::Basic { color: Color::hex(0xaaaaaa), opacity: 0.5 }
        );
        assert!(ring.double_sided);
        let saturn = ctx.scene.get(scene.bodies[SATURN]).unwrap().mesh.unwrap();
        assert!(saturn.material.texture().is_some());
    }

    #[test]
    fn failed_ring_load_also_falls_back() {
        let ring = BODIES[SATURN].ring.unwrap();
        let err = AssetError::FailedToLoad { name: "saturn_ring".into(), path: "r.png".into() };
        assert!(matches!(ring_material_from(Err(err), &ring), Material::Basic { .. }));
    }

    #[test]
    fn loaded_ring_texture_is_used() {
        let (ctx, scene) = built(loaded(&["saturn_ring"]));
        let ring = ctx.scene.get(scene.ring.unwrap()).unwrap().mesh.unwrap();
        assert_eq!(ring.material.opacity(), 0.8);
        assert!(ring.material.texture().is_some());
    }

    #[test]
    fn halo_starts_hidden_without_depth_write() {
        let (ctx, scene) = built(TextureManifest::default());
        let halo = ctx.scene.get(scene.halo).unwrap();
        assert!(!halo.visible);
        let mesh = halo.mesh.unwrap();
        assert!(!mesh.depth_write);
        assert_eq!(mesh.shape, Shape::Ring { inner: 1.05, outer: 1.15 });
    }

    #[test]
    fn orbits_can_start_hidden() {
        let mut ctx = EngineContext::new();
        let mut kinematics = OrbitalKinematics::new();
        let scene = build(&mut ctx, &mut kinematics, false);
        assert!(scene.orbit_paths.iter().all(|&id| !ctx.scene.get(id).unwrap().visible));
        scene.set_orbits_visible(&mut ctx, true);
        assert!(scene.orbit_paths.iter().all(|&id| ctx.scene.get(id).unwrap().visible));
    }
}
