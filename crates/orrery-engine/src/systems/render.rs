use crate::components::entity::Entity;
use crate::components::mesh::Material;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the mesh instance buffer from a set of entities.
/// Opaque meshes first, then translucent ones; `translucent_split` marks the boundary.
/// Hidden entities and entities without a mesh are skipped.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    let mut translucent: Vec<RenderInstance> = Vec::new();

    for entity in entities {
        if !entity.visible {
            continue;
        }

        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let (color, emissive) = match mesh.material {
            Material::Textured { emissive, .. } => ([1.0, 1.0, 1.0], emissive),
            Material::Basic { color, .. } => (color.to_array(), false),
        };
        let opacity = mesh.material.opacity();

        let mut flags = 0;
        if mesh.double_sided {
            flags |= RenderInstance::FLAG_DOUBLE_SIDED;
        }
        if mesh.depth_write {
            flags |= RenderInstance::FLAG_DEPTH_WRITE;
        }
        if emissive {
            flags |= RenderInstance::FLAG_EMISSIVE;
        }

        let instance = RenderInstance {
            model: entity.model_matrix().to_cols_array(),
            color: [color[0], color[1], color[2], opacity],
            shape: mesh.shape.wire_id(),
            params: mesh.shape.params(),
            texture: mesh.material.texture().map_or(-1.0, |t| t.0 as f32),
            flags: flags as f32,
            _pad: [0.0; 3],
        };

        if opacity < 1.0 {
            translucent.push(instance);
        } else {
            buffer.push(instance);
        }
    }

    buffer.translucent_split = buffer.instance_count();
    for inst in translucent {
        buffer.push(inst);
    }
}
