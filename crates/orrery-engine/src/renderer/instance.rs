use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Per-instance mesh data read by the host renderer.
/// Must match the TypeScript protocol: 28 floats = 112 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct RenderInstance {
    /// Column-major world matrix (entity position, rotation, scale).
    pub model: [f32; 16],
    /// RGB tint + opacity. White for textured meshes.
    pub color: [f32; 4],
    /// `Shape::wire_id` (0 sphere, 1 ring, 2 torus).
    pub shape: f32,
    /// Shape parameters, see `Shape::params`.
    pub params: [f32; 2],
    /// Texture index in the manifest, or -1 for untextured.
    pub texture: f32,
    /// Bit set of `FLAG_*`.
    pub flags: f32,
    pub _pad: [f32; 3],
}

impl RenderInstance {
    pub const FLOATS: usize = 28;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const FLAG_DOUBLE_SIDED: u32 = 1;
    pub const FLAG_DEPTH_WRITE: u32 = 1 << 1;
    pub const FLAG_EMISSIVE: u32 = 1 << 2;

    pub fn flag_bits(&self) -> u32 {
        self.flags as u32
    }

    /// World position encoded in the model matrix.
    pub fn translation(&self) -> Vec3 {
        Mat4::from_cols_array(&self.model).w_axis.truncate()
    }
}

impl Default for RenderInstance {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array(),
            color: [1.0; 4],
            shape: 0.0,
            params: [0.0; 2],
            texture: -1.0,
            flags: 0.0,
            _pad: [0.0; 3],
        }
    }
}

/// Mesh instances for one frame.
pub struct RenderBuffer {
    /// Opaque instances first, then translucent ones from `translucent_split` on.
    pub instances: Vec<RenderInstance>,
    /// Index of the first translucent instance (drawn after opaques, depth-sorted by the host).
    pub translucent_split: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            translucent_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.translucent_split = 0;
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// A single background point (star): position + displayed color.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub pos: [f32; 3],
    pub color: [f32; 3],
}

impl PointInstance {
    pub const FLOATS: usize = 6;
}

/// Point sprites for one frame.
pub struct PointBuffer {
    pub points: Vec<PointInstance>,
    /// World-space point size.
    pub size: f32,
}

impl PointBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            size: 0.7,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn push(&mut self, point: PointInstance) {
        self.points.push(point);
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr() as *const f32
    }
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::with_capacity(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_28_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(std::mem::size_of::<PointInstance>(), PointInstance::FLOATS * 4);
    }

    #[test]
    fn default_instance_is_untextured_identity() {
        let inst = RenderInstance::default();
        assert_eq!(inst.texture, -1.0);
        assert_eq!(inst.translation(), Vec3::ZERO);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }
}
