use crate::assets::registry::TextureId;

/// Linear RGB color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a 0xRRGGBB hex literal.
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as f32 / 255.0,
            g: ((rgb >> 8) & 0xff) as f32 / 255.0,
            b: (rgb & 0xff) as f32 / 255.0,
        }
    }

    /// Multiply every channel by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry primitive, in local units before entity scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere { radius: f32 },
    /// Flat annulus in the local XY plane.
    Ring { inner: f32, outer: f32 },
    /// Torus around the local Z axis.
    Torus { radius: f32, tube: f32 },
}

impl Shape {
    /// Wire id for the host renderer.
    pub fn wire_id(&self) -> f32 {
        match self {
            Shape::Sphere { .. } => 0.0,
            Shape::Ring { .. } => 1.0,
            Shape::Torus { .. } => 2.0,
        }
    }

    /// The two size parameters packed for the wire format.
    pub fn params(&self) -> [f32; 2] {
        match *self {
            Shape::Sphere { radius } => [radius, 0.0],
            Shape::Ring { inner, outer } => [inner, outer],
            Shape::Torus { radius, tube } => [radius, tube],
        }
    }
}

/// Surface description for a mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Texture-mapped surface. Emissive surfaces ignore scene lighting.
    Textured { texture: TextureId, emissive: bool, opacity: f32 },
    /// Flat unlit color.
    Basic { color: Color, opacity: f32 },
}

impl Material {
    pub fn opacity(&self) -> f32 {
        match *self {
            Material::Textured { opacity, .. } | Material::Basic { opacity, .. } => opacity,
        }
    }

    pub fn texture(&self) -> Option<TextureId> {
        match *self {
            Material::Textured { texture, .. } => Some(texture),
            Material::Basic { .. } => None,
        }
    }
}

/// Renderable geometry + material attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: Shape,
    pub material: Material,
    /// Render both faces (rings, orbit paths).
    pub double_sided: bool,
    /// Write to the depth buffer. Overlays such as the hover halo turn this off.
    pub depth_write: bool,
}

impl MeshComponent {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            double_sided: false,
            depth_write: true,
        }
    }

    pub fn sphere(radius: f32, material: Material) -> Self {
        Self::new(Shape::Sphere { radius }, material)
    }

    pub fn ring(inner: f32, outer: f32, material: Material) -> Self {
        Self::new(Shape::Ring { inner, outer }, material)
    }

    pub fn torus(radius: f32, tube: f32, material: Material) -> Self {
        Self::new(Shape::Torus { radius, tube }, material)
    }

    pub fn double_sided(mut self) -> Self {
        self.double_sided = true;
        self
    }

    pub fn without_depth_write(mut self) -> Self {
        self.depth_write = false;
        self
    }

    /// Bounding-sphere radius in local units, used by picking.
    pub fn bounding_radius(&self) -> f32 {
        match self.shape {
            Shape::Sphere { radius } => radius,
            Shape::Ring { outer, .. } => outer,
            Shape::Torus { radius, tube } => radius + tube,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_channels() {
        let c = Color::hex(0xaaaaff);
        assert!((c.r - 170.0 / 255.0).abs() < 1e-6);
        assert!((c.b - 1.0).abs() < 1e-6);
    }

    #[test]
    fn scaled_color_multiplies() {
        let c = Color::new(0.5, 0.25, 1.0).scaled(2.0);
        assert_eq!(c, Color::new(1.0, 0.5, 2.0));
    }

    #[test]
    fn ring_bounding_radius_is_outer() {
        let mesh = MeshComponent::ring(3.8, 6.0, Material::Basic { color: Color::WHITE, opacity: 0.5 });
        assert_eq!(mesh.bounding_radius(), 6.0);
        assert_eq!(mesh.shape.params(), [3.8, 6.0]);
    }
}
