use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec2, Vec3};

/// A ray in world space. `dir` is unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir: dir.normalize_or_zero() }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }

    /// Distance to the nearest intersection with a sphere in front of the
    /// origin, or None on a miss.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.dir);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let sq = disc.sqrt();
        let near = -b - sq;
        if near >= 0.0 {
            return Some(near);
        }
        // origin inside the sphere
        let far = -b + sq;
        (far >= 0.0).then_some(far)
    }
}

/// Perspective camera for 3D rendering. Always looks at `look_target`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Eye position in world space.
    pub eye: Vec3,
    /// Point the camera faces (kept in sync by `OrbitControls::update`).
    pub look_target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in CSS pixels (for pointer → NDC conversion).
    pub viewport: Vec2,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_projection: [[f32; 4]; 4],
    /// Eye position, w = 1.
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;

    /// Flat view: view-projection (column-major), then eye.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(std::slice::from_ref(self))
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 20.0, 50.0),
            look_target: Vec3::ZERO,
            fov_y: 75f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
            viewport: Vec2::new(1600.0, 900.0),
        }
    }
}

impl PerspectiveCamera {
    pub fn new(eye: Vec3, fov_y_degrees: f32, near: f32, far: f32) -> Self {
        Self {
            eye,
            fov_y: fov_y_degrees.to_radians(),
            near,
            far,
            ..Default::default()
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.look_target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_projection: (self.projection_matrix() * self.view_matrix()).to_cols_array_2d(),
            eye: self.eye.extend(1.0).to_array(),
        }
    }

    /// World-space orientation of the camera. Billboards copy this to face the viewer.
    pub fn orientation(&self) -> Quat {
        Quat::from_mat4(&self.view_matrix().inverse())
    }

    /// Resize the viewport (e.g. on window resize).
    pub fn resize(&mut self, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.viewport = Vec2::new(width, height);
        self.aspect = width / height;
    }

    /// Convert a CSS-pixel pointer position to normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn screen_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.viewport.x) * 2.0 - 1.0,
            -(y / self.viewport.y) * 2.0 + 1.0,
        )
    }

    /// Project a world point to CSS-pixel coordinates. None when behind the eye.
    pub fn world_to_screen(&self, world: Vec3) -> Option<Vec2> {
        let clip = (self.projection_matrix() * self.view_matrix()) * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    /// Ray from the eye through an NDC point.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = (self.projection_matrix() * self.view_matrix()).inverse();
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.eye, far - self.eye)
    }
}

/// Orbit controls: drag to orbit the eye around `target`, wheel to dolly.
///
/// Input accumulates into pending deltas which `update` applies with
/// exponential damping, so motion glides to a stop.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Point orbited around and looked at.
    pub target: Vec3,
    /// Disabled controls ignore input (camera tweens own the rig).
    pub enabled: bool,
    /// Fraction of the pending motion applied per reference tick.
    pub damping: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pending_azimuth: f32,
    pending_polar: f32,
    pending_zoom: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enabled: true,
            damping: 0.05,
            rotate_speed: 0.005,
            min_distance: 1.0,
            max_distance: 800.0,
            pending_azimuth: 0.0,
            pending_polar: 0.0,
            pending_zoom: 0.0,
        }
    }
}

impl OrbitControls {
    const POLAR_EPS: f32 = 1e-3;

    /// Queue an orbit from a pointer drag delta in pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        self.pending_azimuth -= dx * self.rotate_speed;
        self.pending_polar -= dy * self.rotate_speed;
    }

    /// Queue a dolly from a wheel delta (positive = away from target).
    pub fn zoom(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        self.pending_zoom += delta * 0.001;
    }

    /// Drop any queued motion.
    pub fn stop(&mut self) {
        self.pending_azimuth = 0.0;
        self.pending_polar = 0.0;
        self.pending_zoom = 0.0;
    }

    /// Whether queued motion remains.
    pub fn is_moving(&self) -> bool {
        self.pending_azimuth.abs() > 1e-6 || self.pending_polar.abs() > 1e-6 || self.pending_zoom.abs() > 1e-6
    }

    /// Apply damped motion for `ticks` reference ticks, then aim the camera at `target`.
    pub fn update(&mut self, camera: &mut PerspectiveCamera, ticks: f32) {
        if self.enabled && self.is_moving() {
            let share = 1.0 - (1.0 - self.damping.clamp(0.0, 1.0)).powf(ticks.max(0.0));
            let d_az = self.pending_azimuth * share;
            let d_polar = self.pending_polar * share;
            let d_zoom = self.pending_zoom * share;
            self.pending_azimuth -= d_az;
            self.pending_polar -= d_polar;
            self.pending_zoom -= d_zoom;

            let offset = camera.eye - self.target;
            let radius = offset.length().max(1e-6);
            let mut azimuth = offset.x.atan2(offset.z);
            let mut polar = (offset.y / radius).clamp(-1.0, 1.0).acos();

            azimuth += d_az;
            polar = (polar + d_polar).clamp(Self::POLAR_EPS, std::f32::consts::PI - Self::POLAR_EPS);
            let radius = (radius * (1.0 + d_zoom)).clamp(self.min_distance, self.max_distance);

            let sin_p = polar.sin();
            camera.eye = self.target
                + Vec3::new(radius * sin_p * azimuth.sin(), radius * polar.cos(), radius * sin_p * azimuth.cos());
        } else if !self.enabled {
            self.stop();
        }
        camera.look_target = self.target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_hits_sphere_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, -1.0));
        let t = ray.intersect_sphere(Vec3::ZERO, 1.0).unwrap();
        assert!((t - 9.0).abs() < 1e-5);
        assert!(ray.intersect_sphere(Vec3::new(5.0, 0.0, 0.0), 1.0).is_none());
    }

    #[test]
    fn ray_ignores_sphere_behind() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::new(0.0, 0.0, 1.0));
        assert!(ray.intersect_sphere(Vec3::ZERO, 1.0).is_none());
    }

    #[test]
    fn center_ray_points_at_target() {
        let camera = PerspectiveCamera::default();
        let ray = camera.ray_from_ndc(Vec2::ZERO);
        let expected = (camera.look_target - camera.eye).normalize();
        assert!((ray.dir - expected).length() < 1e-4);
    }

    #[test]
    fn screen_center_is_ndc_origin() {
        let mut camera = PerspectiveCamera::default();
        camera.resize(800.0, 600.0);
        assert!((camera.aspect - 800.0 / 600.0).abs() < 1e-6);
        let ndc = camera.screen_to_ndc(400.0, 300.0);
        assert!(ndc.length() < 1e-6);
        let corner = camera.screen_to_ndc(0.0, 0.0);
        assert_eq!(corner, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn projection_round_trips_through_picking_ray() {
        let camera = PerspectiveCamera::default();
        let point = Vec3::new(16.0, 0.0, 0.0);
        let screen = camera.world_to_screen(point).unwrap();
        let ray = camera.ray_from_ndc(camera.screen_to_ndc(screen.x, screen.y));
        assert!(ray.intersect_sphere(point, 0.05).is_some());
        assert!(camera.world_to_screen(Vec3::new(0.0, 20.0, 80.0)).is_none());
    }

    #[test]
    fn orientation_looks_down_negative_z_toward_target() {
        let camera = PerspectiveCamera::default();
        let forward = camera.orientation() * Vec3::NEG_Z;
        let expected = (camera.look_target - camera.eye).normalize();
        assert!((forward - expected).length() < 1e-4);
    }

    #[test]
    fn disabled_controls_ignore_input() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls { enabled: false, ..Default::default() };
        let eye = camera.eye;
        controls.rotate(200.0, 0.0);
        controls.zoom(500.0);
        controls.update(&mut camera, 10.0);
        assert_eq!(camera.eye, eye);
    }

    #[test]
    fn rotation_preserves_distance_to_target() {
        let mut camera = PerspectiveCamera::default();
        let mut controls = OrbitControls::default();
        let before = (camera.eye - controls.target).length();
        controls.rotate(120.0, 40.0);
        for _ in 0..30 {
            controls.update(&mut camera, 1.0);
        }
        let after = (camera.eye - controls.target).length();
        assert!((before - after).abs() < 1e-3);
        assert_eq!(camera.look_target, controls.target);
    }

    #[test]
    fn uniform_has_eye() {
        let camera = PerspectiveCamera::default();
        let u = camera.uniform();
        assert_eq!(u.eye, [0.0, 20.0, 50.0, 1.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
        assert_eq!(&u.as_floats()[16..], &[0.0, 20.0, 50.0, 1.0]);
    }
}
