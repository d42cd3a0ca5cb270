/// Orbital kinematics: spins bodies and turns orbit pivots each frame.
///
/// Angles are plain per-tick increments around world Y, not Keplerian motion.
/// Pivot rotation sweeps the attached body (and any nested pivot) around the
/// pivot origin through the transform graph.

use glam::Quat;
use orrery_engine::{EntityId, FrameTime, TransformGraph};
use std::f32::consts::TAU;

#[derive(Debug, Clone, Copy)]
struct Rotor {
    id: EntityId,
    /// Radians per reference tick.
    speed: f32,
    /// Current angle, kept in `[0, TAU)`.
    angle: f32,
}

impl Rotor {
    fn advance(&mut self, delta: f32) -> f32 {
        self.angle = (self.angle + delta).rem_euclid(TAU);
        self.angle
    }
}

#[derive(Debug, Default)]
pub struct OrbitalKinematics {
    spins: Vec<Rotor>,
    orbits: Vec<Rotor>,
}

impl OrbitalKinematics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Self-rotation for a body. Not scaled by the orbit multiplier.
    pub fn add_spin(&mut self, id: EntityId, speed: f32) {
        self.spins.push(Rotor { id, speed, angle: 0.0 });
    }

    /// Orbital revolution for a pivot. Scaled by the orbit multiplier.
    pub fn add_orbit(&mut self, pivot: EntityId, speed: f32) {
        self.orbits.push(Rotor { id: pivot, speed, angle: 0.0 });
    }

    /// Advance every spin and orbit by the frame's reference ticks.
    /// The frame clock caps a frame at 0.25 s, so longer stalls advance less than wall time.
    pub fn advance(&mut self, transforms: &mut TransformGraph, time: FrameTime, multiplier: f32) {
        if time.ticks <= 0.0 {
            return;
        }
        for spin in &mut self.spins {
            let angle = spin.advance(spin.speed * time.ticks);
            transforms.set_rotation(spin.id, Quat::from_rotation_y(angle));
        }
        if multiplier == 0.0 {
            return;
        }
        for orbit in &mut self.orbits {
            let angle = orbit.advance(orbit.speed * multiplier * time.ticks);
            transforms.set_rotation(orbit.id, Quat::from_rotation_y(angle));
        }
    }

    /// Current self-rotation angle of a body.
    pub fn spin_angle(&self, id: EntityId) -> Option<f32> {
        self.spins.iter().find(|r| r.id == id).map(|r| r.angle)
    }

    /// Current orbital phase of a pivot.
    pub fn orbit_angle(&self, pivot: EntityId) -> Option<f32> {
        self.orbits.iter().find(|r| r.id == pivot).map(|r| r.angle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::{LocalTransform, Entity, Scene};

    fn frame(dt: f32) -> FrameTime {
        FrameTime { dt, ticks: dt * 60.0, frame: 1 }
    }

    #[test]
    fn orbit_angle_scales_with_multiplier_and_time() {
        let mut graph = TransformGraph::new();
        let pivot = EntityId(1);
        graph.register(pivot);
        let mut k = OrbitalKinematics::new();
        k.add_orbit(pivot, 0.01);

        k.advance(&mut graph, frame(0.5), 2.0);
        let expected = 0.01 * 2.0 * 0.5 * 60.0;
        assert!((k.orbit_angle(pivot).unwrap() - expected).abs() < 1e-6);
    }

    #[test]
    fn zero_multiplier_freezes_orbits_not_spins() {
        let mut graph = TransformGraph::new();
        let pivot = EntityId(1);
        let body = EntityId(2);
        graph.register(pivot);
        graph.attach(body, pivot, LocalTransform::new().with_offset(Vec3::X * 16.0));
        let mut k = OrbitalKinematics::new();
        k.add_orbit(pivot, 0.01);
        k.add_spin(body, 0.005);

        k.advance(&mut graph, frame(1.0), 0.0);
        assert_eq!(k.orbit_angle(pivot), Some(0.0));
        assert!((k.spin_angle(body).unwrap() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn same_elapsed_time_same_angle_regardless_of_frame_rate() {
        let pivot = EntityId(1);
        let mut coarse = OrbitalKinematics::new();
        let mut fine = OrbitalKinematics::new();
        coarse.add_orbit(pivot, 0.02);
        fine.add_orbit(pivot, 0.02);
        let mut graph = TransformGraph::new();
        graph.register(pivot);

        for _ in 0..30 {
            coarse.advance(&mut graph, frame(1.0 / 30.0), 1.0);
        }
        for _ in 0..144 {
            fine.advance(&mut graph, frame(1.0 / 144.0), 1.0);
        }
        let a = coarse.orbit_angle(pivot).unwrap();
        let b = fine.orbit_angle(pivot).unwrap();
        assert!((a - b).abs() < 1e-4, "{a} vs {b}");
    }

    #[test]
    fn negative_spin_is_retrograde() {
        let mut graph = TransformGraph::new();
        let body = EntityId(7);
        graph.register(body);
        let mut scene = Scene::new();
        scene.spawn(Entity::new(body));
        let mut k = OrbitalKinematics::new();
        k.add_spin(body, -0.005);

        k.advance(&mut graph, frame(1.0), 1.0);
        graph.propagate(&mut scene);
        let angle = k.spin_angle(body).unwrap();
        assert!((angle - (TAU - 0.3)).abs() < 1e-5);
        let forward = scene.get(body).unwrap().rotation * Vec3::X;
        // Rotating -0.3 rad about Y tips +X toward +Z.
        assert!(forward.z > 0.0);
    }

    #[test]
    fn pivot_rotation_sweeps_attached_body() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let pivot = EntityId(1);
        let body = EntityId(2);
        scene.spawn(Entity::new(pivot));
        scene.spawn(Entity::new(body));
        graph.register(pivot);
        graph.attach(body, pivot, LocalTransform::new().with_offset(Vec3::X * 10.0));
        let mut k = OrbitalKinematics::new();
        k.add_orbit(pivot, std::f32::consts::FRAC_PI_2 / 60.0);

        k.advance(&mut graph, frame(1.0), 1.0);
        graph.propagate(&mut scene);
        let pos = scene.get(body).unwrap().pos;
        assert!((pos - Vec3::new(0.0, 0.0, -10.0)).length() < 1e-4);
    }
}
