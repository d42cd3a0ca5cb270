// extensions/easing.rs
//
// Easing curves for camera and overlay transitions.
// No dependencies on Entity/Scene: just math.

use std::f32::consts::PI;
use glam::Vec3;

/// Easing function type. Names follow the GSAP "powerN" family:
/// power1 = Quad, power2 = Cubic, power3 = Quart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant velocity (no easing).
    #[default]
    Linear,
    /// Slow start.
    QuadIn,
    /// Slow end.
    QuadOut,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start and end.
    CubicInOut,
    /// Very strong slow start and end.
    QuartInOut,
    /// Sine wave easing (smooth).
    SineInOut,
}

impl Easing {
    /// Apply the easing function to a normalized time value `t`.
    /// Input is clamped to [0, 1]; output hits exactly 0 and 1 at the ends.
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadIn => t * t,
            Easing::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::QuadInOut => in_out(t, 2),
            Easing::CubicInOut => in_out(t, 3),
            Easing::QuartInOut => in_out(t, 4),
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }

    /// Parse a GSAP-style ease name ("power2.inOut", "sine.inOut", "none").
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" | "linear" => Some(Easing::Linear),
            "power1.in" => Some(Easing::QuadIn),
            "power1.out" => Some(Easing::QuadOut),
            "power1.inOut" => Some(Easing::QuadInOut),
            "power2.inOut" => Some(Easing::CubicInOut),
            "power3.inOut" => Some(Easing::QuartInOut),
            "sine.inOut" => Some(Easing::SineInOut),
            _ => None,
        }
    }
}

/// Symmetric polynomial ease-in-out of the given power.
#[inline]
fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Interpolate with easing.
#[inline]
pub fn ease(a: f32, b: f32, t: f32, easing: Easing) -> f32 {
    lerp(a, b, easing.apply(t))
}

/// Interpolate Vec3 with easing. Returns `b` exactly once `t` reaches 1,
/// so chained transitions land on their recorded endpoints bit-for-bit.
#[inline]
pub fn ease_vec3(a: Vec3, b: Vec3, t: f32, easing: Easing) -> Vec3 {
    if t >= 1.0 {
        return b;
    }
    a.lerp(b, easing.apply(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::QuadIn,
            Easing::QuadOut,
            Easing::QuadInOut,
            Easing::CubicInOut,
            Easing::QuartInOut,
            Easing::SineInOut,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-6, "{:?} at 0", easing);
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-6, "{:?} at 1", easing);
        }
    }

    #[test]
    fn in_out_is_symmetric_at_midpoint() {
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
        assert!(Easing::CubicInOut.apply(0.25) < 0.25);
        assert!(Easing::CubicInOut.apply(0.75) > 0.75);
    }

    #[test]
    fn gsap_names_resolve() {
        assert_eq!(Easing::from_name("power2.inOut"), Some(Easing::CubicInOut));
        assert_eq!(Easing::from_name("bogus"), None);
    }

    #[test]
    fn ease_vec3_snaps_to_end() {
        let a = Vec3::new(0.1, 0.2, 0.3);
        let b = Vec3::new(50.7, -3.3, 17.9);
        assert_eq!(ease_vec3(a, b, 1.0, Easing::CubicInOut), b);
        assert_eq!(ease_vec3(a, b, 0.0, Easing::CubicInOut), a);
    }

    #[test]
    fn ease_interpolates() {
        let result = ease(100.0, 200.0, 0.5, Easing::Linear);
        assert!((result - 150.0).abs() < 0.001);
    }
}
