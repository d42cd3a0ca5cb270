/// User-facing and tuning configuration for the solar system.

use serde::{Deserialize, Serialize};

/// Upper bound of the orbital speed slider.
pub const MAX_ORBIT_SPEED: f32 = 5.0;

/// Values the host controls panel edits. Read every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    pub show_orbits: bool,
    orbit_speed_multiplier: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            show_orbits: true,
            orbit_speed_multiplier: 1.0,
        }
    }
}

impl SceneConfig {
    pub fn orbit_speed_multiplier(&self) -> f32 {
        self.orbit_speed_multiplier
    }

    /// Set the multiplier, clamped to `[0, MAX_ORBIT_SPEED]`. NaN becomes 0.
    pub fn set_orbit_speed_multiplier(&mut self, value: f32) {
        self.orbit_speed_multiplier = clamp_orbit_speed(value);
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

pub fn clamp_orbit_speed(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_ORBIT_SPEED)
    }
}

/// Background starfield generation and flicker tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Fraction of the stars re-rolled each frame.
    pub speed_factor: f32,
    pub base_brightness: f32,
    /// Brightness swing for normal stars.
    pub normal_intensity: f32,
    /// Brightness swing for bright stars.
    pub bright_intensity: f32,
    pub min_brightness: f32,
    /// Fraction of stars in the bright class.
    pub bright_fraction: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    pub seed: u64,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 700,
            speed_factor: 0.2,
            base_brightness: 1.0,
            normal_intensity: 0.3,
            bright_intensity: 0.7,
            min_brightness: 0.2,
            bright_fraction: 0.08,
            min_radius: 300.0,
            max_radius: 500.0,
            seed: 0x5eed_0f_57a7,
        }
    }
}

/// Camera fly-to and info overlay tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionConfig {
    /// Fly-in and fly-out duration in seconds.
    pub transition_secs: f32,
    /// Easing name, GSAP style.
    pub easing: &'static str,
    /// Focused eye distance from the body, in body radii.
    pub offset_radii: f32,
    /// Seconds per revealed info character.
    pub reveal_interval: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            transition_secs: 1.5,
            easing: "power2.inOut",
            offset_radii: 4.5,
            reveal_interval: 0.015,
        }
    }
}
