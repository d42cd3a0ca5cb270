/// Background starfield with per-frame brightness flicker.
///
/// Displayed color is always `base_color * brightness`; the base colors never
/// change, so repeated flicker cannot drift or compound.

use glam::Vec3;
use orrery_engine::{Color, PointBuffer, PointInstance, Rng};
use std::f32::consts::TAU;

use crate::config::StarfieldConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerClass {
    Normal,
    Bright,
}

pub struct Starfield {
    config: StarfieldConfig,
    positions: Vec<Vec3>,
    base_colors: Vec<Color>,
    colors: Vec<Color>,
    brightness: Vec<f32>,
    classes: Vec<FlickerClass>,
    rng: Rng,
}

impl Starfield {
    pub fn new(config: StarfieldConfig) -> Self {
        let mut rng = Rng::new(config.seed);
        let count = config.count;

        let mut positions = Vec::with_capacity(count);
        let mut base_colors = Vec::with_capacity(count);
        for _ in 0..count {
            // Uniform direction on the unit sphere, radius within the shell.
            let z = rng.signed_unit();
            let phi = rng.range(0.0, TAU);
            let ring = (1.0 - z * z).max(0.0).sqrt();
            let radius = rng.range(config.min_radius, config.max_radius);
            positions.push(Vec3::new(ring * phi.cos(), z, ring * phi.sin()) * radius);

            let tint = rng.next_f32();
            let color = if tint < 0.15 {
                Color::new(0.8, 0.87, 1.0)
            } else if tint < 0.3 {
                Color::new(1.0, 0.95, 0.8)
            } else {
                Color::WHITE
            };
            base_colors.push(color);
        }

        // Exactly round(count * fraction) bright stars, chosen by partial shuffle.
        let bright = ((count as f32 * config.bright_fraction).round() as usize).min(count);
        let mut order: Vec<usize> = (0..count).collect();
        for i in 0..bright {
            let j = i + rng.next_index(count - i);
            order.swap(i, j);
        }
        let mut classes = vec![FlickerClass::Normal; count];
        for &i in &order[..bright] {
            classes[i] = FlickerClass::Bright;
        }

        let brightness = vec![config.base_brightness; count];
        let colors = base_colors
            .iter()
            .map(|c| c.scaled(config.base_brightness))
            .collect();

        Self {
            config,
            positions,
            base_colors,
            colors,
            brightness,
            classes,
            rng,
        }
    }

    /// Stars re-rolled per frame: `max(1, floor(count * speed_factor))`.
    pub fn flickers_per_frame(&self) -> usize {
        if self.positions.is_empty() {
            return 0;
        }
        let n = (self.positions.len() as f64 * self.config.speed_factor as f64).floor() as usize;
        n.max(1)
    }

    /// Re-roll the brightness of a random subset of stars (with replacement).
    /// Returns the number of color writes. No writes when `dt <= 0`.
    pub fn advance(&mut self, dt: f32) -> usize {
        if dt.is_nan() || dt <= 0.0 {
            return 0;
        }
        let writes = self.flickers_per_frame();
        for _ in 0..writes {
            let i = self.rng.next_index(self.positions.len());
            let intensity = match self.classes[i] {
                FlickerClass::Normal => self.config.normal_intensity,
                FlickerClass::Bright => self.config.bright_intensity,
            };
            let b = (self.config.base_brightness + self.rng.signed_unit() * intensity)
                .max(self.config.min_brightness);
            self.brightness[i] = b;
            self.colors[i] = self.base_colors[i].scaled(b);
        }
        writes
    }

    /// Append every star to the point buffer.
    pub fn push_points(&self, points: &mut PointBuffer) {
        for (pos, color) in self.positions.iter().zip(&self.colors) {
            points.push(PointInstance {
                pos: pos.to_array(),
                color: color.to_array(),
            });
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, i: usize) -> Vec3 {
        self.positions[i]
    }

    pub fn base_color(&self, i: usize) -> Color {
        self.base_colors[i]
    }

    pub fn color(&self, i: usize) -> Color {
        self.colors[i]
    }

    pub fn brightness(&self, i: usize) -> f32 {
        self.brightness[i]
    }

    pub fn class(&self, i: usize) -> FlickerClass {
        self.classes[i]
    }

    pub fn config(&self) -> &StarfieldConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
    }

    #[test]
    fn default_field_writes_140_per_frame() {
        let mut stars = Starfield::new(StarfieldConfig::default());
        assert_eq!(stars.len(), 700);
        assert_eq!(stars.flickers_per_frame(), 140);
        assert_eq!(stars.advance(1.0 / 60.0), 140);
    }

    #[test]
    fn at_least_one_flicker() {
        let config = StarfieldConfig { count: 3, speed_factor: 0.1, ..Default::default() };
        assert_eq!(Starfield::new(config).flickers_per_frame(), 1);
        let empty = StarfieldConfig { count: 0, ..Default::default() };
        let mut none = Starfield::new(empty);
        assert_eq!(none.advance(0.1), 0);
    }

    #[test]
    fn non_positive_dt_writes_nothing() {
        let mut stars = Starfield::new(StarfieldConfig::default());
        let before: Vec<Color> = (0..stars.len()).map(|i| stars.color(i)).collect();
        assert_eq!(stars.advance(0.0), 0);
        assert_eq!(stars.advance(-1.0), 0);
        assert_eq!(stars.advance(f32::NAN), 0);
        for (i, c) in before.iter().enumerate() {
            assert_eq!(stars.color(i), *c);
        }
    }

    #[test]
    fn color_is_base_times_brightness_after_many_frames() {
        let mut stars = Starfield::new(StarfieldConfig::default());
        for _ in 0..500 {
            stars.advance(1.0 / 60.0);
        }
        let min = stars.config().min_brightness;
        for i in 0..stars.len() {
            let b = stars.brightness(i);
            assert!(b >= min);
            assert!(close(stars.color(i), stars.base_color(i).scaled(b)));
        }
    }

    #[test]
    fn swing_depends_on_class() {
        let mut stars = Starfield::new(StarfieldConfig::default());
        for _ in 0..500 {
            stars.advance(1.0 / 60.0);
        }
        let config = *stars.config();
        for i in 0..stars.len() {
            let b = stars.brightness(i);
            let limit = match stars.class(i) {
                FlickerClass::Normal => config.normal_intensity,
                FlickerClass::Bright => config.bright_intensity,
            };
            assert!(b <= config.base_brightness + limit + 1e-6);
        }
    }

    #[test]
    fn bright_fraction_and_shell() {
        let stars = Starfield::new(StarfieldConfig::default());
        let bright = (0..stars.len()).filter(|&i| stars.class(i) == FlickerClass::Bright).count();
        assert_eq!(bright, 56);
        for i in 0..stars.len() {
            let r = stars.position(i).length();
            assert!((299.9..=500.1).contains(&r), "radius {r}");
        }
    }

    #[test]
    fn same_seed_same_sky() {
        let a = Starfield::new(StarfieldConfig::default());
        let b = Starfield::new(StarfieldConfig::default());
        for i in 0..a.len() {
            assert_eq!(a.position(i), b.position(i));
        }
    }

    #[test]
    fn push_points_emits_every_star() {
        let stars = Starfield::new(StarfieldConfig { count: 10, ..Default::default() });
        let mut buffer = PointBuffer::with_capacity(10);
        stars.push_points(&mut buffer);
        assert_eq!(buffer.point_count(), 10);
    }
}
