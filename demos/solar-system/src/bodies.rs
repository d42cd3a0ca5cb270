/// Body catalog: sizes, distances, spin and orbit speeds, info card data.
///
/// Sizes and distances are scene units chosen for readability, not to scale.
/// Speeds are radians per reference tick (1/60 s).

/// Body index constants.
pub const SUN: usize = 0;
pub const MERCURY: usize = 1;
pub const VENUS: usize = 2;
pub const EARTH: usize = 3;
pub const MOON: usize = 4;
pub const MARS: usize = 5;
pub const JUPITER: usize = 6;
pub const SATURN: usize = 7;
pub const URANUS: usize = 8;
pub const NEPTUNE: usize = 9;
pub const BODY_COUNT: usize = 10;

// ── Shared speeds ────────────────────────────────────────────────────

pub const SUN_SPIN: f32 = 0.001;
pub const PLANET_SPIN: f32 = 0.005;
pub const MOON_SPIN: f32 = 0.003;

// ── Orbit paths ──────────────────────────────────────────────────────

pub const ORBIT_PATH_COLOR: u32 = 0x555555;
pub const ORBIT_PATH_TUBE: f32 = 0.01;

// ── Saturn ring fallback ─────────────────────────────────────────────

pub const RING_FALLBACK_COLOR: u32 = 0xaaaaaa;
pub const RING_FALLBACK_OPACITY: f32 = 0.5;

/// Info card fields. Absent fields are left off the card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyInfo {
    pub name: &'static str,
    pub distance_au: Option<f32>,
    pub period: Option<&'static str>,
    pub fact: Option<&'static str>,
}

/// Flat ring attached to a body, e.g. Saturn's.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingDef {
    pub inner: f32,
    pub outer: f32,
    pub texture: &'static str,
    pub opacity: f32,
}

/// Static description of one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDef {
    /// Scene tag and texture name.
    pub key: &'static str,
    pub radius: f32,
    /// Offset from the pivot along +X (0 for the sun).
    pub distance: f32,
    /// Self-rotation per tick. Negative is retrograde.
    pub spin: f32,
    /// Pivot rotation per tick; None for bodies without a pivot.
    pub orbit_speed: Option<f32>,
    /// Body whose pivot this body's pivot is nested in.
    pub parent: Option<usize>,
    /// Unlit (self-illuminated) surface.
    pub emissive: bool,
    /// Flat color used when the texture is unavailable.
    pub fallback_color: u32,
    pub ring: Option<RingDef>,
    /// Participates in hover picking and selection.
    pub selectable: bool,
    pub info: Option<BodyInfo>,
}

const fn planet(
    key: &'static str,
    radius: f32,
    distance: f32,
    orbit_speed: f32,
    fallback_color: u32,
    info: BodyInfo,
) -> BodyDef {
    BodyDef {
        key,
        radius,
        distance,
        spin: PLANET_SPIN,
        orbit_speed: Some(orbit_speed),
        parent: None,
        emissive: false,
        fallback_color,
        ring: None,
        selectable: true,
        info: Some(info),
    }
}

pub const BODIES: [BodyDef; BODY_COUNT] = [
    BodyDef {
        key: "sun",
        radius: 5.0,
        distance: 0.0,
        spin: SUN_SPIN,
        orbit_speed: None,
        parent: None,
        emissive: true,
        fallback_color: 0xffcc33,
        ring: None,
        selectable: false,
        info: None,
    },
    planet("mercury", 0.5, 8.0, 0.02, 0x9e9e9e, BodyInfo {
        name: "Mercury",
        distance_au: Some(0.39),
        period: Some("88 days"),
        fact: Some("A year on Mercury is shorter than a single Mercurian day."),
    }),
    BodyDef {
        spin: -PLANET_SPIN,
        ..planet("venus", 0.9, 12.0, 0.015, 0xe6c27a, BodyInfo {
            name: "Venus",
            distance_au: Some(0.72),
            period: Some("225 days"),
            fact: Some("Venus spins backwards, so the Sun rises in the west."),
        })
    },
    planet("earth", 1.0, 16.0, 0.01, 0x2f6fd6, BodyInfo {
        name: "Earth",
        distance_au: Some(1.0),
        period: Some("365 days"),
        fact: Some("Earth is the only known planet to harbor life."),
    }),
    BodyDef {
        key: "moon",
        radius: 0.27,
        distance: 2.0,
        spin: MOON_SPIN,
        orbit_speed: Some(0.05),
        parent: Some(EARTH),
        emissive: false,
        fallback_color: 0xbbbbbb,
        ring: None,
        selectable: false,
        info: None,
    },
    planet("mars", 0.7, 22.0, 0.008, 0xc1440e, BodyInfo {
        name: "Mars",
        distance_au: Some(1.52),
        period: Some("687 days"),
        fact: Some("Olympus Mons on Mars is the tallest volcano in the solar system."),
    }),
    planet("jupiter", 3.5, 35.0, 0.004, 0xd8ca9d, BodyInfo {
        name: "Jupiter",
        distance_au: Some(5.2),
        period: Some("11.86 years"),
        fact: Some("The Great Red Spot is a storm larger than Earth."),
    }),
    BodyDef {
        ring: Some(RingDef { inner: 3.8, outer: 6.0, texture: "saturn_ring", opacity: 0.8 }),
        ..planet("saturn", 3.0, 50.0, 0.003, 0xe3d9a6, BodyInfo {
            name: "Saturn",
            distance_au: Some(9.58),
            period: Some("29.46 years"),
            fact: Some("Saturn is less dense than water."),
        })
    },
    planet("uranus", 2.0, 65.0, 0.002, 0x9fd9e0, BodyInfo {
        name: "Uranus",
        distance_au: Some(19.2),
        period: Some("84 years"),
        fact: Some("Uranus rotates on its side, tilted by about 98 degrees."),
    }),
    planet("neptune", 1.9, 75.0, 0.0015, 0x3e54e8, BodyInfo {
        name: "Neptune",
        distance_au: Some(30.05),
        period: Some("164.8 years"),
        fact: Some("Neptune has the strongest winds measured in the solar system."),
    }),
];

impl BodyInfo {
    /// Info card text for a body of the given radius.
    pub fn describe(&self, radius: f32) -> String {
        let mut text = format!("--- {} ---\n\n", self.name);
        if let Some(distance) = self.distance_au {
            text.push_str(&format!("Distance: {distance} AU\n"));
        }
        if radius > 0.0 {
            text.push_str(&format!("Radius: {radius} units\n"));
        }
        if let Some(period) = self.period {
            text.push_str(&format!("Orbital Period: {period}\n"));
        }
        if let Some(fact) = self.fact {
            text.push_str(&format!("\nFact: {fact}\n"));
        }
        text
    }
}

/// Index of the body with `key`.
pub fn index_of(key: &str) -> Option<usize> {
    BODIES.iter().position(|b| b.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eight_selectable_planets() {
        let names: Vec<_> = BODIES
            .iter()
            .filter(|b| b.selectable)
            .filter_map(|b| b.info.map(|i| i.name))
            .collect();
        assert_eq!(names.len(), 8);
        assert!(!BODIES[SUN].selectable);
        assert!(!BODIES[MOON].selectable);
    }

    #[test]
    fn venus_is_retrograde() {
        assert!(BODIES[VENUS].spin < 0.0);
        for (i, body) in BODIES.iter().enumerate() {
            if body.selectable && i != VENUS {
                assert_eq!(body.spin, PLANET_SPIN);
            }
        }
    }

    #[test]
    fn moon_nests_in_earth() {
        assert_eq!(BODIES[MOON].parent, Some(EARTH));
        assert_eq!(index_of("saturn"), Some(SATURN));
        assert!(BODIES[SATURN].ring.is_some());
    }

    #[test]
    fn earth_card_format() {
        let earth = &BODIES[EARTH];
        let text = earth.info.unwrap().describe(earth.radius);
        assert_eq!(
            text,
            "--- Earth ---\n\nDistance: 1 AU\nRadius: 1 units\nOrbital Period: 365 days\n\n\
             Fact: Earth is the only known planet to harbor life.\n"
        );
    }

    #[test]
    fn absent_fields_are_omitted() {
        let info = BodyInfo { name: "Rock", distance_au: None, period: None, fact: None };
        assert_eq!(info.describe(0.0), "--- Rock ---\n\n");
    }
}
