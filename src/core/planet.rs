use crate::core::error::{Result, SimError};

/// Constant downward acceleration for one run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityField {
    gravity_mps2: f64,
}

impl GravityField {
    pub fn new(gravity_mps2: f64) -> Result<Self> {
        if !gravity_mps2.is_finite() || gravity_mps2 <= 0.0 {
            return Err(SimError::InvalidGravity(gravity_mps2));
        }
        Ok(Self { gravity_mps2 })
    }

    pub fn gravity(&self) -> f64 {
        self.gravity_mps2
    }
}

impl Default for GravityField {
    fn default() -> Self {
        Self {
            gravity_mps2: Planet::EARTH.gravity_mps2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Planet {
    pub name: &'static str,
    pub gravity_mps2: f64,
    pub background_rgb: (u8, u8, u8),
    pub grid_line_rgb: (u8, u8, u8),
}

impl Planet {
    pub const EARTH: Planet = Planet {
        name: "Earth",
        gravity_mps2: 9.81,
        background_rgb: (230, 240, 255),
        grid_line_rgb: (0, 0, 0),
    };

    pub fn presets() -> &'static [Planet] {
        &PRESETS
    }

    pub fn by_name(name: &str) -> Option<Planet> {
        PRESETS
            .iter()
            .copied()
            .find(|planet| planet.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn field(&self) -> GravityField {
        GravityField {
            gravity_mps2: self.gravity_mps2,
        }
    }
}

static PRESETS: [Planet; 6] = [
    Planet::EARTH,
    Planet {
        name: "Moon",
        gravity_mps2: 1.62,
        background_rgb: (210, 210, 210),
        grid_line_rgb: (169, 169, 169),
    },
    Planet {
        name: "Mars",
        gravity_mps2: 3.72,
        background_rgb: (255, 200, 180),
        grid_line_rgb: (165, 42, 42),
    },
    Planet {
        name: "Venus",
        gravity_mps2: 8.87,
        background_rgb: (255, 220, 150),
        grid_line_rgb: (255, 165, 0),
    },
    Planet {
        name: "Jupiter",
        gravity_mps2: 24.79,
        background_rgb: (245, 225, 180),
        grid_line_rgb: (139, 69, 19),
    },
    Planet {
        name: "Mercury",
        gravity_mps2: 3.7,
        background_rgb: (200, 200, 200),
        grid_line_rgb: (128, 128, 128),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn earth_is_first_and_default() {
        assert_eq!(Planet::presets()[0], Planet::EARTH);
        assert_eq!(GravityField::default().gravity(), 9.81);
    }

    #[test]
    fn lookup_ignores_case_and_whitespace() {
        let moon = Planet::by_name("  mOOn ").expect("moon preset");
        assert_eq!(moon.gravity_mps2, 1.62);
        assert!(Planet::by_name("Pluto").is_none());
    }

    #[test]
    fn gravity_must_be_positive() {
        assert_eq!(GravityField::new(0.0), Err(SimError::InvalidGravity(0.0)));
        assert!(GravityField::new(f64::INFINITY).is_err());
        assert_eq!(GravityField::new(3.72).map(|g| g.gravity()), Ok(3.72));
    }

    #[test]
    fn every_preset_yields_a_valid_field() {
        for planet in Planet::presets() {
            let field = GravityField::new(planet.gravity_mps2).expect("preset gravity");
            assert_eq!(field, planet.field());
        }
    }
}
