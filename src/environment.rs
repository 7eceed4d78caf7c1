use serde::{Deserialize, Serialize};

/// Fixed physics timestep in seconds.
pub const DT: f32 = 0.016;

/// Pixel acceleration that stands in for Earth's gravity.
pub const EARTH_GRAVITY_PX: f32 = 800.0;

const EARTH_GRAVITY: f32 = 9.81;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Gravity {
    #[default]
    Earth,
    Moon,
    Mars,
}

impl Gravity {
    pub const ALL: [Gravity; 3] = [Gravity::Earth, Gravity::Moon, Gravity::Mars];

    /// Surface gravity in m/s².
    pub fn real(self) -> f32 {
        match self {
            Gravity::Earth => EARTH_GRAVITY,
            Gravity::Moon => 1.62,
            Gravity::Mars => 3.71,
        }
    }

    /// Surface gravity scaled so that Earth maps to [`EARTH_GRAVITY_PX`].
    pub fn pixels(self) -> f32 {
        match self {
            Gravity::Earth => EARTH_GRAVITY_PX,
            other => other.real() * (EARTH_GRAVITY_PX / EARTH_GRAVITY),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gravity::Earth => "Earth (9.81 m/s²)",
            Gravity::Moon => "Moon (1.62 m/s²)",
            Gravity::Mars => "Mars (3.71 m/s²)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub gravity: f32,
    pub width: f32,
    pub height: f32,
    pub dt: f32,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            gravity: EARTH_GRAVITY_PX,
            width: 800.0,
            height: 600.0,
            dt: DT,
        }
    }
}

impl Environment {
    pub fn new(gravity: Gravity, width: f32, height: f32) -> Self {
        Self {
            gravity: gravity.pixels(),
            width,
            height,
            dt: DT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earth_is_exactly_the_pixel_constant() {
        assert_eq!(Gravity::Earth.pixels(), EARTH_GRAVITY_PX);
    }

    #[test]
    fn test_other_bodies_scale_with_earth() {
        let scale = EARTH_GRAVITY_PX / 9.81;
        assert!((Gravity::Moon.pixels() - 1.62 * scale).abs() < 1e-3);
        assert!((Gravity::Mars.pixels() - 3.71 * scale).abs() < 1e-3);
        assert!(Gravity::Moon.pixels() < Gravity::Mars.pixels());
    }
}
