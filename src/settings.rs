//! User-facing launch parameters, persisted between runs.

use std::ops::RangeInclusive;

use egui::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    ball::BallType,
    environment::Gravity,
    error::{Result, SettingsError},
};

pub const SPEED_RANGE: RangeInclusive<f32> = 0.0..=1000.0;
pub const ANGLE_RANGE: RangeInclusive<f32> = 0.0..=90.0;
pub const RESTITUTION_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Key under which eframe stores the settings.
pub const STORAGE_KEY: &str = "launch_settings";

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LaunchSettings {
    /// Launch speed in px/s
    pub speed: f32,
    /// Launch angle above the horizon, in degrees
    pub angle_deg: f32,
    pub gravity: Gravity,
    /// Base wall restitution, adjusted per ball type
    pub wall_restitution: f32,
    pub ball_type: BallType,
    pub show_trajectory: bool,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            speed: 400.0,
            angle_deg: 45.0,
            gravity: Gravity::Earth,
            wall_restitution: 0.7,
            ball_type: BallType::Normal,
            show_trajectory: true,
        }
    }
}

impl LaunchSettings {
    pub fn validate(self) -> Result<Self> {
        if !SPEED_RANGE.contains(&self.speed) {
            return Err(SettingsError::SpeedOutOfRange(self.speed));
        }
        if !ANGLE_RANGE.contains(&self.angle_deg) {
            return Err(SettingsError::AngleOutOfRange(self.angle_deg));
        }
        if !RESTITUTION_RANGE.contains(&self.wall_restitution) {
            return Err(SettingsError::RestitutionOutOfRange(self.wall_restitution));
        }
        Ok(self)
    }

    /// Initial velocity in screen coordinates (y grows downward).
    pub fn launch_velocity(&self) -> Vec2 {
        let angle = self.angle_deg.to_radians();
        Vec2::new(self.speed * angle.cos(), -self.speed * angle.sin())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)?.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(LaunchSettings::default().validate().is_ok());
    }

    #[test]
    fn test_launch_velocity_points_up_and_right() {
        let settings = LaunchSettings {
            speed: 400.0,
            angle_deg: 45.0,
            ..Default::default()
        };
        let v = settings.launch_velocity();
        let component = 400.0 * std::f32::consts::FRAC_1_SQRT_2;

        assert!((v.x - component).abs() < 1e-3);
        assert!((v.y + component).abs() < 1e-3);
    }

    #[test]
    fn test_flat_launch_has_no_vertical_speed() {
        let settings = LaunchSettings {
            angle_deg: 0.0,
            ..Default::default()
        };
        assert_eq!(settings.launch_velocity(), Vec2::new(400.0, -0.0));
    }

    #[test]
    fn test_out_of_range_values_are_rejected() {
        let too_fast = LaunchSettings {
            speed: 1500.0,
            ..Default::default()
        };
        assert!(matches!(
            too_fast.validate(),
            Err(SettingsError::SpeedOutOfRange(_))
        ));

        let too_steep = LaunchSettings {
            angle_deg: 120.0,
            ..Default::default()
        };
        assert!(matches!(
            too_steep.validate(),
            Err(SettingsError::AngleOutOfRange(_))
        ));

        let not_a_number = LaunchSettings {
            wall_restitution: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            not_a_number.validate(),
            Err(SettingsError::RestitutionOutOfRange(_))
        ));
    }

    #[test]
    fn test_partial_json_fills_in_defaults() {
        let settings =
            LaunchSettings::from_json(r#"{ "speed": 250.0, "ball_type": "Bouncy" }"#).unwrap();

        assert_eq!(settings.speed, 250.0);
        assert_eq!(settings.ball_type, BallType::Bouncy);
        assert_eq!(settings.angle_deg, 45.0);
        assert_eq!(settings.gravity, Gravity::Earth);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            LaunchSettings::from_json("{ speed: fast }"),
            Err(SettingsError::JsonError(_))
        ));
    }
}
