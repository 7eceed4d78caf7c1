//! Errors raised while loading or validating launch settings.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("speed {0} px/s is outside 0..=1000")]
    SpeedOutOfRange(f32),

    #[error("launch angle {0}° is outside 0..=90")]
    AngleOutOfRange(f32),

    #[error("wall restitution {0} is outside 0..=1")]
    RestitutionOutOfRange(f32),

    #[error("viewport {width}x{height} cannot fit a ball of radius {radius}")]
    ViewportTooSmall { width: f32, height: f32, radius: f32 },

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;
