//! Headless runs: fire once and record the flight until the ball settles.

use serde::{Deserialize, Serialize};

use crate::{
    environment::Environment,
    error::{Result, SettingsError},
    settings::LaunchSettings,
    simulation::Simulation,
};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TraceConfig {
    pub settings: LaunchSettings,
    pub width: f32,
    pub height: f32,
    pub max_ticks: u64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            settings: LaunchSettings::default(),
            width: 800.0,
            height: 600.0,
            max_ticks: 10_000,
        }
    }
}

impl TraceConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str::<Self>(json)?.validate()
    }

    pub fn validate(self) -> Result<Self> {
        let settings = self.settings.validate()?;
        let radius = settings
            .ball_type
            .params(settings.wall_restitution)
            .radius;

        // NaN fails both comparisons and is rejected here too
        let fits = |extent: f32| extent >= 2.0 * radius;
        if !(fits(self.width) && fits(self.height)) {
            return Err(SettingsError::ViewportTooSmall {
                width: self.width,
                height: self.height,
                radius,
            });
        }

        Ok(Self { settings, ..self })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl From<egui::Pos2> for Point {
    fn from(pos: egui::Pos2) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

impl From<egui::Vec2> for Point {
    fn from(vec: egui::Vec2) -> Self {
        Self { x: vec.x, y: vec.y }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceReport {
    pub ticks: u64,
    pub finished: bool,
    pub final_position: Point,
    pub final_velocity: Point,
    pub trajectory: Vec<Point>,
}

/// Fires a single launch and ticks until the ball rests or `max_ticks` runs out.
pub fn run(config: TraceConfig) -> Result<TraceReport> {
    let config = config.validate()?;

    let env = Environment::new(config.settings.gravity, config.width, config.height);
    let mut simulation = Simulation::new(config.settings, env);
    simulation.fire();

    let mut finished = false;
    while simulation.tick_counter < config.max_ticks {
        if !simulation.tick() {
            finished = true;
            break;
        }
    }

    if !finished {
        log::warn!(
            "Ball still moving after {} ticks, stopping the trace",
            config.max_ticks
        );
    }

    let ball = simulation.ball();
    Ok(TraceReport {
        ticks: simulation.tick_counter,
        finished,
        final_position: ball.center.into(),
        final_velocity: ball.velocity.into(),
        trajectory: simulation
            .trajectory()
            .iter()
            .map(|p| Point::from(*p))
            .collect(),
    })
}
