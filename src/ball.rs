use egui::{emath::TSTransform, Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

use crate::drawable::Drawable;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum BallType {
    #[default]
    Normal,
    Heavy,
    Bouncy,
}

/// Physical parameters that depend on the kind of ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallParams {
    pub radius: f32,
    pub floor_restitution: f32,
    pub floor_friction: f32,
    pub wall_restitution: f32,
    pub color: Color32,
}

impl BallType {
    pub const ALL: [BallType; 3] = [BallType::Normal, BallType::Heavy, BallType::Bouncy];

    pub fn label(self) -> &'static str {
        match self {
            BallType::Normal => "Normal",
            BallType::Heavy => "Heavy",
            BallType::Bouncy => "Bouncy",
        }
    }

    /// Parameters for this ball type given the user's base wall restitution.
    pub fn params(self, wall_restitution: f32) -> BallParams {
        match self {
            BallType::Normal => BallParams {
                radius: 20.0,
                floor_restitution: 0.7,
                floor_friction: 0.98,
                wall_restitution,
                color: Color32::from_rgb(80, 160, 255),
            },
            BallType::Heavy => BallParams {
                radius: 24.0,
                floor_restitution: 0.45,
                floor_friction: 0.90,
                wall_restitution: wall_restitution * 0.8,
                color: Color32::from_rgb(50, 80, 140),
            },
            BallType::Bouncy => BallParams {
                radius: 16.0,
                floor_restitution: 0.9,
                floor_friction: 0.995,
                wall_restitution: (wall_restitution * 1.2).min(1.0),
                color: Color32::from_rgb(255, 140, 0),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub center: Pos2,
    pub velocity: Vec2,
    pub params: BallParams,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(BallType::Normal, Pos2::new(100.0, 300.0), 0.7)
    }
}

impl Ball {
    pub fn new(ball_type: BallType, center: Pos2, wall_restitution: f32) -> Self {
        Self {
            center,
            velocity: Vec2::ZERO,
            params: ball_type.params(wall_restitution),
        }
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    /// Semi-implicit Euler: velocity first, then position with the new velocity.
    pub fn integrate(&mut self, dt: f32, gravity: f32) {
        self.velocity.y += gravity * dt;
        self.center += self.velocity * dt;
    }
}

impl Drawable for Ball {
    fn draw(&self, _ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        let center = transform.mul_pos(self.center);
        let radius = self.params.radius * transform.scaling;

        painter.add(egui::Shape::circle_filled(center, radius, self.params.color));
    }
}
