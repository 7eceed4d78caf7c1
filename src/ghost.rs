//! Undamped preview of the flight path, drawn before the ball is fired.

use egui::{emath::TSTransform, Pos2, Vec2};

use crate::{drawable::Drawable, environment::Environment};

/// About ten seconds of flight at the fixed timestep.
pub const MAX_STEPS: usize = 600;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GhostPath {
    pub points: Vec<Pos2>,
}

impl GhostPath {
    /// Integrates from `start` with no collisions until the path leaves the
    /// viewport through the floor or either side.
    pub fn compute(start: Pos2, velocity: Vec2, env: &Environment) -> Self {
        let mut position = start;
        let mut velocity = velocity;
        let mut points = Vec::with_capacity(MAX_STEPS);

        for _ in 0..MAX_STEPS {
            velocity.y += env.gravity * env.dt;
            position += velocity * env.dt;

            if position.y > env.height || position.x < 0.0 || position.x > env.width {
                break;
            }

            points.push(position);
        }

        Self { points }
    }
}

impl Drawable for GhostPath {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        if self.points.len() < 2 {
            return;
        }

        let points: Vec<Pos2> = self.points.iter().map(|p| transform.mul_pos(*p)).collect();
        let stroke = egui::Stroke::new(1.5, ctx.style().visuals.weak_text_color());

        painter.extend(egui::Shape::dashed_line(&points, stroke, 6.0, 4.0));
    }
}
