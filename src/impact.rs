use egui::{emath::TSTransform, Color32, Pos2, Vec2};
use ringbuffer::RingBuffer;

use crate::drawable::Drawable;

const LIFETIME_SECS: f32 = 2.0;

/// A point where the ball touched a boundary, shown as a fading ring.
#[derive(Clone, Copy, Debug)]
pub struct Impact {
    pub point: Pos2,
    pub normal: Vec2,
    pub time: web_time::Instant,
}

impl Impact {
    pub fn new(point: Pos2, normal: Vec2) -> Self {
        Self {
            point,
            normal,
            time: web_time::Instant::now(),
        }
    }

    pub fn age(&self, now: web_time::Instant) -> f32 {
        (now - self.time).as_secs_f32()
    }

    pub fn is_expired(&self, now: web_time::Instant) -> bool {
        self.age(now) >= LIFETIME_SECS
    }
}

impl Drawable for Impact {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        let age = self.age(web_time::Instant::now());
        let size = 4. + 10. * age;
        let opacity = 1.0 - age / LIFETIME_SECS;

        if opacity <= 0.0 {
            return;
        }

        let point = transform.mul_pos(self.point);
        let warn_colour = ctx.style().visuals.warn_fg_color;

        let stroke_colour = Color32::from_rgba_unmultiplied(
            warn_colour.r(),
            warn_colour.g(),
            warn_colour.b(),
            (255. * opacity) as u8,
        );

        let stroke = egui::Stroke::new(2.0, stroke_colour);
        painter.add(egui::Shape::circle_stroke(point, size, stroke));
        painter.line_segment([point, point + self.normal * (size + 6.)], stroke);
    }
}

pub type ImpactList = ringbuffer::AllocRingBuffer<Impact>;

/// Drops every impact that has finished fading.
pub fn prune(impacts: &mut ImpactList, now: web_time::Instant) {
    if impacts.iter().all(|impact| !impact.is_expired(now)) {
        return;
    }

    let live: Vec<Impact> = impacts
        .iter()
        .copied()
        .filter(|impact| !impact.is_expired(now))
        .collect();
    impacts.clear();
    for impact in live {
        impacts.push(impact);
    }
}
