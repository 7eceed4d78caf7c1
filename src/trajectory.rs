use egui::{emath::TSTransform, Color32, Pos2};
use ringbuffer::RingBuffer;

use crate::drawable::Drawable;

pub const DEFAULT_CAPACITY: usize = 600;

const DOT_RADIUS: f32 = 3.0;

/// Recent ball positions, oldest first. Only used for drawing the trail.
#[derive(Debug)]
pub struct Trajectory {
    points: ringbuffer::AllocRingBuffer<Pos2>,
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Trajectory {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: ringbuffer::AllocRingBuffer::new(capacity.max(1)),
        }
    }

    pub fn push(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    pub fn last(&self) -> Option<Pos2> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pos2> {
        self.points.iter()
    }

    pub fn to_vec(&self) -> Vec<Pos2> {
        self.points.iter().copied().collect()
    }
}

impl Drawable for Trajectory {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        let fill = if ctx.style().visuals.dark_mode {
            Color32::from_gray(150)
        } else {
            Color32::from_gray(120)
        };

        for point in self.points.iter() {
            let center = transform.mul_pos(*point);
            painter.add(egui::Shape::circle_filled(center, DOT_RADIUS, fill));
        }
    }
}
