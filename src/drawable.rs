use egui::{emath::TSTransform, Rect};

/// Anything that can paint itself onto the simulation canvas.
///
/// Implementors work in simulation coordinates (pixels, origin at the top-left of the
/// canvas, y down) and map them to screen space through `transform`.
pub trait Drawable {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform);
}

/// Maps simulation coordinates onto a canvas allocated at `rect`.
pub fn canvas_transform(rect: Rect) -> TSTransform {
    TSTransform {
        scaling: 1.0,
        translation: rect.min.to_vec2(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Pos2;

    #[test]
    fn test_canvas_origin_maps_to_rect_corner() {
        let rect = Rect::from_min_max(Pos2::new(10.0, 40.0), Pos2::new(610.0, 440.0));
        let transform = canvas_transform(rect);

        assert_eq!(transform.mul_pos(Pos2::ZERO), rect.min);
        assert_eq!(transform.mul_pos(Pos2::new(600.0, 400.0)), rect.max);
    }
}
