use egui::{Color32, RichText};
use ringbuffer::RingBuffer;

use crate::{
    ball::BallType,
    drawable::{canvas_transform, Drawable},
    environment::{Environment, Gravity},
    settings::{self, LaunchSettings},
    simulation::{Phase, Simulation},
};

#[derive(Debug)]
pub struct App {
    target_frame_rate: f32,
    previous_frame_times: ringbuffer::AllocRingBuffer<web_time::Instant>,
    simulation: Simulation,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let stored: Option<LaunchSettings> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, settings::STORAGE_KEY));

        let settings = match stored.map(LaunchSettings::validate) {
            Some(Ok(settings)) => settings,
            Some(Err(err)) => {
                log::warn!("Ignoring stored launch settings: {err}");
                LaunchSettings::default()
            }
            None => LaunchSettings::default(),
        };

        Self::with_settings(settings)
    }

    pub fn with_settings(settings: LaunchSettings) -> Self {
        let simulation = Simulation::new(settings, Environment::default());

        Self {
            target_frame_rate: 1.0 / simulation.env.dt,
            previous_frame_times: ringbuffer::AllocRingBuffer::new(128),
            simulation,
        }
    }

    fn compute_fps(&self) -> f32 {
        if self.previous_frame_times.len() < 2 {
            return self.target_frame_rate;
        }

        let (Some(first), Some(last)) = (
            self.previous_frame_times.front(),
            self.previous_frame_times.back(),
        ) else {
            return self.target_frame_rate;
        };
        let elapsed_secs = (*last - *first).as_secs_f32();
        if elapsed_secs <= 0.0 {
            return self.target_frame_rate;
        }

        (self.previous_frame_times.len() as f32 - 1.0) / elapsed_secs
    }

    fn draw_chrome(&mut self, ctx: &egui::Context, fps: f32) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.heading("Projectile Motion");
                ui.add_space(16.0);
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });

        egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("FPS: {:.0}", fps.round()));
                ui.separator();
                ui.label(self.status_text());
                egui::warn_if_debug_build(ui);
            });
        });
    }

    fn status_text(&self) -> String {
        let ball = self.simulation.ball();
        let phase = match self.simulation.phase {
            Phase::Ready => "Ready",
            Phase::Running => "Flying",
            Phase::Paused => "Paused",
            Phase::Finished => "At rest",
        };

        format!(
            "{phase} | x {:.0} y {:.0} | vx {:.0} vy {:.0} | ticks {}",
            ball.center.x,
            ball.center.y,
            ball.velocity.x,
            ball.velocity.y,
            self.simulation.tick_counter
        )
    }

    fn draw_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("controls")
            .show_separator_line(false)
            .show(ctx, |ui| {
                let mut launch = self.simulation.settings;

                ui.horizontal_wrapped(|ui| {
                    ui.label("Speed:");
                    ui.add(
                        egui::DragValue::new(&mut launch.speed)
                            .range(settings::SPEED_RANGE)
                            .speed(50.0)
                            .suffix(" px/s"),
                    );

                    ui.label("Angle:");
                    ui.add(
                        egui::DragValue::new(&mut launch.angle_deg)
                            .range(settings::ANGLE_RANGE)
                            .speed(5.0)
                            .suffix(" °"),
                    );

                    ui.label("Gravity:");
                    egui::ComboBox::from_id_salt("gravity")
                        .selected_text(launch.gravity.label())
                        .show_ui(ui, |ui| {
                            for gravity in Gravity::ALL {
                                ui.selectable_value(&mut launch.gravity, gravity, gravity.label());
                            }
                        });

                    ui.label("Wall Restitution:");
                    ui.add(
                        egui::DragValue::new(&mut launch.wall_restitution)
                            .range(settings::RESTITUTION_RANGE)
                            .speed(0.05)
                            .suffix(" bounce"),
                    )
                    .on_hover_text("Fraction of speed kept after hitting a wall or the ceiling");

                    ui.label("Ball type:");
                    egui::ComboBox::from_id_salt("ball_type")
                        .selected_text(launch.ball_type.label())
                        .show_ui(ui, |ui| {
                            for ball_type in BallType::ALL {
                                ui.selectable_value(
                                    &mut launch.ball_type,
                                    ball_type,
                                    ball_type.label(),
                                );
                            }
                        });
                });

                self.apply_settings(launch);

                ui.horizontal(|ui| {
                    let fire_button = ui.add_sized(
                        egui::vec2(80.0, 32.0),
                        egui::Button::new(RichText::new("Fire").strong().color(Color32::BLACK))
                            .fill(Color32::LIGHT_GREEN),
                    );
                    if fire_button.clicked() {
                        self.simulation.fire();
                    }

                    let pause_button = ui.add_enabled(
                        self.simulation.is_running(),
                        egui::Button::new("Pause").min_size(egui::vec2(80.0, 32.0)),
                    );
                    if pause_button.clicked() {
                        self.simulation.pause();
                    }

                    if ui
                        .add_sized(egui::vec2(80.0, 32.0), egui::Button::new("Reset"))
                        .clicked()
                    {
                        self.simulation.reset();
                    }

                    let mut show_trajectory = self.simulation.settings.show_trajectory;
                    if ui
                        .checkbox(&mut show_trajectory, "Show trajectory")
                        .changed()
                    {
                        self.simulation.set_show_trajectory(show_trajectory);
                    }
                });
            });
    }

    fn apply_settings(&mut self, settings: LaunchSettings) {
        let simulation = &mut self.simulation;
        simulation.set_speed(settings.speed);
        simulation.set_angle(settings.angle_deg);
        simulation.set_gravity(settings.gravity);
        simulation.set_wall_restitution(settings.wall_restitution);
        simulation.set_ball_type(settings.ball_type);
    }

    fn draw_canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let available_size = ui.available_size();

            // Allocate a painting region that takes up the remaining space
            let (response, painter) = ui.allocate_painter(available_size, egui::Sense::hover());
            let canvas_rect = response.rect;

            self.simulation
                .set_viewport(canvas_rect.width(), canvas_rect.height());

            let background = if ctx.style().visuals.dark_mode {
                Color32::from_gray(30)
            } else {
                Color32::from_gray(240)
            };
            painter.rect_filled(canvas_rect, 0.0, background);

            let ground_y = canvas_rect.bottom() - 1.0;
            painter.line_segment(
                [
                    egui::pos2(canvas_rect.left(), ground_y),
                    egui::pos2(canvas_rect.right(), ground_y),
                ],
                egui::Stroke::new(1.0, Color32::from_gray(180)),
            );

            self.simulation
                .draw(ctx, &painter, canvas_transform(canvas_rect));
        });
    }
}

impl eframe::App for App {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, settings::STORAGE_KEY, &self.simulation.settings);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = web_time::Instant::now();
        self.previous_frame_times.push(now);
        let fps = self.compute_fps();

        self.draw_chrome(ctx, fps);
        self.draw_controls(ctx);
        self.draw_canvas(ctx);

        let phase = self.simulation.update(now);
        if phase == Phase::Running || !self.simulation.impacts.is_empty() {
            // Schedule a repaint at the next tick
            ctx.request_repaint_after(web_time::Duration::from_secs_f32(
                1.0 / self.target_frame_rate,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_changes_reach_the_simulation() {
        let mut app = App::with_settings(LaunchSettings::default());

        app.apply_settings(LaunchSettings {
            speed: 250.0,
            angle_deg: 30.0,
            gravity: Gravity::Mars,
            wall_restitution: 0.5,
            ball_type: BallType::Bouncy,
            show_trajectory: true,
        });

        let simulation = &app.simulation;
        assert_eq!(simulation.settings.speed, 250.0);
        assert_eq!(simulation.settings.angle_deg, 30.0);
        assert_eq!(simulation.env.gravity, Gravity::Mars.pixels());
        assert_eq!(simulation.ball().radius(), 16.0);
        assert!((simulation.ball().params.wall_restitution - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_fps_defaults_to_target_before_two_frames() {
        let app = App::with_settings(LaunchSettings::default());
        assert_eq!(app.compute_fps(), app.target_frame_rate);
    }
}
