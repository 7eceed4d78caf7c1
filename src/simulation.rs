use egui::{emath::TSTransform, Pos2, Vec2};
use ringbuffer::RingBuffer;

use crate::{
    ball::{Ball, BallType},
    drawable::Drawable,
    environment::{Environment, Gravity},
    ghost::GhostPath,
    impact::{self, Impact, ImpactList},
    scheduler::{TickScheduler, DEFAULT_MAX_TICKS_PER_FRAME},
    settings::LaunchSettings,
    stepper::{self, SimulationState},
    trajectory::Trajectory,
};

pub const INITIAL_POSITION: Pos2 = Pos2::new(100.0, 300.0);

const MAX_IMPACTS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting at the launch position with the ghost path shown.
    Ready,
    Running,
    Paused,
    /// The ball has settled on the floor.
    Finished,
}

#[derive(Debug)]
pub struct Simulation {
    pub state: SimulationState,
    pub env: Environment,
    pub settings: LaunchSettings,
    pub phase: Phase,
    pub impacts: ImpactList,
    pub tick_counter: u64,
    scheduler: TickScheduler,
    last_update: Option<web_time::Instant>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(LaunchSettings::default(), Environment::default())
    }
}

impl Simulation {
    pub fn new(settings: LaunchSettings, env: Environment) -> Self {
        let ball = Ball::new(settings.ball_type, INITIAL_POSITION, settings.wall_restitution);

        Self {
            state: SimulationState::new(ball, Trajectory::default()),
            env: Environment {
                gravity: settings.gravity.pixels(),
                ..env
            },
            settings,
            phase: Phase::Ready,
            impacts: ImpactList::new(MAX_IMPACTS),
            tick_counter: 0,
            scheduler: TickScheduler::new(env.dt, DEFAULT_MAX_TICKS_PER_FRAME),
            last_update: None,
        }
    }

    pub fn ball(&self) -> &Ball {
        &self.state.ball
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.state.trajectory
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn shows_ghost(&self) -> bool {
        matches!(self.phase, Phase::Ready | Phase::Finished)
    }

    /// Launches from wherever the ball currently is.
    pub fn fire(&mut self) {
        self.state.trajectory.clear();
        self.impacts.clear();
        self.apply_ball_type();
        self.state.ball.velocity = self.settings.launch_velocity();
        self.tick_counter = 0;
        self.scheduler.reset();
        self.last_update = None;
        self.phase = Phase::Running;

        log::info!(
            "Fired {} ball at {:.0} px/s, {:.0}° from {:?}",
            self.settings.ball_type.label(),
            self.settings.speed,
            self.settings.angle_deg,
            self.state.ball.center
        );
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            self.phase = Phase::Paused;
            self.last_update = None;
            log::debug!("Paused after {} ticks", self.tick_counter);
        }
    }

    pub fn reset(&mut self) {
        self.state.ball.center = INITIAL_POSITION;
        self.state.ball.velocity = Vec2::ZERO;
        self.state.trajectory.clear();
        self.impacts.clear();
        self.apply_ball_type();
        self.tick_counter = 0;
        self.scheduler.reset();
        self.last_update = None;
        self.phase = Phase::Ready;

        log::info!("Simulation reset");
    }

    pub fn set_ball_type(&mut self, ball_type: BallType) {
        if self.settings.ball_type != ball_type {
            log::debug!("Ball type -> {}", ball_type.label());
            self.settings.ball_type = ball_type;
            self.apply_ball_type();
        }
    }

    pub fn set_wall_restitution(&mut self, wall_restitution: f32) {
        if self.settings.wall_restitution != wall_restitution {
            log::debug!("Wall restitution -> {wall_restitution}");
            self.settings.wall_restitution = wall_restitution;
            self.apply_ball_type();
        }
    }

    pub fn set_gravity(&mut self, gravity: Gravity) {
        if self.settings.gravity != gravity {
            log::debug!("Gravity -> {}", gravity.label());
            self.settings.gravity = gravity;
        }
        self.env.gravity = gravity.pixels();
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.settings.speed = speed;
    }

    pub fn set_angle(&mut self, angle_deg: f32) {
        self.settings.angle_deg = angle_deg;
    }

    pub fn set_show_trajectory(&mut self, show: bool) {
        self.settings.show_trajectory = show;
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.env.width = width;
        self.env.height = height;
    }

    /// Runs a single fixed tick. Returns `false` once the ball has come to rest.
    pub fn tick(&mut self) -> bool {
        let report = stepper::step(&mut self.state, &self.env);
        self.tick_counter += 1;

        for (point, normal) in report.contacts.points(&self.state.ball, &self.env) {
            self.impacts.push(Impact::new(point, normal));
        }

        if !report.active {
            self.phase = Phase::Finished;
            log::info!(
                "Ball came to rest at {:?} after {} ticks",
                self.state.ball.center,
                self.tick_counter
            );
        }

        report.active
    }

    /// Catches up on the ticks that have elapsed since the previous call.
    pub fn update(&mut self, now: web_time::Instant) -> Phase {
        impact::prune(&mut self.impacts, now);

        if self.phase != Phase::Running {
            return self.phase;
        }

        // The first frame after firing moves the ball straight away
        let ticks = match self.last_update {
            Some(previous) => self
                .scheduler
                .ticks_for(now.saturating_duration_since(previous)),
            None => 1,
        };
        self.last_update = Some(now);

        for _ in 0..ticks {
            if !self.tick() {
                break;
            }
        }

        self.phase
    }

    pub fn ghost_path(&self) -> GhostPath {
        GhostPath::compute(
            self.state.ball.center,
            self.settings.launch_velocity(),
            &self.env,
        )
    }

    fn apply_ball_type(&mut self) {
        self.state.ball.params = self
            .settings
            .ball_type
            .params(self.settings.wall_restitution);
    }
}

impl Drawable for Simulation {
    fn draw(&self, ctx: &egui::Context, painter: &egui::Painter, transform: TSTransform) {
        if self.shows_ghost() {
            self.ghost_path().draw(ctx, painter, transform);
        }
        if self.settings.show_trajectory {
            self.state.trajectory.draw(ctx, painter, transform);
        }
        self.impacts.iter().for_each(|impact| {
            impact.draw(ctx, painter, transform);
        });
        self.state.ball.draw(ctx, painter, transform);
    }
}
