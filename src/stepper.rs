//! Fixed-timestep integration and boundary collision for a single ball.
//!
//! Boundaries are resolved once per tick in a fixed order (left, right, ceiling,
//! floor). A ball that overlaps two boundaries at once has both resolved in the same
//! pass without re-checking, which can leave a corner under-resolved for a tick.

use egui::{Pos2, Vec2};

use crate::{ball::Ball, environment::Environment, trajectory::Trajectory};

/// Below this speed on both axes, a ball touching the floor comes to rest.
pub const REST_SPEED: f32 = 5.0;

/// Everything the stepper threads from one tick to the next.
#[derive(Debug, Default)]
pub struct SimulationState {
    pub ball: Ball,
    pub trajectory: Trajectory,
}

impl SimulationState {
    pub fn new(ball: Ball, trajectory: Trajectory) -> Self {
        Self { ball, trajectory }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Contacts {
    pub left: bool,
    pub right: bool,
    pub ceiling: bool,
    pub floor: bool,
}

impl Contacts {
    pub fn any(&self) -> bool {
        self.left || self.right || self.ceiling || self.floor
    }

    /// Contact point on each boundary touched, with the normal pointing into the
    /// viewport.
    pub fn points(&self, ball: &Ball, env: &Environment) -> Vec<(Pos2, Vec2)> {
        let Pos2 { x, y } = ball.center;
        let mut points = Vec::new();
        if self.left {
            points.push((Pos2::new(0.0, y), Vec2::new(1.0, 0.0)));
        }
        if self.right {
            points.push((Pos2::new(env.width, y), Vec2::new(-1.0, 0.0)));
        }
        if self.ceiling {
            points.push((Pos2::new(x, 0.0), Vec2::new(0.0, 1.0)));
        }
        if self.floor {
            points.push((Pos2::new(x, env.height), Vec2::new(0.0, -1.0)));
        }
        points
    }
}

/// Clamps the ball back inside the viewport and applies restitution and friction.
pub fn resolve_boundaries(ball: &mut Ball, env: &Environment) -> Contacts {
    let r = ball.params.radius;
    let mut contacts = Contacts::default();

    if ball.center.x - r < 0.0 {
        ball.center.x = r;
        ball.velocity.x = -ball.velocity.x * ball.params.wall_restitution;
        contacts.left = true;
    }

    if ball.center.x + r > env.width {
        ball.center.x = env.width - r;
        ball.velocity.x = -ball.velocity.x * ball.params.wall_restitution;
        contacts.right = true;
    }

    if ball.center.y - r < 0.0 {
        ball.center.y = r;
        ball.velocity.y = -ball.velocity.y * ball.params.wall_restitution;
        contacts.ceiling = true;
    }

    if ball.center.y + r > env.height {
        ball.center.y = env.height - r;
        ball.velocity.y = -ball.velocity.y * ball.params.floor_restitution;
        ball.velocity.x *= ball.params.floor_friction;
        contacts.floor = true;
    }

    contacts
}

/// What happened during a single tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    pub active: bool,
    pub contacts: Contacts,
}

/// Advances `state` in place by one fixed timestep.
///
/// Reports `active == false` once the ball has settled on the floor, in which case
/// its velocity has been zeroed.
pub fn step(state: &mut SimulationState, env: &Environment) -> StepReport {
    state.ball.integrate(env.dt, env.gravity);
    state.trajectory.push(state.ball.center);

    let contacts = resolve_boundaries(&mut state.ball, env);

    let mut active = true;
    if contacts.floor
        && state.ball.velocity.x.abs() < REST_SPEED
        && state.ball.velocity.y.abs() < REST_SPEED
    {
        state.ball.velocity = Vec2::ZERO;
        active = false;
    }

    StepReport { active, contacts }
}

/// Result of [`advance`]: the next state and whether the ball is still moving.
#[derive(Debug)]
pub struct Step {
    pub state: SimulationState,
    pub active: bool,
    pub contacts: Contacts,
}

/// Consumes the current state and returns the state one tick later.
pub fn advance(mut state: SimulationState, env: &Environment) -> Step {
    let StepReport { active, contacts } = step(&mut state, env);

    Step {
        state,
        active,
        contacts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ball::BallType, environment::DT};

    fn env(gravity: f32) -> Environment {
        Environment {
            gravity,
            width: 800.0,
            height: 600.0,
            dt: DT,
        }
    }

    fn state_at(center: Pos2, velocity: Vec2) -> SimulationState {
        let mut ball = Ball::new(BallType::Normal, center, 0.7);
        ball.velocity = velocity;
        SimulationState::new(ball, Trajectory::new(16))
    }

    #[test]
    fn test_single_tick_in_free_flight() {
        let state = state_at(Pos2::new(100.0, 300.0), Vec2::new(0.0, -400.0));

        let step = advance(state, &env(800.0));

        assert!(step.active);
        assert!(!step.contacts.any());
        assert!((step.state.ball.velocity.y - -387.2).abs() < 1e-3);
        assert!((step.state.ball.center.y - 293.8048).abs() < 1e-3);
        assert_eq!(step.state.ball.center.x, 100.0);
    }

    #[test]
    fn test_free_flight_matches_closed_form() {
        let env = env(800.0);
        let mut state = state_at(Pos2::new(200.0, 300.0), Vec2::new(120.0, -250.0));

        for _ in 0..10 {
            let previous = state.ball;
            let step = advance(state, &env);
            assert!(!step.contacts.any());

            let vy = previous.velocity.y + env.gravity * env.dt;
            assert_eq!(step.state.ball.velocity.y, vy);
            assert_eq!(
                step.state.ball.center.x,
                previous.center.x + previous.velocity.x * env.dt
            );
            assert_eq!(step.state.ball.center.y, previous.center.y + vy * env.dt);

            state = step.state;
        }
    }

    #[test]
    fn test_trajectory_records_unclamped_position() {
        let state = state_at(Pos2::new(100.0, 579.0), Vec2::new(0.0, 200.0));

        let step = advance(state, &env(0.0));

        assert!(step.contacts.floor);
        let recorded = step.state.trajectory.last().unwrap();
        assert!((recorded.y - (579.0 + 200.0 * DT)).abs() < 1e-4);
        assert_eq!(step.state.ball.center.y, 580.0);
    }

    #[test]
    fn test_floor_bounce_applies_restitution_and_friction() {
        let state = state_at(Pos2::new(400.0, 579.0), Vec2::new(100.0, 300.0));

        let step = advance(state, &env(0.0));
        let ball = step.state.ball;

        assert!(step.active);
        assert!(step.contacts.floor);
        assert_eq!(ball.center.y, 600.0 - ball.radius());
        assert!((ball.velocity.y - -300.0 * 0.7).abs() < 1e-4);
        assert!((ball.velocity.x - 100.0 * 0.98).abs() < 1e-4);
    }

    #[test]
    fn test_walls_and_ceiling_use_wall_restitution() {
        let env = env(0.0);

        let left = advance(state_at(Pos2::new(21.0, 300.0), Vec2::new(-200.0, 0.0)), &env);
        assert!(left.contacts.left);
        assert_eq!(left.state.ball.center.x, 20.0);
        assert!((left.state.ball.velocity.x - 140.0).abs() < 1e-4);

        let right = advance(state_at(Pos2::new(779.0, 300.0), Vec2::new(200.0, 0.0)), &env);
        assert!(right.contacts.right);
        assert_eq!(right.state.ball.center.x, 780.0);
        assert!((right.state.ball.velocity.x - -140.0).abs() < 1e-4);

        let ceiling = advance(state_at(Pos2::new(300.0, 21.0), Vec2::new(0.0, -200.0)), &env);
        assert!(ceiling.contacts.ceiling);
        assert_eq!(ceiling.state.ball.center.y, 20.0);
        assert!((ceiling.state.ball.velocity.y - 140.0).abs() < 1e-4);
    }

    #[test]
    fn test_corner_resolves_both_boundaries_in_one_pass() {
        let state = state_at(Pos2::new(779.0, 579.0), Vec2::new(200.0, 200.0));

        let step = advance(state, &env(0.0));

        assert!(step.contacts.right && step.contacts.floor);
        assert!(!step.contacts.left && !step.contacts.ceiling);
        assert_eq!(step.state.ball.center, Pos2::new(780.0, 580.0));
    }

    #[test]
    fn test_slow_floor_contact_comes_to_rest() {
        // Without gravity the pre-bounce speeds are exactly vx=3, vy=4
        let state = state_at(Pos2::new(400.0, 580.0), Vec2::new(3.0, 4.0));

        let step = advance(state, &env(0.0));

        assert!(step.contacts.floor);
        assert!(!step.active);
        assert_eq!(step.state.ball.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_slow_ball_in_the_air_keeps_going() {
        let state = state_at(Pos2::new(400.0, 300.0), Vec2::new(1.0, 1.0));

        let step = advance(state, &env(0.0));

        assert!(step.active);
        assert_eq!(step.state.ball.velocity, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_zero_velocity_zero_gravity_stays_put() {
        let state = state_at(Pos2::new(400.0, 300.0), Vec2::ZERO);

        let step = advance(state, &env(0.0));

        assert!(step.active);
        assert_eq!(step.state.ball.center, Pos2::new(400.0, 300.0));
    }

    #[test]
    fn test_contact_points_face_inward() {
        let env = env(0.0);
        let ball = Ball::new(BallType::Normal, Pos2::new(20.0, 580.0), 0.7);
        let contacts = Contacts {
            left: true,
            floor: true,
            ..Default::default()
        };

        let points = contacts.points(&ball, &env);

        assert_eq!(
            points,
            vec![
                (Pos2::new(0.0, 580.0), Vec2::new(1.0, 0.0)),
                (Pos2::new(20.0, 600.0), Vec2::new(0.0, -1.0)),
            ]
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const EPS: f32 = 1e-3;

        fn ball_type() -> impl Strategy<Value = BallType> {
            prop_oneof![
                Just(BallType::Normal),
                Just(BallType::Heavy),
                Just(BallType::Bouncy),
            ]
        }

        proptest! {
            #[test]
            fn ball_stays_inside_viewport(
                kind in ball_type(),
                width in 60.0f32..1600.0,
                height in 60.0f32..1200.0,
                fx in 0.0f32..1.0,
                fy in 0.0f32..1.0,
                vx in -1000.0f32..1000.0,
                vy in -1000.0f32..1000.0,
                gravity in 0.0f32..1000.0,
                wall in 0.0f32..=1.0,
                ticks in 1usize..400,
            ) {
                let env = Environment { gravity, width, height, dt: DT };
                let mut ball = Ball::new(kind, Pos2::new(fx * width, fy * height), wall);
                ball.velocity = Vec2::new(vx, vy);
                let r = ball.radius();
                let mut state = SimulationState::new(ball, Trajectory::new(32));

                for _ in 0..ticks {
                    let step = advance(state, &env);
                    let c = step.state.ball.center;
                    prop_assert!(c.x >= r - EPS && c.x <= width - r + EPS, "x={} r={} w={}", c.x, r, width);
                    prop_assert!(c.y >= r - EPS && c.y <= height - r + EPS, "y={} r={} h={}", c.y, r, height);
                    prop_assert!(step.state.trajectory.len() <= 32);
                    state = step.state;
                    if !step.active {
                        break;
                    }
                }
            }

            #[test]
            fn floor_bounce_reverses_and_scales(
                kind in ball_type(),
                vy in 10.0f32..1000.0,
            ) {
                let env = Environment { gravity: 0.0, width: 800.0, height: 600.0, dt: DT };
                let mut ball = Ball::new(kind, Pos2::new(400.0, 0.0), 0.7);
                ball.center.y = 600.0 - ball.radius();
                ball.velocity = Vec2::new(0.0, vy);
                let restitution = ball.params.floor_restitution;

                let step = advance(SimulationState::new(ball, Trajectory::new(4)), &env);

                prop_assert!(step.contacts.floor);
                if step.active {
                    prop_assert!((step.state.ball.velocity.y - (-vy * restitution)).abs() < 1e-3);
                } else {
                    prop_assert!(vy * restitution < REST_SPEED);
                }
            }
        }
    }
}
