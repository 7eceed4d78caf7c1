use web_time::Duration;

use crate::environment::DT;

pub const DEFAULT_MAX_TICKS_PER_FRAME: u32 = 8;

/// Turns elapsed wall-clock time into whole fixed-size ticks.
///
/// The fractional remainder carries over to the next call. When more than
/// `max_ticks_per_frame` ticks are due (the window was hidden, a debugger paused the
/// process) the backlog is dropped instead of being replayed all at once.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    dt: f32,
    max_ticks_per_frame: u32,
    accumulator: f32,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(DT, DEFAULT_MAX_TICKS_PER_FRAME)
    }
}

impl TickScheduler {
    pub fn new(dt: f32, max_ticks_per_frame: u32) -> Self {
        Self {
            dt,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
            accumulator: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }

    pub fn ticks_for(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.as_secs_f32();

        let due = (self.accumulator / self.dt).floor();
        if due >= self.max_ticks_per_frame as f32 {
            log::debug!(
                "Dropping {} ticks of backlog",
                due as u64 - self.max_ticks_per_frame as u64
            );
            self.accumulator %= self.dt;
            return self.max_ticks_per_frame;
        }

        let ticks = due as u32;
        self.accumulator -= ticks as f32 * self.dt;
        ticks
    }
}
