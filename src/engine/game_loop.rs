/// Fixed-timestep frame pacing
///
/// Gameplay callbacks always see the same `dt`, regardless of how fast
/// the window produces frames.
use std::time::{Duration, Instant};

/// Simulation rate (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667);

/// Upper bound on catch-up steps after a stall
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Accumulates wall-clock time and hands out fixed simulation steps
pub struct GameLoop {
    accumulator: Duration,
    last_frame_time: Instant,
    paused: bool,
}

impl GameLoop {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_frame_time: Instant::now(),
            paused: false,
        }
    }

    /// Begin a new frame using the real clock
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame_time);
        self.last_frame_time = now;
        self.advance(elapsed)
    }

    /// Account for `elapsed` wall time and return how many fixed steps to run
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            steps += 1;
        }

        // Drop whatever could not be caught up instead of snowballing
        if steps == MAX_STEPS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!("Simulation behind by {:?}, skipping", self.accumulator);
            self.accumulator = Duration::ZERO;
        }

        steps
    }

    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Freeze or unfreeze the simulation. Time spent paused is never replayed.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        self.accumulator = Duration::ZERO;
        self.last_frame_time = Instant::now();
        log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
