// One-shot delayed actions

/// Leftover time still treated as elapsed; summing 1/60 steps sixty times leaves about 3e-7
const FIRE_TOLERANCE: f32 = 1.0e-5;

/// A cancellable one-shot delay, polled once per frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Countdown {
    remaining: Option<f32>,
}

impl Countdown {
    /// A countdown that fires after `seconds`
    pub fn start(seconds: f32) -> Self {
        Self {
            remaining: Some(seconds.max(0.0)),
        }
    }

    /// An idle countdown that never fires
    pub fn inactive() -> Self {
        Self { remaining: None }
    }

    /// Advance the countdown. Returns true exactly once, on the frame it fires.
    pub fn tick(&mut self, dt: f32) -> bool {
        let Some(remaining) = self.remaining.as_mut() else {
            return false;
        };
        *remaining -= dt;
        if *remaining <= FIRE_TOLERANCE {
            self.remaining = None;
            return true;
        }
        false
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }
}
