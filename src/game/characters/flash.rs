// Hit flash: fade out, then fade back in

use crate::engine::tween::Tween;

/// Which leg of the flash is running
#[derive(Debug, Clone, Copy, PartialEq)]
enum FlashPhase {
    FadingOut(Tween),
    FadingIn(Tween),
}

/// Two-leg opacity flash advanced once per frame.
/// Starting a new flash while one is running restarts it from the current opacity.
#[derive(Debug, Clone)]
pub struct Flash {
    phase: Option<FlashPhase>,
    leg_duration: f32,
}

impl Flash {
    pub fn new(leg_duration: f32) -> Self {
        Self {
            phase: None,
            leg_duration,
        }
    }

    pub fn start(&mut self, current_opacity: f32) {
        self.phase = Some(FlashPhase::FadingOut(Tween::linear(
            current_opacity,
            0.0,
            self.leg_duration,
        )));
    }

    /// Advance by `dt`, returning the opacity to apply while a flash runs
    pub fn advance(&mut self, dt: f32) -> Option<f32> {
        match self.phase.as_mut()? {
            FlashPhase::FadingOut(tween) => {
                let opacity = tween.advance(dt);
                if tween.is_finished() {
                    self.phase = Some(FlashPhase::FadingIn(Tween::linear(
                        0.0,
                        1.0,
                        self.leg_duration,
                    )));
                }
                Some(opacity)
            }
            FlashPhase::FadingIn(tween) => {
                let opacity = tween.advance(dt);
                if tween.is_finished() {
                    self.phase = None;
                }
                Some(opacity)
            }
        }
    }
}
