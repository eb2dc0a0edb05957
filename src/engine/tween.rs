// Value tweening

use crate::core::math::lerp;

/// Linearly interpolates a scalar from `from` to `to` over `duration` seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    duration: f32,
    elapsed: f32,
}

impl Tween {
    pub fn linear(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
        }
    }

    /// Advance by `dt` seconds and return the current value
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        self.value()
    }

    /// Current interpolated value
    pub fn value(&self) -> f32 {
        if self.duration <= 0.0 {
            return self.to;
        }
        lerp(self.from, self.to, self.elapsed / self.duration)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_tween() {
        let mut tween = Tween::linear(1.0, 0.0, 0.1);
        assert_relative_eq!(tween.value(), 1.0);
        assert_relative_eq!(tween.advance(0.05), 0.5, epsilon = 1e-6);
        assert!(!tween.is_finished());
        assert_relative_eq!(tween.advance(0.05), 0.0, epsilon = 1e-6);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_tween_does_not_overshoot() {
        let mut tween = Tween::linear(0.0, 1.0, 0.05);
        assert_eq!(tween.advance(1.0), 1.0);
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let tween = Tween::linear(0.0, 1.0, 0.0);
        assert_eq!(tween.value(), 1.0);
        assert!(tween.is_finished());
    }
}
