// Physical body and jump capabilities

use glam::Vec2;

/// Multi-jump capability; refilled on landing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DoubleJump {
    num_jumps: u32,
    jumps_left: u32,
}

impl DoubleJump {
    fn new(num_jumps: u32) -> Self {
        Self {
            num_jumps,
            jumps_left: num_jumps,
        }
    }

    fn refill(&mut self) {
        self.jumps_left = self.num_jumps;
    }

    /// Spend one jump if any remain
    fn consume(&mut self) -> bool {
        if self.jumps_left == 0 {
            return false;
        }
        self.jumps_left -= 1;
        true
    }
}

/// Gravity-affected character moved through the level by the character controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    /// Current velocity in units/second (y grows downward)
    pub velocity: Vec2,
    /// Upward speed applied by a jump
    pub jump_force: f32,
    grounded: bool,
    /// Horizontal walking velocity queued for the next physics step
    pending_motion: Vec2,
    double_jump: Option<DoubleJump>,
}

impl Body {
    pub fn new(jump_force: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            jump_force,
            grounded: false,
            pending_motion: Vec2::ZERO,
            double_jump: None,
        }
    }

    pub fn with_double_jump(mut self, num_jumps: u32) -> Self {
        self.double_jump = Some(DoubleJump::new(num_jumps));
        self
    }

    /// Queue a displacement at `velocity` units/second for the next step only
    pub fn move_by(&mut self, velocity: Vec2) {
        self.pending_motion += velocity;
    }

    pub(crate) fn take_pending_motion(&mut self) -> Vec2 {
        std::mem::take(&mut self.pending_motion)
    }

    #[cfg(test)]
    pub(crate) fn is_grounded(&self) -> bool {
        self.grounded
    }

    #[cfg(test)]
    pub(crate) fn jumps_left(&self) -> Option<u32> {
        self.double_jump.map(|jumps| jumps.jumps_left)
    }

    /// Unconditional jump
    pub fn jump(&mut self) {
        self.velocity.y = -self.jump_force;
        self.grounded = false;
    }

    /// Jump if allowed: from the ground, or mid-air while extra jumps remain.
    /// Returns whether a jump happened.
    pub fn double_jump(&mut self) -> bool {
        let allowed = match self.double_jump.as_mut() {
            Some(jumps) => jumps.consume(),
            None => self.grounded,
        };
        if allowed {
            self.jump();
        }
        allowed
    }

    /// Apply what the character controller found after moving the body
    pub(crate) fn settle(&mut self, grounded: bool, blocked_above: bool) {
        if grounded && self.velocity.y >= 0.0 {
            self.land();
        } else {
            self.grounded = false;
        }
        if blocked_above && self.velocity.y < 0.0 {
            self.velocity.y = 0.0;
        }
    }

    fn land(&mut self) {
        self.grounded = true;
        self.velocity.y = 0.0;
        if let Some(jumps) = self.double_jump.as_mut() {
            jumps.refill();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_sets_upward_velocity() {
        let mut body = Body::new(640.0);
        body.jump();
        assert_eq!(body.velocity.y, -640.0);
        assert!(!body.is_grounded());
    }

    #[test]
    fn test_plain_body_only_jumps_from_ground() {
        let mut body = Body::new(640.0);
        assert!(!body.double_jump());

        body.land();
        assert!(body.double_jump());
        assert!(!body.double_jump());
    }

    #[test]
    fn test_double_jump_limits_air_jumps() {
        let mut body = Body::new(640.0).with_double_jump(2);
        assert!(body.double_jump());
        assert!(body.double_jump());
        assert!(!body.double_jump());
        assert_eq!(body.jumps_left().unwrap(), 0);
    }

    #[test]
    fn test_landing_refills_jumps() {
        let mut body = Body::new(640.0).with_double_jump(3);
        body.double_jump();
        body.double_jump();
        body.land();
        assert_eq!(body.jumps_left().unwrap(), 3);
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_pending_motion_is_consumed() {
        let mut body = Body::new(640.0);
        body.move_by(Vec2::new(-300.0, 0.0));
        body.move_by(Vec2::new(300.0, 0.0));
        body.move_by(Vec2::new(300.0, 0.0));
        assert_eq!(body.take_pending_motion(), Vec2::new(300.0, 0.0));
        assert_eq!(body.take_pending_motion(), Vec2::ZERO);
    }

    #[test]
    fn test_settle_in_the_air() {
        let mut body = Body::new(640.0);
        body.land();
        body.velocity.y = 300.0;
        body.settle(false, false);
        assert!(!body.is_grounded());
        assert_eq!(body.velocity.y, 300.0);
    }

    #[test]
    fn test_ceiling_cancels_upward_speed() {
        let mut body = Body::new(640.0);
        body.jump();
        body.settle(false, true);
        assert_eq!(body.velocity.y, 0.0);
        assert!(!body.is_grounded());
    }

    #[test]
    fn test_rising_body_does_not_land() {
        let mut body = Body::new(640.0).with_double_jump(2);
        body.double_jump();
        body.settle(true, false);
        assert!(!body.is_grounded());
        assert_eq!(body.jumps_left().unwrap(), 1);
    }
}
