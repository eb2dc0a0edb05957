// Inhale / full state machine

use crate::engine::timer::Countdown;

/// What the special ability is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InhaleState {
    #[default]
    Idle,
    /// Special action held, sucking in whatever is in front
    Inhaling,
    /// Holding a captured enemy, ready to spit it out
    Full,
}

/// Sprite pose shown for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pose {
    #[default]
    Idle,
    Inhaling,
    Full,
}

impl Pose {
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Idle => "kirbIdle",
            Self::Inhaling => "kirbInhaling",
            Self::Full => "kirbFull",
        }
    }
}

/// Result of holding the special action for a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldOutcome {
    /// Already full: show the full pose, no inhale effect
    ShowFull,
    /// Inhaling: show the inhale effect
    Inhaling,
}

/// Result of releasing the special action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Was full: the captured enemy leaves as a shooting star
    Spit,
    /// Was not full: simply stop inhaling
    Stopped,
}

/// Tracks the ability state, the pose, and the delayed return to idle
#[derive(Debug, Clone)]
pub struct PlayerStateMachine {
    state: InhaleState,
    pose: Pose,
    idle_delay: f32,
    return_to_idle: Countdown,
}

impl PlayerStateMachine {
    pub fn new(idle_delay: f32) -> Self {
        Self {
            state: InhaleState::Idle,
            pose: Pose::Idle,
            idle_delay,
            return_to_idle: Countdown::inactive(),
        }
    }

    pub fn state(&self) -> InhaleState {
        self.state
    }

    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn is_inhaling(&self) -> bool {
        self.state == InhaleState::Inhaling
    }

    /// Special action held this frame
    pub fn hold(&mut self) -> HoldOutcome {
        self.return_to_idle.cancel();
        if self.state == InhaleState::Full {
            self.pose = Pose::Full;
            return HoldOutcome::ShowFull;
        }
        self.state = InhaleState::Inhaling;
        self.pose = Pose::Inhaling;
        HoldOutcome::Inhaling
    }

    /// Special action released
    pub fn release(&mut self) -> ReleaseOutcome {
        if self.state == InhaleState::Full {
            self.state = InhaleState::Idle;
            self.pose = Pose::Inhaling;
            self.return_to_idle = Countdown::start(self.idle_delay);
            return ReleaseOutcome::Spit;
        }
        self.state = InhaleState::Idle;
        self.pose = Pose::Idle;
        ReleaseOutcome::Stopped
    }

    /// An inhalable enemy was swallowed
    pub fn capture(&mut self) {
        self.return_to_idle.cancel();
        self.state = InhaleState::Full;
    }

    /// Advance timers. Returns true when the pose just went back to idle.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.return_to_idle.tick(dt) {
            self.pose = Pose::Idle;
            return true;
        }
        false
    }
}
