// Per-frame action state

use super::action::Action;
use std::collections::HashSet;

/// Which actions are held, and which changed since the last frame
#[derive(Debug, Default, Clone)]
pub struct ActionState {
    pressed: HashSet<Action>,
    just_pressed: HashSet<Action>,
    just_released: HashSet<Action>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Held down right now
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Went down since the last frame
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Came up since the last frame
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Forget edge events; call once per simulation step after they were consumed
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Release every held action, as if each key came up
    pub fn release_all(&mut self) {
        self.just_released.extend(self.pressed.drain());
    }
}
