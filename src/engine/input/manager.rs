// Input manager - routes keyboard events through the bindings

use super::action::{Action, InputSource};
use super::config::InputConfig;
use super::state::ActionState;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Translates raw keyboard events into action state
#[derive(Debug)]
pub struct InputManager {
    config: InputConfig,
    state: ActionState,
}

impl InputManager {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            state: ActionState::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_key(key_code, event.state, event.repeat);
        }
    }

    /// Apply one key transition. Returns the bound action, if any.
    pub fn process_key(
        &mut self,
        key_code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<Action> {
        let action = self.config.get_action(InputSource::key(key_code))?;
        match state {
            ElementState::Pressed => {
                if !repeat {
                    self.state.press(action);
                }
            }
            ElementState::Released => self.state.release(action),
        }
        Some(action)
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    /// Clear edge events; call after each simulation step
    pub fn end_frame(&mut self) {
        self.state.end_frame();
    }

    /// Let go of every held key, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.state.release_all();
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::default())
    }
}
