// Game action definitions and default key bindings

use winit::keyboard::KeyCode;

/// Everything the player can ask the character to do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,

    // Special ability (hold to inhale, release to spit)
    Inhale,
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Default keyboard bindings
pub fn default_bindings() -> Vec<(InputSource, Action)> {
    vec![
        (InputSource::key(KeyCode::ArrowLeft), Action::MoveLeft),
        (InputSource::key(KeyCode::ArrowRight), Action::MoveRight),
        (InputSource::key(KeyCode::Space), Action::Jump),
        (InputSource::key(KeyCode::ShiftLeft), Action::Inhale),
        (InputSource::key(KeyCode::ShiftRight), Action::Inhale),
    ]
}
