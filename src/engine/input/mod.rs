// Keyboard input handling
//
// - `action`: game actions and default key bindings
// - `config`: remappable bindings
// - `state`: held / just-pressed / just-released tracking
// - `manager`: routes winit keyboard events into the action state

pub mod action;
pub mod config;
pub mod manager;
pub mod state;

pub use action::Action;
pub use manager::InputManager;
pub use state::ActionState;
