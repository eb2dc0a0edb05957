// Player character
//
// - `player`: building the player and reacting to collisions and frames
// - `state`: inhale / full state machine and pose selection
// - `flash`: hit feedback
// - `stats`: tuning values

pub mod flash;
pub mod player;
pub mod state;
pub mod stats;

pub use player::{Direction, Player};
pub use state::{HoldOutcome, InhaleState, ReleaseOutcome};
pub use stats::PlayerStats;
