// Physics: rapier bodies and colliders behind the entity world
//
// - `body`: gravity-affected characters and their jumps
// - `collision`: collision layers and the event queue rapier fills
// - `world`: the rapier sets and the character controller
// - `step`: moving entities through the rapier world each step

pub mod body;
mod collision;
mod step;
mod world;

pub use body::Body;
pub use collision::CollisionEvent;
pub use world::PhysicsWorld;
