// Engine layer: entities, physics, animation, tweening, timers and input

pub mod animation;
pub mod error;
pub mod game_loop;
pub mod input;
pub mod physics;
pub mod scene;
pub mod timer;
pub mod tween;
pub mod world;

pub use error::EngineResult;
pub use scene::SceneId;
pub use world::{Area, EntityBuilder, EntityId, Tag, World, WorldConfig};
