// Engine error types

use super::world::EntityId;

/// Failures surfaced by the engine layer
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("Unknown scene: {0}")]
    UnknownScene(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
