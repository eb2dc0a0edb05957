// Scene identifiers used for level transitions

use std::fmt;
use std::str::FromStr;

use super::error::EngineError;

/// A loadable scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SceneId {
    Level1,
    Level2,
}

impl SceneId {
    /// Name the scene is registered under
    pub fn name(&self) -> &'static str {
        match self {
            Self::Level1 => "level-1",
            Self::Level2 => "level-2",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SceneId {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "level-1" => Ok(Self::Level1),
            "level-2" => Ok(Self::Level2),
            other => Err(EngineError::UnknownScene(other.to_string())),
        }
    }
}
