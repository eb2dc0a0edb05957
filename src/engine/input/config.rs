// Input configuration and remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Key layout: which key triggers which action. Several keys may share an action.
#[derive(Debug, Clone)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Build a layout; later entries win when a key is listed twice
    pub fn from_bindings(bindings: Vec<(InputSource, Action)>) -> Self {
        let mut config = Self {
            bindings: HashMap::with_capacity(bindings.len()),
        };
        for (source, action) in bindings {
            config.bind(source, action);
        }
        config
    }

    /// Point `source` at `action`; a key only ever drives one action
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!("Rebound {:?} from {:?} to {:?}", source, previous, action);
            }
        }
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::from_bindings(default_bindings())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_layout() {
        let config = InputConfig::default();
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::ArrowLeft)),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::Space)),
            Some(Action::Jump)
        );
        for code in [KeyCode::ShiftLeft, KeyCode::ShiftRight] {
            assert_eq!(config.get_action(InputSource::key(code)), Some(Action::Inhale));
        }
    }

    #[test]
    fn test_rebind_source() {
        let mut config = InputConfig::default();
        let source = InputSource::key(KeyCode::Space);

        config.bind(source, Action::Inhale);

        assert_eq!(config.get_action(source), Some(Action::Inhale));
    }

    #[test]
    fn test_later_binding_wins() {
        let key = InputSource::key(KeyCode::KeyZ);
        let config = InputConfig::from_bindings(vec![(key, Action::MoveLeft), (key, Action::Jump)]);

        assert_eq!(config.get_action(key), Some(Action::Jump));
        assert_eq!(config.get_action(InputSource::key(KeyCode::Space)), None);
    }
}
