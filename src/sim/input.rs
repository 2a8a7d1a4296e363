//! Per-frame player intents
//!
//! The caller maps its devices onto these intents. Continuous intents are
//! reported as held for as long as the control is down; navigation and
//! screen intents are reported once per press.

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Abstract player intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    // Held
    MoveLeft,
    MoveRight,
    Jump,
    Fire,
    Reload,
    /// Aim up / climb up
    AimUp,
    /// Duck / climb down
    AimDown,

    // Pressed
    Pause,
    OpenShop,
    NavUp,
    NavDown,
    NavLeft,
    NavRight,
    Confirm,
    Back,
}

impl Action {
    /// Continuous intents, sampled every step
    pub fn is_held_kind(self) -> bool {
        matches!(
            self,
            Action::MoveLeft
                | Action::MoveRight
                | Action::Jump
                | Action::Fire
                | Action::Reload
                | Action::AimUp
                | Action::AimDown
        )
    }
}

/// Everything the player asked for since the previous update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Intents currently held down
    pub held: Vec<Action>,
    /// One-shot intents pressed since the last update, in order
    pub pressed: Vec<Action>,
}

impl InputFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holding(mut self, action: Action) -> Self {
        self.held.push(action);
        self
    }

    pub fn pressing(mut self, action: Action) -> Self {
        self.pressed.push(action);
        self
    }

    /// Reject intents placed in the wrong set
    pub fn validate(&self) -> Result<(), SimError> {
        if let Some(&action) = self.held.iter().find(|a| !a.is_held_kind()) {
            return Err(SimError::MalformedInput(action));
        }
        if let Some(&action) = self.pressed.iter().find(|a| a.is_held_kind()) {
            return Err(SimError::MalformedInput(action));
        }
        Ok(())
    }

    pub fn controls(&self) -> Controls {
        let held = |action| self.held.contains(&action);
        Controls {
            left: held(Action::MoveLeft),
            right: held(Action::MoveRight),
            jump: held(Action::Jump),
            fire: held(Action::Fire),
            reload: held(Action::Reload),
            up: held(Action::AimUp),
            down: held(Action::AimDown),
        }
    }
}

/// Held intents resolved to flags for one simulation step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub fire: bool,
    pub reload: bool,
    pub up: bool,
    pub down: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_frame() {
        let frame = InputFrame::new()
            .holding(Action::MoveRight)
            .holding(Action::Fire)
            .pressing(Action::OpenShop);
        assert!(frame.validate().is_ok());

        let controls = frame.controls();
        assert!(controls.right && controls.fire);
        assert!(!controls.left && !controls.jump);
    }

    #[test]
    fn test_wrong_set_rejected() {
        let frame = InputFrame::new().holding(Action::Pause);
        assert!(matches!(
            frame.validate(),
            Err(SimError::MalformedInput(Action::Pause))
        ));

        let frame = InputFrame::new().pressing(Action::Jump);
        assert!(matches!(
            frame.validate(),
            Err(SimError::MalformedInput(Action::Jump))
        ));
    }
}
