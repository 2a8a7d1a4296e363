//! Simulation boundary errors.
//!
//! The core never performs I/O, so every variant here is a caller mistake
//! caught at `GameState::new`, `update`, or one of the parsers. When a call
//! returns an error the session is left exactly as it was.

use std::fmt;

use crate::sim::input::Action;

/// Top-level error enum for the simulation core.
#[derive(Debug)]
pub enum SimError {
    /// Frame delta was negative, NaN or infinite.
    InvalidDelta(f32),

    /// An intent was placed in the wrong half of an [`InputFrame`]: a
    /// continuous intent listed as a one-shot press, or vice versa.
    ///
    /// [`InputFrame`]: crate::sim::input::InputFrame
    MalformedInput(Action),

    /// A weapon key did not name any known weapon.
    UnknownWeapon(String),

    /// A difficulty name or index was out of range.
    UnknownDifficulty(String),

    /// World dimensions cannot host a generated layout.
    InvalidWorld {
        /// Which dimension was rejected.
        field: &'static str,
        /// The value that was rejected.
        value: f32,
    },

    /// A settings value is outside its allowed range.
    InvalidSetting {
        field: &'static str,
        value: f32,
    },

    /// Balance data failed validation after loading.
    InvalidTuning {
        /// Human-readable description of the offending entry.
        reason: String,
    },

    /// JSON (de)serialization failed.
    Json(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InvalidDelta(dt) => {
                write!(f, "frame delta must be finite and non-negative, got {dt}")
            }
            SimError::MalformedInput(action) => {
                write!(f, "input action {action:?} is in the wrong intent set")
            }
            SimError::UnknownWeapon(key) => write!(f, "unknown weapon key '{key}'"),
            SimError::UnknownDifficulty(name) => write!(f, "unknown difficulty '{name}'"),
            SimError::InvalidWorld { field, value } => {
                write!(f, "world {field} of {value} cannot host a layout")
            }
            SimError::InvalidSetting { field, value } => {
                write!(f, "setting {field} out of range: {value}")
            }
            SimError::InvalidTuning { reason } => write!(f, "invalid tuning: {reason}"),
            SimError::Json(e) => write!(f, "json error: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Json(e)
    }
}
