//! Game settings and preferences
//!
//! Owned by the caller and handed to every `update`. The settings screen
//! edits it in place; persisting it is the caller's job (see `to_json`).

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;

/// Difficulty levels, in settings-menu cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        }
    }

    fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Normal => 1,
            Difficulty::Hard => 2,
        }
    }

    /// Next difficulty to the right, wrapping
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Next difficulty to the left, wrapping
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Enemy hit points at spawn for a given base value
    pub fn adjust_health(self, base: i32) -> i32 {
        match self {
            Difficulty::Easy => (base - 1).max(1),
            Difficulty::Normal => base,
            Difficulty::Hard => base + 1,
        }
    }

    /// Enemy projectile damage at fire time for a given base value
    pub fn adjust_damage(self, base: i32) -> i32 {
        match self {
            Difficulty::Easy => (base - 2).max(1),
            Difficulty::Normal => base,
            Difficulty::Hard => base + 2,
        }
    }

    /// Spawn interval multiplier (easy spawns slower, hard faster)
    pub fn spawn_interval_multiplier(self) -> f32 {
        match self {
            Difficulty::Easy => 1.4,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 0.7,
        }
    }
}

impl FromStr for Difficulty {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(SimError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = SimError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| SimError::UnknownDifficulty(value.to_string()))
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    /// Music on/off (forwarded to the audio collaborator, never pauses play)
    pub audio: bool,
    /// Particle effects (explosions on enemy death)
    pub particles: bool,
    /// Baseline music volume (0.0 - 1.0), consumed by the audio collaborator
    pub music_volume: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            audio: true,
            particles: true,
            music_volume: 0.6,
        }
    }
}

impl Settings {
    /// Reject values the core cannot act on
    pub fn validate(&self) -> Result<(), SimError> {
        if !self.music_volume.is_finite() || !(0.0..=1.0).contains(&self.music_volume) {
            return Err(SimError::InvalidSetting {
                field: "music_volume",
                value: self.music_volume,
            });
        }
        Ok(())
    }

    /// Parse settings saved by the caller; missing keys fall back to defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings (difficulty {})", settings.difficulty.as_str());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SimError> {
        Ok(serde_json::to_string(self)?)
    }
}
