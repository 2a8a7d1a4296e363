//! Space Commando - A side-scrolling arcade shooter simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, combat, AI, screens)
//! - `settings`: Player preferences snapshot consumed every tick
//! - `tuning`: Data-driven game balance
//! - `error`: Boundary validation errors

pub mod error;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::SimError;
pub use settings::{Difficulty, Settings};
pub use tuning::{Tuning, WeaponKind};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (60 Hz, the rate all
    /// per-step velocities below are expressed in)
    pub const STEP_MS: f32 = 1000.0 / 60.0;
    /// Maximum substeps per update to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default world dimensions
    pub const DEFAULT_WORLD_WIDTH: f32 = 5000.0;
    pub const DEFAULT_VIEW_WIDTH: f32 = 960.0;
    pub const DEFAULT_GROUND_Y: f32 = 448.0;
    /// Ground strip drawn below the ground line; view height = ground_y + this
    pub const GROUND_STRIP: f32 = 32.0;
    /// Smallest world the generator can lay out (platform sections start at 400)
    pub const MIN_WORLD_WIDTH: f32 = 1200.0;
    /// Smallest ground line that leaves room above the highest platform
    pub const MIN_GROUND_Y: f32 = 200.0;

    /// Player defaults
    pub const PLAYER_SIZE: f32 = 32.0;
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    /// Crouched height as a fraction of standing height (floored)
    pub const DUCK_FRACTION: f32 = 0.6;
    pub const MOVE_SPEED: f32 = 2.5;
    pub const DUCK_MOVE_SPEED: f32 = 1.5;
    pub const JUMP_VELOCITY: f32 = -8.0;
    /// Player gravity (pixels/step²)
    pub const GRAVITY: f32 = 0.35;
    /// Falling this far below the view bottom is fatal
    pub const FALL_DEATH_MARGIN: f32 = 200.0;
    /// Camera leads the player by this much
    pub const CAMERA_LEAD: f32 = 150.0;

    /// Enemy defaults
    pub const ENEMY_SIZE: f32 = 32.0;
    pub const ENEMY_GRAVITY: f32 = 0.25;
    pub const ENEMY_HOP_VELOCITY: f32 = -6.0;
    pub const ENEMY_CLIMB_SPEED: f32 = 1.5;
    /// Vertical dead zone before a climber chases the player
    pub const ENEMY_CLIMB_DEADZONE: f32 = 8.0;
    pub const HIT_FLASH_MS: f32 = 150.0;
    pub const ATTACK_POSE_MS: f32 = 200.0;
    pub const GHOST_BOB_AMPLITUDE: f32 = 30.0;
    pub const GHOST_PHASE_RATE: f32 = 0.002;

    /// Projectiles leave the world this far above/below the view
    pub const PROJECTILE_MARGIN: f32 = 50.0;

    /// Pickup defaults
    pub const PICKUP_SIZE: f32 = 12.0;
    /// Pickups rest this far above the ground line
    pub const PICKUP_DROP_HEIGHT: f32 = 20.0;

    /// Particle defaults
    pub const PARTICLE_GRAVITY: f32 = 0.05;
}

/// Linear time factor for pacing: 1.0 at the start, reaching `floor` after
/// `ramp_ms` of play
#[inline]
pub fn ramp_factor(elapsed_ms: f32, ramp_ms: f32, floor: f32) -> f32 {
    (1.0 - elapsed_ms / ramp_ms).max(floor)
}

/// Sign of a horizontal offset as a facing direction (±1)
#[inline]
pub fn facing_toward(from_x: f32, to_x: f32) -> f32 {
    if to_x < from_x { -1.0 } else { 1.0 }
}
