//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering, audio or platform dependencies

pub mod ai;
pub mod collision;
pub mod combat;
pub mod input;
pub mod physics;
pub mod rect;
pub mod screen;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod view;
pub mod world;

pub use collision::CollisionResult;
pub use input::{Action, Controls, InputFrame};
pub use rect::{Rect, intersects};
pub use screen::{MenuState, PauseOption, Screen, SettingsRow, StartOption, Transition};
pub use state::{
    AudioCue, Enemy, EnemyBody, EnemyKind, GameState, Locomotion, MusicTrack, Owner, Particle,
    Pickup, PickupKind, Player, Projectile,
};
pub use tick::{tick, update};
pub use view::{Hud, WorldView};
pub use world::{Ladder, Obstacle, ObstacleKind, World, WorldConfig, generate_world};
