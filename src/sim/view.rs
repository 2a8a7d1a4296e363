//! Read-only snapshot for the renderer and audio collaborators

use super::screen::{MenuState, Screen};
use super::state::{AudioCue, Enemy, GameState, Particle, Pickup, Player, Projectile};
use super::world::{Ladder, Obstacle};
use crate::consts::*;
use crate::tuning::{Tuning, WeaponKind};

/// Heads-up display values
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub health: i32,
    pub max_health: i32,
    pub gold: u32,
    pub weapon: WeaponKind,
    pub magazine: u32,
    pub capacity: u32,
    pub reserve: u32,
    pub reloading: bool,
    /// 0.0 when a reload starts, approaching 1.0 as it completes
    pub reload_progress: f32,
}

/// Everything a frame needs, borrowed from the session
#[derive(Debug)]
pub struct WorldView<'a> {
    pub screen: Screen,
    pub menu: &'a MenuState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub pickups: &'a [Pickup],
    pub particles: &'a [Particle],
    pub obstacles: &'a [Obstacle],
    pub ladders: &'a [Ladder],
    /// Shop prices and names
    pub tuning: &'a Tuning,
    pub hud: Hud,
    /// Left edge of the camera window in world coordinates
    pub camera_x: f32,
    pub view_width: f32,
    pub view_height: f32,
    pub ground_y: f32,
    /// Cues emitted since the previous snapshot
    pub audio: Vec<AudioCue>,
}

impl GameState {
    /// Camera follows the player with a fixed lead, clamped to the world
    pub fn camera_x(&self) -> f32 {
        let max = (self.config.world_width - self.config.view_width).max(0.0);
        (self.player.pos.x - CAMERA_LEAD).clamp(0.0, max)
    }

    pub fn hud(&self) -> Hud {
        let player = &self.player;
        let def = self.tuning.weapon(player.weapon);
        let reload_progress = match player.reload_timer {
            Some(remaining) if def.reload_ms > 0.0 => 1.0 - remaining / def.reload_ms,
            _ => 0.0,
        };
        Hud {
            health: player.health,
            max_health: PLAYER_MAX_HEALTH,
            gold: player.gold,
            weapon: player.weapon,
            magazine: player.magazine_of(player.weapon),
            capacity: def.magazine,
            reserve: player.reserve_of(player.weapon),
            reloading: player.is_reloading(),
            reload_progress,
        }
    }

    /// Borrow the world for drawing and take the pending audio cues
    pub fn snapshot(&mut self) -> WorldView<'_> {
        let audio = std::mem::take(&mut self.audio_cues);
        WorldView {
            screen: self.screen,
            menu: &self.menu,
            player: &self.player,
            enemies: &self.enemies,
            projectiles: &self.projectiles,
            pickups: &self.pickups,
            particles: &self.particles,
            obstacles: &self.world.obstacles,
            ladders: &self.world.ladders,
            tuning: &self.tuning,
            hud: self.hud(),
            camera_x: self.camera_x(),
            view_width: self.config.view_width,
            view_height: self.config.view_height(),
            ground_y: self.config.ground_y,
            audio,
        }
    }
}
