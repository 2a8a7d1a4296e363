//! Game state and core simulation types
//!
//! Everything a session owns lives in `GameState`; entity types here are
//! plain data; behavior lives in the resolver modules.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::screen::{MenuState, Screen};
use super::world::{World, WorldConfig, generate_world};
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Difficulty;
use crate::tuning::{PerWeapon, Tuning, WeaponKind};

/// Player locomotion mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locomotion {
    /// Standing or walking on a floor
    Grounded,
    /// Jumping or falling
    Airborne,
    /// On a ladder; gravity and horizontal input are suppressed
    Climbing,
    /// Crouched on a floor at reduced height
    Ducking,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current box size (height shrinks while ducking)
    pub size: Vec2,
    pub standing_height: f32,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub health: i32,
    pub gold: u32,
    pub weapon: WeaponKind,
    /// Rounds loaded per weapon
    pub magazine: PerWeapon<u32>,
    /// Rounds in inventory per weapon
    pub reserve: PerWeapon<u32>,
    /// Remaining reload time (ms); `Some` while a reload is in progress
    pub reload_timer: Option<f32>,
    /// Time until the next shot is allowed (ms)
    pub shoot_cooldown: f32,
    /// Time until enemy contact can hurt again (ms)
    pub contact_cooldown: f32,
    /// Fire intent was held last step (semi-auto weapons need a fresh press)
    pub trigger_held: bool,
    /// Overlapping a ladder this step
    pub on_ladder: bool,
    pub locomotion: Locomotion,
}

impl Player {
    /// Player at the spawn point with the starting pistol loadout
    pub fn new(config: &WorldConfig, tuning: &Tuning) -> Self {
        let pistol_mag = tuning.weapon(WeaponKind::Pistol).magazine;
        let empty = PerWeapon { pistol: 0, rifle: 0, shotgun: 0, laser: 0 };

        Self {
            pos: Vec2::new(PLAYER_SPAWN_X, config.ground_y - PLAYER_SIZE),
            vel: Vec2::ZERO,
            size: Vec2::splat(PLAYER_SIZE),
            standing_height: PLAYER_SIZE,
            facing: 1.0,
            health: PLAYER_MAX_HEALTH,
            gold: 0,
            weapon: WeaponKind::Pistol,
            magazine: PerWeapon { pistol: pistol_mag, ..empty },
            reserve: PerWeapon { pistol: pistol_mag * 2, ..empty },
            reload_timer: None,
            shoot_cooldown: 0.0,
            contact_cooldown: 0.0,
            trigger_held: false,
            on_ladder: false,
            locomotion: Locomotion::Grounded,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Y of the player's feet
    #[inline]
    pub fn feet_y(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        matches!(self.locomotion, Locomotion::Grounded | Locomotion::Ducking)
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reload_timer.is_some()
    }

    pub fn ducking_height(&self) -> f32 {
        (self.standing_height * DUCK_FRACTION).floor()
    }

    /// Box is currently at crouched height
    #[inline]
    pub fn is_ducked(&self) -> bool {
        self.size.y < self.standing_height
    }

    /// Crouch or stand up, keeping the feet where they are
    pub fn set_ducking(&mut self, duck: bool) {
        let target = if duck { self.ducking_height() } else { self.standing_height };
        if self.size.y != target {
            self.pos.y += self.size.y - target;
            self.size.y = target;
        }
    }

    pub fn magazine_of(&self, kind: WeaponKind) -> u32 {
        *self.magazine.get(kind)
    }

    pub fn reserve_of(&self, kind: WeaponKind) -> u32 {
        *self.reserve.get(kind)
    }
}

/// Enemy type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Zombie,
    Ghost,
    Robot,
    Alien,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [
        EnemyKind::Zombie,
        EnemyKind::Ghost,
        EnemyKind::Robot,
        EnemyKind::Alien,
    ];
}

/// Per-type behavior state; each variant carries only what its AI needs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EnemyBody {
    /// Grounded melee walker
    Zombie { on_ground: bool },
    /// Floats on a sine wave around `base_y`, ignoring gravity and obstacles
    Ghost { base_y: f32, phase: f32 },
    /// Grounded climber with a ranged attack
    Robot { on_ground: bool, shoot_timer: f32 },
    /// Faster grounded climber with a ranged attack
    Alien { on_ground: bool, shoot_timer: f32 },
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Walk speed magnitude (pixels/step)
    pub speed: f32,
    /// Roaming direction (±1)
    pub dir: f32,
    /// Time until the next random direction change (ms)
    pub dir_timer: f32,
    /// Red flash after taking damage (ms, presentation only)
    pub hit_timer: f32,
    /// Attack pose after shooting or touching the player (ms, presentation only)
    pub attack_timer: f32,
    pub body: EnemyBody,
}

impl Enemy {
    pub fn kind(&self) -> EnemyKind {
        match self.body {
            EnemyBody::Zombie { .. } => EnemyKind::Zombie,
            EnemyBody::Ghost { .. } => EnemyKind::Ghost,
            EnemyBody::Robot { .. } => EnemyKind::Robot,
            EnemyBody::Alien { .. } => EnemyKind::Alien,
        }
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    /// Ground contact for walkers; ghosts are never grounded
    pub fn on_ground(&self) -> bool {
        match self.body {
            EnemyBody::Zombie { on_ground }
            | EnemyBody::Robot { on_ground, .. }
            | EnemyBody::Alien { on_ground, .. } => on_ground,
            EnemyBody::Ghost { .. } => false,
        }
    }

    pub fn set_on_ground(&mut self, grounded: bool) {
        match &mut self.body {
            EnemyBody::Zombie { on_ground }
            | EnemyBody::Robot { on_ground, .. }
            | EnemyBody::Alien { on_ground, .. } => *on_ground = grounded,
            EnemyBody::Ghost { .. } => {}
        }
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Enemy,
}

/// A bullet, pellet or beam
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub damage: i32,
    pub owner: Owner,
}

impl Projectile {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// Pickup types with their payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Gold(u32),
    Ammo { weapon: WeaponKind, amount: u32 },
    Health(i32),
}

/// A collectible dropped by a dead enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PickupKind,
}

impl Pickup {
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Remaining life (ms)
    pub life: f32,
    pub max_life: f32,
    /// Colour key: the enemy type that burst
    pub color: EnemyKind,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicTrack {
    Game,
    Menu,
}

/// Requests for the audio collaborator, drained by `snapshot`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    Fire(WeaponKind),
    Jump,
    PlayerHit,
    EnemyDeath,
    MenuSelect,
    /// Switch the background track
    Music(MusicTrack),
    /// Music toggled in settings
    MusicEnabled(bool),
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// The single random source for spawns, drops, AI jitter and particles
    pub rng: Pcg32,
    pub config: WorldConfig,
    pub tuning: Tuning,
    /// Difficulty in effect (refreshed from settings every update)
    pub difficulty: Difficulty,
    pub world: World,
    pub player: Player,
    /// Active enemies (sorted by id for determinism)
    pub enemies: Vec<Enemy>,
    /// Active projectiles of both owners (sorted by id for determinism)
    pub projectiles: Vec<Projectile>,
    /// Active pickups (sorted by id for determinism)
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub screen: Screen,
    pub menu: MenuState,
    /// Time until the next enemy spawn (ms)
    pub spawn_cooldown: f32,
    /// Play time this session (ms), drives spawn pacing
    pub elapsed_ms: f32,
    /// Fixed steps simulated this session
    pub time_ticks: u64,
    /// Unsimulated frame time carried between updates (ms)
    pub accumulator: f32,
    /// Cues emitted since the last snapshot
    #[serde(skip)]
    pub audio_cues: Vec<AudioCue>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Build a new session: fresh world, starting player, no enemies
    pub fn new(config: WorldConfig, difficulty: Difficulty, seed: u64) -> Result<Self, SimError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let world = generate_world(&mut rng, &config);
        log::info!("New session (seed {seed}, difficulty {})", difficulty.as_str());

        Ok(Self {
            seed,
            rng,
            config,
            tuning: Tuning::default(),
            difficulty,
            world,
            player: Player::new(&config, &Tuning::default()),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            particles: Vec::new(),
            screen: Screen::Start,
            menu: MenuState::default(),
            spawn_cooldown: 0.0,
            elapsed_ms: 0.0,
            time_ticks: 0,
            accumulator: 0.0,
            audio_cues: Vec::new(),
            next_id: 1,
        })
    }

    /// Replace the balance table (validated first)
    pub fn with_tuning(mut self, tuning: Tuning) -> Result<Self, SimError> {
        tuning.validate()?;
        self.tuning = tuning;
        self.player = Player::new(&self.config, &self.tuning);
        Ok(self)
    }

    /// Full reset: new world, starting player, no entities, timers zeroed
    pub fn reset_session(&mut self) {
        self.world = generate_world(&mut self.rng, &self.config);
        self.player = Player::new(&self.config, &self.tuning);
        self.enemies.clear();
        self.projectiles.clear();
        self.pickups.clear();
        self.particles.clear();
        self.spawn_cooldown = 0.0;
        self.elapsed_ms = 0.0;
        self.time_ticks = 0;
        self.accumulator = 0.0;
        log::info!("Session reset");
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Queue a cue for the audio collaborator
    #[inline]
    pub fn emit(&mut self, cue: AudioCue) {
        self.audio_cues.push(cue);
    }

    /// Ensure entity lists are sorted by ID for deterministic iteration
    pub fn normalize_order(&mut self) {
        self.enemies.sort_by_key(|e| e.id);
        self.projectiles.sort_by_key(|p| p.id);
        self.pickups.sort_by_key(|p| p.id);
    }
}
