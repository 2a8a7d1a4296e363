//! Data-driven game balance
//!
//! Weapon stats, shop bundles, enemy stats and drop policy. Defaults match
//! the shipped game; `Tuning::from_json` lets a caller override any subset.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::sim::state::EnemyKind;

/// Weapon identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeaponKind {
    Pistol,
    Rifle,
    Shotgun,
    Laser,
}

impl WeaponKind {
    /// Shop order
    pub const ALL: [WeaponKind; 4] = [
        WeaponKind::Pistol,
        WeaponKind::Rifle,
        WeaponKind::Shotgun,
        WeaponKind::Laser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponKind::Pistol => "pistol",
            WeaponKind::Rifle => "rifle",
            WeaponKind::Shotgun => "shotgun",
            WeaponKind::Laser => "laser",
        }
    }
}

impl FromStr for WeaponKind {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pistol" => Ok(WeaponKind::Pistol),
            "rifle" => Ok(WeaponKind::Rifle),
            "shotgun" => Ok(WeaponKind::Shotgun),
            "laser" => Ok(WeaponKind::Laser),
            _ => Err(SimError::UnknownWeapon(s.to_string())),
        }
    }
}

/// One value per weapon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerWeapon<T> {
    pub pistol: T,
    pub rifle: T,
    pub shotgun: T,
    pub laser: T,
}

impl<T> PerWeapon<T> {
    pub fn get(&self, kind: WeaponKind) -> &T {
        match kind {
            WeaponKind::Pistol => &self.pistol,
            WeaponKind::Rifle => &self.rifle,
            WeaponKind::Shotgun => &self.shotgun,
            WeaponKind::Laser => &self.laser,
        }
    }

    pub fn get_mut(&mut self, kind: WeaponKind) -> &mut T {
        match kind {
            WeaponKind::Pistol => &mut self.pistol,
            WeaponKind::Rifle => &mut self.rifle,
            WeaponKind::Shotgun => &mut self.shotgun,
            WeaponKind::Laser => &mut self.laser,
        }
    }
}

/// Static weapon definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDef {
    pub name: String,
    /// Purchase price in gold
    pub cost: u32,
    /// Damage per projectile
    pub damage: i32,
    /// Magazine capacity
    pub magazine: u32,
    pub reload_ms: f32,
    /// Projectile speed (pixels/step)
    pub bullet_speed: f32,
    /// Minimum interval between shots (ms)
    pub fire_rate_ms: f32,
    /// Fires while the trigger is held even under `Tuning::semi_auto`
    pub auto: bool,
    /// Projectiles per shot (shotgun)
    #[serde(default = "one")]
    pub pellets: u32,
    /// Random deviation factor per pellet
    #[serde(default)]
    pub spread: f32,
    /// Rounds granted by one ammo drop
    pub ammo_drop: u32,
}

fn one() -> u32 {
    1
}

impl WeaponDef {
    fn new(name: &str, cost: u32, damage: i32, magazine: u32, reload_ms: f32) -> Self {
        Self {
            name: name.to_string(),
            cost,
            damage,
            magazine,
            reload_ms,
            bullet_speed: 6.0,
            fire_rate_ms: 300.0,
            auto: false,
            pellets: 1,
            spread: 0.0,
            ammo_drop: 1,
        }
    }
}

impl Default for PerWeapon<WeaponDef> {
    fn default() -> Self {
        Self {
            pistol: WeaponDef::new("Pistol", 0, 2, 12, 600.0),
            rifle: WeaponDef {
                bullet_speed: 8.0,
                fire_rate_ms: 100.0,
                auto: true,
                ammo_drop: 10,
                ..WeaponDef::new("Rifle", 100, 2, 50, 800.0)
            },
            shotgun: WeaponDef {
                bullet_speed: 5.0,
                fire_rate_ms: 500.0,
                pellets: 3,
                spread: 0.3,
                ammo_drop: 5,
                ..WeaponDef::new("Shotgun", 200, 8, 5, 2000.0)
            },
            laser: WeaponDef {
                bullet_speed: 10.0,
                fire_rate_ms: 80.0,
                auto: true,
                ammo_drop: 1,
                ..WeaponDef::new("Laser", 300, 5, 30, 4000.0)
            },
        }
    }
}

/// Purchasable ammunition bundle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmmoBundle {
    pub weapon: WeaponKind,
    pub name: String,
    pub cost: u32,
    pub quantity: u32,
}

/// An entry of the shop list (weapons first, then ammo bundles)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopItem {
    Weapon(WeaponKind),
    /// Index into `Tuning::ammo_bundles`
    Ammo(usize),
}

/// Ranged attack stats for armed enemies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedStats {
    pub bullet_speed: f32,
    /// Base damage before difficulty adjustment
    pub damage: i32,
    /// Shot interval is `interval_ms + U[0, interval_jitter_ms)`
    pub interval_ms: f32,
    pub interval_jitter_ms: f32,
}

/// Per-type enemy stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Base hit points before difficulty adjustment
    pub health: i32,
    /// Walk speed is `speed + U[0, speed_jitter)`
    pub speed: f32,
    #[serde(default)]
    pub speed_jitter: f32,
    #[serde(default)]
    pub ranged: Option<RangedStats>,
    /// Ammo kinds eligible to drop on death
    #[serde(default)]
    pub ammo_drops: Vec<WeaponKind>,
}

/// One value per enemy type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerEnemy<T> {
    pub zombie: T,
    pub ghost: T,
    pub robot: T,
    pub alien: T,
}

impl<T> PerEnemy<T> {
    pub fn get(&self, kind: EnemyKind) -> &T {
        match kind {
            EnemyKind::Zombie => &self.zombie,
            EnemyKind::Ghost => &self.ghost,
            EnemyKind::Robot => &self.robot,
            EnemyKind::Alien => &self.alien,
        }
    }
}

impl Default for PerEnemy<EnemyStats> {
    fn default() -> Self {
        Self {
            zombie: EnemyStats {
                health: 3,
                speed: 1.0,
                speed_jitter: 0.4,
                ranged: None,
                ammo_drops: vec![WeaponKind::Pistol, WeaponKind::Rifle],
            },
            ghost: EnemyStats {
                health: 2,
                speed: 1.2,
                speed_jitter: 0.0,
                ranged: None,
                ammo_drops: Vec::new(),
            },
            robot: EnemyStats {
                health: 4,
                speed: 0.8,
                speed_jitter: 0.0,
                ranged: Some(RangedStats {
                    bullet_speed: 4.0,
                    damage: 8,
                    interval_ms: 2000.0,
                    interval_jitter_ms: 1000.0,
                }),
                ammo_drops: vec![WeaponKind::Rifle, WeaponKind::Laser],
            },
            alien: EnemyStats {
                health: 3,
                speed: 1.5,
                speed_jitter: 0.0,
                ranged: Some(RangedStats {
                    bullet_speed: 5.0,
                    damage: 6,
                    interval_ms: 2500.0,
                    interval_jitter_ms: 1000.0,
                }),
                ammo_drops: vec![WeaponKind::Shotgun, WeaponKind::Laser],
            },
        }
    }
}

/// Loot rolled when an enemy dies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropPolicy {
    /// Inclusive gold range
    pub gold_min: u32,
    pub gold_max: u32,
    pub ammo_chance: f64,
    pub health_chance: f64,
    pub health_value: i32,
}

impl Default for DropPolicy {
    fn default() -> Self {
        Self {
            gold_min: 4,
            gold_max: 8,
            ammo_chance: 0.6,
            health_chance: 0.2,
            health_value: 5,
        }
    }
}

/// Complete balance table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub weapons: PerWeapon<WeaponDef>,
    pub ammo_bundles: Vec<AmmoBundle>,
    pub enemies: PerEnemy<EnemyStats>,
    pub drops: DropPolicy,
    /// Damage dealt by touching an enemy
    pub contact_damage: i32,
    /// Pixels the player is pushed away on contact
    pub contact_knockback: f32,
    /// Minimum time between contact hits (0 = every step of overlap)
    pub contact_cooldown_ms: f32,
    /// Weapons without `auto` need a fresh trigger press per shot.
    /// Off by default: holding fire repeats at the weapon's fire rate.
    pub semi_auto: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        let bundle = |weapon, name: &str, cost, quantity| AmmoBundle {
            weapon,
            name: name.to_string(),
            cost,
            quantity,
        };
        Self {
            weapons: PerWeapon::default(),
            ammo_bundles: vec![
                bundle(WeaponKind::Pistol, "PISTOL AMMO", 5, 1),
                bundle(WeaponKind::Rifle, "RIFLE AMMO", 10, 10),
                bundle(WeaponKind::Shotgun, "SHOTGUN SHELLS", 5, 5),
                bundle(WeaponKind::Laser, "BATTERY", 10, 1),
            ],
            enemies: PerEnemy::default(),
            drops: DropPolicy::default(),
            contact_damage: 5,
            contact_knockback: 10.0,
            contact_cooldown_ms: 0.0,
            semi_auto: false,
        }
    }
}

impl Tuning {
    pub fn weapon(&self, kind: WeaponKind) -> &WeaponDef {
        self.weapons.get(kind)
    }

    pub fn enemy(&self, kind: EnemyKind) -> &EnemyStats {
        self.enemies.get(kind)
    }

    /// Shop list: every weapon in order, then every ammo bundle
    pub fn shop_items(&self) -> Vec<ShopItem> {
        WeaponKind::ALL
            .iter()
            .map(|&w| ShopItem::Weapon(w))
            .chain((0..self.ammo_bundles.len()).map(ShopItem::Ammo))
            .collect()
    }

    /// Load overrides from JSON; keys not present keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let invalid = |reason: String| Err(SimError::InvalidTuning { reason });

        for kind in WeaponKind::ALL {
            let w = self.weapon(kind);
            if w.magazine == 0 {
                return invalid(format!("{} magazine must be at least 1", kind.as_str()));
            }
            if w.pellets == 0 {
                return invalid(format!("{} must fire at least one pellet", kind.as_str()));
            }
            let timings = [w.reload_ms, w.fire_rate_ms, w.bullet_speed, w.spread];
            if timings.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return invalid(format!("{} has a negative or non-finite stat", kind.as_str()));
            }
        }
        if self.drops.gold_min > self.drops.gold_max {
            return invalid("gold_min exceeds gold_max".to_string());
        }
        for chance in [self.drops.ammo_chance, self.drops.health_chance] {
            if !(0.0..=1.0).contains(&chance) {
                return invalid(format!("drop chance {chance} outside [0, 1]"));
            }
        }
        if self.drops.health_value < 0 {
            return invalid("health pickup value must be non-negative".to_string());
        }
        for kind in EnemyKind::ALL {
            let e = self.enemy(kind);
            if e.health < 1 {
                return invalid(format!("{kind:?} health must be at least 1"));
            }
            if [e.speed, e.speed_jitter].iter().any(|v| !v.is_finite() || *v < 0.0) {
                return invalid(format!("{kind:?} speed must be non-negative"));
            }
            if let Some(r) = &e.ranged {
                let stats = [r.bullet_speed, r.interval_ms, r.interval_jitter_ms];
                if r.damage < 0 || stats.iter().any(|v| !v.is_finite() || *v < 0.0) {
                    return invalid(format!("{kind:?} has a negative or non-finite ranged stat"));
                }
            }
        }
        if self.contact_damage < 0 {
            return invalid("contact damage must be non-negative".to_string());
        }
        let contact = [self.contact_knockback, self.contact_cooldown_ms];
        if contact.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return invalid("contact knockback and cooldown must be non-negative".to_string());
        }
        Ok(())
    }
}
