//! Combat and economy
//!
//! Weapons (fire, reload, switch), projectiles, damage, loot, pickups,
//! shop purchases and particle bursts.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::input::Controls;
use super::state::{
    AudioCue, Enemy, GameState, Owner, Particle, Pickup, PickupKind, Player, Projectile,
};
use crate::consts::*;
use crate::tuning::{ShopItem, WeaponDef, WeaponKind};

/// Damage the player, keeping health within [0, max].
/// Returns true if the player is now dead.
pub fn damage_player(player: &mut Player, amount: i32) -> bool {
    player.health = (player.health - amount).clamp(0, PLAYER_MAX_HEALTH);
    player.health == 0
}

/// Equip a weapon; any reload in progress is abandoned
pub fn switch_weapon(player: &mut Player, kind: WeaponKind) {
    player.weapon = kind;
    player.reload_timer = None;
}

/// Begin reloading the equipped weapon if it makes sense to
pub fn start_reload(player: &mut Player, def: &WeaponDef) -> bool {
    let kind = player.weapon;
    if player.is_reloading() || player.magazine_of(kind) >= def.magazine || player.reserve_of(kind) == 0 {
        return false;
    }
    player.reload_timer = Some(def.reload_ms);
    log::debug!("Reloading {}", kind.as_str());
    true
}

/// Count down an active reload and move rounds from reserve when it ends
pub fn progress_reload(player: &mut Player, def: &WeaponDef, step_ms: f32) {
    let Some(remaining) = player.reload_timer else {
        return;
    };
    let remaining = remaining - step_ms;
    if remaining > 0.0 {
        player.reload_timer = Some(remaining);
        return;
    }

    let kind = player.weapon;
    let deficit = def.magazine.saturating_sub(player.magazine_of(kind));
    let moved = deficit.min(player.reserve_of(kind));
    *player.magazine.get_mut(kind) += moved;
    *player.reserve.get_mut(kind) -= moved;
    player.reload_timer = None;
}

/// Per-step weapon handling: trigger, reload request, then timers
pub fn update_weapon(state: &mut GameState, controls: &Controls, step_ms: f32) {
    let fresh_press = controls.fire && !state.player.trigger_held;
    if !state.player.is_reloading() {
        if controls.fire {
            try_fire(state, controls.up, fresh_press);
        }
        if controls.reload {
            let kind = state.player.weapon;
            start_reload(&mut state.player, state.tuning.weapon(kind));
        }
    }
    state.player.trigger_held = controls.fire;

    let player = &mut state.player;
    let def = state.tuning.weapon(player.weapon);
    player.shoot_cooldown = (player.shoot_cooldown - step_ms).max(0.0);
    player.contact_cooldown = (player.contact_cooldown - step_ms).max(0.0);
    progress_reload(player, def, step_ms);
}

/// Geometry of one projectile leaving the barrel
struct Shot {
    pos: Vec2,
    vel: Vec2,
    size: Vec2,
}

fn shot_pattern<R: Rng>(player: &Player, def: &WeaponDef, aim_up: bool, rng: &mut R) -> Vec<Shot> {
    let kind = player.weapon;
    let speed = def.bullet_speed;
    let (x, y, w, h) = (player.pos.x, player.pos.y, player.size.x, player.size.y);
    let jitter = |rng: &mut R| {
        if def.spread > 0.0 {
            (rng.random::<f32>() - 0.5) * def.spread * speed
        } else {
            0.0
        }
    };

    (0..def.pellets)
        .map(|_| {
            if aim_up {
                let size = match kind {
                    WeaponKind::Shotgun => Vec2::new(4.0, 4.0),
                    WeaponKind::Laser => Vec2::new(4.0, 12.0),
                    WeaponKind::Pistol | WeaponKind::Rifle => Vec2::new(4.0, 6.0),
                };
                Shot {
                    pos: Vec2::new(x + w / 2.0 - size.x / 2.0, y - size.y),
                    vel: Vec2::new(jitter(rng), -speed),
                    size,
                }
            } else {
                let (size, y_offset) = match kind {
                    WeaponKind::Shotgun => (Vec2::new(4.0, 4.0), 1.0),
                    WeaponKind::Laser => (Vec2::new(12.0, 4.0), 2.0),
                    WeaponKind::Pistol | WeaponKind::Rifle => (Vec2::new(6.0, 3.0), 2.0),
                };
                let muzzle_x = if player.facing > 0.0 {
                    x + w
                } else if kind == WeaponKind::Laser {
                    x - size.x
                } else {
                    // Pellets share the bullet offset
                    x - 6.0
                };
                Shot {
                    pos: Vec2::new(muzzle_x, y + h / 2.0 - y_offset),
                    vel: Vec2::new(speed * player.facing, jitter(rng)),
                    size,
                }
            }
        })
        .collect()
}

/// Fire the equipped weapon if it is ready.
///
/// Needs a loaded round and an expired cooldown. With `Tuning::semi_auto`
/// set, weapons without `auto` also need a fresh trigger press. Returns
/// true if a shot left the barrel.
pub fn try_fire(state: &mut GameState, aim_up: bool, fresh_press: bool) -> bool {
    let kind = state.player.weapon;
    let def = state.tuning.weapon(kind);
    let player = &state.player;
    let needs_press = state.tuning.semi_auto && !def.auto;

    if player.is_reloading()
        || player.magazine_of(kind) == 0
        || player.shoot_cooldown > 0.0
        || (needs_press && !fresh_press)
    {
        return false;
    }

    let shots = shot_pattern(player, def, aim_up, &mut state.rng);
    let damage = def.damage;
    *state.player.magazine.get_mut(kind) -= 1;
    state.player.shoot_cooldown = def.fire_rate_ms;

    for shot in shots {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: shot.pos,
            vel: shot.vel,
            size: shot.size,
            damage,
            owner: Owner::Player,
        });
    }
    state.emit(AudioCue::Fire(kind));
    true
}

/// Move every projectile; drop those that hit cover or leave the world
pub fn update_projectiles(state: &mut GameState) {
    let max_x = state.config.world_width;
    let min_y = -PROJECTILE_MARGIN;
    let max_y = state.config.view_height() + PROJECTILE_MARGIN;
    let obstacles = &state.world.obstacles;

    state.projectiles.retain_mut(|p| {
        p.pos += p.vel;
        let rect = p.rect();
        if obstacles.iter().any(|o| rect.intersects(&o.rect)) {
            return false;
        }
        (0.0..=max_x).contains(&p.pos.x) && (min_y..=max_y).contains(&p.pos.y)
    });
}

/// Player projectiles against enemies; each projectile hits at most one.
/// Dead enemies drop loot, burst into particles and are removed.
pub fn resolve_player_shots(state: &mut GameState, particles: bool) {
    let enemies = &mut state.enemies;
    state.projectiles.retain(|p| {
        if p.owner != Owner::Player {
            return true;
        }
        let rect = p.rect();
        match enemies.iter_mut().find(|e| !e.is_dead() && e.rect().intersects(&rect)) {
            Some(enemy) => {
                enemy.health -= p.damage;
                enemy.hit_timer = HIT_FLASH_MS;
                false
            }
            None => true,
        }
    });

    if !state.enemies.iter().any(Enemy::is_dead) {
        return;
    }
    let (dead, alive): (Vec<Enemy>, Vec<Enemy>) =
        std::mem::take(&mut state.enemies).into_iter().partition(Enemy::is_dead);
    state.enemies = alive;

    for enemy in &dead {
        log::debug!("Enemy {} ({:?}) destroyed", enemy.id, enemy.kind());
        if particles {
            spawn_particles(state, enemy);
        }
        spawn_drops(state, enemy);
        state.emit(AudioCue::EnemyDeath);
    }
}

/// Enemy projectiles against the player.
/// Returns true if the player died; later hits are then left alone.
pub fn resolve_enemy_shots(state: &mut GameState) -> bool {
    let mut dead = state.player.health == 0;
    let player = &mut state.player;
    let cues = &mut state.audio_cues;

    state.projectiles.retain(|p| {
        if dead || p.owner != Owner::Enemy || !p.rect().intersects(&player.rect()) {
            return true;
        }
        dead = damage_player(player, p.damage);
        cues.push(AudioCue::PlayerHit);
        false
    });
    dead
}

/// Touching enemies hurt and push the player back.
/// Returns true if the player died.
pub fn resolve_contact(state: &mut GameState) -> bool {
    let damage = state.tuning.contact_damage;
    let knockback = state.tuning.contact_knockback;
    let cooldown = state.tuning.contact_cooldown_ms;
    let max_x = state.config.world_width - state.player.size.x;
    let player = &mut state.player;

    for enemy in state.enemies.iter_mut() {
        if player.contact_cooldown > 0.0 {
            break;
        }
        if !enemy.rect().intersects(&player.rect()) {
            continue;
        }

        let dead = damage_player(player, damage);
        let push = if player.pos.x < enemy.pos.x { -knockback } else { knockback };
        player.pos.x = (player.pos.x + push).clamp(0.0, max_x);
        player.contact_cooldown = cooldown;
        enemy.attack_timer = ATTACK_POSE_MS;
        state.audio_cues.push(AudioCue::PlayerHit);
        if dead {
            return true;
        }
    }
    false
}

/// Roll loot for a dead enemy
pub fn spawn_drops(state: &mut GameState, enemy: &Enemy) {
    let y = state.config.ground_y - PICKUP_DROP_HEIGHT;
    let x = enemy.pos.x;
    let policy = state.tuning.drops.clone();

    let gold = state.rng.random_range(policy.gold_min..=policy.gold_max);
    push_pickup(state, x, y, PickupKind::Gold(gold));

    if state.rng.random_bool(policy.ammo_chance) {
        let allowed = &state.tuning.enemy(enemy.kind()).ammo_drops;
        if !allowed.is_empty() {
            let weapon = allowed[state.rng.random_range(0..allowed.len())];
            let amount = state.tuning.weapon(weapon).ammo_drop;
            push_pickup(state, x + 16.0, y, PickupKind::Ammo { weapon, amount });
        }
    }

    if state.rng.random_bool(policy.health_chance) {
        push_pickup(state, x + 8.0, y, PickupKind::Health(policy.health_value));
    }
}

fn push_pickup(state: &mut GameState, x: f32, y: f32, kind: PickupKind) {
    let id = state.next_entity_id();
    state.pickups.push(Pickup {
        id,
        pos: Vec2::new(x, y),
        size: Vec2::splat(PICKUP_SIZE),
        kind,
    });
}

/// Apply and remove every pickup the player overlaps
pub fn collect_pickups(state: &mut GameState) {
    let player = &mut state.player;
    state.pickups.retain(|pickup| {
        if !pickup.rect().intersects(&player.rect()) {
            return true;
        }
        match pickup.kind {
            PickupKind::Gold(value) => player.gold += value,
            PickupKind::Ammo { weapon, amount } => *player.reserve.get_mut(weapon) += amount,
            PickupKind::Health(value) => {
                player.health = (player.health + value).clamp(0, PLAYER_MAX_HEALTH);
            }
        }
        false
    });
}

/// Burst of 6-9 particles from an enemy's center
pub fn spawn_particles(state: &mut GameState, enemy: &Enemy) {
    let center = enemy.rect().center();
    let rng = &mut state.rng;
    let count = rng.random_range(6..=9);

    for _ in 0..count {
        let angle = rng.random::<f32>() * TAU;
        let speed = 1.0 + rng.random::<f32>() * 2.0;
        state.particles.push(Particle {
            pos: center,
            vel: Vec2::from_angle(angle) * speed,
            life: 400.0 + rng.random::<f32>() * 200.0,
            max_life: 400.0 + rng.random::<f32>() * 200.0,
            color: enemy.kind(),
        });
    }
}

pub fn update_particles(state: &mut GameState, step_ms: f32) {
    state.particles.retain_mut(|p| {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.life -= step_ms;
        p.life > 0.0
    });
}

/// Buy a shop item. Returns false (and changes nothing) when the purchase
/// isn't allowed.
pub fn purchase(state: &mut GameState, item: ShopItem) -> bool {
    let player = &mut state.player;
    match item {
        ShopItem::Weapon(kind) => {
            let def = state.tuning.weapon(kind);
            if player.weapon == kind || player.gold < def.cost {
                return false;
            }
            player.gold -= def.cost;
            switch_weapon(player, kind);
            *player.magazine.get_mut(kind) = def.magazine;
            *player.reserve.get_mut(kind) += def.magazine * 2;
            log::debug!("Bought {} for {} gold", def.name, def.cost);
        }
        ShopItem::Ammo(index) => {
            let Some(bundle) = state.tuning.ammo_bundles.get(index) else {
                return false;
            };
            if player.gold < bundle.cost {
                return false;
            }
            player.gold -= bundle.cost;
            *player.reserve.get_mut(bundle.weapon) += bundle.quantity;
            log::debug!("Bought {} for {} gold", bundle.name, bundle.cost);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::spawner::build_enemy;
    use crate::sim::state::EnemyKind;
    use crate::sim::world::{World, WorldConfig};

    fn flat_state() -> GameState {
        let mut state = GameState::new(WorldConfig::default(), Difficulty::Normal, 9).unwrap();
        state.world = World::default();
        state
    }

    #[test]
    fn test_fire_consumes_one_round() {
        let mut state = flat_state();
        assert!(try_fire(&mut state, false, true));
        assert_eq!(state.player.magazine_of(WeaponKind::Pistol), 11);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.player.shoot_cooldown, 300.0);
        assert_eq!(state.audio_cues, vec![AudioCue::Fire(WeaponKind::Pistol)]);

        let p = &state.projectiles[0];
        assert_eq!(p.size, Vec2::new(6.0, 3.0));
        assert_eq!(p.pos.x, state.player.pos.x + 32.0);
        assert_eq!(p.vel, Vec2::new(6.0, 0.0));
    }

    #[test]
    fn test_fire_blocked_by_cooldown_or_empty() {
        let mut state = flat_state();
        state.player.shoot_cooldown = 10.0;
        assert!(!try_fire(&mut state, false, true));

        state.player.shoot_cooldown = 0.0;
        state.player.magazine.pistol = 0;
        assert!(!try_fire(&mut state, false, true));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_held_trigger_fires_any_weapon() {
        let mut state = flat_state();
        assert!(try_fire(&mut state, false, false));

        state.player.shoot_cooldown = 0.0;
        state.player.weapon = WeaponKind::Shotgun;
        state.player.magazine.shotgun = 5;
        assert!(try_fire(&mut state, false, false));
    }

    #[test]
    fn test_semi_auto_option_needs_fresh_press() {
        let mut state = flat_state();
        state.tuning.semi_auto = true;
        assert!(!try_fire(&mut state, false, false));
        assert!(try_fire(&mut state, false, true));

        state.player.shoot_cooldown = 0.0;
        state.player.weapon = WeaponKind::Rifle;
        state.player.magazine.rifle = 5;
        assert!(try_fire(&mut state, false, false));
    }

    #[test]
    fn test_shotgun_spread_and_aim_up() {
        let mut state = flat_state();
        state.player.weapon = WeaponKind::Shotgun;
        state.player.magazine.shotgun = 5;
        assert!(try_fire(&mut state, false, true));
        assert_eq!(state.projectiles.len(), 3);
        assert_eq!(state.player.magazine_of(WeaponKind::Shotgun), 4);
        for p in &state.projectiles {
            assert_eq!(p.vel.x, 5.0);
            assert!(p.vel.y.abs() <= 0.5 * 0.3 * 5.0);
        }

        state.projectiles.clear();
        state.player.shoot_cooldown = 0.0;
        state.player.weapon = WeaponKind::Laser;
        state.player.magazine.laser = 1;
        assert!(try_fire(&mut state, true, true));
        let beam = &state.projectiles[0];
        assert_eq!(beam.size, Vec2::new(4.0, 12.0));
        assert_eq!(beam.vel, Vec2::new(0.0, -10.0));
        assert_eq!(beam.pos.y, state.player.pos.y - 12.0);
    }

    #[test]
    fn test_reload_transfers_up_to_reserve() {
        let mut player = flat_state().player;
        let def = crate::tuning::Tuning::default().weapon(WeaponKind::Pistol).clone();
        player.magazine.pistol = 2;
        player.reserve.pistol = 4;

        assert!(start_reload(&mut player, &def));
        assert!(!start_reload(&mut player, &def));
        progress_reload(&mut player, &def, 500.0);
        assert!(player.is_reloading());
        progress_reload(&mut player, &def, 100.0);
        assert!(!player.is_reloading());
        assert_eq!(player.magazine.pistol, 6);
        assert_eq!(player.reserve.pistol, 0);

        // Nothing left to load
        assert!(!start_reload(&mut player, &def));
    }

    #[test]
    fn test_reload_refused_when_full() {
        let mut player = flat_state().player;
        let def = crate::tuning::Tuning::default().weapon(WeaponKind::Pistol).clone();
        assert!(!start_reload(&mut player, &def));
    }

    #[test]
    fn test_switch_cancels_reload() {
        let mut player = flat_state().player;
        player.reload_timer = Some(300.0);
        switch_weapon(&mut player, WeaponKind::Rifle);
        assert!(!player.is_reloading());
    }

    #[test]
    fn test_projectile_removed_by_cover_and_bounds() {
        let mut state = flat_state();
        state.world.obstacles.push(crate::sim::world::Obstacle {
            kind: crate::sim::world::ObstacleKind::Crate,
            rect: crate::sim::rect::Rect::new(150.0, 400.0, 20.0, 48.0),
        });
        try_fire(&mut state, false, true);
        let mut steps = 0;
        while !state.projectiles.is_empty() {
            update_projectiles(&mut state);
            steps += 1;
            assert!(steps < 20);
        }

        state.projectiles.push(Projectile {
            id: 99,
            pos: Vec2::new(1.0, 300.0),
            vel: Vec2::new(-6.0, 0.0),
            size: Vec2::new(6.0, 3.0),
            damage: 2,
            owner: Owner::Player,
        });
        update_projectiles(&mut state);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_enemy_dies_and_drops_loot() {
        let mut state = flat_state();
        let enemy = build_enemy(&mut state, EnemyKind::Zombie, 300.0);
        let target = enemy.rect().center();
        state.enemies.push(enemy);

        let shoot = |state: &mut GameState| {
            let id = state.next_entity_id();
            state.projectiles.push(Projectile {
                id,
                pos: target,
                vel: Vec2::ZERO,
                size: Vec2::new(6.0, 3.0),
                damage: 2,
                owner: Owner::Player,
            });
        };

        shoot(&mut state);
        resolve_player_shots(&mut state, true);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.enemies[0].hit_timer, HIT_FLASH_MS);
        assert!(state.projectiles.is_empty());

        shoot(&mut state);
        resolve_player_shots(&mut state, true);
        assert!(state.enemies.is_empty());
        assert!((6..=9).contains(&state.particles.len()));
        assert!(state.audio_cues.contains(&AudioCue::EnemyDeath));

        let gold: Vec<_> = state
            .pickups
            .iter()
            .filter_map(|p| match p.kind {
                PickupKind::Gold(v) => Some(v),
                _ => None,
            })
            .collect();
        assert_eq!(gold.len(), 1);
        assert!((4..=8).contains(&gold[0]));
        for pickup in &state.pickups {
            if let PickupKind::Ammo { weapon, .. } = pickup.kind {
                assert!(matches!(weapon, WeaponKind::Pistol | WeaponKind::Rifle));
            }
        }
    }

    #[test]
    fn test_one_projectile_one_enemy() {
        let mut state = flat_state();
        let a = build_enemy(&mut state, EnemyKind::Robot, 300.0);
        let b = build_enemy(&mut state, EnemyKind::Robot, 300.0);
        let pos = a.rect().center();
        state.enemies.push(a);
        state.enemies.push(b);
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(6.0, 3.0),
            damage: 2,
            owner: Owner::Player,
        });
        resolve_player_shots(&mut state, false);
        let total: i32 = state.enemies.iter().map(|e| e.health).sum();
        assert_eq!(total, 4 + 4 - 2);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_health_clamped_and_death_stops_damage() {
        let mut state = flat_state();
        state.player.health = 3;
        let rect = state.player.rect();
        for i in 0..2 {
            state.projectiles.push(Projectile {
                id: 100 + i,
                pos: rect.center(),
                vel: Vec2::ZERO,
                size: Vec2::new(8.0, 4.0),
                damage: 8,
                owner: Owner::Enemy,
            });
        }
        assert!(resolve_enemy_shots(&mut state));
        assert_eq!(state.player.health, 0);
        // Second shot left untouched
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.audio_cues, vec![AudioCue::PlayerHit]);
    }

    #[test]
    fn test_contact_damage_and_knockback() {
        let mut state = flat_state();
        let mut enemy = build_enemy(&mut state, EnemyKind::Zombie, 0.0);
        enemy.pos = state.player.pos + Vec2::new(20.0, 0.0);
        state.enemies.push(enemy);
        let x = state.player.pos.x;

        assert!(!resolve_contact(&mut state));
        assert_eq!(state.player.health, 95);
        assert_eq!(state.player.pos.x, x - 10.0);
        assert_eq!(state.enemies[0].attack_timer, ATTACK_POSE_MS);
    }

    #[test]
    fn test_contact_cooldown_limits_hits() {
        let mut state = flat_state();
        state.tuning.contact_cooldown_ms = 500.0;
        let mut enemy = build_enemy(&mut state, EnemyKind::Zombie, 0.0);
        enemy.pos = state.player.pos;
        state.enemies.push(enemy.clone());
        state.enemies.push(enemy);
        resolve_contact(&mut state);
        assert_eq!(state.player.health, 95);
    }

    #[test]
    fn test_pickups_apply_once() {
        let mut state = flat_state();
        let pos = state.player.pos;
        push_pickup(&mut state, pos.x, pos.y, PickupKind::Gold(7));
        push_pickup(&mut state, pos.x, pos.y, PickupKind::Ammo { weapon: WeaponKind::Laser, amount: 1 });
        push_pickup(&mut state, pos.x, pos.y, PickupKind::Health(5));
        collect_pickups(&mut state);
        collect_pickups(&mut state);
        assert_eq!(state.player.gold, 7);
        assert_eq!(state.player.reserve_of(WeaponKind::Laser), 1);
        assert_eq!(state.player.health, 100);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_health_pickup_stays_in_range() {
        let mut state = flat_state();
        state.player.health = 3;
        let pos = state.player.pos;
        push_pickup(&mut state, pos.x, pos.y, PickupKind::Health(-10));
        collect_pickups(&mut state);
        assert_eq!(state.player.health, 0);
    }

    #[test]
    fn test_purchase_rules() {
        let mut state = flat_state();
        assert!(!purchase(&mut state, ShopItem::Weapon(WeaponKind::Rifle)));
        assert_eq!(state.player.weapon, WeaponKind::Pistol);

        state.player.gold = 150;
        assert!(purchase(&mut state, ShopItem::Weapon(WeaponKind::Rifle)));
        assert_eq!(state.player.gold, 50);
        assert_eq!(state.player.weapon, WeaponKind::Rifle);
        assert_eq!(state.player.magazine_of(WeaponKind::Rifle), 50);
        assert_eq!(state.player.reserve_of(WeaponKind::Rifle), 100);

        // Already equipped
        assert!(!purchase(&mut state, ShopItem::Weapon(WeaponKind::Rifle)));
        assert!(purchase(&mut state, ShopItem::Ammo(1)));
        assert_eq!(state.player.gold, 40);
        assert_eq!(state.player.reserve_of(WeaponKind::Rifle), 110);
        assert!(!purchase(&mut state, ShopItem::Ammo(42)));
    }

    #[test]
    fn test_particles_fall_and_expire() {
        let mut state = flat_state();
        let enemy = build_enemy(&mut state, EnemyKind::Ghost, 300.0);
        spawn_particles(&mut state, &enemy);
        assert!(!state.particles.is_empty());
        for _ in 0..40 {
            update_particles(&mut state, STEP_MS);
        }
        assert!(state.particles.is_empty());
    }
}
