//! Enemy spawning
//!
//! Enemies arrive off-screen ahead of the player on a shrinking cadence,
//! with the type mix shifting toward armed enemies as play time grows.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, EnemyBody, EnemyKind, GameState};
use crate::consts::*;
use crate::ramp_factor;

/// Spawn interval shrinks linearly to its floor over this much play time
pub const SPAWN_RAMP_MS: f32 = 120_000.0;
pub const SPAWN_RAMP_FLOOR: f32 = 0.4;
/// Base interval range before difficulty and time scaling (ms)
pub const SPAWN_INTERVAL_MIN: f32 = 1200.0;
pub const SPAWN_INTERVAL_MAX: f32 = 2400.0;
/// Enemies appear at least this far past the right edge of the view
pub const SPAWN_OFFSET: f32 = 200.0;
pub const SPAWN_SPREAD: f32 = 400.0;
/// Ghost hover height range above a grounded enemy's top
const GHOST_HOVER_MIN: f32 = 80.0;
const GHOST_HOVER_SPREAD: f32 = 150.0;

/// Type weights in `EnemyKind::ALL` order for a given play time
pub fn spawn_weights(elapsed_ms: f32) -> [f32; 4] {
    let minutes = elapsed_ms / 60_000.0;
    if minutes > 2.0 {
        [0.25, 0.20, 0.30, 0.25]
    } else if minutes > 1.0 {
        [0.30, 0.23, 0.27, 0.20]
    } else {
        [0.40, 0.25, 0.20, 0.15]
    }
}

/// Map a uniform roll in [0, 1) onto an enemy type
pub fn pick_kind(elapsed_ms: f32, roll: f32) -> EnemyKind {
    let mut threshold = 0.0;
    for (kind, weight) in EnemyKind::ALL.into_iter().zip(spawn_weights(elapsed_ms)) {
        threshold += weight;
        if roll < threshold {
            return kind;
        }
    }
    EnemyKind::Alien
}

/// Create an enemy of `kind` at horizontal position `x`, standing on the
/// ground (ghosts hover above it)
pub fn build_enemy(state: &mut GameState, kind: EnemyKind, x: f32) -> Enemy {
    let id = state.next_entity_id();
    let stats = state.tuning.enemy(kind);
    let rng = &mut state.rng;
    let ground_top = state.config.ground_y - ENEMY_SIZE;

    let health = state.difficulty.adjust_health(stats.health);
    let speed = stats.speed + rng.random::<f32>() * stats.speed_jitter;
    let shoot_timer = stats
        .ranged
        .map(|r| r.interval_ms + rng.random::<f32>() * r.interval_jitter_ms)
        .unwrap_or(0.0);

    let body = match kind {
        EnemyKind::Zombie => EnemyBody::Zombie { on_ground: false },
        EnemyKind::Ghost => EnemyBody::Ghost {
            base_y: ground_top - GHOST_HOVER_MIN - rng.random::<f32>() * GHOST_HOVER_SPREAD,
            phase: rng.random::<f32>() * TAU,
        },
        EnemyKind::Robot => EnemyBody::Robot { on_ground: false, shoot_timer },
        EnemyKind::Alien => EnemyBody::Alien { on_ground: false, shoot_timer },
    };
    let y = match body {
        EnemyBody::Ghost { base_y, .. } => base_y,
        _ => ground_top,
    };

    Enemy {
        id,
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        size: Vec2::splat(ENEMY_SIZE),
        health,
        max_health: health,
        speed,
        dir: -1.0,
        dir_timer: rng.random_range(1000.0..3000.0),
        hit_timer: 0.0,
        attack_timer: 0.0,
        body,
    }
}

/// Count down the spawn timer; on expiry spawn one enemy and re-arm
pub fn update_spawner(state: &mut GameState, step_ms: f32) {
    state.spawn_cooldown -= step_ms;
    if state.spawn_cooldown > 0.0 {
        return;
    }

    let kind = pick_kind(state.elapsed_ms, state.rng.random::<f32>());
    let x = state.player.pos.x
        + state.config.view_width
        + SPAWN_OFFSET
        + state.rng.random::<f32>() * SPAWN_SPREAD;
    let enemy = build_enemy(state, kind, x);
    log::debug!("Spawned {:?} #{} at x={:.0}", kind, enemy.id, x);
    state.enemies.push(enemy);

    let base = state.rng.random_range(SPAWN_INTERVAL_MIN..SPAWN_INTERVAL_MAX);
    state.spawn_cooldown = base
        * state.difficulty.spawn_interval_multiplier()
        * ramp_factor(state.elapsed_ms, SPAWN_RAMP_MS, SPAWN_RAMP_FLOOR);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::world::WorldConfig;

    fn session(difficulty: Difficulty) -> GameState {
        GameState::new(WorldConfig::default(), difficulty, 11).unwrap()
    }

    #[test]
    fn test_weights_sum_to_one() {
        for elapsed in [0.0, 60_000.0, 90_000.0, 121_000.0, 600_000.0] {
            let sum: f32 = spawn_weights(elapsed).iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_pick_kind_thresholds() {
        assert_eq!(pick_kind(0.0, 0.0), EnemyKind::Zombie);
        assert_eq!(pick_kind(0.0, 0.39), EnemyKind::Zombie);
        assert_eq!(pick_kind(0.0, 0.41), EnemyKind::Ghost);
        assert_eq!(pick_kind(0.0, 0.70), EnemyKind::Robot);
        assert_eq!(pick_kind(0.0, 0.99), EnemyKind::Alien);
        // Late game favors armed enemies
        assert_eq!(pick_kind(180_000.0, 0.30), EnemyKind::Ghost);
        assert_eq!(pick_kind(180_000.0, 0.60), EnemyKind::Robot);
    }

    #[test]
    fn test_first_spawn_is_immediate() {
        let mut state = session(Difficulty::Normal);
        update_spawner(&mut state, STEP_MS);
        assert_eq!(state.enemies.len(), 1);

        let e = &state.enemies[0];
        let min_x = state.player.pos.x + state.config.view_width + SPAWN_OFFSET;
        assert!(e.pos.x >= min_x && e.pos.x < min_x + SPAWN_SPREAD);
        assert!((1200.0 * 0.4..2400.0).contains(&state.spawn_cooldown));
    }

    #[test]
    fn test_difficulty_scales_health_and_cadence() {
        let mut easy = session(Difficulty::Easy);
        let mut hard = session(Difficulty::Hard);
        assert_eq!(build_enemy(&mut easy, EnemyKind::Ghost, 0.0).health, 1);
        assert_eq!(build_enemy(&mut hard, EnemyKind::Robot, 0.0).health, 5);

        update_spawner(&mut hard, STEP_MS);
        assert!(hard.spawn_cooldown < 2400.0 * 0.7);
        update_spawner(&mut easy, STEP_MS);
        assert!(easy.spawn_cooldown >= 1200.0 * 1.4);
    }

    #[test]
    fn test_late_cadence_hits_floor() {
        let mut state = session(Difficulty::Normal);
        state.elapsed_ms = 200_000.0;
        update_spawner(&mut state, STEP_MS);
        assert!(state.spawn_cooldown < 2400.0 * 0.4 + 0.01);
    }

    #[test]
    fn test_ghost_hovers_above_ground() {
        let mut state = session(Difficulty::Normal);
        for _ in 0..20 {
            let ghost = build_enemy(&mut state, EnemyKind::Ghost, 500.0);
            let top = state.config.ground_y - ENEMY_SIZE;
            assert!(ghost.pos.y <= top - 80.0 && ghost.pos.y >= top - 230.0);
        }
    }
}
