//! Enemy behavior
//!
//! One pass over every enemy per step: roaming, per-type movement, ranged
//! attacks, then pruning of enemies that wandered far from the player.

use glam::Vec2;
use rand::Rng;

use super::physics::step_enemy_body;
use super::state::{Enemy, EnemyBody, GameState, Owner, Projectile};
use super::world::Ladder;
use crate::consts::*;
use crate::facing_toward;
use crate::settings::Difficulty;
use crate::tuning::RangedStats;

/// Count down presentation timers and re-roll the roaming direction
fn tick_timers<R: Rng>(enemy: &mut Enemy, step_ms: f32, rng: &mut R) {
    enemy.attack_timer = (enemy.attack_timer - step_ms).max(0.0);
    enemy.hit_timer = (enemy.hit_timer - step_ms).max(0.0);
    enemy.dir_timer -= step_ms;
    if enemy.dir_timer <= 0.0 {
        enemy.dir = if rng.random_bool(0.5) { -1.0 } else { 1.0 };
        enemy.dir_timer = rng.random_range(1000.0..3000.0);
    }
}

/// Snap onto an overlapped ladder and climb toward `target_y`.
/// Returns true while actively climbing.
fn climb_ladder(enemy: &mut Enemy, ladders: &[Ladder], target_y: f32) -> bool {
    let rect = enemy.rect();
    let Some(ladder) = ladders.iter().find(|l| rect.intersects(&l.rect)) else {
        return false;
    };

    enemy.pos.x = ladder.rect.center().x - enemy.size.x / 2.0;
    let mid_y = enemy.rect().center().y;
    if target_y < mid_y - ENEMY_CLIMB_DEADZONE {
        enemy.vel.y = -ENEMY_CLIMB_SPEED;
        true
    } else if target_y > mid_y + ENEMY_CLIMB_DEADZONE {
        enemy.vel.y = ENEMY_CLIMB_SPEED;
        true
    } else {
        false
    }
}

/// Fire at the player when the shot timer runs out
fn ranged_attack<R: Rng>(
    enemy: &mut Enemy,
    stats: Option<&RangedStats>,
    step_ms: f32,
    target_x: f32,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<Projectile> {
    let stats = stats?;
    let timer = match &mut enemy.body {
        EnemyBody::Robot { shoot_timer, .. } | EnemyBody::Alien { shoot_timer, .. } => shoot_timer,
        EnemyBody::Zombie { .. } | EnemyBody::Ghost { .. } => return None,
    };
    *timer -= step_ms;
    if *timer > 0.0 {
        return None;
    }
    *timer = stats.interval_ms + rng.random::<f32>() * stats.interval_jitter_ms;

    let dir = facing_toward(enemy.pos.x, target_x);
    let size = Vec2::new(8.0, 4.0);
    let x = if dir < 0.0 { enemy.pos.x - size.x } else { enemy.pos.x + enemy.size.x };
    enemy.attack_timer = ATTACK_POSE_MS;

    Some(Projectile {
        id: 0,
        pos: Vec2::new(x, enemy.pos.y + enemy.size.y / 2.0 - 2.0),
        vel: Vec2::new(dir * stats.bullet_speed, 0.0),
        size,
        damage: difficulty.adjust_damage(stats.damage),
        owner: Owner::Enemy,
    })
}

/// Advance every enemy by one step
pub fn update_enemies(state: &mut GameState, step_ms: f32) {
    let ground_y = state.config.ground_y;
    let difficulty = state.difficulty;
    let target = state.player.rect().center();
    let GameState { enemies, world, rng, tuning, .. } = state;
    let mut shots = Vec::new();

    for enemy in enemies.iter_mut() {
        tick_timers(enemy, step_ms, rng);

        let prev = enemy.pos;
        enemy.pos.x += enemy.speed * enemy.dir;

        match enemy.body {
            EnemyBody::Zombie { .. } => {
                step_enemy_body(enemy, prev, false, &world.obstacles, ground_y, rng);
            }
            EnemyBody::Ghost { base_y, phase } => {
                let phase = phase + step_ms * GHOST_PHASE_RATE;
                enemy.pos.y = base_y + (phase * 2.0).sin() * GHOST_BOB_AMPLITUDE;
                enemy.body = EnemyBody::Ghost { base_y, phase };
            }
            EnemyBody::Robot { .. } | EnemyBody::Alien { .. } => {
                let climbing = climb_ladder(enemy, &world.ladders, target.y);
                step_enemy_body(enemy, prev, climbing, &world.obstacles, ground_y, rng);
                let stats = tuning.enemy(enemy.kind()).ranged.as_ref();
                if let Some(shot) = ranged_attack(enemy, stats, step_ms, target.x, difficulty, rng) {
                    shots.push(shot);
                }
            }
        }
    }

    for mut shot in shots {
        shot.id = state.next_entity_id();
        state.projectiles.push(shot);
    }

    prune_far_enemies(state);
}

/// Drop enemies far behind or far ahead of the player
pub fn prune_far_enemies(state: &mut GameState) {
    let x = state.player.pos.x;
    let view = state.config.view_width;
    let before = state.enemies.len();
    state
        .enemies
        .retain(|e| e.rect().right() >= x - 2.0 * view && e.pos.x <= x + 3.0 * view);
    let pruned = before - state.enemies.len();
    if pruned > 0 {
        log::debug!("Pruned {pruned} distant enemies");
    }
}
