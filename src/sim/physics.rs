//! Movement integration
//!
//! Player locomotion (walk, jump, duck, climb) and the shared falling-body
//! step used by grounded enemies. Velocities are in pixels per fixed step.

use glam::Vec2;
use rand::Rng;

use super::collision::{Body, resolve_ground, resolve_obstacles};
use super::input::Controls;
use super::rect::Rect;
use super::state::{AudioCue, Enemy, GameState, Locomotion};
use super::world::{Ladder, Obstacle};
use crate::consts::*;

/// Ladder contact: horizontal overlap, and the feet at or below the ladder
/// top so a player standing on the platform above can climb down.
#[inline]
pub fn touches_ladder(body: &Rect, ladder: &Ladder) -> bool {
    let l = &ladder.rect;
    body.overlaps_x(l) && body.bottom() >= l.y && body.y < l.bottom()
}

/// Advance the player by one step.
///
/// Returns true if the player fell out of the world.
pub fn step_player(state: &mut GameState, controls: &Controls) -> bool {
    let ground_y = state.config.ground_y;
    let max_x = state.config.world_width - state.player.size.x;
    let fall_limit = state.config.view_height() + FALL_DEATH_MARGIN;
    let GameState { player, world, audio_cues, .. } = state;

    let was_grounded = player.is_grounded();
    let reloading = player.is_reloading();

    let rect = player.rect();
    player.on_ladder = world.ladders.iter().any(|l| touches_ladder(&rect, l));

    // Climbing
    if player.on_ladder && (controls.up || controls.down) {
        player.set_ducking(false);
        player.locomotion = Locomotion::Climbing;
    } else if !player.on_ladder && player.locomotion == Locomotion::Climbing {
        player.locomotion = Locomotion::Airborne;
    }
    let mut climbing = player.locomotion == Locomotion::Climbing;

    // Ducking
    if !climbing {
        let duck = was_grounded && controls.down && !reloading;
        player.set_ducking(duck);
        player.locomotion = match (duck, was_grounded) {
            (true, _) => Locomotion::Ducking,
            (false, true) => Locomotion::Grounded,
            (false, false) => Locomotion::Airborne,
        };
    }

    // Height changes above keep the feet fixed; measure the move from here
    let prev = player.pos;

    let speed = if player.locomotion == Locomotion::Ducking {
        DUCK_MOVE_SPEED
    } else {
        MOVE_SPEED
    };
    player.vel.x = 0.0;
    if !reloading {
        if controls.left {
            player.vel.x = -speed;
            player.facing = -1.0;
        }
        if controls.right {
            player.vel.x = speed;
            player.facing = 1.0;
        }
    }

    if climbing {
        player.vel.x = 0.0;
        player.vel.y = match (reloading, controls.up, controls.down) {
            (true, _, _) => 0.0,
            (false, true, _) => -MOVE_SPEED,
            (false, false, true) => MOVE_SPEED,
            _ => 0.0,
        };
    } else {
        player.vel.y += GRAVITY;
        // Impulse replaces this step's gravity
        if controls.jump && was_grounded && !reloading {
            player.vel.y = JUMP_VELOCITY;
            audio_cues.push(AudioCue::Jump);
        }
    }

    player.pos += player.vel;

    let mut grounded = false;
    if climbing && player.feet_y() > ground_y {
        player.pos.y = ground_y - player.size.y;
        player.vel.y = 0.0;
        grounded = true;
        climbing = false;
    }

    player.pos.x = player.pos.x.clamp(0.0, max_x);

    if !climbing {
        let size = player.size;
        let mut body = Body {
            pos: &mut player.pos,
            vel: &mut player.vel,
            size,
            prev,
        };
        grounded |= resolve_obstacles(&mut body, &world.obstacles).landed;
        if !grounded {
            grounded = resolve_ground(&mut player.pos, &mut player.vel, size.y, ground_y);
        }
    }

    player.locomotion = if climbing {
        Locomotion::Climbing
    } else if grounded {
        if player.is_ducked() {
            Locomotion::Ducking
        } else {
            Locomotion::Grounded
        }
    } else {
        // Can't stay crouched in the air
        player.set_ducking(false);
        Locomotion::Airborne
    };

    player.pos.y > fall_limit
}

/// Vertical step for a walking enemy: gravity, obstacles, then the ground.
///
/// A side push makes the enemy either hop or turn around. Horizontal motion
/// has already been applied by the caller; `prev` is the position before it.
pub fn step_enemy_body<R: Rng>(
    enemy: &mut Enemy,
    prev: Vec2,
    climbing: bool,
    obstacles: &[Obstacle],
    ground_y: f32,
    rng: &mut R,
) {
    if !climbing {
        enemy.vel.y += ENEMY_GRAVITY;
    }
    enemy.pos.y += enemy.vel.y;

    let size = enemy.size;
    let mut body = Body {
        pos: &mut enemy.pos,
        vel: &mut enemy.vel,
        size,
        prev,
    };
    let result = resolve_obstacles(&mut body, obstacles);
    let grounded =
        result.landed || resolve_ground(&mut enemy.pos, &mut enemy.vel, size.y, ground_y);

    // Rolled after the floor snap so a hop survives this step
    let mut hopped = false;
    for _ in 0..result.side_pushes {
        if rng.random_bool(0.5) {
            enemy.vel.y = ENEMY_HOP_VELOCITY;
            hopped = true;
        } else {
            enemy.dir = -enemy.dir;
        }
    }
    enemy.set_on_ground(grounded && !hopped);
}
