//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::combat::{
    collect_pickups, resolve_contact, resolve_enemy_shots, resolve_player_shots, update_particles,
    update_projectiles, update_weapon,
};
use super::input::{Controls, InputFrame};
use super::screen::Screen;
use super::state::GameState;
use super::{ai, physics, spawner};
use crate::consts::*;
use crate::error::SimError;
use crate::settings::Settings;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, controls: &Controls, settings: &Settings, dt: f32) {
    // Only gameplay advances the world
    if state.screen != Screen::Play {
        return;
    }
    if !settings.particles {
        state.particles.clear();
    }

    state.time_ticks += 1;
    state.elapsed_ms += dt;

    if physics::step_player(state, controls) {
        game_over(state, "fell out of the world");
        return;
    }
    update_weapon(state, controls, dt);
    update_projectiles(state);

    ai::update_enemies(state, dt);
    resolve_player_shots(state, settings.particles);
    update_particles(state, dt);

    if resolve_enemy_shots(state) || resolve_contact(state) {
        game_over(state, "killed");
        return;
    }
    collect_pickups(state);

    spawner::update_spawner(state, dt);
    state.normalize_order();
}

fn game_over(state: &mut GameState, cause: &str) {
    state.player.health = 0;
    state.set_screen(Screen::GameOver);
    log::info!(
        "Game over ({cause}) after {:.1}s with {} gold",
        state.elapsed_ms / 1000.0,
        state.player.gold
    );
}

/// Advance the session by `dt_ms` of wall time.
///
/// Inputs are validated before anything changes. Discrete presses are
/// applied first, then as many fixed steps as the accumulated time allows
/// (at most `MAX_SUBSTEPS`; time beyond that is dropped).
pub fn update(
    state: &mut GameState,
    dt_ms: f32,
    input: &InputFrame,
    settings: &mut Settings,
) -> Result<(), SimError> {
    if !dt_ms.is_finite() || dt_ms < 0.0 {
        return Err(SimError::InvalidDelta(dt_ms));
    }
    input.validate()?;
    settings.validate()?;

    state.difficulty = settings.difficulty;
    for &action in &input.pressed {
        state.handle_press(action, settings);
    }

    if state.screen != Screen::Play {
        state.accumulator = 0.0;
        return Ok(());
    }

    let controls = input.controls();
    state.accumulator += dt_ms;

    let mut substeps = 0;
    while state.accumulator >= STEP_MS && substeps < MAX_SUBSTEPS {
        tick(state, &controls, settings, STEP_MS);
        state.accumulator -= STEP_MS;
        substeps += 1;

        if state.screen != Screen::Play {
            state.accumulator = 0.0;
            break;
        }
    }

    if state.accumulator >= STEP_MS {
        log::warn!(
            "Frame too long, dropping {:.1} ms of simulation",
            state.accumulator - state.accumulator % STEP_MS
        );
        state.accumulator %= STEP_MS;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Difficulty;
    use crate::sim::input::Action;
    use crate::sim::state::{Owner, Projectile};
    use crate::sim::world::WorldConfig;
    use glam::Vec2;

    fn playing(seed: u64) -> (GameState, Settings) {
        let mut settings = Settings::default();
        let mut state = GameState::new(WorldConfig::default(), Difficulty::Normal, seed).unwrap();
        let start = InputFrame::new().pressing(Action::Confirm);
        update(&mut state, 0.0, &start, &mut settings).unwrap();
        (state, settings)
    }

    #[test]
    fn test_tick_start_to_play() {
        let mut settings = Settings::default();
        let mut state = GameState::new(WorldConfig::default(), Difficulty::Normal, 12345).unwrap();
        assert_eq!(state.screen, Screen::Start);

        // Nothing moves on the title screen
        update(&mut state, 100.0, &InputFrame::new(), &mut settings).unwrap();
        assert_eq!(state.time_ticks, 0);

        let start = InputFrame::new().pressing(Action::Confirm);
        update(&mut state, STEP_MS, &start, &mut settings).unwrap();
        assert_eq!(state.screen, Screen::Play);
        assert_eq!(state.time_ticks, 1);
        // First spawn happens on the first play step
        assert_eq!(state.enemies.len(), 1);
    }

    #[test]
    fn test_tick_pause() {
        let (mut state, mut settings) = playing(12345);
        update(&mut state, STEP_MS, &InputFrame::new(), &mut settings).unwrap();
        let ticks = state.time_ticks;

        let pause = InputFrame::new().pressing(Action::Pause);
        update(&mut state, STEP_MS, &pause, &mut settings).unwrap();
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.time_ticks, ticks);

        // Resume
        update(&mut state, STEP_MS, &pause, &mut settings).unwrap();
        assert_eq!(state.screen, Screen::Play);
        assert_eq!(state.time_ticks, ticks + 1);
    }

    #[test]
    fn test_update_rejects_bad_input_without_mutation() {
        let (mut state, mut settings) = playing(7);
        let before = serde_json::to_string(&state).unwrap();

        for dt in [-1.0, f32::NAN, f32::INFINITY] {
            let result = update(&mut state, dt, &InputFrame::new(), &mut settings);
            assert!(matches!(result, Err(SimError::InvalidDelta(_))));
        }
        let bad = InputFrame::new().pressing(Action::Fire);
        assert!(matches!(
            update(&mut state, STEP_MS, &bad, &mut settings),
            Err(SimError::MalformedInput(Action::Fire))
        ));
        settings.music_volume = 3.0;
        assert!(update(&mut state, STEP_MS, &InputFrame::new(), &mut settings).is_err());

        assert_eq!(serde_json::to_string(&state).unwrap(), before);
    }

    #[test]
    fn test_update_caps_substeps() {
        let (mut state, mut settings) = playing(3);
        update(&mut state, 10_000.0, &InputFrame::new(), &mut settings).unwrap();
        assert_eq!(state.time_ticks, MAX_SUBSTEPS as u64);
        assert!(state.accumulator < STEP_MS);
    }

    #[test]
    fn test_zero_delta_runs_no_step() {
        let (mut state, mut settings) = playing(3);
        update(&mut state, 0.0, &InputFrame::new(), &mut settings).unwrap();
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_shop_freezes_world() {
        let (mut state, mut settings) = playing(4);
        update(&mut state, STEP_MS, &InputFrame::new(), &mut settings).unwrap();
        let open = InputFrame::new().pressing(Action::OpenShop);
        update(&mut state, STEP_MS, &open, &mut settings).unwrap();
        assert_eq!(state.screen, Screen::Shop);

        let enemies: Vec<_> = state.enemies.iter().map(|e| e.pos).collect();
        update(&mut state, 500.0, &InputFrame::new(), &mut settings).unwrap();
        let after: Vec<_> = state.enemies.iter().map(|e| e.pos).collect();
        assert_eq!(enemies, after);
    }

    #[test]
    fn test_held_fire_repeats_at_fire_rate() {
        let (mut state, mut settings) = playing(5);
        state.spawn_cooldown = f32::MAX;
        let fire = InputFrame::new().holding(Action::Fire);
        // One second of 300 ms pistol intervals
        for _ in 0..60 {
            update(&mut state, STEP_MS, &fire, &mut settings).unwrap();
        }
        assert_eq!(state.player.magazine.pistol, 8);
    }

    #[test]
    fn test_semi_auto_fires_once_per_press() {
        let (mut state, mut settings) = playing(5);
        state.spawn_cooldown = f32::MAX;
        state.tuning.semi_auto = true;
        let fire = InputFrame::new().holding(Action::Fire);
        for _ in 0..60 {
            update(&mut state, STEP_MS, &fire, &mut settings).unwrap();
        }
        assert_eq!(state.player.magazine.pistol, 11);
    }

    #[test]
    fn test_game_over_stops_simulation() {
        let (mut state, mut settings) = playing(6);
        state.player.health = 4;
        let id = state.next_entity_id();
        state.projectiles.push(Projectile {
            id,
            pos: state.player.rect().center(),
            vel: Vec2::ZERO,
            size: Vec2::new(8.0, 4.0),
            damage: 6,
            owner: Owner::Enemy,
        });
        update(&mut state, STEP_MS, &InputFrame::new(), &mut settings).unwrap();
        assert_eq!(state.screen, Screen::GameOver);
        assert_eq!(state.player.health, 0);

        let ticks = state.time_ticks;
        update(&mut state, 100.0, &InputFrame::new(), &mut settings).unwrap();
        assert_eq!(state.time_ticks, ticks);

        let confirm = InputFrame::new().pressing(Action::Confirm);
        update(&mut state, STEP_MS, &confirm, &mut settings).unwrap();
        assert_eq!(state.screen, Screen::Start);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let (mut state1, mut settings1) = playing(99999);
        let (mut state2, mut settings2) = playing(99999);

        let inputs = [
            InputFrame::new().holding(Action::MoveRight),
            InputFrame::new().holding(Action::MoveRight).holding(Action::Fire),
            InputFrame::new().holding(Action::Jump),
            InputFrame::new(),
        ];

        for i in 0..2000 {
            let input = &inputs[i % inputs.len()];
            update(&mut state1, STEP_MS, input, &mut settings1).unwrap();
            update(&mut state2, STEP_MS, input, &mut settings2).unwrap();
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(
            serde_json::to_string(&state1).unwrap(),
            serde_json::to_string(&state2).unwrap()
        );
    }
}
