//! Space Commando headless runner
//!
//! Plays the simulation in attract mode with a scripted pilot and logs how
//! the run went. Usage: `space-commando [seed] [seconds] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
mod attract {
    use space_commando::consts::STEP_MS;
    use space_commando::sim::{
        Action, AudioCue, EnemyKind, GameState, InputFrame, Screen, WorldConfig, update,
    };
    use space_commando::{Settings, SimError, WeaponKind};

    /// Scripted pilot: run right, shoot whatever is ahead, hop over cover
    /// and buy the rifle once it can afford it.
    #[derive(Default)]
    pub struct Pilot {
        frame: u64,
        shopping: Vec<Action>,
    }

    impl Pilot {
        pub fn next_frame(&mut self, state: &GameState) -> InputFrame {
            self.frame += 1;
            let mut input = InputFrame::new();

            match state.screen {
                Screen::Start | Screen::GameOver => return input.pressing(Action::Confirm),
                Screen::Shop => {
                    if let Some(action) = self.shopping.pop() {
                        input.pressed.push(action);
                    }
                    return input;
                }
                Screen::Menu | Screen::Settings => return input.pressing(Action::Back),
                Screen::Play => {}
            }

            let player = &state.player;
            let rifle_cost = state.tuning.weapon(WeaponKind::Rifle).cost;
            if player.weapon == WeaponKind::Pistol && player.gold >= rifle_cost {
                // Popped from the back: cursor starts on the pistol
                self.shopping = vec![Action::Back, Action::Confirm, Action::NavDown];
                return input.pressing(Action::OpenShop);
            }

            input.held.push(Action::MoveRight);
            let ahead = state
                .enemies
                .iter()
                .filter(|e| e.pos.x > player.pos.x)
                .map(|e| (e.pos.x - player.pos.x, e.kind()))
                .min_by(|a, b| a.0.total_cmp(&b.0));

            if let Some((distance, kind)) = ahead {
                if distance < 500.0 {
                    input.held.push(Action::Fire);
                }
                if kind == EnemyKind::Ghost && distance < 200.0 {
                    input.held.push(Action::AimUp);
                }
                if distance < 60.0 {
                    input.held.push(Action::Jump);
                }
            }
            if player.magazine_of(player.weapon) == 0 {
                input.held.push(Action::Reload);
            }
            if self.frame % 90 == 0 {
                input.held.push(Action::Jump);
            }
            input
        }
    }

    pub fn run(seed: u64, seconds: u32, mut settings: Settings) -> Result<(), SimError> {
        let mut state = GameState::new(WorldConfig::default(), settings.difficulty, seed)?;
        let mut pilot = Pilot::default();
        let frames = (seconds as f32 * 1000.0 / STEP_MS) as u64;
        let mut kills = 0usize;
        let mut deaths = 0usize;

        for frame in 0..frames {
            let input = pilot.next_frame(&state);
            let was_playing = state.screen == Screen::Play;
            update(&mut state, STEP_MS, &input, &mut settings)?;

            let view = state.snapshot();
            kills += view
                .audio
                .iter()
                .filter(|cue| matches!(cue, AudioCue::EnemyDeath))
                .count();
            if was_playing && view.screen == Screen::GameOver {
                deaths += 1;
            }

            if frame % 600 == 0 {
                log::info!(
                    "t={:>4}s screen={:?} hp={} gold={} weapon={} ammo={}/{} enemies={}",
                    frame / 60,
                    view.screen,
                    view.hud.health,
                    view.hud.gold,
                    view.hud.weapon.as_str(),
                    view.hud.magazine,
                    view.hud.reserve,
                    view.enemies.len()
                );
            }
        }

        println!(
            "seed {seed}: {kills} kills, {deaths} deaths, {} gold, {} equipped",
            state.player.gold,
            state.player.weapon.as_str()
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Commando (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);

    let settings = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| space_commando::Settings::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Could not load settings from {path}: {e}");
                std::process::exit(1);
            }
        },
        None => space_commando::Settings::default(),
    };

    if let Err(e) = attract::run(seed, seconds, settings) {
        log::error!("Simulation failed: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The core is embedded by a host; there is no standalone wasm entry point
}
