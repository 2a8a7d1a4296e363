//! Session screens and menu navigation
//!
//! Only `Screen::Play` advances the simulation. Everything else is driven by
//! discrete presses, applied before any physics step of the same update.

use serde::{Deserialize, Serialize};

use super::combat::purchase;
use super::input::Action;
use super::state::{AudioCue, GameState, MusicTrack};
use crate::settings::Settings;
use crate::tuning::{ShopItem, WeaponKind};

/// Which screen the session is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    /// Title menu
    #[default]
    Start,
    /// Gameplay
    Play,
    /// Shop overlay (simulation frozen)
    Shop,
    /// Pause menu (simulation frozen)
    Menu,
    Settings,
    GameOver,
}

impl Screen {
    pub fn music(self) -> MusicTrack {
        match self {
            Screen::Play => MusicTrack::Game,
            _ => MusicTrack::Menu,
        }
    }
}

/// Legal screen changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    OpenShop,
    CloseShop,
    Pause,
    Resume,
    /// Abandon the run from the pause menu
    RestartFromPause,
    OpenSettings,
    SettingsBack,
    StartGame,
    /// Leave the game-over screen for the title menu
    ConfirmRestart,
}

/// Pause menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseOption {
    Resume,
    Restart,
    Settings,
}

impl PauseOption {
    pub const ALL: [PauseOption; 3] = [PauseOption::Resume, PauseOption::Restart, PauseOption::Settings];

    pub fn label(self) -> &'static str {
        match self {
            PauseOption::Resume => "Return to Game",
            PauseOption::Restart => "Restart Game",
            PauseOption::Settings => "Game Settings",
        }
    }
}

/// Title menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartOption {
    StartGame,
    Settings,
}

impl StartOption {
    pub const ALL: [StartOption; 2] = [StartOption::StartGame, StartOption::Settings];

    pub fn label(self) -> &'static str {
        match self {
            StartOption::StartGame => "Start Game",
            StartOption::Settings => "Game Settings",
        }
    }
}

/// Settings screen rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsRow {
    Difficulty,
    Audio,
    Particles,
}

impl SettingsRow {
    pub const ALL: [SettingsRow; 3] = [SettingsRow::Difficulty, SettingsRow::Audio, SettingsRow::Particles];
}

/// Highlighted entry on each menu
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuState {
    /// Index into `Tuning::shop_items`
    pub shop: usize,
    /// Index into `PauseOption::ALL`
    pub pause: usize,
    /// Index into `StartOption::ALL`
    pub start: usize,
    /// Index into `SettingsRow::ALL`
    pub settings: usize,
    /// Screen to go back to when leaving settings
    pub settings_return: Screen,
}

/// Step a menu cursor up or down, wrapping
fn cycle(index: usize, len: usize, up: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if up { (index + len - 1) % len } else { (index + 1) % len }
}

impl GameState {
    /// Change screens if `transition` is legal from the current one.
    /// Illegal transitions are ignored and return false.
    pub fn apply_transition(&mut self, transition: Transition) -> bool {
        let next = match (self.screen, transition) {
            (Screen::Play, Transition::OpenShop) => {
                let equipped = WeaponKind::ALL.iter().position(|&w| w == self.player.weapon);
                self.menu.shop = equipped.unwrap_or(0);
                Screen::Shop
            }
            (Screen::Shop, Transition::CloseShop) => Screen::Play,
            (Screen::Play, Transition::Pause) => {
                self.menu.pause = 0;
                Screen::Menu
            }
            (Screen::Menu, Transition::Resume) => Screen::Play,
            (Screen::Menu, Transition::RestartFromPause) => {
                self.reset_session();
                Screen::Start
            }
            (Screen::Menu | Screen::Start, Transition::OpenSettings) => {
                self.menu.settings_return = self.screen;
                self.menu.settings = 0;
                Screen::Settings
            }
            (Screen::Settings, Transition::SettingsBack) => self.menu.settings_return,
            (Screen::Start, Transition::StartGame) => {
                self.reset_session();
                log::info!("Game started");
                Screen::Play
            }
            (Screen::GameOver, Transition::ConfirmRestart) => {
                self.reset_session();
                Screen::Start
            }
            (screen, transition) => {
                log::debug!("Ignoring {transition:?} on {screen:?}");
                return false;
            }
        };
        self.set_screen(next);
        true
    }

    /// Switch screens, cueing a music change when the track differs
    pub(crate) fn set_screen(&mut self, next: Screen) {
        if self.screen.music() != next.music() {
            self.emit(AudioCue::Music(next.music()));
        }
        self.screen = next;
    }

    /// Apply one discrete press to the current screen
    pub fn handle_press(&mut self, action: Action, settings: &mut Settings) {
        match self.screen {
            Screen::Play => match action {
                Action::Pause => {
                    self.apply_transition(Transition::Pause);
                }
                Action::OpenShop => {
                    self.apply_transition(Transition::OpenShop);
                }
                _ => {}
            },
            Screen::Shop => self.handle_shop(action),
            Screen::Menu => self.handle_pause_menu(action),
            Screen::Start => self.handle_start_menu(action),
            Screen::Settings => self.handle_settings(action, settings),
            Screen::GameOver => {
                if action == Action::Confirm && self.apply_transition(Transition::ConfirmRestart) {
                    self.emit(AudioCue::MenuSelect);
                }
            }
        }
    }

    fn handle_shop(&mut self, action: Action) {
        let items = self.tuning.shop_items();
        match action {
            Action::NavUp | Action::NavDown => {
                self.menu.shop = cycle(self.menu.shop, items.len(), action == Action::NavUp);
            }
            Action::Confirm => {
                if let Some(&item) = items.get(self.menu.shop) {
                    purchase(self, item);
                }
                // Cue plays whether or not the purchase went through
                self.emit(AudioCue::MenuSelect);
            }
            Action::OpenShop | Action::Back => {
                self.apply_transition(Transition::CloseShop);
            }
            _ => {}
        }
    }

    fn handle_pause_menu(&mut self, action: Action) {
        let len = PauseOption::ALL.len();
        match action {
            Action::NavUp | Action::NavDown => {
                self.menu.pause = cycle(self.menu.pause, len, action == Action::NavUp);
            }
            Action::Confirm => {
                let transition = match PauseOption::ALL[self.menu.pause % len] {
                    PauseOption::Resume => Transition::Resume,
                    PauseOption::Restart => Transition::RestartFromPause,
                    PauseOption::Settings => Transition::OpenSettings,
                };
                self.apply_transition(transition);
                self.emit(AudioCue::MenuSelect);
            }
            Action::Back | Action::Pause => {
                self.apply_transition(Transition::Resume);
            }
            _ => {}
        }
    }

    fn handle_start_menu(&mut self, action: Action) {
        let len = StartOption::ALL.len();
        match action {
            Action::NavUp | Action::NavDown => {
                self.menu.start = cycle(self.menu.start, len, action == Action::NavUp);
            }
            Action::Confirm => {
                let transition = match StartOption::ALL[self.menu.start % len] {
                    StartOption::StartGame => Transition::StartGame,
                    StartOption::Settings => Transition::OpenSettings,
                };
                self.apply_transition(transition);
                self.emit(AudioCue::MenuSelect);
            }
            _ => {}
        }
    }

    fn handle_settings(&mut self, action: Action, settings: &mut Settings) {
        let len = SettingsRow::ALL.len();
        match action {
            Action::NavUp | Action::NavDown => {
                self.menu.settings = cycle(self.menu.settings, len, action == Action::NavUp);
            }
            Action::NavLeft | Action::NavRight | Action::Confirm => {
                match SettingsRow::ALL[self.menu.settings % len] {
                    SettingsRow::Difficulty => {
                        settings.difficulty = if action == Action::NavLeft {
                            settings.difficulty.prev()
                        } else {
                            settings.difficulty.next()
                        };
                        self.difficulty = settings.difficulty;
                    }
                    SettingsRow::Audio => {
                        settings.audio = !settings.audio;
                        self.emit(AudioCue::MusicEnabled(settings.audio));
                    }
                    SettingsRow::Particles => {
                        settings.particles = !settings.particles;
                        if !settings.particles {
                            self.particles.clear();
                        }
                    }
                }
                log::debug!(
                    "Settings: difficulty={} audio={} particles={}",
                    settings.difficulty.as_str(),
                    settings.audio,
                    settings.particles
                );
                self.emit(AudioCue::MenuSelect);
            }
            Action::Back => {
                self.apply_transition(Transition::SettingsBack);
            }
            _ => {}
        }
    }

    /// Shop entry under the cursor
    pub fn selected_shop_item(&self) -> Option<ShopItem> {
        self.tuning.shop_items().get(self.menu.shop).copied()
    }
}
