//! Host-side session
//!
//! Owns everything around the simulation that a frontend needs: which screen
//! is showing, the live `GameState`, completed levels, pause/fullscreen
//! toggles, the death counter and the respawn delay. The host calls
//! [`Session::frame`] once per display frame with the current key state.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::input::{Key, KeyState};
use crate::levels::LevelCatalog;
use crate::progress::Progress;
use crate::sim::{GameEvent, GameState, tick};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppPhase {
    Menu,
    Playing,
    /// A level was finished and more remain
    WonLevel,
    /// The last level was finished
    CompletedGame,
}

pub struct Session {
    catalog: LevelCatalog,
    tuning: Tuning,
    game: Option<GameState>,
    phase: AppPhase,
    progress: Progress,
    fullscreen: bool,
    /// Deaths in the current level, retries included
    deaths: u32,
    /// Ticks left until the pending respawn
    respawn_timer: Option<u32>,
    /// Raised outside `tick` (level entry), handed out with the next frame
    pending: Vec<GameEvent>,
}

impl Session {
    pub fn new(catalog: LevelCatalog, tuning: Tuning) -> Result<Self, EngineError> {
        tuning.validate()?;
        Ok(Self {
            catalog,
            tuning,
            game: None,
            phase: AppPhase::Menu,
            progress: Progress::new(),
            fullscreen: false,
            deaths: 0,
            respawn_timer: None,
            pending: Vec::new(),
        })
    }

    /// Enter a level from scratch, unpaused. Unknown ids load the first level.
    pub fn start_level(&mut self, id: u32) {
        let Some(level) = self.catalog.get_or_default(id) else {
            log::error!("Level catalog is empty");
            return;
        };
        log::info!("Starting level {} ({})", level.id, level.name);
        let zone = match self.game.as_mut() {
            Some(game) => game.load_level(level),
            None => {
                let game = GameState::new(level, self.tuning.clone());
                let label = game.zone.clone();
                self.game = Some(game);
                GameEvent::ZoneChanged { label }
            }
        };
        self.pending = vec![zone];
        self.phase = AppPhase::Playing;
        self.deaths = 0;
        self.respawn_timer = None;
    }

    /// Start the level after the one just won
    pub fn next_level(&mut self) -> bool {
        let next = self
            .game
            .as_ref()
            .and_then(|g| self.catalog.next_after(g.level.id));
        match next {
            Some(id) => {
                self.start_level(id);
                true
            }
            None => false,
        }
    }

    /// Advance one display frame
    pub fn frame(&mut self, keys: &KeyState) -> Vec<GameEvent> {
        if keys.just_pressed(Key::ToggleFullscreen) {
            self.fullscreen = !self.fullscreen;
            log::debug!("Fullscreen {}", if self.fullscreen { "on" } else { "off" });
        }

        let mut events = std::mem::take(&mut self.pending);
        if self.phase != AppPhase::Playing {
            return events;
        }
        let Some(game) = self.game.as_mut() else {
            return events;
        };

        if keys.just_pressed(Key::Pause) {
            game.paused = !game.paused;
            log::info!("{}", if game.paused { "Paused" } else { "Resumed" });
        }
        if game.paused {
            return events;
        }

        // A dead player is already waiting on the respawn timer
        if keys.just_pressed(Key::Retry) && !game.player.dead {
            self.deaths += 1;
            game.soft_reset();
        }

        if let Some(remaining) = self.respawn_timer {
            if remaining <= 1 {
                self.respawn_timer = None;
                game.soft_reset();
            } else {
                self.respawn_timer = Some(remaining - 1);
            }
            return events;
        }

        events.extend(tick(game, &keys.tick_input()));
        for event in &events {
            match event {
                GameEvent::PlayerDied { .. } => {
                    self.deaths += 1;
                    self.respawn_timer = Some(self.tuning.respawn_delay_ticks);
                }
                GameEvent::LevelComplete { level_id } => {
                    if self.progress.complete(*level_id) {
                        log::info!("Level {level_id} completed for the first time");
                    }
                    self.phase = if self.catalog.is_last(*level_id) {
                        AppPhase::CompletedGame
                    } else {
                        AppPhase::WonLevel
                    };
                }
                _ => {}
            }
        }
        events
    }

    /// Leave the current level
    pub fn back_to_menu(&mut self) {
        self.phase = AppPhase::Menu;
        self.respawn_timer = None;
    }

    pub fn unlock_all(&mut self) {
        log::info!("Unlocking all {} levels", self.catalog.len());
        self.progress.complete_all(self.catalog.ids());
    }

    /// Level 1 is always open; later levels open once the previous id is completed
    pub fn is_unlocked(&self, id: u32) -> bool {
        id <= 1 || self.progress.is_completed(id - 1)
    }

    pub fn completed(&self) -> &Progress {
        &self.progress
    }

    pub fn phase(&self) -> AppPhase {
        self.phase
    }

    pub fn game(&self) -> Option<&GameState> {
        self.game.as_ref()
    }

    pub fn game_mut(&mut self) -> Option<&mut GameState> {
        self.game.as_mut()
    }

    pub fn catalog(&self) -> &LevelCatalog {
        &self.catalog
    }

    pub fn deaths(&self) -> u32 {
        self.deaths
    }

    pub fn is_paused(&self) -> bool {
        self.game.as_ref().is_some_and(|g| g.paused)
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn respawn_pending(&self) -> bool {
        self.respawn_timer.is_some()
    }
}
