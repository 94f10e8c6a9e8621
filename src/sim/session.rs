//! Host-facing session controls
//!
//! Menus and buttons drive these; the tick only ever changes phase on its own
//! for pause edges, deaths, goals and the end of a level transition.

use super::level::LevelError;
use super::state::{GamePhase, GameState};

/// How much of the run a restart throws away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartScope {
    /// Back to the first level with a fresh score and full lives
    Full,
    /// Replay the current level keeping score and lives
    CurrentLevel,
}

impl GameState {
    /// Leave the title screen and begin the first level
    pub fn start_game(&mut self) {
        self.restart(RestartScope::Full);
    }

    pub fn restart(&mut self, scope: RestartScope) {
        let index = match scope {
            RestartScope::Full => {
                self.score = 0;
                self.lives = self.tuning.starting_lives;
                0
            }
            RestartScope::CurrentLevel => self.level_index,
        };
        self.load_level(index);
        self.phase = GamePhase::Playing;
        log::info!("Restart ({scope:?}) on level {}", index + 1);
    }

    /// Flip between playing and paused; ignored in any other phase
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            other => log::warn!("Ignoring pause toggle in {other:?}"),
        }
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            log::info!("Paused at tick {}", self.time_ticks);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            log::info!("Resumed at tick {}", self.time_ticks);
        }
    }

    /// Abandon the run and return to the title screen
    pub fn quit_to_menu(&mut self) {
        self.load_level(0);
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.phase = GamePhase::NotStarted;
        log::info!("Quit to menu");
    }

    /// Jump straight to a level, keeping score and lives
    pub fn advance_to_level(&mut self, index: usize) -> Result<(), LevelError> {
        if index >= self.level_count() {
            log::warn!("Rejected jump to level {index}");
            return Err(LevelError::UnknownLevel {
                index,
                count: self.level_count(),
            });
        }
        self.load_level(index);
        self.phase = GamePhase::Playing;
        Ok(())
    }
}
