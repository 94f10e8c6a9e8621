//! Game state and core simulation types
//!
//! Everything the tick mutates lives in one context object. Snapshots of it
//! are what the presentation layer draws.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boss::Boss;
use super::event::GameEvent;
use super::level::{Level, LevelError, PowerUpKind, PowerUpPlacement, builtin_levels, validate_campaign};
use super::player::Player;
use super::projectile::{Barrel, Fireball};
use super::schedule::DelayQueue;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    NotStarted,
    Playing,
    Paused,
    /// Level cleared; the next level loads when the countdown ends
    LevelTransition { ticks_remaining: u32 },
    /// Out of lives (terminal until restart)
    GameOver,
    /// Final level cleared (terminal until restart)
    Victory,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }
}

/// A collectible placed by the level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerUp {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
    /// Animation phase only
    pub pulse: f32,
}

impl PowerUp {
    pub fn new(placement: &PowerUpPlacement) -> Self {
        Self {
            pos: placement.pos,
            kind: placement.kind,
            collected: false,
            pulse: 0.0,
        }
    }

    /// Mark collected. Returns false if it was already taken.
    pub fn collect(&mut self) -> bool {
        !std::mem::replace(&mut self.collected, true)
    }
}

/// Work deferred by a boss attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScheduledAttack {
    Fireball,
}

/// Complete game state (deterministic, serializable for snapshots)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    pub level_index: usize,
    pub lives: u32,
    pub score: u64,
    /// Playing ticks elapsed; frozen while paused or between levels
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub player: Player,
    pub boss: Boss,
    pub barrels: Vec<Barrel>,
    pub fireballs: Vec<Fireball>,
    pub power_ups: Vec<PowerUp>,
    pub pending_attacks: DelayQueue<ScheduledAttack>,
    /// Events raised since the last drain
    #[serde(skip)]
    pub(crate) events: Vec<GameEvent>,
    #[serde(skip)]
    pub(crate) levels: Vec<Level>,
    #[serde(skip)]
    pub(crate) tuning: Tuning,
    next_id: u32,
}

impl GameState {
    /// Create a session over a validated campaign, parked on the title screen
    pub fn new(levels: Vec<Level>, tuning: Tuning, seed: u64) -> Result<Self, LevelError> {
        validate_campaign(&levels)?;
        let first = &levels[0];
        let player = Player::new(first.start, &tuning);
        let boss = Boss::new(first.boss, &tuning);

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level_index: 0,
            lives: tuning.starting_lives,
            score: 0,
            time_ticks: 0,
            phase: GamePhase::NotStarted,
            player,
            boss,
            barrels: Vec::new(),
            fireballs: Vec::new(),
            power_ups: Vec::new(),
            pending_attacks: DelayQueue::new(),
            events: Vec::new(),
            levels,
            tuning,
            next_id: 1,
        };
        state.load_level(0);
        Ok(state)
    }

    /// Session over the shipped campaign with default balance
    pub fn with_builtin_levels(seed: u64) -> Result<Self, LevelError> {
        Self::new(builtin_levels()?, Tuning::default(), seed)
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn level(&self) -> &Level {
        &self.levels[self.level_index]
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn is_last_level(&self) -> bool {
        self.level_index + 1 >= self.levels.len()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Initialize a level's entities. Callers guarantee `index` is in range.
    pub(crate) fn load_level(&mut self, index: usize) {
        self.level_index = index;
        let level = &self.levels[index];
        self.player = Player::new(level.start, &self.tuning);
        self.boss = Boss::new(level.boss, &self.tuning);
        self.power_ups = level.power_ups.iter().map(PowerUp::new).collect();
        self.barrels.clear();
        self.fireballs.clear();
        self.pending_attacks.clear();
        log::info!("Loaded level {} '{}'", index + 1, level.name);
    }

    /// Spend-a-life reset: back to the start with full health and a clear sky
    pub(crate) fn respawn_player(&mut self) {
        let start = self.level().start;
        self.player.respawn(start, &self.tuning);
        self.barrels.clear();
        self.fireballs.clear();
        log::debug!("Respawned player, {} lives left", self.lives);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_title() {
        let state = GameState::with_builtin_levels(7).unwrap();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.level_count(), 15);
        assert_eq!(state.lives, 3);
        assert_eq!(state.player.health, 100);
        assert_eq!(state.player.pos, Vec2::new(50.0, 550.0));
        assert_eq!(state.power_ups.len(), 2);
        assert_eq!(state.boss.pos, state.level().boss);
    }

    #[test]
    fn test_rejects_empty_campaign() {
        assert!(matches!(
            GameState::new(Vec::new(), Tuning::default(), 1),
            Err(LevelError::Empty)
        ));
    }

    #[test]
    fn test_power_up_collects_once() {
        let mut pu = PowerUp::new(&PowerUpPlacement {
            pos: Vec2::new(100.0, 100.0),
            kind: PowerUpKind::Shield,
        });
        assert!(pu.collect());
        assert!(!pu.collect());
        assert!(pu.collected);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::with_builtin_levels(7).unwrap();
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::with_builtin_levels(7).unwrap();
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"phase\":\"NotStarted\""));
        assert!(!json.contains("\"levels\""));
    }
}
