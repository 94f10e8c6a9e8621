//! Per-frame payload for the presentation layer
//!
//! The renderer only sees what goes over the bridge, so anything it needs
//! that is derived from state and preferences is computed here.

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GameEvent, GameState};

/// Visual effect levels after preferences are applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Effects {
    /// Camera shake, 0.0 (none) to 1.0 (fresh stomp)
    pub shake: f32,
    /// Draw the falling cue over the player
    pub parachute: bool,
    /// Per-barrel draw opacity, in `state.barrels` order
    pub barrel_opacity: Vec<f32>,
    pub reduced_motion: bool,
}

impl Effects {
    pub fn new(state: &GameState, settings: &Settings) -> Self {
        let tuning = state.tuning();

        let shake = if settings.effective_screen_shake() && tuning.stomp_ticks > 0 {
            state.boss.stomp_ticks as f32 / tuning.stomp_ticks as f32
        } else {
            0.0
        };

        Self {
            shake,
            parachute: settings.parachute && state.player.is_parachuting(tuning),
            barrel_opacity: state.barrels.iter().map(|b| b.kind.opacity()).collect(),
            reduced_motion: settings.reduced_motion,
        }
    }
}

/// Everything the renderer needs for one displayed frame
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    pub state: &'a GameState,
    pub events: &'a [GameEvent],
    pub effects: Effects,
}

impl<'a> Frame<'a> {
    pub fn new(state: &'a GameState, events: &'a [GameEvent], settings: &Settings) -> Self {
        Self {
            state,
            events,
            effects: Effects::new(state, settings),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
