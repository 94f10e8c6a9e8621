//! Kaiju Climb - A girder-climbing platformer against a barrel-throwing boss
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, projectiles, session state)
//! - `audio`: Event-to-sound-cue dispatch behind an injected sink
//! - `frame`: Per-frame payload handed to the renderer
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod frame;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use frame::Frame;
pub use settings::Settings;
pub use sim::{GameEvent, GamePhase, GameState, TickInput, tick};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Simulation rate; one tick per display frame at 60 Hz
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f64 = 1.0 / TICK_RATE as f64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 5;

    /// Stage dimensions
    pub const STAGE_WIDTH: f32 = 800.0;
    pub const STAGE_HEIGHT: f32 = 600.0;
}
