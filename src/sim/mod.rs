//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, no wall-clock time
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - No rendering, audio or platform dependencies

pub mod boss;
pub mod collision;
pub mod event;
pub mod level;
pub mod player;
pub mod projectile;
pub mod schedule;
pub mod session;
pub mod state;
pub mod tick;

pub use boss::Boss;
pub use event::{DestroyReason, GameEvent, ProjectileKind};
pub use level::{Ladder, Level, LevelError, Platform, PowerUpKind, PowerUpPlacement, builtin_levels, parse_levels};
pub use player::{Facing, Player};
pub use projectile::{Barrel, BarrelKind, BarrelState, Fireball};
pub use schedule::DelayQueue;
pub use session::RestartScope;
pub use state::{GamePhase, GameState, PowerUp, ScheduledAttack};
pub use tick::{TickInput, tick};
