//! One-shot notifications for the presentation layer
//!
//! The simulation never plays sounds or draws; it records what happened and
//! the host maps each event to its audio/visual cue.

use serde::{Deserialize, Serialize};

use super::level::PowerUpKind;
use super::projectile::BarrelKind;

/// What kind of projectile an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProjectileKind {
    Barrel(BarrelKind),
    Fireball,
}

/// Why a projectile left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DestroyReason {
    /// Dropped off the bottom of the stage (scores)
    FellOffStage,
    /// Absorbed by the player's shield (scores)
    Shielded,
    /// Struck the unshielded player
    HitPlayer,
    /// Explosion finished growing
    Burnt,
    /// Fireball outlived its lifetime
    Expired,
    /// Fireball flew past the off-screen margin
    LeftStage,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    /// Player footstep (walking or climbing)
    Stepped,
    /// Boss heavy footstep
    BossStepped,
    Hit {
        damage: u32,
        source: ProjectileKind,
    },
    /// A life was spent and health refilled
    LifeLost {
        lives_remaining: u32,
    },
    Collected {
        kind: PowerUpKind,
    },
    Thrown {
        kind: BarrelKind,
    },
    BossRoared,
    FireballSpawned,
    /// An exploding barrel detonated
    Exploded,
    ProjectileDestroyed {
        kind: ProjectileKind,
        reason: DestroyReason,
    },
    LevelCleared {
        level: usize,
    },
    LevelStarted {
        level: usize,
    },
    GameOver,
    Victory,
}
