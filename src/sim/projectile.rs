//! Thrown barrels and homing fireballs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{SurfaceProbe, bounce_off_walls, landing_surface, within_bounds};
use super::event::DestroyReason;
use super::level::Platform;
use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};
use crate::tuning::Tuning;

/// Barrel variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarrelKind {
    Normal,
    Fast,
    Bouncy,
    Exploding,
    Ghost,
}

/// Throw table: the first threshold the roll exceeds picks the variant
const THROW_TABLE: [(f32, BarrelKind); 4] = [
    (0.90, BarrelKind::Exploding),
    (0.80, BarrelKind::Ghost),
    (0.65, BarrelKind::Fast),
    (0.50, BarrelKind::Bouncy),
];

impl BarrelKind {
    /// Pick a variant from a uniform roll in `[0, 1)`
    pub fn from_roll(roll: f32) -> Self {
        THROW_TABLE
            .iter()
            .find(|(threshold, _)| roll > *threshold)
            .map(|&(_, kind)| kind)
            .unwrap_or(BarrelKind::Normal)
    }

    pub fn launch_speed(self, tuning: &Tuning) -> f32 {
        match self {
            BarrelKind::Fast => tuning.barrel_speed * tuning.fast_barrel_multiplier,
            _ => tuning.barrel_speed,
        }
    }

    /// Damage on direct contact with the player
    pub fn contact_damage(self, tuning: &Tuning) -> u32 {
        match self {
            BarrelKind::Fast => tuning.fast_barrel_damage,
            _ => tuning.barrel_damage,
        }
    }

    /// Ghosts fall straight through girders
    pub fn collides_with_platforms(self) -> bool {
        self != BarrelKind::Ghost
    }

    /// Draw opacity hint for the renderer
    pub fn opacity(self) -> f32 {
        match self {
            BarrelKind::Ghost => 0.5,
            _ => 1.0,
        }
    }
}

/// Barrel lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BarrelState {
    Rolling,
    /// Frozen in place; the blast radius grows every tick
    Exploding { radius: f32 },
}

/// Emitted by a barrel update for the resolver to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrelSignal {
    Detonated,
}

/// A barrel thrown by the boss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrel {
    pub id: u32,
    pub kind: BarrelKind,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Ticks since the throw (stops counting once exploding)
    pub age: u32,
    pub on_platform: bool,
    pub state: BarrelState,
}

impl Barrel {
    /// Throw a barrel; `direction` is the sign of the horizontal velocity
    pub fn new(id: u32, kind: BarrelKind, pos: Vec2, direction: f32, tuning: &Tuning) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::new(direction.signum() * kind.launch_speed(tuning), 0.0),
            radius: tuning.barrel_radius,
            age: 0,
            on_platform: false,
            state: BarrelState::Rolling,
        }
    }

    pub fn is_exploding(&self) -> bool {
        matches!(self.state, BarrelState::Exploding { .. })
    }

    pub fn explosion_radius(&self) -> Option<f32> {
        match self.state {
            BarrelState::Exploding { radius } => Some(radius),
            BarrelState::Rolling => None,
        }
    }

    /// Blast has outgrown its maximum and should be removed
    pub fn is_burnt_out(&self, tuning: &Tuning) -> bool {
        self.explosion_radius()
            .is_some_and(|r| r > tuning.explosion_max_radius)
    }

    /// Rolling barrel has dropped off the bottom of the stage
    pub fn is_below_stage(&self) -> bool {
        !self.is_exploding() && self.pos.y > STAGE_HEIGHT
    }

    /// Advance one tick. `target` is the player center, used by the fuse.
    pub fn update(
        &mut self,
        platforms: &[Platform],
        target: Vec2,
        tuning: &Tuning,
    ) -> Option<BarrelSignal> {
        match self.kind {
            BarrelKind::Normal | BarrelKind::Fast => {
                self.roll(platforms, tuning);
                None
            }
            BarrelKind::Bouncy => {
                self.bounce(platforms, tuning);
                None
            }
            BarrelKind::Ghost => {
                self.drift(tuning);
                None
            }
            BarrelKind::Exploding => self.fuse(platforms, target, tuning),
        }
    }

    /// Ballistic motion, settling on girders and bouncing off the side walls
    fn roll(&mut self, platforms: &[Platform], tuning: &Tuning) {
        self.integrate(tuning);
        self.settle(platforms, tuning);
        bounce_off_walls(&mut self.pos, &mut self.vel, self.radius, STAGE_WIDTH);
    }

    /// Like `roll`, but relaunches upward on a fixed beat while resting
    fn bounce(&mut self, platforms: &[Platform], tuning: &Tuning) {
        self.integrate(tuning);
        self.settle(platforms, tuning);
        if self.on_platform && self.age.checked_rem(tuning.bouncy_interval) == Some(0) {
            self.vel.y = tuning.bouncy_impulse;
            self.on_platform = false;
        }
        bounce_off_walls(&mut self.pos, &mut self.vel, self.radius, STAGE_WIDTH);
    }

    /// Ignores girders entirely; only the side walls stop it
    fn drift(&mut self, tuning: &Tuning) {
        self.integrate(tuning);
        self.on_platform = false;
        bounce_off_walls(&mut self.pos, &mut self.vel, self.radius, STAGE_WIDTH);
    }

    /// Rolls until the fuse runs out or the player comes close, then blows
    fn fuse(
        &mut self,
        platforms: &[Platform],
        target: Vec2,
        tuning: &Tuning,
    ) -> Option<BarrelSignal> {
        if let BarrelState::Exploding { radius } = &mut self.state {
            *radius += tuning.explosion_growth;
            return None;
        }

        self.roll(platforms, tuning);

        let close = self.pos.distance(target) < tuning.fuse_proximity;
        if self.age > tuning.fuse_ticks || close {
            self.state = BarrelState::Exploding { radius: 0.0 };
            self.vel = Vec2::ZERO;
            return Some(BarrelSignal::Detonated);
        }
        None
    }

    fn integrate(&mut self, tuning: &Tuning) {
        self.age += 1;
        self.vel.y += tuning.gravity;
        self.pos += self.vel;
    }

    fn settle(&mut self, platforms: &[Platform], tuning: &Tuning) {
        let probe = SurfaceProbe {
            left: self.pos.x,
            right: self.pos.x,
            sample_x: self.pos.x,
            bottom: self.pos.y + self.radius,
            top: self.pos.y - self.radius,
            tolerance: tuning.barrel_platform_band,
        };
        match landing_surface(platforms, &probe, self.vel.y) {
            Some(surface) => {
                self.pos.y = surface - self.radius;
                self.vel.y = 0.0;
                self.on_platform = true;
            }
            None => self.on_platform = false,
        }
    }
}

/// Fixed-trajectory fireball aimed once at launch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fireball {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub age: u32,
    /// Set once the fireball has left play on its own
    pub fate: Option<DestroyReason>,
}

impl Fireball {
    /// Launch from `origin` toward `target` at the tuned speed
    pub fn aimed(id: u32, origin: Vec2, target: Vec2, tuning: &Tuning) -> Self {
        // Target exactly on the origin: drop straight down
        let dir = (target - origin).normalize_or(Vec2::Y);
        Self {
            id,
            pos: origin,
            vel: dir * tuning.fireball_speed,
            radius: tuning.fireball_radius,
            age: 0,
            fate: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.fate.is_none()
    }

    pub fn update(&mut self, tuning: &Tuning) {
        if !self.is_alive() {
            return;
        }
        self.pos += self.vel;
        self.age += 1;
        if !within_bounds(self.pos, tuning.fireball_margin, STAGE_WIDTH, STAGE_HEIGHT) {
            self.fate = Some(DestroyReason::LeftStage);
        } else if self.age > tuning.fireball_lifetime {
            self.fate = Some(DestroyReason::Expired);
        }
    }
}
