//! The barrel-throwing boss

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::BarrelKind;
use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    /// Top-left of the boss sprite
    pub pos: Vec2,
    pub vx: f32,
    pub patrol_range: f32,
    pub origin_x: f32,
    /// Telegraph before and after a throw; patrol is suspended while set
    pub roar_ticks: u32,
    /// Screen shake
    pub stomp_ticks: u32,
    /// Flame breath (exploding throws only)
    pub flame_ticks: u32,
    pub waddle_frame: u64,
}

impl Boss {
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: spawn,
            vx: tuning.boss_speed,
            patrol_range: tuning.boss_patrol_range,
            origin_x: spawn.x,
            roar_ticks: 0,
            stomp_ticks: 0,
            flame_ticks: 0,
            waddle_frame: 0,
        }
    }

    pub fn is_roaring(&self) -> bool {
        self.roar_ticks > 0
    }

    pub fn tick_timers(&mut self) {
        self.roar_ticks = self.roar_ticks.saturating_sub(1);
        self.stomp_ticks = self.stomp_ticks.saturating_sub(1);
        self.flame_ticks = self.flame_ticks.saturating_sub(1);
    }

    /// Waddle along the patrol span. Returns true on a heavy footstep.
    pub fn patrol(&mut self, tuning: &Tuning) -> bool {
        if self.is_roaring() {
            return false;
        }
        self.pos.x += self.vx;
        self.waddle_frame += 1;
        if (self.pos.x - self.origin_x).abs() > self.patrol_range {
            self.vx = -self.vx;
        }
        self.waddle_frame.checked_rem(tuning.boss_step_interval) == Some(0)
    }

    /// Start the throw animation and return where the barrel appears
    pub fn throw(&mut self, kind: BarrelKind, tuning: &Tuning) -> Vec2 {
        self.roar_ticks = tuning.roar_ticks;
        self.stomp_ticks = tuning.stomp_ticks;
        if kind == BarrelKind::Exploding {
            self.flame_ticks = tuning.flame_ticks;
        }
        self.pos + tuning.throw_offset
    }

    /// Where salvo fireballs leave the boss
    pub fn fireball_origin(&self, tuning: &Tuning) -> Vec2 {
        self.pos + tuning.fireball_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patrol_reverses_past_range() {
        let tuning = Tuning::default();
        let mut boss = Boss::new(Vec2::new(300.0, 40.0), &tuning);
        let mut max_offset = 0.0f32;
        for _ in 0..400 {
            boss.patrol(&tuning);
            max_offset = max_offset.max((boss.pos.x - boss.origin_x).abs());
        }
        assert!(max_offset > tuning.boss_patrol_range);
        assert!(max_offset < tuning.boss_patrol_range + 2.0 * tuning.boss_speed);
    }

    #[test]
    fn test_roar_suspends_patrol() {
        let tuning = Tuning::default();
        let mut boss = Boss::new(Vec2::new(300.0, 40.0), &tuning);
        let origin = boss.throw(BarrelKind::Normal, &tuning);
        assert_eq!(origin, Vec2::new(330.0, 100.0));
        assert_eq!(boss.flame_ticks, 0);

        let x = boss.pos.x;
        for _ in 0..tuning.roar_ticks {
            assert!(!boss.patrol(&tuning));
            boss.tick_timers();
        }
        assert_eq!(boss.pos.x, x);
        assert_eq!(boss.stomp_ticks, 0);
        boss.patrol(&tuning);
        assert!(boss.pos.x > x);
    }

    #[test]
    fn test_exploding_throw_breathes_fire() {
        let tuning = Tuning::default();
        let mut boss = Boss::new(Vec2::new(300.0, 40.0), &tuning);
        boss.throw(BarrelKind::Exploding, &tuning);
        assert_eq!(boss.flame_ticks, tuning.flame_ticks);
    }

    #[test]
    fn test_heavy_step_cadence() {
        let tuning = Tuning::default();
        let mut boss = Boss::new(Vec2::new(300.0, 40.0), &tuning);
        let steps: Vec<u64> = (0..250)
            .filter_map(|_| boss.patrol(&tuning).then_some(boss.waddle_frame))
            .collect();
        assert_eq!(steps, vec![100, 200]);
    }
}
