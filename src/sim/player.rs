//! Player entity and per-tick movement

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{SurfaceProbe, ladder_at, landing_surface};
use super::event::GameEvent;
use super::level::{Level, PowerUpKind};
use super::tick::TickInput;
use crate::consts::STAGE_WIDTH;
use crate::tuning::Tuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// The climber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner of the player box
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub facing: Facing,
    pub on_ground: bool,
    pub on_ladder: bool,
    pub shield_ticks: u32,
    pub speed_ticks: u32,
    /// Post-hit grace window
    pub invuln_ticks: u32,
    pub health: u32,
    /// Animation pacing only
    pub climb_progress: f32,
    /// Consecutive ticks spent falling
    pub fall_ticks: u32,
    pub anim_frame: u32,
}

impl Player {
    pub fn new(spawn: Vec2, tuning: &Tuning) -> Self {
        Self {
            pos: spawn,
            vel: Vec2::ZERO,
            size: tuning.player_size,
            facing: Facing::Right,
            on_ground: false,
            on_ladder: false,
            shield_ticks: 0,
            speed_ticks: 0,
            invuln_ticks: 0,
            health: tuning.max_health,
            climb_progress: 0.0,
            fall_ticks: 0,
            anim_frame: 0,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Contact reach used against projectiles
    pub fn reach(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn is_shielded(&self) -> bool {
        self.shield_ticks > 0
    }

    pub fn is_boosted(&self) -> bool {
        self.speed_ticks > 0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_ticks > 0
    }

    /// Whether the presentation layer should show the falling cue
    pub fn is_parachuting(&self, tuning: &Tuning) -> bool {
        self.fall_ticks > tuning.fall_cue_ticks
    }

    /// Count every buff and the grace window down by one tick
    pub fn tick_buffs(&mut self) {
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.speed_ticks = self.speed_ticks.saturating_sub(1);
        self.invuln_ticks = self.invuln_ticks.saturating_sub(1);
    }

    /// Apply a collected power-up; an active buff of the same kind is reset, not extended
    pub fn grant(&mut self, kind: PowerUpKind, tuning: &Tuning) {
        match kind {
            PowerUpKind::Shield => self.shield_ticks = tuning.shield_ticks,
            PowerUpKind::Speed => self.speed_ticks = tuning.speed_ticks,
        }
    }

    /// Take a hit and start the grace window. Health floors at zero.
    pub fn damage(&mut self, amount: u32, tuning: &Tuning) {
        self.health = self.health.saturating_sub(amount);
        self.invuln_ticks = tuning.invulnerability_ticks;
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Put the player back at a level start with full health
    pub fn respawn(&mut self, spawn: Vec2, tuning: &Tuning) {
        self.pos = spawn;
        self.vel = Vec2::ZERO;
        self.on_ground = false;
        self.on_ladder = false;
        self.fall_ticks = 0;
        self.health = tuning.max_health;
    }

    /// Resolve input, gravity and level contact for one tick
    pub fn step(
        &mut self,
        input: &TickInput,
        level: &Level,
        tuning: &Tuning,
        events: &mut Vec<GameEvent>,
    ) {
        self.anim_frame = self.anim_frame.wrapping_add(1);

        let speed = tuning.move_speed(self.is_boosted());
        self.vel.x = 0.0;
        if input.left {
            self.vel.x = -speed;
            self.facing = Facing::Left;
        } else if input.right {
            self.vel.x = speed;
            self.facing = Facing::Right;
        }

        let on_beat = self.anim_frame.checked_rem(tuning.step_interval) == Some(0);
        if self.on_ground && self.vel.x != 0.0 && on_beat {
            events.push(GameEvent::Stepped);
        }

        let center_x = self.center().x;
        self.on_ladder = ladder_at(
            &level.ladders,
            center_x,
            self.pos.y,
            self.pos.y + self.size.y,
            tuning.ladder_grab_distance,
        )
        .is_some();

        if self.on_ladder {
            self.climb(input, speed, tuning, events);
        } else {
            self.vel.y += tuning.gravity;
            if input.jump && self.on_ground {
                self.vel.y = tuning.jump_velocity;
                self.on_ground = false;
                events.push(GameEvent::Jumped);
            }
        }

        self.pos += self.vel;

        let was_grounded = self.on_ground;
        self.on_ground = false;
        if !self.on_ladder {
            self.land(level, tuning);
            if self.on_ground && !was_grounded {
                events.push(GameEvent::Landed);
            }
        }

        if !self.on_ground && !self.on_ladder && self.vel.y > 1.0 {
            self.fall_ticks += 1;
        } else {
            self.fall_ticks = 0;
        }

        self.pos.x = self.pos.x.clamp(0.0, STAGE_WIDTH - self.size.x);
    }

    fn climb(&mut self, input: &TickInput, speed: f32, tuning: &Tuning, events: &mut Vec<GameEvent>) {
        self.vel.y = 0.0;
        // Down wins when both are held
        for (held, vy) in [(input.up, -speed), (input.down, speed)] {
            if !held {
                continue;
            }
            self.vel.y = vy;
            self.climb_progress += tuning.climb_progress_per_tick;
            if (self.climb_progress * 10.0).floor() as i64 % 20 == 0 {
                events.push(GameEvent::Stepped);
            }
        }
    }

    fn land(&mut self, level: &Level, tuning: &Tuning) {
        let bottom = self.pos.y + self.size.y;
        let probe = SurfaceProbe {
            left: self.pos.x,
            right: self.pos.x + self.size.x,
            sample_x: self.center().x,
            bottom,
            top: bottom,
            tolerance: tuning.ground_tolerance,
        };
        if let Some(surface) = landing_surface(&level.platforms, &probe, self.vel.y) {
            self.pos.y = surface - self.size.y;
            self.vel.y = 0.0;
            self.on_ground = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::{Ladder, Platform};

    fn test_level() -> Level {
        Level {
            name: "Flat".into(),
            color: String::new(),
            platforms: vec![Platform {
                x1: 0.0,
                y1: 580.0,
                x2: 800.0,
                y2: 580.0,
            }],
            ladders: vec![Ladder {
                x: 400.0,
                y: 480.0,
                height: 100.0,
            }],
            goal: Vec2::new(40.0, 45.0),
            boss: Vec2::new(300.0, 40.0),
            power_ups: Vec::new(),
            start: Vec2::new(50.0, 545.0),
        }
    }

    fn settle(player: &mut Player, level: &Level, tuning: &Tuning) {
        let mut events = Vec::new();
        for _ in 0..5 {
            player.step(&TickInput::default(), level, tuning, &mut events);
        }
    }

    #[test]
    fn test_player_rests_on_floor() {
        let tuning = Tuning::default();
        let level = test_level();
        let mut player = Player::new(level.start, &tuning);
        settle(&mut player, &level, &tuning);
        assert!(player.on_ground);
        assert_eq!(player.pos.y + player.size.y, 580.0);
        assert_eq!(player.fall_ticks, 0);
    }

    #[test]
    fn test_landing_emits_once() {
        let tuning = Tuning::default();
        let level = test_level();
        let mut player = Player::new(Vec2::new(50.0, 500.0), &tuning);
        let mut events = Vec::new();
        for _ in 0..40 {
            player.step(&TickInput::default(), &level, &tuning, &mut events);
        }
        let landings = events.iter().filter(|e| **e == GameEvent::Landed).count();
        assert_eq!(landings, 1);
    }

    #[test]
    fn test_jump_needs_ground() {
        let tuning = Tuning::default();
        let level = test_level();
        let mut player = Player::new(level.start, &tuning);
        settle(&mut player, &level, &tuning);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let mut events = Vec::new();
        player.step(&jump, &level, &tuning, &mut events);
        assert_eq!(events, vec![GameEvent::Jumped]);
        assert_eq!(player.vel.y, tuning.jump_velocity);
        assert!(!player.on_ground);

        // Airborne: a second press does nothing
        events.clear();
        player.step(&jump, &level, &tuning, &mut events);
        assert!(events.is_empty());
        assert_eq!(player.vel.y, tuning.jump_velocity + tuning.gravity);
    }

    #[test]
    fn test_speed_boost_scales_walk() {
        let tuning = Tuning::default();
        let level = test_level();
        let mut player = Player::new(level.start, &tuning);
        settle(&mut player, &level, &tuning);
        player.grant(PowerUpKind::Speed, &tuning);

        let right = TickInput {
            right: true,
            ..Default::default()
        };
        let x = player.pos.x;
        player.step(&right, &level, &tuning, &mut Vec::new());
        assert_eq!(player.pos.x - x, 6.0);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_clamped_to_stage() {
        let tuning = Tuning::default();
        let level = test_level();
        let mut player = Player::new(Vec2::new(2.0, 545.0), &tuning);
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        player.step(&left, &level, &tuning, &mut Vec::new());
        assert_eq!(player.pos.x, 0.0);
        assert_eq!(player.facing, Facing::Left);

        player.pos.x = STAGE_WIDTH - 26.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        player.step(&right, &level, &tuning, &mut Vec::new());
        assert_eq!(player.pos.x, STAGE_WIDTH - player.size.x);
    }

    #[test]
    fn test_ladder_suspends_gravity() {
        let tuning = Tuning::default();
        let level = test_level();
        // Centered on the ladder, mid-span
        let mut player = Player::new(Vec2::new(387.5, 500.0), &tuning);
        player.step(&TickInput::default(), &level, &tuning, &mut Vec::new());
        assert!(player.on_ladder);
        assert_eq!(player.vel.y, 0.0);
        assert_eq!(player.pos.y, 500.0);

        let up = TickInput {
            up: true,
            ..Default::default()
        };
        player.step(&up, &level, &tuning, &mut Vec::new());
        assert_eq!(player.pos.y, 496.0);
        assert_eq!(player.climb_progress, 0.25);
    }

    #[test]
    fn test_grant_overwrites_duration() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.grant(PowerUpKind::Shield, &tuning);
        for _ in 0..100 {
            player.tick_buffs();
        }
        assert_eq!(player.shield_ticks, 200);
        player.grant(PowerUpKind::Shield, &tuning);
        assert_eq!(player.shield_ticks, tuning.shield_ticks);
    }

    #[test]
    fn test_damage_floors_at_zero() {
        let tuning = Tuning::default();
        let mut player = Player::new(Vec2::ZERO, &tuning);
        player.health = 15;
        player.damage(20, &tuning);
        assert_eq!(player.health, 0);
        assert!(player.is_dead());
        assert_eq!(player.invuln_ticks, tuning.invulnerability_ticks);
    }

    #[test]
    fn test_falling_cue() {
        let tuning = Tuning::default();
        let level = test_level();
        let mut player = Player::new(Vec2::new(100.0, 0.0), &tuning);
        for _ in 0..25 {
            player.step(&TickInput::default(), &level, &tuning, &mut Vec::new());
        }
        assert!(player.is_parachuting(&tuning));
    }
}
