//! Data-driven game balance
//!
//! Every number the simulation uses lives here. `Tuning::default()` is the
//! shipped balance; hosts may override any subset from JSON.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Balance table, all values in pixels and simulation ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    /// Downward acceleration applied to the player and barrels every tick
    pub gravity: f32,

    // === Player ===
    pub player_size: Vec2,
    pub player_speed: f32,
    /// Horizontal and climb speed multiplier while a speed boost is active
    pub speed_boost_multiplier: f32,
    pub jump_velocity: f32,
    /// How far below a platform surface the feet may sink and still land
    pub ground_tolerance: f32,
    /// Horizontal distance from a ladder centerline that still counts as contact
    pub ladder_grab_distance: f32,
    pub climb_progress_per_tick: f32,
    /// Animation frames between footstep cues while walking
    pub step_interval: u32,
    /// Falling ticks after which the presentation layer shows the parachute
    pub fall_cue_ticks: u32,
    pub max_health: u32,
    pub starting_lives: u32,
    pub invulnerability_ticks: u32,

    // === Barrels ===
    pub barrel_radius: f32,
    pub barrel_speed: f32,
    pub fast_barrel_multiplier: f32,
    /// Band below a platform surface in which a barrel still settles
    pub barrel_platform_band: f32,
    pub bouncy_interval: u32,
    pub bouncy_impulse: f32,
    pub fuse_ticks: u32,
    pub fuse_proximity: f32,
    pub explosion_growth: f32,
    pub explosion_max_radius: f32,

    // === Damage ===
    pub barrel_damage: u32,
    pub fast_barrel_damage: u32,
    pub explosion_damage: u32,
    pub fireball_damage: u32,

    // === Fireballs ===
    pub fireball_radius: f32,
    pub fireball_speed: f32,
    pub fireball_lifetime: u32,
    /// Distance outside the stage a fireball may travel before it is dropped
    pub fireball_margin: f32,
    /// Ticks after a throw at which each salvo fireball is launched
    pub salvo_delays: Vec<u32>,

    // === Boss ===
    pub boss_speed: f32,
    pub boss_patrol_range: f32,
    pub throw_interval: u64,
    pub roar_ticks: u32,
    pub stomp_ticks: u32,
    pub flame_ticks: u32,
    pub throw_offset: Vec2,
    pub fireball_offset: Vec2,
    /// Waddle frames between heavy footstep cues
    pub boss_step_interval: u64,

    // === Power-ups ===
    pub pickup_radius: f32,
    pub shield_ticks: u32,
    pub speed_ticks: u32,
    pub power_up_pulse_rate: f32,

    // === Scoring ===
    pub power_up_score: u64,
    pub shielded_barrel_score: u64,
    pub shielded_fireball_score: u64,
    pub cleared_barrel_score: u64,

    // === Progression ===
    /// Half extents of the box around the goal that ends the level
    pub goal_reach: Vec2,
    pub level_transition_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 0.5,

            player_size: Vec2::new(25.0, 35.0),
            player_speed: 4.0,
            speed_boost_multiplier: 1.5,
            jump_velocity: -9.0,
            ground_tolerance: 15.0,
            ladder_grab_distance: 20.0,
            climb_progress_per_tick: 0.25,
            step_interval: 15,
            fall_cue_ticks: 20,
            max_health: 100,
            starting_lives: 3,
            invulnerability_ticks: 60,

            barrel_radius: 12.0,
            barrel_speed: 3.0,
            fast_barrel_multiplier: 1.8,
            barrel_platform_band: 10.0,
            bouncy_interval: 60,
            bouncy_impulse: -6.0,
            fuse_ticks: 300,
            fuse_proximity: 40.0,
            explosion_growth: 4.0,
            explosion_max_radius: 60.0,

            barrel_damage: 20,
            fast_barrel_damage: 35,
            explosion_damage: 50,
            fireball_damage: 15,

            fireball_radius: 10.0,
            fireball_speed: 6.0,
            fireball_lifetime: 200,
            fireball_margin: 100.0,
            salvo_delays: vec![12, 24, 36],

            boss_speed: 1.2,
            boss_patrol_range: 80.0,
            throw_interval: 90,
            roar_ticks: 50,
            stomp_ticks: 20,
            flame_ticks: 40,
            throw_offset: Vec2::new(30.0, 60.0),
            fireball_offset: Vec2::new(30.0, 40.0),
            boss_step_interval: 100,

            pickup_radius: 30.0,
            shield_ticks: 300,
            speed_ticks: 480,
            power_up_pulse_rate: 0.1,

            power_up_score: 500,
            shielded_barrel_score: 200,
            shielded_fireball_score: 300,
            cleared_barrel_score: 100,

            goal_reach: Vec2::new(50.0, 60.0),
            level_transition_ticks: 120,
        }
    }
}

impl Tuning {
    /// Parse a tuning override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Player move speed for this tick
    pub fn move_speed(&self, boosted: bool) -> f32 {
        if boosted {
            self.player_speed * self.speed_boost_multiplier
        } else {
            self.player_speed
        }
    }
}
