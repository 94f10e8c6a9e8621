//! Level geometry
//!
//! Levels are immutable once loaded. Malformed data is rejected here so the
//! tick never has to cope with geometry outside the stage.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{STAGE_HEIGHT, STAGE_WIDTH};

/// The shipped fifteen-level campaign
const BUILTIN_LEVELS: &str = include_str!("../../assets/levels.json");

/// A walkable girder, possibly sloped
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Platform {
    pub fn min_x(&self) -> f32 {
        self.x1.min(self.x2)
    }

    pub fn max_x(&self) -> f32 {
        self.x1.max(self.x2)
    }

    /// Zero horizontal extent; slope interpolation is undefined
    pub fn is_vertical(&self) -> bool {
        self.x1 == self.x2
    }
}

/// A climbable vertical span centered on `x`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub x: f32,
    pub y: f32,
    pub height: f32,
}

impl Ladder {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Speed,
    Shield,
}

/// Where a power-up sits when the level starts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPlacement {
    pub pos: Vec2,
    pub kind: PowerUpKind,
}

/// One stage of the campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Accent color for the renderer
    #[serde(default)]
    pub color: String,
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
    pub goal: Vec2,
    /// Boss spawn point and patrol origin
    pub boss: Vec2,
    #[serde(default)]
    pub power_ups: Vec<PowerUpPlacement>,
    /// Player start (top-left of the player box)
    #[serde(default = "default_start")]
    pub start: Vec2,
}

fn default_start() -> Vec2 {
    Vec2::new(50.0, STAGE_HEIGHT - 50.0)
}

/// Reasons a level is rejected at load time
#[derive(Debug)]
pub enum LevelError {
    /// Level data is not valid JSON for the schema
    Parse(serde_json::Error),
    /// A campaign must contain at least one level
    Empty,
    NoPlatforms { level: String },
    /// Platform endpoints share an x coordinate
    DegeneratePlatform { level: String, index: usize },
    /// A point or span falls outside the stage
    OutOfStage { level: String, what: String },
    /// Host asked for a level the campaign does not have
    UnknownLevel { index: usize, count: usize },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "invalid level data: {e}"),
            Self::Empty => write!(f, "campaign has no levels"),
            Self::NoPlatforms { level } => write!(f, "level '{level}' has no platforms"),
            Self::DegeneratePlatform { level, index } => {
                write!(f, "level '{level}' platform {index} has zero horizontal length")
            }
            Self::OutOfStage { level, what } => {
                write!(f, "level '{level}': {what} lies outside the stage")
            }
            Self::UnknownLevel { index, count } => {
                write!(f, "level {index} does not exist (campaign has {count})")
            }
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}

fn on_stage(p: Vec2) -> bool {
    (0.0..=STAGE_WIDTH).contains(&p.x) && (0.0..=STAGE_HEIGHT).contains(&p.y)
}

impl Level {
    /// Check the level fits the stage and every platform can be interpolated
    pub fn validate(&self) -> Result<(), LevelError> {
        let out_of_stage = |what: String| LevelError::OutOfStage {
            level: self.name.clone(),
            what,
        };

        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms {
                level: self.name.clone(),
            });
        }

        for (index, platform) in self.platforms.iter().enumerate() {
            if platform.is_vertical() {
                return Err(LevelError::DegeneratePlatform {
                    level: self.name.clone(),
                    index,
                });
            }
            let a = Vec2::new(platform.x1, platform.y1);
            let b = Vec2::new(platform.x2, platform.y2);
            if !on_stage(a) || !on_stage(b) {
                return Err(out_of_stage(format!("platform {index}")));
            }
        }

        for (index, ladder) in self.ladders.iter().enumerate() {
            let top = Vec2::new(ladder.x, ladder.y);
            let bottom = Vec2::new(ladder.x, ladder.bottom());
            if ladder.height <= 0.0 || !on_stage(top) || !on_stage(bottom) {
                return Err(out_of_stage(format!("ladder {index}")));
            }
        }

        for (index, placement) in self.power_ups.iter().enumerate() {
            if !on_stage(placement.pos) {
                return Err(out_of_stage(format!("power-up {index}")));
            }
        }

        if !on_stage(self.goal) {
            return Err(out_of_stage("goal".into()));
        }
        if !on_stage(self.boss) {
            return Err(out_of_stage("boss spawn".into()));
        }
        if !on_stage(self.start) {
            return Err(out_of_stage("player start".into()));
        }

        Ok(())
    }
}

/// Validate a whole campaign, failing on the first bad level
pub fn validate_campaign(levels: &[Level]) -> Result<(), LevelError> {
    if levels.is_empty() {
        return Err(LevelError::Empty);
    }
    levels.iter().try_for_each(Level::validate)
}

/// Parse and validate a campaign from JSON
pub fn parse_levels(json: &str) -> Result<Vec<Level>, LevelError> {
    let levels: Vec<Level> = serde_json::from_str(json)?;
    validate_campaign(&levels)?;
    Ok(levels)
}

/// The built-in campaign
pub fn builtin_levels() -> Result<Vec<Level>, LevelError> {
    parse_levels(BUILTIN_LEVELS)
}
