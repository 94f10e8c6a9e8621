//! Sound cue dispatch
//!
//! The simulation raises events; this maps them to named cues and hands
//! them to whatever can actually make noise. In the browser that is the JS
//! synth behind `play_cue`; in tests it is a recorder.

use crate::settings::Settings;
use crate::sim::{DestroyReason, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Jump,
    Land,
    /// Footstep, player or boss
    Step,
    /// Player took damage
    Hurt,
    PowerUp,
    /// Shield absorbed a projectile, or a barrel detonated
    Impact,
    Throw,
    Roar,
    Fireball,
    LevelClear,
    GameOver,
    Victory,
}

impl SoundEffect {
    /// Cue for an event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        let effect = match event {
            GameEvent::Jumped => Self::Jump,
            GameEvent::Landed => Self::Land,
            GameEvent::Stepped | GameEvent::BossStepped => Self::Step,
            GameEvent::Hit { .. } => Self::Hurt,
            GameEvent::Collected { .. } => Self::PowerUp,
            GameEvent::Exploded => Self::Impact,
            GameEvent::ProjectileDestroyed {
                reason: DestroyReason::Shielded,
                ..
            } => Self::Impact,
            GameEvent::Thrown { .. } => Self::Throw,
            GameEvent::BossRoared => Self::Roar,
            GameEvent::FireballSpawned => Self::Fireball,
            GameEvent::LevelCleared { .. } => Self::LevelClear,
            GameEvent::GameOver => Self::GameOver,
            GameEvent::Victory => Self::Victory,
            GameEvent::LifeLost { .. }
            | GameEvent::LevelStarted { .. }
            | GameEvent::ProjectileDestroyed { .. } => return None,
        };
        Some(effect)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Jump => "jump",
            SoundEffect::Land => "land",
            SoundEffect::Step => "step",
            SoundEffect::Hurt => "hurt",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::Impact => "impact",
            SoundEffect::Throw => "throw",
            SoundEffect::Roar => "roar",
            SoundEffect::Fireball => "fireball",
            SoundEffect::LevelClear => "levelclear",
            SoundEffect::GameOver => "gameover",
            SoundEffect::Victory => "victory",
        }
    }
}

/// Something that can play a cue at a given gain
pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect, gain: f32);
}

/// Audio manager for the game
pub struct AudioManager<S: SoundSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    mute_on_blur: bool,
    focused: bool,
}

impl<S: SoundSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        let mut audio = Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            mute_on_blur: true,
            focused: true,
        };
        audio.apply_settings(settings);
        audio
    }

    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
        self.mute_on_blur = settings.mute_on_blur;
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Window focus; while unfocused, `mute_on_blur` silences every cue
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    fn effective_volume(&self) -> f32 {
        if self.muted || (self.mute_on_blur && !self.focused) {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play the cue for every event that has one
    pub fn dispatch(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
