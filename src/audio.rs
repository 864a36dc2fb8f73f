//! Audio sink interface
//!
//! The simulation never plays sound directly: it emits `GameEvent`s and the
//! frontend forwards the matching cue into whatever sink is wired up. Sinks
//! are fire-and-forget and must never block a tick; a cue that failed to load
//! simply plays nothing.

use crate::sim::GameEvent;

/// Sound cues the game can request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Laser,
    Explosion,
    Hit,
    LevelClear,
    ModeSwitch,
}

/// Fire-and-forget sound output
pub trait AudioSink {
    fn play(&mut self, cue: Cue);
}

/// Sink for headless runs and missing audio devices
#[derive(Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _cue: Cue) {}
}

/// Map a game event to its sound cue, if it has one
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::ShotFired => Some(Cue::Laser),
        GameEvent::MeteorDestroyed | GameEvent::AlienKilled => Some(Cue::Explosion),
        GameEvent::PlayerHit => Some(Cue::Hit),
        GameEvent::LevelCleared { .. } => Some(Cue::LevelClear),
        GameEvent::ModeSwitched(_) => Some(Cue::ModeSwitch),
        GameEvent::GameOver => None,
    }
}
