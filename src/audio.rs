//! Sound effect routing
//!
//! The simulation never plays sounds itself. The host hands each drained
//! `GameEvent` to `AudioManager`, which picks an effect, applies the volume
//! settings and forwards it to whatever `AudioSink` the platform provides.

use crate::settings::Settings;
use crate::sim::{GameEvent, HazardSize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Bullet fired
    Shoot,
    /// Engine loop begins
    ThrustLoopStart,
    /// Engine loop ends
    ThrustLoopStop,
    /// Hazard destroyed
    Explosion(HazardSize),
    /// Ship hit by a hazard
    ShipDestroyed,
    /// Last life lost
    GameOver,
}

impl SoundEffect {
    /// Mix level relative to the other effects
    pub fn base_gain(self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.4,
            SoundEffect::ThrustLoopStart | SoundEffect::ThrustLoopStop => 0.3,
            SoundEffect::Explosion(HazardSize::Small) => 0.5,
            SoundEffect::Explosion(HazardSize::Medium) => 0.7,
            SoundEffect::Explosion(HazardSize::Large) => 1.0,
            SoundEffect::ShipDestroyed => 1.0,
            SoundEffect::GameOver => 0.8,
        }
    }
}

/// Anything that can make noise
pub trait AudioSink {
    /// Play `effect` at `volume` (0.0 - 1.0)
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect, _volume: f32) {}
}

/// Logs each effect and keeps a history, for headless runs
#[derive(Debug, Default, Clone)]
pub struct LogAudio {
    pub played: Vec<(SoundEffect, f32)>,
}

impl AudioSink for LogAudio {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} @ {:.2}", effect, volume);
        self.played.push((effect, volume));
    }
}

/// Effect for an event, if it has one
pub fn sound_for_event(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Shot => Some(SoundEffect::Shoot),
        GameEvent::ThrustStarted => Some(SoundEffect::ThrustLoopStart),
        GameEvent::ThrustStopped => Some(SoundEffect::ThrustLoopStop),
        GameEvent::HazardDestroyed { size, .. } => Some(SoundEffect::Explosion(*size)),
        GameEvent::ShipDestroyed { .. } => Some(SoundEffect::ShipDestroyed),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        _ => None,
    }
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Box<dyn AudioSink>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new(Box::new(NullAudio))
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volume and mute from persisted settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_master_volume(settings.master_volume);
        self.set_sfx_volume(settings.sfx_volume);
        self.set_muted(settings.muted);
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_gain();
        if vol <= 0.0 {
            return;
        }
        self.sink.play(effect, vol);
    }

    /// Play whatever `event` sounds like
    pub fn handle_event(&mut self, event: &GameEvent) {
        if let Some(effect) = sound_for_event(event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Shares its history with the test after being boxed into the manager
    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<(SoundEffect, f32)>>>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.borrow_mut().push((effect, volume));
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(sound_for_event(&GameEvent::Shot), Some(SoundEffect::Shoot));
        assert_eq!(
            sound_for_event(&GameEvent::HazardDestroyed {
                size: HazardSize::Medium,
                pos: Vec2::ZERO
            }),
            Some(SoundEffect::Explosion(HazardSize::Medium))
        );
        assert_eq!(sound_for_event(&GameEvent::WaveCleared { wave: 1 }), None);
        assert_eq!(sound_for_event(&GameEvent::Paused), None);
    }

    #[test]
    fn test_volume_scaling() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(0.5);
        audio.play(SoundEffect::ShipDestroyed);

        let played = recorder.0.borrow();
        assert_eq!(played.len(), 1);
        assert!((played[0].1 - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_mute_silences_sink() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_muted(true);
        audio.handle_event(&GameEvent::Shot);
        audio.set_muted(false);
        audio.set_master_volume(0.0);
        audio.handle_event(&GameEvent::Shot);
        assert!(recorder.0.borrow().is_empty());
    }

    #[test]
    fn test_volume_is_clamped() {
        let recorder = Recorder::default();
        let mut audio = AudioManager::new(Box::new(recorder.clone()));
        audio.set_master_volume(3.0);
        audio.set_sfx_volume(2.0);
        audio.play(SoundEffect::Explosion(HazardSize::Large));
        assert_eq!(recorder.0.borrow()[0].1, 1.0);
    }

    #[test]
    fn test_log_audio_keeps_history() {
        let mut sink = LogAudio::default();
        sink.play(SoundEffect::GameOver, 0.8);
        assert_eq!(sink.played, vec![(SoundEffect::GameOver, 0.8)]);
    }
}
