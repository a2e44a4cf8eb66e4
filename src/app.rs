//! Host driver
//!
//! Owns the session and its collaborators. Runs the fixed-step accumulator,
//! feeds input to `tick`, and routes the drained events to audio, the high
//! score store and the settings file. Storage failures are logged and the
//! session carries on.

use std::path::PathBuf;

use crate::audio::AudioManager;
use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::highscores::HighScore;
use crate::persistence::HighScoreStore;
use crate::platform::InputSource;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, Snapshot, TickInput, tick};
use crate::tuning::Tuning;

/// Longest frame the accumulator will absorb (seconds)
const MAX_FRAME_TIME: f32 = 0.1;

/// Counters for a run, reported by the headless binary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub ticks: u64,
    pub sessions: u32,
    pub shots: u64,
    pub hazards_destroyed: u64,
    pub ships_lost: u32,
    pub waves_cleared: u32,
    pub games_over: u32,
}

pub struct App<S: HighScoreStore> {
    state: GameState,
    audio: AudioManager,
    store: S,
    settings: Settings,
    settings_path: Option<PathBuf>,
    accumulator: f32,
    exit_requested: bool,
    stats: RunStats,
}

impl<S: HighScoreStore> App<S> {
    pub fn new(
        seed: u64,
        mut tuning: Tuning,
        settings: Settings,
        store: S,
        mut audio: AudioManager,
    ) -> Self {
        settings.apply_to(&mut tuning);
        audio.apply_settings(&settings);

        let mut state = GameState::new(seed, tuning);
        state.set_display_scale(settings.display_scale);

        let best = store.load_high_score().unwrap_or_else(|e| {
            log::warn!("Could not load high score, starting from zero: {}", e);
            HighScore::default()
        });
        if best.is_empty() {
            log::info!("Rockfall ready (seed {}, no high score yet)", seed);
        } else {
            log::info!(
                "Rockfall ready (seed {}, high score {} on wave {})",
                seed,
                best.score,
                best.wave
            );
        }
        state.set_high_score(best);

        Self {
            state,
            audio,
            store,
            settings,
            settings_path: None,
            accumulator: 0.0,
            exit_requested: false,
            stats: RunStats::default(),
        }
    }

    /// Persist settings changes (display scale) to `path`
    pub fn with_settings_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.settings_path = Some(path.into());
        self
    }

    /// Run as many fixed ticks as `frame_dt` seconds allow. Returns ticks run.
    pub fn update(&mut self, frame_dt: f32, input: &mut dyn InputSource) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let tick_input = input.poll(&self.state);
            self.step(&tick_input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Running behind: drop the backlog instead of fast-forwarding later
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Advance exactly one tick and dispatch its events
    pub fn step(&mut self, input: &TickInput) {
        tick(&mut self.state, input, SIM_DT);
        self.stats.ticks += 1;
        for event in self.state.drain_events() {
            self.dispatch(&event);
        }
    }

    fn dispatch(&mut self, event: &GameEvent) {
        self.audio.handle_event(event);

        match *event {
            GameEvent::SessionStarted => self.stats.sessions += 1,
            GameEvent::Shot => self.stats.shots += 1,
            GameEvent::HazardDestroyed { .. } => self.stats.hazards_destroyed += 1,
            GameEvent::ShipDestroyed { .. } => self.stats.ships_lost += 1,
            GameEvent::WaveCleared { .. } => self.stats.waves_cleared += 1,
            GameEvent::GameOver { .. } => self.stats.games_over += 1,
            GameEvent::NewHighScore { score, wave } => {
                if let Err(e) = self.store.save_high_score(&HighScore::new(score, wave)) {
                    log::warn!("Failed to save high score {}: {}", score, e);
                }
            }
            GameEvent::DisplayScaleChanged(scale) => {
                self.settings.set_display_scale(scale);
                self.save_settings();
            }
            GameEvent::ExitRequested => self.exit_requested = true,
            _ => {}
        }
    }

    fn save_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(e) = self.settings.save_to(path) {
            log::warn!("Failed to save settings: {}", e);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{JsonFileStore, MemoryStore};
    use crate::platform::ScriptedInput;
    use crate::sim::{Actions, GamePhase, Hazard, HazardSize};

    fn app_with(store: MemoryStore) -> App<MemoryStore> {
        App::new(
            7,
            Tuning::default(),
            Settings::default(),
            store,
            AudioManager::default(),
        )
    }

    /// Put the session one tick away from losing its last life
    fn doomed(app: &mut App<MemoryStore>, score: u64) {
        let state = app.state_mut();
        state.start_new_game();
        state.drain_events();
        state.phase = GamePhase::Playing;
        state.lives = 1;
        state.score = score;
        let pos = state.ship.pos;
        state
            .hazards
            .push(Hazard::new(pos, glam::Vec2::ZERO, HazardSize::Large));
    }

    #[test]
    fn test_high_score_loaded_on_start() {
        let app = app_with(MemoryStore::with(HighScore::new(700, 3)));
        assert_eq!(app.state().best.score, 700);
        assert_eq!(app.snapshot().high_score_wave, 3);
    }

    #[test]
    fn test_beaten_high_score_is_saved() {
        let mut app = app_with(MemoryStore::with(HighScore::new(50, 1)));
        doomed(&mut app, 120);
        app.step(&TickInput::default());

        assert_eq!(app.state().phase, GamePhase::GameOver);
        assert_eq!(app.store().saves, 1);
        assert_eq!(app.store().stored(), Some(HighScore::new(120, 1)));
        assert_eq!(app.stats().games_over, 1);
    }

    #[test]
    fn test_unbeaten_high_score_is_not_saved() {
        let mut app = app_with(MemoryStore::with(HighScore::new(500, 4)));
        doomed(&mut app, 120);
        app.step(&TickInput::default());

        assert_eq!(app.state().phase, GamePhase::GameOver);
        assert_eq!(app.store().saves, 0);
        assert_eq!(app.state().best.score, 500);
    }

    #[test]
    fn test_corrupt_store_degrades_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::in_dir(dir.path());
        std::fs::write(store.path(), "garbage").unwrap();

        let app = App::new(
            1,
            Tuning::default(),
            Settings::default(),
            store,
            AudioManager::default(),
        );
        assert_eq!(app.state().best.score, 0);
        assert_eq!(app.state().phase, GamePhase::Menu);
    }

    #[test]
    fn test_exit_from_menu() {
        let mut app = app_with(MemoryStore::default());
        // New Game, High Scores, Scale, Exit
        app.step(&TickInput::pressed(Actions::NAV_UP));
        assert!(!app.exit_requested());
        app.step(&TickInput::pressed(Actions::SELECT));
        assert!(app.exit_requested());
    }

    #[test]
    fn test_scale_change_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let mut app = app_with(MemoryStore::default()).with_settings_path(path.clone());

        app.step(&TickInput::pressed(Actions::NAV_DOWN));
        app.step(&TickInput::pressed(Actions::NAV_DOWN));
        app.step(&TickInput::pressed(Actions::SELECT));

        assert_eq!(app.settings().display_scale, 3);
        assert_eq!(Settings::load_from(&path).unwrap().display_scale, 3);
    }

    #[test]
    fn test_settings_shape_the_session() {
        let settings = Settings {
            particles: false,
            display_scale: 4,
            ..Settings::default()
        };
        let app = App::new(
            1,
            Tuning::default(),
            settings,
            MemoryStore::default(),
            AudioManager::default(),
        );
        assert_eq!(app.state().display_scale, 4);
        assert_eq!(app.state().particles.limit(), 0);
    }

    #[test]
    fn test_accumulator_caps_substeps() {
        let mut app = app_with(MemoryStore::default());
        let mut input = ScriptedInput::default();
        assert_eq!(app.update(1.0, &mut input), MAX_SUBSTEPS);
        assert_eq!(app.stats().ticks, MAX_SUBSTEPS as u64);

        let mut fresh = app_with(MemoryStore::default());
        assert_eq!(fresh.update(0.001, &mut input), 0);
    }

    #[test]
    fn test_slow_frames_do_not_build_a_backlog() {
        let mut app = app_with(MemoryStore::default());
        let mut input = ScriptedInput::default();
        for _ in 0..50 {
            app.update(0.1, &mut input);
            assert!(app.accumulator < SIM_DT);
        }

        // Back at full rate: exactly one tick per frame, no catch-up bursts
        for _ in 0..600 {
            assert_eq!(app.update(SIM_DT, &mut input), 1);
        }
    }
}
