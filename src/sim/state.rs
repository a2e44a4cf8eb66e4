//! Game state and core simulation types
//!
//! Everything the simulation mutates lives in `GameState`, a single owned
//! context passed explicitly to every system.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::population::{Live, Population};
use crate::consts::MAX_SCALE;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    /// Main menu (initial phase)
    Menu,
    /// "Current game will be lost" prompt
    NewGameConfirm,
    /// High-water mark screen
    HighScores,
    /// Countdown before the next wave spawns
    WaveTransition,
    /// Spawn guard: hazards drift, ship waits for the player
    WaitingToSpawn,
    /// Active gameplay
    Playing,
    /// Simulation frozen, pause menu shown
    Paused,
    /// Session ended
    GameOver,
}

impl GamePhase {
    /// Phases in which entities move
    pub fn simulates(self) -> bool {
        matches!(self, GamePhase::Playing | GamePhase::WaitingToSpawn)
    }

    /// Phases that show a navigable menu
    pub fn has_menu(self) -> bool {
        matches!(self, GamePhase::Menu | GamePhase::Paused)
    }
}

/// Hazard size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardSize {
    Small,
    Medium,
    Large,
}

impl HazardSize {
    /// Collision radius
    pub fn radius(self) -> f32 {
        match self {
            HazardSize::Large => 30.0,
            HazardSize::Medium => 20.0,
            HazardSize::Small => 10.0,
        }
    }

    /// Points for destroying a hazard of this size (smaller is worth more)
    pub fn points(self) -> u64 {
        match self {
            HazardSize::Large => 20,
            HazardSize::Medium => 50,
            HazardSize::Small => 100,
        }
    }

    /// Size of the fragments this hazard breaks into, if any
    pub fn split(self) -> Option<HazardSize> {
        match self {
            HazardSize::Large => Some(HazardSize::Medium),
            HazardSize::Medium => Some(HazardSize::Small),
            HazardSize::Small => None,
        }
    }
}

/// The player's craft
#[derive(Debug, Clone, PartialEq)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading in degrees, 0 = up, positive = clockwise
    pub heading: f32,
    pub vel: Vec2,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            heading: 0.0,
            vel: Vec2::ZERO,
        }
    }

    /// Put the ship back at `pos`, motionless and facing up
    pub fn reset(&mut self, pos: Vec2) {
        *self = Self::new(pos);
    }
}

/// A projectile fired by the ship
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    pub alive: bool,
}

impl Live for Bullet {
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn kill(&mut self) {
        self.alive = false;
    }
}

/// A destructible free-floating rock
#[derive(Debug, Clone, PartialEq)]
pub struct Hazard {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: HazardSize,
    /// Visual heading in degrees
    pub heading: f32,
    /// Heading change per tick (degrees, cosmetic)
    pub spin: f32,
    pub alive: bool,
}

impl Hazard {
    pub fn new(pos: Vec2, vel: Vec2, size: HazardSize) -> Self {
        Self {
            pos,
            vel,
            size,
            heading: 0.0,
            spin: 0.0,
            alive: true,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.radius()
    }
}

impl Live for Hazard {
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Particle colour class, resolved to a colour by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleTint {
    Bright,
    Dim,
    Exhaust,
}

/// A particle for visual effects
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds remaining
    pub life: f32,
    /// Initial lifetime, for the fade ratio
    pub max_life: f32,
    pub size: f32,
    pub tint: ParticleTint,
    pub alive: bool,
}

impl Particle {
    /// Remaining life as a fraction of the initial lifetime (1 = fresh)
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

impl Live for Particle {
    fn is_alive(&self) -> bool {
        self.alive
    }
    fn kill(&mut self) {
        self.alive = false;
    }
}

/// Notifications for collaborators (audio, persistence, host).
///
/// Pushed during a tick, drained by the host afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    SessionStarted,
    WaveStarted { wave: u32, hazards: usize },
    WaveCleared { wave: u32 },
    ShipSpawned,
    Shot,
    ThrustStarted,
    ThrustStopped,
    HazardDestroyed { size: HazardSize, pos: Vec2 },
    ShipDestroyed { pos: Vec2, lives_left: u8 },
    GameOver { score: u64, wave: u32 },
    /// The high-water mark was beaten and should be persisted
    NewHighScore { score: u64, wave: u32 },
    Paused,
    Resumed,
    DisplayScaleChanged(u8),
    ExitRequested,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Gameplay balance in effect
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Phase to return to when "Resume Game" is picked from the main menu
    pub resume_phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Current wave (1-based)
    pub wave: u32,
    /// Best session ever recorded (loaded once, raised monotonically)
    pub best: HighScore,
    /// Seconds left before the next wave spawns
    pub wave_timer: f32,
    /// Seconds left before respawn input is honored
    pub spawn_cooldown: f32,
    /// Simulated ticks (only advances while entities move)
    pub time_ticks: u64,
    pub ship: Ship,
    pub bullets: Population<Bullet>,
    pub hazards: Population<Hazard>,
    pub particles: Population<Particle>,
    /// Selected menu row
    pub menu_cursor: usize,
    /// Window scale factor offered through the menu (1..=MAX_SCALE)
    pub display_scale: u8,
    /// Whether thrust was held on the previous playing tick
    pub thrusting: bool,
    /// Pending notifications for the host
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new state in the main menu with the given seed
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let center = tuning.field_center();
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bullets: Population::bounded(tuning.max_bullets),
            hazards: Population::unbounded(),
            particles: Population::bounded(tuning.max_particles),
            tuning,
            phase: GamePhase::Menu,
            resume_phase: GamePhase::Playing,
            score: 0,
            // No session until the player starts one
            lives: 0,
            wave: 1,
            best: HighScore::default(),
            wave_timer: 0.0,
            spawn_cooldown: 0.0,
            time_ticks: 0,
            ship: Ship::new(center),
            menu_cursor: 0,
            display_scale: 2,
            thrusting: false,
            events: Vec::new(),
        }
    }

    /// A session is in progress (drives the "Resume Game" menu entry)
    pub fn has_active_game(&self) -> bool {
        self.lives > 0
    }

    /// Seed the high-water mark from persistent storage
    pub fn set_high_score(&mut self, best: HighScore) {
        self.best = best;
    }

    pub fn set_display_scale(&mut self, scale: u8) {
        self.display_scale = scale.clamp(1, MAX_SCALE);
    }

    /// Reset every session variable and enter the wave countdown
    pub fn start_new_game(&mut self) {
        self.score = 0;
        self.lives = self.tuning.max_lives;
        self.wave = 1;
        self.wave_timer = self.tuning.wave_transition_duration;
        self.spawn_cooldown = self.tuning.spawn_cooldown_duration;
        self.ship.reset(self.tuning.field_center());
        self.thrusting = false;
        self.bullets.clear();
        self.hazards.clear();
        self.particles.clear();
        self.resume_phase = GamePhase::Playing;
        self.set_phase(GamePhase::WaveTransition);
        self.events.push(GameEvent::SessionStarted);
        log::info!("New game started (seed {})", self.seed);
    }

    /// Change phase, resetting the menu cursor when a menu is (re)entered
    pub fn set_phase(&mut self, phase: GamePhase) {
        if phase == self.phase {
            return;
        }
        log::debug!("Phase {:?} -> {:?}", self.phase, phase);
        if phase.has_menu() {
            self.menu_cursor = 0;
        }
        self.phase = phase;
    }

    /// Compare the session score against the high-water mark
    pub fn finalize_score(&mut self) {
        let previous = self.best.score;
        if self.best.record(self.score, self.wave) {
            log::info!("New high score {} (previous {})", self.score, previous);
            self.events.push(GameEvent::NewHighScore {
                score: self.score,
                wave: self.wave,
            });
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Purge dead bullets, hazards, and particles
    pub fn compact(&mut self) {
        self.bullets.compact();
        self.hazards.compact();
        self.particles.compact();
    }
}
