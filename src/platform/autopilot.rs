//! Demo autopilot (attract mode)
//!
//! Plays the game from the outside, through the same `TickInput` a human
//! produces: starts a session from the menu, waits for a clear spawn, hunts
//! the nearest hazard and restarts after game over.

use glam::Vec2;

use super::InputSource;
use crate::menu::{MenuAction, MenuContext, MenuSnapshot, build_menu_items};
use crate::sim::{Actions, GamePhase, GameState, Hazard, TickInput};

/// Hazards closer than this to the field center delay a respawn
const SAFE_SPAWN_RADIUS: f32 = 120.0;
/// Respawn anyway after waiting this long (ticks)
const MAX_SPAWN_WAIT: u32 = 240;
/// Ticks between shots
const FIRE_INTERVAL: u32 = 8;
/// Aim error (degrees) that still counts as lined up
const AIM_TOLERANCE: f32 = 8.0;
/// Ticks to linger on the game over screen before restarting
const GAME_OVER_LINGER: u32 = 120;

#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    /// Ticks spent in the current phase
    phase_ticks: u32,
    last_phase: Option<GamePhase>,
    since_shot: u32,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn menu(&self, state: &GameState) -> TickInput {
        let items = build_menu_items(MenuContext::Main, &MenuSnapshot::of(state));
        let wanted = if state.has_active_game() {
            MenuAction::Resume
        } else {
            MenuAction::NewGame
        };
        match items.iter().position(|item| item.action == wanted) {
            Some(row) if row == state.menu_cursor => TickInput::pressed(Actions::SELECT),
            Some(_) => TickInput::pressed(Actions::NAV_DOWN),
            None => TickInput::default(),
        }
    }

    fn waiting(&self, state: &GameState) -> TickInput {
        if state.spawn_cooldown > 0.0 {
            return TickInput::default();
        }
        let center = state.tuning.field_center();
        let clear = state
            .hazards
            .iter()
            .all(|h| h.pos.distance(center) > SAFE_SPAWN_RADIUS + h.radius());
        if clear || self.phase_ticks >= MAX_SPAWN_WAIT {
            TickInput::pressed(Actions::FIRE)
        } else {
            TickInput::default()
        }
    }

    fn playing(&mut self, state: &GameState) -> TickInput {
        let ship = &state.ship;
        let Some(target) = nearest_hazard(ship.pos, state.hazards.iter()) else {
            return TickInput::default();
        };

        // Slow aim wobble so runs do not look stamped out
        let wobble = (state.time_ticks as f32 * 0.05).sin() * 4.0;
        let to_target = target.pos - ship.pos;
        let error = signed_angle(heading_towards(to_target) + wobble - ship.heading);

        let mut down = Actions::empty();
        let mut pressed = Actions::empty();
        if error.abs() > state.tuning.rotation_step {
            down |= if error > 0.0 {
                Actions::ROTATE_RIGHT
            } else {
                Actions::ROTATE_LEFT
            };
        }

        let aligned = error.abs() < AIM_TOLERANCE;
        let distance = to_target.length();
        if aligned && distance > 250.0 && ship.vel.length() < 3.0 {
            down |= Actions::THRUST;
        } else if ship.vel.length() > 4.0 {
            down |= Actions::BRAKE;
        }

        self.since_shot += 1;
        if aligned && self.since_shot >= FIRE_INTERVAL {
            self.since_shot = 0;
            pressed |= Actions::FIRE;
            down |= Actions::FIRE;
        }

        TickInput { down, pressed }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        if self.last_phase != Some(state.phase) {
            self.last_phase = Some(state.phase);
            self.phase_ticks = 0;
        } else {
            self.phase_ticks = self.phase_ticks.saturating_add(1);
        }

        match state.phase {
            GamePhase::Menu => self.menu(state),
            GamePhase::Paused => TickInput::pressed(Actions::PAUSE),
            GamePhase::NewGameConfirm => TickInput::pressed(Actions::CONFIRM),
            GamePhase::HighScores => TickInput::pressed(Actions::CANCEL),
            GamePhase::WaveTransition => TickInput::default(),
            GamePhase::WaitingToSpawn => self.waiting(state),
            GamePhase::Playing => self.playing(state),
            GamePhase::GameOver if self.phase_ticks >= GAME_OVER_LINGER => {
                TickInput::pressed(Actions::CONFIRM)
            }
            GamePhase::GameOver => TickInput::default(),
        }
    }
}

fn nearest_hazard<'a>(
    from: Vec2,
    hazards: impl Iterator<Item = &'a Hazard>,
) -> Option<&'a Hazard> {
    hazards.min_by(|a, b| {
        a.pos
            .distance_squared(from)
            .partial_cmp(&b.pos.distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

/// Ship heading (0 = up, clockwise) that points along `dir`
fn heading_towards(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y).to_degrees()
}

/// Normalize to (-180, 180]
fn signed_angle(degrees: f32) -> f32 {
    let a = degrees.rem_euclid(360.0);
    if a > 180.0 { a - 360.0 } else { a }
}
