//! Fixed timestep simulation tick
//!
//! Advances the session state machine by one step. Every phase has its own
//! handler; triggers a phase does not list are ignored.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::collision::{resolve_bullet_hits, resolve_ship_collision};
use super::physics::{
    apply_controls, integrate_bullets, integrate_hazards, integrate_particles, integrate_ship,
    set_thrusting,
};
use super::state::{GameEvent, GamePhase, GameState};
use super::wave::{begin_wave, check_wave_complete, update_spawn_guard};
use crate::consts::MAX_SCALE;
use crate::menu::{
    MenuAction, MenuContext, MenuSnapshot, build_menu_items, cursor_down, cursor_up, next_scale,
};

bitflags! {
    /// Logical input actions, independent of keys or buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Actions: u16 {
        const ROTATE_LEFT  = 1 << 0;
        const ROTATE_RIGHT = 1 << 1;
        const THRUST       = 1 << 2;
        const BRAKE        = 1 << 3;
        const FIRE         = 1 << 4;
        const PAUSE        = 1 << 5;
        const CONFIRM      = 1 << 6;
        const CANCEL       = 1 << 7;
        const NAV_UP       = 1 << 8;
        const NAV_DOWN     = 1 << 9;
        const SELECT       = 1 << 10;
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Actions held during this tick
    pub down: Actions,
    /// Actions that went down this tick (edge triggered)
    pub pressed: Actions,
}

impl TickInput {
    /// Actions held, without a fresh press
    pub fn held(actions: Actions) -> Self {
        Self {
            down: actions,
            pressed: Actions::empty(),
        }
    }

    /// Actions pressed this tick (and therefore also held)
    pub fn pressed(actions: Actions) -> Self {
        Self {
            down: actions,
            pressed: actions,
        }
    }

    #[inline]
    pub fn is_down(&self, action: Actions) -> bool {
        self.down.contains(action)
    }

    #[inline]
    pub fn is_pressed(&self, action: Actions) -> bool {
        self.pressed.contains(action)
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    match state.phase {
        GamePhase::Menu | GamePhase::Paused => tick_menu(state, input),
        GamePhase::NewGameConfirm => {
            if input.is_pressed(Actions::CONFIRM) {
                state.start_new_game();
            } else if input.is_pressed(Actions::CANCEL) {
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::HighScores => {
            if input
                .pressed
                .intersects(Actions::CANCEL | Actions::SELECT | Actions::CONFIRM)
            {
                state.set_phase(GamePhase::Menu);
            }
        }
        GamePhase::WaveTransition => {
            state.wave_timer -= dt;
            if state.wave_timer <= 0.0 {
                state.wave_timer = 0.0;
                begin_wave(state);
            }
        }
        GamePhase::WaitingToSpawn => tick_waiting(state, input, dt),
        GamePhase::Playing => tick_playing(state, input, dt),
        GamePhase::GameOver => {
            if input.pressed.intersects(Actions::CONFIRM | Actions::SELECT) {
                state.start_new_game();
            } else if input.is_pressed(Actions::CANCEL) {
                state.set_phase(GamePhase::Menu);
            }
        }
    }
}

/// Leave gameplay for the main menu, remembering where to resume
fn leave_to_menu(state: &mut GameState) {
    state.resume_phase = state.phase;
    set_thrusting(state, false);
    state.set_phase(GamePhase::Menu);
}

fn tick_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.is_pressed(Actions::CANCEL) {
        leave_to_menu(state);
        return;
    }
    if input.is_pressed(Actions::PAUSE) {
        set_thrusting(state, false);
        state.events.push(GameEvent::Paused);
        state.set_phase(GamePhase::Paused);
        return;
    }

    apply_controls(state, input);

    let field = state.tuning.field();
    integrate_ship(&mut state.ship, &state.tuning);
    integrate_bullets(&mut state.bullets, field);
    integrate_hazards(&mut state.hazards, field);
    integrate_particles(&mut state.particles, &state.tuning, dt);

    resolve_bullet_hits(state);
    resolve_ship_collision(state);

    state.compact();
    if state.phase == GamePhase::Playing {
        check_wave_complete(state);
    }

    state.time_ticks += 1;

    // Death or wave end silences the thrust loop
    if state.phase != GamePhase::Playing {
        set_thrusting(state, false);
    }
}

fn tick_waiting(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.is_pressed(Actions::CANCEL) {
        leave_to_menu(state);
        return;
    }

    update_spawn_guard(state, input, dt);

    // Hazards keep drifting while the player decides; nothing collides
    let field = state.tuning.field();
    integrate_hazards(&mut state.hazards, field);
    integrate_bullets(&mut state.bullets, field);
    integrate_particles(&mut state.particles, &state.tuning, dt);
    state.compact();

    state.time_ticks += 1;
}

fn tick_menu(state: &mut GameState, input: &TickInput) {
    let context = if state.phase == GamePhase::Paused {
        MenuContext::Paused
    } else {
        MenuContext::Main
    };

    if context == MenuContext::Paused && input.is_pressed(Actions::PAUSE) {
        resume(state, GamePhase::Playing);
        return;
    }

    let items = build_menu_items(context, &MenuSnapshot::of(state));
    if items.is_empty() {
        return;
    }
    state.menu_cursor = state.menu_cursor.min(items.len() - 1);
    if input.is_pressed(Actions::NAV_UP) {
        state.menu_cursor = cursor_up(state.menu_cursor, items.len());
    }
    if input.is_pressed(Actions::NAV_DOWN) {
        state.menu_cursor = cursor_down(state.menu_cursor, items.len());
    }
    if input.is_pressed(Actions::SELECT) {
        let action = items[state.menu_cursor].action;
        select_menu_action(state, action);
    }
}

fn resume(state: &mut GameState, phase: GamePhase) {
    state.events.push(GameEvent::Resumed);
    state.set_phase(phase);
}

/// Execute a menu row
pub fn select_menu_action(state: &mut GameState, action: MenuAction) {
    log::debug!("Menu action {:?}", action);
    match action {
        MenuAction::Resume => {
            if state.has_active_game() {
                let phase = state.resume_phase;
                resume(state, phase);
            }
        }
        MenuAction::NewGame => {
            if state.has_active_game() {
                state.set_phase(GamePhase::NewGameConfirm);
            } else {
                state.start_new_game();
            }
        }
        MenuAction::HighScores => state.set_phase(GamePhase::HighScores),
        MenuAction::CycleScale => {
            let scale = next_scale(state.display_scale, MAX_SCALE);
            state.set_display_scale(scale);
            state
                .events
                .push(GameEvent::DisplayScaleChanged(state.display_scale));
        }
        MenuAction::Exit => {
            log::info!("Exit requested from menu");
            state.events.push(GameEvent::ExitRequested);
        }
        MenuAction::Continue => resume(state, GamePhase::Playing),
        MenuAction::MainMenu => {
            state.resume_phase = GamePhase::Playing;
            state.set_phase(GamePhase::Menu);
        }
    }
}
