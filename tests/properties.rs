//! Simulation invariants checked over random seeds and input streams

use glam::Vec2;
use proptest::prelude::*;

use rockfall::consts::{MAX_LIVES, SIM_DT};
use rockfall::sim::collision::resolve_bullet_hits;
use rockfall::sim::{
    Actions, Bullet, GamePhase, GameState, Hazard, HazardSize, TickInput, tick,
};
use rockfall::{Tuning, wrap_position};

fn action_set() -> impl Strategy<Value = Actions> {
    any::<u16>().prop_map(Actions::from_bits_truncate)
}

fn tick_input() -> impl Strategy<Value = TickInput> {
    (action_set(), action_set()).prop_map(|(down, pressed)| TickInput {
        down: down | pressed,
        pressed,
    })
}

fn hazard_size() -> impl Strategy<Value = HazardSize> {
    prop_oneof![
        Just(HazardSize::Small),
        Just(HazardSize::Medium),
        Just(HazardSize::Large),
    ]
}

/// A session that has just entered play
fn playing(seed: u64) -> GameState {
    let mut state = GameState::new(seed, Tuning::default());
    state.start_new_game();
    while state.phase == GamePhase::WaveTransition {
        tick(&mut state, &TickInput::default(), SIM_DT);
    }
    state.spawn_cooldown = 0.0;
    tick(&mut state, &TickInput::pressed(Actions::FIRE), SIM_DT);
    state.drain_events();
    state
}

/// Inputs without menu/pause/cancel, so the session stays in play
fn flight_input() -> impl Strategy<Value = TickInput> {
    let flight = Actions::ROTATE_LEFT
        | Actions::ROTATE_RIGHT
        | Actions::THRUST
        | Actions::BRAKE
        | Actions::FIRE;
    tick_input().prop_map(move |input| TickInput {
        down: input.down & flight,
        pressed: input.pressed & flight,
    })
}

/// Menu-like phases and how a running session reaches them
#[derive(Debug, Clone, Copy)]
enum Stopover {
    MenuFromPlay,
    MenuFromWaiting,
    NewGameConfirm,
    HighScores,
    GameOver,
}

fn stopover() -> impl Strategy<Value = Stopover> {
    prop_oneof![
        Just(Stopover::MenuFromPlay),
        Just(Stopover::MenuFromWaiting),
        Just(Stopover::NewGameConfirm),
        Just(Stopover::HighScores),
        Just(Stopover::GameOver),
    ]
}

fn press(state: &mut GameState, actions: Actions) {
    tick(state, &TickInput::pressed(actions), SIM_DT);
}

/// Drive a session in play into `stop`, returning the phase it lands in
fn enter(state: &mut GameState, stop: Stopover) -> GamePhase {
    match stop {
        Stopover::MenuFromPlay => {
            press(state, Actions::CANCEL);
            GamePhase::Menu
        }
        Stopover::MenuFromWaiting => {
            state.start_new_game();
            while state.phase == GamePhase::WaveTransition {
                tick(state, &TickInput::default(), SIM_DT);
            }
            press(state, Actions::CANCEL);
            GamePhase::Menu
        }
        Stopover::NewGameConfirm => {
            // Resume Game, New Game, ...
            press(state, Actions::CANCEL);
            press(state, Actions::NAV_DOWN);
            press(state, Actions::SELECT);
            GamePhase::NewGameConfirm
        }
        Stopover::HighScores => {
            press(state, Actions::CANCEL);
            press(state, Actions::NAV_DOWN);
            press(state, Actions::NAV_DOWN);
            press(state, Actions::SELECT);
            GamePhase::HighScores
        }
        Stopover::GameOver => {
            state.lives = 1;
            state.bullets.clear();
            state.ship.vel = Vec2::ZERO;
            let pos = state.ship.pos;
            state.hazards.push(Hazard::new(pos, Vec2::ZERO, HazardSize::Small));
            tick(state, &TickInput::default(), SIM_DT);
            GamePhase::GameOver
        }
    }
}

proptest! {
    #[test]
    fn wrapped_positions_stay_in_field(x in -50.0f32..850.0, y in -50.0f32..650.0) {
        let p = wrap_position(Vec2::new(x, y), Vec2::new(800.0, 600.0));
        prop_assert!((0.0..=800.0).contains(&p.x));
        prop_assert!((0.0..=600.0).contains(&p.y));
    }

    #[test]
    fn score_and_lives_stay_sane(seed in any::<u64>(), inputs in prop::collection::vec(tick_input(), 1..400)) {
        let mut state = GameState::new(seed, Tuning::default());
        let mut last_score = 0;
        for input in &inputs {
            let session_before = state.has_active_game();
            tick(&mut state, input, SIM_DT);
            for event in state.drain_events() {
                if matches!(event, rockfall::sim::GameEvent::SessionStarted) {
                    last_score = 0;
                }
            }
            prop_assert!(state.lives <= MAX_LIVES);
            if session_before && state.has_active_game() {
                prop_assert!(state.score >= last_score);
            }
            if state.phase == GamePhase::GameOver {
                prop_assert_eq!(state.lives, 0);
            }
            last_score = state.score;
        }
    }

    #[test]
    fn entities_stay_in_field_during_play(seed in any::<u64>(), inputs in prop::collection::vec(flight_input(), 1..300)) {
        let mut state = playing(seed);
        for input in &inputs {
            tick(&mut state, input, SIM_DT);
            let ship = state.ship.pos;
            prop_assert!((0.0..=800.0).contains(&ship.x) && (0.0..=600.0).contains(&ship.y));
            for h in state.hazards.iter() {
                prop_assert!((0.0..=800.0).contains(&h.pos.x) && (0.0..=600.0).contains(&h.pos.y));
            }
            for b in state.bullets.iter() {
                prop_assert!((0.0..=800.0).contains(&b.pos.x) && (0.0..=600.0).contains(&b.pos.y));
            }
            prop_assert!(state.ship.vel.length() <= state.tuning.ship_max_speed + 1e-3);
        }
    }

    #[test]
    fn pause_freezes_everything(seed in any::<u64>(), warmup in prop::collection::vec(flight_input(), 0..60), during in prop::collection::vec(tick_input(), 1..60)) {
        let mut state = playing(seed);
        for input in &warmup {
            tick(&mut state, input, SIM_DT);
        }
        prop_assume!(state.phase == GamePhase::Playing);
        tick(&mut state, &TickInput::pressed(Actions::PAUSE), SIM_DT);
        let frozen = state.clone();

        for input in &during {
            // Anything that would leave the pause menu ends the check
            if input.pressed.intersects(Actions::PAUSE | Actions::SELECT) {
                break;
            }
            tick(&mut state, input, SIM_DT);
            prop_assert_eq!(&state.ship, &frozen.ship);
            prop_assert_eq!(&state.hazards, &frozen.hazards);
            prop_assert_eq!(&state.bullets, &frozen.bullets);
            prop_assert_eq!(&state.particles, &frozen.particles);
            prop_assert_eq!(state.wave_timer, frozen.wave_timer);
            prop_assert_eq!(state.spawn_cooldown, frozen.spawn_cooldown);
            prop_assert_eq!(state.time_ticks, frozen.time_ticks);
        }
    }

    #[test]
    fn menu_like_phases_freeze_the_field(seed in any::<u64>(), stop in stopover(), warmup in prop::collection::vec(flight_input(), 0..60), during in prop::collection::vec(tick_input(), 1..60)) {
        let mut state = playing(seed);
        for input in &warmup {
            tick(&mut state, input, SIM_DT);
        }
        prop_assume!(state.phase == GamePhase::Playing);

        let target = enter(&mut state, stop);
        prop_assert_eq!(state.phase, target);
        let frozen = state.clone();

        for input in &during {
            tick(&mut state, input, SIM_DT);
            // Leaving the phase ends the check
            if state.phase != target {
                break;
            }
            prop_assert_eq!(&state.ship, &frozen.ship);
            prop_assert_eq!(&state.hazards, &frozen.hazards);
            prop_assert_eq!(&state.bullets, &frozen.bullets);
            prop_assert_eq!(&state.particles, &frozen.particles);
            prop_assert_eq!(state.wave_timer, frozen.wave_timer);
            prop_assert_eq!(state.spawn_cooldown, frozen.spawn_cooldown);
            prop_assert_eq!(state.time_ticks, frozen.time_ticks);
        }
    }

    #[test]
    fn destruction_splits_one_class_down(seed in any::<u64>(), size in hazard_size(), x in 50.0f32..750.0, y in 50.0f32..550.0) {
        let mut state = GameState::new(seed, Tuning::default());
        let pos = Vec2::new(x, y);
        state.hazards.push(Hazard::new(pos, Vec2::new(1.0, 0.0), size));
        state.bullets.push(Bullet { pos, vel: Vec2::ZERO, alive: true });

        prop_assert_eq!(resolve_bullet_hits(&mut state), 1);
        prop_assert_eq!(state.score, size.points());
        state.compact();
        match size.split() {
            Some(child) => {
                prop_assert_eq!(state.hazards.len(), 2);
                prop_assert!(state.hazards.iter().all(|h| h.size == child && h.pos == pos));
            }
            None => prop_assert!(state.hazards.is_empty()),
        }
    }

    #[test]
    fn compaction_is_idempotent(seed in any::<u64>(), inputs in prop::collection::vec(flight_input(), 1..120)) {
        let mut state = playing(seed);
        for input in &inputs {
            tick(&mut state, input, SIM_DT);
        }
        state.compact();
        let once = state.clone();
        state.compact();
        prop_assert_eq!(&state.bullets, &once.bullets);
        prop_assert_eq!(&state.hazards, &once.hazards);
        prop_assert_eq!(&state.particles, &once.particles);
        prop_assert!(state.particles.len() <= state.particles.limit());
        prop_assert!(state.bullets.len() <= state.bullets.limit());
    }
}
