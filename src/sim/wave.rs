//! Wave sizing, spawning, and the safe-respawn gate

use glam::Vec2;
use rand::Rng;

use super::population::Population;
use super::state::{GameEvent, GamePhase, GameState, Hazard, HazardSize};
use super::tick::{Actions, TickInput};
use crate::tuning::Tuning;

/// Inputs that end the spawn guard once its lockout has elapsed
pub const RESPAWN_ACTIONS: Actions = Actions::THRUST
    .union(Actions::BRAKE)
    .union(Actions::ROTATE_LEFT)
    .union(Actions::ROTATE_RIGHT)
    .union(Actions::FIRE)
    .union(Actions::CONFIRM)
    .union(Actions::SELECT);

/// Number of hazards that open wave `wave` (1-based)
pub fn wave_hazard_count(tuning: &Tuning, wave: u32) -> usize {
    (tuning.base_hazard_count + wave) as usize
}

/// Per-axis speed multiplier for wave `wave`
pub fn wave_speed_multiplier(tuning: &Tuning, wave: u32) -> f32 {
    1.0 + wave.saturating_sub(1) as f32 * tuning.wave_speed_step
}

/// Pick a spawn point outside the exclusion box around the field center
pub fn spawn_position(tuning: &Tuning, rng: &mut impl Rng) -> Vec2 {
    let center = tuning.field_center();
    let width = tuning.field_width as i32;
    let height = tuning.field_height as i32;
    loop {
        let pos = Vec2::new(
            rng.random_range(0..=width) as f32,
            rng.random_range(0..=height) as f32,
        );
        let inside = (pos.x - center.x).abs() < tuning.spawn_exclusion
            && (pos.y - center.y).abs() < tuning.spawn_exclusion;
        if !inside {
            return pos;
        }
    }
}

/// Replace the hazard population with a fresh wave of large hazards
pub fn spawn_wave(
    hazards: &mut Population<Hazard>,
    tuning: &Tuning,
    rng: &mut impl Rng,
    wave: u32,
) -> usize {
    hazards.clear();

    let count = wave_hazard_count(tuning, wave);
    let multiplier = wave_speed_multiplier(tuning, wave);
    let speed = tuning.hazard_base_speed;
    for _ in 0..count {
        let pos = spawn_position(tuning, rng);
        let vel = Vec2::new(
            rng.random_range(-speed..=speed) as f32,
            rng.random_range(-speed..=speed) as f32,
        ) * multiplier;
        let mut hazard = Hazard::new(pos, vel, HazardSize::Large);
        if tuning.hazard_max_spin > 0.0 {
            hazard.spin = rng.random_range(-tuning.hazard_max_spin..=tuning.hazard_max_spin);
        }
        hazards.push(hazard);
    }
    count
}

/// Countdown expired: bring in the current wave and wait for the player
pub fn begin_wave(state: &mut GameState) {
    let spawned = spawn_wave(&mut state.hazards, &state.tuning, &mut state.rng, state.wave);
    log::info!("Wave {} started with {} hazards", state.wave, spawned);
    state.events.push(GameEvent::WaveStarted {
        wave: state.wave,
        hazards: spawned,
    });
    state.set_phase(GamePhase::WaitingToSpawn);
}

/// Advance to the next wave once every hazard is gone.
///
/// Expects a compacted hazard population. Returns true when the wave ended.
pub fn check_wave_complete(state: &mut GameState) -> bool {
    if !state.hazards.all_dead() {
        return false;
    }
    log::info!("Wave {} cleared (score {})", state.wave, state.score);
    state.events.push(GameEvent::WaveCleared { wave: state.wave });
    state.wave += 1;
    state.wave_timer = state.tuning.wave_transition_duration;
    state.set_phase(GamePhase::WaveTransition);
    true
}

/// Spawn guard: count down the lockout, then respawn on a qualifying press.
///
/// Returns true when the ship was put back into play.
pub fn update_spawn_guard(state: &mut GameState, input: &TickInput, dt: f32) -> bool {
    if state.spawn_cooldown > 0.0 {
        state.spawn_cooldown = (state.spawn_cooldown - dt).max(0.0);
    }
    if state.spawn_cooldown > 0.0 || !input.pressed.intersects(RESPAWN_ACTIONS) {
        return false;
    }
    respawn_ship(state);
    true
}

/// Ship back at the center, motionless, facing up
pub fn respawn_ship(state: &mut GameState) {
    state.ship.reset(state.tuning.field_center());
    state.events.push(GameEvent::ShipSpawned);
    state.set_phase(GamePhase::Playing);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::population::Live;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_wave_sizing() {
        let tuning = Tuning::default();
        assert_eq!(wave_hazard_count(&tuning, 1), 4);
        assert_eq!(wave_hazard_count(&tuning, 2), 5);
        assert_eq!(wave_speed_multiplier(&tuning, 1), 1.0);
        assert!((wave_speed_multiplier(&tuning, 3) - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_wave_one_is_four_large_at_base_speed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(11);
        let mut hazards = Population::unbounded();
        assert_eq!(spawn_wave(&mut hazards, &tuning, &mut rng, 1), 4);
        assert_eq!(hazards.live_count(), 4);
        for h in hazards.iter() {
            assert_eq!(h.size, HazardSize::Large);
            // Multiplier 1.0 keeps velocities on integer steps within the base range
            assert!(h.vel.x.abs() <= 2.0 && h.vel.y.abs() <= 2.0);
            assert_eq!(h.vel.x.fract(), 0.0);
        }
    }

    #[test]
    fn test_spawns_avoid_center_box() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..500 {
            let pos = spawn_position(&tuning, &mut rng);
            let inside = (pos.x - 400.0).abs() < 100.0 && (pos.y - 300.0).abs() < 100.0;
            assert!(!inside, "{pos:?} spawned inside the exclusion box");
            assert!((0.0..=800.0).contains(&pos.x) && (0.0..=600.0).contains(&pos.y));
        }
    }

    #[test]
    fn test_spawn_wave_replaces_leftovers() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(5);
        let mut hazards = Population::unbounded();
        hazards.push(Hazard::new(Vec2::ZERO, Vec2::ZERO, HazardSize::Small));
        spawn_wave(&mut hazards, &tuning, &mut rng, 3);
        assert_eq!(hazards.len(), 6);
    }

    #[test]
    fn test_wave_complete_advances() {
        let mut state = GameState::new(1, Tuning::default());
        state.start_new_game();
        state.phase = GamePhase::Playing;
        state.hazards.push(Hazard::new(Vec2::ZERO, Vec2::ZERO, HazardSize::Small));
        assert!(!check_wave_complete(&mut state));

        state.hazards.iter_mut().for_each(|h| h.kill());
        state.compact();
        assert!(check_wave_complete(&mut state));
        assert_eq!(state.wave, 2);
        assert_eq!(state.phase, GamePhase::WaveTransition);
        assert_eq!(state.wave_timer, 2.0);
    }

    #[test]
    fn test_spawn_guard_ignores_input_during_lockout() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::WaitingToSpawn;
        state.spawn_cooldown = 1.0;
        state.ship.pos = Vec2::new(10.0, 10.0);
        let fire = TickInput::pressed(Actions::FIRE);

        assert!(!update_spawn_guard(&mut state, &fire, 0.5));
        assert_eq!(state.phase, GamePhase::WaitingToSpawn);

        // Lockout expires on this tick and the press is honored
        assert!(update_spawn_guard(&mut state, &fire, 0.5));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(state.ship.vel, Vec2::ZERO);
        assert_eq!(state.ship.heading, 0.0);
    }

    #[test]
    fn test_spawn_guard_needs_a_press() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::WaitingToSpawn;
        // Holding thrust through the lockout is not a fresh press
        let held = TickInput::held(Actions::THRUST);
        assert!(!update_spawn_guard(&mut state, &held, 0.1));
        // Pause is not a respawn input
        assert!(!update_spawn_guard(&mut state, &TickInput::pressed(Actions::PAUSE), 0.1));
        assert!(update_spawn_guard(&mut state, &TickInput::pressed(Actions::ROTATE_LEFT), 0.1));
    }
}
