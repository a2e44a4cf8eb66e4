//! Collision detection and response
//!
//! Everything here is circle vs circle. Bullets shatter hazards into smaller
//! fragments; hazards cost the ship a life but survive the impact.

use glam::Vec2;
use rand::Rng;

use super::particles::{spawn_explosion, spawn_ship_debris};
use super::population::{Live, Population};
use super::state::{Bullet, GameEvent, GamePhase, GameState, Hazard, HazardSize, Ship};

/// Strict overlap test: touching circles do not collide
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) < radius_a + radius_b
}

/// A hazard destroyed by a bullet this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardHit {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: HazardSize,
}

/// Test every live bullet against every live hazard.
///
/// Both parties of a hit are killed. A bullet stops at its first hit, so it
/// can destroy at most one hazard per tick.
pub fn bullets_vs_hazards(
    bullets: &mut Population<Bullet>,
    hazards: &mut Population<Hazard>,
    bullet_radius: f32,
) -> Vec<HazardHit> {
    let mut hits = Vec::new();
    for bullet in bullets.iter_mut() {
        let target = hazards
            .iter_mut()
            .find(|h| circles_overlap(bullet.pos, bullet_radius, h.pos, h.radius()));
        if let Some(hazard) = target {
            bullet.kill();
            hazard.kill();
            hits.push(HazardHit {
                pos: hazard.pos,
                vel: hazard.vel,
                size: hazard.size,
            });
        }
    }
    hits
}

/// First live hazard touching the ship, if any
pub fn ship_vs_hazards<'a>(
    ship: &Ship,
    hazards: &'a Population<Hazard>,
    ship_radius: f32,
) -> Option<&'a Hazard> {
    hazards
        .iter()
        .find(|h| circles_overlap(ship.pos, ship_radius, h.pos, h.radius()))
}

/// The two children of a destroyed hazard (none for the smallest size)
pub fn fragments(hit: &HazardHit, rng: &mut impl Rng, jitter: i32, max_spin: f32) -> Vec<Hazard> {
    let Some(child_size) = hit.size.split() else {
        return Vec::new();
    };
    (0..2)
        .map(|_| {
            let nudge = Vec2::new(
                rng.random_range(-jitter..=jitter) as f32,
                rng.random_range(-jitter..=jitter) as f32,
            );
            let mut child = Hazard::new(hit.pos, hit.vel + nudge, child_size);
            if max_spin > 0.0 {
                child.spin = rng.random_range(-max_spin..=max_spin);
            }
            child
        })
        .collect()
}

/// Bullet/hazard pass: kill, score, split, and trigger effects.
///
/// Fragments join the population after the pass, so they cannot be hit by
/// the bullets that created them. Returns the number of hazards destroyed.
pub fn resolve_bullet_hits(state: &mut GameState) -> usize {
    let hits = bullets_vs_hazards(
        &mut state.bullets,
        &mut state.hazards,
        state.tuning.bullet_radius,
    );

    let mut children = Vec::new();
    for hit in &hits {
        state.score += hit.size.points();
        children.extend(fragments(
            hit,
            &mut state.rng,
            state.tuning.fragment_jitter,
            state.tuning.hazard_max_spin,
        ));
        spawn_explosion(&mut state.particles, &mut state.rng, hit.pos, hit.size);
        state.events.push(GameEvent::HazardDestroyed {
            size: hit.size,
            pos: hit.pos,
        });
        log::debug!("{:?} hazard destroyed at {:?}", hit.size, hit.pos);
    }
    state.hazards.extend(children);
    hits.len()
}

/// Ship/hazard pass: lose a life and route to respawn or game over.
///
/// Returns true when the ship was hit this tick.
pub fn resolve_ship_collision(state: &mut GameState) -> bool {
    if ship_vs_hazards(&state.ship, &state.hazards, state.tuning.ship_radius).is_none() {
        return false;
    }

    let pos = state.ship.pos;
    spawn_ship_debris(&mut state.particles, &mut state.rng, pos);
    state.lives = state.lives.saturating_sub(1);
    state.events.push(GameEvent::ShipDestroyed {
        pos,
        lives_left: state.lives,
    });

    if state.lives > 0 {
        log::info!("Ship destroyed, {} lives left", state.lives);
        state.spawn_cooldown = state.tuning.spawn_cooldown_duration;
        state.set_phase(GamePhase::WaitingToSpawn);
    } else {
        log::info!("Game over: score {} on wave {}", state.score, state.wave);
        state.finalize_score();
        state.set_phase(GamePhase::GameOver);
        state.events.push(GameEvent::GameOver {
            score: state.score,
            wave: state.wave,
        });
    }
    true
}
