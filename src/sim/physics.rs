//! Per-tick motion integration
//!
//! Velocities are in field units per tick; only particle lifetimes consume
//! wall time (`dt`, seconds).

use glam::Vec2;

use super::particles::spawn_thrust_trail;
use super::population::{Live, Population};
use super::state::{Bullet, GameEvent, GameState, Hazard, Particle, Ship};
use super::tick::{Actions, TickInput};
use crate::tuning::Tuning;
use crate::{rotate, wrap_angle, wrap_position};

/// Nose offset in ship space, also the bullet muzzle
pub const SHIP_NOSE: Vec2 = Vec2::new(0.0, -10.0);
/// Wing tips in ship space
pub const SHIP_LEFT_WING: Vec2 = Vec2::new(-8.0, 8.0);
pub const SHIP_RIGHT_WING: Vec2 = Vec2::new(8.0, 8.0);

/// Hull triangle (nose, left wing, right wing) in field coordinates
pub fn ship_hull(ship: &Ship) -> [Vec2; 3] {
    [SHIP_NOSE, SHIP_LEFT_WING, SHIP_RIGHT_WING].map(|p| ship.pos + rotate(p, ship.heading))
}

/// Apply rotation, thrust, brake and fire input to the ship
pub fn apply_controls(state: &mut GameState, input: &TickInput) {
    let tuning = &state.tuning;
    let ship = &mut state.ship;

    if input.is_down(Actions::ROTATE_LEFT) {
        ship.heading = wrap_angle(ship.heading - tuning.rotation_step);
    }
    if input.is_down(Actions::ROTATE_RIGHT) {
        ship.heading = wrap_angle(ship.heading + tuning.rotation_step);
    }

    let thrusting = input.is_down(Actions::THRUST);
    if thrusting {
        ship.vel += rotate(Vec2::new(0.0, -tuning.thrust_impulse), ship.heading);
        spawn_thrust_trail(&mut state.particles, &mut state.rng, ship.pos, ship.heading);
    }

    if input.is_down(Actions::BRAKE) {
        apply_brake(ship, tuning);
    }

    set_thrusting(state, thrusting);

    if input.is_pressed(Actions::FIRE) {
        fire(state);
    }
}

/// Gentle deceleration plus a reverse impulse; never an instant stop
fn apply_brake(ship: &mut Ship, tuning: &Tuning) {
    let speed = ship.vel.length();
    if speed > tuning.brake_threshold {
        ship.vel -= ship.vel / speed * tuning.brake_force;
    }
    let reverse = rotate(Vec2::new(0.0, tuning.reverse_impulse), ship.heading);
    ship.vel += reverse * tuning.reverse_scale;
}

/// Track the thrust loop, notifying on edges only
pub fn set_thrusting(state: &mut GameState, thrusting: bool) {
    if thrusting == state.thrusting {
        return;
    }
    state.thrusting = thrusting;
    state.events.push(if thrusting {
        GameEvent::ThrustStarted
    } else {
        GameEvent::ThrustStopped
    });
}

/// Launch a bullet from the ship's nose
pub fn fire(state: &mut GameState) {
    let ship = &state.ship;
    let bullet = Bullet {
        pos: ship.pos + rotate(SHIP_NOSE, ship.heading),
        vel: ship.vel + rotate(Vec2::new(0.0, -state.tuning.bullet_speed), ship.heading),
        alive: true,
    };
    if state.bullets.push(bullet) {
        state.events.push(GameEvent::Shot);
    } else {
        log::debug!("Bullet limit reached, shot dropped");
    }
}

/// Drag, speed cap, integrate, wrap
pub fn integrate_ship(ship: &mut Ship, tuning: &Tuning) {
    ship.vel *= tuning.ship_drag;
    let speed = ship.vel.length();
    if speed > tuning.ship_max_speed {
        ship.vel = ship.vel / speed * tuning.ship_max_speed;
    }
    ship.pos = wrap_position(ship.pos + ship.vel, tuning.field());
}

/// Bullets fly straight and die once they leave the field
pub fn integrate_bullets(bullets: &mut Population<Bullet>, field: Vec2) {
    for bullet in bullets.iter_mut() {
        bullet.pos += bullet.vel;
        let outside = bullet.pos.x < 0.0
            || bullet.pos.x > field.x
            || bullet.pos.y < 0.0
            || bullet.pos.y > field.y;
        if outside {
            bullet.kill();
        }
    }
}

pub fn integrate_hazards(hazards: &mut Population<Hazard>, field: Vec2) {
    for hazard in hazards.iter_mut() {
        hazard.pos = wrap_position(hazard.pos + hazard.vel, field);
        hazard.heading = wrap_angle(hazard.heading + hazard.spin);
    }
}

/// Move, slow down and age particles; `dt` in seconds
pub fn integrate_particles(particles: &mut Population<Particle>, tuning: &Tuning, dt: f32) {
    let field = tuning.field();
    for particle in particles.iter_mut() {
        particle.pos = wrap_position(particle.pos + particle.vel, field);
        particle.vel *= tuning.particle_drag;
        particle.life -= dt;
        if particle.life <= 0.0 {
            particle.life = 0.0;
            particle.kill();
        }
    }
}
