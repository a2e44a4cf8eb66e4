//! Particle emitters
//!
//! Effect requests (explosions, ship debris, thrust exhaust) become particle
//! records in the bounded particle population. Requests beyond the bound are
//! dropped rather than growing the population.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::population::Population;
use super::state::{HazardSize, Particle, ParticleTint};
use crate::rotate;

/// Burst shape for a hazard explosion
struct Burst {
    count: usize,
    speed: f32,
    life: f32,
}

fn burst_for(size: HazardSize) -> Burst {
    match size {
        HazardSize::Small => Burst {
            count: 6,
            speed: 3.0,
            life: 0.8,
        },
        HazardSize::Medium => Burst {
            count: 8,
            speed: 4.0,
            life: 1.2,
        },
        HazardSize::Large => Burst {
            count: 12,
            speed: 5.0,
            life: 1.5,
        },
    }
}

/// Ring of debris where a hazard broke apart. Returns particles accepted.
pub fn spawn_explosion(
    particles: &mut Population<Particle>,
    rng: &mut impl Rng,
    pos: Vec2,
    size: HazardSize,
) -> usize {
    let burst = burst_for(size);
    let batch: Vec<Particle> = (0..burst.count)
        .map(|i| {
            // Evenly spaced around the ring, nudged so bursts don't look stamped
            let angle = i as f32 / burst.count as f32 * TAU + rng.random_range(0.0..0.5);
            let speed = burst.speed * rng.random_range(0.5..=1.0);
            let life = burst.life * rng.random_range(0.7..=1.0);
            let tint = if rng.random_ratio(1, 3) {
                ParticleTint::Dim
            } else {
                ParticleTint::Bright
            };
            Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                life,
                max_life: life,
                size: rng.random_range(2.0..=4.0),
                tint,
                alive: true,
            }
        })
        .collect();
    particles.extend(batch)
}

/// Heavier, longer-lived debris when the ship is destroyed
pub fn spawn_ship_debris(
    particles: &mut Population<Particle>,
    rng: &mut impl Rng,
    pos: Vec2,
) -> usize {
    const COUNT: usize = 15;
    // First half glow hot, the rest is hull debris
    const HOT: usize = 8;

    let batch: Vec<Particle> = (0..COUNT)
        .map(|i| {
            let spread = Vec2::new(rng.random_range(-5.0..=5.0), rng.random_range(-5.0..=5.0));
            let angle = rng.random_range(0.0..TAU);
            let speed = rng.random_range(2.0..=8.0);
            let life = rng.random_range(2.0..=3.0);
            Particle {
                pos: pos + spread,
                vel: Vec2::from_angle(angle) * speed,
                life,
                max_life: life,
                size: rng.random_range(1.5..=4.5),
                tint: if i < HOT {
                    ParticleTint::Bright
                } else {
                    ParticleTint::Dim
                },
                alive: true,
            }
        })
        .collect();
    particles.extend(batch)
}

/// Short exhaust puffs behind a thrusting ship
pub fn spawn_thrust_trail(
    particles: &mut Population<Particle>,
    rng: &mut impl Rng,
    pos: Vec2,
    heading: f32,
) -> usize {
    const COUNT: usize = 3;

    // Exhaust leaves opposite to the nose
    let exhaust_dir = rotate(Vec2::new(0.0, 1.0), heading);
    let batch: Vec<Particle> = (0..COUNT)
        .map(|i| {
            let behind = rotate(Vec2::new(0.0, 15.0 + i as f32 * 5.0), heading);
            let jitter = Vec2::new(rng.random_range(-2.0..=2.0), rng.random_range(-2.0..=2.0));
            let spread = Vec2::new(rng.random_range(-1.0..=1.0), rng.random_range(-1.0..=1.0));
            let life = rng.random_range(0.3..=0.5);
            Particle {
                pos: pos + behind + jitter,
                vel: exhaust_dir * rng.random_range(1.0..=2.0) + spread,
                life,
                max_life: life,
                size: rng.random_range(1.0..=2.5),
                tint: if i == 0 {
                    ParticleTint::Bright
                } else {
                    ParticleTint::Exhaust
                },
                alive: true,
            }
        })
        .collect();
    particles.extend(batch)
}
